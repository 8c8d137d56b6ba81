/* src/server/adapter/axum/src/handler/content.rs */

use pujari_core::PageView;
use pujari_injector::escape_html;

/// Content marker filled into the shell's `<!--pujari:content-->` slot.
pub(super) fn render_view(view: &PageView) -> String {
  match view {
    PageView::Page(page) => format!(r#"<main data-page="{page}"></main>"#),
    PageView::Services { category } => format!(
      r#"<main data-page="services" data-category="{}"></main>"#,
      escape_html(category)
    ),
    PageView::BlogList(posts) => {
      let items: String = posts
        .iter()
        .map(|post| {
          format!(
            r#"<li><a href="/blog/{}">{}</a></li>"#,
            escape_html(&post.slug),
            escape_html(&post.title)
          )
        })
        .collect();
      format!(r#"<main data-page="blog"><ul>{items}</ul></main>"#)
    }
    PageView::BlogPost(post) => {
      let excerpt = post
        .excerpt
        .as_deref()
        .map(|text| format!("<p>{}</p>", escape_html(text)))
        .unwrap_or_default();
      format!(
        r#"<main data-page="blog-detail"><article><h1>{}</h1>{excerpt}</article></main>"#,
        escape_html(&post.title)
      )
    }
    PageView::BlogNotFound { back_path, .. } => format!(
      r#"<main data-page="blog-detail" data-state="not-found"><h1>Article not found</h1><a href="{back_path}">Back to blog</a></main>"#
    ),
  }
}

/// Marker for paths no route matches.
pub(super) fn render_not_found() -> String {
  r#"<main data-page="home" data-state="not-found"></main>"#.to_string()
}
