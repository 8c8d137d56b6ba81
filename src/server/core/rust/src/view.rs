/* src/server/core/rust/src/view.rs */

use pujari_engine::{NavigationState, PageId};

use crate::source::BlogPost;

pub const BLOG_BACK_PATH: &str = "/blog";

/// What the content area shows for a navigation state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageView {
  /// A page without per-state data.
  Page(PageId),
  Services { category: String },
  BlogList(Vec<BlogPost>),
  BlogPost(BlogPost),
  /// Blog detail for an id missing from the published list.
  BlogNotFound { slug: String, back_path: &'static str },
}

/// Pick the view for `state`. Unknown pages render the home page; a blog id
/// absent from `posts` renders the not-found state.
pub fn select_page(state: &NavigationState, posts: &[BlogPost]) -> PageView {
  match &state.current_page {
    PageId::Services => PageView::Services { category: state.current_category.clone() },
    PageId::Blog => PageView::BlogList(posts.to_vec()),
    PageId::BlogDetail => match posts.iter().find(|p| p.slug == state.current_blog_id) {
      Some(post) if !state.current_blog_id.is_empty() => PageView::BlogPost(post.clone()),
      _ => PageView::BlogNotFound {
        slug: state.current_blog_id.clone(),
        back_path: BLOG_BACK_PATH,
      },
    },
    PageId::Other(slug) => {
      tracing::debug!(page = %slug, "unknown page, rendering home");
      PageView::Page(PageId::Home)
    }
    page => PageView::Page(page.clone()),
  }
}

impl PageView {
  /// Page the view belongs to.
  pub fn page(&self) -> PageId {
    match self {
      Self::Page(page) => page.clone(),
      Self::Services { .. } => PageId::Services,
      Self::BlogList(_) => PageId::Blog,
      Self::BlogPost(_) | Self::BlogNotFound { .. } => PageId::BlogDetail,
    }
  }

  pub fn is_not_found(&self) -> bool {
    matches!(self, Self::BlogNotFound { .. })
  }
}
