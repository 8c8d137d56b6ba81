/* src/server/injector/rust/src/lib.rs */

mod head;
mod helpers;
mod parser;
mod render;

pub use head::{Element, Head, HeadNode, MetaKey};
pub use helpers::escape_html;

use helpers::find_ascii_ci;
use pujari_engine::{EffectiveMetadata, script_safe_json};

pub const JSON_LD_TYPE: &str = "application/ld+json";

/// Mutations the metadata injector performs on a document head.
/// Implemented by the in-memory `Head`; a browser binding implements it over `document.head`.
pub trait HeadDocument {
  fn set_title(&mut self, title: &str);
  /// Find-or-create `<meta {key}="{name}">` and set its `content`.
  fn upsert_meta(&mut self, key: MetaKey, name: &str, content: &str);
  /// Find-or-create `<link rel="{rel}">` and set its `href`.
  fn upsert_link(&mut self, rel: &str, href: &str);
  /// Remove every `<script type="{script_type}">` and append one with `body`.
  fn replace_script(&mut self, script_type: &str, body: &str);
}

/// Write `meta` into `doc`. Applying the same metadata twice leaves the head
/// exactly as applying it once.
pub fn apply<D: HeadDocument + ?Sized>(doc: &mut D, meta: &EffectiveMetadata) {
  doc.set_title(&meta.title);

  for (name, content) in [
    ("description", &meta.description),
    ("keywords", &meta.keywords),
    ("robots", &meta.robots),
    ("author", &meta.author),
  ] {
    doc.upsert_meta(MetaKey::Name, name, content);
  }

  // Absent OG values leave whatever tag is already there.
  for (property, content) in [
    ("og:title", &meta.og_title),
    ("og:description", &meta.og_description),
    ("og:image", &meta.og_image),
  ] {
    if !content.is_empty() {
      doc.upsert_meta(MetaKey::Property, property, content);
    }
  }

  doc.upsert_link("canonical", &meta.canonical_url);

  let json = serde_json::to_string(&meta.structured_data).unwrap_or_default();
  doc.replace_script(JSON_LD_TYPE, &script_safe_json(&json));
}

/// Rewrite the `<head>` of a full HTML document with `meta`.
/// A document without `<head>` gets one right after `<html ...>` (or at the start).
pub fn inject_metadata(html: &str, meta: &EffectiveMetadata) -> String {
  let (before, inner, after) = match split_head(html) {
    Some(parts) => parts,
    None => {
      let insert_at = find_ascii_ci(html, "<html", 0)
        .and_then(|pos| html[pos..].find('>').map(|end| pos + end + 1))
        .unwrap_or(0);
      let mut head = Head::new();
      apply(&mut head, meta);
      let mut out = String::with_capacity(html.len() + 512);
      out.push_str(&html[..insert_at]);
      out.push_str("<head>");
      out.push_str(&head.render());
      out.push_str("</head>");
      out.push_str(&html[insert_at..]);
      return out;
    }
  };

  let mut head = Head::parse(inner);
  apply(&mut head, meta);
  let rendered = head.render();

  let mut out = String::with_capacity(html.len() + rendered.len());
  out.push_str(before);
  out.push_str(&rendered);
  out.push_str(after);
  out
}

/// Split into (through `<head ...>`, head inner HTML, from `</head>`).
fn split_head(html: &str) -> Option<(&str, &str, &str)> {
  let open = find_ascii_ci(html, "<head", 0)?;
  // `<header>` is not `<head>`
  let next = html.as_bytes().get(open + 5).copied();
  if !matches!(next, Some(b'>' | b' ' | b'\t' | b'\n' | b'\r')) {
    return None;
  }
  let inner_start = open + html[open..].find('>')? + 1;
  let close = find_ascii_ci(html, "</head>", inner_start)?;
  Some((&html[..inner_start], &html[inner_start..close], &html[close..]))
}

/// Replace the `<!--pujari:{name}-->` slot with `content`. Missing slots are left alone.
pub fn fill_slot(html: &str, name: &str, content: &str) -> String {
  html.replacen(&format!("<!--pujari:{name}-->"), content, 1)
}

/// Inject a `<script>` tag with JSON data before `</body>`.
pub fn inject_data_script(html: &str, data_id: &str, json: &str) -> String {
  let script = format!(
    r#"<script id="{data_id}" type="application/json">{}</script>"#,
    script_safe_json(json)
  );
  if let Some(pos) = html.rfind("</body>") {
    let mut result = String::with_capacity(html.len() + script.len());
    result.push_str(&html[..pos]);
    result.push_str(&script);
    result.push_str(&html[pos..]);
    result
  } else {
    format!("{html}{script}")
  }
}
