/* src/server/engine/rust/src/meta.rs */

//! Page metadata resolution.
//!
//! Every field is coalesced from the per-page record, then the site-wide
//! defaults (title, description and keywords only), then a literal. Both the
//! client runtime and the server router call `resolve_metadata`; there is no
//! second copy of this chain.

use serde::{Deserialize, Serialize};

use crate::nav::NavigationState;
use crate::page::PageId;
use crate::route::canonical_path;

pub const DEFAULT_TITLE: &str = "Pandit Rajesh Joshi - Hindu Priest & Spiritual Guide";
pub const DEFAULT_DESCRIPTION: &str = "Traditional Vedic pooja, havan, wedding and griha pravesh \
  ceremonies performed by Pandit Rajesh Joshi, with personal spiritual guidance for families.";
pub const DEFAULT_KEYWORDS: &str =
  "Hindu priest, pandit, pooja services, Vedic rituals, havan, griha pravesh, spiritual guidance";
pub const DEFAULT_AUTHOR: &str = "Pandit Rajesh Joshi";
pub const DEFAULT_SITE_NAME: &str = "Pandit Rajesh Joshi";
pub const ROBOTS: &str = "index, follow";

/// Per-page SEO record as stored by the admin panel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageMetadataRecord {
  pub slug: String,
  pub title: Option<String>,
  pub meta_title: Option<String>,
  pub meta_description: Option<String>,
  pub meta_keywords: Option<Vec<String>>,
  pub og_title: Option<String>,
  pub og_description: Option<String>,
  pub og_image_url: Option<String>,
  pub canonical_url: Option<String>,
}

/// Site-wide fallback record, fetched once per session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteMetadataDefaults {
  pub title: Option<String>,
  pub description: Option<String>,
  pub keywords: Option<String>,
}

/// Fixed facts about the site that feed the literals and structured data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteIdentity {
  pub name: String,
  pub author: String,
  /// Scheme and host without trailing slash. `None` keeps canonical URLs path-only.
  pub origin: Option<String>,
}

impl Default for SiteIdentity {
  fn default() -> Self {
    Self { name: DEFAULT_SITE_NAME.to_string(), author: DEFAULT_AUTHOR.to_string(), origin: None }
  }
}

impl SiteIdentity {
  pub fn absolute(&self, path: &str) -> String {
    match self.origin {
      Some(ref origin) => format!("{origin}{path}"),
      None => path.to_string(),
    }
  }
}

/// Fully resolved metadata handed to the injector. No field is ever absent;
/// empty OG strings mean "leave the existing tag alone".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectiveMetadata {
  pub title: String,
  pub description: String,
  pub keywords: String,
  pub robots: String,
  pub author: String,
  pub og_title: String,
  pub og_description: String,
  pub og_image: String,
  pub canonical_url: String,
  pub structured_data: serde_json::Value,
}

fn non_empty(value: Option<&str>) -> Option<&str> {
  value.filter(|v| !v.trim().is_empty())
}

fn coalesce<'a>(candidates: &[Option<&'a str>], literal: &'a str) -> String {
  candidates.iter().copied().find_map(non_empty).unwrap_or(literal).to_string()
}

/// Resolve the metadata for `state`. Never fails: missing or empty sources fall through.
pub fn resolve_metadata(
  state: &NavigationState,
  site_defaults: &SiteMetadataDefaults,
  page_record: Option<&PageMetadataRecord>,
  identity: &SiteIdentity,
) -> EffectiveMetadata {
  let record = page_record.cloned().unwrap_or_default();

  let keywords = record.meta_keywords.as_ref().map(|list| {
    let parts: Vec<&str> =
      list.iter().map(String::as_str).map(str::trim).filter(|s| !s.is_empty()).collect();
    parts.join(", ")
  });

  let title = coalesce(
    &[record.meta_title.as_deref(), record.title.as_deref(), site_defaults.title.as_deref()],
    DEFAULT_TITLE,
  );
  let description = coalesce(
    &[record.meta_description.as_deref(), site_defaults.description.as_deref()],
    DEFAULT_DESCRIPTION,
  );
  let keywords =
    coalesce(&[keywords.as_deref(), site_defaults.keywords.as_deref()], DEFAULT_KEYWORDS);

  let og_title = coalesce(&[record.og_title.as_deref()], &title);
  let og_description = coalesce(&[record.og_description.as_deref()], &description);
  let og_image = coalesce(&[record.og_image_url.as_deref()], "");

  let computed = identity.absolute(&canonical_path(state));
  let canonical_url = coalesce(&[record.canonical_url.as_deref()], &computed);

  let structured_data = structured_data(state, &title, &description, &canonical_url, identity);

  EffectiveMetadata {
    title,
    description,
    keywords,
    robots: ROBOTS.to_string(),
    author: identity.author.clone(),
    og_title,
    og_description,
    og_image,
    canonical_url,
    structured_data,
  }
}

/// JSON-LD object for the page: a `BlogPosting` on post pages, a `WebPage`
/// about the priest everywhere else.
pub fn structured_data(
  state: &NavigationState,
  title: &str,
  description: &str,
  url: &str,
  identity: &SiteIdentity,
) -> serde_json::Value {
  let author = serde_json::json!({ "@type": "Person", "name": identity.author });

  if state.current_page == PageId::BlogDetail && !state.current_blog_id.is_empty() {
    return serde_json::json!({
      "@context": "https://schema.org",
      "@type": "BlogPosting",
      "headline": title,
      "description": description,
      "url": url,
      "author": author,
      "publisher": { "@type": "Organization", "name": identity.name },
    });
  }

  serde_json::json!({
    "@context": "https://schema.org",
    "@type": "WebPage",
    "name": title,
    "description": description,
    "url": url,
    "about": {
      "@type": "Person",
      "name": identity.author,
      "jobTitle": "Hindu Priest",
    },
    "isPartOf": { "@type": "WebSite", "name": identity.name },
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::nav::NavigationRequest;

  fn services() -> NavigationState {
    let mut state = NavigationState::default();
    state.apply(NavigationRequest::from(PageId::Services).into_patch());
    state
  }

  fn record(meta_title: Option<&str>) -> PageMetadataRecord {
    PageMetadataRecord {
      slug: "services".into(),
      meta_title: meta_title.map(str::to_string),
      ..Default::default()
    }
  }

  fn defaults(title: Option<&str>) -> SiteMetadataDefaults {
    SiteMetadataDefaults { title: title.map(str::to_string), ..Default::default() }
  }

  #[test]
  fn title_priority_matrix() {
    let id = SiteIdentity::default();
    let cases = [
      (Some("Custom Title"), Some("Default Title"), "Custom Title"),
      (Some("Custom Title"), None, "Custom Title"),
      (None, Some("Default Title"), "Default Title"),
      (None, None, DEFAULT_TITLE),
    ];
    for (over, site, expected) in cases {
      let rec = record(over);
      let meta = resolve_metadata(&services(), &defaults(site), Some(&rec), &id);
      assert_eq!(meta.title, expected, "override={over:?} site={site:?}");
    }
  }

  #[test]
  fn missing_record_falls_back_to_defaults_then_literal() {
    let id = SiteIdentity::default();
    let meta = resolve_metadata(&services(), &defaults(Some("Default Title")), None, &id);
    assert_eq!(meta.title, "Default Title");
    let meta = resolve_metadata(&services(), &SiteMetadataDefaults::default(), None, &id);
    assert_eq!(meta.title, "Pandit Rajesh Joshi - Hindu Priest & Spiritual Guide");
    assert_eq!(meta.description, DEFAULT_DESCRIPTION);
    assert_eq!(meta.keywords, DEFAULT_KEYWORDS);
  }

  #[test]
  fn blank_override_is_treated_as_absent() {
    let id = SiteIdentity::default();
    let rec = record(Some("   "));
    let meta = resolve_metadata(&services(), &defaults(Some("Default Title")), Some(&rec), &id);
    assert_eq!(meta.title, "Default Title");
  }

  #[test]
  fn keywords_are_joined() {
    let rec = PageMetadataRecord {
      meta_keywords: Some(vec!["pooja".into(), " havan ".into(), "".into()]),
      ..Default::default()
    };
    let meta = resolve_metadata(
      &services(),
      &SiteMetadataDefaults::default(),
      Some(&rec),
      &SiteIdentity::default(),
    );
    assert_eq!(meta.keywords, "pooja, havan");
  }

  #[test]
  fn og_fields_follow_resolved_values_and_image_may_be_empty() {
    let meta = resolve_metadata(
      &services(),
      &defaults(Some("Default Title")),
      None,
      &SiteIdentity::default(),
    );
    assert_eq!(meta.og_title, "Default Title");
    assert_eq!(meta.og_description, meta.description);
    assert!(meta.og_image.is_empty());
    assert_eq!(meta.robots, "index, follow");
    assert_eq!(meta.author, DEFAULT_AUTHOR);
  }

  #[test]
  fn canonical_is_computed_unless_overridden() {
    let id = SiteIdentity { origin: Some("https://example.org".into()), ..Default::default() };
    let meta = resolve_metadata(&services(), &SiteMetadataDefaults::default(), None, &id);
    assert_eq!(meta.canonical_url, "https://example.org/services");

    let rec = PageMetadataRecord {
      canonical_url: Some("https://example.org/pooja-services".into()),
      ..Default::default()
    };
    let meta = resolve_metadata(&services(), &SiteMetadataDefaults::default(), Some(&rec), &id);
    assert_eq!(meta.canonical_url, "https://example.org/pooja-services");
  }

  #[test]
  fn home_canonical_is_root() {
    let meta = resolve_metadata(
      &NavigationState::default(),
      &SiteMetadataDefaults::default(),
      None,
      &SiteIdentity::default(),
    );
    assert_eq!(meta.canonical_url, "/");
    assert_eq!(meta.structured_data["@type"], "WebPage");
  }

  #[test]
  fn blog_post_gets_blog_posting() {
    let mut state = NavigationState::default();
    state.apply(
      NavigationRequest::with_context(PageId::BlogDetail).blog_id("significance-pooja").into_patch(),
    );
    let rec = PageMetadataRecord {
      slug: "significance-pooja".into(),
      title: Some("Significance of Pooja".into()),
      ..Default::default()
    };
    let meta =
      resolve_metadata(&state, &SiteMetadataDefaults::default(), Some(&rec), &SiteIdentity::default());
    assert_eq!(meta.title, "Significance of Pooja");
    assert_eq!(meta.canonical_url, "/blog/significance-pooja");
    assert_eq!(meta.structured_data["@type"], "BlogPosting");
    assert_eq!(meta.structured_data["headline"], "Significance of Pooja");
    assert_eq!(meta.structured_data["author"]["name"], DEFAULT_AUTHOR);
  }
}
