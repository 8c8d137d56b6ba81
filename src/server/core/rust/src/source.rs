/* src/server/core/rust/src/source.rs */

use std::collections::HashMap;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;

use pujari_engine::{PageMetadataRecord, SiteMetadataDefaults};
use serde::{Deserialize, Serialize};

use crate::errors::SiteError;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A published blog post as listed on the blog page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlogPost {
  pub slug: String,
  pub title: String,
  pub excerpt: Option<String>,
  pub published_at: Option<String>,
}

/// Read side of the hosted record store, as the navigation core sees it.
pub trait MetadataSource: Send + Sync {
  /// `Ok(None)` when no record exists for `slug`.
  fn fetch_page_metadata<'a>(
    &'a self,
    slug: &'a str,
  ) -> BoxFuture<'a, Result<Option<PageMetadataRecord>, SiteError>>;

  fn fetch_site_defaults(&self) -> BoxFuture<'_, Result<SiteMetadataDefaults, SiteError>>;

  fn list_blog_posts(&self) -> BoxFuture<'_, Result<Vec<BlogPost>, SiteError>>;
}

/// Layout of the JSON content file read by `FileSource`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ContentFile {
  pub site: SiteMetadataDefaults,
  pub pages: Vec<PageMetadataRecord>,
  pub blog_posts: Vec<BlogPost>,
}

/// In-process record store.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
  site: SiteMetadataDefaults,
  pages: HashMap<String, PageMetadataRecord>,
  posts: Vec<BlogPost>,
}

impl MemorySource {
  pub fn new(site: SiteMetadataDefaults) -> Self {
    Self { site, ..Self::default() }
  }

  pub fn page(mut self, record: PageMetadataRecord) -> Self {
    self.pages.insert(record.slug.clone(), record);
    self
  }

  pub fn post(mut self, post: BlogPost) -> Self {
    self.posts.push(post);
    self
  }

  pub fn from_content(content: ContentFile) -> Self {
    let mut source = Self::new(content.site);
    for record in content.pages {
      source = source.page(record);
    }
    source.posts = content.blog_posts;
    source
  }
}

/// Content file on disk, read once at construction.
#[derive(Debug, Clone)]
pub struct FileSource {
  path: PathBuf,
  inner: MemorySource,
}

impl FileSource {
  /// Load a JSON content file: `{ "site": {...}, "pages": [...], "blog_posts": [...] }`.
  pub fn load(path: impl Into<PathBuf>) -> Result<Self, SiteError> {
    let path = path.into();
    let raw = std::fs::read_to_string(&path)
      .map_err(|e| SiteError::internal(format!("read {}: {e}", path.display())))?;
    let content: ContentFile = serde_json::from_str(&raw)?;
    tracing::info!(
      path = %path.display(),
      pages = content.pages.len(),
      posts = content.blog_posts.len(),
      "content file loaded"
    );
    Ok(Self { path, inner: MemorySource::from_content(content) })
  }

  pub fn path(&self) -> &Path {
    &self.path
  }
}

impl MetadataSource for MemorySource {
  fn fetch_page_metadata<'a>(
    &'a self,
    slug: &'a str,
  ) -> BoxFuture<'a, Result<Option<PageMetadataRecord>, SiteError>> {
    Box::pin(async move { Ok(self.pages.get(slug).cloned()) })
  }

  fn fetch_site_defaults(&self) -> BoxFuture<'_, Result<SiteMetadataDefaults, SiteError>> {
    Box::pin(async move { Ok(self.site.clone()) })
  }

  fn list_blog_posts(&self) -> BoxFuture<'_, Result<Vec<BlogPost>, SiteError>> {
    Box::pin(async move { Ok(self.posts.clone()) })
  }
}

impl MetadataSource for FileSource {
  fn fetch_page_metadata<'a>(
    &'a self,
    slug: &'a str,
  ) -> BoxFuture<'a, Result<Option<PageMetadataRecord>, SiteError>> {
    self.inner.fetch_page_metadata(slug)
  }

  fn fetch_site_defaults(&self) -> BoxFuture<'_, Result<SiteMetadataDefaults, SiteError>> {
    self.inner.fetch_site_defaults()
  }

  fn list_blog_posts(&self) -> BoxFuture<'_, Result<Vec<BlogPost>, SiteError>> {
    self.inner.list_blog_posts()
  }
}

/// Decides whether the current visitor owns the site.
pub trait OwnerCheck: Send + Sync {
  fn is_owner(&self) -> bool;
}

/// Fixed answer, for servers and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticOwner(pub bool);

impl OwnerCheck for StaticOwner {
  fn is_owner(&self) -> bool {
    self.0
  }
}
