/* src/server/core/rust/src/storage.rs */

//! Durable client storage: string keys to string values, written synchronously.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use crate::errors::SiteError;

pub const KEY_PAGE: &str = "currentPage";
pub const KEY_CATEGORY: &str = "currentCategory";
pub const KEY_BLOG_ID: &str = "currentBlogId";

pub trait Storage: Send + Sync {
  fn get(&self, key: &str) -> Option<String>;
  /// Infallible from the caller's point of view; backends log their own failures.
  fn set(&self, key: &str, value: &str);
}

#[derive(Debug, Default)]
pub struct MemoryStorage {
  values: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
  pub fn new() -> Self {
    Self::default()
  }
}

impl Storage for MemoryStorage {
  fn get(&self, key: &str) -> Option<String> {
    self.values.lock().unwrap_or_else(PoisonError::into_inner).get(key).cloned()
  }

  fn set(&self, key: &str, value: &str) {
    self
      .values
      .lock()
      .unwrap_or_else(PoisonError::into_inner)
      .insert(key.to_string(), value.to_string());
  }
}

/// Storage backed by a JSON object file, rewritten on every `set`.
#[derive(Debug)]
pub struct FileStorage {
  path: PathBuf,
  values: Mutex<BTreeMap<String, String>>,
}

impl FileStorage {
  /// Open `path`, reading existing values. A missing file starts empty.
  pub fn open(path: impl AsRef<Path>) -> Result<Self, SiteError> {
    let path = path.as_ref().to_path_buf();
    let values = match std::fs::read_to_string(&path) {
      Ok(content) => serde_json::from_str(&content)?,
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
      Err(e) => {
        return Err(SiteError::internal(format!("read {}: {e}", path.display())));
      }
    };
    Ok(Self { path, values: Mutex::new(values) })
  }

  pub fn path(&self) -> &Path {
    &self.path
  }
}

impl Storage for FileStorage {
  fn get(&self, key: &str) -> Option<String> {
    self.values.lock().unwrap_or_else(PoisonError::into_inner).get(key).cloned()
  }

  fn set(&self, key: &str, value: &str) {
    let mut values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
    values.insert(key.to_string(), value.to_string());
    let written = serde_json::to_string_pretty(&*values)
      .map_err(|e| e.to_string())
      .and_then(|json| std::fs::write(&self.path, json).map_err(|e| e.to_string()));
    if let Err(e) = written {
      tracing::warn!(path = %self.path.display(), key, error = %e, "failed to persist navigation state");
    }
  }
}
