/* src/server/core/rust/src/history.rs */

/// The browser history surface the URL synchronizer needs.
pub trait History {
  /// Path of the current entry, without query or fragment.
  fn current_path(&self) -> String;
  /// Append an entry and make it current, without reloading or firing popstate.
  fn push_state(&mut self, path: &str);
}

/// In-memory session history: a list of paths and a cursor.
/// `back`/`forward` move the cursor and return the path a popstate would carry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryHistory {
  entries: Vec<String>,
  cursor: usize,
}

impl MemoryHistory {
  /// History after a direct load of `path`.
  pub fn new(path: impl Into<String>) -> Self {
    Self { entries: vec![path.into()], cursor: 0 }
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  pub fn entries(&self) -> &[String] {
    &self.entries
  }

  pub fn back(&mut self) -> Option<String> {
    if self.cursor == 0 {
      return None;
    }
    self.cursor -= 1;
    Some(self.entries[self.cursor].clone())
  }

  pub fn forward(&mut self) -> Option<String> {
    if self.cursor + 1 >= self.entries.len() {
      return None;
    }
    self.cursor += 1;
    Some(self.entries[self.cursor].clone())
  }
}

impl Default for MemoryHistory {
  fn default() -> Self {
    Self::new("/")
  }
}

impl History for MemoryHistory {
  fn current_path(&self) -> String {
    self.entries.get(self.cursor).cloned().unwrap_or_else(|| "/".to_string())
  }

  fn push_state(&mut self, path: &str) {
    // Pushing after going back drops the forward entries, as browsers do.
    self.entries.truncate(self.cursor + 1);
    self.entries.push(path.to_string());
    self.cursor = self.entries.len() - 1;
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn push_then_back_and_forward() {
    let mut history = MemoryHistory::new("/");
    history.push_state("/services");
    history.push_state("/blog/diwali");
    assert_eq!(history.current_path(), "/blog/diwali");
    assert_eq!(history.back().as_deref(), Some("/services"));
    assert_eq!(history.back().as_deref(), Some("/"));
    assert_eq!(history.back(), None);
    assert_eq!(history.forward().as_deref(), Some("/services"));
  }

  #[test]
  fn push_after_back_truncates_forward_entries() {
    let mut history = MemoryHistory::new("/");
    history.push_state("/a");
    history.push_state("/b");
    history.back();
    history.push_state("/c");
    assert_eq!(history.entries(), ["/", "/a", "/c"]);
    assert_eq!(history.forward(), None);
  }
}
