/* src/server/core/rust/src/sync.rs */

//! Bridge between the navigation store and the address bar.
//!
//! Outbound runs after dispatcher-driven state changes and only pushes when
//! the computed path differs from the *current* browser path, so repeating it
//! never stacks duplicate entries. Inbound runs on mount and on genuine
//! popstate events. Pushing does not fire popstate, so neither direction
//! triggers the other.

use pujari_engine::{canonical_path, parse_path};

use crate::history::History;
use crate::store::NavigationStore;

/// Reflect the store into history. Returns whether an entry was pushed.
pub fn sync_outbound<H: History + ?Sized>(store: &NavigationStore, history: &mut H) -> bool {
  let path = canonical_path(&store.get());
  if path == history.current_path() {
    return false;
  }
  tracing::debug!(%path, "history push");
  history.push_state(&path);
  true
}

/// Reflect `path` into the store. Unrecognised paths leave the store untouched.
/// Returns whether the store changed.
pub fn sync_inbound(store: &NavigationStore, path: &str) -> bool {
  match parse_path(path) {
    Some(target) => store.set(target.into_patch()),
    None => {
      tracing::debug!(%path, "ignoring unrecognised path");
      false
    }
  }
}
