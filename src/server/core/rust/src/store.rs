/* src/server/core/rust/src/store.rs */

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use pujari_engine::{DEFAULT_CATEGORY, NavigationPatch, NavigationState, PageId};

use crate::storage::{KEY_BLOG_ID, KEY_CATEGORY, KEY_PAGE, Storage};

pub type Listener = Arc<dyn Fn(&NavigationState) + Send + Sync>;

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Holds the current `NavigationState`, persists it on every `set`, and
/// notifies subscribers when it changes.
///
/// Values are not validated: any category or blog id string is accepted.
pub struct NavigationStore {
  state: RwLock<NavigationState>,
  storage: Arc<dyn Storage>,
  listeners: Mutex<Vec<(SubscriptionId, Listener)>>,
  next_id: AtomicU64,
}

impl NavigationStore {
  /// Build a store, restoring the last persisted state from `storage`.
  pub fn new(storage: Arc<dyn Storage>) -> Self {
    let state = restore(storage.as_ref());
    tracing::debug!(page = %state.current_page, "navigation state restored");
    Self {
      state: RwLock::new(state),
      storage,
      listeners: Mutex::new(Vec::new()),
      next_id: AtomicU64::new(1),
    }
  }

  pub fn get(&self) -> NavigationState {
    self.state.read().unwrap_or_else(PoisonError::into_inner).clone()
  }

  /// Apply `patch`, persist the full state, and notify subscribers if anything changed.
  /// Returns whether the state changed.
  pub fn set(&self, patch: NavigationPatch) -> bool {
    let (changed, snapshot) = {
      let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
      let changed = state.apply(patch);
      (changed, state.clone())
    };
    persist(self.storage.as_ref(), &snapshot);

    if changed {
      // Listeners run outside the locks so they may read or write the store.
      let listeners: Vec<Listener> = self
        .listeners
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .iter()
        .map(|(_, l)| l.clone())
        .collect();
      for listener in listeners {
        listener(&snapshot);
      }
    }
    changed
  }

  pub fn subscribe(
    &self,
    listener: impl Fn(&NavigationState) + Send + Sync + 'static,
  ) -> SubscriptionId {
    let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
    self.listeners.lock().unwrap_or_else(PoisonError::into_inner).push((id, Arc::new(listener)));
    id
  }

  pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
    let mut listeners = self.listeners.lock().unwrap_or_else(PoisonError::into_inner);
    let before = listeners.len();
    listeners.retain(|(lid, _)| *lid != id);
    listeners.len() != before
  }
}

fn restore(storage: &dyn Storage) -> NavigationState {
  NavigationState {
    current_page: storage.get(KEY_PAGE).map(|s| PageId::from_slug(&s)).unwrap_or_default(),
    current_category: storage.get(KEY_CATEGORY).unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
    current_blog_id: storage.get(KEY_BLOG_ID).unwrap_or_default(),
  }
}

fn persist(storage: &dyn Storage, state: &NavigationState) {
  storage.set(KEY_PAGE, state.current_page.as_str());
  storage.set(KEY_CATEGORY, &state.current_category);
  storage.set(KEY_BLOG_ID, &state.current_blog_id);
}

#[cfg(test)]
mod tests {
  use std::sync::atomic::AtomicUsize;

  use super::*;
  use crate::storage::MemoryStorage;

  fn store() -> (Arc<MemoryStorage>, NavigationStore) {
    let storage = Arc::new(MemoryStorage::new());
    let store = NavigationStore::new(storage.clone());
    (storage, store)
  }

  #[test]
  fn starts_at_default_with_empty_storage() {
    let (_, store) = store();
    assert_eq!(store.get(), NavigationState::default());
  }

  #[test]
  fn set_persists_full_state() {
    let (storage, store) = store();
    store.set(NavigationPatch {
      current_page: Some(PageId::Services),
      current_category: Some("pooja".into()),
      current_blog_id: None,
    });
    assert_eq!(storage.get(KEY_PAGE).as_deref(), Some("services"));
    assert_eq!(storage.get(KEY_CATEGORY).as_deref(), Some("pooja"));
    assert_eq!(storage.get(KEY_BLOG_ID).as_deref(), Some(""));
  }

  #[test]
  fn reload_restores_last_page() {
    let storage = Arc::new(MemoryStorage::new());
    NavigationStore::new(storage.clone()).set(NavigationPatch::page(PageId::Gallery));
    let reloaded = NavigationStore::new(storage);
    assert_eq!(reloaded.get().current_page, PageId::Gallery);
  }

  #[test]
  fn unknown_persisted_page_is_kept() {
    let storage = Arc::new(MemoryStorage::new());
    storage.set(KEY_PAGE, "retired-page");
    let store = NavigationStore::new(storage);
    assert_eq!(store.get().current_page, PageId::Other("retired-page".into()));
  }

  #[test]
  fn subscribers_see_changes_only() {
    let (_, store) = store();
    let calls = Arc::new(AtomicUsize::new(0));
    let seen = calls.clone();
    let id = store.subscribe(move |state| {
      assert_eq!(state.current_page, PageId::Books);
      seen.fetch_add(1, Ordering::SeqCst);
    });

    assert!(store.set(NavigationPatch::page(PageId::Books)));
    assert!(!store.set(NavigationPatch::page(PageId::Books)));
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    assert!(store.unsubscribe(id));
    assert!(!store.unsubscribe(id));
  }

  #[test]
  fn listener_may_read_store() {
    let (_, store) = store();
    let store = Arc::new(store);
    let inner = Arc::downgrade(&store);
    let observed = Arc::new(Mutex::new(None));
    let sink = observed.clone();
    store.subscribe(move |_| {
      if let Some(store) = inner.upgrade() {
        *sink.lock().unwrap() = Some(store.get().current_page);
      }
    });
    store.set(NavigationPatch::page(PageId::Charity));
    assert_eq!(*observed.lock().unwrap(), Some(PageId::Charity));
  }
}
