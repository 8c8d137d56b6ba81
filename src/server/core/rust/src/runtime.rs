/* src/server/core/rust/src/runtime.rs */

use std::sync::{Arc, Mutex};

use pujari_engine::{MenuEntry, NavigationRequest, NavigationState, menu_entries};
use pujari_injector::Head;

use crate::dispatch::{Navigator, NoScroll, Scroller};
use crate::history::History;
use crate::metadata::MetadataEffect;
use crate::source::OwnerCheck;
use crate::store::{NavigationStore, SubscriptionId};
use crate::view::{PageView, select_page};

/// Client-side site: navigator, metadata effect and document head wired together.
pub struct SiteRuntime<H, S = NoScroll> {
  navigator: Navigator<H, S>,
  store: Arc<NavigationStore>,
  metadata: Arc<MetadataEffect>,
  head: Arc<Mutex<Head>>,
  owner: Arc<dyn OwnerCheck>,
  subscription: SubscriptionId,
}

impl<H: History, S: Scroller> SiteRuntime<H, S> {
  /// Wire the runtime. Must be called inside a tokio runtime for metadata
  /// refreshes to run.
  pub fn new(
    navigator: Navigator<H, S>,
    metadata: Arc<MetadataEffect>,
    head: Head,
    owner: Arc<dyn OwnerCheck>,
  ) -> Self {
    let store = Arc::clone(navigator.store());
    let head = Arc::new(Mutex::new(head));
    let subscription = metadata.attach(&store, Arc::clone(&head));
    Self { navigator, store, metadata, head, owner, subscription }
  }

  /// Initial load: adopt the current path, then apply metadata for the result.
  pub async fn mount(&mut self) -> NavigationState {
    let state = self.navigator.mount();
    self.metadata.refresh_into(&state, &self.head).await;
    state
  }

  pub fn navigate(&mut self, request: impl Into<NavigationRequest>) -> NavigationState {
    self.navigator.navigate(request)
  }

  pub fn on_popstate(&mut self, path: &str) -> NavigationState {
    self.navigator.on_popstate(path)
  }

  /// Menu for the current visitor; `admin` only for the owner.
  pub fn menu(&self) -> Vec<MenuEntry> {
    menu_entries(self.owner.is_owner())
  }

  /// View for the current state. A failed blog listing counts as empty.
  pub async fn view(&self) -> PageView {
    let posts = self.metadata.blog_posts().await;
    select_page(&self.store.get(), &posts)
  }

  pub fn state(&self) -> NavigationState {
    self.store.get()
  }

  pub fn head(&self) -> &Arc<Mutex<Head>> {
    &self.head
  }

  pub fn navigator(&self) -> &Navigator<H, S> {
    &self.navigator
  }
}

impl<H, S> Drop for SiteRuntime<H, S> {
  fn drop(&mut self) {
    self.store.unsubscribe(self.subscription);
  }
}
