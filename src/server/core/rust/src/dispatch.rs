/* src/server/core/rust/src/dispatch.rs */

use std::sync::Arc;

use pujari_engine::{NavigationRequest, NavigationState};

use crate::history::History;
use crate::store::NavigationStore;
use crate::sync::{sync_inbound, sync_outbound};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
  Smooth,
  Instant,
}

/// Viewport control. The dispatcher asks for a scroll to top on every navigation.
pub trait Scroller {
  fn scroll_to_top(&mut self, behavior: ScrollBehavior);
}

/// Scroller for hosts without a viewport.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoScroll;

impl Scroller for NoScroll {
  fn scroll_to_top(&mut self, _behavior: ScrollBehavior) {}
}

/// The one entry point UI code uses to change page, plus the popstate hook.
pub struct Navigator<H, S = NoScroll> {
  store: Arc<NavigationStore>,
  history: H,
  scroller: S,
}

impl<H: History, S: Scroller> Navigator<H, S> {
  pub fn new(store: Arc<NavigationStore>, history: H, scroller: S) -> Self {
    Self { store, history, scroller }
  }

  /// Initial load: adopt the address bar path if it is one of ours.
  pub fn mount(&mut self) -> NavigationState {
    let path = self.history.current_path();
    sync_inbound(&self.store, &path);
    self.store.get()
  }

  /// Request a page change. The store update is visible before this returns;
  /// history follows and the viewport scrolls to top unconditionally.
  pub fn navigate(&mut self, request: impl Into<NavigationRequest>) -> NavigationState {
    let request = request.into();
    tracing::debug!(page = %request.target(), "navigate");
    self.store.set(request.into_patch());
    self.scroller.scroll_to_top(ScrollBehavior::Smooth);
    sync_outbound(&self.store, &mut self.history);
    self.store.get()
  }

  /// Back/forward handler. Updates the store from the path only; never pushes.
  pub fn on_popstate(&mut self, path: &str) -> NavigationState {
    sync_inbound(&self.store, path);
    self.store.get()
  }

  pub fn store(&self) -> &Arc<NavigationStore> {
    &self.store
  }

  pub fn history(&self) -> &H {
    &self.history
  }

  pub fn history_mut(&mut self) -> &mut H {
    &mut self.history
  }

  pub fn scroller(&self) -> &S {
    &self.scroller
  }
}
