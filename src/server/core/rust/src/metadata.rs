/* src/server/core/rust/src/metadata.rs */

//! Metadata effect: fetch records for the current page, resolve them, and
//! hand the result to the injector.
//!
//! Every refresh takes a generation number. A fetch that completes after a
//! newer refresh has started is dropped instead of overwriting fresher
//! metadata.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use pujari_engine::{
  EffectiveMetadata, NavigationState, PageId, PageMetadataRecord, SiteIdentity,
  SiteMetadataDefaults, resolve_metadata,
};
use pujari_injector::{Head, HeadDocument, apply};
use tokio::sync::OnceCell;

use crate::source::{BlogPost, MetadataSource};
use crate::store::{NavigationStore, SubscriptionId};

pub struct MetadataEffect {
  source: Arc<dyn MetadataSource>,
  identity: SiteIdentity,
  defaults: OnceCell<SiteMetadataDefaults>,
  generation: AtomicU64,
}

impl MetadataEffect {
  pub fn new(source: Arc<dyn MetadataSource>, identity: SiteIdentity) -> Self {
    Self { source, identity, defaults: OnceCell::new(), generation: AtomicU64::new(0) }
  }

  pub fn identity(&self) -> &SiteIdentity {
    &self.identity
  }

  pub fn source(&self) -> &Arc<dyn MetadataSource> {
    &self.source
  }

  /// Site-wide defaults, fetched once. A failed fetch is not cached and
  /// yields empty defaults so the literals apply.
  pub async fn site_defaults(&self) -> SiteMetadataDefaults {
    match self.defaults.get_or_try_init(|| self.source.fetch_site_defaults()).await {
      Ok(defaults) => defaults.clone(),
      Err(e) => {
        tracing::warn!(error = %e, "site metadata defaults unavailable");
        SiteMetadataDefaults::default()
      }
    }
  }

  /// Per-page record, or `None` on a miss or a failed fetch.
  pub async fn page_record(&self, slug: &str) -> Option<PageMetadataRecord> {
    match self.source.fetch_page_metadata(slug).await {
      Ok(record) => record,
      Err(e) => {
        tracing::warn!(slug, error = %e, "page metadata fetch failed");
        None
      }
    }
  }

  /// Published posts, or an empty list when the listing fails.
  pub async fn blog_posts(&self) -> Vec<BlogPost> {
    match self.source.list_blog_posts().await {
      Ok(posts) => posts,
      Err(e) => {
        tracing::warn!(error = %e, "blog listing unavailable");
        Vec::new()
      }
    }
  }

  /// Resolve metadata for `state` without generation tracking.
  pub async fn resolve(&self, state: &NavigationState) -> EffectiveMetadata {
    let defaults = self.site_defaults().await;
    let record = self.page_record(state.metadata_slug()).await;
    resolve_metadata(state, &defaults, record.as_ref(), &self.identity)
  }

  /// Start a refresh and return its generation.
  pub fn begin(&self) -> u64 {
    self.generation.fetch_add(1, Ordering::SeqCst) + 1
  }

  pub fn is_current(&self, generation: u64) -> bool {
    self.generation.load(Ordering::SeqCst) == generation
  }

  /// Resolve metadata for `state`. Returns `None` when another refresh
  /// started while this one was fetching.
  pub async fn refresh(&self, state: &NavigationState) -> Option<EffectiveMetadata> {
    let generation = self.begin();
    self.refresh_at(generation, state).await
  }

  /// Like `refresh`, for a generation taken earlier with `begin`.
  pub async fn refresh_at(
    &self,
    generation: u64,
    state: &NavigationState,
  ) -> Option<EffectiveMetadata> {
    let meta = self.resolve(state).await;
    if !self.is_current(generation) {
      tracing::debug!(
        page = %state.current_page,
        generation,
        "discarding stale page metadata"
      );
      return None;
    }
    Some(meta)
  }

  /// Refresh and inject into `doc`. Returns whether anything was applied;
  /// while the fetch is pending the previous metadata stays in place.
  pub async fn refresh_into<D: HeadDocument + ?Sized>(
    &self,
    state: &NavigationState,
    doc: &Mutex<D>,
  ) -> bool {
    let generation = self.begin();
    self.refresh_into_at(generation, state, doc).await
  }

  pub async fn refresh_into_at<D: HeadDocument + ?Sized>(
    &self,
    generation: u64,
    state: &NavigationState,
    doc: &Mutex<D>,
  ) -> bool {
    let Some(meta) = self.refresh_at(generation, state).await else {
      return false;
    };
    // Re-checked under the lock so a newer refresh that applied meanwhile wins.
    let mut doc = doc.lock().unwrap_or_else(PoisonError::into_inner);
    if !self.is_current(generation) {
      return false;
    }
    apply(&mut *doc, &meta);
    true
  }

  /// Run a refresh on the current tokio runtime whenever the store moves to
  /// a different page or blog post. Category-only changes are ignored.
  ///
  /// The generation is taken inside the listener, in navigation order, not
  /// when the spawned task first runs.
  pub fn attach(
    self: &Arc<Self>,
    store: &NavigationStore,
    head: Arc<Mutex<Head>>,
  ) -> SubscriptionId {
    let effect = Arc::clone(self);
    let last_key: Mutex<Option<(PageId, String)>> = Mutex::new(None);

    store.subscribe(move |state| {
      let key = (state.current_page.clone(), state.metadata_slug().to_string());
      {
        let mut last = last_key.lock().unwrap_or_else(PoisonError::into_inner);
        if last.as_ref() == Some(&key) {
          return;
        }
        *last = Some(key);
      }

      let Ok(handle) = tokio::runtime::Handle::try_current() else {
        tracing::warn!("no async runtime, metadata refresh skipped");
        return;
      };
      let generation = effect.begin();
      let effect = Arc::clone(&effect);
      let head = Arc::clone(&head);
      let state = state.clone();
      handle.spawn(async move {
        effect.refresh_into_at(generation, &state, &head).await;
      });
    })
  }
}

#[cfg(test)]
mod tests {
  use std::sync::atomic::AtomicUsize;
  use std::time::Duration;

  use pujari_engine::meta::DEFAULT_TITLE;
  use pujari_engine::{NavigationPatch, NavigationRequest};
  use pujari_injector::MetaKey;
  use tokio::sync::Notify;

  use super::*;
  use crate::errors::SiteError;
  use crate::source::{BoxFuture, MemorySource};
  use crate::storage::MemoryStorage;

  fn state(page: PageId) -> NavigationState {
    let mut state = NavigationState::default();
    state.apply(NavigationPatch::page(page));
    state
  }

  fn record(slug: &str, title: &str) -> PageMetadataRecord {
    PageMetadataRecord {
      slug: slug.into(),
      meta_title: Some(title.into()),
      ..Default::default()
    }
  }

  fn memory() -> MemorySource {
    MemorySource::new(SiteMetadataDefaults {
      title: Some("Default Title".into()),
      ..Default::default()
    })
    .page(record("services", "Pooja Services"))
    .page(record("about", "About the Pandit"))
  }

  /// Holds back `about` until released and counts defaults fetches.
  struct GatedSource {
    inner: MemorySource,
    gate: Notify,
    defaults_calls: AtomicUsize,
    fail_defaults: bool,
  }

  impl GatedSource {
    fn new(fail_defaults: bool) -> Self {
      Self { inner: memory(), gate: Notify::new(), defaults_calls: AtomicUsize::new(0), fail_defaults }
    }
  }

  impl MetadataSource for GatedSource {
    fn fetch_page_metadata<'a>(
      &'a self,
      slug: &'a str,
    ) -> BoxFuture<'a, Result<Option<PageMetadataRecord>, SiteError>> {
      Box::pin(async move {
        if slug == "about" {
          self.gate.notified().await;
        }
        self.inner.fetch_page_metadata(slug).await
      })
    }

    fn fetch_site_defaults(&self) -> BoxFuture<'_, Result<SiteMetadataDefaults, SiteError>> {
      self.defaults_calls.fetch_add(1, Ordering::SeqCst);
      if self.fail_defaults {
        return Box::pin(async { Err(SiteError::unavailable("database offline")) });
      }
      self.inner.fetch_site_defaults()
    }

    fn list_blog_posts(&self) -> BoxFuture<'_, Result<Vec<BlogPost>, SiteError>> {
      self.inner.list_blog_posts()
    }
  }

  struct FailingSource;

  impl MetadataSource for FailingSource {
    fn fetch_page_metadata<'a>(
      &'a self,
      _slug: &'a str,
    ) -> BoxFuture<'a, Result<Option<PageMetadataRecord>, SiteError>> {
      Box::pin(async { Err(SiteError::unavailable("database offline")) })
    }

    fn fetch_site_defaults(&self) -> BoxFuture<'_, Result<SiteMetadataDefaults, SiteError>> {
      Box::pin(async { Err(SiteError::unavailable("database offline")) })
    }

    fn list_blog_posts(&self) -> BoxFuture<'_, Result<Vec<BlogPost>, SiteError>> {
      Box::pin(async { Err(SiteError::unavailable("database offline")) })
    }
  }

  #[tokio::test]
  async fn refresh_resolves_page_record() {
    let effect = MetadataEffect::new(Arc::new(memory()), SiteIdentity::default());
    let meta = effect.refresh(&state(PageId::Services)).await.unwrap();
    assert_eq!(meta.title, "Pooja Services");
    assert_eq!(meta.canonical_url, "/services");

    let meta = effect.refresh(&state(PageId::Books)).await.unwrap();
    assert_eq!(meta.title, "Default Title");
  }

  #[tokio::test]
  async fn stale_fetch_is_discarded() {
    let source = Arc::new(GatedSource::new(false));
    let effect = MetadataEffect::new(source.clone(), SiteIdentity::default());
    let about = state(PageId::About);
    let services = state(PageId::Services);

    let (slow, fast) = tokio::join!(effect.refresh(&about), async {
      let meta = effect.refresh(&services).await;
      source.gate.notify_one();
      meta
    });

    assert!(slow.is_none());
    assert_eq!(fast.unwrap().title, "Pooja Services");
  }

  #[tokio::test]
  async fn stale_fetch_does_not_touch_head() {
    let source = Arc::new(GatedSource::new(false));
    let effect = MetadataEffect::new(source.clone(), SiteIdentity::default());
    let head = Mutex::new(Head::new());
    let about = state(PageId::About);
    let services = state(PageId::Services);

    let (slow, fast) = tokio::join!(effect.refresh_into(&about, &head), async {
      let applied = effect.refresh_into(&services, &head).await;
      source.gate.notify_one();
      applied
    });

    assert!(!slow);
    assert!(fast);
    assert_eq!(head.lock().unwrap().title(), Some("Pooja Services"));
  }

  #[tokio::test]
  async fn fetch_failure_falls_back_to_literals() {
    let effect = MetadataEffect::new(Arc::new(FailingSource), SiteIdentity::default());
    let meta = effect.refresh(&state(PageId::Services)).await.unwrap();
    assert_eq!(meta.title, DEFAULT_TITLE);
    assert!(!meta.description.is_empty());
  }

  #[tokio::test]
  async fn defaults_are_cached_after_success_only() {
    let ok = Arc::new(GatedSource::new(false));
    let effect = MetadataEffect::new(ok.clone(), SiteIdentity::default());
    effect.refresh(&state(PageId::Services)).await;
    effect.refresh(&state(PageId::Books)).await;
    assert_eq!(ok.defaults_calls.load(Ordering::SeqCst), 1);

    let failing = Arc::new(GatedSource::new(true));
    let effect = MetadataEffect::new(failing.clone(), SiteIdentity::default());
    let meta = effect.refresh(&state(PageId::Services)).await.unwrap();
    assert_eq!(meta.title, "Pooja Services");
    effect.refresh(&state(PageId::Books)).await;
    assert_eq!(failing.defaults_calls.load(Ordering::SeqCst), 2);
  }

  #[tokio::test]
  async fn blog_detail_fetches_by_blog_id() {
    let source = MemorySource::default().page(record("significance-pooja", "Significance of Pooja"));
    let effect = MetadataEffect::new(Arc::new(source), SiteIdentity::default());
    let mut state = NavigationState::default();
    state.apply(
      NavigationRequest::with_context(PageId::BlogDetail).blog_id("significance-pooja").into_patch(),
    );
    let meta = effect.refresh(&state).await.unwrap();
    assert_eq!(meta.title, "Significance of Pooja");
  }

  async fn wait_for_title(head: &Mutex<Head>, title: &str) {
    let wait = async {
      loop {
        if head.lock().unwrap().title() == Some(title) {
          break;
        }
        tokio::time::sleep(Duration::from_millis(1)).await;
      }
    };
    tokio::time::timeout(Duration::from_secs(2), wait).await.unwrap();
  }

  #[tokio::test]
  async fn attached_effect_follows_store() {
    let store = NavigationStore::new(Arc::new(MemoryStorage::new()));
    let effect = Arc::new(MetadataEffect::new(Arc::new(memory()), SiteIdentity::default()));
    let head = Arc::new(Mutex::new(Head::new()));
    let id = effect.attach(&store, head.clone());

    store.set(NavigationPatch::page(PageId::Services));
    wait_for_title(&head, "Pooja Services").await;
    assert_eq!(head.lock().unwrap().meta(MetaKey::Name, "robots"), Some("index, follow"));

    store.set(NavigationPatch::page(PageId::About));
    wait_for_title(&head, "About the Pandit").await;

    assert!(store.unsubscribe(id));
  }

  #[tokio::test(flavor = "multi_thread", worker_threads = 1)]
  async fn back_to_back_navigation_keeps_latest_metadata() {
    let store = Arc::new(NavigationStore::new(Arc::new(MemoryStorage::new())));
    let effect = Arc::new(MetadataEffect::new(Arc::new(memory()), SiteIdentity::default()));
    let head = Arc::new(Mutex::new(Head::new()));
    effect.attach(&store, head.clone());

    let navigating = Arc::clone(&store);
    tokio::spawn(async move {
      navigating.set(NavigationPatch::page(PageId::Services));
      navigating.set(NavigationPatch::page(PageId::About));
    })
    .await
    .unwrap();

    wait_for_title(&head, "About the Pandit").await;
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(store.get().current_page, PageId::About);
    assert_eq!(head.lock().unwrap().title(), Some("About the Pandit"));
  }

  #[tokio::test]
  async fn generation_taken_first_loses_to_later_one() {
    let effect = MetadataEffect::new(Arc::new(memory()), SiteIdentity::default());
    let head = Mutex::new(Head::new());
    let first = effect.begin();
    let second = effect.begin();

    assert!(effect.refresh_into_at(second, &state(PageId::About), &head).await);
    assert!(!effect.refresh_into_at(first, &state(PageId::Services), &head).await);
    assert_eq!(head.lock().unwrap().title(), Some("About the Pandit"));
  }
}
