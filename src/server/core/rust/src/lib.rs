/* src/server/core/rust/src/lib.rs */

pub mod dispatch;
pub mod errors;
pub mod history;
pub mod metadata;
pub mod rest;
pub mod runtime;
pub mod source;
pub mod storage;
pub mod store;
pub mod sync;
pub mod view;

// Re-exports for ergonomic use
pub use dispatch::{Navigator, NoScroll, ScrollBehavior, Scroller};
pub use errors::SiteError;
pub use history::{History, MemoryHistory};
pub use metadata::MetadataEffect;
pub use rest::RestSource;
pub use runtime::SiteRuntime;
pub use source::{
  BlogPost, BoxFuture, ContentFile, FileSource, MemorySource, MetadataSource, OwnerCheck,
  StaticOwner,
};
pub use storage::{FileStorage, MemoryStorage, Storage};
pub use store::{Listener, NavigationStore, SubscriptionId};
pub use sync::{sync_inbound, sync_outbound};
pub use view::{BLOG_BACK_PATH, PageView, select_page};
