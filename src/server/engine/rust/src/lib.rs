/* src/server/engine/rust/src/lib.rs */

pub mod escape;
pub mod meta;
pub mod nav;
pub mod page;
pub mod route;

// Public API re-exports
pub use escape::script_safe_json;
pub use meta::{
  EffectiveMetadata, PageMetadataRecord, SiteIdentity, SiteMetadataDefaults, resolve_metadata,
  structured_data,
};
pub use nav::{DEFAULT_CATEGORY, NavigationPatch, NavigationRequest, NavigationState};
pub use page::{MenuEntry, PageId, menu_entries};
pub use route::{PathTarget, canonical_path, parse_path, route_table, state_for_path};
