/* src/cli/core/src/logging.rs */

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Install the global subscriber. `RUST_LOG` wins over the `info` default.
pub(crate) fn init(json: bool) {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
  let registry = tracing_subscriber::registry().with(filter);
  // A second init (tests, embedding) keeps the first subscriber.
  if json {
    let _ = registry.with(fmt::layer().json().with_writer(std::io::stderr)).try_init();
  } else {
    let _ = registry.with(fmt::layer().with_writer(std::io::stderr)).try_init();
  }
}
