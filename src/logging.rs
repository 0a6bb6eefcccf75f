//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "linkcheck=info";

/// Install the global subscriber. `RUST_LOG` overrides the default filter;
/// `verbose` raises the crate to debug when `RUST_LOG` is unset.
pub fn init(verbose: bool) {
    let default = if verbose { "linkcheck=debug" } else { DEFAULT_FILTER };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    // A second init (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
