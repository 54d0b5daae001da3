use tracing_subscriber::EnvFilter;

/// Install the global subscriber, reading verbosity from `RUST_LOG`.
/// Returns false when another subscriber beat us to it.
pub fn init() -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init()
        .is_ok()
}
