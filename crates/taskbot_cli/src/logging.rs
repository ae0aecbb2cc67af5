use tracing_subscriber::EnvFilter;

pub const LOG_ENV_VAR: &str = "TASKBOT_LOG";
const DEFAULT_LOG_FILTER: &str = "warn";

/// Resolves the filter from `TASKBOT_LOG`, then the configured filter, then
/// `warn`. An unparsable configured filter falls back to the default.
pub fn resolve_filter(configured: Option<&str>) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_env(LOG_ENV_VAR) {
        return filter;
    }

    configured
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Installs the stderr subscriber. Stdout is reserved for responses.
pub fn init_logging(configured: Option<&str>) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(resolve_filter(configured))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
