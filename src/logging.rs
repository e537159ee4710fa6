use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// Install the global subscriber. Logs go to stderr without timestamps or
/// targets; the default `warn` filter keeps fault diagnostics alone there.
pub fn init(config: &Config) {
    let filter = EnvFilter::try_new(&config.log_filter).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .without_time()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .try_init();
}
