use sysresolver_domain::config::LogFormat;
use sysresolver_domain::Config;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Logs go to stderr; stdout carries only the decoded message. `RUST_LOG`
/// takes precedence over the configured level.
pub fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.to_ascii_lowercase()));

    let builder = tracing_subscriber::fmt()
        .with_target(true)
        .with_thread_ids(false)
        .with_level(true)
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match config.logging.format {
        LogFormat::Pretty => builder.with_ansi(true).init(),
        LogFormat::Json => builder.json().init(),
    }

    debug!("Logging initialized at level: {}", config.logging.level);
}
