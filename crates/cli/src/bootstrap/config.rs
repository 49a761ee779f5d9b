use sysresolver_domain::{CliOverrides, Config};
use tracing::info;

pub fn load_config(
    config_path: Option<&str>,
    cli_overrides: CliOverrides,
) -> anyhow::Result<Config> {
    let config = Config::load(config_path, cli_overrides)?;
    config.validate()?;

    info!(
        config_file = config_path.unwrap_or("default"),
        timeout_ms = config.resolver.timeout_ms,
        receive_buffer = config.resolver.receive_buffer_size,
        nameserver = config.resolver.nameserver.as_deref().unwrap_or("system"),
        "Configuration loaded"
    );

    Ok(config)
}
