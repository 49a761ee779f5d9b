use anyhow::Context;
use clap::Parser;
use sysresolver_application::ports::QueryContext;
use sysresolver_domain::CliOverrides;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

mod bootstrap;
mod di;

#[derive(Parser)]
#[command(name = "sysresolve")]
#[command(version)]
#[command(about = "Resolve a name through the system's nameserver and print the decoded DNS message")]
struct Cli {
    /// Domain name to resolve
    name: String,

    /// Record type (A, AAAA, MX, TXT, TYPE65280, ...)
    #[arg(default_value = "A")]
    record_type: String,

    /// Query class (IN, CH, HS, CLASS<n>)
    #[arg(long, default_value = "IN")]
    class: String,

    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Nameserver to query instead of the one in resolv.conf (ip or ip:port)
    #[arg(short = 's', long, value_name = "SERVER")]
    server: Option<String>,

    /// Query timeout in milliseconds
    #[arg(short = 't', long, value_name = "MS")]
    timeout: Option<u64>,

    /// resolv.conf used for nameserver discovery
    #[arg(long, value_name = "PATH")]
    resolv_conf: Option<String>,

    /// Receive buffer size in octets (512..=65536)
    #[arg(long, value_name = "OCTETS")]
    buffer_size: Option<usize>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        timeout_ms: cli.timeout,
        receive_buffer_size: cli.buffer_size,
        nameserver: cli.server.clone(),
        resolv_conf: cli.resolv_conf.clone(),
        log_level: cli.log_level.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config);

    debug!("Starting sysresolve v{}", env!("CARGO_PKG_VERSION"));

    let dns_services = di::DnsServices::new(&config).await?;
    let use_cases = di::UseCases::new(&dns_services);

    let cancellation = CancellationToken::new();
    let on_interrupt = cancellation.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling query");
            on_interrupt.cancel();
        }
    });

    let ctx = QueryContext::with_timeout(config.resolver.timeout()).with_cancellation(cancellation);

    let message = use_cases
        .lookup
        .execute(&ctx, &cli.name, &cli.record_type, &cli.class)
        .await
        .with_context(|| {
            format!(
                "lookup of {} {} {} via {} failed",
                cli.name,
                cli.class,
                cli.record_type,
                dns_services.backend.server_addr()
            )
        })?;

    println!("{}", message);
    Ok(())
}
