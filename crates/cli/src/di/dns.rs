use std::sync::Arc;
use sysresolver_domain::Config;
use sysresolver_infrastructure::dns::{ResolutionClient, UdpBackend};
use tracing::info;

pub struct DnsServices {
    pub backend: Arc<UdpBackend>,
    pub resolver: Arc<ResolutionClient>,
}

impl DnsServices {
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        let backend = Arc::new(Self::build_backend(config).await?);
        let resolver = Arc::new(ResolutionClient::new(backend.clone()));

        Ok(Self { backend, resolver })
    }

    /// An explicit nameserver wins over the one discovered in `resolv_conf`.
    async fn build_backend(config: &Config) -> anyhow::Result<UdpBackend> {
        let buffer = config.resolver.receive_buffer_size;

        if let Some(addr) = config
            .resolver
            .nameserver_addr()
            .map_err(anyhow::Error::msg)?
        {
            info!(nameserver = %addr, buffer = buffer, "Using configured nameserver");
            return Ok(UdpBackend::new(addr, buffer));
        }

        let backend = UdpBackend::from_system(&config.resolver.resolv_conf, buffer).await?;
        info!(
            nameserver = %backend.server_addr(),
            resolv_conf = %config.resolver.resolv_conf,
            buffer = backend.receive_buffer_size(),
            "Using system nameserver"
        );
        Ok(backend)
    }
}
