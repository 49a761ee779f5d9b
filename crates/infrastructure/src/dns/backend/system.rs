use std::net::{IpAddr, Ipv6Addr, SocketAddr, SocketAddrV6};
use std::path::Path;
use sysresolver_domain::config::resolver::DEFAULT_DNS_PORT;
use sysresolver_domain::DomainError;
use tokio::fs;
use tracing::debug;

/// Nameservers configured in a `resolv.conf`-style file, in file order.
pub async fn system_nameservers(path: impl AsRef<Path>) -> Result<Vec<SocketAddr>, DomainError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).await.map_err(|e| {
        DomainError::IoError(format!("Failed to read {}: {}", path.display(), e))
    })?;

    let servers = parse_resolv_conf(&content);
    debug!(
        path = %path.display(),
        nameservers = servers.len(),
        "Read system resolver configuration"
    );
    Ok(servers)
}

/// Extracts `nameserver` lines. Comments start with `#` or `;`; entries that
/// are not IP addresses are skipped.
///
/// An IPv6 `%scope` suffix must be a numeric interface index, which becomes
/// the address's scope id. Entries scoped by interface name are skipped; the
/// name cannot be mapped to an index here and an unscoped link-local address
/// is not routable.
pub fn parse_resolv_conf(content: &str) -> Vec<SocketAddr> {
    content
        .lines()
        .filter_map(|line| {
            let line = line.split(['#', ';']).next()?;
            let mut fields = line.split_whitespace();
            if fields.next()? != "nameserver" {
                return None;
            }
            parse_nameserver_entry(fields.next()?)
        })
        .collect()
}

fn parse_nameserver_entry(raw: &str) -> Option<SocketAddr> {
    let Some((addr, scope)) = raw.split_once('%') else {
        let ip = raw.parse::<IpAddr>().ok()?;
        return Some(SocketAddr::new(ip, DEFAULT_DNS_PORT));
    };

    let ip = addr.parse::<Ipv6Addr>().ok()?;
    match scope.parse::<u32>() {
        Ok(scope_id) => Some(SocketAddr::V6(SocketAddrV6::new(
            ip,
            DEFAULT_DNS_PORT,
            0,
            scope_id,
        ))),
        Err(_) => {
            debug!(nameserver = raw, "Skipping nameserver scoped by interface name");
            None
        }
    }
}
