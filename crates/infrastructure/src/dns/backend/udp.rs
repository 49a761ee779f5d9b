//! UDP backend (RFC 1035 §4.2.1)
//!
//! Sends the encoded query as-is to one nameserver and hands back the
//! datagram that answers it. Datagrams from other peers or carrying another
//! transaction id are skipped. A response with the TC bit set, or one that
//! fills the whole receive buffer, is reported as truncated by the backend;
//! this backend never retries over TCP.

use super::system::system_nameservers;
use async_trait::async_trait;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::path::Path;
use sysresolver_application::ports::{
    BackendRequest, BackendResponse, QueryContext, ResolutionBackend,
};
use sysresolver_domain::config::resolver::{MAX_RECEIVE_BUFFER, MIN_RECEIVE_BUFFER};
use sysresolver_domain::DomainError;
use tokio::net::UdpSocket;
use tracing::{debug, warn};

const FLAG_TC: u8 = 0x02;

/// DNS over UDP to a single nameserver.
pub struct UdpBackend {
    server_addr: SocketAddr,
    receive_buffer_size: usize,
}

impl UdpBackend {
    pub fn new(server_addr: SocketAddr, receive_buffer_size: usize) -> Self {
        Self {
            server_addr,
            receive_buffer_size: receive_buffer_size.clamp(MIN_RECEIVE_BUFFER, MAX_RECEIVE_BUFFER),
        }
    }

    /// Uses the first nameserver listed in `resolv_conf`.
    pub async fn from_system(
        resolv_conf: impl AsRef<Path>,
        receive_buffer_size: usize,
    ) -> Result<Self, DomainError> {
        let path = resolv_conf.as_ref();
        let server_addr = system_nameservers(path)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| {
                DomainError::BackendUnavailable(format!(
                    "no nameserver configured in {}",
                    path.display()
                ))
            })?;
        Ok(Self::new(server_addr, receive_buffer_size))
    }

    pub fn server_addr(&self) -> SocketAddr {
        self.server_addr
    }

    pub fn receive_buffer_size(&self) -> usize {
        self.receive_buffer_size
    }

    fn bind_addr(&self) -> SocketAddr {
        if self.server_addr.is_ipv4() {
            SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0))
        } else {
            SocketAddr::from((Ipv6Addr::UNSPECIFIED, 0))
        }
    }
}

/// The response must carry the query's transaction id.
pub(crate) fn validate_response_id(
    query_id: u16,
    response: &[u8],
    server: SocketAddr,
) -> Result<(), DomainError> {
    if response.len() < 2 {
        return Err(DomainError::truncated_wire(format!(
            "{}-octet response from {} carries no id",
            response.len(),
            server
        )));
    }
    let response_id = u16::from_be_bytes([response[0], response[1]]);
    if response_id != query_id {
        return Err(DomainError::MalformedMessage(format!(
            "transaction id mismatch from {}: sent {:#06x}, received {:#06x}",
            server, query_id, response_id
        )));
    }
    Ok(())
}

#[async_trait]
impl ResolutionBackend for UdpBackend {
    async fn submit(
        &self,
        request: &BackendRequest<'_>,
        _ctx: &QueryContext,
    ) -> Result<BackendResponse, DomainError> {
        let socket = UdpSocket::bind(self.bind_addr()).await.map_err(|e| {
            DomainError::BackendUnavailable(format!("Failed to bind UDP socket: {}", e))
        })?;

        let bytes_sent = socket
            .send_to(request.wire, self.server_addr)
            .await
            .map_err(|e| {
                DomainError::BackendUnavailable(format!(
                    "Failed to send UDP query to {}: {}",
                    self.server_addr, e
                ))
            })?;

        debug!(
            server = %self.server_addr,
            id = request.id,
            bytes_sent = bytes_sent,
            "UDP query sent"
        );

        let mut recv_buf = vec![0u8; self.receive_buffer_size];
        let bytes_received = loop {
            let (len, from_addr) = socket.recv_from(&mut recv_buf).await.map_err(|e| {
                DomainError::BackendError(format!(
                    "Failed to receive UDP response from {}: {}",
                    self.server_addr, e
                ))
            })?;

            if from_addr != self.server_addr {
                warn!(
                    expected = %self.server_addr,
                    received_from = %from_addr,
                    "Ignoring UDP datagram from unexpected source"
                );
                continue;
            }

            match validate_response_id(request.id, &recv_buf[..len], self.server_addr) {
                Ok(()) => break len,
                Err(DomainError::MalformedMessage(detail)) => {
                    warn!(
                        server = %self.server_addr,
                        detail = %detail,
                        "Ignoring stale UDP response"
                    );
                }
                Err(e) => return Err(e),
            }
        };
        recv_buf.truncate(bytes_received);

        debug!(
            server = %self.server_addr,
            bytes_received = bytes_received,
            "UDP response received"
        );

        if bytes_received == self.receive_buffer_size {
            warn!(
                server = %self.server_addr,
                buffer = self.receive_buffer_size,
                "UDP response filled the receive buffer"
            );
            return Err(DomainError::truncated_backend(format!(
                "response filled the {}-octet receive buffer",
                self.receive_buffer_size
            )));
        }

        if recv_buf.len() > 2 && recv_buf[2] & FLAG_TC != 0 {
            warn!(server = %self.server_addr, id = request.id, "UDP response has TC bit set");
            return Err(DomainError::truncated_backend(format!(
                "{} set the TC bit",
                self.server_addr
            )));
        }

        Ok(BackendResponse::new(recv_buf))
    }

    fn name(&self) -> &'static str {
        "udp"
    }
}
