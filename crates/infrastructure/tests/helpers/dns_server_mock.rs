#![allow(dead_code)]
use super::responses::{answer_for_query, EXAMPLE_COM_ADDR};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::net::UdpSocket;
use tokio::sync::oneshot;

/// How the mock server answers each query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockBehavior {
    /// Echo the question with one A record.
    Answer,
    /// Like `Answer` but with the transaction id flipped.
    WrongId,
    /// A datagram with the id flipped, then the proper answer.
    StaleThenAnswer,
    /// Like `Answer` but with the TC bit set.
    Truncated,
    /// Send a datagram of exactly this many octets.
    Oversized(usize),
    /// Never reply.
    Silent,
}

pub struct MockDnsServer {
    addr: SocketAddr,
    queries: Arc<AtomicUsize>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockDnsServer {
    /// Binds an ephemeral port on loopback.
    pub async fn start(behavior: MockBehavior) -> Result<Self, std::io::Error> {
        let socket = UdpSocket::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = socket.local_addr()?;
        let queries = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&queries);

        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            let mut buf = vec![0u8; 512];

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => {
                        break;
                    }
                    result = socket.recv_from(&mut buf) => {
                        if let Ok((len, peer)) = result {
                            counter.fetch_add(1, Ordering::SeqCst);
                            for response in Self::build_responses(behavior, &buf[..len]) {
                                let _ = socket.send_to(&response, peer).await;
                            }
                        }
                    }
                }
            }
        });

        Ok(Self {
            addr,
            queries,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    /// Datagrams to send back, in order.
    fn build_responses(behavior: MockBehavior, query: &[u8]) -> Vec<Vec<u8>> {
        let mut response = answer_for_query(query, EXAMPLE_COM_ADDR, 60);
        if response.is_empty() {
            return Vec::new();
        }
        let flip_id = |mut bytes: Vec<u8>| {
            bytes[0] ^= 0xFF;
            bytes[1] ^= 0xFF;
            bytes
        };
        match behavior {
            MockBehavior::Answer => {}
            MockBehavior::WrongId => response = flip_id(response),
            MockBehavior::StaleThenAnswer => return vec![flip_id(response.clone()), response],
            MockBehavior::Truncated => response[2] |= 0x02,
            MockBehavior::Oversized(len) => response.resize(len, 0),
            MockBehavior::Silent => return Vec::new(),
        }
        vec![response]
    }

    pub fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
