#![allow(dead_code)]
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::net::UdpSocket;
use tokio::sync::oneshot;

const RCODE_NXDOMAIN: u8 = 3;

/// One answer record; the owner name always points back at the question.
#[derive(Clone)]
pub struct Answer {
    pub record_type: u16,
    pub ttl: u32,
    pub rdata: Vec<u8>,
}

/// Loopback nameserver answering from a fixed zone table.
///
/// Unknown names get NXDOMAIN; names listed as silent get no reply at all.
pub struct MockUpstream {
    addr: SocketAddr,
    queries: Arc<AtomicUsize>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

#[derive(Default)]
pub struct Zone {
    records: HashMap<(String, u16), Vec<Answer>>,
    silent: Vec<String>,
}

impl Zone {
    pub fn with(mut self, name: &str, answer: Answer) -> Self {
        self.records
            .entry((name.to_ascii_lowercase(), answer.record_type))
            .or_default()
            .push(answer);
        self
    }

    pub fn silent(mut self, name: &str) -> Self {
        self.silent.push(name.to_ascii_lowercase());
        self
    }
}

impl MockUpstream {
    pub async fn start(zone: Zone) -> std::io::Result<Self> {
        let socket = UdpSocket::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = socket.local_addr()?;
        let queries = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&queries);
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            let mut buf = vec![0u8; 512];
            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    result = socket.recv_from(&mut buf) => {
                        let Ok((len, peer)) = result else { continue };
                        counter.fetch_add(1, Ordering::SeqCst);
                        if let Some(response) = respond(&zone, &buf[..len]) {
                            let _ = socket.send_to(&response, peer).await;
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
}

impl Drop for MockUpstream {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

/// Question name (dotted, lowercase), QTYPE and the offset where the
/// question section ends. Compressed query names are not expected.
fn parse_question(query: &[u8]) -> Option<(String, u16, usize)> {
    let mut pos = 12;
    let mut labels = Vec::new();
    loop {
        let len = *query.get(pos)? as usize;
        pos += 1;
        if len == 0 {
            break;
        }
        let label = query.get(pos..pos + len)?;
        labels.push(String::from_utf8_lossy(label).to_ascii_lowercase());
        pos += len;
    }
    let qtype = u16::from_be_bytes([*query.get(pos)?, *query.get(pos + 1)?]);
    let end = pos + 4;
    if end > query.len() {
        return None;
    }
    Some((labels.join("."), qtype, end))
}

fn respond(zone: &Zone, query: &[u8]) -> Option<Vec<u8>> {
    let (name, qtype, question_end) = parse_question(query)?;
    if zone.silent.contains(&name) {
        return None;
    }

    let answers = zone.records.get(&(name, qtype));
    let rcode = if answers.is_some() { 0 } else { RCODE_NXDOMAIN };
    let answers = answers.map(Vec::as_slice).unwrap_or(&[]);

    let mut response = Vec::with_capacity(512);
    response.extend_from_slice(&query[0..2]);
    response.push(0x81);
    response.push(0x80 | rcode);
    response.extend_from_slice(&[0x00, 0x01]);
    response.extend_from_slice(&(answers.len() as u16).to_be_bytes());
    response.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]);
    response.extend_from_slice(&query[12..question_end]);

    for answer in answers {
        response.extend_from_slice(&[0xc0, 0x0c]);
        response.extend_from_slice(&answer.record_type.to_be_bytes());
        response.extend_from_slice(&[0x00, 0x01]);
        response.extend_from_slice(&answer.ttl.to_be_bytes());
        response.extend_from_slice(&(answer.rdata.len() as u16).to_be_bytes());
        response.extend_from_slice(&answer.rdata);
    }
    Some(response)
}
