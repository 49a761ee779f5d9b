#![allow(dead_code)]
use async_trait::async_trait;
use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use sysresolver_application::ports::{DnsResolver, QueryContext};
use sysresolver_domain::{
    DnsClass, DomainError, Header, HeaderFlags, Message, Question, RData, RecordType,
    ResourceRecord,
};
use tokio::sync::RwLock;

pub struct MockDnsResolver {
    responses: Arc<RwLock<HashMap<String, Message>>>,
    error_responses: Arc<std::sync::RwLock<HashMap<String, DomainError>>>,
    delay: Arc<std::sync::RwLock<Option<Duration>>>,
    calls: AtomicUsize,
}

impl MockDnsResolver {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(RwLock::new(HashMap::new())),
            error_responses: Arc::new(std::sync::RwLock::new(HashMap::new())),
            delay: Arc::new(std::sync::RwLock::new(None)),
            calls: AtomicUsize::new(0),
        }
    }

    fn key(name: &str) -> String {
        name.trim_end_matches('.').to_ascii_lowercase()
    }

    pub async fn set_response(&self, name: &str, message: Message) {
        self.responses.write().await.insert(Self::key(name), message);
    }

    pub fn set_response_error(&self, name: &str, error: DomainError) {
        self.error_responses
            .write()
            .unwrap()
            .insert(Self::key(name), error);
    }

    pub fn set_delay(&self, delay: Duration) {
        *self.delay.write().unwrap() = Some(delay);
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for MockDnsResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DnsResolver for MockDnsResolver {
    async fn query(
        &self,
        ctx: &QueryContext,
        question: &Question,
    ) -> Result<Message, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let key = Self::key(&question.name.to_string());

        let delay = *self.delay.read().unwrap();
        if let Some(delay) = delay {
            tokio::select! {
                _ = tokio::time::sleep(delay) => {}
                _ = ctx.done() => return Err(DomainError::QueryTimeout),
            }
        }

        if let Some(err) = self.error_responses.read().unwrap().get(&key).cloned() {
            return Err(err);
        }

        self.responses
            .read()
            .await
            .get(&key)
            .cloned()
            .ok_or_else(|| DomainError::BackendError(format!("no mock response for {}", key)))
    }
}

pub fn answer_message(question: &Question, addr: Ipv4Addr, ttl: u32) -> Message {
    let header = Header {
        id: 0x1234,
        flags: HeaderFlags {
            response: true,
            recursion_desired: true,
            recursion_available: true,
            ..HeaderFlags::default()
        },
        question_count: 1,
        answer_count: 1,
        authority_count: 0,
        additional_count: 0,
    };
    let answer = ResourceRecord::new(
        question.name.clone(),
        RecordType::A,
        DnsClass::IN,
        ttl,
        RData::A(addr),
    );
    Message::from_parts(header, vec![question.clone()], vec![answer], vec![], vec![])
        .expect("counts match")
}
