use crate::dns::wire;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;
use sysresolver_application::ports::{
    BackendRequest, DnsResolver, QueryContext, ResolutionBackend,
};
use sysresolver_domain::{DnsClass, DomainError, Message, Question};
use tracing::{debug, info, warn};

/// Turns a [`Question`] into a decoded [`Message`] through one backend.
///
/// Each call validates, encodes, submits under the caller's deadline and
/// cancellation token, then decodes. There are no retries and no fallback.
pub struct ResolutionClient {
    backend: Arc<dyn ResolutionBackend>,
}

impl ResolutionClient {
    pub fn new(backend: Arc<dyn ResolutionBackend>) -> Self {
        info!(backend = backend.name(), "Resolution client created");
        Self { backend }
    }

    /// Rejects questions that cannot be put on the wire or asked as a plain
    /// query. No I/O happens before this passes.
    pub fn validate(question: &Question) -> Result<(), DomainError> {
        question
            .name
            .check_limits()
            .map_err(|e| DomainError::UnsupportedQuestion(format!("{}: {}", question.name, e)))?;

        if !question.record_type.is_queryable() {
            return Err(DomainError::UnsupportedQuestion(format!(
                "record type {} cannot be queried",
                question.record_type
            )));
        }

        match question.class {
            DnsClass::NONE | DnsClass::Unknown(0) => Err(DomainError::UnsupportedQuestion(
                format!("class {} cannot be queried", question.class),
            )),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl DnsResolver for ResolutionClient {
    async fn query(&self, ctx: &QueryContext, question: &Question) -> Result<Message, DomainError> {
        Self::validate(question)?;
        let (id, wire) = wire::encode_query(question)?;
        let request = BackendRequest {
            question,
            wire: &wire,
            id,
        };

        debug!(
            name = %question.name,
            record_type = %question.record_type,
            class = %question.class,
            id = id,
            bytes = wire.len(),
            backend = self.backend.name(),
            "Submitting query"
        );

        let start = Instant::now();
        let response = tokio::select! {
            biased;
            _ = ctx.done() => {
                warn!(
                    name = %question.name,
                    record_type = %question.record_type,
                    cancelled = ctx.is_cancelled(),
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Query abandoned before a response arrived"
                );
                return Err(DomainError::QueryTimeout);
            }
            result = self.backend.submit(&request, ctx) => result?,
        };

        debug!(
            name = %question.name,
            bytes = response.bytes.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Response received"
        );

        let message = wire::decode(&response.bytes)?;
        if !message.is_response() {
            return Err(DomainError::MalformedMessage(
                "backend returned a message with QR clear".to_string(),
            ));
        }

        Ok(message)
    }
}
