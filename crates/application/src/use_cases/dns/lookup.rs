use crate::ports::{DnsResolver, QueryContext};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Instant;
use sysresolver_domain::{DnsClass, DnsName, DomainError, Message, Question, RecordType};
use tracing::{debug, info, warn};

/// Text in, decoded message out: parses a lookup request and runs it
/// through the resolver.
pub struct LookupUseCase {
    resolver: Arc<dyn DnsResolver>,
}

impl LookupUseCase {
    pub fn new(resolver: Arc<dyn DnsResolver>) -> Self {
        Self { resolver }
    }

    pub fn parse_question(
        name: &str,
        record_type: &str,
        class: &str,
    ) -> Result<Question, DomainError> {
        let name = DnsName::from_str(name)?;
        let record_type =
            RecordType::from_str(record_type).map_err(DomainError::UnsupportedQuestion)?;
        let class = DnsClass::from_str(class).map_err(DomainError::UnsupportedQuestion)?;
        Ok(Question::new(name, record_type, class))
    }

    pub async fn execute(
        &self,
        ctx: &QueryContext,
        name: &str,
        record_type: &str,
        class: &str,
    ) -> Result<Message, DomainError> {
        let question = Self::parse_question(name, record_type, class)?;
        self.execute_question(ctx, &question).await
    }

    pub async fn execute_question(
        &self,
        ctx: &QueryContext,
        question: &Question,
    ) -> Result<Message, DomainError> {
        let start = Instant::now();

        debug!(
            name = %question.name,
            record_type = %question.record_type,
            class = %question.class,
            remaining_ms = ctx.remaining().as_millis() as u64,
            "Lookup started"
        );

        match self.resolver.query(ctx, question).await {
            Ok(message) => {
                info!(
                    name = %question.name,
                    record_type = %question.record_type,
                    rcode = %message.response_code(),
                    answers = message.answers().len(),
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Lookup completed"
                );
                Ok(message)
            }
            Err(e) => {
                warn!(
                    name = %question.name,
                    record_type = %question.record_type,
                    error = %e,
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Lookup failed"
                );
                Err(e)
            }
        }
    }
}
