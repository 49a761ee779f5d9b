use super::QueryContext;
use async_trait::async_trait;
use sysresolver_domain::{DomainError, Message, Question};

/// One query/response cycle: question in, decoded message out.
///
/// Implementations must be safe to call concurrently and must return
/// `QueryTimeout` once `ctx` expires or is cancelled.
#[async_trait]
pub trait DnsResolver: Send + Sync {
    async fn query(&self, ctx: &QueryContext, question: &Question)
        -> Result<Message, DomainError>;
}
