use super::QueryContext;
use async_trait::async_trait;
use bytes::Bytes;
use sysresolver_domain::{DomainError, Question};

/// What the client hands a backend for one query.
///
/// `wire` is the encoded query carrying `id`; backends that resolve
/// name/type natively read `question` and ignore it.
#[derive(Debug, Clone, Copy)]
pub struct BackendRequest<'a> {
    pub question: &'a Question,
    pub wire: &'a [u8],
    pub id: u16,
}

/// Complete, delimited response buffer in wire format.
#[derive(Debug, Clone)]
pub struct BackendResponse {
    pub bytes: Bytes,
}

impl BackendResponse {
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }
}

/// The external facility that actually performs the lookup.
///
/// Errors must keep unavailable (`BackendUnavailable`), failed
/// (`BackendError`), timed out (`QueryTimeout`) and truncated-by-transport
/// (`TruncatedMessage` with origin `Backend`) apart. Every resource acquired
/// for a submission is released when the returned future completes or is
/// dropped.
#[async_trait]
pub trait ResolutionBackend: Send + Sync {
    async fn submit(
        &self,
        request: &BackendRequest<'_>,
        ctx: &QueryContext,
    ) -> Result<BackendResponse, DomainError>;

    fn name(&self) -> &'static str;
}
