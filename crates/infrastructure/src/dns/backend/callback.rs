//! Adapter for resolution services that report completion through a callback.
//!
//! Each submission registers a single-use completion slot under a fresh
//! [`CorrelationToken`]. The service gets the token and a [`CompletionSink`];
//! whichever thread runs its callback calls [`CompletionSink::complete`],
//! which removes the slot and fills it. A callback that finds no slot (a
//! duplicate, or one arriving after the query was abandoned) is discarded.

use async_trait::async_trait;
use dashmap::DashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use sysresolver_application::ports::{
    BackendRequest, BackendResponse, QueryContext, ResolutionBackend,
};
use sysresolver_domain::{DomainError, Question};
use tokio::sync::oneshot;
use tracing::debug;

type Completion = Result<BackendResponse, DomainError>;
type Registry = DashMap<CorrelationToken, oneshot::Sender<Completion>>;

/// Links a native callback to the query waiting on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CorrelationToken(u64);

impl fmt::Display for CorrelationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The native in-flight operation behind one submission.
pub trait NativeHandle: Send {
    /// Frees the native operation. Called exactly once per handle.
    fn release(self: Box<Self>);
}

/// A callback-style resolution service.
pub trait CallbackService: Send + Sync {
    /// Starts resolving `question`. The service must eventually pass the
    /// outcome to `sink.complete(token, ..)`, from any thread, and may do so
    /// before returning.
    fn start(
        &self,
        token: CorrelationToken,
        question: &Question,
        sink: CompletionSink,
    ) -> Result<Box<dyn NativeHandle>, DomainError>;

    fn name(&self) -> &'static str;
}

/// Hands completions back to the waiting submission.
#[derive(Clone)]
pub struct CompletionSink {
    registry: Arc<Registry>,
}

impl CompletionSink {
    /// Delivers `outcome` for `token`. Returns `false` when nobody is
    /// waiting any more.
    pub fn complete(&self, token: CorrelationToken, outcome: Completion) -> bool {
        let Some((_, slot)) = self.registry.remove(&token) else {
            debug!(token = %token, "Discarding completion with no waiting query");
            return false;
        };
        if slot.send(outcome).is_err() {
            debug!(token = %token, "Waiting query went away before completion");
            return false;
        }
        true
    }
}

/// Removes the registration and releases the native handle on every exit
/// path of a submission, drop included.
struct InFlight<'a> {
    registry: &'a Registry,
    token: CorrelationToken,
    handle: Option<Box<dyn NativeHandle>>,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.registry.remove(&self.token);
        if let Some(handle) = self.handle.take() {
            handle.release();
        }
    }
}

/// [`ResolutionBackend`] over a [`CallbackService`].
pub struct CallbackBackend<S> {
    service: S,
    registry: Arc<Registry>,
    next_token: AtomicU64,
}

impl<S: CallbackService> CallbackBackend<S> {
    pub fn new(service: S) -> Self {
        Self {
            service,
            registry: Arc::new(DashMap::new()),
            next_token: AtomicU64::new(1),
        }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// Submissions currently waiting for a callback.
    pub fn in_flight(&self) -> usize {
        self.registry.len()
    }

    fn sink(&self) -> CompletionSink {
        CompletionSink {
            registry: Arc::clone(&self.registry),
        }
    }
}

#[async_trait]
impl<S: CallbackService> ResolutionBackend for CallbackBackend<S> {
    async fn submit(
        &self,
        request: &BackendRequest<'_>,
        ctx: &QueryContext,
    ) -> Result<BackendResponse, DomainError> {
        let token = CorrelationToken(self.next_token.fetch_add(1, Ordering::Relaxed));
        let (tx, rx) = oneshot::channel();
        self.registry.insert(token, tx);

        let mut in_flight = InFlight {
            registry: &self.registry,
            token,
            handle: None,
        };
        in_flight.handle = Some(self.service.start(token, request.question, self.sink())?);

        debug!(
            token = %token,
            name = %request.question.name,
            service = self.service.name(),
            "Callback query started"
        );

        tokio::select! {
            completion = rx => completion.unwrap_or_else(|_| {
                Err(DomainError::BackendError(
                    "completion slot dropped without a result".to_string(),
                ))
            }),
            _ = ctx.done() => Err(DomainError::QueryTimeout),
        }
    }

    fn name(&self) -> &'static str {
        self.service.name()
    }
}
