#![allow(dead_code)]
use super::responses::{answer_for_query, EXAMPLE_COM_ADDR};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use sysresolver_application::ports::{
    BackendRequest, BackendResponse, QueryContext, ResolutionBackend,
};
use sysresolver_domain::DomainError;

/// Returns the same bytes for every query.
pub struct StaticBackend {
    bytes: Vec<u8>,
    calls: AtomicUsize,
}

impl StaticBackend {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ResolutionBackend for StaticBackend {
    async fn submit(
        &self,
        _request: &BackendRequest<'_>,
        _ctx: &QueryContext,
    ) -> Result<BackendResponse, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(BackendResponse::new(self.bytes.clone()))
    }

    fn name(&self) -> &'static str {
        "static"
    }
}

/// Answers each query from its own wire bytes, like a well-behaved server.
#[derive(Default)]
pub struct EchoBackend {
    calls: AtomicUsize,
}

impl EchoBackend {
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ResolutionBackend for EchoBackend {
    async fn submit(
        &self,
        request: &BackendRequest<'_>,
        _ctx: &QueryContext,
    ) -> Result<BackendResponse, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;
        Ok(BackendResponse::new(answer_for_query(
            request.wire,
            EXAMPLE_COM_ADDR,
            300,
        )))
    }

    fn name(&self) -> &'static str {
        "echo"
    }
}

/// Fails every query with a fixed error.
pub struct FailingBackend {
    error: DomainError,
}

impl FailingBackend {
    pub fn new(error: DomainError) -> Self {
        Self { error }
    }
}

#[async_trait]
impl ResolutionBackend for FailingBackend {
    async fn submit(
        &self,
        _request: &BackendRequest<'_>,
        _ctx: &QueryContext,
    ) -> Result<BackendResponse, DomainError> {
        Err(self.error.clone())
    }

    fn name(&self) -> &'static str {
        "failing"
    }
}

/// Counts releases of the per-query resource when dropped.
struct ReleaseOnDrop(Arc<AtomicUsize>);

impl Drop for ReleaseOnDrop {
    fn drop(&mut self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

/// Holds a per-query resource and never answers.
#[derive(Default)]
pub struct HangingBackend {
    started: AtomicUsize,
    released: Arc<AtomicUsize>,
}

impl HangingBackend {
    pub fn started(&self) -> usize {
        self.started.load(Ordering::SeqCst)
    }

    pub fn released(&self) -> usize {
        self.released.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ResolutionBackend for HangingBackend {
    async fn submit(
        &self,
        _request: &BackendRequest<'_>,
        _ctx: &QueryContext,
    ) -> Result<BackendResponse, DomainError> {
        self.started.fetch_add(1, Ordering::SeqCst);
        let _resource = ReleaseOnDrop(Arc::clone(&self.released));
        std::future::pending::<()>().await;
        unreachable!("pending never completes")
    }

    fn name(&self) -> &'static str {
        "hanging"
    }
}
