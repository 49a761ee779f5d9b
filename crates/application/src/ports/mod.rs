mod dns_resolver;
mod query_context;
mod resolution_backend;

pub use dns_resolver::DnsResolver;
pub use query_context::QueryContext;
pub use resolution_backend::{BackendRequest, BackendResponse, ResolutionBackend};

pub use sysresolver_domain::{Message, Question};
