//! RFC 1035 message codec.
//!
//! Queries are built with [`encode`] / [`encode_query`]; complete response
//! buffers are parsed with [`decode`]. Decoding never reads outside the
//! buffer and never panics: every failure is a [`DomainError`].
//!
//! [`DomainError`]: sysresolver_domain::DomainError

mod cursor;
mod decoder;
mod encoder;
mod name;

pub use decoder::decode;
pub use encoder::{encode, encode_query};

/// Compression pointers followed per name before giving up.
pub const MAX_POINTER_HOPS: usize = 127;
