//! sysresolver Infrastructure Layer
pub mod dns;
