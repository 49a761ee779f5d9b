pub mod backend;
pub mod resolver;
pub mod wire;

pub use backend::{CallbackBackend, UdpBackend};
pub use resolver::ResolutionClient;
