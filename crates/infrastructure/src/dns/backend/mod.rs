pub mod callback;
pub mod system;
pub mod udp;

pub use callback::{
    CallbackBackend, CallbackService, CompletionSink, CorrelationToken, NativeHandle,
};
pub use system::{parse_resolv_conf, system_nameservers};
pub use udp::UdpBackend;
