pub mod backends;
pub mod dns_server_mock;
pub mod responses;

#[allow(unused_imports)]
pub use backends::{EchoBackend, FailingBackend, HangingBackend, StaticBackend};
#[allow(unused_imports)]
pub use dns_server_mock::{MockBehavior, MockDnsServer};
#[allow(unused_imports)]
pub use responses::{example_com_response, EXAMPLE_COM_ADDR};
