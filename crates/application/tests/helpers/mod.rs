mod mock_resolver;

pub use mock_resolver::{answer_message, MockDnsResolver};
