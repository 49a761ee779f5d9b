//! sysresolver Domain Layer
pub mod config;
pub mod dns_message;
pub mod dns_name;
pub mod dns_query;
pub mod dns_record;
pub mod errors;

pub use config::{CliOverrides, Config, ConfigError};
pub use dns_message::{Header, HeaderFlags, Message, OpCode, ResponseCode, HEADER_LEN};
pub use dns_name::{DnsName, MAX_LABEL_LEN, MAX_NAME_LEN};
pub use dns_query::Question;
pub use dns_record::{DnsClass, RData, RecordType, ResourceRecord};
pub use errors::{DomainError, TruncationOrigin};
