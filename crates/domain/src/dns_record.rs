mod dns_class;
mod rdata;
mod record;
mod record_type;

pub use dns_class::DnsClass;
pub use rdata::RData;
pub use record::ResourceRecord;
pub use record_type::RecordType;
