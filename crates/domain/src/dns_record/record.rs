use super::{DnsClass, RData, RecordType};
use crate::DnsName;
use std::fmt;

/// One answer, authority or additional entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRecord {
    pub name: DnsName,

    pub record_type: RecordType,

    pub class: DnsClass,

    pub ttl: u32,

    pub data: RData,
}

impl ResourceRecord {
    pub fn new(
        name: DnsName,
        record_type: RecordType,
        class: DnsClass,
        ttl: u32,
        data: RData,
    ) -> Self {
        Self {
            name,
            record_type,
            class,
            ttl,
            data,
        }
    }
}

impl fmt::Display for ResourceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}",
            self.name, self.ttl, self.class, self.record_type, self.data
        )
    }
}
