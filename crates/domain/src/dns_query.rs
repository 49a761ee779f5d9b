use super::{DnsClass, DnsName, DomainError, RecordType};
use std::fmt;
use std::str::FromStr;

/// What was asked: name, QTYPE and QCLASS.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Question {
    pub name: DnsName,
    pub record_type: RecordType,
    pub class: DnsClass,
}

impl Question {
    pub fn new(name: DnsName, record_type: RecordType, class: DnsClass) -> Self {
        Self {
            name,
            record_type,
            class,
        }
    }

    /// Class IN question parsed from presentation-form text.
    pub fn parse(name: &str, record_type: RecordType) -> Result<Self, DomainError> {
        Ok(Self::new(DnsName::from_str(name)?, record_type, DnsClass::IN))
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t\t{}\t{}", self.name, self.class, self.record_type)
    }
}
