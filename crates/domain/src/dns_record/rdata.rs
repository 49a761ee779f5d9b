use super::RecordType;
use crate::DnsName;
use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};

/// Record data, typed where the codec understands the layout.
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(clippy::upper_case_acronyms)]
pub enum RData {
    A(Ipv4Addr),
    AAAA(Ipv6Addr),
    CNAME(DnsName),
    NS(DnsName),
    PTR(DnsName),
    MX {
        preference: u16,
        exchange: DnsName,
    },
    SOA {
        mname: DnsName,
        rname: DnsName,
        serial: u32,
        refresh: u32,
        retry: u32,
        expire: u32,
        minimum: u32,
    },
    SRV {
        priority: u16,
        weight: u16,
        port: u16,
        target: DnsName,
    },
    /// Character-strings in wire order, each without its length octet.
    TXT(Vec<Vec<u8>>),
    Opaque(Vec<u8>),
}

impl RData {
    /// The record type implied by the variant; `Opaque` has none.
    pub fn record_type(&self) -> Option<RecordType> {
        match self {
            RData::A(_) => Some(RecordType::A),
            RData::AAAA(_) => Some(RecordType::AAAA),
            RData::CNAME(_) => Some(RecordType::CNAME),
            RData::NS(_) => Some(RecordType::NS),
            RData::PTR(_) => Some(RecordType::PTR),
            RData::MX { .. } => Some(RecordType::MX),
            RData::SOA { .. } => Some(RecordType::SOA),
            RData::SRV { .. } => Some(RecordType::SRV),
            RData::TXT(_) => Some(RecordType::TXT),
            RData::Opaque(_) => None,
        }
    }
}

fn write_character_string(f: &mut fmt::Formatter<'_>, text: &[u8]) -> fmt::Result {
    write!(f, "\"")?;
    for &b in text {
        match b {
            b'"' | b'\\' => write!(f, "\\{}", b as char)?,
            0x20..=0x7e => write!(f, "{}", b as char)?,
            _ => write!(f, "\\{:03}", b)?,
        }
    }
    write!(f, "\"")
}

impl fmt::Display for RData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RData::A(addr) => write!(f, "{}", addr),
            RData::AAAA(addr) => write!(f, "{}", addr),
            RData::CNAME(name) | RData::NS(name) | RData::PTR(name) => write!(f, "{}", name),
            RData::MX {
                preference,
                exchange,
            } => write!(f, "{} {}", preference, exchange),
            RData::SOA {
                mname,
                rname,
                serial,
                refresh,
                retry,
                expire,
                minimum,
            } => write!(
                f,
                "{} {} {} {} {} {} {}",
                mname, rname, serial, refresh, retry, expire, minimum
            ),
            RData::SRV {
                priority,
                weight,
                port,
                target,
            } => write!(f, "{} {} {} {}", priority, weight, port, target),
            RData::TXT(strings) => {
                for (i, s) in strings.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write_character_string(f, s)?;
                }
                Ok(())
            }
            // RFC 3597 generic form
            RData::Opaque(data) => {
                write!(f, "\\# {}", data.len())?;
                if !data.is_empty() {
                    write!(f, " ")?;
                    for b in data {
                        write!(f, "{:02x}", b)?;
                    }
                }
                Ok(())
            }
        }
    }
}
