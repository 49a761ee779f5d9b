use super::cursor::Cursor;
use super::name::read_name;
use std::net::{Ipv4Addr, Ipv6Addr};
use sysresolver_domain::{
    DnsClass, DomainError, Header, HeaderFlags, Message, Question, RData, RecordType,
    ResourceRecord,
};
use tracing::trace;

/// Decodes a complete response buffer.
///
/// Running out of octets is [`DomainError::TruncatedMessage`] with origin
/// `Wire`; anything structurally invalid is [`DomainError::MalformedMessage`].
/// Octets after the last declared record are ignored.
pub fn decode(bytes: &[u8]) -> Result<Message, DomainError> {
    let mut cursor = Cursor::new(bytes);
    let header = read_header(&mut cursor)?;

    let questions = (0..header.question_count)
        .map(|_| read_question(&mut cursor))
        .collect::<Result<Vec<_>, _>>()?;
    let answers = read_records(&mut cursor, header.answer_count)?;
    let authorities = read_records(&mut cursor, header.authority_count)?;
    let additionals = read_records(&mut cursor, header.additional_count)?;

    if cursor.remaining() > 0 {
        trace!(
            trailing = cursor.remaining(),
            total = bytes.len(),
            "Ignoring octets after last record"
        );
    }

    Message::from_parts(header, questions, answers, authorities, additionals)
}

fn read_header(cursor: &mut Cursor<'_>) -> Result<Header, DomainError> {
    Ok(Header {
        id: cursor.read_u16("header id")?,
        flags: HeaderFlags::from_u16(cursor.read_u16("header flags")?),
        question_count: cursor.read_u16("QDCOUNT")?,
        answer_count: cursor.read_u16("ANCOUNT")?,
        authority_count: cursor.read_u16("NSCOUNT")?,
        additional_count: cursor.read_u16("ARCOUNT")?,
    })
}

fn read_question(cursor: &mut Cursor<'_>) -> Result<Question, DomainError> {
    let name = read_name(cursor)?;
    let record_type = RecordType::from_u16(cursor.read_u16("question type")?);
    let class = DnsClass::from_u16(cursor.read_u16("question class")?);
    Ok(Question::new(name, record_type, class))
}

fn read_records(cursor: &mut Cursor<'_>, count: u16) -> Result<Vec<ResourceRecord>, DomainError> {
    (0..count).map(|_| read_record(cursor)).collect()
}

fn read_record(cursor: &mut Cursor<'_>) -> Result<ResourceRecord, DomainError> {
    let name = read_name(cursor)?;
    let record_type = RecordType::from_u16(cursor.read_u16("record type")?);
    let class = DnsClass::from_u16(cursor.read_u16("record class")?);
    let ttl = cursor.read_u32("record ttl")?;
    let rdlength = cursor.read_u16("RDLENGTH")? as usize;

    let mut rdata = cursor.window(rdlength, "RDATA")?;
    let data = read_rdata(&mut rdata, record_type)?;
    if rdata.remaining() > 0 {
        return Err(DomainError::MalformedMessage(format!(
            "{} RDATA leaves {} of {} octets unread",
            record_type,
            rdata.remaining(),
            rdlength
        )));
    }

    Ok(ResourceRecord::new(name, record_type, class, ttl, data))
}

fn read_rdata(rdata: &mut Cursor<'_>, record_type: RecordType) -> Result<RData, DomainError> {
    let data = match record_type {
        RecordType::A => {
            let b = rdata.read_bytes(4, "A address")?;
            RData::A(Ipv4Addr::new(b[0], b[1], b[2], b[3]))
        }
        RecordType::AAAA => {
            let mut octets = [0u8; 16];
            octets.copy_from_slice(rdata.read_bytes(16, "AAAA address")?);
            RData::AAAA(Ipv6Addr::from(octets))
        }
        RecordType::CNAME => RData::CNAME(read_name(rdata)?),
        RecordType::NS => RData::NS(read_name(rdata)?),
        RecordType::PTR => RData::PTR(read_name(rdata)?),
        RecordType::MX => RData::MX {
            preference: rdata.read_u16("MX preference")?,
            exchange: read_name(rdata)?,
        },
        RecordType::SOA => RData::SOA {
            mname: read_name(rdata)?,
            rname: read_name(rdata)?,
            serial: rdata.read_u32("SOA serial")?,
            refresh: rdata.read_u32("SOA refresh")?,
            retry: rdata.read_u32("SOA retry")?,
            expire: rdata.read_u32("SOA expire")?,
            minimum: rdata.read_u32("SOA minimum")?,
        },
        RecordType::SRV => RData::SRV {
            priority: rdata.read_u16("SRV priority")?,
            weight: rdata.read_u16("SRV weight")?,
            port: rdata.read_u16("SRV port")?,
            target: read_name(rdata)?,
        },
        RecordType::TXT => {
            let mut strings = Vec::new();
            while rdata.remaining() > 0 {
                let len = rdata.read_u8("TXT length")? as usize;
                strings.push(rdata.read_bytes(len, "TXT string")?.to_vec());
            }
            RData::TXT(strings)
        }
        _ => RData::Opaque(rdata.read_rest().to_vec()),
    };
    Ok(data)
}
