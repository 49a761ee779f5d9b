mod header;

pub use header::{Header, HeaderFlags, OpCode, ResponseCode, HEADER_LEN};

use crate::{DomainError, Question, RData, ResourceRecord};
use std::fmt;
use std::net::IpAddr;

/// A complete DNS message.
///
/// Built either by decoding a whole response buffer or, for a query, by
/// [`Message::query`]. The header counts always equal the section lengths:
/// [`Message::from_parts`] refuses anything else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    header: Header,
    questions: Vec<Question>,
    answers: Vec<ResourceRecord>,
    authorities: Vec<ResourceRecord>,
    additionals: Vec<ResourceRecord>,
}

impl Message {
    /// Recursive standard query with a single question.
    pub fn query(id: u16, question: Question) -> Self {
        let header = Header {
            id,
            flags: HeaderFlags {
                recursion_desired: true,
                ..HeaderFlags::default()
            },
            question_count: 1,
            answer_count: 0,
            authority_count: 0,
            additional_count: 0,
        };
        Self {
            header,
            questions: vec![question],
            answers: Vec::new(),
            authorities: Vec::new(),
            additionals: Vec::new(),
        }
    }

    pub fn from_parts(
        header: Header,
        questions: Vec<Question>,
        answers: Vec<ResourceRecord>,
        authorities: Vec<ResourceRecord>,
        additionals: Vec<ResourceRecord>,
    ) -> Result<Self, DomainError> {
        let sections = [
            ("question", header.question_count, questions.len()),
            ("answer", header.answer_count, answers.len()),
            ("authority", header.authority_count, authorities.len()),
            ("additional", header.additional_count, additionals.len()),
        ];
        for (section, declared, actual) in sections {
            if declared as usize != actual {
                return Err(DomainError::MalformedMessage(format!(
                    "{} section declares {} entries but holds {}",
                    section, declared, actual
                )));
            }
        }

        Ok(Self {
            header,
            questions,
            answers,
            authorities,
            additionals,
        })
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn id(&self) -> u16 {
        self.header.id
    }

    pub fn is_response(&self) -> bool {
        self.header.flags.response
    }

    pub fn is_truncated(&self) -> bool {
        self.header.flags.truncated
    }

    pub fn response_code(&self) -> ResponseCode {
        self.header.flags.response_code
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn question(&self) -> Option<&Question> {
        self.questions.first()
    }

    pub fn answers(&self) -> &[ResourceRecord] {
        &self.answers
    }

    pub fn authorities(&self) -> &[ResourceRecord] {
        &self.authorities
    }

    pub fn additionals(&self) -> &[ResourceRecord] {
        &self.additionals
    }

    /// A and AAAA addresses in the answer section, in order.
    pub fn answer_addresses(&self) -> Vec<IpAddr> {
        self.answers
            .iter()
            .filter_map(|r| match &r.data {
                RData::A(a) => Some(IpAddr::V4(*a)),
                RData::AAAA(a) => Some(IpAddr::V6(*a)),
                _ => None,
            })
            .collect()
    }

    pub fn min_answer_ttl(&self) -> Option<u32> {
        self.answers.iter().map(|r| r.ttl).min()
    }
}

fn write_section(
    f: &mut fmt::Formatter<'_>,
    title: &str,
    records: &[ResourceRecord],
) -> fmt::Result {
    if records.is_empty() {
        return Ok(());
    }
    writeln!(f, "\n;; {} SECTION:", title)?;
    for record in records {
        writeln!(f, "{}", record)?;
    }
    Ok(())
}

/// dig-style report.
impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let h = &self.header;
        writeln!(
            f,
            ";; ->>HEADER<<- opcode: {}, status: {}, id: {}",
            h.flags.opcode, h.flags.response_code, h.id
        )?;
        writeln!(
            f,
            ";; flags: {}; QUERY: {}, ANSWER: {}, AUTHORITY: {}, ADDITIONAL: {}",
            h.flags, h.question_count, h.answer_count, h.authority_count, h.additional_count
        )?;

        if !self.questions.is_empty() {
            writeln!(f, "\n;; QUESTION SECTION:")?;
            for q in &self.questions {
                writeln!(f, ";{}", q)?;
            }
        }
        write_section(f, "ANSWER", &self.answers)?;
        write_section(f, "AUTHORITY", &self.authorities)?;
        write_section(f, "ADDITIONAL", &self.additionals)
    }
}
