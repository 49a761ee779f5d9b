use crate::DomainError;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

pub const MAX_LABEL_LEN: usize = 63;
pub const MAX_NAME_LEN: usize = 255;

/// A domain name as a sequence of labels, root excluded.
///
/// Case is preserved as received, but equality and hashing ignore ASCII case
/// (RFC 4343). Length limits are not enforced on construction; callers that
/// put a name on the wire check them with [`DnsName::check_limits`].
#[derive(Debug, Clone, Default)]
pub struct DnsName {
    labels: Vec<Vec<u8>>,
}

impl DnsName {
    pub fn root() -> Self {
        Self { labels: Vec::new() }
    }

    pub fn from_labels<I, L>(labels: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = L>,
        L: Into<Vec<u8>>,
    {
        let labels: Vec<Vec<u8>> = labels.into_iter().map(Into::into).collect();
        if labels.iter().any(|l| l.is_empty()) {
            return Err(DomainError::InvalidDomainName(
                "empty label in name".to_string(),
            ));
        }
        Ok(Self { labels })
    }

    pub fn labels(&self) -> &[Vec<u8>] {
        &self.labels
    }

    pub fn label_count(&self) -> usize {
        self.labels.len()
    }

    pub fn is_root(&self) -> bool {
        self.labels.is_empty()
    }

    /// Octets this name occupies uncompressed, length prefixes and root included.
    pub fn encoded_len(&self) -> usize {
        self.labels.iter().map(|l| l.len() + 1).sum::<usize>() + 1
    }

    pub fn check_limits(&self) -> Result<(), String> {
        if let Some(label) = self.labels.iter().find(|l| l.len() > MAX_LABEL_LEN) {
            return Err(format!(
                "label of {} octets exceeds {} octets",
                label.len(),
                MAX_LABEL_LEN
            ));
        }
        let len = self.encoded_len();
        if len > MAX_NAME_LEN {
            return Err(format!(
                "name of {} encoded octets exceeds {} octets",
                len, MAX_NAME_LEN
            ));
        }
        Ok(())
    }

}

impl PartialEq for DnsName {
    fn eq(&self, other: &Self) -> bool {
        self.labels.len() == other.labels.len()
            && self
                .labels
                .iter()
                .zip(&other.labels)
                .all(|(a, b)| a.eq_ignore_ascii_case(b))
    }
}

impl Eq for DnsName {}

impl Hash for DnsName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for label in &self.labels {
            state.write_u8(label.len() as u8);
            for b in label {
                state.write_u8(b.to_ascii_lowercase());
            }
        }
        state.write_u8(0);
    }
}

impl fmt::Display for DnsName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.labels.is_empty() {
            return write!(f, ".");
        }
        for label in &self.labels {
            for &b in label {
                match b {
                    b'.' | b'\\' | b'"' | b'(' | b')' | b';' | b'@' | b'$' => {
                        write!(f, "\\{}", b as char)?
                    }
                    0x21..=0x7e => write!(f, "{}", b as char)?,
                    _ => write!(f, "\\{:03}", b)?,
                }
            }
            write!(f, ".")?;
        }
        Ok(())
    }
}

impl FromStr for DnsName {
    type Err = DomainError;

    /// Parses presentation form. A trailing dot is optional; `\.`, `\\` and
    /// `\DDD` escapes are honoured.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(DomainError::InvalidDomainName("empty name".to_string()));
        }
        if s == "." {
            return Ok(Self::root());
        }

        let invalid = |reason: &str| DomainError::InvalidDomainName(format!("{}: {}", reason, s));

        let mut labels = Vec::new();
        let mut current = Vec::new();
        let mut bytes = s.bytes();
        let mut ended_with_dot = false;

        while let Some(b) = bytes.next() {
            ended_with_dot = false;
            match b {
                b'.' => {
                    if current.is_empty() {
                        return Err(invalid("empty label"));
                    }
                    labels.push(std::mem::take(&mut current));
                    ended_with_dot = true;
                }
                b'\\' => {
                    let first = bytes.next().ok_or_else(|| invalid("dangling escape"))?;
                    if first.is_ascii_digit() {
                        let d2 = bytes.next().filter(u8::is_ascii_digit);
                        let d3 = bytes.next().filter(u8::is_ascii_digit);
                        let (d2, d3) = d2.zip(d3).ok_or_else(|| invalid("bad \\DDD escape"))?;
                        let value = (first - b'0') as u16 * 100
                            + (d2 - b'0') as u16 * 10
                            + (d3 - b'0') as u16;
                        let value = u8::try_from(value).map_err(|_| invalid("bad \\DDD escape"))?;
                        current.push(value);
                    } else {
                        current.push(first);
                    }
                }
                other => current.push(other),
            }
        }

        if !ended_with_dot {
            if current.is_empty() {
                return Err(invalid("empty label"));
            }
            labels.push(current);
        }

        Ok(Self { labels })
    }
}
