use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[allow(clippy::upper_case_acronyms)]
pub enum DnsClass {
    #[default]
    IN,
    CH,
    HS,
    NONE,
    ANY,
    Unknown(u16),
}

impl DnsClass {
    pub fn to_u16(&self) -> u16 {
        match self {
            DnsClass::IN => 1,
            DnsClass::CH => 3,
            DnsClass::HS => 4,
            DnsClass::NONE => 254,
            DnsClass::ANY => 255,
            DnsClass::Unknown(code) => *code,
        }
    }

    pub fn from_u16(code: u16) -> Self {
        match code {
            1 => DnsClass::IN,
            3 => DnsClass::CH,
            4 => DnsClass::HS,
            254 => DnsClass::NONE,
            255 => DnsClass::ANY,
            other => DnsClass::Unknown(other),
        }
    }
}

impl fmt::Display for DnsClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DnsClass::IN => write!(f, "IN"),
            DnsClass::CH => write!(f, "CH"),
            DnsClass::HS => write!(f, "HS"),
            DnsClass::NONE => write!(f, "NONE"),
            DnsClass::ANY => write!(f, "ANY"),
            DnsClass::Unknown(code) => write!(f, "CLASS{}", code),
        }
    }
}

impl FromStr for DnsClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_uppercase();
        match upper.as_str() {
            "IN" => Ok(DnsClass::IN),
            "CH" => Ok(DnsClass::CH),
            "HS" => Ok(DnsClass::HS),
            "NONE" => Ok(DnsClass::NONE),
            "ANY" => Ok(DnsClass::ANY),
            _ => upper
                .strip_prefix("CLASS")
                .and_then(|code| code.parse::<u16>().ok())
                .map(DnsClass::from_u16)
                .ok_or_else(|| format!("Unknown DNS class: {}", s)),
        }
    }
}
