pub mod wire;

use super::{Query, Question, RecordClass, RecordType};
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::sync::Arc;

/// The 16-bit flags word of a DNS header, kept verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MessageFlags(u16);

impl MessageFlags {
    const QR: u16 = 0x8000;
    const AA: u16 = 0x0400;
    const TC: u16 = 0x0200;
    const RD: u16 = 0x0100;
    const RA: u16 = 0x0080;
    const AD: u16 = 0x0020;
    const CD: u16 = 0x0010;

    pub const fn from_bits(bits: u16) -> Self {
        Self(bits)
    }

    /// Flags of a standard recursive query (QUERY opcode, RD set).
    pub const fn recursive_query() -> Self {
        Self(Self::RD)
    }

    pub const fn bits(&self) -> u16 {
        self.0
    }

    pub fn is_response(&self) -> bool {
        self.0 & Self::QR != 0
    }

    pub fn recursion_desired(&self) -> bool {
        self.0 & Self::RD != 0
    }

    pub fn rcode(&self) -> u8 {
        (self.0 & 0x000F) as u8
    }

    pub fn rcode_str(&self) -> &'static str {
        match self.rcode() {
            0 => "NOERROR",
            1 => "FORMERR",
            2 => "SERVFAIL",
            3 => "NXDOMAIN",
            4 => "NOTIMP",
            5 => "REFUSED",
            _ => "UNKNOWN",
        }
    }
}

/// Typed rdata of a resource record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerData {
    Ipv4(Ipv4Addr),
    Ipv6(Ipv6Addr),
    /// Target of a CNAME, NS or PTR record.
    Name(Arc<str>),
    Opaque(Vec<u8>),
}

impl fmt::Display for AnswerData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnswerData::Ipv4(ip) => write!(f, "{}", ip),
            AnswerData::Ipv6(ip) => write!(f, "{}", ip),
            AnswerData::Name(name) => write!(f, "{}", name),
            AnswerData::Opaque(bytes) => write!(f, "<{} bytes>", bytes.len()),
        }
    }
}

/// A resource record from any of the answer, authority or additional sections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub name: Arc<str>,
    pub record_type: RecordType,
    pub class: RecordClass,
    pub ttl: u32,
    pub data: AnswerData,
}

impl Answer {
    pub fn address(&self) -> Option<IpAddr> {
        match self.data {
            AnswerData::Ipv4(ip) => Some(IpAddr::V4(ip)),
            AnswerData::Ipv6(ip) => Some(IpAddr::V6(ip)),
            _ => None,
        }
    }

    pub fn cname_target(&self) -> Option<&str> {
        match (&self.record_type, &self.data) {
            (RecordType::CNAME, AnswerData::Name(target)) => Some(target),
            _ => None,
        }
    }
}

/// Structured form of a whole DNS message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedMessage {
    pub id: u16,
    pub flags: MessageFlags,
    pub questions: Vec<Question>,
    pub answers: Vec<Answer>,
    pub authorities: Vec<Answer>,
    pub additionals: Vec<Answer>,
}

impl ResolvedMessage {
    pub fn query(id: u16, question: Question) -> Self {
        Self {
            id,
            flags: MessageFlags::recursive_query(),
            questions: vec![question],
            answers: vec![],
            authorities: vec![],
            additionals: vec![],
        }
    }

    /// The first question paired with the transaction id.
    pub fn first_query(&self) -> Option<Query> {
        self.questions.first().map(|q| Query::new(self.id, q))
    }

    pub fn addresses(&self) -> Vec<IpAddr> {
        self.answers.iter().filter_map(Answer::address).collect()
    }

    pub fn cname_answers(&self) -> impl Iterator<Item = &Answer> {
        self.answers.iter().filter(|a| a.cname_target().is_some())
    }
}
