//! DNS wire format, backed by `hickory_proto::op::Message`
//!
//! Names are presented without the trailing root dot. Label bytes outside
//! printable ASCII, and the characters `.` and `\` inside a label, are
//! rendered with master-file escapes (`\DDD`, `\.`, `\\`) so they survive a
//! decode/encode cycle. Rdata that is not an address or a single name is
//! kept as its uncompressed wire bytes.

use super::{Answer, AnswerData, MessageFlags, ResolvedMessage};
use crate::{DomainError, Question, RecordClass, RecordType};
use hickory_proto::op::{Message, MessageType, Metadata, OpCode, Query, ResponseCode};
use hickory_proto::rr::rdata::{A, AAAA, CNAME, NS, NULL, PTR};
use hickory_proto::rr::{DNSClass, Name, RData, Record, RecordType as HickoryRecordType};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder, NameEncoding};
use std::sync::Arc;

fn malformed(msg: impl Into<String>) -> DomainError {
    DomainError::MalformedMessage(msg.into())
}

fn unencodable(msg: impl Into<String>) -> DomainError {
    DomainError::UnencodableMessage(msg.into())
}

/// Reads the transaction id without decoding the rest of the message.
pub fn peek_id(buf: &[u8]) -> Option<u16> {
    if buf.len() < 2 {
        return None;
    }
    Some(u16::from_be_bytes([buf[0], buf[1]]))
}

pub fn decode(buf: &[u8]) -> Result<ResolvedMessage, DomainError> {
    let message = Message::from_vec(buf)
        .map_err(|e| malformed(format!("{} byte message: {}", buf.len(), e)))?;

    let questions = message
        .queries
        .iter()
        .map(|query| Question {
            name: presentation_name(&query.name),
            record_type: RecordType::from_u16(query.query_type.into()),
            class: RecordClass::from_u16(query.query_class.into()),
        })
        .collect();

    let mut additionals = answers_of(&message.additionals)?;
    if let Some(edns) = &message.edns {
        additionals.push(answer_of(&Record::from(edns))?);
    }
    if let Some(signature) = &message.signature {
        additionals.push(answer_of(&(**signature).clone().into_record_of_rdata())?);
    }

    Ok(ResolvedMessage {
        id: message.metadata.id,
        flags: flags_of(&message.metadata),
        questions,
        answers: answers_of(&message.answers)?,
        authorities: answers_of(&message.authorities)?,
        additionals,
    })
}

pub fn encode(message: &ResolvedMessage) -> Result<Vec<u8>, DomainError> {
    let mut encoded = Message::new(message.id, MessageType::Query, OpCode::Query);
    encoded.metadata = metadata_of(message.id, message.flags);

    for question in &message.questions {
        let mut query = Query::query(
            wire_name(&question.name)?,
            HickoryRecordType::from(question.record_type.to_u16()),
        );
        query.set_query_class(DNSClass::from(question.class.to_u16()));
        encoded.add_query(query);
    }
    for record in &message.answers {
        encoded.add_answer(record_of(record)?);
    }
    for record in &message.authorities {
        encoded.add_authority(record_of(record)?);
    }
    for record in &message.additionals {
        encoded.add_additional(record_of(record)?);
    }

    encoded
        .to_vec()
        .map_err(|e| unencodable(format!("message {}: {}", message.id, e)))
}

/// Builds a single-question recursive query in wire format.
pub fn build_query(id: u16, name: &str, record_type: RecordType) -> Result<Vec<u8>, DomainError> {
    encode(&ResolvedMessage::query(id, Question::new(name, record_type)))
}

fn flags_of(metadata: &Metadata) -> MessageFlags {
    let mut bits = u16::from(u8::from(metadata.op_code) & 0x0F) << 11;
    for (set, bit) in [
        (
            matches!(metadata.message_type, MessageType::Response),
            MessageFlags::QR,
        ),
        (metadata.authoritative, MessageFlags::AA),
        (metadata.truncation, MessageFlags::TC),
        (metadata.recursion_desired, MessageFlags::RD),
        (metadata.recursion_available, MessageFlags::RA),
        (metadata.authentic_data, MessageFlags::AD),
        (metadata.checking_disabled, MessageFlags::CD),
    ] {
        if set {
            bits |= bit;
        }
    }
    MessageFlags::from_bits(bits | u16::from(metadata.response_code.low()))
}

fn metadata_of(id: u16, flags: MessageFlags) -> Metadata {
    let bits = flags.bits();
    let message_type = if flags.is_response() {
        MessageType::Response
    } else {
        MessageType::Query
    };
    let op_code = OpCode::from_u8(((bits >> 11) & 0x0F) as u8);
    let mut metadata = Metadata::new(id, message_type, op_code);
    metadata.authoritative = bits & MessageFlags::AA != 0;
    metadata.truncation = bits & MessageFlags::TC != 0;
    metadata.recursion_desired = flags.recursion_desired();
    metadata.recursion_available = bits & MessageFlags::RA != 0;
    metadata.authentic_data = bits & MessageFlags::AD != 0;
    metadata.checking_disabled = bits & MessageFlags::CD != 0;
    metadata.response_code = ResponseCode::from_low(flags.rcode());
    metadata
}

fn answers_of(records: &[Record]) -> Result<Vec<Answer>, DomainError> {
    records.iter().map(answer_of).collect()
}

fn answer_of(record: &Record) -> Result<Answer, DomainError> {
    let data = match &record.data {
        RData::A(a) => AnswerData::Ipv4(a.0),
        RData::AAAA(aaaa) => AnswerData::Ipv6(aaaa.0),
        RData::CNAME(CNAME(target)) | RData::NS(NS(target)) | RData::PTR(PTR(target)) => {
            AnswerData::Name(presentation_name(target))
        }
        other => AnswerData::Opaque(rdata_bytes(other)?),
    };

    Ok(Answer {
        name: presentation_name(&record.name),
        record_type: RecordType::from_u16(record.record_type().into()),
        class: RecordClass::from_u16(record.dns_class.into()),
        ttl: record.ttl,
        data,
    })
}

fn record_of(answer: &Answer) -> Result<Record, DomainError> {
    let rdata = match (&answer.record_type, &answer.data) {
        (RecordType::A, AnswerData::Ipv4(ip)) => RData::A(A(*ip)),
        (RecordType::AAAA, AnswerData::Ipv6(ip)) => RData::AAAA(AAAA(*ip)),
        (RecordType::CNAME, AnswerData::Name(target)) => RData::CNAME(CNAME(wire_name(target)?)),
        (RecordType::NS, AnswerData::Name(target)) => RData::NS(NS(wire_name(target)?)),
        (RecordType::PTR, AnswerData::Name(target)) => RData::PTR(PTR(wire_name(target)?)),
        (t, AnswerData::Opaque(bytes)) if !t.is_address() && !t.has_name_rdata() => {
            if bytes.len() > usize::from(u16::MAX) {
                return Err(unencodable(format!(
                    "rdata of {} bytes for {}",
                    bytes.len(),
                    answer.name
                )));
            }
            RData::Unknown {
                code: HickoryRecordType::from(t.to_u16()),
                rdata: NULL::with(bytes.clone()),
            }
        }
        (t, data) => {
            return Err(unencodable(format!(
                "{} record for {} cannot carry {:?}",
                t, answer.name, data
            )))
        }
    };

    let mut record = Record::from_rdata(wire_name(&answer.name)?, answer.ttl, rdata);
    record.dns_class = DNSClass::from(answer.class.to_u16());
    Ok(record)
}

/// Wire bytes of parsed rdata, with any embedded names written out in full.
fn rdata_bytes(rdata: &RData) -> Result<Vec<u8>, DomainError> {
    let mut bytes = Vec::new();
    {
        let mut encoder = BinEncoder::new(&mut bytes);
        encoder.set_name_encoding(NameEncoding::Uncompressed);
        rdata
            .emit(&mut encoder)
            .map_err(|e| malformed(format!("{} rdata: {}", rdata.record_type(), e)))?;
    }
    Ok(bytes)
}

fn presentation_name(name: &Name) -> Arc<str> {
    let mut out = String::new();
    for label in name.iter() {
        push_label(&mut out, label);
    }
    out.into()
}

fn wire_name(name: &str) -> Result<Name, DomainError> {
    let labels = parse_labels(name)?;
    Name::from_labels(labels).map_err(|e| unencodable(format!("name '{}': {}", name, e)))
}

/// Splits a presentation-format name into raw labels, resolving escapes.
fn parse_labels(name: &str) -> Result<Vec<Vec<u8>>, DomainError> {
    let mut labels = Vec::new();
    if name.is_empty() || name == "." {
        return Ok(labels);
    }

    let mut current = Vec::new();
    let mut chars = name.chars();
    let mut trailing_dot = false;
    while let Some(c) = chars.next() {
        trailing_dot = false;
        match c {
            '.' => {
                if current.is_empty() {
                    return Err(unencodable(format!("empty label in '{}'", name)));
                }
                labels.push(std::mem::take(&mut current));
                trailing_dot = true;
            }
            '\\' => {
                let next = chars
                    .next()
                    .ok_or_else(|| unencodable(format!("dangling escape in '{}'", name)))?;
                if next.is_ascii_digit() {
                    let mut digits = String::from(next);
                    for _ in 0..2 {
                        match chars.next() {
                            Some(d) if d.is_ascii_digit() => digits.push(d),
                            _ => {
                                return Err(unencodable(format!(
                                    "bad decimal escape in '{}'",
                                    name
                                )))
                            }
                        }
                    }
                    let value = digits
                        .parse::<u8>()
                        .map_err(|_| unencodable(format!("escape out of range in '{}'", name)))?;
                    current.push(value);
                } else if next.is_ascii() {
                    current.push(next as u8);
                } else {
                    return Err(unencodable(format!("non-ASCII escape in '{}'", name)));
                }
            }
            c if c.is_ascii() => current.push(c as u8),
            _ => return Err(unencodable(format!("non-ASCII character in '{}'", name))),
        }
    }

    if !current.is_empty() {
        labels.push(current);
    } else if !trailing_dot {
        return Err(unencodable(format!("empty label in '{}'", name)));
    }
    Ok(labels)
}

fn push_label(name: &mut String, label: &[u8]) {
    if !name.is_empty() {
        name.push('.');
    }
    for &b in label {
        match b {
            b'.' | b'\\' => {
                name.push('\\');
                name.push(b as char);
            }
            0x21..=0x7E => name.push(b as char),
            _ => name.push_str(&format!("\\{:03}", b)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_labels_handles_trailing_dot() {
        let labels = parse_labels("example.com.").unwrap();
        assert_eq!(labels, vec![b"example".to_vec(), b"com".to_vec()]);
    }

    #[test]
    fn test_parse_labels_root() {
        assert!(parse_labels("").unwrap().is_empty());
        assert!(parse_labels(".").unwrap().is_empty());
    }

    #[test]
    fn test_parse_labels_rejects_empty_inner_label() {
        assert!(parse_labels("a..b").is_err());
        assert!(parse_labels(".a").is_err());
    }

    #[test]
    fn test_escaped_label_survives_push_and_parse() {
        let raw = [b'a', b'.', 0x07, b'\\'];
        let mut name = String::new();
        push_label(&mut name, &raw);
        assert_eq!(name, "a\\.\\007\\\\");
        assert_eq!(parse_labels(&name).unwrap(), vec![raw.to_vec()]);
    }

    #[test]
    fn test_root_name_presents_as_empty() {
        assert_eq!(presentation_name(&Name::root()).as_ref(), "");
        assert!(wire_name("").unwrap().is_root());
    }

    #[test]
    fn test_flags_survive_metadata_mapping() {
        let flags = MessageFlags::from_bits(0x85B3);
        assert_eq!(flags_of(&metadata_of(7, flags)), flags);
    }

    #[test]
    fn test_peek_id() {
        assert_eq!(peek_id(&[0xab, 0xcd, 0x01]), Some(0xabcd));
        assert_eq!(peek_id(&[0xab]), None);
    }
}
