use dnswatch_domain::{
    wire, Answer, AnswerData, MessageFlags, RecordClass, RecordType, ResolvedMessage,
};
use std::net::Ipv4Addr;

pub fn query_bytes(id: u16, name: &str) -> Vec<u8> {
    wire::build_query(id, name, RecordType::A).unwrap()
}

/// Answers a query with `CNAME target` plus one A record for the target.
///
/// The reply echoes the query's id and question section.
pub fn cname_reply(query: &[u8], target: &str, ip: Ipv4Addr) -> Option<Vec<u8>> {
    let mut message = wire::decode(query).ok()?;
    let owner = message.questions.first()?.name.clone();
    message.flags = MessageFlags::from_bits(0x8180);
    message.answers = vec![
        Answer {
            name: owner,
            record_type: RecordType::CNAME,
            class: RecordClass::IN,
            ttl: 300,
            data: AnswerData::Name(target.into()),
        },
        Answer {
            name: target.into(),
            record_type: RecordType::A,
            class: RecordClass::IN,
            ttl: 60,
            data: AnswerData::Ipv4(ip),
        },
    ];
    wire::encode(&message).ok()
}

/// Answers a query with a single A record for the queried name.
pub fn address_reply(query: &[u8], ip: Ipv4Addr) -> Option<Vec<u8>> {
    let mut message: ResolvedMessage = wire::decode(query).ok()?;
    let owner = message.questions.first()?.name.clone();
    message.flags = MessageFlags::from_bits(0x8180);
    message.answers = vec![Answer {
        name: owner,
        record_type: RecordType::A,
        class: RecordClass::IN,
        ttl: 60,
        data: AnswerData::Ipv4(ip),
    }];
    wire::encode(&message).ok()
}

/// Answers with an A record plus one TXT record padded so the encoded reply
/// is longer than `min_len` bytes.
pub fn oversized_reply(query: &[u8], ip: Ipv4Addr, min_len: usize) -> Option<Vec<u8>> {
    let mut message = wire::decode(&address_reply(query, ip)?).ok()?;
    let owner = message.questions.first()?.name.clone();
    let mut rdata = Vec::new();
    while rdata.len() <= min_len {
        rdata.push(255);
        rdata.extend(std::iter::repeat(b'x').take(255));
    }
    message.answers.push(Answer {
        name: owner,
        record_type: RecordType::TXT,
        class: RecordClass::IN,
        ttl: 60,
        data: AnswerData::Opaque(rdata),
    });
    wire::encode(&message).ok()
}
