use dnswatch_domain::{
    wire, Answer, AnswerData, MessageFlags, Question, RecordClass, RecordType, ResolvedMessage,
};
use std::net::IpAddr;

pub fn query_bytes(id: u16, name: &str) -> Vec<u8> {
    wire::build_query(id, name, RecordType::A).unwrap()
}

/// Wire-format response to `name A`: an optional CNAME hop followed by A
/// records owned by the CNAME target (or by `name` without one).
pub fn response_bytes(id: u16, name: &str, cname: Option<(&str, u32)>, ips: &[&str]) -> Vec<u8> {
    let mut message = ResolvedMessage::query(id, Question::new(name, RecordType::A));
    message.flags = MessageFlags::from_bits(0x8180);

    let mut owner = name.to_string();
    if let Some((target, ttl)) = cname {
        message.answers.push(Answer {
            name: name.into(),
            record_type: RecordType::CNAME,
            class: RecordClass::IN,
            ttl,
            data: AnswerData::Name(target.into()),
        });
        owner = target.to_string();
    }
    for ip in ips {
        let IpAddr::V4(v4) = ip.parse::<IpAddr>().unwrap() else {
            panic!("IPv4 only");
        };
        message.answers.push(Answer {
            name: owner.as_str().into(),
            record_type: RecordType::A,
            class: RecordClass::IN,
            ttl: 60,
            data: AnswerData::Ipv4(v4),
        });
    }
    wire::encode(&message).unwrap()
}
