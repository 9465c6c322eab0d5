use dnswatch_domain::{
    Answer, AnswerData, MessageFlags, Question, RecordClass, RecordType, ResolvedMessage,
};
use std::net::IpAddr;
use std::sync::Arc;

/// Builds structured DNS responses for codec tests.
pub struct MessageBuilder {
    message: ResolvedMessage,
}

impl MessageBuilder {
    pub fn response(id: u16, name: &str, record_type: RecordType) -> Self {
        let mut message = ResolvedMessage::query(id, Question::new(name, record_type));
        message.flags = MessageFlags::from_bits(0x8180);
        Self { message }
    }

    pub fn rcode(mut self, rcode: u8) -> Self {
        let bits = (self.message.flags.bits() & !0x000F) | rcode as u16;
        self.message.flags = MessageFlags::from_bits(bits);
        self
    }

    pub fn address(mut self, name: &str, ip: &str, ttl: u32) -> Self {
        let ip: IpAddr = ip.parse().unwrap();
        let (record_type, data) = match ip {
            IpAddr::V4(v4) => (RecordType::A, AnswerData::Ipv4(v4)),
            IpAddr::V6(v6) => (RecordType::AAAA, AnswerData::Ipv6(v6)),
        };
        self.message.answers.push(record(name, record_type, ttl, data));
        self
    }

    pub fn cname(mut self, name: &str, target: &str, ttl: u32) -> Self {
        self.message.answers.push(record(
            name,
            RecordType::CNAME,
            ttl,
            AnswerData::Name(Arc::from(target)),
        ));
        self
    }

    pub fn txt(mut self, name: &str, text: &str) -> Self {
        let mut rdata = vec![text.len() as u8];
        rdata.extend_from_slice(text.as_bytes());
        self.message
            .answers
            .push(record(name, RecordType::TXT, 300, AnswerData::Opaque(rdata)));
        self
    }

    pub fn authority(mut self, answer: Answer) -> Self {
        self.message.authorities.push(answer);
        self
    }

    pub fn additional(mut self, answer: Answer) -> Self {
        self.message.additionals.push(answer);
        self
    }

    pub fn build(self) -> ResolvedMessage {
        self.message
    }
}

pub fn record(name: &str, record_type: RecordType, ttl: u32, data: AnswerData) -> Answer {
    Answer {
        name: Arc::from(name),
        record_type,
        class: RecordClass::IN,
        ttl,
        data,
    }
}

/// `www.example.com A` answered by a compressed CNAME chain:
/// `www.example.com CNAME cdn.example.com`, `cdn.example.com A 93.184.216.34`.
pub fn compressed_cname_response() -> Vec<u8> {
    let mut buf = vec![
        0x12, 0x34, 0x81, 0x80, 0x00, 0x01, 0x00, 0x02, 0x00, 0x00, 0x00, 0x00,
    ];
    buf.extend_from_slice(b"\x03www\x07example\x03com\x00");
    buf.extend_from_slice(&[0x00, 0x01, 0x00, 0x01]);

    // answer 1 at offset 33, rdata "cdn" + pointer to "example.com" (offset 16)
    buf.extend_from_slice(&[0xC0, 0x0C, 0x00, 0x05, 0x00, 0x01]);
    buf.extend_from_slice(&300u32.to_be_bytes());
    buf.extend_from_slice(&[0x00, 0x06]);
    buf.extend_from_slice(b"\x03cdn");
    buf.extend_from_slice(&[0xC0, 0x10]);

    // answer 2, owner is a pointer to the CNAME target at offset 45
    buf.extend_from_slice(&[0xC0, 0x2D, 0x00, 0x01, 0x00, 0x01]);
    buf.extend_from_slice(&60u32.to_be_bytes());
    buf.extend_from_slice(&[0x00, 0x04, 93, 184, 216, 34]);
    buf
}
