use super::{RecordClass, RecordType};
use std::sync::Arc;

/// One entry of a message's question section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub name: Arc<str>,
    pub record_type: RecordType,
    pub class: RecordClass,
}

impl Question {
    pub fn new(name: impl Into<Arc<str>>, record_type: RecordType) -> Self {
        Self {
            name: name.into(),
            record_type,
            class: RecordClass::IN,
        }
    }
}

/// The question a client asked, together with its transaction id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub id: u16,
    pub name: Arc<str>,
    pub record_type: RecordType,
    pub class: RecordClass,
}

impl Query {
    pub fn new(id: u16, question: &Question) -> Self {
        Self {
            id,
            name: Arc::clone(&question.name),
            record_type: question.record_type,
            class: question.class,
        }
    }
}
