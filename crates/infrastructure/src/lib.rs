//! dnswatch infrastructure: UDP transport, listener, correlation store, reporting
pub mod dns;
pub mod reporting;
