mod dns;
mod reporting;

pub use dns::DnsServices;
pub use reporting::ReportingServices;
