pub mod resolution_log;
pub mod webhook;

pub use resolution_log::InMemoryResolutionLog;
pub use webhook::WebhookReporter;
