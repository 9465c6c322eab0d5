pub mod dns;
pub mod reporting;

pub use dns::{HandleDnsQueryUseCase, QueryOutcome, RelayPolicy, WatchStatus};
pub use reporting::{GetRecentResolutionsUseCase, RecordResolutionUseCase};
