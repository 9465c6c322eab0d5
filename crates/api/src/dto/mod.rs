pub mod health;
pub mod resolution;

pub use health::HealthResponse;
pub use resolution::{MessageResponse, RecordResolutionRequest, ResolutionDto};
