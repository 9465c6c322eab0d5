mod get_recent_resolutions;
mod record_resolution;

pub use get_recent_resolutions::GetRecentResolutionsUseCase;
pub use record_resolution::RecordResolutionUseCase;
