use dnswatch_application::use_cases::{GetRecentResolutionsUseCase, RecordResolutionUseCase};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub record_resolution: Arc<RecordResolutionUseCase>,
    pub get_resolutions: Arc<GetRecentResolutionsUseCase>,
}
