use dnswatch_api::AppState;
use dnswatch_application::use_cases::{GetRecentResolutionsUseCase, RecordResolutionUseCase};
use dnswatch_domain::Config;
use dnswatch_infrastructure::reporting::InMemoryResolutionLog;
use std::sync::Arc;

pub struct ReportingServices {
    pub record_resolution: Arc<RecordResolutionUseCase>,
    pub get_resolutions: Arc<GetRecentResolutionsUseCase>,
}

impl ReportingServices {
    pub fn new(config: &Config) -> Self {
        let log = Arc::new(InMemoryResolutionLog::new(config.reporting.sidecar.capacity));
        Self {
            record_resolution: Arc::new(RecordResolutionUseCase::new(log.clone())),
            get_resolutions: Arc::new(GetRecentResolutionsUseCase::new(log)),
        }
    }

    pub fn app_state(&self) -> AppState {
        AppState {
            record_resolution: self.record_resolution.clone(),
            get_resolutions: self.get_resolutions.clone(),
        }
    }
}
