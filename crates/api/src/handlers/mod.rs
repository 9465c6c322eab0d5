pub mod health;
pub mod resolutions;

pub use health::health_check;
pub use resolutions::{get_resolutions, record_resolution};
