//! Configuration domain module

mod app_config;
mod options;

pub use app_config::AppConfig;
pub use options::{PermissionPolicy, RecorderBackend};
