mod app_config;
mod auto_app_config;

pub use app_config::{
    APP_SETTINGS, AppConfig, DISCOUNT_POLICY, DISCOUNT_SERVICE, MEMBER_REPOSITORY, MEMBER_SERVICE,
    ORDER_SERVICE,
};
pub use auto_app_config::{AutoAppConfig, BASE_PACKAGE};

use crate::container::{ApplicationContext, Result};
use crate::settings::{AppSettings, ConfigurationStyle};

/// 設定で選ばれた方式でコンテキストを構築する
pub fn build_context(settings: &AppSettings) -> Result<ApplicationContext> {
    tracing::info!(style = ?settings.configuration, "Building application context");
    match settings.configuration {
        ConfigurationStyle::Explicit => {
            ApplicationContext::from_configuration(&AppConfig::new(settings.clone()))
        }
        ConfigurationStyle::Scan => {
            ApplicationContext::from_configuration(&AutoAppConfig::new(settings.clone()))
        }
    }
}
