use crate::container::{
    BeanDefinition, ComponentRegistration, ComponentScan, Configuration, ContextBuilder,
    ScanFilter, Stereotype,
};
use crate::settings::AppSettings;
use std::sync::Arc;

use super::app_config::settings_definition;

/// スキャンの起点（クレートのルートモジュール）
pub const BASE_PACKAGE: &str = env!("CARGO_CRATE_NAME");

/// コンポーネントスキャンによる設定
///
/// クレート全体をスキャンし、`Configuration` マーカーを持つ型は除外する。
/// 除外しないと `AppConfig` がコンポーネントとして二重に登録される。
#[derive(Debug, Clone)]
pub struct AutoAppConfig {
    settings: AppSettings,
    scan: ComponentScan,
}

impl AutoAppConfig {
    pub fn new(settings: AppSettings) -> Self {
        Self {
            settings,
            scan: ComponentScan::new(BASE_PACKAGE)
                .exclude(ScanFilter::Annotation(Stereotype::Configuration)),
        }
    }

    pub fn component_scan(&self) -> &ComponentScan {
        &self.scan
    }
}

impl Default for AutoAppConfig {
    fn default() -> Self {
        Self::new(AppSettings::default())
    }
}

impl Configuration for AutoAppConfig {
    fn register_beans(&self, builder: ContextBuilder) -> ContextBuilder {
        let builder = builder.register(settings_definition(&self.settings));
        self.scan.register(builder)
    }
}

inventory::submit! {
    ComponentRegistration::new(
        module_path!(),
        "AutoAppConfig",
        &[Stereotype::Configuration],
        auto_app_config_definition,
    )
}

fn auto_app_config_definition(name: String) -> BeanDefinition {
    BeanDefinition::new(name, |resolver| {
        let settings = resolver.get::<AppSettings>()?;
        Ok(Arc::new(AutoAppConfig::new((*settings).clone())))
    })
}
