//! 最小限のDIコンテナ
//!
//! ビーン定義を登録し、構築時にすべてのシングルトンを一度だけ生成する。
//! 依存関係は [`BeanResolver`] 経由で解決され、primary による候補選択と
//! 任意注入（スキップ / `None` 注入）をサポートする。
mod context;
mod definition;
mod errors;
mod resolver;
mod scan;

pub use context::{ApplicationContext, Configuration, ContextBuilder};
pub use definition::{BeanDefinition, BeanInfo, BeanRole, Capability};
pub use errors::{ContainerError, Result};
pub use resolver::BeanResolver;
pub use scan::{ComponentRegistration, ComponentScan, ScanFilter, Stereotype, default_bean_name};
