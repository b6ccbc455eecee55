use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use super::definition::{BeanDefinition, BeanInfo, BeanInstance, Capability, downcast, select_candidate};
use super::errors::{ContainerError, Result};
use super::resolver::BeanResolver;

/// 設定単位
///
/// ビーン定義をビルダーに登録する。明示的な設定とコンポーネントスキャンの両方がこれを実装する。
pub trait Configuration {
    fn register_beans(&self, builder: ContextBuilder) -> ContextBuilder;
}

/// アプリケーションコンテキストのビルダー
#[derive(Debug, Default)]
pub struct ContextBuilder {
    definitions: Vec<BeanDefinition>,
}

impl ContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(mut self, definition: BeanDefinition) -> Self {
        self.definitions.push(definition);
        self
    }

    pub fn register_all(mut self, definitions: impl IntoIterator<Item = BeanDefinition>) -> Self {
        self.definitions.extend(definitions);
        self
    }

    pub fn definitions(&self) -> impl Iterator<Item = &BeanInfo> {
        self.definitions.iter().map(BeanDefinition::info)
    }

    /// すべてのシングルトンを登録順に生成してコンテキストを構築する
    ///
    /// # エラー
    /// - DuplicateBeanName: 同名の定義がある
    /// - MissingDependency / NoUniqueBean / CircularDependency: 依存関係を解決できない
    pub fn build(self) -> Result<ApplicationContext> {
        let mut names = HashSet::new();
        for definition in &self.definitions {
            if !names.insert(definition.name()) {
                return Err(ContainerError::DuplicateBeanName {
                    name: definition.name().to_string(),
                });
            }
        }

        tracing::info!(
            bean_count = self.definitions.len(),
            "Refreshing application context"
        );

        let mut resolver = BeanResolver::new(&self.definitions);
        let mut beans = Vec::with_capacity(self.definitions.len());
        for (index, definition) in self.definitions.iter().enumerate() {
            let instance = resolver.instantiate(index).inspect_err(|err| {
                tracing::warn!(
                    bean = definition.name(),
                    error = %err,
                    "Context initialization failed"
                );
            })?;
            beans.push(RegisteredBean {
                info: definition.info().clone(),
                instance,
            });
        }

        Ok(ApplicationContext { beans })
    }
}

struct RegisteredBean {
    info: BeanInfo,
    instance: BeanInstance,
}

/// 構築済みのシングルトンオブジェクトグラフ
///
/// 構築後は不変。ビーンは `Arc` で共有される。
pub struct ApplicationContext {
    beans: Vec<RegisteredBean>,
}

impl ApplicationContext {
    pub fn builder() -> ContextBuilder {
        ContextBuilder::new()
    }

    pub fn from_configuration<C>(configuration: &C) -> Result<Self>
    where
        C: Configuration + ?Sized,
    {
        configuration.register_beans(ContextBuilder::new()).build()
    }

    /// 型でビーンを取得する（primary 優先）
    pub fn get_bean<T>(&self) -> Result<Arc<T>>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        let capability = Capability::of::<T>();
        let index = select_candidate(self.beans.iter().map(|bean| &bean.info), capability)?
            .ok_or(ContainerError::NoSuchBean {
                capability: capability.type_name(),
            })?;

        let bean = &self.beans[index];
        downcast::<T>(&bean.info, &bean.instance)
    }

    /// 名前でビーンを取得する
    pub fn get_bean_by_name<T>(&self, name: &str) -> Result<Arc<T>>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        let bean = self
            .beans
            .iter()
            .find(|bean| bean.info.name == name)
            .ok_or_else(|| ContainerError::NoSuchBeanNamed {
                name: name.to_string(),
            })?;

        downcast::<T>(&bean.info, &bean.instance)
    }

    /// capability に一致するすべてのビーン（ビーン名 → インスタンス）
    pub fn get_beans_of_type<T>(&self) -> HashMap<String, Arc<T>>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        let capability = Capability::of::<T>();
        self.beans
            .iter()
            .filter(|bean| bean.info.capability == capability)
            .filter_map(|bean| {
                downcast::<T>(&bean.info, &bean.instance)
                    .ok()
                    .map(|instance| (bean.info.name.clone(), instance))
            })
            .collect()
    }

    pub fn contains_bean(&self, name: &str) -> bool {
        self.beans.iter().any(|bean| bean.info.name == name)
    }

    /// 登録順のビーン名一覧
    pub fn bean_definition_names(&self) -> Vec<&str> {
        self.beans.iter().map(|bean| bean.info.name.as_str()).collect()
    }

    pub fn bean_info(&self, name: &str) -> Option<&BeanInfo> {
        self.beans
            .iter()
            .find(|bean| bean.info.name == name)
            .map(|bean| &bean.info)
    }

    pub fn bean_count(&self) -> usize {
        self.beans.len()
    }
}

impl std::fmt::Debug for ApplicationContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApplicationContext")
            .field("beans", &self.bean_definition_names())
            .finish()
    }
}
