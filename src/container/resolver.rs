use std::collections::HashMap;
use std::sync::Arc;

use super::definition::{BeanDefinition, BeanInstance, Capability, downcast, select_candidate};
use super::errors::{ContainerError, Result};

/// コンテキスト構築中に依存関係を解決するリゾルバ
///
/// ファクトリ関数はこのリゾルバ経由で兄弟ビーンを取得する。
/// 生成済みのビーンはメモ化され、ファクトリ本体は定義ごとに一度しか実行されない。
/// 何度参照されても同じ `Arc` が返る。
pub struct BeanResolver<'a> {
    definitions: &'a [BeanDefinition],
    singletons: HashMap<usize, BeanInstance>,
    in_creation: Vec<usize>,
}

impl<'a> BeanResolver<'a> {
    pub(crate) fn new(definitions: &'a [BeanDefinition]) -> Self {
        Self {
            definitions,
            singletons: HashMap::new(),
            in_creation: Vec::new(),
        }
    }

    /// 型で依存関係を解決する（必須）
    ///
    /// # エラー
    /// - MissingDependency: 候補が存在しない
    /// - NoUniqueBean: 候補が複数あり primary で決まらない
    pub fn get<T>(&mut self) -> Result<Arc<T>>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        match self.get_if_available::<T>()? {
            Some(bean) => Ok(bean),
            None => Err(self.missing(Capability::of::<T>())),
        }
    }

    /// 型で依存関係を解決する。候補がなければ `None`
    pub fn get_if_available<T>(&mut self) -> Result<Option<Arc<T>>>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        let definitions = self.definitions;
        let selected = select_candidate(
            definitions.iter().map(BeanDefinition::info),
            Capability::of::<T>(),
        )?;

        match selected {
            Some(index) => {
                let bean = self.instantiate(index)?;
                downcast::<T>(definitions[index].info(), &bean).map(Some)
            }
            None => Ok(None),
        }
    }

    /// 名前で依存関係を解決する
    pub fn get_named<T>(&mut self, name: &str) -> Result<Arc<T>>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        let definitions = self.definitions;
        let index = definitions
            .iter()
            .position(|definition| definition.name() == name)
            .ok_or_else(|| ContainerError::NoSuchBeanNamed {
                name: name.to_string(),
            })?;

        let info = definitions[index].info();
        let required = Capability::of::<T>();
        if info.capability != required {
            return Err(ContainerError::BeanNotOfRequiredType {
                name: info.name.clone(),
                required: required.type_name(),
                actual: info.capability.type_name(),
            });
        }

        let bean = self.instantiate(index)?;
        downcast::<T>(info, &bean)
    }

    /// capability に一致するすべてのビーンをビーン名をキーにして返す
    pub fn get_all<T>(&mut self) -> Result<HashMap<String, Arc<T>>>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        let definitions = self.definitions;
        let capability = Capability::of::<T>();
        let mut beans = HashMap::new();

        for (index, definition) in definitions.iter().enumerate() {
            if definition.info().capability != capability {
                continue;
            }
            let bean = self.instantiate(index)?;
            beans.insert(
                definition.name().to_string(),
                downcast::<T>(definition.info(), &bean)?,
            );
        }

        Ok(beans)
    }

    /// セッター注入（必須）
    ///
    /// 候補がなければセッターは呼ばれず、構築が失敗する。
    pub fn inject<T, F>(&mut self, setter: F) -> Result<()>
    where
        T: ?Sized + Send + Sync + 'static,
        F: FnOnce(Arc<T>),
    {
        let dependency = self.get::<T>()?;
        setter(dependency);
        Ok(())
    }

    /// セッター注入（`required = false`）
    ///
    /// 候補がなければセッターの呼び出し自体をスキップする。エラーにはならない。
    pub fn inject_if_available<T, F>(&mut self, setter: F) -> Result<()>
    where
        T: ?Sized + Send + Sync + 'static,
        F: FnOnce(Arc<T>),
    {
        match self.get_if_available::<T>()? {
            Some(dependency) => setter(dependency),
            None => {
                tracing::trace!(
                    capability = std::any::type_name::<T>(),
                    "Skipping optional setter injection"
                );
            }
        }
        Ok(())
    }

    /// セッター注入（nullable / Option引数）
    ///
    /// 候補がなければ `None` を渡してセッターを一度だけ呼ぶ。エラーにはならない。
    pub fn inject_nullable<T, F>(&mut self, setter: F) -> Result<()>
    where
        T: ?Sized + Send + Sync + 'static,
        F: FnOnce(Option<Arc<T>>),
    {
        let dependency = self.get_if_available::<T>()?;
        setter(dependency);
        Ok(())
    }

    /// 定義番号のシングルトンを取得する。未生成ならここで生成する。
    pub(crate) fn instantiate(&mut self, index: usize) -> Result<BeanInstance> {
        if let Some(bean) = self.singletons.get(&index) {
            return Ok(Arc::clone(bean));
        }

        let definitions = self.definitions;
        let definition = &definitions[index];

        if self.in_creation.contains(&index) {
            let mut chain: Vec<String> = self
                .in_creation
                .iter()
                .map(|i| definitions[*i].name().to_string())
                .collect();
            chain.push(definition.name().to_string());
            return Err(ContainerError::CircularDependency { chain });
        }

        tracing::debug!(
            bean = definition.name(),
            "Creating shared instance of singleton bean"
        );

        self.in_creation.push(index);
        let created = definition.create(self);
        self.in_creation.pop();

        let bean = created?;
        self.singletons.insert(index, Arc::clone(&bean));
        Ok(bean)
    }

    fn missing(&self, capability: Capability) -> ContainerError {
        match self.in_creation.last() {
            Some(index) => ContainerError::MissingDependency {
                bean: self.definitions[*index].name().to_string(),
                capability: capability.type_name(),
            },
            None => ContainerError::NoSuchBean {
                capability: capability.type_name(),
            },
        }
    }
}
