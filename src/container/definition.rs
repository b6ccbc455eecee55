use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

use super::errors::{ContainerError, Result};
use super::resolver::BeanResolver;

/// 型消去されたシングルトンインスタンス
///
/// 中身は常に `Arc<T>`（`T` は登録時の capability 型）。
pub(crate) type BeanInstance = Arc<dyn Any + Send + Sync>;

type BeanFactory = Box<dyn Fn(&mut BeanResolver<'_>) -> Result<BeanInstance> + Send + Sync>;

/// ビーンを登録・検索するときの型（多くの場合 `dyn Trait`）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Capability {
    type_id: TypeId,
    type_name: &'static str,
}

impl Capability {
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name)
    }
}

/// ビーンの役割
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BeanRole {
    /// アプリケーションが定義したビーン
    Application,
    /// 設定値などコンテナの内部で使うビーン
    Infrastructure,
}

/// ビーン定義のメタデータ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BeanInfo {
    pub name: String,
    pub capability: Capability,
    pub primary: bool,
    pub role: BeanRole,
}

/// ビーン定義
///
/// 名前・capability・primaryフラグと、インスタンスを生成するファクトリ関数の組。
/// ファクトリはコンテキスト構築中に一度だけ呼ばれる。
pub struct BeanDefinition {
    info: BeanInfo,
    factory: BeanFactory,
}

impl BeanDefinition {
    pub fn new<T, F>(name: impl Into<String>, factory: F) -> Self
    where
        T: ?Sized + Send + Sync + 'static,
        F: Fn(&mut BeanResolver<'_>) -> Result<Arc<T>> + Send + Sync + 'static,
    {
        Self {
            info: BeanInfo {
                name: name.into(),
                capability: Capability::of::<T>(),
                primary: false,
                role: BeanRole::Application,
            },
            factory: Box::new(move |resolver: &mut BeanResolver<'_>| {
                let bean = factory(resolver)?;
                Ok(Arc::new(bean) as BeanInstance)
            }),
        }
    }

    /// 同じ capability の候補が複数あるときに優先させる
    pub fn primary(mut self) -> Self {
        self.info.primary = true;
        self
    }

    pub fn with_role(mut self, role: BeanRole) -> Self {
        self.info.role = role;
        self
    }

    pub fn info(&self) -> &BeanInfo {
        &self.info
    }

    pub fn name(&self) -> &str {
        &self.info.name
    }

    pub(crate) fn create(&self, resolver: &mut BeanResolver<'_>) -> Result<BeanInstance> {
        (self.factory)(resolver)
    }
}

impl fmt::Debug for BeanDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BeanDefinition")
            .field("info", &self.info)
            .finish_non_exhaustive()
    }
}

/// capability に一致する候補から注入対象を一つ選ぶ
///
/// - 候補なし: `Ok(None)`
/// - 候補が一つ: その候補
/// - 候補が複数: primary がちょうど一つならそれ、そうでなければ `NoUniqueBean`
///
/// 登録順には依存しない。
pub(crate) fn select_candidate<'i>(
    infos: impl IntoIterator<Item = &'i BeanInfo>,
    capability: Capability,
) -> Result<Option<usize>> {
    let candidates: Vec<(usize, &BeanInfo)> = infos
        .into_iter()
        .enumerate()
        .filter(|(_, info)| info.capability == capability)
        .collect();

    match candidates.as_slice() {
        [] => Ok(None),
        [(index, _)] => Ok(Some(*index)),
        _ => {
            let primaries: Vec<&(usize, &BeanInfo)> =
                candidates.iter().filter(|(_, info)| info.primary).collect();
            match primaries.as_slice() {
                [(index, _)] => Ok(Some(*index)),
                [] => Err(no_unique_bean(capability, candidates.iter().map(|(_, i)| *i))),
                _ => Err(no_unique_bean(capability, primaries.iter().map(|(_, i)| *i))),
            }
        }
    }
}

fn no_unique_bean<'i>(
    capability: Capability,
    infos: impl Iterator<Item = &'i BeanInfo>,
) -> ContainerError {
    ContainerError::NoUniqueBean {
        capability: capability.type_name(),
        candidates: infos.map(|info| info.name.clone()).collect(),
    }
}

/// 型消去されたインスタンスを `Arc<T>` に戻す
pub(crate) fn downcast<T>(info: &BeanInfo, bean: &BeanInstance) -> Result<Arc<T>>
where
    T: ?Sized + Send + Sync + 'static,
{
    bean.downcast_ref::<Arc<T>>()
        .cloned()
        .ok_or_else(|| ContainerError::BeanNotOfRequiredType {
            name: info.name.clone(),
            required: std::any::type_name::<T>(),
            actual: info.capability.type_name(),
        })
}
