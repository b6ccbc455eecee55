use thiserror::Error;

/// コンテナのエラー
///
/// すべてコンテキスト構築時（またはビーン取得時）に発生し、呼び出し元へそのまま返される。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContainerError {
    /// 型に一致するビーンが存在しない（構築後の取得時）
    #[error("No qualifying bean of type '{capability}' available")]
    NoSuchBean { capability: &'static str },

    /// 名前に一致するビーンが存在しない
    #[error("No bean named '{name}' available")]
    NoSuchBeanNamed { name: String },

    /// 生成中のビーンが必須の依存関係を解決できなかった
    #[error("Error creating bean '{bean}': unsatisfied dependency of type '{capability}'")]
    MissingDependency {
        bean: String,
        capability: &'static str,
    },

    /// 候補が複数あり、primaryで一意に決まらない
    #[error(
        "No qualifying bean of type '{capability}' available: expected single matching bean but found {}: {}",
        .candidates.len(),
        .candidates.join(",")
    )]
    NoUniqueBean {
        capability: &'static str,
        candidates: Vec<String>,
    },

    /// 名前で取得したビーンの型が要求と異なる
    #[error("Bean named '{name}' is expected to be of type '{required}' but was '{actual}'")]
    BeanNotOfRequiredType {
        name: String,
        required: &'static str,
        actual: &'static str,
    },

    /// 同じ名前のビーン定義が二つ登録された
    #[error("Bean definition '{name}' conflicts with an existing definition of the same name")]
    DuplicateBeanName { name: String },

    /// 依存関係が循環している
    #[error("Requested bean is currently in creation: {}", .chain.join(" -> "))]
    CircularDependency { chain: Vec<String> },
}

/// コンテナ操作の Result型
pub type Result<T> = std::result::Result<T, ContainerError>;
