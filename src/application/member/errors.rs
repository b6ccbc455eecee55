use thiserror::Error;

/// 会員アプリケーション層のエラー
#[derive(Debug, Error)]
pub enum MemberApplicationError {
    /// MemberRepositoryのエラー
    #[error("Member repository error")]
    RepositoryError(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// 会員アプリケーション層の Result型
pub type Result<T> = std::result::Result<T, MemberApplicationError>;
