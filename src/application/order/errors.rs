use thiserror::Error;

use crate::domain::value_objects::MemberId;

/// 注文アプリケーション層のエラー
#[derive(Debug, Error)]
pub enum OrderApplicationError {
    /// 会員が存在しない
    #[error("Member not found: {0}")]
    MemberNotFound(MemberId),

    /// 指定された名前の割引ポリシーがない
    #[error("Unknown discount policy: {0}")]
    UnknownDiscountPolicy(String),

    /// MemberRepositoryのエラー
    #[error("Member repository error")]
    RepositoryError(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// 注文アプリケーション層の Result型
pub type Result<T> = std::result::Result<T, OrderApplicationError>;
