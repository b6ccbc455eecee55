use crate::domain::{member::Member, value_objects::MemberId};
use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// 会員リポジトリポート
///
/// 会員IDから会員への対応を保持する。
#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// 会員を保存する。同じIDの会員は上書きされる。
    async fn save(&self, member: Member) -> Result<()>;

    /// IDで会員を検索する
    async fn find_by_id(&self, member_id: MemberId) -> Result<Option<Member>>;
}
