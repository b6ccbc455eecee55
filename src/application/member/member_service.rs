use crate::container::{BeanDefinition, ComponentRegistration, Stereotype};
use crate::domain::{member::Member, value_objects::MemberId};
use crate::ports::MemberRepository;
use std::sync::Arc;

use super::errors::{MemberApplicationError, Result};

/// 会員サービス
///
/// 登録・検索はすべてリポジトリに委譲する。
pub struct MemberService {
    member_repository: Arc<dyn MemberRepository>,
}

impl MemberService {
    pub fn new(member_repository: Arc<dyn MemberRepository>) -> Self {
        Self { member_repository }
    }

    /// 会員登録
    pub async fn join(&self, member: Member) -> Result<()> {
        tracing::info!(member_id = %member.id, grade = ?member.grade, "Joining member");
        self.member_repository
            .save(member)
            .await
            .map_err(MemberApplicationError::RepositoryError)
    }

    /// 会員検索
    pub async fn find_member(&self, member_id: MemberId) -> Result<Option<Member>> {
        self.member_repository
            .find_by_id(member_id)
            .await
            .map_err(MemberApplicationError::RepositoryError)
    }

    /// 注入されたリポジトリ（シングルトン検証用）
    pub fn member_repository(&self) -> &Arc<dyn MemberRepository> {
        &self.member_repository
    }
}

inventory::submit! {
    ComponentRegistration::new(
        module_path!(),
        "MemberService",
        &[Stereotype::Service],
        member_service_definition,
    )
}

fn member_service_definition(name: String) -> BeanDefinition {
    BeanDefinition::new(name, |resolver| {
        Ok(Arc::new(MemberService::new(
            resolver.get::<dyn MemberRepository>()?,
        )))
    })
}
