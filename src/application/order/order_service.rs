use crate::container::{BeanDefinition, ComponentRegistration, Stereotype};
use crate::domain::{DiscountPolicy, order::Order, value_objects::MemberId};
use crate::ports::MemberRepository;
use chrono::Utc;
use std::sync::Arc;

use super::errors::{OrderApplicationError, Result};

/// 注文サービス
///
/// 会員を検索し、割引ポリシーで割引額を求めて注文を作る。注文は保存しない。
pub struct OrderService {
    member_repository: Arc<dyn MemberRepository>,
    discount_policy: Arc<dyn DiscountPolicy>,
}

impl OrderService {
    pub fn new(
        member_repository: Arc<dyn MemberRepository>,
        discount_policy: Arc<dyn DiscountPolicy>,
    ) -> Self {
        Self {
            member_repository,
            discount_policy,
        }
    }

    /// 注文作成
    ///
    /// 支払金額の下限チェックはしない（割引額が価格を上回ると負になる）。
    ///
    /// # エラー
    /// - MemberNotFound: 会員が登録されていない
    /// - RepositoryError: リポジトリの読み込み失敗
    pub async fn create_order(
        &self,
        member_id: MemberId,
        item_name: &str,
        item_price: i32,
    ) -> Result<Order> {
        let member = self
            .member_repository
            .find_by_id(member_id)
            .await
            .map_err(OrderApplicationError::RepositoryError)?
            .ok_or(OrderApplicationError::MemberNotFound(member_id))?;

        let discount_price = self.discount_policy.discount(&member, item_price);
        let order = Order::new(
            member_id,
            item_name,
            item_price,
            discount_price,
            Utc::now(),
        );

        tracing::info!(
            member_id = %member_id,
            item_name,
            item_price,
            discount_price,
            "Order created"
        );

        Ok(order)
    }

    /// 注入されたリポジトリ（シングルトン検証用）
    pub fn member_repository(&self) -> &Arc<dyn MemberRepository> {
        &self.member_repository
    }

    pub fn discount_policy(&self) -> &Arc<dyn DiscountPolicy> {
        &self.discount_policy
    }
}

inventory::submit! {
    ComponentRegistration::new(
        module_path!(),
        "OrderService",
        &[Stereotype::Service],
        order_service_definition,
    )
}

fn order_service_definition(name: String) -> BeanDefinition {
    BeanDefinition::new(name, |resolver| {
        Ok(Arc::new(OrderService::new(
            resolver.get::<dyn MemberRepository>()?,
            resolver.get::<dyn DiscountPolicy>()?,
        )))
    })
}
