use crate::container::{BeanDefinition, ComponentRegistration, Stereotype};
use crate::domain::{DiscountPolicy, member::Member};
use std::collections::HashMap;
use std::sync::Arc;

use super::errors::{OrderApplicationError, Result};

/// 割引サービス
///
/// すべての割引ポリシーをビーン名で保持し、呼び出しごとに名前でポリシーを選ぶ。
pub struct DiscountService {
    policies: HashMap<String, Arc<dyn DiscountPolicy>>,
}

impl DiscountService {
    pub fn new(policies: HashMap<String, Arc<dyn DiscountPolicy>>) -> Self {
        Self { policies }
    }

    /// 指定したポリシーで割引額を求める
    ///
    /// # エラー
    /// - UnknownDiscountPolicy: その名前のポリシーが登録されていない
    pub fn discount(&self, member: &Member, price: i32, policy_name: &str) -> Result<i32> {
        let policy = self
            .policies
            .get(policy_name)
            .ok_or_else(|| OrderApplicationError::UnknownDiscountPolicy(policy_name.to_string()))?;

        Ok(policy.discount(member, price))
    }

    /// 登録されているポリシー名（ソート済み）
    pub fn policy_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.policies.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

inventory::submit! {
    ComponentRegistration::new(
        module_path!(),
        "DiscountService",
        &[Stereotype::Service],
        discount_service_definition,
    )
}

fn discount_service_definition(name: String) -> BeanDefinition {
    BeanDefinition::new(name, |resolver| {
        Ok(Arc::new(DiscountService::new(
            resolver.get_all::<dyn DiscountPolicy>()?,
        )))
    })
}
