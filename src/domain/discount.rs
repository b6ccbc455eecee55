use std::sync::Arc;

use super::member::Member;
use crate::container::{BeanDefinition, ComponentRegistration, Stereotype};
use crate::settings::AppSettings;

/// 割引ポリシー
///
/// 会員と価格から割引額を求める純粋な関数。状態を持たず、失敗しない。
pub trait DiscountPolicy: Send + Sync {
    fn discount(&self, member: &Member, price: i32) -> i32;
}

/// 定額割引
///
/// VIP会員には固定額を割り引く。それ以外は0。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixDiscountPolicy {
    discount_fix_amount: i32,
}

impl FixDiscountPolicy {
    pub fn new(discount_fix_amount: i32) -> Self {
        Self {
            discount_fix_amount,
        }
    }
}

impl Default for FixDiscountPolicy {
    fn default() -> Self {
        Self::new(1000)
    }
}

impl DiscountPolicy for FixDiscountPolicy {
    fn discount(&self, member: &Member, _price: i32) -> i32 {
        if member.is_vip() {
            self.discount_fix_amount
        } else {
            0
        }
    }
}

/// 定率割引
///
/// VIP会員には価格の `discount_percent`% を割り引く（整数除算）。それ以外は0。
/// 掛け算は `i64` で行うので、大きな価格でもオーバーフローしない。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateDiscountPolicy {
    discount_percent: i32,
}

impl RateDiscountPolicy {
    pub fn new(discount_percent: i32) -> Self {
        Self { discount_percent }
    }
}

impl Default for RateDiscountPolicy {
    fn default() -> Self {
        Self::new(10)
    }
}

impl DiscountPolicy for RateDiscountPolicy {
    fn discount(&self, member: &Member, price: i32) -> i32 {
        if member.is_vip() {
            (i64::from(price) * i64::from(self.discount_percent) / 100) as i32
        } else {
            0
        }
    }
}

// コンポーネント登録。設定ビーンがあればその値を使い、なければデフォルト値。

inventory::submit! {
    ComponentRegistration::new(
        module_path!(),
        "FixDiscountPolicy",
        &[Stereotype::Component],
        fix_discount_policy_definition,
    )
}

inventory::submit! {
    ComponentRegistration::new(
        module_path!(),
        "RateDiscountPolicy",
        &[Stereotype::Component],
        rate_discount_policy_definition,
    )
    .primary()
}

fn fix_discount_policy_definition(name: String) -> BeanDefinition {
    BeanDefinition::new(name, |resolver| {
        let policy = match resolver.get_if_available::<AppSettings>()? {
            Some(settings) => FixDiscountPolicy::new(settings.discount.fix_amount),
            None => FixDiscountPolicy::default(),
        };
        Ok(Arc::new(policy) as Arc<dyn DiscountPolicy>)
    })
}

fn rate_discount_policy_definition(name: String) -> BeanDefinition {
    BeanDefinition::new(name, |resolver| {
        let policy = match resolver.get_if_available::<AppSettings>()? {
            Some(settings) => RateDiscountPolicy::new(settings.discount.rate_percent),
            None => RateDiscountPolicy::default(),
        };
        Ok(Arc::new(policy) as Arc<dyn DiscountPolicy>)
    })
}
