use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::value_objects::MemberId;

/// 注文
///
/// 永続化はしない。割引額は注文作成時に確定する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub member_id: MemberId,
    pub item_name: String,
    pub item_price: i32,
    pub discount_price: i32,
    pub ordered_at: DateTime<Utc>,
}

impl Order {
    pub fn new(
        member_id: MemberId,
        item_name: impl Into<String>,
        item_price: i32,
        discount_price: i32,
        ordered_at: DateTime<Utc>,
    ) -> Self {
        Self {
            member_id,
            item_name: item_name.into(),
            item_price,
            discount_price,
            ordered_at,
        }
    }

    /// 支払金額（商品価格 - 割引額）
    ///
    /// 割引額が価格を上回った場合は負の値になる。下限は設けていない。
    /// `i32` の範囲を超えた場合は折り返す。
    pub fn calculate_price(&self) -> i32 {
        self.item_price.wrapping_sub(self.discount_price)
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Order{{memberId={}, itemName='{}', itemPrice={}, discountPrice={}}}",
            self.member_id, self.item_name, self.item_price, self.discount_price
        )
    }
}
