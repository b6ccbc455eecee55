use serde::{Deserialize, Serialize};

use super::value_objects::{Grade, MemberId};

/// 会員
///
/// 作成後は変更されない。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub name: String,
    pub grade: Grade,
}

impl Member {
    pub fn new(id: MemberId, name: impl Into<String>, grade: Grade) -> Self {
        Self {
            id,
            name: name.into(),
            grade,
        }
    }

    pub fn is_vip(&self) -> bool {
        self.grade == Grade::Vip
    }
}
