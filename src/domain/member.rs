use serde::{Deserialize, Serialize};

use super::MemberId;

/// 会員
///
/// `has_outstanding_fine`は一度立つと戻らない（支払いフローは対象外）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub name: String,
    pub contact: String,
    pub has_outstanding_fine: bool,
}

impl Member {
    pub fn new(id: impl Into<MemberId>, name: impl Into<String>, contact: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            contact: contact.into(),
            has_outstanding_fine: false,
        }
    }

    /// 新しい貸出を受けられるか
    pub fn can_borrow(&self) -> bool {
        !self.has_outstanding_fine
    }
}
