use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// 貸出ID - 貸出記録ごとに採番される
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LoanId(Uuid);

impl LoanId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl Default for LoanId {
    fn default() -> Self {
        Self::new()
    }
}

/// 書籍ID - 目録コード（ISBN）
///
/// 目録上で書籍を識別する文字列。空白のみのIDは「空の書籍」として
/// 登録時に拒否される。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(String);

impl BookId {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BookId {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

impl From<String> for BookId {
    fn from(code: String) -> Self {
        Self(code)
    }
}

/// 会員ID
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(String);

impl MemberId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MemberId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for MemberId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// 延滞料金
///
/// 不変条件：金額は0以上。負の延滞日数からは0円の料金しか作れない。
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fine(f64);

impl Fine {
    pub const ZERO: Fine = Fine(0.0);

    /// 延滞日数と1日あたりの料金から延滞料金を計算する
    ///
    /// 期限内（延滞日数が0以下）の返却は0円。
    pub fn for_days_late(days_late: i64, per_day: f64) -> Self {
        if days_late > 0 {
            Self(days_late as f64 * per_day)
        } else {
            Self::ZERO
        }
    }

    pub fn amount(&self) -> f64 {
        self.0
    }

    /// 支払うべき料金があるか
    pub fn is_due(&self) -> bool {
        self.0 > 0.0
    }
}
