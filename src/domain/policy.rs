use chrono::{NaiveDate, TimeDelta};
use serde::{Deserialize, Serialize};

use super::Fine;

/// 貸出期間（日数）
pub const LOAN_PERIOD_DAYS: i64 = 14;

/// 1日あたりの延滞料金
pub const FINE_PER_DAY: f64 = 2.0;

/// 貸出ポリシー
///
/// 貸出期間と延滞料金の単価。既定値は14日間・1日2.0。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LendingPolicy {
    pub loan_period_days: i64,
    pub fine_per_day: f64,
}

impl LendingPolicy {
    /// 貸出日から返却期限を計算する
    ///
    /// 暦の範囲を超える場合は`None`。
    pub fn due_date_for(&self, loaned_on: NaiveDate) -> Option<NaiveDate> {
        loaned_on.checked_add_signed(TimeDelta::try_days(self.loan_period_days)?)
    }

    /// 延滞日数から延滞料金を計算する
    pub fn fine_for(&self, days_late: i64) -> Fine {
        Fine::for_days_late(days_late, self.fine_per_day)
    }
}

impl Default for LendingPolicy {
    fn default() -> Self {
        Self {
            loan_period_days: LOAN_PERIOD_DAYS,
            fine_per_day: FINE_PER_DAY,
        }
    }
}
