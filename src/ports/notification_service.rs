use crate::domain::value_objects::{Fine, MemberId};
use async_trait::async_trait;
use chrono::NaiveDate;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// 通知サービスポート
///
/// 会員への通知配信メカニズムを抽象化する。
/// 実装はメール、SMS、ログ出力などが考えられる。
#[async_trait]
pub trait NotificationService: Send + Sync {
    /// 延滞通知を会員に送信する
    ///
    /// 延滞検出バッチから呼ばれる。
    async fn send_overdue_notification(
        &self,
        member_id: &MemberId,
        book_title: &str,
        due_date: NaiveDate,
    ) -> Result<()>;

    /// 返却確認通知を会員に送信する
    async fn send_return_confirmation(
        &self,
        member_id: &MemberId,
        book_title: &str,
        returned_on: NaiveDate,
    ) -> Result<()>;

    /// 延滞料金の通知を会員に送信する
    ///
    /// 延滞料金が発生した返却の後に呼ばれる。
    async fn send_fine_notice(
        &self,
        member_id: &MemberId,
        book_title: &str,
        fine: Fine,
    ) -> Result<()>;
}
