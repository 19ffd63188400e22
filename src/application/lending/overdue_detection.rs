use chrono::NaiveDate;

use super::errors::{DeskError, Result};
use super::lending_service::ServiceDependencies;

/// 延滞検出バッチ
///
/// 指定日の時点で返却期限を過ぎている貸出中の記録をすべて検出し、
/// 会員に延滞通知を送る。
///
/// ビジネスルール：
/// - 返却期限当日は延滞ではない
/// - 返却済みの貸出は対象外
/// - 延滞検出は状態を変更しない（延滞料金は返却時にのみ確定する）
///
/// # 戻り値
/// 延滞として通知した貸出の件数
///
/// # エラー
/// 通知の送信に失敗した場合は`NotificationError`（それまでの通知は送信済み）
pub async fn detect_overdue_loans(deps: &ServiceDependencies, today: NaiveDate) -> Result<usize> {
    let overdue = deps.desk.overdue_loans(today);
    let mut notified = 0;

    for loan in overdue {
        let title = deps
            .desk
            .find_book(&loan.book_id)
            .map(|book| book.title)
            .unwrap_or_default();

        deps.notification_service
            .send_overdue_notification(&loan.member_id, &title, loan.due_date)
            .await
            .map_err(DeskError::NotificationError)?;

        notified += 1;
    }

    tracing::info!(%today, notified, "overdue detection finished");

    Ok(notified)
}
