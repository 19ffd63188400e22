use crate::domain::commands::*;
use crate::ports::NotificationService;
use std::sync::Arc;

use super::errors::Result;
use super::lending_desk::{LendOutcome, LendingDesk, ReturnOutcome};

/// サービスの依存関係
///
/// 貸出窓口と通知ポートをデータ構造としてまとめ、各関数に明示的に渡す。
#[derive(Clone)]
pub struct ServiceDependencies {
    pub desk: Arc<LendingDesk>,
    pub notification_service: Arc<dyn NotificationService>,
}

/// 書籍を目録に登録する
pub fn register_book(deps: &ServiceDependencies, cmd: RegisterBook) -> Result<()> {
    deps.desk.register_book(cmd.into_book())
}

/// 会員を登録する
pub fn register_member(deps: &ServiceDependencies, cmd: RegisterMember) -> Result<()> {
    deps.desk.register_member(cmd.into_member())
}

/// 書籍を貸し出す
///
/// 拒否された場合も`LendOutcome::Refused`として返す。
pub fn lend_book(deps: &ServiceDependencies, cmd: LendBook) -> LendOutcome {
    deps.desk.lend(&cmd.book_id, &cmd.member_id, cmd.loaned_on)
}

/// 書籍を返却し、会員に通知する
///
/// 返却確認を送り、延滞料金が発生していれば延滞料金の通知も送る。
///
/// # 一貫性保証
///
/// 返却は通知より先に窓口へ確定される。通知の失敗はログに記録するのみで、
/// 返却結果は変わらない（呼び出し側が再試行すると「貸出中の記録なし」になるため）。
pub async fn return_book(deps: &ServiceDependencies, cmd: ReturnBook) -> ReturnOutcome {
    let outcome = deps.desk.return_book(&cmd.book_id, cmd.returned_on);

    if let ReturnOutcome::Returned { loan, fine, .. } = &outcome {
        let title = deps
            .desk
            .find_book(&loan.book_id)
            .map(|book| book.title)
            .unwrap_or_default();

        if let Err(e) = deps
            .notification_service
            .send_return_confirmation(&loan.member_id, &title, cmd.returned_on)
            .await
        {
            tracing::warn!(error = %e, member_id = %loan.member_id, "failed to send return confirmation");
        }

        if fine.is_due() {
            if let Err(e) = deps
                .notification_service
                .send_fine_notice(&loan.member_id, &title, *fine)
                .await
            {
                tracing::warn!(error = %e, member_id = %loan.member_id, "failed to send fine notice");
            }
        }
    }

    outcome
}
