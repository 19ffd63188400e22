use chrono::NaiveDate;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, info};

use crate::domain::{
    self, Book, BookId, BookRegistered, DomainEvent, Fine, LendRefusal, LendingPolicy, Loan,
    Member, MemberId, MemberRegistered,
};

use super::errors::{DeskError, Result};

/// 貸出中の記録がない返却の数値表現
pub const NO_ACTIVE_LOAN: f64 = -1.0;

/// 貸出の結果
///
/// 拒否はエラーではなく通常の戻り値。
#[derive(Debug, Clone, PartialEq)]
pub enum LendOutcome {
    Lent(Loan),
    Refused(LendRefusal),
}

impl LendOutcome {
    pub fn is_lent(&self) -> bool {
        matches!(self, LendOutcome::Lent(_))
    }

    pub fn loan(&self) -> Option<&Loan> {
        match self {
            LendOutcome::Lent(loan) => Some(loan),
            LendOutcome::Refused(_) => None,
        }
    }
}

impl From<LendOutcome> for bool {
    fn from(outcome: LendOutcome) -> Self {
        outcome.is_lent()
    }
}

/// 返却の結果
///
/// `NoActiveLoan`は0円の返却とは区別される。
#[derive(Debug, Clone, PartialEq)]
pub enum ReturnOutcome {
    Returned {
        loan: Loan,
        days_late: i64,
        fine: Fine,
    },
    NoActiveLoan,
}

impl ReturnOutcome {
    /// 延滞料金。貸出中の記録がなければ`None`
    pub fn fine(&self) -> Option<Fine> {
        match self {
            ReturnOutcome::Returned { fine, .. } => Some(*fine),
            ReturnOutcome::NoActiveLoan => None,
        }
    }

    /// 延滞料金の金額。貸出中の記録がなければ`NO_ACTIVE_LOAN`（-1）
    pub fn amount(&self) -> f64 {
        self.fine().map_or(NO_ACTIVE_LOAN, |fine| fine.amount())
    }
}

#[derive(Debug, Default)]
struct DeskState {
    books: Vec<Book>,
    members: Vec<Member>,
    loans: Vec<Loan>,
    events: Vec<DomainEvent>,
}

/// 貸出窓口
///
/// 目録・会員・貸出記録の3つのコレクションを単独で所有し、唯一の更新者となる。
/// すべての操作は1つのロックの下で実行されるため、貸出の
/// 「貸出可否の確認 → フラグ更新 → 記録追加」は不可分に行われる。
/// 呼び出し側が受け取るのは常に複製であり、内部状態を直接変更することはできない。
#[derive(Debug, Default)]
pub struct LendingDesk {
    policy: LendingPolicy,
    state: Mutex<DeskState>,
}

impl LendingDesk {
    pub fn new(policy: LendingPolicy) -> Self {
        Self {
            policy,
            state: Mutex::new(DeskState::default()),
        }
    }

    pub fn policy(&self) -> &LendingPolicy {
        &self.policy
    }

    // 各操作はパニックする前に状態の整合性を保つので、ポイズンは無視してよい
    fn state(&self) -> MutexGuard<'_, DeskState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// 書籍を目録に登録する
    ///
    /// # エラー
    /// 書籍が存在しない、または目録コードが空の場合は`InvalidArgument`。
    /// その場合、状態は変更されない。
    ///
    /// 重複した目録コードの確認は行わない。
    pub fn register_book(&self, book: impl Into<Option<Book>>) -> Result<()> {
        let book = book
            .into()
            .filter(|book| !book.id.is_blank())
            .ok_or_else(|| DeskError::InvalidArgument("Book must not be empty".to_string()))?;

        info!(book_id = %book.id, title = %book.title, "book registered");

        let mut state = self.state();
        state.events.push(DomainEvent::BookRegistered(BookRegistered {
            book_id: book.id.clone(),
            title: book.title.clone(),
        }));
        state.books.push(book);

        Ok(())
    }

    /// 会員を登録する
    ///
    /// # エラー
    /// 会員が存在しない、または会員IDが空の場合は`InvalidArgument`。
    pub fn register_member(&self, member: impl Into<Option<Member>>) -> Result<()> {
        let member = member
            .into()
            .filter(|member| !member.id.is_blank())
            .ok_or_else(|| DeskError::InvalidArgument("Member must not be empty".to_string()))?;

        info!(member_id = %member.id, "member registered");

        let mut state = self.state();
        state.events.push(DomainEvent::MemberRegistered(MemberRegistered {
            member_id: member.id.clone(),
        }));
        state.members.push(member);

        Ok(())
    }

    /// 書籍を貸し出す
    ///
    /// 書籍・会員は登録順の先頭一致で検索する。
    /// 書籍か会員が見つからない、書籍が貸出中、または会員に延滞料金がある場合は
    /// `LendOutcome::Refused`を返す（エラーではない）。
    #[tracing::instrument(skip_all, fields(book_id = %book_id, member_id = %member_id, %loaned_on))]
    pub fn lend(&self, book_id: &BookId, member_id: &MemberId, loaned_on: NaiveDate) -> LendOutcome {
        let mut guard = self.state();
        let state = &mut *guard;

        let book = state.books.iter_mut().find(|book| &book.id == book_id);
        let member = state.members.iter().find(|member| &member.id == member_id);

        let (loan, event) =
            match domain::loan::lend_book(book.as_deref(), member, loaned_on, &self.policy) {
                Ok(lent) => lent,
                Err(refusal) => {
                    debug!(reason = refusal.as_str(), "lend refused");
                    return LendOutcome::Refused(refusal);
                }
            };

        // lend_bookが成功した時点で書籍は必ず見つかっている
        if let Some(book) = book {
            book.available = false;
        }

        info!(loan_id = %loan.loan_id.value(), due_date = %loan.due_date, "book lent");

        state.loans.push(loan.clone());
        state.events.push(DomainEvent::BookLent(event));

        LendOutcome::Lent(loan)
    }

    /// 書籍を返却する
    ///
    /// 対象書籍の貸出中の記録（先頭一致）を返却済みにし、書籍を貸出可能に戻す。
    /// 延滞していれば延滞料金を計算し、会員に延滞フラグを立てる。
    /// 貸出中の記録がなければ何も変更せず`ReturnOutcome::NoActiveLoan`を返す。
    #[tracing::instrument(skip_all, fields(book_id = %book_id, %returned_on))]
    pub fn return_book(&self, book_id: &BookId, returned_on: NaiveDate) -> ReturnOutcome {
        let mut guard = self.state();
        let state = &mut *guard;

        let Some(loan) = state
            .loans
            .iter_mut()
            .find(|loan| &loan.book_id == book_id && loan.is_active())
        else {
            debug!("no active loan for book");
            return ReturnOutcome::NoActiveLoan;
        };

        let (returned, event) = match domain::loan::return_book(loan, returned_on, &self.policy) {
            Ok(returned) => returned,
            Err(error) => {
                debug!(?error, "loan could not be returned");
                return ReturnOutcome::NoActiveLoan;
            }
        };
        *loan = returned.clone();

        if let Some(book) = state.books.iter_mut().find(|book| book.id == returned.book_id) {
            book.available = true;
        }

        if event.fine.is_due() {
            if let Some(member) = state
                .members
                .iter_mut()
                .find(|member| member.id == returned.member_id)
            {
                member.has_outstanding_fine = true;
            }
            info!(
                member_id = %returned.member_id,
                days_late = event.days_late,
                fine = event.fine.amount(),
                "late return, member flagged with outstanding fine"
            );
        } else {
            info!(loan_id = %returned.loan_id.value(), "book returned on time");
        }

        let days_late = event.days_late;
        let fine = event.fine;
        state.events.push(DomainEvent::BookReturned(event));

        ReturnOutcome::Returned {
            loan: returned,
            days_late,
            fine,
        }
    }

    /// 貸出可能な書籍の一覧（目録の登録順、呼び出し時点の複製）
    pub fn list_available_books(&self) -> Vec<Book> {
        self.state()
            .books
            .iter()
            .filter(|book| book.is_available())
            .cloned()
            .collect()
    }

    pub fn find_book(&self, book_id: &BookId) -> Option<Book> {
        self.state()
            .books
            .iter()
            .find(|book| &book.id == book_id)
            .cloned()
    }

    pub fn find_member(&self, member_id: &MemberId) -> Option<Member> {
        self.state()
            .members
            .iter()
            .find(|member| &member.id == member_id)
            .cloned()
    }

    /// 貸出中の記録（貸出順）
    pub fn active_loans(&self) -> Vec<Loan> {
        self.state()
            .loans
            .iter()
            .filter(|loan| loan.is_active())
            .cloned()
            .collect()
    }

    /// 会員の貸出履歴（返却済みを含む、貸出順）
    pub fn loans_for_member(&self, member_id: &MemberId) -> Vec<Loan> {
        self.state()
            .loans
            .iter()
            .filter(|loan| &loan.member_id == member_id)
            .cloned()
            .collect()
    }

    /// 指定日の時点で返却期限を過ぎている貸出中の記録
    pub fn overdue_loans(&self, today: NaiveDate) -> Vec<Loan> {
        self.state()
            .loans
            .iter()
            .filter(|loan| domain::loan::is_overdue(loan, today))
            .cloned()
            .collect()
    }

    /// 発生したドメインイベント（発生順）
    pub fn events(&self) -> Vec<DomainEvent> {
        self.state().events.clone()
    }
}
