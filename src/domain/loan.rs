use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{
    Book, BookId, BookLent, BookReturned, LendRefusal, LendingPolicy, LoanId, Member, MemberId,
    ReturnBookError,
};

/// 貸出ステータス
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoanStatus {
    /// 貸出中
    Active,
    /// 返却済み
    Returned,
}

impl LoanStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoanStatus::Active => "active",
            LoanStatus::Returned => "returned",
        }
    }
}

/// 貸出記録 - 1冊の書籍の1回の貸出
///
/// `returned_on`が`None`の間は貸出中。返却時に一度だけ設定される。
/// `due_date`は作成後に変更されない。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loan {
    pub loan_id: LoanId,

    // 他の集約への参照（IDのみ）
    pub book_id: BookId,
    pub member_id: MemberId,

    pub loaned_on: NaiveDate,
    pub due_date: NaiveDate,
    pub returned_on: Option<NaiveDate>,
}

impl Loan {
    pub fn is_active(&self) -> bool {
        self.returned_on.is_none()
    }

    pub fn status(&self) -> LoanStatus {
        if self.is_active() {
            LoanStatus::Active
        } else {
            LoanStatus::Returned
        }
    }
}

/// 純粋関数：書籍を貸し出す
///
/// ビジネスルール：
/// - 書籍と会員が存在すること
/// - 書籍が貸出可能であること
/// - 会員に未払いの延滞料金がないこと
/// - 返却期限は貸出日 + 貸出期間（暦の範囲内であること）
///
/// 副作用なし。書籍の貸出可能フラグの更新は呼び出し側が行う。
pub fn lend_book(
    book: Option<&Book>,
    member: Option<&Member>,
    loaned_on: NaiveDate,
    policy: &LendingPolicy,
) -> Result<(Loan, BookLent), LendRefusal> {
    let book = book.ok_or(LendRefusal::BookNotFound)?;
    let member = member.ok_or(LendRefusal::MemberNotFound)?;

    if !book.is_available() {
        return Err(LendRefusal::BookUnavailable);
    }

    if !member.can_borrow() {
        return Err(LendRefusal::MemberHasOutstandingFine);
    }

    let due_date = policy
        .due_date_for(loaned_on)
        .ok_or(LendRefusal::InvalidLoanDate)?;
    let loan_id = LoanId::new();

    let loan = Loan {
        loan_id,
        book_id: book.id.clone(),
        member_id: member.id.clone(),
        loaned_on,
        due_date,
        returned_on: None,
    };

    let event = BookLent {
        loan_id,
        book_id: book.id.clone(),
        member_id: member.id.clone(),
        loaned_on,
        due_date,
    };

    Ok((loan, event))
}

/// 純粋関数：返却期限からの延滞日数（暦日）
///
/// 期限内の返却では0または負の値になる。
pub fn days_late(loan: &Loan, returned_on: NaiveDate) -> i64 {
    (returned_on - loan.due_date).num_days()
}

/// 純粋関数：書籍を返却する
///
/// ビジネスルール：
/// - 延滞日数 × 単価の延滞料金が発生する（期限内は0）
/// - 延滞していても返却は受け付ける
///
/// 副作用なし。会員の延滞フラグ設定は呼び出し側が行う。
pub fn return_book(
    loan: &Loan,
    returned_on: NaiveDate,
    policy: &LendingPolicy,
) -> Result<(Loan, BookReturned), ReturnBookError> {
    if !loan.is_active() {
        return Err(ReturnBookError::AlreadyReturned);
    }

    let days_late = days_late(loan, returned_on);
    let fine = policy.fine_for(days_late);

    let new_loan = Loan {
        returned_on: Some(returned_on),
        ..loan.clone()
    };

    let event = BookReturned {
        loan_id: loan.loan_id,
        book_id: loan.book_id.clone(),
        member_id: loan.member_id.clone(),
        returned_on,
        days_late,
        fine,
    };

    Ok((new_loan, event))
}

/// 純粋関数：延滞判定
pub fn is_overdue(loan: &Loan, today: NaiveDate) -> bool {
    loan.is_active() && today > loan.due_date
}
