use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{BookId, Fine, LoanId, MemberId};

/// イベント：書籍が目録に登録された
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookRegistered {
    pub book_id: BookId,
    pub title: String,
}

/// イベント：会員が登録された
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberRegistered {
    pub member_id: MemberId,
}

/// イベント：書籍が貸出された
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookLent {
    pub loan_id: LoanId,
    pub book_id: BookId,
    pub member_id: MemberId,
    pub loaned_on: NaiveDate,
    pub due_date: NaiveDate,
}

/// イベント：書籍が返却された
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookReturned {
    pub loan_id: LoanId,
    pub book_id: BookId,
    pub member_id: MemberId,
    pub returned_on: NaiveDate,
    /// 負または0は期限内
    pub days_late: i64,
    pub fine: Fine,
}

/// ドメインイベント統合型
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DomainEvent {
    BookRegistered(BookRegistered),
    MemberRegistered(MemberRegistered),
    BookLent(BookLent),
    BookReturned(BookReturned),
}
