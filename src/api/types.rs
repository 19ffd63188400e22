use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::commands::{LendBook, RegisterBook, RegisterMember, ReturnBook};
use crate::domain::{Book, BookId, Loan, Member, MemberId};

/// 書籍登録リクエスト（POST /books）
#[derive(Debug, Deserialize)]
pub struct RegisterBookRequest {
    pub book_id: String,
    pub title: String,
    pub author: String,
    pub publication_year: i32,
}

impl RegisterBookRequest {
    pub fn to_command(self) -> RegisterBook {
        RegisterBook {
            book_id: BookId::new(self.book_id),
            title: self.title,
            author: self.author,
            publication_year: self.publication_year,
        }
    }
}

/// 会員登録リクエスト（POST /members）
#[derive(Debug, Deserialize)]
pub struct RegisterMemberRequest {
    pub member_id: String,
    pub name: String,
    pub contact: String,
}

impl RegisterMemberRequest {
    pub fn to_command(self) -> RegisterMember {
        RegisterMember {
            member_id: MemberId::new(self.member_id),
            name: self.name,
            contact: self.contact,
        }
    }
}

/// 貸出リクエスト（POST /loans）
///
/// `loaned_on`を省略した場合は当日（UTC）。
#[derive(Debug, Deserialize)]
pub struct LendBookRequest {
    pub book_id: String,
    pub member_id: String,
    pub loaned_on: Option<NaiveDate>,
}

impl LendBookRequest {
    pub fn to_command(self, today: NaiveDate) -> LendBook {
        LendBook {
            book_id: BookId::new(self.book_id),
            member_id: MemberId::new(self.member_id),
            loaned_on: self.loaned_on.unwrap_or(today),
        }
    }
}

/// 返却リクエスト（POST /books/:id/return）
///
/// `returned_on`を省略した場合は当日（UTC）。
#[derive(Debug, Default, Deserialize)]
pub struct ReturnBookRequest {
    pub returned_on: Option<NaiveDate>,
}

impl ReturnBookRequest {
    pub fn to_command(self, book_id: BookId, today: NaiveDate) -> ReturnBook {
        ReturnBook {
            book_id,
            returned_on: self.returned_on.unwrap_or(today),
        }
    }
}

/// 延滞検索のクエリパラメータ
#[derive(Debug, Deserialize)]
pub struct OverdueQuery {
    /// 基準日（省略時は当日）
    pub today: Option<NaiveDate>,
}

/// 書籍レスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct BookResponse {
    pub book_id: String,
    pub title: String,
    pub author: String,
    pub publication_year: i32,
    pub available: bool,
}

impl From<Book> for BookResponse {
    fn from(book: Book) -> Self {
        Self {
            book_id: book.id.as_str().to_string(),
            title: book.title,
            author: book.author,
            publication_year: book.publication_year,
            available: book.available,
        }
    }
}

/// 会員レスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct MemberResponse {
    pub member_id: String,
    pub name: String,
    pub contact: String,
    pub has_outstanding_fine: bool,
}

impl From<Member> for MemberResponse {
    fn from(member: Member) -> Self {
        Self {
            member_id: member.id.as_str().to_string(),
            name: member.name,
            contact: member.contact,
            has_outstanding_fine: member.has_outstanding_fine,
        }
    }
}

/// 貸出レスポンス（POST /loans と GET /members/:id/loans）
#[derive(Debug, Serialize, Deserialize)]
pub struct LoanResponse {
    pub loan_id: Uuid,
    pub book_id: String,
    pub member_id: String,
    pub loaned_on: NaiveDate,
    pub due_date: NaiveDate,
    pub returned_on: Option<NaiveDate>,
    pub status: String,
}

impl From<Loan> for LoanResponse {
    fn from(loan: Loan) -> Self {
        Self {
            loan_id: loan.loan_id.value(),
            book_id: loan.book_id.as_str().to_string(),
            member_id: loan.member_id.as_str().to_string(),
            loaned_on: loan.loaned_on,
            due_date: loan.due_date,
            returned_on: loan.returned_on,
            status: loan.status().as_str().to_string(),
        }
    }
}

/// 返却レスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct BookReturnedResponse {
    pub loan_id: Uuid,
    pub book_id: String,
    pub member_id: String,
    pub returned_on: NaiveDate,
    pub days_late: i64,
    pub fine: f64,
}

/// 延滞通知バッチのレスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct OverdueNotifiedResponse {
    pub notified: usize,
}

/// エラーレスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }
}
