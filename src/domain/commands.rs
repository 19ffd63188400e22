use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Book, BookId, Member, MemberId};

/// コマンド：書籍を目録に登録する
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterBook {
    pub book_id: BookId,
    pub title: String,
    pub author: String,
    pub publication_year: i32,
}

impl RegisterBook {
    pub fn into_book(self) -> Book {
        Book::new(self.book_id, self.title, self.author, self.publication_year)
    }
}

/// コマンド：会員を登録する
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterMember {
    pub member_id: MemberId,
    pub name: String,
    pub contact: String,
}

impl RegisterMember {
    pub fn into_member(self) -> Member {
        Member::new(self.member_id, self.name, self.contact)
    }
}

/// コマンド：書籍を貸し出す
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LendBook {
    pub book_id: BookId,
    pub member_id: MemberId,
    pub loaned_on: NaiveDate,
}

/// コマンド：書籍を返却する
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnBook {
    pub book_id: BookId,
    pub returned_on: NaiveDate,
}
