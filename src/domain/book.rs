use serde::{Deserialize, Serialize};

use super::BookId;

/// 書籍 - 目録の1エントリ
///
/// `available`は貸出・返却でのみ切り替わる。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub publication_year: i32,
    pub available: bool,
}

impl Book {
    /// 新規書籍（貸出可能な状態で作成）
    pub fn new(
        id: impl Into<BookId>,
        title: impl Into<String>,
        author: impl Into<String>,
        publication_year: i32,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            author: author.into(),
            publication_year,
            available: true,
        }
    }

    pub fn is_available(&self) -> bool {
        self.available
    }
}
