/// 貸出の拒否理由
///
/// 業務ルール上の「失敗」であり、エラーではない。呼び出し側は
/// `LendOutcome`として受け取り、結果を確認する。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LendRefusal {
    /// 書籍が目録にない
    BookNotFound,
    /// 会員が登録されていない
    MemberNotFound,
    /// 書籍が貸出中
    BookUnavailable,
    /// 会員に未払いの延滞料金がある
    MemberHasOutstandingFine,
    /// 返却期限が暦の範囲を超える貸出日
    InvalidLoanDate,
}

impl LendRefusal {
    pub fn as_str(&self) -> &'static str {
        match self {
            LendRefusal::BookNotFound => "BOOK_NOT_FOUND",
            LendRefusal::MemberNotFound => "MEMBER_NOT_FOUND",
            LendRefusal::BookUnavailable => "BOOK_UNAVAILABLE",
            LendRefusal::MemberHasOutstandingFine => "MEMBER_HAS_OUTSTANDING_FINE",
            LendRefusal::InvalidLoanDate => "INVALID_LOAN_DATE",
        }
    }
}

/// 返却のエラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReturnBookError {
    /// 既に返却済み
    AlreadyReturned,
}
