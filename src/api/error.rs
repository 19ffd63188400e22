use crate::application::lending::DeskError;
use crate::domain::{BookId, LendRefusal};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::types::ErrorResponse;

/// API層のエラー型
///
/// アプリケーション層のエラーと業務上の拒否を、HTTPレスポンスへマッピングする。
#[derive(Debug)]
pub enum ApiError {
    Application(DeskError),
    LendRefused(LendRefusal),
    NoActiveLoan(BookId),
}

impl From<DeskError> for ApiError {
    fn from(err: DeskError) -> Self {
        ApiError::Application(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self {
            // 400 Bad Request - 登録内容が空
            ApiError::Application(DeskError::InvalidArgument(msg)) => {
                (StatusCode::BAD_REQUEST, "INVALID_ARGUMENT", msg)
            }

            // 404 Not Found - 貸出中の記録がない（0円の返却とは区別する）
            ApiError::NoActiveLoan(book_id) => (
                StatusCode::NOT_FOUND,
                "NO_ACTIVE_LOAN",
                format!("Book {} has no active loan", book_id),
            ),

            // 422 Unprocessable Entity - ビジネスルールによる貸出拒否
            ApiError::LendRefused(refusal) => {
                let message = match refusal {
                    LendRefusal::BookNotFound => "Book not found",
                    LendRefusal::MemberNotFound => "Member not found",
                    LendRefusal::BookUnavailable => "Book is already on loan",
                    LendRefusal::MemberHasOutstandingFine => {
                        "Member has an outstanding fine and cannot borrow books"
                    }
                    LendRefusal::InvalidLoanDate => "Loan date leaves no representable due date",
                };
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    refusal.as_str(),
                    message.to_string(),
                )
            }

            // 500 Internal Server Error - 内部エラーの詳細はログのみに記録する
            ApiError::Application(DeskError::NotificationError(e)) => {
                tracing::error!("Notification service error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "NOTIFICATION_ERROR",
                    "Failed to send notification".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse::new(error_type, message));
        (status, body).into_response()
    }
}
