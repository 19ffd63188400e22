use crate::application::lending::{
    LendOutcome, ReturnOutcome, ServiceDependencies, detect_overdue_loans,
    lend_book as execute_lend_book, register_book as execute_register_book,
    register_member as execute_register_member, return_book as execute_return_book,
};
use crate::domain::{BookId, DomainEvent, MemberId};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{NaiveDate, Utc};
use std::sync::Arc;

use super::{
    error::ApiError,
    types::{
        BookResponse, BookReturnedResponse, ErrorResponse, LendBookRequest, LoanResponse,
        MemberResponse, OverdueNotifiedResponse, OverdueQuery, RegisterBookRequest,
        RegisterMemberRequest, ReturnBookRequest,
    },
};

// ============================================================================
// State
// ============================================================================

/// ハンドラー間で共有されるアプリケーション状態
#[derive(Clone)]
pub struct AppState {
    pub service_deps: ServiceDependencies,
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

// ============================================================================
// Command handlers (POST)
// ============================================================================

/// POST /books - 書籍を目録に登録
pub async fn register_book(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterBookRequest>,
) -> Result<(StatusCode, Json<BookResponse>), ApiError> {
    let cmd = req.to_command();
    let book = cmd.clone().into_book();

    execute_register_book(&state.service_deps, cmd)?;

    Ok((StatusCode::CREATED, Json(BookResponse::from(book))))
}

/// POST /members - 会員を登録
pub async fn register_member(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterMemberRequest>,
) -> Result<(StatusCode, Json<MemberResponse>), ApiError> {
    let cmd = req.to_command();
    let member = cmd.clone().into_member();

    execute_register_member(&state.service_deps, cmd)?;

    Ok((StatusCode::CREATED, Json(MemberResponse::from(member))))
}

/// POST /loans - 書籍を貸し出す
///
/// 強制されるビジネスルール:
/// - 書籍と会員が登録されていること
/// - 書籍が貸出中でないこと
/// - 会員に未払いの延滞料金がないこと
pub async fn create_loan(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LendBookRequest>,
) -> Result<(StatusCode, Json<LoanResponse>), ApiError> {
    let cmd = req.to_command(today());

    match execute_lend_book(&state.service_deps, cmd) {
        LendOutcome::Lent(loan) => Ok((StatusCode::CREATED, Json(LoanResponse::from(loan)))),
        LendOutcome::Refused(refusal) => Err(ApiError::LendRefused(refusal)),
    }
}

/// POST /books/:id/return - 書籍を返却
///
/// 延滞していれば延滞料金を返し、会員は以後の貸出が停止される。
/// 貸出中の記録がない場合は404（0円の返却とは区別する）。
/// 本文は省略可能で、省略時は当日の返却とする。
pub async fn return_book(
    State(state): State<Arc<AppState>>,
    Path(book_id): Path<String>,
    req: Option<Json<ReturnBookRequest>>,
) -> Result<Json<BookReturnedResponse>, ApiError> {
    let book_id = BookId::new(book_id);
    let req = req.map(|Json(req)| req).unwrap_or_default();
    let cmd = req.to_command(book_id.clone(), today());

    match execute_return_book(&state.service_deps, cmd).await {
        ReturnOutcome::Returned {
            loan,
            days_late,
            fine,
        } => Ok(Json(BookReturnedResponse {
            loan_id: loan.loan_id.value(),
            book_id: loan.book_id.as_str().to_string(),
            member_id: loan.member_id.as_str().to_string(),
            returned_on: loan.returned_on.unwrap_or_else(today),
            days_late,
            fine: fine.amount(),
        })),
        ReturnOutcome::NoActiveLoan => Err(ApiError::NoActiveLoan(book_id)),
    }
}

/// POST /loans/overdue/notify - 延滞中の会員に通知を送る
pub async fn notify_overdue_loans(
    State(state): State<Arc<AppState>>,
    Query(query): Query<OverdueQuery>,
) -> Result<Json<OverdueNotifiedResponse>, ApiError> {
    let today = query.today.unwrap_or_else(today);
    let notified = detect_overdue_loans(&state.service_deps, today).await?;

    Ok(Json(OverdueNotifiedResponse { notified }))
}

// ============================================================================
// Query handlers (GET)
// ============================================================================

/// GET /books/available - 貸出可能な書籍の一覧（登録順）
pub async fn list_available_books(State(state): State<Arc<AppState>>) -> Json<Vec<BookResponse>> {
    let books = state.service_deps.desk.list_available_books();
    Json(books.into_iter().map(BookResponse::from).collect())
}

/// GET /books/:id - 書籍をIDで取得
pub async fn get_book(
    State(state): State<Arc<AppState>>,
    Path(book_id): Path<String>,
) -> Result<Json<BookResponse>, QueryError> {
    state
        .service_deps
        .desk
        .find_book(&BookId::new(book_id.as_str()))
        .map(|book| Json(BookResponse::from(book)))
        .ok_or_else(|| QueryError::NotFound(format!("Book {} not found", book_id)))
}

/// GET /members/:id - 会員をIDで取得
pub async fn get_member(
    State(state): State<Arc<AppState>>,
    Path(member_id): Path<String>,
) -> Result<Json<MemberResponse>, QueryError> {
    state
        .service_deps
        .desk
        .find_member(&MemberId::new(member_id.as_str()))
        .map(|member| Json(MemberResponse::from(member)))
        .ok_or_else(|| QueryError::NotFound(format!("Member {} not found", member_id)))
}

/// GET /members/:id/loans - 会員の貸出履歴
pub async fn list_member_loans(
    State(state): State<Arc<AppState>>,
    Path(member_id): Path<String>,
) -> Result<Json<Vec<LoanResponse>>, QueryError> {
    let member_id = MemberId::new(member_id);
    let desk = &state.service_deps.desk;

    if desk.find_member(&member_id).is_none() {
        return Err(QueryError::NotFound(format!(
            "Member {} not found",
            member_id
        )));
    }

    let loans = desk.loans_for_member(&member_id);
    Ok(Json(loans.into_iter().map(LoanResponse::from).collect()))
}

/// GET /loans/overdue - 延滞中の貸出一覧
///
/// クエリパラメータ:
/// - today: 基準日（YYYY-MM-DD、省略時は当日）
pub async fn list_overdue_loans(
    State(state): State<Arc<AppState>>,
    Query(query): Query<OverdueQuery>,
) -> Json<Vec<LoanResponse>> {
    let today = query.today.unwrap_or_else(today);
    let loans = state.service_deps.desk.overdue_loans(today);
    Json(loans.into_iter().map(LoanResponse::from).collect())
}

/// GET /events - 発生したドメインイベント（発生順）
pub async fn list_events(State(state): State<Arc<AppState>>) -> Json<Vec<DomainEvent>> {
    Json(state.service_deps.desk.events())
}

// ============================================================================
// Error types
// ============================================================================

/// クエリハンドラー用のエラー型
#[derive(Debug)]
pub enum QueryError {
    NotFound(String),
}

impl IntoResponse for QueryError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self {
            QueryError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg),
        };

        let body = Json(ErrorResponse::new(error_type, message));
        (status, body).into_response()
    }
}
