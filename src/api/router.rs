use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::handlers::{
    AppState, create_loan, get_book, get_member, list_available_books, list_events,
    list_member_loans, list_overdue_loans, notify_overdue_loans, register_book, register_member,
    return_book,
};

/// Creates the API router with all lending desk endpoints
///
/// Command endpoints (Write operations):
/// - POST /books - Register a book
/// - POST /members - Register a member
/// - POST /loans - Lend a book
/// - POST /books/:id/return - Return a book, reporting any fine
/// - POST /loans/overdue/notify - Send overdue notices
///
/// Query endpoints (Read operations):
/// - GET /books/available, GET /books/:id
/// - GET /members/:id, GET /members/:id/loans
/// - GET /loans/overdue
/// - GET /events
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check endpoint
        .route("/health", get(health_check))
        // Catalog and members
        .route("/books", post(register_book))
        .route("/books/available", get(list_available_books))
        .route("/books/:id", get(get_book))
        .route("/books/:id/return", post(return_book))
        .route("/members", post(register_member))
        .route("/members/:id", get(get_member))
        .route("/members/:id/loans", get(list_member_loans))
        // Loans
        .route("/loans", post(create_loan))
        .route("/loans/overdue", get(list_overdue_loans))
        .route("/loans/overdue/notify", post(notify_overdue_loans))
        .route("/events", get(list_events))
        // Add tracing middleware
        .layer(TraceLayer::new_for_http())
        // Add application state
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
