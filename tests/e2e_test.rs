use axum::body::Body;
use axum::http::{Request, StatusCode};
use lending_desk::adapters::mock::NotificationService;
use lending_desk::api::handlers::AppState;
use lending_desk::api::router::create_router;
use lending_desk::api::types::*;
use lending_desk::application::lending::{LendingDesk, ServiceDependencies};
use lending_desk::domain::LendingPolicy;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

// ============================================================================
// E2Eテスト用のヘルパー関数
// ============================================================================

/// 空の貸出窓口とモック通知サービスでルーターを作成する
fn setup_e2e_app() -> (axum::Router, Arc<NotificationService>) {
    let notifications = Arc::new(NotificationService::new());
    let service_deps = ServiceDependencies {
        desk: Arc::new(LendingDesk::new(LendingPolicy::default())),
        notification_service: notifications.clone(),
    };

    let app_state = Arc::new(AppState { service_deps });

    (create_router(app_state), notifications)
}

async fn send(
    app: &axum::Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    (status, value)
}

/// テスト用の書籍と会員を登録する
async fn setup_catalog(app: &axum::Router) {
    let (status, _) = send(
        app,
        "POST",
        "/books",
        Some(json!({
            "book_id": "123456",
            "title": "Dom Casmurro",
            "author": "Machado de Assis",
            "publication_year": 1899,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(
        app,
        "POST",
        "/books",
        Some(json!({
            "book_id": "789012",
            "title": "O Cortiço",
            "author": "Aluísio Azevedo",
            "publication_year": 1890,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(
        app,
        "POST",
        "/members",
        Some(json!({
            "member_id": "U001",
            "name": "João Silva",
            "contact": "joao@email.com",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

// ============================================================================
// E2Eテスト: 正常系フロー
// ============================================================================

#[tokio::test]
async fn test_e2e_health_check() {
    let (app, _) = setup_e2e_app();

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_e2e_full_lending_flow() {
    // Arrange
    let (app, notifications) = setup_e2e_app();
    setup_catalog(&app).await;

    // Step 1: 貸出作成（POST /loans）
    let (status, body) = send(
        &app,
        "POST",
        "/loans",
        Some(json!({
            "book_id": "123456",
            "member_id": "U001",
            "loaned_on": "2024-03-01",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let loan: LoanResponse = serde_json::from_value(body).unwrap();
    assert_eq!(loan.due_date.to_string(), "2024-03-15");
    assert_eq!(loan.status, "active");

    // Step 2: 貸出中の書籍は一覧に出ない
    let (status, body) = send(&app, "GET", "/books/available", None).await;
    assert_eq!(status, StatusCode::OK);
    let books: Vec<BookResponse> = serde_json::from_value(body).unwrap();
    assert_eq!(books.len(), 1);
    assert_eq!(books[0].book_id, "789012");

    // Step 3: 期限当日の返却は0円
    let (status, body) = send(
        &app,
        "POST",
        "/books/123456/return",
        Some(json!({ "returned_on": "2024-03-15" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let returned: BookReturnedResponse = serde_json::from_value(body).unwrap();
    assert_eq!(returned.fine, 0.0);
    assert_eq!(returned.days_late, 0);
    assert_eq!(returned.loan_id, loan.loan_id);

    // Step 4: 履歴に返却済みとして残る
    let (status, body) = send(&app, "GET", "/members/U001/loans", None).await;
    assert_eq!(status, StatusCode::OK);
    let history: Vec<LoanResponse> = serde_json::from_value(body).unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].status, "returned");

    assert_eq!(notifications.sent().len(), 1);
}

#[tokio::test]
async fn test_e2e_late_return_blocks_member() {
    let (app, _) = setup_e2e_app();
    setup_catalog(&app).await;

    send(
        &app,
        "POST",
        "/loans",
        Some(json!({ "book_id": "123456", "member_id": "U001", "loaned_on": "2024-03-01" })),
    )
    .await;

    // 10日延滞
    let (status, body) = send(
        &app,
        "POST",
        "/books/123456/return",
        Some(json!({ "returned_on": "2024-03-25" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let returned: BookReturnedResponse = serde_json::from_value(body).unwrap();
    assert_eq!(returned.fine, 20.0);

    let (_, body) = send(&app, "GET", "/members/U001", None).await;
    let member: MemberResponse = serde_json::from_value(body).unwrap();
    assert!(member.has_outstanding_fine);

    let (status, body) = send(
        &app,
        "POST",
        "/loans",
        Some(json!({ "book_id": "789012", "member_id": "U001", "loaned_on": "2024-03-26" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let error: ErrorResponse = serde_json::from_value(body).unwrap();
    assert_eq!(error.error, "MEMBER_HAS_OUTSTANDING_FINE");
}

#[tokio::test]
async fn test_e2e_return_without_body_uses_today() {
    let (app, _) = setup_e2e_app();
    setup_catalog(&app).await;

    // 貸出日・返却日とも省略すると当日扱い
    let (status, _) = send(
        &app,
        "POST",
        "/loans",
        Some(json!({ "book_id": "123456", "member_id": "U001" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, "POST", "/books/123456/return", None).await;

    assert_eq!(status, StatusCode::OK);
    let returned: BookReturnedResponse = serde_json::from_value(body).unwrap();
    assert_eq!(returned.fine, 0.0);
    assert_eq!(returned.days_late, 0);
}

// ============================================================================
// E2Eテスト: 異常系
// ============================================================================

#[tokio::test]
async fn test_e2e_lend_unavailable_book_is_refused() {
    let (app, _) = setup_e2e_app();
    setup_catalog(&app).await;
    send(
        &app,
        "POST",
        "/members",
        Some(json!({ "member_id": "U002", "name": "Maria Santos", "contact": "maria@email.com" })),
    )
    .await;

    send(
        &app,
        "POST",
        "/loans",
        Some(json!({ "book_id": "123456", "member_id": "U001", "loaned_on": "2024-03-01" })),
    )
    .await;
    let (status, body) = send(
        &app,
        "POST",
        "/loans",
        Some(json!({ "book_id": "123456", "member_id": "U002", "loaned_on": "2024-03-02" })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let error: ErrorResponse = serde_json::from_value(body).unwrap();
    assert_eq!(error.error, "BOOK_UNAVAILABLE");
}

#[tokio::test]
async fn test_e2e_return_without_active_loan_is_not_found() {
    let (app, notifications) = setup_e2e_app();
    setup_catalog(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        "/books/123456/return",
        Some(json!({ "returned_on": "2024-03-01" })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    let error: ErrorResponse = serde_json::from_value(body).unwrap();
    assert_eq!(error.error, "NO_ACTIVE_LOAN");

    let (_, body) = send(&app, "GET", "/books/123456", None).await;
    let book: BookResponse = serde_json::from_value(body).unwrap();
    assert!(book.available);
    assert!(notifications.sent().is_empty());
}

#[tokio::test]
async fn test_e2e_lend_at_calendar_end_is_refused() {
    let (app, _) = setup_e2e_app();
    setup_catalog(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        "/loans",
        Some(json!({ "book_id": "123456", "member_id": "U001", "loaned_on": "+262142-12-31" })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let error: ErrorResponse = serde_json::from_value(body).unwrap();
    assert_eq!(error.error, "INVALID_LOAN_DATE");

    // 窓口は引き続き利用できる
    let (_, body) = send(&app, "GET", "/books/123456", None).await;
    let book: BookResponse = serde_json::from_value(body).unwrap();
    assert!(book.available);
}

#[tokio::test]
async fn test_e2e_register_blank_book_is_bad_request() {
    let (app, _) = setup_e2e_app();

    let (status, body) = send(
        &app,
        "POST",
        "/books",
        Some(json!({
            "book_id": "",
            "title": "Sem código",
            "author": "Anônimo",
            "publication_year": 1900,
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error: ErrorResponse = serde_json::from_value(body).unwrap();
    assert_eq!(error.error, "INVALID_ARGUMENT");

    let (_, body) = send(&app, "GET", "/books/available", None).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_e2e_unknown_member_loans_is_not_found() {
    let (app, _) = setup_e2e_app();

    let (status, _) = send(&app, "GET", "/members/U999/loans", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ============================================================================
// E2Eテスト: 延滞検出
// ============================================================================

#[tokio::test]
async fn test_e2e_overdue_listing_and_notification() {
    let (app, notifications) = setup_e2e_app();
    setup_catalog(&app).await;
    send(
        &app,
        "POST",
        "/loans",
        Some(json!({ "book_id": "123456", "member_id": "U001", "loaned_on": "2024-03-01" })),
    )
    .await;

    let (status, body) = send(&app, "GET", "/loans/overdue?today=2024-03-15", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let (_, body) = send(&app, "GET", "/loans/overdue?today=2024-03-16", None).await;
    let overdue: Vec<LoanResponse> = serde_json::from_value(body).unwrap();
    assert_eq!(overdue.len(), 1);

    let (status, body) = send(&app, "POST", "/loans/overdue/notify?today=2024-03-16", None).await;
    assert_eq!(status, StatusCode::OK);
    let notified: OverdueNotifiedResponse = serde_json::from_value(body).unwrap();
    assert_eq!(notified.notified, 1);
    assert_eq!(notifications.sent().len(), 1);
}

#[tokio::test]
async fn test_e2e_events_endpoint_lists_journal() {
    let (app, _) = setup_e2e_app();
    setup_catalog(&app).await;

    let (status, body) = send(&app, "GET", "/events", None).await;

    assert_eq!(status, StatusCode::OK);
    let events = body.as_array().unwrap();
    assert_eq!(events.len(), 3);
    assert_eq!(events[0]["type"], "BookRegistered");
    assert_eq!(events[2]["type"], "MemberRegistered");
}
