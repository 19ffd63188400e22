#![allow(dead_code)]

use chrono::NaiveDate;
use lending_desk::adapters::mock::NotificationService as MockNotificationService;
use lending_desk::application::lending::{LendingDesk, ServiceDependencies};
use lending_desk::domain::{Book, LendingPolicy, Member};
use std::sync::Arc;

/// テスト用の基準日
pub fn loan_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
}

/// 書籍2冊・会員2名を登録済みの貸出窓口を作成する
///
/// - 123456 "Dom Casmurro" / 789012 "O Cortiço"
/// - U001 João Silva / U002 Maria Santos
pub fn seeded_desk() -> LendingDesk {
    let desk = LendingDesk::new(LendingPolicy::default());

    desk.register_book(Book::new("123456", "Dom Casmurro", "Machado de Assis", 1899))
        .unwrap();
    desk.register_book(Book::new("789012", "O Cortiço", "Aluísio Azevedo", 1890))
        .unwrap();
    desk.register_member(Member::new("U001", "João Silva", "joao@email.com"))
        .unwrap();
    desk.register_member(Member::new("U002", "Maria Santos", "maria@email.com"))
        .unwrap();

    desk
}

/// モック通知サービス付きの依存関係を作成する
pub fn seeded_deps() -> (ServiceDependencies, Arc<MockNotificationService>) {
    let notifications = Arc::new(MockNotificationService::new());
    let deps = ServiceDependencies {
        desk: Arc::new(seeded_desk()),
        notification_service: notifications.clone(),
    };
    (deps, notifications)
}
