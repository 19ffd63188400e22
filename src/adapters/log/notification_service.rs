use crate::domain::value_objects::{Fine, MemberId};
use crate::ports::notification_service::{NotificationService as NotificationServiceTrait, Result};
use async_trait::async_trait;
use chrono::NaiveDate;

/// Log-backed implementation of NotificationService
///
/// Writes every notification as a structured `tracing` event instead of
/// delivering it. Used by the server until a real delivery channel exists.
#[derive(Debug, Default)]
pub struct NotificationService;

impl NotificationService {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl NotificationServiceTrait for NotificationService {
    async fn send_overdue_notification(
        &self,
        member_id: &MemberId,
        book_title: &str,
        due_date: NaiveDate,
    ) -> Result<()> {
        tracing::info!(%member_id, book_title, %due_date, "overdue notification");
        Ok(())
    }

    async fn send_return_confirmation(
        &self,
        member_id: &MemberId,
        book_title: &str,
        returned_on: NaiveDate,
    ) -> Result<()> {
        tracing::info!(%member_id, book_title, %returned_on, "return confirmation");
        Ok(())
    }

    async fn send_fine_notice(
        &self,
        member_id: &MemberId,
        book_title: &str,
        fine: Fine,
    ) -> Result<()> {
        tracing::info!(%member_id, book_title, fine = fine.amount(), "fine notice");
        Ok(())
    }
}
