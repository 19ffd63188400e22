use crate::domain::value_objects::{Fine, MemberId};
use crate::ports::notification_service::{NotificationService as NotificationServiceTrait, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::{Mutex, PoisonError};

/// A notification captured by the mock
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    Overdue {
        member_id: MemberId,
        book_title: String,
        due_date: NaiveDate,
    },
    ReturnConfirmation {
        member_id: MemberId,
        book_title: String,
        returned_on: NaiveDate,
    },
    FineNotice {
        member_id: MemberId,
        book_title: String,
        fine: Fine,
    },
}

/// Mock implementation of NotificationService
///
/// Does not deliver anything. Every notification is recorded in order
/// so tests can assert on what would have been sent.
#[derive(Default)]
pub struct NotificationService {
    sent: Mutex<Vec<Notification>>,
}

impl NotificationService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Notifications recorded so far
    pub fn sent(&self) -> Vec<Notification> {
        self.sent.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn record(&self, notification: Notification) {
        self.sent.lock().unwrap_or_else(PoisonError::into_inner).push(notification);
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
        self.record(Notification::Overdue {
            member_id: member_id.clone(),
            book_title: book_title.to_string(),
            due_date,
        });
        Ok(())
    }

    async fn send_return_confirmation(
        &self,
        member_id: &MemberId,
        book_title: &str,
        returned_on: NaiveDate,
    ) -> Result<()> {
        self.record(Notification::ReturnConfirmation {
            member_id: member_id.clone(),
            book_title: book_title.to_string(),
            returned_on,
        });
        Ok(())
    }

    async fn send_fine_notice(
        &self,
        member_id: &MemberId,
        book_title: &str,
        fine: Fine,
    ) -> Result<()> {
        self.record(Notification::FineNotice {
            member_id: member_id.clone(),
            book_title: book_title.to_string(),
            fine,
        });
        Ok(())
    }
}
