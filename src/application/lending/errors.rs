use thiserror::Error;

/// 貸出窓口アプリケーション層のエラー
///
/// 貸出拒否や「貸出中の記録なし」は業務上の結果であり、ここには含めない。
#[derive(Debug, Error)]
pub enum DeskError {
    /// 登録対象が存在しない、または空
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// NotificationServiceのエラー
    #[error("Notification service error")]
    NotificationError(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// アプリケーション層の Result型
pub type Result<T> = std::result::Result<T, DeskError>;
