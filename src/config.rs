use chrono::TimeDelta;
use thiserror::Error;

use crate::domain::LendingPolicy;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_LOG_FILTER: &str = "lending_desk=debug,tower_http=debug";

/// 設定読み込みのエラー
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{key} must be a valid number, got {value:?}")]
    InvalidNumber { key: &'static str, value: String },

    #[error("{key} must be positive, got {value}")]
    NotPositive { key: &'static str, value: String },

    #[error("{key} is out of range, got {value}")]
    OutOfRange { key: &'static str, value: String },
}

/// アプリケーション設定
///
/// 環境変数から読み込む。未設定の項目は既定値になる。
/// - `PORT`: 待ち受けポート（既定 3000）
/// - `LOAN_PERIOD_DAYS`: 貸出期間（既定 14）
/// - `FINE_PER_DAY`: 1日あたりの延滞料金（既定 2.0）
/// - `RUST_LOG`: ログフィルタ
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub port: u16,
    pub policy: LendingPolicy,
    pub log_filter: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 任意のキー検索関数から設定を組み立てる
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = LendingPolicy::default();

        let port = parse_or(&lookup, "PORT", DEFAULT_PORT)?;
        let loan_period_days = parse_or(&lookup, "LOAN_PERIOD_DAYS", defaults.loan_period_days)?;
        if loan_period_days <= 0 {
            return Err(ConfigError::NotPositive {
                key: "LOAN_PERIOD_DAYS",
                value: loan_period_days.to_string(),
            });
        }
        if TimeDelta::try_days(loan_period_days).is_none() {
            return Err(ConfigError::OutOfRange {
                key: "LOAN_PERIOD_DAYS",
                value: loan_period_days.to_string(),
            });
        }

        let fine_per_day = parse_or(&lookup, "FINE_PER_DAY", defaults.fine_per_day)?;
        if fine_per_day.is_nan() || fine_per_day <= 0.0 {
            return Err(ConfigError::NotPositive {
                key: "FINE_PER_DAY",
                value: fine_per_day.to_string(),
            });
        }

        let log_filter = lookup("RUST_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Ok(Self {
            port,
            policy: LendingPolicy {
                loan_period_days,
                fine_per_day,
            },
            log_filter,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidNumber { key, value }),
        None => Ok(default),
    }
}
