//! # 通知送信
//!
//! メール通知の送信を担当するインフラストラクチャモジュール。
//!
//! ## 設計方針
//!
//! - **trait による抽象化**: `NotificationSender` trait でメール送信を抽象化
//! - **実装は SMTP のみ**: STARTTLS + AUTH で SMTP リレーに 1 通ずつ送る
//! - **テスト**: `test-utils` feature の `MockNotificationSender` に差し替える

mod smtp;

use async_trait::async_trait;
use contact_relay_domain::notification::{EmailMessage, NotificationError};
pub use smtp::SmtpNotificationSender;

/// メール送信トレイト
#[async_trait]
pub trait NotificationSender: Send + Sync {
    /// メールを 1 回だけ送信する（リトライしない）
    async fn send_email(&self, email: &EmailMessage) -> Result<(), NotificationError>;
}
