//! # テスト用モック
//!
//! ユースケーステストで使用するインメモリのモック実装。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! contact-relay-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use contact_relay_domain::{
    audit_record::AuditRecord,
    notification::{EmailMessage, NotificationError},
};

use crate::{error::InfraError, notification::NotificationSender, repository::SubmissionRepository};

// ===== MockNotificationSender =====

/// 送信を試みたメールを記録するモック
///
/// `failing()` で作ると、記録したうえで `SendFailed` を返す。
#[derive(Clone, Default)]
pub struct MockNotificationSender {
    sent_emails: Arc<Mutex<Vec<EmailMessage>>>,
    fail:        bool,
}

impl MockNotificationSender {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn sent_emails(&self) -> Vec<EmailMessage> {
        self.sent_emails.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationSender for MockNotificationSender {
    async fn send_email(&self, email: &EmailMessage) -> Result<(), NotificationError> {
        self.sent_emails.lock().unwrap().push(email.clone());
        if self.fail {
            return Err(NotificationError::SendFailed(
                "SMTP サーバーに接続できません".to_string(),
            ));
        }
        Ok(())
    }
}

// ===== MockSubmissionRepository =====

#[derive(Clone, Default)]
pub struct MockSubmissionRepository {
    records: Arc<Mutex<Vec<AuditRecord>>>,
    fail:    bool,
}

impl MockSubmissionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// 書き込みが常に失敗するリポジトリ
    ///
    /// 試行した記録は `records()` に残したうえでエラーを返す。
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn records(&self) -> Vec<AuditRecord> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl SubmissionRepository for MockSubmissionRepository {
    async fn record(&self, record: &AuditRecord) -> Result<(), InfraError> {
        self.records.lock().unwrap().push(record.clone());
        if self.fail {
            return Err(InfraError::dynamo_db("ResourceNotFoundException"));
        }
        Ok(())
    }
}
