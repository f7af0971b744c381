//! # 受付記録
//!
//! 送信に成功した問い合わせを追跡用に残す監査レコード。
//!
//! ## 設計方針
//!
//! - **不変性**: 一度作成したら変更しない
//! - **ID 形式**: `{unix_seconds}-{email}#{uuid_v7}`。同一アドレスから同一秒に
//!   複数件届いても UUID サフィックスで衝突しない
//! - **固定値**: `status` は常に `received`、`source` は常に [`SOURCE_TAG`]

use chrono::{DateTime, Utc};
use strum::IntoStaticStr;
use uuid::Uuid;

use crate::{clock::to_iso8601, submission::Submission};

/// 記録元を示すタグ
pub const SOURCE_TAG: &str = "contact-relay";

/// 受付ステータス
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoStaticStr, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum SubmissionStatus {
    /// 受付済み（通知送信に成功した）
    Received,
}

/// 受付記録エンティティ
#[derive(Debug, Clone)]
pub struct AuditRecord {
    pub id:        String,
    pub timestamp: DateTime<Utc>,
    pub name:      String,
    pub email:     String,
    pub subject:   String,
    pub message:   String,
    pub status:    SubmissionStatus,
    pub source:    &'static str,
}

impl AuditRecord {
    /// 受付済みの記録を作成する
    pub fn received(submission: &Submission, now: DateTime<Utc>) -> Self {
        let id = format!(
            "{}-{}#{}",
            now.timestamp(),
            submission.email(),
            Uuid::now_v7()
        );

        Self {
            id,
            timestamp: now,
            name: submission.name().to_string(),
            email: submission.email().to_string(),
            subject: submission.subject().to_string(),
            message: submission.message().to_string(),
            status: SubmissionStatus::Received,
            source: SOURCE_TAG,
        }
    }

    /// ストアに書き込む `timestamp` 属性の値
    pub fn timestamp_iso8601(&self) -> String {
        to_iso8601(self.timestamp)
    }
}
