//! # 問い合わせ受付ユースケース
//!
//! 受信イベント 1 件を処理し、プロキシ形式のレスポンスを組み立てる。
//!
//! ## 処理順序
//!
//! ```text
//! プリフライト判定 → ボディ解析 → フィールド検証 → メール形式検証
//!   → 通知送信 →（成功時のみ）受付記録 → レスポンス
//! ```
//!
//! 各ステップは順に await し、並行実行しない。
//! 送信は 1 回、記録は高々 1 回。記録の成否はレスポンスに影響しない。

use std::sync::Arc;

use chrono::{DateTime, Utc};
use contact_relay_domain::{
    Submission,
    SubmissionError,
    clock::{Clock, to_iso8601},
};
use contact_relay_shared::{ProxyRequest, ProxyResponse, event_log::error};
use serde_json::json;

use super::{NotificationService, SubmissionRecorder};

/// プリフライトへの応答メッセージ
pub const PREFLIGHT_MESSAGE: &str = "CORS preflight";
/// 送信成功時のメッセージ
pub const DELIVERED_MESSAGE: &str = "Thank you! Your message has been sent successfully.";
/// 送信失敗時のメッセージ
pub const SEND_FAILED_MESSAGE: &str = "Failed to send email. Please try again.";
/// 予期しないエラー時のメッセージ
pub const UNEXPECTED_ERROR_MESSAGE: &str = "Internal server error";

/// レスポンスの組み立てに失敗した場合のボディ
const UNEXPECTED_ERROR_BODY: &str = r#"{"error":"Internal server error"}"#;

/// 1 件の処理結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactOutcome {
    /// CORS プリフライト（200）
    ReceivedPreflight,
    /// 入力検証エラー（400）
    ValidationFailed(SubmissionError),
    /// ボディが JSON オブジェクトでない（400）
    MalformedJson,
    /// 通知送信に失敗（500）
    SendFailed,
    /// 通知送信に成功（200）
    Delivered { completed_at: DateTime<Utc> },
    /// 予期しないエラー（500）
    UnexpectedError,
}

impl ContactOutcome {
    pub fn status_code(&self) -> u16 {
        match self {
            Self::ReceivedPreflight | Self::Delivered { .. } => 200,
            Self::ValidationFailed(_) | Self::MalformedJson => 400,
            Self::SendFailed | Self::UnexpectedError => 500,
        }
    }

    /// プロキシ形式のレスポンスに変換する
    pub fn into_response(self) -> ProxyResponse {
        let status_code = self.status_code();
        let body = match &self {
            Self::ReceivedPreflight => json!({ "message": PREFLIGHT_MESSAGE }),
            Self::ValidationFailed(reason) => json!({ "error": reason.to_string() }),
            Self::MalformedJson => json!({ "error": SubmissionError::MalformedBody.to_string() }),
            Self::SendFailed => json!({ "error": SEND_FAILED_MESSAGE }),
            Self::Delivered { completed_at } => json!({
                "message": DELIVERED_MESSAGE,
                "timestamp": to_iso8601(*completed_at),
            }),
            Self::UnexpectedError => json!({ "error": UNEXPECTED_ERROR_MESSAGE }),
        };

        ProxyResponse::json(status_code, &body).unwrap_or_else(|e| {
            tracing::error!(
                error.category = error::category::APPLICATION,
                error.kind = error::kind::INTERNAL,
                error = %e,
                "レスポンスのエンコードに失敗"
            );
            ProxyResponse::new(500, UNEXPECTED_ERROR_BODY)
        })
    }
}

/// 問い合わせ受付ユースケース
pub struct ContactUseCase {
    notification: NotificationService,
    recorder:     SubmissionRecorder,
    clock:        Arc<dyn Clock>,
}

impl ContactUseCase {
    pub fn new(
        notification: NotificationService,
        recorder: SubmissionRecorder,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            notification,
            recorder,
            clock,
        }
    }

    /// 受信イベントを処理してレスポンスを返す
    #[tracing::instrument(skip_all, fields(http_method = %request.http_method))]
    pub async fn handle(&self, request: &ProxyRequest) -> ProxyResponse {
        self.process(request).await.into_response()
    }

    /// 受信イベントを処理して結果を分類する
    pub async fn process(&self, request: &ProxyRequest) -> ContactOutcome {
        if request.is_preflight() {
            return ContactOutcome::ReceivedPreflight;
        }

        let submission = match Submission::parse(request.body.as_deref()) {
            Ok(submission) => submission,
            Err(SubmissionError::MalformedBody) => {
                tracing::info!("リクエストボディが JSON オブジェクトではありません");
                return ContactOutcome::MalformedJson;
            }
            Err(reason) => {
                tracing::info!(reason = %reason, "入力検証に失敗");
                return ContactOutcome::ValidationFailed(reason);
            }
        };

        if !self.notification.send(&submission).await {
            return ContactOutcome::SendFailed;
        }

        self.recorder.record(&submission).await;

        ContactOutcome::Delivered {
            completed_at: self.clock.now(),
        }
    }
}
