//! # テンプレートレンダラー
//!
//! tera テンプレートエンジンで管理者宛ての通知メールを HTML/plaintext 両形式で生成する。
//!
//! ## 設計方針
//!
//! - **`include_str!` によるコンパイル時埋め込み**: テンプレートはバイナリに埋め込まれる
//! - **件名パターン**: `Contact Form: {subject} - from {name}`
//! - **エスケープ**: `.html` テンプレートは tera の自動エスケープが効く。
//!   本文だけは改行を `<br>` にするため、先にエスケープしてから `safe` で埋め込む

use chrono::{DateTime, Utc};
use contact_relay_domain::{
    Submission,
    notification::{EmailMessage, FORM_DISPLAY_NAME, MailRoute, NotificationError},
};
use tera::{Context, Tera};

const HTML_TEMPLATE: &str = "contact_submission.html";
const TEXT_TEMPLATE: &str = "contact_submission.txt";

/// テンプレートレンダラー
pub struct TemplateRenderer {
    engine: Tera,
}

impl TemplateRenderer {
    /// 新しいレンダラーインスタンスを作成
    pub fn new() -> Result<Self, NotificationError> {
        let mut engine = Tera::default();

        engine
            .add_raw_templates(vec![
                (
                    HTML_TEMPLATE,
                    include_str!("../../../templates/notifications/contact_submission.html"),
                ),
                (
                    TEXT_TEMPLATE,
                    include_str!("../../../templates/notifications/contact_submission.txt"),
                ),
            ])
            .map_err(|e| NotificationError::TemplateFailed(e.to_string()))?;

        Ok(Self { engine })
    }

    /// 問い合わせ内容から管理者宛てのメールを生成する
    ///
    /// # 引数
    ///
    /// - `submission`: 検証済みの問い合わせ
    /// - `route`: 差出人と宛先
    /// - `sent_at`: フッターに表示する送信時刻
    pub fn render(
        &self,
        submission: &Submission,
        route: &MailRoute,
        sent_at: DateTime<Utc>,
    ) -> Result<EmailMessage, NotificationError> {
        let mut context = Context::new();
        context.insert("name", submission.name());
        context.insert("email", submission.email());
        context.insert("subject", submission.subject());
        context.insert("message", submission.message());
        context.insert("message_html", &message_to_html(submission.message()));
        context.insert("sent_at", &sent_at.format("%Y-%m-%d %H:%M:%S").to_string());

        let html_body = self
            .engine
            .render(HTML_TEMPLATE, &context)
            .map_err(|e| NotificationError::TemplateFailed(e.to_string()))?;

        let text_body = self
            .engine
            .render(TEXT_TEMPLATE, &context)
            .map_err(|e| NotificationError::TemplateFailed(e.to_string()))?;

        Ok(EmailMessage {
            from_name: FORM_DISPLAY_NAME.to_string(),
            from_address: route.from_address.clone(),
            to: route.admin_address.clone(),
            reply_to: submission.email().to_string(),
            subject: format!(
                "Contact Form: {} - from {}",
                submission.subject(),
                submission.name()
            ),
            html_body,
            text_body,
        })
    }
}

/// 本文を HTML エスケープし、改行を `<br>` に置き換える
fn message_to_html(message: &str) -> String {
    tera::escape_html(message)
        .replace("\r\n", "<br>")
        .replace('\n', "<br>")
}
