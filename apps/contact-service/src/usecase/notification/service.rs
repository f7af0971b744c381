//! # 通知サービス
//!
//! テンプレートレンダリング → メール送信 → ログ記録を統合するサービス。
//!
//! ## 設計方針
//!
//! - **結果は bool**: `send()` はどのステップで失敗しても `false` を返すだけで、
//!   エラーを呼び出し元に伝播しない（原因はログに残す）
//! - **1 回だけ試行**: リトライしない
//! - **設定不足**: 起動時に送信経路が解決できなかった場合は接続を試みずに失敗する

use std::sync::Arc;

use contact_relay_domain::{Submission, clock::Clock, notification::MailRoute};
use contact_relay_infra::notification::NotificationSender;
use contact_relay_shared::{
    event_log::{error, event},
    log_business_event,
};

use super::TemplateRenderer;

/// 送信手段と送信経路の組
pub struct Mailer {
    sender: Arc<dyn NotificationSender>,
    route:  MailRoute,
}

impl Mailer {
    pub fn new(sender: Arc<dyn NotificationSender>, route: MailRoute) -> Self {
        Self { sender, route }
    }
}

/// 通知サービス
pub struct NotificationService {
    mailer:            Option<Mailer>,
    template_renderer: TemplateRenderer,
    clock:             Arc<dyn Clock>,
}

impl NotificationService {
    /// `mailer` が `None` の場合、すべての送信が失敗する
    pub fn new(
        mailer: Option<Mailer>,
        template_renderer: TemplateRenderer,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            mailer,
            template_renderer,
            clock,
        }
    }

    /// 問い合わせを管理者へメールで転送する
    ///
    /// 送信が確認できたら `true`、それ以外はすべて `false`。
    pub async fn send(&self, submission: &Submission) -> bool {
        let Some(mailer) = &self.mailer else {
            tracing::error!(
                error.category = error::category::APPLICATION,
                error.kind = error::kind::CONFIGURATION,
                "SMTP 設定が不足しているため通知メールを送信できません"
            );
            log_send_failed(submission, "SMTP 設定が不足しています");
            return false;
        };

        let email =
            match self
                .template_renderer
                .render(submission, &mailer.route, self.clock.now())
            {
                Ok(email) => email,
                Err(e) => {
                    tracing::error!(
                        error.category = error::category::APPLICATION,
                        error.kind = error::kind::TEMPLATE,
                        error = %e,
                        "通知テンプレートのレンダリングに失敗"
                    );
                    log_send_failed(submission, &e.to_string());
                    return false;
                }
            };

        match mailer.sender.send_email(&email).await {
            Ok(()) => {
                log_business_event!(
                    event.category = event::category::CONTACT,
                    event.action = event::action::CONTACT_DELIVERED,
                    event.entity_type = event::entity_type::SUBMISSION,
                    event.result = event::result::SUCCESS,
                    contact.reply_to = %submission.email(),
                    contact.subject = %submission.subject(),
                    "通知メール送信成功"
                );
                true
            }
            Err(e) => {
                tracing::error!(
                    error.category = error::category::EXTERNAL_SERVICE,
                    error.kind = error::kind::SMTP,
                    error = %e,
                    "通知メールの送信に失敗"
                );
                log_send_failed(submission, &e.to_string());
                false
            }
        }
    }
}

fn log_send_failed(submission: &Submission, reason: &str) {
    log_business_event!(
        event.category = event::category::CONTACT,
        event.action = event::action::CONTACT_SEND_FAILED,
        event.entity_type = event::entity_type::SUBMISSION,
        event.result = event::result::FAILURE,
        contact.reply_to = %submission.email(),
        error = reason,
        "通知メール送信失敗"
    );
}
