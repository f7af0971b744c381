//! SMTP 通知送信実装
//!
//! lettre の `AsyncSmtpTransport` を使用してメールを送信する。
//! STARTTLS で接続し、差出人アドレスをユーザー名として AUTH する。
//! コネクションプールは持たないため、送信ごとに接続して QUIT で閉じる。

use async_trait::async_trait;
use contact_relay_domain::notification::{EmailMessage, NotificationError};
use lettre::{
    AsyncSmtpTransport,
    AsyncTransport,
    Tokio1Executor,
    message::{Mailbox, Message, MultiPart, SinglePart, header::ContentType},
    transport::smtp::authentication::Credentials,
};

use super::NotificationSender;

/// SMTP 通知送信
///
/// `lettre::AsyncSmtpTransport<Tokio1Executor>` をラップする。
pub struct SmtpNotificationSender {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpNotificationSender {
    /// 新しい SMTP 送信インスタンスを作成
    ///
    /// この時点では接続しない。
    ///
    /// # 引数
    ///
    /// - `host`: SMTP サーバーのホスト名（例: "smtp.gmail.com"）
    /// - `port`: SMTP サーバーのポート番号（通常 587）
    /// - `username`: 認証ユーザー（送信用アドレス）
    /// - `password`: 認証パスワード
    pub fn new(
        host: &str,
        port: u16,
        username: String,
        password: String,
    ) -> Result<Self, NotificationError> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
            .map_err(|e| NotificationError::Misconfigured(format!("SMTP ホスト不正: {e}")))?
            .port(port)
            .credentials(Credentials::new(username, password))
            .build();

        Ok(Self { transport })
    }
}

/// EmailMessage を lettre の Message に組み立てる
fn build_message(email: &EmailMessage) -> Result<Message, NotificationError> {
    let from = Mailbox::new(
        Some(email.from_name.clone()),
        email
            .from_address
            .parse()
            .map_err(|e| NotificationError::SendFailed(format!("送信元アドレス不正: {e}")))?,
    );
    let to: Mailbox = email
        .to
        .parse()
        .map_err(|e| NotificationError::SendFailed(format!("宛先アドレス不正: {e}")))?;
    let reply_to: Mailbox = email
        .reply_to
        .parse()
        .map_err(|e| NotificationError::SendFailed(format!("返信先アドレス不正: {e}")))?;

    Message::builder()
        .from(from)
        .to(to)
        .reply_to(reply_to)
        .subject(&email.subject)
        .multipart(
            MultiPart::alternative()
                .singlepart(
                    SinglePart::builder()
                        .header(ContentType::TEXT_PLAIN)
                        .body(email.text_body.clone()),
                )
                .singlepart(
                    SinglePart::builder()
                        .header(ContentType::TEXT_HTML)
                        .body(email.html_body.clone()),
                ),
        )
        .map_err(|e| NotificationError::SendFailed(format!("メッセージ構築失敗: {e}")))
}

#[async_trait]
impl NotificationSender for SmtpNotificationSender {
    #[tracing::instrument(skip_all, level = "debug")]
    async fn send_email(&self, email: &EmailMessage) -> Result<(), NotificationError> {
        let message = build_message(email)?;

        self.transport
            .send(message)
            .await
            .map_err(|e| NotificationError::SendFailed(format!("SMTP 送信失敗: {e}")))?;

        Ok(())
    }
}
