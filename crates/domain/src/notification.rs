//! # 通知
//!
//! 問い合わせを管理者へ転送するメール通知のドメインモデルを定義する。
//!
//! ## 設計方針
//!
//! - **送信元は固定のフォーム名義**: 差出人はシステムの送信用アドレスで、
//!   表示名は [`FORM_DISPLAY_NAME`]
//! - **返信先は問い合わせ者**: `Reply-To` に問い合わせ者のアドレスを入れ、
//!   管理者がそのまま返信できるようにする
//! - **テンプレート分離**: メール本文の生成は service 側の TemplateRenderer が担う

use thiserror::Error;

/// 通知メールの差出人表示名
pub const FORM_DISPLAY_NAME: &str = "Blog Contact Form";

/// 通知送信エラー
#[derive(Debug, Error)]
pub enum NotificationError {
    /// 送信に必要な設定が不足している（接続は試みない）
    #[error("SMTP 設定が不足しています: {0}")]
    Misconfigured(String),

    /// テンプレートレンダリングに失敗
    #[error("テンプレートレンダリングに失敗: {0}")]
    TemplateFailed(String),

    /// メール送信に失敗
    #[error("メール送信に失敗: {0}")]
    SendFailed(String),
}

/// 送信経路
///
/// 設定から解決された差出人アドレスと管理者アドレスの組。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailRoute {
    /// 差出人（SMTP 認証ユーザーと同じアドレス）
    pub from_address:  String,
    /// 宛先（管理者）
    pub admin_address: String,
}

/// メールメッセージ
///
/// テンプレートレンダリングの出力。NotificationSender に渡される。
#[derive(Debug, Clone)]
pub struct EmailMessage {
    /// 差出人の表示名
    pub from_name:    String,
    /// 差出人アドレス
    pub from_address: String,
    /// 送信先メールアドレス
    pub to:           String,
    /// 返信先（問い合わせ者のアドレス）
    pub reply_to:     String,
    /// 件名
    pub subject:      String,
    /// HTML 本文
    pub html_body:    String,
    /// プレーンテキスト本文
    pub text_body:    String,
}
