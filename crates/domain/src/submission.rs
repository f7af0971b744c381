//! # 問い合わせ内容
//!
//! お問い合わせフォームから送られたリクエストボディを検証し、
//! [`Submission`] を生成する。
//!
//! ## 検証ルール
//!
//! 検証は以下の順で行い、最初に見つかった違反のみを報告する（fail-fast）:
//!
//! | 順序 | 条件 | エラー |
//! |-----|------|--------|
//! | 1 | ボディが存在しない | [`SubmissionError::MissingBody`] |
//! | 2 | JSON オブジェクトとして解釈できない | [`SubmissionError::MalformedBody`] |
//! | 3 | `name` → `email` → `message` が未指定・空白のみ | [`SubmissionError::MissingField`] |
//! | 3 | 上記フィールドが文字列以外 | [`SubmissionError::InvalidFieldType`] |
//! | 4 | `email` に `@` または `.` が含まれない | [`SubmissionError::InvalidEmail`] |
//! | 5 | `subject` が文字列以外（`null` は未指定扱い） | [`SubmissionError::InvalidFieldType`] |
//!
//! エラーの `Display` はそのままクライアントへ返すメッセージになる。

use serde_json::{Map, Value};
use strum::IntoStaticStr;
use thiserror::Error;

/// `subject` 未指定時の件名
pub const DEFAULT_SUBJECT: &str = "General Inquiry";

/// フォームのフィールド名
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoStaticStr, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum ContactField {
    Name,
    Email,
    Subject,
    Message,
}

impl ContactField {
    /// 必須フィールド（検証順）
    pub const REQUIRED: [Self; 3] = [Self::Name, Self::Email, Self::Message];

    /// JSON 上のキー名を返す
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// 入力検証エラー
///
/// いずれもクライアント起因のエラー（HTTP 400 相当）。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    /// リクエストボディが存在しない
    #[error("No request body provided")]
    MissingBody,

    /// ボディが JSON オブジェクトとしてデコードできない
    #[error("Invalid JSON in request body")]
    MalformedBody,

    /// 必須フィールドが未指定または空白のみ
    #[error("{0} is required")]
    MissingField(ContactField),

    /// フィールドの値が文字列ではない
    #[error("{0} must be a string")]
    InvalidFieldType(ContactField),

    /// メールアドレスの形式が不正
    #[error("Invalid email format")]
    InvalidEmail,
}

/// 検証済みの問い合わせ内容
///
/// # 不変条件
///
/// - `name` / `email` / `message` はトリム済みで空でない
/// - `email` は `@` と `.` を含む
/// - `subject` は未指定なら [`DEFAULT_SUBJECT`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    name:    String,
    email:   String,
    subject: String,
    message: String,
}

impl Submission {
    /// 生のリクエストボディから問い合わせ内容を生成する
    pub fn parse(body: Option<&str>) -> Result<Self, SubmissionError> {
        let body = body.ok_or(SubmissionError::MissingBody)?;
        let fields: Map<String, Value> =
            serde_json::from_str(body).map_err(|_| SubmissionError::MalformedBody)?;

        Self::from_fields(&fields)
    }

    /// デコード済みのフィールドから問い合わせ内容を生成する
    pub fn from_fields(fields: &Map<String, Value>) -> Result<Self, SubmissionError> {
        let [name, email, message] = ContactField::REQUIRED;
        let name = required_text(fields, name)?;
        let email = required_text(fields, email)?;
        let message = required_text(fields, message)?;

        if !is_plausible_email(&email) {
            return Err(SubmissionError::InvalidEmail);
        }

        let subject = match fields.get(ContactField::Subject.as_str()) {
            None | Some(Value::Null) => DEFAULT_SUBJECT.to_string(),
            Some(Value::String(subject)) => subject.clone(),
            Some(_) => return Err(SubmissionError::InvalidFieldType(ContactField::Subject)),
        };

        Ok(Self {
            name,
            email,
            subject,
            message,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// 必須フィールドを取り出してトリムする
fn required_text(
    fields: &Map<String, Value>,
    field: ContactField,
) -> Result<String, SubmissionError> {
    match fields.get(field.as_str()) {
        None | Some(Value::Null) => Err(SubmissionError::MissingField(field)),
        Some(Value::String(value)) => {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                return Err(SubmissionError::MissingField(field));
            }
            Ok(trimmed.to_string())
        }
        Some(_) => Err(SubmissionError::InvalidFieldType(field)),
    }
}

/// 最小限の形式チェック（`@` と `.` を含むか）
fn is_plausible_email(email: &str) -> bool {
    email.contains('@') && email.contains('.')
}
