//! # Contact Relay ドメイン層
//!
//! お問い合わせフォームの受付・通知・記録に関するドメインモデルを定義する。
//!
//! ## 設計方針
//!
//! - **純粋性**: 外部システム（SMTP、DynamoDB）には一切依存しない
//! - **検証済みの型**: [`submission::Submission`] は検証を通過した値しか表現しない
//! - **時刻の注入**: [`clock::Clock`] で現在時刻を差し替え可能にする
//!
//! ## 依存関係の方向
//!
//! ```text
//! service → infra → domain
//!    ↘
//!     shared
//! ```
//!
//! ## モジュール構成
//!
//! - [`submission`] - 受信ペイロードの検証と `Submission` の生成
//! - [`notification`] - 管理者宛て通知メールのモデルとエラー
//! - [`audit_record`] - 受付記録（監査ログ）エンティティ
//! - [`clock`] - 時刻プロバイダ
//!
//! ## 使用例
//!
//! ```rust
//! use contact_relay_domain::submission::{ContactField, Submission, SubmissionError};
//!
//! let submission = Submission::parse(Some(
//!     r#"{"name": " Alice ", "email": "alice@example.com", "message": "Hi"}"#,
//! ))
//! .unwrap();
//! assert_eq!(submission.name(), "Alice");
//! assert_eq!(submission.subject(), "General Inquiry");
//!
//! let error = Submission::parse(Some(r#"{"name": "Alice"}"#)).unwrap_err();
//! assert_eq!(error, SubmissionError::MissingField(ContactField::Email));
//! ```

pub mod audit_record;
pub mod clock;
pub mod notification;
pub mod submission;

pub use submission::{Submission, SubmissionError};
