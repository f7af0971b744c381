//! # Contact Relay インフラ層
//!
//! 外部システム（SMTP サーバー、DynamoDB）との接続・通信を担当する。
//!
//! ## 設計方針
//!
//! 外部システムの詳細をトレイトの背後にカプセル化し、service 層からは
//! [`notification::NotificationSender`] と [`repository::SubmissionRepository`]
//! だけが見えるようにする。テストではモック実装（`test-utils` feature）に差し替える。
//!
//! ## 依存関係
//!
//! ```text
//! service → infra → domain
//! ```
//!
//! ## モジュール構成
//!
//! - [`notification`] - メール送信（lettre SMTP）
//! - [`dynamodb`] - DynamoDB クライアント作成とテーブル準備
//! - [`repository`] - 受付記録の永続化
//! - [`error`] - インフラ層エラー定義

pub mod dynamodb;
pub mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod notification;
pub mod repository;

pub use error::{InfraError, InfraErrorKind};
