//! # ユースケース層
//!
//! 問い合わせ 1 件の検証 → 通知 → 記録の流れを実装する。
//!
//! ## 設計方針
//!
//! - **依存性注入**: 送信手段とリポジトリを `Arc<dyn Trait>` で外部から注入
//! - **薄いハンドラ**: ハンドラは HTTP とプロキシ形式の変換だけを行い、ロジックはここに集約
//!
//! ## モジュール構成
//!
//! - `contact`: 受付処理全体とレスポンス組み立て
//! - `notification`: 通知メールの生成と送信
//! - `recorder`: 受付記録の書き込み

pub mod contact;
pub mod notification;
pub mod recorder;

pub use contact::{ContactOutcome, ContactUseCase};
pub use notification::{Mailer, NotificationService, TemplateRenderer};
pub use recorder::SubmissionRecorder;
