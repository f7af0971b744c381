//! # 通知ユースケース
//!
//! 問い合わせ内容を管理者宛てのメールに組み立てて送信する。

mod service;
mod template_renderer;

pub use service::{Mailer, NotificationService};
pub use template_renderer::TemplateRenderer;
