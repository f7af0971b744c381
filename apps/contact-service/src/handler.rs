//! # ハンドラ層
//!
//! HTTP リクエストをプロキシ形式のイベントに変換してユースケースに渡し、
//! 結果を HTTP レスポンスに戻す。ハンドラ自身は振る舞いを持たない。

pub mod contact;
pub mod health;

pub use contact::{ContactState, contact, handle_panic, invoke};
pub use health::health_check;
