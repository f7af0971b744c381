//! # ビジネスイベントログとエラーコンテキストの構造化ヘルパー
//!
//! 運用時に `jq` で効率よく調査できるよう、ログフィールドの命名規約と
//! ヘルパーマクロを提供する。
//!
//! ## ビジネスイベント
//!
//! [`log_business_event!`] マクロで出力する。`event.kind = "business_event"` マーカーが
//! 自動付与され、`jq 'select(.["event.kind"] == "business_event")'` でフィルタできる。
//!
//! ## エラーコンテキスト
//!
//! `tracing::error!` / `tracing::warn!` に `error.category` + `error.kind` フィールドを
//! 直接追加する。定数は [`error`] モジュールで提供。
//!
//! ## フィールド命名規約
//!
//! ドット記法（`event.category`、`error.kind`）を使用する。JSON 出力ではフラットなキーになる。

/// ビジネスイベントを構造化ログとして出力する。
///
/// `event.kind = "business_event"` マーカーを自動付与し、
/// `tracing::info!` レベルで出力する。
///
/// ## 必須フィールド（慣例）
///
/// - `event.category`: イベントカテゴリ（[`event::category`] の定数を使用）
/// - `event.action`: アクション名（[`event::action`] の定数を使用）
/// - `event.result`: 結果（[`event::result`] の定数を使用）
///
/// ## 推奨フィールド
///
/// - `event.entity_type`: エンティティ種別（[`event::entity_type`] の定数を使用）
/// - `event.entity_id`: エンティティ ID
#[macro_export]
macro_rules! log_business_event {
    ($($args:tt)*) => {
        ::tracing::info!(
            event.kind = "business_event",
            $($args)*
        )
    };
}

/// イベントフィールドの定数
pub mod event {
    /// イベントカテゴリ
    pub mod category {
        pub const CONTACT: &str = "contact";
    }

    /// イベントアクション
    pub mod action {
        pub const CONTACT_DELIVERED: &str = "contact.delivered";
        pub const CONTACT_SEND_FAILED: &str = "contact.send_failed";
        pub const CONTACT_RECORDED: &str = "contact.recorded";
        pub const CONTACT_RECORD_FAILED: &str = "contact.record_failed";
    }

    /// エンティティ種別
    pub mod entity_type {
        pub const SUBMISSION: &str = "submission";
        pub const AUDIT_RECORD: &str = "audit_record";
    }

    /// イベント結果
    pub mod result {
        pub const SUCCESS: &str = "success";
        pub const FAILURE: &str = "failure";
    }
}

/// エラーコンテキストフィールドの定数
pub mod error {
    /// エラーカテゴリ
    pub mod category {
        /// インフラストラクチャ（DynamoDB）
        pub const INFRASTRUCTURE: &str = "infrastructure";
        /// 外部サービス呼び出し（SMTP サーバー）
        pub const EXTERNAL_SERVICE: &str = "external_service";
        /// サービス自身の設定・内部処理
        pub const APPLICATION: &str = "application";
    }

    /// エラー種別
    pub mod kind {
        pub const SMTP: &str = "smtp";
        pub const DYNAMODB: &str = "dynamodb";
        pub const CONFIGURATION: &str = "configuration";
        pub const TEMPLATE: &str = "template";
        pub const INTERNAL: &str = "internal";
    }
}
