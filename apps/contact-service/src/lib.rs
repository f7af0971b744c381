//! # Contact Service ライブラリ
//!
//! 問い合わせフォームの受付処理（検証 → 通知 → 記録）と、それを HTTP で公開する
//! ルーターを提供する。

pub mod config;
pub mod handler;
pub mod usecase;

use std::sync::Arc;

use axum::{
    Router,
    routing::{any, get, post},
};
use handler::{ContactState, contact, handle_panic, health_check, invoke};
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};
use usecase::ContactUseCase;

/// サービス名（ログの `service` フィールド）
pub const SERVICE_NAME: &str = "contact-service";

/// ルーターを構築する
pub fn build_router(usecase: ContactUseCase) -> Router {
    let state = Arc::new(ContactState { usecase });

    Router::new()
        .route("/contact", any(contact))
        .route("/invoke", post(invoke))
        .with_state(state)
        .route("/health", get(health_check))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
}
