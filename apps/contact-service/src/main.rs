//! # Contact Service サーバー
//!
//! お問い合わせフォームの送信を受け付け、管理者へメールで転送する。
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `CONTACT_HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `CONTACT_PORT` | No | ポート番号（デフォルト: `3000`） |
//! | `SMTP_SERVER` | 送信時 | SMTP ホスト |
//! | `SMTP_PORT` | No | SMTP ポート（デフォルト: `587`） |
//! | `SENDER_EMAIL` | 送信時 | 差出人アドレス兼 SMTP ユーザー |
//! | `SENDER_PASSWORD` | 送信時 | SMTP パスワード |
//! | `ADMIN_EMAIL` | No | 宛先（デフォルト: `SENDER_EMAIL`） |
//! | `CONTACT_TABLE_NAME` | No | 受付記録テーブル（未設定なら記録しない） |
//! | `DYNAMODB_ENDPOINT` | No | DynamoDB Local のエンドポイント |
//! | `LOG_FORMAT` | No | `json` または `pretty` |
//!
//! ## 起動方法
//!
//! ```bash
//! cargo run -p contact-relay-service
//! ```

use std::sync::Arc;

use contact_relay_domain::clock::{Clock, SystemClock};
use contact_relay_infra::{
    dynamodb,
    notification::SmtpNotificationSender,
    repository::{DynamoDbSubmissionRepository, SubmissionRepository},
};
use contact_relay_service::{
    SERVICE_NAME,
    build_router,
    config::{AuditConfig, ContactConfig, SmtpConfig},
    usecase::{ContactUseCase, Mailer, NotificationService, SubmissionRecorder, TemplateRenderer},
};
use contact_relay_shared::{
    event_log::error,
    observability::{self, TracingConfig},
};
use tokio::net::TcpListener;
use tracing::Instrument as _;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    observability::init_tracing(&TracingConfig::from_env(SERVICE_NAME));

    let config = ContactConfig::from_env()?;

    run(config)
        .instrument(tracing::info_span!("app", service = SERVICE_NAME))
        .await
}

async fn run(config: ContactConfig) -> anyhow::Result<()> {
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let notification =
        NotificationService::new(build_mailer(&config.smtp), TemplateRenderer::new()?, clock.clone());
    let recorder = SubmissionRecorder::new(build_repository(&config.audit).await, clock.clone());
    let app = build_router(ContactUseCase::new(notification, recorder, clock));

    let listener = TcpListener::bind((config.host.as_str(), config.port)).await?;
    tracing::info!(
        "Contact Service サーバーを起動します: {}",
        listener.local_addr()?
    );

    axum::serve(listener, app).await?;

    Ok(())
}

/// SMTP 設定から送信手段を作る
///
/// 設定が不足していても起動は続ける（送信のたびに失敗する）。
fn build_mailer(config: &SmtpConfig) -> Option<Mailer> {
    let settings = match config.resolve() {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!(
                error.category = error::category::APPLICATION,
                error.kind = error::kind::CONFIGURATION,
                error = %e,
                "通知メールは送信されません"
            );
            return None;
        }
    };

    match SmtpNotificationSender::new(
        &settings.host,
        settings.port,
        settings.route.from_address.clone(),
        settings.password.clone(),
    ) {
        Ok(sender) => {
            tracing::info!(host = %settings.host, port = settings.port, "SMTP 送信を設定しました");
            Some(Mailer::new(Arc::new(sender), settings.route))
        }
        Err(e) => {
            tracing::warn!(
                error.category = error::category::APPLICATION,
                error.kind = error::kind::CONFIGURATION,
                error = %e,
                "通知メールは送信されません"
            );
            None
        }
    }
}

/// 受付記録のリポジトリを作る
///
/// テーブル名が未設定なら記録しない。DynamoDB Local を使う場合はテーブルを作成する。
async fn build_repository(config: &AuditConfig) -> Option<Arc<dyn SubmissionRepository>> {
    let table_name = config.table_name.clone()?;
    let client = dynamodb::create_client(config.dynamodb_endpoint.as_deref()).await;

    if config.dynamodb_endpoint.is_some()
        && let Err(e) = dynamodb::ensure_submission_table(&client, &table_name).await
    {
        tracing::warn!(
            error.category = error::category::INFRASTRUCTURE,
            error.kind = error::kind::DYNAMODB,
            error = %e,
            "受付記録テーブルを準備できませんでした"
        );
    }

    tracing::info!(table = %table_name, "受付記録を有効にしました");
    Some(Arc::new(DynamoDbSubmissionRepository::new(client, table_name)))
}
