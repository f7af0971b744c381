//! # DynamoDB 接続管理
//!
//! 受付記録テーブルへの接続を管理する。
//!
//! ## 設計方針
//!
//! - **本番環境**: デフォルトの認証情報チェーン（IAM ロール等）で Amazon DynamoDB に接続
//! - **ローカル開発**: エンドポイントが指定されたら DynamoDB Local とみなし、ダミー認証情報を使う
//! - **テーブル自動作成**: DynamoDB Local 向けにのみ起動時に作成する（冪等）。
//!   本番のテーブルはインフラ定義側で管理する
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use contact_relay_infra::dynamodb;
//!
//! async fn setup() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = dynamodb::create_client(Some("http://localhost:18000")).await;
//!     dynamodb::ensure_submission_table(&client, "contact_submissions").await?;
//!     Ok(())
//! }
//! ```

use aws_config::{BehaviorVersion, meta::region::RegionProviderChain};
use aws_sdk_dynamodb::{
    Client,
    config::Credentials,
    types::{AttributeDefinition, BillingMode, KeySchemaElement, KeyType, ScalarAttributeType},
};

use crate::InfraError;

/// リージョンが解決できない場合のフォールバック（DynamoDB Local のみ）
const LOCAL_FALLBACK_REGION: &str = "us-east-1";

/// DynamoDB クライアントを作成する
///
/// # 引数
///
/// * `endpoint` - DynamoDB Local のエンドポイント URL（例: `http://localhost:18000`）。
///   `None` なら AWS 標準のエンドポイントと認証情報チェーンを使う
pub async fn create_client(endpoint: Option<&str>) -> Client {
    let loader = aws_config::defaults(BehaviorVersion::latest());

    let config = match endpoint {
        Some(endpoint) => {
            loader
                .endpoint_url(endpoint)
                .region(RegionProviderChain::default_provider().or_else(LOCAL_FALLBACK_REGION))
                // DynamoDB Local はクレデンシャルを検証しないが、SDK はプロバイダが必要
                .credentials_provider(Credentials::new("local", "local", None, None, "local"))
                .load()
                .await
        }
        None => loader.load().await,
    };

    Client::new(&config)
}

/// 受付記録テーブルが存在しなければ作成する（冪等）
///
/// テーブルスキーマ:
/// - PK: `id` (String) - `{unix_seconds}-{email}#{uuid}` 形式
///
/// その他の属性はスキーマレスに書き込む。
pub async fn ensure_submission_table(client: &Client, table_name: &str) -> Result<(), InfraError> {
    match client.describe_table().table_name(table_name).send().await {
        Ok(_) => {
            tracing::debug!("テーブル '{}' は既に存在します", table_name);
            return Ok(());
        }
        Err(err) => {
            let not_found = err
                .as_service_error()
                .map(|e| e.is_resource_not_found_exception())
                .unwrap_or(false);
            if !not_found {
                return Err(InfraError::dynamo_db(format!(
                    "テーブル '{table_name}' の確認に失敗: {err}"
                )));
            }
        }
    }

    tracing::info!("テーブル '{}' を作成します", table_name);

    let key_schema = KeySchemaElement::builder()
        .attribute_name("id")
        .key_type(KeyType::Hash)
        .build()
        .map_err(|e| InfraError::dynamo_db(format!("KeySchema 構築エラー: {e}")))?;
    let attribute = AttributeDefinition::builder()
        .attribute_name("id")
        .attribute_type(ScalarAttributeType::S)
        .build()
        .map_err(|e| InfraError::dynamo_db(format!("AttributeDefinition 構築エラー: {e}")))?;

    let created = client
        .create_table()
        .table_name(table_name)
        .key_schema(key_schema)
        .attribute_definitions(attribute)
        .billing_mode(BillingMode::PayPerRequest)
        .send()
        .await;

    if let Err(err) = created {
        // 並行起動時は作成中のテーブルと衝突しうる
        let in_use = err
            .as_service_error()
            .map(|e| e.is_resource_in_use_exception())
            .unwrap_or(false);
        if !in_use {
            return Err(InfraError::dynamo_db(format!(
                "テーブル '{table_name}' の作成に失敗: {err}"
            )));
        }
        tracing::debug!("テーブル '{}' は既に作成中または存在します", table_name);
        return Ok(());
    }

    tracing::info!("テーブル '{}' を作成しました", table_name);

    Ok(())
}
