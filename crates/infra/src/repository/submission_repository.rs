//! # SubmissionRepository
//!
//! 受付記録の永続化を担当するリポジトリ。
//!
//! ## 設計方針
//!
//! - **DynamoDB**: 1 件の問い合わせを 1 アイテムとして `PutItem` で書き込む
//! - **追記のみ**: 読み出し・更新・削除は提供しない
//! - **属性はすべて文字列**: `timestamp` も ISO 8601 文字列で格納する

use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::{Client, types::AttributeValue};
use contact_relay_domain::audit_record::AuditRecord;

use crate::InfraError;

/// 受付記録リポジトリトレイト
#[async_trait]
pub trait SubmissionRepository: Send + Sync {
    /// 受付記録を 1 件書き込む
    async fn record(&self, record: &AuditRecord) -> Result<(), InfraError>;
}

/// DynamoDB 実装の SubmissionRepository
pub struct DynamoDbSubmissionRepository {
    client:     Client,
    table_name: String,
}

impl DynamoDbSubmissionRepository {
    pub fn new(client: Client, table_name: String) -> Self {
        Self { client, table_name }
    }
}

/// 受付記録を DynamoDB のアイテムに変換する
pub(crate) fn to_item(record: &AuditRecord) -> HashMap<String, AttributeValue> {
    let status: &'static str = record.status.into();

    HashMap::from([
        ("id".to_string(), AttributeValue::S(record.id.clone())),
        (
            "timestamp".to_string(),
            AttributeValue::S(record.timestamp_iso8601()),
        ),
        ("name".to_string(), AttributeValue::S(record.name.clone())),
        ("email".to_string(), AttributeValue::S(record.email.clone())),
        (
            "subject".to_string(),
            AttributeValue::S(record.subject.clone()),
        ),
        (
            "message".to_string(),
            AttributeValue::S(record.message.clone()),
        ),
        ("status".to_string(), AttributeValue::S(status.to_string())),
        (
            "source".to_string(),
            AttributeValue::S(record.source.to_string()),
        ),
    ])
}

#[async_trait]
impl SubmissionRepository for DynamoDbSubmissionRepository {
    #[tracing::instrument(skip_all, level = "debug", fields(table = %self.table_name))]
    async fn record(&self, record: &AuditRecord) -> Result<(), InfraError> {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(to_item(record)))
            .send()
            .await
            .map_err(|e| InfraError::dynamo_db(format!("受付記録の書き込みに失敗: {e}")))?;

        Ok(())
    }
}
