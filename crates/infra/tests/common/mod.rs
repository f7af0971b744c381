//! 統合テスト共通ヘルパー

/// テスト用の DynamoDB エンドポイント
///
/// 優先順位:
/// 1. `DYNAMODB_ENDPOINT`
/// 2. `DYNAMODB_PORT` から構築
/// 3. フォールバック: `http://localhost:18000`
pub fn dynamodb_endpoint() -> String {
    std::env::var("DYNAMODB_ENDPOINT").unwrap_or_else(|_| {
        let port = std::env::var("DYNAMODB_PORT").unwrap_or_else(|_| "18000".to_string());
        format!("http://localhost:{port}")
    })
}

/// 他テストと競合しないテーブル名
pub fn unique_table_name() -> String {
    format!("test_contact_submissions_{}", uuid::Uuid::now_v7())
}
