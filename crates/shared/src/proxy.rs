//! # プロキシ統合形式のリクエスト／レスポンス
//!
//! API Gateway のプロキシ統合と同じ形のイベント（`httpMethod` + `body`）と
//! レスポンス（`statusCode` + `headers` + `body`）を表現する。
//!
//! ## 設計
//!
//! - HTTP サーバーの実装には依存しない（axum への変換は各サービスの責務）
//! - レスポンスは必ず CORS ヘッダーと `Content-Type: application/json` を持つ
//! - `body` は JSON エンコード済みの文字列

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// すべてのレスポンスに付与する CORS ヘッダー
pub const CORS_HEADERS: [(&str, &str); 3] = [
    ("Access-Control-Allow-Origin", "*"),
    ("Access-Control-Allow-Headers", "Content-Type"),
    ("Access-Control-Allow-Methods", "POST, OPTIONS"),
];

/// CORS プリフライトのメソッド
pub const PREFLIGHT_METHOD: &str = "OPTIONS";

/// 受信イベント
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyRequest {
    #[serde(default)]
    pub http_method: String,
    #[serde(default)]
    pub body:        Option<String>,
}

impl ProxyRequest {
    pub fn new(http_method: impl Into<String>, body: Option<String>) -> Self {
        Self {
            http_method: http_method.into(),
            body,
        }
    }

    /// CORS プリフライトかどうか
    pub fn is_preflight(&self) -> bool {
        self.http_method == PREFLIGHT_METHOD
    }
}

/// 送信レスポンス
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyResponse {
    pub status_code: u16,
    pub headers:     BTreeMap<String, String>,
    pub body:        String,
}

impl ProxyResponse {
    /// エンコード済みの JSON ボディからレスポンスを作る
    pub fn new(status_code: u16, body: impl Into<String>) -> Self {
        let mut headers: BTreeMap<String, String> = CORS_HEADERS
            .iter()
            .map(|(name, value)| ((*name).to_string(), (*value).to_string()))
            .collect();
        headers.insert("Content-Type".to_string(), "application/json".to_string());

        Self {
            status_code,
            headers,
            body: body.into(),
        }
    }

    /// 値を JSON エンコードしてレスポンスを作る
    pub fn json<T: Serialize>(status_code: u16, body: &T) -> Result<Self, serde_json::Error> {
        Ok(Self::new(status_code, serde_json::to_string(body)?))
    }
}
