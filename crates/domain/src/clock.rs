//! # Clock（時刻プロバイダ）
//!
//! 完了時刻や受付記録のタイムスタンプを `Utc::now()` から切り離し、
//! テストで固定時刻を注入できるようにする。

use chrono::{DateTime, SecondsFormat, Utc};

/// 現在時刻を提供するトレイト
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// システム時刻
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// 固定時刻（テスト用）
pub struct FixedClock {
    now: DateTime<Utc>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self { now }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }
}

/// ISO 8601（UTC、マイクロ秒、`Z` 付き）の文字列にする
///
/// レスポンスの `timestamp` と受付記録の `timestamp` で同じ形式を使う。
pub fn to_iso8601(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}
