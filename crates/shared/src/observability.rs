//! # ログ出力の初期化
//!
//! contact-service の tracing subscriber を組み立てる。
//!
//! - `LOG_FORMAT=json`: 1 行 1 JSON。`contact.delivered` / `contact.record_failed` などの
//!   業務イベントは `event.action` フィールドで絞り込める
//!   （例: `jq 'select(."event.action" | startswith("contact."))'`）
//! - それ以外: ローカル確認用の Pretty 出力
//!
//! どちらの形式でも `ErrorLayer` を積むので、受付記録の書き込み失敗ログに
//! 失敗時点のスパン（テーブル名など）が `span_trace` として載る。

/// `RUST_LOG` 未設定時のフィルタ
///
/// 依存クレート（AWS SDK, lettre）は info 以上、本サービスのクレートは debug 以上を出す。
pub const DEFAULT_LOG_FILTER: &str = "info,contact_relay=debug";

/// 出力形式を選ぶ環境変数
pub const LOG_FORMAT_VAR: &str = "LOG_FORMAT";

/// ログ出力形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// 集約基盤に流す JSON Lines
    Json,
    #[default]
    Pretty,
}

impl LogFormat {
    /// `"json"` / `"pretty"` を読む。それ以外は警告して Pretty
    ///
    /// subscriber の初期化前に呼ばれるので警告は `eprintln!` で出す。
    pub fn parse(s: &str) -> Self {
        match s {
            "json" => Self::Json,
            "pretty" => Self::Pretty,
            other => {
                eprintln!("WARNING: unknown {LOG_FORMAT_VAR}={other:?}, falling back to pretty");
                Self::Pretty
            }
        }
    }

    /// 環境変数の値（未設定なら `None`）から形式を決める
    pub fn from_value(value: Option<&str>) -> Self {
        value.map(Self::parse).unwrap_or_default()
    }

    pub fn from_env() -> Self {
        Self::from_value(std::env::var(LOG_FORMAT_VAR).ok().as_deref())
    }
}

/// subscriber の初期化設定
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// 初期化完了ログに出すサービス名
    pub service_name: String,
    pub log_format:   LogFormat,
}

impl TracingConfig {
    pub fn new(service_name: impl Into<String>, log_format: LogFormat) -> Self {
        Self {
            service_name: service_name.into(),
            log_format,
        }
    }

    pub fn from_env(service_name: impl Into<String>) -> Self {
        Self::new(service_name, LogFormat::from_env())
    }
}

#[cfg(feature = "observability")]
fn fmt_layer<S>(format: LogFormat) -> Box<dyn tracing_subscriber::Layer<S> + Send + Sync>
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    use tracing_subscriber::Layer as _;

    match format {
        // 業務イベントのフィールドをトップレベルに出し、jq でそのまま引けるようにする
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_target(true)
            .with_current_span(true)
            .with_span_list(false)
            .boxed(),
        LogFormat::Pretty => tracing_subscriber::fmt::layer().boxed(),
    }
}

/// グローバル subscriber を登録する
///
/// プロセスで 1 回だけ呼ぶ。`RUST_LOG` があればそれを、なければ
/// [`DEFAULT_LOG_FILTER`] を使う。
#[cfg(feature = "observability")]
pub fn init_tracing(config: &TracingConfig) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer(config.log_format))
        .with(tracing_error::ErrorLayer::default())
        .init();

    tracing::debug!(
        service = %config.service_name,
        log_format = ?config.log_format,
        "トレーシングを初期化しました"
    );
}
