//! # Contact Service 設定
//!
//! 環境変数から Contact Service の設定を起動時に一度だけ読み込む。
//! リクエストごとに環境変数を参照することはない。
//!
//! SMTP 設定の不足は起動エラーにしない。サービスは起動し、送信のたびに失敗を返す。
//! ポート番号が数値として不正な場合のみ [`ConfigError`] で起動を中止する。

use std::env;

use contact_relay_domain::notification::{MailRoute, NotificationError};
use thiserror::Error;

/// SMTP ポートのデフォルト（STARTTLS submission）
pub const DEFAULT_SMTP_PORT: u16 = 587;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;

/// 設定読み込みエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} は有効なポート番号である必要があります: {value:?}")]
    InvalidPort { var: &'static str, value: String },
}

/// Contact Service の設定
#[derive(Debug, Clone)]
pub struct ContactConfig {
    /// バインドアドレス
    pub host:  String,
    /// ポート番号
    pub port:  u16,
    /// 通知メールの送信設定
    pub smtp:  SmtpConfig,
    /// 受付記録の設定
    pub audit: AuditConfig,
}

/// SMTP 送信設定（未解決）
///
/// 値は欠けていてもよい。送信に使えるかどうかは [`SmtpConfig::resolve`] で判定する。
#[derive(Debug, Clone, Default)]
pub struct SmtpConfig {
    pub server:          Option<String>,
    pub port:            u16,
    pub sender_email:    Option<String>,
    pub sender_password: Option<String>,
    pub admin_email:     Option<String>,
}

/// 送信に必要な値がそろった SMTP 設定
#[derive(Clone, PartialEq, Eq)]
pub struct SmtpSettings {
    pub host:     String,
    pub port:     u16,
    pub password: String,
    pub route:    MailRoute,
}

impl std::fmt::Debug for SmtpSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("password", &"***")
            .field("route", &self.route)
            .finish()
    }
}

/// 受付記録の設定
#[derive(Debug, Clone, Default)]
pub struct AuditConfig {
    /// 記録先テーブル名（未設定なら記録しない）
    pub table_name:        Option<String>,
    /// DynamoDB Local のエンドポイント
    pub dynamodb_endpoint: Option<String>,
}

impl ContactConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 任意のキー参照関数から設定を読み込む
    ///
    /// 空文字列は未設定として扱う。
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        Ok(Self {
            host:  get("CONTACT_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port:  parse_port("CONTACT_PORT", get("CONTACT_PORT"), DEFAULT_PORT)?,
            smtp:  SmtpConfig {
                server:          get("SMTP_SERVER"),
                port:            parse_port("SMTP_PORT", get("SMTP_PORT"), DEFAULT_SMTP_PORT)?,
                sender_email:    get("SENDER_EMAIL"),
                sender_password: get("SENDER_PASSWORD"),
                admin_email:     get("ADMIN_EMAIL"),
            },
            audit: AuditConfig {
                table_name:        get("CONTACT_TABLE_NAME"),
                dynamodb_endpoint: get("DYNAMODB_ENDPOINT"),
            },
        })
    }
}

fn parse_port(var: &'static str, value: Option<String>, default: u16) -> Result<u16, ConfigError> {
    match value {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidPort { var, value }),
    }
}

impl SmtpConfig {
    /// 送信に必要な値がそろっているか確認する
    ///
    /// `SMTP_SERVER` / `SENDER_EMAIL` / `SENDER_PASSWORD` のいずれかが欠けていれば
    /// 不足している変数名を列挙した `Misconfigured` を返す。
    /// 宛先は `ADMIN_EMAIL`、未設定なら差出人アドレス。
    pub fn resolve(&self) -> Result<SmtpSettings, NotificationError> {
        let missing: Vec<&str> = [
            ("SMTP_SERVER", &self.server),
            ("SENDER_EMAIL", &self.sender_email),
            ("SENDER_PASSWORD", &self.sender_password),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_none())
        .map(|(name, _)| name)
        .collect();

        let (Some(host), Some(from_address), Some(password)) = (
            self.server.clone(),
            self.sender_email.clone(),
            self.sender_password.clone(),
        ) else {
            return Err(NotificationError::Misconfigured(missing.join(", ")));
        };

        let admin_address = self
            .admin_email
            .clone()
            .unwrap_or_else(|| from_address.clone());

        Ok(SmtpSettings {
            host,
            port: self.port,
            password,
            route: MailRoute {
                from_address,
                admin_address,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<ContactConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        ContactConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_未設定ならデフォルト値になる() {
        let config = load(&[]).unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert_eq!(config.smtp.port, 587);
        assert_eq!(config.smtp.server, None);
        assert_eq!(config.audit.table_name, None);
    }

    #[test]
    fn test_環境変数の値が読み込まれる() {
        let config = load(&[
            ("CONTACT_PORT", "8080"),
            ("SMTP_SERVER", "smtp.example.com"),
            ("SMTP_PORT", "2525"),
            ("SENDER_EMAIL", "sender@example.com"),
            ("SENDER_PASSWORD", "secret"),
            ("CONTACT_TABLE_NAME", "contact_submissions"),
        ])
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.smtp.server.as_deref(), Some("smtp.example.com"));
        assert_eq!(config.smtp.port, 2525);
        assert_eq!(
            config.audit.table_name.as_deref(),
            Some("contact_submissions")
        );
    }

    #[test]
    fn test_空文字列は未設定として扱う() {
        let config = load(&[("CONTACT_TABLE_NAME", ""), ("SENDER_PASSWORD", "  ")]).unwrap();

        assert_eq!(config.audit.table_name, None);
        assert_eq!(config.smtp.sender_password, None);
    }

    #[test]
    fn test_不正なポート番号はconfig_errorになる() {
        let result = load(&[("SMTP_PORT", "smtp")]);

        assert_eq!(
            result.unwrap_err(),
            ConfigError::InvalidPort {
                var:   "SMTP_PORT",
                value: "smtp".to_string(),
            }
        );
    }

    #[test]
    fn test_resolveで宛先未設定なら差出人アドレスになる() {
        let config = load(&[
            ("SMTP_SERVER", "smtp.example.com"),
            ("SENDER_EMAIL", "sender@example.com"),
            ("SENDER_PASSWORD", "secret"),
        ])
        .unwrap();

        let settings = config.smtp.resolve().unwrap();

        assert_eq!(settings.host, "smtp.example.com");
        assert_eq!(settings.port, 587);
        assert_eq!(settings.route.from_address, "sender@example.com");
        assert_eq!(settings.route.admin_address, "sender@example.com");
    }

    #[test]
    fn test_resolveでadmin_emailが宛先になる() {
        let config = load(&[
            ("SMTP_SERVER", "smtp.example.com"),
            ("SENDER_EMAIL", "sender@example.com"),
            ("SENDER_PASSWORD", "secret"),
            ("ADMIN_EMAIL", "admin@example.com"),
        ])
        .unwrap();

        let settings = config.smtp.resolve().unwrap();

        assert_eq!(settings.route.admin_address, "admin@example.com");
    }

    #[test]
    fn test_resolveで不足している変数名が列挙される() {
        let config = load(&[("SENDER_EMAIL", "sender@example.com")]).unwrap();

        let err = config.smtp.resolve().unwrap_err();

        assert!(
            matches!(&err, NotificationError::Misconfigured(missing) if missing == "SMTP_SERVER, SENDER_PASSWORD"),
            "{err:?}"
        );
    }

    #[test]
    fn test_smtp_settingsのdebugはパスワードを出力しない() {
        let settings = SmtpSettings {
            host:     "smtp.example.com".to_string(),
            port:     587,
            password: "secret".to_string(),
            route:    MailRoute {
                from_address:  "a@example.com".to_string(),
                admin_address: "a@example.com".to_string(),
            },
        };

        assert!(!format!("{settings:?}").contains("secret"));
    }
}
