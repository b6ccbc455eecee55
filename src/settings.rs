use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// 環境変数名
pub const CONFIGURATION_STYLE_VAR: &str = "CONFIGURATION_STYLE";
pub const DISCOUNT_POLICY_VAR: &str = "DISCOUNT_POLICY";
pub const DISCOUNT_FIX_AMOUNT_VAR: &str = "DISCOUNT_FIX_AMOUNT";
pub const DISCOUNT_RATE_VAR: &str = "DISCOUNT_RATE";
pub const CONFIG_FILE_VAR: &str = "APP_CONFIG_FILE";

const DEFAULT_FIX_AMOUNT: i32 = 1000;
const DEFAULT_RATE_PERCENT: i32 = 10;

/// 設定読み込みのエラー
#[derive(Debug, Error)]
pub enum SettingsError {
    /// 環境変数の値が不正
    #[error("Invalid value for {key}: '{value}'")]
    InvalidValue { key: &'static str, value: String },

    /// 設定ファイルを読めない
    #[error("Failed to read settings file {path}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// 設定ファイルのJSONが不正
    #[error("Failed to parse settings")]
    Parse(#[from] serde_json::Error),
}

/// ビーングラフの組み立て方
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigurationStyle {
    /// ファクトリ関数による明示的な設定
    #[default]
    Explicit,
    /// コンポーネントスキャン
    Scan,
}

impl FromStr for ConfigurationStyle {
    type Err = SettingsError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "explicit" => Ok(Self::Explicit),
            "scan" => Ok(Self::Scan),
            _ => Err(SettingsError::InvalidValue {
                key: CONFIGURATION_STYLE_VAR,
                value: value.to_string(),
            }),
        }
    }
}

/// 明示的な設定で使う割引ポリシー
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountPolicyKind {
    Fix,
    #[default]
    Rate,
}

impl FromStr for DiscountPolicyKind {
    type Err = SettingsError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "fix" => Ok(Self::Fix),
            "rate" => Ok(Self::Rate),
            _ => Err(SettingsError::InvalidValue {
                key: DISCOUNT_POLICY_VAR,
                value: value.to_string(),
            }),
        }
    }
}

/// 割引の設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscountSettings {
    pub policy: DiscountPolicyKind,
    /// 定額割引の金額
    pub fix_amount: i32,
    /// 定率割引の割合（%）
    pub rate_percent: i32,
}

impl Default for DiscountSettings {
    fn default() -> Self {
        Self {
            policy: DiscountPolicyKind::default(),
            fix_amount: DEFAULT_FIX_AMOUNT,
            rate_percent: DEFAULT_RATE_PERCENT,
        }
    }
}

/// アプリケーション設定
///
/// コンテキストにはインフラ用ビーン `appSettings` として登録される。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub configuration: ConfigurationStyle,
    pub discount: DiscountSettings,
}

impl AppSettings {
    /// 環境変数から読み込む
    ///
    /// `APP_CONFIG_FILE` が設定されていればそのJSONファイルを優先する。
    pub fn from_env() -> Result<Self, SettingsError> {
        match std::env::var(CONFIG_FILE_VAR) {
            Ok(path) => Self::from_json_file(path),
            Err(_) => Self::from_lookup(|key| std::env::var(key).ok()),
        }
    }

    /// キーから値を引く関数で読み込む。未設定のキーはデフォルト値を使う。
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();

        if let Some(value) = lookup(CONFIGURATION_STYLE_VAR) {
            settings.configuration = value.parse()?;
        }
        if let Some(value) = lookup(DISCOUNT_POLICY_VAR) {
            settings.discount.policy = value.parse()?;
        }
        if let Some(value) = lookup(DISCOUNT_FIX_AMOUNT_VAR) {
            settings.discount.fix_amount = parse_amount(DISCOUNT_FIX_AMOUNT_VAR, &value)?;
        }
        if let Some(value) = lookup(DISCOUNT_RATE_VAR) {
            settings.discount.rate_percent = parse_amount(DISCOUNT_RATE_VAR, &value)?;
        }

        Ok(settings)
    }

    pub fn from_json_str(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }
}

fn parse_amount(key: &'static str, value: &str) -> Result<i32, SettingsError> {
    value
        .trim()
        .parse()
        .map_err(|_| SettingsError::InvalidValue {
            key,
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let settings = AppSettings::from_lookup(|_| None).unwrap();
        assert_eq!(settings.configuration, ConfigurationStyle::Explicit);
        assert_eq!(settings.discount.policy, DiscountPolicyKind::Rate);
        assert_eq!(settings.discount.fix_amount, 1000);
        assert_eq!(settings.discount.rate_percent, 10);
    }

    #[test]
    fn test_from_lookup() {
        let settings = AppSettings::from_lookup(lookup_from(&[
            ("CONFIGURATION_STYLE", "scan"),
            ("DISCOUNT_POLICY", "FIX"),
            ("DISCOUNT_FIX_AMOUNT", " 2000 "),
            ("DISCOUNT_RATE", "15"),
        ]))
        .unwrap();

        assert_eq!(settings.configuration, ConfigurationStyle::Scan);
        assert_eq!(settings.discount.policy, DiscountPolicyKind::Fix);
        assert_eq!(settings.discount.fix_amount, 2000);
        assert_eq!(settings.discount.rate_percent, 15);
    }

    #[test]
    fn test_from_lookup_invalid_policy() {
        let result = AppSettings::from_lookup(lookup_from(&[("DISCOUNT_POLICY", "half")]));
        match result {
            Err(SettingsError::InvalidValue { key, value }) => {
                assert_eq!(key, DISCOUNT_POLICY_VAR);
                assert_eq!(value, "half");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_from_lookup_invalid_amount() {
        let result = AppSettings::from_lookup(lookup_from(&[("DISCOUNT_RATE", "ten")]));
        assert!(matches!(
            result,
            Err(SettingsError::InvalidValue { key: DISCOUNT_RATE_VAR, .. })
        ));
    }

    #[test]
    fn test_from_json_str_with_partial_fields() {
        let settings =
            AppSettings::from_json_str(r#"{"discount": {"policy": "fix", "fix_amount": 500}}"#)
                .unwrap();
        assert_eq!(settings.configuration, ConfigurationStyle::Explicit);
        assert_eq!(settings.discount.policy, DiscountPolicyKind::Fix);
        assert_eq!(settings.discount.fix_amount, 500);
        assert_eq!(settings.discount.rate_percent, 10);
    }

    #[test]
    fn test_from_json_str_invalid() {
        let result = AppSettings::from_json_str(r#"{"configuration": "magic"}"#);
        assert!(matches!(result, Err(SettingsError::Parse(_))));
    }

    #[test]
    fn test_from_json_file_missing() {
        let result = AppSettings::from_json_file("/nonexistent/settings.json");
        assert!(matches!(result, Err(SettingsError::Read { .. })));
    }
}
