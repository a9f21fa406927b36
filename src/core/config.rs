// 設定ファイル管理
//
// 設定ファイル（YAML形式）の読み込み、検証、
// 環境別のデータベース接続設定の管理を行います。

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

/// データベース方言
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    #[serde(rename = "postgresql", alias = "postgres")]
    PostgreSQL,
    #[serde(rename = "mysql")]
    MySQL,
    #[serde(rename = "sqlite")]
    SQLite,
}

impl Dialect {
    /// 方言ごとのデフォルトポート
    pub fn default_port(&self) -> Option<u16> {
        match self {
            Dialect::PostgreSQL => Some(5432),
            Dialect::MySQL => Some(3306),
            Dialect::SQLite => None,
        }
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dialect::PostgreSQL => write!(f, "postgresql"),
            Dialect::MySQL => write!(f, "mysql"),
            Dialect::SQLite => write!(f, "sqlite"),
        }
    }
}

impl FromStr for Dialect {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "postgresql" | "postgres" => Ok(Dialect::PostgreSQL),
            "mysql" => Ok(Dialect::MySQL),
            "sqlite" => Ok(Dialect::SQLite),
            other => Err(anyhow!(
                "Unsupported database dialect: {}. Please specify one of: postgresql, mysql, sqlite.",
                other
            )),
        }
    }
}

/// 実行設定
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// 設定ファイルのバージョン
    #[serde(default = "default_version")]
    pub version: String,

    /// データベース方言
    pub dialect: Dialect,

    /// 環境別のデータベース設定
    pub environments: HashMap<String, DatabaseConfig>,
}

fn default_version() -> String {
    "1.0".to_string()
}

impl Config {
    /// デフォルトの設定ファイルパス
    pub const DEFAULT_CONFIG_PATH: &'static str = crate::core::naming::CONFIG_FILE;

    /// デフォルトの環境名
    pub const DEFAULT_ENVIRONMENT: &'static str = "development";

    /// 指定された環境のデータベース設定を取得
    pub fn get_database_config(&self, environment: &str) -> Result<DatabaseConfig> {
        self.environments.get(environment).cloned().ok_or_else(|| {
            let mut available: Vec<_> = self.environments.keys().collect();
            available.sort();
            anyhow!(
                "Environment '{}' not found. Available environments: {:?}",
                environment,
                available
            )
        })
    }

    /// 設定の妥当性を検証
    pub fn validate(&self) -> Result<()> {
        if self.version.is_empty() {
            return Err(anyhow!("Config file version is not specified"));
        }

        if self.environments.is_empty() {
            return Err(anyhow!(
                "At least one environment configuration is required"
            ));
        }

        for (env_name, db_config) in &self.environments {
            db_config
                .validate()
                .with_context(|| format!("Invalid config for environment '{}'", env_name))?;
        }

        Ok(())
    }
}

/// 設定ファイルがない場合の既定値
///
/// ローカルのPostgreSQL（`postgres` データベース）に接続する
/// `development` 環境だけを持ちます。
impl Default for Config {
    fn default() -> Self {
        let mut environments = HashMap::new();
        environments.insert(
            Self::DEFAULT_ENVIRONMENT.to_string(),
            DatabaseConfig {
                database: "postgres".to_string(),
                ..Default::default()
            },
        );

        Self {
            version: default_version(),
            dialect: Dialect::PostgreSQL,
            environments,
        }
    }
}

/// std::str::FromStrトレイトの実装
impl FromStr for Config {
    type Err = anyhow::Error;

    fn from_str(yaml: &str) -> Result<Self, Self::Err> {
        serde_saphyr::from_str(yaml).with_context(|| "Failed to parse config file")
    }
}

/// データベース接続設定
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// ホスト名（SQLiteの場合は不要）
    #[serde(default = "default_host")]
    pub host: String,

    /// ポート番号（省略時は方言のデフォルト）
    #[serde(default)]
    pub port: Option<u16>,

    /// データベース名（SQLiteの場合はファイルパス）
    pub database: String,

    /// ユーザー名
    #[serde(default)]
    pub user: Option<String>,

    /// パスワード
    #[serde(default)]
    pub password: Option<String>,

    /// 接続タイムアウト（秒）
    #[serde(default)]
    pub timeout: Option<u64>,
}

fn default_host() -> String {
    "localhost".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: None,
            database: String::new(),
            user: None,
            password: None,
            timeout: None,
        }
    }
}

impl DatabaseConfig {
    /// 方言を考慮したポート番号
    pub fn resolved_port(&self, dialect: Dialect) -> u16 {
        self.port
            .unwrap_or_else(|| dialect.default_port().unwrap_or(0))
    }

    /// Validate database configuration
    pub fn validate(&self) -> Result<()> {
        if self.database.is_empty() {
            return Err(anyhow!("Database name is not specified"));
        }

        Ok(())
    }
}
