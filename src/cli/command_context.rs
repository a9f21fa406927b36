// コマンド共通コンテキスト
//
// 設定ファイル読み込みと接続設定の解決をCLI層で集約する。

use crate::adapters::database::DatabaseConnectionService;
use crate::core::config::{Config, DatabaseConfig, Dialect};
use crate::services::config_loader::ConfigLoader;
use crate::services::database_config_resolver::DatabaseConfigResolver;
use anyhow::{Context, Result};
use sqlx::AnyPool;
use std::path::PathBuf;
use tracing::debug;

/// CLIコマンド共通の実行コンテキスト
#[derive(Debug, Clone)]
pub struct CommandContext {
    /// 読み込んだ設定ファイル（既定値を使う場合はNone）
    pub config_path: Option<PathBuf>,
    pub config: Config,
}

impl CommandContext {
    /// 設定を読み込んでコンテキストを作成
    ///
    /// カスタム設定ファイルが指定されない場合、カレントディレクトリの
    /// `.checkdb.yaml` を探し、なければ既定の設定を使います。
    pub fn load(custom_config_path: Option<PathBuf>) -> Result<Self> {
        let config = ConfigLoader::load(custom_config_path.as_deref())
            .with_context(|| "Failed to load configuration")?;

        debug!(config_path = ?custom_config_path, dialect = %config.dialect, "Configuration loaded");
        Ok(Self {
            config_path: custom_config_path,
            config,
        })
    }

    /// 設定ファイルを使わずにコンテキストを作成
    pub fn from_config(config: Config) -> Self {
        Self {
            config_path: None,
            config,
        }
    }

    /// 環境に応じたデータベース設定を取得（環境変数上書き込み）
    pub fn database_config(&self, env: &str) -> Result<DatabaseConfig> {
        let config = self
            .config
            .get_database_config(env)
            .with_context(|| format!("Config for environment '{}' not found", env))?;
        Ok(DatabaseConfigResolver::apply_env_overrides(&config))
    }

    /// データベース方言を取得（指定があれば優先）
    pub fn dialect(&self, override_dialect: Option<Dialect>) -> Dialect {
        override_dialect.unwrap_or(self.config.dialect)
    }

    /// 接続プールを作成
    pub async fn connect_pool(&self, env: &str, dialect: Dialect) -> Result<AnyPool> {
        let db_config = self.database_config(env)?;
        let db_service = DatabaseConnectionService::new();
        let pool = db_service
            .create_pool(dialect, &db_config)
            .await
            .with_context(|| "Failed to connect to database")?;
        Ok(pool)
    }
}
