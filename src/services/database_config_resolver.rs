// データベース設定の解決サービス
//
// 環境変数による上書きをサービス層で扱い、coreは純粋な構造体に保つ。

use crate::core::config::DatabaseConfig;

/// データベース設定の解決ユーティリティ
#[derive(Debug, Clone, Default)]
pub struct DatabaseConfigResolver;

impl DatabaseConfigResolver {
    /// 環境変数による上書きを適用
    pub fn apply_env_overrides(base: &DatabaseConfig) -> DatabaseConfig {
        Self::apply_overrides(base, |name| std::env::var(name).ok())
    }

    /// 任意の変数ソースによる上書きを適用
    ///
    /// `DB_NAME` と `DB_DATABASE` の両方がある場合は `DB_NAME` が優先されます。
    /// 数値として解釈できない `DB_PORT` は無視されます。
    pub fn apply_overrides<F>(base: &DatabaseConfig, lookup: F) -> DatabaseConfig
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = base.clone();

        if let Some(host) = lookup("DB_HOST") {
            config.host = host;
        }
        if let Some(port) = lookup("DB_PORT") {
            if let Ok(port_num) = port.parse::<u16>() {
                config.port = Some(port_num);
            }
        }
        if let Some(database) = lookup("DB_NAME").or_else(|| lookup("DB_DATABASE")) {
            config.database = database;
        }
        if let Some(user) = lookup("DB_USER") {
            config.user = Some(user);
        }
        if let Some(password) = lookup("DB_PASSWORD") {
            config.password = Some(password);
        }

        config
    }
}
