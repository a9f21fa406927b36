// 接続文字列ビルダー
//
// DatabaseConfig と Dialect から接続文字列を生成する。

use crate::core::config::{DatabaseConfig, Dialect};
use urlencoding::encode;

/// 接続文字列を生成
///
/// ユーザー名とパスワードはパーセントエンコードされます。
/// SQLiteの場合は `database` をファイルパスとして扱います。
pub fn build_connection_string(dialect: Dialect, config: &DatabaseConfig) -> String {
    match dialect {
        Dialect::PostgreSQL => {
            let auth = build_auth(config, "postgres");
            let port = config.resolved_port(dialect);
            format!(
                "postgresql://{}@{}:{}/{}",
                auth, config.host, port, config.database
            )
        }
        Dialect::MySQL => {
            let auth = build_auth(config, "root");
            let port = config.resolved_port(dialect);
            format!(
                "mysql://{}@{}:{}/{}",
                auth, config.host, port, config.database
            )
        }
        Dialect::SQLite => format!("sqlite://{}", config.database),
    }
}

fn build_auth(config: &DatabaseConfig, default_user: &str) -> String {
    let user = config.user.as_deref().unwrap_or(default_user);
    let encoded_user = encode(user);
    match config.password.as_deref() {
        Some(password) if !password.is_empty() => {
            format!("{}:{}", encoded_user, encode(password))
        }
        _ => encoded_user.to_string(),
    }
}
