// データベース接続アダプター
//
// SQLxを使用したデータベース接続の管理を行います。
// 検証は単一接続上で逐次実行するため、プールは1接続に制限します。

use crate::adapters::connection_string;
use crate::core::config::{DatabaseConfig, Dialect};
use crate::core::error::DatabaseError;
use sqlx::pool::{PoolConnection, PoolOptions};
use sqlx::{Any, AnyPool};
use std::time::Duration;

/// 接続取得のデフォルトタイムアウト（秒）
const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 30;

/// データベース接続サービス
///
/// データベース接続プールの初期化と管理を行います。
#[derive(Debug, Clone)]
pub struct DatabaseConnectionService {
    // 将来的な拡張のためのフィールドを予約
}

impl DatabaseConnectionService {
    /// 新しいDatabaseConnectionServiceを作成
    pub fn new() -> Self {
        Self {}
    }

    /// データベース接続文字列を構築
    pub fn build_connection_string(&self, dialect: Dialect, config: &DatabaseConfig) -> String {
        connection_string::build_connection_string(dialect, config)
    }

    /// データベース接続プールを作成
    ///
    /// # Arguments
    ///
    /// * `dialect` - データベース方言
    /// * `config` - データベース設定
    ///
    /// # Returns
    ///
    /// 接続プールまたはエラー
    pub async fn create_pool(
        &self,
        dialect: Dialect,
        config: &DatabaseConfig,
    ) -> Result<AnyPool, DatabaseError> {
        let connection_string = self.build_connection_string(dialect, config);

        self.create_pool_options(config.timeout)
            .connect(&connection_string)
            .await
            .map_err(|e| DatabaseError::Connection {
                message: format!("Failed to connect to {} database '{}'", dialect, config.database),
                cause: e.to_string(),
            })
    }

    /// 検証用の接続を1本取得
    ///
    /// 返される `PoolConnection` はスコープを抜けるとプールに返却されます。
    pub async fn acquire(&self, pool: &AnyPool) -> Result<PoolConnection<Any>, DatabaseError> {
        pool.acquire()
            .await
            .map_err(|e| DatabaseError::Connection {
                message: "Failed to acquire database connection".to_string(),
                cause: e.to_string(),
            })
    }

    /// 単一接続のプールオプションを作成
    ///
    /// タイムアウト未設定の場合は30秒を使用します。
    pub fn create_pool_options(&self, timeout_secs: Option<u64>) -> PoolOptions<Any> {
        let timeout = timeout_secs.unwrap_or(DEFAULT_ACQUIRE_TIMEOUT_SECS);
        PoolOptions::new()
            .max_connections(1)
            .acquire_timeout(Duration::from_secs(timeout))
    }

    /// 接続プールを閉じる
    pub async fn close_pool(&self, pool: AnyPool) {
        pool.close().await;
    }
}

impl Default for DatabaseConnectionService {
    fn default() -> Self {
        Self::new()
    }
}
