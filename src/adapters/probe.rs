// データベースプローブ
//
// 検証エンジンがライブのデータベースに問い合わせるためのインターフェースと、
// SQLxの単一接続を使ったその実装。発行するすべてのクエリはクエリログに記録されます。

use crate::adapters::query_builder::{QueryBuilder, VerificationQuery};
use crate::adapters::query_log::QueryLog;
use crate::core::config::Dialect;
use crate::core::error::DatabaseError;
use anyhow::Result;
use async_trait::async_trait;
use sqlx::any::AnyRow;
use sqlx::{AnyConnection, Row};
use tracing::debug;

/// ライブスキーマへの問い合わせインターフェース
///
/// 検証サービスはこのトレイト越しにのみデータベースへアクセスします。
/// クエリ実行の失敗はそのまま呼び出し元へ伝播します。
#[async_trait]
pub trait DatabaseProbe: Send {
    /// テーブルが存在するか
    async fn table_exists(&mut self, table: &str) -> Result<bool>;

    /// テーブルにカラムが存在するか
    async fn column_exists(&mut self, table: &str, column: &str) -> Result<bool>;

    /// 物理順のカラム名一覧（小文字化済み）
    async fn list_columns(&mut self, table: &str) -> Result<Vec<String>>;

    /// 単一の整数値を返すクエリを実行
    async fn execute_scalar(&mut self, query: &VerificationQuery) -> Result<i64>;
}

/// SQLx接続を使ったプローブ
pub struct SqlxProbe<'a> {
    conn: &'a mut AnyConnection,
    builder: QueryBuilder,
    log: &'a mut dyn QueryLog,
}

impl<'a> SqlxProbe<'a> {
    /// 新しいSqlxProbeを作成
    pub fn new(conn: &'a mut AnyConnection, dialect: Dialect, log: &'a mut dyn QueryLog) -> Self {
        Self {
            conn,
            builder: QueryBuilder::new(dialect),
            log,
        }
    }

    /// クエリを記録してから実行し、全行を取得
    async fn fetch_rows(&mut self, query: &VerificationQuery) -> Result<Vec<AnyRow>> {
        self.log.record(&query.header, &query.sql, &query.params)?;
        debug!(header = %query.header, "Executing verification query");

        let mut statement = sqlx::query(&query.sql);
        for param in &query.params {
            statement = statement.bind(param.as_str());
        }

        let rows = statement
            .fetch_all(&mut *self.conn)
            .await
            .map_err(|e| query_error(query, e))?;

        Ok(rows)
    }
}

fn query_error(query: &VerificationQuery, cause: sqlx::Error) -> DatabaseError {
    DatabaseError::Query {
        message: format!("{} failed: {}", query.header, cause),
        sql: Some(query.sql.clone()),
    }
}

#[async_trait]
impl<'a> DatabaseProbe for SqlxProbe<'a> {
    async fn table_exists(&mut self, table: &str) -> Result<bool> {
        let query = self.builder.table_exists_query(table);
        Ok(self.execute_scalar(&query).await? > 0)
    }

    async fn column_exists(&mut self, table: &str, column: &str) -> Result<bool> {
        let query = self.builder.column_exists_query(table, column);
        Ok(self.execute_scalar(&query).await? > 0)
    }

    async fn list_columns(&mut self, table: &str) -> Result<Vec<String>> {
        let query = self.builder.list_columns_query(table);
        let rows = self.fetch_rows(&query).await?;

        let mut columns = Vec::with_capacity(rows.len());
        for row in &rows {
            let name: String = row.try_get(0).map_err(|e| query_error(&query, e))?;
            columns.push(name.to_lowercase());
        }

        Ok(columns)
    }

    async fn execute_scalar(&mut self, query: &VerificationQuery) -> Result<i64> {
        let rows = self.fetch_rows(query).await?;
        let row = rows.first().ok_or_else(|| DatabaseError::Query {
            message: format!("{} returned no rows", query.header),
            sql: Some(query.sql.clone()),
        })?;

        let value: i64 = row.try_get(0).map_err(|e| query_error(query, e))?;
        Ok(value)
    }
}
