// 検証クエリビルダー
//
// テーブル記述子とカラム名から、各検証で発行するSQLを組み立てる純粋関数群。
// 実行や接続には一切関与しません。
//
// - メタデータプローブ（テーブル/カラムの存在、カラム一覧）はパラメータ化する
// - データクエリ（件数、結合件数、関数従属プローブ）は識別子をクォートして埋め込む
// - 真偽を返すクエリもすべて件数（BIGINT）として返し、方言間のデコード差異を避ける

use crate::adapters::sql_quote::quote_identifier;
use crate::core::config::Dialect;
use crate::core::descriptor::ForeignKey;

/// 発行用の検証クエリ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationQuery {
    /// クエリログ用の1行見出し
    pub header: String,
    /// SQL本文
    pub sql: String,
    /// プレースホルダーにバインドする値（小文字化済み）
    pub params: Vec<String>,
}

impl VerificationQuery {
    fn new(header: String, sql: String) -> Self {
        Self {
            header,
            sql,
            params: Vec::new(),
        }
    }

    fn with_params(header: String, sql: String, params: Vec<String>) -> Self {
        Self {
            header,
            sql,
            params,
        }
    }
}

/// 方言別の検証クエリビルダー
#[derive(Debug, Clone, Copy)]
pub struct QueryBuilder {
    dialect: Dialect,
}

impl QueryBuilder {
    /// 新しいQueryBuilderを作成
    pub fn new(dialect: Dialect) -> Self {
        Self { dialect }
    }

    /// 対象の方言
    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// n番目（1始まり）のプレースホルダー
    fn placeholder(&self, n: usize) -> String {
        match self.dialect {
            Dialect::PostgreSQL => format!("${}", n),
            Dialect::MySQL | Dialect::SQLite => "?".to_string(),
        }
    }

    fn quote(&self, name: &str) -> String {
        quote_identifier(self.dialect, name)
    }

    /// NULL安全な等価演算子
    fn null_safe_eq(&self) -> &'static str {
        match self.dialect {
            Dialect::PostgreSQL => "IS NOT DISTINCT FROM",
            Dialect::MySQL => "<=>",
            Dialect::SQLite => "IS",
        }
    }

    /// information_schema 用のスキーマ・テーブル名条件（SQLiteでは使用しない）
    fn schema_table_filter(&self) -> String {
        let (schema, table_name) = match self.dialect {
            Dialect::PostgreSQL => ("current_schema()", "LOWER(CAST(table_name AS TEXT))"),
            Dialect::MySQL | Dialect::SQLite => ("DATABASE()", "LOWER(table_name)"),
        };
        format!(
            "table_schema = {} AND {} = {}",
            schema,
            table_name,
            self.placeholder(1)
        )
    }

    /// テーブル存在プローブ（件数が0より大きければ存在）
    pub fn table_exists_query(&self, table: &str) -> VerificationQuery {
        let table = table.to_lowercase();
        let sql = match self.dialect {
            Dialect::PostgreSQL | Dialect::MySQL => format!(
                "SELECT COUNT(*) FROM information_schema.tables WHERE {}",
                self.schema_table_filter()
            ),
            Dialect::SQLite => format!(
                "SELECT COUNT(*) FROM sqlite_master WHERE type IN ('table', 'view') AND LOWER(name) = {}",
                self.placeholder(1)
            ),
        };
        VerificationQuery::with_params(format!("check table {}", table), sql, vec![table])
    }

    /// カラム存在プローブ（件数が0より大きければ存在）
    pub fn column_exists_query(&self, table: &str, column: &str) -> VerificationQuery {
        let table = table.to_lowercase();
        let column = column.to_lowercase();
        let sql = match self.dialect {
            Dialect::PostgreSQL => format!(
                "SELECT COUNT(*) FROM information_schema.columns WHERE {} AND LOWER(CAST(column_name AS TEXT)) = {}",
                self.schema_table_filter(),
                self.placeholder(2)
            ),
            Dialect::MySQL => format!(
                "SELECT COUNT(*) FROM information_schema.columns WHERE {} AND LOWER(column_name) = {}",
                self.schema_table_filter(),
                self.placeholder(2)
            ),
            Dialect::SQLite => format!(
                "SELECT COUNT(*) FROM pragma_table_info({}) WHERE LOWER(name) = {}",
                self.placeholder(1),
                self.placeholder(2)
            ),
        };
        VerificationQuery::with_params(
            format!("check column {}.{}", table, column),
            sql,
            vec![table, column],
        )
    }

    /// 物理順のカラム一覧クエリ
    pub fn list_columns_query(&self, table: &str) -> VerificationQuery {
        let table = table.to_lowercase();
        let sql = match self.dialect {
            Dialect::PostgreSQL => format!(
                "SELECT CAST(column_name AS TEXT) FROM information_schema.columns WHERE {} ORDER BY ordinal_position",
                self.schema_table_filter()
            ),
            Dialect::MySQL => format!(
                "SELECT CAST(column_name AS CHAR) FROM information_schema.columns WHERE {} ORDER BY ordinal_position",
                self.schema_table_filter()
            ),
            Dialect::SQLite => format!(
                "SELECT name FROM pragma_table_info({}) ORDER BY cid",
                self.placeholder(1)
            ),
        };
        VerificationQuery::with_params(format!("list columns {}", table), sql, vec![table])
    }

    /// 全行数クエリ
    pub fn count_rows_query(&self, table: &str) -> VerificationQuery {
        VerificationQuery::new(
            format!("count {}", table),
            format!("SELECT COUNT(*) FROM {}", self.quote(table)),
        )
    }

    /// 外部キーでの内部結合件数クエリ
    ///
    /// 自己参照でも成立するよう、両側にエイリアスを付けます。
    pub fn join_count_query(&self, table: &str, fk: &ForeignKey) -> VerificationQuery {
        VerificationQuery::new(
            format!(
                "count join {}..{} -> {}..{}",
                table, fk.column, fk.referenced_table, fk.referenced_column
            ),
            format!(
                "SELECT COUNT(*) FROM {} AS child INNER JOIN {} AS parent ON child.{} = parent.{}",
                self.quote(table),
                self.quote(&fk.referenced_table),
                self.quote(&fk.column),
                self.quote(&fk.referenced_column)
            ),
        )
    }

    /// 関数従属違反プローブ
    ///
    /// 非NULLの `determinant` 値を共有する行グループのうち、
    /// 2行以上を含み、非NULLの `dependent` 値を1つ以上持ち、
    /// `MIN(dependent)` と `MAX(dependent)` がNULL安全に等しいものがあれば1、なければ0を返します。
    pub fn fd_violation_query(
        &self,
        table: &str,
        determinant: &str,
        dependent: &str,
    ) -> VerificationQuery {
        let x = self.quote(determinant);
        let y = self.quote(dependent);
        VerificationQuery::new(
            format!("FD check {}: {} -> {}", table, determinant, dependent),
            format!(
                "SELECT COUNT(*) FROM (SELECT 1 AS violation FROM {table} WHERE {x} IS NOT NULL GROUP BY {x} HAVING COUNT(*) > 1 AND COUNT({y}) > 0 AND MIN({y}) {eq} MAX({y}) LIMIT 1) AS fd_violations",
                table = self.quote(table),
                x = x,
                y = y,
                eq = self.null_safe_eq()
            ),
        )
    }
}
