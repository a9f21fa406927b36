// エラー型定義
//
// アプリケーション全体で使用されるカスタムエラー型を提供します。
// thiserrorを使用して、StructuralFailure, InputError, DatabaseError, IoError を定義します。

use thiserror::Error;

/// 構造検証の失敗理由
///
/// テーブル単位の非致命的な失敗を表現します。
/// 実行全体は中断されず、該当テーブルの判定に吸収されます。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructuralFailure {
    /// テーブルがデータベースに存在しない
    #[error("table-missing")]
    TableMissing,

    /// スキーマ記述にプライマリキーが宣言されていない
    #[error("pk-missing")]
    PrimaryKeyMissing,

    /// 宣言されたプライマリキーのカラムが存在しない
    #[error("pkcol-missing")]
    PrimaryKeyColumnMissing,

    /// 外部キーのソースカラムが存在しない
    #[error("fkcol-missing:{column}")]
    ForeignKeyColumnMissing {
        /// カラム名
        column: String,
    },
}

impl StructuralFailure {
    /// テーブル欠落かどうか
    pub fn is_table_missing(&self) -> bool {
        matches!(self, StructuralFailure::TableMissing)
    }

    /// プライマリキー未宣言かどうか
    pub fn is_primary_key_missing(&self) -> bool {
        matches!(self, StructuralFailure::PrimaryKeyMissing)
    }

    /// プライマリキーカラム欠落かどうか
    pub fn is_primary_key_column_missing(&self) -> bool {
        matches!(self, StructuralFailure::PrimaryKeyColumnMissing)
    }

    /// 外部キーカラム欠落かどうか
    pub fn is_foreign_key_column_missing(&self) -> bool {
        matches!(self, StructuralFailure::ForeignKeyColumnMissing { .. })
    }
}

/// 入力エラー
///
/// データベースに接続する前に検出される致命的なエラーです。
#[derive(Debug, Error)]
pub enum InputError {
    /// Input path not specified
    #[error("No input schema file given. Usage: checkdb database=<file>.txt")]
    MissingPath,

    /// No table declarations found
    #[error("No valid tables parsed from input file: {path}")]
    NoTables {
        /// ファイルパス
        path: String,
    },
}

/// データベースエラー
///
/// データベース操作時に発生するエラーを表現します。
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Connection error
    #[error("Database connection error: {message} (cause: {cause})")]
    Connection {
        /// エラーメッセージ
        message: String,
        /// エラー原因
        cause: String,
    },

    /// Query execution error
    #[error("Query execution error: {message}")]
    Query {
        /// エラーメッセージ
        message: String,
        /// 失敗したSQL
        sql: Option<String>,
    },
}

impl DatabaseError {
    /// 接続エラーかどうか
    pub fn is_connection(&self) -> bool {
        matches!(self, DatabaseError::Connection { .. })
    }

    /// クエリエラーかどうか
    pub fn is_query(&self) -> bool {
        matches!(self, DatabaseError::Query { .. })
    }

    /// 失敗したSQLを取得
    pub fn sql(&self) -> Option<&str> {
        match self {
            DatabaseError::Query { sql, .. } => sql.as_deref(),
            DatabaseError::Connection { .. } => None,
        }
    }
}

/// I/Oエラー
///
/// ファイル操作時に発生するエラーを表現します。
#[derive(Debug, Error)]
pub enum IoError {
    /// File not found
    #[error("File not found: {path}")]
    FileNotFound {
        /// ファイルパス
        path: String,
    },

    /// File read error
    #[error("Failed to read file: {path} (cause: {cause})")]
    FileRead {
        /// ファイルパス
        path: String,
        /// エラー原因
        cause: String,
    },

    /// File write error
    #[error("Failed to write file: {path} (cause: {cause})")]
    FileWrite {
        /// ファイルパス
        path: String,
        /// エラー原因
        cause: String,
    },
}

impl IoError {
    /// ファイルが見つからないエラーかどうか
    pub fn is_file_not_found(&self) -> bool {
        matches!(self, IoError::FileNotFound { .. })
    }

    /// ファイル読み込みエラーかどうか
    pub fn is_file_read(&self) -> bool {
        matches!(self, IoError::FileRead { .. })
    }

    /// ファイル書き込みエラーかどうか
    pub fn is_file_write(&self) -> bool {
        matches!(self, IoError::FileWrite { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structural_failure_display() {
        assert_eq!(StructuralFailure::TableMissing.to_string(), "table-missing");
        assert_eq!(StructuralFailure::PrimaryKeyMissing.to_string(), "pk-missing");
        assert_eq!(
            StructuralFailure::PrimaryKeyColumnMissing.to_string(),
            "pkcol-missing"
        );
        assert_eq!(
            StructuralFailure::ForeignKeyColumnMissing {
                column: "t1id".to_string()
            }
            .to_string(),
            "fkcol-missing:t1id"
        );
    }

    #[test]
    fn test_structural_failure_predicates() {
        assert!(StructuralFailure::TableMissing.is_table_missing());
        assert!(StructuralFailure::PrimaryKeyMissing.is_primary_key_missing());
        assert!(!StructuralFailure::PrimaryKeyMissing.is_table_missing());
        assert!(StructuralFailure::PrimaryKeyColumnMissing.is_primary_key_column_missing());
        assert!(StructuralFailure::ForeignKeyColumnMissing {
            column: "x".to_string()
        }
        .is_foreign_key_column_missing());
    }

    #[test]
    fn test_database_error_variants() {
        let conn_error = DatabaseError::Connection {
            message: "Connection failed".to_string(),
            cause: "Timeout".to_string(),
        };
        assert!(conn_error.is_connection());
        assert!(conn_error.sql().is_none());

        let query_error = DatabaseError::Query {
            message: "Query failed".to_string(),
            sql: Some("SELECT 1".to_string()),
        };
        assert!(query_error.is_query());
        assert_eq!(query_error.sql(), Some("SELECT 1"));
    }

    #[test]
    fn test_io_error_variants() {
        let not_found = IoError::FileNotFound {
            path: "/path/to/file".to_string(),
        };
        assert!(not_found.is_file_not_found());

        let read_error = IoError::FileRead {
            path: "/path/to/file".to_string(),
            cause: "Permission denied".to_string(),
        };
        assert!(read_error.is_file_read());

        let write_error = IoError::FileWrite {
            path: "/path/to/file".to_string(),
            cause: "Disk full".to_string(),
        };
        assert!(write_error.is_file_write());
    }

    #[test]
    fn test_input_error_messages() {
        let error = InputError::NoTables {
            path: "db1.txt".to_string(),
        };
        assert!(error.to_string().contains("db1.txt"));
        assert!(InputError::MissingPath.to_string().contains("database="));
    }
}
