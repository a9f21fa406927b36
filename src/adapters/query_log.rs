// 検証クエリログ
//
// 発行したすべての検証クエリを、1行の見出しとともに監査用ファイルへ追記します。
// ファイルは実行開始時に一度だけ切り詰められ、以降はエントリごとに追記モードで開きます。

use crate::core::error::IoError;
use crate::core::naming;
use chrono::Local;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// クエリログの書き込み先
pub trait QueryLog: Send {
    /// クエリを記録
    ///
    /// `params` はプレースホルダーにバインドされる値です。
    fn record(&mut self, header: &str, sql: &str, params: &[String]) -> Result<(), IoError>;
}

/// ファイルに記録されるエントリ本体を生成
pub fn format_entry(header: &str, sql: &str, params: &[String]) -> String {
    let mut entry = format!("\n-- {}\n{};\n", header, sql.trim());
    if !params.is_empty() {
        let rendered: Vec<String> = params.iter().map(|p| format!("'{}'", p)).collect();
        entry.push_str(&format!("-- params: {}\n", rendered.join(", ")));
    }
    entry
}

/// ファイルベースのクエリログ
#[derive(Debug, Clone)]
pub struct SqlLogFile {
    path: PathBuf,
}

impl SqlLogFile {
    /// ログファイルを初期化
    ///
    /// 既存の内容は破棄され、入力ファイル名を含むヘッダーが書き込まれます。
    pub fn create(path: &Path, input_name: &str) -> Result<Self, IoError> {
        let header = format!(
            "-- {}.sql generated for input: {}\n-- started at {}\n",
            naming::APP_NAME,
            input_name,
            Local::now().format("%Y-%m-%d %H:%M:%S")
        );
        fs::write(path, header).map_err(|e| IoError::FileWrite {
            path: path.display().to_string(),
            cause: e.to_string(),
        })?;

        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    /// ログファイルのパス
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl QueryLog for SqlLogFile {
    fn record(&mut self, header: &str, sql: &str, params: &[String]) -> Result<(), IoError> {
        let to_write_error = |e: std::io::Error| IoError::FileWrite {
            path: self.path.display().to_string(),
            cause: e.to_string(),
        };

        let mut file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .map_err(to_write_error)?;
        file.write_all(format_entry(header, sql, params).as_bytes())
            .map_err(to_write_error)
    }
}

/// 記録済みエントリ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggedQuery {
    pub header: String,
    pub sql: String,
    pub params: Vec<String>,
}

/// メモリ上のクエリログ
#[derive(Debug, Clone, Default)]
pub struct InMemoryQueryLog {
    entries: Vec<LoggedQuery>,
}

impl InMemoryQueryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[LoggedQuery] {
        &self.entries
    }
}

impl QueryLog for InMemoryQueryLog {
    fn record(&mut self, header: &str, sql: &str, params: &[String]) -> Result<(), IoError> {
        self.entries.push(LoggedQuery {
            header: header.to_string(),
            sql: sql.trim().to_string(),
            params: params.to_vec(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_format_entry_without_params() {
        let entry = format_entry("count t1", "  SELECT COUNT(*) FROM t1  ", &[]);
        assert_eq!(entry, "\n-- count t1\nSELECT COUNT(*) FROM t1;\n");
    }

    #[test]
    fn test_format_entry_with_params() {
        let entry = format_entry(
            "check column t1.id",
            "SELECT 1 WHERE a = ? AND b = ?",
            &["t1".to_string(), "id".to_string()],
        );
        assert!(entry.ends_with("-- params: 't1', 'id'\n"));
    }

    #[test]
    fn test_create_truncates_existing_log() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("checkdb.sql");
        fs::write(&path, "stale content from a previous run").unwrap();

        let log = SqlLogFile::create(&path, "db1.txt").unwrap();
        let content = fs::read_to_string(log.path()).unwrap();

        assert!(content.starts_with("-- checkdb.sql generated for input: db1.txt\n"));
        assert!(!content.contains("stale content"));
    }

    #[test]
    fn test_record_appends_entries() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("checkdb.sql");

        let mut log = SqlLogFile::create(&path, "db1.txt").unwrap();
        log.record("count t1", "SELECT COUNT(*) FROM t1", &[]).unwrap();
        log.record("count t2", "SELECT COUNT(*) FROM t2", &[]).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let first = content.find("-- count t1").unwrap();
        let second = content.find("-- count t2").unwrap();
        assert!(first < second);
        assert!(content.contains("SELECT COUNT(*) FROM t2;\n"));
    }

    #[test]
    fn test_create_in_missing_directory_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("no_such_dir").join("checkdb.sql");

        let err = SqlLogFile::create(&path, "db1.txt").unwrap_err();
        assert!(err.is_file_write());
    }

    #[test]
    fn test_in_memory_log() {
        let mut log = InMemoryQueryLog::new();
        log.record("h", " SELECT 1 ", &["x".to_string()]).unwrap();

        assert_eq!(log.entries().len(), 1);
        assert_eq!(log.entries()[0].sql, "SELECT 1");
        assert_eq!(log.entries()[0].params, vec!["x".to_string()]);
    }
}
