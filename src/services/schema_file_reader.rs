// スキーマファイルリーダー
//
// 入力ファイルを1行ずつ読み、コメント・区切り線・空行などのノイズを除外して
// テーブル記述子の順序付きリストを生成します。

use crate::core::descriptor::TableDescriptor;
use crate::core::error::IoError;
use crate::services::schema_line_parser::SchemaLineParser;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// ファイル名とみなす拡張子
const FILE_NAME_EXTENSIONS: [&str; 3] = [".txt", ".sql", ".out"];

/// コメントとみなす行頭
const COMMENT_PREFIXES: [&str; 3] = ["--", "#", "//"];

/// 区切り線とみなす最小長
const SEPARATOR_MIN_LEN: usize = 5;

/// 行を読み飛ばす理由
///
/// 宣言として解析すべき行の場合は `None` を返します。
/// `line` はBOMと前後の空白を除去済みであることを前提とします。
pub fn skip_reason(line: &str) -> Option<&'static str> {
    if line.is_empty() {
        return Some("blank");
    }

    let lower = line.to_lowercase();
    if FILE_NAME_EXTENSIONS.iter().any(|ext| lower.ends_with(ext)) {
        return Some("file name");
    }

    if line.len() >= SEPARATOR_MIN_LEN && line.chars().all(|c| c == '-') {
        return Some("separator");
    }

    if COMMENT_PREFIXES.iter().any(|prefix| line.starts_with(prefix)) {
        return Some("comment");
    }

    if !line.contains('(') || !line.contains(')') {
        return Some("no parentheses");
    }

    None
}

/// スキーマファイルリーダー
#[derive(Debug, Clone, Default)]
pub struct SchemaFileReader {
    parser: SchemaLineParser,
}

impl SchemaFileReader {
    /// 新しいSchemaFileReaderを作成
    pub fn new() -> Self {
        Self {
            parser: SchemaLineParser::new(),
        }
    }

    /// スキーマ記述ファイルを解析
    ///
    /// # Errors
    ///
    /// - ファイルが存在しない場合
    /// - ファイルの読み込みに失敗した場合（UTF-8でない場合を含む）
    pub fn parse_file(&self, path: &Path) -> Result<Vec<TableDescriptor>, IoError> {
        if !path.is_file() {
            return Err(IoError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let content = fs::read_to_string(path).map_err(|e| IoError::FileRead {
            path: path.display().to_string(),
            cause: e.to_string(),
        })?;

        let tables = self.parse_str(&content);
        debug!(path = %path.display(), tables = tables.len(), "Parsed schema file");
        Ok(tables)
    }

    /// 文字列全体を解析
    ///
    /// 同名テーブルが複数宣言された場合は最初の宣言を採用し、以降は警告して破棄します。
    pub fn parse_str(&self, content: &str) -> Vec<TableDescriptor> {
        let mut tables = Vec::new();
        let mut seen = HashSet::new();

        for (index, raw) in content.lines().enumerate() {
            let line = raw.trim_start_matches('\u{feff}').trim();

            if let Some(reason) = skip_reason(line) {
                if reason != "blank" {
                    debug!(line = index + 1, reason, "Skipping schema line");
                }
                continue;
            }

            let Some(table) = self.parser.parse_line(line) else {
                debug!(line = index + 1, "Skipping line that is not a table declaration");
                continue;
            };

            if !seen.insert(table.name.clone()) {
                warn!(
                    line = index + 1,
                    table = %table.name,
                    "Duplicate table declaration ignored; the first declaration is used"
                );
                continue;
            }

            tables.push(table);
        }

        tables
    }
}
