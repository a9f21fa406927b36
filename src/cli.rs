// CLI Layer
// ユーザー入力の受付とコマンドルーティング

pub mod command_context;
pub mod commands;

use crate::core::error::InputError;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// 出力フォーマット
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output (default)
    #[default]
    Text,
    /// Structured JSON output
    Json,
}

/// 入力引数の `database=` 接頭辞
const DATABASE_ARG_PREFIX: &str = "database=";

/// Checkdb - Referential integrity and normalization checker
///
/// Reads a schema description file and verifies the declared tables
/// against a live relational database.
#[derive(Parser, Debug)]
#[command(name = "checkdb")]
#[command(author = "Checkdb Contributors")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Referential integrity and normalization checker")]
#[command(long_about = "Checkdb - Referential integrity and normalization checker

Reads a schema description file with one declaration per line:

  TableName(col1(pk), col2, col3(fk:OtherTable.OtherCol))

and checks each declared table against a live database:
  • Structure: the table, its primary key and foreign key columns exist
  • Referential integrity: every foreign key value resolves exactly once
  • Normalization: no non-key attribute determines another non-key attribute

Supported databases: PostgreSQL, MySQL, SQLite")]
#[command(after_help = "EXAMPLES:
  checkdb database=db1.txt
  checkdb --database db1.txt --env test
  checkdb db1.txt --dialect sqlite --format json

Connection settings are read from .checkdb.yaml and may be overridden with
DB_HOST, DB_PORT, DB_NAME, DB_USER and DB_PASSWORD.")]
pub struct Cli {
    /// Schema description file (`<path>` or `database=<path>`)
    #[arg(value_name = "INPUT")]
    pub input: Option<String>,

    /// Schema description file
    #[arg(short, long, value_name = "FILE", conflicts_with = "input")]
    pub database: Option<PathBuf>,

    /// Path to configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Environment name in the configuration file
    #[arg(short, long, default_value = "development")]
    pub env: String,

    /// Database dialect (overrides the configuration file)
    #[arg(long, value_name = "DIALECT")]
    pub dialect: Option<String>,

    /// Report file (default: refintnorm-<input file name>)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Query log file
    #[arg(long, value_name = "FILE", default_value = crate::core::naming::SQL_LOG_FILE)]
    pub sql_log: PathBuf,

    /// Output format (text or json)
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

impl Cli {
    /// 入力ファイルのパスを解決
    ///
    /// 位置引数は `database=` 接頭辞の有無を問いません。
    ///
    /// # Errors
    ///
    /// 入力ファイルが指定されていない場合
    pub fn resolve_input_path(&self) -> Result<PathBuf, InputError> {
        if let Some(path) = &self.database {
            return Ok(path.clone());
        }

        let raw = self.input.as_deref().map(str::trim).unwrap_or_default();
        let path = raw.strip_prefix(DATABASE_ARG_PREFIX).unwrap_or(raw).trim();
        if path.is_empty() {
            return Err(InputError::MissingPath);
        }
        Ok(PathBuf::from(path))
    }
}
