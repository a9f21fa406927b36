// checkコマンドハンドラー
//
// スキーマ記述ファイルを読み込み、ライブのデータベースに対して
// 構造・参照整合性・正規化を検証してレポートを出力します。
// - 入力エラーはデータベースに接続する前に検出
// - 全クエリは1本の接続上で逐次実行し、終了時にプールを閉じる
// - レポートはファイルに書き出し、同じ内容を標準出力にも返す

use crate::adapters::database::DatabaseConnectionService;
use crate::adapters::probe::SqlxProbe;
use crate::adapters::query_log::{QueryLog, SqlLogFile};
use crate::cli::command_context::CommandContext;
use crate::cli::OutputFormat;
use crate::core::config::Dialect;
use crate::core::descriptor::TableDescriptor;
use crate::core::error::{InputError, IoError};
use crate::core::naming;
use crate::core::verdict::VerificationReport;
use crate::services::report_formatter::ReportFormatter;
use crate::services::schema_file_reader::SchemaFileReader;
use crate::services::verification_runner::VerificationRunner;
use anyhow::{Context, Result};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use sqlx::AnyPool;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// checkコマンドの入力パラメータ
#[derive(Debug, Clone)]
pub struct CheckCommand {
    /// スキーマ記述ファイル
    pub input_path: PathBuf,
    /// カスタム設定ファイルパス
    pub config_path: Option<PathBuf>,
    /// 環境名
    pub env: String,
    /// 方言の上書き
    pub dialect: Option<Dialect>,
    /// レポートファイル（指定されない場合は `refintnorm-<入力ファイル名>`）
    pub output_path: Option<PathBuf>,
    /// クエリログファイル
    pub sql_log_path: PathBuf,
    /// 出力フォーマット
    pub format: OutputFormat,
    /// プログレスバーを表示するかどうか
    pub show_progress: bool,
}

/// checkコマンドハンドラー
#[derive(Debug, Clone)]
pub struct CheckCommandHandler {
    reader: SchemaFileReader,
    formatter: ReportFormatter,
}

impl CheckCommandHandler {
    /// 新しいCheckCommandHandlerを作成
    pub fn new() -> Self {
        Self {
            reader: SchemaFileReader::new(),
            formatter: ReportFormatter::new(),
        }
    }

    /// checkコマンドを実行
    ///
    /// # Returns
    ///
    /// 標準出力に表示する文字列
    pub async fn execute(&self, command: &CheckCommand) -> Result<String> {
        debug!(input = %command.input_path.display(), env = %command.env, "Executing check command");

        let tables = self.read_tables(&command.input_path)?;
        let input_name = input_file_name(&command.input_path);

        let context = CommandContext::load(command.config_path.clone())?;
        let dialect = context.dialect(command.dialect);

        let mut log = SqlLogFile::create(&command.sql_log_path, &input_name)
            .with_context(|| "Failed to initialize query log")?;

        let pool = context.connect_pool(&command.env, dialect).await?;
        info!(dialect = %dialect, tables = tables.len(), "Connected to database");

        let db_service = DatabaseConnectionService::new();
        let result = self
            .verify_all(&pool, dialect, &tables, &mut log, command.show_progress)
            .await;
        db_service.close_pool(pool).await;
        let report = result?;

        let text = self.formatter.format_text(&report);
        let output_path = command
            .output_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(naming::report_file_name(&input_name)));
        write_report(&output_path, &text)?;
        info!(path = %output_path.display(), "Report written");

        match command.format {
            OutputFormat::Text => Ok(format!(
                "{}\n{} {}\n{} {}",
                text,
                "Report written to".green(),
                output_path.display(),
                "Query log written to".green(),
                log.path().display()
            )),
            OutputFormat::Json => self.formatter.format_json(&report),
        }
    }

    /// スキーマ記述ファイルを読み込み、1つ以上のテーブルがあることを確認
    fn read_tables(&self, input_path: &Path) -> Result<Vec<TableDescriptor>> {
        let tables = self
            .reader
            .parse_file(input_path)
            .with_context(|| "Failed to read schema description file")?;

        if tables.is_empty() {
            return Err(InputError::NoTables {
                path: input_path.display().to_string(),
            }
            .into());
        }
        Ok(tables)
    }

    /// 1本の接続上で全テーブルを検証
    ///
    /// 接続はこの関数のスコープを抜けるとプールに返却されます。
    async fn verify_all(
        &self,
        pool: &AnyPool,
        dialect: Dialect,
        tables: &[TableDescriptor],
        log: &mut dyn QueryLog,
        show_progress: bool,
    ) -> Result<VerificationReport> {
        let db_service = DatabaseConnectionService::new();
        let mut conn = db_service.acquire(pool).await?;
        let mut probe = SqlxProbe::new(&mut *conn, dialect, log);
        let runner = VerificationRunner::new(dialect);

        let progress = create_progress_bar(tables.len(), show_progress);
        let mut verdicts = Vec::with_capacity(tables.len());
        for table in tables {
            progress.set_message(table.name.clone());
            let verdict = runner
                .verify_table(&mut probe, table)
                .await
                .with_context(|| format!("Failed to verify table '{}'", table.name));
            let verdict = match verdict {
                Ok(verdict) => verdict,
                Err(e) => {
                    progress.abandon();
                    return Err(e);
                }
            };
            verdicts.push(verdict);
            progress.inc(1);
        }
        progress.finish_and_clear();

        Ok(VerificationReport::new(verdicts))
    }
}

impl Default for CheckCommandHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// 入力パスのファイル名部分
fn input_file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// テーブル数に応じたプログレスバーを作成
fn create_progress_bar(len: usize, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }

    let progress = ProgressBar::new(len as u64);
    let style = ProgressStyle::with_template("{spinner} [{bar:30}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> ");
    progress.set_style(style);
    progress
}

/// レポートをファイルに書き出す
fn write_report(path: &Path, text: &str) -> Result<(), IoError> {
    fs::write(path, text).map_err(|e| IoError::FileWrite {
        path: path.display().to_string(),
        cause: e.to_string(),
    })
}
