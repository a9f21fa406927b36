use anyhow::{Context, Result};
use checkdb::cli::commands::check::{CheckCommand, CheckCommandHandler};
use checkdb::cli::Cli;
use checkdb::core::config::Dialect;
use clap::Parser;
use colored::control as color_control;
use std::io::IsTerminal;
use std::process;
use tracing_subscriber::EnvFilter;

/// 既定のログレベル
const DEFAULT_LOG_FILTER: &str = "warn";

/// `--verbose` 指定時のログレベル
const VERBOSE_LOG_FILTER: &str = "checkdb=debug";

fn main() {
    sqlx::any::install_default_drivers();

    // CLIをパースして実行
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // 非同期ランタイムを作成して実行
    let runtime = tokio::runtime::Runtime::new()
        .context("Failed to create Tokio runtime")
        .unwrap_or_else(|e| {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        });

    let result = runtime.block_on(run_command(cli));

    match result {
        Ok(output) => {
            if !output.is_empty() {
                println!("{}", output);
            }
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}

/// トレーシングを初期化する
///
/// `RUST_LOG` が設定されていればそれを優先します。
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new(VERBOSE_LOG_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// コマンドを実行する
async fn run_command(cli: Cli) -> Result<String> {
    // --no-color フラグの処理
    if cli.no_color {
        color_control::set_override(false);
    }

    let input_path = cli.resolve_input_path()?;
    let dialect = cli
        .dialect
        .as_deref()
        .map(str::parse::<Dialect>)
        .transpose()?;

    let command = CheckCommand {
        input_path,
        config_path: cli.config,
        env: cli.env,
        dialect,
        output_path: cli.output,
        sql_log_path: cli.sql_log,
        format: cli.format,
        show_progress: std::io::stderr().is_terminal(),
    };

    CheckCommandHandler::new().execute(&command).await
}
