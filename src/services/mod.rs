// Services Layer
// スキーマの読み込み・検証・レポート作成を行うサービス層

pub mod config_loader;
pub mod database_config_resolver;
pub mod normalization;
pub mod referential_integrity;
pub mod report_formatter;
pub mod schema_file_reader;
pub mod schema_line_parser;
pub mod structural_validator;
pub mod verification_runner;

#[cfg(test)]
pub(crate) mod test_support;
