// Adapters
// データベースとファイルシステムへのアクセスを抽象化

pub mod connection_string;
pub mod database;
pub mod probe;
pub mod query_builder;
pub mod query_log;
pub mod sql_quote;
