// SQL識別子クォートユーティリティ
//
// 検証クエリに埋め込む識別子を方言ごとにクォートします。
// ライブのカラム名は任意の文字列になり得るため、データクエリでは常にクォートします。

use crate::core::config::Dialect;

/// PostgreSQL/SQLite用識別子クォート（ダブルクォート）
///
/// 識別子内のダブルクォートは二重にエスケープします。
///
/// # Examples
/// ```
/// use checkdb::adapters::sql_quote::quote_identifier_ansi;
/// assert_eq!(quote_identifier_ansi("users"), r#""users""#);
/// assert_eq!(quote_identifier_ansi(r#"table"name"#), r#""table""name""#);
/// ```
pub fn quote_identifier_ansi(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// MySQL用識別子クォート（バッククォート）
///
/// 識別子内のバッククォートは二重にエスケープします。
///
/// # Examples
/// ```
/// use checkdb::adapters::sql_quote::quote_identifier_mysql;
/// assert_eq!(quote_identifier_mysql("users"), "`users`");
/// assert_eq!(quote_identifier_mysql("table`name"), "`table``name`");
/// ```
pub fn quote_identifier_mysql(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

/// 方言に応じて識別子をクォート
pub fn quote_identifier(dialect: Dialect, name: &str) -> String {
    match dialect {
        Dialect::PostgreSQL | Dialect::SQLite => quote_identifier_ansi(name),
        Dialect::MySQL => quote_identifier_mysql(name),
    }
}
