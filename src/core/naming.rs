// 命名ポリシー
//
// アプリケーション名と関連パスの単一ソースを提供します。

/// 現行アプリケーション名
pub const APP_NAME: &str = "checkdb";

/// 既定の設定ファイル名
pub const CONFIG_FILE: &str = ".checkdb.yaml";

/// 既定のクエリログファイル名
pub const SQL_LOG_FILE: &str = "checkdb.sql";

/// 結果レポートファイル名の接頭辞
pub const REPORT_PREFIX: &str = "refintnorm-";

/// 入力ファイル名から既定のレポートファイル名を生成
///
/// `schema/db1.txt` なら `refintnorm-db1.txt` になります。
pub fn report_file_name(input_file_name: &str) -> String {
    format!("{}{}", REPORT_PREFIX, input_file_name)
}
