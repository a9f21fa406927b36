// Checkdbライブラリのエントリーポイント
//
// モジュール構造:
// - cli: CLIレイヤー（ユーザー入力の受付とコマンドルーティング）
// - core: ドメインモデル（テーブル記述子、判定、設定、エラー）
// - adapters: データベース接続・検証クエリ・クエリログへのアクセスを抽象化
// - services: スキーマの読み込みと検証ロジック

pub mod adapters;
pub mod cli;
pub mod core;
pub mod services;
