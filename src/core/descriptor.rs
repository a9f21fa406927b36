// テーブル記述子
//
// スキーマ記述ファイルの1行から得られるテーブル定義を表現します。
// パース後は不変で、以降の検証処理はすべて参照のみを行います。

use serde::Serialize;

/// 外部キー宣言
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForeignKey {
    /// 参照元カラム
    pub column: String,
    /// 参照先テーブル
    pub referenced_table: String,
    /// 参照先カラム
    pub referenced_column: String,
}

impl ForeignKey {
    /// 新しい外部キー宣言を作成
    pub fn new(column: String, referenced_table: String, referenced_column: String) -> Self {
        Self {
            column,
            referenced_table,
            referenced_column,
        }
    }
}

/// テーブル記述子
///
/// 名前はすべて小文字に正規化済みです。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableDescriptor {
    /// テーブル名
    pub name: String,
    /// 宣言順のカラム名
    pub columns: Vec<String>,
    /// プライマリキー（単一カラム）
    pub primary_key: Option<String>,
    /// 外部キー宣言（宣言順）
    pub foreign_keys: Vec<ForeignKey>,
}

impl TableDescriptor {
    /// 新しいテーブル記述子を作成
    pub fn new(name: String) -> Self {
        Self {
            name,
            columns: Vec::new(),
            primary_key: None,
            foreign_keys: Vec::new(),
        }
    }

    /// 外部キーを持つかどうか
    pub fn has_foreign_keys(&self) -> bool {
        !self.foreign_keys.is_empty()
    }

    /// 指定したカラムが外部キーかどうか
    pub fn is_foreign_key_column(&self, column: &str) -> bool {
        self.foreign_keys.iter().any(|fk| fk.column == column)
    }
}
