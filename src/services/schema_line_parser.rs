// スキーマ行パーサー
//
// `name(col1, col2(pk), col3(fk:Other.Ref), ...)` 形式の1行を
// テーブル記述子に変換します。形式に一致しない行は黙って読み飛ばします。
// データベースには依存しない純粋な処理です。

use crate::core::descriptor::{ForeignKey, TableDescriptor};
use regex::Regex;
use std::sync::LazyLock;

/// 行全体の `Name(...)` パターン
static TABLE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([A-Za-z_][A-Za-z0-9_]*)\s*\((.*)\)\s*$")
        .expect("table declaration pattern is a valid regex")
});

/// カラム内の `(fk:Table.Column)` タグ
static FK_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\(\s*fk\s*:\s*([A-Za-z_][A-Za-z0-9_]*)\s*\.\s*([A-Za-z_][A-Za-z0-9_]*)\s*\)")
        .expect("foreign key tag pattern is a valid regex")
});

/// プライマリキータグ（空白除去・小文字化後に比較）
const PK_TAG: &str = "(pk)";

/// 括弧の深さ0にあるカンマだけで分割
///
/// タグ自体が括弧を含むため（`(pk)`, `(fk:T.c)`）、単純な分割はできません。
/// 各要素は前後の空白を除去して返します。
pub fn split_top_level(body: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut depth: i32 = 0;

    for ch in body.chars() {
        match ch {
            '(' => {
                depth += 1;
                current.push(ch);
            }
            ')' => {
                depth -= 1;
                current.push(ch);
            }
            ',' if depth == 0 => {
                parts.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(ch),
        }
    }

    if !current.is_empty() {
        parts.push(current.trim().to_string());
    }

    parts
}

/// カラム定義に `(pk)` タグが含まれるか
fn has_pk_tag(definition: &str) -> bool {
    let compact: String = definition
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase();
    compact.contains(PK_TAG)
}

/// スキーマ行パーサー
#[derive(Debug, Clone, Default)]
pub struct SchemaLineParser;

impl SchemaLineParser {
    /// 新しいSchemaLineParserを作成
    pub fn new() -> Self {
        Self
    }

    /// 1行をテーブル記述子に変換
    ///
    /// # Returns
    ///
    /// `Name(...)` 形式に一致しない場合は `None`
    pub fn parse_line(&self, line: &str) -> Option<TableDescriptor> {
        let captures = TABLE_PATTERN.captures(line)?;
        let mut table = TableDescriptor::new(captures[1].trim().to_lowercase());

        for definition in split_top_level(&captures[2]) {
            let name = definition
                .split('(')
                .next()
                .unwrap_or_default()
                .trim()
                .to_lowercase();
            if name.is_empty() {
                continue;
            }

            // 複数指定された場合は最後のカラムが優先
            if has_pk_tag(&definition) {
                table.primary_key = Some(name.clone());
            }

            if let Some(fk) = FK_PATTERN.captures(&definition) {
                table.foreign_keys.push(ForeignKey::new(
                    name.clone(),
                    fk[1].to_lowercase(),
                    fk[2].to_lowercase(),
                ));
            }

            table.columns.push(name);
        }

        Some(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Option<TableDescriptor> {
        SchemaLineParser::new().parse_line(line)
    }

    #[test]
    fn test_split_top_level_respects_nested_parentheses() {
        let parts = split_top_level("id(pk), data(fk:Other.id), note");
        assert_eq!(parts, vec!["id(pk)", "data(fk:Other.id)", "note"]);
    }

    #[test]
    fn test_split_top_level_keeps_empty_segments() {
        assert_eq!(split_top_level("a,,b"), vec!["a", "", "b"]);
        assert!(split_top_level("").is_empty());
    }

    #[test]
    fn test_parse_full_declaration() {
        let table = parse("T2(id(pk), t1id(fk:T1.id), note)").unwrap();

        assert_eq!(table.name, "t2");
        assert_eq!(table.columns, vec!["id", "t1id", "note"]);
        assert_eq!(table.primary_key.as_deref(), Some("id"));
        assert_eq!(
            table.foreign_keys,
            vec![ForeignKey::new(
                "t1id".to_string(),
                "t1".to_string(),
                "id".to_string()
            )]
        );
    }

    #[test]
    fn test_parse_is_case_folded() {
        assert_eq!(parse("Orders(ID(pk))"), parse("orders(id(pk))"));
        assert_eq!(parse("Orders(ID(PK))").unwrap().primary_key.as_deref(), Some("id"));
    }

    #[test]
    fn test_parse_is_idempotent() {
        let line = "Enroll(sid(pk), cid(fk:Course.cid), grade)";
        assert_eq!(parse(line), parse(line));
    }

    #[test]
    fn test_tags_tolerate_whitespace() {
        let table = parse("  t3 ( a ( PK ) , b ( fk : T1 . id ) )  ").unwrap();

        assert_eq!(table.name, "t3");
        assert_eq!(table.primary_key.as_deref(), Some("a"));
        assert_eq!(table.foreign_keys.len(), 1);
        assert_eq!(table.foreign_keys[0].column, "b");
        assert_eq!(table.foreign_keys[0].referenced_table, "t1");
    }

    #[test]
    fn test_last_pk_tag_wins() {
        let table = parse("t(a(pk), b(pk))").unwrap();
        assert_eq!(table.primary_key.as_deref(), Some("b"));
    }

    #[test]
    fn test_missing_pk_is_none() {
        let table = parse("t(a, b)").unwrap();
        assert!(table.primary_key.is_none());
        assert!(table.foreign_keys.is_empty());
    }

    #[test]
    fn test_only_first_fk_tag_per_column() {
        let table = parse("t(id(pk), a(fk:X.x)(fk:Y.y))").unwrap();
        assert_eq!(table.foreign_keys.len(), 1);
        assert_eq!(table.foreign_keys[0].referenced_table, "x");
    }

    #[test]
    fn test_column_can_be_pk_and_fk() {
        let table = parse("profile(uid(pk)(fk:Users.uid), bio)").unwrap();
        assert_eq!(table.primary_key.as_deref(), Some("uid"));
        assert!(table.is_foreign_key_column("uid"));
    }

    #[test]
    fn test_empty_column_names_are_skipped() {
        let table = parse("t(a, , (pk), b)").unwrap();
        assert_eq!(table.columns, vec!["a", "b"]);
        assert!(table.primary_key.is_none());
    }

    #[test]
    fn test_non_declarations_return_none() {
        assert!(parse("-- comment").is_none());
        assert!(parse("no parentheses here").is_none());
        assert!(parse("1abc(id(pk))").is_none());
        assert!(parse("t(id(pk)) trailing").is_none());
    }
}
