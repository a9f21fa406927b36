// 構造バリデーターサービス
//
// 宣言されたテーブル・プライマリキー・外部キーのソースカラムが
// ライブのデータベースに存在するかを、最初の失敗で打ち切りながら検証します。
// 参照先テーブル/カラムの欠落は構造エラーとせず、参照整合性の失敗として扱います。

use crate::adapters::probe::DatabaseProbe;
use crate::core::descriptor::TableDescriptor;
use crate::core::error::StructuralFailure;
use anyhow::Result;

/// 構造バリデーターサービス
#[derive(Debug, Clone, Default)]
pub struct StructuralValidatorService;

impl StructuralValidatorService {
    /// 新しいStructuralValidatorServiceを作成
    pub fn new() -> Self {
        Self
    }

    /// テーブル記述子の構造を検証
    ///
    /// # Returns
    ///
    /// 外側の `Result` はクエリ実行エラー、内側は構造検証の結果です。
    pub async fn validate(
        &self,
        probe: &mut dyn DatabaseProbe,
        table: &TableDescriptor,
    ) -> Result<Result<(), StructuralFailure>> {
        if !probe.table_exists(&table.name).await? {
            return Ok(Err(StructuralFailure::TableMissing));
        }

        let Some(primary_key) = table.primary_key.as_deref() else {
            return Ok(Err(StructuralFailure::PrimaryKeyMissing));
        };

        if !probe.column_exists(&table.name, primary_key).await? {
            return Ok(Err(StructuralFailure::PrimaryKeyColumnMissing));
        }

        for fk in &table.foreign_keys {
            if !probe.column_exists(&table.name, &fk.column).await? {
                return Ok(Err(StructuralFailure::ForeignKeyColumnMissing {
                    column: fk.column.clone(),
                }));
            }
        }

        Ok(Ok(()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::ScriptedProbe;
    use crate::services::schema_line_parser::SchemaLineParser;

    fn table(line: &str) -> TableDescriptor {
        SchemaLineParser::new().parse_line(line).unwrap()
    }

    #[tokio::test]
    async fn test_valid_table() {
        let mut probe = ScriptedProbe::new()
            .with_table("t1", &["id", "v"])
            .with_table("t2", &["id", "t1id"]);

        let result = StructuralValidatorService::new()
            .validate(&mut probe, &table("T2(id(pk), t1id(fk:T1.id))"))
            .await
            .unwrap();

        assert_eq!(result, Ok(()));
    }

    #[tokio::test]
    async fn test_missing_table() {
        let mut probe = ScriptedProbe::new();

        let result = StructuralValidatorService::new()
            .validate(&mut probe, &table("T1(id(pk))"))
            .await
            .unwrap();

        assert_eq!(result, Err(StructuralFailure::TableMissing));
    }

    #[tokio::test]
    async fn test_missing_pk_declaration_regardless_of_columns() {
        let mut probe = ScriptedProbe::new().with_table("t1", &["id", "v"]);

        let result = StructuralValidatorService::new()
            .validate(&mut probe, &table("T1(id, v)"))
            .await
            .unwrap();

        assert_eq!(result, Err(StructuralFailure::PrimaryKeyMissing));
        // テーブル存在確認以外のクエリは発行されない
        assert_eq!(probe.issued(), vec!["check table t1"]);
    }

    #[tokio::test]
    async fn test_missing_pk_column() {
        let mut probe = ScriptedProbe::new().with_table("t1", &["key", "v"]);

        let result = StructuralValidatorService::new()
            .validate(&mut probe, &table("T1(id(pk), v)"))
            .await
            .unwrap();

        assert_eq!(result, Err(StructuralFailure::PrimaryKeyColumnMissing));
    }

    #[tokio::test]
    async fn test_missing_fk_column_reports_first_in_declaration_order() {
        let mut probe = ScriptedProbe::new().with_table("t3", &["id"]);

        let result = StructuralValidatorService::new()
            .validate(&mut probe, &table("T3(id(pk), a(fk:T1.id), b(fk:T2.id))"))
            .await
            .unwrap();

        assert_eq!(
            result,
            Err(StructuralFailure::ForeignKeyColumnMissing {
                column: "a".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_missing_referenced_table_is_not_structural() {
        let mut probe = ScriptedProbe::new().with_table("t2", &["id", "t1id"]);

        let result = StructuralValidatorService::new()
            .validate(&mut probe, &table("T2(id(pk), t1id(fk:T1.id))"))
            .await
            .unwrap();

        assert_eq!(result, Ok(()));
    }
}
