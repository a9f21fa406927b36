// 参照整合性チェッカー
//
// テーブルの全行数と、各外部キーでの内部結合件数が一致するかを検証します。
// 一致は厳密な等価で、未解決の行も重複一致の行も失敗になります。

use crate::adapters::probe::DatabaseProbe;
use crate::adapters::query_builder::QueryBuilder;
use crate::core::config::Dialect;
use crate::core::descriptor::TableDescriptor;
use anyhow::Result;
use tracing::debug;

/// 参照整合性チェックサービス
#[derive(Debug, Clone, Copy)]
pub struct ReferentialIntegrityService {
    builder: QueryBuilder,
}

impl ReferentialIntegrityService {
    /// 新しいReferentialIntegrityServiceを作成
    pub fn new(dialect: Dialect) -> Self {
        Self {
            builder: QueryBuilder::new(dialect),
        }
    }

    /// テーブルの参照整合性を検証
    ///
    /// 外部キーを持たないテーブルは常に整合とみなします。
    /// 参照先カラムが存在しない場合は結合クエリを発行せずに不整合とします。
    pub async fn check(&self, probe: &mut dyn DatabaseProbe, table: &TableDescriptor) -> Result<bool> {
        if !table.has_foreign_keys() {
            return Ok(true);
        }

        let total = probe
            .execute_scalar(&self.builder.count_rows_query(&table.name))
            .await?;

        for fk in &table.foreign_keys {
            if !probe
                .column_exists(&fk.referenced_table, &fk.referenced_column)
                .await?
            {
                debug!(
                    table = %table.name,
                    referenced = %format!("{}.{}", fk.referenced_table, fk.referenced_column),
                    "Referenced column does not exist"
                );
                return Ok(false);
            }

            let joined = probe
                .execute_scalar(&self.builder.join_count_query(&table.name, fk))
                .await?;

            if joined != total {
                debug!(
                    table = %table.name,
                    column = %fk.column,
                    total,
                    joined,
                    "Foreign key rows do not all resolve"
                );
                return Ok(false);
            }
        }

        Ok(true)
    }
}
