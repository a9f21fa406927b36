// 正規化チェッカー
//
// 3NF/BCNFを近似するヒューリスティック。
// 非キー属性の組 (X, Y) ごとに関数従属違反プローブを発行し、
// 1つでも違反があればテーブルは正規化されていないと判定します。

use crate::adapters::probe::DatabaseProbe;
use crate::adapters::query_builder::QueryBuilder;
use crate::core::config::Dialect;
use crate::core::descriptor::TableDescriptor;
use anyhow::Result;
use tracing::debug;

/// 正規化チェックサービス
#[derive(Debug, Clone, Copy)]
pub struct NormalizationService {
    builder: QueryBuilder,
}

impl NormalizationService {
    /// 新しいNormalizationServiceを作成
    pub fn new(dialect: Dialect) -> Self {
        Self {
            builder: QueryBuilder::new(dialect),
        }
    }

    /// 判定に使うキーカラムを決定
    ///
    /// 宣言されたプライマリキーがライブに存在すればそれを、
    /// なければ先頭のライブカラムを使います。
    pub fn key_column<'a>(table: &TableDescriptor, live_columns: &'a [String]) -> Option<&'a str> {
        table
            .primary_key
            .as_deref()
            .and_then(|pk| live_columns.iter().find(|c| c.as_str() == pk))
            .or_else(|| live_columns.first())
            .map(String::as_str)
    }

    /// 検査対象の (決定項, 従属項) の組を列挙
    ///
    /// 決定項は非キーかつ外部キーでないカラム、従属項は決定項以外の非キーカラムです。
    pub fn candidate_pairs(table: &TableDescriptor, live_columns: &[String]) -> Vec<(String, String)> {
        let key = Self::key_column(table, live_columns);
        let non_key: Vec<&String> = live_columns
            .iter()
            .filter(|c| Some(c.as_str()) != key)
            .collect();

        let mut pairs = Vec::new();
        for determinant in non_key.iter().filter(|c| !table.is_foreign_key_column(c)) {
            for dependent in non_key.iter().filter(|c| *c != determinant) {
                pairs.push((determinant.to_string(), dependent.to_string()));
            }
        }
        pairs
    }

    /// テーブルの正規化を検証
    ///
    /// ライブのカラムが1つもないテーブルは正規化済みとみなします。
    pub async fn check(&self, probe: &mut dyn DatabaseProbe, table: &TableDescriptor) -> Result<bool> {
        let live_columns = probe.list_columns(&table.name).await?;
        if live_columns.is_empty() {
            return Ok(true);
        }

        for (determinant, dependent) in Self::candidate_pairs(table, &live_columns) {
            let query = self
                .builder
                .fd_violation_query(&table.name, &determinant, &dependent);

            if probe.execute_scalar(&query).await? > 0 {
                debug!(
                    table = %table.name,
                    determinant = %determinant,
                    dependent = %dependent,
                    "Functional dependency violation detected"
                );
                return Ok(false);
            }
        }

        Ok(true)
    }
}
