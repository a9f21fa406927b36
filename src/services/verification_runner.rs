// 検証ランナー
//
// テーブル記述子をファイル順に1つずつ検証し、判定を集約してレポートを作成します。
// 構造エラーはテーブル単位の判定に吸収され、クエリ実行エラーは実行全体を中断します。

use crate::adapters::probe::DatabaseProbe;
use crate::core::config::Dialect;
use crate::core::descriptor::TableDescriptor;
use crate::core::verdict::{TableVerdict, VerificationReport};
use crate::services::normalization::NormalizationService;
use crate::services::referential_integrity::ReferentialIntegrityService;
use crate::services::structural_validator::StructuralValidatorService;
use anyhow::{Context, Result};
use tracing::{debug, info};

/// 検証ランナー
#[derive(Debug, Clone)]
pub struct VerificationRunner {
    validator: StructuralValidatorService,
    integrity: ReferentialIntegrityService,
    normalization: NormalizationService,
}

impl VerificationRunner {
    /// 新しいVerificationRunnerを作成
    pub fn new(dialect: Dialect) -> Self {
        Self {
            validator: StructuralValidatorService::new(),
            integrity: ReferentialIntegrityService::new(dialect),
            normalization: NormalizationService::new(dialect),
        }
    }

    /// 1テーブルを検証
    ///
    /// 構造検証に失敗した場合も、ライブのカラムに対して正規化チェックを試みます。
    ///
    /// # Errors
    ///
    /// クエリの実行に失敗した場合
    pub async fn verify_table(
        &self,
        probe: &mut dyn DatabaseProbe,
        table: &TableDescriptor,
    ) -> Result<TableVerdict> {
        let structure = self.validator.validate(probe, table).await?;

        let verdict = match structure {
            Ok(()) => {
                let integrity = self.integrity.check(probe, table).await?;
                let normalized = self.normalization.check(probe, table).await?;
                TableVerdict::checked(table.name.clone(), integrity, normalized)
            }
            Err(failure) => {
                debug!(table = %table.name, reason = %failure, "Structural validation failed");
                let normalized = self.normalization.check(probe, table).await?;
                TableVerdict::structurally_invalid(table.name.clone(), failure, normalized)
            }
        };

        info!(
            table = %verdict.table,
            referential_integrity = verdict.referential_integrity,
            normalized = verdict.normalized,
            "Table verified"
        );
        Ok(verdict)
    }

    /// すべてのテーブルを順に検証してレポートを作成
    pub async fn run(
        &self,
        probe: &mut dyn DatabaseProbe,
        tables: &[TableDescriptor],
    ) -> Result<VerificationReport> {
        let mut verdicts = Vec::with_capacity(tables.len());
        for table in tables {
            let verdict = self
                .verify_table(probe, table)
                .await
                .with_context(|| format!("Failed to verify table '{}'", table.name))?;
            verdicts.push(verdict);
        }
        Ok(VerificationReport::new(verdicts))
    }
}
