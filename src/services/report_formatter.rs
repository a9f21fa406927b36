// 結果レポートのフォーマッター
//
// テキスト形式の行レイアウトは後段のツールが解析するため、
// ヘッダー行・タブ区切りの本体・2行のサマリーの順を崩さないこと。

use crate::core::verdict::{TableVerdict, VerificationReport};
use anyhow::{Context, Result};
use serde::Serialize;

/// ヘッダー行
pub const REPORT_HEADER: &str = "referential integrity normalized";

/// 真偽値をY/Nに変換
pub fn yes_no(value: bool) -> &'static str {
    if value {
        "Y"
    } else {
        "N"
    }
}

/// JSON出力用のテーブル判定
#[derive(Debug, Clone, Serialize)]
pub struct TableVerdictOutput {
    pub table: String,
    pub referential_integrity: bool,
    pub normalized: bool,
    /// 構造検証の失敗理由（成功時は省略）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub structural_failure: Option<String>,
}

impl From<&TableVerdict> for TableVerdictOutput {
    fn from(verdict: &TableVerdict) -> Self {
        Self {
            table: verdict.table.clone(),
            referential_integrity: verdict.referential_integrity,
            normalized: verdict.normalized,
            structural_failure: verdict.failure().map(|f| f.to_string()),
        }
    }
}

/// JSON出力用のレポート
#[derive(Debug, Clone, Serialize)]
pub struct ReportOutput {
    pub tables: Vec<TableVerdictOutput>,
    pub database_referential_integrity: bool,
    pub database_normalized: bool,
}

impl From<&VerificationReport> for ReportOutput {
    fn from(report: &VerificationReport) -> Self {
        Self {
            tables: report.verdicts().iter().map(TableVerdictOutput::from).collect(),
            database_referential_integrity: report.database_referential_integrity(),
            database_normalized: report.database_normalized(),
        }
    }
}

/// レポートフォーマッター
#[derive(Debug, Clone, Default)]
pub struct ReportFormatter;

impl ReportFormatter {
    /// 新しいReportFormatterを作成
    pub fn new() -> Self {
        Self
    }

    /// テキスト形式に整形
    pub fn format_text(&self, report: &VerificationReport) -> String {
        let mut output = String::new();
        output.push_str(REPORT_HEADER);
        output.push('\n');

        for verdict in report.verdicts() {
            output.push_str(&format!(
                "{}\t\t{}\t\t{}\n",
                verdict.table,
                yes_no(verdict.referential_integrity),
                yes_no(verdict.normalized)
            ));
        }

        output.push('\n');
        output.push_str(&format!(
            "DB referential integrity: {}\n",
            yes_no(report.database_referential_integrity())
        ));
        output.push_str(&format!(
            "DB normalized: {}\n",
            yes_no(report.database_normalized())
        ));
        output
    }

    /// JSON形式に整形
    pub fn format_json(&self, report: &VerificationReport) -> Result<String> {
        serde_json::to_string_pretty(&ReportOutput::from(report))
            .with_context(|| "Failed to serialize report to JSON")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::StructuralFailure;

    fn sample_report() -> VerificationReport {
        VerificationReport::new(vec![
            TableVerdict::checked("t2".to_string(), true, true),
            TableVerdict::checked("t1".to_string(), true, false),
            TableVerdict::structurally_invalid(
                "ghost".to_string(),
                StructuralFailure::TableMissing,
                true,
            ),
        ])
    }

    #[test]
    fn test_format_text_layout() {
        let text = ReportFormatter::new().format_text(&sample_report());

        assert_eq!(
            text,
            "referential integrity normalized\n\
             ghost\t\tN\t\tY\n\
             t1\t\tY\t\tN\n\
             t2\t\tY\t\tY\n\
             \n\
             DB referential integrity: N\n\
             DB normalized: N\n"
        );
    }

    #[test]
    fn test_format_text_all_passing() {
        let report = VerificationReport::new(vec![TableVerdict::checked("t1".to_string(), true, true)]);
        let text = ReportFormatter::new().format_text(&report);

        assert!(text.ends_with("DB referential integrity: Y\nDB normalized: Y\n"));
    }

    #[test]
    fn test_format_json() {
        let json = ReportFormatter::new().format_json(&sample_report()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed["database_referential_integrity"], false);
        assert_eq!(parsed["tables"][0]["table"], "ghost");
        assert_eq!(parsed["tables"][0]["structural_failure"], "table-missing");
        assert!(parsed["tables"][1].get("structural_failure").is_none());
    }
}
