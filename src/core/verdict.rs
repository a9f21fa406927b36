// 検証結果モデル
//
// テーブルごとの判定と、データベース全体のサマリーを表現します。

use crate::core::error::StructuralFailure;

/// テーブル単位の判定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableVerdict {
    /// テーブル名
    pub table: String,
    /// 構造検証の結果
    pub structure: Result<(), StructuralFailure>,
    /// 参照整合性
    pub referential_integrity: bool,
    /// 正規化（3NF/BCNF近似）
    pub normalized: bool,
}

impl TableVerdict {
    /// 構造検証を通過したテーブルの判定を作成
    pub fn checked(table: String, referential_integrity: bool, normalized: bool) -> Self {
        Self {
            table,
            structure: Ok(()),
            referential_integrity,
            normalized,
        }
    }

    /// 構造検証に失敗したテーブルの判定を作成
    ///
    /// 参照整合性は常にfalseになります。
    pub fn structurally_invalid(table: String, failure: StructuralFailure, normalized: bool) -> Self {
        Self {
            table,
            structure: Err(failure),
            referential_integrity: false,
            normalized,
        }
    }

    /// 構造検証を通過したかどうか
    pub fn is_structurally_valid(&self) -> bool {
        self.structure.is_ok()
    }

    /// 構造検証の失敗理由
    pub fn failure(&self) -> Option<&StructuralFailure> {
        self.structure.as_ref().err()
    }
}

/// 実行全体のレポート
///
/// 判定はテーブル名（大文字小文字を区別しない）でソートされます。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationReport {
    verdicts: Vec<TableVerdict>,
}

impl VerificationReport {
    /// 判定のリストからレポートを作成
    pub fn new(mut verdicts: Vec<TableVerdict>) -> Self {
        verdicts.sort_by_key(|v| v.table.to_lowercase());
        Self { verdicts }
    }

    /// ソート済みの判定
    pub fn verdicts(&self) -> &[TableVerdict] {
        &self.verdicts
    }

    /// テーブル数
    pub fn table_count(&self) -> usize {
        self.verdicts.len()
    }

    /// データベース全体の参照整合性
    pub fn database_referential_integrity(&self) -> bool {
        self.verdicts.iter().all(|v| v.referential_integrity)
    }

    /// データベース全体の正規化
    pub fn database_normalized(&self) -> bool {
        self.verdicts.iter().all(|v| v.normalized)
    }
}
