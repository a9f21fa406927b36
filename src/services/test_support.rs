// テスト用のスクリプト化されたプローブ
//
// ライブのデータベースの代わりに、あらかじめ登録したテーブル定義と
// クエリ見出しごとの戻り値で応答します。

use crate::adapters::probe::DatabaseProbe;
use crate::adapters::query_builder::VerificationQuery;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Default)]
pub struct ScriptedProbe {
    tables: HashMap<String, Vec<String>>,
    scalars: HashMap<String, i64>,
    failing: HashSet<String>,
    issued: Vec<String>,
}

impl ScriptedProbe {
    pub fn new() -> Self {
        Self::default()
    }

    /// ライブのテーブルとカラムを登録
    pub fn with_table(mut self, name: &str, columns: &[&str]) -> Self {
        self.tables.insert(
            name.to_string(),
            columns.iter().map(|c| c.to_string()).collect(),
        );
        self
    }

    /// 見出しに対するスカラー値を登録
    pub fn with_scalar(mut self, header: &str, value: i64) -> Self {
        self.scalars.insert(header.to_string(), value);
        self
    }

    /// 見出しに対してクエリエラーを返す
    pub fn failing_on(mut self, header: &str) -> Self {
        self.failing.insert(header.to_string());
        self
    }

    /// 発行された見出しの一覧
    pub fn issued(&self) -> Vec<&str> {
        self.issued.iter().map(String::as_str).collect()
    }
}

#[async_trait]
impl DatabaseProbe for ScriptedProbe {
    async fn table_exists(&mut self, table: &str) -> Result<bool> {
        self.issued.push(format!("check table {}", table));
        Ok(self.tables.contains_key(table))
    }

    async fn column_exists(&mut self, table: &str, column: &str) -> Result<bool> {
        self.issued.push(format!("check column {}.{}", table, column));
        Ok(self
            .tables
            .get(table)
            .is_some_and(|columns| columns.iter().any(|c| c == column)))
    }

    async fn list_columns(&mut self, table: &str) -> Result<Vec<String>> {
        self.issued.push(format!("list columns {}", table));
        Ok(self.tables.get(table).cloned().unwrap_or_default())
    }

    async fn execute_scalar(&mut self, query: &VerificationQuery) -> Result<i64> {
        self.issued.push(query.header.clone());
        if self.failing.contains(&query.header) {
            return Err(anyhow!("scripted failure: {}", query.header));
        }

        match self.scalars.get(&query.header) {
            Some(value) => Ok(*value),
            // 未登録の関数従属プローブは違反なしとして扱う
            None if query.header.starts_with("FD check") => Ok(0),
            None => Err(anyhow!("unscripted query: {}", query.header)),
        }
    }
}
