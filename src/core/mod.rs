// Core Domain
// テーブル記述子、検証結果、設定、エラーなどの純粋なドメインモデル

pub mod config;
pub mod descriptor;
pub mod error;
pub mod naming;
pub mod verdict;
