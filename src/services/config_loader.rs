// 設定ファイル読み込みサービス
//
// core::config の純粋性を保つため、ファイルI/Oはこのサービスに集約する。

use crate::core::config::Config;
use anyhow::{Context, Result};
use std::path::Path;

/// 設定ファイル読み込みサービス
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader;

impl ConfigLoader {
    /// YAMLファイルから設定を読み込む
    pub fn from_file(path: &Path) -> Result<Config> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let config: Config =
            serde_saphyr::from_str(&content).with_context(|| "Failed to parse config file")?;
        config
            .validate()
            .with_context(|| format!("Invalid config file: {:?}", path))?;
        Ok(config)
    }

    /// 設定を読み込む
    ///
    /// 明示的に指定されたファイルは存在しなければエラー、
    /// デフォルトパスのファイルが存在しなければ既定値を返します。
    pub fn load(custom_path: Option<&Path>) -> Result<Config> {
        match custom_path {
            Some(path) => {
                if !path.exists() {
                    return Err(anyhow::anyhow!("Config file not found: {:?}", path));
                }
                Self::from_file(path)
            }
            None => {
                let path = Path::new(Config::DEFAULT_CONFIG_PATH);
                if path.exists() {
                    Self::from_file(path)
                } else {
                    Ok(Config::default())
                }
            }
        }
    }
}
