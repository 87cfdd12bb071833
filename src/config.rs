use crate::error::{ReconcileError, Result};
use serde::{Deserialize, Serialize};
use sheet_reconcile_common::layout::OUTPUT_FILE_NAME;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 出力先がディレクトリのときのファイル名
    pub output_file_name: String,
    /// この値未満の照合スコアを警告する（照合結果は変えない）
    pub low_score_warning: u8,
    pub show_progress: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_file_name: OUTPUT_FILE_NAME.into(),
            low_score_warning: 60,
            show_progress: true,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            config.validate()?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.validate()?;
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| ReconcileError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("sheet-reconcile").join("config.json"))
    }

    pub fn validate(&self) -> Result<()> {
        let name = self.output_file_name.trim();
        if name.is_empty() {
            return Err(ReconcileError::Config("出力ファイル名が空です".into()));
        }
        if name.contains('/') || name.contains('\\') {
            return Err(ReconcileError::Config(format!(
                "出力ファイル名にパス区切りは使えません: {}",
                name
            )));
        }
        if self.low_score_warning > 100 {
            return Err(ReconcileError::Config(format!(
                "警告スコアは0〜100で指定してください: {}",
                self.low_score_warning
            )));
        }
        Ok(())
    }

    pub fn set_output_file_name(&mut self, name: String) -> Result<()> {
        self.output_file_name = name;
        self.save()
    }

    pub fn set_low_score_warning(&mut self, score: u8) -> Result<()> {
        self.low_score_warning = score;
        self.save()
    }
}
