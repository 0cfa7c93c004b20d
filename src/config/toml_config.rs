use crate::config::PipelineConfig;
use crate::utils::error::{FilterError, Result};
use crate::utils::validation::{validate_path, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub paths: PathsConfig,
    pub monitoring: Option<MonitoringConfig>,
}

/// 相對路徑以 `base_dir` 為基準
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsConfig {
    pub base_dir: Option<PathBuf>,
    pub input_json: Option<PathBuf>,
    pub output_json: Option<PathBuf>,
    pub output_csv: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| FilterError::FileReadError {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| FilterError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${DATA_DIR})，找不到的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| FilterError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.into_owned())
    }

    pub fn base_dir(&self) -> Option<PathBuf> {
        self.paths.base_dir.clone()
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().is_some_and(|m| m.enabled)
    }

    pub fn pipeline_config(&self, base_dir: &Path) -> PipelineConfig {
        let resolve = |path: &Option<PathBuf>| path.as_ref().map(|p| base_dir.join(p));

        PipelineConfig::in_dir(base_dir).with_overrides(
            resolve(&self.paths.input_json),
            resolve(&self.paths.output_json),
            resolve(&self.paths.output_csv),
        )
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        let fields = [
            ("paths.base_dir", &self.paths.base_dir),
            ("paths.input_json", &self.paths.input_json),
            ("paths.output_json", &self.paths.output_json),
            ("paths.output_csv", &self.paths.output_csv),
        ];

        for (field, value) in fields {
            if let Some(path) = value {
                validate_path(field, path)?;
            }
        }
        Ok(())
    }
}
