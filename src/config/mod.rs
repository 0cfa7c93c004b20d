pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_distinct_paths, validate_path, Validate};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[cfg(feature = "cli")]
use crate::config::toml_config::TomlConfig;
#[cfg(feature = "cli")]
use clap::{Parser, ValueEnum};

pub const DEFAULT_BASE_DIR: &str = "data";
pub const DEFAULT_INPUT_FILE: &str = "File.json";
pub const DEFAULT_OUTPUT_JSON_FILE: &str = "confirmed_drugs.json";
pub const DEFAULT_OUTPUT_CSV_FILE: &str = "confirmed_drugs.csv";

/// 管道實際使用的三個路徑
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub input_json: PathBuf,
    pub output_json: PathBuf,
    pub output_csv: PathBuf,
}

impl PipelineConfig {
    /// 預設檔名放在指定目錄下
    pub fn in_dir(base_dir: impl AsRef<Path>) -> Self {
        let base_dir = base_dir.as_ref();
        Self {
            input_json: base_dir.join(DEFAULT_INPUT_FILE),
            output_json: base_dir.join(DEFAULT_OUTPUT_JSON_FILE),
            output_csv: base_dir.join(DEFAULT_OUTPUT_CSV_FILE),
        }
    }

    /// 有明確傳入的路徑優先，否則保留目前的值
    pub fn with_overrides(
        self,
        input_json: Option<PathBuf>,
        output_json: Option<PathBuf>,
        output_csv: Option<PathBuf>,
    ) -> Self {
        Self {
            input_json: input_json.unwrap_or(self.input_json),
            output_json: output_json.unwrap_or(self.output_json),
            output_csv: output_csv.unwrap_or(self.output_csv),
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::in_dir(DEFAULT_BASE_DIR)
    }
}

impl ConfigProvider for PipelineConfig {
    fn input_json(&self) -> &Path {
        &self.input_json
    }

    fn output_json(&self) -> &Path {
        &self.output_json
    }

    fn output_csv(&self) -> &Path {
        &self.output_csv
    }
}

impl Validate for PipelineConfig {
    fn validate(&self) -> Result<()> {
        validate_path("input_json", &self.input_json)?;
        validate_path("output_json", &self.output_json)?;
        validate_path("output_csv", &self.output_csv)?;

        validate_distinct_paths("output_json", &self.input_json, &self.output_json)?;
        validate_distinct_paths("output_csv", &self.input_json, &self.output_csv)?;
        validate_distinct_paths("output_csv", &self.output_json, &self.output_csv)?;

        Ok(())
    }
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "filter-confirmed-drugs")]
#[command(about = "Keep only confirmed drugs (is_drug + fda_found) and export them as JSON and CSV")]
pub struct CliConfig {
    /// Input JSON (clean output or progress file)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    #[arg(long)]
    pub output_json: Option<PathBuf>,

    #[arg(long)]
    pub output_csv: Option<PathBuf>,

    /// Directory holding the default file names
    #[arg(long)]
    pub base_dir: Option<PathBuf>,

    /// Optional TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log CPU and memory usage per phase")]
    pub monitor: bool,

    #[arg(long, help = "Filter and print the summary without writing files")]
    pub dry_run: bool,

    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

#[cfg(feature = "cli")]
impl CliConfig {
    pub fn load_toml(&self) -> Result<Option<TomlConfig>> {
        self.config
            .as_ref()
            .map(TomlConfig::from_file)
            .transpose()
    }

    /// 命令列 > TOML > 內建預設值
    pub fn pipeline_config(&self, toml: Option<&TomlConfig>) -> PipelineConfig {
        let base_dir = self
            .base_dir
            .clone()
            .or_else(|| toml.and_then(TomlConfig::base_dir))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_BASE_DIR));

        let config = match toml {
            Some(toml) => toml.pipeline_config(&base_dir),
            None => PipelineConfig::in_dir(&base_dir),
        };

        config.with_overrides(
            self.input.clone(),
            self.output_json.clone(),
            self.output_csv.clone(),
        )
    }

    pub fn monitor_enabled(&self, toml: Option<&TomlConfig>) -> bool {
        self.monitor || toml.is_some_and(TomlConfig::monitoring_enabled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths() {
        let config = PipelineConfig::default();

        assert_eq!(config.input_json, Path::new("data/File.json"));
        assert_eq!(config.output_json, Path::new("data/confirmed_drugs.json"));
        assert_eq!(config.output_csv, Path::new("data/confirmed_drugs.csv"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_explicit_override_wins() {
        let config = PipelineConfig::default().with_overrides(
            Some(PathBuf::from("/tmp/progress.json")),
            None,
            Some(PathBuf::from("/tmp/out.csv")),
        );

        assert_eq!(config.input_json, Path::new("/tmp/progress.json"));
        assert_eq!(config.output_json, Path::new("data/confirmed_drugs.json"));
        assert_eq!(config.output_csv, Path::new("/tmp/out.csv"));
    }

    #[test]
    fn test_output_overwriting_input_is_rejected() {
        let config = PipelineConfig::default().with_overrides(
            None,
            Some(PathBuf::from("data/File.json")),
            None,
        );

        assert!(config.validate().is_err());
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_cli_without_arguments_uses_defaults() {
        let cli = CliConfig::parse_from(["filter-confirmed-drugs"]);

        assert_eq!(cli.pipeline_config(None), PipelineConfig::default());
        assert!(!cli.monitor_enabled(None));
        assert_eq!(cli.log_format, LogFormat::Text);
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_cli_flags_override_toml() {
        let toml = TomlConfig::from_toml_str(
            r#"
[paths]
base_dir = "/srv/drugs"
output_csv = "export.csv"

[monitoring]
enabled = true
"#,
        )
        .unwrap();

        let cli = CliConfig::parse_from([
            "filter-confirmed-drugs",
            "--input",
            "merged.json",
            "--log-format",
            "json",
        ]);
        let config = cli.pipeline_config(Some(&toml));

        assert_eq!(config.input_json, Path::new("merged.json"));
        assert_eq!(config.output_json, Path::new("/srv/drugs/confirmed_drugs.json"));
        assert_eq!(config.output_csv, Path::new("/srv/drugs/export.csv"));
        assert!(cli.monitor_enabled(Some(&toml)));
        assert_eq!(cli.log_format, LogFormat::Json);
    }
}
