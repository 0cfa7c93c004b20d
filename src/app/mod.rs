pub mod pipelines;

use crate::config::cli::LocalStorage;
use crate::config::PipelineConfig;
use crate::core::etl::{EtlEngine, RunOutcome};
use crate::core::{IngredientRecord, IngredientSet};
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use pipelines::ConfirmedDrugsPipeline;
use std::path::PathBuf;

/// 依設定跑完整個流程（讀取、轉換、過濾、寫檔）
pub async fn run_pipeline(
    config: PipelineConfig,
    monitor_enabled: bool,
    dry_run: bool,
) -> Result<RunOutcome> {
    config.validate()?;
    tracing::debug!("Pipeline config: {:?}", config);

    let pipeline = ConfirmedDrugsPipeline::new(LocalStorage::new(), config);
    EtlEngine::new_with_monitoring(pipeline, monitor_enabled)
        .with_dry_run(dry_run)
        .run()
        .await
}

/// 三個路徑都可省略，省略時使用預設路徑；回傳確認的藥物
pub async fn filter_confirmed_drugs(
    input_json: Option<PathBuf>,
    output_json: Option<PathBuf>,
    output_csv: Option<PathBuf>,
) -> Result<IngredientSet<IngredientRecord>> {
    let config = PipelineConfig::default().with_overrides(input_json, output_json, output_csv);
    let outcome = run_pipeline(config, false, false).await?;
    Ok(outcome.confirmed)
}
