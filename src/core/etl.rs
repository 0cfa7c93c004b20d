use crate::core::{FilterStats, IngredientRecord, IngredientSet, OutputPaths, Pipeline};
use crate::utils::error::Result;
use crate::utils::monitor::{Phase, SystemMonitor};

/// 一次執行的結果，回傳給呼叫端再利用
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub confirmed: IngredientSet<IngredientRecord>,
    pub stats: FilterStats,
    /// dry run 時為 `None`
    pub outputs: Option<OutputPaths>,
}

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
    dry_run: bool,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
            dry_run: false,
        }
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub async fn run(&self) -> Result<RunOutcome> {
        tracing::info!("Starting confirmed drug filter");
        self.monitor.log_stats(Phase::Start);

        // Extract
        let document = self.pipeline.extract().await?;
        self.monitor.log_stats(Phase::Read);

        // Transform
        let result = self.pipeline.transform(document).await?;
        self.monitor.log_stats(Phase::Filter);
        println!("\n{}", result.stats);

        if self.dry_run {
            tracing::info!("🔍 Dry run - skipping output files");
            println!("\n🔍 Dry run: no files written");
            self.monitor.log_final_stats();
            return Ok(RunOutcome {
                confirmed: result.confirmed,
                stats: result.stats,
                outputs: None,
            });
        }

        // Load
        let outputs = self.pipeline.load(&result).await?;
        self.monitor.log_stats(Phase::Write);

        println!("\n🎉 Done!");
        self.monitor.log_final_stats();

        Ok(RunOutcome {
            confirmed: result.confirmed,
            stats: result.stats,
            outputs: Some(outputs),
        })
    }
}
