pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use app::{filter_confirmed_drugs, run_pipeline};
pub use config::{cli::LocalStorage, PipelineConfig};
pub use crate::core::etl::{EtlEngine, RunOutcome};
pub use domain::collection::IngredientSet;
pub use domain::model::{FilterStats, IngredientRecord, InputDocument, InputShape};
pub use utils::error::{FilterError, Result};
