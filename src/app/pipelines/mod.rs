pub mod confirmed_pipeline;

pub use confirmed_pipeline::ConfirmedDrugsPipeline;
