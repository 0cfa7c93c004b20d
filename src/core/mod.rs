pub mod etl;
pub mod filter;
pub mod normalize;
pub mod report;

pub use crate::domain::collection::IngredientSet;
pub use crate::domain::model::{
    FilterStats, IngredientRecord, InputDocument, InputShape, OutputPaths, TransformResult,
};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
