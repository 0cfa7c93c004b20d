use crate::domain::model::{InputDocument, OutputPaths, TransformResult};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::Path;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &Path) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &Path,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn input_json(&self) -> &Path;
    fn output_json(&self) -> &Path;
    fn output_csv(&self) -> &Path;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<InputDocument>;
    async fn transform(&self, document: InputDocument) -> Result<TransformResult>;
    async fn load(&self, result: &TransformResult) -> Result<OutputPaths>;
}
