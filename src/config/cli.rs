use crate::core::Storage;
use crate::utils::error::{FilterError, Result};
use std::path::Path;

/// 本機檔案系統。不會自動建立輸出目錄，目錄不存在即視為錯誤。
#[derive(Debug, Clone, Default)]
pub struct LocalStorage;

impl LocalStorage {
    pub fn new() -> Self {
        Self
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &Path) -> Result<Vec<u8>> {
        tokio::fs::read(path)
            .await
            .map_err(|source| FilterError::FileReadError {
                path: path.to_path_buf(),
                source,
            })
    }

    async fn write_file(&self, path: &Path, data: &[u8]) -> Result<()> {
        tokio::fs::write(path, data)
            .await
            .map_err(|source| FilterError::FileWriteError {
                path: path.to_path_buf(),
                source,
            })
    }
}
