use crate::core::filter::filter_confirmed;
use crate::core::normalize::{decode_document, normalize};
use crate::core::report::{build_rows, render_csv, render_json};
use crate::core::{
    ConfigProvider, FilterStats, InputDocument, InputShape, OutputPaths, Pipeline, Storage,
    TransformResult,
};
use crate::utils::error::Result;

/// 讀取合併後的成分檔，只留下 is_drug 與 fda_found 都成立的記錄
pub struct ConfirmedDrugsPipeline<S: Storage, C: ConfigProvider> {
    pub(crate) storage: S,
    pub(crate) config: C,
}

impl<S: Storage, C: ConfigProvider> ConfirmedDrugsPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for ConfirmedDrugsPipeline<S, C> {
    async fn extract(&self) -> Result<InputDocument> {
        let input = self.config.input_json();
        println!("📂 Reading: {}", input.display());

        let bytes = self.storage.read_file(input).await?;
        tracing::debug!("Read {} bytes from {}", bytes.len(), input.display());

        let document = decode_document(&bytes, input)?;
        println!("📋 Total ingredients in file: {}", document.len());

        Ok(document)
    }

    async fn transform(&self, document: InputDocument) -> Result<TransformResult> {
        let shape = document.shape();
        let total_input = document.len();

        match shape {
            InputShape::Progress => {
                println!("📁 Type: {} - converting to clean structure...", shape)
            }
            InputShape::Canonical => println!("📁 Type: {}", shape),
        }

        let normalized = normalize(document);
        if shape == InputShape::Progress {
            println!("   ✅ Converted entries: {}", normalized.records.len());
            tracing::info!(
                "Skipped {} unfinished progress entries",
                normalized.dropped_unfinished
            );
        }

        let (confirmed, counts) = filter_confirmed(&normalized.records);
        let stats = FilterStats {
            total_input,
            dropped_unfinished: normalized.dropped_unfinished,
            ..counts
        };
        tracing::info!(
            confirmed = stats.confirmed,
            not_drug = stats.rejected_not_drug,
            not_found = stats.rejected_not_found,
            "Filter complete"
        );

        Ok(TransformResult {
            shape,
            confirmed,
            stats,
        })
    }

    async fn load(&self, result: &TransformResult) -> Result<OutputPaths> {
        // 兩份輸出都先產生好再寫檔
        let json_data = render_json(&result.confirmed)?;
        let rows = build_rows(&result.confirmed);
        let csv_data = render_csv(&rows)?;

        let json_path = self.config.output_json();
        self.storage.write_file(json_path, &json_data).await?;
        println!(
            "\n💾 JSON saved: {}  ({} drugs)",
            json_path.display(),
            result.confirmed.len()
        );

        let csv_path = self.config.output_csv();
        self.storage.write_file(csv_path, &csv_data).await?;
        println!("💾 CSV saved: {}  ({} rows)", csv_path.display(), rows.len());

        Ok(OutputPaths {
            json: json_path.to_path_buf(),
            csv: csv_path.to_path_buf(),
        })
    }
}
