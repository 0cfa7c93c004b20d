use crate::domain::collection::IngredientSet;
use crate::domain::model::IngredientRecord;
use crate::utils::error::{FilterError, Result};
use serde::Serialize;

pub const LIST_SEPARATOR: &str = " | ";

pub const CSV_COLUMNS: [&str; 16] = [
    "ingredient",
    "canonical_name",
    "groq_confidence",
    "fda_search_term",
    "brand_names",
    "generic_names",
    "manufacturers",
    "dosage_forms",
    "warnings_count",
    "interactions_count",
    "adverse_count",
    "indications_count",
    "first_warning",
    "first_interaction",
    "first_adverse",
    "first_indication",
];

/// 一列 CSV，欄位順序與 `CSV_COLUMNS` 一致
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CsvRow {
    pub ingredient: String,
    pub canonical_name: String,
    pub groq_confidence: String,
    pub fda_search_term: String,
    pub brand_names: String,
    pub generic_names: String,
    pub manufacturers: String,
    pub dosage_forms: String,
    pub warnings_count: usize,
    pub interactions_count: usize,
    pub adverse_count: usize,
    pub indications_count: usize,
    pub first_warning: String,
    pub first_interaction: String,
    pub first_adverse: String,
    pub first_indication: String,
}

pub fn join_values(values: &[String]) -> String {
    values.join(LIST_SEPARATOR)
}

fn first_or_empty(values: &[String]) -> String {
    values.first().cloned().unwrap_or_default()
}

impl CsvRow {
    pub fn from_record(ingredient: &str, record: &IngredientRecord) -> Self {
        Self {
            ingredient: ingredient.to_string(),
            canonical_name: record.canonical_name.clone().unwrap_or_default(),
            groq_confidence: record.groq_confidence.to_string(),
            fda_search_term: record.fda_search_term.clone().unwrap_or_default(),
            brand_names: join_values(&record.brand_names),
            generic_names: join_values(&record.generic_names),
            manufacturers: join_values(&record.manufacturers),
            dosage_forms: join_values(&record.dosage_forms),
            warnings_count: record.warnings.len(),
            interactions_count: record.drug_interactions.len(),
            adverse_count: record.adverse_reactions.len(),
            indications_count: record.indications.len(),
            first_warning: first_or_empty(&record.warnings),
            first_interaction: first_or_empty(&record.drug_interactions),
            first_adverse: first_or_empty(&record.adverse_reactions),
            first_indication: first_or_empty(&record.indications),
        }
    }
}

pub fn build_rows(confirmed: &IngredientSet<IngredientRecord>) -> Vec<CsvRow> {
    confirmed
        .iter()
        .map(|(ingredient, record)| CsvRow::from_record(ingredient, record))
        .collect()
}

/// 縮排兩格的 JSON，非 ASCII 字元照原樣輸出
pub fn render_json(confirmed: &IngredientSet<IngredientRecord>) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec_pretty(confirmed)?)
}

/// 表頭一定會寫出，即使沒有任何確認的藥物
pub fn render_csv(rows: &[CsvRow]) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(CSV_COLUMNS)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    writer
        .into_inner()
        .map_err(|e| FilterError::IoError(e.into_error()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Confidence, Flag};

    fn aspirin() -> IngredientRecord {
        IngredientRecord {
            ingredient: "aspirin".to_string(),
            is_drug: Flag::Bool(true),
            fda_found: Flag::Bool(true),
            warnings: vec!["w1".to_string(), "w2".to_string()],
            ..IngredientRecord::default()
        }
    }

    fn read_back(bytes: &[u8]) -> Vec<csv::StringRecord> {
        csv::Reader::from_reader(bytes)
            .records()
            .collect::<std::result::Result<_, _>>()
            .unwrap()
    }

    #[test]
    fn test_join_values() {
        assert_eq!(join_values(&[]), "");
        assert_eq!(join_values(&["A".to_string()]), "A");
        assert_eq!(join_values(&["A".to_string(), "B".to_string()]), "A | B");
    }

    #[test]
    fn test_row_from_record() {
        let row = CsvRow::from_record("aspirin", &aspirin());

        assert_eq!(row.canonical_name, "");
        assert_eq!(row.groq_confidence, "0.0");
        assert_eq!(row.fda_search_term, "");
        assert_eq!(row.brand_names, "");
        assert_eq!(row.warnings_count, 2);
        assert_eq!(row.first_warning, "w1");
        assert_eq!(row.interactions_count, 0);
        assert_eq!(row.first_interaction, "");
    }

    #[test]
    fn test_csv_header_only_when_empty() {
        let bytes = render_csv(&[]).unwrap();
        let text = String::from_utf8(bytes).unwrap();

        assert_eq!(text, format!("{}\n", CSV_COLUMNS.join(",")));
    }

    #[test]
    fn test_csv_quotes_separators() {
        let mut record = aspirin();
        record.canonical_name = Some("Acetylsalicylic acid, 81mg".to_string());
        record.brand_names = vec!["Bayer".to_string(), "Ecotrin".to_string()];
        record.groq_confidence = Confidence::from(0.9);

        let bytes = render_csv(&[CsvRow::from_record("aspirin", &record)]).unwrap();
        let text = String::from_utf8(bytes.clone()).unwrap();
        assert!(text.contains("\"Acetylsalicylic acid, 81mg\""));

        let rows = read_back(&bytes);
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][0], "aspirin");
        assert_eq!(&rows[0][1], "Acetylsalicylic acid, 81mg");
        assert_eq!(&rows[0][2], "0.9");
        assert_eq!(&rows[0][4], "Bayer | Ecotrin");
        assert_eq!(&rows[0][8], "2");
        assert_eq!(&rows[0][12], "w1");
    }

    #[test]
    fn test_integer_confidence_is_written_as_is() {
        let mut record = aspirin();
        record.groq_confidence = serde_json::from_str("1").unwrap();

        let bytes = render_csv(&[CsvRow::from_record("aspirin", &record)]).unwrap();
        assert_eq!(&read_back(&bytes)[0][2], "1");

        let confirmed: IngredientSet<IngredientRecord> =
            vec![("aspirin".to_string(), record)].into_iter().collect();
        let written: serde_json::Value =
            serde_json::from_slice(&render_json(&confirmed).unwrap()).unwrap();
        assert_eq!(written["aspirin"]["groq_confidence"], serde_json::json!(1));
    }

    #[test]
    fn test_json_keeps_non_ascii() {
        let mut record = aspirin();
        record.canonical_name = Some("Ácido acetilsalicílico".to_string());
        let confirmed: IngredientSet<IngredientRecord> =
            vec![("aspirin".to_string(), record)].into_iter().collect();

        let text = String::from_utf8(render_json(&confirmed).unwrap()).unwrap();

        assert!(text.contains("Ácido acetilsalicílico"));
        assert!(text.starts_with("{\n  \"aspirin\": {\n    \"ingredient\": \"aspirin\""));
    }
}
