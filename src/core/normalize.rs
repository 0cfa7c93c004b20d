use crate::domain::collection::IngredientSet;
use crate::domain::model::{IngredientRecord, InputDocument, InputShape, ProgressEntry};
use crate::utils::error::{FilterError, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::path::Path;

/// 進度檔的判別欄位
const PROGRESS_MARKERS: [&str; 2] = ["groq_validation", "status"];

/// 看第一筆記錄判斷整份文件的結構
pub fn detect_shape(sample: &Value) -> InputShape {
    match sample {
        Value::Object(fields) if PROGRESS_MARKERS.iter().any(|key| fields.contains_key(*key)) => {
            InputShape::Progress
        }
        _ => InputShape::Canonical,
    }
}

/// 解析輸入 JSON 並決定結構，空物件直接視為錯誤
pub fn decode_document(bytes: &[u8], source: &Path) -> Result<InputDocument> {
    let raw: IngredientSet<Value> =
        serde_json::from_slice(bytes).map_err(|e| FilterError::InvalidJsonError {
            path: source.to_path_buf(),
            source: e,
        })?;

    let shape = match raw.first() {
        Some((_, sample)) => detect_shape(sample),
        None => {
            return Err(FilterError::EmptyInputError {
                path: source.to_path_buf(),
            })
        }
    };
    tracing::debug!("Detected input shape: {:?}", shape);

    match shape {
        InputShape::Canonical => Ok(InputDocument::Canonical(decode_records(raw)?)),
        InputShape::Progress => Ok(InputDocument::Progress(decode_progress(raw)?)),
    }
}

fn decode_record<T: DeserializeOwned>(ingredient: &str, value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(|source| FilterError::InvalidRecordError {
        ingredient: ingredient.to_string(),
        source,
    })
}

fn decode_records<T: DeserializeOwned>(raw: IngredientSet<Value>) -> Result<IngredientSet<T>> {
    raw.into_iter()
        .map(|(ingredient, value)| {
            let record = decode_record(&ingredient, value)?;
            Ok((ingredient, record))
        })
        .collect()
}

/// 未完成的項目不看內容，欄位型別不對也不會中斷
fn decode_progress(raw: IngredientSet<Value>) -> Result<IngredientSet<ProgressEntry>> {
    raw.into_iter()
        .map(|(ingredient, value)| {
            let entry = if ProgressEntry::is_done(&value) {
                ProgressEntry::Done(decode_record(&ingredient, value)?)
            } else {
                ProgressEntry::Unfinished {
                    status: value.get("status").cloned(),
                }
            };
            Ok((ingredient, entry))
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRecords {
    pub records: IngredientSet<IngredientRecord>,
    /// 狀態不是 "done" 而被略過的進度記錄數
    pub dropped_unfinished: usize,
}

pub fn normalize(document: InputDocument) -> NormalizedRecords {
    match document {
        InputDocument::Canonical(records) => NormalizedRecords {
            records: records
                .into_iter()
                .map(|(ingredient, mut record)| {
                    if record.ingredient.is_empty() {
                        record.ingredient = ingredient.clone();
                    }
                    (ingredient, record)
                })
                .collect(),
            dropped_unfinished: 0,
        },
        InputDocument::Progress(records) => convert_progress(records),
    }
}

fn convert_progress(entries: IngredientSet<ProgressEntry>) -> NormalizedRecords {
    let mut converted = IngredientSet::new();
    let mut dropped_unfinished = 0;

    for (ingredient, entry) in entries {
        match entry {
            ProgressEntry::Done(progress) => {
                let record = progress.into_canonical(&ingredient);
                converted.insert(ingredient, record);
            }
            ProgressEntry::Unfinished { status } => {
                tracing::debug!("Skipping '{}' (status: {:?})", ingredient, status);
                dropped_unfinished += 1;
            }
        }
    }

    NormalizedRecords {
        records: converted,
        dropped_unfinished,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Flag;
    use serde_json::json;

    fn decode(value: Value) -> Result<InputDocument> {
        decode_document(value.to_string().as_bytes(), Path::new("test.json"))
    }

    #[test]
    fn test_detect_shape() {
        assert_eq!(detect_shape(&json!({"status": "done"})), InputShape::Progress);
        assert_eq!(detect_shape(&json!({"groq_validation": {}})), InputShape::Progress);
        assert_eq!(detect_shape(&json!({"is_drug": true})), InputShape::Canonical);
        assert_eq!(detect_shape(&json!({})), InputShape::Canonical);
    }

    #[test]
    fn test_empty_document_is_an_error() {
        let err = decode(json!({})).unwrap_err();
        assert!(matches!(err, FilterError::EmptyInputError { .. }));
    }

    #[test]
    fn test_non_object_document_is_an_error() {
        let err = decode(json!(["aspirin"])).unwrap_err();
        assert!(matches!(err, FilterError::InvalidJsonError { .. }));
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let err = decode_document(b"{not json", Path::new("broken.json")).unwrap_err();
        assert!(matches!(err, FilterError::InvalidJsonError { .. }));
        assert!(err.to_string().contains("broken.json"));
    }

    #[test]
    fn test_mistyped_record_names_the_ingredient() {
        let err = decode(json!({"aspirin": {"brand_names": "Bayer"}})).unwrap_err();
        match err {
            FilterError::InvalidRecordError { ingredient, .. } => assert_eq!(ingredient, "aspirin"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_canonical_document_normalizes_to_itself() {
        let input = json!({
            "aspirin": {
                "ingredient": "aspirin",
                "is_drug": true,
                "canonical_name": "Aspirin",
                "fda_search_term": "aspirin",
                "groq_confidence": 0.98,
                "rejection_reason": null,
                "fda_found": true,
                "brand_names": ["Bayer"],
                "warnings": ["Reye's syndrome"]
            },
            "water": {"ingredient": "water", "is_drug": false, "rejection_reason": "excipient"}
        });

        let document = decode(input).unwrap();
        let InputDocument::Canonical(original) = document.clone() else {
            panic!("expected canonical shape");
        };

        let normalized = normalize(document);
        assert_eq!(normalized.records, original);
        assert_eq!(normalized.dropped_unfinished, 0);
    }

    #[test]
    fn test_canonical_missing_ingredient_uses_key() {
        let normalized = normalize(decode(json!({"ibuprofen": {"is_drug": true}})).unwrap());
        assert_eq!(normalized.records.get("ibuprofen").unwrap().ingredient, "ibuprofen");
    }

    #[test]
    fn test_progress_conversion_drops_only_unfinished() {
        let input = json!({
            "a": {"status": "done", "groq_validation": {"is_drug": true}},
            "b": {"status": "pending", "groq_validation": {"is_drug": true}},
            "c": {"status": "error"},
            "d": {"status": "done"},
            "e": {"groq_validation": {"is_drug": false}},
            "f": {"status": "DONE"}
        });

        let normalized = normalize(decode(input).unwrap());

        assert_eq!(normalized.records.keys().collect::<Vec<_>>(), vec!["a", "d"]);
        assert_eq!(normalized.dropped_unfinished, 4);
        assert_eq!(normalized.records.get("d").unwrap().is_drug, Flag::Bool(false));
    }

    #[test]
    fn test_unfinished_entries_are_not_decoded() {
        let input = json!({
            "a": {"status": "done", "groq_validation": {"is_drug": true}, "fda_data": {"found": true}},
            "b": {"status": "error", "groq_validation": "rate limited"},
            "c": {"status": 0, "fda_data": ["not", "an", "object"]}
        });

        let normalized = normalize(decode(input).unwrap());

        assert_eq!(normalized.records.keys().collect::<Vec<_>>(), vec!["a"]);
        assert_eq!(normalized.dropped_unfinished, 2);
    }

    #[test]
    fn test_malformed_done_entry_is_an_error() {
        let err = decode(json!({
            "a": {"status": "done", "groq_validation": "rate limited"}
        }))
        .unwrap_err();

        match err {
            FilterError::InvalidRecordError { ingredient, .. } => assert_eq!(ingredient, "a"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_progress_fields_are_mapped() {
        let input = json!({
            "z": {
                "status": "done",
                "groq_validation": {
                    "is_drug": true,
                    "canonical_name": "Zincum",
                    "fda_search_term": "zinc",
                    "confidence": 0.9,
                    "rejection_reason": null
                },
                "fda_data": {
                    "found": true,
                    "brand_names": ["B1"],
                    "generic_names": ["G1", "G2"],
                    "manufacturers": ["M1"],
                    "dosage_forms": ["TABLET"],
                    "warnings": ["W1"],
                    "drug_interactions": ["I1"],
                    "adverse_reactions": ["A1"],
                    "indications": ["N1"]
                }
            }
        });

        let normalized = normalize(decode(input).unwrap());
        let record = normalized.records.get("z").unwrap();

        assert_eq!(record.ingredient, "z");
        assert!(record.is_drug.is_true());
        assert!(record.fda_found.is_true());
        assert_eq!(record.canonical_name.as_deref(), Some("Zincum"));
        assert_eq!(record.fda_search_term.as_deref(), Some("zinc"));
        assert_eq!(record.groq_confidence.as_f64(), 0.9);
        assert_eq!(record.brand_names, vec!["B1"]);
        assert_eq!(record.generic_names, vec!["G1", "G2"]);
        assert_eq!(record.manufacturers, vec!["M1"]);
        assert_eq!(record.dosage_forms, vec!["TABLET"]);
        assert_eq!(record.warnings, vec!["W1"]);
        assert_eq!(record.drug_interactions, vec!["I1"]);
        assert_eq!(record.adverse_reactions, vec!["A1"]);
        assert_eq!(record.indications, vec!["N1"]);
    }
}
