use crate::domain::collection::IngredientSet;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Number, Value};
use std::fmt;
use std::path::PathBuf;

/// JSON `null` 視為欄位缺漏，回到預設值
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// 布林旗標。非布林值照原樣保留，但永遠不算作 `true`。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Flag {
    Bool(bool),
    Other(Value),
}

impl Flag {
    /// 只有真正的布林 `true` 才成立，字串 `"true"` 不算
    pub fn is_true(&self) -> bool {
        matches!(self, Flag::Bool(true))
    }
}

impl Default for Flag {
    fn default() -> Self {
        Flag::Bool(false)
    }
}

impl From<bool> for Flag {
    fn from(value: bool) -> Self {
        Flag::Bool(value)
    }
}

/// Groq 信心分數。整數或浮點數照輸入的寫法寫回
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Confidence(pub Number);

impl Confidence {
    pub fn as_f64(&self) -> f64 {
        self.0.as_f64().unwrap_or_default()
    }
}

impl Default for Confidence {
    fn default() -> Self {
        Self::from(0.0)
    }
}

impl From<f64> for Confidence {
    fn from(value: f64) -> Self {
        // NaN 與無限大無法表示成 JSON 數字
        Self(Number::from_f64(value).unwrap_or_else(|| Number::from(0)))
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Canonical ingredient record, flat shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IngredientRecord {
    #[serde(default)]
    pub ingredient: String,
    #[serde(default)]
    pub is_drug: Flag,
    #[serde(default)]
    pub canonical_name: Option<String>,
    #[serde(default)]
    pub fda_search_term: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub groq_confidence: Confidence,
    #[serde(default)]
    pub rejection_reason: Option<String>,
    #[serde(default)]
    pub fda_found: Flag,
    #[serde(default, deserialize_with = "null_as_default")]
    pub brand_names: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub generic_names: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub manufacturers: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub dosage_forms: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub warnings: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub drug_interactions: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub adverse_reactions: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub indications: Vec<String>,
    /// 未知欄位原樣保留並寫回輸出
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroqValidation {
    #[serde(default)]
    pub is_drug: Flag,
    #[serde(default)]
    pub canonical_name: Option<String>,
    #[serde(default)]
    pub fda_search_term: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub confidence: Confidence,
    #[serde(default)]
    pub rejection_reason: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FdaData {
    #[serde(default)]
    pub found: Flag,
    #[serde(default, deserialize_with = "null_as_default")]
    pub brand_names: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub generic_names: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub manufacturers: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub dosage_forms: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub warnings: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub drug_interactions: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub adverse_reactions: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub indications: Vec<String>,
}

/// 驗證流程中途存下的進度記錄（巢狀結構），只有 status 為 "done" 才會解析
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgressRecord {
    #[serde(default)]
    pub groq_validation: Option<GroqValidation>,
    #[serde(default)]
    pub fda_data: Option<FdaData>,
}

pub const STATUS_DONE: &str = "done";

/// 進度檔中的一筆項目。未完成的項目不解析內容，只留下原本的 status
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEntry {
    Done(ProgressRecord),
    Unfinished { status: Option<Value> },
}

impl ProgressEntry {
    /// status 必須剛好是字串 "done"
    pub fn is_done(raw: &Value) -> bool {
        raw.get("status").and_then(Value::as_str) == Some(STATUS_DONE)
    }
}

impl ProgressRecord {
    /// 轉為 canonical 記錄；缺少的區塊視為空物件
    pub fn into_canonical(self, ingredient: &str) -> IngredientRecord {
        let groq = self.groq_validation.unwrap_or_default();
        let fda = self.fda_data.unwrap_or_default();

        IngredientRecord {
            ingredient: ingredient.to_string(),
            is_drug: groq.is_drug,
            canonical_name: groq.canonical_name,
            fda_search_term: groq.fda_search_term,
            groq_confidence: groq.confidence,
            rejection_reason: groq.rejection_reason,
            fda_found: fda.found,
            brand_names: fda.brand_names,
            generic_names: fda.generic_names,
            manufacturers: fda.manufacturers,
            dosage_forms: fda.dosage_forms,
            warnings: fda.warnings,
            drug_interactions: fda.drug_interactions,
            adverse_reactions: fda.adverse_reactions,
            indications: fda.indications,
            extra: serde_json::Map::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputShape {
    Canonical,
    Progress,
}

impl fmt::Display for InputShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputShape::Canonical => write!(f, "Clean output file"),
            InputShape::Progress => write!(f, "Progress file"),
        }
    }
}

/// 解碼後的輸入文件，過濾前已確定是哪一種結構
#[derive(Debug, Clone, PartialEq)]
pub enum InputDocument {
    Canonical(IngredientSet<IngredientRecord>),
    Progress(IngredientSet<ProgressEntry>),
}

impl InputDocument {
    pub fn shape(&self) -> InputShape {
        match self {
            InputDocument::Canonical(_) => InputShape::Canonical,
            InputDocument::Progress(_) => InputShape::Progress,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            InputDocument::Canonical(records) => records.len(),
            InputDocument::Progress(records) => records.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Confirmed,
    NotDrug,
    NotFound,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterStats {
    pub total_input: usize,
    pub dropped_unfinished: usize,
    pub normalized: usize,
    pub confirmed: usize,
    pub rejected_not_drug: usize,
    pub rejected_not_found: usize,
}

impl FilterStats {
    pub fn record(&mut self, verdict: Verdict) {
        match verdict {
            Verdict::Confirmed => self.confirmed += 1,
            Verdict::NotDrug => self.rejected_not_drug += 1,
            Verdict::NotFound => self.rejected_not_found += 1,
        }
    }
}

impl fmt::Display for FilterStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "📊 Results:")?;
        writeln!(
            f,
            "   ✅ is_drug=true  + fda_found=true  : {}  (saved)",
            self.confirmed
        )?;
        writeln!(
            f,
            "   ❌ is_drug=false                    : {}  (removed)",
            self.rejected_not_drug
        )?;
        write!(
            f,
            "   ⚠️  is_drug=true  + fda_found=false : {}  (removed)",
            self.rejected_not_found
        )
    }
}

#[derive(Debug, Clone)]
pub struct TransformResult {
    pub shape: InputShape,
    pub confirmed: IngredientSet<IngredientRecord>,
    pub stats: FilterStats,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub json: PathBuf,
    pub csv: PathBuf,
}
