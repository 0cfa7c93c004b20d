use crate::domain::collection::IngredientSet;
use crate::domain::model::{FilterStats, IngredientRecord, Verdict};

/// 兩個旗標都必須是布林 `true`；其餘依 `is_drug` 分到兩個剔除類別之一
pub fn classify(record: &IngredientRecord) -> Verdict {
    match (record.is_drug.is_true(), record.fda_found.is_true()) {
        (true, true) => Verdict::Confirmed,
        (false, _) => Verdict::NotDrug,
        (true, false) => Verdict::NotFound,
    }
}

pub fn is_confirmed(record: &IngredientRecord) -> bool {
    classify(record) == Verdict::Confirmed
}

/// 保留確認的藥物並統計剔除原因，順序與輸入相同
pub fn filter_confirmed(
    records: &IngredientSet<IngredientRecord>,
) -> (IngredientSet<IngredientRecord>, FilterStats) {
    let mut stats = FilterStats {
        normalized: records.len(),
        ..FilterStats::default()
    };
    let mut confirmed = IngredientSet::new();

    for (ingredient, record) in records.iter() {
        let verdict = classify(record);
        stats.record(verdict);
        if verdict == Verdict::Confirmed {
            confirmed.insert(ingredient.to_string(), record.clone());
        }
    }

    (confirmed, stats)
}
