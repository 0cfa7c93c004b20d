use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// 以成分名稱為 key 的有序集合，保留輸入檔案中的順序
///
/// 重複的 key 沿用第一次出現的位置，值以最後一次為準。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IngredientSet<T> {
    entries: IndexMap<String, T>,
}

impl<T> IngredientSet<T> {
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    pub fn insert(&mut self, ingredient: String, value: T) {
        self.entries.insert(ingredient, value);
    }

    pub fn get(&self, ingredient: &str) -> Option<&T> {
        self.entries.get(ingredient)
    }

    pub fn contains(&self, ingredient: &str) -> bool {
        self.entries.contains_key(ingredient)
    }

    pub fn first(&self) -> Option<(&str, &T)> {
        self.entries
            .first()
            .map(|(ingredient, value)| (ingredient.as_str(), value))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries
            .iter()
            .map(|(ingredient, value)| (ingredient.as_str(), value))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> Default for IngredientSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

// 順序也算在相等比較內
impl<T: PartialEq> PartialEq for IngredientSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T> IntoIterator for IngredientSet<T> {
    type Item = (String, T);
    type IntoIter = indexmap::map::IntoIter<String, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<T> FromIterator<(String, T)> for IngredientSet<T> {
    fn from_iter<I: IntoIterator<Item = (String, T)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
