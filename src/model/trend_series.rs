use std::collections::BTreeMap;

use serde::Serialize;

/// Asset → ordered historical prices. Assets without trend data are absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TrendSeries(BTreeMap<String, Vec<f64>>);

impl TrendSeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps the first series seen for an asset; returns `false` on a duplicate.
    pub(crate) fn insert(&mut self, asset: String, prices: Vec<f64>) -> bool {
        if self.0.contains_key(&asset) {
            return false;
        }

        self.0.insert(asset, prices);
        true
    }

    pub fn get(&self, asset: &str) -> Option<&[f64]> {
        self.0.get(asset).map(Vec::as_slice)
    }

    pub fn contains(&self, asset: &str) -> bool {
        self.0.contains_key(asset)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}
