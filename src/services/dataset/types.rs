use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::fmt;

/// Rows shown per preview page unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: usize = 10;
/// Page numbers listed around the current preview page.
pub const MAX_VISIBLE_PAGES: usize = 5;
/// Preview cells longer than this are cut and suffixed with `...`.
pub const MAX_CELL_CHARS: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetFormat {
    Json,
    Csv,
}

impl fmt::Display for DatasetFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetFormat::Json => write!(f, "json"),
            DatasetFormat::Csv => write!(f, "csv"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Numeric,
    Categorical,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnStats {
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    pub unique: usize,
    pub missing: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean: Option<f64>,
}

impl ColumnStats {
    pub fn is_numeric(&self) -> bool {
        self.column_type == ColumnType::Numeric
    }
}

/// Per-column statistics in table column order, serialized as a JSON object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnStatsMap(Vec<(String, ColumnStats)>);

impl ColumnStatsMap {
    pub fn get(&self, name: &str) -> Option<&ColumnStats> {
        self.0
            .iter()
            .find(|(column, _)| column == name)
            .map(|(_, stats)| stats)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ColumnStats)> + '_ {
        self.0.iter().map(|(name, stats)| (name.as_str(), stats))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, ColumnStats)> for ColumnStatsMap {
    fn from_iter<I: IntoIterator<Item = (String, ColumnStats)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Serialize for ColumnStatsMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, stats) in &self.0 {
            map.serialize_entry(name, stats)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetSummary {
    pub row_count: usize,
    pub column_count: usize,
    pub numeric_features: usize,
    pub categorical_features: usize,
    pub columns: ColumnStatsMap,
}
