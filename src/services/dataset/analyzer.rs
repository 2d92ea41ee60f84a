use super::types::*;
use super::utils::coerce_number;
use crate::models::{Table, Value};
use rayon::prelude::*;
use std::collections::HashSet;

/// Computes descriptive statistics for every column of a [`Table`].
pub struct DatasetAnalyzer;

impl DatasetAnalyzer {
    pub fn analyze(&self, table: &Table) -> DatasetSummary {
        let start = std::time::Instant::now();

        // Columns are independent; each one is still folded in record order.
        let column_stats: Vec<ColumnStats> = (0..table.columns().len())
            .into_par_iter()
            .map(|idx| self.analyze_column(table.column_values(idx)))
            .collect();

        let numeric_features = column_stats.iter().filter(|s| s.is_numeric()).count();
        let column_count = column_stats.len();
        let columns: ColumnStatsMap = table
            .columns()
            .iter()
            .cloned()
            .zip(column_stats)
            .collect();

        tracing::info!(
            "Summarized {} columns ({} numeric) over {} rows in {:?}",
            column_count,
            numeric_features,
            table.len(),
            start.elapsed()
        );

        DatasetSummary {
            row_count: table.len(),
            column_count,
            numeric_features,
            categorical_features: column_count - numeric_features,
            columns,
        }
    }

    fn analyze_column<'a>(&self, values: impl Iterator<Item = &'a Value>) -> ColumnStats {
        let mut missing = 0;
        let mut present = 0;
        let mut seen = HashSet::new();
        let mut numbers = Vec::new();

        for value in values {
            seen.insert(value.to_string());
            if value.is_missing() {
                missing += 1;
                continue;
            }
            present += 1;
            if let Some(n) = coerce_number(value) {
                numbers.push(n);
            }
        }

        let numeric = present > 0 && numbers.len() == present;
        let (min, max, mean) = if numeric {
            let min = numbers.iter().copied().fold(f64::INFINITY, f64::min);
            let max = numbers.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            let mean = numbers.iter().sum::<f64>() / numbers.len() as f64;
            (Some(min), Some(max), Some(mean))
        } else {
            (None, None, None)
        };

        ColumnStats {
            column_type: if numeric {
                ColumnType::Numeric
            } else {
                ColumnType::Categorical
            },
            unique: seen.len(),
            missing,
            min,
            max,
            mean,
        }
    }
}
