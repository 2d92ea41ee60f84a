pub mod analyzer;
pub mod format;
pub mod preview;
pub mod processor;
pub mod types;
pub mod utils;

pub use analyzer::DatasetAnalyzer;
pub use format::detect_format;
pub use preview::{preview, PreviewPage, PreviewQuery};
pub use processor::DatasetProcessor;
pub use types::{ColumnStats, ColumnStatsMap, ColumnType, DatasetFormat, DatasetSummary};

use crate::error::SummarizerError;
use crate::models::Table;

/// Parse `content` and compute its column statistics in one step.
pub fn summarize(content: &str, format: DatasetFormat) -> Result<(Table, DatasetSummary), SummarizerError> {
    let table = DatasetProcessor.process(content, format)?;
    let summary = DatasetAnalyzer.analyze(&table);
    Ok((table, summary))
}
