use crate::error::SummarizerError;
use crate::models::Table;
use crate::services::dataset::{self, DatasetFormat, DatasetSummary};
use chrono::{DateTime, Utc};

/// An upload waiting to be ingested.
#[derive(Debug, Clone)]
pub struct Upload<'a> {
    pub name: String,
    pub format: DatasetFormat,
    pub content: &'a str,
}

#[derive(Debug, Clone)]
pub struct ActiveDataset {
    pub name: String,
    pub format: DatasetFormat,
    pub uploaded_at: DateTime<Utc>,
    pub table: Table,
    pub summary: DatasetSummary,
}

impl ActiveDataset {
    fn from_upload(upload: &Upload<'_>) -> Result<Self, SummarizerError> {
        let (table, summary) = dataset::summarize(upload.content, upload.format)?;
        Ok(Self {
            name: upload.name.clone(),
            format: upload.format,
            uploaded_at: Utc::now(),
            table,
            summary,
        })
    }
}

/// Owns the dataset currently being explored.
///
/// A successful ingest replaces the active dataset wholesale; a failed one
/// leaves it as it was.
#[derive(Debug, Default)]
pub struct DatasetSession {
    active: Option<ActiveDataset>,
}

impl DatasetSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and summarize `upload`, then make it the active dataset.
    pub fn ingest(&mut self, upload: &Upload<'_>) -> Result<&ActiveDataset, SummarizerError> {
        let dataset = ActiveDataset::from_upload(upload)?;
        Ok(self.replace(dataset))
    }

    fn replace(&mut self, dataset: ActiveDataset) -> &ActiveDataset {
        if let Some(previous) = &self.active {
            tracing::info!("Replacing active dataset {} with {}", previous.name, dataset.name);
        } else {
            tracing::info!("Activating dataset {}", dataset.name);
        }
        self.active.insert(dataset)
    }

    pub fn active(&self) -> Option<&ActiveDataset> {
        self.active.as_ref()
    }

    pub fn clear(&mut self) -> Option<ActiveDataset> {
        let cleared = self.active.take();
        if let Some(dataset) = &cleared {
            tracing::info!("Cleared active dataset {}", dataset.name);
        }
        cleared
    }
}
