use super::types::DatasetFormat;
use crate::error::SummarizerError;
use crate::models::{Table, Value};
use csv::{ReaderBuilder, StringRecord, Trim};
use serde_json::Value as JsonValue;

/// Turns raw upload content into a [`Table`].
///
/// CSV support is deliberately minimal: records are split on line breaks and
/// fields on `,` with quoting disabled, so a field can never contain a comma.
pub struct DatasetProcessor;

impl DatasetProcessor {
    pub fn process(&self, content: &str, format: DatasetFormat) -> Result<Table, SummarizerError> {
        let start = std::time::Instant::now();
        tracing::info!("Parsing {} dataset of {} bytes", format, content.len());

        let table = match format {
            DatasetFormat::Json => self.parse_json(content),
            DatasetFormat::Csv => self.parse_csv(content),
        }
        .map_err(|e| {
            tracing::warn!("Failed to parse {} dataset: {}", format, e);
            e
        })?;

        if table.is_empty() {
            tracing::warn!("Parsed {} dataset has no records", format);
            return Err(SummarizerError::EmptyDataset);
        }

        tracing::info!(
            "Parsed {} records with {} columns in {:?}",
            table.len(),
            table.columns().len(),
            start.elapsed()
        );
        Ok(table)
    }

    fn parse_json(&self, content: &str) -> Result<Table, SummarizerError> {
        let parsed: JsonValue = serde_json::from_str(content)?;
        let items = match parsed {
            JsonValue::Array(items) => items,
            other => {
                return Err(SummarizerError::Parse(format!(
                    "expected a JSON array of records, found {}",
                    json_kind(&other)
                )))
            }
        };

        let columns: Vec<String> = match items.first() {
            Some(JsonValue::Object(first)) => first.keys().cloned().collect(),
            Some(other) => {
                return Err(SummarizerError::Parse(format!(
                    "record 0 is {}, expected an object",
                    json_kind(other)
                )))
            }
            None => Vec::new(),
        };

        let mut rows = Vec::with_capacity(items.len());
        for (idx, item) in items.into_iter().enumerate() {
            let mut record = match item {
                JsonValue::Object(record) => record,
                other => {
                    return Err(SummarizerError::Parse(format!(
                        "record {} is {}, expected an object",
                        idx,
                        json_kind(&other)
                    )))
                }
            };

            let row = columns
                .iter()
                .map(|column| match record.remove(column) {
                    None => Ok(Value::Absent),
                    Some(JsonValue::Null) => Ok(Value::Null),
                    Some(JsonValue::Bool(b)) => Ok(Value::Bool(b)),
                    Some(JsonValue::Number(n)) => Ok(n.as_f64().map_or(Value::Null, Value::Number)),
                    Some(JsonValue::String(s)) => Ok(Value::Text(s)),
                    Some(nested) => Err(SummarizerError::Parse(format!(
                        "record {}, column '{}': nested {} values are not supported",
                        idx,
                        column,
                        json_kind(&nested)
                    ))),
                })
                .collect::<Result<Vec<_>, _>>()?;
            rows.push(row);
        }

        Ok(Table::from_parts(columns, rows))
    }

    fn parse_csv(&self, content: &str) -> Result<Table, SummarizerError> {
        // No quote handling: `"x,y"` is two fields, exactly as a plain split.
        let mut reader = ReaderBuilder::new()
            .delimiter(b',')
            .quoting(false)
            .flexible(true)
            .trim(Trim::All)
            .has_headers(true)
            .from_reader(content.as_bytes());

        let headers = reader
            .headers()
            .map_err(|e| SummarizerError::Parse(format!("Failed to read CSV headers: {}", e)))?
            .clone();
        if headers.iter().all(str::is_empty) {
            return Err(SummarizerError::Parse("CSV content has no header row".to_string()));
        }

        // A repeated header name maps to the column of its first occurrence.
        let mut columns: Vec<String> = Vec::new();
        let slots: Vec<usize> = headers
            .iter()
            .map(|name| {
                columns.iter().position(|c| c == name).unwrap_or_else(|| {
                    columns.push(name.to_string());
                    columns.len() - 1
                })
            })
            .collect();

        let mut rows = Vec::new();
        for (index, result) in reader.records().enumerate() {
            let record = result.map_err(|e| {
                SummarizerError::Parse(format!("Failed to parse CSV row {}: {}", index + 1, e))
            })?;
            if is_blank_line(&record) {
                continue;
            }
            rows.push(self.parse_row(&slots, columns.len(), &record));
        }

        Ok(Table::from_parts(columns, rows))
    }

    fn parse_row(&self, slots: &[usize], width: usize, record: &StringRecord) -> Vec<Value> {
        let mut row = vec![Value::Text(String::new()); width];
        for (idx, &slot) in slots.iter().enumerate() {
            row[slot] = Value::Text(record.get(idx).unwrap_or("").to_string());
        }
        row
    }
}

// A whitespace-only line trims down to a single empty field.
fn is_blank_line(record: &StringRecord) -> bool {
    record.len() == 1 && record.get(0).map_or(true, str::is_empty)
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}
