use super::types::DatasetFormat;
use crate::error::SummarizerError;

/// Pick the dataset format from an upload's file name and MIME type.
pub fn detect_format(
    file_name: Option<&str>,
    mime: Option<&str>,
) -> Result<DatasetFormat, SummarizerError> {
    let mime = mime
        .and_then(|m| m.split(';').next())
        .map(|m| m.trim().to_ascii_lowercase());
    let name = file_name.map(|n| n.trim().to_ascii_lowercase());

    if mime.as_deref() == Some("application/json")
        || name.as_deref().is_some_and(|n| n.ends_with(".json"))
    {
        return Ok(DatasetFormat::Json);
    }
    if mime.as_deref() == Some("text/csv") || name.as_deref().is_some_and(|n| n.ends_with(".csv")) {
        return Ok(DatasetFormat::Csv);
    }

    let hint = file_name
        .or(mime.as_deref())
        .unwrap_or("unknown")
        .to_string();
    tracing::warn!("Rejecting upload with unsupported format: {}", hint);
    Err(SummarizerError::UnsupportedFormat(hint))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_from_mime_or_extension() {
        assert_eq!(
            detect_format(Some("data.bin"), Some("application/json; charset=utf-8")),
            Ok(DatasetFormat::Json)
        );
        assert_eq!(detect_format(Some("Data.JSON"), None), Ok(DatasetFormat::Json));
    }

    #[test]
    fn csv_from_extension_or_mime() {
        assert_eq!(
            detect_format(Some("iris.csv"), Some("application/octet-stream")),
            Ok(DatasetFormat::Csv)
        );
        assert_eq!(detect_format(None, Some("text/csv")), Ok(DatasetFormat::Csv));
    }

    #[test]
    fn anything_else_is_rejected() {
        assert_eq!(
            detect_format(Some("notes.txt"), Some("text/plain")),
            Err(SummarizerError::UnsupportedFormat("notes.txt".into()))
        );
        assert_eq!(
            detect_format(None, None),
            Err(SummarizerError::UnsupportedFormat("unknown".into()))
        );
    }
}
