use axum::{
    response::{IntoResponse, Response},
    http::StatusCode,
};
use serde_json::json;
use axum::Json;
use thiserror::Error;

/// Failures of dataset ingestion. Per-cell type mismatches are never errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SummarizerError {
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Dataset contains no records")]
    EmptyDataset,
    #[error("Unsupported dataset format: {0}")]
    UnsupportedFormat(String),
}

impl From<serde_json::Error> for SummarizerError {
    fn from(err: serde_json::Error) -> Self {
        SummarizerError::Parse(err.to_string())
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("Dataset contains no records")]
    EmptyDataset,
    #[error("Unsupported dataset format: {0}")]
    UnsupportedFormat(String),
    #[error("File exceeds the {limit} byte upload limit")]
    PayloadTooLarge { limit: usize },
    #[error("Not found: {0}")]
    NotFound(String),
}

impl From<SummarizerError> for AppError {
    fn from(err: SummarizerError) -> Self {
        match err {
            SummarizerError::Parse(msg) => AppError::ParseError(msg),
            SummarizerError::EmptyDataset => AppError::EmptyDataset,
            SummarizerError::UnsupportedFormat(hint) => AppError::UnsupportedFormat(hint),
        }
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::ParseError(_) => StatusCode::BAD_REQUEST,
            AppError::EmptyDataset => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::UnsupportedFormat(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            AppError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::warn!("Request rejected with {}: {}", status, self);

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summarizer_errors_map_to_client_statuses() {
        let parse: AppError = SummarizerError::Parse("eof".into()).into();
        assert_eq!(parse.status(), StatusCode::BAD_REQUEST);
        assert_eq!(parse.to_string(), "Parse error: eof");

        let empty: AppError = SummarizerError::EmptyDataset.into();
        assert_eq!(empty.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let format: AppError = SummarizerError::UnsupportedFormat("notes.txt".into()).into();
        assert_eq!(format.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }

    #[test]
    fn json_decoder_message_is_kept() {
        let err = serde_json::from_str::<serde_json::Value>("{not valid").unwrap_err();
        let expected = err.to_string();
        assert_eq!(SummarizerError::from(err), SummarizerError::Parse(expected));
    }
}
