use axum::{
    extract::{
        rejection::{BytesRejection, FailedToBufferBody},
        Query, State,
    },
    http::{header, HeaderMap, Method, StatusCode},
    routing::{get, post},
    Json, Router,
};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use crate::{
    AppState,
    error::AppError,
    services::{
        dataset::{self, DatasetFormat, DatasetSummary, PreviewPage, PreviewQuery},
        session::{ActiveDataset, Upload},
    },
};
use tower_http::cors::{CorsLayer, Any};

pub fn routes() -> Router<Arc<AppState>> {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers(Any)
        .max_age(std::time::Duration::from_secs(3600));

    Router::new()
        .route("/datasets", post(upload_dataset))
        .route("/datasets/current", get(current_dataset).delete(clear_dataset))
        .route("/datasets/current/preview", get(preview_dataset))
        .layer(cors)
}

#[derive(Debug, Deserialize)]
pub struct UploadParams {
    name: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetResponse {
    name: String,
    format: DatasetFormat,
    uploaded_at: DateTime<Utc>,
    summary: DatasetSummary,
}

impl From<&ActiveDataset> for DatasetResponse {
    fn from(dataset: &ActiveDataset) -> Self {
        Self {
            name: dataset.name.clone(),
            format: dataset.format,
            uploaded_at: dataset.uploaded_at,
            summary: dataset.summary.clone(),
        }
    }
}

async fn upload_dataset(
    State(state): State<Arc<AppState>>,
    Query(params): Query<UploadParams>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<(StatusCode, Json<DatasetResponse>), AppError> {
    let start = std::time::Instant::now();
    let limit = state.config.max_file_size;

    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok());
    let format = dataset::detect_format(params.name.as_deref(), content_type)?;
    let name = params
        .name
        .unwrap_or_else(|| format!("upload.{}", format));

    tracing::info!("Receiving {} upload: {}", format, name);

    let data = body.map_err(|rejection| body_error(rejection, limit))?;
    let content = std::str::from_utf8(&data)
        .map_err(|e| AppError::InvalidInput(format!("File is not valid UTF-8 text: {}", e)))?;

    let upload = Upload { name, format, content };
    let mut session = state.session.write();
    let active = session.ingest(&upload)?;
    tracing::info!(
        "Dataset {} ready: {} rows, {} columns in {:?}",
        active.name,
        active.summary.row_count,
        active.summary.column_count,
        start.elapsed()
    );

    Ok((StatusCode::CREATED, Json(DatasetResponse::from(active))))
}

fn body_error(rejection: BytesRejection, limit: usize) -> AppError {
    match rejection {
        BytesRejection::FailedToBufferBody(FailedToBufferBody::LengthLimitError(_)) => {
            AppError::PayloadTooLarge { limit }
        }
        other => AppError::InvalidInput(format!("Failed to read upload body: {}", other.body_text())),
    }
}

async fn current_dataset(
    State(state): State<Arc<AppState>>,
) -> Result<Json<DatasetResponse>, AppError> {
    let session = state.session.read();
    let active = session
        .active()
        .ok_or_else(|| AppError::NotFound("No dataset has been uploaded".to_string()))?;
    Ok(Json(DatasetResponse::from(active)))
}

async fn preview_dataset(
    State(state): State<Arc<AppState>>,
    Query(mut query): Query<PreviewQuery>,
) -> Result<Json<PreviewPage>, AppError> {
    query.page_size = query.page_size.or(Some(state.config.preview_page_size));

    let session = state.session.read();
    let active = session
        .active()
        .ok_or_else(|| AppError::NotFound("No dataset has been uploaded".to_string()))?;
    Ok(Json(dataset::preview(&active.table, &query)))
}

async fn clear_dataset(State(state): State<Arc<AppState>>) -> StatusCode {
    state.session.write().clear();
    StatusCode::NO_CONTENT
}
