//! HTTP surface for ClearClause.
//!
//! A compact Axum router with the endpoints the web frontend calls:
//!
//! - `POST /api/analyze` – Explain a clause in plain language and list its risky terms.
//!   Body `{ "text" }`, response `{ "simplifiedExplanation", "riskyTerms": [...] }`.
//! - `POST /api/followup` – Answer a question about a clause.
//!   Body `{ "question", "originalText" }`, response `{ "answer" }`.
//! - `POST /api/extract` – Pull the text out of an uploaded PDF (multipart field `file`).
//!   Response `{ "text" }`.
//! - `GET /api/commands` – Machine-readable catalog of the endpoints above.
//!
//! Every failure is rendered as `{ "error": message }`: 400 for missing input and unreadable
//! documents, 413 for bodies over `MAX_UPLOAD_BYTES`, 500 for anything the completion provider
//! or runtime reports.

use crate::analysis::{AnalysisApi, AnalysisError, AnalysisResult};
use crate::config::Config;
use crate::extraction::is_pdf_name;
use axum::{
    Json, Router,
    extract::{
        DefaultBodyLimit, Multipart, State,
        multipart::{MultipartError, MultipartRejection},
        rejection::JsonRejection,
    },
    http::{HeaderValue, Method, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Origin of the frontend dev server, always allowed.
pub const LOCAL_DEV_ORIGIN: &str = "http://localhost:3000";

/// Build the HTTP router exposing the analysis API surface.
pub fn create_router<S>(service: Arc<S>, config: &Config) -> Router
where
    S: AnalysisApi + 'static,
{
    Router::new()
        .route("/api/analyze", post(analyze_text::<S>))
        .route("/api/followup", post(follow_up::<S>))
        .route("/api/extract", post(extract_text::<S>))
        .route("/api/commands", get(get_commands))
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .layer(cors_layer(config.frontend_url.as_deref()))
        .with_state(service)
}

/// CORS policy: the local dev origin plus the configured frontend, GET/POST/OPTIONS only.
pub fn cors_layer(frontend_url: Option<&str>) -> CorsLayer {
    let mut origins = vec![HeaderValue::from_static(LOCAL_DEV_ORIGIN)];
    if let Some(url) = frontend_url {
        match HeaderValue::from_str(url.trim_end_matches('/')) {
            Ok(origin) => origins.push(origin),
            Err(error) => tracing::warn!(url, %error, "Ignoring invalid FRONTEND_URL origin"),
        }
    }

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

/// Request body for `POST /api/analyze`.
#[derive(Deserialize)]
struct AnalyzeRequest {
    #[serde(default)]
    text: Option<String>,
}

/// Summarize a clause and extract its risky terms.
async fn analyze_text<S>(
    State(service): State<Arc<S>>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalysisResult>, ApiError>
where
    S: AnalysisApi,
{
    let Json(request) = payload?;
    let text = required(request.text).ok_or_else(|| ApiError::validation("No text provided"))?;

    let result = service.analyze(&text).await?;
    tracing::info!(
        text_chars = text.len(),
        risky_terms = result.risky_terms.len(),
        "Analyze request completed"
    );
    Ok(Json(result))
}

/// Request body for `POST /api/followup`.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FollowUpRequest {
    #[serde(default)]
    question: Option<String>,
    #[serde(default)]
    original_text: Option<String>,
}

/// Response body for `POST /api/followup`.
#[derive(Serialize)]
struct FollowUpResponse {
    answer: String,
}

/// Answer a question about a clause.
async fn follow_up<S>(
    State(service): State<Arc<S>>,
    payload: Result<Json<FollowUpRequest>, JsonRejection>,
) -> Result<Json<FollowUpResponse>, ApiError>
where
    S: AnalysisApi,
{
    let Json(request) = payload?;
    let (Some(question), Some(original_text)) =
        (required(request.question), required(request.original_text))
    else {
        return Err(ApiError::validation(
            "Question and original text are required",
        ));
    };

    let answer = service.follow_up(&question, &original_text).await?;
    tracing::info!(
        question_chars = question.len(),
        answer_chars = answer.len(),
        "Follow-up request completed"
    );
    Ok(Json(FollowUpResponse { answer }))
}

/// Response body for `POST /api/extract`.
#[derive(Serialize)]
struct ExtractResponse {
    text: String,
}

/// Extract plain text from an uploaded PDF.
async fn extract_text<S>(
    State(service): State<Arc<S>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ExtractResponse>, ApiError>
where
    S: AnalysisApi,
{
    let mut multipart = multipart.map_err(|rejection| ApiError::Validation(rejection.body_text()))?;

    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(ApiError::from)?
    {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(ApiError::from)?;
        upload = Some((file_name, bytes));
        break;
    }

    let Some((file_name, bytes)) = upload else {
        return Err(ApiError::validation("No file provided"));
    };
    if !is_pdf_name(&file_name) {
        return Err(ApiError::validation("Only PDF files are supported"));
    }

    let size = bytes.len();
    let text = service.extract_text(&file_name, bytes.to_vec()).await?;
    tracing::info!(
        file_name = %file_name,
        size,
        text_chars = text.len(),
        "Extract request completed"
    );
    Ok(Json(ExtractResponse { text }))
}

/// Descriptor for a single command in the discovery catalog.
#[derive(Serialize)]
struct CommandDescriptor {
    name: &'static str,
    method: &'static str,
    path: &'static str,
    description: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    request_example: Option<serde_json::Value>,
}

/// Response body for `GET /api/commands`.
#[derive(Serialize)]
struct CommandsResponse {
    commands: Vec<CommandDescriptor>,
}

/// Enumerate supported HTTP commands for discovery by clients and tools.
async fn get_commands() -> Json<CommandsResponse> {
    Json(CommandsResponse {
        commands: vec![
            CommandDescriptor {
                name: "analyze",
                method: "POST",
                path: "/api/analyze",
                description: "Explain a legal clause in plain language and list risky terms. Response returns { \"simplifiedExplanation\": string, \"riskyTerms\": [{ \"term\", \"severity\", \"explanation\" }] }.",
                request_example: Some(json!({
                    "text": "The Contractor shall indemnify and hold harmless the Company."
                })),
            },
            CommandDescriptor {
                name: "followup",
                method: "POST",
                path: "/api/followup",
                description: "Answer a question about a clause. Response returns { \"answer\": string }.",
                request_example: Some(json!({
                    "question": "What does indemnify mean here?",
                    "originalText": "The Contractor shall indemnify and hold harmless the Company."
                })),
            },
            CommandDescriptor {
                name: "extract",
                method: "POST",
                path: "/api/extract",
                description: "Upload a PDF as multipart field `file` and receive its text. Response returns { \"text\": string }.",
                request_example: None,
            },
        ],
    })
}

/// Keep only values that carry non-whitespace content.
fn required(value: Option<String>) -> Option<String> {
    value.filter(|inner| !inner.trim().is_empty())
}

/// Failures rendered as `{ "error": message }` with a matching status code.
#[derive(Debug)]
enum ApiError {
    /// Missing or malformed request input.
    Validation(String),
    /// Uploaded document could not be read.
    Extraction(String),
    /// Request body exceeded `MAX_UPLOAD_BYTES`.
    PayloadTooLarge,
    /// Completion provider or runtime failure.
    Internal(String),
}

impl ApiError {
    fn validation(message: &str) -> Self {
        Self::Validation(message.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::Validation(message) => {
                tracing::warn!(%message, "Rejected invalid request");
                (StatusCode::BAD_REQUEST, message)
            }
            Self::Extraction(message) => {
                tracing::warn!(%message, "Document extraction failed");
                (StatusCode::BAD_REQUEST, message)
            }
            Self::PayloadTooLarge => {
                tracing::warn!("Rejected oversized request body");
                (
                    StatusCode::PAYLOAD_TOO_LARGE,
                    "File too large".to_string(),
                )
            }
            Self::Internal(message) => {
                tracing::error!(%message, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<AnalysisError> for ApiError {
    fn from(inner: AnalysisError) -> Self {
        match inner {
            AnalysisError::Extraction(error) => Self::Extraction(error.to_string()),
            AnalysisError::Completion(error) => Self::Internal(error.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return Self::PayloadTooLarge;
        }
        Self::Validation(rejection.body_text())
    }
}

impl From<MultipartError> for ApiError {
    fn from(error: MultipartError) -> Self {
        if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return Self::PayloadTooLarge;
        }
        Self::Validation(error.body_text())
    }
}
