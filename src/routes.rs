use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tracing::info;

use crate::error::ProcessError;
use crate::state::AppState;
use crate::upload::UploadGuard;

pub fn create_routes() -> Router<AppState> {
    Router::new()
        .route("/upload", post(upload))
        .route("/api/health", get(health_check))
}

type ErrorResponse = (StatusCode, Json<Value>);

/// Every request-level failure surfaces as a 400 with an error message; the
/// process keeps serving subsequent requests.
fn bad_request(message: impl ToString) -> ErrorResponse {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({"error": message.to_string()})),
    )
}

fn process_error(e: ProcessError) -> ErrorResponse {
    bad_request(e)
}

async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "upload_dir": state.config.upload_dir.is_dir(),
        "api_key_configured": !state.config.api_key.trim().is_empty(),
    }))
}

/// Accepts either a raw `text` field or a `file` field, plus optional
/// `source_lang` (default "auto") and `target_lang` (default "zh").
async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Value>, ErrorResponse> {
    let mut text: Option<String> = None;
    let mut source_lang: Option<String> = None;
    let mut target_lang: Option<String> = None;
    let mut file: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart.next_field().await.map_err(bad_request)? {
        let field_name = field.name().map(|n| n.to_string());
        match field_name.as_deref() {
            Some("text") => text = Some(field.text().await.map_err(bad_request)?),
            Some("source_lang") => source_lang = Some(field.text().await.map_err(bad_request)?),
            Some("target_lang") => target_lang = Some(field.text().await.map_err(bad_request)?),
            Some("file") => {
                let name = field.file_name().unwrap_or_default().to_string();
                let data = field.bytes().await.map_err(bad_request)?;
                file = Some((name, data.to_vec()));
            }
            _ => {}
        }
    }

    let source_lang = source_lang.unwrap_or_else(|| "auto".to_string());
    let target_lang = target_lang.unwrap_or_else(|| "zh".to_string());

    // Raw-text path: translate directly, no validation or extraction.
    if let Some(text) = text.map(|t| t.trim().to_string()).filter(|t| !t.is_empty()) {
        let translated = state
            .processor
            .translate_text(&text, &source_lang, &target_lang)
            .await
            .map_err(process_error)?;
        return Ok(Json(json!({
            "original_text": text,
            "translated_text": translated,
        })));
    }

    let (name, data) = file.ok_or_else(|| bad_request("no file uploaded"))?;
    if name.is_empty() {
        return Err(bad_request("no file selected"));
    }

    info!(file = %name, size = data.len(), "processing upload");

    // The guard removes the saved file whichever way this returns.
    let guard =
        UploadGuard::save(&state.config.upload_dir, &name, &data).map_err(process_error)?;
    state
        .processor
        .validate_file(guard.path())
        .map_err(process_error)?;
    let text = state
        .processor
        .extract_text(guard.path())
        .map_err(process_error)?;
    let translated = state
        .processor
        .translate_text(&text, &source_lang, &target_lang)
        .await
        .map_err(process_error)?;

    Ok(Json(json!({
        "original_text": text,
        "translated_text": translated,
    })))
}
