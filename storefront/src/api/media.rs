//! Ingested image serving

use axum::{
    Router,
    body::Bytes,
    extract::{Path, State},
    response::{IntoResponse, Response},
    routing::get,
};
use http::{StatusCode, header};
use shared::models::UPLOAD_URL_PREFIX;

use crate::core::ServerState;

enum MediaResponse {
    Ok { content_type: String, body: Bytes },
    NotFound,
    BadRequest,
}

impl IntoResponse for MediaResponse {
    fn into_response(self) -> Response {
        match self {
            MediaResponse::Ok { content_type, body } => (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, content_type),
                    (header::CACHE_CONTROL, "public, max-age=86400".to_string()),
                ],
                body,
            )
                .into_response(),
            MediaResponse::NotFound => (StatusCode::NOT_FOUND, "File not found").into_response(),
            MediaResponse::BadRequest => {
                (StatusCode::BAD_REQUEST, "Invalid filename").into_response()
            }
        }
    }
}

pub fn router() -> Router<ServerState> {
    Router::new().route(&format!("{UPLOAD_URL_PREFIX}/{{name}}"), get(serve_upload))
}

async fn serve_upload(State(state): State<ServerState>, Path(name): Path<String>) -> MediaResponse {
    let Some(path) = state.images.path_of(&name) else {
        return MediaResponse::BadRequest;
    };

    match tokio::fs::read(&path).await {
        Ok(content) => {
            let content_type = mime_guess::MimeGuess::from_path(&path)
                .first()
                .map(|m| m.essence_str().to_string())
                .unwrap_or_else(|| "application/octet-stream".to_string());
            MediaResponse::Ok {
                content_type,
                body: content.into(),
            }
        }
        Err(e) => {
            tracing::debug!(file = %name, error = %e, "Upload not found");
            MediaResponse::NotFound
        }
    }
}
