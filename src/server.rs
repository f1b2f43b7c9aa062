//! HTTP routing layer.
//!
//! Maps the two analysis operations to JSON routes and converts every result
//! into either a success body or `{"status":"error","message":...}`.

use crate::ai::{mime, AnalysisService};
use crate::error::ErrorKind;
use crate::models::{FoodNameList, NutritionList};
use crate::Error;
use axum::extract::multipart::MultipartRejection;
use axum::extract::rejection::JsonRejection;
use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::{header, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any as AnyOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

pub const PHOTO_ROUTE: &str = "/api/suggest-foods-from-photo";
pub const TEXT_ROUTE: &str = "/api/analyze-text";
pub const HEALTH_ROUTE: &str = "/health";

/// Multipart field carrying the photo.
pub const IMAGE_FIELD: &str = "image";

#[derive(Clone)]
struct AppState {
    analyzer: Arc<dyn AnalysisService>,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeTextBody {
    pub text: String,
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename = "success", rename_all = "camelCase")]
pub struct FoodNamesResponse {
    pub food_names: FoodNameList,
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename = "success", rename_all = "camelCase")]
pub struct NutritionResponse {
    pub nutrition_info: NutritionList,
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename = "error")]
pub struct ErrorResponse {
    pub message: String,
}

/// HTTP status for a failure: 400 for caller mistakes, 500 for the rest.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::InputError => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = status_for(self.kind());
        let body = ErrorResponse {
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Builds the router with CORS, tracing, panic recovery and a body limit.
pub fn router(analyzer: Arc<dyn AnalysisService>, max_upload_bytes: usize) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AnyOrigin)
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_methods([
            Method::GET,
            Method::PUT,
            Method::POST,
            Method::DELETE,
            Method::OPTIONS,
        ]);

    Router::new()
        .route(PHOTO_ROUTE, post(suggest_foods_from_photo))
        .route(TEXT_ROUTE, post(analyze_text))
        .route(HEALTH_ROUTE, get(health_check))
        .with_state(AppState { analyzer })
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn suggest_foods_from_photo(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<FoodNamesResponse>, Error> {
    let request_id = Uuid::new_v4();
    tracing::info!(%request_id, "--- Photo analysis request ---");

    state.analyzer.ensure_configured()?;

    let mut multipart =
        multipart.map_err(|e| Error::Input(format!("expected a multipart form: {}", e)))?;

    let (bytes, declared_mime) = loop {
        let field = multipart
            .next_field()
            .await
            .map_err(|e| Error::Input(format!("malformed multipart body: {}", e)))?
            .ok_or_else(|| Error::Input(format!("missing '{}' file field", IMAGE_FIELD)))?;

        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }

        let declared_mime = field.content_type().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| Error::Input(format!("failed to read image field: {}", e)))?;
        break (bytes, declared_mime);
    };

    let mime_type = mime::resolve_image_mime(declared_mime.as_deref(), &bytes);
    let result = state.analyzer.analyze_photo(&bytes, &mime_type).await;
    log_outcome(request_id, &result);

    Ok(Json(FoodNamesResponse { food_names: result? }))
}

async fn analyze_text(
    State(state): State<AppState>,
    body: Result<Json<AnalyzeTextBody>, JsonRejection>,
) -> Result<Json<NutritionResponse>, Error> {
    let request_id = Uuid::new_v4();
    tracing::info!(%request_id, "--- Text analysis request ---");

    state.analyzer.ensure_configured()?;

    let Json(body) = body.map_err(|e| {
        tracing::warn!(%request_id, "Rejected text analysis body: {}", e);
        Error::Input(format!("expected a JSON body with a 'text' field: {}", e))
    })?;

    let result = state.analyzer.analyze_text(&body.text).await;
    log_outcome(request_id, &result);

    Ok(Json(NutritionResponse {
        nutrition_info: result?,
    }))
}

fn log_outcome<T>(request_id: Uuid, result: &crate::Result<T>) {
    match result {
        Ok(_) => tracing::info!(%request_id, "Analysis succeeded"),
        Err(e) => tracing::error!(%request_id, kind = %e.kind(), "Analysis failed: {}", e),
    }
}

fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    tracing::error!("Handler panicked: {}", detail);

    Error::Internal(detail).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_status_mapping() {
        assert_eq!(status_for(ErrorKind::InputError), StatusCode::BAD_REQUEST);
        for kind in [
            ErrorKind::ConfigError,
            ErrorKind::HttpError,
            ErrorKind::ParseError,
            ErrorKind::ValidationError,
            ErrorKind::InternalError,
        ] {
            assert_eq!(status_for(kind), StatusCode::INTERNAL_SERVER_ERROR);
        }
    }

    #[test]
    fn test_success_bodies_are_tagged() {
        let json = serde_json::to_value(FoodNamesResponse {
            food_names: vec!["쌀밥".to_string()],
        })
        .unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "status": "success", "foodNames": ["쌀밥"] })
        );

        let json = serde_json::to_value(NutritionResponse {
            nutrition_info: vec![],
        })
        .unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "status": "success", "nutritionInfo": [] })
        );
    }

    #[test]
    fn test_error_body_is_tagged() {
        let json = serde_json::to_value(ErrorResponse {
            message: "boom".to_string(),
        })
        .unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "status": "error", "message": "boom" })
        );
    }

    #[test]
    fn test_panic_response_is_internal_error() {
        let response = panic_response(Box::new("exploded"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
