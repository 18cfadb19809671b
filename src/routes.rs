use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::{header, Method, StatusCode};
use axum::response::{Html, IntoResponse, Json};
use axum::routing::{get, post};
use axum::Router;
use serde_json::json;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::error::{Error, Result};
use crate::pipeline::{AnalyzeRequest, Analyzer, Submission};
use crate::reply::StructuredReply;

pub const ANALYZE_PATH: &str = "/api/analyze";

// base64 inflates uploads by a third
const BODY_LIMIT: usize = 10 * 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    analyzer: Arc<dyn Analyzer>,
}

pub fn router(analyzer: Arc<dyn Analyzer>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/", get(index))
        .route(
            ANALYZE_PATH,
            post(analyze).options(preflight).fallback(method_not_allowed),
        )
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(DefaultBodyLimit::max(BODY_LIMIT)),
        )
        .with_state(AppState { analyzer })
}

async fn analyze(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<StructuredReply>> {
    let Json(request) = payload.map_err(|e| Error::BadRequest(e.body_text()))?;
    let submission = Submission::try_from(request)?;
    let reply = state.analyzer.analyze(&submission).await?;
    Ok(Json(reply))
}

async fn preflight() -> StatusCode {
    StatusCode::OK
}

async fn method_not_allowed() -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(json!({ "error": "Method not allowed" })),
    )
}

async fn index() -> Html<&'static str> {
    Html(include_str!("index.html"))
}
