//! Throwaway local servers standing in for the provider and the proxy.

use std::sync::{Arc, Mutex};

use axum::http::{header, HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::Value;

pub(crate) struct Recorded {
    pub headers: HeaderMap,
    pub body: Value,
}

pub(crate) type Recorder = Arc<Mutex<Vec<Recorded>>>;

/// Serves `router` on an ephemeral port and returns its base URL.
pub(crate) async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

/// A fake provider answering every POST with `status` and `body`, recording what it got.
pub(crate) async fn spawn_upstream(status: StatusCode, body: String) -> (String, Recorder) {
    let recorder: Recorder = Arc::default();
    let seen = Arc::clone(&recorder);
    let router = Router::new().route(
        "/v1/messages",
        post(move |headers: HeaderMap, Json(request): Json<Value>| {
            let seen = Arc::clone(&seen);
            let body = body.clone();
            async move {
                seen.lock().unwrap().push(Recorded {
                    headers,
                    body: request,
                });
                (status, [(header::CONTENT_TYPE, "application/json")], body)
            }
        }),
    );
    let base = serve(router).await;
    (format!("{base}/v1/messages"), recorder)
}
