//! Static file serving handlers

use axum::{
    body::Body,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
};

use crate::error::{DashboardError, DashboardResult};
use crate::state::DashboardState;
use crate::traits::StaticFileResponse;

/// Page returned when the static directory has no index.html
const FALLBACK_INDEX: &str = r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="UTF-8"><title>Store Reviews Dashboard</title></head>
<body>
    <h1>Store Reviews Dashboard</h1>
    <p>The dashboard assets were not found. The JSON API is available under
    <a href="/api/reviews">/api/reviews</a>, <a href="/api/regions">/api/regions</a>
    and <a href="/api/analytics">/api/analytics</a>.</p>
</body>
</html>"#;

/// Serve index.html for root path
pub async fn serve_index(State(state): State<DashboardState>) -> Response {
    match state.static_server().serve_file("index.html").await {
        Ok(file) => file_response(file).into_response(),
        Err(_) => Html(FALLBACK_INDEX).into_response(),
    }
}

/// Serve static files
pub async fn serve_static(Path(path): Path<String>, State(state): State<DashboardState>) -> DashboardResult<Response> {
    let file = state.static_server().serve_file(&path).await?;
    file_response(file)
}

fn file_response(file: StaticFileResponse) -> DashboardResult<Response> {
    let mut response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, file.content_type);

    if let Some(cache_control) = file.cache_control {
        response = response.header(header::CACHE_CONTROL, cache_control);
    }

    response
        .body(Body::from(file.content))
        .map_err(|e| DashboardError::internal(format!("Response building error: {e}")))
}
