use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, Method},
    middleware::Next,
    response::Response,
};
use service::{auth::StaticTokenAuth, csv::CsvStore};
use tracing::warn;

use crate::errors::ApiError;

#[derive(Clone)]
pub struct ServerState {
    pub store: Arc<dyn CsvStore>,
    pub auth: StaticTokenAuth,
}

/// Middleware for `/csv` routes: GET and POST must carry the shared secret
/// when one is configured. Preflight and unsupported methods pass through to
/// the router, which answers them without touching the store.
///
/// HEAD is refused here: axum would otherwise serve it with the GET handler.
pub async fn require_api_key_state(
    State(state): State<ServerState>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if req.method() == Method::HEAD {
        let err = ApiError::MethodNotAllowed;
        warn!(
            method = %req.method(),
            path = %req.uri().path(),
            outcome = err.outcome(),
            "csv request rejected"
        );
        return Err(err);
    }

    if !matches!(*req.method(), Method::GET | Method::POST) {
        return Ok(next.run(req).await);
    }

    let header = req.headers().get(AUTHORIZATION).and_then(|v| v.to_str().ok());
    if !state.auth.authorize(header) {
        let err = ApiError::Unauthorized;
        warn!(
            method = %req.method(),
            path = %req.uri().path(),
            outcome = err.outcome(),
            "csv request rejected"
        );
        return Err(err);
    }

    Ok(next.run(req).await)
}
