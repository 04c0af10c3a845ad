pub mod auth;
pub mod csv;

use axum::{
    http::{header, HeaderValue},
    middleware,
    routing::get,
    Json, Router,
};
use tower::ServiceBuilder;
use tower_http::{
    set_header::SetResponseHeaderLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;

use self::auth::ServerState;

pub const CORS_ALLOW_ORIGIN: &str = "*";
pub const CORS_ALLOW_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";
pub const CORS_ALLOW_HEADERS: &str = "Content-Type, Authorization";

pub async fn health() -> Json<Health> {
    Json(Health::healthy())
}

/// Build the full application router: `/health` plus the `/csv` endpoints.
///
/// Every `/csv` response, errors included, carries the permissive
/// cross-origin headers so a browser front end can call the service.
pub fn build_router(state: ServerState) -> Router {
    let cors_headers = ServiceBuilder::new()
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static(CORS_ALLOW_ORIGIN),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(CORS_ALLOW_METHODS),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(CORS_ALLOW_HEADERS),
        ));

    // `/*filename` never matches an empty remainder, so `/csv/` is routed separately
    let csv_routes = Router::new()
        .route(
            "/csv/",
            get(csv::get_csv_unnamed)
                .post(csv::save_csv_unnamed)
                .options(csv::preflight)
                .fallback(csv::method_not_allowed),
        )
        .route(
            "/csv/*filename",
            get(csv::get_csv)
                .post(csv::save_csv)
                .options(csv::preflight)
                .fallback(csv::method_not_allowed),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_api_key_state,
        ))
        .layer(cors_headers);

    Router::new()
        .route("/health", get(health))
        .merge(csv_routes)
        .with_state(state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
