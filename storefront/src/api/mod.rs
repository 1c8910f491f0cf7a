//! HTTP surface
//!
//! Pages answer with JSON view models in the [`ApiResponse`](shared::ApiResponse)
//! envelope; only login and logout redirect.
//!
//! - [`public`] - storefront pages and the contact form
//! - [`admin`] - login and catalog management
//! - [`media`] - ingested images
//! - [`health`] - liveness

pub mod admin;
pub mod health;
pub mod media;
pub mod public;
pub mod view;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use http::{HeaderName, HeaderValue};
use tower::ServiceBuilder;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::core::ServerState;

/// Largest accepted request body (multipart uploads included)
pub const MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// All routes, no middleware besides the admin gate
pub fn build_router(state: &ServerState) -> Router<ServerState> {
    Router::new()
        .merge(public::router())
        .merge(admin::router(state))
        .merge(media::router())
        .merge(health::router())
}

/// Fully configured application, used by the server and by tests
pub fn build_app(state: &ServerState) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    build_router(state)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(request_id.clone(), XRequestId))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::new(request_id)),
        )
        .with_state(state.clone())
}
