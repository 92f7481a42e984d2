use std::sync::Arc;

use poem::{EndpointExt, Route, endpoint::BoxEndpoint, middleware::Tracing};
use poem_openapi::OpenApiService;

use crate::presentation::http::endpoints::{
    messages::MessagesEndpoints,
    root::{ApiState, Endpoints},
};

pub mod endpoints;
pub mod mappers;
pub mod requests;
pub mod responses;
pub mod security;

/// API under `/api`, swagger UI at the root.
pub fn build_app(state: Arc<ApiState>, server_url: &str) -> BoxEndpoint<'static> {
    let api_service = OpenApiService::new(
        (Endpoints, MessagesEndpoints::new(state)),
        "Contact Desk API",
        env!("CARGO_PKG_VERSION"),
    )
    .server(format!("{}/api", server_url));
    let ui = api_service.swagger_ui();

    Route::new()
        .nest("/api", api_service)
        .nest("/", ui)
        .with(Tracing)
        .map_to_response()
        .boxed()
}
