use axum::{
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put, MethodRouter},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{debug, Level};
use utoipa::OpenApi;

use common::types::{Health, Message};

use crate::{openapi::ApiDoc, state::ServerState};

pub mod users;

pub const ROUTE_NOT_FOUND: &str = "Route not found!";

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK")))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Catch-all for unknown paths and for known paths hit with an unsupported method.
pub async fn route_not_found(uri: axum::http::Uri) -> impl IntoResponse {
    debug!(%uri, "no route matched");
    (StatusCode::NOT_FOUND, Json(Message::new(ROUTE_NOT_FOUND)))
}

fn or_not_found(route: MethodRouter<ServerState>) -> MethodRouter<ServerState> {
    route.fallback(route_not_found)
}

/// Build the full application router: user routes, health, OpenAPI document and 404 fallback.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let user_routes = Router::new()
        .route("/users", or_not_found(get(users::list_users)))
        .route("/createUser", or_not_found(post(users::create_user)))
        .route("/viewUser/:userId", or_not_found(get(users::view_user)))
        .route("/deleteAllUsers", or_not_found(delete(users::delete_all_users)))
        .route("/deleteUser/:userId", or_not_found(delete(users::delete_user)))
        .route("/updateUser/:userId", or_not_found(put(users::update_user)));

    let meta_routes = Router::new()
        .route("/health", or_not_found(get(health)))
        .route("/api-docs/openapi.json", or_not_found(get(openapi_json)));

    user_routes
        .merge(meta_routes)
        .fallback(route_not_found)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                // status code and latency per response
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
