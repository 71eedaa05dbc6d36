use axum::{
    http::{header, HeaderName, HeaderValue, Method, StatusCode},
    middleware,
    response::Response,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    set_header::SetResponseHeaderLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    config::Config,
    handlers::{
        health::livez,
        items::{create_item, delete_item, get_item, update_item},
        response::{
            self, ensure_json_error, CORS_ALLOW_HEADERS, CORS_ALLOW_METHODS, METHOD_NOT_ALLOWED,
            ROUTE_NOT_FOUND,
        },
    },
    state::AppState,
};

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState, config: &Config) -> Router {
    // Preflight requests are answered here
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::DELETE,
            Method::GET,
            Method::OPTIONS,
            Method::PATCH,
            Method::POST,
            Method::PUT,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static("x-amz-date"),
            header::AUTHORIZATION,
            HeaderName::from_static("x-api-key"),
            HeaderName::from_static("x-amz-security-token"),
        ]);

    Router::new()
        .route("/livez", get(livez))
        .route("/items", post(create_item).put(create_item))
        .route(
            "/items/{id}",
            get(get_item)
                .put(update_item)
                .patch(update_item)
                .delete(delete_item),
        )
        .fallback(route_not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            config.request_timeout(),
        ))
        // The timeout answers with an empty body
        .layer(middleware::map_response(ensure_json_error))
        .layer(cors)
        // Every response carries the full CORS header set, errors included
        .layer(SetResponseHeaderLayer::if_not_present(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(CORS_ALLOW_HEADERS),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(CORS_ALLOW_METHODS),
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn route_not_found() -> Response {
    response::message(StatusCode::NOT_FOUND, ROUTE_NOT_FOUND)
}

async fn method_not_allowed() -> Response {
    response::message(StatusCode::METHOD_NOT_ALLOWED, METHOD_NOT_ALLOWED)
}
