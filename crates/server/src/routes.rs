use axum::{http::StatusCode, routing::get, Json, Router};
use tower_http::{
    cors::CorsLayer,
    trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure},
};
use tracing::Level;

use common::{metrics::encode_metrics, types::Health};

use crate::state::{CustomerState, RentalState};

pub mod customers;
pub mod cars;
pub mod params;

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

pub async fn metrics() -> (StatusCode, String) {
    encode_metrics()
}

/// Customer directory routes
pub fn build_customer_router(state: CustomerState, cors: CorsLayer) -> Router {
    let api = Router::new()
        .route("/customers", get(customers::list_customers))
        .route("/customers/:name/address", get(customers::get_customer_address))
        .with_state(state);

    with_common_layers(api, cors)
}

/// Rental catalog routes. `/cars` is the only car listing route.
pub fn build_rental_router(state: RentalState, cors: CorsLayer) -> Router {
    let api = Router::new()
        .route("/cars", get(cars::list_cars))
        .route("/customer/:name", get(cars::get_customer_address))
        .with_state(state);

    with_common_layers(api, cors)
}

fn with_common_layers(api: Router, cors: CorsLayer) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .merge(api)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // 每次请求创建 span，包含方法和路径等，日志级别为 INFO
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                // 响应返回时打点，包含状态码与耗时
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                // 失败（5xx 等）时以 ERROR 记录
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                )
        )
}
