use axum::{extract::State, http::Uri, Json};
use models::car::Car;

use crate::errors::ApiError;
use crate::routes::params::lossy_segment;
use crate::state::RentalState;

/// 列出全部车辆
pub async fn list_cars(State(state): State<RentalState>) -> Result<Json<Vec<Car>>, ApiError> {
    Ok(Json(state.catalog.list().await?))
}

/// 代理到 customer directory，原样返回其响应体。挂载于 `/customer/:name`
pub async fn get_customer_address(
    State(state): State<RentalState>,
    uri: Uri,
) -> Result<String, ApiError> {
    let name = lossy_segment(&uri, 2);
    Ok(state.catalog.lookup_customer_address(&name).await?)
}
