use axum::{extract::State, http::Uri, Json};
use models::customer::Customer;

use crate::errors::ApiError;
use crate::routes::params::lossy_segment;
use crate::state::CustomerState;

/// 列出全部客户（按初始化顺序）
pub async fn list_customers(State(state): State<CustomerState>) -> Result<Json<Vec<Customer>>, ApiError> {
    Ok(Json(state.directory.list().await?))
}

/// Plain-text address; a miss is still 200 with the "Customer not found" body.
/// Mounted at `/customers/:name/address`.
pub async fn get_customer_address(
    State(state): State<CustomerState>,
    uri: Uri,
) -> Result<String, ApiError> {
    let name = lossy_segment(&uri, 2);
    Ok(state.directory.find_address(&name).await?)
}
