use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use imobifx_core::models::Address;

use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;

/// Look up the address of a CEP
///
/// Accepts `58000000`, `58000-000` or `58.000-000`.
#[utoipa::path(
    get,
    path = "/api/addresses/{cep}",
    tag = "addresses",
    params(
        ("cep" = String, Path, description = "Brazilian postal code, 8 digits with optional separators")
    ),
    responses(
        (status = 200, description = "Address found", body = Address),
        (status = 400, description = "Malformed CEP", body = ErrorResponse),
        (status = 404, description = "Unknown CEP", body = ErrorResponse),
        (status = 503, description = "Address directory unavailable", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn get_address(
    State(state): State<Arc<AppState>>,
    Path(cep): Path<String>,
) -> Result<Json<Address>, HttpAppError> {
    let address = state.addresses.lookup(&cep).await?;
    Ok(Json(address))
}
