use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use imobifx_core::models::{CreateQuoteInput, Quote};
use imobifx_core::validation::validate_create_quote_input;
use imobifx_core::AppError;

use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;

/// Register a BRL to USD quote
#[utoipa::path(
    post,
    path = "/api/quotes",
    tag = "quotes",
    request_body = CreateQuoteInput,
    responses(
        (status = 201, description = "Quote stored", body = Quote),
        (status = 400, description = "Invalid quote", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, input))]
pub async fn create_quote(
    State(state): State<Arc<AppState>>,
    ValidatedJson(input): ValidatedJson<CreateQuoteInput>,
) -> Result<(StatusCode, Json<Quote>), HttpAppError> {
    let effective_at = validate_create_quote_input(&input)?;
    let quote = state.quotes.create(input.brl_to_usd, effective_at).await?;
    Ok((StatusCode::CREATED, Json(quote)))
}

/// Quote currently used to price listings
#[utoipa::path(
    get,
    path = "/api/quotes/current",
    tag = "quotes",
    responses(
        (status = 200, description = "Current quote", body = Quote),
        (status = 404, description = "No quote registered yet", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn current_quote(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Quote>, HttpAppError> {
    let quote = state
        .quotes
        .current()
        .await?
        .ok_or_else(|| AppError::NotFound("No quote registered".to_string()))?;
    Ok(Json(quote))
}
