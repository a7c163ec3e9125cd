//! OpenAPI documentation, served at `/api/openapi.json` and rendered by RapiDoc at `/docs`.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use imobifx_core::{models, FieldViolation};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "ImobiFX API",
        version = "0.1.0",
        description = "Real-estate classifieds priced in BRL with USD conversion. Addresses are resolved from the CEP through ViaCEP."
    ),
    paths(
        handlers::health::health,
        handlers::addresses::get_address,
        handlers::quotes::create_quote,
        handlers::quotes::current_quote,
        handlers::ads::create_ad,
        handlers::ads::list_ads,
    ),
    components(schemas(
        models::Address,
        models::Quote,
        models::CreateQuoteInput,
        models::QuoteUsed,
        models::AdType,
        models::AdAddress,
        models::AdItem,
        models::AdsListResponse,
        handlers::health::HealthResponse,
        error::ErrorResponse,
        FieldViolation,
    )),
    tags(
        (name = "health", description = "Liveness"),
        (name = "addresses", description = "CEP lookup"),
        (name = "quotes", description = "BRL to USD quotes"),
        (name = "ads", description = "Ad publishing and search"),
    )
)]
pub struct ApiDoc;

pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}
