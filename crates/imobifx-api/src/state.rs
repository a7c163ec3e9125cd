use imobifx_services::{AddressService, AdsService, QuoteService};

/// Shared state handed to every handler.
pub struct AppState {
    pub ads: AdsService,
    pub quotes: QuoteService,
    pub addresses: AddressService,
}
