//! Domain constants shared across crates.

/// Public path prefix under which stored ad images are served.
pub const IMAGE_URL_PREFIX: &str = "/static/images/";

/// Extension used for stored images whose upload carried no extension.
pub const DEFAULT_IMAGE_EXTENSION: &str = ".bin";

/// Content types accepted for ad images (compared case-insensitively).
pub const ALLOWED_IMAGE_CONTENT_TYPES: [&str; 3] = ["image/jpeg", "image/png", "image/webp"];

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const MAX_PAGE_SIZE: i64 = 50;

/// Decimal places kept when converting BRL prices to USD.
pub const USD_PRICE_SCALE: u32 = 2;

/// Integer digits and decimal places of the `ads.price_brl` column.
pub const PRICE_BRL_INTEGER_DIGITS: u32 = 12;
pub const PRICE_BRL_SCALE: u32 = 2;

/// Integer digits and decimal places of the `quotes.brl_to_usd` column.
pub const RATE_INTEGER_DIGITS: u32 = 10;
pub const RATE_SCALE: u32 = 8;
