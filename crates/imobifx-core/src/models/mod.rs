//! Data models for the listing service
//!
//! Stored entities (`Ad`, `Quote`), caller drafts (`CreateAdInput`, `ListAdsInput`,
//! `CreateQuoteInput`) and the read-side projections built from them.

mod ad;
mod address;
mod image;
mod listing;
mod quote;

pub use ad::*;
pub use address::*;
pub use image::*;
pub use listing::*;
pub use quote::*;
