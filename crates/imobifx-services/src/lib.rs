//! ImobiFX Services Layer
//!
//! Orchestration for the listing pipeline: address lookup through the
//! external directory, quote bookkeeping and ad creation/listing. Services
//! depend only on the repository, storage and directory traits, so every one
//! of them can be exercised with in-memory fakes. HTTP handling stays in
//! imobifx-api.

pub mod address;
pub mod ads;
pub mod quotes;
pub mod viacep;

pub use address::{AddressDirectory, AddressService, DirectoryError};
pub use ads::AdsService;
pub use quotes::QuoteService;
pub use viacep::ViaCepClient;
