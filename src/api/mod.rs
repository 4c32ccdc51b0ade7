//! Listing API: wire types, HTTP client and the submission adapter

mod client;
mod error;
mod payload;
mod submit;
mod traits;

pub use client::ListingClient;
pub use error::SubmitError;
pub use payload::ListingReceipt;
pub use submit::submit;
pub use traits::ListingClientTrait;

#[cfg(test)]
pub use traits::MockListingClientTrait;
