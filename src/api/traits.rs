//! Trait abstraction for the listing API client to enable mocking in tests

use super::error::SubmitError;
use super::payload::{CreateListingRequest, ListingReceipt};
use async_trait::async_trait;
use std::path::Path;

/// Trait for listing API operations, enabling mocking in tests
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ListingClientTrait: Send + Sync {
    /// Upload a local file and return the URL the backend stored it under
    async fn upload_document(&self, path: &Path) -> Result<String, SubmitError>;

    /// Create the listing
    async fn create_listing(
        &self,
        request: &CreateListingRequest,
    ) -> Result<ListingReceipt, SubmitError>;
}
