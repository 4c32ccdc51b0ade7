//! HTTP client for the RentYard listing API

use super::error::SubmitError;
use super::payload::{CreateListingRequest, ListingReceipt, UploadResponse};
use super::traits::ListingClientTrait;
use crate::config::ApiSettings;
use async_trait::async_trait;
use chrono::Utc;
use mime_guess::Mime;
use reqwest::multipart::{Form, Part};
use reqwest::{RequestBuilder, Response};
use std::path::Path;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Multipart field the upload endpoint reads the file from
const UPLOAD_FIELD: &str = "image";

/// Client for the listing API
pub struct ListingClient {
    http: reqwest::Client,
    settings: ApiSettings,
}

impl ListingClient {
    /// Create a new client from resolved settings
    pub fn new(settings: ApiSettings) -> Result<Self, SubmitError> {
        if !settings.base_url.starts_with("http://") && !settings.base_url.starts_with("https://") {
            return Err(SubmitError::Config(format!(
                "API URL must start with http:// or https://, got {}",
                settings.base_url
            )));
        }
        let http = reqwest::Client::builder()
            .timeout(settings.timeout)
            .build()?;
        Ok(Self { http, settings })
    }

    pub fn base_url(&self) -> &str {
        &self.settings.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        endpoint(&self.settings.base_url, path)
    }

    /// Attach the bearer token when one is configured
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.settings.token {
            Some(token) => request.header("Authorization", format!("Bearer {}", token)),
            None => request,
        }
    }
}

#[async_trait]
impl ListingClientTrait for ListingClient {
    async fn upload_document(&self, path: &Path) -> Result<String, SubmitError> {
        let bytes = tokio::fs::read(path).await.map_err(|source| SubmitError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document".to_string());
        debug!(file = %file_name, size = bytes.len(), "Uploading document");

        let part = Part::bytes(bytes)
            .file_name(file_name.clone())
            .mime_str(content_type(path).as_ref())?;
        let form = Form::new().part(UPLOAD_FIELD, part);

        let response = self
            .authorize(self.http.post(self.endpoint(&self.settings.upload_path)))
            .multipart(form)
            .send()
            .await?;
        let body = success_body(response).await?;
        let uploaded: UploadResponse = serde_json::from_str(&body)?;
        info!(file = %file_name, url = %uploaded.url, "Document uploaded");
        Ok(uploaded.url)
    }

    async fn create_listing(
        &self,
        request: &CreateListingRequest,
    ) -> Result<ListingReceipt, SubmitError> {
        let request_id = Uuid::new_v4();
        info!(%request_id, property_type = ?request.property_type, role = ?request.role, "Creating listing");

        let response = self
            .authorize(self.http.post(self.endpoint(&self.settings.create_listing_path)))
            .header("X-Request-Id", request_id.to_string())
            .json(request)
            .send()
            .await?;
        let body = success_body(response).await?;

        let mut receipt: ListingReceipt = if body.trim().is_empty() {
            ListingReceipt {
                id: None,
                message: None,
                received_at: Utc::now(),
            }
        } else {
            serde_json::from_str(&body)?
        };
        receipt.received_at = Utc::now();
        Ok(receipt)
    }
}

/// Body text of a 2xx response; anything else becomes `SubmitError::Status`
async fn success_body(response: Response) -> Result<String, SubmitError> {
    let status = response.status();
    let body = response.text().await?;
    if status.is_success() {
        Ok(body)
    } else {
        warn!(status = status.as_u16(), "Listing API rejected request");
        Err(SubmitError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

fn endpoint(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

fn content_type(path: &Path) -> Mime {
    mime_guess::from_path(path).first_or_octet_stream()
}
