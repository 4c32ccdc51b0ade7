//! Submission adapter: validate, upload attachments, create the listing

use super::error::SubmitError;
use super::payload::{CreateListingRequest, ListingReceipt};
use super::traits::ListingClientTrait;
use crate::state::listing::ListingDraft;
use crate::state::schema::validate_submission;
use crate::state::FieldErrors;
use tracing::{info, warn};

/// Submit a draft through `client`.
///
/// Documents are uploaded in form order before the create call and their
/// URLs are written back into the draft, so a retry after a failed create
/// only uploads what is still missing.
pub async fn submit(
    draft: &mut ListingDraft,
    client: &dyn ListingClientTrait,
) -> Result<ListingReceipt, SubmitError> {
    validate_submission(draft).map_err(SubmitError::Validation)?;

    for doc in draft
        .documents_mut()
        .into_iter()
        .filter(|doc| !doc.is_uploaded())
    {
        let url = client.upload_document(&doc.path).await?;
        doc.url = Some(url);
    }

    let request = CreateListingRequest::from_draft(draft).ok_or_else(|| {
        let mut errors = FieldErrors::new();
        errors.insert("role", "Please select your role");
        SubmitError::Validation(errors)
    })?;

    match client.create_listing(&request).await {
        Ok(receipt) => {
            info!(id = ?receipt.id, "Listing submitted");
            Ok(receipt)
        }
        Err(e) => {
            warn!(error = %e, "Listing submission failed");
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockListingClientTrait;
    use crate::state::listing::{
        Charges, DocumentRef, Gallery, LandlordDetails, LeasingInfo, PaymentFrequency,
        PropertyAddress, PropertyType, RentFrequency, Role,
    };
    use chrono::Utc;
    use mockall::predicate::eq;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::path::{Path, PathBuf};

    fn receipt() -> ListingReceipt {
        ListingReceipt {
            id: Some("listing-1".to_string()),
            message: None,
            received_at: Utc::now(),
        }
    }

    fn landlord_draft(property_type: PropertyType) -> ListingDraft {
        ListingDraft {
            property_type: Some(property_type),
            role: Some(Role::Landlord),
            terms_accepted: true,
            landlord: LandlordDetails {
                ownership_doc: Some(DocumentRef::new("/docs/deed.pdf")),
            },
            ..Default::default()
        }
    }

    fn condo_draft() -> ListingDraft {
        let mut draft = landlord_draft(PropertyType::Condominiums);
        let info = &mut draft.condominiums_info;
        info.property_address = Some(PropertyAddress {
            property_name: "Dallas apartments complex".to_string(),
            total_units: 50,
            property_website: Some("https://dallas.example.com".to_string()),
            country: "US".to_string(),
            street_address: "2050 Bloomingdale Ave".to_string(),
            apt_suite_unit: None,
            city: "Dallas".to_string(),
            state: "TX".to_string(),
            zip_code: "75201".to_string(),
        });
        info.leasing_info = Some(LeasingInfo {
            leasing_manager: "Alex Johan Rios".to_string(),
            email: "leasing@rentyard.com".to_string(),
            phone_number: "+18002277861".to_string(),
            same_as_property: true,
            ..Default::default()
        });
        info.charges = Some(Charges {
            application_fee: 100,
            admin_fee: 15,
        });
        info.rent_frequency = Some(RentFrequency {
            rent_frequency: PaymentFrequency::Monthly,
            reminder_date: 25,
            due_date: 5,
        });
        draft
    }

    #[tokio::test]
    async fn test_invalid_draft_is_not_sent() {
        let mut client = MockListingClientTrait::new();
        client.expect_upload_document().never();
        client.expect_create_listing().never();

        let err = submit(&mut ListingDraft::default(), &client).await.unwrap_err();
        match err {
            SubmitError::Validation(errors) => assert!(errors.contains("property_type")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_uploads_documents_before_create() {
        let mut client = MockListingClientTrait::new();
        client
            .expect_upload_document()
            .with(eq(PathBuf::from("/docs/deed.pdf")))
            .times(1)
            .returning(|_| Ok("https://cdn.rentyard.com/deed.pdf".to_string()));
        client
            .expect_create_listing()
            .times(1)
            .withf(|request: &CreateListingRequest| {
                serde_json::to_value(request).ok()
                    == Some(json!({
                        "propertyType": "single_house",
                        "role": "landlord",
                        "termsAccepted": true,
                        "ownershipDoc": "https://cdn.rentyard.com/deed.pdf"
                    }))
            })
            .returning(|_| Ok(receipt()));

        let mut draft = landlord_draft(PropertyType::SingleHouse);
        let result = submit(&mut draft, &client).await.unwrap();
        assert_eq!(result.id.as_deref(), Some("listing-1"));
        assert_eq!(
            draft.landlord.ownership_doc.and_then(|d| d.url),
            Some("https://cdn.rentyard.com/deed.pdf".to_string())
        );
    }

    #[tokio::test]
    async fn test_already_uploaded_documents_are_skipped() {
        let mut client = MockListingClientTrait::new();
        client.expect_upload_document().never();
        client
            .expect_create_listing()
            .times(1)
            .returning(|_| Ok(receipt()));

        let mut draft = landlord_draft(PropertyType::Apartments);
        if let Some(doc) = draft.landlord.ownership_doc.as_mut() {
            doc.url = Some("https://cdn.rentyard.com/deed.pdf".to_string());
        }
        assert!(submit(&mut draft, &client).await.is_ok());
    }

    #[tokio::test]
    async fn test_condominium_uploads_gallery_and_sends_info() {
        let mut client = MockListingClientTrait::new();
        client
            .expect_upload_document()
            .times(3)
            .returning(|path: &Path| {
                Ok(format!(
                    "https://cdn.rentyard.com/{}",
                    path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default()
                ))
            });
        client
            .expect_create_listing()
            .times(1)
            .withf(|request: &CreateListingRequest| {
                let value = serde_json::to_value(request).unwrap_or_default();
                value["condominiumsInfo"]["gallery"]["coverPhoto"]
                    == json!("https://cdn.rentyard.com/cover.jpg")
                    && value["condominiumsInfo"]["rentFrequency"]["dueDate"] == json!("5th")
                    && value["condominiumsInfo"]["charges"]["applicationFee"] == json!(100)
            })
            .returning(|_| Ok(receipt()));

        let mut draft = condo_draft();
        draft.condominiums_info.gallery = Some(Gallery {
            cover_photo: DocumentRef::new("/photos/cover.jpg"),
            featured_photos: vec![DocumentRef::new("/photos/lobby.png")],
            more_photos: vec![],
            videos: vec![],
        });
        assert!(submit(&mut draft, &client).await.is_ok());
    }

    #[tokio::test]
    async fn test_condominium_missing_sections_rejected() {
        let mut client = MockListingClientTrait::new();
        client.expect_create_listing().never();

        let mut draft = condo_draft();
        draft.condominiums_info.charges = None;
        let err = submit(&mut draft, &client).await.unwrap_err();
        match err {
            SubmitError::Validation(errors) => {
                assert_eq!(
                    errors.get("condominiums_info.charges"),
                    Some("Charges is required")
                );
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_upload_failure_stops_submission() {
        let mut client = MockListingClientTrait::new();
        client.expect_upload_document().returning(|_| {
            Err(SubmitError::Status {
                status: 413,
                body: "too large".to_string(),
            })
        });
        client.expect_create_listing().never();

        let mut draft = landlord_draft(PropertyType::SingleHouse);
        let err = submit(&mut draft, &client).await.unwrap_err();
        assert_eq!(err.to_string(), "server responded with 413: too large");
    }

    #[tokio::test]
    async fn test_server_error_is_returned() {
        let mut client = MockListingClientTrait::new();
        client
            .expect_upload_document()
            .returning(|_| Ok("https://cdn.rentyard.com/deed.pdf".to_string()));
        client.expect_create_listing().returning(|_| {
            Err(SubmitError::Status {
                status: 500,
                body: "boom".to_string(),
            })
        });

        let mut draft = landlord_draft(PropertyType::SingleHouse);
        assert!(matches!(
            submit(&mut draft, &client).await,
            Err(SubmitError::Status { status: 500, .. })
        ));
    }

    #[tokio::test]
    async fn test_retry_after_failed_create_does_not_reupload() {
        let mut client = MockListingClientTrait::new();
        client
            .expect_upload_document()
            .with(eq(PathBuf::from("/docs/deed.pdf")))
            .times(1)
            .returning(|_| Ok("https://cdn.rentyard.com/deed.pdf".to_string()));
        let mut attempts = 0;
        client
            .expect_create_listing()
            .times(2)
            .withf(|request: &CreateListingRequest| {
                serde_json::to_value(request).ok().map(|v| v["ownershipDoc"].clone())
                    == Some(json!("https://cdn.rentyard.com/deed.pdf"))
            })
            .returning(move |_| {
                attempts += 1;
                if attempts == 1 {
                    Err(SubmitError::Status {
                        status: 503,
                        body: "unavailable".to_string(),
                    })
                } else {
                    Ok(receipt())
                }
            });

        let mut draft = landlord_draft(PropertyType::SingleHouse);
        assert!(matches!(
            submit(&mut draft, &client).await,
            Err(SubmitError::Status { status: 503, .. })
        ));
        assert!(draft.landlord.ownership_doc.as_ref().is_some_and(DocumentRef::is_uploaded));

        let result = submit(&mut draft, &client).await.unwrap();
        assert_eq!(result.id.as_deref(), Some("listing-1"));
    }
}
