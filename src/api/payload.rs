//! Wire shapes of the listing API

use crate::state::listing::{CondominiumsInfo, ListingDraft, PropertyType, Role, RoleDetails};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body of the create-listing call.
///
/// The selected role's fields sit at the top level next to the base
/// choices; `condominiumsInfo` is only present for condominiums.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateListingRequest {
    pub property_type: PropertyType,
    pub role: Role,
    pub terms_accepted: bool,
    #[serde(flatten)]
    pub role_details: RoleDetails,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condominiums_info: Option<CondominiumsInfo>,
}

impl CreateListingRequest {
    /// Map a draft onto the request; `None` while property type or role is
    /// still unset
    pub fn from_draft(draft: &ListingDraft) -> Option<Self> {
        let property_type = draft.property_type?;
        let role_details = draft.role_details()?;
        Some(Self {
            property_type,
            role: role_details.role(),
            terms_accepted: draft.terms_accepted,
            role_details,
            condominiums_info: (property_type == PropertyType::Condominiums)
                .then(|| draft.condominiums_info.clone()),
        })
    }
}

/// Response of the document upload endpoint
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UploadResponse {
    #[serde(alias = "imageUrl", alias = "image_url", alias = "secure_url")]
    pub url: String,
}

/// What the backend acknowledged for a created listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingReceipt {
    #[serde(default, alias = "_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    /// Local time the response arrived
    #[serde(skip_deserializing, default = "Utc::now")]
    pub received_at: DateTime<Utc>,
}

impl ListingReceipt {
    pub fn summary(&self) -> String {
        let when = self.received_at.format("%Y-%m-%d %H:%M:%S UTC");
        match (&self.id, &self.message) {
            (Some(id), _) => format!("Listing {id} submitted at {when}"),
            (None, Some(message)) => format!("{message} ({when})"),
            (None, None) => format!("Listing submitted at {when}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::listing::{Charges, DocumentRef, LandlordDetails, RealtorDetails};
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn realtor_draft(property_type: PropertyType) -> ListingDraft {
        ListingDraft {
            property_type: Some(property_type),
            role: Some(Role::Realtor),
            terms_accepted: true,
            landlord: LandlordDetails {
                ownership_doc: Some(DocumentRef::new("deed.pdf")),
            },
            realtor: RealtorDetails {
                licence_number: "TX-55".to_string(),
                additional_documents: None,
                agreement_with_landlord: Some(DocumentRef {
                    path: "agreement.pdf".into(),
                    url: Some("https://cdn.rentyard.com/agreement.pdf".to_string()),
                }),
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_request_flattens_selected_role_only() {
        let request = CreateListingRequest::from_draft(&realtor_draft(PropertyType::Apartments))
            .unwrap();
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "propertyType": "apartments",
                "role": "realtor",
                "termsAccepted": true,
                "licenceNumber": "TX-55",
                "agreementWithLandlord": "https://cdn.rentyard.com/agreement.pdf"
            })
        );
    }

    #[test]
    fn test_condominiums_info_included_for_condominiums() {
        let mut draft = realtor_draft(PropertyType::Condominiums);
        draft.condominiums_info.charges = Some(Charges {
            application_fee: 100,
            admin_fee: 15,
        });
        let value = serde_json::to_value(CreateListingRequest::from_draft(&draft).unwrap()).unwrap();
        assert_eq!(
            value["condominiumsInfo"],
            json!({ "charges": { "applicationFee": 100, "adminFee": 15 } })
        );
    }

    #[test]
    fn test_condominiums_info_dropped_for_other_types() {
        let mut draft = realtor_draft(PropertyType::SingleHouse);
        draft.condominiums_info.charges = Some(Charges::default());
        let request = CreateListingRequest::from_draft(&draft).unwrap();
        assert!(request.condominiums_info.is_none());
    }

    #[test]
    fn test_incomplete_draft_has_no_request() {
        assert!(CreateListingRequest::from_draft(&ListingDraft::default()).is_none());
    }

    #[test]
    fn test_receipt_accepts_mongo_id() {
        let receipt: ListingReceipt =
            serde_json::from_value(json!({ "_id": "665f1c", "message": "created" })).unwrap();
        assert_eq!(receipt.id.as_deref(), Some("665f1c"));
        assert_eq!(receipt.message.as_deref(), Some("created"));
    }

    #[test]
    fn test_receipt_tolerates_empty_body() {
        let receipt: ListingReceipt = serde_json::from_value(json!({})).unwrap();
        assert!(receipt.id.is_none());
    }

    #[test]
    fn test_receipt_summary() {
        let receipt = ListingReceipt {
            id: Some("42".to_string()),
            message: None,
            received_at: Utc.with_ymd_and_hms(2026, 10, 16, 9, 30, 0).unwrap(),
        };
        assert_eq!(receipt.summary(), "Listing 42 submitted at 2026-10-16 09:30:00 UTC");
    }

    #[test]
    fn test_upload_response_aliases() {
        let response: UploadResponse =
            serde_json::from_value(json!({ "imageUrl": "https://cdn/x.pdf" })).unwrap();
        assert_eq!(response.url, "https://cdn/x.pdf");
    }
}
