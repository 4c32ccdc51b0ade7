//! Step-level validation
//!
//! Field rules are declared on the records themselves; this module composes
//! them into the schema for each wizard step: the base choices, the branch of
//! the role union picked by `role`, terms acceptance, and the required
//! condominium sub-records.

use super::listing::{ListingDraft, LeasingInfo, RoleDetails};
use super::section::Section;
use std::collections::BTreeMap;
use std::fmt;
use validator::{Validate, ValidationErrors};

/// Validation messages keyed by field path (first message per field)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message unless the field already has one
    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn merge(&mut self, other: FieldErrors) {
        for (field, message) in other.0 {
            self.insert(field, message);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Turn an empty set into `Ok`
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }

    /// Collect `validator` output, prefixing each field with `prefix.` if given
    pub fn from_validation(errors: &ValidationErrors, prefix: Option<&str>) -> Self {
        let mut collected = Self::new();
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by_key(|(field, _)| *field);
        for (field, field_errors) in fields {
            let Some(first) = field_errors.first() else {
                continue;
            };
            let message = first
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("{field} is invalid"));
            let path = match prefix {
                Some(prefix) => format!("{prefix}.{field}"),
                None => field.to_string(),
            };
            collected.insert(path, message);
        }
        collected
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.0.values().map(String::as_str).collect();
        write!(f, "{}", messages.join("; "))
    }
}

/// Validate a single record with its declared field rules
pub fn validate_record<T: Validate>(record: &T) -> Result<(), FieldErrors> {
    record
        .validate()
        .map_err(|errors| FieldErrors::from_validation(&errors, None))
}

/// Leasing info: field rules plus the office address when it differs from
/// the property address
pub fn validate_leasing_info(info: &LeasingInfo) -> Result<(), FieldErrors> {
    let mut errors = match validate_record(info) {
        Ok(()) => FieldErrors::new(),
        Err(errors) => errors,
    };
    if !info.same_as_property {
        let required = [
            ("street_address", &info.street_address, "Street address is required"),
            ("city", &info.city, "City is required"),
            ("state", &info.state, "State is required"),
            ("zip_code", &info.zip_code, "Zip code is required"),
        ];
        for (field, value, message) in required {
            if value.as_deref().map_or(true, |v| v.trim().is_empty()) {
                errors.insert(field, message);
            }
        }
    }
    errors.into_result()
}

/// Property type, the role union branch and terms acceptance
pub fn validate_role_selection(draft: &ListingDraft) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();

    if draft.property_type.is_none() {
        errors.insert("property_type", "Please select a property type");
    }

    match draft.role_details() {
        None => errors.insert("role", "Please select your role"),
        Some(details) => {
            let result = match &details {
                RoleDetails::Landlord(d) => validate_record(d),
                RoleDetails::Realtor(d) => validate_record(d),
                RoleDetails::ManagementCompany(d) => validate_record(d),
            };
            if let Err(role_errors) = result {
                errors.merge(role_errors);
            }
        }
    }

    if !draft.terms_accepted {
        errors.insert("terms_accepted", "You must accept the terms and conditions");
    }

    errors.into_result()
}

/// Required condominium sub-records must be present
pub fn validate_condominiums_info(draft: &ListingDraft) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    for section in Section::ALL.iter().filter(|s| s.is_required()) {
        if !section.is_filled(&draft.condominiums_info) {
            errors.insert(section.error_key(), format!("{} is required", section.title()));
        }
    }
    errors.into_result()
}

/// Everything that must hold before the draft can be submitted
pub fn validate_submission(draft: &ListingDraft) -> Result<(), FieldErrors> {
    let mut errors = match validate_role_selection(draft) {
        Ok(()) => FieldErrors::new(),
        Err(errors) => errors,
    };
    if draft.is_condominium() {
        if let Err(condo_errors) = validate_condominiums_info(draft) {
            errors.merge(condo_errors);
        }
    }
    errors.into_result()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::listing::{
        Charges, DocumentRef, LandlordDetails, PropertyAddress, PropertyType, Role,
    };

    fn landlord_draft() -> ListingDraft {
        ListingDraft {
            property_type: Some(PropertyType::SingleHouse),
            role: Some(Role::Landlord),
            terms_accepted: true,
            landlord: LandlordDetails {
                ownership_doc: Some(DocumentRef::new("deed.pdf")),
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_draft_reports_base_errors() {
        let errors = validate_role_selection(&ListingDraft::default()).unwrap_err();
        assert_eq!(errors.get("property_type"), Some("Please select a property type"));
        assert_eq!(errors.get("role"), Some("Please select your role"));
        assert_eq!(
            errors.get("terms_accepted"),
            Some("You must accept the terms and conditions")
        );
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_complete_landlord_passes() {
        assert!(validate_role_selection(&landlord_draft()).is_ok());
    }

    #[test]
    fn test_required_fields_follow_role() {
        let mut draft = landlord_draft();
        draft.role = Some(Role::Realtor);
        let errors = validate_role_selection(&draft).unwrap_err();
        assert_eq!(errors.get("licence_number"), Some("Licence number is required"));
        assert_eq!(
            errors.get("agreement_with_landlord"),
            Some("Agreement with landlord is required")
        );
        assert!(!errors.contains("ownership_doc"));
    }

    #[test]
    fn test_management_company_branch_lists_all_missing_fields() {
        let mut draft = landlord_draft();
        draft.role = Some(Role::ManagementCompany);
        let errors = validate_role_selection(&draft).unwrap_err();
        for field in [
            "company_name",
            "company_identifier",
            "job_title",
            "agreement",
            "country",
            "street_address",
            "phone_number",
            "email",
            "city",
            "state",
            "zip_code",
        ] {
            assert!(errors.contains(field), "missing error for {field}");
        }
        assert!(!errors.contains("apt_unit"));
    }

    #[test]
    fn test_terms_must_be_accepted() {
        let mut draft = landlord_draft();
        draft.terms_accepted = false;
        let errors = validate_role_selection(&draft).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.contains("terms_accepted"));
    }

    #[test]
    fn test_condominiums_require_four_sections() {
        let mut draft = landlord_draft();
        draft.property_type = Some(PropertyType::Condominiums);
        let errors = validate_condominiums_info(&draft).unwrap_err();
        assert_eq!(
            errors.get("condominiums_info.property_address"),
            Some("Property address is required")
        );
        assert!(errors.contains("condominiums_info.leasing_info"));
        assert!(errors.contains("condominiums_info.charges"));
        assert!(errors.contains("condominiums_info.rent_frequency"));
        assert_eq!(errors.len(), 4);

        draft.condominiums_info.charges = Some(Charges {
            application_fee: 100,
            admin_fee: 75,
        });
        draft.condominiums_info.property_address = Some(PropertyAddress::default());
        let errors = validate_condominiums_info(&draft).unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_submission_ignores_condo_info_for_other_types() {
        let draft = landlord_draft();
        assert!(validate_submission(&draft).is_ok());

        let mut condo = landlord_draft();
        condo.property_type = Some(PropertyType::Condominiums);
        assert!(validate_submission(&condo).is_err());
    }

    #[test]
    fn test_leasing_address_required_unless_same_as_property() {
        let mut info = LeasingInfo {
            leasing_manager: "Alex Johan Rios".to_string(),
            email: "leasing@rentyard.com".to_string(),
            phone_number: "+18002277861".to_string(),
            same_as_property: false,
            ..Default::default()
        };
        let errors = validate_leasing_info(&info).unwrap_err();
        assert!(errors.contains("street_address"));
        assert!(errors.contains("zip_code"));
        assert!(!errors.contains("apt_suite_unit"));

        info.same_as_property = true;
        assert!(validate_leasing_info(&info).is_ok());
    }

    #[test]
    fn test_field_errors_keep_first_message() {
        let mut errors = FieldErrors::new();
        errors.insert("email", "first");
        errors.insert("email", "second");
        assert_eq!(errors.get("email"), Some("first"));
        assert_eq!(errors.to_string(), "first");
    }

    #[test]
    fn test_from_validation_applies_prefix() {
        let details = LandlordDetails::default();
        let raw = details.validate().unwrap_err();
        let errors = FieldErrors::from_validation(&raw, Some("landlord"));
        assert_eq!(
            errors.get("landlord.ownership_doc"),
            Some("Ownership document is required")
        );
    }
}
