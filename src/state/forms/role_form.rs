//! Property & role step form
//!
//! Rows, top to bottom: property type, role, the selected role's
//! verification fields, terms acceptance, and the Back/Next buttons.

use super::field::FormField;
use super::form_state::{FieldSet, Form};
use crate::state::listing::{
    DocumentRef, LandlordDetails, ListingDraft, ManagementCompanyDetails, RealtorDetails, Role,
    RoleDetails, COUNTRIES, STATES,
};

/// What the focused row controls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleRow {
    PropertyType,
    Role,
    Detail(usize),
    Terms,
    Buttons,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoleSelectionForm {
    pub role: Option<Role>,
    pub details: FieldSet,
    pub active_field_index: usize,
}

impl RoleSelectionForm {
    pub fn from_draft(draft: &ListingDraft) -> Self {
        let mut form = Self::default();
        form.reload(draft);
        form
    }

    /// Rebuild the verification fields for the draft's current role
    pub fn reload(&mut self, draft: &ListingDraft) {
        self.role = draft.role;
        self.details = FieldSet::new(match draft.role {
            Some(Role::Landlord) => landlord_fields(&draft.landlord),
            Some(Role::Realtor) => realtor_fields(&draft.realtor),
            Some(Role::ManagementCompany) => management_fields(&draft.management_company),
            None => Vec::new(),
        });
        self.set_active_field(self.active_field_index);
    }

    pub fn row(&self) -> RoleRow {
        let details = self.details.fields.len();
        match self.active_field_index {
            0 => RoleRow::PropertyType,
            1 => RoleRow::Role,
            i if i < 2 + details => RoleRow::Detail(i - 2),
            i if i == 2 + details => RoleRow::Terms,
            _ => RoleRow::Buttons,
        }
    }

    /// Row index of a verification field, for jumping to an error
    pub fn row_of(&self, field: &str) -> Option<usize> {
        match field {
            "property_type" => Some(0),
            "role" => Some(1),
            "terms_accepted" => Some(2 + self.details.fields.len()),
            name => self
                .details
                .fields
                .iter()
                .position(|f| f.name == name)
                .map(|i| i + 2),
        }
    }

    /// The role branch as currently typed; no validation
    pub fn role_details(&self) -> Option<RoleDetails> {
        let f = &self.details;
        self.role.map(|role| match role {
            Role::Landlord => RoleDetails::Landlord(LandlordDetails {
                ownership_doc: document(f, "ownership_doc"),
            }),
            Role::Realtor => RoleDetails::Realtor(RealtorDetails {
                licence_number: f.text("licence_number").to_string(),
                additional_documents: document(f, "additional_documents"),
                agreement_with_landlord: document(f, "agreement_with_landlord"),
            }),
            Role::ManagementCompany => RoleDetails::ManagementCompany(ManagementCompanyDetails {
                company_name: f.text("company_name").to_string(),
                company_identifier: f.text("company_identifier").to_string(),
                job_title: f.text("job_title").to_string(),
                agreement: document(f, "agreement"),
                country: f.text("country").to_string(),
                street_address: f.text("street_address").to_string(),
                apt_unit: f.optional_text("apt_unit"),
                phone_number: f.text("phone_number").to_string(),
                email: f.text("email").to_string(),
                city: f.text("city").to_string(),
                state: f.text("state").to_string(),
                zip_code: f.text("zip_code").to_string(),
            }),
        })
    }
}

impl Form for RoleSelectionForm {
    fn field_count(&self) -> usize {
        self.details.fields.len() + 4
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(self.field_count() - 1);
    }
    fn get_active_field_mut(&mut self) -> Option<&mut FormField> {
        match self.row() {
            RoleRow::Detail(i) => self.details.fields.get_mut(i),
            _ => None,
        }
    }
    fn get_field(&self, index: usize) -> Option<&FormField> {
        index
            .checked_sub(2)
            .and_then(|i| self.details.fields.get(i))
    }
}

fn document(fields: &FieldSet, name: &str) -> Option<DocumentRef> {
    DocumentRef::from_input(fields.text(name))
}

fn path_text(doc: &Option<DocumentRef>) -> String {
    doc.as_ref()
        .map(|d| d.path.display().to_string())
        .unwrap_or_default()
}

fn text(name: &str, label: &str, value: &str) -> FormField {
    FormField::text_with_value(name, label, value.to_string(), false)
}

fn landlord_fields(d: &LandlordDetails) -> Vec<FormField> {
    vec![text(
        "ownership_doc",
        "Ownership doc (PDF path)*",
        &path_text(&d.ownership_doc),
    )]
}

fn realtor_fields(d: &RealtorDetails) -> Vec<FormField> {
    vec![
        text("licence_number", "Licence number*", &d.licence_number),
        text(
            "additional_documents",
            "Additional documents for realtor (PDF path)",
            &path_text(&d.additional_documents),
        ),
        text(
            "agreement_with_landlord",
            "Agreement with landlord (PDF path)*",
            &path_text(&d.agreement_with_landlord),
        ),
    ]
}

fn management_fields(d: &ManagementCompanyDetails) -> Vec<FormField> {
    vec![
        text("company_name", "Company name*", &d.company_name),
        text("company_identifier", "Company Identifier (EIN/TIN)*", &d.company_identifier),
        text("job_title", "Your job title*", &d.job_title),
        text(
            "agreement",
            "Agreement with landlord/owner (PDF path)*",
            &path_text(&d.agreement),
        ),
        FormField::choice("country", "Country/Region*", COUNTRIES, Some(d.country.as_str())),
        text("street_address", "Street address*", &d.street_address),
        text(
            "apt_unit",
            "Apt, suit, unit (if applicable)",
            d.apt_unit.as_deref().unwrap_or_default(),
        ),
        text("phone_number", "Phone number*", &d.phone_number),
        text("email", "Contact email*", &d.email),
        text("city", "City/Town*", &d.city),
        FormField::choice("state", "State/Territory*", STATES, Some(d.state.as_str())),
        text("zip_code", "Zip code*", &d.zip_code),
    ]
}
