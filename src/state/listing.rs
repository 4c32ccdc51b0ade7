//! Listing domain types
//!
//! Everything the intake wizard collects lives here: the property type and
//! role choices, the role-specific verification records and the condominium
//! sub-records. Field-level rules are declared with `validator` attributes;
//! cross-field and step-level rules live in `state::schema`.

use serde::{Serialize, Serializer};
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use validator::{Validate, ValidationError};

/// Countries offered by the address selects (code, label)
pub const COUNTRIES: &[(&str, &str)] = &[
    ("US", "United States"),
    ("CA", "Canada"),
    ("UK", "United Kingdom"),
    ("AU", "Australia"),
    ("BD", "Bangladesh"),
];

/// States offered by the address selects (code, label)
pub const STATES: &[(&str, &str)] = &[
    ("TX", "Texas"),
    ("CA", "California"),
    ("NY", "New York"),
    ("FL", "Florida"),
];

/// Kind of property being listed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyType {
    SingleHouse,
    Apartments,
    Condominiums,
}

impl PropertyType {
    pub const ALL: [PropertyType; 3] = [Self::SingleHouse, Self::Apartments, Self::Condominiums];

    pub fn title(&self) -> &'static str {
        match self {
            Self::SingleHouse => "Single House Property",
            Self::Apartments => "Apartments complex",
            Self::Condominiums => "Condominiums",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::SingleHouse => "Single unit house for single family",
            Self::Apartments | Self::Condominiums => "Multiple unit house for families",
        }
    }
}

/// Who is listing the property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Landlord,
    Realtor,
    ManagementCompany,
}

impl Role {
    pub const ALL: [Role; 3] = [Self::Landlord, Self::Realtor, Self::ManagementCompany];

    pub fn title(&self) -> &'static str {
        match self {
            Self::Landlord => "Landlord",
            Self::Realtor => "Realtor",
            Self::ManagementCompany => "Property management company",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Landlord => "Owner of the property",
            Self::Realtor => "Manage property on behalf on owner",
            Self::ManagementCompany => "For management company",
        }
    }

    /// Heading of the verification subform for this role
    pub fn verification_heading(&self) -> &'static str {
        match self {
            Self::Landlord => "Proof of ownership",
            Self::Realtor => "Realtor verification",
            Self::ManagementCompany => "Company & office info",
        }
    }
}

/// A file attached to the listing.
///
/// Holds the local path the user picked and, once the submission adapter has
/// uploaded it, the remote URL. Serializes as the URL when known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRef {
    pub path: PathBuf,
    pub url: Option<String>,
}

impl DocumentRef {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            url: None,
        }
    }

    /// Parse a user-typed path; blank input means "no file"
    pub fn from_input(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self::new(trimmed))
        }
    }

    pub fn file_name(&self) -> Cow<'_, str> {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy())
            .unwrap_or_else(|| self.path.to_string_lossy())
    }

    pub fn is_uploaded(&self) -> bool {
        self.url.is_some()
    }

    fn has_extension(&self, allowed: &[&str]) -> bool {
        has_extension(&self.path, allowed)
    }
}

impl Serialize for DocumentRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match &self.url {
            Some(url) => serializer.serialize_str(url),
            None => serializer.serialize_str(&self.file_name()),
        }
    }
}

fn has_extension(path: &Path, allowed: &[&str]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| allowed.iter().any(|a| ext.eq_ignore_ascii_case(a)))
        .unwrap_or(false)
}

fn file_type_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}

fn validate_pdf(doc: &DocumentRef) -> Result<(), ValidationError> {
    if doc.has_extension(&["pdf"]) {
        Ok(())
    } else {
        Err(file_type_error("pdf_only", "Only PDF documents are accepted"))
    }
}

fn validate_photo(doc: &DocumentRef) -> Result<(), ValidationError> {
    if doc.has_extension(&["jpg", "jpeg", "png"]) {
        Ok(())
    } else {
        Err(file_type_error("image_only", "Photos must be jpg or png"))
    }
}

fn validate_photos(docs: &Vec<DocumentRef>) -> Result<(), ValidationError> {
    docs.iter().try_for_each(validate_photo)
}

fn validate_videos(docs: &Vec<DocumentRef>) -> Result<(), ValidationError> {
    if docs.iter().all(|doc| doc.has_extension(&["mp4", "mov"])) {
        Ok(())
    } else {
        Err(file_type_error("video_only", "Videos must be mp4 or mov"))
    }
}

// ---------------------------------------------------------------------------
// Role details
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LandlordDetails {
    #[validate(
        required(message = "Ownership document is required"),
        custom = "validate_pdf"
    )]
    pub ownership_doc: Option<DocumentRef>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RealtorDetails {
    #[validate(length(min = 1, message = "Licence number is required"))]
    pub licence_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom = "validate_pdf")]
    pub additional_documents: Option<DocumentRef>,
    #[validate(
        required(message = "Agreement with landlord is required"),
        custom = "validate_pdf"
    )]
    pub agreement_with_landlord: Option<DocumentRef>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ManagementCompanyDetails {
    #[validate(length(min = 1, message = "Company name is required"))]
    pub company_name: String,
    #[validate(length(min = 1, message = "Company identifier is required"))]
    pub company_identifier: String,
    #[validate(length(min = 1, message = "Job title is required"))]
    pub job_title: String,
    #[validate(
        required(message = "Agreement with landlord/owner is required"),
        custom = "validate_pdf"
    )]
    pub agreement: Option<DocumentRef>,
    #[validate(length(min = 1, message = "Country is required"))]
    pub country: String,
    #[validate(length(min = 1, message = "Street address is required"))]
    pub street_address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apt_unit: Option<String>,
    #[validate(length(min = 1, message = "Phone number is required"))]
    pub phone_number: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "City is required"))]
    pub city: String,
    #[validate(length(min = 1, message = "State is required"))]
    pub state: String,
    #[validate(length(min = 1, message = "Zip code is required"))]
    pub zip_code: String,
}

/// Role-specific verification fields, discriminated by `Role`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RoleDetails {
    Landlord(LandlordDetails),
    Realtor(RealtorDetails),
    ManagementCompany(ManagementCompanyDetails),
}

impl RoleDetails {
    pub fn role(&self) -> Role {
        match self {
            Self::Landlord(_) => Role::Landlord,
            Self::Realtor(_) => Role::Realtor,
            Self::ManagementCompany(_) => Role::ManagementCompany,
        }
    }
}

// ---------------------------------------------------------------------------
// Condominium sub-records
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PropertyAddress {
    #[validate(length(min = 1, message = "Property name is required"))]
    pub property_name: String,
    #[validate(range(min = 1, message = "Total units must be at least 1"))]
    pub total_units: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(url(message = "Property website must be a valid URL"))]
    pub property_website: Option<String>,
    #[validate(length(min = 1, message = "Country is required"))]
    pub country: String,
    #[validate(length(min = 1, message = "Street address is required"))]
    pub street_address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apt_suite_unit: Option<String>,
    #[validate(length(min = 1, message = "City is required"))]
    pub city: String,
    #[validate(length(min = 1, message = "State is required"))]
    pub state: String,
    #[validate(length(min = 1, message = "Zip code is required"))]
    pub zip_code: String,
}

impl PropertyAddress {
    pub fn summary(&self) -> String {
        let mut street = self.street_address.clone();
        if let Some(unit) = &self.apt_suite_unit {
            street = format!("{street} {unit}");
        }
        format!(
            "Property name: {}, Total unit: {}\nStreet address: {}, City: {}, State: {}, Zip code: {}, Country: {}",
            self.property_name, self.total_units, street, self.city, self.state, self.zip_code, self.country
        )
    }
}

/// Leasing contact. The address block is only required when the leasing
/// office is not at the property itself; `schema` enforces that.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LeasingInfo {
    #[validate(length(min = 1, message = "Leasing manager is required"))]
    pub leasing_manager: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Phone number is required"))]
    pub phone_number: String,
    pub same_as_property: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apt_suite_unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<String>,
}

impl LeasingInfo {
    pub fn summary(&self) -> String {
        let address = if self.same_as_property {
            "Address(Same as property)".to_string()
        } else {
            let parts: Vec<&str> = [
                &self.street_address,
                &self.apt_suite_unit,
                &self.city,
                &self.state,
                &self.zip_code,
            ]
            .into_iter()
            .filter_map(|part| part.as_deref())
            .collect();
            format!("Address: {}", parts.join(" "))
        };
        format!(
            "Leasing manager: {}, {}, {}, {}",
            self.leasing_manager, self.email, self.phone_number, address
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Charges {
    #[validate(range(min = 1, message = "Application fee must be at least $1"))]
    pub application_fee: u32,
    pub admin_fee: u32,
}

impl Charges {
    pub fn summary(&self) -> String {
        format!(
            "Application fee: ${}, Admin fee: ${}",
            self.application_fee, self.admin_fee
        )
    }
}

/// How often rent is collected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum PaymentFrequency {
    #[default]
    Monthly,
    #[serde(rename = "Bi-Monthly")]
    BiMonthly,
    Weekly,
    Quarterly,
    Yearly,
}

impl PaymentFrequency {
    pub const ALL: [PaymentFrequency; 5] = [
        Self::Monthly,
        Self::BiMonthly,
        Self::Weekly,
        Self::Quarterly,
        Self::Yearly,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Monthly => "Monthly",
            Self::BiMonthly => "Bi-Monthly",
            Self::Weekly => "Weekly",
            Self::Quarterly => "Quarterly",
            Self::Yearly => "Yearly",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.label() == label)
    }
}

/// Rent schedule and payment reminder
#[derive(Debug, Clone, Default, PartialEq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RentFrequency {
    pub rent_frequency: PaymentFrequency,
    #[serde(serialize_with = "serialize_day_of_month")]
    #[validate(range(min = 1, max = 28, message = "Reminder date must be between the 1st and 28th"))]
    pub reminder_date: u8,
    #[serde(serialize_with = "serialize_day_of_month")]
    #[validate(range(min = 1, max = 28, message = "Due date must be between the 1st and 28th"))]
    pub due_date: u8,
}

impl RentFrequency {
    pub fn summary(&self) -> String {
        format!(
            "Rent frequency: {}, Reminder date: {}, Due date: {}",
            self.rent_frequency.label(),
            ordinal(self.reminder_date),
            ordinal(self.due_date)
        )
    }
}

/// English ordinal for a day of the month ("1st", "22nd", "13th")
pub fn ordinal(day: u8) -> String {
    let suffix = match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{day}{suffix}")
}

fn serialize_day_of_month<S: Serializer>(day: &u8, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&ordinal(*day))
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PetFee {
    #[validate(length(min = 1, message = "Pet type is required"))]
    pub pet_type: String,
    #[validate(range(min = 1, message = "Max weight must be at least 1lb"))]
    pub max_weight: u32,
    pub monthly_rent: u32,
    pub one_time_fee: u32,
    pub security_deposit: u32,
}

impl PetFee {
    pub fn summary(&self) -> String {
        format!(
            "Pet type: {}, Max weight: {}lb, Monthly per rent: ${}\nOne time pet fee: ${}, Pet security deposit: ${}",
            self.pet_type, self.max_weight, self.monthly_rent, self.one_time_fee, self.security_deposit
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationAgreement {
    #[validate(custom = "validate_pdf")]
    pub agreement: DocumentRef,
    pub accept_international_applicants: bool,
}

impl ApplicationAgreement {
    pub fn summary(&self) -> String {
        let international = if self.accept_international_applicants {
            "Accepting immigrant & international student applications"
        } else {
            "Not accepting international applications"
        };
        format!("Agreement: {}, {}", self.agreement.file_name(), international)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AboutProperty {
    #[validate(length(
        min = 1,
        max = 2000,
        message = "Description must be between 1 and 2000 characters"
    ))]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CommunityAmenities {
    #[validate(length(min = 1, message = "Add at least one amenity"))]
    pub amenities: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Parking {
    #[validate(length(min = 1, message = "Guest parking time is required"))]
    pub guest_parking_time: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub overview: String,
}

impl Parking {
    pub fn summary(&self) -> String {
        if self.overview.is_empty() {
            format!("Guest vehicle parking time: {}", self.guest_parking_time)
        } else {
            format!(
                "Guest vehicle parking time: {}, {}",
                self.guest_parking_time, self.overview
            )
        }
    }
}

/// A school, station or landmark near the property
#[derive(Debug, Clone, Default, PartialEq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NearbyPlace {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(range(min = 0.0, max = 500.0, message = "Distance must be between 0 and 500 miles"))]
    pub distance_miles: f64,
}

impl NearbyPlace {
    pub fn summary(&self) -> String {
        format!("{}, {} mile", self.name, self.distance_miles)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UtilityProvider {
    #[validate(length(min = 1, message = "Utility type is required"))]
    pub utility_type: String,
    #[validate(length(min = 1, message = "Provider company name is required"))]
    pub provider: String,
}

impl UtilityProvider {
    pub fn summary(&self) -> String {
        format!("{}: {}", self.utility_type, self.provider)
    }
}

/// Property photos and videos (not unit photos)
#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Gallery {
    #[validate(custom = "validate_photo")]
    pub cover_photo: DocumentRef,
    #[validate(
        length(max = 4, message = "Up to 4 featured photos besides the cover"),
        custom = "validate_photos"
    )]
    pub featured_photos: Vec<DocumentRef>,
    #[validate(
        length(max = 8, message = "Up to 8 additional photos"),
        custom = "validate_photos"
    )]
    pub more_photos: Vec<DocumentRef>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[validate(custom = "validate_videos")]
    pub videos: Vec<DocumentRef>,
}

impl Gallery {
    pub fn summary(&self) -> String {
        format!(
            "Cover: {}, {} featured photo(s), {} more photo(s), {} video(s)",
            self.cover_photo.file_name(),
            self.featured_photos.len(),
            self.more_photos.len(),
            self.videos.len()
        )
    }

    fn documents_mut(&mut self) -> impl Iterator<Item = &mut DocumentRef> {
        std::iter::once(&mut self.cover_photo)
            .chain(self.featured_photos.iter_mut())
            .chain(self.more_photos.iter_mut())
            .chain(self.videos.iter_mut())
    }
}

/// Optional-by-name bag of condominium sub-records
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CondominiumsInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_address: Option<PropertyAddress>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leasing_info: Option<LeasingInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub charges: Option<Charges>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rent_frequency: Option<RentFrequency>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_agreement: Option<ApplicationAgreement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub about_property: Option<AboutProperty>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub community_amenities: Option<CommunityAmenities>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pet_fees: Option<Vec<PetFee>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parking: Option<Parking>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub educational_institutions: Option<Vec<NearbyPlace>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stations: Option<Vec<NearbyPlace>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub landmarks: Option<Vec<NearbyPlace>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub utilities_providers: Option<Vec<UtilityProvider>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gallery: Option<Gallery>,
}

impl CondominiumsInfo {
    /// Attached files across all sub-records
    pub fn documents_mut(&mut self) -> Vec<&mut DocumentRef> {
        let mut docs: Vec<&mut DocumentRef> = Vec::new();
        if let Some(agreement) = self.application_agreement.as_mut() {
            docs.push(&mut agreement.agreement);
        }
        if let Some(gallery) = self.gallery.as_mut() {
            docs.extend(gallery.documents_mut());
        }
        docs
    }
}

/// The whole intake form as edited in memory
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingDraft {
    pub property_type: Option<PropertyType>,
    pub role: Option<Role>,
    pub terms_accepted: bool,
    pub landlord: LandlordDetails,
    pub realtor: RealtorDetails,
    pub management_company: ManagementCompanyDetails,
    pub condominiums_info: CondominiumsInfo,
}

impl ListingDraft {
    pub fn is_condominium(&self) -> bool {
        self.property_type == Some(PropertyType::Condominiums)
    }

    /// The branch of the role union selected by `role`
    pub fn role_details(&self) -> Option<RoleDetails> {
        self.role.map(|role| match role {
            Role::Landlord => RoleDetails::Landlord(self.landlord.clone()),
            Role::Realtor => RoleDetails::Realtor(self.realtor.clone()),
            Role::ManagementCompany => {
                RoleDetails::ManagementCompany(self.management_company.clone())
            }
        })
    }

    /// Attached files of the selected role branch, then of the condominium
    /// sections when the property is a condominium
    pub fn documents_mut(&mut self) -> Vec<&mut DocumentRef> {
        let mut docs: Vec<&mut DocumentRef> = match self.role {
            Some(Role::Landlord) => self.landlord.ownership_doc.iter_mut().collect(),
            Some(Role::Realtor) => self
                .realtor
                .additional_documents
                .iter_mut()
                .chain(self.realtor.agreement_with_landlord.iter_mut())
                .collect(),
            Some(Role::ManagementCompany) => {
                self.management_company.agreement.iter_mut().collect()
            }
            None => Vec::new(),
        };
        if self.property_type == Some(PropertyType::Condominiums) {
            docs.extend(self.condominiums_info.documents_mut());
        }
        docs
    }

    /// Store a role branch without touching the other branches
    pub fn set_role_details(&mut self, details: RoleDetails) {
        match details {
            RoleDetails::Landlord(d) => self.landlord = d,
            RoleDetails::Realtor(d) => self.realtor = d,
            RoleDetails::ManagementCompany(d) => self.management_company = d,
        }
    }
}
