//! Condominium information sections

use super::listing::{
    AboutProperty, ApplicationAgreement, Charges, CommunityAmenities, CondominiumsInfo, Gallery,
    LeasingInfo, NearbyPlace, Parking, PetFee, PropertyAddress, RentFrequency, UtilityProvider,
};
use super::schema::{validate_leasing_info, validate_record, FieldErrors};

/// How strongly a section is asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    Required,
    Optional,
    Recommended,
}

impl Requirement {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Required => "(Required)",
            Self::Optional => "(Optional)",
            Self::Recommended => "(Optional but recommended)",
        }
    }
}

/// One card on the condominium information step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    PropertyAddress,
    LeasingInfo,
    Charges,
    RentFrequency,
    ApplicationAgreement,
    AboutProperty,
    CommunityAmenities,
    PetFees,
    Parking,
    EducationalInstitutions,
    Stations,
    Landmarks,
    UtilitiesProviders,
    Gallery,
}

impl Section {
    /// Display order: left column then right column, gallery last
    pub const ALL: [Section; 14] = [
        Self::PropertyAddress,
        Self::LeasingInfo,
        Self::Charges,
        Self::RentFrequency,
        Self::ApplicationAgreement,
        Self::AboutProperty,
        Self::CommunityAmenities,
        Self::PetFees,
        Self::Parking,
        Self::EducationalInstitutions,
        Self::Stations,
        Self::Landmarks,
        Self::UtilitiesProviders,
        Self::Gallery,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Self::PropertyAddress => "Property address",
            Self::LeasingInfo => "Leasing info",
            Self::Charges => "Charges",
            Self::RentFrequency => "Rent frequency & payment reminder",
            Self::ApplicationAgreement => "Application agreement",
            Self::AboutProperty => "About the property",
            Self::CommunityAmenities => "Community's amenity/features",
            Self::PetFees => "Pet fees",
            Self::Parking => "Parking",
            Self::EducationalInstitutions => "Nearest educational institution",
            Self::Stations => "Nearest stations",
            Self::Landmarks => "Nearest landmark",
            Self::UtilitiesProviders => "Utilities provider",
            Self::Gallery => "Property gallery",
        }
    }

    pub fn requirement(&self) -> Requirement {
        match self {
            Self::PropertyAddress | Self::LeasingInfo | Self::Charges | Self::RentFrequency => {
                Requirement::Required
            }
            Self::ApplicationAgreement | Self::AboutProperty | Self::PetFees | Self::Parking => {
                Requirement::Optional
            }
            Self::CommunityAmenities
            | Self::EducationalInstitutions
            | Self::Stations
            | Self::Landmarks
            | Self::UtilitiesProviders
            | Self::Gallery => Requirement::Recommended,
        }
    }

    pub fn is_required(&self) -> bool {
        self.requirement() == Requirement::Required
    }

    /// Sections holding an ordered list of records instead of one record
    pub fn is_list(&self) -> bool {
        matches!(
            self,
            Self::PetFees
                | Self::EducationalInstitutions
                | Self::Stations
                | Self::Landmarks
                | Self::UtilitiesProviders
        )
    }

    /// Key of this section inside `condominiums_info`
    pub fn key(&self) -> &'static str {
        match self {
            Self::PropertyAddress => "property_address",
            Self::LeasingInfo => "leasing_info",
            Self::Charges => "charges",
            Self::RentFrequency => "rent_frequency",
            Self::ApplicationAgreement => "application_agreement",
            Self::AboutProperty => "about_property",
            Self::CommunityAmenities => "community_amenities",
            Self::PetFees => "pet_fees",
            Self::Parking => "parking",
            Self::EducationalInstitutions => "educational_institutions",
            Self::Stations => "stations",
            Self::Landmarks => "landmarks",
            Self::UtilitiesProviders => "utilities_providers",
            Self::Gallery => "gallery",
        }
    }

    /// Singular noun for one record, used in messages
    pub fn record_kind(&self) -> &'static str {
        match self {
            Self::PetFees => "pet fee",
            Self::EducationalInstitutions => "educational institution",
            Self::Stations => "station",
            Self::Landmarks => "landmark",
            Self::UtilitiesProviders => "utility provider",
            other => other.key(),
        }
    }

    /// Field path used for step-level errors about this section
    pub fn error_key(&self) -> String {
        format!("condominiums_info.{}", self.key())
    }

    /// Number of stored records (0 or 1 for single-record sections)
    pub fn record_count(&self, info: &CondominiumsInfo) -> usize {
        fn list_len<T>(list: &Option<Vec<T>>) -> usize {
            list.as_ref().map_or(0, Vec::len)
        }
        match self {
            Self::PropertyAddress => info.property_address.is_some() as usize,
            Self::LeasingInfo => info.leasing_info.is_some() as usize,
            Self::Charges => info.charges.is_some() as usize,
            Self::RentFrequency => info.rent_frequency.is_some() as usize,
            Self::ApplicationAgreement => info.application_agreement.is_some() as usize,
            Self::AboutProperty => info.about_property.is_some() as usize,
            Self::CommunityAmenities => info.community_amenities.is_some() as usize,
            Self::PetFees => list_len(&info.pet_fees),
            Self::Parking => info.parking.is_some() as usize,
            Self::EducationalInstitutions => list_len(&info.educational_institutions),
            Self::Stations => list_len(&info.stations),
            Self::Landmarks => list_len(&info.landmarks),
            Self::UtilitiesProviders => list_len(&info.utilities_providers),
            Self::Gallery => info.gallery.is_some() as usize,
        }
    }

    pub fn is_filled(&self, info: &CondominiumsInfo) -> bool {
        self.record_count(info) > 0
    }

    /// One summary line per stored record
    pub fn summaries(&self, info: &CondominiumsInfo) -> Vec<String> {
        fn each<T>(list: &Option<Vec<T>>, f: impl Fn(&T) -> String) -> Vec<String> {
            list.iter().flatten().map(f).collect()
        }
        match self {
            Self::PropertyAddress => info.property_address.iter().map(|r| r.summary()).collect(),
            Self::LeasingInfo => info.leasing_info.iter().map(|r| r.summary()).collect(),
            Self::Charges => info.charges.iter().map(|r| r.summary()).collect(),
            Self::RentFrequency => info.rent_frequency.iter().map(|r| r.summary()).collect(),
            Self::ApplicationAgreement => info
                .application_agreement
                .iter()
                .map(|r| r.summary())
                .collect(),
            Self::AboutProperty => info
                .about_property
                .iter()
                .map(|r| r.description.clone())
                .collect(),
            Self::CommunityAmenities => info
                .community_amenities
                .iter()
                .map(|r| r.amenities.join(", "))
                .collect(),
            Self::PetFees => each(&info.pet_fees, |r| r.summary()),
            Self::Parking => info.parking.iter().map(|r| r.summary()).collect(),
            Self::EducationalInstitutions => {
                each(&info.educational_institutions, |r| r.summary())
            }
            Self::Stations => each(&info.stations, |r| r.summary()),
            Self::Landmarks => each(&info.landmarks, |r| r.summary()),
            Self::UtilitiesProviders => each(&info.utilities_providers, |r| r.summary()),
            Self::Gallery => info.gallery.iter().map(|r| r.summary()).collect(),
        }
    }
}

/// A single record of any section, as produced by a section dialog
#[derive(Debug, Clone, PartialEq)]
pub enum SectionRecord {
    PropertyAddress(PropertyAddress),
    LeasingInfo(LeasingInfo),
    Charges(Charges),
    RentFrequency(RentFrequency),
    ApplicationAgreement(ApplicationAgreement),
    AboutProperty(AboutProperty),
    CommunityAmenities(CommunityAmenities),
    PetFee(PetFee),
    Parking(Parking),
    EducationalInstitution(NearbyPlace),
    Station(NearbyPlace),
    Landmark(NearbyPlace),
    UtilityProvider(UtilityProvider),
    Gallery(Gallery),
}

impl SectionRecord {
    pub fn section(&self) -> Section {
        match self {
            Self::PropertyAddress(_) => Section::PropertyAddress,
            Self::LeasingInfo(_) => Section::LeasingInfo,
            Self::Charges(_) => Section::Charges,
            Self::RentFrequency(_) => Section::RentFrequency,
            Self::ApplicationAgreement(_) => Section::ApplicationAgreement,
            Self::AboutProperty(_) => Section::AboutProperty,
            Self::CommunityAmenities(_) => Section::CommunityAmenities,
            Self::PetFee(_) => Section::PetFees,
            Self::Parking(_) => Section::Parking,
            Self::EducationalInstitution(_) => Section::EducationalInstitutions,
            Self::Station(_) => Section::Stations,
            Self::Landmark(_) => Section::Landmarks,
            Self::UtilityProvider(_) => Section::UtilitiesProviders,
            Self::Gallery(_) => Section::Gallery,
        }
    }

    /// Run the record's own rules
    pub fn validate(&self) -> Result<(), FieldErrors> {
        match self {
            Self::PropertyAddress(r) => validate_record(r),
            Self::LeasingInfo(r) => validate_leasing_info(r),
            Self::Charges(r) => validate_record(r),
            Self::RentFrequency(r) => validate_record(r),
            Self::ApplicationAgreement(r) => validate_record(r),
            Self::AboutProperty(r) => validate_record(r),
            Self::CommunityAmenities(r) => validate_record(r),
            Self::PetFee(r) => validate_record(r),
            Self::Parking(r) => validate_record(r),
            Self::EducationalInstitution(r) | Self::Station(r) | Self::Landmark(r) => {
                validate_record(r)
            }
            Self::UtilityProvider(r) => validate_record(r),
            Self::Gallery(r) => validate_record(r),
        }
    }

    /// Stored record of `section` (at `index` for list sections)
    pub fn load(info: &CondominiumsInfo, section: Section, index: Option<usize>) -> Option<Self> {
        use super::records::get;
        let at = index.unwrap_or(0);
        match section {
            Section::PropertyAddress => info.property_address.clone().map(Self::PropertyAddress),
            Section::LeasingInfo => info.leasing_info.clone().map(Self::LeasingInfo),
            Section::Charges => info.charges.clone().map(Self::Charges),
            Section::RentFrequency => info.rent_frequency.clone().map(Self::RentFrequency),
            Section::ApplicationAgreement => info
                .application_agreement
                .clone()
                .map(Self::ApplicationAgreement),
            Section::AboutProperty => info.about_property.clone().map(Self::AboutProperty),
            Section::CommunityAmenities => info
                .community_amenities
                .clone()
                .map(Self::CommunityAmenities),
            Section::PetFees => get(&info.pet_fees, at).cloned().map(Self::PetFee),
            Section::Parking => info.parking.clone().map(Self::Parking),
            Section::EducationalInstitutions => get(&info.educational_institutions, at)
                .cloned()
                .map(Self::EducationalInstitution),
            Section::Stations => get(&info.stations, at).cloned().map(Self::Station),
            Section::Landmarks => get(&info.landmarks, at).cloned().map(Self::Landmark),
            Section::UtilitiesProviders => get(&info.utilities_providers, at)
                .cloned()
                .map(Self::UtilityProvider),
            Section::Gallery => info.gallery.clone().map(Self::Gallery),
        }
    }
}
