//! Step controller for the intake wizard
//!
//! Owns the draft and decides which step is showing and which transitions
//! are legal. Validation errors are only surfaced after the user first tries
//! to advance; from then on every mutation re-validates the current step so
//! fixed fields clear immediately.

use super::error::IntakeError;
use super::listing::{ListingDraft, PropertyType, Role, RoleDetails};
use super::records;
use super::schema::{validate_condominiums_info, validate_role_selection, FieldErrors};
use super::section::{Section, SectionRecord};
use serde::Serialize;
use std::fmt;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    #[default]
    RoleSelection,
    CondominiumsInfo,
    Final,
}

impl Step {
    pub fn title(&self) -> &'static str {
        match self {
            Self::RoleSelection => "Property & role",
            Self::CondominiumsInfo => "Condominiums information",
            Self::Final => "Review & submit",
        }
    }

    /// Steps shown in the indicator for a given property type
    pub fn sequence(property_type: Option<PropertyType>) -> Vec<Step> {
        if property_type == Some(PropertyType::Condominiums) {
            vec![Self::RoleSelection, Self::CondominiumsInfo, Self::Final]
        } else {
            vec![Self::RoleSelection, Self::Final]
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::RoleSelection => "role selection",
            Self::CondominiumsInfo => "condominiums info",
            Self::Final => "final",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Default)]
pub struct IntakeWizard {
    step: Step,
    draft: ListingDraft,
    errors: FieldErrors,
    revalidate_on_change: bool,
}

impl IntakeWizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn draft(&self) -> &ListingDraft {
        &self.draft
    }

    /// Mutable draft for submission, which records uploaded document URLs
    pub fn draft_mut(&mut self) -> &mut ListingDraft {
        &mut self.draft
    }

    /// Errors currently shown for the step
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn error_for(&self, field: &str) -> Option<&str> {
        self.errors.get(field)
    }

    /// Move to the next step if the current one validates
    pub fn advance(&mut self) -> Result<Step, IntakeError> {
        let next = match self.step {
            Step::RoleSelection => {
                self.check_step()?;
                if self.draft.is_condominium() {
                    Step::CondominiumsInfo
                } else {
                    Step::Final
                }
            }
            Step::CondominiumsInfo => {
                self.check_step()?;
                Step::Final
            }
            Step::Final => {
                return Err(IntakeError::IllegalTransition {
                    step: self.step,
                    action: "advance",
                })
            }
        };
        info!(from = %self.step, to = %next, "Advancing intake step");
        self.enter(next);
        Ok(next)
    }

    /// Return to the previous step; values entered so far are kept
    pub fn back(&mut self) -> Result<Step, IntakeError> {
        let previous = match self.step {
            Step::RoleSelection => {
                return Err(IntakeError::IllegalTransition {
                    step: self.step,
                    action: "go back",
                })
            }
            Step::CondominiumsInfo => Step::RoleSelection,
            Step::Final if self.draft.is_condominium() => Step::CondominiumsInfo,
            Step::Final => Step::RoleSelection,
        };
        info!(from = %self.step, to = %previous, "Returning to previous intake step");
        self.enter(previous);
        Ok(previous)
    }

    pub fn set_property_type(&mut self, property_type: PropertyType) {
        self.draft.property_type = Some(property_type);
        self.on_change();
    }

    pub fn set_role(&mut self, role: Role) {
        self.draft.role = Some(role);
        self.on_change();
    }

    pub fn set_terms_accepted(&mut self, accepted: bool) {
        self.draft.terms_accepted = accepted;
        self.on_change();
    }

    /// Store the fields of one role branch
    pub fn update_role_details(&mut self, details: RoleDetails) {
        self.draft.set_role_details(details);
        self.on_change();
    }

    /// Validate and store a sub-record.
    ///
    /// For list sections `index == None` appends and `Some(i)` edits in place;
    /// single-record sections are replaced. Returns the stored position.
    pub fn save_section(
        &mut self,
        record: SectionRecord,
        index: Option<usize>,
    ) -> Result<usize, IntakeError> {
        self.require_step(Step::CondominiumsInfo, "edit condominium details")?;
        record.validate()?;

        let section = record.section();
        let kind = section.record_kind();
        let info = &mut self.draft.condominiums_info;
        let position = match record {
            SectionRecord::PropertyAddress(r) => replace(&mut info.property_address, r),
            SectionRecord::LeasingInfo(r) => replace(&mut info.leasing_info, r),
            SectionRecord::Charges(r) => replace(&mut info.charges, r),
            SectionRecord::RentFrequency(r) => replace(&mut info.rent_frequency, r),
            SectionRecord::ApplicationAgreement(r) => {
                replace(&mut info.application_agreement, r)
            }
            SectionRecord::AboutProperty(r) => replace(&mut info.about_property, r),
            SectionRecord::CommunityAmenities(r) => replace(&mut info.community_amenities, r),
            SectionRecord::Parking(r) => replace(&mut info.parking, r),
            SectionRecord::Gallery(r) => replace(&mut info.gallery, r),
            SectionRecord::PetFee(r) => records::save(&mut info.pet_fees, r, index, kind)?,
            SectionRecord::EducationalInstitution(r) => {
                records::save(&mut info.educational_institutions, r, index, kind)?
            }
            SectionRecord::Station(r) => records::save(&mut info.stations, r, index, kind)?,
            SectionRecord::Landmark(r) => records::save(&mut info.landmarks, r, index, kind)?,
            SectionRecord::UtilityProvider(r) => {
                records::save(&mut info.utilities_providers, r, index, kind)?
            }
        };
        debug!(section = section.key(), position, "Saved section record");
        self.on_change();
        Ok(position)
    }

    /// Remove a sub-record; list sections need the record's index
    pub fn delete_section(
        &mut self,
        section: Section,
        index: Option<usize>,
    ) -> Result<(), IntakeError> {
        self.require_step(Step::CondominiumsInfo, "edit condominium details")?;

        let kind = section.record_kind();
        let at = index.unwrap_or(0);
        let info = &mut self.draft.condominiums_info;
        let removed = match section {
            Section::PropertyAddress => info.property_address.take().is_some(),
            Section::LeasingInfo => info.leasing_info.take().is_some(),
            Section::Charges => info.charges.take().is_some(),
            Section::RentFrequency => info.rent_frequency.take().is_some(),
            Section::ApplicationAgreement => info.application_agreement.take().is_some(),
            Section::AboutProperty => info.about_property.take().is_some(),
            Section::CommunityAmenities => info.community_amenities.take().is_some(),
            Section::Parking => info.parking.take().is_some(),
            Section::Gallery => info.gallery.take().is_some(),
            Section::PetFees => records::delete(&mut info.pet_fees, at, kind).is_ok(),
            Section::EducationalInstitutions => {
                records::delete(&mut info.educational_institutions, at, kind).is_ok()
            }
            Section::Stations => records::delete(&mut info.stations, at, kind).is_ok(),
            Section::Landmarks => records::delete(&mut info.landmarks, at, kind).is_ok(),
            Section::UtilitiesProviders => {
                records::delete(&mut info.utilities_providers, at, kind).is_ok()
            }
        };
        if !removed {
            return Err(IntakeError::RecordIndex { kind, index: at });
        }
        debug!(section = section.key(), index = at, "Deleted section record");
        self.on_change();
        Ok(())
    }

    /// The stored record a dialog should start from, if any
    pub fn section_record(&self, section: Section, index: Option<usize>) -> Option<SectionRecord> {
        SectionRecord::load(&self.draft.condominiums_info, section, index)
    }

    /// Start over with an empty draft
    pub fn reset(&mut self) {
        info!("Resetting intake wizard");
        *self = Self::new();
    }

    fn enter(&mut self, step: Step) {
        self.step = step;
        self.errors = FieldErrors::new();
        self.revalidate_on_change = false;
    }

    fn require_step(&self, step: Step, action: &'static str) -> Result<(), IntakeError> {
        if self.step == step {
            Ok(())
        } else {
            Err(IntakeError::IllegalTransition {
                step: self.step,
                action,
            })
        }
    }

    fn validate_step(&self) -> Result<(), FieldErrors> {
        match self.step {
            Step::RoleSelection => validate_role_selection(&self.draft),
            Step::CondominiumsInfo => validate_condominiums_info(&self.draft),
            Step::Final => Ok(()),
        }
    }

    fn check_step(&mut self) -> Result<(), IntakeError> {
        self.revalidate_on_change = true;
        match self.validate_step() {
            Ok(()) => {
                self.errors = FieldErrors::new();
                Ok(())
            }
            Err(errors) => {
                info!(step = %self.step, count = errors.len(), "Step has validation errors");
                self.errors = errors.clone();
                Err(IntakeError::Validation(errors))
            }
        }
    }

    fn on_change(&mut self) {
        if self.revalidate_on_change {
            self.errors = self.validate_step().err().unwrap_or_default();
        }
    }
}

fn replace<T>(slot: &mut Option<T>, record: T) -> usize {
    *slot = Some(record);
    0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::listing::{
        Charges, DocumentRef, LandlordDetails, LeasingInfo, PaymentFrequency, PetFee,
        PropertyAddress, RealtorDetails, RentFrequency,
    };
    use pretty_assertions::assert_eq;

    fn fill_role_selection(wizard: &mut IntakeWizard, property_type: PropertyType) {
        wizard.set_property_type(property_type);
        wizard.set_role(Role::Landlord);
        wizard.update_role_details(RoleDetails::Landlord(LandlordDetails {
            ownership_doc: Some(DocumentRef::new("deed.pdf")),
        }));
        wizard.set_terms_accepted(true);
    }

    fn condo_wizard() -> IntakeWizard {
        let mut wizard = IntakeWizard::new();
        fill_role_selection(&mut wizard, PropertyType::Condominiums);
        wizard.advance().unwrap();
        wizard
    }

    fn property_address() -> PropertyAddress {
        PropertyAddress {
            property_name: "Dallas apartments complex".to_string(),
            total_units: 50,
            property_website: None,
            country: "US".to_string(),
            street_address: "2050 Bloomingdale Ave".to_string(),
            apt_suite_unit: None,
            city: "Dallas".to_string(),
            state: "TX".to_string(),
            zip_code: "75201".to_string(),
        }
    }

    fn pet_fee(pet_type: &str) -> PetFee {
        PetFee {
            pet_type: pet_type.to_string(),
            max_weight: 100,
            monthly_rent: 100,
            one_time_fee: 100,
            security_deposit: 100,
        }
    }

    fn save_required_sections(wizard: &mut IntakeWizard) {
        wizard
            .save_section(SectionRecord::PropertyAddress(property_address()), None)
            .unwrap();
        wizard
            .save_section(
                SectionRecord::LeasingInfo(LeasingInfo {
                    leasing_manager: "Alex Johan Rios".to_string(),
                    email: "leasing@rentyard.com".to_string(),
                    phone_number: "+18002277861".to_string(),
                    same_as_property: true,
                    ..Default::default()
                }),
                None,
            )
            .unwrap();
        wizard
            .save_section(
                SectionRecord::Charges(Charges {
                    application_fee: 100,
                    admin_fee: 15,
                }),
                None,
            )
            .unwrap();
        wizard
            .save_section(
                SectionRecord::RentFrequency(RentFrequency {
                    rent_frequency: PaymentFrequency::Monthly,
                    reminder_date: 25,
                    due_date: 5,
                }),
                None,
            )
            .unwrap();
    }

    #[test]
    fn test_new_wizard_starts_at_role_selection() {
        let wizard = IntakeWizard::new();
        assert_eq!(wizard.step(), Step::RoleSelection);
        assert!(wizard.errors().is_empty());
        assert_eq!(wizard.draft(), &ListingDraft::default());
    }

    #[test]
    fn test_advance_blocked_until_role_selection_valid() {
        let mut wizard = IntakeWizard::new();
        let err = wizard.advance().unwrap_err();
        assert!(err.field_errors().is_some());
        assert_eq!(wizard.step(), Step::RoleSelection);
        assert_eq!(
            wizard.error_for("property_type"),
            Some("Please select a property type")
        );
    }

    #[test]
    fn test_non_condominium_skips_to_final() {
        let mut wizard = IntakeWizard::new();
        fill_role_selection(&mut wizard, PropertyType::Apartments);
        assert_eq!(wizard.advance().unwrap(), Step::Final);
        assert_eq!(wizard.back().unwrap(), Step::RoleSelection);
    }

    #[test]
    fn test_condominium_goes_through_info_step() {
        let mut wizard = condo_wizard();
        assert_eq!(wizard.step(), Step::CondominiumsInfo);

        let err = wizard.advance().unwrap_err();
        assert_eq!(err.field_errors().map(FieldErrors::len), Some(4));

        save_required_sections(&mut wizard);
        assert_eq!(wizard.advance().unwrap(), Step::Final);
        assert_eq!(wizard.back().unwrap(), Step::CondominiumsInfo);
    }

    #[test]
    fn test_illegal_transitions() {
        let mut wizard = IntakeWizard::new();
        assert!(matches!(
            wizard.back(),
            Err(IntakeError::IllegalTransition {
                step: Step::RoleSelection,
                ..
            })
        ));

        fill_role_selection(&mut wizard, PropertyType::SingleHouse);
        wizard.advance().unwrap();
        let err = wizard.advance().unwrap_err();
        assert_eq!(err.to_string(), "cannot advance from the final step");
    }

    #[test]
    fn test_errors_revalidate_on_change_after_failed_advance() {
        let mut wizard = IntakeWizard::new();
        wizard.set_property_type(PropertyType::Apartments);
        assert!(wizard.errors().is_empty());

        wizard.advance().unwrap_err();
        assert!(wizard.error_for("role").is_some());
        assert!(wizard.error_for("property_type").is_none());

        wizard.set_role(Role::Landlord);
        assert!(wizard.error_for("role").is_none());
        assert_eq!(
            wizard.error_for("ownership_doc"),
            Some("Ownership document is required")
        );

        wizard.set_terms_accepted(true);
        assert!(wizard.error_for("terms_accepted").is_none());
    }

    #[test]
    fn test_switching_role_keeps_previous_branch_values() {
        let mut wizard = IntakeWizard::new();
        wizard.set_role(Role::Realtor);
        wizard.update_role_details(RoleDetails::Realtor(RealtorDetails {
            licence_number: "TX-55".to_string(),
            ..Default::default()
        }));
        wizard.set_role(Role::Landlord);
        wizard.set_role(Role::Realtor);
        assert_eq!(wizard.draft().realtor.licence_number, "TX-55");
    }

    #[test]
    fn test_section_edits_require_condominium_step() {
        let mut wizard = IntakeWizard::new();
        let err = wizard
            .save_section(SectionRecord::PetFee(pet_fee("Dog")), None)
            .unwrap_err();
        assert!(matches!(err, IntakeError::IllegalTransition { .. }));
    }

    #[test]
    fn test_invalid_record_is_not_saved() {
        let mut wizard = condo_wizard();
        let err = wizard
            .save_section(SectionRecord::PetFee(PetFee::default()), None)
            .unwrap_err();
        let errors = err.field_errors().unwrap();
        assert_eq!(errors.get("pet_type"), Some("Pet type is required"));
        assert!(wizard.draft().condominiums_info.pet_fees.is_none());
    }

    #[test]
    fn test_pet_fee_add_edit_delete_lifecycle() {
        let mut wizard = condo_wizard();
        assert_eq!(
            wizard
                .save_section(SectionRecord::PetFee(pet_fee("Dog")), None)
                .unwrap(),
            0
        );
        assert_eq!(
            wizard
                .save_section(SectionRecord::PetFee(pet_fee("Cat")), None)
                .unwrap(),
            1
        );
        wizard
            .save_section(SectionRecord::PetFee(pet_fee("Bird")), Some(0))
            .unwrap();

        let fees = wizard.draft().condominiums_info.pet_fees.clone().unwrap();
        let kinds: Vec<&str> = fees.iter().map(|f| f.pet_type.as_str()).collect();
        assert_eq!(kinds, vec!["Bird", "Cat"]);

        match wizard.section_record(Section::PetFees, Some(1)) {
            Some(SectionRecord::PetFee(fee)) => assert_eq!(fee.pet_type, "Cat"),
            other => panic!("unexpected record: {other:?}"),
        }

        wizard.delete_section(Section::PetFees, Some(0)).unwrap();
        wizard.delete_section(Section::PetFees, Some(0)).unwrap();
        assert!(wizard.draft().condominiums_info.pet_fees.is_none());
        assert!(matches!(
            wizard.delete_section(Section::PetFees, Some(0)),
            Err(IntakeError::RecordIndex { kind: "pet fee", index: 0 })
        ));
    }

    #[test]
    fn test_delete_single_record_section() {
        let mut wizard = condo_wizard();
        wizard
            .save_section(SectionRecord::PropertyAddress(property_address()), None)
            .unwrap();
        wizard.delete_section(Section::PropertyAddress, None).unwrap();
        assert!(wizard.section_record(Section::PropertyAddress, None).is_none());
        assert!(wizard.delete_section(Section::PropertyAddress, None).is_err());
    }

    #[test]
    fn test_saving_required_section_clears_its_error() {
        let mut wizard = condo_wizard();
        wizard.advance().unwrap_err();
        assert!(wizard.error_for("condominiums_info.property_address").is_some());
        wizard
            .save_section(SectionRecord::PropertyAddress(property_address()), None)
            .unwrap();
        assert!(wizard.error_for("condominiums_info.property_address").is_none());
        assert_eq!(wizard.errors().len(), 3);
    }

    #[test]
    fn test_reset_discards_draft() {
        let mut wizard = condo_wizard();
        save_required_sections(&mut wizard);
        wizard.advance().unwrap();
        wizard.reset();
        assert_eq!(wizard.step(), Step::RoleSelection);
        assert_eq!(wizard.draft(), &ListingDraft::default());
    }

    #[test]
    fn test_step_sequence_depends_on_property_type() {
        assert_eq!(
            Step::sequence(Some(PropertyType::Condominiums)),
            vec![Step::RoleSelection, Step::CondominiumsInfo, Step::Final]
        );
        assert_eq!(
            Step::sequence(None),
            vec![Step::RoleSelection, Step::Final]
        );
    }
}
