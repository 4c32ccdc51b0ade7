//! Field layouts for the condominium section dialogs
//!
//! `open` builds a dialog pre-filled from a stored record (or blank), and
//! `parse` turns the dialog back into a typed record, reporting input that
//! cannot be read alongside the record's own validation messages.

use super::field::FormField;
use super::form_state::{FieldSet, SectionForm};
use crate::state::listing::{
    ordinal, AboutProperty, ApplicationAgreement, Charges, CommunityAmenities, DocumentRef,
    Gallery, LeasingInfo, NearbyPlace, Parking, PaymentFrequency, PetFee, PropertyAddress,
    RentFrequency, UtilityProvider, COUNTRIES, STATES,
};
use crate::state::schema::FieldErrors;
use crate::state::section::{Section, SectionRecord};
use std::str::FromStr;

/// Build the dialog for `section`, starting from `record` when editing
pub fn open(section: Section, index: Option<usize>, record: Option<&SectionRecord>) -> SectionForm {
    SectionForm::new(section, index, FieldSet::new(fields_for(section, record)))
}

/// Read the dialog back into a validated record
pub fn parse(form: &SectionForm) -> Result<SectionRecord, FieldErrors> {
    let mut r = Reader::new(&form.fields);
    let record = match form.section {
        Section::PropertyAddress => SectionRecord::PropertyAddress(PropertyAddress {
            property_name: r.text("property_name"),
            total_units: r.number("total_units", "Total units"),
            property_website: r.optional("property_website"),
            country: r.text("country"),
            street_address: r.text("street_address"),
            apt_suite_unit: r.optional("apt_suite_unit"),
            city: r.text("city"),
            state: r.text("state"),
            zip_code: r.text("zip_code"),
        }),
        Section::LeasingInfo => SectionRecord::LeasingInfo(LeasingInfo {
            leasing_manager: r.text("leasing_manager"),
            email: r.text("email"),
            phone_number: r.text("phone_number"),
            same_as_property: r.toggle("same_as_property"),
            street_address: r.optional("street_address"),
            apt_suite_unit: r.optional("apt_suite_unit"),
            city: r.optional("city"),
            state: r.optional("state"),
            zip_code: r.optional("zip_code"),
        }),
        Section::Charges => SectionRecord::Charges(Charges {
            application_fee: r.amount("application_fee", "Application fee"),
            admin_fee: r.amount("admin_fee", "Admin fee"),
        }),
        Section::RentFrequency => SectionRecord::RentFrequency(RentFrequency {
            rent_frequency: r.frequency("rent_frequency"),
            reminder_date: r.number("reminder_date", "Reminder date"),
            due_date: r.number("due_date", "Due date"),
        }),
        Section::ApplicationAgreement => SectionRecord::ApplicationAgreement(ApplicationAgreement {
            agreement: r.document("agreement", "Agreement document"),
            accept_international_applicants: r.toggle("accept_international_applicants"),
        }),
        Section::AboutProperty => SectionRecord::AboutProperty(AboutProperty {
            description: r.text("description"),
        }),
        Section::CommunityAmenities => SectionRecord::CommunityAmenities(CommunityAmenities {
            amenities: r.list("amenities"),
        }),
        Section::PetFees => SectionRecord::PetFee(PetFee {
            pet_type: r.text("pet_type"),
            max_weight: r.number("max_weight", "Max weight"),
            monthly_rent: r.amount("monthly_rent", "Monthly per rent"),
            one_time_fee: r.amount("one_time_fee", "One time pet fee"),
            security_deposit: r.amount("security_deposit", "Pet security deposit"),
        }),
        Section::Parking => SectionRecord::Parking(Parking {
            guest_parking_time: r.text("guest_parking_time"),
            overview: r.text("overview"),
        }),
        Section::EducationalInstitutions => {
            SectionRecord::EducationalInstitution(r.nearby_place())
        }
        Section::Stations => SectionRecord::Station(r.nearby_place()),
        Section::Landmarks => SectionRecord::Landmark(r.nearby_place()),
        Section::UtilitiesProviders => SectionRecord::UtilityProvider(UtilityProvider {
            utility_type: r.text("utility_type"),
            provider: r.text("provider"),
        }),
        Section::Gallery => SectionRecord::Gallery(Gallery {
            cover_photo: r.document("cover_photo", "Cover photo"),
            featured_photos: r.documents("featured_photos"),
            more_photos: r.documents("more_photos"),
            videos: r.documents("videos"),
        }),
    };
    r.finish(record)
}

fn fields_for(section: Section, record: Option<&SectionRecord>) -> Vec<FormField> {
    match (section, record) {
        (Section::PropertyAddress, record) => {
            let d = match record {
                Some(SectionRecord::PropertyAddress(d)) => d.clone(),
                _ => PropertyAddress::default(),
            };
            vec![
                text("property_name", "Property name as identifier*", d.property_name),
                text("total_units", "Total apartment unit*", number_text(d.total_units)),
                text(
                    "property_website",
                    "Property website (optional)",
                    d.property_website.unwrap_or_default(),
                ),
                FormField::choice("country", "Country/Region*", COUNTRIES, Some(d.country.as_str())),
                text("street_address", "Street address*", d.street_address),
                text(
                    "apt_suite_unit",
                    "Apt, suite, unit (if applicable)",
                    d.apt_suite_unit.unwrap_or_default(),
                ),
                text("city", "City/Town*", d.city),
                FormField::choice("state", "State/Territory*", STATES, Some(d.state.as_str())),
                text("zip_code", "Zip code*", d.zip_code),
            ]
        }
        (Section::LeasingInfo, record) => {
            let d = match record {
                Some(SectionRecord::LeasingInfo(d)) => d.clone(),
                _ => LeasingInfo::default(),
            };
            vec![
                text("leasing_manager", "Leasing manager name*", d.leasing_manager),
                text("phone_number", "Leasing manager phone number*", d.phone_number),
                text("email", "Leasing manager email*", d.email),
                FormField::toggle(
                    "same_as_property",
                    "Address (same as property)",
                    d.same_as_property,
                ),
                text("street_address", "Street address", d.street_address.unwrap_or_default()),
                text(
                    "apt_suite_unit",
                    "Apt, suite, unit (if applicable)",
                    d.apt_suite_unit.unwrap_or_default(),
                ),
                text("city", "City/Town", d.city.unwrap_or_default()),
                FormField::choice("state", "State/Territory", STATES, d.state.as_deref()),
                text("zip_code", "Zip code", d.zip_code.unwrap_or_default()),
            ]
        }
        (Section::Charges, record) => {
            let d = match record {
                Some(SectionRecord::Charges(d)) => d.clone(),
                _ => Charges::default(),
            };
            vec![
                text(
                    "application_fee",
                    "Application fee (one-time)*",
                    number_text(d.application_fee),
                ),
                text("admin_fee", "Admin fee (one-time)*", number_text(d.admin_fee)),
            ]
        }
        (Section::RentFrequency, record) => {
            let d = match record {
                Some(SectionRecord::RentFrequency(d)) => Some(d.clone()),
                _ => None,
            };
            let frequencies: Vec<(&str, &str)> = PaymentFrequency::ALL
                .iter()
                .map(|f| (f.label(), f.label()))
                .collect();
            let days: Vec<(String, String)> = (1..=28u8)
                .map(|day| (day.to_string(), format!("{} every month", ordinal(day))))
                .collect();
            let reminder = d.as_ref().map(|d| d.reminder_date.to_string());
            let due = d.as_ref().map(|d| d.due_date.to_string());
            vec![
                FormField::choice(
                    "rent_frequency",
                    "Rent payment frequency*",
                    &frequencies,
                    d.as_ref().map(|d| d.rent_frequency.label()),
                ),
                FormField::choice(
                    "reminder_date",
                    "Rent reminder/statement date*",
                    &days,
                    reminder.as_deref(),
                ),
                FormField::choice("due_date", "Rent due date*", &days, due.as_deref()),
            ]
        }
        (Section::ApplicationAgreement, record) => {
            let (path, international) = match record {
                Some(SectionRecord::ApplicationAgreement(d)) => (
                    d.agreement.path.display().to_string(),
                    d.accept_international_applicants,
                ),
                _ => (String::new(), false),
            };
            vec![
                text("agreement", "Upload agreement (PDF path)*", path),
                FormField::toggle(
                    "accept_international_applicants",
                    "Accept immigrant & international student application",
                    international,
                ),
            ]
        }
        (Section::AboutProperty, record) => {
            let description = match record {
                Some(SectionRecord::AboutProperty(d)) => d.description.clone(),
                _ => String::new(),
            };
            vec![FormField::text_with_value(
                "description",
                "About the property*",
                description,
                true,
            )]
        }
        (Section::CommunityAmenities, record) => {
            let amenities = match record {
                Some(SectionRecord::CommunityAmenities(d)) => d.amenities.join(", "),
                _ => String::new(),
            };
            vec![text("amenities", "Amenities (comma separated)*", amenities)]
        }
        (Section::PetFees, record) => {
            let d = match record {
                Some(SectionRecord::PetFee(d)) => d.clone(),
                _ => PetFee::default(),
            };
            vec![
                text("pet_type", "Pet type*", d.pet_type),
                text("max_weight", "Max weight (lb)*", number_text(d.max_weight)),
                text("monthly_rent", "Monthly per rent*", number_text(d.monthly_rent)),
                text("one_time_fee", "One time pet fee*", number_text(d.one_time_fee)),
                text(
                    "security_deposit",
                    "Pet security deposit*",
                    number_text(d.security_deposit),
                ),
            ]
        }
        (Section::Parking, record) => {
            let d = match record {
                Some(SectionRecord::Parking(d)) => d.clone(),
                _ => Parking::default(),
            };
            vec![
                text("guest_parking_time", "Guest vehicle parking time*", d.guest_parking_time),
                FormField::text_with_value("overview", "Parking overview", d.overview, true),
            ]
        }
        (Section::EducationalInstitutions | Section::Stations | Section::Landmarks, record) => {
            let d = match record {
                Some(
                    SectionRecord::EducationalInstitution(d)
                    | SectionRecord::Station(d)
                    | SectionRecord::Landmark(d),
                ) => d.clone(),
                _ => NearbyPlace::default(),
            };
            let distance = if record.is_some() {
                d.distance_miles.to_string()
            } else {
                String::new()
            };
            vec![
                text("name", "Name*", d.name),
                text("distance_miles", "Distance from property (mile)*", distance),
            ]
        }
        (Section::UtilitiesProviders, record) => {
            let d = match record {
                Some(SectionRecord::UtilityProvider(d)) => d.clone(),
                _ => UtilityProvider::default(),
            };
            vec![
                text("utility_type", "Utility type*", d.utility_type),
                text("provider", "Provider company name*", d.provider),
            ]
        }
        (Section::Gallery, record) => {
            let (cover, featured, more, videos) = match record {
                Some(SectionRecord::Gallery(d)) => (
                    d.cover_photo.path.display().to_string(),
                    join_paths(&d.featured_photos),
                    join_paths(&d.more_photos),
                    join_paths(&d.videos),
                ),
                _ => Default::default(),
            };
            vec![
                text("cover_photo", "Cover photo (jpg/png path)*", cover),
                text("featured_photos", "Featured photos (up to 4, comma separated)", featured),
                text("more_photos", "More photos (up to 8, comma separated)", more),
                text("videos", "Videos (mp4/mov, comma separated)", videos),
            ]
        }
    }
}

fn text(name: &str, label: &str, value: String) -> FormField {
    FormField::text_with_value(name, label, value, false)
}

/// Numbers start blank rather than "0" in a fresh dialog
fn number_text(value: u32) -> String {
    if value == 0 {
        String::new()
    } else {
        value.to_string()
    }
}

fn join_paths(docs: &[DocumentRef]) -> String {
    docs.iter()
        .map(|d| d.path.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Reads typed values out of a field set, collecting conversion errors
struct Reader<'a> {
    fields: &'a FieldSet,
    errors: FieldErrors,
}

impl<'a> Reader<'a> {
    fn new(fields: &'a FieldSet) -> Self {
        Self {
            fields,
            errors: FieldErrors::new(),
        }
    }

    fn text(&self, name: &str) -> String {
        self.fields.text(name).to_string()
    }

    fn optional(&self, name: &str) -> Option<String> {
        self.fields.optional_text(name)
    }

    fn toggle(&self, name: &str) -> bool {
        self.fields.toggle(name)
    }

    fn number<T: FromStr + Default>(&mut self, name: &str, label: &str) -> T {
        self.parse_with(name, label, self.fields.text(name).to_string())
    }

    /// Whole-dollar amount; accepts "$1,200"
    fn amount(&mut self, name: &str, label: &str) -> u32 {
        let cleaned: String = self
            .fields
            .text(name)
            .chars()
            .filter(|c| !matches!(c, '$' | ',' | ' '))
            .collect();
        self.parse_with(name, label, cleaned)
    }

    fn parse_with<T: FromStr + Default>(&mut self, name: &str, label: &str, raw: String) -> T {
        if raw.is_empty() {
            self.errors.insert(name, format!("{label} is required"));
            return T::default();
        }
        match raw.parse() {
            Ok(value) => value,
            Err(_) => {
                self.errors
                    .insert(name, format!("{label} must be a whole number"));
                T::default()
            }
        }
    }

    fn frequency(&mut self, name: &str) -> PaymentFrequency {
        match PaymentFrequency::from_label(self.fields.text(name)) {
            Some(frequency) => frequency,
            None => {
                self.errors
                    .insert(name, "Rent payment frequency is required");
                PaymentFrequency::default()
            }
        }
    }

    /// Missing documents come back as a blank placeholder
    fn document(&mut self, name: &str, label: &str) -> DocumentRef {
        DocumentRef::from_input(self.fields.text(name)).unwrap_or_else(|| {
            self.errors.insert(name, format!("{label} is required"));
            DocumentRef::new("")
        })
    }

    fn documents(&self, name: &str) -> Vec<DocumentRef> {
        self.fields
            .text(name)
            .split(',')
            .filter_map(DocumentRef::from_input)
            .collect()
    }

    fn list(&self, name: &str) -> Vec<String> {
        self.fields
            .text(name)
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }

    fn nearby_place(&mut self) -> NearbyPlace {
        let raw = self.fields.text("distance_miles").to_string();
        let distance_miles = if raw.is_empty() {
            self.errors
                .insert("distance_miles", "Distance is required");
            0.0
        } else {
            raw.parse::<f64>()
                .ok()
                .filter(|d: &f64| d.is_finite())
                .unwrap_or_else(|| {
                    self.errors
                        .insert("distance_miles", "Distance must be a number");
                    0.0
                })
        };
        NearbyPlace {
            name: self.text("name"),
            distance_miles,
        }
    }

    /// Conversion errors win over rule messages for the same field
    fn finish(self, record: SectionRecord) -> Result<SectionRecord, FieldErrors> {
        let mut errors = self.errors;
        if let Err(rule_errors) = record.validate() {
            errors.merge(rule_errors);
        }
        errors.into_result().map(|()| record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::forms::Form;
    use pretty_assertions::assert_eq;

    fn set(form: &mut SectionForm, name: &str, value: &str) {
        if let Some(field) = form.fields.get_mut(name) {
            field.set_text(value.to_string());
        }
    }

    fn select(form: &mut SectionForm, name: &str, times: usize) {
        if let Some(field) = form.fields.get_mut(name) {
            for _ in 0..times {
                field.next_option();
            }
        }
    }

    #[test]
    fn test_every_section_opens_with_fields() {
        for section in Section::ALL {
            let form = open(section, None, None);
            assert!(form.fields.field_count() > 0, "{section:?} has no fields");
            assert_eq!(form.section, section);
        }
    }

    #[test]
    fn test_blank_dialog_reports_required_fields() {
        let form = open(Section::PetFees, None, None);
        let errors = parse(&form).unwrap_err();
        assert_eq!(errors.get("pet_type"), Some("Pet type is required"));
        assert_eq!(errors.get("max_weight"), Some("Max weight is required"));
        assert_eq!(
            errors.get("security_deposit"),
            Some("Pet security deposit is required")
        );
    }

    #[test]
    fn test_pet_fee_parses_amounts() {
        let mut form = open(Section::PetFees, None, None);
        set(&mut form, "pet_type", "Dog");
        set(&mut form, "max_weight", "100");
        set(&mut form, "monthly_rent", "$100");
        set(&mut form, "one_time_fee", "1,200");
        set(&mut form, "security_deposit", "100");
        let record = parse(&form).unwrap();
        assert_eq!(
            record,
            SectionRecord::PetFee(PetFee {
                pet_type: "Dog".to_string(),
                max_weight: 100,
                monthly_rent: 100,
                one_time_fee: 1200,
                security_deposit: 100,
            })
        );
    }

    #[test]
    fn test_non_numeric_amount_is_reported() {
        let mut form = open(Section::Charges, None, None);
        set(&mut form, "application_fee", "ten");
        set(&mut form, "admin_fee", "15");
        let errors = parse(&form).unwrap_err();
        assert_eq!(
            errors.get("application_fee"),
            Some("Application fee must be a whole number")
        );
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_rule_errors_follow_conversion() {
        let mut form = open(Section::Charges, None, None);
        set(&mut form, "application_fee", "0");
        set(&mut form, "admin_fee", "15");
        let errors = parse(&form).unwrap_err();
        assert_eq!(
            errors.get("application_fee"),
            Some("Application fee must be at least $1")
        );
    }

    #[test]
    fn test_rent_frequency_from_choices() {
        let mut form = open(Section::RentFrequency, None, None);
        select(&mut form, "rent_frequency", 2);
        select(&mut form, "reminder_date", 25);
        select(&mut form, "due_date", 5);
        let record = parse(&form).unwrap();
        assert_eq!(
            record,
            SectionRecord::RentFrequency(RentFrequency {
                rent_frequency: PaymentFrequency::BiMonthly,
                reminder_date: 25,
                due_date: 5,
            })
        );
    }

    #[test]
    fn test_edit_prefills_existing_record() {
        let stored = SectionRecord::RentFrequency(RentFrequency {
            rent_frequency: PaymentFrequency::Weekly,
            reminder_date: 3,
            due_date: 21,
        });
        let form = open(Section::RentFrequency, None, Some(&stored));
        assert_eq!(form.fields.text("rent_frequency"), "Weekly");
        assert_eq!(form.fields.text("reminder_date"), "3");
        assert_eq!(
            form.fields.get("due_date").map(FormField::display_value),
            Some("◂ 21st every month ▸".to_string())
        );
        assert_eq!(parse(&form).unwrap(), stored);
    }

    #[test]
    fn test_leasing_address_needed_when_not_same_as_property() {
        let mut form = open(Section::LeasingInfo, None, None);
        set(&mut form, "leasing_manager", "Alex Johan Rios");
        set(&mut form, "phone_number", "+18002277861");
        set(&mut form, "email", "leasing@rentyard.com");
        let errors = parse(&form).unwrap_err();
        assert!(errors.contains("street_address"));

        if let Some(field) = form.fields.get_mut("same_as_property") {
            field.push_char(' ');
        }
        assert!(parse(&form).is_ok());
    }

    #[test]
    fn test_gallery_splits_paths() {
        let mut form = open(Section::Gallery, None, None);
        set(&mut form, "cover_photo", "/photos/cover.jpg");
        set(&mut form, "featured_photos", "/photos/a.png, /photos/b.png,");
        match parse(&form).unwrap() {
            SectionRecord::Gallery(gallery) => {
                assert_eq!(gallery.featured_photos.len(), 2);
                assert!(gallery.more_photos.is_empty());
            }
            other => panic!("unexpected record: {other:?}"),
        }
    }

    #[test]
    fn test_missing_cover_photo() {
        let form = open(Section::Gallery, None, None);
        let errors = parse(&form).unwrap_err();
        assert_eq!(errors.get("cover_photo"), Some("Cover photo is required"));
    }

    #[test]
    fn test_gallery_reports_every_problem_at_once() {
        let mut form = open(Section::Gallery, None, None);
        set(
            &mut form,
            "featured_photos",
            "/p/1.jpg, /p/2.jpg, /p/3.jpg, /p/4.jpg, /p/5.jpg",
        );
        let errors = parse(&form).unwrap_err();
        assert_eq!(errors.get("cover_photo"), Some("Cover photo is required"));
        assert_eq!(
            errors.get("featured_photos"),
            Some("Up to 4 featured photos besides the cover")
        );
    }

    #[test]
    fn test_missing_agreement_keeps_required_message() {
        let form = open(Section::ApplicationAgreement, None, None);
        let errors = parse(&form).unwrap_err();
        assert_eq!(
            errors.get("agreement"),
            Some("Agreement document is required")
        );
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_amenities_split_on_commas() {
        let mut form = open(Section::CommunityAmenities, None, None);
        set(&mut form, "amenities", "Gym, Pool , ,Rooftop");
        assert_eq!(
            parse(&form).unwrap(),
            SectionRecord::CommunityAmenities(CommunityAmenities {
                amenities: vec!["Gym".to_string(), "Pool".to_string(), "Rooftop".to_string()],
            })
        );
    }

    #[test]
    fn test_nearby_place_kind_follows_section() {
        let mut form = open(Section::Stations, Some(0), None);
        set(&mut form, "name", "Union Station");
        set(&mut form, "distance_miles", "1.5");
        assert_eq!(
            parse(&form).unwrap(),
            SectionRecord::Station(NearbyPlace {
                name: "Union Station".to_string(),
                distance_miles: 1.5,
            })
        );
    }

    #[test]
    fn test_non_finite_distance_is_rejected() {
        for raw in ["NaN", "inf", "-infinity"] {
            let mut form = open(Section::Landmarks, Some(0), None);
            set(&mut form, "name", "Museum");
            set(&mut form, "distance_miles", raw);
            let errors = parse(&form).unwrap_err();
            assert_eq!(
                errors.get("distance_miles"),
                Some("Distance must be a number"),
                "{raw} was accepted"
            );
        }
    }
}
