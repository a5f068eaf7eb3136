//! Required-field validation for both forms.
//!
//! Error maps are keyed by per-form field enums rather than strings, so the
//! set of addressable fields is fixed at compile time. Absence of a key
//! means the field is currently valid; a record is submittable iff its map
//! comes back empty.

use std::collections::BTreeMap;

use crate::models::{InternshipApplication, OfferLetter};

/// Every input on the internship application form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AppField {
    FirstName,
    LastName,
    Email,
    Phone,
    DateOfBirth,
    Address,
    University,
    Degree,
    Major,
    GraduationDate,
    Gpa,
    Position,
    Department,
    StartDate,
    Duration,
    WorkMode,
    CoverLetter,
    Skills,
    PreviousExperience,
}

impl AppField {
    pub fn label(self) -> &'static str {
        match self {
            AppField::FirstName => "First name",
            AppField::LastName => "Last name",
            AppField::Email => "Email",
            AppField::Phone => "Phone",
            AppField::DateOfBirth => "Date of birth",
            AppField::Address => "Address",
            AppField::University => "University",
            AppField::Degree => "Degree",
            AppField::Major => "Major",
            AppField::GraduationDate => "Graduation date",
            AppField::Gpa => "GPA",
            AppField::Position => "Position",
            AppField::Department => "Department",
            AppField::StartDate => "Start date",
            AppField::Duration => "Duration",
            AppField::WorkMode => "Work mode",
            AppField::CoverLetter => "Cover letter",
            AppField::Skills => "Skills",
            AppField::PreviousExperience => "Previous experience",
        }
    }
}

/// Every input on the offer-letter form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OfferField {
    CandidateName,
    CandidateEmail,
    CandidateAddress,
    Title,
    Department,
    StartDate,
    Duration,
    Stipend,
    WorkMode,
    CompanyName,
    CompanyAddress,
    ContactPerson,
    ContactEmail,
    AdditionalTerms,
}

impl OfferField {
    pub fn label(self) -> &'static str {
        match self {
            OfferField::CandidateName => "Candidate name",
            OfferField::CandidateEmail => "Candidate email",
            OfferField::CandidateAddress => "Candidate address",
            OfferField::Title => "Position title",
            OfferField::Department => "Department",
            OfferField::StartDate => "Start date",
            OfferField::Duration => "Duration",
            OfferField::Stipend => "Stipend",
            OfferField::WorkMode => "Work mode",
            OfferField::CompanyName => "Company name",
            OfferField::CompanyAddress => "Company address",
            OfferField::ContactPerson => "Contact person",
            OfferField::ContactEmail => "Contact email",
            OfferField::AdditionalTerms => "Additional terms",
        }
    }
}

fn missing(value: &str) -> bool {
    value.trim().is_empty()
}

type AppAccessor = fn(&InternshipApplication) -> &str;

// GPA, work mode, skills, and previous experience are deliberately absent:
// the selects always carry a value and the rest are optional.
const APP_REQUIRED: &[(AppField, AppAccessor)] = &[
    (AppField::FirstName, |a| &a.personal.first_name),
    (AppField::LastName, |a| &a.personal.last_name),
    (AppField::Email, |a| &a.personal.email),
    (AppField::Phone, |a| &a.personal.phone),
    (AppField::DateOfBirth, |a| &a.personal.date_of_birth),
    (AppField::Address, |a| &a.personal.address),
    (AppField::University, |a| &a.academic.university),
    (AppField::Degree, |a| &a.academic.degree),
    (AppField::Major, |a| &a.academic.major),
    (AppField::GraduationDate, |a| &a.academic.graduation_date),
    (AppField::Position, |a| &a.internship.position),
    (AppField::Department, |a| &a.internship.department),
    (AppField::StartDate, |a| &a.internship.start_date),
    (AppField::Duration, |a| &a.internship.duration),
    (AppField::CoverLetter, |a| &a.extra.cover_letter),
];

type OfferAccessor = fn(&OfferLetter) -> &str;

const OFFER_REQUIRED: &[(OfferField, OfferAccessor)] = &[
    (OfferField::CandidateName, |o| &o.candidate.name),
    (OfferField::CandidateEmail, |o| &o.candidate.email),
    (OfferField::CandidateAddress, |o| &o.candidate.address),
    (OfferField::Title, |o| &o.position.title),
    (OfferField::Department, |o| &o.position.department),
    (OfferField::StartDate, |o| &o.position.start_date),
    (OfferField::Duration, |o| &o.position.duration),
    (OfferField::Stipend, |o| &o.position.stipend),
    (OfferField::CompanyName, |o| &o.company.name),
    (OfferField::CompanyAddress, |o| &o.company.address),
    (OfferField::ContactPerson, |o| &o.company.contact_person),
    (OfferField::ContactEmail, |o| &o.company.contact_email),
];

/// Check every required application field independently and return the union
/// of failures. An empty map means the record may be submitted.
pub fn validate_application(app: &InternshipApplication) -> BTreeMap<AppField, String> {
    let mut errors = BTreeMap::new();
    for (field, value) in APP_REQUIRED {
        if missing(value(app)) {
            errors.insert(*field, format!("{} is required", field.label()));
        }
    }
    errors
}

/// Same contract as [`validate_application`], over an offer letter.
pub fn validate_offer(offer: &OfferLetter) -> BTreeMap<OfferField, String> {
    let mut errors = BTreeMap::new();
    for (field, value) in OFFER_REQUIRED {
        if missing(value(offer)) {
            errors.insert(*field, format!("{} is required", field.label()));
        }
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::*;

    fn filled_application() -> InternshipApplication {
        InternshipApplication {
            id: None,
            personal: PersonalInfo {
                first_name: "Ada".into(),
                last_name: "Lovelace".into(),
                email: "ada@example.com".into(),
                phone: "+1 (555) 123-4567".into(),
                date_of_birth: "2003-12-10".into(),
                address: "12 Analytical Way, London".into(),
            },
            academic: AcademicInfo {
                university: "University of London".into(),
                degree: "Bachelor's".into(),
                major: "Mathematics".into(),
                graduation_date: "2026-06-30".into(),
                gpa: String::new(),
            },
            internship: InternshipInfo {
                position: "Software Engineering".into(),
                department: "Engineering".into(),
                start_date: "2026-09-01".into(),
                duration: "6 months".into(),
                work_mode: WorkMode::Hybrid,
            },
            extra: AdditionalInfo {
                cover_letter: "I would like to build engines.".into(),
                skills: vec!["Rust".into()],
                previous_experience: String::new(),
            },
        }
    }

    fn filled_offer() -> OfferLetter {
        OfferLetter {
            id: None,
            candidate: CandidateInfo {
                name: "Ada Lovelace".into(),
                email: "ada@example.com".into(),
                address: "12 Analytical Way, London".into(),
            },
            position: PositionDetails {
                title: "Software Engineering Intern".into(),
                department: "Engineering".into(),
                start_date: "2026-09-01".into(),
                duration: "6 months".into(),
                stipend: "$2,000".into(),
                work_mode: WorkMode::Remote,
            },
            company: CompanyInfo {
                name: "Difference Engines Ltd".into(),
                address: "1 Babbage Square".into(),
                contact_person: "Charles Babbage".into(),
                contact_email: "charles@example.com".into(),
            },
            additional_terms: String::new(),
        }
    }

    #[test]
    fn test_fully_populated_application_validates_clean() {
        assert!(validate_application(&filled_application()).is_empty());
    }

    #[test]
    fn test_optional_fields_are_never_checked() {
        let mut app = filled_application();
        app.academic.gpa = String::new();
        app.extra.previous_experience = String::new();
        app.extra.skills.clear();
        assert!(validate_application(&app).is_empty());

        let mut offer = filled_offer();
        offer.additional_terms = String::new();
        assert!(validate_offer(&offer).is_empty());
    }

    #[test]
    fn test_missing_fields_reported_as_union_not_fail_fast() {
        let mut app = filled_application();
        app.personal.email = "   ".into(); // whitespace counts as missing
        app.academic.major = String::new();
        app.extra.cover_letter = String::new();

        let errors = validate_application(&app);
        let keys: Vec<AppField> = errors.keys().copied().collect();
        assert_eq!(
            keys,
            vec![AppField::Email, AppField::Major, AppField::CoverLetter]
        );
        assert_eq!(errors[&AppField::Email], "Email is required");
    }

    #[test]
    fn test_every_required_application_field_is_covered() {
        let empty = InternshipApplication::default();
        let errors = validate_application(&empty);
        assert_eq!(errors.len(), APP_REQUIRED.len());
        for (field, _) in APP_REQUIRED {
            assert_eq!(errors[field], format!("{} is required", field.label()));
        }
    }

    #[test]
    fn test_every_required_offer_field_is_covered() {
        let empty = OfferLetter::default();
        let errors = validate_offer(&empty);
        assert_eq!(errors.len(), OFFER_REQUIRED.len());
        for (field, _) in OFFER_REQUIRED {
            assert!(errors.contains_key(field));
        }
    }

    #[test]
    fn test_single_missing_offer_field() {
        let mut offer = filled_offer();
        offer.position.stipend = String::new();
        let errors = validate_offer(&offer);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[&OfferField::Stipend], "Stipend is required");
    }
}
