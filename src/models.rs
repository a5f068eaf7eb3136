use serde::{Deserialize, Serialize};
use std::fmt;

/// Where the intern works. Serialized with the spellings the intake
/// backend expects ("On-site", not "OnSite").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkMode {
    Remote,
    #[serde(rename = "On-site")]
    OnSite,
    Hybrid,
}

impl WorkMode {
    pub const ALL: [WorkMode; 3] = [WorkMode::OnSite, WorkMode::Remote, WorkMode::Hybrid];

    pub fn label(self) -> &'static str {
        match self {
            WorkMode::Remote => "Remote",
            WorkMode::OnSite => "On-site",
            WorkMode::Hybrid => "Hybrid",
        }
    }
}

impl Default for WorkMode {
    fn default() -> Self {
        WorkMode::OnSite
    }
}

impl fmt::Display for WorkMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonalInfo {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub date_of_birth: String,
    pub address: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AcademicInfo {
    pub university: String,
    pub degree: String,
    pub major: String,
    pub graduation_date: String,
    pub gpa: String, // optional, never validated
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InternshipInfo {
    pub position: String,
    pub department: String,
    pub start_date: String,
    pub duration: String,
    pub work_mode: WorkMode,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdditionalInfo {
    pub cover_letter: String,
    pub skills: Vec<String>,
    pub previous_experience: String, // optional, never validated
}

impl AdditionalInfo {
    /// Add a skill tag. Trims the input; blank or already-present entries
    /// are a no-op. Returns whether the list changed.
    pub fn add_skill(&mut self, skill: &str) -> bool {
        let skill = skill.trim();
        if skill.is_empty() || self.skills.iter().any(|s| s == skill) {
            return false;
        }
        self.skills.push(skill.to_string());
        true
    }

    /// Remove every exact match of `skill` from the list.
    pub fn remove_skill(&mut self, skill: &str) {
        self.skills.retain(|s| s != skill);
    }
}

/// One in-progress (or submitted) internship application. `id` is assigned
/// by the gateway on acceptance and is absent until then.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InternshipApplication {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub personal: PersonalInfo,
    pub academic: AcademicInfo,
    pub internship: InternshipInfo,
    pub extra: AdditionalInfo,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateInfo {
    pub name: String,
    pub email: String,
    pub address: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PositionDetails {
    pub title: String,
    pub department: String,
    pub start_date: String,
    pub duration: String,
    pub stipend: String,
    pub work_mode: WorkMode,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanyInfo {
    pub name: String,
    pub address: String,
    pub contact_person: String,
    pub contact_email: String,
}

/// The data needed to generate one offer letter. Same gateway-assigned `id`
/// pattern as [`InternshipApplication`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OfferLetter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub candidate: CandidateInfo,
    pub position: PositionDetails,
    pub company: CompanyInfo,
    pub additional_terms: String, // optional, never validated
}
