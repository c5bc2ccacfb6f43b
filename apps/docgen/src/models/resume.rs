//! Structured résumé as delivered by the extraction collaborator.
//!
//! Field names follow the collaborator's JSON, including its few legacy
//! spellings (`Institution`, `Position`, `startdate`, `enddate`). Every field is
//! optional: extraction is best-effort and the renderers tolerate gaps.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeData {
    #[serde(default, rename = "personalInformation")]
    pub personal_info: Option<PersonalInformation>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub educations: Option<Vec<Education>>,
    #[serde(default)]
    pub employers: Option<Vec<Employer>>,
    #[serde(default)]
    pub work_experiences: Option<Vec<WorkExperience>>,
    #[serde(default)]
    pub competencies: Option<Vec<Competency>>,
    #[serde(default)]
    pub certificates: Option<Vec<Certificate>>,
    #[serde(default)]
    pub languages: Option<Vec<Language>>,
    #[serde(default)]
    pub other: Option<Vec<Option<String>>>,
    #[serde(default)]
    pub locale: Option<String>,
}

impl ResumeData {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn name(&self) -> Option<&str> {
        self.personal_info.as_ref()?.name.as_deref()
    }

    pub fn title(&self) -> Option<&str> {
        self.personal_info.as_ref()?.title.as_deref()
    }

    /// The photo payload, if one was supplied and is not blank.
    pub fn photo_base64(&self) -> Option<&str> {
        self.personal_info
            .as_ref()?
            .image_base64
            .as_deref()
            .filter(|s| !s.trim().is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInformation {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub image_base64: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub degree: Option<String>,
    #[serde(default)]
    pub institution: Option<String>,
    #[serde(default)]
    pub period: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub study_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employer {
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub period: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkExperience {
    #[serde(default, rename = "workExperience")]
    pub experience: Option<String>,
    #[serde(default, rename = "companyName")]
    pub company_name: Option<String>,
    #[serde(default, rename = "Position", alias = "position")]
    pub position: Option<String>,
    #[serde(default, rename = "startdate", alias = "startDate")]
    pub start_date: Option<String>,
    #[serde(default, rename = "enddate", alias = "endDate")]
    pub end_date: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub technologies: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Competency {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub keywords: Option<Vec<String>>,
    #[serde(default)]
    pub is_main_skill: bool,
    #[serde(default)]
    pub skill_category: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Certificate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "Institution", alias = "institution")]
    pub institution: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Language {
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default, rename = "language")]
    pub name: Option<String>,
    #[serde(default)]
    pub fluency: Option<String>,
}
