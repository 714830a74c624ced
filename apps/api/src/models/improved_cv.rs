//! Structured CV produced by the rewrite operation and consumed by the PDF export.
//!
//! Fields the source CV does not supply come back as empty strings or arrays;
//! `null` in a required field is treated as a broken response and rejected.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImprovedCv {
    pub header: CvHeader,
    pub summary: String,
    pub skills: Vec<String>,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub projects: Vec<ProjectEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extracurriculars: Option<Vec<ExtracurricularEntry>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CvHeader {
    pub full_name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portfolio: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceEntry {
    pub title: String,
    pub company: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationEntry {
    pub degree: String,
    pub institution: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpa: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bullets: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectEntry {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub technologies: Option<Vec<String>>,
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtracurricularEntry {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bullets: Option<Vec<String>>,
}

impl CvHeader {
    /// Non-blank contact fields in display order: email, phone, location, linkedin, portfolio.
    pub fn contact_parts(&self) -> Vec<&str> {
        std::iter::once(self.email.as_str())
            .chain(
                [&self.phone, &self.location, &self.linkedin, &self.portfolio]
                    .into_iter()
                    .filter_map(|v| v.as_deref()),
            )
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .collect()
    }
}

/// Returns the value if it is present and not blank.
pub fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn minimal_cv() -> serde_json::Value {
        json!({
            "header": { "fullName": "Jane Doe", "email": "jane@example.com" },
            "summary": "",
            "skills": [],
            "experience": [],
            "education": [],
            "projects": []
        })
    }

    #[test]
    fn test_minimal_cv_decodes_with_empty_sections() {
        let cv: ImprovedCv = serde_json::from_value(minimal_cv()).unwrap();
        assert_eq!(cv.header.full_name, "Jane Doe");
        assert!(cv.header.phone.is_none());
        assert!(cv.extracurriculars.is_none());
        assert!(cv.projects.is_empty());
    }

    #[test]
    fn test_missing_required_section_rejected() {
        for key in ["header", "summary", "skills", "experience", "education", "projects"] {
            let mut value = minimal_cv();
            value.as_object_mut().unwrap().remove(key);
            assert!(
                serde_json::from_value::<ImprovedCv>(value).is_err(),
                "missing {key} must be rejected"
            );
        }
    }

    #[test]
    fn test_null_required_field_rejected() {
        let mut value = minimal_cv();
        value["summary"] = json!(null);
        assert!(serde_json::from_value::<ImprovedCv>(value).is_err());

        let mut value = minimal_cv();
        value["header"]["email"] = json!(null);
        assert!(serde_json::from_value::<ImprovedCv>(value).is_err());
    }

    #[test]
    fn test_null_optional_fields_accepted() {
        let mut value = minimal_cv();
        value["header"]["phone"] = json!(null);
        value["extracurriculars"] = json!(null);
        value["education"] = json!([{
            "degree": "BSc Computer Science",
            "institution": "State University",
            "gpa": null
        }]);
        let cv: ImprovedCv = serde_json::from_value(value).unwrap();
        assert!(cv.education[0].gpa.is_none());
        assert!(cv.education[0].bullets.is_none());
    }

    #[test]
    fn test_experience_entry_requires_bullets() {
        let mut value = minimal_cv();
        value["experience"] = json!([{ "title": "Intern", "company": "Acme" }]);
        assert!(serde_json::from_value::<ImprovedCv>(value).is_err());
    }

    #[test]
    fn test_absent_optionals_not_serialized() {
        let cv: ImprovedCv = serde_json::from_value(minimal_cv()).unwrap();
        let out = serde_json::to_value(&cv).unwrap();
        assert!(out["header"].get("phone").is_none());
        assert!(out.get("extracurriculars").is_none());
        assert_eq!(out["header"]["fullName"], "Jane Doe");
    }

    #[test]
    fn test_contact_parts_skips_blank_values() {
        let header = CvHeader {
            full_name: "Jane Doe".into(),
            email: "jane@example.com".into(),
            phone: Some("  ".into()),
            location: Some("Berlin".into()),
            linkedin: None,
            portfolio: Some("jane.dev".into()),
        };
        assert_eq!(header.contact_parts(), vec!["jane@example.com", "Berlin", "jane.dev"]);
    }
}
