use serde::{Deserialize, Serialize};

use crate::models::Score;

/// How well a CV fits one job description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobMatchResult {
    pub fit_score: Score,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub recommended_keywords: Vec<String>,
    pub tailoring_advice: Vec<String>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_decodes_match_result() {
        let result: JobMatchResult = serde_json::from_value(json!({
            "fitScore": 64,
            "matchedSkills": ["Rust", "SQL"],
            "missingSkills": ["Kubernetes"],
            "recommendedKeywords": ["container orchestration"],
            "tailoringAdvice": ["Lead with the database project"]
        }))
        .unwrap();
        assert_eq!(result.fit_score.value(), 64);
        assert_eq!(result.missing_skills, vec!["Kubernetes"]);
    }

    #[test]
    fn test_missing_fit_score_rejected() {
        let result = serde_json::from_value::<JobMatchResult>(json!({
            "matchedSkills": [],
            "missingSkills": [],
            "recommendedKeywords": [],
            "tailoringAdvice": []
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_null_list_rejected() {
        let result = serde_json::from_value::<JobMatchResult>(json!({
            "fitScore": 10,
            "matchedSkills": null,
            "missingSkills": [],
            "recommendedKeywords": [],
            "tailoringAdvice": []
        }));
        assert!(result.is_err());
    }
}
