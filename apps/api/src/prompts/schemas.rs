// Structured-output schemas sent with each generation call.
// The required key sets here must match the serde structs in `crate::models`.

use serde_json::{json, Value};

fn string_array() -> Value {
    json!({ "type": "ARRAY", "items": { "type": "STRING" } })
}

pub fn review_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "score": { "type": "INTEGER" },
            "overallSummary": { "type": "STRING" },
            "strengths": string_array(),
            "weaknesses": string_array(),
            "sectionFeedback": {
                "type": "OBJECT",
                "properties": {
                    "summary": string_array(),
                    "experience": string_array(),
                    "education": string_array(),
                    "skills": string_array(),
                    "projects": string_array(),
                    "other": string_array(),
                },
                "required": ["summary", "experience", "education", "skills", "projects", "other"]
            }
        },
        "required": ["score", "overallSummary", "strengths", "weaknesses", "sectionFeedback"]
    })
}

pub fn rewrite_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "header": {
                "type": "OBJECT",
                "properties": {
                    "fullName": { "type": "STRING" },
                    "email": { "type": "STRING" },
                    "phone": { "type": "STRING" },
                    "location": { "type": "STRING" },
                    "linkedin": { "type": "STRING" },
                    "portfolio": { "type": "STRING" }
                },
                "required": ["fullName", "email"]
            },
            "summary": { "type": "STRING" },
            "skills": string_array(),
            "experience": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "title": { "type": "STRING" },
                        "company": { "type": "STRING" },
                        "location": { "type": "STRING" },
                        "startDate": { "type": "STRING" },
                        "endDate": { "type": "STRING" },
                        "bullets": string_array()
                    },
                    "required": ["title", "company", "bullets"]
                }
            },
            "education": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "degree": { "type": "STRING" },
                        "institution": { "type": "STRING" },
                        "location": { "type": "STRING" },
                        "startDate": { "type": "STRING" },
                        "endDate": { "type": "STRING" },
                        "gpa": { "type": "STRING" },
                        "bullets": string_array()
                    },
                    "required": ["degree", "institution"]
                }
            },
            "projects": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": { "type": "STRING" },
                        "role": { "type": "STRING" },
                        "technologies": string_array(),
                        "bullets": string_array()
                    },
                    "required": ["name", "bullets"]
                }
            },
            "extracurriculars": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": { "type": "STRING" },
                        "role": { "type": "STRING" },
                        "bullets": string_array()
                    },
                    "required": ["name"]
                }
            }
        },
        "required": ["header", "summary", "skills", "experience", "education", "projects"]
    })
}

pub fn job_match_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "fitScore": { "type": "INTEGER" },
            "matchedSkills": string_array(),
            "missingSkills": string_array(),
            "recommendedKeywords": string_array(),
            "tailoringAdvice": string_array()
        },
        "required": ["fitScore", "matchedSkills", "missingSkills", "recommendedKeywords", "tailoringAdvice"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn required(schema: &Value) -> Vec<&str> {
        schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect()
    }

    #[test]
    fn test_review_schema_requires_all_section_feedback_keys() {
        let schema = review_schema();
        assert_eq!(required(&schema).len(), 5);
        assert_eq!(
            required(&schema["properties"]["sectionFeedback"]),
            vec!["summary", "experience", "education", "skills", "projects", "other"]
        );
    }

    #[test]
    fn test_rewrite_schema_leaves_extracurriculars_optional() {
        let schema = rewrite_schema();
        let keys = required(&schema);
        assert!(!keys.contains(&"extracurriculars"));
        assert!(keys.contains(&"header"));
        assert_eq!(required(&schema["properties"]["header"]), vec!["fullName", "email"]);
    }

    #[test]
    fn test_job_match_schema_score_is_integer() {
        let schema = job_match_schema();
        assert_eq!(schema["properties"]["fitScore"]["type"], "INTEGER");
        assert_eq!(required(&schema).len(), 5);
    }
}
