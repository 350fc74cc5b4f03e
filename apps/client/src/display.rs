//! Resume display assembly — flat, render-ready strings for one record.
//!
//! This is the rendering path the normalizer's never-throw policy exists
//! for: whatever shape the backend sent, the output is plain text with no
//! JSON syntax leaking through.

use serde::Serialize;
use serde_json::Value;

use crate::normalize::extract::{
    extract_primary_function, extract_primary_industry, resolve_current_title,
};
use crate::normalize::{format_boolean, format_currency, format_list_field, DEFAULT_FALLBACK};

/// Flat display strings for one resume record.
#[derive(Debug, Clone, Serialize)]
pub struct ResumeDisplay {
    pub name: String,
    pub current_title: String,
    pub primary_industry: String,
    pub primary_function: String,
    pub skills: String,
    pub languages: String,
    pub certifications: String,
    pub awards: String,
    pub willing_to_relocate: String,
    pub expected_salary: String,
}

impl ResumeDisplay {
    pub fn from_record(record: &Value) -> Self {
        let list = |field: &str| format_list_field(record.get(field), DEFAULT_FALLBACK);
        Self {
            name: list("name"),
            current_title: resolve_current_title(record),
            primary_industry: extract_primary_industry(record),
            primary_function: extract_primary_function(record),
            skills: list("skills"),
            languages: list("languages"),
            certifications: list("certifications"),
            awards: list("awards"),
            willing_to_relocate: format_boolean(
                record.get("willing_to_relocate"),
                DEFAULT_FALLBACK,
            ),
            expected_salary: format_currency(record.get("expected_salary")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_mixed_shape_record_normalizes_cleanly() {
        // Every field arrives in a different shape, as real backends do.
        let record = json!({
            "name": "A. Candidate",
            "current_title": "Staff Engineer",
            "skills": "[\"Rust\", \"\", \" SQL \"]",
            "languages": {"spoken": ["English", "French"], "written": []},
            "certifications": ["CKA"],
            "awards": null,
            "industry": {"primary_industry": "Fintech"},
            "willing_to_relocate": true,
            "expected_salary": "120000"
        });
        let display = ResumeDisplay::from_record(&record);
        assert_eq!(display.skills, "Rust, SQL");
        assert_eq!(display.languages, "English, French");
        assert_eq!(display.certifications, "CKA");
        assert_eq!(display.awards, "Not provided");
        assert_eq!(display.primary_industry, "Fintech");
        assert_eq!(display.willing_to_relocate, "Yes");
        assert_eq!(display.expected_salary, "$120,000");
    }

    #[test]
    fn test_no_json_syntax_leaks_into_display() {
        let record = json!({
            "skills": "{\"technical\": [\"Go\"], \"soft\": [\"Mentoring\"]}",
            "languages": "[\"German\"]"
        });
        let display = ResumeDisplay::from_record(&record);
        for field in [&display.skills, &display.languages] {
            assert!(!field.contains('{'), "JSON syntax leaked: {field}");
            assert!(!field.contains('['), "JSON syntax leaked: {field}");
        }
    }

    #[test]
    fn test_empty_record_is_all_fallbacks() {
        let display = ResumeDisplay::from_record(&json!({}));
        assert_eq!(display.current_title, "Not provided");
        assert_eq!(display.skills, "Not provided");
        assert_eq!(display.willing_to_relocate, "Not provided");
        assert_eq!(display.expected_salary, "Not provided");
    }
}
