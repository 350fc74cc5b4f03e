//! Domain extractors — deterministic single-choice resolution for fields the
//! backend reports under several competing names and shapes.
//!
//! The priority order is a policy contract: explicit top-level field first,
//! then known aliases inside a nested object, then the first non-empty
//! string inside a known array alias, then the fallback. Downstream
//! displays assume exactly one deterministic choice among ambiguous
//! sources, so the order here must not change casually.

use serde_json::Value;

use crate::normalize::{classify, FieldValue, DEFAULT_FALLBACK};

/// Resolves the candidate's current title: explicit `current_title` first,
/// else the title of the first experience entry carrying one.
pub fn resolve_current_title(record: &Value) -> String {
    if let FieldValue::Raw(s) = classify(record.get("current_title")) {
        return s;
    }
    for field in ["experience", "work_experience"] {
        if let FieldValue::List(entries) = classify(record.get(field)) {
            for entry in &entries {
                if let FieldValue::Nested(map) = classify(Some(entry)) {
                    for key in ["title", "position", "job_title"] {
                        if let FieldValue::Raw(s) = classify(map.get(key)) {
                            return s;
                        }
                    }
                }
            }
        }
    }
    DEFAULT_FALLBACK.to_string()
}

/// Resolves the candidate's primary industry.
pub fn extract_primary_industry(record: &Value) -> String {
    extract_with_aliases(
        record,
        "primary_industry",
        "industry",
        &["primary_industry", "industry", "industry_sector"],
        "industries",
    )
}

/// Resolves the candidate's primary job function.
pub fn extract_primary_function(record: &Value) -> String {
    extract_with_aliases(
        record,
        "primary_function",
        "function",
        &["primary_function", "function", "job_function", "functional_area"],
        "functions",
    )
}

/// Shared priority walk: explicit field → nested-object aliases → first
/// non-empty string in the array alias → fallback.
fn extract_with_aliases(
    record: &Value,
    explicit_field: &str,
    nested_field: &str,
    nested_keys: &[&str],
    array_field: &str,
) -> String {
    if let FieldValue::Raw(s) = classify(record.get(explicit_field)) {
        return s;
    }

    match classify(record.get(nested_field)) {
        FieldValue::Raw(s) => return s,
        FieldValue::Nested(map) => {
            for key in nested_keys {
                if let FieldValue::Raw(s) = classify(map.get(*key)) {
                    return s;
                }
            }
        }
        FieldValue::List(items) => {
            if let Some(s) = first_non_empty(&items) {
                return s;
            }
        }
        FieldValue::Absent => {}
    }

    match classify(record.get(array_field)) {
        FieldValue::Raw(s) => s,
        FieldValue::List(items) => {
            first_non_empty(&items).unwrap_or_else(|| DEFAULT_FALLBACK.to_string())
        }
        _ => DEFAULT_FALLBACK.to_string(),
    }
}

fn first_non_empty(items: &[Value]) -> Option<String> {
    items.iter().find_map(|v| match classify(Some(v)) {
        FieldValue::Raw(s) => Some(s),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_explicit_field_wins_over_nested_alias() {
        let record = json!({
            "primary_industry": "Fintech",
            "industry": {"primary_industry": "Healthcare"}
        });
        assert_eq!(extract_primary_industry(&record), "Fintech");
    }

    #[test]
    fn test_nested_alias_order() {
        let record = json!({
            "industry": {"industry_sector": "Logistics", "industry": "Retail"}
        });
        // "industry" alias outranks "industry_sector"
        assert_eq!(extract_primary_industry(&record), "Retail");
    }

    #[test]
    fn test_nested_alias_wins_over_array_alias() {
        let record = json!({
            "industry": {"industry_sector": "Energy"},
            "industries": ["Manufacturing"]
        });
        assert_eq!(extract_primary_industry(&record), "Energy");
    }

    #[test]
    fn test_array_alias_first_non_empty() {
        let record = json!({"industries": ["", "  ", "Aerospace", "Defense"]});
        assert_eq!(extract_primary_industry(&record), "Aerospace");
    }

    #[test]
    fn test_json_encoded_nested_object_string() {
        // The nested object itself arrives JSON-encoded.
        let record = json!({"industry": "{\"primary_industry\": \"Media\"}"});
        assert_eq!(extract_primary_industry(&record), "Media");
    }

    #[test]
    fn test_plain_string_industry_passes_through() {
        let record = json!({"industry": "Telecom"});
        assert_eq!(extract_primary_industry(&record), "Telecom");
    }

    #[test]
    fn test_everything_absent_falls_back() {
        let record = json!({"name": "A. Candidate"});
        assert_eq!(extract_primary_industry(&record), "Not provided");
        assert_eq!(extract_primary_function(&record), "Not provided");
        assert_eq!(resolve_current_title(&record), "Not provided");
    }

    #[test]
    fn test_current_title_explicit_field() {
        let record = json!({
            "current_title": "Staff Engineer",
            "experience": [{"title": "Senior Engineer"}]
        });
        assert_eq!(resolve_current_title(&record), "Staff Engineer");
    }

    #[test]
    fn test_current_title_from_first_experience_entry() {
        let record = json!({
            "experience": [
                {"company": "Acme"},
                {"position": "Platform Lead"}
            ]
        });
        assert_eq!(resolve_current_title(&record), "Platform Lead");
    }

    #[test]
    fn test_current_title_from_json_encoded_experience() {
        let record = json!({
            "work_experience": "[{\"job_title\": \"Data Analyst\"}]"
        });
        assert_eq!(resolve_current_title(&record), "Data Analyst");
    }

    #[test]
    fn test_primary_function_aliases() {
        let record = json!({"function": {"job_function": "Engineering"}});
        assert_eq!(extract_primary_function(&record), "Engineering");
    }
}
