// src/models/ai.rs
// DOCUMENTATION: AI generation DTOs
// PURPOSE: Request/response bodies for the standalone plan-generation
// endpoint

use serde::{Deserialize, Serialize};

/// Request DTO for POST /ai/generate-plan. Dates travel as plain strings
/// here; they are interpolated into the prompt, never parsed.
#[derive(Debug, Deserialize)]
pub struct GeneratePlanRequest {
    pub destination: Option<String>,
    pub city: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl GeneratePlanRequest {
    /// All four fields must be present and non-empty; absent and empty are
    /// the same kind of missing.
    pub fn complete(&self) -> Option<(&str, &str, &str, &str)> {
        let destination = non_empty(self.destination.as_deref())?;
        let city = non_empty(self.city.as_deref())?;
        let start_date = non_empty(self.start_date.as_deref())?;
        let end_date = non_empty(self.end_date.as_deref())?;
        Some((destination, city, start_date, end_date))
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Response DTO for POST /ai/generate-plan
#[derive(Debug, Serialize)]
pub struct GeneratePlanResponse {
    pub generated_plan: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_request() -> GeneratePlanRequest {
        GeneratePlanRequest {
            destination: Some("Borobudur".to_string()),
            city: Some("Jakarta".to_string()),
            start_date: Some("2025-06-01".to_string()),
            end_date: Some("2025-06-07".to_string()),
        }
    }

    #[test]
    fn complete_request_yields_all_fields() {
        let req = full_request();
        let (destination, city, start, end) = req.complete().unwrap();
        assert_eq!(destination, "Borobudur");
        assert_eq!(city, "Jakarta");
        assert_eq!(start, "2025-06-01");
        assert_eq!(end, "2025-06-07");
    }

    #[test]
    fn absent_field_is_incomplete() {
        let mut req = full_request();
        req.city = None;
        assert!(req.complete().is_none());
    }

    #[test]
    fn empty_field_is_incomplete() {
        let mut req = full_request();
        req.end_date = Some("   ".to_string());
        assert!(req.complete().is_none());
    }

    #[test]
    fn request_parses_with_missing_fields() {
        let req: GeneratePlanRequest =
            serde_json::from_str(r#"{ "destination": "Bromo" }"#).unwrap();
        assert_eq!(req.destination.as_deref(), Some("Bromo"));
        assert!(req.complete().is_none());
    }
}
