// src/validation.rs
// DOCUMENTATION: Shared validation helpers
// PURPOSE: Field rules reused across request DTOs and a single way to
// surface validator failures as one message

use chrono::NaiveDate;
use validator::{ValidationError, ValidationErrors, ValidationErrorsKind};

/// Reduce a set of validation failures to a single message.
/// Only the first violated constraint is surfaced to the caller; fields are
/// visited in sorted order so the choice is deterministic. Nested structs
/// (e.g. a destination's detail input) are descended into.
pub fn first_validation_message(errors: &ValidationErrors) -> String {
    first_message(errors).unwrap_or_else(|| "Invalid request".to_string())
}

fn first_message(errors: &ValidationErrors) -> Option<String> {
    let error_map = errors.errors();
    let mut fields: Vec<_> = error_map.keys().collect();
    fields.sort();

    for field in fields {
        match error_map.get(*field) {
            Some(ValidationErrorsKind::Field(list)) => {
                if let Some(error) = list.first() {
                    return Some(
                        error
                            .message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| format!("{} is invalid", field)),
                    );
                }
            }
            Some(ValidationErrorsKind::Struct(inner)) => {
                if let Some(message) = first_message(inner) {
                    return Some(message);
                }
            }
            Some(ValidationErrorsKind::List(items)) => {
                for inner in items.values() {
                    if let Some(message) = first_message(inner) {
                        return Some(message);
                    }
                }
            }
            None => {}
        }
    }

    None
}

/// Phone numbers may only contain digits, whitespace, and `-()+`.
pub fn validate_phone(value: &str) -> Result<(), ValidationError> {
    let valid = !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_whitespace() || "-()+".contains(c));

    if valid {
        Ok(())
    } else {
        let mut error = ValidationError::new("phone");
        error.message = Some("Phone number must be valid".into());
        Err(error)
    }
}

/// Ratings live on a 0 to 5 scale; the two bounds report distinct messages.
pub fn validate_rating(rating: f32) -> Result<(), ValidationError> {
    if rating < 0.0 {
        let mut error = ValidationError::new("rating");
        error.message = Some("Rating must be at least 0".into());
        return Err(error);
    }
    if rating > 5.0 {
        let mut error = ValidationError::new("rating");
        error.message = Some("Rating must be at most 5".into());
        return Err(error);
    }
    Ok(())
}

/// Trips must not end before they start.
pub fn date_order(start_date: NaiveDate, end_date: NaiveDate) -> Result<(), ValidationError> {
    if end_date < start_date {
        let mut error = ValidationError::new("date_order");
        error.message = Some("End date must be after start date".into());
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phone_accepts_digits_and_separators() {
        assert!(validate_phone("+62 812-345(678)").is_ok());
        assert!(validate_phone("0274 512345").is_ok());
    }

    #[test]
    fn phone_rejects_letters_and_empty() {
        assert!(validate_phone("call me").is_err());
        assert!(validate_phone("").is_err());
    }

    #[test]
    fn rating_bounds_report_distinct_messages() {
        assert!(validate_rating(4.5).is_ok());
        assert!(validate_rating(0.0).is_ok());
        assert!(validate_rating(5.0).is_ok());

        let low = validate_rating(-0.5).unwrap_err();
        assert_eq!(low.message.unwrap().to_string(), "Rating must be at least 0");

        let high = validate_rating(5.1).unwrap_err();
        assert_eq!(high.message.unwrap().to_string(), "Rating must be at most 5");
    }

    #[test]
    fn date_order_allows_single_day_trips() {
        let day = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        assert!(date_order(day, day).is_ok());
    }

    #[test]
    fn date_order_rejects_reversed_dates() {
        let start = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let error = date_order(start, end).unwrap_err();
        assert_eq!(
            error.message.unwrap().to_string(),
            "End date must be after start date"
        );
    }

    #[test]
    fn first_message_prefers_the_declared_text() {
        let mut errors = ValidationErrors::new();
        let mut error = ValidationError::new("length");
        error.message = Some("Title cannot be empty".into());
        errors.add("title", error);

        assert_eq!(first_validation_message(&errors), "Title cannot be empty");
    }

    #[test]
    fn first_message_falls_back_to_field_name() {
        let mut errors = ValidationErrors::new();
        errors.add("website", ValidationError::new("url"));

        assert_eq!(first_validation_message(&errors), "website is invalid");
    }
}
