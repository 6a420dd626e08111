//! Field checks shared by the request DTOs.
//!
//! Derived `validator` rules cover presence and e-mail syntax; the helpers
//! here cover the rest and collect everything into one message list so a
//! client sees every problem at once.

use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveTime};
use regex::Regex;
use validator::ValidationErrors;

use crate::util::error::ServiceError;

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9\s\-().]{7,20}$").expect("phone pattern compiles"));

pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_RE.is_match(phone)
}

/// Flattens derived-rule failures into sorted, field-named messages.
pub fn validation_messages(result: Result<(), ValidationErrors>) -> Vec<String> {
    let Err(errors) = result else {
        return Vec::new();
    };
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(message) => message.to_string(),
                None => format!("{} is invalid", field),
            })
        })
        .collect();
    messages.sort();
    messages
}

pub fn check_phone(field: &str, phone: Option<&str>, errors: &mut Vec<String>) {
    if let Some(phone) = phone {
        if !is_valid_phone(phone) {
            errors.push(format!("{} must be a valid phone number", field));
        }
    }
}

pub fn check_date(field: &str, value: &str, errors: &mut Vec<String>) {
    if NaiveDate::parse_from_str(value, "%Y-%m-%d").is_err() {
        errors.push(format!("{} must be a date in YYYY-MM-DD format", field));
    }
}

pub fn check_time(field: &str, value: &str, errors: &mut Vec<String>) {
    if NaiveTime::parse_from_str(value, "%H:%M").is_err() {
        errors.push(format!("{} must be a time in HH:MM format", field));
    }
}

/// Zero-padded `YYYY-MM-DD`, so `2026-11-5` and `2026-11-05` name the same day.
pub fn canonical_date(value: &str) -> Option<String> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .ok()
        .map(|d| d.format("%Y-%m-%d").to_string())
}

/// Zero-padded `HH:MM`.
pub fn canonical_time(value: &str) -> Option<String> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M")
        .ok()
        .map(|t| t.format("%H:%M").to_string())
}

pub fn check_amount(field: &str, value: f64, errors: &mut Vec<String>) {
    if !value.is_finite() || value < 0.0 {
        errors.push(format!("{} must be a non-negative number", field));
    }
}

pub fn require<T>(field: &str, value: &Option<T>, errors: &mut Vec<String>) {
    if value.is_none() {
        errors.push(format!("{} is required", field));
    }
}

pub fn into_result(errors: Vec<String>) -> Result<(), ServiceError> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ServiceError::Validation(errors))
    }
}

pub fn trim(value: String) -> String {
    let trimmed = value.trim();
    if trimmed.len() == value.len() {
        value
    } else {
        trimmed.to_string()
    }
}

/// Trims, treating a blank value as absent.
pub fn trim_optional(value: Option<String>) -> Option<String> {
    value.map(trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_pattern() {
        assert!(is_valid_phone("+1 (555) 123-4567"));
        assert!(is_valid_phone("0612345678"));
        assert!(!is_valid_phone("12345"));
        assert!(!is_valid_phone("call me maybe"));
    }

    #[test]
    fn test_date_and_time_checks() {
        let mut errors = Vec::new();
        check_date("date", "2026-02-30", &mut errors);
        check_time("time", "25:00", &mut errors);
        check_date("date", "2026-02-28", &mut errors);
        check_time("time", "09:30", &mut errors);
        assert_eq!(errors, vec![
            "date must be a date in YYYY-MM-DD format".to_string(),
            "time must be a time in HH:MM format".to_string(),
        ]);
    }

    #[test]
    fn test_canonical_date_and_time_pad_fields() {
        assert_eq!(canonical_date("2026-11-5"), Some("2026-11-05".to_string()));
        assert_eq!(canonical_date(" 2026-11-05 "), Some("2026-11-05".to_string()));
        assert_eq!(canonical_date("2026-02-30"), None);
        assert_eq!(canonical_time("9:30"), Some("09:30".to_string()));
        assert_eq!(canonical_time("09:30"), Some("09:30".to_string()));
        assert_eq!(canonical_time("24:00"), None);
    }

    #[test]
    fn test_amount_check() {
        let mut errors = Vec::new();
        check_amount("amount", -1.0, &mut errors);
        check_amount("amount", f64::NAN, &mut errors);
        check_amount("amount", 0.0, &mut errors);
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_trim_optional() {
        assert_eq!(trim_optional(Some("  ".to_string())), None);
        assert_eq!(trim_optional(Some(" a ".to_string())), Some("a".to_string()));
        assert_eq!(trim_optional(None), None);
    }

    #[test]
    fn test_into_result() {
        assert!(into_result(Vec::new()).is_ok());
        assert!(matches!(into_result(vec!["x".to_string()]), Err(ServiceError::Validation(_))));
    }
}
