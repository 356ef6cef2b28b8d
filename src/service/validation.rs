//! Request field validation. Runs in handlers before any database call.

use crate::error::AppError;
use chrono::{NaiveDate, NaiveTime};
use regex::Regex;
use std::sync::OnceLock;

pub const MAX_NAME_LEN: usize = 100;
pub const MAX_TEXT_LEN: usize = 1000;
pub const MIN_PASSWORD_LEN: usize = 6;
pub const MAX_PASSWORD_LEN: usize = 128;

/// Present and non-null, or `"{field} is required"`.
pub fn required<T>(field: &str, value: Option<T>) -> Result<T, AppError> {
    value.ok_or_else(|| AppError::Validation(format!("{} is required", field)))
}

/// Present, non-blank (after trim) and at most `max` characters. Returns the trimmed text.
pub fn required_text(field: &str, value: Option<String>, max: usize) -> Result<String, AppError> {
    let v = required(field, value)?;
    let v = v.trim();
    if v.is_empty() {
        return Err(AppError::Validation(format!("{} is required", field)));
    }
    max_length(field, v, max)?;
    Ok(v.to_string())
}

/// Optional text: trimmed, blank becomes `None`, length checked when present.
pub fn optional_text(field: &str, value: Option<String>, max: usize) -> Result<Option<String>, AppError> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => {
            max_length(field, v, max)?;
            Ok(Some(v.to_string()))
        }
    }
}

pub fn max_length(field: &str, v: &str, max: usize) -> Result<(), AppError> {
    if v.chars().count() > max {
        return Err(AppError::Validation(format!(
            "{} must be at most {} characters",
            field, max
        )));
    }
    Ok(())
}

pub fn min_length(field: &str, v: &str, min: usize) -> Result<(), AppError> {
    if v.chars().count() < min {
        return Err(AppError::Validation(format!(
            "{} must be at least {} characters",
            field, min
        )));
    }
    Ok(())
}

pub fn password(field: &str, value: Option<String>) -> Result<String, AppError> {
    let v = required(field, value)?;
    min_length(field, &v, MIN_PASSWORD_LEN)?;
    max_length(field, &v, MAX_PASSWORD_LEN)?;
    Ok(v)
}

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("static email pattern"))
}

fn phone_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\+?[0-9 ()\-]{6,20}$").expect("static phone pattern"))
}

pub fn email(field: &str, v: &str) -> Result<(), AppError> {
    if !email_regex().is_match(v) {
        return Err(AppError::Validation(format!("{} must be a valid email", field)));
    }
    Ok(())
}

pub fn phone(field: &str, v: &str) -> Result<(), AppError> {
    if !phone_regex().is_match(v) {
        return Err(AppError::Validation(format!("{} must be a valid phone number", field)));
    }
    Ok(())
}

pub fn positive(field: &str, n: i64) -> Result<(), AppError> {
    if n <= 0 {
        return Err(AppError::Validation(format!("{} must be greater than 0", field)));
    }
    Ok(())
}

pub fn between(field: &str, n: i64, min: i64, max: i64) -> Result<(), AppError> {
    if n < min || n > max {
        return Err(AppError::Validation(format!(
            "{} must be between {} and {}",
            field, min, max
        )));
    }
    Ok(())
}

/// `YYYY-MM-DD`.
pub fn date(field: &str, v: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(v.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::Validation(format!("{} must be a date (YYYY-MM-DD)", field)))
}

/// `HH:MM` or `HH:MM:SS`.
pub fn time(field: &str, v: &str) -> Result<NaiveTime, AppError> {
    let v = v.trim();
    NaiveTime::parse_from_str(v, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(v, "%H:%M"))
        .map_err(|_| AppError::Validation(format!("{} must be a time (HH:MM)", field)))
}

pub fn optional_time(field: &str, value: Option<String>) -> Result<Option<NaiveTime>, AppError> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => time(field, v).map(Some),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(e: AppError) -> String {
        e.to_string()
    }

    #[test]
    fn required_reports_field_name() {
        assert_eq!(message(required::<i64>("restaurantId", None).unwrap_err()), "restaurantId is required");
        assert_eq!(required("x", Some(3)).unwrap(), 3);
    }

    #[test]
    fn required_text_trims_and_rejects_blank() {
        assert_eq!(required_text("name", Some("  Italian ".into()), 10).unwrap(), "Italian");
        assert!(required_text("name", Some("   ".into()), 10).is_err());
        assert_eq!(
            message(required_text("name", Some("abcdefghijk".into()), 10).unwrap_err()),
            "name must be at most 10 characters"
        );
    }

    #[test]
    fn optional_text_blank_is_none() {
        assert_eq!(optional_text("comment", Some(" ".into()), 10).unwrap(), None);
        assert_eq!(optional_text("comment", None, 10).unwrap(), None);
        assert_eq!(optional_text("comment", Some("ok".into()), 10).unwrap(), Some("ok".into()));
    }

    #[test]
    fn email_and_phone_formats() {
        assert!(email("email", "ana@example.com").is_ok());
        assert!(email("email", "ana@example").is_err());
        assert!(email("email", "not an email").is_err());
        assert!(phone("phone", "+1 (555) 010-2030").is_ok());
        assert!(phone("phone", "call me").is_err());
    }

    #[test]
    fn password_length_bounds() {
        assert!(password("password", Some("12345".into())).is_err());
        assert!(password("password", Some("123456".into())).is_ok());
        assert!(password("password", None).is_err());
    }

    #[test]
    fn numeric_bounds() {
        assert!(positive("partySize", 0).is_err());
        assert!(positive("partySize", 2).is_ok());
        assert!(between("rating", 6, 1, 5).is_err());
        assert_eq!(message(between("rating", 0, 1, 5).unwrap_err()), "rating must be between 1 and 5");
        assert!(between("rating", 5, 1, 5).is_ok());
    }

    #[test]
    fn dates_and_times() {
        assert_eq!(date("date", "2025-03-01").unwrap(), NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
        assert!(date("date", "01/03/2025").is_err());
        assert_eq!(time("time", "19:30").unwrap(), NaiveTime::from_hms_opt(19, 30, 0).unwrap());
        assert_eq!(time("time", "19:30:15").unwrap(), NaiveTime::from_hms_opt(19, 30, 15).unwrap());
        assert!(time("time", "7pm").is_err());
        assert_eq!(optional_time("openingTime", Some("".into())).unwrap(), None);
    }
}
