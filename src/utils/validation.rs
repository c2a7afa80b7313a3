use crate::utils::error::{Result, ShopError};
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

// Shape check only: something@something.something without whitespace.
static EMAIL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("static email pattern"));

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn has_min_chars(value: &str, min: usize) -> bool {
    value.chars().count() >= min
}

pub fn is_email_shape(value: &str) -> bool {
    EMAIL_SHAPE.is_match(value)
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(ShopError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(ShopError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ShopError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_one_of(field_name: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if !allowed.contains(&value) {
        return Err(ShopError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Expected one of: {}", allowed.join(", ")),
        });
    }
    Ok(())
}

/// Rejects repeated entries, reporting the first duplicate.
pub fn validate_distinct<'a, I>(field_name: &str, values: I) -> Result<()>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    for value in values {
        if !seen.insert(value) {
            return Err(ShopError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: value.to_string(),
                reason: "Duplicate value".to_string(),
            });
        }
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(ShopError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_shape() {
        assert!(is_email_shape("jane@example.com"));
        assert!(is_email_shape("a.b+c@sub.example.co"));
        assert!(!is_email_shape("not-an-email"));
        assert!(!is_email_shape("jane@example"));
        assert!(!is_email_shape("jane doe@example.com"));
        assert!(!is_email_shape("jane@@example.com"));
        assert!(!is_email_shape(""));
    }

    #[test]
    fn test_min_chars_counts_characters_not_bytes() {
        assert!(has_min_chars("Ö1", 2));
        assert!(!has_min_chars("Ö", 2));
        assert!(!has_min_chars("", 1));
    }

    #[test]
    fn test_validate_distinct() {
        assert!(validate_distinct("keys", ["a", "b", "c"]).is_ok());
        assert!(validate_distinct("keys", ["a", "b", "a"]).is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("seats", 5, 1, 10).is_ok());
        assert!(validate_range("seats", 0, 1, 10).is_err());
    }

    #[test]
    fn test_validate_path() {
        assert!(validate_path("storage.path", "./data").is_ok());
        assert!(validate_path("storage.path", "").is_err());
        assert!(validate_path("storage.path", "a\0b").is_err());
    }
}
