use crate::utils::error::{Result, TrackerError};
use std::collections::HashSet;
use std::hash::Hash;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(TrackerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(TrackerError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(TrackerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(TrackerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(TrackerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(TrackerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_unique<T: Eq + Hash + std::fmt::Display>(field_name: &str, items: &[T]) -> Result<()> {
    if items.is_empty() {
        return Err(TrackerError::MissingConfigError {
            field: field_name.to_string(),
        });
    }

    let mut seen = HashSet::new();
    for item in items {
        if !seen.insert(item) {
            return Err(TrackerError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: item.to_string(),
                reason: "Duplicate entry".to_string(),
            });
        }
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(TrackerError::validation(format!("{} is required", field_name)));
    }
    Ok(())
}

/// Parses a form field as a finite number. Surrounding whitespace is ignored.
pub fn parse_number(field_name: &str, raw: &str) -> Result<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(TrackerError::validation(format!("{} is required", field_name)));
    }

    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(TrackerError::validation(format!(
            "{} must be a number, got '{}'",
            field_name, trimmed
        ))),
    }
}

pub fn parse_positive_number(field_name: &str, raw: &str) -> Result<f64> {
    let value = parse_number(field_name, raw)?;
    if value <= 0.0 {
        return Err(TrackerError::validation(format!(
            "{} must be greater than 0",
            field_name
        )));
    }
    Ok(value)
}

pub fn parse_non_negative_number(field_name: &str, raw: &str) -> Result<f64> {
    let value = parse_number(field_name, raw)?;
    if value < 0.0 {
        return Err(TrackerError::validation(format!(
            "{} cannot be negative",
            field_name
        )));
    }
    Ok(value)
}
