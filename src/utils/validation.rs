use crate::utils::error::{Result, SpinnerError};
use std::path::Path;
use url::Url;

/// Longest saved-list or theme label accepted.
pub const MAX_LABEL_CHARS: usize = 80;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field: &str, value: impl ToString, reason: impl Into<String>) -> SpinnerError {
    SpinnerError::InvalidConfigValueError {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

/// AI provider base URL. Request paths are appended to it, so a query or
/// fragment would end up in the wrong place.
pub fn validate_base_url(field_name: &str, url_str: &str) -> Result<()> {
    let url = Url::parse(url_str)
        .map_err(|e| invalid(field_name, url_str, format!("not a valid provider URL: {}", e)))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(
            field_name,
            url_str,
            format!("provider URL must use http or https, not {}", url.scheme()),
        ));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(invalid(
            field_name,
            url_str,
            "provider URL must not carry a query or fragment",
        ));
    }
    Ok(())
}

/// Saved lists are one JSON document.
pub fn validate_lists_path(field_name: &str, path: &str) -> Result<()> {
    if path.trim().is_empty() || path.contains('\0') {
        return Err(invalid(field_name, path, "saved-lists path is empty or malformed"));
    }
    let is_json = Path::new(path)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if !is_json {
        return Err(invalid(field_name, path, "saved-lists file must end in .json"));
    }
    Ok(())
}

/// Roster file given on the command line.
pub fn validate_roster_file(field_name: &str, path: &str) -> Result<()> {
    let file = Path::new(path);
    if path.trim().is_empty() || !file.is_file() {
        return Err(invalid(field_name, path, "roster file does not exist"));
    }
    Ok(())
}

/// Group count or group size; a split of zero produces no groups.
pub fn validate_split_value(field_name: &str, value: usize) -> Result<()> {
    if value < 1 {
        return Err(invalid(field_name, value, "split value must be at least 1"));
    }
    Ok(())
}

/// Saved-list names and AI themes: non-blank, short enough to print on one line.
pub fn validate_label(field_name: &str, value: &str) -> Result<()> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(invalid(field_name, value, "label cannot be blank"));
    }
    if trimmed.chars().count() > MAX_LABEL_CHARS {
        return Err(invalid(
            field_name,
            value,
            format!("label is longer than {} characters", MAX_LABEL_CHARS),
        ));
    }
    Ok(())
}

/// API key for `env_name`. A `${VAR}` left over from substitution counts as missing.
pub fn require_api_key<'a>(env_name: &str, key: &'a Option<String>) -> Result<&'a str> {
    match key.as_deref().map(str::trim) {
        Some(key) if !key.is_empty() && !key.starts_with("${") => Ok(key),
        _ => Err(SpinnerError::MissingConfigError {
            field: env_name.to_string(),
        }),
    }
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(invalid(
            field_name,
            value,
            format!("must be between {} and {}", min, max),
        ));
    }
    Ok(())
}
