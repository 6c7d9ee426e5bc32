use crate::utils::error::{Result, SpinnerError};
use regex::Regex;
use serde::de::DeserializeOwned;
use std::sync::OnceLock;

fn fence_pattern() -> &'static Regex {
    static FENCE: OnceLock<Regex> = OnceLock::new();
    FENCE.get_or_init(|| Regex::new(r"```(?:json)?\n?").unwrap())
}

/// Removes markdown code fences that models like to wrap JSON in.
pub fn strip_code_fences(text: &str) -> String {
    fence_pattern().replace_all(text.trim(), "").trim().to_string()
}

/// Parses JSON out of a completion. Falls back to the outermost `[...]` or
/// `{...}` span when the model added prose around it.
pub fn parse_completion<T: DeserializeOwned>(text: &str) -> Result<T> {
    let cleaned = strip_code_fences(text);
    tracing::debug!("Parsing AI JSON: {}", cleaned.chars().take(200).collect::<String>());

    match serde_json::from_str(&cleaned) {
        Ok(value) => Ok(value),
        Err(first_err) => {
            let start = cleaned.find(['[', '{']);
            let end = cleaned.rfind([']', '}']);
            if let (Some(start), Some(end)) = (start, end) {
                if start < end {
                    if let Ok(value) = serde_json::from_str(&cleaned[start..=end]) {
                        return Ok(value);
                    }
                }
            }
            Err(SpinnerError::AiResponseError {
                message: format!("invalid JSON in completion: {}", first_err),
            })
        }
    }
}
