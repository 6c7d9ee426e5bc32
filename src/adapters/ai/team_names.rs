use crate::adapters::ai::json::parse_completion;
use crate::domain::ports::TextService;
use crate::utils::error::{Result, SpinnerError};
use serde::{Deserialize, Serialize};

pub const FALLBACK_TEAM_NAMES: [&str; 8] = [
    "Red Team",
    "Blue Team",
    "Green Team",
    "Yellow Team",
    "Purple Team",
    "Orange Team",
    "Pink Team",
    "White Team",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamNameRequest {
    pub count: usize,
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default)]
    pub context: Option<String>,
}

fn default_theme() -> String {
    "general".to_string()
}

impl TeamNameRequest {
    pub fn new(count: usize) -> Self {
        Self {
            count,
            theme: default_theme(),
            context: None,
        }
    }

    pub fn prompt(&self) -> String {
        let mut prompt = format!(
            "Create exactly {} creative, memorable team names with the theme \"{}\". \
             Each name has at most four words and no numbers.",
            self.count, self.theme
        );
        if let Some(context) = self.context.as_deref().filter(|c| !c.trim().is_empty()) {
            prompt.push_str(&format!(" Context: {}.", context));
        }
        prompt.push_str(" Return ONLY a JSON array of strings, without markdown.");
        prompt
    }
}

/// Parses a completion into at most `count` names, falling back to the
/// built-in list when the completion is not a JSON array of strings.
pub fn parse_team_names(completion: &str, count: usize) -> Vec<String> {
    match parse_completion::<Vec<String>>(completion) {
        Ok(names) => names
            .into_iter()
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .take(count)
            .collect(),
        Err(e) => {
            tracing::warn!("Failed to parse team names, using fallback names: {}", e);
            FALLBACK_TEAM_NAMES
                .iter()
                .take(count)
                .map(|name| name.to_string())
                .collect()
        }
    }
}

pub async fn generate_team_names(
    service: &dyn TextService,
    request: &TeamNameRequest,
) -> Result<Vec<String>> {
    if request.count < 1 {
        return Err(SpinnerError::InvalidConfigValueError {
            field: "count".to_string(),
            value: request.count.to_string(),
            reason: "At least one team name must be requested".to_string(),
        });
    }

    tracing::info!(
        "Generating {} team names with {}",
        request.count,
        service.provider_name().to_uppercase()
    );
    let completion = service.complete(&request.prompt()).await?;
    if completion.trim().is_empty() {
        return Err(SpinnerError::AiResponseError {
            message: "the AI returned an empty response".to_string(),
        });
    }

    Ok(parse_team_names(&completion, request.count))
}
