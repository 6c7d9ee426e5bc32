use crate::adapters::ai::cache::DEFAULT_CACHE_TTL_SECONDS;
use crate::adapters::ai::provider::{AiProvider, HttpTextService, DEFAULT_TIMEOUT_SECONDS};
use crate::core::naming::{GroupNamer, GroupTheme};
use crate::core::spinner::SpinSettings;
use crate::domain::model::{Constraint, SplitSpec};
use crate::utils::error::{Result, SpinnerError};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_LISTS_PATH: &str = "./saved-lists.json";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SpinnerConfig {
    pub split: SplitSpec,
    pub groups: GroupsConfig,
    pub constraints: Vec<Constraint>,
    pub ai: AiConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupsConfig {
    pub assign_leaders: bool,
    pub avatars: bool,
    pub theme: GroupTheme,
    pub custom_names: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    pub provider: Option<AiProvider>,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub timeout_seconds: u64,
    pub cache_ttl_seconds: u64,
    /// Theme passed to team-name generation.
    pub theme: String,
    pub context: Option<String>,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            provider: None,
            api_key: None,
            base_url: None,
            model: None,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            cache_ttl_seconds: DEFAULT_CACHE_TTL_SECONDS,
            theme: "general".to_string(),
            context: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub lists_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            lists_path: DEFAULT_LISTS_PATH.to_string(),
        }
    }
}

impl SpinnerConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SpinnerError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| SpinnerError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${GOOGLE_GEMINI_API_KEY}), 未設定的保持原樣
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }

    pub fn validate_config(&self) -> Result<()> {
        self.split.validate().map_err(|e| SpinnerError::InvalidConfigValueError {
            field: "split.value".to_string(),
            value: self.split.value().to_string(),
            reason: e.to_string(),
        })?;

        crate::core::constraints::validate_constraints(&self.constraints)?;

        if let Some(base_url) = &self.ai.base_url {
            validation::validate_base_url("ai.base_url", base_url)?;
        }
        validation::validate_range("ai.timeout_seconds", self.ai.timeout_seconds, 1, 300)?;
        validation::validate_label("ai.theme", &self.ai.theme)?;
        validation::validate_lists_path("storage.lists_path", &self.storage.lists_path)?;

        Ok(())
    }

    pub fn spin_settings(&self) -> SpinSettings {
        SpinSettings {
            split: self.split,
            constraints: self.constraints.clone(),
            assign_leaders: self.groups.assign_leaders,
            avatars: self.groups.avatars,
            namer: GroupNamer::new(self.groups.theme)
                .with_custom_names(self.groups.custom_names.clone()),
        }
    }

    /// API key from the file, else from the provider's environment variable.
    pub fn resolve_api_key(&self, provider: AiProvider) -> Option<String> {
        self.ai
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty() && !key.starts_with("${"))
            .or_else(|| std::env::var(provider.api_key_env()).ok())
            .filter(|key| !key.trim().is_empty())
    }

    pub fn build_text_service(&self) -> Result<HttpTextService> {
        let provider = self.ai.provider.unwrap_or_else(AiProvider::from_env);
        let api_key = self.resolve_api_key(provider);
        let api_key = validation::require_api_key(provider.api_key_env(), &api_key)?;

        let mut service = HttpTextService::new(provider, api_key)
            .with_timeout(Duration::from_secs(self.ai.timeout_seconds));
        if let Some(base_url) = &self.ai.base_url {
            service = service.with_base_url(base_url.clone());
        }
        if let Some(model) = &self.ai.model {
            service = service.with_model(model.clone());
        }
        Ok(service)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.ai.cache_ttl_seconds)
    }
}

impl Validate for SpinnerConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::ConstraintKind;
    use crate::domain::ports::Namer;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[split]
mode = "by_group_size"
value = 4

[groups]
assign_leaders = true
avatars = true
theme = "animals"
custom_names = ["Phoenix"]

[[constraints]]
id = "pair"
kind = "together"
names = ["Ana", "Budi"]

[[constraints]]
id = "apart"
kind = "separate"
names = ["Citra", "Dewi"]

[ai]
provider = "openai"
model = "gpt-4o-mini"
cache_ttl_seconds = 60
"#;

        let config = SpinnerConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.split, SplitSpec::ByGroupSize(4));
        assert!(config.groups.assign_leaders);
        assert_eq!(config.groups.theme, GroupTheme::Animals);
        assert_eq!(config.constraints.len(), 2);
        assert_eq!(config.constraints[1].kind, ConstraintKind::Separate);
        assert_eq!(config.ai.provider, Some(AiProvider::OpenAi));
        assert_eq!(config.ai.timeout_seconds, DEFAULT_TIMEOUT_SECONDS);
        assert_eq!(config.storage.lists_path, DEFAULT_LISTS_PATH);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = SpinnerConfig::from_toml_str("").unwrap();
        assert_eq!(config.split, SplitSpec::ByGroupCount(3));
        assert!(config.constraints.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("GROUP_SPINNER_TEST_KEY", "secret-123");

        let toml_content = r#"
[ai]
provider = "gemini"
api_key = "${GROUP_SPINNER_TEST_KEY}"
"#;

        let config = SpinnerConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.ai.api_key.as_deref(), Some("secret-123"));
        assert_eq!(
            config.resolve_api_key(AiProvider::Gemini).as_deref(),
            Some("secret-123")
        );

        std::env::remove_var("GROUP_SPINNER_TEST_KEY");
    }

    #[test]
    fn test_zero_split_fails_validation() {
        let toml_content = r#"
[split]
mode = "by_group_count"
value = 0
"#;
        let config = SpinnerConfig::from_toml_str(toml_content).unwrap();
        assert!(matches!(
            config.validate(),
            Err(SpinnerError::InvalidConfigValueError { .. })
        ));
    }

    #[test]
    fn test_bad_base_url_fails_validation() {
        let toml_content = r#"
[ai]
base_url = "not a url"
"#;
        let config = SpinnerConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_lists_path_must_be_json() {
        let config = SpinnerConfig::from_toml_str("[storage]\nlists_path = \"lists.txt\"\n").unwrap();
        assert!(matches!(
            config.validate(),
            Err(SpinnerError::InvalidConfigValueError { ref field, .. }) if field == "storage.lists_path"
        ));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[split]\nmode = \"by_group_count\"\nvalue = 2\n")
            .unwrap();

        let config = SpinnerConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.split, SplitSpec::ByGroupCount(2));
    }

    #[test]
    fn test_spin_settings_carry_theme_and_names() {
        let mut config = SpinnerConfig::default();
        config.groups.theme = GroupTheme::Space;
        config.groups.custom_names = vec!["Orion".to_string()];
        let settings = config.spin_settings();
        assert_eq!(settings.namer.name(0), "Orion");
        assert_eq!(settings.namer.name(1), "Venus");
    }
}
