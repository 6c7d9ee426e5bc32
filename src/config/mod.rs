pub mod toml_config;

pub use toml_config::SpinnerConfig;

#[cfg(feature = "cli")]
use crate::adapters::ai::provider::AiProvider;
#[cfg(feature = "cli")]
use crate::core::naming::GroupTheme;
#[cfg(feature = "cli")]
use crate::core::roster::{clean_names, normalize_names, parse_name_list};
#[cfg(feature = "cli")]
use crate::domain::model::{Constraint, SplitSpec};
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "group-spinner")]
#[command(about = "Randomly split a list of names into groups")]
pub struct CliConfig {
    /// File with one name per line
    #[arg(short, long)]
    pub input: Option<String>,

    /// Comma-separated names, added after the input file
    #[arg(long, value_delimiter = ',')]
    pub names: Vec<String>,

    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Number of groups to create
    #[arg(short, long, conflicts_with = "size")]
    pub groups: Option<usize>,

    /// Number of people per group
    #[arg(short, long)]
    pub size: Option<usize>,

    /// Names that must share a group, e.g. "Ana,Budi" (repeatable)
    #[arg(long)]
    pub together: Vec<String>,

    /// Names that must be in different groups, e.g. "Ana,Budi" (repeatable)
    #[arg(long)]
    pub separate: Vec<String>,

    /// Pick a random leader for every group
    #[arg(long)]
    pub leaders: bool,

    /// Decorate groups with avatars
    #[arg(long)]
    pub avatars: bool,

    /// Naming theme for groups
    #[arg(long, value_enum)]
    pub theme: Option<GroupTheme>,

    /// Seed for a reproducible shuffle
    #[arg(long)]
    pub seed: Option<u64>,

    /// Ask the AI provider for creative team names
    #[arg(long)]
    pub team_names: bool,

    /// Ask the AI provider for one icebreaker question per group
    #[arg(long)]
    pub icebreakers: bool,

    /// Ask the AI provider to rebalance the groups
    #[arg(long)]
    pub balance: bool,

    /// AI provider (defaults to AI_PROVIDER or gemini)
    #[arg(long, value_enum)]
    pub provider: Option<AiProvider>,

    /// Theme for AI team names
    #[arg(long)]
    pub ai_theme: Option<String>,

    /// Extra context for AI prompts
    #[arg(long)]
    pub context: Option<String>,

    /// JSON file holding saved name lists
    #[arg(long)]
    pub lists_path: Option<String>,

    /// Save the names under this list name
    #[arg(long)]
    pub save_list: Option<String>,

    /// Use the names of a saved list (by id)
    #[arg(long)]
    pub load_list: Option<String>,

    /// Print saved lists and exit
    #[arg(long)]
    pub list_saved: bool,

    /// Delete a saved list (by id) and exit
    #[arg(long)]
    pub delete_list: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Names from `--input` then `--names`, cleaned.
    pub fn read_names(&self) -> Result<Vec<String>> {
        let mut names = match &self.input {
            Some(path) => clean_names(&std::fs::read_to_string(path)?),
            None => Vec::new(),
        };
        names.extend(normalize_names(&self.names));
        Ok(names)
    }

    pub fn constraints(&self) -> Vec<Constraint> {
        let together = self
            .together
            .iter()
            .enumerate()
            .map(|(i, entry)| Constraint::together(format!("cli-together-{}", i + 1), parse_name_list(entry)));
        let separate = self
            .separate
            .iter()
            .enumerate()
            .map(|(i, entry)| Constraint::separate(format!("cli-separate-{}", i + 1), parse_name_list(entry)));
        together.chain(separate).collect()
    }

    pub fn split(&self) -> Option<SplitSpec> {
        match (self.groups, self.size) {
            (Some(count), _) => Some(SplitSpec::ByGroupCount(count)),
            (None, Some(size)) => Some(SplitSpec::ByGroupSize(size)),
            (None, None) => None,
        }
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(groups) = self.groups {
            validation::validate_split_value("groups", groups)?;
        }
        if let Some(size) = self.size {
            validation::validate_split_value("size", size)?;
        }
        if let Some(path) = &self.input {
            validation::validate_roster_file("input", path)?;
        }
        if let Some(name) = &self.save_list {
            validation::validate_label("save_list", name)?;
        }
        crate::core::constraints::validate_constraints(&self.constraints())
    }
}

#[cfg(feature = "cli")]
impl SpinnerConfig {
    /// 命令列參數覆蓋 TOML 設定
    pub fn apply_cli(&mut self, cli: &CliConfig) {
        if let Some(split) = cli.split() {
            self.split = split;
        }
        self.constraints.extend(cli.constraints());
        if cli.leaders {
            self.groups.assign_leaders = true;
        }
        if cli.avatars {
            self.groups.avatars = true;
        }
        if let Some(theme) = cli.theme {
            self.groups.theme = theme;
        }
        if let Some(provider) = cli.provider {
            self.ai.provider = Some(provider);
        }
        if let Some(theme) = &cli.ai_theme {
            self.ai.theme = theme.clone();
        }
        if let Some(context) = &cli.context {
            self.ai.context = Some(context.clone());
        }
        if let Some(path) = &cli.lists_path {
            self.storage.lists_path = path.clone();
        }
    }
}
