use crate::domain::ports::Namer;
use serde::{Deserialize, Serialize};

pub const GROUP_AVATARS: [&str; 10] = ["🦁", "🦅", "🐺", "🦊", "🐻", "🦌", "🐯", "🦄", "🐉", "🦅"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum GroupTheme {
    #[default]
    Default,
    Colors,
    Animals,
    Elements,
    Space,
}

impl GroupTheme {
    pub fn names(&self) -> &'static [&'static str] {
        match self {
            GroupTheme::Default => &[],
            GroupTheme::Colors => &[
                "Red Team",
                "Blue Team",
                "Green Team",
                "Yellow Team",
                "Purple Team",
                "Orange Team",
            ],
            GroupTheme::Animals => &["Lions", "Eagles", "Wolves", "Foxes", "Bears", "Deer"],
            GroupTheme::Elements => &["Fire", "Water", "Earth", "Air", "Lightning", "Ice"],
            GroupTheme::Space => &["Mars", "Venus", "Jupiter", "Saturn", "Neptune", "Mercury"],
        }
    }
}

pub fn default_group_name(index: usize) -> String {
    format!("Group {}", index + 1)
}

/// Custom names first, then the theme list (cycled), then `Group N`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupNamer {
    custom_names: Vec<String>,
    theme: GroupTheme,
}

impl GroupNamer {
    pub fn new(theme: GroupTheme) -> Self {
        Self {
            custom_names: Vec::new(),
            theme,
        }
    }

    pub fn with_custom_names(mut self, names: Vec<String>) -> Self {
        self.custom_names = names;
        self
    }

    pub fn set_custom_names(&mut self, names: Vec<String>) {
        self.custom_names = names;
    }

    pub fn theme(&self) -> GroupTheme {
        self.theme
    }
}

impl Namer for GroupNamer {
    fn name(&self, index: usize) -> String {
        if let Some(custom) = self.custom_names.get(index) {
            if !custom.trim().is_empty() {
                return custom.clone();
            }
        }

        let themed = self.theme.names();
        if !themed.is_empty() {
            return themed[index % themed.len()].to_string();
        }

        default_group_name(index)
    }
}
