use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConstraintKind {
    Together,
    Separate,
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstraintKind::Together => write!(f, "together"),
            ConstraintKind::Separate => write!(f, "separate"),
        }
    }
}

/// A grouping rule over participant names, matched by exact string equality.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constraint {
    pub id: String,
    pub kind: ConstraintKind,
    pub names: Vec<String>,
}

impl Constraint {
    pub fn together<S: Into<String>>(id: impl Into<String>, names: impl IntoIterator<Item = S>) -> Self {
        Self {
            id: id.into(),
            kind: ConstraintKind::Together,
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn separate<S: Into<String>>(id: impl Into<String>, names: impl IntoIterator<Item = S>) -> Self {
        Self {
            id: id.into(),
            kind: ConstraintKind::Separate,
            names: names.into_iter().map(Into::into).collect(),
        }
    }
}

/// How the shuffled participants are cut into groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "value", rename_all = "snake_case")]
pub enum SplitSpec {
    ByGroupCount(usize),
    ByGroupSize(usize),
}

impl SplitSpec {
    pub fn value(&self) -> usize {
        match self {
            SplitSpec::ByGroupCount(v) | SplitSpec::ByGroupSize(v) => *v,
        }
    }

    pub fn mode_label(&self) -> &'static str {
        match self {
            SplitSpec::ByGroupCount(_) => "group count",
            SplitSpec::ByGroupSize(_) => "group size",
        }
    }

    /// Number of groups a run over `participants` names produces when no
    /// Together constraint shrinks the unit count.
    pub fn expected_group_count(&self, participants: usize) -> usize {
        match *self {
            SplitSpec::ByGroupCount(k) => k.min(participants),
            SplitSpec::ByGroupSize(0) => 0,
            SplitSpec::ByGroupSize(s) => participants.div_ceil(s),
        }
    }
}

impl Default for SplitSpec {
    fn default() -> Self {
        SplitSpec::ByGroupCount(3)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: String,
    pub name: String,
    pub members: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leader: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl Group {
    pub fn new(index: usize, members: Vec<String>) -> Self {
        Self {
            id: format!("group-{}", index),
            name: String::new(),
            members,
            leader: None,
            avatar: None,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.members.iter().any(|m| m == name)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

// 與剪貼簿文字格式相同
impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.avatar {
            Some(avatar) => writeln!(f, "{} {}", self.name, avatar)?,
            None => writeln!(f, "{}", self.name)?,
        }
        if let Some(leader) = &self.leader {
            writeln!(f, "Leader: {}", leader)?;
        }
        write!(f, "{}", self.members.join("\n"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedList {
    pub id: String,
    pub name: String,
    pub names: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl SavedList {
    /// The id is the creation time in milliseconds plus a random suffix, so
    /// lists created within the same millisecond do not replace each other.
    pub fn new(name: impl Into<String>, names: Vec<String>) -> Self {
        let created_at = Utc::now();
        Self {
            id: format!("{}-{:08x}", created_at.timestamp_millis(), rand::random::<u32>()),
            name: name.into(),
            names,
            created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Icebreaker {
    pub group_index: usize,
    pub question: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceSuggestion {
    #[serde(default)]
    pub suggestion: String,
    pub groups: Vec<Vec<String>>,
}
