use crate::domain::model::{Constraint, ConstraintKind};

pub const COMPOSITE_SEPARATOR: &str = " + ";

/// Splits pasted text into names, one per line, trimmed, blanks dropped.
pub fn clean_names(input: &str) -> Vec<String> {
    input
        .lines()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn normalize_names<S: AsRef<str>>(names: &[S]) -> Vec<String> {
    names
        .iter()
        .map(|name| name.as_ref().trim())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parses a comma-separated constraint entry such as `"Ana, Budi"`.
pub fn parse_name_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// The atom moved by shuffle and split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Unit {
    Single(String),
    Composite(Vec<String>),
}

impl Unit {
    pub fn members(&self) -> &[String] {
        match self {
            Unit::Single(name) => std::slice::from_ref(name),
            Unit::Composite(names) => names,
        }
    }

    pub fn into_members(self) -> Vec<String> {
        match self {
            Unit::Single(name) => vec![name],
            Unit::Composite(names) => names,
        }
    }

    pub fn label(&self) -> String {
        self.members().join(COMPOSITE_SEPARATOR)
    }

    pub fn len(&self) -> usize {
        self.members().len()
    }

    pub fn is_empty(&self) -> bool {
        self.members().is_empty()
    }
}

/// Merges Together constraints that share a name. Each cluster keeps the
/// first-seen order of its names, and clusters keep the order of the first
/// constraint that created them.
pub fn together_clusters(constraints: &[Constraint]) -> Vec<Vec<String>> {
    let mut clusters: Vec<Vec<String>> = Vec::new();

    for constraint in constraints
        .iter()
        .filter(|c| c.kind == ConstraintKind::Together)
    {
        let mut names: Vec<String> = Vec::new();
        for name in &constraint.names {
            if !names.contains(name) {
                names.push(name.clone());
            }
        }

        let overlapping: Vec<usize> = clusters
            .iter()
            .enumerate()
            .filter(|(_, cluster)| cluster.iter().any(|n| names.contains(n)))
            .map(|(i, _)| i)
            .collect();

        let Some(&target) = overlapping.first() else {
            clusters.push(names);
            continue;
        };

        for name in names {
            if !clusters[target].contains(&name) {
                clusters[target].push(name);
            }
        }
        // 由後往前移除, 索引才不會位移
        for &other in overlapping.iter().skip(1).rev() {
            let absorbed = clusters.remove(other);
            for name in absorbed {
                if !clusters[target].contains(&name) {
                    clusters[target].push(name);
                }
            }
        }
    }

    clusters
}

/// Folds Together constraints into composite units. Singles keep input order
/// and composites follow them. A name that appears several times in the
/// input is claimed once per cluster, first occurrence first.
pub fn fold_together(names: &[String], constraints: &[Constraint]) -> Vec<Unit> {
    let mut remaining: Vec<Option<&String>> = names.iter().map(Some).collect();
    let mut composites = Vec::new();

    for cluster in together_clusters(constraints) {
        let positions: Vec<usize> = cluster
            .iter()
            .filter_map(|wanted| {
                remaining
                    .iter()
                    .position(|slot| slot.is_some_and(|name| name == wanted))
            })
            .collect();

        if positions.len() < 2 {
            tracing::debug!(
                "Together cluster [{}] has fewer than two present names, skipping",
                cluster.join(", ")
            );
            continue;
        }

        let members = positions
            .into_iter()
            .filter_map(|i| remaining[i].take().cloned())
            .collect();
        composites.push(Unit::Composite(members));
    }

    remaining
        .into_iter()
        .flatten()
        .cloned()
        .map(Unit::Single)
        .chain(composites)
        .collect()
}
