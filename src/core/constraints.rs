use crate::domain::model::{Constraint, ConstraintKind, Group};
use crate::utils::error::{Result, SpinnerError};
use crate::utils::validation::Validate;

impl Validate for Constraint {
    fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(SpinnerError::InvalidConstraintError {
                id: self.id.clone(),
                reason: "constraint id cannot be empty".to_string(),
            });
        }
        let named = self.names.iter().filter(|n| !n.trim().is_empty()).count();
        if named < 2 {
            return Err(SpinnerError::InvalidConstraintError {
                id: self.id.clone(),
                reason: format!("needs at least 2 names, got {}", named),
            });
        }
        Ok(())
    }
}

pub fn validate_constraints(constraints: &[Constraint]) -> Result<()> {
    constraints.iter().try_for_each(Validate::validate)
}

/// Names referenced by constraints that are not in the roster.
pub fn unknown_names(constraints: &[Constraint], roster: &[String]) -> Vec<String> {
    let mut unknown: Vec<String> = Vec::new();
    for name in constraints.iter().flat_map(|c| c.names.iter()) {
        if !roster.contains(name) && !unknown.contains(name) {
            unknown.push(name.clone());
        }
    }
    unknown
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub constraint_id: String,
    pub kind: ConstraintKind,
    /// Names involved in the violation.
    pub names: Vec<String>,
}

fn locate(groups: &[Group], name: &str) -> Option<usize> {
    groups.iter().position(|g| g.contains(name))
}

/// Constraints the given groups do not satisfy.
pub fn find_violations(groups: &[Group], constraints: &[Constraint]) -> Vec<Violation> {
    let mut violations = Vec::new();

    for constraint in constraints {
        let located: Vec<(&String, usize)> = constraint
            .names
            .iter()
            .filter_map(|name| locate(groups, name).map(|g| (name, g)))
            .collect();

        let offending: Vec<String> = match constraint.kind {
            ConstraintKind::Together => {
                let Some(&(_, home)) = located.first() else {
                    continue;
                };
                if located.iter().all(|(_, g)| *g == home) {
                    continue;
                }
                located.iter().map(|(name, _)| (*name).clone()).collect()
            }
            ConstraintKind::Separate => located
                .iter()
                .filter(|(name, g)| {
                    located
                        .iter()
                        .any(|(other, og)| other != name && og == g)
                })
                .map(|(name, _)| (*name).clone())
                .collect(),
        };

        if !offending.is_empty() {
            violations.push(Violation {
                constraint_id: constraint.id.clone(),
                kind: constraint.kind,
                names: offending,
            });
        }
    }

    violations
}
