use crate::core::constraints::{find_violations, unknown_names, validate_constraints, Violation};
use crate::core::naming::{GroupNamer, GROUP_AVATARS};
use crate::core::partition::{assemble_groups, partition_detailed, PartitionOptions, Relocation};
use crate::core::roster::clean_names;
use crate::domain::model::{BalanceSuggestion, Constraint, Group, SplitSpec};
use crate::domain::ports::RandomSource;
use crate::utils::error::{Result, SpinnerError};
use crate::utils::validation::Validate;

#[derive(Debug, Clone, Default)]
pub struct SpinSettings {
    pub split: SplitSpec,
    pub constraints: Vec<Constraint>,
    pub assign_leaders: bool,
    pub avatars: bool,
    pub namer: GroupNamer,
}

impl Validate for SpinSettings {
    fn validate(&self) -> Result<()> {
        self.split.validate()?;
        validate_constraints(&self.constraints)
    }
}

#[derive(Debug, Clone)]
pub struct SpinOutcome {
    pub groups: Vec<Group>,
    pub relocations: Vec<Relocation>,
    /// Constraints still unsatisfied after the repair pass.
    pub violations: Vec<Violation>,
}

/// Runs spins with one random source and one set of settings.
pub struct GroupSpinner<R: RandomSource> {
    settings: SpinSettings,
    rng: R,
}

impl<R: RandomSource> GroupSpinner<R> {
    pub fn new(settings: SpinSettings, rng: R) -> Self {
        Self { settings, rng }
    }

    pub fn settings(&self) -> &SpinSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut SpinSettings {
        &mut self.settings
    }

    fn avatars(&self) -> &'static [&'static str] {
        if self.settings.avatars {
            &GROUP_AVATARS
        } else {
            &[]
        }
    }

    pub fn spin_text(&mut self, raw: &str) -> Result<SpinOutcome> {
        let names = clean_names(raw);
        self.spin(&names)
    }

    pub fn spin(&mut self, names: &[String]) -> Result<SpinOutcome> {
        if names.is_empty() {
            return Err(SpinnerError::NoParticipantsError);
        }
        self.settings.validate()?;

        tracing::info!(
            "Spinning {} names by {} {} with {} constraints",
            names.len(),
            self.settings.split.mode_label(),
            self.settings.split.value(),
            self.settings.constraints.len()
        );

        let unknown = unknown_names(&self.settings.constraints, names);
        if !unknown.is_empty() {
            tracing::debug!("Constraints reference unknown names: {}", unknown.join(", "));
        }

        let avatars = self.avatars();
        let options = PartitionOptions::new(&self.settings.namer)
            .with_leaders(self.settings.assign_leaders)
            .with_avatars(avatars);
        let partition = partition_detailed(
            names,
            self.settings.split,
            &self.settings.constraints,
            &options,
            &mut self.rng,
        )?;

        for relocation in &partition.relocations {
            tracing::debug!(
                "Moved '{}' from group {} to group {} (constraint {})",
                relocation.name,
                relocation.from + 1,
                relocation.to + 1,
                relocation.constraint_id
            );
        }

        let violations = find_violations(&partition.groups, &self.settings.constraints);
        for violation in &violations {
            tracing::warn!(
                "Constraint {} ({}) not satisfied for: {}",
                violation.constraint_id,
                violation.kind,
                violation.names.join(", ")
            );
        }

        tracing::info!("Created {} groups", partition.groups.len());

        Ok(SpinOutcome {
            groups: partition.groups,
            relocations: partition.relocations,
            violations,
        })
    }

    /// Rebuilds groups from an AI balance suggestion. The suggestion must
    /// contain every roster name exactly as often as the roster does.
    pub fn rebalance(&mut self, roster: &[String], suggestion: BalanceSuggestion) -> Result<Vec<Group>> {
        let mut expected: Vec<&String> = roster.iter().collect();
        let mut proposed: Vec<&String> = suggestion.groups.iter().flatten().collect();
        expected.sort();
        proposed.sort();
        if expected != proposed {
            return Err(SpinnerError::AiResponseError {
                message: "balanced groups do not match the participant list".to_string(),
            });
        }

        if !suggestion.suggestion.is_empty() {
            tracing::info!("Balance suggestion: {}", suggestion.suggestion);
        }

        let avatars = self.avatars();
        let options = PartitionOptions::new(&self.settings.namer)
            .with_leaders(self.settings.assign_leaders)
            .with_avatars(avatars);
        let groups = assemble_groups(suggestion.groups, &options, &mut self.rng);

        for violation in find_violations(&groups, &self.settings.constraints) {
            tracing::warn!(
                "Balanced groups break constraint {} for: {}",
                violation.constraint_id,
                violation.names.join(", ")
            );
        }

        Ok(groups)
    }
}
