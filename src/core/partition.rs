//! Constrained random partitioning of a roster into groups.
//!
//! A run folds Together constraints into composite units, shuffles the units,
//! cuts them into groups, then makes one repair pass over Separate
//! constraints. The repair pass is a heuristic: it moves a co-located member
//! to `(source + offset) % group_count` without re-checking the target, so a
//! move can break another constraint. Callers that care use
//! [`find_violations`](crate::core::constraints::find_violations) on the result.

use crate::core::roster::{fold_together, Unit};
use crate::core::shuffle::shuffle;
use crate::domain::model::{Constraint, ConstraintKind, Group, SplitSpec};
use crate::domain::ports::{Namer, RandomSource};
use crate::utils::error::{Result, SpinnerError};
use crate::utils::validation::Validate;

impl Validate for SplitSpec {
    fn validate(&self) -> Result<()> {
        if self.value() < 1 {
            return Err(SpinnerError::InvalidSplitError {
                mode: self.mode_label().to_string(),
                value: self.value(),
            });
        }
        Ok(())
    }
}

pub struct PartitionOptions<'a> {
    pub assign_leaders: bool,
    pub namer: &'a dyn Namer,
    /// Decorative tags, cycled by group index. Empty disables avatars.
    pub avatars: &'a [&'a str],
}

impl<'a> PartitionOptions<'a> {
    pub fn new(namer: &'a dyn Namer) -> Self {
        Self {
            assign_leaders: false,
            namer,
            avatars: &[],
        }
    }

    pub fn with_leaders(mut self, assign_leaders: bool) -> Self {
        self.assign_leaders = assign_leaders;
        self
    }

    pub fn with_avatars(mut self, avatars: &'a [&'a str]) -> Self {
        self.avatars = avatars;
        self
    }
}

/// A member moved by the separation repair pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relocation {
    pub constraint_id: String,
    pub name: String,
    pub from: usize,
    pub to: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    pub groups: Vec<Group>,
    pub relocations: Vec<Relocation>,
}

pub fn partition<R: RandomSource + ?Sized>(
    names: &[String],
    split: SplitSpec,
    constraints: &[Constraint],
    options: &PartitionOptions<'_>,
    rng: &mut R,
) -> Result<Vec<Group>> {
    partition_detailed(names, split, constraints, options, rng).map(|p| p.groups)
}

pub fn partition_detailed<R: RandomSource + ?Sized>(
    names: &[String],
    split: SplitSpec,
    constraints: &[Constraint],
    options: &PartitionOptions<'_>,
    rng: &mut R,
) -> Result<Partition> {
    if names.is_empty() {
        return Err(SpinnerError::NoParticipantsError);
    }
    split.validate()?;

    let mut units = fold_together(names, constraints);
    shuffle(&mut units, rng);

    let mut groups: Vec<Group> = split_units(units, split)
        .into_iter()
        .enumerate()
        .map(|(index, members)| Group::new(index, members))
        .collect();

    let relocations = repair_separations(&mut groups, constraints);
    finish_groups(&mut groups, options, rng);

    Ok(Partition {
        groups,
        relocations,
    })
}

/// Cuts units into member lists. `ByGroupCount(k)` yields `min(k, units)`
/// lists whose unit counts differ by at most one, larger lists first.
/// `ByGroupSize(s)` yields consecutive chunks of `s` units. A zero split
/// value yields nothing.
pub fn split_units(units: Vec<Unit>, split: SplitSpec) -> Vec<Vec<String>> {
    let total = units.len();
    let mut iter = units.into_iter();

    match split {
        SplitSpec::ByGroupCount(requested) => {
            let count = requested.min(total);
            if count == 0 {
                return Vec::new();
            }
            let base = total / count;
            let extra = total % count;
            (0..count)
                .map(|i| {
                    let take = base + usize::from(i < extra);
                    iter.by_ref().take(take).flat_map(Unit::into_members).collect()
                })
                .collect()
        }
        SplitSpec::ByGroupSize(0) => Vec::new(),
        SplitSpec::ByGroupSize(size) => {
            let mut lists = Vec::with_capacity(total.div_ceil(size));
            let mut iter = iter.peekable();
            while iter.peek().is_some() {
                lists.push(iter.by_ref().take(size).flat_map(Unit::into_members).collect());
            }
            lists
        }
    }
}

/// Single best-effort pass over Separate constraints. Names are matched by
/// first occurrence and the first located name stays. The offset of a moved
/// name is its position in the constraint's list, so absent or repeated
/// names still count toward later offsets.
pub fn repair_separations(groups: &mut [Group], constraints: &[Constraint]) -> Vec<Relocation> {
    let mut relocations = Vec::new();
    let group_count = groups.len();
    if group_count < 2 {
        return relocations;
    }

    for constraint in constraints
        .iter()
        .filter(|c| c.kind == ConstraintKind::Separate)
    {
        // (name, position in the constraint list, group index)
        let mut located: Vec<(&str, usize, usize)> = Vec::new();
        for (offset, name) in constraint.names.iter().enumerate() {
            if located.iter().any(|(seen, _, _)| *seen == name.as_str()) {
                continue;
            }
            if let Some(index) = groups.iter().position(|g| g.contains(name)) {
                located.push((name.as_str(), offset, index));
            }
        }

        let Some(&(_, _, source)) = located.first() else {
            continue;
        };

        for &(name, offset, current) in located.iter().skip(1) {
            if current != source {
                continue;
            }
            let target = (source + offset) % group_count;
            if target == source {
                continue;
            }
            move_member(groups, name, source, target);
            relocations.push(Relocation {
                constraint_id: constraint.id.clone(),
                name: name.to_string(),
                from: source,
                to: target,
            });
        }
    }

    relocations
}

fn move_member(groups: &mut [Group], name: &str, from: usize, to: usize) {
    let source = &mut groups[from];
    let Some(position) = source.members.iter().position(|m| m == name) else {
        return;
    };
    let member = source.members.remove(position);
    if source.leader.as_deref() == Some(name) {
        source.leader = None;
    }
    groups[to].members.push(member);
}

/// Builds named groups from raw member lists, skipping empty lists.
pub fn assemble_groups<R: RandomSource + ?Sized>(
    member_lists: Vec<Vec<String>>,
    options: &PartitionOptions<'_>,
    rng: &mut R,
) -> Vec<Group> {
    let mut groups: Vec<Group> = member_lists
        .into_iter()
        .filter(|members| !members.is_empty())
        .enumerate()
        .map(|(index, members)| Group::new(index, members))
        .collect();
    finish_groups(&mut groups, options, rng);
    groups
}

fn finish_groups<R: RandomSource + ?Sized>(
    groups: &mut [Group],
    options: &PartitionOptions<'_>,
    rng: &mut R,
) {
    for (index, group) in groups.iter_mut().enumerate() {
        if options.assign_leaders && !group.members.is_empty() {
            let pick = rng.pick_index(group.members.len());
            group.leader = Some(group.members[pick].clone());
        }
        group.name = options.namer.name(index);
        if !options.avatars.is_empty() {
            group.avatar = Some(options.avatars[index % options.avatars.len()].to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::naming::{GroupNamer, GROUP_AVATARS};
    use crate::core::shuffle::{seeded, FixedSequence};

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn units(list: &[&str]) -> Vec<Unit> {
        list.iter().map(|s| Unit::Single(s.to_string())).collect()
    }

    #[test]
    fn test_split_by_count_balances_sizes() {
        let lists = split_units(units(&["A", "B", "C", "D", "E"]), SplitSpec::ByGroupCount(4));
        let sizes: Vec<usize> = lists.iter().map(Vec::len).collect();
        assert_eq!(sizes, vec![2, 1, 1, 1]);
    }

    #[test]
    fn test_split_by_count_more_groups_than_units() {
        let lists = split_units(units(&["A", "B"]), SplitSpec::ByGroupCount(5));
        assert_eq!(lists, vec![names(&["A"]), names(&["B"])]);
    }

    #[test]
    fn test_split_by_size_last_chunk_shorter() {
        let lists = split_units(units(&["A", "B", "C", "D", "E"]), SplitSpec::ByGroupSize(2));
        assert_eq!(lists, vec![names(&["A", "B"]), names(&["C", "D"]), names(&["E"])]);
    }

    #[test]
    fn test_split_expands_composites_in_order() {
        let mut input = units(&["C"]);
        input.push(Unit::Composite(names(&["B", "A"])));
        let lists = split_units(input, SplitSpec::ByGroupSize(1));
        assert_eq!(lists, vec![names(&["C"]), names(&["B", "A"])]);
    }

    #[test]
    fn test_zero_split_is_rejected() {
        let namer = GroupNamer::default();
        let options = PartitionOptions::new(&namer);
        let result = partition(
            &names(&["A"]),
            SplitSpec::ByGroupSize(0),
            &[],
            &options,
            &mut seeded(1),
        );
        assert!(matches!(result, Err(SpinnerError::InvalidSplitError { value: 0, .. })));
    }

    #[test]
    fn test_empty_roster_is_rejected() {
        let namer = GroupNamer::default();
        let options = PartitionOptions::new(&namer);
        let result = partition(&[], SplitSpec::ByGroupCount(2), &[], &options, &mut seeded(1));
        assert!(matches!(result, Err(SpinnerError::NoParticipantsError)));
    }

    #[test]
    fn test_repair_moves_by_offset() {
        let mut groups = vec![
            Group::new(0, names(&["A", "B", "C"])),
            Group::new(1, names(&["D"])),
            Group::new(2, names(&["E"])),
        ];
        groups[0].leader = Some("C".to_string());

        let moves = repair_separations(&mut groups, &[Constraint::separate("s", ["A", "B", "C"])]);

        assert_eq!(moves.len(), 2);
        assert_eq!(groups[0].members, names(&["A"]));
        assert_eq!(groups[1].members, names(&["D", "B"]));
        assert_eq!(groups[2].members, names(&["E", "C"]));
        assert_eq!(groups[0].leader, None);
    }

    #[test]
    fn test_repair_skips_when_offset_wraps_to_source() {
        // 兩組時第三個名字的目標 (0 + 2) % 2 == 0, 不移動
        let mut groups = vec![
            Group::new(0, names(&["A", "B", "C"])),
            Group::new(1, names(&["D"])),
        ];
        let moves = repair_separations(&mut groups, &[Constraint::separate("s", ["A", "B", "C"])]);
        assert_eq!(moves.len(), 1);
        assert_eq!(groups[0].members, names(&["A", "C"]));
        assert_eq!(groups[1].members, names(&["D", "B"]));
    }

    #[test]
    fn test_repair_offset_counts_absent_and_repeated_names() {
        let mut groups = vec![
            Group::new(0, names(&["A", "B"])),
            Group::new(1, names(&["C", "D"])),
            Group::new(2, names(&["E", "F"])),
        ];
        let moves = repair_separations(&mut groups, &[Constraint::separate("s", ["A", "Ghost", "B"])]);
        assert_eq!(moves.len(), 1);
        assert_eq!(moves[0].to, 2);
        assert_eq!(groups[2].members, names(&["E", "F", "B"]));

        let mut groups = vec![
            Group::new(0, names(&["A", "B"])),
            Group::new(1, names(&["C"])),
            Group::new(2, names(&["D"])),
        ];
        let moves = repair_separations(&mut groups, &[Constraint::separate("s", ["A", "A", "B"])]);
        assert_eq!(moves[0].to, 2);
        assert_eq!(groups[0].members, names(&["A"]));
    }

    #[test]
    fn test_repair_leaves_separated_members() {
        let mut groups = vec![Group::new(0, names(&["A"])), Group::new(1, names(&["B"]))];
        let moves = repair_separations(&mut groups, &[Constraint::separate("s", ["A", "B"])]);
        assert!(moves.is_empty());
    }

    #[test]
    fn test_repair_single_group_is_noop() {
        let mut groups = vec![Group::new(0, names(&["A", "B"]))];
        let moves = repair_separations(&mut groups, &[Constraint::separate("s", ["A", "B"])]);
        assert!(moves.is_empty());
        assert_eq!(groups[0].members, names(&["A", "B"]));
    }

    #[test]
    fn test_leaders_and_avatars() {
        let namer = GroupNamer::default();
        let options = PartitionOptions::new(&namer)
            .with_leaders(true)
            .with_avatars(&GROUP_AVATARS);
        let groups = partition(
            &names(&["A", "B", "C", "D", "E", "F"]),
            SplitSpec::ByGroupSize(2),
            &[],
            &options,
            &mut seeded(3),
        )
        .unwrap();

        for (i, group) in groups.iter().enumerate() {
            let leader = group.leader.as_ref().unwrap();
            assert!(group.contains(leader));
            assert_eq!(group.avatar.as_deref(), Some(GROUP_AVATARS[i]));
            assert_eq!(group.id, format!("group-{}", i));
        }
    }

    #[test]
    fn test_assemble_groups_drops_empty_lists() {
        let namer = GroupNamer::default();
        let options = PartitionOptions::new(&namer);
        let groups = assemble_groups(
            vec![names(&["A"]), vec![], names(&["B", "C"])],
            &options,
            &mut FixedSequence::constant(0.5),
        );
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[1].name, "Group 2");
        assert_eq!(groups[1].id, "group-1");
    }
}
