use group_spinner::core::constraints::find_violations;
use group_spinner::core::shuffle::{seeded, FixedSequence};
use group_spinner::{partition, Constraint, Group, GroupNamer, PartitionOptions, SplitSpec};

fn roster(n: usize) -> Vec<String> {
    (1..=n).map(|i| format!("P{}", i)).collect()
}

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn sorted_members(groups: &[Group]) -> Vec<String> {
    let mut all: Vec<String> = groups.iter().flat_map(|g| g.members.clone()).collect();
    all.sort();
    all
}

fn group_of(groups: &[Group], name: &str) -> usize {
    groups.iter().position(|g| g.contains(name)).unwrap()
}

#[test]
fn test_every_name_lands_in_exactly_one_group() {
    let namer = GroupNamer::default();
    let options = PartitionOptions::new(&namer);
    let constraints = vec![
        Constraint::together("t1", ["P1", "P2", "P3"]),
        Constraint::separate("s1", ["P4", "P5", "P6"]),
        Constraint::together("t2", ["P3", "P9"]),
        Constraint::separate("s2", ["P1", "Nobody"]),
    ];

    for seed in 0..50 {
        for split in [SplitSpec::ByGroupCount(3), SplitSpec::ByGroupSize(2)] {
            let input = roster(11);
            let groups = partition(&input, split, &constraints, &options, &mut seeded(seed)).unwrap();

            let mut expected = input.clone();
            expected.sort();
            assert_eq!(sorted_members(&groups), expected, "seed {}", seed);
            assert!(groups.iter().all(|g| !g.members.is_empty()));
        }
    }
}

#[test]
fn test_duplicate_names_are_kept() {
    let namer = GroupNamer::default();
    let options = PartitionOptions::new(&namer);
    let input = names(&["Alex", "Alex", "Bo", "Cy"]);
    let constraints = vec![
        Constraint::together("t", ["Alex", "Bo"]),
        Constraint::separate("s", ["Alex", "Cy"]),
    ];

    for seed in 0..20 {
        let groups = partition(&input, SplitSpec::ByGroupCount(2), &constraints, &options, &mut seeded(seed)).unwrap();
        let mut expected = input.clone();
        expected.sort();
        assert_eq!(sorted_members(&groups), expected);
    }
}

#[test]
fn test_group_count_mode_bounds() {
    let namer = GroupNamer::default();
    let options = PartitionOptions::new(&namer);

    for n in 1..=12 {
        for k in 1..=6 {
            let groups = partition(&roster(n), SplitSpec::ByGroupCount(k), &[], &options, &mut seeded((n * 10 + k) as u64)).unwrap();

            assert_eq!(groups.len(), k.min(n), "n={} k={}", n, k);
            let largest = groups.iter().map(Group::len).max().unwrap();
            let smallest = groups.iter().map(Group::len).min().unwrap();
            assert!(largest - smallest <= 1, "n={} k={}", n, k);
            assert_eq!(groups[0].len(), n.div_ceil(k.min(n)));
        }
    }
}

#[test]
fn test_group_size_mode_bounds() {
    let namer = GroupNamer::default();
    let options = PartitionOptions::new(&namer);

    for n in 1..=12 {
        for s in 1..=5 {
            let groups = partition(&roster(n), SplitSpec::ByGroupSize(s), &[], &options, &mut seeded(n as u64)).unwrap();

            assert_eq!(groups.len(), n.div_ceil(s), "n={} s={}", n, s);
            let (last, full) = groups.split_last().unwrap();
            assert!(full.iter().all(|g| g.len() == s));
            assert!(last.len() >= 1 && last.len() <= s);
        }
    }
}

#[test]
fn test_leaders_are_members() {
    let namer = GroupNamer::default();
    let options = PartitionOptions::new(&namer).with_leaders(true);
    let constraints = vec![Constraint::separate("s", ["P1", "P2", "P3", "P4"])];

    for seed in 0..30 {
        let groups = partition(&roster(9), SplitSpec::ByGroupCount(3), &constraints, &options, &mut seeded(seed)).unwrap();
        for group in &groups {
            let leader = group.leader.as_ref().expect("leader assigned");
            assert!(group.contains(leader));
        }
    }
}

#[test]
fn test_together_pair_always_shares_a_group() {
    let namer = GroupNamer::default();
    let options = PartitionOptions::new(&namer);
    let constraints = vec![Constraint::together("t", ["P2", "P7"])];

    for seed in 0..40 {
        for split in [SplitSpec::ByGroupCount(4), SplitSpec::ByGroupSize(3)] {
            let groups = partition(&roster(10), split, &constraints, &options, &mut seeded(seed)).unwrap();
            assert_eq!(group_of(&groups, "P2"), group_of(&groups, "P7"));
        }
    }
}

#[test]
fn test_fixed_randomness_is_deterministic() {
    let namer = GroupNamer::default();
    let options = PartitionOptions::new(&namer).with_leaders(true);
    let constraints = vec![
        Constraint::together("t", ["P1", "P5"]),
        Constraint::separate("s", ["P2", "P3"]),
    ];
    let values = vec![0.31, 0.72, 0.05, 0.93, 0.48, 0.66];

    let first = partition(&roster(8), SplitSpec::ByGroupCount(3), &constraints, &options, &mut FixedSequence::new(values.clone())).unwrap();
    let second = partition(&roster(8), SplitSpec::ByGroupCount(3), &constraints, &options, &mut FixedSequence::new(values)).unwrap();
    assert_eq!(first, second);

    let third = partition(&roster(8), SplitSpec::ByGroupSize(3), &constraints, &options, &mut seeded(99)).unwrap();
    let fourth = partition(&roster(8), SplitSpec::ByGroupSize(3), &constraints, &options, &mut seeded(99)).unwrap();
    assert_eq!(third, fourth);
}

#[test]
fn test_five_names_two_groups_sizes() {
    let namer = GroupNamer::default();
    let options = PartitionOptions::new(&namer);

    for seed in 0..10 {
        let groups = partition(&names(&["A", "B", "C", "D", "E"]), SplitSpec::ByGroupCount(2), &[], &options, &mut seeded(seed)).unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].len(), 3);
        assert_eq!(groups[1].len(), 2);
        assert_eq!(groups[0].name, "Group 1");
        assert_eq!(groups[1].name, "Group 2");
    }
}

#[test]
fn test_separated_pair_is_moved_to_next_group() {
    let namer = GroupNamer::default();
    let options = PartitionOptions::new(&namer);
    let constraints = vec![Constraint::separate("s", ["A", "B"])];

    // 0.99 保持原順序, A 和 B 都落在第 0 組
    let groups = partition(
        &names(&["A", "B", "C", "D"]),
        SplitSpec::ByGroupCount(2),
        &constraints,
        &options,
        &mut FixedSequence::constant(0.99),
    )
    .unwrap();

    assert_eq!(groups[0].members, names(&["A"]));
    assert_eq!(groups[1].members, names(&["C", "D", "B"]));
    assert!(find_violations(&groups, &constraints).is_empty());
}

#[test]
fn test_together_pair_keeps_constraint_order_in_single_group() {
    let namer = GroupNamer::default();
    let options = PartitionOptions::new(&namer);
    let constraints = vec![Constraint::together("t", ["A", "B"])];

    for seed in 0..10 {
        let groups = partition(&names(&["A", "B", "C"]), SplitSpec::ByGroupCount(1), &constraints, &options, &mut seeded(seed)).unwrap();
        assert_eq!(groups.len(), 1);
        let members = &groups[0].members;
        assert_eq!(members.len(), 3);
        let a = members.iter().position(|m| m == "A").unwrap();
        assert_eq!(members[a + 1], "B");
    }
}

#[test]
fn test_constraints_with_unknown_names_are_ignored() {
    let namer = GroupNamer::default();
    let options = PartitionOptions::new(&namer);
    let constraints = vec![
        Constraint::together("t", ["Ghost", "Phantom"]),
        Constraint::separate("s", ["Ghost", "A"]),
    ];

    let groups = partition(&names(&["A", "B", "C"]), SplitSpec::ByGroupSize(1), &constraints, &options, &mut seeded(4)).unwrap();
    assert_eq!(groups.len(), 3);
}

#[test]
fn test_inputs_are_not_mutated() {
    let namer = GroupNamer::default();
    let options = PartitionOptions::new(&namer);
    let input = roster(6);
    let constraints = vec![Constraint::together("t", ["P1", "P2"])];
    let input_before = input.clone();
    let constraints_before = constraints.clone();

    partition(&input, SplitSpec::ByGroupCount(2), &constraints, &options, &mut seeded(1)).unwrap();

    assert_eq!(input, input_before);
    assert_eq!(constraints, constraints_before);
}

#[test]
fn test_separate_offset_counts_names_missing_from_roster() {
    let namer = GroupNamer::default();
    let options = PartitionOptions::new(&namer);
    let constraints = vec![Constraint::separate("s", ["A", "Ghost", "B"])];

    // 保持原順序: [A, B], [C, D], [E, F]
    let groups = partition(
        &names(&["A", "B", "C", "D", "E", "F"]),
        SplitSpec::ByGroupCount(3),
        &constraints,
        &options,
        &mut FixedSequence::constant(0.99),
    )
    .unwrap();

    assert_eq!(groups[0].members, names(&["A"]));
    assert_eq!(groups[1].members, names(&["C", "D"]));
    assert_eq!(group_of(&groups, "B"), 2);
}
