use proptest::prelude::*;
use quickfilter::QuickFilter;
use std::collections::BTreeSet;

// A capacity together with a set of in-range indices of varying density
prop_compose! {
    fn arb_members(max_cap: usize)
        (cap in 0..max_cap, density in 0.0..=1.0f64)
        (bits in prop::collection::vec(prop::bool::weighted(density), cap))
        -> (usize, BTreeSet<usize>)
    {
        (bits.len(), to_set(&bits))
    }
}

// Two member sets sharing one capacity
prop_compose! {
    fn arb_pair(max_cap: usize)
        (cap in 0..max_cap, da in 0.0..=1.0f64, db in 0.0..=1.0f64)
        (a in prop::collection::vec(prop::bool::weighted(da), cap),
         b in prop::collection::vec(prop::bool::weighted(db), cap))
        -> (usize, BTreeSet<usize>, BTreeSet<usize>)
    {
        (a.len(), to_set(&a), to_set(&b))
    }
}

fn to_set(bits: &[bool]) -> BTreeSet<usize> {
    bits.iter()
        .enumerate()
        .filter(|&(_, &bit)| bit)
        .map(|(i, _)| i)
        .collect()
}

fn build(cap: usize, members: &BTreeSet<usize>) -> QuickFilter {
    let mut filter = QuickFilter::new(cap);
    filter.extend(members);
    filter
}

fn assert_matches(filter: &QuickFilter, expected: &BTreeSet<usize>) -> Result<(), TestCaseError> {
    prop_assert_eq!(filter.len(), expected.len());
    prop_assert!(filter.iter().eq(expected.iter().copied()));
    prop_assert_eq!(filter.iter().len(), expected.len());
    if let Some(&last) = filter.as_words().last() {
        let rem = filter.cap() % 64;
        prop_assert!(rem == 0 || last >> rem == 0, "tail bits set in {:#x}", last);
    }
    Ok(())
}

proptest! {
    #[test]
    fn test_iteration_matches_oracle((cap, members) in arb_members(600)) {
        let filter = build(cap, &members);
        assert_matches(&filter, &members)?;
        prop_assert_eq!(filter.first(), members.first().copied());
        for i in 0..cap {
            prop_assert_eq!(filter.has(i), members.contains(&i));
        }
    }

    #[test]
    fn test_from_fn_matches_add((cap, members) in arb_members(600)) {
        let filter = QuickFilter::from_fn(cap, |i| members.contains(&i));
        prop_assert_eq!(&filter, &build(cap, &members));
        assert_matches(&filter, &members)?;
    }

    #[test]
    fn test_delete_matches_oracle(
        (cap, a, b) in arb_pair(400)
    ) {
        let mut filter = build(cap, &a);
        for &i in &b {
            filter.delete(i);
        }
        let expected: BTreeSet<usize> = a.difference(&b).copied().collect();
        assert_matches(&filter, &expected)?;
    }

    #[test]
    fn test_resize_matches_oracle(
        (cap, members) in arb_members(400),
        new_cap in 0usize..500
    ) {
        let mut filter = build(cap, &members);
        filter.resize(new_cap);
        prop_assert_eq!(filter.cap(), new_cap);
        let expected: BTreeSet<usize> = members.range(..new_cap).copied().collect();
        assert_matches(&filter, &expected)?;
    }

    #[test]
    fn test_set_ops_match_oracle((cap, a, b) in arb_pair(400)) {
        let fa = build(cap, &a);
        let fb = build(cap, &b);

        let mut union = QuickFilter::new(0);
        union.union_of(&fa, &fb)?;
        let expected: BTreeSet<usize> = a.union(&b).copied().collect();
        assert_matches(&union, &expected)?;

        let mut intersection = QuickFilter::new(0);
        intersection.intersection_of(&fa, &fb)?;
        let expected: BTreeSet<usize> = a.intersection(&b).copied().collect();
        assert_matches(&intersection, &expected)?;

        // In-place forms agree with the three-operand forms
        let mut aliased = fa.clone();
        aliased.union_with(&fb)?;
        prop_assert_eq!(&aliased, &union);
        let mut aliased = fb.clone();
        aliased.intersection_with(&fa)?;
        prop_assert_eq!(&aliased, &intersection);
    }

    #[test]
    fn test_retain_matches_oracle(
        (cap, members) in arb_members(400),
        modulus in 1usize..10
    ) {
        let mut filter = build(cap, &members);
        filter.retain(|i| i % modulus == 0);
        let expected: BTreeSet<usize> = members.iter().copied().filter(|i| i % modulus == 0).collect();
        assert_matches(&filter, &expected)?;
    }

    #[test]
    fn test_select_matches_filter(
        (cap, members) in arb_members(300)
    ) {
        let data: Vec<usize> = (0..cap).map(|i| i * 10).collect();
        let filter = build(cap, &members);
        let selected: Vec<usize> = filter.select(&data).copied().collect();
        let expected: Vec<usize> = members.iter().map(|i| i * 10).collect();
        prop_assert_eq!(selected, expected);
    }
}
