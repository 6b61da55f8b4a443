use super::*;

use proptest::prelude::*;
use proptest_derive::Arbitrary;
use std::cmp::Ordering;
use std::collections::BTreeSet;

fn key_strategy() -> impl Strategy<Value = Vec<u8>> + Clone {
    // Small alphabet so that duplicates, shared prefixes and trailing zero
    // bytes all show up often.
    let byte = prop_oneof![
        Just(0u8),
        Just(1u8),
        Just(b'a'),
        Just(0x7fu8),
        Just(0x80u8),
        Just(0xffu8),
    ];
    prop::collection::vec(byte, 0..=6)
}

#[derive(Clone, Debug, Arbitrary)]
enum Op {
    #[proptest(weight = 8)]
    Insert(#[proptest(strategy = "key_strategy()")] Vec<u8>),
    #[proptest(weight = 1)]
    Size,
    #[proptest(weight = 1)]
    Iterate,
}

fn check_against_model(t: &RbTree, m: &BTreeSet<Vec<u8>>) -> Result<(), TestCaseError> {
    prop_assert_eq!(t.validate(), Ok(()));
    prop_assert_eq!(t.len(), m.len());
    let got: Vec<&[u8]> = t.iter().collect();
    let expected: Vec<&[u8]> = m.iter().map(Vec::as_slice).collect();
    prop_assert_eq!(got, expected);
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        max_shrink_iters: 50_000,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_compare_matches_slice_order(a in any::<Vec<u8>>(), b in any::<Vec<u8>>()) {
        prop_assert_eq!(compare(&a, &b), a.as_slice().cmp(b.as_slice()));
        prop_assert_eq!(compare(&b, &a), compare(&a, &b).reverse());
        prop_assert_eq!(compare(&a, &a), Ordering::Equal);
    }

    #[test]
    fn prop_equivalence(ops in prop::collection::vec(any::<Op>(), 0..=500)) {
        let mut t = RbTree::new();
        let mut m: BTreeSet<Vec<u8>> = BTreeSet::new();

        for op in ops {
            match op {
                Op::Insert(key) => {
                    let inserted = t.insert(&key);
                    prop_assert_eq!(inserted, m.insert(key));
                    // Root color, no red-red, black height, ordering.
                    prop_assert_eq!(t.validate(), Ok(()));
                }
                Op::Size => {
                    prop_assert_eq!(t.size(), m.len());
                }
                Op::Iterate => {
                    prop_assert_eq!(t.iter().count(), m.len());
                }
            }
            prop_assert_eq!(t.len(), m.len());
        }

        check_against_model(&t, &m)?;
    }

    #[test]
    fn prop_duplicate_leaves_tree_unchanged(keys in prop::collection::vec(any::<Vec<u8>>(), 1..=64), pick in any::<prop::sample::Index>()) {
        let mut t: RbTree = keys.iter().collect();
        let before = t.dump().to_string();
        let len = t.len();

        let dup = pick.get(&keys);
        prop_assert!(!t.insert(dup));
        prop_assert_eq!(t.len(), len);
        prop_assert_eq!(t.size(), len);
        prop_assert_eq!(t.dump().to_string(), before);
    }

    #[test]
    fn prop_height_bound(keys in prop::collection::vec(any::<Vec<u8>>(), 0..=2000)) {
        let t: RbTree = keys.iter().collect();
        let bound = 2.0 * ((t.len() + 1) as f64).log2();
        prop_assert!((t.height() as f64) <= bound, "height {} > {}", t.height(), bound);
    }
}

fn for_each_permutation<T: Clone>(items: &[T], mut f: impl FnMut(Vec<T>)) {
    fn rec<T: Clone>(items: &[T], used: &mut [bool], out: &mut Vec<T>, f: &mut impl FnMut(Vec<T>)) {
        if out.len() == items.len() {
            f(out.clone());
            return;
        }
        for i in 0..items.len() {
            if used[i] {
                continue;
            }
            used[i] = true;
            out.push(items[i].clone());
            rec(items, used, out, f);
            out.pop();
            used[i] = false;
        }
    }

    let mut used = vec![false; items.len()];
    let mut out = Vec::with_capacity(items.len());
    rec(items, &mut used, &mut out, &mut f);
}

#[test]
fn exhaustive_insert_order_small_set() {
    let keys: Vec<Vec<u8>> = vec![
        b"".to_vec(),
        b"a".to_vec(),
        b"a\0".to_vec(),
        b"ab".to_vec(),
        b"b".to_vec(),
        b"\x80".to_vec(),
        b"\x7f".to_vec(),
    ];

    for_each_permutation(&keys, |perm| {
        let mut t = RbTree::new();
        let mut m: BTreeSet<Vec<u8>> = BTreeSet::new();

        for k in perm {
            assert_eq!(t.insert(&k), m.insert(k));
            t.validate().unwrap();
        }

        let got: Vec<&[u8]> = t.iter().collect();
        let expected: Vec<&[u8]> = m.iter().map(Vec::as_slice).collect();
        assert_eq!(got, expected);
        assert_eq!(t.size(), keys.len());
    });
}

#[test]
fn exhaustive_insert_order_with_repeats() {
    let keys = vec!["k", "j", "k", "l", "j"];

    for_each_permutation(&keys, |perm| {
        let t: RbTree = perm.into_iter().collect();
        t.validate().unwrap();
        assert_eq!(t.size(), 3);
    });
}
