#![cfg(test)]

// Property tests for ChainedHashSet kept inside the crate so they can check
// chain links and slot placement after every operation.

use crate::chained_hash_set::ChainedHashSet;
use proptest::prelude::*;
use std::collections::{BTreeSet, HashSet};
use std::hash::{BuildHasher, Hasher};

// Pool-indexed operations: indices shrink towards earlier values, op lists
// shrink in length.
#[derive(Clone, Debug)]
enum Op {
    Insert(usize),
    Erase(usize),
    Take(usize),
    Contains(usize),
    Find(usize),
    Iterate,
    CursorWalk,
    Clear,
}

fn arb_scenario() -> impl Strategy<Value = (usize, Vec<String>, Vec<Op>)> {
    (0usize..=4, proptest::collection::vec("[a-z]{0,4}", 1..=12)).prop_flat_map(|(cap, pool)| {
        let idx = 0..pool.len();
        let op = prop_oneof![
            4 => idx.clone().prop_map(Op::Insert),
            2 => idx.clone().prop_map(Op::Erase),
            1 => idx.clone().prop_map(Op::Take),
            2 => idx.clone().prop_map(Op::Contains),
            1 => idx.clone().prop_map(Op::Find),
            1 => Just(Op::Iterate),
            1 => Just(Op::CursorWalk),
            1 => Just(Op::Clear),
        ];
        proptest::collection::vec(op, 1..80).prop_map(move |ops| (cap, pool.clone(), ops))
    })
}

fn run<S: BuildHasher>(
    mut sut: ChainedHashSet<String, S>,
    pool: &[String],
    ops: Vec<Op>,
) -> Result<(), TestCaseError> {
    let mut model: HashSet<String> = HashSet::new();
    for op in ops {
        let cap_before = sut.capacity();
        let len_before = sut.len();
        match op {
            Op::Insert(i) => {
                let v = pool[i].clone();
                let (c, inserted) = sut.insert(v.clone());
                prop_assert_eq!(inserted, model.insert(v.clone()));
                prop_assert_eq!(c.value(&sut).ok(), Some(&v));
                if inserted && len_before == cap_before {
                    prop_assert_eq!(sut.capacity(), cap_before * 2, "grow by doubling when full");
                } else {
                    prop_assert_eq!(sut.capacity(), cap_before, "no growth otherwise");
                }
            }
            Op::Erase(i) => {
                sut.erase(pool[i].as_str());
                model.remove(&pool[i]);
            }
            Op::Take(i) => {
                let got = sut.take(pool[i].as_str());
                prop_assert_eq!(got, model.take(&pool[i]));
            }
            Op::Contains(i) => {
                prop_assert_eq!(sut.contains(pool[i].as_str()), model.contains(&pool[i]));
            }
            Op::Find(i) => {
                let c = sut.find(pool[i].as_str());
                prop_assert_eq!(c.is_end(), !model.contains(&pool[i]));
            }
            Op::Iterate => {
                let seen: Vec<&String> = sut.iter().collect();
                let unique: BTreeSet<&String> = seen.iter().copied().collect();
                prop_assert_eq!(seen.len(), unique.len(), "iteration repeats a value");
                let expected: BTreeSet<&String> = model.iter().collect();
                prop_assert_eq!(unique, expected);
            }
            Op::CursorWalk => {
                let mut c = sut.begin();
                let mut n = 0usize;
                while !c.is_end() {
                    let v = c.value(&sut).expect("live cursor resolves");
                    prop_assert!(model.contains(v));
                    c.advance(&sut).expect("cursor stays valid without mutation");
                    n += 1;
                }
                prop_assert_eq!(n, model.len());
            }
            Op::Clear => {
                sut.clear();
                model.clear();
                prop_assert_eq!(sut.capacity(), cap_before, "clear keeps the bucket count");
            }
        }

        sut.assert_consistent();
        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
    }
    Ok(())
}

// Property: state-machine equivalence against std::collections::HashSet with
// small starting tables, so growth happens often.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((cap, pool, ops) in arb_scenario()) {
        run(ChainedHashSet::with_capacity(cap), &pool, ops)?;
    }
}

// Hasher that keeps only the low bits, forcing frequent slot collisions
// without collapsing everything into one chain.
#[derive(Clone, Default)]
struct NarrowBuildHasher;
struct NarrowHasher(u64);
impl BuildHasher for NarrowBuildHasher {
    type Hasher = NarrowHasher;
    fn build_hasher(&self) -> Self::Hasher {
        NarrowHasher(0)
    }
}
impl Hasher for NarrowHasher {
    fn write(&mut self, bytes: &[u8]) {
        for b in bytes {
            self.0 = self.0.wrapping_mul(31).wrapping_add(*b as u64);
        }
    }
    fn finish(&self) -> u64 {
        self.0 & 0x3
    }
}

// Property: same invariants under heavy collisions (at most four distinct
// hashes), which exercises every unlink position.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions((cap, pool, ops) in arb_scenario()) {
        run(ChainedHashSet::with_capacity_and_hasher(cap, NarrowBuildHasher), &pool, ops)?;
    }
}
