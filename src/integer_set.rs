//! Predecessor/successor integer set over `{0,...,m-1}` with sentinels `-1`
//! and `m`.
//!
//! `add` runs in amortized O(log m) total across any sequence of adds;
//! `interval`/`predecessor`/`successor` are O(1). The representation is an
//! array of `m+1` shared two-cell records: each index points at an
//! `Rc<Cell<(i64, i64)>>` record; splitting a record mutates the unchanged
//! half in place and reassigns the shrinking half's indices to a freshly
//! allocated record.

use std::cell::Cell;
use std::rc::Rc;

type Record = Rc<Cell<(i64, i64)>>;

#[derive(Debug)]
pub struct IntegerSet {
    m: i64,
    cells: Vec<Record>,
}

impl IntegerSet {
    /// A fresh set over `{0, ..., m-1}`, empty.
    pub fn new(m: usize) -> Self {
        let shared = Rc::new(Cell::new((-1i64, m as i64)));
        Self {
            m: m as i64,
            cells: vec![shared; m + 1],
        }
    }

    /// `(pred, succ)`: the largest element of `S ∪ {-1}` that is `<= x`, and
    /// the smallest element of `S ∪ {m}` that is `>= x`. Using `>=` rather
    /// than a strictly-greater successor is what lets a single `interval`
    /// call answer "is `x` itself a member" (see [`Self::contains`]) and is
    /// what the NMA query (`nearest_marked_ancestor`) needs: `exit_v` must
    /// be its own candidate when `v` itself is marked, not skip past it to
    /// the next marked tour index.
    ///
    /// The raw per-index record stores `(a, b)` with `b` equal to `x`
    /// exactly when `x` is a member (the record covering `(a, x]` that `x`
    /// itself owns); `pred` in that case is overridden to `x` too, so both
    /// halves of the pair agree on the `>=`/`<=` convention instead of the
    /// record's raw, asymmetric `a`.
    pub fn interval(&self, x: i64) -> (i64, i64) {
        debug_assert!(x >= 0 && x < self.m);
        let (a, b) = self.cells[x as usize].get();
        if b == x {
            (x, x)
        } else {
            (a, b)
        }
    }

    pub fn predecessor(&self, x: i64) -> i64 {
        self.interval(x).0
    }

    pub fn successor(&self, x: i64) -> i64 {
        self.interval(x).1
    }

    /// Whether `x` is currently a member of the set.
    pub fn contains(&self, x: i64) -> bool {
        self.interval(x).1 == x
    }

    /// Add `x` to the set. No-op if already present.
    pub fn add(&mut self, x: i64) {
        debug_assert!(x >= 0 && x < self.m);
        let record = self.cells[x as usize].clone();
        let (a, b) = record.get();
        if b == x {
            return;
        }
        let mid = a + (b - a) / 2;
        if x <= mid {
            let fresh: Record = Rc::new(Cell::new((a, x)));
            for i in (a + 1)..=x {
                self.cells[i as usize] = fresh.clone();
            }
            record.set((x, b));
        } else {
            let fresh: Record = Rc::new(Cell::new((x, b)));
            let hi = b.min(self.m);
            for i in (x + 1)..=hi {
                self.cells[i as usize] = fresh.clone();
            }
            record.set((a, x));
        }
    }

    /// Iterate the members of the set in increasing order. Walks `cur = 0,
    /// member + 1, ...` rather than starting from the `-1` sentinel: `-1`
    /// is a valid pred/succ *value* but not a valid `interval` *query*
    /// (only `0..m` are), so querying `interval(-1)` directly would be out
    /// of `interval`'s own domain.
    pub fn iter(&self) -> impl Iterator<Item = i64> + '_ {
        let mut cur = 0i64;
        std::iter::from_fn(move || {
            if cur >= self.m {
                return None;
            }
            let member = self.successor(cur);
            if member >= self.m {
                cur = self.m;
                return None;
            }
            cur = member + 1;
            Some(member)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn interval_and_iteration_after_a_few_adds() {
        let mut s = IntegerSet::new(10);
        for x in [3, 5, 1, 8] {
            s.add(x);
        }
        assert_eq!(s.interval(0), (-1, 1));
        assert_eq!(s.interval(1), (1, 1));
        assert_eq!(s.interval(2), (1, 3));
        assert_eq!(s.interval(6), (5, 8));
        let got: Vec<i64> = s.iter().collect();
        assert_eq!(got, vec![1, 3, 5, 8]);
    }

    #[test]
    fn empty_set_has_sentinel_interval() {
        let s = IntegerSet::new(5);
        for x in 0..5 {
            assert_eq!(s.interval(x), (-1, 5));
        }
    }

    #[test]
    fn add_is_idempotent() {
        let mut s = IntegerSet::new(20);
        s.add(10);
        let before = s.interval(10);
        s.add(10);
        assert_eq!(s.interval(10), before);
    }

    proptest! {
        /// For any sequence of adds, `iter()` enumerates exactly the added
        /// elements in increasing order, and `interval(x)` matches a naive
        /// linear scan for every x.
        #[test]
        fn round_trip_matches_naive_scan(adds in proptest::collection::vec(0usize..64, 0..200)) {
            let m = 64;
            let mut s = IntegerSet::new(m);
            let mut reference = std::collections::BTreeSet::new();
            for x in &adds {
                s.add(*x as i64);
                reference.insert(*x);
            }
            let got: Vec<i64> = s.iter().collect();
            let want: Vec<i64> = reference.iter().map(|&x| x as i64).collect();
            prop_assert_eq!(got, want);

            for x in 0..m as i64 {
                let (pred, succ) = s.interval(x);
                let naive_pred = reference.iter().rev().find(|&&e| e as i64 <= x).map(|&e| e as i64).unwrap_or(-1);
                let naive_succ = reference.iter().find(|&&e| e as i64 >= x).map(|&e| e as i64).unwrap_or(m as i64);
                prop_assert_eq!(pred, naive_pred);
                prop_assert_eq!(succ, naive_succ);
            }
        }
    }
}
