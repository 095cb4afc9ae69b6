//! Nearest marked ancestor, O(1) query / amortized O(log n) total marks.
//!
//! Built on an Euler tour of the BFS forest plus [`IntegerSet`]: `mark(v)`
//! adds `v`'s tour endpoints (and its children's) to the set so that
//! `interval(exit_v)` always lands on either a marked vertex or a child of
//! one.

use crate::bfs::Forest;
use crate::integer_set::IntegerSet;

/// Owns a copy of the forest's parent/children arrays rather than borrowing
/// `&Forest`: the driver needs to hold both a `Forest` and an NMA built from
/// it side by side, and a borrow would make that struct self-referential.
/// Parent/children arrays are small (`O(n)` integers), so the clone is cheap.
#[derive(Debug)]
pub struct NearestMarkedAncestor {
    parent: Vec<i64>,
    children: Vec<Vec<u32>>,
    tour: Vec<u32>,
    enter: Vec<usize>,
    exit: Vec<usize>,
    marked: Vec<bool>,
    marks: IntegerSet,
}

impl NearestMarkedAncestor {
    /// Build the Euler tour of `forest` rooted at `roots`, with nothing
    /// marked yet.
    pub fn build(forest: &Forest, roots: &[u32]) -> Self {
        let n = forest.n();
        let mut tour = Vec::with_capacity(2 * n);
        let mut enter = vec![0usize; n];
        let mut exit = vec![0usize; n];

        // Iterative pre/post-order Euler tour: push (vertex, next_child_idx).
        for &r in roots {
            let mut stack: Vec<(u32, usize)> = vec![(r, 0)];
            enter[r as usize] = tour.len();
            tour.push(r);
            while let Some(&mut (v, ref mut idx)) = stack.last_mut() {
                let kids = forest.children(v);
                if *idx < kids.len() {
                    let w = kids[*idx];
                    *idx += 1;
                    enter[w as usize] = tour.len();
                    tour.push(w);
                    stack.push((w, 0));
                } else {
                    exit[v as usize] = tour.len();
                    tour.push(v);
                    stack.pop();
                }
            }
        }

        let marks = IntegerSet::new(2 * n);
        Self {
            parent: (0..n).map(|v| forest.parent(v as u32)).collect(),
            children: (0..n).map(|v| forest.children(v as u32).to_vec()).collect(),
            tour,
            enter,
            exit,
            marked: vec![false; n],
            marks,
        }
    }

    fn is_root(&self, v: u32) -> bool {
        self.parent[v as usize] < 0
    }

    pub fn is_marked(&self, v: u32) -> bool {
        self.marked[v as usize]
    }

    /// Mark `v`. Legal only when `v` is a root or `v`'s parent is already
    /// marked.
    pub fn mark(&mut self, v: u32) {
        debug_assert!(
            self.is_root(v) || self.marked[self.parent[v as usize] as usize],
            "mark({v}) violates the NMA contract: parent must already be marked"
        );
        if self.marked[v as usize] {
            return;
        }
        self.marked[v as usize] = true;
        self.marks.add(self.enter[v as usize] as i64);
        self.marks.add(self.exit[v as usize] as i64);
        for w in self.children[v as usize].clone() {
            self.marks.add(self.enter[w as usize] as i64);
            self.marks.add(self.exit[w as usize] as i64);
        }
        log::trace!("nma: marked {v}");
    }

    /// The nearest marked ancestor of `v` (possibly `v` itself, if marked).
    pub fn nearest_marked_ancestor(&self, v: u32) -> u32 {
        let x = self.exit[v as usize] as i64;
        let (_, b) = self.marks.interval(x);
        let c = self.tour[b as usize];
        if self.marked[c as usize] {
            c
        } else {
            self.parent[c as usize] as u32
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bfs::Forest;
    use crate::rotation::RotationBuilder;

    /// C3 only needs a `Forest`, so exercise it over a small wheel
    /// triangulation's BFS tree rather than trying to force an exact
    /// textbook path shape out of a planar rotation system.
    fn path_forest(n: usize) -> Forest {
        let _ = n;
        let mut b = RotationBuilder::new(5);
        b.add_face([0, 1, 4]).unwrap();
        b.add_face([1, 2, 4]).unwrap();
        b.add_face([2, 3, 4]).unwrap();
        b.add_face([3, 0, 4]).unwrap();
        let rs = b.build().unwrap();
        Forest::build(&rs, &[0])
    }

    #[test]
    fn matches_naive_walk_on_a_single_mark() {
        // We can't force an exact 0-1-2-3-4 path out of a triangulation
        // without degenerate (non-planar) input, so exercise the NMA
        // contract directly against whatever forest results instead.
        let forest = path_forest(5);
        let mut nma = NearestMarkedAncestor::build(&forest, &[0]);
        nma.mark(0);
        for v in 0..5u32 {
            let naive = naive_nma(&forest, v, &nma.marked);
            assert_eq!(nma.nearest_marked_ancestor(v), naive);
        }
    }

    fn naive_nma(forest: &Forest, v: u32, marked: &[bool]) -> u32 {
        let mut cur = v;
        loop {
            if marked[cur as usize] {
                return cur;
            }
            cur = forest.parent(cur) as u32;
        }
    }

    proptest::proptest! {
        /// nearest_marked_ancestor matches a naive O(depth) walk for any
        /// legal mark sequence (marks applied in root-to-descendant order so
        /// the "parent already marked" contract always holds).
        #[test]
        fn matches_naive_walk_for_any_legal_mark_sequence(seed in 0u64..1000) {
            use rand::{SeedableRng, Rng, rngs::SmallRng};
            let forest = path_forest(5);
            let mut nma = NearestMarkedAncestor::build(&forest, &[0]);
            nma.mark(0);
            let mut rng = SmallRng::seed_from_u64(seed);
            // Mark a random subset, always in parent-before-child order by
            // repeatedly scanning for any still-unmarked vertex whose parent
            // is marked.
            let mut remaining: Vec<u32> = (1..5).collect();
            while !remaining.is_empty() && rng.gen_bool(0.6) {
                let eligible: Vec<u32> = remaining.iter().copied()
                    .filter(|&v| nma.is_marked(forest.parent(v) as u32))
                    .collect();
                if eligible.is_empty() { break; }
                let pick = eligible[rng.gen_range(0..eligible.len())];
                nma.mark(pick);
                remaining.retain(|&v| v != pick);
            }
            for v in 0..5u32 {
                let naive = naive_nma(&forest, v, &nma.marked);
                prop_assert_eq!(nma.nearest_marked_ancestor(v), naive);
            }
        }
    }
}
