//! H3/H8 contraction helpers and the tripod 4-colouring.
//!
//! H3 contracts each tripod to one super-node; H8 contracts each *leg* to
//! one super-node instead. Both are defined purely in terms of "who owns
//! the foot of each leg" (`placement`) plus `tripod_tree`'s pre-order id
//! ranges — no separate parent-pointer structure is kept.

use crate::partition::TripodPartition;

impl TripodPartition {
    /// The tripod ids a leg's foot belongs to, one per leg: `tripod_map[leg[-1]].t`
    /// for each of `t`'s 3 legs. Empty for the root tripod, which has no
    /// feet. Entries may repeat if two legs' feet happen to land in the
    /// same tripod; all entries are `< t`.
    pub fn h3parents(&self, t: u32) -> Vec<u32> {
        if t == 0 {
            return Vec::new();
        }
        self.tripods[t as usize]
            .legs
            .iter()
            .map(|leg| self.placement[leg.foot() as usize].tripod)
            .collect()
    }

    /// The leg ids (as `(tripod, leg_index)` pairs) adjacent to `(t, i)` in
    /// the H8 contraction: the earlier legs `0..i` of the same tripod `t`;
    /// and, for each distinct `p` in `h3parents(t)`, the two leg slots of
    /// `p` other than the one whose sub-region contains `t`.
    pub fn h8parents(&self, t: u32, i: u8) -> Vec<(u32, u8)> {
        let mut out = Vec::with_capacity(8);
        for j in 0..i {
            out.push((t, j));
        }
        if t == 1 {
            out.push((0, 0));
            out.push((0, 1));
            out.push((0, 2));
            return out;
        }
        let ends = self.subtree_end();
        for p in self.h3parents(t) {
            if let Some(j) = self.leg_slot_containing(p, t, &ends) {
                for k in 0..3u8 {
                    if k != j {
                        out.push((p, k));
                    }
                }
            }
        }
        out
    }

    /// For each tripod id `t`, the largest descendant id in its
    /// `tripod_tree` subtree. Tripod ids are assigned in pre-order, so a
    /// child's id always exceeds its parent's and a subtree's ids form a
    /// contiguous range `[t, subtree_end(t)]`. Computed bottom-up in one
    /// backward pass since every child id exceeds its parent's.
    fn subtree_end(&self) -> Vec<u32> {
        let n = self.tripod_tree.len();
        let mut end: Vec<u32> = (0..n as u32).collect();
        for t in (0..n).rev() {
            let mut e = end[t];
            for slot in self.tripod_tree[t] {
                if let Some(c) = slot {
                    e = e.max(end[c as usize]);
                }
            }
            end[t] = e;
        }
        end
    }

    /// Which leg slot of `p`'s `tripod_tree` row has a sub-region containing
    /// `t`, found by checking `t` against each child's contiguous pre-order
    /// id range (see [`Self::subtree_end`]).
    fn leg_slot_containing(&self, p: u32, t: u32, ends: &[u32]) -> Option<u8> {
        self.tripod_tree[p as usize]
            .iter()
            .enumerate()
            .find_map(|(slot, child)| {
                let c = (*child)?;
                (c <= t && t <= ends[c as usize]).then_some(slot as u8)
            })
    }

    /// Greedy smallest-available-colour 4-colouring of the H3 contraction,
    /// processed in id order so every `h3parents(t)` entry (all `< t`) is
    /// already coloured when `t` is reached.
    pub fn colour_tripods(&self) -> Vec<u8> {
        let n = self.tripods.len();
        let mut colours = vec![0u8; n];
        for t in 1..n as u32 {
            let mut used = [false; 4];
            for p in self.h3parents(t) {
                used[colours[p as usize] as usize] = true;
            }
            colours[t as usize] = (0..4).find(|&c| !used[c as usize]).unwrap_or(0);
        }
        colours
    }
}
