//! The `succ` rotation system: for each vertex `u`, a mapping from each
//! neighbor `v` to the unique `w` such that `(u, v, w)` is a counter-clockwise
//! face.

use std::collections::HashMap;

use crate::error::{PartitionError, Result};

/// A validated planar rotation system over vertices `0..n`.
#[derive(Debug, Clone)]
pub struct RotationSystem {
    /// `succ[u]` maps each neighbor `v` of `u` to the next neighbor `w` in
    /// counter-clockwise order. Average vertex degree in a planar
    /// triangulation is bounded (by Euler's formula, `2m/n < 6`), so a
    /// `HashMap` per vertex stays effectively O(1) per lookup in practice.
    succ: Vec<HashMap<u32, u32>>,
}

impl RotationSystem {
    /// Number of vertices.
    pub fn n(&self) -> usize {
        self.succ.len()
    }

    /// `succ[u][v]`, i.e. the neighbor that follows `v` in `u`'s
    /// counter-clockwise rotation.
    pub fn succ(&self, u: u32, v: u32) -> Option<u32> {
        self.succ[u as usize].get(&v).copied()
    }

    /// All neighbors of `u`, in no particular order (use [`Self::cycle`] for
    /// rotation order starting from an arbitrary neighbor).
    pub fn neighbors(&self, u: u32) -> impl Iterator<Item = u32> + '_ {
        self.succ[u as usize].keys().copied()
    }

    pub fn degree(&self, u: u32) -> usize {
        self.succ[u as usize].len()
    }

    /// The full cyclic neighbor order of `u`, starting from `start`.
    pub fn cycle(&self, u: u32, start: u32) -> Vec<u32> {
        let deg = self.degree(u);
        let mut out = Vec::with_capacity(deg);
        let mut v = start;
        for _ in 0..deg {
            out.push(v);
            v = self.succ[u as usize][&v];
        }
        out
    }

    /// Build and validate a rotation system from each vertex's `succ` map.
    /// Checks involution and the total degree `sum(|succ[u]|) == 6n - 12`.
    pub fn new(succ: Vec<HashMap<u32, u32>>) -> Result<Self> {
        let n = succ.len();
        let total: usize = succ.iter().map(|m| m.len()).sum();
        let expected = 6 * n - 12;
        if n >= 3 && total != expected {
            return Err(PartitionError::RotationDegreeMismatch {
                expected,
                actual: total,
            });
        }
        for (u, row) in succ.iter().enumerate() {
            for (&v, &w) in row.iter() {
                let back = succ[w as usize].get(&(u as u32));
                if back != Some(&v) {
                    return Err(PartitionError::NonInvolutiveRotation { u: u as u32, v });
                }
            }
        }
        Ok(Self { succ })
    }

    /// Validate that `face` is a counter-clockwise face: `succ[face[i]][face[i+1]]
    /// == face[i+2]` for each cyclic `i`.
    pub fn is_ccw_face(&self, face: [u32; 3]) -> bool {
        (0..3).all(|i| {
            let u = face[i];
            let v = face[(i + 1) % 3];
            let w = face[(i + 2) % 3];
            self.succ(u, v) == Some(w)
        })
    }
}

/// Assembles a rotation system face-by-face: feed faces in counter-clockwise
/// order, get a [`RotationSystem`] out.
#[derive(Debug, Default)]
pub struct RotationBuilder {
    succ: Vec<HashMap<u32, u32>>,
}

impl RotationBuilder {
    pub fn new(n: usize) -> Self {
        Self {
            succ: vec![HashMap::new(); n],
        }
    }

    /// Record a counter-clockwise face `(u, v, w)`. Returns an error if this
    /// overwrites an existing `succ[u][v]` entry with a different value,
    /// which means the input faces are not a consistent triangulation.
    pub fn add_face(&mut self, face: [u32; 3]) -> Result<()> {
        for i in 0..3 {
            let u = face[i];
            let v = face[(i + 1) % 3];
            let w = face[(i + 2) % 3];
            if let Some(&existing) = self.succ[u as usize].get(&v) {
                if existing != w {
                    return Err(PartitionError::MalformedWireInput(format!(
                        "conflicting successor for ({u}, {v}): {existing} vs {w}"
                    )));
                }
            }
            self.succ[u as usize].insert(v, w);
        }
        Ok(())
    }

    pub fn build(self) -> Result<RotationSystem> {
        RotationSystem::new(self.succ)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tetrahedron() -> RotationSystem {
        let mut b = RotationBuilder::new(4);
        b.add_face([0, 1, 2]).unwrap();
        b.add_face([0, 2, 3]).unwrap();
        b.add_face([0, 3, 1]).unwrap();
        b.add_face([1, 3, 2]).unwrap();
        b.build().unwrap()
    }

    #[test]
    fn tetrahedron_is_valid() {
        let rs = tetrahedron();
        assert_eq!(rs.n(), 4);
        assert_eq!(rs.degree(0), 3);
        assert!(rs.is_ccw_face([0, 1, 2]));
    }

    #[test]
    fn involution_holds() {
        let rs = tetrahedron();
        for u in 0..4u32 {
            for v in rs.neighbors(u).collect::<Vec<_>>() {
                let w = rs.succ(u, v).unwrap();
                assert_eq!(rs.succ(w, u), Some(v));
            }
        }
    }

    #[test]
    fn bad_degree_sum_rejected() {
        let mut b = RotationBuilder::new(4);
        b.add_face([0, 1, 2]).unwrap();
        assert!(matches!(
            b.build(),
            Err(PartitionError::RotationDegreeMismatch { .. })
        ));
    }
}
