//! Internal-consistency assertions run when [`crate::PartitionOptions::verify`]
//! is set: partition coverage, BFS-path legs, treewidth bounds, and the
//! properness of the H3 colouring.

use std::collections::HashSet;

use crate::error::{PartitionError, Result};
use crate::partition::TripodPartition;
use crate::rotation::RotationSystem;

fn fail(msg: impl Into<String>) -> PartitionError {
    PartitionError::Verification(msg.into())
}

/// Every vertex is owned by exactly one `(tripod, leg, index)` slot.
fn check_partition(rs: &RotationSystem, p: &TripodPartition) -> Result<()> {
    if p.placement.len() != rs.n() {
        return Err(fail(format!(
            "placement covers {} vertices, expected {}",
            p.placement.len(),
            rs.n()
        )));
    }
    let mut seen = HashSet::new();
    for (v, placement) in p.placement.iter().enumerate() {
        let tripod = p
            .tripods
            .get(placement.tripod as usize)
            .ok_or_else(|| fail(format!("vertex {v} placed in non-existent tripod {}", placement.tripod)))?;
        let leg = tripod
            .legs
            .get(placement.leg as usize)
            .ok_or_else(|| fail(format!("vertex {v} placed in non-existent leg {}", placement.leg)))?;
        let stored = leg
            .vertices
            .get(placement.index as usize)
            .copied()
            .ok_or_else(|| fail(format!("vertex {v}'s placement index is out of range")))?;
        if stored != v as u32 {
            return Err(fail(format!(
                "placement for vertex {v} points at leg slot holding {stored} instead"
            )));
        }
        if !seen.insert(v) {
            return Err(fail(format!("vertex {v} recorded twice in placement")));
        }
    }
    Ok(())
}

/// Every leg is a contiguous root-ward path in the rotation system's
/// implied BFS structure — here checked indirectly via the rotation
/// system's face structure: consecutive leg vertices must be adjacent.
fn check_legs_are_rotation_paths(rs: &RotationSystem, p: &TripodPartition) -> Result<()> {
    for (t, tripod) in p.tripods.iter().enumerate() {
        for (i, leg) in tripod.legs.iter().enumerate() {
            for w in leg.vertices.windows(2) {
                let (a, b) = (w[0], w[1]);
                if rs.succ(a, b).is_none() && rs.succ(b, a).is_none() {
                    return Err(fail(format!(
                        "tripod {t} leg {i}: {a} and {b} are not adjacent in the rotation system"
                    )));
                }
            }
        }
    }
    Ok(())
}

/// Every tripod has at most 3 H3 neighbours and at most 8 H8 neighbours
/// per leg.
fn check_treewidth_bounds(p: &TripodPartition) -> Result<()> {
    for t in 0..p.tripods.len() as u32 {
        let h3 = p.h3parents(t);
        if h3.len() > 3 {
            return Err(fail(format!("tripod {t} has {} H3 neighbours, expected <= 3", h3.len())));
        }
        for i in 0..3u8 {
            let h8 = p.h8parents(t, i);
            if h8.len() > 8 {
                return Err(fail(format!(
                    "tripod {t} leg {i} has {} H8 neighbours, expected <= 8",
                    h8.len()
                )));
            }
        }
    }
    Ok(())
}

/// The H3-parent 4-colouring is proper: no tripod shares a colour with an
/// H3 neighbour.
fn check_colouring_is_proper(p: &TripodPartition) -> Result<()> {
    let colours = p.colour_tripods();
    for t in 0..p.tripods.len() as u32 {
        for parent in p.h3parents(t) {
            if colours[t as usize] == colours[parent as usize] {
                return Err(fail(format!(
                    "tripods {t} and {parent} are H3-adjacent but share colour {}",
                    colours[t as usize]
                )));
            }
        }
    }
    Ok(())
}

/// For every input edge `(u,v)` whose endpoints land in different tripods,
/// one of `(tripod_u, tripod_v)` must appear in the other's `h3parents` —
/// and, at the finer leg granularity, one of their `(tripod, leg)` pairs
/// must appear in the other's `h8parents`. This is the edge-containment
/// property: it is what actually makes H3/H8 supergraphs of the
/// contraction, not just two independently-bounded-degree structures that
/// happen to satisfy the size bound by coincidence.
fn check_edge_containment(rs: &RotationSystem, p: &TripodPartition) -> Result<()> {
    for u in 0..rs.n() as u32 {
        for v in rs.neighbors(u) {
            if v <= u {
                continue;
            }
            let (pu, pv) = (p.placement[u as usize], p.placement[v as usize]);
            if pu.tripod != pv.tripod {
                let h3_u = p.h3parents(pu.tripod);
                let h3_v = p.h3parents(pv.tripod);
                if !h3_u.contains(&pv.tripod) && !h3_v.contains(&pu.tripod) {
                    return Err(fail(format!(
                        "edge ({u}, {v}) crosses tripods {} and {} which are not H3-adjacent",
                        pu.tripod, pv.tripod
                    )));
                }
            }
            if (pu.tripod, pu.leg) != (pv.tripod, pv.leg) {
                let h8_u = p.h8parents(pu.tripod, pu.leg);
                let h8_v = p.h8parents(pv.tripod, pv.leg);
                if !h8_u.contains(&(pv.tripod, pv.leg)) && !h8_v.contains(&(pu.tripod, pu.leg)) {
                    return Err(fail(format!(
                        "edge ({u}, {v}) crosses legs ({}, {}) and ({}, {}) which are not H8-adjacent",
                        pu.tripod, pu.leg, pv.tripod, pv.leg
                    )));
                }
            }
        }
    }
    Ok(())
}

pub fn verify(rs: &RotationSystem, p: &TripodPartition) -> Result<()> {
    check_partition(rs, p)?;
    check_legs_are_rotation_paths(rs, p)?;
    check_treewidth_bounds(p)?;
    check_colouring_is_proper(p)?;
    check_edge_containment(rs, p)?;
    Ok(())
}
