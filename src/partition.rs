//! The tripod-partition driver.
//!
//! Builds a tripod partition of a planar triangulation by repeatedly
//! trichromatic-triangle ("Sperner") searching inside a 3-path-bounded
//! region, peeling off a tripod, and recursing into up to 3 sub-regions.
//! The natural formulation is a ternary recursion; this module drives it
//! with an explicit stack instead; see [`StackItem`] for why.

use crate::bfs::Forest;
use crate::error::{PartitionError, Result};
use crate::nma::NearestMarkedAncestor;
use crate::path_view::PathView;
use crate::rotation::RotationSystem;

/// One leg of a tripod: vertices from the tip (a Sperner-triangle corner)
/// down to, and including, the foot (a vertex already owned by an earlier
/// tripod — or, for tripod 0, the leg is just the root itself).
#[derive(Debug, Clone)]
pub struct Leg {
    pub vertices: Vec<u32>,
}

impl Leg {
    pub fn tip(&self) -> u32 {
        self.vertices[0]
    }

    pub fn foot(&self) -> u32 {
        *self.vertices.last().unwrap()
    }
}

#[derive(Debug, Clone)]
pub struct Tripod {
    pub legs: [Leg; 3],
}

/// Where a single vertex sits in the partition: which tripod owns it, which
/// of that tripod's 3 legs, and its position along that leg (0 = tip).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub tripod: u32,
    pub leg: u8,
    pub index: u32,
}

/// Tuning knobs for [`TripodPartition::build`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PartitionOptions {
    /// Use the 3-portal round-robin Sperner walk instead of the single
    /// linear walk from `(P0[-1], P1[0])`. Same result, different work
    /// schedule.
    pub worst_case: bool,
    /// Run the internal-consistency assertions (partition coverage,
    /// BFS-path legs, treewidth bounds, edge-containment) before returning.
    pub verify: bool,
}

#[derive(Debug, Clone)]
struct Subproblem {
    parent_tripod: u32,
    slot: u8,
    paths: [PathView; 3],
}

/// Work items on the explicit stack. A `Process` item does the real work;
/// a `Revert` item is pushed *before* a subproblem's children so it pops
/// only after every descendant of that subproblem has been fully handled —
/// the iterative equivalent of running cleanup code after a recursive call
/// returns.
enum StackItem {
    Process(Subproblem),
    Revert { vertex: u32, colour: u8 },
}

/// The result of partitioning a triangulation into tripods.
#[derive(Debug)]
pub struct TripodPartition {
    pub tripods: Vec<Tripod>,
    pub placement: Vec<Placement>,
    /// `tripod_tree[t][i]` is the id of the tripod (if any) whose region lay
    /// opposite leg `i` of tripod `t`.
    pub(crate) tripod_tree: Vec<[Option<u32>; 3]>,
}

impl TripodPartition {
    /// Build a tripod partition of `rs`, whose outer face is `outer_face`
    /// (must be a counter-clockwise face of `rs`).
    pub fn build(
        rs: &RotationSystem,
        outer_face: [u32; 3],
        options: PartitionOptions,
    ) -> Result<Self> {
        if !rs.is_ccw_face(outer_face) {
            if rs.is_ccw_face([outer_face[0], outer_face[2], outer_face[1]]) {
                return Err(PartitionError::OuterFaceNotCcw(outer_face));
            }
            return Err(PartitionError::OuterFaceNotAFace(outer_face));
        }

        let n = rs.n();
        let roots = [outer_face[2], outer_face[1], outer_face[0]];
        let forest = Forest::build(rs, &roots);
        let mut nma = NearestMarkedAncestor::build(&forest, &roots);
        let mut colours: Vec<Option<u8>> = vec![None; n];
        let mut placement: Vec<Option<Placement>> = vec![None; n];
        // `index_map[v]`: `v`'s absolute position in whichever backing
        // array currently holds it (a root singleton, a degenerate-reshape
        // singleton, or the current subproblem's own P2). Every slice taken
        // from a stamped backing array (P0/P1 handed down to a child, or a
        // grandchild's P0/P1 sliced from this subproblem's own P2) inherits
        // a valid stamp for free and needs no re-stamping — the one case
        // that does need a fresh stamp is P2 itself, since its backing is
        // freshly built per subproblem and shared, vertex-for-vertex, with
        // exactly one sibling's P2 too (see the stamp call at the top of
        // `Process` below for why that forces per-subproblem re-stamping
        // instead of a one-time stamp at construction).
        let mut index_map: Vec<i64> = vec![-1; n];

        let mut tripods = vec![Tripod {
            legs: [
                Leg { vertices: vec![roots[0]] },
                Leg { vertices: vec![roots[1]] },
                Leg { vertices: vec![roots[2]] },
            ],
        }];
        let mut tripod_tree = vec![[None, None, None]];

        for (i, &r) in roots.iter().enumerate() {
            nma.mark(r);
            colours[r as usize] = Some(i as u8);
            placement[r as usize] = Some(Placement { tripod: 0, leg: i as u8, index: 0 });
        }

        let log_subproblems = std::env::var("TRIPOD_LOG_SUBPROBLEMS")
            .map(|v| v == "1")
            .unwrap_or(false);

        let initial_paths = [
            PathView::singleton(roots[0]),
            PathView::singleton(roots[1]),
            PathView::singleton(roots[2]),
        ];
        for p in &initial_paths {
            p.stamp_index_map(&mut index_map);
        }
        let initial = Subproblem { parent_tripod: 0, slot: 0, paths: initial_paths };
        let mut stack = vec![StackItem::Process(initial)];

        while let Some(item) = stack.pop() {
            match item {
                StackItem::Revert { vertex, colour } => {
                    colours[vertex as usize] = Some(colour);
                }
                StackItem::Process(sp) => {
                    if log_subproblems {
                        log::debug!(
                            "subproblem: parent={} slot={} |P0|={} |P1|={} |P2|={}",
                            sp.parent_tripod,
                            sp.slot,
                            sp.paths[0].len(),
                            sp.paths[1].len(),
                            sp.paths[2].len()
                        );
                    }
                    let total: usize = sp.paths.iter().map(PathView::len).sum();
                    if total < 3 {
                        continue;
                    }

                    // index this subproblem's own P2 right now, at entry,
                    // rather than back when its parent built it: a leg's
                    // interior vertices are split across exactly *two*
                    // sibling children's freshly concatenated Q2 arrays (the
                    // leg borders one region on each side), so two distinct
                    // backing arrays can claim the same vertex id at once. A
                    // parent-time stamp made by one sibling's construction
                    // would be clobbered by the other sibling's before this
                    // subproblem gets a chance to use it. Stamping here, with
                    // no other subproblem running in between construction and
                    // this subproblem's own foot_pos lookup below, is what
                    // spec step 1 means by "index the third path".
                    sp.paths[2].stamp_index_map(&mut index_map);

                    // the region can degenerate to having its P2
                    // (the "leg-leg" side contributed by the parent
                    // tripod's own legs) empty, when both flanking legs
                    // are length 1 (their tip is already their foot).
                    // `suf_i`/`pre_{i+1}` below are never empty — each
                    // always includes at least the foot vertex itself.
                    // Reshape by temporarily borrowing the last
                    // vertex of whichever neighbouring path has more than
                    // one vertex, recolouring it so the 3-colour Sperner
                    // invariant still holds, and reverting once this
                    // subproblem's whole subtree has been processed.
                    let mut pending_revert = None;
                    let mut paths = sp.paths.clone();
                    if let Some(empty_idx) = paths.iter().position(PathView::is_empty) {
                        let donor_idx = [0usize, 1, 2]
                            .into_iter()
                            .filter(|&i| i != empty_idx && paths[i].len() > 1)
                            .next()
                            .ok_or(PartitionError::Verification(
                                "degenerate subproblem has no donor path to extract from".into(),
                            ))?;
                        let other_idx = 3 - empty_idx - donor_idx;
                        let c_other = colours[paths[other_idx].first() as usize].unwrap();
                        let c_donor = colours[paths[donor_idx].last() as usize].unwrap();
                        let cprime = (0u8..4).find(|&c| c != c_other && c != c_donor).unwrap();

                        let extracted = paths[donor_idx].last();
                        paths[donor_idx] = paths[donor_idx].drop_last();
                        let orig = colours[extracted as usize].unwrap();
                        colours[extracted as usize] = Some(cprime);
                        pending_revert = Some((extracted, orig));
                        let reshaped = PathView::singleton(extracted);
                        reshaped.stamp_index_map(&mut index_map);
                        paths[empty_idx] = reshaped;
                    }
                    let [p0, p1, p2] = paths;

                    // find a trichromatic (Sperner) triangle
                    // bounding the still-unowned interior of this region.
                    // A region whose boundary already closes into a single
                    // already-owned face (every path a singleton, forming
                    // an existing face of `rs`) has no interior left and
                    // needs no tripod.
                    let tau = match find_sperner(rs, &nma, &colours, &p0, &p1, &p2, options.worst_case)? {
                        Some(tau) => tau,
                        None => {
                            if let Some((vertex, colour)) = pending_revert {
                                stack.push(StackItem::Revert { vertex, colour });
                            }
                            continue;
                        }
                    };

                    // walk each corner up the BFS forest to the
                    // first already-owned ancestor (the leg's foot).
                    let legs: [Vec<u32>; 3] =
                        std::array::from_fn(|i| tripod_leg(&forest, &nma, tau[i]));

                    // emit the new tripod.
                    let ti = tripods.len() as u32;
                    tripods.push(Tripod {
                        legs: [
                            Leg { vertices: legs[0].clone() },
                            Leg { vertices: legs[1].clone() },
                            Leg { vertices: legs[2].clone() },
                        ],
                    });
                    tripod_tree.push([None, None, None]);
                    tripod_tree[sp.parent_tripod as usize][sp.slot as usize] = Some(ti);

                    // colour the tripod with whichever of the 4
                    // colours the Sperner triangle's corners don't already
                    // use, marking every newly-owned vertex along the way
                    // (foot-to-tip, so each mark's parent is already
                    // marked by the time it's reached).
                    let eff = |v: u32| colours[nma.nearest_marked_ancestor(v) as usize].unwrap();
                    let used = [eff(tau[0]), eff(tau[1]), eff(tau[2])];
                    let c = (0u8..4).find(|c| !used.contains(c)).unwrap();
                    for (i, leg) in legs.iter().enumerate() {
                        for (j, &v) in leg[..leg.len() - 1].iter().enumerate().rev() {
                            nma.mark(v);
                            colours[v as usize] = Some(c);
                            placement[v as usize] = Some(Placement {
                                tripod: ti,
                                leg: i as u8,
                                index: j as u32,
                            });
                        }
                    }

                    // build the up-to-3 child subproblems. Region
                    // `i` sits opposite leg `i`, bounded by `suf_i` (the
                    // part of `Pi` from leg `i`'s attach point to `Pi`'s
                    // own end — which meets `P_{i+1}`'s start), `pre_{i+1}`
                    // (the part of `P_{i+1}` from its start to leg `i+1`'s
                    // attach point), and the fresh "Q2" material formed by
                    // reversed leg `i+1` followed by leg `i`. Each leg's
                    // foot lies on its correspondingly-indexed bounding
                    // path (`Pi` for leg `i`) by the construction's colour
                    // invariant, so each split is local to a single path —
                    // no cross-path ring is needed. `index_map` was just
                    // re-stamped for this subproblem's own `p2` above (and
                    // already carries valid entries for `p0`/`p1`, inherited
                    // from an ancestor's stamp), so `untranslate` locates
                    // each foot in O(1) instead of a linear scan of `Pi`.
                    let bounds = [&p0, &p1, &p2];
                    let foot_pos: [usize; 3] = std::array::from_fn(|i| {
                        let foot = legs[i][legs[i].len() - 1];
                        bounds[i].untranslate(index_map[foot as usize])
                    });

                    let mut children = Vec::with_capacity(3);
                    for i in 0..3usize {
                        let next = (i + 1) % 3;
                        let leg_i = PathView::from_vec(legs[i][..legs[i].len() - 1].to_vec());
                        let leg_next_rev =
                            PathView::from_vec(legs[next][..legs[next].len() - 1].to_vec())
                                .reversed();
                        let q2 = leg_next_rev.concat(&leg_i);

                        let suf_i = bounds[i].slice(foot_pos[i], bounds[i].len());
                        let pre_next = bounds[next].slice(0, foot_pos[next] + 1);

                        let child_total = suf_i.len() + pre_next.len() + q2.len();
                        if child_total < 1 {
                            continue;
                        }
                        children.push(Subproblem {
                            parent_tripod: ti,
                            slot: i as u8,
                            paths: [suf_i, pre_next, q2],
                        });
                    }

                    if let Some((vertex, colour)) = pending_revert {
                        stack.push(StackItem::Revert { vertex, colour });
                    }
                    for child in children.into_iter().rev() {
                        stack.push(StackItem::Process(child));
                    }
                }
            }
        }

        let placement: Vec<Placement> = placement
            .into_iter()
            .map(|p| p.expect("every vertex must be owned by some tripod leg"))
            .collect();

        let out = TripodPartition { tripods, placement, tripod_tree };
        if options.verify {
            crate::verify::verify(rs, &out)?;
        }
        Ok(out)
    }
}

/// Walk up the BFS forest from `start` (inclusive) until (and including)
/// the first already-NMA-marked ancestor.
fn tripod_leg(forest: &Forest, nma: &NearestMarkedAncestor, start: u32) -> Vec<u32> {
    let mut out = vec![start];
    while !nma.is_marked(*out.last().unwrap()) {
        let v = *out.last().unwrap();
        let p = forest.parent(v);
        debug_assert!(p >= 0, "walked off the BFS forest without hitting a marked vertex");
        out.push(p as u32);
    }
    out
}

/// Find a trichromatic triangle bounding the unowned interior of the region
/// described by `p0`, `p1`, `p2`. Before returning, the 3 corners are
/// rotated so `tau[i]` carries the colour of `Pi[0]` (spec §4.5 step 3):
/// in linear mode the single portal's invariant already keeps its first
/// endpoint at colour(P0) and second at colour(P1) throughout the walk, so
/// the rotation is a no-op there, but worst-case mode's 3 independent
/// portals can each win with their corners in any order relative to
/// `P0,P1,P2` — without the rotation, whichever portal other than portal 0
/// wins hands back a triangle misaligned with the boundary order the rest
/// of step 4 onward assumes.
///
/// Linear mode walks a single portal edge `(p0[-1], p1[0])` through the
/// rotation system; each step moves to the third corner of the face on the
/// other side of the current edge, using each vertex's *effective* colour —
/// the colour of its nearest already-marked ancestor, read-only via
/// [`NearestMarkedAncestor::nearest_marked_ancestor`] — without mutating any
/// marks (those are only ever set once a vertex is committed to a tripod
/// leg; marking it here too would make a later leg-walk stop one vertex
/// short). Worst-case mode instead round-robins between 3 starting portals,
/// one per side, advancing each by one step per round — the same
/// termination guarantee with more even work.
///
/// Returns `None` only when `p0`, `p1` and `p2` are each a single vertex and
/// those three vertices already form a face of `rs` directly: that is the
/// one case where the handed-down region has no unowned interior left at
/// all (a tripod's own legs happened to bound a face exactly). Any other
/// trichromatic triangle the walk finds is a real answer, even when one of
/// its 3 corners turns out to already be owned — that is simply the
/// ordinary case of a leg whose foot lands on the current region's own
/// boundary, not an empty region (two of a tripod's three legs are often
/// exactly this: a single already-owned vertex).
fn find_sperner(
    rs: &RotationSystem,
    nma: &NearestMarkedAncestor,
    colours: &[Option<u8>],
    p0: &PathView,
    p1: &PathView,
    p2: &PathView,
    worst_case: bool,
) -> Result<Option<[u32; 3]>> {
    if p0.len() == 1 && p1.len() == 1 && p2.len() == 1 && rs.succ(p0.first(), p1.first()) == Some(p2.first()) {
        return Ok(None);
    }

    let eff = |v: u32| colours[nma.nearest_marked_ancestor(v) as usize].unwrap();
    let max_steps = 6 * rs.n() + 16;

    let mut edges: Vec<(u32, u32)> = if worst_case {
        vec![
            (p0.last(), p1.first()),
            (p1.last(), p2.first()),
            (p2.last(), p0.first()),
        ]
    } else {
        vec![(p0.last(), p1.first())]
    };

    for _ in 0..max_steps {
        for k in 0..edges.len() {
            let (u, v) = edges[k];
            let w = rs.succ(u, v).ok_or_else(|| {
                PartitionError::SpernerNotFound(p0.len() + p1.len() + p2.len())
            })?;
            let (cu, cv, cw) = (eff(u), eff(v), eff(w));
            if cw != cu && cw != cv {
                // rotate so tau[i] carries the colour of Pi[0] — the found
                // triangle's 3 colours are exactly {colour(P0), colour(P1),
                // colour(P2)} (the region's boundary invariant), just not
                // necessarily in (u,v,w) order once more than one portal is
                // in play.
                let target = [eff(p0.first()), eff(p1.first()), eff(p2.first())];
                let corners = [u, v, w];
                let corner_colours = [cu, cv, cw];
                let tau: [u32; 3] = std::array::from_fn(|i| {
                    let idx = corner_colours
                        .iter()
                        .position(|&c| c == target[i])
                        .expect("trichromatic triangle's colours must match the bounding paths' colours");
                    corners[idx]
                });
                return Ok(Some(tau));
            }
            if cw != cu {
                edges[k] = (u, w);
            } else if cw != cv {
                edges[k] = (w, v);
            } else {
                return Err(PartitionError::Verification(format!(
                    "Sperner walk edge ({u}, {v}) has equal colours on both ends"
                )));
            }
        }
    }
    Err(PartitionError::WalkOverrun(max_steps))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rotation::RotationBuilder;

    fn tetrahedron() -> (RotationSystem, [u32; 3]) {
        let mut b = RotationBuilder::new(4);
        b.add_face([0, 1, 2]).unwrap();
        b.add_face([0, 2, 3]).unwrap();
        b.add_face([0, 3, 1]).unwrap();
        b.add_face([1, 3, 2]).unwrap();
        (b.build().unwrap(), [0, 1, 2])
    }

    #[test]
    fn scenario_s1_tetrahedron_partitions_every_vertex() {
        let (rs, outer) = tetrahedron();
        let p = TripodPartition::build(&rs, outer, PartitionOptions::default()).unwrap();
        assert_eq!(p.placement.len(), 4);
        assert!(!p.tripods.is_empty());
    }

    #[test]
    fn rejects_non_face_outer_triangle() {
        let (rs, _) = tetrahedron();
        let err = TripodPartition::build(&rs, [0, 1, 3], PartitionOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            PartitionError::OuterFaceNotAFace(_) | PartitionError::OuterFaceNotCcw(_)
        ));
    }

    #[test]
    fn worst_case_mode_also_partitions_every_vertex() {
        let (rs, outer) = tetrahedron();
        let opts = PartitionOptions { worst_case: true, verify: false };
        let p = TripodPartition::build(&rs, outer, opts).unwrap();
        assert_eq!(p.placement.len(), 4);
    }
}
