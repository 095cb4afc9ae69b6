//! Integration scenarios exercised end to end through
//! [`TripodPartition::build`] rather than against individual components.

use std::collections::HashMap;

use tripod::rotation::{RotationBuilder, RotationSystem};
use tripod::{PartitionOptions, TripodPartition};

fn tetrahedron() -> (RotationSystem, [u32; 3]) {
    let mut b = RotationBuilder::new(4);
    b.add_face([0, 1, 2]).unwrap();
    b.add_face([0, 2, 3]).unwrap();
    b.add_face([0, 3, 1]).unwrap();
    b.add_face([1, 3, 2]).unwrap();
    (b.build().unwrap(), [0, 1, 2])
}

/// A single triangle has to carry both its faces (front and the reverse-
/// wound, permanently unbounded back) to satisfy the `6n-12` degree sum —
/// the same shape `demos/random_triangulation.rs` starts from.
fn single_triangle() -> (RotationSystem, [u32; 3]) {
    let mut b = RotationBuilder::new(3);
    b.add_face([0, 1, 2]).unwrap();
    b.add_face([0, 2, 1]).unwrap();
    (b.build().unwrap(), [0, 1, 2])
}

/// Stacked (Apollonian) random triangulation generator, mirroring
/// `demos/random_triangulation.rs` — duplicated here since bench/test
/// targets can't depend on an `[[example]]` binary.
fn random_triangulation(n: usize, seed: u64) -> (RotationSystem, [u32; 3]) {
    struct Xorshift(u64);
    impl Xorshift {
        fn next(&mut self) -> u64 {
            self.0 ^= self.0 << 13;
            self.0 ^= self.0 >> 7;
            self.0 ^= self.0 << 17;
            self.0
        }
        fn gen_range(&mut self, n: usize) -> usize {
            (self.next() % n as u64) as usize
        }
    }

    assert!(n >= 3);
    let mut rng = Xorshift(seed | 1);
    let mut succ: Vec<HashMap<u32, u32>> = vec![HashMap::new(); n];
    let mut faces: Vec<[u32; 3]> = Vec::with_capacity(2 * n);

    let inner = [0u32, 1, 2];
    let outer = [0u32, 2, 1];
    let mut set = |succ: &mut Vec<HashMap<u32, u32>>, a: u32, b: u32, c: u32| {
        succ[a as usize].insert(b, c);
    };
    set(&mut succ, inner[0], inner[1], inner[2]);
    set(&mut succ, inner[1], inner[2], inner[0]);
    set(&mut succ, inner[2], inner[0], inner[1]);
    set(&mut succ, outer[0], outer[1], outer[2]);
    set(&mut succ, outer[1], outer[2], outer[0]);
    set(&mut succ, outer[2], outer[0], outer[1]);
    faces.push(inner);

    for x in 3..n as u32 {
        let idx = rng.gen_range(faces.len());
        let [a, b, c] = faces[idx];
        faces.swap_remove(idx);
        set(&mut succ, a, b, x);
        set(&mut succ, b, x, a);
        set(&mut succ, x, a, b);
        faces.push([a, b, x]);
        set(&mut succ, b, c, x);
        set(&mut succ, c, x, b);
        set(&mut succ, x, b, c);
        faces.push([b, c, x]);
        set(&mut succ, c, a, x);
        set(&mut succ, a, x, c);
        set(&mut succ, x, c, a);
        faces.push([c, a, x]);
    }

    (RotationSystem::new(succ).unwrap(), outer)
}

/// Every vertex appears in exactly one placement slot, and that slot's
/// recorded leg entry really does hold that vertex.
fn assert_every_vertex_placed_once(rs: &RotationSystem, p: &TripodPartition) {
    let mut seen = vec![false; rs.n()];
    for (v, placement) in p.placement.iter().enumerate() {
        assert!(!seen[v], "vertex {v} placed twice");
        seen[v] = true;
        let leg = &p.tripods[placement.tripod as usize].legs[placement.leg as usize];
        assert_eq!(leg.vertices[placement.index as usize], v as u32);
    }
    assert!(seen.iter().all(|&s| s), "not every vertex was placed");
}

#[test]
fn tetrahedron_splits_into_two_tripods() {
    let (rs, outer) = tetrahedron();
    let opts = PartitionOptions { worst_case: false, verify: true };
    let p = TripodPartition::build(&rs, outer, opts).unwrap();

    assert_eq!(p.tripods.len(), 2, "tetrahedron should split into exactly 2 tripods");
    assert_every_vertex_placed_once(&rs, &p);

    // tripod 1 owns exactly one interior vertex, on a single leg.
    let interior_legs: Vec<_> = p.tripods[1]
        .legs
        .iter()
        .filter(|l| l.vertices.len() > 1)
        .collect();
    assert_eq!(interior_legs.len(), 1);
    assert_eq!(interior_legs[0].vertices.len(), 2);
}

#[test]
fn single_triangle_is_one_tripod() {
    let (rs, outer) = single_triangle();
    let p = TripodPartition::build(&rs, outer, PartitionOptions::default()).unwrap();
    assert_eq!(p.tripods.len(), 1);
    assert_every_vertex_placed_once(&rs, &p);
}

/// A handful of Euler-relation-satisfying inputs, checked for partition
/// coverage and internal consistency after construction.
#[test]
fn generic_inputs_satisfy_internal_consistency() {
    for (n, seed) in [(5usize, 1u64), (12, 2), (50, 3), (200, 4)] {
        let (rs, outer) = random_triangulation(n, seed);
        assert_eq!(rs.n(), n);
        let m: usize = (0..n as u32).map(|v| rs.degree(v)).sum::<usize>() / 2;
        assert_eq!(m, 3 * n - 6, "triangulation must satisfy Euler's relation");

        let p = TripodPartition::build(&rs, outer, PartitionOptions { worst_case: false, verify: true })
            .unwrap_or_else(|e| panic!("seed {seed}, n={n}: {e}"));
        assert_every_vertex_placed_once(&rs, &p);
    }
}

#[test]
fn large_random_triangulation_respects_treewidth_bounds() {
    let (rs, outer) = random_triangulation(1000, 42);
    let opts = PartitionOptions { worst_case: true, verify: true };
    let p = TripodPartition::build(&rs, outer, opts).unwrap();
    assert_every_vertex_placed_once(&rs, &p);

    for t in 0..p.tripods.len() as u32 {
        assert!(p.h3parents(t).len() <= 3);
        for i in 0..3u8 {
            assert!(p.h8parents(t, i).len() <= 8);
        }
    }
}

/// Both Sperner-search modes are deterministic and agree on the resulting
/// partition's shape (tripod count and leg lengths), even though
/// `worst_case` visits portal edges in a different order.
#[test]
fn both_search_modes_produce_equivalent_partitions() {
    let (rs, outer) = random_triangulation(300, 99);
    let linear = TripodPartition::build(&rs, outer, PartitionOptions { worst_case: false, verify: true }).unwrap();
    let worst = TripodPartition::build(&rs, outer, PartitionOptions { worst_case: true, verify: true }).unwrap();

    assert_eq!(linear.tripods.len(), worst.tripods.len());
    let mut linear_shapes: Vec<[usize; 3]> =
        linear.tripods.iter().map(|t| t.legs.clone().map(|l| l.vertices.len())).collect();
    let mut worst_shapes: Vec<[usize; 3]> =
        worst.tripods.iter().map(|t| t.legs.clone().map(|l| l.vertices.len())).collect();
    linear_shapes.sort();
    worst_shapes.sort();
    assert_eq!(linear_shapes, worst_shapes);
}

#[test]
fn rejects_non_ccw_outer_face() {
    let (rs, _) = tetrahedron();
    assert!(TripodPartition::build(&rs, [0, 2, 1], PartitionOptions::default()).is_err());
}
