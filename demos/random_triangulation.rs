//! Generates a random planar triangulation by repeated stacked (Apollonian)
//! vertex insertion and runs it through [`tripod::TripodPartition`],
//! reporting basic shape stats. Not a Delaunay generator — only
//! combinatorial validity matters here, not a geometric realization.
//!
//! ```text
//! cargo run --example random_triangulation -- --vertices 5000 --seed 7
//! ```

use clap::Parser;
use rand::{rngs::SmallRng, Rng, SeedableRng};
use std::collections::HashMap;

use tripod::rotation::RotationSystem;
use tripod::{PartitionOptions, TripodPartition};

#[derive(Parser, Debug)]
struct Args {
    #[arg(long, default_value_t = 1000)]
    vertices: usize,
    #[arg(long, default_value_t = 0)]
    seed: u64,
    #[arg(long)]
    worst_case: bool,
    #[arg(long)]
    verify: bool,
}

/// Build a random triangulation on `n` vertices by starting from a single
/// outer triangle and repeatedly picking a uniformly random existing face,
/// inserting a fresh vertex inside it, and stitching the 3 new inner faces
/// into the `succ` table.
fn random_triangulation(n: usize, seed: u64) -> (RotationSystem, [u32; 3]) {
    assert!(n >= 3, "need at least a triangle");
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut succ: Vec<HashMap<u32, u32>> = vec![HashMap::new(); n];
    let mut faces: Vec<[u32; 3]> = Vec::with_capacity(2 * n);

    // Two faces share these 3 vertices at the start: an inner one that
    // gets subdivided as vertices are inserted, and the permanently
    // unbounded outer face (the reverse winding), which is returned to
    // the caller and never touched again.
    let inner = [0u32, 1, 2];
    let outer = [0u32, 2, 1];
    let mut set = |a: u32, b: u32, c: u32| {
        succ[a as usize].insert(b, c);
    };
    set(inner[0], inner[1], inner[2]);
    set(inner[1], inner[2], inner[0]);
    set(inner[2], inner[0], inner[1]);
    set(outer[0], outer[1], outer[2]);
    set(outer[1], outer[2], outer[0]);
    set(outer[2], outer[0], outer[1]);
    faces.push(inner);

    for x in 3..n as u32 {
        let face_idx = rng.gen_range(0..faces.len());
        let [a, b, c] = faces[face_idx];
        faces.swap_remove(face_idx);

        set(a, b, x);
        set(b, x, a);
        set(x, a, b);
        faces.push([a, b, x]);

        set(b, c, x);
        set(c, x, b);
        set(x, b, c);
        faces.push([b, c, x]);

        set(c, a, x);
        set(a, x, c);
        set(x, c, a);
        faces.push([c, a, x]);
    }

    let rs = RotationSystem::new(succ).expect("generator must produce a valid rotation system");
    (rs, outer)
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    let (rs, outer) = random_triangulation(args.vertices, args.seed);
    let options = PartitionOptions { worst_case: args.worst_case, verify: args.verify };
    let partition = TripodPartition::build(&rs, outer, options).expect("partition must succeed on generator output");

    println!("vertices: {}", rs.n());
    println!("tripods: {}", partition.tripods.len());
    let max_h3 = (0..partition.tripods.len() as u32)
        .map(|t| partition.h3parents(t).len())
        .max()
        .unwrap_or(0);
    println!("max H3 degree: {max_h3}");
}
