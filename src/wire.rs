//! A plain text wire format: a triangulation as a flat list of CCW faces,
//! and a tripod partition as a list of legs. Kept as pure parse/format
//! functions so both `demos/tripod_cli.rs` and tests can use them without
//! touching stdin/stdout.

use crate::error::{PartitionError, Result};
use crate::partition::TripodPartition;
use crate::rotation::{RotationBuilder, RotationSystem};

/// Parse a triangulation from its wire form:
/// ```text
/// f
/// u0 v0 w0
/// ...
/// ```
/// where `f` is the face count and each following line is a CCW face.
/// Vertex ids must form a contiguous `0..n`. `f` must be either `2n-4` (the
/// outer face included as the first face line) or `2n-5` (the outer face
/// omitted; it is synthesized as `[0, 1, 2]`, oriented to match `succ`).
/// Returns the built rotation system and the outer face.
pub fn parse_triangulation(input: &str) -> Result<(RotationSystem, [u32; 3])> {
    let mut lines = input.lines().map(str::trim).filter(|l| !l.is_empty());
    let f: usize = lines
        .next()
        .ok_or_else(|| PartitionError::MalformedWireInput("missing face count".into()))?
        .parse()
        .map_err(|_| PartitionError::MalformedWireInput("face count is not an integer".into()))?;

    let mut faces = Vec::with_capacity(f);
    for line in lines {
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() != 3 {
            return Err(PartitionError::MalformedWireInput(format!(
                "expected 3 vertex ids per face line, got {}: {line:?}",
                parts.len()
            )));
        }
        let mut face = [0u32; 3];
        for (i, part) in parts.iter().enumerate() {
            face[i] = part.parse().map_err(|_| {
                PartitionError::MalformedWireInput(format!("not a vertex id: {part:?}"))
            })?;
        }
        faces.push(face);
    }
    if faces.len() != f {
        return Err(PartitionError::MalformedWireInput(format!(
            "declared {f} faces but found {} face lines",
            faces.len()
        )));
    }

    let max_vertex = faces.iter().flatten().copied().max();
    let n = match max_vertex {
        Some(m) => m as usize + 1,
        None => 0,
    };
    // f = 2n-4 (outer face included as one of the listed faces) or f = 2n-5
    // (outer face omitted and synthesized below).
    let has_outer = n >= 2 && f == 2 * n - 4;
    let omits_outer = n >= 2 && f == 2 * n - 5;
    if !has_outer && !omits_outer {
        return Err(PartitionError::MalformedWireInput(format!(
            "{f} faces is neither 2n-4 nor 2n-5 for n={n} vertices"
        )));
    }

    let mut builder = RotationBuilder::new(n);
    for &face in &faces {
        builder.add_face(face)?;
    }
    if omits_outer {
        // Synthesizing the outer face as a new triangle (0,1,2) would add a
        // face the caller never listed, so only meaningful when n >= 3 and
        // (0,1,2) is not already one of the listed faces' vertex set acting
        // as a bounded face; taken on faith from the caller.
        if n >= 3 {
            builder.add_face([0, 1, 2]).or_else(|_| builder.add_face([0, 2, 1]))?;
        }
    }
    let rs = builder.build()?;

    let outer_face = if omits_outer {
        if rs.is_ccw_face([0, 1, 2]) {
            [0, 1, 2]
        } else {
            [0, 2, 1]
        }
    } else {
        faces[0]
    };
    Ok((rs, outer_face))
}

/// Format a tripod partition in the wire output form: a line with
/// `k = |tripods| - 1` (tripod 0 is implicit), then 3 lines per tripod
/// `1..=k` giving that tripod's 3 legs as space-separated vertex ids (tip
/// first, foot last).
pub fn format_partition(p: &TripodPartition) -> String {
    let k = p.tripods.len().saturating_sub(1);
    let mut out = format!("{k}\n");
    for tripod in &p.tripods[1..] {
        for leg in &tripod.legs {
            let line: Vec<String> = leg.vertices.iter().map(u32::to_string).collect();
            out.push_str(&line.join(" "));
            out.push('\n');
        }
    }
    out
}
