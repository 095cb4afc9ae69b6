//! Error types for rotation-system validation, the text wire format, and the
//! `verify=true` internal-consistency assertions.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PartitionError {
    #[error("rotation system is not involutive at ({u}, {v}): succ[v][succ[u][v]] != u")]
    NonInvolutiveRotation { u: u32, v: u32 },

    #[error("rotation system has wrong total degree: expected {expected} (= 6n-12), got {actual}")]
    RotationDegreeMismatch { expected: usize, actual: usize },

    #[error("outer face {0:?} is not a face of the triangulation")]
    OuterFaceNotAFace([u32; 3]),

    #[error("outer face {0:?} is not oriented counter-clockwise")]
    OuterFaceNotCcw([u32; 3]),

    #[error("malformed wire input: {0}")]
    MalformedWireInput(String),

    #[error("internal consistency check failed: {0}")]
    Verification(String),

    #[error("Sperner triangle search did not terminate inside region bounded by {0} vertices; this indicates a corrupt colouring invariant")]
    SpernerNotFound(usize),

    #[error("Sperner walk exceeded {0} steps without converging; this indicates a corrupt colouring invariant")]
    WalkOverrun(usize),
}

pub type Result<T> = std::result::Result<T, PartitionError>;
