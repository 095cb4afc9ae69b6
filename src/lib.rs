//! A tripod partition of a planar triangulation: a witness structure for
//! the Product Structure Theorem (Dujmović, Joret, Micek, Morin, Ueckerdt,
//! Wood, 2020). Given a planar triangulation as a combinatorial rotation
//! system, [`TripodPartition::build`] produces a partition of its vertices
//! into *tripods* — three vertex-disjoint root-ward paths meeting at a
//! shared base — such that contracting each tripod (H3) yields a graph of
//! treewidth at most 3, and contracting each tripod's individual legs (H8)
//! yields one of treewidth at most 8.
//!
//! The modules, leaves first:
//! - [`integer_set`]: an O(1)-query predecessor/successor set.
//! - [`bfs`]: a deterministic rooted BFS forest over a rotation system.
//! - [`nma`]: nearest-marked-ancestor queries built on the integer set and
//!   the BFS forest.
//! - [`path_view`]: O(1) shared-backing-array path slices.
//! - [`partition`]: the tripod-partition driver tying the rest together.
//!
//! [`wire`] implements a plain-text interchange format for triangulations
//! and partitions; [`verify`] implements the optional internal-consistency
//! checks run when [`PartitionOptions::verify`] is set; [`h3h8`] implements
//! the H3/H8 contraction queries and the tripod 4-colouring.

pub mod bfs;
pub mod error;
pub mod h3h8;
pub mod integer_set;
pub mod nma;
pub mod partition;
pub mod path_view;
pub mod rotation;
pub mod verify;
pub mod wire;

pub use error::{PartitionError, Result};
pub use partition::{Leg, PartitionOptions, Placement, Tripod, TripodPartition};
pub use rotation::{RotationBuilder, RotationSystem};
