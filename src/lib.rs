//! offline-layout - checkpointed driver for long-running graph layout runs.
//!
//! ## Architecture
//!
//! The crate drives an external, deterministic stepping engine to a
//! configured iteration count, persisting full position snapshots along the
//! way so an interrupted run can pick up where it left off:
//!
//! - [`engine`]: collaborator traits for the graph and the stepping engine
//! - [`codec`]: fixed-width little-endian record codec for snapshots
//! - [`store`]: directory of `<iteration>.bin` / `positions.bin` files
//! - [`resume`]: pure fresh/resume/refuse decision logic
//! - [`driver`]: the iteration loop tying the above together
//!
//! ## Snapshot format
//!
//! One record per node in the graph's enumeration order, each record two or
//! three signed 32-bit little-endian integers. No header, no checksum, no
//! dimensionality tag: writer and reader must agree on the run
//! configuration, and the enumeration order must be stable between a save
//! pass and any later load pass.

pub mod codec;
pub mod driver;
pub mod engine;
pub mod models;
pub mod resume;
pub mod store;

// Re-exports for convenience
pub use codec::Dimensionality;
pub use driver::{DriverState, LayoutDriver, RunOutcome};
pub use engine::{Graph, Position, SteppingEngine};
pub use models::{ConfigError, LayoutConfig, LayoutError, Result};
pub use resume::ResumePlan;
pub use store::{CheckpointStore, Snapshot};
