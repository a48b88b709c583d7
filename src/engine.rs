//! Collaborator traits for the graph and the stepping engine.
//!
//! The driver owns no layout physics. It consumes an opaque graph that can
//! enumerate its nodes in a stable order, and a stepping engine that owns
//! per-node position state and advances it one unit at a time.

/// A single node position, in signed 32-bit integer coordinates.
///
/// `z` is carried unconditionally; two-dimensional runs ignore it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }
}

/// Node enumeration consumed by the driver.
///
/// `nodes` must yield every node exactly once, in an order that is stable
/// across calls and across process restarts for the same graph. Snapshot
/// records carry no node ids, so decode correctness depends entirely on the
/// load pass visiting nodes in the same order as the save pass.
pub trait Graph {
    type NodeId: Copy;

    fn node_count(&self) -> usize;

    fn nodes(&self) -> impl Iterator<Item = Self::NodeId> + '_;
}

/// The external simulation that owns position state.
///
/// The driver is the only caller during a run; no concurrent access to the
/// engine's state is assumed.
pub trait SteppingEngine<Id> {
    /// Advance the simulation by one unit of work.
    fn step(&mut self);

    fn position(&self, node: Id) -> Position;

    fn set_position(&mut self, node: Id, position: Position);
}
