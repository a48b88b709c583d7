//! Fixed-width binary codec for position snapshots.
//!
//! One record per node: two or three signed 32-bit little-endian integers in
//! the graph's enumeration order, with no header, separators, or trailing
//! metadata. The format does not describe its own dimensionality; the byte
//! length check at decode time is the only guard against a snapshot produced
//! under a different run configuration.

use crate::engine::{Graph, Position, SteppingEngine};
use crate::models::{LayoutError, Result};

/// Number of coordinates stored per record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimensionality {
    Two,
    Three,
}

impl Dimensionality {
    /// Coordinates per record.
    pub const fn coordinates(self) -> usize {
        match self {
            Self::Two => 2,
            Self::Three => 3,
        }
    }

    /// Bytes per record.
    pub const fn record_width(self) -> usize {
        self.coordinates() * 4
    }
}

/// Append one position record to `buf`: x, y, then z for 3-D runs.
pub fn encode_position(position: Position, dim: Dimensionality, buf: &mut Vec<u8>) {
    buf.extend_from_slice(&position.x.to_le_bytes());
    buf.extend_from_slice(&position.y.to_le_bytes());
    if dim == Dimensionality::Three {
        buf.extend_from_slice(&position.z.to_le_bytes());
    }
}

/// Read one position record starting at `offset`; `z` is 0 for 2-D runs.
///
/// Callers must have validated that `offset + record_width` is in bounds,
/// as [`decode_snapshot`] does for a whole buffer up front.
pub fn decode_position(bytes: &[u8], offset: usize, dim: Dimensionality) -> Position {
    let x = read_i32(bytes, offset);
    let y = read_i32(bytes, offset + 4);
    let z = match dim {
        Dimensionality::Two => 0,
        Dimensionality::Three => read_i32(bytes, offset + 8),
    };
    Position { x, y, z }
}

fn read_i32(bytes: &[u8], offset: usize) -> i32 {
    let mut raw = [0u8; 4];
    raw.copy_from_slice(&bytes[offset..offset + 4]);
    i32::from_le_bytes(raw)
}

/// Encode every node's current position, in enumeration order.
///
/// The result is exactly `node_count * record_width` bytes.
pub fn encode_snapshot<G, E>(graph: &G, engine: &E, dim: Dimensionality) -> Vec<u8>
where
    G: Graph,
    E: SteppingEngine<G::NodeId>,
{
    let mut buf = Vec::with_capacity(graph.node_count() * dim.record_width());
    for node in graph.nodes() {
        encode_position(engine.position(node), dim, &mut buf);
    }
    buf
}

/// Decode a snapshot and seed the engine, walking the same enumeration
/// order that was used at encode time.
///
/// Fails with [`LayoutError::FormatMismatch`] when the byte length does not
/// equal `node_count * record_width`, which is what a snapshot written with
/// a different dimensionality or a different graph looks like.
pub fn decode_snapshot<G, E>(
    bytes: &[u8],
    graph: &G,
    engine: &mut E,
    dim: Dimensionality,
) -> Result<()>
where
    G: Graph,
    E: SteppingEngine<G::NodeId>,
{
    let expected = graph.node_count() * dim.record_width();
    if bytes.len() != expected {
        return Err(LayoutError::FormatMismatch {
            expected,
            actual: bytes.len(),
        });
    }

    let mut offset = 0;
    for node in graph.nodes() {
        engine.set_position(node, decode_position(bytes, offset, dim));
        offset += dim.record_width();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct IndexGraph(usize);

    impl Graph for IndexGraph {
        type NodeId = usize;

        fn node_count(&self) -> usize {
            self.0
        }

        fn nodes(&self) -> impl Iterator<Item = usize> + '_ {
            0..self.0
        }
    }

    struct VecEngine(Vec<Position>);

    impl SteppingEngine<usize> for VecEngine {
        fn step(&mut self) {}

        fn position(&self, node: usize) -> Position {
            self.0[node]
        }

        fn set_position(&mut self, node: usize, position: Position) {
            self.0[node] = position;
        }
    }

    #[test]
    fn record_widths() {
        assert_eq!(Dimensionality::Two.record_width(), 8);
        assert_eq!(Dimensionality::Three.record_width(), 12);
    }

    #[test]
    fn position_round_trip_3d() {
        for p in [
            Position::new(0, 0, 0),
            Position::new(1, -2, 3),
            Position::new(i32::MAX, i32::MIN, -1),
        ] {
            let mut buf = Vec::new();
            encode_position(p, Dimensionality::Three, &mut buf);
            assert_eq!(buf.len(), 12);
            assert_eq!(decode_position(&buf, 0, Dimensionality::Three), p);
        }
    }

    #[test]
    fn position_round_trip_2d_drops_z() {
        let mut buf = Vec::new();
        encode_position(Position::new(-7, 9, 123), Dimensionality::Two, &mut buf);
        assert_eq!(buf.len(), 8);
        assert_eq!(
            decode_position(&buf, 0, Dimensionality::Two),
            Position::new(-7, 9, 0)
        );
    }

    #[test]
    fn layout_is_little_endian_xyz() {
        let mut buf = Vec::new();
        encode_position(Position::new(1, 2, -1), Dimensionality::Three, &mut buf);
        assert_eq!(
            buf,
            [1, 0, 0, 0, 2, 0, 0, 0, 0xFF, 0xFF, 0xFF, 0xFF]
        );
    }

    #[test]
    fn snapshot_round_trip() {
        let graph = IndexGraph(3);
        let source = VecEngine(vec![
            Position::new(10, -10, 5),
            Position::new(-1, 2, -3),
            Position::new(0, i32::MAX, i32::MIN),
        ]);

        for dim in [Dimensionality::Two, Dimensionality::Three] {
            let bytes = encode_snapshot(&graph, &source, dim);
            assert_eq!(bytes.len(), 3 * dim.record_width());

            let mut target = VecEngine(vec![Position::default(); 3]);
            decode_snapshot(&bytes, &graph, &mut target, dim).unwrap();

            for i in 0..3 {
                let mut want = source.0[i];
                if dim == Dimensionality::Two {
                    want.z = 0;
                }
                assert_eq!(target.0[i], want);
            }
        }
    }

    #[test]
    fn empty_graph_snapshot_is_empty() {
        let graph = IndexGraph(0);
        let engine = VecEngine(Vec::new());
        let bytes = encode_snapshot(&graph, &engine, Dimensionality::Three);
        assert!(bytes.is_empty());

        let mut target = VecEngine(Vec::new());
        decode_snapshot(&bytes, &graph, &mut target, Dimensionality::Three).unwrap();
    }

    #[test]
    fn length_mismatch_is_fatal() {
        let graph = IndexGraph(2);
        let mut engine = VecEngine(vec![Position::default(); 2]);

        // 3-D snapshot of two nodes decoded as 2-D: 24 bytes where 16 are
        // expected.
        let err = decode_snapshot(&[0u8; 24], &graph, &mut engine, Dimensionality::Two)
            .unwrap_err();
        match err {
            LayoutError::FormatMismatch { expected, actual } => {
                assert_eq!(expected, 16);
                assert_eq!(actual, 24);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
