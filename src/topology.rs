//! The adjacency graph between the six faces of the cubed sphere.
//!
//! Each horizontal side of each face is glued to exactly one side of another face.
//! When the two sides are normal to different axes the neighbouring face's local
//! frame is rotated by 90° relative to this one, and data crossing the edge must be
//! transposed and reversed.

use crate::geometry::{FaceArray, FaceId, Side, SideArray};
use thiserror::Error;

/// The face and side on the other side of an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Neighbor {
    pub face: FaceId,
    pub side: Side,
    /// Whether crossing this edge rotates the local coordinate frame by 90°.
    pub rotated: bool,
}

impl Neighbor {
    /// Builds the neighbor entry for `side`, classifying the rotation from the dimensions
    /// of the two sides.
    pub fn across(side: Side, face: FaceId, to_side: Side) -> Self {
        Self {
            face,
            side: to_side,
            rotated: !side.same_dimension(to_side),
        }
    }
}

/// Errors raised when an adjacency table does not describe a closed cube.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TopologyError {
    #[error("face {face} {side} is vertical and has no neighbouring face")]
    VerticalSide { face: FaceId, side: Side },
    #[error("face {face} {side} is connected to itself")]
    SelfLoop { face: FaceId, side: Side },
    #[error(
        "face {face} {side} is glued to face {to_face} {to_side}, which lies at the same end of its axis"
    )]
    SameOrientation {
        face: FaceId,
        side: Side,
        to_face: FaceId,
        to_side: Side,
    },
    #[error(
        "face {face} {side} points to face {to_face} {to_side}, which points back to face {back_face} {back_side}"
    )]
    Asymmetric {
        face: FaceId,
        side: Side,
        to_face: FaceId,
        to_side: Side,
        back_face: FaceId,
        back_side: Side,
    },
    #[error(
        "face {face} {side} is marked rotated={rotated}, but sides {side} and {to_side} imply otherwise"
    )]
    RotationFlag {
        face: FaceId,
        side: Side,
        to_side: Side,
        rotated: bool,
    },
}

/// Static adjacency table for the six faces.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CubedSphereTopology {
    neighbors: FaceArray<SideArray<Neighbor>>,
}

impl CubedSphereTopology {
    /// Builds a topology from an explicit table, checking that it is closed, symmetric
    /// and consistently rotated.
    pub fn new(neighbors: FaceArray<SideArray<Neighbor>>) -> Result<Self, TopologyError> {
        let result = Self { neighbors };
        result.validate()?;
        Ok(result)
    }

    #[cfg(test)]
    pub(crate) fn unchecked(neighbors: FaceArray<SideArray<Neighbor>>) -> Self {
        Self { neighbors }
    }

    /// The reference unfolding of the cube. Odd faces continue east into the next face
    /// and are rotated across their north and west edges, even faces continue north and
    /// are rotated across their east and south edges.
    pub fn standard() -> Self {
        let table: [[(u8, Side); 4]; 6] = [
            // west, east, south, north
            [(5, Side::North), (2, Side::West), (6, Side::North), (3, Side::West)],
            [(1, Side::East), (4, Side::South), (6, Side::East), (3, Side::South)],
            [(1, Side::North), (4, Side::West), (2, Side::North), (5, Side::West)],
            [(3, Side::East), (6, Side::South), (2, Side::East), (5, Side::South)],
            [(3, Side::North), (6, Side::West), (4, Side::North), (1, Side::West)],
            [(5, Side::East), (2, Side::South), (4, Side::East), (1, Side::South)],
        ];

        let neighbors = FaceArray::from_fn(|face| {
            let row = table[face.index()];
            SideArray::from_fn(|side| {
                let (number, to_side) = row[side.horizontal_index().unwrap_or_default()];
                Neighbor::across(side, FaceId::raw(number), to_side)
            })
        });

        Self { neighbors }
    }

    /// Returns the neighbor across a horizontal side of `face`. Bottom and top halos are
    /// filled from the face itself, so vertical sides have no neighbor.
    pub fn neighbor(&self, face: FaceId, side: Side) -> Result<Neighbor, TopologyError> {
        self.neighbors[face]
            .get(side)
            .copied()
            .ok_or(TopologyError::VerticalSide { face, side })
    }

    /// All four neighbors of `face`.
    pub fn sides(&self, face: FaceId) -> &SideArray<Neighbor> {
        &self.neighbors[face]
    }

    /// Iterates every `(face, side, neighbor)` entry of the table.
    pub fn iter(&self) -> impl Iterator<Item = (FaceId, Side, Neighbor)> + '_ {
        self.neighbors
            .iter()
            .flat_map(|(face, sides)| sides.iter().map(move |(side, &n)| (face, side, n)))
    }

    /// Checks the invariants of the adjacency table.
    ///
    /// Each entry is first checked on its own, then against its partner. Edges must join a
    /// side at the upper end of its axis to one at the lower end: slabs are laid out in
    /// increasing face coordinates, so only such pairs match ghost depth to boundary depth.
    pub fn validate(&self) -> Result<(), TopologyError> {
        for (face, side, neighbor) in self.iter() {
            if !neighbor.side.is_horizontal() {
                return Err(TopologyError::VerticalSide {
                    face: neighbor.face,
                    side: neighbor.side,
                });
            }

            if neighbor.face == face {
                return Err(TopologyError::SelfLoop { face, side });
            }

            if neighbor.rotated == side.same_dimension(neighbor.side) {
                return Err(TopologyError::RotationFlag {
                    face,
                    side,
                    to_side: neighbor.side,
                    rotated: neighbor.rotated,
                });
            }

            if side.is_positive() == neighbor.side.is_positive() {
                return Err(TopologyError::SameOrientation {
                    face,
                    side,
                    to_face: neighbor.face,
                    to_side: neighbor.side,
                });
            }
        }

        for (face, side, neighbor) in self.iter() {
            let back = self.neighbors[neighbor.face][neighbor.side];

            if back.face != face || back.side != side {
                return Err(TopologyError::Asymmetric {
                    face,
                    side,
                    to_face: neighbor.face,
                    to_side: neighbor.side,
                    back_face: back.face,
                    back_side: back.side,
                });
            }
        }

        Ok(())
    }
}

impl Default for CubedSphereTopology {
    fn default() -> Self {
        Self::standard()
    }
}
