//! Per-face storage for a field on the cubed sphere.

use crate::geometry::{FaceArray, FaceId, IndexSpace, Side, SideArray};
use crate::grid::CubedSphereGrid;
use std::fmt::{self, Display};
use std::sync::Arc;

/// Where a field is sampled along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
pub enum Stagger {
    /// Cell centers, `n` points along an axis with `n` cells.
    #[default]
    Center,
    /// Cell faces, `n + 1` points along an axis with `n` cells. The first and last
    /// points lie on the edges of the face.
    Face,
}

impl Stagger {
    /// Number of interior points along an axis with `cells` cells.
    pub fn points(self, cells: usize) -> usize {
        match self {
            Stagger::Center => cells,
            Stagger::Face => cells + 1,
        }
    }
}

/// Staggering of a field along x, y and z.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
pub struct Location {
    pub x: Stagger,
    pub y: Stagger,
    pub z: Stagger,
}

impl Location {
    /// Tracers and other cell centered scalars.
    pub const CENTER: Self = Self::new(Stagger::Center, Stagger::Center, Stagger::Center);
    /// Location of the x component of horizontal velocity.
    pub const U: Self = Self::new(Stagger::Face, Stagger::Center, Stagger::Center);
    /// Location of the y component of horizontal velocity.
    pub const V: Self = Self::new(Stagger::Center, Stagger::Face, Stagger::Center);

    pub const fn new(x: Stagger, y: Stagger, z: Stagger) -> Self {
        Self { x, y, z }
    }

    pub fn axis(self, axis: usize) -> Stagger {
        match axis {
            0 => self.x,
            1 => self.y,
            2 => self.z,
            _ => panic!("axis {axis} out of range"),
        }
    }

    /// Is this one of the two horizontal velocity staggerings, `(Face, Center, ·)` or
    /// `(Center, Face, ·)`? Halos at these locations carry vector components and must be
    /// filled as a pair.
    pub fn is_horizontal_velocity(self) -> bool {
        matches!(
            (self.x, self.y),
            (Stagger::Face, Stagger::Center) | (Stagger::Center, Stagger::Face)
        )
    }

    /// Number of interior points along each axis for a grid with `cells` cells per axis.
    pub fn points(self, cells: [usize; 3]) -> [usize; 3] {
        [
            self.x.points(cells[0]),
            self.y.points(cells[1]),
            self.z.points(cells[2]),
        ]
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:?}, {:?}, {:?})", self.x, self.y, self.z)
    }
}

/// Boundary condition metadata for a horizontal side of a face: the face and side
/// whose boundary slice fills this side's halo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Exchange {
    pub to_face: FaceId,
    pub to_side: Side,
}

/// A single contiguous buffer holding a face's interior and halo.
///
/// Points are addressed with signed indices relative to the first interior point, so
/// halo points lie at `-halo..0` and `interior..interior + halo` along each axis.
#[derive(Debug, Clone, PartialEq)]
pub struct FaceBuffer {
    data: Vec<f64>,
    interior: [usize; 3],
    halo: usize,
}

impl FaceBuffer {
    pub fn new(interior: [usize; 3], halo: usize) -> Self {
        let space = Self::space_for(interior, halo);

        Self {
            data: vec![0.0; space.index_count()],
            interior,
            halo,
        }
    }

    fn space_for(interior: [usize; 3], halo: usize) -> IndexSpace<3> {
        IndexSpace::new(interior.map(|n| n + 2 * halo))
    }

    /// Number of interior points along each axis.
    pub fn interior(&self) -> [usize; 3] {
        self.interior
    }

    pub fn halo(&self) -> usize {
        self.halo
    }

    /// Index space of the whole buffer, halo included.
    pub fn space(&self) -> IndexSpace<3> {
        Self::space_for(self.interior, self.halo)
    }

    /// Converts a signed point index into a storage offset.
    pub fn offset(&self, index: [isize; 3]) -> usize {
        let halo = self.halo as isize;

        let cartesian = std::array::from_fn(|axis| {
            let shifted = index[axis] + halo;
            debug_assert!(shifted >= 0, "index {index:?} lies outside the halo");
            shifted as usize
        });

        self.space().linear_from_cartesian(cartesian)
    }

    pub fn get(&self, index: [isize; 3]) -> f64 {
        self.data[self.offset(index)]
    }

    pub fn set(&mut self, index: [isize; 3], value: f64) {
        let offset = self.offset(index);
        self.data[offset] = value;
    }

    pub fn storage(&self) -> &[f64] {
        &self.data
    }

    pub fn storage_mut(&mut self) -> &mut [f64] {
        &mut self.data
    }
}

/// A field stored on every face of a cubed-sphere grid.
#[derive(Debug, Clone)]
pub struct Field {
    grid: Arc<CubedSphereGrid>,
    location: Location,
    faces: FaceArray<FaceBuffer>,
    exchanges: FaceArray<SideArray<Exchange>>,
}

impl Field {
    /// Allocates a zeroed field. The exchange metadata of each side is taken from the
    /// grid's topology.
    pub fn new(grid: Arc<CubedSphereGrid>, location: Location) -> Self {
        let interior = location.points(grid.size());
        let halo = grid.halo();

        let faces = FaceArray::from_fn(|_| FaceBuffer::new(interior, halo));
        let exchanges = FaceArray::from_fn(|face| {
            let neighbors = grid.topology().sides(face);
            SideArray::from_fn(|side| {
                let neighbor = neighbors[side];
                Exchange {
                    to_face: neighbor.face,
                    to_side: neighbor.side,
                }
            })
        });

        Self {
            grid,
            location,
            faces,
            exchanges,
        }
    }

    pub fn grid(&self) -> &Arc<CubedSphereGrid> {
        &self.grid
    }

    pub fn location(&self) -> Location {
        self.location
    }

    pub fn face(&self, face: FaceId) -> &FaceBuffer {
        &self.faces[face]
    }

    pub fn face_mut(&mut self, face: FaceId) -> &mut FaceBuffer {
        &mut self.faces[face]
    }

    pub fn faces(&self) -> &FaceArray<FaceBuffer> {
        &self.faces
    }

    pub fn faces_mut(&mut self) -> &mut FaceArray<FaceBuffer> {
        &mut self.faces
    }

    /// Which face and side supply the halo on `side` of `face`.
    pub fn exchange(&self, face: FaceId, side: Side) -> Exchange {
        self.exchanges[face][side]
    }

    pub fn get(&self, face: FaceId, index: [isize; 3]) -> f64 {
        self.faces[face].get(index)
    }

    pub fn set(&mut self, face: FaceId, index: [isize; 3], value: f64) {
        self.faces[face].set(index, value)
    }

    /// Sets every interior point from a function of the face and point index.
    pub fn set_interior<F: FnMut(FaceId, [usize; 3]) -> f64>(&mut self, mut f: F) {
        for (face, buffer) in self.faces.iter_mut() {
            for index in IndexSpace::new(buffer.interior()).iter() {
                buffer.set(index.map(|i| i as isize), f(face, index));
            }
        }
    }
}
