//! Boundary and halo slices of a face.
//!
//! Both kinds of slice are `halo` points deep along the side's normal axis, span the
//! face's interior along the tangential axis and the whole buffer (vertical halo
//! included) along z. Corner regions are never part of a slice.

use crate::field::{FaceBuffer, Location, Stagger};
use crate::geometry::{IndexSpace, IndexWindow, Side};

/// A slice of a face adjacent to one horizontal side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SideRegion {
    side: Side,
    window: IndexWindow<3>,
}

impl SideRegion {
    pub fn side(&self) -> Side {
        self.side
    }

    /// The region in face-local signed indices.
    pub fn window(&self) -> IndexWindow<3> {
        self.window
    }

    /// Extent in slab order: normal, tangential, vertical.
    pub fn shape(&self) -> [usize; 3] {
        let size = self.window.size;
        [
            size[self.side.axis()],
            size[self.side.tangential_axis()],
            size[2],
        ]
    }

    /// Face-local index of a point given in slab order.
    pub fn point(&self, slab: [usize; 3]) -> [isize; 3] {
        let mut result = self.window.origin;
        result[self.side.axis()] += slab[0] as isize;
        result[self.side.tangential_axis()] += slab[1] as isize;
        result[2] += slab[2] as isize;
        result
    }

    fn new(buffer: &FaceBuffer, side: Side, normal_origin: isize) -> Self {
        assert!(side.is_horizontal(), "{side} is not a horizontal side");

        let interior = buffer.interior();
        let halo = buffer.halo();
        let normal = side.axis();
        let tangent = side.tangential_axis();

        let mut origin = [0isize; 3];
        let mut size = [0usize; 3];

        origin[normal] = normal_origin;
        size[normal] = halo;
        origin[tangent] = 0;
        size[tangent] = interior[tangent];
        origin[2] = -(halo as isize);
        size[2] = interior[2] + 2 * halo;

        Self {
            side,
            window: IndexWindow::new(origin, size),
        }
    }
}

/// The interior points adjacent to `side`, which neighbouring faces copy into their halos.
///
/// Along a `Face` staggered normal axis the outermost point lies on the edge shared with
/// the neighbour, so it is skipped and the slice starts one point further in.
pub fn boundary(buffer: &FaceBuffer, side: Side, location: Location) -> SideRegion {
    let axis = side.axis();
    let points = buffer.interior()[axis] as isize;
    let halo = buffer.halo() as isize;

    let edge = match location.axis(axis) {
        Stagger::Center => 0,
        Stagger::Face => 1,
    };

    let origin = if side.is_positive() {
        points - edge - halo
    } else {
        edge
    };

    SideRegion::new(buffer, side, origin)
}

/// The ghost points on `side`, the destination of a halo fill.
pub fn halo(buffer: &FaceBuffer, side: Side, _location: Location) -> SideRegion {
    let points = buffer.interior()[side.axis()] as isize;
    let halo = buffer.halo() as isize;

    let origin = if side.is_positive() { points } else { -halo };

    SideRegion::new(buffer, side, origin)
}

/// Values of a side region copied out of a face, stored in slab order with the normal
/// axis fastest. Indices increase in the face's coordinate directions.
#[derive(Debug, Clone, PartialEq)]
pub struct Slab {
    shape: [usize; 3],
    data: Vec<f64>,
}

impl Slab {
    pub fn shape(&self) -> [usize; 3] {
        self.shape
    }

    fn space(&self) -> IndexSpace<3> {
        IndexSpace::new(self.shape)
    }

    pub fn get(&self, index: [usize; 3]) -> f64 {
        self.data[self.space().linear_from_cartesian(index)]
    }

    pub fn values(&self) -> &[f64] {
        &self.data
    }

    /// Re-expresses a slab taken across a rotated edge in the frame of the receiving
    /// face. In face coordinates this is a transpose followed by reversal of the
    /// destination's tangential axis; in slab coordinates only the tangential reversal
    /// remains.
    pub fn transposed(self) -> Self {
        let space = self.space();
        let [_, tangential, _] = self.shape;

        let data = space
            .iter()
            .map(|[n, t, z]| self.data[space.linear_from_cartesian([n, tangential - 1 - t, z])])
            .collect();

        Self {
            shape: self.shape,
            data,
        }
    }

    pub fn scale(&mut self, factor: f64) {
        self.data.iter_mut().for_each(|value| *value *= factor);
    }
}

/// Copies a region of a face into a slab.
pub fn gather(buffer: &FaceBuffer, region: &SideRegion) -> Slab {
    let shape = region.shape();
    let data = IndexSpace::new(shape)
        .iter()
        .map(|index| buffer.get(region.point(index)))
        .collect();

    Slab { shape, data }
}

/// Writes a slab into a region of a face. The shapes must agree.
pub fn scatter(buffer: &mut FaceBuffer, region: &SideRegion, slab: &Slab) {
    assert_eq!(region.shape(), slab.shape, "slab does not fit region");

    for (index, &value) in IndexSpace::new(slab.shape).iter().zip(&slab.data) {
        buffer.set(region.point(index), value);
    }
}
