//! Bottom and top halos. These never cross between faces, so they are filled from
//! each face's own data by an external collaborator implementing `VerticalFill`.

use crate::field::{FaceBuffer, Location};
use crate::geometry::{FaceId, IndexSpace};

/// Fills the bottom and top halo of a single face.
pub trait VerticalFill: Sync {
    fn fill_vertical(&self, face: FaceId, location: Location, buffer: &mut FaceBuffer);
}

/// Leaves vertical halos untouched, e.g. when a driver manages them itself.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoVertical;

impl VerticalFill for NoVertical {
    fn fill_vertical(&self, _face: FaceId, _location: Location, _buffer: &mut FaceBuffer) {}
}

/// Zero normal gradient: every vertical ghost point takes the value of the nearest
/// interior level in its column.
#[derive(Clone, Copy, Debug, Default)]
pub struct ZeroGradient;

impl VerticalFill for ZeroGradient {
    fn fill_vertical(&self, _face: FaceId, _location: Location, buffer: &mut FaceBuffer) {
        let halo = buffer.halo() as isize;
        let levels = buffer.interior()[2] as isize;
        let [sx, sy, _] = buffer.space().size();

        for [i, j] in IndexSpace::new([sx, sy]).iter() {
            let i = i as isize - halo;
            let j = j as isize - halo;

            let bottom = buffer.get([i, j, 0]);
            let top = buffer.get([i, j, levels - 1]);

            for k in 1..=halo {
                buffer.set([i, j, -k], bottom);
                buffer.set([i, j, levels - 1 + k], top);
            }
        }
    }
}
