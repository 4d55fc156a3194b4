//! Halo exchange for scalar fields.

use super::{Target, Transfer};
use crate::field::Field;
use crate::geometry::{FaceId, Side};

/// The 24 side fills of a scalar field, one per face and horizontal side.
///
/// Each halo is filled from the boundary slice named by the field's exchange metadata.
/// Sides in the same dimension copy directly; otherwise the neighbour's frame is rotated
/// and the slice is transposed with the tangential axis reversed.
pub fn transfers(field: &Field) -> Vec<Transfer> {
    FaceId::all()
        .flat_map(|face| {
            Side::HORIZONTAL.map(|side| {
                let exchange = field.exchange(face, side);

                Transfer {
                    dest: Target::scalar(face, side),
                    source: Target::scalar(exchange.to_face, exchange.to_side),
                    sign: 1.0,
                    transpose: !side.same_dimension(exchange.to_side),
                }
            })
        })
        .collect()
}
