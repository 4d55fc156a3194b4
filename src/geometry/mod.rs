//! Geometric primitives for the cubed sphere: face identifiers, the sides of a
//! face and signed index windows used to address halo cells.

mod face;
mod index;
mod side;

pub use face::{FaceArray, FaceId};
pub use index::{CartesianIter, IndexSpace, IndexWindow};
pub use side::{Dimension, Side, SideArray};
