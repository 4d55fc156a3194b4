//! Halo exchange on a cubed-sphere grid.
//!
//! The sphere is tiled by six logically rectangular faces. Finite volume stencils near
//! the edge of a face need values from the neighbouring face, which are copied into a
//! band of ghost cells (the halo) around every face. Where two faces meet with rotated
//! local frames the copied slice is transposed and reversed, and velocity components
//! are additionally swapped and negated.
//!
//! ```no_run
//! use cubesphere_halo::prelude::*;
//! use std::sync::Arc;
//!
//! let grid = Arc::new(CubedSphereGrid::new([32, 32, 8], 2)?);
//! let mut tracer = Field::new(grid.clone(), Location::CENTER);
//! tracer.set_interior(|face, [i, j, k]| (face.number() as usize + i + j + k) as f64);
//! fill_halo_regions(&mut tracer, &ZeroGradient)?;
//!
//! let mut u = Field::new(grid.clone(), Location::U);
//! let mut v = Field::new(grid, Location::V);
//! fill_horizontal_velocity_halos(&mut u, &mut v)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod field;
pub mod geometry;
pub mod grid;
pub mod halo;
pub mod topology;

/// Provides the types used by most halo exchange drivers.
pub mod prelude {
    pub use crate::field::{Exchange, FaceBuffer, Field, Location, Stagger};
    pub use crate::geometry::{FaceArray, FaceId, Side, SideArray};
    pub use crate::grid::{CubedSphereGrid, GridConfig, GridError};
    pub use crate::halo::{
        fill_halo_regions, fill_horizontal_velocity_halos, Component, HaloError, NoVertical,
        VerticalFill, ZeroGradient,
    };
    pub use crate::topology::{CubedSphereTopology, Neighbor, TopologyError};
}
