//! Filling halos across the edges of the cubed sphere.
//!
//! A fill is a list of `Transfer`s, each copying the boundary slice of one side into the
//! halo of another. Sources are always interior points and destinations are always
//! ghost points, so transfers within a fill are independent. They are executed in two
//! phases: every source slab is gathered (reading interiors only), then every slab is
//! scattered into its halo (each face writing only its own ghost points).

use crate::field::{FaceBuffer, Field, Location, Stagger};
use crate::geometry::{FaceId, Side};
use thiserror::Error;

#[cfg(feature = "parallel")]
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};

pub mod region;
pub mod scalar;
pub mod vector;
mod vertical;

pub use region::{boundary, gather, halo, scatter, SideRegion, Slab};
pub use vector::{Component, Route, ROUTES};
pub use vertical::{NoVertical, VerticalFill, ZeroGradient};

/// Errors raised while filling halos. None of these are recoverable within a fill.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HaloError {
    #[error(
        "field at {0} is a horizontal velocity component; fill it with `fill_horizontal_velocity_halos`"
    )]
    VectorLocation(Location),
    #[error(
        "halo of face {dest_face} {dest_side} has shape {expected:?}, but the boundary of face {source_face} {source_side} has shape {found:?}"
    )]
    ShapeMismatch {
        dest_face: FaceId,
        dest_side: Side,
        source_face: FaceId,
        source_side: Side,
        expected: [usize; 3],
        found: [usize; 3],
    },
    #[error("velocity components are stored on different grids")]
    GridMismatch,
    #[error(
        "expected velocity components at (Face, Center, ·) and (Center, Face, ·), found {u} and {v}"
    )]
    NotVelocityPair { u: Location, v: Location },
    #[error("transfer refers to field {channel}, but only {count} fields were given")]
    MissingChannel { channel: usize, count: usize },
}

/// One side of one face of one of the fields taking part in a fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Target {
    /// Index of the field within the fill (0 for scalars, 0 = u and 1 = v for velocities).
    pub channel: usize,
    pub face: FaceId,
    pub side: Side,
}

impl Target {
    pub fn scalar(face: FaceId, side: Side) -> Self {
        Self {
            channel: 0,
            face,
            side,
        }
    }
}

/// Fills the halo at `dest` from the boundary slice at `source`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transfer {
    pub dest: Target,
    pub source: Target,
    /// Factor applied after the transform.
    pub sign: f64,
    /// Whether the slab crosses a rotated edge.
    pub transpose: bool,
}

impl Transfer {
    /// Reads and transforms the source slab, checking it fits the destination halo.
    fn prepare(&self, fields: &[&Field]) -> Result<Slab, HaloError> {
        let field = |channel: usize| {
            fields.get(channel).copied().ok_or(HaloError::MissingChannel {
                channel,
                count: fields.len(),
            })
        };

        let source = field(self.source.channel)?;
        let dest = field(self.dest.channel)?;

        let source_buffer = source.face(self.source.face);
        let from = region::boundary(source_buffer, self.source.side, source.location());
        let to = region::halo(dest.face(self.dest.face), self.dest.side, dest.location());

        if from.shape() != to.shape() {
            return Err(HaloError::ShapeMismatch {
                dest_face: self.dest.face,
                dest_side: self.dest.side,
                source_face: self.source.face,
                source_side: self.source.side,
                expected: to.shape(),
                found: from.shape(),
            });
        }

        log::trace!(
            "Face {} {} halo <- face {} {} boundary (channel {} <- {}, sign {}, transpose {})",
            self.dest.face,
            self.dest.side,
            self.source.face,
            self.source.side,
            self.dest.channel,
            self.source.channel,
            self.sign,
            self.transpose
        );

        let mut slab = region::gather(source_buffer, &from);

        if self.transpose {
            slab = slab.transposed();
        }

        if self.sign != 1.0 {
            slab.scale(self.sign);
        }

        Ok(slab)
    }

    /// Executes this transfer on its own. `fields` is indexed by the channels of the
    /// source and destination targets.
    pub fn apply(&self, fields: &mut [&mut Field]) -> Result<(), HaloError> {
        let slab = {
            let readers = fields.iter().map(|field| &**field).collect::<Vec<_>>();
            self.prepare(&readers)?
        };

        let dest = &mut *fields[self.dest.channel];
        let location = dest.location();
        let buffer = dest.face_mut(self.dest.face);
        let to = region::halo(buffer, self.dest.side, location);
        region::scatter(buffer, &to, &slab);

        Ok(())
    }
}

/// Runs a set of transfers with disjoint destinations. Either every halo is written or,
/// if any transfer fails its shape check, none are.
pub fn exchange(fields: &mut [&mut Field], transfers: &[Transfer]) -> Result<(), HaloError> {
    let slabs = {
        let readers = fields.iter().map(|field| &**field).collect::<Vec<_>>();

        #[cfg(feature = "parallel")]
        let slabs = transfers
            .par_iter()
            .map(|transfer| transfer.prepare(&readers))
            .collect::<Result<Vec<_>, _>>()?;

        #[cfg(not(feature = "parallel"))]
        let slabs = transfers
            .iter()
            .map(|transfer| transfer.prepare(&readers))
            .collect::<Result<Vec<_>, _>>()?;

        slabs
    };

    for (channel, field) in fields.iter_mut().enumerate() {
        let location = field.location();

        let scatter_face = |(face, buffer): (FaceId, &mut FaceBuffer)| {
            for (transfer, slab) in transfers.iter().zip(&slabs) {
                if transfer.dest.channel == channel && transfer.dest.face == face {
                    let to = region::halo(buffer, transfer.dest.side, location);
                    region::scatter(buffer, &to, slab);
                }
            }
        };

        #[cfg(feature = "parallel")]
        field.faces_mut().par_iter_mut().for_each(scatter_face);

        #[cfg(not(feature = "parallel"))]
        field.faces_mut().iter_mut().for_each(scatter_face);
    }

    Ok(())
}

/// Refreshes every halo of a scalar field: the vertical halos of each face through
/// `vertical`, then the 24 horizontal halos from neighbouring faces.
///
/// Must be called after all interior values for the current stage are final, and
/// before any stencil reads the halo.
pub fn fill_halo_regions<V: VerticalFill + ?Sized>(
    field: &mut Field,
    vertical: &V,
) -> Result<(), HaloError> {
    let location = field.location();

    if location.is_horizontal_velocity() {
        log::warn!("Refusing scalar halo fill for velocity component at {location}");
        return Err(HaloError::VectorLocation(location));
    }

    #[cfg(feature = "parallel")]
    field
        .faces_mut()
        .par_iter_mut()
        .for_each(|(face, buffer)| vertical.fill_vertical(face, location, buffer));

    #[cfg(not(feature = "parallel"))]
    field
        .faces_mut()
        .iter_mut()
        .for_each(|(face, buffer)| vertical.fill_vertical(face, location, buffer));

    let transfers = scalar::transfers(field);
    exchange(&mut [field], &transfers)?;

    log::debug!("Filled {} scalar halos at {location}", transfers.len());

    Ok(())
}

/// Refreshes the horizontal halos of a velocity pair, rotating components across
/// rotated edges. Vertical halos are not touched.
pub fn fill_horizontal_velocity_halos(u: &mut Field, v: &mut Field) -> Result<(), HaloError> {
    let (lu, lv) = (u.location(), v.location());

    let is_u = lu.x == Stagger::Face && lu.y == Stagger::Center;
    let is_v = lv.x == Stagger::Center && lv.y == Stagger::Face;

    if !is_u || !is_v {
        return Err(HaloError::NotVelocityPair { u: lu, v: lv });
    }

    if u.grid() != v.grid() {
        return Err(HaloError::GridMismatch);
    }

    let transfers = vector::transfers();
    exchange(&mut [u, v], &transfers)?;

    log::debug!("Filled {} velocity halos", transfers.len());

    Ok(())
}
