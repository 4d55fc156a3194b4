//! Halo exchange for the horizontal velocity pair.
//!
//! Crossing a rotated edge turns the neighbour's x direction into this face's y
//! direction (or its negative), so the u halo is filled from v and vice versa. The
//! routing cannot be derived from the scalar adjacency alone and is tabulated here.

use super::{Target, Transfer};
use crate::geometry::{FaceId, Side};

use Component::{U, V};
use Side::{East as E, North as N, South as S, West as W};

/// A component of the horizontal velocity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Component {
    U = 0,
    V = 1,
}

impl Component {
    /// Position of this component in the `[u, v]` field pair.
    pub fn channel(self) -> usize {
        self as usize
    }
}

/// Where one velocity halo is filled from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Route {
    pub face: FaceId,
    pub side: Side,
    pub component: Component,
    pub source_face: FaceId,
    pub source_side: Side,
    pub source_component: Component,
    /// Factor applied after the transform.
    pub sign: f64,
    /// Transpose with tangential reversal.
    pub transpose: bool,
}

impl Route {
    /// Position of the route for `(face, side, component)` in `ROUTES`.
    pub fn key(face: FaceId, side: Side, component: Component) -> Option<usize> {
        let side = side.horizontal_index()?;
        Some(face.index() * 8 + side * 2 + component.channel())
    }

    pub fn transfer(&self) -> Transfer {
        Transfer {
            dest: Target {
                channel: self.component.channel(),
                face: self.face,
                side: self.side,
            },
            source: Target {
                channel: self.source_component.channel(),
                face: self.source_face,
                side: self.source_side,
            },
            sign: self.sign,
            transpose: self.transpose,
        }
    }
}

const fn route(
    face: u8,
    side: Side,
    component: Component,
    source: (u8, Side, Component),
    sign: f64,
    transpose: bool,
) -> Route {
    Route {
        face: FaceId::raw(face),
        side,
        component,
        source_face: FaceId::raw(source.0),
        source_side: source.1,
        source_component: source.2,
        sign,
        transpose,
    }
}

/// Routing table keyed by (face, side, component), see `Route::key`.
#[rustfmt::skip]
pub static ROUTES: [Route; 48] = [
    route(1, W, U, (5, N, V),  1.0, true),
    route(1, W, V, (5, N, U), -1.0, true),
    route(1, E, U, (2, W, U),  1.0, false),
    route(1, E, V, (2, W, V),  1.0, false),
    route(1, S, U, (6, N, U),  1.0, false),
    route(1, S, V, (6, N, V),  1.0, false),
    route(1, N, U, (3, W, V), -1.0, true),
    route(1, N, V, (3, W, U),  1.0, true),

    route(2, W, U, (1, E, U),  1.0, false),
    route(2, W, V, (1, E, V),  1.0, false),
    route(2, E, U, (4, S, V),  1.0, true),
    route(2, E, V, (4, S, U), -1.0, true),
    route(2, S, U, (6, E, V), -1.0, true),
    route(2, S, V, (6, E, U),  1.0, true),
    route(2, N, U, (3, S, U),  1.0, false),
    route(2, N, V, (3, S, V),  1.0, false),

    route(3, W, U, (1, N, V),  1.0, true),
    route(3, W, V, (1, N, U), -1.0, true),
    route(3, E, U, (4, W, U),  1.0, false),
    route(3, E, V, (4, W, V),  1.0, false),
    route(3, S, U, (2, N, U),  1.0, false),
    route(3, S, V, (2, N, V),  1.0, false),
    route(3, N, U, (5, W, V), -1.0, true),
    route(3, N, V, (5, W, U),  1.0, true),

    route(4, W, U, (3, E, U),  1.0, false),
    route(4, W, V, (3, E, V),  1.0, false),
    route(4, E, U, (6, S, V),  1.0, true),
    route(4, E, V, (6, S, U), -1.0, true),
    route(4, S, U, (2, E, V), -1.0, true),
    route(4, S, V, (2, E, U),  1.0, true),
    route(4, N, U, (5, S, U),  1.0, false),
    route(4, N, V, (5, S, V),  1.0, false),

    route(5, W, U, (3, N, V),  1.0, true),
    route(5, W, V, (3, N, U), -1.0, true),
    route(5, E, U, (6, W, U),  1.0, false),
    route(5, E, V, (6, W, V),  1.0, false),
    route(5, S, U, (4, N, U),  1.0, false),
    route(5, S, V, (4, N, V),  1.0, false),
    route(5, N, U, (1, W, V), -1.0, true),
    route(5, N, V, (1, W, U),  1.0, true),

    route(6, W, U, (5, E, U),  1.0, false),
    route(6, W, V, (5, E, V),  1.0, false),
    route(6, E, U, (2, S, V),  1.0, true),
    route(6, E, V, (2, S, U), -1.0, true),
    route(6, S, U, (4, E, V), -1.0, true),
    route(6, S, V, (4, E, U),  1.0, true),
    route(6, N, U, (1, S, U),  1.0, false),
    route(6, N, V, (1, S, V),  1.0, false),
];

/// Looks up the route filling `component`'s halo on `side` of `face`.
pub fn route_for(face: FaceId, side: Side, component: Component) -> Option<&'static Route> {
    Route::key(face, side, component).map(|key| &ROUTES[key])
}

/// The 48 side fills of a velocity pair, with `u` as channel 0 and `v` as channel 1.
pub fn transfers() -> Vec<Transfer> {
    ROUTES.iter().map(Route::transfer).collect()
}
