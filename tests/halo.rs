use cubesphere_halo::halo::{self, scalar, vector, Component, SideRegion, Transfer};
use cubesphere_halo::prelude::*;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::sync::Arc;

fn face(number: u8) -> FaceId {
    FaceId::new(number).unwrap()
}

fn grid(size: [usize; 3], halo: usize) -> Arc<CubedSphereGrid> {
    Arc::new(CubedSphereGrid::new(size, halo).unwrap())
}

/// A value unique to each point of each face.
fn id(face: FaceId, [i, j, k]: [usize; 3]) -> f64 {
    (face.number() as usize * 1_000_000 + i * 10_000 + j * 100 + k) as f64
}

/// Horizontal slice of a region at level `z`, indexed `[x][y]` in face coordinates.
fn face_frame(buffer: &FaceBuffer, region: &SideRegion, z: isize) -> Vec<Vec<f64>> {
    let window = region.window();

    (0..window.size[0] as isize)
        .map(|a| {
            (0..window.size[1] as isize)
                .map(|b| buffer.get([window.origin[0] + a, window.origin[1] + b, z]))
                .collect()
        })
        .collect()
}

fn transpose(matrix: &[Vec<f64>]) -> Vec<Vec<f64>> {
    let rows = matrix.len();
    let cols = matrix[0].len();
    (0..cols)
        .map(|c| (0..rows).map(|r| matrix[r][c]).collect())
        .collect()
}

/// The documented transform: direct copy between sides of the same dimension, otherwise
/// transpose and reverse the destination's tangential axis.
fn reference(source: &[Vec<f64>], from: Side, to: Side, sign: f64) -> Vec<Vec<f64>> {
    let mut result = if from.same_dimension(to) {
        source.to_vec()
    } else {
        let mut transposed = transpose(source);
        match to {
            // Tangential axis is y, the inner index.
            Side::West | Side::East => transposed.iter_mut().for_each(|row| row.reverse()),
            // Tangential axis is x, the outer index.
            _ => transposed.reverse(),
        }
        transposed
    };

    result
        .iter_mut()
        .flat_map(|row| row.iter_mut())
        .for_each(|value| *value *= sign);
    result
}

/// Checks one filled halo against the reference transform at every level.
fn assert_side(
    dest: &Field,
    dest_target: (FaceId, Side),
    source: &Field,
    route: (FaceId, Side, f64),
) {
    let (dest_face, dest_side) = dest_target;
    let (source_face, source_side, sign) = route;

    let dest_buffer = dest.face(dest_face);
    let source_buffer = source.face(source_face);
    let to = halo::halo(dest_buffer, dest_side, dest.location());
    let from = halo::boundary(source_buffer, source_side, source.location());

    let window = to.window();
    for z in window.origin[2]..window.origin[2] + window.size[2] as isize {
        let slice = face_frame(source_buffer, &from, z);
        let expected = reference(&slice, source_side, dest_side, sign);
        let found = face_frame(dest_buffer, &to, z);
        assert_eq!(
            found, expected,
            "face {dest_face} {dest_side} at level {z} does not match face {source_face} {source_side}"
        );
    }
}

#[test]
fn scalar_fill_matches_reference_transform() {
    let grid = grid([4, 4, 2], 2);
    let mut field = Field::new(grid.clone(), Location::CENTER);
    field.set_interior(id);

    fill_halo_regions(&mut field, &ZeroGradient).unwrap();

    for (f, side, neighbor) in grid.topology().iter() {
        assert_side(&field, (f, side), &field, (neighbor.face, neighbor.side, 1.0));
    }
}

#[test]
fn same_dimension_copy_is_exact() {
    let mut field = Field::new(grid([5, 5, 1], 2), Location::CENTER);
    field.set_interior(id);
    fill_halo_regions(&mut field, &NoVertical).unwrap();

    // Face 2 west halo holds face 1's two easternmost columns, in order.
    for j in 0..5 {
        for (ghost, source) in [(-2, 3), (-1, 4)] {
            assert_eq!(
                field.get(face(2), [ghost, j as isize, 0]),
                id(face(1), [source, j, 0])
            );
        }
    }

    // Face 3 south halo holds face 2's northernmost rows.
    for i in 0..5 {
        assert_eq!(field.get(face(3), [i as isize, -1, 0]), id(face(2), [i, 4, 0]));
        assert_eq!(field.get(face(3), [i as isize, -2, 0]), id(face(2), [i, 3, 0]));
    }
}

#[test]
fn corner_halo_points_are_untouched() {
    let mut field = Field::new(grid([4, 4, 1], 1), Location::CENTER);
    field.set_interior(|_, _| 1.0);
    fill_halo_regions(&mut field, &NoVertical).unwrap();

    for f in FaceId::all() {
        for corner in [[-1, -1], [-1, 4], [4, -1], [4, 4]] {
            assert_eq!(field.get(f, [corner[0], corner[1], 0]), 0.0);
        }
    }
}

#[test]
fn staggered_scalar_fill() {
    // Corner located fields are not velocity components, so the scalar path applies.
    let location = Location::new(Stagger::Face, Stagger::Face, Stagger::Center);
    let grid = grid([4, 4, 1], 2);
    let mut field = Field::new(grid.clone(), location);
    field.set_interior(id);

    fill_halo_regions(&mut field, &ZeroGradient).unwrap();

    for (f, side, neighbor) in grid.topology().iter() {
        assert_side(&field, (f, side), &field, (neighbor.face, neighbor.side, 1.0));
    }

    // Points on the shared edge are not copied: face 2's west halo starts one point in
    // from face 1's east edge.
    assert_eq!(field.get(face(2), [-1, 2, 0]), id(face(1), [3, 2, 0]));
    assert_eq!(field.get(face(2), [-2, 2, 0]), id(face(1), [2, 2, 0]));
}

#[test]
fn velocity_routes_reproduce_table() {
    let grid = grid([4, 4, 2], 2);
    let mut u = Field::new(grid.clone(), Location::U);
    let mut v = Field::new(grid, Location::V);
    u.set_interior(|f, index| 2.0 * id(f, index));
    v.set_interior(|f, index| 2.0 * id(f, index) + 1.0);

    fill_horizontal_velocity_halos(&mut u, &mut v).unwrap();

    let field = |component: Component| match component {
        Component::U => &u,
        Component::V => &v,
    };

    for route in vector::ROUTES.iter() {
        assert_side(
            field(route.component),
            (route.face, route.side),
            field(route.source_component),
            (route.source_face, route.source_side, route.sign),
        );
    }
}

#[test]
fn velocity_routes_with_face_constants() {
    let grid = grid([4, 4, 1], 1);
    let mut u = Field::new(grid.clone(), Location::U);
    let mut v = Field::new(grid, Location::V);
    u.set_interior(|f, _| f.number() as f64);
    v.set_interior(|f, _| 10.0 * f.number() as f64);

    fill_horizontal_velocity_halos(&mut u, &mut v).unwrap();

    for route in vector::ROUTES.iter() {
        let (dest, source_value) = match (route.component, route.source_component) {
            (Component::U, Component::U) => (&u, route.source_face.number() as f64),
            (Component::U, Component::V) => (&u, 10.0 * route.source_face.number() as f64),
            (Component::V, Component::U) => (&v, route.source_face.number() as f64),
            (Component::V, Component::V) => (&v, 10.0 * route.source_face.number() as f64),
        };

        // The vertical halo is not part of a velocity fill, so only interior levels of
        // the source carry the constant.
        let buffer = dest.face(route.face);
        let region = halo::halo(buffer, route.side, dest.location());
        for index in region.window().iter().filter(|index| index[2] == 0) {
            assert_eq!(buffer.get(index), route.sign * source_value, "{route:?}");
        }
    }
}

#[test]
fn fill_is_idempotent() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut field = Field::new(grid([6, 6, 3], 2), Location::CENTER);
    field.set_interior(|_, _| rng.random::<f64>());

    fill_halo_regions(&mut field, &ZeroGradient).unwrap();
    let first = field.clone();
    fill_halo_regions(&mut field, &ZeroGradient).unwrap();

    assert_eq!(field.faces(), first.faces());
}

#[test]
fn transfer_order_does_not_matter() {
    let mut rng = StdRng::seed_from_u64(42);
    let grid = grid([5, 5, 2], 2);

    let mut u = Field::new(grid.clone(), Location::U);
    let mut v = Field::new(grid.clone(), Location::V);
    u.set_interior(|_, _| rng.random_range(-1.0..1.0));
    v.set_interior(|_, _| rng.random_range(-1.0..1.0));

    let (mut u2, mut v2) = (u.clone(), v.clone());
    fill_horizontal_velocity_halos(&mut u, &mut v).unwrap();

    let mut transfers: Vec<Transfer> = vector::transfers();
    transfers.shuffle(&mut rng);
    for transfer in &transfers {
        transfer.apply(&mut [&mut u2, &mut v2]).unwrap();
    }

    assert_eq!(u.faces(), u2.faces());
    assert_eq!(v.faces(), v2.faces());

    // Same for a scalar, one side at a time in reverse order.
    let mut c = Field::new(grid, Location::CENTER);
    c.set_interior(|_, _| rng.random::<f64>());
    let mut c2 = c.clone();

    fill_halo_regions(&mut c, &NoVertical).unwrap();
    for transfer in scalar::transfers(&c2).iter().rev() {
        transfer.apply(&mut [&mut c2]).unwrap();
    }

    assert_eq!(c.faces(), c2.faces());
}

#[test]
fn east_boundary_reaches_west_halo() -> eyre::Result<()> {
    let grid = Arc::new(CubedSphereGrid::new([4, 4, 1], 1)?);
    let mut field = Field::new(grid, Location::CENTER);

    let buffer = field.face_mut(face(1));
    let region = halo::boundary(buffer, Side::East, Location::CENTER);
    for index in region.window().iter() {
        buffer.set(index, 7.0);
    }

    fill_halo_regions(&mut field, &ZeroGradient)?;

    let buffer = field.face(face(2));
    let region = halo::halo(buffer, Side::West, Location::CENTER);
    for index in region.window().iter() {
        assert_eq!(buffer.get(index), 7.0);
    }

    Ok(())
}

#[test]
fn rotated_edge_swaps_components() -> eyre::Result<()> {
    let grid = Arc::new(CubedSphereGrid::new([4, 4, 1], 1)?);
    let mut u = Field::new(grid.clone(), Location::U);
    let mut v = Field::new(grid, Location::V);

    // Face 1's north boundary v values feed face 3's west u halo unchanged.
    let buffer = v.face_mut(face(1));
    let region = halo::boundary(buffer, Side::North, Location::V);
    for index in region.window().iter() {
        buffer.set(index, 3.0);
    }

    // Face 3's west boundary v values feed face 1's north u halo negated.
    let buffer = v.face_mut(face(3));
    let region = halo::boundary(buffer, Side::West, Location::V);
    for index in region.window().iter() {
        buffer.set(index, 3.0);
    }

    fill_horizontal_velocity_halos(&mut u, &mut v)?;

    let buffer = u.face(face(3));
    let region = halo::halo(buffer, Side::West, Location::U);
    for index in region.window().iter() {
        assert_eq!(buffer.get(index), 3.0);
    }

    let buffer = u.face(face(1));
    let region = halo::halo(buffer, Side::North, Location::U);
    for index in region.window().iter() {
        assert_eq!(buffer.get(index), -3.0);
    }

    Ok(())
}
