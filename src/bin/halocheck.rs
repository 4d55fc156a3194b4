//! Builds a grid from a config file and checks that scalar and velocity halo fills
//! reproduce the face adjacency and routing table.

use anyhow::{anyhow, Context, Result};
use clap::{Arg, Command};
use cubesphere_halo::halo::{self, vector, Component};
use cubesphere_halo::prelude::*;
use std::path::PathBuf;
use std::sync::Arc;

fn configure() -> Result<GridConfig> {
    let matches = Command::new("halocheck")
        .about("Checks cubed sphere halo exchange for a given grid configuration.")
        .version("v0.1.0")
        .arg(
            Arg::new("path")
                .help("Path of the grid config file (toml)")
                .value_name("PATH")
                .required(true),
        )
        .get_matches();

    let path = matches
        .get_one::<String>("path")
        .ok_or(anyhow!("Failed to specify path argument"))?;

    GridConfig::import_toml(&PathBuf::from(path))
        .with_context(|| format!("Failed to load grid config {path}"))
}

/// Largest deviation of a side's halo from `expected`, over interior levels only.
/// Velocity fills leave the vertical halo alone, so the ghost levels of the boundary
/// slice carry whatever the driver last wrote there.
fn halo_deviation(field: &Field, face: FaceId, side: Side, expected: f64) -> f64 {
    let buffer = field.face(face);
    let region = halo::halo(buffer, side, field.location());
    let levels = 0..buffer.interior()[2] as isize;

    region
        .window()
        .iter()
        .filter(|index| levels.contains(&index[2]))
        .map(|index| (buffer.get(index) - expected).abs())
        .fold(0.0, f64::max)
}

fn check_scalar(grid: &Arc<CubedSphereGrid>) -> Result<f64> {
    let mut field = Field::new(grid.clone(), Location::CENTER);
    field.set_interior(|face, _| face.number() as f64);
    fill_halo_regions(&mut field, &ZeroGradient)?;

    let mut worst = 0.0f64;

    for face in FaceId::all() {
        for side in Side::HORIZONTAL {
            let source = field.exchange(face, side).to_face;
            worst = worst.max(halo_deviation(&field, face, side, source.number() as f64));
        }
    }

    Ok(worst)
}

fn check_velocity(grid: &Arc<CubedSphereGrid>) -> Result<f64> {
    let value = |face: FaceId, component: Component| match component {
        Component::U => face.number() as f64,
        Component::V => 10.0 * face.number() as f64,
    };

    let mut u = Field::new(grid.clone(), Location::U);
    let mut v = Field::new(grid.clone(), Location::V);
    u.set_interior(|face, _| value(face, Component::U));
    v.set_interior(|face, _| value(face, Component::V));
    fill_horizontal_velocity_halos(&mut u, &mut v)?;

    let mut worst = 0.0f64;

    for route in vector::ROUTES.iter() {
        let field = match route.component {
            Component::U => &u,
            Component::V => &v,
        };
        let expected = route.sign * value(route.source_face, route.source_component);
        worst = worst.max(halo_deviation(field, route.face, route.side, expected));
    }

    Ok(worst)
}

fn main() -> Result<()> {
    let config = configure()?;

    let level = match config.logging_level.unwrap_or(2) {
        0 => log::LevelFilter::Off,
        1 => log::LevelFilter::Warn,
        2 => log::LevelFilter::Info,
        3 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    env_logger::builder().filter_level(level).init();

    let grid = Arc::new(CubedSphereGrid::from_config(&config).context("Invalid grid config")?);
    let [nx, ny, nz] = grid.size();
    log::info!("Grid: {nx}x{ny}x{nz} cells per face, halo {}", grid.halo());

    let scalar = check_scalar(&grid).context("Scalar halo fill failed")?;
    log::info!("Scalar halo deviation: {scalar:.3e}");

    let velocity = check_velocity(&grid).context("Velocity halo fill failed")?;
    log::info!("Velocity halo deviation: {velocity:.3e}");

    anyhow::ensure!(
        scalar == 0.0 && velocity == 0.0,
        "Halo fill does not reproduce the face topology"
    );

    log::info!("All halos consistent.");

    Ok(())
}
