//! The cubed-sphere grid: six faces sharing an interior size and halo width, glued
//! together by a `CubedSphereTopology`.

use crate::geometry::{FaceId, Side};
use crate::topology::{CubedSphereTopology, Neighbor, TopologyError};
use std::path::Path;
use thiserror::Error;

/// Errors raised while building a grid.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("grid size {0:?} must be non-zero along every axis")]
    EmptyAxis([usize; 3]),
    #[error("halo width must be at least one")]
    NoHalo,
    #[error("halo width {halo} exceeds the horizontal interior size {size:?}")]
    HaloTooWide { halo: usize, size: [usize; 3] },
    #[error("invalid face topology: {0}")]
    Topology(#[from] TopologyError),
}

/// Errors raised while loading a grid configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Serializable description of a grid.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GridConfig {
    /// Number of interior cells along x, y and z on every face.
    pub size: [usize; 3],
    /// Width of the halo on every side.
    pub halo: usize,
    /// Verbosity for tools that build grids from this config (0 = off, 4 = trace).
    #[serde(default)]
    pub logging_level: Option<usize>,
}

impl GridConfig {
    pub fn new(size: [usize; 3], halo: usize) -> Self {
        Self {
            size,
            halo,
            logging_level: None,
        }
    }

    /// Deserialize a config from a toml file.
    pub fn import_toml(path: &Path) -> Result<Self, ConfigError> {
        let string = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&string)?)
    }

    /// Checks that the config describes a grid with a well defined boundary slice on every side.
    pub fn validate(&self) -> Result<(), GridError> {
        if self.size.contains(&0) {
            return Err(GridError::EmptyAxis(self.size));
        }

        if self.halo == 0 {
            return Err(GridError::NoHalo);
        }

        // A boundary slice is `halo` cells deep, which must fit inside the interior.
        if self.halo > self.size[0] || self.halo > self.size[1] {
            return Err(GridError::HaloTooWide {
                halo: self.halo,
                size: self.size,
            });
        }

        Ok(())
    }
}

/// Six logically rectangular faces tiling the sphere. Built once and immutable thereafter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CubedSphereGrid {
    size: [usize; 3],
    halo: usize,
    topology: CubedSphereTopology,
}

impl CubedSphereGrid {
    /// Builds a grid using the standard cube unfolding.
    pub fn new(size: [usize; 3], halo: usize) -> Result<Self, GridError> {
        Self::with_topology(size, halo, CubedSphereTopology::standard())
    }

    pub fn from_config(config: &GridConfig) -> Result<Self, GridError> {
        Self::new(config.size, config.halo)
    }

    /// Builds a grid with a custom adjacency table. The table is validated here so
    /// malformed topologies never reach a halo fill.
    pub fn with_topology(
        size: [usize; 3],
        halo: usize,
        topology: CubedSphereTopology,
    ) -> Result<Self, GridError> {
        GridConfig::new(size, halo).validate()?;
        topology.validate()?;

        log::debug!(
            "Built cubed sphere grid: {}x{}x{} cells per face, halo {}",
            size[0],
            size[1],
            size[2],
            halo
        );

        Ok(Self {
            size,
            halo,
            topology,
        })
    }

    /// Number of interior cells along each axis of a face.
    pub fn size(&self) -> [usize; 3] {
        self.size
    }

    pub fn halo(&self) -> usize {
        self.halo
    }

    pub fn topology(&self) -> &CubedSphereTopology {
        &self.topology
    }

    /// Shorthand for `self.topology().neighbor(face, side)`.
    pub fn neighbor(&self, face: FaceId, side: Side) -> Result<Neighbor, TopologyError> {
        self.topology.neighbor(face, side)
    }
}
