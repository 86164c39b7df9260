//! Saving and loading worlds as TOML documents.
//!
//! A document holds everything needed to show the same map again:
//! ```toml
//! rows = 2
//! cols = 2
//! size = 3.0
//! grid = [["ocean", "plains"], ["plains", "forest"]]
//! environments = [["ocean", "blue"], ["plains", "lightgreen"], ["forest", "green"]]
//!
//! [[special_locations]]
//! type = "dungeon"
//! row = 1
//! col = 0
//! ```
//! Events are not part of the document; they are handed out again after loading.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::config::{self, ConfigError};
use crate::hex_grid::HexLayout;
use crate::world_state::{EnvironmentPalette, EventTable, SpecialLocation, TerrainGrid, WorldState};

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("file {} not found", .0.display())]
    MissingFile(PathBuf),
    #[error("could not access {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed world document")]
    Parse(#[from] toml::de::Error),
    #[error("could not serialize world")]
    Serialize(#[from] toml::ser::Error),
    #[error("grid is not {rows}x{cols}")]
    GridShape { rows: usize, cols: usize },
    #[error("terrain {0:?} in the grid has no environment entry")]
    UnknownTerrain(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct WorldDocument {
    rows: usize,
    cols: usize,
    size: f64,
    grid: Vec<Vec<String>>,
    environments: Vec<(String, String)>,
    #[serde(default)]
    special_locations: Vec<SpecialLocation>,
}

pub fn save_to_string(world: &WorldState) -> Result<String, PersistenceError> {
    let document = WorldDocument {
        rows: world.rows(),
        cols: world.cols(),
        size: world.size(),
        grid: world.grid().as_rows().to_vec(),
        environments: world.palette().entries().to_vec(),
        special_locations: world.special_locations().to_vec(),
    };
    Ok(toml::to_string(&document)?)
}

/// Rebuilds a world exactly as saved; the grid is used verbatim. The event table is empty.
pub fn load_from_str(text: &str) -> Result<WorldState, PersistenceError> {
    let document: WorldDocument = toml::from_str(text)?;

    config::check_hex_size(document.size)?;
    if document.environments.is_empty() {
        return Err(ConfigError::EmptyEnvironments.into());
    }
    let palette = EnvironmentPalette::new(document.environments).map_err(ConfigError::DuplicateEnvironment)?;

    let shape_error = PersistenceError::GridShape { rows: document.rows, cols: document.cols };
    if document.rows == 0 || document.cols == 0 || document.grid.len() != document.rows {
        return Err(shape_error);
    }
    let grid = TerrainGrid::from_rows(document.grid, document.cols).ok_or(shape_error)?;
    if let Some((_, terrain)) = grid.iter().find(|(_, terrain)| !palette.contains(terrain)) {
        return Err(PersistenceError::UnknownTerrain(terrain.to_owned()));
    }

    config::check_special_locations(&document.special_locations, document.rows, document.cols)?;

    Ok(WorldState {
        layout: HexLayout::new(document.rows, document.cols, document.size),
        grid,
        palette,
        special_locations: document.special_locations,
        events: EventTable::default(),
    })
}

pub fn save_to_file(world: &WorldState, path: impl AsRef<Path>) -> Result<(), PersistenceError> {
    let path = path.as_ref();
    let text = save_to_string(world)?;
    fs::write(path, text).map_err(|source| PersistenceError::Io { path: path.to_owned(), source })?;
    info!(path = %path.display(), "world saved");
    Ok(())
}

pub fn load_from_file(path: impl AsRef<Path>) -> Result<WorldState, PersistenceError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => PersistenceError::MissingFile(path.to_owned()),
        _ => PersistenceError::Io { path: path.to_owned(), source },
    })?;
    let world = load_from_str(&text)?;
    info!(path = %path.display(), rows = world.rows(), cols = world.cols(), "world loaded");
    Ok(world)
}
