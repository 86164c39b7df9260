use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::hex_grid::HexLayout;
use crate::world_state::{EnvironmentPalette, LocationKind, SpecialLocation};

pub const DEFAULT_FILENAME: &str = "hex_map_config.toml";
pub const DEFAULT_HEX_SIZE: f64 = 3.0;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("hexagon size must be a number, not missing")]
    MissingHexSize,
    #[error("hexagon size must be positive, got {0}")]
    NonPositiveHexSize(f64),
    #[error("{name} must be positive, got {value}")]
    NonPositiveDimension { name: &'static str, value: i64 },
    #[error("at least one environment is required")]
    EmptyEnvironments,
    #[error("environment {0:?} is listed more than once")]
    DuplicateEnvironment(String),
    #[error("none of the environments {0:?} has a terrain rule")]
    NoActiveRules(Vec<String>),
    #[error("special location at ({row}, {col}) is outside the {rows}x{cols} grid")]
    SpecialLocationOutOfBounds { row: usize, col: usize, rows: usize, cols: usize },
    #[error("more than one special location at ({row}, {col})")]
    DuplicateSpecialLocation { row: usize, col: usize },
    #[error("{count} special locations listed, at most {max} fit the catalog")]
    TooManySpecialLocations { count: usize, max: usize },
}

/// What the user asks for: dimensions, palette and optionally pre-placed special locations.
///
/// Serialized as TOML so a configuration can be written out and used again:
/// ```
/// # use hexmap::config::WorldConfig;
/// let config: WorldConfig = toml::from_str(r#"
///     rows = 3
///     cols = 3
///     size = 3.0
///     environments = [["plains", "green"]]
/// "#).unwrap();
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldConfig {
    pub rows: i64,
    pub cols: i64,
    pub size: Option<f64>,
    pub environments: Vec<(String, String)>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(default)]
    pub special_locations: Vec<SpecialLocation>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            rows: 10,
            cols: 10,
            size: Some(DEFAULT_HEX_SIZE),
            environments: Vec::new(),
            filename: None,
            special_locations: Vec::new(),
        }
    }
}

/// A configuration that passed every startup check.
#[derive(Debug, Clone)]
pub struct ValidatedConfig {
    pub layout: HexLayout,
    pub palette: EnvironmentPalette,
    pub special_locations: Vec<SpecialLocation>,
}

impl WorldConfig {
    pub fn filename(&self) -> &str {
        self.filename.as_deref().unwrap_or(DEFAULT_FILENAME)
    }

    pub fn validate(&self) -> Result<ValidatedConfig, ConfigError> {
        let size = self.size.ok_or(ConfigError::MissingHexSize)?;
        check_hex_size(size)?;
        let rows = positive("rows", self.rows)?;
        let cols = positive("cols", self.cols)?;

        if self.environments.is_empty() {
            return Err(ConfigError::EmptyEnvironments);
        }
        let palette = EnvironmentPalette::new(self.environments.clone()).map_err(ConfigError::DuplicateEnvironment)?;

        check_special_locations(&self.special_locations, rows, cols)?;

        Ok(ValidatedConfig {
            layout: HexLayout::new(rows, cols, size),
            palette,
            special_locations: self.special_locations.clone(),
        })
    }
}

/// Hex size must be a finite positive number.
pub(crate) fn check_hex_size(size: f64) -> Result<(), ConfigError> {
    if size.is_finite() && size > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositiveHexSize(size))
    }
}

/// Caller supplied special locations must lie on the grid, one per cell, and be no more than
/// the location catalog.
pub(crate) fn check_special_locations(locations: &[SpecialLocation], rows: usize, cols: usize) -> Result<(), ConfigError> {
    if locations.len() > LocationKind::CATALOG.len() {
        return Err(ConfigError::TooManySpecialLocations {
            count: locations.len(),
            max: LocationKind::CATALOG.len(),
        });
    }
    for (i, location) in locations.iter().enumerate() {
        let (row, col) = location.coords();
        if row >= rows || col >= cols {
            return Err(ConfigError::SpecialLocationOutOfBounds { row, col, rows, cols });
        }
        if locations[..i].iter().any(|other| other.coords() == (row, col)) {
            return Err(ConfigError::DuplicateSpecialLocation { row, col });
        }
    }
    Ok(())
}

fn positive(name: &'static str, value: i64) -> Result<usize, ConfigError> {
    match usize::try_from(value) {
        Ok(v) if v > 0 => Ok(v),
        _ => Err(ConfigError::NonPositiveDimension { name, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plains_config() -> WorldConfig {
        WorldConfig {
            rows: 3,
            cols: 3,
            environments: vec![("plains".to_owned(), "green".to_owned())],
            ..Default::default()
        }
    }

    #[test]
    fn missing_size_is_fatal() {
        let config = WorldConfig { size: None, ..plains_config() };
        assert_eq!(config.validate().unwrap_err(), ConfigError::MissingHexSize);
    }

    #[test]
    fn hex_size_must_be_finite_and_positive() {
        for size in [0.0, -1.5, f64::INFINITY, f64::NAN] {
            let config = WorldConfig { size: Some(size), ..plains_config() };
            assert!(matches!(config.validate().unwrap_err(), ConfigError::NonPositiveHexSize(_)), "{size}");
        }
    }

    #[test]
    fn non_positive_dimensions_are_fatal() {
        let config = WorldConfig { rows: 0, ..plains_config() };
        assert_eq!(
            config.validate().unwrap_err(),
            ConfigError::NonPositiveDimension { name: "rows", value: 0 }
        );
        let config = WorldConfig { cols: -2, ..plains_config() };
        assert_eq!(
            config.validate().unwrap_err(),
            ConfigError::NonPositiveDimension { name: "cols", value: -2 }
        );
    }

    #[test]
    fn empty_environments_are_fatal() {
        let config = WorldConfig { environments: vec![], ..plains_config() };
        assert_eq!(config.validate().unwrap_err(), ConfigError::EmptyEnvironments);
    }

    #[test]
    fn preset_locations_must_be_on_the_grid() {
        let config = WorldConfig {
            special_locations: vec![SpecialLocation { kind: LocationKind::Village, row: 3, col: 0 }],
            ..plains_config()
        };
        assert!(matches!(
            config.validate().unwrap_err(),
            ConfigError::SpecialLocationOutOfBounds { row: 3, col: 0, .. }
        ));
    }

    #[test]
    fn preset_locations_may_not_share_a_cell() {
        let config = WorldConfig {
            special_locations: vec![
                SpecialLocation { kind: LocationKind::Dungeon, row: 1, col: 1 },
                SpecialLocation { kind: LocationKind::Village, row: 1, col: 1 },
            ],
            ..plains_config()
        };
        assert_eq!(
            config.validate().unwrap_err(),
            ConfigError::DuplicateSpecialLocation { row: 1, col: 1 }
        );
    }

    #[test]
    fn preset_locations_are_capped_by_the_catalog() {
        let config = WorldConfig {
            special_locations: (0..4)
                .map(|col| SpecialLocation { kind: LocationKind::Village, row: 0, col })
                .collect(),
            rows: 4,
            cols: 4,
            ..plains_config()
        };
        assert_eq!(
            config.validate().unwrap_err(),
            ConfigError::TooManySpecialLocations { count: 4, max: 3 }
        );
    }

    #[test]
    fn default_filename_is_used_when_none_is_given() {
        assert_eq!(plains_config().filename(), DEFAULT_FILENAME);
    }
}
