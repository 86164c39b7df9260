use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::hex_grid::{points_approx_eq, GridCoords, HexLayout, Point};

/// Rectangular `rows x cols` array of terrain class names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerrainGrid {
    rows: usize,
    cols: usize,
    cells: Vec<Vec<String>>,
}

impl TerrainGrid {
    /// Wraps already shaped rows. Returns `None` if any row is not `cols` long.
    pub fn from_rows(cells: Vec<Vec<String>>, cols: usize) -> Option<Self> {
        if cells.iter().any(|row| row.len() != cols) {
            return None;
        }
        Some(Self { rows: cells.len(), cols, cells })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }
    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, (row, col): GridCoords) -> Option<&str> {
        self.cells.get(row)?.get(col).map(String::as_str)
    }

    /// Row-major iterator over every cell and its terrain class.
    pub fn iter(&self) -> impl Iterator<Item = (GridCoords, &str)> + '_ {
        self.cells.iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .map(move |(col, terrain)| ((row, col), terrain.as_str()))
        })
    }

    pub fn as_rows(&self) -> &[Vec<String>] {
        &self.cells
    }
}

/// Ordered terrain class to display color mapping. Names are unique.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EnvironmentPalette {
    entries: Vec<(String, String)>,
}

impl EnvironmentPalette {
    /// Builds a palette, returning the first repeated name on failure.
    pub fn new(entries: Vec<(String, String)>) -> Result<Self, String> {
        for (i, (name, _)) in entries.iter().enumerate() {
            if entries[..i].iter().any(|(other, _)| other == name) {
                return Err(name.clone());
            }
        }
        Ok(Self { entries })
    }

    pub fn color_of(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(env, _)| env == name)
            .map(|(_, color)| color.as_str())
    }
    pub fn contains(&self, name: &str) -> bool {
        self.color_of(name).is_some()
    }
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(name, _)| name.as_str())
    }
    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }
}

/// The kinds of special location, in the order they are handed out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LocationKind {
    #[serde(rename = "dungeon")]
    Dungeon,
    #[serde(rename = "wizard tower")]
    WizardTower,
    #[serde(rename = "village")]
    Village,
}

impl LocationKind {
    pub const CATALOG: [LocationKind; 3] = [LocationKind::Dungeon, LocationKind::WizardTower, LocationKind::Village];

    pub fn name(self) -> &'static str {
        match self {
            LocationKind::Dungeon => "dungeon",
            LocationKind::WizardTower => "wizard tower",
            LocationKind::Village => "village",
        }
    }
}

impl fmt::Display for LocationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A unique point of interest bound to one land cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialLocation {
    #[serde(rename = "type")]
    pub kind: LocationKind,
    pub row: usize,
    pub col: usize,
}

impl SpecialLocation {
    pub fn coords(&self) -> GridCoords {
        (self.row, self.col)
    }
}

/// Narrative events keyed by the cell that triggers them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EventTable {
    events: BTreeMap<GridCoords, String>,
}

impl EventTable {
    pub fn insert(&mut self, coords: GridCoords, event: impl Into<String>) {
        self.events.insert(coords, event.into());
    }
    pub fn get(&self, coords: GridCoords) -> Option<&str> {
        self.events.get(&coords).map(String::as_str)
    }
    pub fn len(&self) -> usize {
        self.events.len()
    }
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
    pub fn iter(&self) -> impl Iterator<Item = (GridCoords, &str)> + '_ {
        self.events.iter().map(|(coords, event)| (*coords, event.as_str()))
    }

    /// Compares `center` against the canonical center of every event cell.
    pub fn event_at(&self, layout: &HexLayout, center: Point) -> Option<(GridCoords, &str)> {
        self.iter()
            .find(|(coords, _)| points_approx_eq(layout.center_of(*coords), center))
    }
}

/// A generated or loaded world. Never mutated after construction: updates build a new value.
#[derive(Debug, Clone)]
pub struct WorldState {
    pub(crate) layout: HexLayout,
    pub(crate) grid: TerrainGrid,
    pub(crate) palette: EnvironmentPalette,
    pub(crate) special_locations: Vec<SpecialLocation>,
    pub(crate) events: EventTable,
}

impl WorldState {
    pub fn rows(&self) -> usize {
        self.layout.rows()
    }
    pub fn cols(&self) -> usize {
        self.layout.cols()
    }
    pub fn size(&self) -> f64 {
        self.layout.size()
    }
    pub fn layout(&self) -> &HexLayout {
        &self.layout
    }
    pub fn grid(&self) -> &TerrainGrid {
        &self.grid
    }
    pub fn palette(&self) -> &EnvironmentPalette {
        &self.palette
    }
    pub fn special_locations(&self) -> &[SpecialLocation] {
        &self.special_locations
    }
    pub fn events(&self) -> &EventTable {
        &self.events
    }

    /// Same world with a different event table.
    pub fn with_events(self, events: EventTable) -> Self {
        Self { events, ..self }
    }

    pub fn special_location_at(&self, coords: GridCoords) -> Option<&SpecialLocation> {
        self.special_locations.iter().find(|location| location.coords() == coords)
    }
}

/// Equality over the persisted fields; `size` is compared with tolerance and events are ignored.
impl PartialEq for WorldState {
    fn eq(&self, other: &Self) -> bool {
        self.rows() == other.rows()
            && self.cols() == other.cols()
            && crate::hex_grid::approx_eq(self.size(), other.size())
            && self.grid == other.grid
            && self.palette == other.palette
            && self.special_locations == other.special_locations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(name: &str, color: &str) -> (String, String) {
        (name.to_owned(), color.to_owned())
    }

    #[test]
    fn palette_rejects_repeated_names() {
        let result = EnvironmentPalette::new(vec![pair("ocean", "blue"), pair("plains", "green"), pair("ocean", "navy")]);
        assert_eq!(result, Err("ocean".to_owned()));
    }

    #[test]
    fn palette_keeps_insertion_order() {
        let palette = EnvironmentPalette::new(vec![pair("plains", "green"), pair("ocean", "blue")]).unwrap();
        assert_eq!(palette.names().collect::<Vec<_>>(), ["plains", "ocean"]);
        assert_eq!(palette.color_of("ocean"), Some("blue"));
        assert_eq!(palette.color_of("lake"), None);
    }

    #[test]
    fn grid_rejects_ragged_rows() {
        let rows = vec![vec!["a".to_owned(), "b".to_owned()], vec!["c".to_owned()]];
        assert!(TerrainGrid::from_rows(rows, 2).is_none());
    }

    #[test]
    fn events_are_found_by_planar_center() {
        let layout = HexLayout::new(2, 2, 3.0);
        let mut events = EventTable::default();
        events.insert((1, 1), "You meet a wandering merchant.");
        let center = layout.center_of((1, 1));
        assert_eq!(events.event_at(&layout, center), Some(((1, 1), "You meet a wandering merchant.")));
        assert_eq!(events.event_at(&layout, layout.center_of((0, 1))), None);
    }
}
