use rand::seq::SliceRandom;
use rand::Rng;

use crate::hex_grid::GridCoords;
use crate::world_state::{EventTable, LocationKind, SpecialLocation, TerrainGrid};

/// Terrain classes that are not land. Matched exactly, including the plural spellings.
pub const WATER_TYPES: [&str; 4] = ["ocean", "lakes", "lake", "oceans"];

pub const RANDOM_EVENTS: [&str; 5] = [
    "You found a treasure chest!",
    "A wild beast attacks you!",
    "You meet a wandering merchant.",
    "You discover a hidden cave.",
    "An old wizard offers you a quest.",
];

pub fn is_water(terrain: &str) -> bool {
    WATER_TYPES.contains(&terrain)
}

/// The land cells still free for placement. Every cell handed out is removed, so it is used
/// for at most one purpose per generation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LandPool {
    tiles: Vec<GridCoords>,
}

impl LandPool {
    /// Every non-water cell of the grid, in row-major order.
    pub fn from_grid(grid: &TerrainGrid) -> Self {
        let tiles = grid
            .iter()
            .filter(|(_, terrain)| !is_water(terrain))
            .map(|(coords, _)| coords)
            .collect();
        Self { tiles }
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
    pub fn tiles(&self) -> &[GridCoords] {
        &self.tiles
    }

    /// Shuffles what is left, then pops up to `count` cells off the end.
    fn draw<R: Rng + ?Sized>(&mut self, count: usize, rng: &mut R) -> Vec<GridCoords> {
        self.tiles.shuffle(rng);
        let count = count.min(self.tiles.len());
        (0..count).filter_map(|_| self.tiles.pop()).collect()
    }
}

/// Hands out the location catalog in order, one land cell each, until the catalog or the pool
/// runs out.
pub fn place_special_locations<R: Rng + ?Sized>(pool: &mut LandPool, rng: &mut R) -> Vec<SpecialLocation> {
    let cells = pool.draw(LocationKind::CATALOG.len(), rng);
    LocationKind::CATALOG
        .iter()
        .zip(cells)
        .map(|(kind, (row, col))| SpecialLocation { kind: *kind, row, col })
        .collect()
}

/// Hands out `catalog` in order over what is left of the pool.
pub fn assign_random_events<R: Rng + ?Sized>(pool: &mut LandPool, catalog: &[&str], rng: &mut R) -> EventTable {
    let cells = pool.draw(catalog.len(), rng);
    let mut events = EventTable::default();
    for (event, coords) in catalog.iter().zip(cells) {
        events.insert(coords, *event);
    }
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn uniform_grid(terrain: &str, rows: usize, cols: usize) -> TerrainGrid {
        TerrainGrid::from_rows(vec![vec![terrain.to_owned(); cols]; rows], cols).unwrap()
    }

    fn grid(rows: &[&[&str]]) -> TerrainGrid {
        let cols = rows[0].len();
        let cells = rows
            .iter()
            .map(|row| row.iter().map(|t| t.to_string()).collect())
            .collect();
        TerrainGrid::from_rows(cells, cols).unwrap()
    }

    #[test]
    fn water_matches_the_literal_list_only() {
        assert!(is_water("ocean"));
        assert!(is_water("lakes"));
        assert!(!is_water("Ocean"));
        assert!(!is_water("deep ocean"));
    }

    #[test]
    fn land_pool_skips_water_cells() {
        let grid = grid(&[&["ocean", "plains"], &["lake", "forest"]]);
        assert_eq!(LandPool::from_grid(&grid).tiles(), &[(0, 1), (1, 1)]);
    }

    #[test]
    fn small_pools_limit_the_locations() {
        let grid = grid(&[&["ocean", "plains"], &["oceans", "ocean"]]);
        let mut pool = LandPool::from_grid(&grid);
        let mut rng = StdRng::seed_from_u64(3);
        let locations = place_special_locations(&mut pool, &mut rng);
        assert_eq!(locations, vec![SpecialLocation { kind: LocationKind::Dungeon, row: 0, col: 1 }]);
        assert!(pool.is_empty());
        assert!(assign_random_events(&mut pool, &RANDOM_EVENTS, &mut rng).is_empty());
    }

    #[test]
    fn locations_and_events_never_share_a_cell() {
        let grid = uniform_grid("plains", 3, 4);
        let mut pool = LandPool::from_grid(&grid);
        let mut rng = StdRng::seed_from_u64(11);
        let locations = place_special_locations(&mut pool, &mut rng);
        let events = assign_random_events(&mut pool, &RANDOM_EVENTS, &mut rng);

        assert_eq!(locations.len(), 3);
        assert_eq!(events.len(), 5);
        assert_eq!(pool.len(), 12 - 3 - 5);

        let mut used: HashSet<GridCoords> = locations.iter().map(SpecialLocation::coords).collect();
        for (coords, _) in events.iter() {
            assert!(used.insert(coords), "{coords:?} used twice");
        }
    }

    #[test]
    fn catalog_order_is_kept() {
        let grid = uniform_grid("plains", 3, 3);
        let mut pool = LandPool::from_grid(&grid);
        let locations = place_special_locations(&mut pool, &mut StdRng::seed_from_u64(0));
        let kinds: Vec<_> = locations.iter().map(|l| l.kind).collect();
        assert_eq!(kinds, LocationKind::CATALOG);
    }
}
