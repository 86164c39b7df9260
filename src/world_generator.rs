mod multi_octave_noise;
mod performance_profiler;
pub mod params;
pub mod placement;
pub mod terrain;

use std::time::Instant;

use noise::{NoiseFn, Perlin};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

pub use multi_octave_noise::Multi;
pub use params::WorldGeneratorParameters;
use performance_profiler::PerformanceProfiler;
use placement::{LandPool, RANDOM_EVENTS};
use terrain::TerrainRules;

use crate::config::{ConfigError, ValidatedConfig, WorldConfig};
use crate::world_state::{EventTable, WorldState};

/// Builds worlds from a [`WorldConfig`]: terrain from two noise fields, then special locations
/// and random events on the land cells.
///
/// Every random choice follows `params.seed`, so the same seed and configuration always
/// produce the same world.
pub struct WorldGenerator {
    params: WorldGeneratorParameters,
}

/// Which noise fields a generation pass samples.
struct NoiseFields<E, M> {
    elevation: E,
    moisture: M,
}

impl WorldGenerator {
    pub fn new(params: WorldGeneratorParameters) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &WorldGeneratorParameters {
        &self.params
    }

    fn perlin_fields(&self, seed: u64) -> NoiseFields<Multi<Perlin>, Multi<Perlin>> {
        let seed = seed as u32;
        NoiseFields {
            elevation: Multi::new(Perlin::new(seed), self.params.noise_octaves, self.params.noise_frequency),
            moisture: Multi::new(Perlin::new(seed.wrapping_add(42)), self.params.noise_octaves, self.params.noise_frequency),
        }
    }

    /// Generates a new world. Special locations are placed only when the configuration does
    /// not list any.
    pub fn gen(&self, config: &WorldConfig) -> Result<WorldState, ConfigError> {
        let fields = self.perlin_fields(self.params.seed);
        self.gen_with_noise(config, &fields.elevation, &fields.moisture)
    }

    /// Same as [`WorldGenerator::gen`] but sampling the given fields instead of Perlin noise.
    pub fn gen_with_noise<E, M>(&self, config: &WorldConfig, elevation: &E, moisture: &M) -> Result<WorldState, ConfigError>
    where
        E: NoiseFn<f64, 2> + Sync,
        M: NoiseFn<f64, 2> + Sync,
    {
        let place_locations = config.special_locations.is_empty();
        self.build(config.validate()?, self.params.seed, place_locations, elevation, moisture)
    }

    /// Rebuilds dimensions, palette and special locations from `config` and rolls new terrain
    /// from noise seeded with `seed`. Nothing of a previous grid survives. The special
    /// locations of `config` are kept as they are, even when there are none.
    pub fn regenerate(&self, config: &WorldConfig, seed: u64) -> Result<WorldState, ConfigError> {
        let fields = self.perlin_fields(seed);
        self.build(config.validate()?, seed, false, &fields.elevation, &fields.moisture)
    }

    /// Hands out the event catalog over the land cells of an existing world, e.g. one loaded
    /// from disk.
    pub fn with_events(&self, world: WorldState) -> WorldState {
        let mut rng = StdRng::seed_from_u64(self.params.seed.wrapping_add(1));
        let mut pool = LandPool::from_grid(world.grid());
        let events = placement::assign_random_events(&mut pool, &RANDOM_EVENTS, &mut rng);
        info!(events = events.len(), "events assigned");
        world.with_events(events)
    }

    fn build<E, M>(&self, config: ValidatedConfig, seed: u64, place_locations: bool, elevation: &E, moisture: &M) -> Result<WorldState, ConfigError>
    where
        E: NoiseFn<f64, 2> + Sync,
        M: NoiseFn<f64, 2> + Sync,
    {
        let mut profiler = PerformanceProfiler::new(Instant::now());

        info!(seed, rows = config.layout.rows(), cols = config.layout.cols(), "generating world");

        let rules = TerrainRules::active(&config.palette)
            .ok_or_else(|| ConfigError::NoActiveRules(config.palette.names().map(str::to_owned).collect()))?;
        let grid = terrain::generate_terrain(config.layout.rows(), config.layout.cols(), &rules, elevation, moisture);
        profiler.log_elapsed_time_in_ms("terrain generation time");

        // seed incremented by one so placement does not replay the noise seed
        let mut rng = StdRng::seed_from_u64(seed.wrapping_add(1));
        let mut pool = LandPool::from_grid(&grid);
        let land_tiles = pool.len();

        let special_locations = if place_locations {
            placement::place_special_locations(&mut pool, &mut rng)
        } else {
            config.special_locations
        };
        profiler.log_elapsed_time_in_ms("special locations generation time");

        let events: EventTable = placement::assign_random_events(&mut pool, &RANDOM_EVENTS, &mut rng);
        profiler.log_elapsed_time_in_ms("events generation time");

        info!(
            land_tiles,
            special_locations = special_locations.len(),
            events = events.len(),
            "world generated"
        );
        profiler.log_total_elapsed_time_in_ms("Total generation time");

        Ok(WorldState {
            layout: config.layout,
            grid,
            palette: config.palette,
            special_locations,
            events,
        })
    }
}
