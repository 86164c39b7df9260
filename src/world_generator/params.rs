use crate::hex_grid::NeighborRule;

/// Contains parameters passed to `world_generator::WorldGenerator` to tweak its behaviour
///
/// These parameters control how a world is generated rather than what it contains: the seed
/// that drives every random choice, the shape of the noise fields and the way cursor moves are
/// resolved. What the world contains (dimensions, environments, special locations) comes from
/// a [`crate::config::WorldConfig`]. For most use cases `WorldGeneratorParameters::default()`
/// should be ok, and it is recommended when setting parameters to start from a default instance.
///
/// # Examples
/// Users can simply use the default parameters:
/// ```
/// # use hexmap::world_generator::{WorldGenerator, WorldGeneratorParameters};
/// let world_generator = WorldGenerator::new(WorldGeneratorParameters::default());
/// ```
///
/// Or they can change them to their liking:
/// ```
/// # use hexmap::world_generator::{WorldGenerator, WorldGeneratorParameters};
/// let params = WorldGeneratorParameters {
///     seed: 15, // fixed seed
///     noise_octaves: 6, // more detailed terrain
///     ..Default::default() // the rest of the parameters keep their default value
/// };
/// let world_generator = WorldGenerator::new(params);
/// ```
#[derive(Clone, Debug)]
pub struct WorldGeneratorParameters {
    /// Seed used for world generation.
    ///
    /// Noise fields only see the low 32 bits (`seed as u32`), while placement uses the full
    /// value. Seeds that differ only in the high bits share terrain but not placements.
    pub seed: u64,

    /// number of noise layers summed for the elevation and moisture fields
    pub noise_octaves: u8,

    /// frequency of the first noise layer over the unit square the grid is mapped onto.
    /// higher values result in smaller, more fragmented terrain patches
    pub noise_frequency: f64,

    /// how the cursor finds the neighbor of its hex, see [`NeighborRule`]
    pub neighbor_rule: NeighborRule,
}

impl Default for WorldGeneratorParameters {
    /// The default values are the following:
    /// ```
    /// # use hexmap::{hex_grid::NeighborRule, world_generator::WorldGeneratorParameters};
    /// # WorldGeneratorParameters {
    /// seed: rand::random(),
    /// noise_octaves: 4,
    /// noise_frequency: 4.0,
    /// neighbor_rule: NeighborRule::Planar,
    /// # };
    /// ```
    fn default() -> Self {
        Self {
            seed: rand::random(),
            noise_octaves: 4,
            noise_frequency: 4.0,
            neighbor_rule: NeighborRule::Planar,
        }
    }
}
