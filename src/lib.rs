//! Hex Map Generator
//!
//! Procedural generator for hexagonal world maps, with a cursor that can walk the map and
//! trigger events.
//!
//! # Features
//!
//! - Seed based generation.
//!     - All random elements of the world generation follow the provided seed. This means that every world is 100% reproducible.
//! - Terrain generation.
//!     - Every hex samples two noise fields, elevation and moisture, and gets the first terrain class whose ranges contain both.
//!     - When the chosen environments do not cover every combination, the class with the closest range center is used, so every hex gets a class.
//!     - Terrain classes:
//!         - ocean
//!         - lake
//!         - beach
//!         - plains
//!         - grassland
//!         - forest
//!         - desert
//!         - dry plains
//!         - mountain
//!         - highlands
//!     - Only the classes listed in the configuration's environments are used.
//! - Special locations generation.
//!     - A dungeon, a wizard tower and a village are placed on distinct land hexes (anything but ocean and lake).
//!     - Special locations listed in the configuration are kept instead.
//! - Random events generation.
//!     - Events are bound to land hexes not used by special locations and trigger when the cursor enters them.
//! - Cursor navigation.
//!     - One hex at a time is highlighted and moves to one of its six neighbors on each command.
//! - Save files.
//!     - Worlds are saved to and loaded from TOML documents.
//!
//! # Examples
//!
//! ```
//! use hexmap::config::WorldConfig;
//! use hexmap::hex_grid::Direction;
//! use hexmap::navigator::{MoveOutcome, Navigator};
//! use hexmap::world_generator::{WorldGenerator, WorldGeneratorParameters};
//!
//! # fn main() {
//! let config = WorldConfig {
//!     rows: 8,
//!     cols: 8,
//!     environments: vec![
//!         ("ocean".to_owned(), "blue".to_owned()),
//!         ("plains".to_owned(), "lightgreen".to_owned()),
//!         ("mountain".to_owned(), "gray".to_owned()),
//!     ],
//!     ..Default::default()
//! };
//!
//! let world_generator = WorldGenerator::new(WorldGeneratorParameters { seed: 7, ..Default::default() });
//! let world = world_generator.gen(&config).unwrap();
//!
//! let mut navigator = Navigator::new(world_generator.params().neighbor_rule);
//! navigator.place(&world, world.layout().center_of((0, 0)));
//! match navigator.step(&world, Direction::North) {
//!     MoveOutcome::Moved { coords, event, .. } => println!("now at {coords:?}, event: {event:?}"),
//!     other => println!("{other:?}"),
//! }
//!
//! let saved = hexmap::persistence::save_to_string(&world).unwrap();
//! assert_eq!(hexmap::persistence::load_from_str(&saved).unwrap(), world);
//! # }
//! ```

/// Hex grid geometry: cell centers, neighbors and hit testing
pub mod hex_grid;

/// World Generator
pub mod world_generator;

/// User supplied world configuration
pub mod config;
pub mod world_state;
pub mod navigator;
pub mod persistence;
pub mod render;

/// A simple 2D visualizer to render the generated world
#[cfg(feature = "visualizer")]
pub mod world_visualizer;
