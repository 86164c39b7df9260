use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use hexmap::config::WorldConfig;
use hexmap::hex_grid::NeighborRule;
use hexmap::navigator::{Command, MoveOutcome, Navigator, PlaceOutcome};
use hexmap::persistence::{self, PersistenceError};
use hexmap::world_generator::{WorldGenerator, WorldGeneratorParameters};
use hexmap::world_state::WorldState;

/// Generate a hexagonal world map and walk it one hex at a time.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Seed for terrain, special locations and events. Random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Number of noise layers used for elevation and moisture.
    #[arg(long, default_value_t = 4)]
    octaves: u8,

    /// Resolve moves with column-parity offset arithmetic instead of the planar offset table.
    #[arg(long)]
    parity_aware: bool,

    /// Create a new world from this TOML configuration instead of asking.
    #[arg(long, conflicts_with = "load")]
    config: Option<PathBuf>,

    /// Load a saved world instead of asking.
    #[arg(long)]
    load: Option<PathBuf>,

    /// Where to save the world. Defaults to the configuration's filename.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Show the map in a window and exit.
    #[cfg(feature = "visualizer")]
    #[arg(long)]
    preview: bool,
}

struct Prompt<R> {
    input: R,
}

impl<R: BufRead> Prompt<R> {
    /// Prints `question` and reads one line. `None` at end of input.
    fn ask(&mut self, question: &str) -> Result<Option<String>> {
        print!("{question}");
        io::stdout().flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_owned()))
    }

    fn ask_required(&mut self, question: &str) -> Result<String> {
        match self.ask(question)? {
            Some(answer) => Ok(answer),
            None => bail!("input closed"),
        }
    }

    fn ask_number(&mut self, question: &str) -> Result<i64> {
        loop {
            match self.ask_required(question)?.parse() {
                Ok(n) => return Ok(n),
                Err(_) => println!("Invalid input, please enter a number."),
            }
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let mut params = WorldGeneratorParameters {
        noise_octaves: cli.octaves,
        ..Default::default()
    };
    if let Some(seed) = cli.seed {
        params.seed = seed;
    }
    if cli.parity_aware {
        params.neighbor_rule = NeighborRule::OffsetParity;
    }
    let world_generator = WorldGenerator::new(params);
    let mut prompt = Prompt { input: io::stdin().lock() };

    let (world, default_output) = if let Some(path) = &cli.load {
        (load_world(&world_generator, path)?, path.clone())
    } else if let Some(path) = &cli.config {
        let text = fs::read_to_string(path).with_context(|| format!("could not read {}", path.display()))?;
        let config: WorldConfig = toml::from_str(&text).with_context(|| format!("malformed configuration {}", path.display()))?;
        (world_generator.gen(&config)?, PathBuf::from(config.filename()))
    } else {
        choose_world(&world_generator, &mut prompt)?
    };

    let output = cli.output.clone().unwrap_or(default_output);
    persistence::save_to_file(&world, &output)?;

    #[cfg(feature = "visualizer")]
    if cli.preview {
        let frame = hexmap::render::RenderFrame::capture(&world, None, None);
        hexmap::world_visualizer::WorldVisualizer::visualize(&frame, 800, 10.0);
        return Ok(());
    }

    explore(&world, Navigator::new(world_generator.params().neighbor_rule), &mut prompt)
}

fn load_world(world_generator: &WorldGenerator, path: &Path) -> Result<WorldState> {
    let world = persistence::load_from_file(path)?;
    Ok(world_generator.with_events(world))
}

fn choose_world<R: BufRead>(world_generator: &WorldGenerator, prompt: &mut Prompt<R>) -> Result<(WorldState, PathBuf)> {
    loop {
        let choice = prompt
            .ask_required("Do you want to load a configuration from a TOML file or create a new one? (load/new): ")?
            .to_lowercase();
        match choice.as_str() {
            "load" => {
                let filename = prompt.ask_required("Enter the filename of the TOML file: ")?;
                let path = PathBuf::from(&filename);
                match load_world(world_generator, &path) {
                    Ok(world) => return Ok((world, path)),
                    Err(err) => match err.downcast_ref::<PersistenceError>() {
                        Some(PersistenceError::MissingFile(_)) => println!("File {filename} not found. Please try again."),
                        _ => return Err(err),
                    },
                }
            }
            "new" => {
                let config = new_config(prompt)?;
                let world = world_generator.gen(&config)?;
                return Ok((world, PathBuf::from(config.filename())));
            }
            _ => println!("Invalid choice. Please enter 'load' or 'new'."),
        }
    }
}

fn new_config<R: BufRead>(prompt: &mut Prompt<R>) -> Result<WorldConfig> {
    let rows = prompt.ask_number("Enter the number of rows: ")?;
    let cols = prompt.ask_number("Enter the number of columns: ")?;
    let names = prompt.ask_required(
        "Enter environment names separated by commas (eg: ocean, lake, beach, plains, grassland, forest): ",
    )?;
    let colors = prompt.ask_required("Enter corresponding colors separated by commas: ")?;
    let environments = names
        .split(',')
        .map(str::trim)
        .zip(colors.split(',').map(str::trim))
        .filter(|(name, _)| !name.is_empty())
        .map(|(name, color)| (name.to_owned(), color.to_owned()))
        .collect();

    let config = WorldConfig { rows, cols, environments, ..Default::default() };

    let save = prompt.ask_required("Do you want to save this configuration to a TOML file? (yes/no): ")?;
    if save.eq_ignore_ascii_case("yes") {
        let filename = prompt.ask_required("Enter the filename to save as (including .toml extension): ")?;
        fs::write(&filename, toml::to_string(&config)?).with_context(|| format!("could not write {filename}"))?;
        println!("Configuration saved to {filename}");
    }
    Ok(config)
}

fn explore<R: BufRead>(world: &WorldState, mut navigator: Navigator, prompt: &mut Prompt<R>) -> Result<()> {
    loop {
        let Some(answer) = prompt.ask("Enter the row and column of the hex to highlight (eg: 0 0): ")? else {
            return Ok(());
        };
        let coords: Vec<usize> = answer.split_whitespace().filter_map(|n| n.parse().ok()).collect();
        let &[row, col] = coords.as_slice() else {
            println!("Please enter two numbers.");
            continue;
        };
        match navigator.place(world, world.layout().center_of((row, col))) {
            PlaceOutcome::Placed { coords, .. } => {
                describe(world, coords);
                break;
            }
            _ => println!("({row}, {col}) is not on the map."),
        }
    }

    while !navigator.is_finished() {
        let Some(answer) = prompt.ask("Enter direction (1-6) to move the highlight, or 0 to exit: ")? else {
            break;
        };
        let command: Command = match answer.parse() {
            Ok(command) => command,
            Err(err) => {
                println!("Invalid input: {err}.");
                continue;
            }
        };
        match navigator.apply(world, command) {
            MoveOutcome::Moved { coords, event, .. } => {
                describe(world, coords);
                if let Some(event) = event {
                    println!("Event: {event}");
                }
            }
            MoveOutcome::Blocked => println!("Cannot move in that direction."),
            MoveOutcome::NoCursor => println!("No hexagon is highlighted."),
            MoveOutcome::SessionEnded => {}
        }
    }
    Ok(())
}

fn describe(world: &WorldState, coords: (usize, usize)) {
    let terrain = world.grid().get(coords).unwrap_or("unknown");
    match world.special_location_at(coords) {
        Some(location) => println!("You are at {coords:?}: {terrain}, there is a {} here.", location.kind),
        None => println!("You are at {coords:?}: {terrain}."),
    }
}
