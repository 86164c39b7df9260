//! The single highlighted hex and the commands that move it.

use std::str::FromStr;

use thiserror::Error;
use tracing::debug;

use crate::hex_grid::{Direction, GridCoords, NeighborRule, Point};
use crate::world_state::WorldState;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("{0:?} is not a number")]
    NotANumber(String),
    #[error("{0} is not a direction, enter a number between 1 and 6 (0 to exit)")]
    OutOfRange(i64),
}

/// A line typed at the direction prompt: `0` ends the session, `1..=6` moves the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Exit,
    Move(Direction),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let value: i64 = trimmed.parse().map_err(|_| CommandError::NotANumber(trimmed.to_owned()))?;
        if value == 0 {
            return Ok(Command::Exit);
        }
        u8::try_from(value)
            .ok()
            .and_then(Direction::from_index)
            .map(Command::Move)
            .ok_or(CommandError::OutOfRange(value))
    }
}

/// Either no hex is highlighted yet, or exactly one is.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Cursor {
    #[default]
    Unset,
    At(Point),
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlaceOutcome {
    Placed { coords: GridCoords, center: Point },
    /// A cursor already exists; only one hex is highlighted at a time.
    AlreadyPlaced,
    /// The point is not the center of a cell.
    NotOnGrid,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MoveOutcome {
    Moved {
        coords: GridCoords,
        center: Point,
        event: Option<String>,
    },
    /// The neighbor in that direction is not part of the grid. The cursor did not move.
    Blocked,
    NoCursor,
    SessionEnded,
}

/// Cursor state machine over an immutable world.
#[derive(Debug, Clone, Default)]
pub struct Navigator {
    cursor: Cursor,
    rule: NeighborRule,
    finished: bool,
}

impl Navigator {
    pub fn new(rule: NeighborRule) -> Self {
        Self { rule, ..Default::default() }
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Highlights the hex centered exactly at `center`. Ignored once a hex is highlighted.
    pub fn place(&mut self, world: &WorldState, center: Point) -> PlaceOutcome {
        if let Cursor::At(_) = self.cursor {
            return PlaceOutcome::AlreadyPlaced;
        }
        match world.layout().locate(center) {
            Some(coords) => self.set(world, coords),
            None => PlaceOutcome::NotOnGrid,
        }
    }

    /// Highlights the hex closest to an arbitrary point, e.g. a click on the map.
    pub fn place_at(&mut self, world: &WorldState, point: Point) -> PlaceOutcome {
        if let Cursor::At(_) = self.cursor {
            return PlaceOutcome::AlreadyPlaced;
        }
        match world.layout().nearest(point) {
            Some((coords, _)) => self.set(world, coords),
            None => PlaceOutcome::NotOnGrid,
        }
    }

    fn set(&mut self, world: &WorldState, coords: GridCoords) -> PlaceOutcome {
        let center = world.layout().center_of(coords);
        self.cursor = Cursor::At(center);
        PlaceOutcome::Placed { coords, center }
    }

    pub fn apply(&mut self, world: &WorldState, command: Command) -> MoveOutcome {
        if self.finished {
            return MoveOutcome::SessionEnded;
        }
        match command {
            Command::Exit => {
                self.finished = true;
                MoveOutcome::SessionEnded
            }
            Command::Move(direction) => self.step(world, direction),
        }
    }

    /// Moves one hex in `direction` and reports the event of the arrival cell, if any.
    /// Re-entering an event cell reports its event again.
    pub fn step(&mut self, world: &WorldState, direction: Direction) -> MoveOutcome {
        if self.finished {
            return MoveOutcome::SessionEnded;
        }
        let Cursor::At(current) = self.cursor else {
            return MoveOutcome::NoCursor;
        };
        let Some((coords, center)) = world.layout().neighbor(current, direction, self.rule) else {
            debug!(?current, ?direction, "cannot move in that direction");
            return MoveOutcome::Blocked;
        };

        self.cursor = Cursor::At(center);
        let event = world
            .events()
            .event_at(world.layout(), center)
            .map(|(_, event)| event.to_owned());
        MoveOutcome::Moved { coords, center, event }
    }
}
