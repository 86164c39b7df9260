//! What a renderer needs to draw the map, with no drawing code attached.

use crate::hex_grid::{vec_distance, vec_subtract, Point};
use crate::navigator::{Cursor, MoveOutcome, Navigator};
use crate::world_state::{LocationKind, WorldState};

#[derive(Debug, Clone, PartialEq)]
pub struct RenderCell {
    pub center: Point,
    pub terrain: String,
    pub color: [u8; 4],
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderMarker {
    pub center: Point,
    pub kind: LocationKind,
}

/// Snapshot of everything visible: cells, special locations, the cursor and the last event.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub size: f64,
    pub cells: Vec<RenderCell>,
    pub markers: Vec<RenderMarker>,
    pub cursor: Option<Point>,
    /// Event text to show at a center, see [`event_overlay`]. Not drawn by [`RenderFrame::rasterize`].
    pub overlay: Option<(Point, String)>,
}

/// The overlay for a move that arrived on an event cell.
pub fn event_overlay(outcome: &MoveOutcome) -> Option<(Point, String)> {
    match outcome {
        MoveOutcome::Moved { center, event: Some(event), .. } => Some((*center, event.clone())),
        _ => None,
    }
}

impl RenderFrame {
    pub fn capture(world: &WorldState, navigator: Option<&Navigator>, overlay: Option<(Point, String)>) -> Self {
        let layout = world.layout();
        let cells = world
            .grid()
            .iter()
            .map(|(coords, terrain)| RenderCell {
                center: layout.center_of(coords),
                terrain: terrain.to_owned(),
                color: world
                    .palette()
                    .color_of(terrain)
                    .and_then(parse_color)
                    .unwrap_or(UNKNOWN_COLOR),
            })
            .collect();
        let markers = world
            .special_locations()
            .iter()
            .map(|location| RenderMarker {
                center: layout.center_of(location.coords()),
                kind: location.kind,
            })
            .collect();
        let cursor = match navigator.map(Navigator::cursor) {
            Some(Cursor::At(center)) => Some(center),
            _ => None,
        };

        Self { size: world.size(), cells, markers, cursor, overlay }
    }
}

/// RGBA pixel buffer, row-major from the top left corner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl Raster {
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        self.pixels.get(i..i + 4).and_then(|p| p.try_into().ok())
    }
}

const BACKGROUND_COLOR: [u8; 4] = [255, 255, 255, 255];
const EDGE_COLOR: [u8; 4] = [0, 0, 0, 255];
const CURSOR_COLOR: [u8; 4] = [255, 0, 0, 255];

fn marker_color(kind: LocationKind) -> [u8; 4] {
    match kind {
        LocationKind::Dungeon | LocationKind::WizardTower => [0, 0, 0, 255],
        LocationKind::Village => [165, 42, 42, 255],
    }
}

/// Whether `d`, relative to a hex center, lies in a flat-top hexagon of circumradius `radius`.
fn in_hexagon(d: Point, radius: f64) -> bool {
    let (dx, dy) = (d.0.abs(), d.1.abs());
    let sqrt_3 = 3f64.sqrt();
    dy <= radius * sqrt_3 / 2.0 && sqrt_3 * dx + dy <= sqrt_3 * radius
}

impl RenderFrame {
    /// Draws the frame with `pixels_per_unit` pixels for every unit of hex size. `+y` points
    /// up. The event overlay is text and is left to the caller.
    pub fn rasterize(&self, pixels_per_unit: f64) -> Raster {
        let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
        let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
        for cell in &self.cells {
            min_x = min_x.min(cell.center.0 - self.size);
            max_x = max_x.max(cell.center.0 + self.size);
            min_y = min_y.min(cell.center.1 - self.size);
            max_y = max_y.max(cell.center.1 + self.size);
        }
        if self.cells.is_empty() {
            return Raster { width: 0, height: 0, pixels: Vec::new() };
        }

        let width = ((max_x - min_x) * pixels_per_unit).ceil() as u32;
        let height = ((max_y - min_y) * pixels_per_unit).ceil() as u32;
        let pixel_size = 1.0 / pixels_per_unit;
        let mut pixels = Vec::with_capacity(width as usize * height as usize * 4);

        for py in 0..height {
            for px in 0..width {
                let point = (
                    min_x + (px as f64 + 0.5) * pixel_size,
                    max_y - (py as f64 + 0.5) * pixel_size,
                );
                pixels.extend_from_slice(&self.color_at(point, pixel_size));
            }
        }

        Raster { width, height, pixels }
    }

    fn color_at(&self, point: Point, pixel_size: f64) -> [u8; 4] {
        let Some(cell) = self
            .cells
            .iter()
            .min_by(|a, b| vec_distance(point, a.center).total_cmp(&vec_distance(point, b.center)))
        else {
            return BACKGROUND_COLOR;
        };
        let d = vec_subtract(point, cell.center);
        if !in_hexagon(d, self.size) {
            return BACKGROUND_COLOR;
        }

        if let Some(cursor) = self.cursor {
            let d = vec_subtract(point, cursor);
            if in_hexagon(d, self.size) && !in_hexagon(d, self.size - 2.0 * pixel_size) {
                return CURSOR_COLOR;
            }
        }
        if let Some(marker) = self
            .markers
            .iter()
            .find(|m| vec_distance(point, m.center) <= self.size / 3.0)
        {
            return marker_color(marker.kind);
        }
        if !in_hexagon(d, self.size - pixel_size) {
            return EDGE_COLOR;
        }
        cell.color
    }
}

pub const UNKNOWN_COLOR: [u8; 4] = [0, 0, 0, 255];

const NAMED_COLORS: [(&str, [u8; 3]); 24] = [
    ("black", [0, 0, 0]),
    ("white", [255, 255, 255]),
    ("gray", [128, 128, 128]),
    ("grey", [128, 128, 128]),
    ("darkgray", [169, 169, 169]),
    ("red", [255, 0, 0]),
    ("brown", [165, 42, 42]),
    ("orange", [255, 165, 0]),
    ("yellow", [255, 255, 0]),
    ("khaki", [240, 230, 140]),
    ("tan", [210, 180, 140]),
    ("sandybrown", [244, 164, 96]),
    ("beige", [245, 245, 220]),
    ("green", [0, 128, 0]),
    ("lightgreen", [144, 238, 144]),
    ("darkgreen", [0, 100, 0]),
    ("forestgreen", [34, 139, 34]),
    ("olive", [128, 128, 0]),
    ("blue", [0, 0, 255]),
    ("lightblue", [173, 216, 230]),
    ("darkblue", [0, 0, 139]),
    ("navy", [0, 0, 128]),
    ("cyan", [0, 255, 255]),
    ("purple", [128, 0, 128]),
];

/// Parses `#rrggbb`, `#rgb` or a common color name into RGBA.
pub fn parse_color(color: &str) -> Option<[u8; 4]> {
    let color = color.trim().to_ascii_lowercase();
    if let Some(hex) = color.strip_prefix('#') {
        let channel = |s: &str| u8::from_str_radix(s, 16).ok();
        if !hex.is_ascii() {
            return None;
        }
        return match hex.len() {
            6 => Some([channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?, 255]),
            3 => {
                let short = |i: usize| channel(&hex[i..i + 1]).map(|v| v * 17);
                Some([short(0)?, short(1)?, short(2)?, 255])
            }
            _ => None,
        };
    }
    let normalized: String = color.chars().filter(|c| !c.is_whitespace()).collect();
    NAMED_COLORS
        .iter()
        .find(|(name, _)| *name == normalized)
        .map(|(_, [r, g, b])| [*r, *g, *b, 255])
}
