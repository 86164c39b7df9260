mod vector_math;

pub use vector_math::{approx_eq, points_approx_eq, vec_distance, vec_subtract, Point};
use vector_math::vec_sum;

/// `(row, col)` index of a cell in the rectangular grid.
pub type GridCoords = (usize, usize);

const SQRT_3: f64 = 1.732_050_807_568_877_2;

/// One of the six directions a cursor can step in, numbered `1..=6` as typed by the user.
///
/// Hexagons are flat-topped and rows grow along `+y`, so `North` leads to the next row, one
/// hex height up on the plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North = 1,
    NorthEast = 2,
    SouthEast = 3,
    South = 4,
    SouthWest = 5,
    NorthWest = 6,
}

impl Direction {
    pub const ALL: [Direction; 6] = [
        Direction::North,
        Direction::NorthEast,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::NorthWest,
    ];

    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(usize::from(index).checked_sub(1)?).copied()
    }
    pub fn index(self) -> u8 {
        self as u8
    }
    pub fn opposite(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::NorthEast => Direction::SouthWest,
            Direction::SouthEast => Direction::NorthWest,
            Direction::South => Direction::North,
            Direction::SouthWest => Direction::NorthEast,
            Direction::NorthWest => Direction::SouthEast,
        }
    }
}

/// How the neighbor of a hex is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NeighborRule {
    /// One fixed table of planar offsets, applied regardless of the column the hex sits in.
    #[default]
    Planar,
    /// `(row, col)` arithmetic where the diagonal row step depends on the column parity,
    /// converted back to a planar center afterwards.
    OffsetParity,
}

/// Geometry of a `rows x cols` grid of flat-top hexagons in odd-column offset layout,
/// with every center precomputed.
#[derive(Debug, Clone)]
pub struct HexLayout {
    rows: usize,
    cols: usize,
    size: f64,
    centers: Vec<Point>,
}

impl HexLayout {
    pub fn new(rows: usize, cols: usize, size: f64) -> Self {
        let mut centers = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                centers.push(center_of(row, col, size));
            }
        }
        Self { rows, cols, size, centers }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }
    pub fn cols(&self) -> usize {
        self.cols
    }
    pub fn size(&self) -> f64 {
        self.size
    }

    pub fn center_of(&self, coords: GridCoords) -> Point {
        center_of(coords.0, coords.1, self.size)
    }

    /// Row-major iterator over every cell and its center.
    pub fn centers(&self) -> impl Iterator<Item = (GridCoords, Point)> + '_ {
        let cols = self.cols;
        self.centers
            .iter()
            .enumerate()
            .map(move |(i, center)| ((i / cols, i % cols), *center))
    }

    /// Finds the cell whose center matches `point` within float tolerance.
    pub fn locate(&self, point: Point) -> Option<GridCoords> {
        let col = (point.0 / (self.size * 1.5)).round();
        if col < 0.0 || col >= self.cols as f64 {
            return None;
        }
        let col = col as usize;
        let row = (point.1 / (self.size * SQRT_3) - 0.5 * (col % 2) as f64).round();
        if row < 0.0 || row >= self.rows as f64 {
            return None;
        }
        let row = row as usize;

        points_approx_eq(point, self.centers[row * self.cols + col]).then_some((row, col))
    }

    pub fn contains(&self, point: Point) -> bool {
        self.locate(point).is_some()
    }

    /// The cell whose center is closest to an arbitrary point, e.g. a mouse click.
    pub fn nearest(&self, point: Point) -> Option<(GridCoords, Point)> {
        self.centers()
            .min_by(|(_, a), (_, b)| vec_distance(point, *a).total_cmp(&vec_distance(point, *b)))
    }

    /// The six candidate centers around `center`, in direction order. None of them is checked
    /// against the grid.
    pub fn neighbors_of(&self, center: Point) -> [(Direction, Point); 6] {
        Direction::ALL.map(|direction| (direction, vec_sum(center, planar_offset(direction, self.size))))
    }

    /// The neighbor of `center` in `direction`, if it is a cell of this grid.
    pub fn neighbor(&self, center: Point, direction: Direction, rule: NeighborRule) -> Option<(GridCoords, Point)> {
        let coords = match rule {
            NeighborRule::Planar => self.locate(vec_sum(center, planar_offset(direction, self.size)))?,
            NeighborRule::OffsetParity => {
                let (row, col) = self.locate(center)?;
                let (d_row, d_col) = parity_offset(direction, col);
                let row = row.checked_add_signed(d_row).filter(|r| *r < self.rows)?;
                let col = col.checked_add_signed(d_col).filter(|c| *c < self.cols)?;
                (row, col)
            }
        };
        Some((coords, self.center_of(coords)))
    }
}

/// Planar center of cell `(row, col)`: odd columns are shifted half a hex height along `+y`.
pub fn center_of(row: usize, col: usize, size: f64) -> Point {
    let x = size * 1.5 * col as f64;
    let y = size * SQRT_3 * (row as f64 + 0.5 * (col % 2) as f64);
    (x, y)
}

/// The fixed offset table, the same for every column.
pub fn planar_offset(direction: Direction, size: f64) -> Point {
    let height = size * SQRT_3;
    match direction {
        Direction::North => (0.0, height),
        Direction::NorthEast => (size * 1.5, height / 2.0),
        Direction::SouthEast => (size * 1.5, -height / 2.0),
        Direction::South => (0.0, -height),
        Direction::SouthWest => (-size * 1.5, -height / 2.0),
        Direction::NorthWest => (-size * 1.5, height / 2.0),
    }
}

/// `(d_row, d_col)` of the neighbor in `direction` for a hex in column `col`.
pub fn parity_offset(direction: Direction, col: usize) -> (isize, isize) {
    let odd = col % 2 == 1;
    match direction {
        Direction::North => (1, 0),
        Direction::South => (-1, 0),
        Direction::NorthEast if odd => (1, 1),
        Direction::NorthEast => (0, 1),
        Direction::SouthEast if odd => (0, 1),
        Direction::SouthEast => (-1, 1),
        Direction::SouthWest if odd => (0, -1),
        Direction::SouthWest => (-1, -1),
        Direction::NorthWest if odd => (1, -1),
        Direction::NorthWest => (0, -1),
    }
}
