use std::ops::Range;

use noise::NoiseFn;
use rayon::prelude::*;

use crate::world_state::{EnvironmentPalette, TerrainGrid};

/// A terrain class bound to half-open elevation and moisture ranges inside `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct TerrainRule {
    pub name: String,
    pub elevation: Range<f64>,
    pub moisture: Range<f64>,
}

impl TerrainRule {
    pub fn new(name: impl Into<String>, elevation: Range<f64>, moisture: Range<f64>) -> Self {
        Self { name: name.into(), elevation, moisture }
    }

    pub fn contains(&self, elevation: f64, moisture: f64) -> bool {
        self.elevation.contains(&elevation) && self.moisture.contains(&moisture)
    }

    /// Manhattan distance from the sample to the center of the rule rectangle.
    pub fn distance(&self, elevation: f64, moisture: f64) -> f64 {
        (elevation - midpoint(&self.elevation)).abs() + (moisture - midpoint(&self.moisture)).abs()
    }
}

fn midpoint(range: &Range<f64>) -> f64 {
    (range.start + range.end) / 2.0
}

/// The fixed rule table, in the order rules are tried.
///
/// `ocean` covers every moisture value below 0.3 elevation, so `lake` is only reached when
/// `ocean` is not active or through the nearest-center fallback.
pub fn default_rules() -> Vec<TerrainRule> {
    vec![
        TerrainRule::new("ocean", 0.0..0.3, 0.0..1.0),
        TerrainRule::new("lake", 0.0..0.3, 0.5..1.0),
        TerrainRule::new("beach", 0.3..0.45, 0.0..0.5),
        TerrainRule::new("plains", 0.3..0.45, 0.5..1.0),
        TerrainRule::new("grassland", 0.45..0.6, 0.0..0.5),
        TerrainRule::new("forest", 0.45..0.6, 0.5..1.0),
        TerrainRule::new("desert", 0.6..0.75, 0.0..0.5),
        TerrainRule::new("dry plains", 0.6..0.75, 0.5..1.0),
        TerrainRule::new("mountain", 0.75..1.0, 0.0..0.4),
        TerrainRule::new("highlands", 0.75..1.0, 0.4..1.0),
    ]
}

/// An ordered, non-empty set of rules.
#[derive(Debug, Clone, PartialEq)]
pub struct TerrainRules {
    rules: Vec<TerrainRule>,
}

impl TerrainRules {
    /// Rules from the fixed table whose class appears in the palette. `None` if there are none.
    pub fn active(palette: &EnvironmentPalette) -> Option<Self> {
        Self::custom(default_rules().into_iter().filter(|rule| palette.contains(&rule.name)).collect())
    }

    pub fn custom(rules: Vec<TerrainRule>) -> Option<Self> {
        (!rules.is_empty()).then_some(Self { rules })
    }

    pub fn rules(&self) -> &[TerrainRule] {
        &self.rules
    }

    /// First rule containing the sample, or else the rule whose center is closest.
    /// On equal distances the earlier rule wins.
    pub fn classify(&self, elevation: f64, moisture: f64) -> &TerrainRule {
        let mut best_match = &self.rules[0];
        let mut min_diff = f64::INFINITY;
        for rule in &self.rules {
            if rule.contains(elevation, moisture) {
                return rule;
            }
            let diff = rule.distance(elevation, moisture);
            if diff < min_diff {
                min_diff = diff;
                best_match = rule;
            }
        }
        best_match
    }
}

/// Maps a raw noise sample from `[-1, 1]` to `[0, 1]`.
pub fn normalize(raw: f64) -> f64 {
    ((raw + 1.0) / 2.0).clamp(0.0, 1.0)
}

/// Labels every cell of a `rows x cols` grid. Cell `(row, col)` samples both fields at
/// `[col / cols, row / rows]`.
pub fn generate_terrain<E, M>(rows: usize, cols: usize, rules: &TerrainRules, elevation_noise: &E, moisture_noise: &M) -> TerrainGrid
where
    E: NoiseFn<f64, 2> + Sync,
    M: NoiseFn<f64, 2> + Sync,
{
    let cells: Vec<Vec<String>> = (0..rows)
        .into_par_iter()
        .map(|row| {
            (0..cols)
                .map(|col| {
                    let point = [col as f64 / cols as f64, row as f64 / rows as f64];
                    let elevation = normalize(elevation_noise.get(point));
                    let moisture = normalize(moisture_noise.get(point));
                    rules.classify(elevation, moisture).name.clone()
                })
                .collect()
        })
        .collect();

    TerrainGrid::from_rows(cells, cols).unwrap_or_else(|| unreachable!("every row has exactly `cols` cells"))
}
