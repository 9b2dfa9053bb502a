//! Level catalog
//!
//! Twenty hand-authored levels, each a list of spike offsets measured from the
//! start of the level. The first ten are written out; the last ten follow a
//! dense evenly spaced pattern that grows by three spikes per level.

use serde::{Deserialize, Serialize};

/// Number of levels in the standard catalog
pub const LEVEL_COUNT: usize = 20;

/// A single level: ascending spike offsets from the level start
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    hazards: Vec<f32>,
}

impl Level {
    /// Build a level from spike offsets. Offsets are sorted so iteration order
    /// always follows scroll order.
    pub fn new(mut hazards: Vec<f32>) -> Self {
        hazards.sort_by(|a, b| a.total_cmp(b));
        Self { hazards }
    }

    /// Spike offsets in scroll order
    pub fn hazards(&self) -> &[f32] {
        &self.hazards
    }

    /// Offset of the furthest spike, if the level has any
    pub fn last_hazard(&self) -> Option<f32> {
        self.hazards.last().copied()
    }
}

/// Ordered, immutable set of levels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelCatalog {
    levels: Vec<Level>,
}

impl LevelCatalog {
    pub fn new(levels: Vec<Level>) -> Self {
        Self { levels }
    }

    /// The built-in 20-level campaign
    pub fn standard() -> Self {
        let mut levels: Vec<Level> = vec![
            // 1: intro
            vec![300.0, 700.0, 1100.0, 1500.0, 1900.0],
            // 2: narrower gaps
            vec![250.0, 600.0, 950.0, 1300.0, 1650.0, 2000.0],
            // 3: first double spikes
            vec![300.0, 600.0, 640.0, 1000.0, 1300.0, 1340.0, 1700.0],
            // 4: steady rhythm
            vec![200.0, 450.0, 700.0, 950.0, 1200.0, 1450.0, 1700.0, 1950.0, 2200.0],
            // 5: paired spikes
            vec![
                200.0, 240.0, 500.0, 700.0, 740.0, 1000.0, 1200.0, 1240.0, 1500.0, 1700.0,
                1740.0,
            ],
            // 6
            (1..=19).map(|i| i as f32 * 100.0).collect(),
            // 7
            (0..13).map(|i| 50.0 + i as f32 * 150.0).collect(),
            // 8
            (0..16).map(|i| 150.0 + i as f32 * 100.0).collect(),
            // 9
            vec![
                50.0, 100.0, 150.0, 200.0, 300.0, 350.0, 400.0, 450.0, 550.0, 600.0, 650.0,
                700.0, 800.0, 850.0, 900.0, 950.0, 1050.0, 1100.0, 1150.0, 1200.0,
            ],
            // 10
            [100.0, 150.0]
                .into_iter()
                .chain((2..=22).map(|i| i as f32 * 100.0))
                .collect(),
        ]
        .into_iter()
        .map(Level::new)
        .collect();

        // 11-20: 30 spikes, three more per level, 60px apart
        levels.extend((0..10).map(|i| {
            let count = 30 + i * 3;
            Level::new((0..count).map(|j| 100.0 + j as f32 * 60.0).collect())
        }));

        debug_assert_eq!(levels.len(), LEVEL_COUNT);
        Self { levels }
    }

    /// Level at `index`, or None once the catalog is exhausted
    pub fn get(&self, index: usize) -> Option<&Level> {
        self.levels.get(index)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Level> {
        self.levels.iter()
    }
}

impl Default for LevelCatalog {
    fn default() -> Self {
        Self::standard()
    }
}
