//! Random reel grid generation

use rand::prelude::*;

use crate::config::GameConfig;
use crate::error::{SlotError, SlotResult};

/// A symbol grid: one column per reel, `reel_positions + 1` symbols per
/// column. Row 0 is the overscan buffer above the visible window.
pub type Grid = Vec<Vec<u32>>;

/// Uniform random grid generator
///
/// Every position is an independent draw from `1..=symbols_count`; there is
/// no correlation between reels or rows and no strip weighting. This is an
/// RTP-agnostic pure-uniform model, kept deliberately simple.
pub struct OutcomeGenerator {
    rng: StdRng,
}

impl OutcomeGenerator {
    /// Create with OS entropy
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Create with a fixed seed for reproducible results
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Re-seed the generator
    pub fn seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// Draw a fresh grid for a game
    pub fn generate(&mut self, config: &GameConfig) -> Grid {
        let rows = config.rows_per_reel();
        (0..config.reels_count)
            .map(|_| {
                (0..rows)
                    .map(|_| self.rng.random_range(1..=config.symbols_count as u32))
                    .collect()
            })
            .collect()
    }
}

impl Default for OutcomeGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Check a grid's shape against its game configuration
///
/// A mismatch is fatal and indicates a bug upstream, never bad user input.
pub fn validate_grid(config: &GameConfig, grid: &Grid) -> SlotResult<()> {
    let expected_reels = config.reels_count as usize;
    let expected_rows = config.rows_per_reel();

    let shape_error = || SlotError::MalformedGrid {
        game: config.id.clone(),
        expected_reels,
        expected_rows,
        got: format!(
            "{} reels of {:?} symbols",
            grid.len(),
            grid.iter().map(Vec::len).collect::<Vec<_>>()
        ),
    };

    if grid.len() != expected_reels {
        return Err(shape_error());
    }
    if grid.iter().any(|column| column.len() != expected_rows) {
        return Err(shape_error());
    }
    Ok(())
}
