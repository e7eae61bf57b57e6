//! Game configuration and registry

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{SlotError, SlotResult};

/// A payline mask over the grid
///
/// One boolean row per reel; `mask[reel][row]` marks cells that belong to the
/// line. Cells are iterated column-by-column, row-by-row, and that order is
/// the order symbols are matched in. Row 0 of every grid column is the
/// overscan buffer above the visible window, so line maps normally leave it
/// unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineMap(pub Vec<Vec<bool>>);

impl LineMap {
    /// Create from a raw reel-major mask
    pub fn new(mask: Vec<Vec<bool>>) -> Self {
        Self(mask)
    }

    /// Create a single-cell-per-reel line from a row index per reel
    /// (e.g., `path(&[2, 2, 2, 2, 2], 4)` for a straight middle line)
    pub fn path(rows: &[u8], rows_per_reel: u8) -> Self {
        let mask = rows
            .iter()
            .map(|&row| {
                (0..rows_per_reel)
                    .map(|r| r == row)
                    .collect()
            })
            .collect();
        Self(mask)
    }

    /// Number of reels the mask spans
    pub fn reels(&self) -> usize {
        self.0.len()
    }

    /// Marked cells as `(reel, row)` pairs in mask iteration order
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.0.iter().enumerate().flat_map(|(reel, column)| {
            column
                .iter()
                .enumerate()
                .filter(|&(_, &set)| set)
                .map(move |(row, _)| (reel, row))
        })
    }
}

/// One step of a symbol's multiplier table
///
/// `count` is the matched-symbol count the step applies to; tables start at
/// 3 and are ordered ascending, so the lookup index is `count - 3`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MultiplierStep {
    pub count: u8,
    pub multiplier: f64,
}

impl MultiplierStep {
    pub fn new(count: u8, multiplier: f64) -> Self {
        Self { count, multiplier }
    }
}

/// Static per-game description
///
/// Immutable once registered; everything the outcome generator and the
/// payline evaluator need to know about a game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Stable game identifier (e.g., "rock-climber")
    pub id: String,
    /// Number of reels (columns)
    pub reels_count: u8,
    /// Visible rows per reel; grid columns carry one extra overscan row
    pub reel_positions: u8,
    /// Number of distinct symbols; ids run 1..=symbols_count
    pub symbols_count: u8,
    /// Payline masks in declaration order; line numbers are index + 1
    pub lines_positions: Vec<LineMap>,
    /// Symbol id -> multiplier steps for counts 3, 4, 5, ...
    pub symbols_multipliers: HashMap<u32, Vec<MultiplierStep>>,
}

impl GameConfig {
    /// Rows per grid column, including the overscan buffer
    pub fn rows_per_reel(&self) -> usize {
        self.reel_positions as usize + 1
    }

    /// Multiplier for a symbol at a given match count, if the paytable has
    /// an entry for it
    pub fn multiplier(&self, symbol: u32, count: usize) -> Option<f64> {
        if count < 3 {
            return None;
        }
        let step = self.symbols_multipliers.get(&symbol)?.get(count - 3)?;
        debug_assert_eq!(step.count as usize, count);
        Some(step.multiplier)
    }

    /// Validate internal consistency
    pub fn validate(&self) -> SlotResult<()> {
        let invalid = |reason: String| SlotError::InvalidConfig {
            game: self.id.clone(),
            reason,
        };

        if self.reels_count == 0 || self.reel_positions == 0 || self.symbols_count == 0 {
            return Err(invalid("reels, positions and symbols must be non-zero".into()));
        }

        for (i, line) in self.lines_positions.iter().enumerate() {
            if line.reels() != self.reels_count as usize {
                return Err(invalid(format!(
                    "line {} spans {} reels, expected {}",
                    i + 1,
                    line.reels(),
                    self.reels_count
                )));
            }
            for column in &line.0 {
                if column.len() > self.rows_per_reel() {
                    return Err(invalid(format!(
                        "line {} mask has {} rows, max is {}",
                        i + 1,
                        column.len(),
                        self.rows_per_reel()
                    )));
                }
            }
        }

        for (&symbol, steps) in &self.symbols_multipliers {
            for (idx, step) in steps.iter().enumerate() {
                if step.count as usize != idx + 3 {
                    return Err(invalid(format!(
                        "symbol {} multiplier table is not ordered from count 3",
                        symbol
                    )));
                }
            }
        }

        Ok(())
    }

    /// Export as JSON
    pub fn to_json(&self) -> SlotResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| SlotError::InvalidConfig {
            game: self.id.clone(),
            reason: e.to_string(),
        })
    }

    /// Import from JSON (validated)
    pub fn from_json(json: &str) -> SlotResult<Self> {
        let config: Self = serde_json::from_str(json).map_err(|e| SlotError::InvalidConfig {
            game: "<json>".into(),
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }
}

/// The ten standard paylines shared by the built-in 5×3 games
///
/// Rows are grid-column indices: 0 is the overscan row, 1..=3 the visible
/// window top to bottom. The fixed `bet * 10 * coin_value` stake convention
/// comes from this line count.
fn standard_10_lines() -> Vec<LineMap> {
    const ROWS: u8 = 4;
    vec![
        LineMap::path(&[2, 2, 2, 2, 2], ROWS), // middle
        LineMap::path(&[1, 1, 1, 1, 1], ROWS), // top
        LineMap::path(&[3, 3, 3, 3, 3], ROWS), // bottom
        LineMap::path(&[1, 2, 3, 2, 1], ROWS), // V
        LineMap::path(&[3, 2, 1, 2, 3], ROWS), // inverted V
        LineMap::path(&[1, 1, 2, 3, 3], ROWS), // descending step
        LineMap::path(&[3, 3, 2, 1, 1], ROWS), // ascending step
        LineMap::path(&[2, 1, 1, 1, 2], ROWS), // arch
        LineMap::path(&[2, 3, 3, 3, 2], ROWS), // bowl
        LineMap::path(&[1, 2, 1, 2, 1], ROWS), // zigzag
    ]
}

fn standard_multipliers() -> HashMap<u32, Vec<MultiplierStep>> {
    let table = |pays: [f64; 3]| {
        vec![
            MultiplierStep::new(3, pays[0]),
            MultiplierStep::new(4, pays[1]),
            MultiplierStep::new(5, pays[2]),
        ]
    };

    HashMap::from([
        (1, table([0.5, 2.5, 10.0])),
        (2, table([0.5, 2.5, 10.0])),
        (3, table([0.8, 4.0, 15.0])),
        (4, table([0.8, 4.0, 15.0])),
        (5, table([1.0, 5.0, 20.0])),
        (6, table([1.2, 6.0, 25.0])),
        (7, table([1.5, 8.0, 40.0])),
        (8, table([2.0, 10.0, 50.0])),
    ])
}

/// Built-in game: Rock Climber (5×3, 8 symbols, 10 lines)
pub fn rock_climber() -> GameConfig {
    GameConfig {
        id: "rock-climber".into(),
        reels_count: 5,
        reel_positions: 3,
        symbols_count: 8,
        lines_positions: standard_10_lines(),
        symbols_multipliers: standard_multipliers(),
    }
}

/// Built-in game: Egyptian Treasures (5×3, 8 symbols, 10 lines)
pub fn egyptian_treasures() -> GameConfig {
    GameConfig {
        id: "egyptian-treasures".into(),
        reels_count: 5,
        reel_positions: 3,
        symbols_count: 8,
        lines_positions: standard_10_lines(),
        symbols_multipliers: standard_multipliers(),
    }
}

/// Registry mapping game ids to their immutable configurations
///
/// Looked up once per request and passed explicitly from there on; replaces
/// any per-call-site dispatch on game id.
#[derive(Debug, Clone, Default)]
pub struct GameRegistry {
    games: HashMap<String, Arc<GameConfig>>,
}

impl GameRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry preloaded with the built-in games
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry
            .register(rock_climber())
            .expect("built-in config is valid");
        registry
            .register(egyptian_treasures())
            .expect("built-in config is valid");
        registry
    }

    /// Register a game after validating it
    pub fn register(&mut self, config: GameConfig) -> SlotResult<()> {
        config.validate()?;
        self.games.insert(config.id.clone(), Arc::new(config));
        Ok(())
    }

    /// Look up a game by id
    pub fn get(&self, game_id: &str) -> SlotResult<Arc<GameConfig>> {
        self.games
            .get(game_id)
            .cloned()
            .ok_or_else(|| SlotError::UnknownGame(game_id.into()))
    }

    /// Registered game ids
    pub fn ids(&self) -> Vec<&str> {
        self.games.keys().map(String::as_str).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_map_path() {
        let line = LineMap::path(&[2, 2, 2], 4);
        let cells: Vec<_> = line.cells().collect();
        assert_eq!(cells, vec![(0, 2), (1, 2), (2, 2)]);
    }

    #[test]
    fn test_line_map_cell_order_is_column_major() {
        // Two cells on one reel must come out row-by-row before the next reel
        let line = LineMap::new(vec![vec![false, true, true], vec![true, false, false]]);
        let cells: Vec<_> = line.cells().collect();
        assert_eq!(cells, vec![(0, 1), (0, 2), (1, 0)]);
    }

    #[test]
    fn test_builtin_configs_validate() {
        assert!(rock_climber().validate().is_ok());
        assert!(egyptian_treasures().validate().is_ok());
    }

    #[test]
    fn test_registry_lookup() {
        let registry = GameRegistry::standard();
        assert!(registry.get("rock-climber").is_ok());
        assert_eq!(
            registry.get("no-such-game").unwrap_err(),
            SlotError::UnknownGame("no-such-game".into())
        );
    }

    #[test]
    fn test_validate_rejects_wrong_line_span() {
        let mut config = rock_climber();
        config.lines_positions.push(LineMap::path(&[1, 1], 4));
        assert!(matches!(
            config.validate(),
            Err(SlotError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_unordered_multipliers() {
        let mut config = rock_climber();
        config.symbols_multipliers.insert(
            1,
            vec![MultiplierStep::new(4, 1.0), MultiplierStep::new(3, 0.5)],
        );
        assert!(matches!(
            config.validate(),
            Err(SlotError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_json_round_trip() {
        let config = rock_climber();
        let json = config.to_json().unwrap();
        let back = GameConfig::from_json(&json).unwrap();
        assert_eq!(back.id, config.id);
        assert_eq!(back.lines_positions.len(), config.lines_positions.len());
    }
}
