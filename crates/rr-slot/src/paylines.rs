//! Payline evaluation

use log::warn;
use serde::{Deserialize, Serialize};

use crate::config::{GameConfig, LineMap};
use crate::grid::Grid;
use crate::money::round2;

/// A win on a single payline
///
/// Field names follow the wire format the client consumes: the line mask
/// travels with the result so the presentation layer can highlight cells
/// without re-deriving them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineResult {
    /// 1-based payline number, stable for a given config
    pub number: u32,
    /// Matched symbol id
    pub symbol: u32,
    /// Length of the matched run (always >= 3)
    pub count: u8,
    /// The line's cell mask
    pub map: LineMap,
    /// Win amount, cent-rounded
    pub amount: f64,
}

/// Evaluate a grid against every configured payline
///
/// Results come back in payline declaration order, not by amount. The match
/// is the longest run of identical symbols starting at the line's first
/// cell; a run beginning mid-line never pays — standard slot convention.
/// Lines whose symbol has no paytable entry for the matched count are
/// skipped, never an error.
pub fn evaluate(config: &GameConfig, bet_amount: f64, grid: &Grid) -> Vec<LineResult> {
    let mut results = Vec::new();

    for (index, map) in config.lines_positions.iter().enumerate() {
        let number = index as u32 + 1;

        let symbols_in_line: Vec<u32> = map
            .cells()
            .filter_map(|(reel, row)| grid.get(reel).and_then(|column| column.get(row)))
            .copied()
            .collect();

        let Some(&symbol) = symbols_in_line.first() else {
            continue;
        };

        let count = symbols_in_line
            .iter()
            .take_while(|&&s| s == symbol)
            .count();
        if count < 3 {
            continue;
        }

        let Some(multiplier) = config.multiplier(symbol, count) else {
            warn!(
                "game {}: no multiplier for symbol {} at count {} on line {}, treating as zero",
                config.id, symbol, count, number
            );
            continue;
        };

        results.push(LineResult {
            number,
            symbol,
            count: count as u8,
            map: map.clone(),
            amount: round2(bet_amount * multiplier),
        });
    }

    results
}

/// Sum of per-line win amounts
pub fn total_win(lines: &[LineResult]) -> f64 {
    lines.iter().map(|line| line.amount).sum()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::config::{MultiplierStep, rock_climber};
    use crate::grid::OutcomeGenerator;

    /// Single-reel config with one line covering the top three rows
    fn one_line_config() -> GameConfig {
        GameConfig {
            id: "test-game".into(),
            reels_count: 1,
            reel_positions: 3,
            symbols_count: 8,
            lines_positions: vec![LineMap::new(vec![vec![true, true, true]])],
            symbols_multipliers: HashMap::from([(
                7,
                vec![MultiplierStep::new(3, 5.0)],
            )]),
        }
    }

    #[test]
    fn test_three_of_a_kind_on_single_line() {
        let config = one_line_config();
        let grid = vec![vec![7, 7, 7, 2]];

        let lines = evaluate(&config, 2.0, &grid);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].number, 1);
        assert_eq!(lines[0].symbol, 7);
        assert_eq!(lines[0].count, 3);
        assert_eq!(lines[0].amount, round2(2.0 * 5.0));
    }

    #[test]
    fn test_run_must_start_at_first_cell() {
        let config = one_line_config();
        // Run of three 7s, but it starts at the second cell
        let grid = vec![vec![2, 7, 7, 7]];

        assert!(evaluate(&config, 1.0, &grid).is_empty());
    }

    #[test]
    fn test_prefix_run_stops_at_first_mismatch() {
        let mut config = one_line_config();
        config.reel_positions = 4;
        config.lines_positions =
            vec![LineMap::new(vec![vec![true, true, true, true, true]])];
        config
            .symbols_multipliers
            .insert(7, vec![
                MultiplierStep::new(3, 5.0),
                MultiplierStep::new(4, 10.0),
                MultiplierStep::new(5, 25.0),
            ]);
        // 7 7 7 2 7: the trailing 7 must not extend the run
        let grid = vec![vec![7, 7, 7, 2, 7]];

        let lines = evaluate(&config, 1.0, &grid);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].count, 3);
        assert_eq!(lines[0].amount, 5.0);
    }

    #[test]
    fn test_short_run_pays_nothing() {
        let config = one_line_config();
        let grid = vec![vec![7, 7, 2, 7]];

        assert!(evaluate(&config, 1.0, &grid).is_empty());
    }

    #[test]
    fn test_missing_multiplier_entry_is_zero_line() {
        let mut config = one_line_config();
        // Symbol 3 has no paytable entry at all
        config.symbols_multipliers.remove(&3);
        let grid = vec![vec![3, 3, 3, 3]];

        assert!(evaluate(&config, 1.0, &grid).is_empty());
    }

    #[test]
    fn test_results_in_declaration_order() {
        let config = rock_climber();
        // Flood the grid with symbol 8 so every line pays the same
        let grid: Grid = (0..5).map(|_| vec![8, 8, 8, 8]).collect();

        let lines = evaluate(&config, 1.0, &grid);
        assert_eq!(lines.len(), config.lines_positions.len());
        for (i, line) in lines.iter().enumerate() {
            assert_eq!(line.number, i as u32 + 1);
            assert_eq!(line.count, 5);
        }
    }

    #[test]
    fn test_total_win_is_sum_of_amounts() {
        let config = rock_climber();
        let mut generator = OutcomeGenerator::seeded(99);

        for _ in 0..500 {
            let grid = generator.generate(&config);
            let lines = evaluate(&config, 1.0, &grid);
            let expected: f64 = lines.iter().map(|l| l.amount).sum();
            assert_abs_diff_eq!(total_win(&lines), expected);
        }
    }

    #[test]
    fn test_amounts_are_cent_rounded() {
        let config = one_line_config();
        let grid = vec![vec![7, 7, 7, 2]];

        // 0.33 * 5.0 = 1.65 exactly at cent precision
        let lines = evaluate(&config, 0.33, &grid);
        assert_eq!(lines[0].amount, round2(lines[0].amount));
        assert_eq!(lines[0].amount, 1.65);
    }
}
