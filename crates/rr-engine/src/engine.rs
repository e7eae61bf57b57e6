//! The authoritative bet engine

use std::collections::HashMap;
use std::sync::Arc;

use log::{debug, warn};
use parking_lot::Mutex;

use rr_slot::{
    GameConfig, GameRegistry, Grid, LineResult, OutcomeGenerator, evaluate, round2,
    total_win, validate_grid,
};

use crate::error::{EngineError, EngineResult};
use crate::messages::GamestateSync;
use crate::storage::{AccountStore, GamestateStore, RestingState};

/// Default stake of a freshly created gamestate
pub const DEFAULT_BET: u32 = 10;
/// Default coin value of a freshly created gamestate
pub const DEFAULT_COIN_VALUE: f64 = 0.10;

/// Result of one accepted bet, created atomically per request
#[derive(Debug, Clone)]
pub struct BetOutcome {
    /// The drawn symbol grid
    pub grid: Grid,
    /// Winning paylines in declaration order
    pub lines: Vec<LineResult>,
    /// Sum of line amounts
    pub total_win: f64,
    /// Stake actually debited: round2(bet * 10 * coin_value)
    pub bet_amount: f64,
    /// Account balance after settlement
    pub balance: f64,
}

/// Server-side bet engine
///
/// Holds the game registry and injected storage; bets for the same account
/// are serialized through a per-account mutex so balance reads and writes
/// never interleave.
pub struct BetEngine {
    registry: GameRegistry,
    accounts: Arc<dyn AccountStore>,
    gamestates: Arc<dyn GamestateStore>,
    generator: Mutex<OutcomeGenerator>,
    account_locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl BetEngine {
    /// Create an engine over the given registry and stores
    pub fn new(
        registry: GameRegistry,
        accounts: Arc<dyn AccountStore>,
        gamestates: Arc<dyn GamestateStore>,
    ) -> Self {
        Self {
            registry,
            accounts,
            gamestates,
            generator: Mutex::new(OutcomeGenerator::new()),
            account_locks: Mutex::new(HashMap::new()),
        }
    }

    /// Seed the outcome generator for reproducible results
    pub fn seed(&self, seed: u64) {
        self.generator.lock().seed(seed);
    }

    fn account_lock(&self, account_key: &str) -> Arc<Mutex<()>> {
        self.account_locks
            .lock()
            .entry(account_key.into())
            .or_default()
            .clone()
    }

    /// Drop a lock entry once no bet holds it, keeping the map bounded by
    /// the number of in-flight accounts rather than ever-seen accounts
    fn prune_account_lock(&self, account_key: &str) {
        let mut locks = self.account_locks.lock();
        if locks
            .get(account_key)
            .is_some_and(|lock| Arc::strong_count(lock) == 1)
        {
            locks.remove(account_key);
        }
    }

    /// Place a bet: validate the stake, draw and evaluate the outcome,
    /// settle and persist the new balance.
    ///
    /// The stake is `round2(bet * 10 * coin_value)` — the fixed 10-line
    /// convention of the built-in games, not derived from the payline count.
    pub fn place_bet(
        &self,
        account_key: &str,
        game_id: &str,
        bet: u32,
        coin_value: f64,
    ) -> EngineResult<BetOutcome> {
        let config = self.registry.get(game_id)?;

        let lock = self.account_lock(account_key);
        let result = {
            let _guard = lock.lock();
            self.settle_bet(account_key, game_id, bet, coin_value, &config)
        };
        drop(lock);
        self.prune_account_lock(account_key);
        result
    }

    fn settle_bet(
        &self,
        account_key: &str,
        game_id: &str,
        bet: u32,
        coin_value: f64,
        config: &GameConfig,
    ) -> EngineResult<BetOutcome> {
        let balance = self.accounts.balance(account_key)?;
        let bet_amount = round2(bet as f64 * 10.0 * coin_value);

        if balance < bet_amount {
            warn!(
                "rejecting bet on {game_id}: requires {bet_amount:.2}, balance {balance:.2}"
            );
            return Err(EngineError::InsufficientFunds {
                required: bet_amount,
                balance,
            });
        }

        let grid = self.generator.lock().generate(config);
        validate_grid(config, &grid)?;

        let lines = evaluate(config, bet_amount, &grid);
        let total_win = total_win(&lines);
        let new_balance = round2(balance - bet_amount + total_win);

        self.gamestates.set(
            account_key,
            game_id,
            &RestingState {
                reels: grid.clone(),
                bet,
                coin_value,
            },
        )?;
        self.accounts.set_balance(account_key, new_balance)?;

        debug!(
            "bet settled on {game_id}: stake {bet_amount:.2}, win {total_win:.2}, balance {new_balance:.2}"
        );

        Ok(BetOutcome {
            grid,
            lines,
            total_win,
            bet_amount,
            balance: new_balance,
        })
    }

    /// Fetch (or lazily create) the resting state for an account and game,
    /// returned together with the balance as a state-sync message.
    pub fn gamestate(&self, account_key: &str, game_id: &str) -> EngineResult<GamestateSync> {
        let config = self.registry.get(game_id)?;
        let balance = self.accounts.balance(account_key)?;

        let state = match self.gamestates.get(account_key, game_id)? {
            Some(state) => state,
            None => {
                let state = RestingState {
                    reels: self.generator.lock().generate(&config),
                    bet: DEFAULT_BET,
                    coin_value: DEFAULT_COIN_VALUE,
                };
                self.gamestates.set(account_key, game_id, &state)?;
                debug!("created gamestate for {account_key}/{game_id}");
                state
            }
        };

        Ok(GamestateSync {
            balance,
            bet: state.bet,
            coin_value: state.coin_value,
            reels: state.reels,
        })
    }
}
