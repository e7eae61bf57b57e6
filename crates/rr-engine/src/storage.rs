//! Account and gamestate storage interfaces

use std::collections::HashMap;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use rr_slot::Grid;

/// Storage-layer failure
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Storage error: {0}")]
pub struct StorageError(pub String);

/// Account balance store
pub trait AccountStore: Send + Sync {
    fn balance(&self, account_key: &str) -> Result<f64, StorageError>;
    fn set_balance(&self, account_key: &str, value: f64) -> Result<(), StorageError>;
}

/// Per-(account, game) resting state, persisted after every bet so a client
/// can reconnect and resume at the grid it left
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestingState {
    pub reels: Grid,
    pub bet: u32,
    pub coin_value: f64,
}

/// Resting game-state store
pub trait GamestateStore: Send + Sync {
    fn get(&self, account_key: &str, game_id: &str) -> Result<Option<RestingState>, StorageError>;
    fn set(
        &self,
        account_key: &str,
        game_id: &str,
        state: &RestingState,
    ) -> Result<(), StorageError>;
}

/// In-memory implementation of both stores
///
/// Backs tests and single-process deployments; durable persistence plugs in
/// behind the same traits.
#[derive(Default)]
pub struct MemoryStore {
    balances: RwLock<HashMap<String, f64>>,
    gamestates: RwLock<HashMap<(String, String), RestingState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create or overwrite an account
    pub fn create_account(&self, account_key: &str, balance: f64) {
        self.balances.write().insert(account_key.into(), balance);
    }
}

impl AccountStore for MemoryStore {
    fn balance(&self, account_key: &str) -> Result<f64, StorageError> {
        self.balances
            .read()
            .get(account_key)
            .copied()
            .ok_or_else(|| StorageError(format!("unknown account: {account_key}")))
    }

    fn set_balance(&self, account_key: &str, value: f64) -> Result<(), StorageError> {
        let mut balances = self.balances.write();
        if !balances.contains_key(account_key) {
            return Err(StorageError(format!("unknown account: {account_key}")));
        }
        balances.insert(account_key.into(), value);
        Ok(())
    }
}

impl GamestateStore for MemoryStore {
    fn get(&self, account_key: &str, game_id: &str) -> Result<Option<RestingState>, StorageError> {
        Ok(self
            .gamestates
            .read()
            .get(&(account_key.into(), game_id.into()))
            .cloned())
    }

    fn set(
        &self,
        account_key: &str,
        game_id: &str,
        state: &RestingState,
    ) -> Result<(), StorageError> {
        self.gamestates
            .write()
            .insert((account_key.into(), game_id.into()), state.clone());
        Ok(())
    }
}
