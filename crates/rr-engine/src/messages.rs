//! Wire message types exchanged with the client
//!
//! Field names are camelCase on the wire; transport framing (sockets,
//! HTTP) is out of scope and handled by the surrounding service.

use serde::{Deserialize, Serialize};

use rr_slot::{Grid, LineResult};

use crate::engine::BetOutcome;

/// Client -> server: place a bet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BetRequest {
    pub game_id: String,
    pub bet: u32,
    pub coin_value: f64,
}

/// Server -> client: bet outcome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BetResponse {
    pub balance: f64,
    pub reels: Grid,
    pub is_win: bool,
    pub win: Vec<LineResult>,
}

impl From<BetOutcome> for BetResponse {
    fn from(outcome: BetOutcome) -> Self {
        Self {
            balance: outcome.balance,
            is_win: !outcome.lines.is_empty(),
            reels: outcome.grid,
            win: outcome.lines,
        }
    }
}

/// Server -> client: session state sync on connect/resume
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GamestateSync {
    pub balance: f64,
    pub bet: u32,
    pub coin_value: f64,
    pub reels: Grid,
}
