//! # rr-slot — Slot Machine Outcome Engine
//!
//! Deterministic core of the slot platform: static game configurations,
//! pseudo-random grid generation, and payline evaluation. Everything in this
//! crate is CPU-bound and free of I/O; the bet engine and the client
//! animation layer build on top of it.
//!
//! ## Architecture
//!
//! ```text
//! GameRegistry ──> GameConfig (reels × rows, line maps, multipliers)
//!                      │
//!                      v
//! OutcomeGenerator ──> Grid ──> evaluate() ──> Vec<LineResult>
//! ```

pub mod config;
pub mod error;
pub mod grid;
pub mod money;
pub mod paylines;

pub use config::*;
pub use error::*;
pub use grid::*;
pub use money::*;
pub use paylines::*;
