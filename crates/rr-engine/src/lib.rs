//! # rr-engine — Server-Side Bet Engine
//!
//! The authoritative decision point for a bet: validates the stake against
//! the account balance, draws the outcome grid, evaluates paylines, and
//! settles the new balance — serialized per account so concurrent bets can
//! never interleave balance reads and writes.
//!
//! Storage is injected through the [`storage`] traits; the bundled
//! [`MemoryStore`] backs tests and single-process deployments, while real
//! persistence lives behind the same interface as an external collaborator.

pub mod engine;
pub mod error;
pub mod messages;
pub mod storage;

pub use engine::*;
pub use error::*;
pub use messages::*;
pub use storage::*;
