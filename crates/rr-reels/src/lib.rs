//! # rr-reels — Reel Animation and Session Orchestration
//!
//! Client-side counterpart of the bet engine: a per-reel animation state
//! machine driven by a frame clock, a controller that staggers reel stops
//! against the authoritative outcome, and the session glue that ties bet
//! round-trips, balance display, and autoplay together.
//!
//! Everything here runs single-threaded under cooperative scheduling: the
//! host calls [`SlotSession::tick`] once per frame and feeds network
//! responses in through the `handle_*` methods; reel state is only ever
//! mutated inside those calls.
//!
//! ## State machine
//!
//! ```text
//! Idle ──roll()──> Rolling ──stop()──> Stopping{consumed}
//!   ^                                        │ consumed == positions + 1
//!   └────────── Bouncing <───────────────────┘
//! ```
//!
//! While Rolling the reel feeds on a precomputed filler buffer; the
//! authoritative stop values are only consumed after `stop()`, which the
//! controller issues strictly after the bet response has arrived.

pub mod controller;
pub mod events;
pub mod reel;
pub mod session;
pub mod timing;

pub use controller::*;
pub use events::*;
pub use reel::*;
pub use session::*;
pub use timing::*;
