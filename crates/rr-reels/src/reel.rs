//! Single reel animation state machine

use log::debug;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::events::CallbackList;
use crate::timing::{FRAME_MS, ReelTimings};

/// Number of precomputed filler symbols a reel cycles through while rolling
const FILLER_LEN: usize = 1000;

/// Animation phase of a single reel
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReelPhase {
    /// At rest, showing a settled window
    Idle,
    /// Scrolling through filler symbols, no stop requested yet
    Rolling,
    /// Stop requested: consuming authoritative values, `consumed` so far
    Stopping { consumed: u8 },
    /// Settled on the final window, easing out the overshoot
    Bouncing { elapsed_ms: f64 },
}

/// One spinning reel column
///
/// The displayed window holds `positions + 1` symbols, index 0 being the
/// overscan row above the visible area. While rolling the reel feeds on a
/// cycling filler buffer; once stopped it consumes the authoritative
/// column bottom-up so the settled window reads top-to-bottom.
pub struct Reel {
    positions: u8,
    values: Vec<u32>,
    filler: Vec<u32>,
    filler_cursor: usize,
    stop_values: Vec<u32>,
    offset: f64,
    phase: ReelPhase,
    timings: ReelTimings,
    start_events: CallbackList,
    stop_events: CallbackList,
}

impl Reel {
    /// Create an idle reel with a random filler buffer and window
    pub fn new(positions: u8, symbols_count: u32, timings: ReelTimings) -> Self {
        Self::with_rng(positions, symbols_count, timings, StdRng::from_os_rng())
    }

    fn with_rng(positions: u8, symbols_count: u32, timings: ReelTimings, mut rng: StdRng) -> Self {
        let filler: Vec<u32> = (0..FILLER_LEN)
            .map(|_| rng.random_range(1..=symbols_count))
            .collect();
        let values = filler[..positions as usize + 1].to_vec();

        Self {
            positions,
            values,
            filler,
            filler_cursor: 0,
            stop_values: Vec::new(),
            offset: 0.0,
            phase: ReelPhase::Idle,
            timings,
            start_events: CallbackList::new(),
            stop_events: CallbackList::new(),
        }
    }

    pub fn phase(&self) -> ReelPhase {
        self.phase
    }

    /// Rolling, stopping or bouncing
    pub fn is_active(&self) -> bool {
        self.phase != ReelPhase::Idle
    }

    /// Current window, top to bottom; index 0 is the overscan row
    pub fn window(&self) -> &[u32] {
        &self.values
    }

    /// Fractional scroll offset in cells, used by the renderer
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Fired when the reel starts rolling
    pub fn start_events(&mut self) -> &mut CallbackList {
        &mut self.start_events
    }

    /// Fired when the reel settles back to idle
    pub fn stop_events(&mut self) -> &mut CallbackList {
        &mut self.stop_events
    }

    /// Hand the reel its authoritative column, consumed on the next stop
    pub fn set_stop_values(&mut self, column: Vec<u32>) {
        self.stop_values = column;
    }

    /// Start rolling; only valid from idle
    pub fn roll(&mut self) {
        if self.phase != ReelPhase::Idle {
            return;
        }
        self.phase = ReelPhase::Rolling;
        self.start_events.emit(&());
    }

    /// Begin consuming stop values; a no-op unless currently rolling
    pub fn stop(&mut self) {
        if self.phase != ReelPhase::Rolling {
            return;
        }
        self.phase = ReelPhase::Stopping { consumed: 0 };
    }

    /// Settle immediately on the given column and play only the bounce
    ///
    /// Used for player skip once the outcome is already known; from idle
    /// this is a no-op.
    pub fn force_stop(&mut self, column: Vec<u32>) {
        if self.phase == ReelPhase::Idle {
            return;
        }
        debug!("reel force-stopped");
        self.values = column;
        self.stop_values.clear();
        self.offset = self.timings.bounce_depth_perc;
        self.phase = ReelPhase::Bouncing { elapsed_ms: 0.0 };
    }

    /// Advance the animation by `delta_ms`
    pub fn tick(&mut self, delta_ms: f64) {
        match self.phase {
            ReelPhase::Idle => {}
            ReelPhase::Rolling | ReelPhase::Stopping { .. } => {
                self.offset += self.timings.speed * delta_ms / FRAME_MS;
                while self.offset >= 1.0 {
                    self.offset -= 1.0;
                    self.shift_in_next();
                    if let ReelPhase::Bouncing { .. } = self.phase {
                        break;
                    }
                }
            }
            ReelPhase::Bouncing { elapsed_ms } => {
                let elapsed_ms = elapsed_ms + delta_ms;
                if elapsed_ms >= self.timings.bounce_duration_ms {
                    self.offset = 0.0;
                    self.phase = ReelPhase::Idle;
                    self.stop_events.emit(&());
                } else {
                    let t = elapsed_ms / self.timings.bounce_duration_ms;
                    // ease-out quintic from the overshoot back to zero
                    self.offset = self.timings.bounce_depth_perc * (1.0 - t).powi(5);
                    self.phase = ReelPhase::Bouncing { elapsed_ms };
                }
            }
        }
    }

    fn shift_in_next(&mut self) {
        let next = if matches!(self.phase, ReelPhase::Stopping { .. }) {
            // bottom-up consumption settles the column top-to-bottom
            match self.stop_values.pop() {
                Some(value) => value,
                None => self.next_filler(),
            }
        } else {
            self.next_filler()
        };
        self.values.pop();
        self.values.insert(0, next);

        if let ReelPhase::Stopping { consumed } = self.phase {
            let consumed = consumed + 1;
            if consumed == self.positions + 1 {
                self.offset = self.timings.bounce_depth_perc;
                self.phase = ReelPhase::Bouncing { elapsed_ms: 0.0 };
            } else {
                self.phase = ReelPhase::Stopping { consumed };
            }
        }
    }

    fn next_filler(&mut self) -> u32 {
        let value = self.filler[self.filler_cursor];
        self.filler_cursor = (self.filler_cursor + 1) % self.filler.len();
        value
    }
}
