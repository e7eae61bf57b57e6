//! Timing profiles for reel animation

use serde::{Deserialize, Serialize};

/// Reference frame length the speed constants are expressed against
pub const FRAME_MS: f64 = 1000.0 / 60.0;

/// Named timing profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimingProfile {
    /// Normal gameplay timing
    Normal,
    /// Fast/Turbo mode (hold-to-spin)
    Turbo,
    /// Custom timing
    Custom,
}

impl Default for TimingProfile {
    fn default() -> Self {
        Self::Normal
    }
}

/// Detailed reel timing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReelTimings {
    /// Profile type
    pub profile: TimingProfile,

    /// Time the first reel keeps rolling after the outcome is known (ms)
    pub spin_time_ms: f64,

    /// Extra rolling time per subsequent reel (ms)
    pub spin_time_between_reels_ms: f64,

    /// Scroll speed in cells per reference frame
    pub speed: f64,

    /// Bounce overshoot as a fraction of one cell
    pub bounce_depth_perc: f64,

    /// Bounce ease-out duration (ms)
    pub bounce_duration_ms: f64,
}

impl ReelTimings {
    /// Normal gameplay timing
    pub fn normal() -> Self {
        Self {
            profile: TimingProfile::Normal,
            spin_time_ms: 350.0,
            spin_time_between_reels_ms: 200.0,
            speed: 0.18,
            bounce_depth_perc: 0.1,
            bounce_duration_ms: 350.0,
        }
    }

    /// Turbo mode: no stagger, faster scroll, shorter bounce
    pub fn turbo() -> Self {
        Self {
            profile: TimingProfile::Turbo,
            spin_time_ms: 100.0,
            spin_time_between_reels_ms: 0.0,
            speed: 0.36,
            bounce_depth_perc: 0.1,
            bounce_duration_ms: 150.0,
        }
    }

    /// Scheduled stop delay for a reel by index
    pub fn stop_delay_ms(&self, reel_index: usize) -> f64 {
        self.spin_time_ms + reel_index as f64 * self.spin_time_between_reels_ms
    }
}

impl Default for ReelTimings {
    fn default() -> Self {
        Self::normal()
    }
}
