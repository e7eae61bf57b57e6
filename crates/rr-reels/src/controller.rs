//! Reels controller: staggered stop scheduling across a reel set

use log::debug;

use rr_slot::{GameConfig, Grid};

use crate::events::CallbackList;
use crate::reel::Reel;
use crate::timing::ReelTimings;

/// Drives one [`Reel`] per configured column
///
/// Reels start together; stops are staggered by
/// `spin_time + i * spin_time_between_reels`, with the clock counted only
/// once the authoritative outcome is known. That makes the schedule an
/// ordering guarantee: no reel consumes stop values before the bet
/// response has arrived.
pub struct ReelsController {
    reels: Vec<Reel>,
    timings: ReelTimings,
    rolling_time_ms: f64,
    stop_issued: Vec<bool>,
    stop_command_given: bool,
    was_active: bool,
    start_events: CallbackList,
    stop_command_events: CallbackList,
    stopped_events: CallbackList,
}

impl ReelsController {
    pub fn new(config: &GameConfig, timings: ReelTimings) -> Self {
        let reels = (0..config.reels_count)
            .map(|_| {
                Reel::new(
                    config.reel_positions,
                    config.symbols_count as u32,
                    timings.clone(),
                )
            })
            .collect::<Vec<_>>();
        let count = reels.len();

        Self {
            reels,
            timings,
            rolling_time_ms: 0.0,
            stop_issued: vec![false; count],
            stop_command_given: false,
            was_active: false,
            start_events: CallbackList::new(),
            stop_command_events: CallbackList::new(),
            stopped_events: CallbackList::new(),
        }
    }

    pub fn reels(&self) -> &[Reel] {
        &self.reels
    }

    pub fn reels_mut(&mut self) -> &mut [Reel] {
        &mut self.reels
    }

    /// Any reel rolling, stopping or bouncing
    pub fn reels_active(&self) -> bool {
        self.reels.iter().any(Reel::is_active)
    }

    pub fn stop_command_given(&self) -> bool {
        self.stop_command_given
    }

    /// Fired when the reel set starts rolling
    pub fn start_events(&mut self) -> &mut CallbackList {
        &mut self.start_events
    }

    /// Fired once per spin when a stop command is accepted
    pub fn stop_command_events(&mut self) -> &mut CallbackList {
        &mut self.stop_command_events
    }

    /// Fired when the last reel settles
    pub fn stopped_events(&mut self) -> &mut CallbackList {
        &mut self.stopped_events
    }

    /// Settled window of every reel, for comparison against a grid
    pub fn windows(&self) -> Grid {
        self.reels.iter().map(|r| r.window().to_vec()).collect()
    }

    /// Hand each reel its authoritative column
    pub fn set_stop_values(&mut self, grid: &Grid) {
        for (reel, column) in self.reels.iter_mut().zip(grid) {
            reel.set_stop_values(column.clone());
        }
    }

    /// Start every reel; a no-op while any reel is still active
    pub fn roll_all(&mut self) {
        if self.reels_active() {
            return;
        }
        self.rolling_time_ms = 0.0;
        self.stop_issued.fill(false);
        self.stop_command_given = false;
        for reel in &mut self.reels {
            reel.roll();
        }
        self.start_events.emit(&());
    }

    /// Latch a player stop command; accepted once per spin
    pub fn request_stop(&mut self) -> bool {
        if !self.reels_active() || self.stop_command_given {
            return false;
        }
        debug!("stop command accepted");
        self.stop_command_given = true;
        self.stop_command_events.emit(&());
        true
    }

    /// Force every still-active reel to settle on the given grid
    pub fn force_stop_active(&mut self, grid: &Grid) {
        for (reel, column) in self.reels.iter_mut().zip(grid) {
            if reel.is_active() {
                reel.force_stop(column.clone());
            }
        }
    }

    /// Advance all reels; `outcome_known` gates the stop schedule
    pub fn tick(&mut self, delta_ms: f64, outcome_known: bool) {
        if outcome_known && self.reels_active() {
            self.rolling_time_ms += delta_ms;
            for (i, reel) in self.reels.iter_mut().enumerate() {
                if !self.stop_issued[i] && self.rolling_time_ms >= self.timings.stop_delay_ms(i) {
                    self.stop_issued[i] = true;
                    reel.stop();
                }
            }
        }

        for reel in &mut self.reels {
            reel.tick(delta_ms);
        }

        let active = self.reels_active();
        if self.was_active && !active {
            self.stopped_events.emit(&());
        }
        self.was_active = active;
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use rr_slot::rock_climber;

    use super::*;
    use crate::reel::ReelPhase;
    use crate::timing::FRAME_MS;

    fn test_grid() -> Grid {
        (0..5).map(|reel| vec![reel + 1; 4]).collect()
    }

    fn settle(controller: &mut ReelsController, outcome_known: bool) {
        for _ in 0..20_000 {
            controller.tick(FRAME_MS, outcome_known);
            if !controller.reels_active() {
                return;
            }
        }
        panic!("reels never settled");
    }

    #[test]
    fn test_reels_settle_on_grid_in_stagger_order() {
        let config = rock_climber();
        let mut controller = ReelsController::new(&config, ReelTimings::normal());
        let grid = test_grid();

        controller.roll_all();
        controller.set_stop_values(&grid);

        // at 400 ms reel 0 has been told to stop, reel 4 has not
        let mut elapsed = 0.0;
        while elapsed < 400.0 {
            controller.tick(FRAME_MS, true);
            elapsed += FRAME_MS;
        }
        assert!(!matches!(controller.reels()[0].phase(), ReelPhase::Rolling));
        assert_eq!(controller.reels()[4].phase(), ReelPhase::Rolling);

        settle(&mut controller, true);
        assert_eq!(controller.windows(), grid);
    }

    #[test]
    fn test_no_stop_before_outcome_known() {
        let config = rock_climber();
        let mut controller = ReelsController::new(&config, ReelTimings::normal());

        controller.roll_all();
        for _ in 0..500 {
            controller.tick(FRAME_MS, false);
        }
        assert!(
            controller
                .reels()
                .iter()
                .all(|r| r.phase() == ReelPhase::Rolling)
        );
    }

    #[test]
    fn test_stop_command_latches_once_per_spin() {
        let config = rock_climber();
        let mut controller = ReelsController::new(&config, ReelTimings::normal());
        let grid = test_grid();

        assert!(!controller.request_stop());

        controller.roll_all();
        assert!(controller.request_stop());
        assert!(!controller.request_stop());

        controller.set_stop_values(&grid);
        settle(&mut controller, true);

        controller.roll_all();
        assert!(controller.request_stop());
    }

    #[test]
    fn test_roll_all_while_active_is_noop() {
        let config = rock_climber();
        let mut controller = ReelsController::new(&config, ReelTimings::normal());
        let starts = Rc::new(RefCell::new(0));
        let s = starts.clone();
        controller.start_events().on(move |_| *s.borrow_mut() += 1);

        controller.roll_all();
        controller.roll_all();
        assert_eq!(*starts.borrow(), 1);
    }

    #[test]
    fn test_stopped_event_fires_once_when_last_reel_settles() {
        let config = rock_climber();
        let mut controller = ReelsController::new(&config, ReelTimings::normal());
        let stops = Rc::new(RefCell::new(0));
        let s = stops.clone();
        controller.stopped_events().on(move |_| *s.borrow_mut() += 1);

        controller.roll_all();
        controller.set_stop_values(&test_grid());
        settle(&mut controller, true);
        assert_eq!(*stops.borrow(), 1);

        // further idle ticks do not re-fire
        for _ in 0..100 {
            controller.tick(FRAME_MS, true);
        }
        assert_eq!(*stops.borrow(), 1);
    }

    #[test]
    fn test_force_stop_active_settles_everything() {
        let config = rock_climber();
        let mut controller = ReelsController::new(&config, ReelTimings::normal());
        let grid = test_grid();

        controller.roll_all();
        for _ in 0..30 {
            controller.tick(FRAME_MS, false);
        }

        controller.force_stop_active(&grid);
        settle(&mut controller, false);
        assert_eq!(controller.windows(), grid);
    }
}
