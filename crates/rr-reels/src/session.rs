//! Slot session: bet round-trips, balance display and autoplay

use log::debug;

use rr_engine::{BetRequest, BetResponse, GamestateSync};
use rr_slot::{GameConfig, Grid, round2};

use crate::controller::ReelsController;
use crate::events::CallbackList;
use crate::timing::ReelTimings;

/// Selectable coin denominations
pub const COIN_VALUES: [f64; 5] = [0.01, 0.03, 0.10, 0.20, 0.50];

/// Default coin value index (0.10)
const DEFAULT_COIN_INDEX: usize = 2;

/// Credit roll-up duration after a win
const CREDITS_TWEEN_MS: f64 = 3000.0;

/// Linear tween of the displayed credits toward the settled balance
///
/// `update` interpolates; the final frame snaps to `to` so the display
/// always ends exactly on the authoritative value.
struct CreditsTween {
    from: f64,
    to: f64,
    elapsed_ms: f64,
}

impl CreditsTween {
    fn new(from: f64, to: f64) -> Self {
        Self {
            from,
            to,
            elapsed_ms: 0.0,
        }
    }

    fn update(&mut self, delta_ms: f64) -> f64 {
        self.elapsed_ms += delta_ms;
        if self.is_complete() {
            self.to
        } else {
            let t = self.elapsed_ms / CREDITS_TWEEN_MS;
            self.from + (self.to - self.from) * t
        }
    }

    fn is_complete(&self) -> bool {
        self.elapsed_ms >= CREDITS_TWEEN_MS
    }
}

/// Client-side session for one game
///
/// Single-threaded and cooperative: the host calls [`tick`](Self::tick)
/// once per frame, drains [`take_outgoing`](Self::take_outgoing) into its
/// transport, and feeds replies back through the `handle_*` methods.
/// Dropping the session drops every subscription with it.
pub struct SlotSession {
    game_id: String,
    controller: ReelsController,
    bet: u32,
    coin_value_index: usize,
    /// Last server-confirmed balance
    balance: f64,
    /// What the credits meter shows, optimistically debited during a spin
    displayed_balance: f64,
    autoplay: bool,
    response: Option<BetResponse>,
    /// Win amount held back from the display until the roll-up runs
    pending_win: Option<f64>,
    credits_tween: Option<CreditsTween>,
    outbox: Vec<BetRequest>,
    last_resting_grid: Grid,
    bet_changed: CallbackList<u32>,
    coin_value_changed: CallbackList<f64>,
    win_events: CallbackList<f64>,
}

impl SlotSession {
    pub fn new(config: &GameConfig, timings: ReelTimings) -> Self {
        let controller = ReelsController::new(config, timings);
        let last_resting_grid = controller.windows();

        Self {
            game_id: config.id.clone(),
            controller,
            bet: rr_engine::DEFAULT_BET,
            coin_value_index: DEFAULT_COIN_INDEX,
            balance: 0.0,
            displayed_balance: 0.0,
            autoplay: false,
            response: None,
            pending_win: None,
            credits_tween: None,
            outbox: Vec::new(),
            last_resting_grid,
            bet_changed: CallbackList::new(),
            coin_value_changed: CallbackList::new(),
            win_events: CallbackList::new(),
        }
    }

    pub fn controller(&self) -> &ReelsController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut ReelsController {
        &mut self.controller
    }

    pub fn bet(&self) -> u32 {
        self.bet
    }

    pub fn coin_value(&self) -> f64 {
        COIN_VALUES[self.coin_value_index]
    }

    pub fn balance(&self) -> f64 {
        self.balance
    }

    pub fn displayed_balance(&self) -> f64 {
        self.displayed_balance
    }

    pub fn autoplay(&self) -> bool {
        self.autoplay
    }

    pub fn set_autoplay(&mut self, enabled: bool) {
        self.autoplay = enabled;
    }

    /// Stake of the next spin at the current bet and coin value
    pub fn stake(&self) -> f64 {
        round2(self.bet as f64 * 10.0 * self.coin_value())
    }

    /// Fired when the bet level changes
    pub fn bet_changed(&mut self) -> &mut CallbackList<u32> {
        &mut self.bet_changed
    }

    /// Fired when the coin value changes
    pub fn coin_value_changed(&mut self) -> &mut CallbackList<f64> {
        &mut self.coin_value_changed
    }

    /// Fired with the total win amount when a winning spin settles
    pub fn win_events(&mut self) -> &mut CallbackList<f64> {
        &mut self.win_events
    }

    pub fn set_bet(&mut self, bet: u32) {
        if bet == self.bet || bet == 0 {
            return;
        }
        self.bet = bet;
        let bet = self.bet;
        self.bet_changed.emit(&bet);
    }

    pub fn set_coin_value_index(&mut self, index: usize) {
        let index = index.min(COIN_VALUES.len() - 1);
        if index == self.coin_value_index {
            return;
        }
        self.coin_value_index = index;
        let value = self.coin_value();
        self.coin_value_changed.emit(&value);
    }

    /// Requests queued since the last call, for the host transport
    pub fn take_outgoing(&mut self) -> Vec<BetRequest> {
        std::mem::take(&mut self.outbox)
    }

    /// The play button
    ///
    /// Reels at rest: queue a bet, optimistically debit the display and
    /// start rolling. Reels in flight with the outcome known: skip, which
    /// force-stops the remaining reels at the authoritative grid and never
    /// issues another request. The skip also turns autoplay off.
    pub fn play(&mut self) {
        if self.controller.reels_active() {
            if self.response.is_some() && self.controller.request_stop() {
                self.autoplay = false;
                let grid = self.last_resting_grid.clone();
                self.controller.force_stop_active(&grid);
            }
            return;
        }

        // complete a running roll-up instantly before the next spin
        if let Some(tween) = self.credits_tween.take() {
            self.displayed_balance = tween.to;
        }
        if let Some(win) = self.pending_win.take() {
            self.displayed_balance = round2(self.displayed_balance + win);
        }
        self.response = None;

        let request = BetRequest {
            game_id: self.game_id.clone(),
            bet: self.bet,
            coin_value: self.coin_value(),
        };
        debug!("queueing bet: {} x {}", request.bet, request.coin_value);
        self.displayed_balance = round2(self.displayed_balance - self.stake());
        self.outbox.push(request);
        self.controller.roll_all();
    }

    /// Apply a bet outcome
    ///
    /// The balance becomes authoritative immediately; on a win the total
    /// is held back from the display until the reels settle and the
    /// roll-up has run. A stop command latched while the response was in
    /// flight is honored right away.
    pub fn handle_bet_response(&mut self, response: BetResponse) {
        self.balance = response.balance;

        if response.is_win {
            let total: f64 = response.win.iter().map(|line| line.amount).sum();
            self.pending_win = Some(total);
            self.displayed_balance = round2(response.balance - total);
        } else {
            self.displayed_balance = response.balance;
        }

        self.last_resting_grid = response.reels.clone();
        self.controller.set_stop_values(&response.reels);
        // the host's stop control latches on the controller while the
        // response is still in flight; honor it the moment the outcome
        // is known instead of waiting out the stagger schedule
        let skip = self.controller.stop_command_given();
        self.response = Some(response);

        if skip {
            let grid = self.last_resting_grid.clone();
            self.controller.force_stop_active(&grid);
        }
    }

    /// Roll back a rejected bet
    ///
    /// Restores the optimistic debit and settles the reels back on the
    /// previous resting grid, leaving the session as if the spin had not
    /// been attempted. Autoplay is switched off: retrying an already
    /// rejected stake would just cycle rejections.
    pub fn handle_bet_rejected(&mut self) {
        debug!("bet rejected, restoring display");
        self.autoplay = false;
        self.displayed_balance = self.balance;
        self.response = None;
        self.pending_win = None;
        let grid = self.last_resting_grid.clone();
        self.controller.force_stop_active(&grid);
    }

    /// Apply a state sync on connect or resume
    pub fn handle_gamestate(&mut self, sync: GamestateSync) {
        self.balance = sync.balance;
        self.displayed_balance = sync.balance;
        self.bet = sync.bet;
        self.coin_value_index = COIN_VALUES
            .iter()
            .position(|&v| (v - sync.coin_value).abs() < 1e-9)
            .unwrap_or(DEFAULT_COIN_INDEX);
        self.last_resting_grid = sync.reels;
    }

    /// Advance the session by one frame
    pub fn tick(&mut self, delta_ms: f64) {
        self.controller.tick(delta_ms, self.response.is_some());

        if let Some(tween) = &mut self.credits_tween {
            self.displayed_balance = tween.update(delta_ms);
            if tween.is_complete() {
                self.credits_tween = None;
            }
        }

        // reels settled on a win: start rolling the credits up
        if !self.controller.reels_active() {
            if let Some(win) = self.pending_win.take() {
                self.win_events.emit(&win);
                self.credits_tween = Some(CreditsTween::new(self.displayed_balance, self.balance));
            }
        }

        if self.autoplay
            && !self.controller.reels_active()
            && self.pending_win.is_none()
            && self.credits_tween.is_none()
        {
            self.play();
        }
    }
}
