//! Poll watchdog: polls the pad itself when the console stops doing so.
//!
//! With the console off or stuck, the decoder sees no edges and the last
//! snapshot would linger until the next power-up, where a stale START+B
//! could fire a combo. After `timeout` ms of silence the watchdog pulses the
//! select line every `period` ms so the decoder keeps refreshing.

use crate::board::Board;
use crate::config::SelfPoll;
use crate::shared::SharedState;
use log::{debug, info};

/// Width of each half of the synthetic select pulse (µs).
const PULSE_HALF_US: u16 = 10;

/// Countdown driven once per tick by the main loop.
#[derive(Debug, Clone)]
pub struct PollWatchdog {
    countdown: u16,
    timeout: u16,
    period: u16,
    polling: bool,
}

impl PollWatchdog {
    /// Watchdog armed with the full inactivity timeout.
    pub fn new(settings: SelfPoll) -> Self {
        Self {
            countdown: settings.timeout_ms,
            timeout: settings.timeout_ms,
            period: settings.period_ms,
            polling: false,
        }
    }

    /// Ticks left before the next synthetic poll.
    pub fn countdown(&self) -> u16 {
        self.countdown
    }

    /// Whether the watchdog has taken over polling.
    pub fn is_polling(&self) -> bool {
        self.polling
    }

    /// Drop pending activity and restart the full timeout.
    pub fn rearm(&mut self, shared: &SharedState) {
        shared.clear_activity();
        self.countdown = self.timeout;
    }

    /// Run one tick. Returns `true` if a synthetic pulse was sent.
    pub fn tick<B: Board + ?Sized>(&mut self, board: &mut B, shared: &SharedState) -> bool {
        if shared.take_activity() {
            if self.polling {
                debug!("select line active again, self-polling stopped");
                self.polling = false;
            }
            self.countdown = self.timeout;
            return false;
        }

        if self.countdown > 0 {
            self.countdown -= 1;
            return false;
        }

        if !self.polling {
            info!("no pad polling for {} ms, polling pad", self.timeout);
            self.polling = true;
        }
        self.pulse(board, shared);
        self.countdown = self.period;
        true
    }

    fn pulse<B: Board + ?Sized>(&self, board: &mut B, shared: &SharedState) {
        board.set_activity_led(true);
        shared.clear_buttons();

        board.drive_select(true);
        board.delay_us(PULSE_HALF_US);
        board.drive_select(false);
        board.delay_us(PULSE_HALF_US);

        board.release_select();
        board.delay_us(PULSE_HALF_US);

        // Edges from our own pulse are not console activity.
        shared.clear_activity();
        board.set_activity_led(false);
    }
}
