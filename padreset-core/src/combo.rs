//! START+B combo recognition.
//!
//! | combo              | action       |
//! |--------------------|--------------|
//! | START+B+A+C        | soft reset   |
//! | START+B+A+C+DOWN   | hard reset (when enabled) |
//! | START+B+direction  | select mode  |

use crate::buttons::Buttons;
use crate::modes::{Mode, ModeSet};
use crate::time::{Tick, exceeded};
use log::debug;

/// Action resolved from a held combo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Pulse the console reset button line.
    SoftReset,
    /// Pulse the cartridge #MRES line.
    HardReset,
    /// Switch to the given mode.
    SelectMode(Mode),
}

/// Debounced combo detector, run once per tick.
///
/// After a reset the detector stays latched until START+B has been seen
/// released for the debounce time. Only feed it snapshots decoded after the
/// reset: the cleared snapshot left by the reset itself is not a release.
#[derive(Debug, Clone)]
pub struct ComboDetector {
    debounce: Option<u16>,
    hard_reset: bool,
    dwell_start: Option<Tick>,
    latched: bool,
    released_since: Option<Tick>,
}

impl ComboDetector {
    /// Detector with the given dwell (`None` acts on first sight).
    pub fn new(debounce: Option<u16>, hard_reset: bool) -> Self {
        Self {
            debounce,
            hard_reset,
            dwell_start: None,
            latched: false,
            released_since: None,
        }
    }

    /// Whether a START+B hold is being timed.
    pub fn is_holding(&self) -> bool {
        self.dwell_start.is_some()
    }

    /// Forget the current hold, so a dwell starts over from the next
    /// snapshot.
    pub fn disarm(&mut self) {
        self.dwell_start = None;
    }

    /// Run one tick against the current snapshot.
    ///
    /// Reset takes priority over mode selection. A mode command repeats on
    /// every tick of a qualifying hold; applying the same mode again is a
    /// no-op downstream.
    pub fn tick(&mut self, now: Tick, buttons: &Buttons, modes: &dyn ModeSet) -> Option<Command> {
        let held = buttons.start && buttons.b;

        if self.latched {
            self.wait_for_release(now, held);
            return None;
        }

        if !held {
            if self.dwell_start.take().is_some() {
                debug!("combo released");
            }
            return None;
        }

        let since = *self.dwell_start.get_or_insert(now);
        if let Some(threshold) = self.debounce {
            if !exceeded(now, since, threshold) {
                return None;
            }
        }

        if buttons.a && buttons.c {
            self.dwell_start = None;
            self.latched = true;
            if self.hard_reset && buttons.down {
                return Some(Command::HardReset);
            }
            return Some(Command::SoftReset);
        }

        modes
            .resolve_direction(buttons.direction_bits())
            .map(Command::SelectMode)
    }

    fn wait_for_release(&mut self, now: Tick, held: bool) {
        if held {
            self.released_since = None;
            return;
        }
        let since = *self.released_since.get_or_insert(now);
        if exceeded(now, since, self.debounce.unwrap_or(0)) {
            debug!("combo released after reset");
            self.latched = false;
            self.released_since = None;
        }
    }
}
