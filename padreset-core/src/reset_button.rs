//! Console reset button: tap to reset, hold to cycle modes.

use crate::time::{Tick, exceeded};
use log::debug;

/// Where the button is in a press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetState {
    /// Not pressed.
    Released,
    /// Pressed since the tick given; releasing now is a tap.
    ShortDown(Tick),
    /// Held past the long-press time; last cycle at the tick given.
    LongHeld(Tick),
}

/// Action requested by the reset button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetAction {
    /// The button was tapped.
    SoftReset,
    /// The button has been held for another long-press interval.
    CycleMode,
}

/// Tap/hold state machine, run once per tick.
#[derive(Debug, Clone)]
pub struct ResetButton {
    state: ResetState,
    long_press: u16,
}

impl ResetButton {
    /// Released button with the given long-press time.
    pub fn new(long_press: u16) -> Self {
        Self {
            state: ResetState::Released,
            long_press,
        }
    }

    /// Current state.
    pub fn state(&self) -> ResetState {
        self.state
    }

    /// Feed the button level for this tick.
    ///
    /// While held, `CycleMode` repeats every long-press interval. Releasing
    /// after the first cycle does nothing.
    pub fn tick(&mut self, now: Tick, pressed: bool) -> Option<ResetAction> {
        match (self.state, pressed) {
            (ResetState::Released, false) => None,
            (ResetState::Released, true) => {
                self.state = ResetState::ShortDown(now);
                None
            }
            (ResetState::ShortDown(_), false) => {
                self.state = ResetState::Released;
                Some(ResetAction::SoftReset)
            }
            (ResetState::LongHeld(_), false) => {
                debug!("reset button released after long hold");
                self.state = ResetState::Released;
                None
            }
            (ResetState::ShortDown(since) | ResetState::LongHeld(since), true) => {
                if !exceeded(now, since, self.long_press) {
                    return None;
                }
                self.state = ResetState::LongHeld(now);
                Some(ResetAction::CycleMode)
            }
        }
    }
}
