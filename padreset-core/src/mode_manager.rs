//! Active mode, its outputs, and deferred saving.

use crate::board::Board;
use crate::indicator::{Color, Indicator};
use crate::modes::{Mode, ModeSet};
use crate::persistence::{MODE_SLOT, Persistence, SaveScheduler};
use crate::time::Tick;
use log::{debug, info};

/// Blinks shown after a save.
const SAVE_BLINKS: u8 = 2;
/// Duration of each half of a save blink (ms).
const SAVE_BLINK_MS: u16 = 50;

/// Owns the current mode.
///
/// Applying a mode drives the outputs at once; the save to non-volatile
/// memory happens later through [`SaveScheduler`].
#[derive(Debug)]
pub struct ModeManager {
    modes: &'static dyn ModeSet,
    indicator: Indicator,
    current: Mode,
    saves: SaveScheduler,
}

impl ModeManager {
    /// Load the saved mode from `storage`, normalising bad values.
    pub fn load<S: Persistence + ?Sized>(
        modes: &'static dyn ModeSet,
        indicator: Indicator,
        save_delay: u16,
        storage: &mut S,
    ) -> Self {
        let raw = storage.read_byte(MODE_SLOT);
        let current = modes.from_persisted(raw);
        if raw != current.index() {
            debug!("stored mode byte {:#04x} normalised to {}", raw, current.index());
        }
        Self {
            modes,
            indicator,
            current,
            saves: SaveScheduler::new(current, save_delay),
        }
    }

    /// The active mode.
    pub fn current(&self) -> Mode {
        self.current
    }

    /// The mode last stored.
    pub fn persisted(&self) -> Mode {
        self.saves.persisted()
    }

    /// Whether a save is waiting for the mode to settle.
    pub fn save_pending(&self) -> bool {
        self.saves.is_pending()
    }

    /// The active mode set.
    pub fn modes(&self) -> &'static dyn ModeSet {
        self.modes
    }

    /// Drive outputs for the current mode unconditionally (power-on).
    pub fn restore<B: Board>(&self, board: &mut B) {
        info!("starting in mode {}", self.modes.name(self.current));
        self.modes.apply_mode(self.current, board);
        self.show_current(board);
    }

    /// Switch to `mode`. Returns `false` if it is already active.
    pub fn apply<B: Board>(&mut self, mode: Mode, now: Tick, board: &mut B) -> bool {
        if mode == self.current {
            return false;
        }

        info!(
            "mode {} -> {}",
            self.modes.name(self.current),
            self.modes.name(mode)
        );
        self.modes.apply_mode(mode, board);
        self.indicator.show(board, self.modes.indicator_color_for(mode));
        self.current = mode;
        self.saves.mark_dirty(now);
        true
    }

    /// Advance to the next mode in the set.
    pub fn cycle<B: Board>(&mut self, now: Tick, board: &mut B) {
        let next = self.modes.next(self.current);
        self.apply(next, now, board);
    }

    /// Show the current mode's colour.
    pub fn show_current<B: Board + ?Sized>(&self, board: &mut B) {
        self.indicator
            .show(board, self.modes.indicator_color_for(self.current));
    }

    /// Turn the indicator off.
    pub fn blank<B: Board + ?Sized>(&self, board: &mut B) {
        self.indicator.show(board, Color::OFF);
    }

    /// Write the mode once it has settled. Returns `true` if a write happened.
    pub fn poll_save<B, S>(&mut self, now: Tick, board: &mut B, storage: &mut S) -> bool
    where
        B: Board,
        S: Persistence + ?Sized,
    {
        let Some(mode) = self.saves.poll(now, self.current) else {
            return false;
        };

        storage.write_byte(MODE_SLOT, mode.index());
        info!("saved mode {}", self.modes.name(mode));

        if self.indicator.is_enabled() {
            for _ in 0..SAVE_BLINKS {
                board.delay_ms(SAVE_BLINK_MS);
                self.indicator.show(board, Color::WHITE);
                board.delay_ms(SAVE_BLINK_MS);
                self.show_current(board);
            }
        }
        true
    }
}
