//! Non-volatile mode storage and the deferred write-back in front of it.

use crate::modes::Mode;
use crate::time::{Tick, exceeded};
use log::debug;

/// EEPROM address holding the last saved mode.
pub const MODE_SLOT: u16 = 0;

/// Single-byte access to non-volatile memory.
pub trait Persistence {
    /// Read the byte at `slot`.
    fn read_byte(&mut self, slot: u16) -> u8;

    /// Write `value` at `slot`.
    fn write_byte(&mut self, slot: u16, value: u8);
}

/// Dirty-flag write-back cache for the saved mode.
///
/// Each change restarts the dwell, so browsing through modes never writes
/// the intermediate ones. A write is due only after `delay` ms without a
/// further change, and only if the value differs from what is stored.
#[derive(Debug, Clone)]
pub struct SaveScheduler {
    persisted: Mode,
    pending_since: Option<Tick>,
    delay: u16,
}

impl SaveScheduler {
    /// Scheduler for a cell currently holding `persisted`.
    pub fn new(persisted: Mode, delay: u16) -> Self {
        Self {
            persisted,
            pending_since: None,
            delay,
        }
    }

    /// The mode last written (or loaded at start-up).
    pub fn persisted(&self) -> Mode {
        self.persisted
    }

    /// Whether a change is waiting for its dwell to elapse.
    pub fn is_pending(&self) -> bool {
        self.pending_since.is_some()
    }

    /// Record a mode change at `now`, restarting the dwell.
    pub fn mark_dirty(&mut self, now: Tick) {
        self.pending_since = Some(now);
    }

    /// Check the dwell. Returns the mode to write once it has elapsed and
    /// `current` differs from the stored value.
    ///
    /// The pending mark is dropped once the dwell elapses, written or not.
    pub fn poll(&mut self, now: Tick, current: Mode) -> Option<Mode> {
        let since = self.pending_since?;
        if !exceeded(now, since, self.delay) {
            return None;
        }
        self.pending_since = None;

        if current == self.persisted {
            debug!("save skipped: mode {} already stored", current.index());
            return None;
        }
        self.persisted = current;
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modes::{ModeSet, RegionSwitch};

    #[test]
    fn test_write_due_after_dwell() {
        let mut scheduler = SaveScheduler::new(RegionSwitch::USA, 5000);
        scheduler.mark_dirty(100);

        assert_eq!(scheduler.poll(5100, RegionSwitch::JAPAN), None);
        assert!(scheduler.is_pending());
        assert_eq!(scheduler.poll(5101, RegionSwitch::JAPAN), Some(RegionSwitch::JAPAN));
        assert_eq!(scheduler.persisted(), RegionSwitch::JAPAN);
        assert!(!scheduler.is_pending());
        assert_eq!(scheduler.poll(9000, RegionSwitch::JAPAN), None);
    }

    #[test]
    fn test_unchanged_value_clears_pending_without_write() {
        let mut scheduler = SaveScheduler::new(RegionSwitch::EUROPE, 10);
        scheduler.mark_dirty(0);
        assert_eq!(scheduler.poll(11, RegionSwitch::EUROPE), None);
        assert!(!scheduler.is_pending());
    }

    #[test]
    fn test_new_change_restarts_dwell() {
        let mut scheduler = SaveScheduler::new(RegionSwitch::USA, 100);
        scheduler.mark_dirty(0);
        assert_eq!(scheduler.poll(80, RegionSwitch.next(RegionSwitch::USA)), None);
        scheduler.mark_dirty(80);
        assert_eq!(scheduler.poll(120, RegionSwitch::EUROPE), None);
        assert_eq!(scheduler.poll(181, RegionSwitch::EUROPE), Some(RegionSwitch::EUROPE));
    }

    #[test]
    fn test_dwell_across_counter_wrap() {
        let mut scheduler = SaveScheduler::new(RegionSwitch::USA, 5000);
        scheduler.mark_dirty(u16::MAX - 1000);
        assert_eq!(scheduler.poll(3999, RegionSwitch::ASIA), None);
        assert_eq!(scheduler.poll(4000, RegionSwitch::ASIA), Some(RegionSwitch::ASIA));
    }
}
