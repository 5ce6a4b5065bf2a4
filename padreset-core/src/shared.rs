//! State shared between the select-line interrupt and the main loop.

use crate::buttons::Buttons;
use std::sync::atomic::{AtomicBool, AtomicU16, Ordering};

/// Single-writer/single-reader cell between the decoder (interrupt context)
/// and the main loop.
///
/// The snapshot is stored as one packed word (`hi << 8 | lo`), so a reader
/// never sees half of one decode and half of another. Every publish bumps a
/// generation counter; [`SharedState::clear_buttons`] does not, so the main
/// loop can tell a decoded release from one it forced itself.
///
/// ```
/// use padreset_core::{Buttons, SharedState};
///
/// static SHARED: SharedState = SharedState::new();
///
/// SHARED.publish(Buttons { start: true, ..Default::default() });
/// assert!(SHARED.buttons().start);
/// assert!(!SHARED.take_activity());
/// ```
#[derive(Debug)]
pub struct SharedState {
    buttons: AtomicU16,
    generation: AtomicU16,
    activity: AtomicBool,
}

impl SharedState {
    /// Create an empty cell: all released, no activity.
    pub const fn new() -> Self {
        Self {
            buttons: AtomicU16::new(0),
            generation: AtomicU16::new(0),
            activity: AtomicBool::new(false),
        }
    }

    /// Replace the whole snapshot.
    pub fn publish(&self, buttons: Buttons) {
        let (hi, lo) = buttons.encode();
        self.buttons
            .store(u16::from(hi) << 8 | u16::from(lo), Ordering::SeqCst);
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    /// Number of snapshots published so far, wrapping.
    pub fn generation(&self) -> u16 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Reset the snapshot to all released, without counting as a publish.
    pub fn clear_buttons(&self) {
        self.buttons.store(0, Ordering::SeqCst);
    }

    /// Read the current snapshot.
    pub fn buttons(&self) -> Buttons {
        let packed = self.buttons.load(Ordering::SeqCst);
        Buttons::decode((packed >> 8) as u8, packed as u8)
    }

    /// Record that a select-line edge was seen.
    pub fn signal_activity(&self) {
        self.activity.store(true, Ordering::SeqCst);
    }

    /// Consume the activity flag, returning whether it was set.
    pub fn take_activity(&self) -> bool {
        self.activity.swap(false, Ordering::SeqCst)
    }

    /// Drop any pending activity without looking at it.
    pub fn clear_activity(&self) {
        self.activity.store(false, Ordering::SeqCst);
    }
}

impl Default for SharedState {
    fn default() -> Self {
        Self::new()
    }
}
