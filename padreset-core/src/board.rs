//! Hardware boundary traits.
//!
//! Pin setup (directions, pull-ups) happens before these traits are used and
//! is not modelled here. Methods take logical levels; the implementor maps
//! them to port registers.

use crate::modes::{Frequency, Language};

// =============================================================================
// Pad Port (interrupt side)
// =============================================================================

/// Read access to the controller port, used from the select-line interrupt.
pub trait PadPort {
    /// Busy-wait long enough for the data lines to settle after an edge.
    fn settle(&mut self);

    /// Current level of the select line (TH).
    fn select_is_high(&self) -> bool;

    /// Sample the six data lines, active-low.
    ///
    /// Bits 0-3 come from the directional port, bits 4-5 from TL and TR.
    fn read_data(&self) -> u8;
}

// =============================================================================
// Mode Lines
// =============================================================================

/// The console configuration outputs driven by a mode.
pub trait ModeLines {
    /// Drive the language jumper line.
    fn set_language(&mut self, language: Language);

    /// Drive the video frequency jumper line.
    fn set_frequency(&mut self, frequency: Frequency);
}

// =============================================================================
// Board (main loop side)
// =============================================================================

/// Everything the main loop touches on the board.
///
/// This allows for mock implementations in tests.
pub trait Board: ModeLines {
    /// Whether the console's reset button is held down.
    fn reset_button_pressed(&self) -> bool;

    /// Assert or release the soft reset output.
    fn set_soft_reset(&mut self, asserted: bool);

    /// Assert or release the cartridge hard reset output (#MRES).
    fn set_hard_reset(&mut self, asserted: bool);

    /// Switch the select line to an output and drive it.
    fn drive_select(&mut self, high: bool);

    /// Return the select line to a pulled-up input.
    fn release_select(&mut self);

    /// Set the electrical level of the three indicator channels.
    fn set_indicator_pins(&mut self, red: bool, green: bool, blue: bool);

    /// Switch the activity LED.
    fn set_activity_led(&mut self, on: bool);

    /// Busy-wait for `us` microseconds.
    fn delay_us(&mut self, us: u16);

    /// Busy-wait for `ms` milliseconds.
    fn delay_ms(&mut self, ms: u16);
}
