//! Logical button snapshot and its bit layout on the pad port.
//!
//! The pad multiplexes six data lines on the select line (TH). With select
//! high the lines carry `C B R L D U`, with select low they carry
//! `S A 0 0 D U`. Lines are active-low on the wire; the phase bytes used
//! here are active-high (a set bit means pressed).
//!
//! | bit | high phase | low phase |
//! |-----|------------|-----------|
//! | 0   | up         | up        |
//! | 1   | down       | down      |
//! | 2   | left       | (low)     |
//! | 3   | right      | (low)     |
//! | 4   | B          | A         |
//! | 5   | C          | start     |

/// Mask of the four directional lines on the data port.
const DIR_MASK: u8 = 0b0000_1111;
/// Mask of the two button lines (TL, TR).
const BTN_MASK: u8 = 0b0011_0000;
/// Mask of all six sampled data lines.
pub const DATA_MASK: u8 = DIR_MASK | BTN_MASK;

const UP: u8 = 1 << 0;
const DOWN: u8 = 1 << 1;
const LEFT: u8 = 1 << 2;
const RIGHT: u8 = 1 << 3;
const HI_B: u8 = 1 << 4;
const HI_C: u8 = 1 << 5;
const LO_A: u8 = 1 << 4;
const LO_START: u8 = 1 << 5;

/// A decoded snapshot of the pad buttons (true = pressed).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Buttons {
    /// D-pad up.
    pub up: bool,
    /// D-pad down.
    pub down: bool,
    /// D-pad left.
    pub left: bool,
    /// D-pad right.
    pub right: bool,
    /// A button.
    pub a: bool,
    /// B button.
    pub b: bool,
    /// C button.
    pub c: bool,
    /// Start button.
    pub start: bool,
}

impl Buttons {
    /// All buttons released.
    pub const RELEASED: Buttons = Buttons {
        up: false,
        down: false,
        left: false,
        right: false,
        a: false,
        b: false,
        c: false,
        start: false,
    };

    /// Decode from active-high high/low phase bytes.
    ///
    /// Direction comes from the high phase only; the low phase's copy of
    /// up/down is ignored.
    pub fn decode(hi: u8, lo: u8) -> Self {
        Self {
            up: hi & UP != 0,
            down: hi & DOWN != 0,
            left: hi & LEFT != 0,
            right: hi & RIGHT != 0,
            b: hi & HI_B != 0,
            c: hi & HI_C != 0,
            a: lo & LO_A != 0,
            start: lo & LO_START != 0,
        }
    }

    /// Encode into active-high `(hi, lo)` phase bytes. Inverse of [`Buttons::decode`].
    pub fn encode(&self) -> (u8, u8) {
        let mut hi = self.direction_bits();
        if self.b {
            hi |= HI_B;
        }
        if self.c {
            hi |= HI_C;
        }

        let mut lo = hi & (UP | DOWN);
        if self.a {
            lo |= LO_A;
        }
        if self.start {
            lo |= LO_START;
        }
        (hi, lo)
    }

    /// The directional bits in high-phase positions (up=1, down=2, left=4, right=8).
    pub fn direction_bits(&self) -> u8 {
        let mut dir = 0;
        if self.up {
            dir |= UP;
        }
        if self.down {
            dir |= DOWN;
        }
        if self.left {
            dir |= LEFT;
        }
        if self.right {
            dir |= RIGHT;
        }
        dir
    }

    /// Whether nothing is pressed.
    pub fn is_released(&self) -> bool {
        *self == Self::RELEASED
    }

    /// Active-low level of the six data lines a 3-button pad drives for
    /// the given select level.
    pub fn wire_level(&self, select_high: bool) -> u8 {
        let (hi, lo) = self.encode();
        if select_high {
            !hi & DATA_MASK
        } else {
            // Lines 2 and 3 are pulled low in the low phase regardless of input.
            !lo & DATA_MASK & !(LEFT | RIGHT)
        }
    }
}
