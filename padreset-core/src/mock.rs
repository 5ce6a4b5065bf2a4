//! Mock hardware for testing.

use crate::board::{Board, ModeLines, PadPort};
use crate::buttons::DATA_MASK;
use crate::indicator::{Color, Polarity};
use crate::modes::{Frequency, Language};
use crate::persistence::Persistence;

/// One call made on a [`MockBoard`], in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardEvent {
    /// `set_language`.
    Language(Language),
    /// `set_frequency`.
    Frequency(Frequency),
    /// `set_soft_reset`.
    SoftReset(bool),
    /// `set_hard_reset`.
    HardReset(bool),
    /// `drive_select`.
    DriveSelect(bool),
    /// `release_select`.
    ReleaseSelect,
    /// `set_indicator_pins`.
    IndicatorPins(bool, bool, bool),
    /// `set_activity_led`.
    ActivityLed(bool),
    /// `delay_us`.
    DelayUs(u16),
    /// `delay_ms`.
    DelayMs(u16),
}

/// A mock board that records every output.
///
/// This allows testing the firmware without hardware.
///
/// # Example
///
/// ```
/// use padreset_core::{Board, MockBoard};
///
/// let mut board = MockBoard::new();
/// board.set_soft_reset(true);
/// board.set_soft_reset(false);
/// assert_eq!(board.soft_resets(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockBoard {
    /// Level reported for the reset button.
    pub reset_pressed: bool,
    /// Last language driven.
    pub language: Option<Language>,
    /// Last frequency driven.
    pub frequency: Option<Frequency>,
    /// Last indicator pin levels written.
    pub indicator_pins: Option<(bool, bool, bool)>,
    /// Activity LED state.
    pub activity_led: bool,
    /// Everything called, in order.
    pub events: Vec<BoardEvent>,
}

impl MockBoard {
    /// Create a board with nothing driven yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// The logical colour shown, decoded with `polarity`.
    pub fn indicator_color(&self, polarity: Polarity) -> Option<Color> {
        let lit = |level: bool| match polarity {
            Polarity::CommonAnode => !level,
            Polarity::CommonCathode => level,
        };
        self.indicator_pins
            .map(|(r, g, b)| Color::rgb(lit(r), lit(g), lit(b)))
    }

    /// Completed soft reset pulses.
    pub fn soft_resets(&self) -> usize {
        self.count(BoardEvent::SoftReset(false))
    }

    /// Completed hard reset pulses.
    pub fn hard_resets(&self) -> usize {
        self.count(BoardEvent::HardReset(false))
    }

    /// Synthetic select-line pulses.
    pub fn select_pulses(&self) -> usize {
        self.count(BoardEvent::ReleaseSelect)
    }

    fn count(&self, event: BoardEvent) -> usize {
        self.events.iter().filter(|e| **e == event).count()
    }
}

impl ModeLines for MockBoard {
    fn set_language(&mut self, language: Language) {
        self.language = Some(language);
        self.events.push(BoardEvent::Language(language));
    }

    fn set_frequency(&mut self, frequency: Frequency) {
        self.frequency = Some(frequency);
        self.events.push(BoardEvent::Frequency(frequency));
    }
}

impl Board for MockBoard {
    fn reset_button_pressed(&self) -> bool {
        self.reset_pressed
    }

    fn set_soft_reset(&mut self, asserted: bool) {
        self.events.push(BoardEvent::SoftReset(asserted));
    }

    fn set_hard_reset(&mut self, asserted: bool) {
        self.events.push(BoardEvent::HardReset(asserted));
    }

    fn drive_select(&mut self, high: bool) {
        self.events.push(BoardEvent::DriveSelect(high));
    }

    fn release_select(&mut self) {
        self.events.push(BoardEvent::ReleaseSelect);
    }

    fn set_indicator_pins(&mut self, red: bool, green: bool, blue: bool) {
        self.indicator_pins = Some((red, green, blue));
        self.events.push(BoardEvent::IndicatorPins(red, green, blue));
    }

    fn set_activity_led(&mut self, on: bool) {
        self.activity_led = on;
        self.events.push(BoardEvent::ActivityLed(on));
    }

    fn delay_us(&mut self, us: u16) {
        self.events.push(BoardEvent::DelayUs(us));
    }

    fn delay_ms(&mut self, ms: u16) {
        self.events.push(BoardEvent::DelayMs(ms));
    }
}

/// A mock pad port with directly settable lines.
#[derive(Debug, Clone)]
pub struct MockPad {
    /// Select line level.
    pub select_high: bool,
    /// Active-low data lines.
    pub data: u8,
    /// Number of settle delays taken.
    pub settle_count: usize,
}

impl MockPad {
    /// Idle port: select high, all lines pulled up.
    pub fn new() -> Self {
        Self {
            select_high: true,
            data: DATA_MASK,
            settle_count: 0,
        }
    }

    /// Set both the select level and the data lines.
    pub fn set(&mut self, select_high: bool, data: u8) {
        self.select_high = select_high;
        self.data = data & DATA_MASK;
    }
}

impl Default for MockPad {
    fn default() -> Self {
        Self::new()
    }
}

impl PadPort for MockPad {
    fn settle(&mut self) {
        self.settle_count += 1;
    }

    fn select_is_high(&self) -> bool {
        self.select_high
    }

    fn read_data(&self) -> u8 {
        self.data
    }
}

/// In-memory stand-in for the EEPROM.
#[derive(Debug, Clone)]
pub struct MockStorage {
    cells: Vec<u8>,
    /// Every write, as `(slot, value)`.
    pub writes: Vec<(u16, u8)>,
}

impl MockStorage {
    /// Erased memory (every byte `0xFF`).
    pub fn new() -> Self {
        Self::with_byte(0xFF)
    }

    /// Memory whose mode slot holds `value`.
    pub fn with_byte(value: u8) -> Self {
        Self {
            cells: vec![value],
            writes: Vec::new(),
        }
    }

    /// Current content of `slot`.
    pub fn byte(&self, slot: u16) -> u8 {
        self.cells.get(usize::from(slot)).copied().unwrap_or(0xFF)
    }
}

impl Default for MockStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl Persistence for MockStorage {
    fn read_byte(&mut self, slot: u16) -> u8 {
        self.byte(slot)
    }

    fn write_byte(&mut self, slot: u16, value: u8) {
        let index = usize::from(slot);
        if index >= self.cells.len() {
            self.cells.resize(index + 1, 0xFF);
        }
        self.cells[index] = value;
        self.writes.push((slot, value));
    }
}
