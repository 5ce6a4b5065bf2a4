//! Simulated console and mod board.

use padreset_core::{
    Board, Buttons, Color, Frequency, Language, ModeLines, PadPort, Persistence, Polarity,
    ProtocolDecoder, SharedState,
};

/// Pad port as seen by the mod: the select line plus whatever the pad drives.
#[derive(Debug)]
pub struct SimPad {
    select_high: bool,
    buttons: Buttons,
}

impl PadPort for SimPad {
    fn settle(&mut self) {}

    fn select_is_high(&self) -> bool {
        self.select_high
    }

    fn read_data(&self) -> u8 {
        self.buttons.wire_level(self.select_high)
    }
}

/// Mod board wired to a simulated console.
///
/// Owns the interrupt-side decoder, so select edges caused by the console or
/// by the mod itself run it immediately, as the real interrupt would. The
/// simulated console leaves select low between reads.
pub struct SimBoard {
    pad: SimPad,
    decoder: ProtocolDecoder,
    shared: &'static SharedState,
    polarity: Polarity,
    /// Reset button level.
    pub reset_pressed: bool,
    /// Language line level.
    pub language: Option<Language>,
    /// Frequency line level.
    pub frequency: Option<Frequency>,
    /// Indicator pin levels.
    pub pins: (bool, bool, bool),
    /// Completed soft reset pulses.
    pub soft_resets: u32,
    /// Completed hard reset pulses.
    pub hard_resets: u32,
    /// Select pulses sent by the mod.
    pub self_polls: u32,
}

impl SimBoard {
    pub fn new(shared: &'static SharedState, polarity: Polarity) -> Self {
        let dark = polarity == Polarity::CommonAnode;
        Self {
            pad: SimPad {
                select_high: false,
                buttons: Buttons::RELEASED,
            },
            decoder: ProtocolDecoder::new(),
            shared,
            polarity,
            reset_pressed: false,
            language: None,
            frequency: None,
            pins: (dark, dark, dark),
            soft_resets: 0,
            hard_resets: 0,
            self_polls: 0,
        }
    }

    /// Buttons currently held on the pad.
    pub fn set_buttons(&mut self, buttons: Buttons) {
        self.pad.buttons = buttons;
    }

    /// The console reading the pad once: high phase, then low phase.
    pub fn console_read(&mut self) {
        self.set_select(true);
        self.set_select(false);
    }

    /// The logical colour currently shown.
    pub fn color(&self) -> Color {
        let lit = |level: bool| match self.polarity {
            Polarity::CommonAnode => !level,
            Polarity::CommonCathode => level,
        };
        let (r, g, b) = self.pins;
        Color::rgb(lit(r), lit(g), lit(b))
    }

    fn set_select(&mut self, high: bool) {
        if self.pad.select_high == high {
            return;
        }
        self.pad.select_high = high;
        self.decoder.on_select_edge(&mut self.pad, self.shared);
    }
}

impl ModeLines for SimBoard {
    fn set_language(&mut self, language: Language) {
        self.language = Some(language);
    }

    fn set_frequency(&mut self, frequency: Frequency) {
        self.frequency = Some(frequency);
    }
}

impl Board for SimBoard {
    fn reset_button_pressed(&self) -> bool {
        self.reset_pressed
    }

    fn set_soft_reset(&mut self, asserted: bool) {
        if !asserted {
            self.soft_resets += 1;
        }
    }

    fn set_hard_reset(&mut self, asserted: bool) {
        if !asserted {
            self.hard_resets += 1;
        }
    }

    fn drive_select(&mut self, high: bool) {
        self.set_select(high);
    }

    fn release_select(&mut self) {
        self.self_polls += 1;
        self.set_select(false);
    }

    fn set_indicator_pins(&mut self, red: bool, green: bool, blue: bool) {
        self.pins = (red, green, blue);
    }

    fn set_activity_led(&mut self, _on: bool) {}

    fn delay_us(&mut self, _us: u16) {}

    fn delay_ms(&mut self, _ms: u16) {}
}

/// EEPROM with a single populated cell.
#[derive(Debug)]
pub struct SimEeprom {
    pub value: u8,
    pub writes: u32,
}

impl Persistence for SimEeprom {
    fn read_byte(&mut self, _slot: u16) -> u8 {
        self.value
    }

    fn write_byte(&mut self, _slot: u16, value: u8) {
        self.value = value;
        self.writes += 1;
    }
}
