//! RGB mode indicator.

use crate::board::Board;

/// A logical indicator colour (true = channel lit).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    /// Red channel.
    pub red: bool,
    /// Green channel.
    pub green: bool,
    /// Blue channel.
    pub blue: bool,
}

impl Color {
    /// All channels dark.
    pub const OFF: Color = Color::rgb(false, false, false);
    /// Red.
    pub const RED: Color = Color::rgb(true, false, false);
    /// Green.
    pub const GREEN: Color = Color::rgb(false, true, false);
    /// Blue.
    pub const BLUE: Color = Color::rgb(false, false, true);
    /// Red and blue.
    pub const PURPLE: Color = Color::rgb(true, false, true);
    /// All channels lit.
    pub const WHITE: Color = Color::rgb(true, true, true);

    /// Build a colour from its channels.
    pub const fn rgb(red: bool, green: bool, blue: bool) -> Self {
        Self { red, green, blue }
    }
}

/// How the RGB LED is wired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Polarity {
    /// Common anode: a channel is lit by driving its pin low.
    #[default]
    CommonAnode,
    /// Common cathode: a channel is lit by driving its pin high.
    CommonCathode,
}

/// Drives the RGB indicator, or nothing when no LED is fitted.
#[derive(Debug, Clone, Copy)]
pub struct Indicator {
    polarity: Option<Polarity>,
}

impl Indicator {
    /// Indicator wired with the given polarity, or disabled when `None`.
    pub fn new(polarity: Option<Polarity>) -> Self {
        Self { polarity }
    }

    /// Whether an LED is fitted.
    pub fn is_enabled(&self) -> bool {
        self.polarity.is_some()
    }

    /// Show `color`. No-op when disabled.
    pub fn show<B: Board + ?Sized>(&self, board: &mut B, color: Color) {
        let Some(polarity) = self.polarity else {
            return;
        };
        let level = |lit: bool| match polarity {
            Polarity::CommonAnode => !lit,
            Polarity::CommonCathode => lit,
        };
        board.set_indicator_pins(level(color.red), level(color.green), level(color.blue));
    }
}
