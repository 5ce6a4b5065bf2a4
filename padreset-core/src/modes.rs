//! Mode set definitions.
//!
//! A mode set is chosen once at start-up and fixes how many modes exist, what
//! each one drives on the jumper lines, its indicator colour and which
//! direction selects it.

use crate::board::ModeLines;
use crate::error::ConfigError;
use crate::indicator::Color;

const UP: u8 = 0b0001;
const DOWN: u8 = 0b0010;
const LEFT: u8 = 0b0100;
const RIGHT: u8 = 0b1000;

/// Console language jumper setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    /// Export console (line high).
    English,
    /// Domestic console (line low).
    Japanese,
}

/// Console video frequency jumper setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frequency {
    /// NTSC timing (line high).
    Hz60,
    /// PAL timing (line low).
    Hz50,
}

/// An index into the active mode set, always below its count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Mode(u8);

impl Mode {
    /// The raw index, as stored in non-volatile memory.
    pub fn index(self) -> u8 {
        self.0
    }
}

/// Trait for mode set implementations.
///
/// Each set knows how to drive the jumper lines and indicator for its modes.
pub trait ModeSet: std::fmt::Debug + Send + Sync {
    /// Number of modes in this set.
    fn count(&self) -> u8;

    /// Human-readable mode name, for logs.
    fn name(&self, mode: Mode) -> &'static str;

    /// Drive the configuration lines for `mode`.
    fn apply_mode(&self, mode: Mode, lines: &mut dyn ModeLines);

    /// Indicator colour shown while `mode` is active.
    fn indicator_color_for(&self, mode: Mode) -> Color;

    /// Mode selected by holding exactly the given direction bits
    /// (up=1, down=2, left=4, right=8), if any.
    fn resolve_direction(&self, direction: u8) -> Option<Mode>;

    /// Validate a raw index.
    ///
    /// # Errors
    /// Returns an error if `index` is not below [`ModeSet::count`].
    fn mode(&self, index: u8) -> Result<Mode, ConfigError> {
        if index >= self.count() {
            return Err(ConfigError::InvalidMode {
                value: index,
                count: self.count(),
            });
        }
        Ok(Mode(index))
    }

    /// Map a stored byte onto a valid mode. Blank or corrupted memory
    /// still yields a mode.
    fn from_persisted(&self, byte: u8) -> Mode {
        Mode(byte % self.count())
    }

    /// The mode after `mode`, wrapping to the first.
    fn next(&self, mode: Mode) -> Mode {
        Mode((mode.0 + 1) % self.count())
    }
}

// =============================================================================
// Language Switch
// =============================================================================

/// Language jumper only. LEFT selects English (red), RIGHT Japanese (green).
#[derive(Debug, Clone, Copy, Default)]
pub struct LanguageSwitch;

impl LanguageSwitch {
    /// English language.
    pub const ENGLISH: Mode = Mode(0);
    /// Japanese language.
    pub const JAPANESE: Mode = Mode(1);
}

impl ModeSet for LanguageSwitch {
    fn count(&self) -> u8 {
        2
    }

    fn name(&self, mode: Mode) -> &'static str {
        match mode {
            Self::JAPANESE => "Japanese",
            _ => "English",
        }
    }

    fn apply_mode(&self, mode: Mode, lines: &mut dyn ModeLines) {
        match mode {
            Self::JAPANESE => lines.set_language(Language::Japanese),
            _ => lines.set_language(Language::English),
        }
    }

    fn indicator_color_for(&self, mode: Mode) -> Color {
        match mode {
            Self::JAPANESE => Color::GREEN,
            _ => Color::RED,
        }
    }

    fn resolve_direction(&self, direction: u8) -> Option<Mode> {
        match direction {
            LEFT => Some(Self::ENGLISH),
            RIGHT => Some(Self::JAPANESE),
            _ => None,
        }
    }
}

// =============================================================================
// Frequency Switch
// =============================================================================

/// Video frequency jumper only. UP selects 60 Hz (red), DOWN 50 Hz (green).
#[derive(Debug, Clone, Copy, Default)]
pub struct FrequencySwitch;

impl FrequencySwitch {
    /// 60 Hz video.
    pub const HZ60: Mode = Mode(0);
    /// 50 Hz video.
    pub const HZ50: Mode = Mode(1);
}

impl ModeSet for FrequencySwitch {
    fn count(&self) -> u8 {
        2
    }

    fn name(&self, mode: Mode) -> &'static str {
        match mode {
            Self::HZ50 => "50 Hz",
            _ => "60 Hz",
        }
    }

    fn apply_mode(&self, mode: Mode, lines: &mut dyn ModeLines) {
        match mode {
            Self::HZ50 => lines.set_frequency(Frequency::Hz50),
            _ => lines.set_frequency(Frequency::Hz60),
        }
    }

    fn indicator_color_for(&self, mode: Mode) -> Color {
        match mode {
            Self::HZ50 => Color::GREEN,
            _ => Color::RED,
        }
    }

    fn resolve_direction(&self, direction: u8) -> Option<Mode> {
        match direction {
            UP => Some(Self::HZ60),
            DOWN => Some(Self::HZ50),
            _ => None,
        }
    }
}

// =============================================================================
// Region Switch
// =============================================================================

/// Full region switch driving both jumpers.
///
/// | mode   | language | video | colour | combo        |
/// |--------|----------|-------|--------|--------------|
/// | USA    | English  | 60 Hz | blue   | START+B+LEFT |
/// | Japan  | Japanese | 60 Hz | purple | START+B+UP   |
/// | Europe | English  | 50 Hz | red    | START+B+RIGHT|
/// | Asia   | Japanese | 50 Hz | green  | START+B+DOWN |
#[derive(Debug, Clone, Copy, Default)]
pub struct RegionSwitch;

impl RegionSwitch {
    /// North America.
    pub const USA: Mode = Mode(0);
    /// Japan.
    pub const JAPAN: Mode = Mode(1);
    /// Europe.
    pub const EUROPE: Mode = Mode(2);
    /// Asia.
    pub const ASIA: Mode = Mode(3);

    fn lines(mode: Mode) -> (Language, Frequency) {
        match mode {
            Self::JAPAN => (Language::Japanese, Frequency::Hz60),
            Self::EUROPE => (Language::English, Frequency::Hz50),
            Self::ASIA => (Language::Japanese, Frequency::Hz50),
            _ => (Language::English, Frequency::Hz60),
        }
    }
}

impl ModeSet for RegionSwitch {
    fn count(&self) -> u8 {
        4
    }

    fn name(&self, mode: Mode) -> &'static str {
        match mode {
            Self::JAPAN => "Japan",
            Self::EUROPE => "Europe",
            Self::ASIA => "Asia",
            _ => "USA",
        }
    }

    fn apply_mode(&self, mode: Mode, lines: &mut dyn ModeLines) {
        let (language, frequency) = Self::lines(mode);
        lines.set_language(language);
        lines.set_frequency(frequency);
    }

    fn indicator_color_for(&self, mode: Mode) -> Color {
        match mode {
            Self::JAPAN => Color::PURPLE,
            Self::EUROPE => Color::RED,
            Self::ASIA => Color::GREEN,
            _ => Color::BLUE,
        }
    }

    fn resolve_direction(&self, direction: u8) -> Option<Mode> {
        match direction {
            UP => Some(Self::JAPAN),
            DOWN => Some(Self::ASIA),
            LEFT => Some(Self::USA),
            RIGHT => Some(Self::EUROPE),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockBoard;

    #[test]
    fn test_from_persisted_wraps_out_of_range() {
        assert_eq!(RegionSwitch.from_persisted(0xFF), RegionSwitch::ASIA);
        assert_eq!(RegionSwitch.from_persisted(6), RegionSwitch::EUROPE);
        assert_eq!(LanguageSwitch.from_persisted(0xFF), LanguageSwitch::JAPANESE);
        for byte in 0..=u8::MAX {
            assert!(FrequencySwitch.from_persisted(byte).index() < 2);
        }
    }

    #[test]
    fn test_mode_rejects_out_of_range() {
        assert_eq!(RegionSwitch.mode(3).unwrap(), RegionSwitch::ASIA);
        assert!(matches!(
            LanguageSwitch.mode(2),
            Err(ConfigError::InvalidMode { value: 2, count: 2 })
        ));
    }

    #[test]
    fn test_next_wraps() {
        assert_eq!(RegionSwitch.next(RegionSwitch::ASIA), RegionSwitch::USA);
        assert_eq!(FrequencySwitch.next(FrequencySwitch::HZ60), FrequencySwitch::HZ50);
    }

    #[test]
    fn test_region_lines() {
        let mut board = MockBoard::new();
        RegionSwitch.apply_mode(RegionSwitch::ASIA, &mut board);
        assert_eq!(board.language, Some(Language::Japanese));
        assert_eq!(board.frequency, Some(Frequency::Hz50));

        RegionSwitch.apply_mode(RegionSwitch::USA, &mut board);
        assert_eq!(board.language, Some(Language::English));
        assert_eq!(board.frequency, Some(Frequency::Hz60));
    }

    #[test]
    fn test_single_jumper_sets_leave_other_line_alone() {
        let mut board = MockBoard::new();
        LanguageSwitch.apply_mode(LanguageSwitch::JAPANESE, &mut board);
        assert_eq!(board.language, Some(Language::Japanese));
        assert_eq!(board.frequency, None);

        let mut board = MockBoard::new();
        FrequencySwitch.apply_mode(FrequencySwitch::HZ50, &mut board);
        assert_eq!(board.frequency, Some(Frequency::Hz50));
        assert_eq!(board.language, None);
    }

    #[test]
    fn test_resolve_direction_needs_single_direction() {
        assert_eq!(RegionSwitch.resolve_direction(RIGHT), Some(RegionSwitch::EUROPE));
        assert_eq!(RegionSwitch.resolve_direction(UP | LEFT), None);
        assert_eq!(RegionSwitch.resolve_direction(0), None);
        assert_eq!(LanguageSwitch.resolve_direction(UP), None);
        assert_eq!(FrequencySwitch.resolve_direction(DOWN), Some(FrequencySwitch::HZ50));
    }

    #[test]
    fn test_indicator_colors() {
        assert_eq!(RegionSwitch.indicator_color_for(RegionSwitch::JAPAN), Color::PURPLE);
        assert_eq!(RegionSwitch.indicator_color_for(RegionSwitch::USA), Color::BLUE);
        assert_eq!(LanguageSwitch.indicator_color_for(LanguageSwitch::ENGLISH), Color::RED);
    }
}
