//! Controller-port reset and region switch logic for 16-bit consoles.
//!
//! The mod sits on the pad port and the reset button of the console. It
//! listens to the console reading the pad, and turns held button combos into
//! a reset pulse or a change of the language/video jumpers.
//!
//! # Controls
//!
//! | input                  | action                          |
//! |------------------------|---------------------------------|
//! | START+A+B+C            | soft reset                      |
//! | START+A+B+C+DOWN       | hard reset (if enabled)         |
//! | START+B+direction      | select mode                     |
//! | reset button tap       | soft reset                      |
//! | reset button hold      | next mode, repeating while held |
//!
//! A selected mode is saved once it has stayed unchanged for the save delay.
//!
//! # Example
//!
//! ```
//! use padreset_core::{
//!     Buttons, Config, Firmware, MockBoard, MockPad, MockStorage, ProtocolDecoder, RegionSwitch,
//!     SharedState,
//! };
//!
//! let shared = SharedState::new();
//! let mut firmware =
//!     Firmware::new(&Config::default(), MockBoard::new(), MockStorage::with_byte(0), &shared)?;
//! firmware.start();
//!
//! // The console reads START+B+RIGHT through the interrupt.
//! let mut decoder = ProtocolDecoder::new();
//! let mut pad = MockPad::new();
//! let held = Buttons { start: true, b: true, right: true, ..Default::default() };
//! for _ in 0..300 {
//!     pad.set(true, held.wire_level(true));
//!     decoder.on_select_edge(&mut pad, &shared);
//!     pad.set(false, held.wire_level(false));
//!     decoder.on_select_edge(&mut pad, &shared);
//!     firmware.tick();
//! }
//! assert_eq!(firmware.current_mode(), RegionSwitch::EUROPE);
//! # Ok::<(), padreset_core::ConfigError>(())
//! ```
//!
//! # Testing
//!
//! [`MockBoard`], [`MockPad`] and [`MockStorage`] stand in for the hardware.

#![warn(missing_docs)]

mod board;
mod buttons;
mod combo;
mod config;
mod decoder;
mod error;
mod firmware;
mod indicator;
mod mock;
mod mode_manager;
mod modes;
mod persistence;
mod reset_button;
mod shared;
mod time;
mod watchdog;

// Re-export public API
pub use board::{Board, ModeLines, PadPort};
pub use buttons::{Buttons, DATA_MASK};
pub use combo::{ComboDetector, Command};
pub use config::{Config, SelfPoll, Variant};
pub use decoder::ProtocolDecoder;
pub use error::ConfigError;
pub use firmware::Firmware;
pub use indicator::{Color, Indicator, Polarity};
pub use mock::{BoardEvent, MockBoard, MockPad, MockStorage};
pub use mode_manager::ModeManager;
pub use modes::{Frequency, FrequencySwitch, Language, LanguageSwitch, Mode, ModeSet, RegionSwitch};
pub use persistence::{MODE_SLOT, Persistence, SaveScheduler};
pub use reset_button::{ResetAction, ResetButton, ResetState};
pub use shared::SharedState;
pub use time::{Tick, elapsed_since, exceeded};
pub use watchdog::PollWatchdog;

#[cfg(test)]
mod tests {
    use super::*;

    fn firmware<'a>(
        config: &Config,
        byte: u8,
        shared: &'a SharedState,
    ) -> Firmware<'a, MockBoard, MockStorage> {
        let mut firmware =
            Firmware::new(config, MockBoard::new(), MockStorage::with_byte(byte), shared).unwrap();
        firmware.start();
        firmware
    }

    #[test]
    fn test_start_applies_saved_mode_and_resets() {
        let shared = SharedState::new();
        shared.publish(Buttons {
            start: true,
            ..Default::default()
        });
        let fw = firmware(&Config::default(), 1, &shared);

        assert_eq!(fw.current_mode(), RegionSwitch::JAPAN);
        assert_eq!(fw.board().language, Some(Language::Japanese));
        assert_eq!(fw.board().indicator_color(Polarity::CommonAnode), Some(Color::PURPLE));
        assert_eq!(fw.board().soft_resets(), 1);
        assert!(shared.buttons().is_released());
    }

    #[test]
    fn test_language_variant_starts_from_blank_eeprom() {
        let shared = SharedState::new();
        let config = Config::default().with_variant(Variant::Language);
        let fw = firmware(&config, 0xFF, &shared);

        assert_eq!(fw.current_mode(), LanguageSwitch::JAPANESE);
        assert_eq!(fw.board().frequency, None);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let shared = SharedState::new();
        let config = Config::default().with_long_press(0);
        let result = Firmware::new(&config, MockBoard::new(), MockStorage::new(), &shared);
        assert!(matches!(
            result,
            Err(ConfigError::InvalidTiming { name: "long-press time", .. })
        ));
    }

    #[test]
    fn test_reset_tap_blanks_then_restores_indicator() {
        let shared = SharedState::new();
        let mut fw = firmware(&Config::default(), 2, &shared);
        fw.board_mut().events.clear();

        fw.board_mut().reset_pressed = true;
        fw.tick();
        fw.board_mut().reset_pressed = false;
        fw.tick();

        let events = &fw.board().events;
        assert_eq!(events.first(), Some(&BoardEvent::IndicatorPins(true, true, true)));
        assert!(events.contains(&BoardEvent::SoftReset(true)));
        assert_eq!(fw.board().indicator_color(Polarity::CommonAnode), Some(Color::RED));
    }
}
