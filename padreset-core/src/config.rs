//! Start-up configuration.

use crate::error::ConfigError;
use crate::indicator::Polarity;
use crate::modes::{FrequencySwitch, LanguageSwitch, ModeSet, RegionSwitch};
use std::fmt;
use std::str::FromStr;

/// Longest duration the 16-bit tick counter can still see elapse.
const MAX_DURATION_MS: u16 = u16::MAX - 1;

/// Which jumpers the mod is wired to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Variant {
    /// Language jumper only.
    Language,
    /// Video frequency jumper only.
    Frequency,
    /// Both jumpers, four regions.
    #[default]
    Region,
}

impl Variant {
    /// The mode set for this wiring.
    pub fn mode_set(self) -> &'static dyn ModeSet {
        match self {
            Variant::Language => &LanguageSwitch,
            Variant::Frequency => &FrequencySwitch,
            Variant::Region => &RegionSwitch,
        }
    }
}

impl FromStr for Variant {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "language" | "lang" => Ok(Variant::Language),
            "frequency" | "freq" => Ok(Variant::Frequency),
            "region" => Ok(Variant::Region),
            _ => Err(ConfigError::UnknownVariant(s.to_string())),
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Variant::Language => "language",
            Variant::Frequency => "frequency",
            Variant::Region => "region",
        };
        f.write_str(name)
    }
}

/// Self-polling when the console stops reading the pad.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelfPoll {
    /// Silence on the select line before the first synthetic poll (ms).
    pub timeout_ms: u16,
    /// Interval between synthetic polls after that (ms).
    pub period_ms: u16,
}

impl Default for SelfPoll {
    fn default() -> Self {
        Self {
            timeout_ms: 5000,
            period_ms: 100,
        }
    }
}

/// Start-up configuration. Fixed for the lifetime of the firmware.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Jumper wiring.
    pub variant: Variant,
    /// Whether START+A+B+C+DOWN pulses the cartridge hard reset.
    pub hard_reset: bool,
    /// Combo hold time before acting (ms), or `None` to act immediately.
    pub debounce_ms: Option<u16>,
    /// RGB LED wiring, or `None` when no LED is fitted.
    pub indicator: Option<Polarity>,
    /// Self-polling settings, or `None` to rely on the console alone.
    pub self_poll: Option<SelfPoll>,
    /// Reset button hold time that switches from reset to mode cycling (ms).
    pub long_press_ms: u16,
    /// Time a mode must stay unchanged before it is saved (ms).
    pub save_delay_ms: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            variant: Variant::Region,
            hard_reset: false,
            debounce_ms: Some(200),
            indicator: Some(Polarity::CommonAnode),
            self_poll: Some(SelfPoll::default()),
            long_press_ms: 750,
            save_delay_ms: 5000,
        }
    }
}

impl Config {
    /// Set the jumper wiring.
    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }

    /// Enable or disable the hard reset combo.
    pub fn with_hard_reset(mut self, enabled: bool) -> Self {
        self.hard_reset = enabled;
        self
    }

    /// Set the combo debounce time, `None` to disable.
    pub fn with_debounce(mut self, debounce_ms: Option<u16>) -> Self {
        self.debounce_ms = debounce_ms;
        self
    }

    /// Set the RGB LED wiring, `None` when absent.
    pub fn with_indicator(mut self, polarity: Option<Polarity>) -> Self {
        self.indicator = polarity;
        self
    }

    /// Set self-polling, `None` to disable.
    pub fn with_self_poll(mut self, self_poll: Option<SelfPoll>) -> Self {
        self.self_poll = self_poll;
        self
    }

    /// Set the reset button long-press time.
    pub fn with_long_press(mut self, long_press_ms: u16) -> Self {
        self.long_press_ms = long_press_ms;
        self
    }

    /// Set the mode save delay.
    pub fn with_save_delay(mut self, save_delay_ms: u16) -> Self {
        self.save_delay_ms = save_delay_ms;
        self
    }

    /// The mode set selected by [`Config::variant`].
    pub fn mode_set(&self) -> &'static dyn ModeSet {
        self.variant.mode_set()
    }

    /// Check that every duration can elapse on the tick counter.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidTiming`] naming the first bad setting.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(debounce) = self.debounce_ms {
            check_duration("debounce threshold", debounce, 1, MAX_DURATION_MS)?;
        }
        check_duration("long-press time", self.long_press_ms, 1, MAX_DURATION_MS)?;
        check_duration("save delay", self.save_delay_ms, 1, MAX_DURATION_MS)?;

        if let Some(poll) = self.self_poll {
            check_duration("poll timeout", poll.timeout_ms, 1, MAX_DURATION_MS)?;
            check_duration("poll period", poll.period_ms, 1, poll.timeout_ms)?;
        }
        Ok(())
    }
}

fn check_duration(name: &'static str, value: u16, min: u16, max: u16) -> Result<(), ConfigError> {
    if value < min || value > max {
        return Err(ConfigError::InvalidTiming {
            name,
            value,
            min,
            max,
        });
    }
    Ok(())
}
