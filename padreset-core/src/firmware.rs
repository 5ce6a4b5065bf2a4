//! Main loop tying the components together.

use crate::board::Board;
use crate::combo::{ComboDetector, Command};
use crate::config::Config;
use crate::error::ConfigError;
use crate::indicator::Indicator;
use crate::mode_manager::ModeManager;
use crate::modes::Mode;
use crate::persistence::Persistence;
use crate::reset_button::{ResetAction, ResetButton, ResetState};
use crate::shared::SharedState;
use crate::time::Tick;
use crate::watchdog::PollWatchdog;
use log::{debug, info};

/// Length of a reset pulse (ms).
const RESET_PULSE_MS: u16 = 100;
/// Main loop period (ms).
const TICK_MS: u16 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ResetLine {
    Soft,
    Hard,
}

/// The main-loop side of the mod.
///
/// The select-line interrupt runs a [`ProtocolDecoder`](crate::ProtocolDecoder)
/// against the same [`SharedState`]; everything else happens in [`Firmware::tick`].
///
/// # Example
///
/// ```
/// use padreset_core::{Config, Firmware, MockBoard, MockStorage, SharedState};
///
/// let shared = SharedState::new();
/// let mut firmware =
///     Firmware::new(&Config::default(), MockBoard::new(), MockStorage::with_byte(2), &shared)?;
/// firmware.start();
/// for _ in 0..10 {
///     firmware.tick();
/// }
/// assert_eq!(firmware.current_mode().index(), 2);
/// assert_eq!(firmware.board().soft_resets(), 1);
/// # Ok::<(), padreset_core::ConfigError>(())
/// ```
pub struct Firmware<'a, B: Board, S: Persistence> {
    board: B,
    storage: S,
    shared: &'a SharedState,
    watchdog: Option<PollWatchdog>,
    combo: ComboDetector,
    reset_button: ResetButton,
    modes: ModeManager,
    activity_led: bool,
    reset_generation: u16,
    now: Tick,
}

impl<'a, B: Board, S: Persistence> Firmware<'a, B, S> {
    /// Validate `config` and load the saved mode from `storage`.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidTiming`] if a duration in `config` is out of range.
    pub fn new(
        config: &Config,
        board: B,
        mut storage: S,
        shared: &'a SharedState,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        debug!("config: {:?}", config);

        let modes = ModeManager::load(
            config.mode_set(),
            Indicator::new(config.indicator),
            config.save_delay_ms,
            &mut storage,
        );

        Ok(Self {
            board,
            storage,
            shared,
            watchdog: config.self_poll.map(PollWatchdog::new),
            combo: ComboDetector::new(config.debounce_ms, config.hard_reset),
            reset_button: ResetButton::new(config.long_press_ms),
            modes,
            activity_led: false,
            reset_generation: shared.generation(),
            now: 0,
        })
    }

    /// Power-on sequence: drive the saved mode, then reset the console so it
    /// boots with it.
    pub fn start(&mut self) {
        self.modes.restore(&mut self.board);
        self.pulse_reset(ResetLine::Soft);
        self.shared.clear_buttons();
        self.shared.clear_activity();
        self.reset_generation = self.shared.generation();
    }

    /// Run one 1 ms iteration of the main loop.
    pub fn tick(&mut self) {
        if let Some(watchdog) = self.watchdog.as_mut() {
            if watchdog.tick(&mut self.board, self.shared) {
                self.activity_led = false;
            }
        }

        self.handle_reset_button();
        self.handle_combo();
        self.modes
            .poll_save(self.now, &mut self.board, &mut self.storage);

        self.now = self.now.wrapping_add(1);
    }

    /// Tick forever.
    pub fn run(&mut self) -> ! {
        loop {
            self.tick();
            self.board.delay_ms(TICK_MS);
        }
    }

    fn handle_reset_button(&mut self) {
        let pressed = self.board.reset_button_pressed();
        match self.reset_button.tick(self.now, pressed) {
            Some(ResetAction::SoftReset) => {
                self.modes.blank(&mut self.board);
                self.pulse_reset(ResetLine::Soft);
                self.after_reset();
                self.modes.show_current(&mut self.board);
            }
            Some(ResetAction::CycleMode) => {
                self.modes.cycle(self.now, &mut self.board);
            }
            None => {}
        }
    }

    fn handle_combo(&mut self) {
        let generation = self.shared.generation();
        let buttons = self.shared.buttons();

        // The snapshot cleared by a reset is not a release; wait for a read.
        let command = if generation == self.reset_generation {
            None
        } else {
            self.combo.tick(self.now, &buttons, self.modes.modes())
        };

        match command {
            Some(Command::SoftReset) => {
                self.pulse_reset(ResetLine::Soft);
                self.after_reset();
            }
            Some(Command::HardReset) => {
                self.pulse_reset(ResetLine::Hard);
                self.after_reset();
            }
            Some(Command::SelectMode(mode)) => {
                self.modes.apply(mode, self.now, &mut self.board);
            }
            None => {}
        }

        let holding = buttons.start && buttons.b;
        if holding != self.activity_led {
            self.board.set_activity_led(holding);
            self.activity_led = holding;
        }
    }

    fn after_reset(&mut self) {
        self.shared.clear_buttons();
        self.reset_generation = self.shared.generation();
        self.combo.disarm();
        if let Some(watchdog) = self.watchdog.as_mut() {
            watchdog.rearm(self.shared);
        }
    }

    fn pulse_reset(&mut self, line: ResetLine) {
        info!("{:?} reset", line);
        match line {
            ResetLine::Soft => {
                self.board.set_soft_reset(true);
                self.board.delay_ms(RESET_PULSE_MS);
                self.board.set_soft_reset(false);
            }
            ResetLine::Hard => {
                self.board.set_hard_reset(true);
                self.board.delay_ms(RESET_PULSE_MS);
                self.board.set_hard_reset(false);
            }
        }
    }

    /// Milliseconds since start, wrapping.
    pub fn now(&self) -> Tick {
        self.now
    }

    /// The active mode.
    pub fn current_mode(&self) -> Mode {
        self.modes.current()
    }

    /// The mode last saved to storage.
    pub fn persisted_mode(&self) -> Mode {
        self.modes.persisted()
    }

    /// Whether a mode change is waiting to be saved.
    pub fn save_pending(&self) -> bool {
        self.modes.save_pending()
    }

    /// Reset button state.
    pub fn reset_state(&self) -> ResetState {
        self.reset_button.state()
    }

    /// Whether the watchdog is currently polling the pad itself.
    pub fn is_self_polling(&self) -> bool {
        self.watchdog.as_ref().is_some_and(PollWatchdog::is_polling)
    }

    /// The board.
    pub fn board(&self) -> &B {
        &self.board
    }

    /// The board, mutably (for driving inputs in tests and simulation).
    pub fn board_mut(&mut self) -> &mut B {
        &mut self.board
    }

    /// The storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }
}
