//! Host simulator: runs the reset mod firmware against a scripted console.
//!
//! Run with: `cargo run -p padreset -- --scenario select`

mod sim;

use std::io::Write;
use std::sync::atomic::{AtomicU32, Ordering};

use clap::Parser;
use log::info;
use padreset_core::{Buttons, Config, ConfigError, Firmware, Polarity, SharedState, Variant};

use crate::sim::{SimBoard, SimEeprom};

/// Simulated milliseconds since power-on, shown in log lines.
static SIM_MS: AtomicU32 = AtomicU32::new(0);

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Scenario {
    /// Console polls, nothing pressed.
    Idle,
    /// START+A+B+C held for a second.
    ComboReset,
    /// START+A+B+C+DOWN held (enables hard reset).
    HardReset,
    /// Browse two modes with START+B, then let the last one be saved.
    Select,
    /// Tap the console reset button.
    ResetTap,
    /// Hold the console reset button to cycle modes.
    ResetHold,
    /// Console switched off: the mod polls the pad itself.
    PowerOff,
}

#[derive(Parser, Debug)]
#[command(
    name = "padreset",
    about = "Simulate the controller-port reset mod against a scripted console."
)]
struct Args {
    /// Scripted input to play.
    #[arg(long, value_enum, default_value_t = Scenario::Select)]
    scenario: Scenario,

    /// Jumper wiring: language, frequency or region.
    #[arg(long, default_value_t = Variant::Region)]
    variant: Variant,

    /// Initial EEPROM byte (0xFF = erased).
    #[arg(long, default_value_t = 0xFF, value_parser = parse_byte)]
    eeprom: u8,

    /// Start in this mode of the variant instead of the EEPROM byte.
    #[arg(long)]
    mode: Option<u8>,

    /// Enable the START+A+B+C+DOWN hard reset.
    #[arg(long, default_value_t = false)]
    hard_reset: bool,

    /// Act on combos immediately instead of after 200 ms.
    #[arg(long, default_value_t = false)]
    no_debounce: bool,

    /// No RGB LED fitted.
    #[arg(long, default_value_t = false)]
    no_led: bool,

    /// RGB LED has a common cathode.
    #[arg(long, default_value_t = false)]
    common_cathode: bool,

    /// Never poll the pad from the mod.
    #[arg(long, default_value_t = false)]
    no_self_poll: bool,

    /// Console pad read interval (ms).
    #[arg(long, default_value_t = 16)]
    frame_ms: u32,

    /// Override the scenario length (ms).
    #[arg(long)]
    duration_ms: Option<u32>,
}

fn parse_byte(s: &str) -> Result<u8, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u8::from_str_radix(hex, 16),
        None => s.parse(),
    };
    parsed.map_err(|e| format!("invalid byte '{s}': {e}"))
}

#[derive(Debug, Clone, Copy)]
enum Action {
    Pad(Buttons),
    ResetButton(bool),
    Console(bool),
}

struct Step {
    at: u32,
    action: Action,
}

fn step(at: u32, action: Action) -> Step {
    Step { at, action }
}

fn combo(f: impl FnOnce(&mut Buttons)) -> Buttons {
    let mut buttons = Buttons {
        start: true,
        b: true,
        ..Default::default()
    };
    f(&mut buttons);
    buttons
}

impl Scenario {
    /// Input script and its length in ms.
    fn script(self) -> (Vec<Step>, u32) {
        let release = Action::Pad(Buttons::RELEASED);
        match self {
            Scenario::Idle => (Vec::new(), 3000),
            Scenario::ComboReset => {
                let held = combo(|b| {
                    b.a = true;
                    b.c = true;
                });
                (vec![step(500, Action::Pad(held)), step(1500, release)], 2500)
            }
            Scenario::HardReset => {
                let held = combo(|b| {
                    b.a = true;
                    b.c = true;
                    b.down = true;
                });
                (vec![step(500, Action::Pad(held)), step(1500, release)], 2500)
            }
            Scenario::Select => (
                vec![
                    step(500, Action::Pad(combo(|b| b.right = true))),
                    step(900, release),
                    step(2000, Action::Pad(combo(|b| b.up = true))),
                    step(2400, release),
                ],
                8000,
            ),
            Scenario::ResetTap => (
                vec![
                    step(500, Action::ResetButton(true)),
                    step(650, Action::ResetButton(false)),
                ],
                1500,
            ),
            Scenario::ResetHold => (
                vec![
                    step(500, Action::ResetButton(true)),
                    step(3000, Action::ResetButton(false)),
                ],
                9000,
            ),
            Scenario::PowerOff => (vec![step(1000, Action::Console(false))], 7000),
        }
    }
}

fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| {
            writeln!(
                buf,
                "[{:>6} ms {:<5}] {}",
                SIM_MS.load(Ordering::Relaxed),
                record.level(),
                record.args()
            )
        })
        .init();
}

/// EEPROM contents at power-on.
fn stored_byte(args: &Args, config: &Config) -> Result<u8, ConfigError> {
    match args.mode {
        Some(index) => Ok(config.mode_set().mode(index)?.index()),
        None => Ok(args.eeprom),
    }
}

fn main() -> Result<(), ConfigError> {
    init_logging();
    let args = Args::parse();

    let polarity = if args.common_cathode {
        Polarity::CommonCathode
    } else {
        Polarity::CommonAnode
    };
    let config = Config::default()
        .with_variant(args.variant)
        .with_hard_reset(args.hard_reset || args.scenario == Scenario::HardReset)
        .with_debounce((!args.no_debounce).then_some(200))
        .with_indicator((!args.no_led).then_some(polarity))
        .with_self_poll(if args.no_self_poll {
            None
        } else {
            Config::default().self_poll
        });

    static SHARED: SharedState = SharedState::new();
    let board = SimBoard::new(&SHARED, polarity);
    let eeprom = SimEeprom {
        value: stored_byte(&args, &config)?,
        writes: 0,
    };

    let mut firmware = Firmware::new(&config, board, eeprom, &SHARED)?;
    firmware.start();

    let (script, length) = args.scenario.script();
    let duration = args.duration_ms.unwrap_or(length);
    let frame = args.frame_ms.max(1);
    let mut pending = script.iter().peekable();
    let mut console_on = true;

    info!("running {:?} for {} ms ({} variant)", args.scenario, duration, args.variant);
    for ms in 0..duration {
        SIM_MS.store(ms, Ordering::Relaxed);

        while let Some(next) = pending.next_if(|s| s.at <= ms) {
            let board = firmware.board_mut();
            match next.action {
                Action::Pad(buttons) => board.set_buttons(buttons),
                Action::ResetButton(pressed) => {
                    info!("reset button {}", if pressed { "down" } else { "up" });
                    board.reset_pressed = pressed;
                }
                Action::Console(on) => {
                    info!("console {}", if on { "on" } else { "off" });
                    console_on = on;
                    if !on {
                        board.set_buttons(Buttons::RELEASED);
                    }
                }
            }
        }

        if console_on && ms % frame == 0 {
            firmware.board_mut().console_read();
        }
        firmware.tick();
    }

    let modes = config.mode_set();
    let board = firmware.board();
    let eeprom = firmware.storage();
    println!("mode:        {}", modes.name(firmware.current_mode()));
    println!("saved mode:  {}", modes.name(firmware.persisted_mode()));
    println!("eeprom:      {:#04x} ({} writes)", eeprom.value, eeprom.writes);
    println!("lines:       {:?} / {:?}", board.language, board.frequency);
    println!("indicator:   {:?}", board.color());
    println!("soft resets: {}", board.soft_resets);
    println!("hard resets: {}", board.hard_resets);
    println!("self polls:  {}", board.self_polls);

    Ok(())
}
