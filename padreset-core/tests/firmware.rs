use padreset_core::{
    Buttons, Config, Firmware, Frequency, FrequencySwitch, MockBoard, MockPad, MockStorage,
    ProtocolDecoder, RegionSwitch, ResetState, SelfPoll, SharedState, Variant,
};

/// Firmware plus a console that reads the pad once per millisecond.
struct Rig {
    shared: &'static SharedState,
    decoder: ProtocolDecoder,
    pad: MockPad,
    fw: Firmware<'static, MockBoard, MockStorage>,
}

impl Rig {
    fn new(config: Config, stored: u8) -> Self {
        let _ = env_logger::builder().is_test(true).try_init();

        let shared: &'static SharedState = Box::leak(Box::new(SharedState::new()));
        let mut fw = Firmware::new(&config, MockBoard::new(), MockStorage::with_byte(stored), shared)
            .expect("valid config");
        fw.start();

        Self {
            shared,
            decoder: ProtocolDecoder::new(),
            pad: MockPad::new(),
            fw,
        }
    }

    /// One 3-button read by the console.
    fn read(&mut self, buttons: Buttons) {
        self.pad.set(true, buttons.wire_level(true));
        self.decoder.on_select_edge(&mut self.pad, self.shared);
        self.pad.set(false, buttons.wire_level(false));
        self.decoder.on_select_edge(&mut self.pad, self.shared);
    }

    /// Hold `buttons` for `ms` ticks while the console keeps reading.
    fn hold(&mut self, buttons: Buttons, ms: u32) {
        for _ in 0..ms {
            self.read(buttons);
            self.fw.tick();
        }
    }

    /// Tick with the console not reading the pad.
    fn silence(&mut self, ms: u32) {
        for _ in 0..ms {
            self.fw.tick();
        }
    }

    /// Hold the console reset button for `ms` ticks, then release it.
    fn press_reset(&mut self, ms: u32) {
        self.fw.board_mut().reset_pressed = true;
        self.hold(Buttons::RELEASED, ms);
        self.fw.board_mut().reset_pressed = false;
        self.hold(Buttons::RELEASED, 1);
    }

    fn board(&self) -> &MockBoard {
        self.fw.board()
    }
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

fn reset_combo() -> Buttons {
    combo(|b| {
        b.a = true;
        b.c = true;
    })
}

#[test]
fn combo_reset_fires_once_per_hold() {
    let mut rig = Rig::new(Config::default(), 0);
    assert_eq!(rig.board().soft_resets(), 1);

    rig.hold(reset_combo(), 200);
    assert_eq!(rig.board().soft_resets(), 1);
    rig.hold(reset_combo(), 1800);
    assert_eq!(rig.board().soft_resets(), 2);

    rig.hold(Buttons::RELEASED, 500);
    rig.hold(reset_combo(), 300);
    assert_eq!(rig.board().soft_resets(), 3);
    assert_eq!(rig.board().hard_resets(), 0);
}

#[test]
fn silent_boot_after_reset_does_not_reset_again() {
    let mut rig = Rig::new(Config::default(), 0);
    while rig.board().soft_resets() < 2 {
        rig.hold(reset_combo(), 1);
    }

    // Console busy rebooting, no pad reads.
    rig.silence(500);
    rig.hold(reset_combo(), 300);
    assert_eq!(rig.board().soft_resets(), 2);

    rig.hold(Buttons::RELEASED, 300);
    rig.hold(reset_combo(), 300);
    assert_eq!(rig.board().soft_resets(), 3);
}

#[test]
fn activity_led_follows_start_and_b() {
    let mut rig = Rig::new(Config::default(), 0);
    rig.hold(combo(|_| {}), 1);
    assert!(rig.board().activity_led);

    rig.hold(reset_combo(), 300);
    assert_eq!(rig.board().soft_resets(), 2);
    assert!(rig.board().activity_led);

    rig.hold(Buttons::RELEASED, 1);
    assert!(!rig.board().activity_led);
}

#[test]
fn activity_led_off_after_self_poll() {
    let mut rig = Rig::new(Config::default(), 0);
    rig.hold(combo(|_| {}), 10);
    assert!(rig.board().activity_led);

    // Console stops with START+B still in the last snapshot.
    rig.silence(5001);
    assert_eq!(rig.board().select_pulses(), 1);
    assert!(!rig.board().activity_led);
    assert!(rig.shared.buttons().is_released());
}

#[test]
fn hard_reset_needs_down_and_feature() {
    let hard = combo(|b| {
        b.a = true;
        b.c = true;
        b.down = true;
    });

    let mut rig = Rig::new(Config::default().with_hard_reset(true), 0);
    rig.hold(hard, 300);
    assert_eq!(rig.board().hard_resets(), 1);
    assert_eq!(rig.board().soft_resets(), 1);

    let mut rig = Rig::new(Config::default(), 0);
    rig.hold(hard, 300);
    assert_eq!(rig.board().hard_resets(), 0);
    assert_eq!(rig.board().soft_resets(), 2);
}

#[test]
fn combo_without_debounce_acts_at_once() {
    let mut rig = Rig::new(Config::default().with_debounce(None), 0);
    rig.hold(reset_combo(), 1);
    assert_eq!(rig.board().soft_resets(), 2);
}

#[test]
fn mode_select_is_saved_after_delay() {
    let mut rig = Rig::new(Config::default(), 0);

    rig.hold(combo(|b| b.right = true), 300);
    assert_eq!(rig.fw.current_mode(), RegionSwitch::EUROPE);
    assert!(rig.fw.save_pending());

    rig.hold(Buttons::RELEASED, 4900);
    assert!(rig.fw.storage().writes.is_empty());

    rig.hold(Buttons::RELEASED, 200);
    assert_eq!(rig.fw.storage().writes, vec![(0, 2)]);
    assert_eq!(rig.fw.persisted_mode(), RegionSwitch::EUROPE);
    assert!(!rig.fw.save_pending());

    rig.hold(Buttons::RELEASED, 10_000);
    assert_eq!(rig.fw.storage().writes.len(), 1);
}

#[test]
fn browsing_modes_only_saves_the_last() {
    let mut rig = Rig::new(Config::default(), 0);

    rig.hold(combo(|b| b.right = true), 300);
    rig.hold(Buttons::RELEASED, 1000);
    rig.hold(combo(|b| b.up = true), 300);
    rig.hold(Buttons::RELEASED, 6000);

    assert_eq!(rig.fw.current_mode(), RegionSwitch::JAPAN);
    assert_eq!(rig.fw.storage().writes, vec![(0, 1)]);
}

#[test]
fn returning_to_saved_mode_does_not_write() {
    let mut rig = Rig::new(Config::default(), 3);

    rig.hold(combo(|b| b.left = true), 300);
    rig.hold(combo(|b| b.down = true), 300);
    rig.hold(Buttons::RELEASED, 6000);

    assert_eq!(rig.fw.current_mode(), RegionSwitch::ASIA);
    assert!(rig.fw.storage().writes.is_empty());
}

#[test]
fn reset_tap_resets_console() {
    let mut rig = Rig::new(Config::default(), 0);
    rig.press_reset(100);

    assert_eq!(rig.board().soft_resets(), 2);
    assert_eq!(rig.fw.current_mode(), RegionSwitch::USA);
    assert_eq!(rig.fw.reset_state(), ResetState::Released);
}

#[test]
fn reset_hold_cycles_without_resetting() {
    let mut rig = Rig::new(Config::default(), 0);
    rig.press_reset(2300);

    // Cycles at 751, 1502 and 2253 ms.
    assert_eq!(rig.fw.current_mode(), RegionSwitch::ASIA);
    assert_eq!(rig.board().soft_resets(), 1);

    rig.hold(Buttons::RELEASED, 5100);
    assert_eq!(rig.fw.storage().writes, vec![(0, 3)]);
}

#[test]
fn corrupt_eeprom_loads_valid_mode() {
    let rig = Rig::new(Config::default(), 0xFF);
    assert_eq!(rig.fw.current_mode(), RegionSwitch::ASIA);

    let rig = Rig::new(Config::default().with_variant(Variant::Frequency), 0x81);
    assert_eq!(rig.fw.current_mode(), FrequencySwitch::HZ50);
    assert_eq!(rig.board().frequency, Some(Frequency::Hz50));
}

#[test]
fn frequency_variant_switches_with_down() {
    let mut rig = Rig::new(Config::default().with_variant(Variant::Frequency), 0);
    rig.hold(combo(|b| b.down = true), 300);

    assert_eq!(rig.fw.current_mode(), FrequencySwitch::HZ50);
    assert_eq!(rig.board().frequency, Some(Frequency::Hz50));
    assert_eq!(rig.board().language, None);
}

#[test]
fn watchdog_polls_only_after_silence() {
    let mut rig = Rig::new(Config::default(), 0);

    rig.silence(5000);
    assert_eq!(rig.board().select_pulses(), 0);
    rig.silence(1);
    assert_eq!(rig.board().select_pulses(), 1);
    assert!(rig.fw.is_self_polling());

    rig.silence(101);
    assert_eq!(rig.board().select_pulses(), 2);

    rig.hold(Buttons::RELEASED, 1);
    assert!(!rig.fw.is_self_polling());
}

#[test]
fn regular_polling_keeps_watchdog_quiet() {
    let mut rig = Rig::new(Config::default(), 0);
    for _ in 0..1000 {
        rig.hold(Buttons::RELEASED, 1);
        rig.silence(19);
    }
    assert_eq!(rig.board().select_pulses(), 0);
}

#[test]
fn disabled_self_poll_never_pulses() {
    let mut rig = Rig::new(Config::default().with_self_poll(None), 0);
    rig.silence(12_000);
    assert_eq!(rig.board().select_pulses(), 0);
}

#[test]
fn short_self_poll_settings() {
    let config = Config::default().with_self_poll(Some(SelfPoll {
        timeout_ms: 50,
        period_ms: 10,
    }));
    let mut rig = Rig::new(config, 0);
    rig.silence(51 + 11 * 4);
    assert_eq!(rig.board().select_pulses(), 5);
}

#[test]
fn extended_reads_drop_stale_buttons() {
    let mut rig = Rig::new(Config::default(), 0);
    rig.read(reset_combo());
    rig.fw.tick();

    // Low phases of a 6-button cycle that never carry the 3-button read.
    for miss in 0..8 {
        rig.pad.set(false, if miss % 2 == 0 { 0b00_0000 } else { 0b00_1111 });
        rig.decoder.on_select_edge(&mut rig.pad, rig.shared);
    }
    assert!(rig.shared.buttons().is_released());

    rig.silence(300);
    assert_eq!(rig.board().soft_resets(), 1);
}

#[test]
fn save_delay_spans_counter_wrap() {
    let mut rig = Rig::new(Config::default(), 0);
    rig.hold(Buttons::RELEASED, 65_000);
    rig.hold(combo(|b| b.down = true), 300);
    assert!(rig.fw.now() < 1000 || rig.fw.now() > 65_000);

    rig.hold(Buttons::RELEASED, 4800);
    assert!(rig.fw.storage().writes.is_empty());
    rig.hold(Buttons::RELEASED, 300);
    assert_eq!(rig.fw.storage().writes, vec![(0, 3)]);
}
