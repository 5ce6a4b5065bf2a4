//! Select-line edge decoder.
//!
//! The console reads a 3-button pad as two phases (select high, then select
//! low) and a 6-button pad as an 8-step cycle:
//!
//! | # | TH | TR | TL | D3 | D2 | D1 | D0 |
//! |---|----|----|----|----|----|----|----|
//! | 1 | hi | C  | B  | R  | L  | D  | U  |
//! | 2 | lo | S  | A  | 0  | 0  | D  | U  |
//! | 3 | hi | C  | B  | R  | L  | D  | U  |
//! | 4 | lo | S  | A  | 0  | 0  | D  | U  |
//! | 5 | hi | C  | B  | R  | L  | D  | U  |
//! | 6 | lo | S  | A  | 0  | 0  | 0  | 0  |
//! | 7 | hi | C  | B  | M  | X  | Y  | Z  |
//! | 8 | lo | S  | A  | 1  | 1  | 1  | 1  |
//!
//! Only low phases with D3/D2 low and D1/D0 not both low carry the 3-button
//! read; everything else is skipped.

use crate::board::PadPort;
use crate::buttons::{Buttons, DATA_MASK};
use crate::shared::SharedState;
use log::trace;

/// Low-phase bits that must be low for the 3-button read.
const SIGNATURE_ZERO: u8 = 0b0000_1100;
/// Low-phase bits of which at least one must be high.
const SIGNATURE_ONE: u8 = 0b0000_0011;
/// Skipped low phases after which the snapshot is dropped.
const MAX_MISSES: u8 = 8;

/// Edge handler state. Owned by the interrupt context.
#[derive(Debug, Clone)]
pub struct ProtocolDecoder {
    latched_high: u8,
    miss_count: u8,
}

impl ProtocolDecoder {
    /// Fresh decoder. The latched high phase starts as all released, so a
    /// falling edge before any rising edge cannot report phantom presses.
    pub const fn new() -> Self {
        Self {
            latched_high: DATA_MASK,
            miss_count: 0,
        }
    }

    /// Handle one select-line transition.
    ///
    /// Call from the edge interrupt. Publishes a new snapshot when a complete
    /// 3-button read was seen, clears it after a full cycle without one, and
    /// always flags activity for the poll watchdog.
    pub fn on_select_edge<P: PadPort + ?Sized>(&mut self, port: &mut P, shared: &SharedState) {
        port.settle();

        let data = port.read_data();
        if port.select_is_high() {
            self.latched_high = data;
        } else if is_short_read(data) {
            let buttons = Buttons::decode(!self.latched_high, !data);
            trace!("decoded {:?}", buttons);
            shared.publish(buttons);
            self.miss_count = 0;
        } else {
            self.miss_count += 1;
            if self.miss_count == MAX_MISSES {
                trace!("no 3-button read in a full cycle, releasing all");
                shared.publish(Buttons::RELEASED);
                self.miss_count = 0;
            }
        }

        shared.signal_activity();
    }
}

impl Default for ProtocolDecoder {
    fn default() -> Self {
        Self::new()
    }
}

fn is_short_read(data: u8) -> bool {
    data & SIGNATURE_ZERO == 0 && data & SIGNATURE_ONE != 0
}
