//! Millisecond tick counter arithmetic.

/// Free-running millisecond counter value. Wraps at `u16::MAX`.
pub type Tick = u16;

/// Milliseconds elapsed from `since` to `now`.
///
/// Correct across a single wrap of the counter. Every timing comparison in
/// the crate goes through this function.
#[inline]
pub fn elapsed_since(now: Tick, since: Tick) -> u16 {
    now.wrapping_sub(since)
}

/// Whether strictly more than `threshold` ms have passed since `since`.
#[inline]
pub fn exceeded(now: Tick, since: Tick, threshold: u16) -> bool {
    elapsed_since(now, since) > threshold
}
