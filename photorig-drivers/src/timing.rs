//! Wait helpers on top of [`DelayNs`]

use core::time::Duration;

use photorig_core::{CancelFlag, MotionError};
use photorig_hal::DelayNs;

/// Longest uninterrupted wait inside a cancellable wait
pub const WAIT_SLICE: Duration = Duration::from_millis(100);

/// Wait for `duration`, without cancellation
pub async fn wait<D: DelayNs>(delay: &mut D, duration: Duration) {
    match u32::try_from(duration.as_nanos()) {
        Ok(ns) => delay.delay_ns(ns).await,
        Err(_) => {
            let mut ms = duration.as_millis();
            while ms > 0 {
                let chunk = u32::try_from(ms).unwrap_or(u32::MAX);
                delay.delay_ms(chunk).await;
                ms -= u128::from(chunk);
            }
            let rest = duration.subsec_nanos() % 1_000_000;
            if rest > 0 {
                delay.delay_ns(rest).await;
            }
        }
    }
}

/// Wait for `duration` in [`WAIT_SLICE`] pieces
///
/// The flag is checked before every slice. Returns
/// [`MotionError::Cancelled`] as soon as a request is seen.
pub async fn cancellable_wait<D: DelayNs>(
    delay: &mut D,
    duration: Duration,
    cancel: &CancelFlag,
) -> Result<(), MotionError> {
    let mut remaining = duration;
    while !remaining.is_zero() {
        if cancel.is_cancelled() {
            return Err(MotionError::Cancelled);
        }
        let slice = remaining.min(WAIT_SLICE);
        wait(delay, slice).await;
        remaining -= slice;
    }
    Ok(())
}
