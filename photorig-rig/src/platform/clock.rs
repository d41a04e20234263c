//! Monotonic delay backed by the embassy time driver

use embassy_time::{Duration, Timer};
use embedded_hal_async::delay::DelayNs;

#[derive(Debug, Clone, Copy, Default)]
pub struct RigClock;

impl DelayNs for RigClock {
    async fn delay_ns(&mut self, ns: u32) {
        Timer::after(Duration::from_nanos(u64::from(ns))).await;
    }

    async fn delay_us(&mut self, us: u32) {
        Timer::after_micros(u64::from(us)).await;
    }

    async fn delay_ms(&mut self, ms: u32) {
        Timer::after_millis(u64::from(ms)).await;
    }
}
