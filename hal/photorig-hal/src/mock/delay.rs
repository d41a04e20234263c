//! Mock delay
//!
//! Resolves immediately and records the requested duration, so routines
//! that would take minutes on the rig run instantly under test.

use embedded_hal_async::delay::DelayNs;

use super::{Op, OpLog};

/// Mock delay provider
#[derive(Debug, Clone)]
pub struct MockDelay {
    log: OpLog,
}

impl MockDelay {
    /// Create a delay that records into `log`
    pub fn new(log: &OpLog) -> Self {
        Self { log: log.clone() }
    }
}

impl DelayNs for MockDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.log.push(Op::Delay { ns: ns as u64 });
    }

    async fn delay_us(&mut self, us: u32) {
        self.log.push(Op::Delay {
            ns: us as u64 * 1_000,
        });
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.log.push(Op::Delay {
            ns: ms as u64 * 1_000_000,
        });
    }
}
