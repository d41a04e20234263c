//! Slider position properties over arbitrary move sequences

use core::time::Duration;

use embassy_futures::block_on;
use photorig_core::CancelFlag;
use photorig_drivers::StepperAxisController;
use photorig_hal::mock::{MockDelay, MockPin, OpLog};
use proptest::prelude::*;

fn slider(log: &OpLog) -> StepperAxisController<MockPin, MockDelay> {
    let coils = [17, 27, 22, 23].map(|id| MockPin::new(id, log));
    StepperAxisController::new(coils, MockDelay::new(log), Duration::from_micros(10))
}

proptest! {
    #[test]
    fn test_forward_then_reverse_restores_position(start in -50i32..50, n in 0u32..60) {
        let log = OpLog::new();
        let mut slider = slider(&log);
        let cancel = CancelFlag::new();

        if start >= 0 {
            block_on(slider.move_forward(start as u32, &cancel)).unwrap();
        } else {
            block_on(slider.move_reverse(start.unsigned_abs(), &cancel)).unwrap();
        }
        let before = slider.position();

        block_on(slider.move_forward(n, &cancel)).unwrap();
        prop_assert_eq!(slider.position().steps(), before.steps() + n as i32);
        block_on(slider.move_reverse(n, &cancel)).unwrap();

        prop_assert_eq!(slider.position(), before);
    }

    #[test]
    fn test_go_home_ends_at_zero_and_is_idempotent(moves in proptest::collection::vec((any::<bool>(), 0u32..20), 0..8)) {
        let log = OpLog::new();
        let mut slider = slider(&log);
        let cancel = CancelFlag::new();

        for (forward, steps) in moves {
            if forward {
                block_on(slider.move_forward(steps, &cancel)).unwrap();
            } else {
                block_on(slider.move_reverse(steps, &cancel)).unwrap();
            }
        }

        block_on(slider.go_home(&cancel)).unwrap();
        prop_assert!(slider.position().is_home());

        log.clear();
        block_on(slider.go_home(&cancel)).unwrap();
        prop_assert!(slider.position().is_home());
        prop_assert!(log.is_empty());
    }

    #[test]
    fn test_delay_scales_with_steps(n in 1u32..40) {
        let log = OpLog::new();
        let mut slider = slider(&log);
        let cancel = CancelFlag::new();

        block_on(slider.move_forward(n, &cancel)).unwrap();

        prop_assert_eq!(log.total_delay_ns(), u64::from(n) * 4 * 10_000);
    }
}
