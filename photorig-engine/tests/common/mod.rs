//! Mock rig shared by the engine tests

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use photorig_core::{CancelFlag, Progress, RoutineObserver};
use photorig_engine::{RigParts, RigPlatform};
use photorig_hal::mock::{MockCamera, MockDelay, MockPin, MockStore, OpLog};

pub const COILS: [u8; 4] = [17, 27, 22, 23];
pub const CW: u8 = 26;
pub const CCW: u8 = 19;

/// Records every notification; optionally raises a cancel request
#[derive(Clone, Default)]
pub struct Recorder {
    events: Rc<RefCell<Vec<Progress>>>,
    cancel_on: Option<(Progress, &'static CancelFlag)>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel the routine as soon as `trigger` is reported
    pub fn cancelling(trigger: Progress, flag: &'static CancelFlag) -> Self {
        Self {
            events: Rc::default(),
            cancel_on: Some((trigger, flag)),
        }
    }

    pub fn events(&self) -> Vec<Progress> {
        self.events.borrow().clone()
    }
}

impl RoutineObserver for Recorder {
    fn notify(&mut self, progress: Progress) {
        if let Some((trigger, flag)) = self.cancel_on {
            if trigger == progress {
                flag.cancel();
            }
        }
        self.events.borrow_mut().push(progress);
    }
}

pub struct MockRig;

impl RigPlatform for MockRig {
    type SliderPin = MockPin;
    type TurntablePin = MockPin;
    type Delay = MockDelay;
    type Camera = MockCamera;
    type Store = MockStore;
    type Observer = Recorder;
}

pub fn parts(
    log: &OpLog,
    camera: MockCamera,
    store: MockStore,
    observer: Recorder,
) -> RigParts<MockRig> {
    RigParts {
        slider_coils: COILS.map(|id| MockPin::new(id, log)),
        turntable_cw: MockPin::new(CW, log),
        turntable_ccw: MockPin::new(CCW, log),
        delay: MockDelay::new(log),
        camera,
        store,
        observer,
    }
}

pub fn default_parts(log: &OpLog, observer: Recorder) -> RigParts<MockRig> {
    parts(log, MockCamera::new(log), MockStore::new(log), observer)
}

/// Final level of every pin after replaying the log
pub fn final_levels(log: &OpLog) -> HashMap<u8, bool> {
    let mut levels = HashMap::new();
    for (pin, high) in log.pin_writes() {
        levels.insert(pin, high);
    }
    levels
}

/// True if no pin is left high
pub fn all_outputs_low(log: &OpLog) -> bool {
    final_levels(log).values().all(|high| !high)
}

/// True if the two turntable pins were never high at the same time
pub fn turntable_exclusive(log: &OpLog) -> bool {
    let (mut cw, mut ccw) = (false, false);
    for (pin, high) in log.pin_writes() {
        match pin {
            CW => cw = high,
            CCW => ccw = high,
            _ => {}
        }
        if cw && ccw {
            return false;
        }
    }
    true
}

/// Number of times `pin` went high
pub fn rising_edges(log: &OpLog, pin: u8) -> usize {
    log.pin_writes()
        .iter()
        .filter(|(id, high)| *id == pin && *high)
        .count()
}
