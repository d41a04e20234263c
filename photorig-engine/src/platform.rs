//! Hardware bundle consumed by the engine

use photorig_core::RoutineObserver;
use photorig_hal::{Camera, DelayNs, ImageStore, OutputPin};

/// Concrete hardware types of one rig
///
/// The delay is cloned into each motion controller, so it must be a cheap
/// handle onto a shared monotonic clock.
pub trait RigPlatform {
    type SliderPin: OutputPin;
    type TurntablePin: OutputPin;
    type Delay: DelayNs + Clone;
    type Camera: Camera;
    type Store: ImageStore;
    type Observer: RoutineObserver;
}

/// Hardware handed to [`RigEngine::new`](crate::RigEngine::new)
pub struct RigParts<P: RigPlatform> {
    /// Slider coils `in1..in4`
    pub slider_coils: [P::SliderPin; 4],
    pub turntable_cw: P::TurntablePin,
    pub turntable_ccw: P::TurntablePin,
    pub delay: P::Delay,
    pub camera: P::Camera,
    pub store: P::Store,
    pub observer: P::Observer,
}
