// Copyright 2025 the CardGrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input coordination: adapters, momentum and frame loops feeding one sink.
//!
//! [`InputCoordinator`] owns every input adapter, the momentum simulation and
//! the two frame loops (momentum and held-key polling). Whatever the source,
//! movement ends up as a call to [`PanSink::pan`], so the sink is the only
//! writer of the scroll position.
//!
//! Direct input (a finger drag, a wheel notch, a held key) stops momentum and
//! calls [`PanSink::interrupt`] before its delta is delivered. A fling release
//! seeds momentum, which is then delivered from [`InputCoordinator::on_frame`].
//!
//! ## Minimal example
//!
//! ```
//! use cardgrid::{InputConfig, InputCoordinator, PanSink};
//! use cardgrid_input::WheelEvent;
//! use cardgrid_motion::PhysicsConfig;
//! use kurbo::Vec2;
//!
//! #[derive(Default)]
//! struct Total(Vec2);
//! impl PanSink<u32> for Total {
//!     fn pan(&mut self, delta: Vec2) {
//!         self.0 += delta;
//!     }
//! }
//!
//! let mut input = InputCoordinator::<u32>::new(PhysicsConfig::default(), InputConfig::default());
//! let mut sink = Total::default();
//! input.wheel(WheelEvent::new(Vec2::new(0.0, 10.0), 0.0), &mut sink);
//! assert!(sink.0.y > 10.0);
//! ```

use kurbo::Vec2;

use cardgrid_input::{
    KeyAction, KeyEvent, KeyboardAdapter, TouchAction, TouchActions, TouchAdapter, TouchPoint,
    WheelAdapter, WheelEvent,
};
use cardgrid_motion::{FrameTask, PhysicsConfig, ScrollPhysics};

use crate::config::InputConfig;

/// Receiver of everything the coordinator produces.
///
/// Only [`pan`](Self::pan) is required; the rest default to doing nothing.
pub trait PanSink<K> {
    /// Moves the content by `delta` pixels.
    fn pan(&mut self, delta: Vec2);

    /// Direct input is about to pan; drop any scripted motion.
    fn interrupt(&mut self) {}

    /// A pinch changed scale.
    fn zoom(&mut self, _scale: f64) {}

    /// Keyboard focus moved to `id`.
    fn focus(&mut self, _id: K) {}

    /// The focused entity was activated.
    fn activate(&mut self, _id: K) {}
}

/// Owns the input adapters, momentum and frame loops.
#[derive(Clone, Debug)]
pub struct InputCoordinator<K> {
    physics: ScrollPhysics,
    touch: TouchAdapter,
    wheel: WheelAdapter,
    keyboard: KeyboardAdapter<K>,
    physics_task: FrameTask,
    keyboard_task: FrameTask,
    keyboard_enabled: bool,
    enabled: bool,
}

impl<K> InputCoordinator<K> {
    /// Creates an enabled coordinator with both frame loops running.
    ///
    /// The keyboard loop and adapter stay off when
    /// [`InputConfig::keyboard_enabled`] is unset.
    #[must_use]
    pub fn new(physics: PhysicsConfig, input: InputConfig) -> Self {
        let mut keyboard = KeyboardAdapter::new(input.keyboard);
        let keyboard_task = if input.keyboard_enabled {
            FrameTask::started()
        } else {
            keyboard.disable();
            FrameTask::new()
        };
        Self {
            physics: ScrollPhysics::new(physics),
            touch: TouchAdapter::new(input.report_zoom),
            wheel: WheelAdapter::new(input.wheel),
            keyboard,
            physics_task: FrameTask::started(),
            keyboard_task,
            keyboard_enabled: input.keyboard_enabled,
            enabled: true,
        }
    }

    /// Returns `true` unless input was disabled.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Returns `true` while a finger is on the surface.
    #[must_use]
    pub fn is_touching(&self) -> bool {
        self.touch.is_touching()
    }

    /// Returns `true` while momentum is still moving the content.
    #[must_use]
    pub fn is_coasting(&self) -> bool {
        self.physics.is_moving()
    }

    /// Current momentum velocity in pixels per frame.
    #[must_use]
    pub fn velocity(&self) -> Vec2 {
        self.physics.velocity()
    }

    /// The momentum loop.
    #[must_use]
    pub fn physics_task(&self) -> &FrameTask {
        &self.physics_task
    }

    /// The held-key polling loop.
    #[must_use]
    pub fn keyboard_task(&self) -> &FrameTask {
        &self.keyboard_task
    }

    /// Entity holding keyboard focus.
    #[must_use]
    pub fn focused(&self) -> Option<&K> {
        self.keyboard.focused()
    }

    /// Replaces the Tab cycle.
    pub fn set_focus_ids<I: IntoIterator<Item = K>>(&mut self, ids: I) {
        self.keyboard.set_ids(ids);
    }

    /// Moves keyboard focus without going through the Tab cycle.
    pub fn set_focus(&mut self, id: Option<K>) {
        self.keyboard.focus(id);
    }

    /// Halts momentum immediately.
    pub fn stop_momentum(&mut self) {
        self.physics.stop();
    }

    /// Turns all input on or off.
    ///
    /// Disabling stops momentum, forgets touches and held keys, and cancels
    /// both frame loops. Enabling restarts them.
    pub fn set_enabled(&mut self, enabled: bool) {
        if enabled == self.enabled {
            return;
        }
        self.enabled = enabled;
        if enabled {
            self.touch.enable();
            self.wheel.enable();
            self.physics_task.start();
            if self.keyboard_enabled {
                self.keyboard.enable();
                self.keyboard_task.start();
            }
        } else {
            self.physics.stop();
            self.touch.disable();
            self.wheel.disable();
            self.keyboard.disable();
            self.physics_task.cancel();
            self.keyboard_task.cancel();
        }
    }

    fn direct<S: PanSink<K> + ?Sized>(&mut self, delta: Vec2, sink: &mut S) {
        self.physics.stop();
        sink.interrupt();
        sink.pan(delta);
    }

    fn apply<S: PanSink<K> + ?Sized>(&mut self, actions: TouchActions, sink: &mut S) {
        for action in actions {
            match action {
                TouchAction::Pan(delta) => self.direct(delta, sink),
                TouchAction::Impulse(velocity) => self.physics.add_impulse(velocity),
                TouchAction::Zoom(scale) => sink.zoom(scale),
            }
        }
    }

    /// Forwards a `touchstart`.
    pub fn touch_start(&mut self, changed: &[TouchPoint], active: &[TouchPoint]) {
        self.touch.touch_start(changed, active);
    }

    /// Forwards a `touchmove`, panning or zooming through `sink`.
    pub fn touch_move<S: PanSink<K> + ?Sized>(
        &mut self,
        changed: &[TouchPoint],
        active: &[TouchPoint],
        time_ms: f64,
        sink: &mut S,
    ) {
        let actions = self.touch.touch_move(changed, active, time_ms);
        self.apply(actions, sink);
    }

    /// Forwards a `touchend`; a fling seeds momentum.
    pub fn touch_end<S: PanSink<K> + ?Sized>(
        &mut self,
        changed: &[TouchPoint],
        remaining: &[TouchPoint],
        sink: &mut S,
    ) {
        let actions = self.touch.touch_end(changed, remaining);
        self.apply(actions, sink);
    }

    /// Forwards a `touchcancel`.
    pub fn touch_cancel<S: PanSink<K> + ?Sized>(
        &mut self,
        changed: &[TouchPoint],
        remaining: &[TouchPoint],
        sink: &mut S,
    ) {
        let actions = self.touch.touch_cancel(changed, remaining);
        self.apply(actions, sink);
    }

    /// Forwards a wheel event.
    pub fn wheel<S: PanSink<K> + ?Sized>(&mut self, event: WheelEvent, sink: &mut S) {
        if let Some(delta) = self.wheel.wheel(event) {
            self.direct(delta, sink);
        }
    }

    /// Forwards a key release.
    pub fn key_up(&mut self, event: KeyEvent) {
        self.keyboard.key_up(event);
    }

    /// Forgets held keys, as when the surface loses focus.
    pub fn blur(&mut self) {
        self.keyboard.blur();
    }

    /// Delivers one frame of momentum and held-key panning.
    pub fn on_frame<S: PanSink<K> + ?Sized>(&mut self, timestamp_ms: f64, sink: &mut S) {
        let physics = &mut self.physics;
        self.physics_task.run_frame(timestamp_ms, |ts| {
            if physics.is_moving() {
                let delta = physics.update(ts);
                if delta != Vec2::ZERO {
                    sink.pan(delta);
                }
            }
        });

        let keyboard = &self.keyboard;
        let mut held = None;
        self.keyboard_task.run_frame(timestamp_ms, |_| held = keyboard.poll());
        if let Some(delta) = held {
            self.direct(delta, sink);
        }
    }
}

impl<K: Clone + PartialEq> InputCoordinator<K> {
    /// Forwards a key press; Tab and Enter come back through `sink`.
    pub fn key_down<S: PanSink<K> + ?Sized>(&mut self, event: KeyEvent, sink: &mut S) {
        match self.keyboard.key_down(event) {
            Some(KeyAction::Focus(id)) => sink.focus(id),
            Some(KeyAction::Activate(id)) => sink.activate(id),
            None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use cardgrid_input::{Key, KeyEvent, TouchPoint, WheelEvent};
    use cardgrid_motion::PhysicsConfig;
    use kurbo::{Point, Vec2};

    use super::{InputCoordinator, PanSink};
    use crate::config::InputConfig;

    #[derive(Default)]
    struct Recorder {
        pans: Vec<Vec2>,
        interrupts: usize,
        focused: Vec<u32>,
        activated: Vec<u32>,
    }

    impl PanSink<u32> for Recorder {
        fn pan(&mut self, delta: Vec2) {
            self.pans.push(delta);
        }
        fn interrupt(&mut self) {
            self.interrupts += 1;
        }
        fn focus(&mut self, id: u32) {
            self.focused.push(id);
        }
        fn activate(&mut self, id: u32) {
            self.activated.push(id);
        }
    }

    fn coordinator() -> InputCoordinator<u32> {
        InputCoordinator::new(PhysicsConfig::default(), InputConfig::default())
    }

    fn fling(input: &mut InputCoordinator<u32>, sink: &mut Recorder) {
        let p = |x: f64| [TouchPoint::new(1, Point::new(x, 0.0))];
        input.touch_start(&p(0.0), &p(0.0));
        for i in 1..=4 {
            let x = f64::from(i) * 40.0;
            input.touch_move(&p(x), &p(x), f64::from(i) * 16.0, sink);
        }
        input.touch_end(&p(160.0), &[], sink);
    }

    #[test]
    fn fling_coasts_until_friction_stops_it() {
        let mut input = coordinator();
        let mut sink = Recorder::default();
        fling(&mut input, &mut sink);
        assert_eq!(sink.pans.len(), 4);
        assert!(input.is_coasting());
        assert!(input.velocity().x < 0.0);

        sink.pans.clear();
        let mut ts = 100.0;
        while input.is_coasting() {
            input.on_frame(ts, &mut sink);
            ts += 16.0;
            assert!(ts < 10_000.0, "momentum never settled");
        }
        assert!(!sink.pans.is_empty());
        assert!(sink.pans.iter().all(|d| d.x <= 0.0));
    }

    #[test]
    fn direct_input_stops_momentum_first() {
        let mut input = coordinator();
        let mut sink = Recorder::default();
        fling(&mut input, &mut sink);
        assert!(input.is_coasting());
        let interrupts = sink.interrupts;

        input.wheel(WheelEvent::new(Vec2::new(0.0, 5.0), 200.0), &mut sink);
        assert!(!input.is_coasting());
        assert_eq!(sink.interrupts, interrupts + 1);

        // Nothing left to deliver.
        let before = sink.pans.len();
        input.on_frame(216.0, &mut sink);
        assert_eq!(sink.pans.len(), before);
    }

    #[test]
    fn held_keys_pan_every_frame() {
        let mut input = coordinator();
        let mut sink = Recorder::default();
        input.key_down(KeyEvent::new(Key::ArrowDown), &mut sink);
        input.on_frame(0.0, &mut sink);
        input.on_frame(16.0, &mut sink);
        assert_eq!(sink.pans, [Vec2::new(0.0, 10.0), Vec2::new(0.0, 10.0)]);
        input.key_up(KeyEvent::new(Key::ArrowDown));
        input.on_frame(32.0, &mut sink);
        assert_eq!(sink.pans.len(), 2);
    }

    #[test]
    fn focus_and_activation_reach_the_sink() {
        let mut input = coordinator();
        let mut sink = Recorder::default();
        input.set_focus_ids([7, 8]);
        input.key_down(KeyEvent::new(Key::Tab), &mut sink);
        input.key_down(KeyEvent::new(Key::Tab), &mut sink);
        input.key_down(KeyEvent::new(Key::Enter), &mut sink);
        assert_eq!(sink.focused, [7, 8]);
        assert_eq!(sink.activated, [8]);
        assert_eq!(input.focused(), Some(&8));
    }

    #[test]
    fn disabling_cancels_loops_and_momentum() {
        let mut input = coordinator();
        let mut sink = Recorder::default();
        fling(&mut input, &mut sink);
        input.key_down(KeyEvent::new(Key::ArrowLeft), &mut sink);

        input.set_enabled(false);
        assert!(!input.is_coasting());
        assert!(!input.physics_task().is_active());
        assert!(!input.keyboard_task().is_active());
        sink.pans.clear();
        input.on_frame(500.0, &mut sink);
        input.wheel(WheelEvent::new(Vec2::new(0.0, 5.0), 500.0), &mut sink);
        assert!(sink.pans.is_empty());

        input.set_enabled(true);
        assert!(input.physics_task().is_active());
        assert!(input.keyboard_task().is_active());
        input.wheel(WheelEvent::new(Vec2::new(0.0, 5.0), 900.0), &mut sink);
        assert_eq!(sink.pans.len(), 1);
    }

    #[test]
    fn keyboard_can_be_configured_off() {
        let config = InputConfig {
            keyboard_enabled: false,
            ..InputConfig::default()
        };
        let mut input = InputCoordinator::<u32>::new(PhysicsConfig::default(), config);
        let mut sink = Recorder::default();
        assert!(!input.keyboard_task().is_active());
        input.key_down(KeyEvent::new(Key::ArrowDown), &mut sink);
        input.on_frame(0.0, &mut sink);
        assert!(sink.pans.is_empty());

        input.set_enabled(false);
        input.set_enabled(true);
        assert!(!input.keyboard_task().is_active());
    }
}
