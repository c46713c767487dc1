// Copyright 2025 the CardGrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Touch drag, fling and pinch recognition.
//!
//! ## Usage
//!
//! 1) Forward `touchstart` as [`TouchAdapter::touch_start`] with the touches
//!    that changed and every touch still on the surface.
//! 2) Forward `touchmove` as [`TouchAdapter::touch_move`]; single-finger
//!    movement yields [`TouchAction::Pan`] deltas (inverted, so content follows
//!    the finger), two fingers yield [`TouchAction::Zoom`] when enabled.
//! 3) Forward `touchend`/`touchcancel`; a fast release yields a
//!    [`TouchAction::Impulse`] to seed momentum.
//!
//! ## Minimal example
//!
//! ```
//! use cardgrid_input::{TouchAction, TouchAdapter, TouchPoint};
//! use kurbo::{Point, Vec2};
//!
//! let mut touch = TouchAdapter::default();
//! let down = [TouchPoint::new(1, Point::new(100.0, 100.0))];
//! touch.touch_start(&down, &down);
//!
//! // Finger moves right by 10: content pans left by 10.
//! let moved = [TouchPoint::new(1, Point::new(110.0, 100.0))];
//! let actions = touch.touch_move(&moved, &moved, 16.0);
//! assert_eq!(actions.as_slice(), &[TouchAction::Pan(Vec2::new(-10.0, 0.0))]);
//! ```

use cardgrid_motion::VelocityTracker;
use kurbo::{Point, Vec2};
use smallvec::SmallVec;

/// A touch contact reported by the host.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchPoint {
    /// Host-assigned identifier, stable for the lifetime of the contact.
    pub id: u64,
    /// Position in viewport pixels.
    pub position: Point,
}

impl TouchPoint {
    /// Creates a touch point.
    #[must_use]
    pub fn new(id: u64, position: Point) -> Self {
        Self { id, position }
    }
}

/// Output of the touch adapter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TouchAction {
    /// Pan the content by this delta immediately.
    Pan(Vec2),
    /// Seed momentum with this velocity (pixels per frame).
    Impulse(Vec2),
    /// Pinch scale relative to the distance when the second finger landed.
    Zoom(f64),
}

/// Actions produced by a single touch event.
pub type TouchActions = SmallVec<[TouchAction; 2]>;

#[derive(Clone, Copy, Debug, PartialEq)]
struct Tracked {
    id: u64,
    current: Point,
}

/// Converts touch events into pan, impulse and pinch actions.
#[derive(Clone, Debug)]
pub struct TouchAdapter {
    touches: SmallVec<[Tracked; 4]>,
    tracker: VelocityTracker,
    pinch_start: Option<f64>,
    report_zoom: bool,
    enabled: bool,
}

impl Default for TouchAdapter {
    fn default() -> Self {
        Self::new(false)
    }
}

impl TouchAdapter {
    /// Creates an enabled adapter. Pinch scale is only reported when
    /// `report_zoom` is set.
    #[must_use]
    pub fn new(report_zoom: bool) -> Self {
        Self {
            touches: SmallVec::new(),
            tracker: VelocityTracker::new(),
            pinch_start: None,
            report_zoom,
            enabled: true,
        }
    }

    /// Turns pinch scale reporting on or off.
    pub fn set_report_zoom(&mut self, report_zoom: bool) {
        self.report_zoom = report_zoom;
    }

    /// Returns `true` while at least one tracked contact is down.
    #[must_use]
    pub fn is_touching(&self) -> bool {
        !self.touches.is_empty()
    }

    /// Returns `true` while two fingers are down.
    #[must_use]
    pub fn is_pinching(&self) -> bool {
        self.pinch_start.is_some()
    }

    /// Returns `true` while events are processed.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Resumes processing events.
    pub fn enable(&mut self) {
        self.enabled = true;
    }

    /// Stops processing events and forgets all contacts.
    pub fn disable(&mut self) {
        self.enabled = false;
        self.touches.clear();
        self.tracker.reset();
        self.pinch_start = None;
    }

    /// New contacts landed. `active` lists every contact now on the surface.
    pub fn touch_start(&mut self, changed: &[TouchPoint], active: &[TouchPoint]) {
        if !self.enabled {
            return;
        }
        for t in changed.iter().filter(|t| t.position.is_finite()) {
            match self.touches.iter_mut().find(|tracked| tracked.id == t.id) {
                Some(tracked) => tracked.current = t.position,
                None => self.touches.push(Tracked {
                    id: t.id,
                    current: t.position,
                }),
            }
        }
        self.tracker.reset();
        self.pinch_start = match active {
            [a, b] => Some(a.position.distance(b.position)),
            _ => None,
        };
    }

    /// Contacts moved. `active` lists every contact on the surface.
    pub fn touch_move(
        &mut self,
        changed: &[TouchPoint],
        active: &[TouchPoint],
        time_ms: f64,
    ) -> TouchActions {
        let mut out = TouchActions::new();
        if !self.enabled {
            return out;
        }
        if let [a, b] = active {
            self.follow(changed);
            if self.report_zoom
                && let Some(initial) = self.pinch_start
                && initial > 0.0
            {
                let scale = a.position.distance(b.position) / initial;
                if scale.is_finite() {
                    out.push(TouchAction::Zoom(scale));
                }
            }
            return out;
        }
        for t in changed.iter().filter(|t| t.position.is_finite()) {
            let Some(tracked) = self.touches.iter_mut().find(|tracked| tracked.id == t.id) else {
                continue;
            };
            let delta = t.position - tracked.current;
            tracked.current = t.position;
            self.tracker.add_sample(delta, time_ms);
            out.push(TouchAction::Pan(-delta));
        }
        out
    }

    /// Contacts lifted. `remaining` lists the contacts still on the surface.
    pub fn touch_end(&mut self, changed: &[TouchPoint], remaining: &[TouchPoint]) -> TouchActions {
        let mut out = TouchActions::new();
        if !self.enabled {
            return out;
        }
        let release = self.tracker.velocity();
        if release.is_fling() {
            out.push(TouchAction::Impulse(-release.to_vec2()));
        }
        self.touches
            .retain(|tracked| !changed.iter().any(|t| t.id == tracked.id));
        self.pinch_start = match remaining {
            [a, b] => Some(a.position.distance(b.position)),
            _ => None,
        };
        out
    }

    /// Records new positions without producing deltas.
    fn follow(&mut self, changed: &[TouchPoint]) {
        for t in changed.iter().filter(|t| t.position.is_finite()) {
            if let Some(tracked) = self.touches.iter_mut().find(|tracked| tracked.id == t.id) {
                tracked.current = t.position;
            }
        }
    }

    /// Contacts were cancelled by the host; handled like a release.
    pub fn touch_cancel(
        &mut self,
        changed: &[TouchPoint],
        remaining: &[TouchPoint],
    ) -> TouchActions {
        self.touch_end(changed, remaining)
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Vec2};

    use super::{TouchAction, TouchAdapter, TouchPoint};

    fn at(id: u64, x: f64, y: f64) -> TouchPoint {
        TouchPoint::new(id, Point::new(x, y))
    }

    #[test]
    fn drag_emits_inverted_deltas() {
        let mut t = TouchAdapter::default();
        let down = [at(1, 0.0, 0.0)];
        t.touch_start(&down, &down);
        assert!(t.is_touching());

        let m = [at(1, 5.0, -3.0)];
        let out = t.touch_move(&m, &m, 16.0);
        assert_eq!(out.as_slice(), &[TouchAction::Pan(Vec2::new(-5.0, 3.0))]);
        let m = [at(1, 7.0, -3.0)];
        let out = t.touch_move(&m, &m, 32.0);
        assert_eq!(out.as_slice(), &[TouchAction::Pan(Vec2::new(-2.0, 0.0))]);
    }

    #[test]
    fn fast_release_emits_inverted_impulse() {
        let mut t = TouchAdapter::default();
        let down = [at(1, 0.0, 0.0)];
        t.touch_start(&down, &down);
        for i in 1..=4 {
            let p = [at(1, f64::from(i) * 20.0, 0.0)];
            t.touch_move(&p, &p, f64::from(i) * 16.0);
        }
        let out = t.touch_end(&[at(1, 80.0, 0.0)], &[]);
        let [TouchAction::Impulse(v)] = out.as_slice() else {
            panic!("expected a single impulse, got {out:?}");
        };
        // Average delta of the last three samples over the 48 ms window,
        // scaled to a 16.67 ms frame, then inverted.
        assert!((v.x + 20.0 / 48.0 * 16.67).abs() < 1e-9);
        assert_eq!(v.y, 0.0);
        assert!(!t.is_touching());
    }

    #[test]
    fn slow_release_emits_nothing() {
        let mut t = TouchAdapter::default();
        let down = [at(1, 0.0, 0.0)];
        t.touch_start(&down, &down);
        let p = [at(1, 0.1, 0.0)];
        t.touch_move(&p, &p, 100.0);
        let p = [at(1, 0.2, 0.0)];
        t.touch_move(&p, &p, 300.0);
        assert!(t.touch_end(&p, &[]).is_empty());
    }

    #[test]
    fn pinch_reports_scale_only_when_enabled() {
        let mut t = TouchAdapter::new(true);
        let first = [at(1, 0.0, 0.0)];
        t.touch_start(&first, &first);
        let both = [at(1, 0.0, 0.0), at(2, 100.0, 0.0)];
        t.touch_start(&both[1..], &both);
        assert!(t.is_pinching());

        let spread = [at(1, 0.0, 0.0), at(2, 150.0, 0.0)];
        let out = t.touch_move(&spread[1..], &spread, 16.0);
        assert_eq!(out.as_slice(), &[TouchAction::Zoom(1.5)]);

        t.set_report_zoom(false);
        assert!(t.touch_move(&spread[1..], &spread, 32.0).is_empty());

        // Lifting one finger ends the pinch without a fling.
        let out = t.touch_end(&spread[1..], &spread[..1]);
        assert!(out.is_empty());
        assert!(!t.is_pinching());
        assert!(t.is_touching());
    }

    #[test]
    fn unknown_and_non_finite_touches_are_ignored() {
        let mut t = TouchAdapter::default();
        let down = [at(1, 0.0, 0.0)];
        t.touch_start(&down, &down);
        let stray = [at(9, 50.0, 50.0)];
        assert!(t.touch_move(&stray, &stray, 16.0).is_empty());
        let bad = [at(1, f64::NAN, 0.0)];
        assert!(t.touch_move(&bad, &bad, 16.0).is_empty());
    }

    #[test]
    fn disable_forgets_contacts() {
        let mut t = TouchAdapter::default();
        let down = [at(1, 0.0, 0.0)];
        t.touch_start(&down, &down);
        t.disable();
        assert!(!t.is_touching());
        let m = [at(1, 10.0, 0.0)];
        assert!(t.touch_move(&m, &m, 16.0).is_empty());
        t.enable();
        // The contact was forgotten, so its moves are ignored until it lands again.
        assert!(t.touch_move(&m, &m, 32.0).is_empty());
    }
}
