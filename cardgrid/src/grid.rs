// Copyright 2025 the CardGrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec;
use alloc::vec::Vec;
use core::fmt::Debug;
use core::hash::Hash;

use cardgrid_index::{
    CellBackend, FlatScan, GridEntity, LoadState, VirtualGrid, VirtualGridDebugInfo,
};
use cardgrid_input::{KeyEvent, TouchPoint, WheelEvent};
use cardgrid_motion::PanTween;
use cardgrid_view::{BoundaryDebugInfo, BoundaryManager, GridBounds};
use kurbo::{Point, Rect, Size, Vec2};
use tracing::{debug, trace};

use crate::config::{ConfigError, GridConfig};
use crate::coordinator::{InputCoordinator, PanSink};
use crate::events::GridEvent;

/// Restoring steps shorter than this snap straight onto the scroll range.
const SETTLE_SNAP: f64 = 0.05;

/// Scroll state, visibility and the event queue.
///
/// Kept apart from the input coordinator so it can serve as its [`PanSink`].
#[derive(Debug)]
struct Viewport<K, B> {
    index: VirtualGrid<K, B>,
    boundary: BoundaryManager,
    position: Point,
    tween: Option<PanTween>,
    scale: f64,
    seen_revision: u64,
    events: Vec<GridEvent<K>>,
}

impl<K, B> Viewport<K, B>
where
    K: Clone + Eq + Hash + Debug,
    B: CellBackend,
{
    /// Places the scroll position at `target` after rubber-band constraint.
    fn move_to(&mut self, target: Point) {
        self.place(self.boundary.constrain(target));
    }

    /// Places the scroll position exactly at `position`.
    fn place(&mut self, position: Point) {
        self.position = position;
        self.index.set_scroll_position(position);
        self.queue(GridEvent::PositionChanged(position));
        self.sync_visible();
    }

    /// Queues an event. A state event replaces any queued event of its kind.
    fn queue(&mut self, event: GridEvent<K>) {
        if event.is_state() {
            let kind = core::mem::discriminant(&event);
            self.events.retain(|queued| core::mem::discriminant(queued) != kind);
        }
        self.events.push(event);
    }

    fn sync_visible(&mut self) {
        let revision = self.index.visible_revision();
        if revision == self.seen_revision {
            return;
        }
        self.seen_revision = revision;
        let ids: Vec<K> = self.index.visible_ids().cloned().collect();
        trace!(visible = ids.len(), revision, "visible set changed");
        self.queue(GridEvent::VisibleChanged(ids));
    }

    fn advance_tween(&mut self, timestamp_ms: f64) {
        let Some(tween) = self.tween.as_mut() else {
            return;
        };
        let sample = tween.sample(timestamp_ms);
        if sample.done {
            self.tween = None;
        }
        self.move_to(sample.position);
    }

    /// One step of the pull back into the scroll range.
    fn settle(&mut self) {
        if self.boundary.is_within_bounds(self.position) {
            return;
        }
        let force = self.boundary.elastic_force(self.position);
        if force.hypot() >= SETTLE_SNAP {
            self.place(self.position + force);
        } else if let Some(range) = self.boundary.scroll_range() {
            trace!(position = ?self.position, "settled onto scroll range");
            self.place(Point::new(
                self.position.x.clamp(range.x0, range.x1),
                self.position.y.clamp(range.y0, range.y1),
            ));
        }
    }
}

impl<K, B> PanSink<K> for Viewport<K, B>
where
    K: Clone + Eq + Hash + Debug,
    B: CellBackend,
{
    fn pan(&mut self, delta: Vec2) {
        self.move_to(self.position + delta);
    }

    fn interrupt(&mut self) {
        self.tween = None;
    }

    fn zoom(&mut self, scale: f64) {
        self.scale = scale;
        self.queue(GridEvent::Zoom(scale));
    }

    fn focus(&mut self, id: K) {
        self.events.push(GridEvent::FocusChanged(Some(id)));
    }

    fn activate(&mut self, id: K) {
        self.events.push(GridEvent::Activate(id));
    }
}

/// An infinite, pannable canvas of cards.
///
/// `Grid` ties the pieces together: a [`VirtualGrid`] decides what is
/// visible, a [`BoundaryManager`] keeps the scroll position near the content,
/// and an [`InputCoordinator`] turns touch, wheel and keyboard events into
/// movement. The host drives it by forwarding input, calling
/// [`Grid::on_frame`] once per animation frame, and draining
/// [`GridEvent`]s.
///
/// The scroll position is the content-space pixel shown at the viewport's
/// top-left corner.
#[derive(Debug)]
pub struct Grid<K, B = FlatScan> {
    config: GridConfig,
    input: InputCoordinator<K>,
    view: Viewport<K, B>,
    destroyed: bool,
}

impl<K> Grid<K, FlatScan>
where
    K: Clone + Eq + Hash + Debug,
{
    /// Builds a grid over `entities` using the [`FlatScan`] backend.
    ///
    /// The event queue starts with the initial
    /// [`GridEvent::VisibleChanged`].
    pub fn new<I>(
        config: GridConfig,
        viewport: Size,
        entities: I,
        initial_position: Point,
    ) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = GridEntity<K>>,
    {
        Self::with_backend(config, viewport, FlatScan::default(), entities, initial_position)
    }
}

impl<K, B> Grid<K, B>
where
    K: Clone + Eq + Hash + Debug,
    B: CellBackend,
{
    /// Builds a grid with an explicit visibility backend.
    pub fn with_backend<I>(
        config: GridConfig,
        viewport: Size,
        backend: B,
        entities: I,
        initial_position: Point,
    ) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = GridEntity<K>>,
    {
        config.validate()?;
        let mut index = VirtualGrid::with_backend(config.geometry, viewport, backend);
        for entity in entities {
            index.insert(entity);
        }
        let mut boundary = BoundaryManager::new(config.geometry, config.elastic);
        boundary.set_viewport(viewport);
        boundary.set_bounds(index.bounds());

        let mut input = InputCoordinator::new(config.physics, config.input);
        input.set_focus_ids(index.ids().cloned());

        let position = if initial_position.is_finite() {
            boundary.constrain(initial_position)
        } else {
            Point::ZERO
        };
        index.set_scroll_position(position);
        let visible: Vec<K> = index.visible_ids().cloned().collect();
        debug!(
            entities = index.len(),
            visible = visible.len(),
            ?position,
            "grid created"
        );

        Ok(Self {
            config,
            input,
            view: Viewport {
                seen_revision: index.visible_revision(),
                index,
                boundary,
                position,
                tween: None,
                scale: 1.0,
                events: vec![GridEvent::VisibleChanged(visible)],
            },
            destroyed: false,
        })
    }

    /// Configuration the grid was built with.
    #[must_use]
    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Current scroll position.
    #[must_use]
    pub fn position(&self) -> Point {
        self.view.position
    }

    /// Current viewport size.
    #[must_use]
    pub fn viewport(&self) -> Size {
        self.view.index.viewport()
    }

    /// Most recent pinch scale, `1.0` until a pinch is reported.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.view.scale
    }

    /// Looks up an entity.
    #[must_use]
    pub fn entity(&self, id: &K) -> Option<&GridEntity<K>> {
        self.view.index.get(id)
    }

    /// All entities in insertion order.
    pub fn entities(&self) -> impl Iterator<Item = &GridEntity<K>> + '_ {
        self.view.index.entities()
    }

    /// Ids of visible entities in render order.
    pub fn visible_entities(&self) -> impl Iterator<Item = &K> + '_ {
        self.view.index.visible_ids()
    }

    /// Visible entities in render order (priority descending).
    pub fn items_to_render(&self) -> impl Iterator<Item = &GridEntity<K>> + '_ {
        self.view.index.items_to_render()
    }

    /// Content-space pixel rectangle of an entity.
    #[must_use]
    pub fn pixel_position_of(&self, id: &K) -> Option<Rect> {
        self.view.index.pixel_position_of(id)
    }

    /// Padded cell bounds of all entities.
    #[must_use]
    pub fn bounds(&self) -> GridBounds {
        self.view.boundary.bounds()
    }

    /// The rubber-band clamp in use.
    #[must_use]
    pub fn boundary(&self) -> &BoundaryManager {
        &self.view.boundary
    }

    /// Entity holding keyboard focus.
    #[must_use]
    pub fn focused(&self) -> Option<&K> {
        self.input.focused()
    }

    /// Returns `true` while momentum or an animated navigation is running.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.view.tween.is_some() || self.input.is_coasting()
    }

    /// Returns `true` once [`Grid::destroy`] has been called.
    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Takes every event queued since the last call.
    ///
    /// Position, visibility and zoom events only keep their latest value, so
    /// an undrained queue stays small. Focus and activation events are kept
    /// in order; drain once per frame to see each of them promptly.
    pub fn drain_events(&mut self) -> Vec<GridEvent<K>> {
        core::mem::take(&mut self.view.events)
    }

    fn refresh_membership(&mut self) {
        self.view.boundary.set_bounds(self.view.index.bounds());
        self.input.set_focus_ids(self.view.index.ids().cloned());
    }

    /// Adds an entity, replacing any entity with the same id.
    pub fn add_entity(&mut self, entity: GridEntity<K>) -> Option<GridEntity<K>> {
        let replaced = self.view.index.insert(entity);
        self.refresh_membership();
        self.view.sync_visible();
        replaced
    }

    /// Removes an entity. Clears keyboard focus if it was focused.
    pub fn remove_entity(&mut self, id: &K) -> Option<GridEntity<K>> {
        let removed = self.view.index.remove(id)?;
        self.refresh_membership();
        if self.input.focused() == Some(id) {
            self.input.set_focus(None);
            self.view.events.push(GridEvent::FocusChanged(None));
        }
        self.view.sync_visible();
        Some(removed)
    }

    /// Records the host's asset loading progress for an entity.
    pub fn set_load_state(&mut self, id: &K, state: LoadState) -> bool {
        self.view.index.set_load_state(id, state)
    }

    /// Pans by `delta` pixels, with rubber-band resistance past the edges.
    pub fn pan_by(&mut self, delta: Vec2) {
        if self.destroyed || !delta.is_finite() {
            return;
        }
        self.view.pan(delta);
    }

    /// Moves to `position`, immediately or along an eased animation.
    ///
    /// Either way momentum stops. An animated move starts on the next
    /// [`Grid::on_frame`] and lasts [`GridConfig::navigation_ms`].
    pub fn set_position(&mut self, position: Point, animate: bool) {
        if self.destroyed || !position.is_finite() {
            return;
        }
        self.input.stop_momentum();
        if animate {
            self.view.tween = Some(PanTween::new(
                self.view.position,
                position,
                self.config.navigation_ms,
            ));
        } else {
            self.view.tween = None;
            self.view.move_to(position);
        }
    }

    /// Centers an entity in the viewport and gives it keyboard focus.
    ///
    /// Returns `false` for unknown ids.
    pub fn navigate_to(&mut self, id: &K, animate: bool) -> bool {
        if self.destroyed {
            return false;
        }
        let Some(rect) = self.view.index.pixel_position_of(id) else {
            debug!(?id, "navigate_to: unknown entity");
            return false;
        };
        let viewport = self.viewport();
        let target = Point::new(
            rect.x0 - (viewport.width - rect.width()) / 2.0,
            rect.y0 - (viewport.height - rect.height()) / 2.0,
        );
        debug!(?id, ?target, animate, "navigate_to");
        self.set_position(target, animate);
        self.input.set_focus(Some(id.clone()));
        self.view
            .events
            .push(GridEvent::FocusChanged(Some(id.clone())));
        true
    }

    /// Changes the viewport size.
    pub fn resize(&mut self, viewport: Size) {
        if !(viewport.width.is_finite() && viewport.height.is_finite()) {
            return;
        }
        self.view.index.set_viewport(viewport);
        self.view.boundary.set_viewport(viewport);
        self.view.sync_visible();
    }

    /// Forwards a `touchstart`.
    pub fn touch_start(&mut self, changed: &[TouchPoint], active: &[TouchPoint]) {
        self.input.touch_start(changed, active);
    }

    /// Forwards a `touchmove`.
    pub fn touch_move(&mut self, changed: &[TouchPoint], active: &[TouchPoint], time_ms: f64) {
        self.input.touch_move(changed, active, time_ms, &mut self.view);
    }

    /// Forwards a `touchend`.
    pub fn touch_end(&mut self, changed: &[TouchPoint], remaining: &[TouchPoint]) {
        self.input.touch_end(changed, remaining, &mut self.view);
    }

    /// Forwards a `touchcancel`.
    pub fn touch_cancel(&mut self, changed: &[TouchPoint], remaining: &[TouchPoint]) {
        self.input.touch_cancel(changed, remaining, &mut self.view);
    }

    /// Forwards a wheel event.
    pub fn wheel(&mut self, event: WheelEvent) {
        self.input.wheel(event, &mut self.view);
    }

    /// Forwards a key press.
    pub fn key_down(&mut self, event: KeyEvent) {
        self.input.key_down(event, &mut self.view);
    }

    /// Forwards a key release.
    pub fn key_up(&mut self, event: KeyEvent) {
        self.input.key_up(event);
    }

    /// Forgets held keys, as when the host surface loses focus.
    pub fn blur(&mut self) {
        self.input.blur();
    }

    /// Advances one animation frame.
    ///
    /// Runs momentum and held-key panning, then any animated navigation, then
    /// pulls an out-of-range position back once nothing else is moving it.
    pub fn on_frame(&mut self, timestamp_ms: f64) {
        if self.destroyed {
            return;
        }
        self.input.on_frame(timestamp_ms, &mut self.view);
        self.view.advance_tween(timestamp_ms);
        if self.view.tween.is_none() && !self.input.is_touching() && !self.input.is_coasting() {
            self.view.settle();
        }
    }

    /// Turns input handling on or off. Ignored after [`Grid::destroy`].
    pub fn set_input_enabled(&mut self, enabled: bool) {
        if self.destroyed {
            return;
        }
        self.input.set_enabled(enabled);
    }

    /// Stops all motion and input for good.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.input.set_enabled(false);
        self.view.tween = None;
        self.destroyed = true;
        debug!("grid destroyed");
    }

    /// Snapshot of internal state for debugging and inspection.
    #[must_use]
    pub fn debug_info(&self) -> GridDebugInfo {
        GridDebugInfo {
            position: self.view.position,
            velocity: self.input.velocity(),
            animating: self.is_animating(),
            input_enabled: self.input.is_enabled(),
            index: self.view.index.debug_info(),
            boundary: self.view.boundary.debug_info(),
        }
    }
}

/// Debug snapshot of a [`Grid`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridDebugInfo {
    /// Current scroll position.
    pub position: Point,
    /// Current momentum velocity.
    pub velocity: Vec2,
    /// Whether momentum or a navigation animation is running.
    pub animating: bool,
    /// Whether input is being processed.
    pub input_enabled: bool,
    /// Visibility state.
    pub index: VirtualGridDebugInfo,
    /// Boundary state.
    pub boundary: BoundaryDebugInfo,
}
