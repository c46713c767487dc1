// Copyright 2025 the CardGrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The entity store and its visibility culling.

use alloc::vec::Vec;
use core::fmt::Debug;
use core::hash::Hash;

use cardgrid_view::{CellRect, CellSpan, GridBounds, GridGeometry};
use hashbrown::HashMap;
use kurbo::{Point, Rect, Size};

use crate::backend::{CellBackend, Footprint};
use crate::backends::FlatScan;
use crate::entity::{GridEntity, LoadState};

/// Owns every placed entity and decides which of them are visible.
///
/// Visibility is recomputed synchronously on every change to the viewport, the
/// scroll position, or the entity set. An entity is visible when its occupied
/// cells overlap the render window produced by
/// [`GridGeometry::viewport_cells`].
///
/// The visible list is kept in render order: descending priority, ties
/// broken by insertion order. Every time that list changes,
/// [`VirtualGrid::visible_revision`] is bumped so that hosts can cheaply
/// detect changes without diffing.
///
/// The candidate scan is delegated to a [`CellBackend`]; the default
/// [`FlatScan`] is fine for tens of entities.
pub struct VirtualGrid<K, B = FlatScan> {
    geometry: GridGeometry,
    viewport: Size,
    scroll: Point,
    slots: Vec<Option<GridEntity<K>>>,
    free: Vec<usize>,
    /// Live slots in insertion order.
    order: Vec<usize>,
    ids: HashMap<K, usize>,
    /// Visible slots in render order.
    visible: Vec<usize>,
    visible_revision: u64,
    backend: B,
}

impl<K, B> Debug for VirtualGrid<K, B>
where
    B: Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("VirtualGrid")
            .field("viewport", &self.viewport)
            .field("scroll", &self.scroll)
            .field("len", &self.order.len())
            .field("visible", &self.visible.len())
            .field("backend", &self.backend)
            .finish_non_exhaustive()
    }
}

impl<K> VirtualGrid<K, FlatScan>
where
    K: Clone + Eq + Hash + Debug,
{
    /// Creates an empty grid using the [`FlatScan`] backend.
    #[must_use]
    pub fn new(geometry: GridGeometry, viewport: Size) -> Self {
        Self::with_backend(geometry, viewport, FlatScan::default())
    }
}

impl<K, B> VirtualGrid<K, B>
where
    K: Clone + Eq + Hash + Debug,
    B: CellBackend,
{
    /// Creates an empty grid with an explicit backend.
    #[must_use]
    pub fn with_backend(geometry: GridGeometry, viewport: Size, backend: B) -> Self {
        Self {
            geometry,
            viewport,
            scroll: Point::ZERO,
            slots: Vec::new(),
            free: Vec::new(),
            order: Vec::new(),
            ids: HashMap::new(),
            visible: Vec::new(),
            visible_revision: 0,
            backend,
        }
    }

    /// Geometry used for windows and pixel rectangles.
    #[must_use]
    pub fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    /// Current viewport size.
    #[must_use]
    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Current scroll position.
    #[must_use]
    pub fn scroll_position(&self) -> Point {
        self.scroll
    }

    /// Render window for the current viewport and scroll position.
    #[must_use]
    pub fn window(&self) -> CellRect {
        self.geometry.viewport_cells(self.viewport, self.scroll)
    }

    /// Number of entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if no entity is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Returns `true` if an entity with this id is stored.
    #[must_use]
    pub fn contains(&self, id: &K) -> bool {
        self.ids.contains_key(id)
    }

    /// Counter bumped each time the visible list or its order changes.
    #[must_use]
    pub fn visible_revision(&self) -> u64 {
        self.visible_revision
    }

    /// Stores an entity, replacing any entity with the same id.
    ///
    /// The entity starts not visible, its priority is derived from its rule,
    /// and visibility is then recomputed. A replaced entity keeps the original
    /// insertion position and is returned.
    pub fn insert(&mut self, mut entity: GridEntity<K>) -> Option<GridEntity<K>> {
        entity.visible = false;
        entity.refresh_priority(self.geometry.origin);
        let footprint = Footprint::new(entity.anchor(), entity.span());
        let previous = if let Some(&slot) = self.ids.get(entity.id()) {
            self.backend.update(slot, footprint);
            self.slots[slot].replace(entity)
        } else {
            let slot = match self.free.pop() {
                Some(slot) => slot,
                None => {
                    self.slots.push(None);
                    self.slots.len() - 1
                }
            };
            tracing::debug!(id = ?entity.id(), slot, "insert entity");
            self.ids.insert(entity.id().clone(), slot);
            self.order.push(slot);
            self.backend.insert(slot, footprint);
            self.slots[slot] = Some(entity);
            None
        };
        self.update_visibility();
        previous
    }

    /// Removes an entity and evicts it from the visible set.
    pub fn remove(&mut self, id: &K) -> Option<GridEntity<K>> {
        let slot = self.ids.remove(id)?;
        tracing::debug!(?id, slot, "remove entity");
        self.order.retain(|s| *s != slot);
        self.backend.remove(slot);
        self.free.push(slot);
        if let Some(pos) = self.visible.iter().position(|s| *s == slot) {
            self.visible.remove(pos);
            self.visible_revision += 1;
        }
        self.slots.get_mut(slot).and_then(Option::take)
    }

    /// Removes every entity.
    pub fn clear(&mut self) {
        if !self.visible.is_empty() {
            self.visible_revision += 1;
        }
        self.slots.clear();
        self.free.clear();
        self.order.clear();
        self.ids.clear();
        self.visible.clear();
        self.backend.clear();
    }

    /// Looks up an entity by id.
    #[must_use]
    pub fn get(&self, id: &K) -> Option<&GridEntity<K>> {
        let slot = *self.ids.get(id)?;
        self.slots.get(slot)?.as_ref()
    }

    /// All entities in insertion order.
    pub fn entities(&self) -> impl Iterator<Item = &GridEntity<K>> + '_ {
        self.order
            .iter()
            .filter_map(|slot| self.slots.get(*slot).and_then(Option::as_ref))
    }

    /// All ids in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = &K> + '_ {
        self.entities().map(GridEntity::id)
    }

    /// Visible entities in render order (descending priority, then insertion order).
    pub fn items_to_render(&self) -> impl Iterator<Item = &GridEntity<K>> + '_ {
        self.visible
            .iter()
            .filter_map(|slot| self.slots.get(*slot).and_then(Option::as_ref))
    }

    /// Visible ids in render order.
    pub fn visible_ids(&self) -> impl Iterator<Item = &K> + '_ {
        self.items_to_render().map(GridEntity::id)
    }

    /// Number of visible entities.
    #[must_use]
    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    /// Updates the viewport size and recomputes visibility.
    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
        self.update_visibility();
    }

    /// Updates the scroll position and recomputes visibility.
    pub fn set_scroll_position(&mut self, scroll: Point) {
        self.scroll = scroll;
        self.update_visibility();
    }

    /// Moves an entity, refreshing its priority and visibility.
    ///
    /// Returns `false` for unknown ids.
    pub fn set_entity_anchor(&mut self, id: &K, anchor: Point) -> bool {
        let origin = self.geometry.origin;
        let Some((slot, entity)) = self.entry_mut(id) else {
            return false;
        };
        entity.set_anchor(anchor, origin);
        let footprint = Footprint::new(entity.anchor(), entity.span());
        self.backend.update(slot, footprint);
        self.update_visibility();
        true
    }

    /// Resizes an entity, refreshing its visibility.
    ///
    /// Returns `false` for unknown ids.
    pub fn set_entity_span(&mut self, id: &K, span: CellSpan) -> bool {
        let origin = self.geometry.origin;
        let Some((slot, entity)) = self.entry_mut(id) else {
            return false;
        };
        entity.set_span(span);
        entity.refresh_priority(origin);
        let footprint = Footprint::new(entity.anchor(), entity.span());
        self.backend.update(slot, footprint);
        self.update_visibility();
        true
    }

    /// Records the host's loading state for an entity.
    ///
    /// Returns `false` for unknown ids.
    pub fn set_load_state(&mut self, id: &K, state: LoadState) -> bool {
        match self.entry_mut(id) {
            Some((_, entity)) => {
                entity.load_state = state;
                true
            }
            None => false,
        }
    }

    /// Pixel rectangle of an entity, or `None` for unknown ids.
    #[must_use]
    pub fn pixel_position_of(&self, id: &K) -> Option<Rect> {
        let entity = self.get(id)?;
        Some(
            self.geometry
                .cell_rect_to_pixels(entity.anchor(), entity.span()),
        )
    }

    /// Padded bounds of the current entity set.
    #[must_use]
    pub fn bounds(&self) -> GridBounds {
        self.geometry
            .boundary_from_spans(self.entities().map(|e| (e.anchor(), e.span())))
    }

    /// Snapshot of the current state for debugging and inspection.
    #[must_use]
    pub fn debug_info(&self) -> VirtualGridDebugInfo {
        VirtualGridDebugInfo {
            len: self.order.len(),
            visible: self.visible.len(),
            window: self.window(),
            viewport: self.viewport,
            scroll: self.scroll,
            visible_revision: self.visible_revision,
        }
    }

    fn entry_mut(&mut self, id: &K) -> Option<(usize, &mut GridEntity<K>)> {
        let slot = *self.ids.get(id)?;
        let entity = self.slots.get_mut(slot)?.as_mut()?;
        Some((slot, entity))
    }

    fn update_visibility(&mut self) {
        let window = self.window();
        for entity in self.slots.iter_mut().flatten() {
            entity.visible = false;
        }
        let slots = &mut self.slots;
        self.backend.visit_window(&window, |slot| {
            if let Some(Some(entity)) = slots.get_mut(slot) {
                entity.visible = true;
            }
        });

        let mut visible: Vec<usize> = self
            .order
            .iter()
            .copied()
            .filter(|slot| {
                self.slots
                    .get(*slot)
                    .and_then(Option::as_ref)
                    .is_some_and(GridEntity::is_visible)
            })
            .collect();
        // Stable: equal priorities keep insertion order.
        visible.sort_by(|a, b| self.priority_of(*b).total_cmp(&self.priority_of(*a)));

        if visible != self.visible {
            tracing::trace!(
                visible = visible.len(),
                start_x = window.start_x,
                end_x = window.end_x,
                start_y = window.start_y,
                end_y = window.end_y,
                "visible set changed"
            );
            self.visible = visible;
            self.visible_revision += 1;
        }
    }

    fn priority_of(&self, slot: usize) -> f64 {
        self.slots
            .get(slot)
            .and_then(Option::as_ref)
            .map_or(0.0, GridEntity::priority)
    }
}

/// Debug snapshot of a [`VirtualGrid`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VirtualGridDebugInfo {
    /// Number of stored entities.
    pub len: usize,
    /// Number of visible entities.
    pub visible: usize,
    /// Current render window.
    pub window: CellRect,
    /// Current viewport size.
    pub viewport: Size,
    /// Current scroll position.
    pub scroll: Point,
    /// Current visible-list revision.
    pub visible_revision: u64,
}
