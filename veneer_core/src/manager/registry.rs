// Copyright 2026 the Veneer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Slot-based overlay registry with explicit z-order.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use super::id::{OverlayId, ZOrder};
use crate::overlay::SceneOverlay;
use crate::scene::ComposedScene;
use crate::viewport::Viewport;

/// A live registration.
pub(crate) struct Entry {
    pub(crate) overlay: Box<dyn SceneOverlay>,
    pub(crate) z: ZOrder,
}

/// Owns registered overlays and drives the frame, input, and broadcast
/// protocols over them.
///
/// Overlays are addressed by [`OverlayId`] handles. Unregistered slots are
/// recycled via a free list, and generation counters prevent stale handle
/// access.
pub struct OverlayManager {
    // -- Slots --
    pub(crate) slots: Vec<Option<Entry>>,
    pub(crate) generation: Vec<u32>,
    pub(crate) free_list: Vec<u32>,

    // -- Orderings (live slot indices) --
    pub(crate) registration: Vec<u32>,
    pub(crate) back_to_front: Vec<u32>,

    // -- Frame state --
    pub(crate) viewport: Option<Viewport>,
    pub(crate) frames_started: u64,
    pub(crate) current_frame: u64,
    /// Scene reused by [`render_frame`](Self::render_frame).
    pub(crate) scene: ComposedScene,
}

impl Default for OverlayManager {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for OverlayManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OverlayManager")
            .field(
                "back_to_front",
                &self
                    .back_to_front
                    .iter()
                    .map(|&idx| (self.id_at(idx), self.z_at(idx)))
                    .collect::<Vec<_>>(),
            )
            .field("viewport", &self.viewport)
            .field("frames_started", &self.frames_started)
            .finish_non_exhaustive()
    }
}

impl OverlayManager {
    /// Creates an empty manager.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            generation: Vec::new(),
            free_list: Vec::new(),
            registration: Vec::new(),
            back_to_front: Vec::new(),
            viewport: None,
            frames_started: 0,
            current_frame: 0,
            scene: ComposedScene::new(0),
        }
    }

    // -- Registration API --

    /// Registers an overlay at the given z-order and returns its handle.
    ///
    /// If a viewport has already been broadcast, the overlay receives it via
    /// [`on_size_changed`](SceneOverlay::on_size_changed) before this returns,
    /// so its first compose uses real geometry.
    pub fn register(&mut self, mut overlay: Box<dyn SceneOverlay>, z: ZOrder) -> OverlayId {
        if let Some(viewport) = &self.viewport {
            overlay.on_size_changed(viewport);
        }

        let entry = Entry { overlay, z };
        let idx = if let Some(idx) = self.free_list.pop() {
            // Reuse a freed slot; its generation was bumped on unregister.
            self.slots[idx as usize] = Some(entry);
            idx
        } else {
            let idx = u32::try_from(self.slots.len()).unwrap_or(u32::MAX);
            assert!(idx != u32::MAX, "overlay registry is full");
            self.slots.push(Some(entry));
            self.generation.push(0);
            idx
        };

        self.registration.push(idx);
        self.rebuild_order();
        self.id_at(idx)
    }

    /// Unregisters an overlay and hands it back to the caller.
    ///
    /// Returns `None` if the handle is stale.
    pub fn unregister(&mut self, id: OverlayId) -> Option<Box<dyn SceneOverlay>> {
        if !self.is_registered(id) {
            return None;
        }
        let idx = id.idx;
        let entry = self.slots[idx as usize].take()?;

        // Bump generation so old handles immediately fail validation.
        self.generation[idx as usize] += 1;
        self.free_list.push(idx);
        self.registration.retain(|&i| i != idx);
        self.back_to_front.retain(|&i| i != idx);

        Some(entry.overlay)
    }

    /// Returns whether the given handle refers to a registered overlay.
    #[must_use]
    pub fn is_registered(&self, id: OverlayId) -> bool {
        (id.idx as usize) < self.slots.len()
            && self.generation[id.idx as usize] == id.generation
            && self.slots[id.idx as usize].is_some()
    }

    /// Returns the number of registered overlays.
    #[must_use]
    pub fn len(&self) -> usize {
        self.registration.len()
    }

    /// Returns `true` if no overlay is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.registration.is_empty()
    }

    // -- Z-order API --

    /// Moves an overlay to a new z-order.
    ///
    /// Among overlays sharing `z`, the moved overlay keeps its registration
    /// position.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn set_z_order(&mut self, id: OverlayId, z: ZOrder) {
        self.validate(id);
        if let Some(entry) = &mut self.slots[id.idx as usize] {
            entry.z = z;
        }
        self.rebuild_order();
    }

    /// Returns the z-order of an overlay.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    #[must_use]
    pub fn z_order(&self, id: OverlayId) -> ZOrder {
        self.validate(id);
        self.z_at(id.idx)
    }

    /// Returns the handles of all registered overlays, back to front.
    pub fn ids_back_to_front(&self) -> impl DoubleEndedIterator<Item = OverlayId> + '_ {
        self.back_to_front.iter().map(|&idx| self.id_at(idx))
    }

    /// Returns the handles of all registered overlays in registration order.
    pub fn ids_in_registration_order(&self) -> impl Iterator<Item = OverlayId> + '_ {
        self.registration.iter().map(|&idx| self.id_at(idx))
    }

    // -- Access --

    /// Returns the overlay behind a handle, or `None` if the handle is stale.
    #[must_use]
    pub fn get(&self, id: OverlayId) -> Option<&dyn SceneOverlay> {
        if !self.is_registered(id) {
            return None;
        }
        match &self.slots[id.idx as usize] {
            Some(entry) => Some(entry.overlay.as_ref()),
            None => None,
        }
    }

    /// Returns the overlay behind a handle mutably, or `None` if the handle
    /// is stale.
    #[must_use]
    pub fn get_mut(&mut self, id: OverlayId) -> Option<&mut dyn SceneOverlay> {
        if !self.is_registered(id) {
            return None;
        }
        match &mut self.slots[id.idx as usize] {
            Some(entry) => Some(entry.overlay.as_mut()),
            None => None,
        }
    }

    /// Returns the most recently broadcast viewport, if any.
    #[must_use]
    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    // -- Internal helpers --

    /// Panics if the handle is stale.
    fn validate(&self, id: OverlayId) {
        assert!(
            self.is_registered(id),
            "stale OverlayId: {id:?} (current gen: {})",
            self.generation
                .get(id.idx as usize)
                .copied()
                .unwrap_or(u32::MAX)
        );
    }

    /// Returns the live handle for slot `idx`.
    pub(crate) fn id_at(&self, idx: u32) -> OverlayId {
        OverlayId {
            idx,
            generation: self.generation[idx as usize],
        }
    }

    /// Returns the z-order of slot `idx`.
    fn z_at(&self, idx: u32) -> ZOrder {
        self.slots[idx as usize]
            .as_ref()
            .map_or(ZOrder::BACK, |entry| entry.z)
    }

    /// Recomputes the back-to-front order from registration order.
    ///
    /// The sort is stable, so equal z-orders keep registration order.
    fn rebuild_order(&mut self) {
        self.back_to_front.clear();
        self.back_to_front.extend_from_slice(&self.registration);
        let slots = &self.slots;
        self.back_to_front.sort_by_key(|&idx| {
            slots[idx as usize]
                .as_ref()
                .map_or(ZOrder::BACK, |entry| entry.z)
        });
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;
    use crate::testing::{Call, RecordingOverlay};
    use crate::viewport::Orientation;

    fn overlay(name: &'static str) -> Box<dyn SceneOverlay> {
        Box::new(RecordingOverlay::new(name).0)
    }

    #[test]
    fn register_and_unregister() {
        let mut manager = OverlayManager::new();
        let id = manager.register(overlay("a"), ZOrder(0));
        assert!(manager.is_registered(id));
        assert_eq!(manager.len(), 1);

        assert!(manager.unregister(id).is_some());
        assert!(!manager.is_registered(id));
        assert!(manager.is_empty());
        assert!(manager.unregister(id).is_none(), "second unregister is a no-op");
    }

    #[test]
    fn generation_prevents_stale_access() {
        let mut manager = OverlayManager::new();
        let id1 = manager.register(overlay("a"), ZOrder(0));
        manager.unregister(id1);
        let id2 = manager.register(overlay("b"), ZOrder(0));
        // id2 reuses the same slot but has a different generation.
        assert!(!manager.is_registered(id1));
        assert!(manager.is_registered(id2));
        assert_eq!(id1.index(), id2.index());
        assert_ne!(id1.generation(), id2.generation());
        assert!(manager.get(id1).is_none());
        assert!(manager.get_mut(id1).is_none());
        assert!(manager.get(id2).is_some());
    }

    #[test]
    fn back_to_front_follows_z_not_registration() {
        let mut manager = OverlayManager::new();
        let front = manager.register(overlay("front"), ZOrder(10));
        let back = manager.register(overlay("back"), ZOrder(-5));
        let middle = manager.register(overlay("middle"), ZOrder(0));

        let order: Vec<_> = manager.ids_back_to_front().collect();
        assert_eq!(order, vec![back, middle, front]);

        let registration: Vec<_> = manager.ids_in_registration_order().collect();
        assert_eq!(registration, vec![front, back, middle]);
    }

    #[test]
    fn equal_z_orders_keep_registration_sequence() {
        let mut manager = OverlayManager::new();
        let a = manager.register(overlay("a"), ZOrder(1));
        let b = manager.register(overlay("b"), ZOrder(1));
        let c = manager.register(overlay("c"), ZOrder(1));

        let order: Vec<_> = manager.ids_back_to_front().collect();
        assert_eq!(order, vec![a, b, c]);
    }

    #[test]
    fn set_z_order_reorders_between_frames() {
        let mut manager = OverlayManager::new();
        let a = manager.register(overlay("a"), ZOrder(0));
        let b = manager.register(overlay("b"), ZOrder(1));

        manager.set_z_order(a, ZOrder(2));
        assert_eq!(manager.z_order(a), ZOrder(2));
        let order: Vec<_> = manager.ids_back_to_front().collect();
        assert_eq!(order, vec![b, a]);
    }

    #[test]
    fn unregister_removes_from_both_orders() {
        let mut manager = OverlayManager::new();
        let a = manager.register(overlay("a"), ZOrder(0));
        let b = manager.register(overlay("b"), ZOrder(1));
        manager.unregister(a);

        assert_eq!(manager.ids_back_to_front().collect::<Vec<_>>(), vec![b]);
        assert_eq!(
            manager.ids_in_registration_order().collect::<Vec<_>>(),
            vec![b]
        );
    }

    #[test]
    fn register_replays_known_viewport() {
        let mut manager = OverlayManager::new();
        let vp = Viewport::new(400.0, 800.0, 0.0, Orientation::Portrait);
        manager.viewport = Some(vp);

        let (late, log) = RecordingOverlay::new("late");
        manager.register(Box::new(late), ZOrder(0));
        assert_eq!(log.borrow().calls_for("late"), [Call::Size(vp)]);
    }

    #[test]
    fn register_without_viewport_sends_nothing() {
        let mut manager = OverlayManager::new();
        let (early, log) = RecordingOverlay::new("early");
        manager.register(Box::new(early), ZOrder(0));
        assert!(log.borrow().calls_for("early").is_empty());
    }

    #[test]
    #[should_panic(expected = "stale OverlayId")]
    fn stale_handle_panics_on_set_z_order() {
        let mut manager = OverlayManager::new();
        let id = manager.register(overlay("a"), ZOrder(0));
        manager.unregister(id);
        manager.set_z_order(id, ZOrder(3));
    }

    #[test]
    #[should_panic(expected = "stale OverlayId")]
    fn stale_handle_panics_on_z_order() {
        let mut manager = OverlayManager::new();
        let id = manager.register(overlay("a"), ZOrder(0));
        manager.unregister(id);
        let _ = manager.z_order(id);
    }

    #[test]
    #[should_panic(expected = "stale OverlayId")]
    fn foreign_handle_panics() {
        let manager = OverlayManager::new();
        let _ = manager.z_order(OverlayId::from_raw(5, 0));
    }
}
