// Copyright 2026 the Veneer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene subtrees and the composed per-frame scene.
//!
//! Each overlay contributes at most one [`SceneLayer`] tree per frame. The
//! manager collects the contributions into a [`ComposedScene`] in
//! back-to-front z-order, which is handed to the rendering backend. Neither
//! the manager nor the scene keeps a subtree beyond the frame it was built
//! for.

use alloc::vec::Vec;

use kurbo::Rect;

use crate::manager::{OverlayId, ZOrder};
use crate::resource::ResourceKey;

/// Overlay-assigned identity of a scene layer.
///
/// Tags only need to be unique within one overlay's subtree. Keeping them
/// stable across frames lets backends match layers between frames.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LayerTag(pub u64);

/// A node in an overlay's render subtree.
///
/// A layer with `Some` content is drawn; a layer without content only groups
/// its children. Children are ordered back-to-front.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneLayer {
    /// Overlay-assigned identity.
    pub tag: LayerTag,
    /// Bounds in viewport coordinates.
    pub bounds: Rect,
    /// Opacity in `0.0..=1.0`, applied to the layer and its children.
    pub opacity: f32,
    /// The resource drawn into `bounds`, if any.
    pub content: Option<ResourceKey>,
    /// Child layers in back-to-front order.
    pub children: Vec<SceneLayer>,
}

impl SceneLayer {
    /// Creates an opaque grouping layer with no content.
    #[must_use]
    pub fn group(tag: LayerTag, bounds: Rect) -> Self {
        Self {
            tag,
            bounds,
            opacity: 1.0,
            content: None,
            children: Vec::new(),
        }
    }

    /// Creates an opaque layer drawing `content` into `bounds`.
    #[must_use]
    pub fn leaf(tag: LayerTag, bounds: Rect, content: Option<ResourceKey>) -> Self {
        Self {
            content,
            ..Self::group(tag, bounds)
        }
    }

    /// Returns the layer with its opacity set, clamped to `0.0..=1.0`.
    #[must_use]
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    /// Appends `child` in front of the existing children.
    pub fn push_child(&mut self, child: Self) {
        self.children.push(child);
    }

    /// Returns the number of layers in this subtree, including `self`.
    #[must_use]
    pub fn layer_count(&self) -> usize {
        1 + self.children.iter().map(Self::layer_count).sum::<usize>()
    }

    /// Returns a depth-first pre-order iterator over this subtree.
    #[must_use]
    pub fn iter(&self) -> Layers<'_> {
        let mut stack = Vec::new();
        stack.push(self);
        Layers { stack }
    }

    /// Returns the first layer in pre-order with the given tag.
    #[must_use]
    pub fn find(&self, tag: LayerTag) -> Option<&Self> {
        self.iter().find(|layer| layer.tag == tag)
    }
}

/// Depth-first pre-order iterator over a [`SceneLayer`] subtree.
///
/// Created by [`SceneLayer::iter`].
#[derive(Debug)]
pub struct Layers<'a> {
    stack: Vec<&'a SceneLayer>,
}

impl<'a> Iterator for Layers<'a> {
    type Item = &'a SceneLayer;

    fn next(&mut self) -> Option<&'a SceneLayer> {
        let layer = self.stack.pop()?;
        // Push in reverse so the first child is visited next.
        self.stack.extend(layer.children.iter().rev());
        Some(layer)
    }
}

/// One overlay's contribution to a composed frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Contribution {
    /// The contributing overlay.
    pub overlay: OverlayId,
    /// The overlay's z-order at the start of the frame.
    pub z: ZOrder,
    /// The subtree the overlay returned.
    pub root: SceneLayer,
}

/// The composited output of one frame.
///
/// Contributions are ordered back-to-front: later contributions are drawn on
/// top of earlier ones.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ComposedScene {
    frame_index: u64,
    contributions: Vec<Contribution>,
}

impl ComposedScene {
    /// Creates an empty scene for the given frame.
    #[must_use]
    pub fn new(frame_index: u64) -> Self {
        Self {
            frame_index,
            contributions: Vec::new(),
        }
    }

    /// Returns the frame this scene was composed for.
    #[must_use]
    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    /// Returns the contributions in back-to-front order.
    #[must_use]
    pub fn contributions(&self) -> &[Contribution] {
        &self.contributions
    }

    /// Returns the contributions in front-to-back order.
    pub fn front_to_back(&self) -> impl Iterator<Item = &Contribution> {
        self.contributions.iter().rev()
    }

    /// Returns the contribution of the given overlay, if it contributed.
    #[must_use]
    pub fn contribution(&self, overlay: OverlayId) -> Option<&Contribution> {
        self.contributions.iter().find(|c| c.overlay == overlay)
    }

    /// Returns the number of contributing overlays.
    #[must_use]
    pub fn len(&self) -> usize {
        self.contributions.len()
    }

    /// Returns `true` if no overlay contributed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.contributions.is_empty()
    }

    /// Returns the total number of layers across all contributions.
    #[must_use]
    pub fn layer_count(&self) -> usize {
        self.contributions.iter().map(|c| c.root.layer_count()).sum()
    }

    /// Clears the scene for reuse with a new frame index.
    pub fn reset(&mut self, frame_index: u64) {
        self.frame_index = frame_index;
        self.contributions.clear();
    }

    pub(crate) fn push(&mut self, contribution: Contribution) {
        self.contributions.push(contribution);
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    fn tree() -> SceneLayer {
        let mut root = SceneLayer::group(LayerTag(0), Rect::new(0.0, 0.0, 100.0, 40.0));
        let mut a = SceneLayer::leaf(LayerTag(1), Rect::new(0.0, 0.0, 50.0, 40.0), None);
        a.push_child(SceneLayer::leaf(
            LayerTag(3),
            Rect::new(40.0, 0.0, 50.0, 10.0),
            Some(ResourceKey(9)),
        ));
        root.push_child(a);
        root.push_child(SceneLayer::leaf(
            LayerTag(2),
            Rect::new(50.0, 0.0, 100.0, 40.0),
            None,
        ));
        root
    }

    #[test]
    fn iter_is_pre_order() {
        let root = tree();
        let tags: Vec<_> = root.iter().map(|l| l.tag.0).collect();
        assert_eq!(tags, vec![0, 1, 3, 2]);
        assert_eq!(root.layer_count(), 4);
    }

    #[test]
    fn find_by_tag() {
        let root = tree();
        assert_eq!(root.find(LayerTag(3)).and_then(|l| l.content), Some(ResourceKey(9)));
        assert!(root.find(LayerTag(42)).is_none());
    }

    #[test]
    fn opacity_is_clamped() {
        let layer = SceneLayer::group(LayerTag(0), Rect::ZERO).with_opacity(1.5);
        assert_eq!(layer.opacity, 1.0);
        let layer = layer.with_opacity(-0.5);
        assert_eq!(layer.opacity, 0.0);
    }

    #[test]
    fn reset_clears_contributions() {
        let mut scene = ComposedScene::new(3);
        scene.push(Contribution {
            overlay: OverlayId::from_raw(0, 0),
            z: ZOrder(0),
            root: tree(),
        });
        assert_eq!(scene.len(), 1);
        assert_eq!(scene.layer_count(), 4);

        scene.reset(4);
        assert!(scene.is_empty());
        assert_eq!(scene.frame_index(), 4);
    }
}
