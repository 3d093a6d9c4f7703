// Copyright 2026 the Veneer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tab identity and lifecycle events.
//!
//! Every event describes a single state transition the external tab model
//! has already committed. Events are immutable values: overlays observe them
//! but can neither suppress nor reorder them. An event that names a tab an
//! overlay has never seen must be ignored by that overlay.
//!
//! [`TabEvent`] wraps the individual event structs so the
//! [`OverlayManager`](crate::manager::OverlayManager) can broadcast any of
//! them through a single entry point.

use alloc::string::String;
use core::fmt;

use crate::overlay::SceneOverlay;
use crate::time::FrameTime;

/// Identifies a tab in the external tab model.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TabId(pub i32);

impl fmt::Debug for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TabId({})", self.0)
    }
}

/// A tab's title changed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TabTitleChanged {
    /// The tab whose title changed.
    pub tab_id: TabId,
    /// The new title.
    pub title: String,
}

/// The active tab model switched between normal and incognito.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TabModelSwitched {
    /// Whether the incognito model is now active.
    pub incognito: bool,
}

/// A tab became the selected tab of its model.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TabSelected {
    /// When the selection was committed.
    pub time: FrameTime,
    /// Which model the tab belongs to.
    pub incognito: bool,
    /// The newly selected tab.
    pub tab_id: TabId,
    /// The previously selected tab, if any.
    pub prev_id: Option<TabId>,
}

/// A tab moved to a different index within its model.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TabMoved {
    /// When the move was committed.
    pub time: FrameTime,
    /// Which model the tab belongs to.
    pub incognito: bool,
    /// The moved tab.
    pub tab_id: TabId,
    /// Index before the move.
    pub old_index: usize,
    /// Index after the move.
    pub new_index: usize,
}

/// A tab was closed.
///
/// The tab is already gone from the tab model when this is delivered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TabClosed {
    /// When the closure was committed.
    pub time: FrameTime,
    /// Which model the tab belonged to.
    pub incognito: bool,
    /// The closed tab.
    pub tab_id: TabId,
}

/// A pending tab closure was undone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TabClosureCancelled {
    /// When the undo was committed.
    pub time: FrameTime,
    /// Which model the tab belongs to.
    pub incognito: bool,
    /// The restored tab.
    pub tab_id: TabId,
}

/// A tab was created.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TabCreated {
    /// When the creation was committed.
    pub time: FrameTime,
    /// Which model the tab belongs to.
    pub incognito: bool,
    /// The new tab.
    pub tab_id: TabId,
    /// The tab the new one was opened from; it is placed right after it.
    pub prev_id: Option<TabId>,
    /// Whether the new tab was also selected.
    pub selected: bool,
}

/// A page or network load started or finished in a tab.
///
/// Shared by the four load notifications; the [`TabEvent`] variant says which
/// one it is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TabLoadEvent {
    /// When the load state changed.
    pub time: FrameTime,
    /// Which model the tab belongs to.
    pub incognito: bool,
    /// The loading tab.
    pub tab_id: TabId,
}

/// Discriminant of a [`TabEvent`], used for diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TabEventKind {
    /// [`TabEvent::TitleChanged`].
    TitleChanged,
    /// [`TabEvent::ModelSwitched`].
    ModelSwitched,
    /// [`TabEvent::Selected`].
    Selected,
    /// [`TabEvent::Moved`].
    Moved,
    /// [`TabEvent::Closed`].
    Closed,
    /// [`TabEvent::ClosureCancelled`].
    ClosureCancelled,
    /// [`TabEvent::Created`].
    Created,
    /// [`TabEvent::PageLoadStarted`].
    PageLoadStarted,
    /// [`TabEvent::PageLoadFinished`].
    PageLoadFinished,
    /// [`TabEvent::LoadStarted`].
    LoadStarted,
    /// [`TabEvent::LoadFinished`].
    LoadFinished,
}

impl TabEventKind {
    /// Every kind, in declaration order.
    pub const ALL: [Self; 11] = [
        Self::TitleChanged,
        Self::ModelSwitched,
        Self::Selected,
        Self::Moved,
        Self::Closed,
        Self::ClosureCancelled,
        Self::Created,
        Self::PageLoadStarted,
        Self::PageLoadFinished,
        Self::LoadStarted,
        Self::LoadFinished,
    ];

    /// Returns a short snake-case name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::TitleChanged => "tab_title_changed",
            Self::ModelSwitched => "tab_model_switched",
            Self::Selected => "tab_selected",
            Self::Moved => "tab_moved",
            Self::Closed => "tab_closed",
            Self::ClosureCancelled => "tab_closure_cancelled",
            Self::Created => "tab_created",
            Self::PageLoadStarted => "tab_page_load_started",
            Self::PageLoadFinished => "tab_page_load_finished",
            Self::LoadStarted => "tab_load_started",
            Self::LoadFinished => "tab_load_finished",
        }
    }
}

/// Any tab lifecycle event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TabEvent {
    /// See [`TabTitleChanged`].
    TitleChanged(TabTitleChanged),
    /// See [`TabModelSwitched`].
    ModelSwitched(TabModelSwitched),
    /// See [`TabSelected`].
    Selected(TabSelected),
    /// See [`TabMoved`].
    Moved(TabMoved),
    /// See [`TabClosed`].
    Closed(TabClosed),
    /// See [`TabClosureCancelled`].
    ClosureCancelled(TabClosureCancelled),
    /// See [`TabCreated`].
    Created(TabCreated),
    /// The main frame of a page started loading.
    PageLoadStarted(TabLoadEvent),
    /// The main frame of a page finished loading.
    PageLoadFinished(TabLoadEvent),
    /// The tab started network loading.
    LoadStarted(TabLoadEvent),
    /// The tab stopped network loading.
    LoadFinished(TabLoadEvent),
}

impl TabEvent {
    /// Returns the event's discriminant.
    #[must_use]
    pub const fn kind(&self) -> TabEventKind {
        match self {
            Self::TitleChanged(_) => TabEventKind::TitleChanged,
            Self::ModelSwitched(_) => TabEventKind::ModelSwitched,
            Self::Selected(_) => TabEventKind::Selected,
            Self::Moved(_) => TabEventKind::Moved,
            Self::Closed(_) => TabEventKind::Closed,
            Self::ClosureCancelled(_) => TabEventKind::ClosureCancelled,
            Self::Created(_) => TabEventKind::Created,
            Self::PageLoadStarted(_) => TabEventKind::PageLoadStarted,
            Self::PageLoadFinished(_) => TabEventKind::PageLoadFinished,
            Self::LoadStarted(_) => TabEventKind::LoadStarted,
            Self::LoadFinished(_) => TabEventKind::LoadFinished,
        }
    }

    /// Returns the tab the event is about, if it names one.
    #[must_use]
    pub const fn tab_id(&self) -> Option<TabId> {
        match self {
            Self::TitleChanged(e) => Some(e.tab_id),
            Self::ModelSwitched(_) => None,
            Self::Selected(e) => Some(e.tab_id),
            Self::Moved(e) => Some(e.tab_id),
            Self::Closed(e) => Some(e.tab_id),
            Self::ClosureCancelled(e) => Some(e.tab_id),
            Self::Created(e) => Some(e.tab_id),
            Self::PageLoadStarted(e)
            | Self::PageLoadFinished(e)
            | Self::LoadStarted(e)
            | Self::LoadFinished(e) => Some(e.tab_id),
        }
    }

    /// Delivers the event to one overlay by calling the matching
    /// [`SceneOverlay`] method.
    pub fn deliver_to(&self, overlay: &mut dyn SceneOverlay) {
        match self {
            Self::TitleChanged(e) => overlay.tab_title_changed(e),
            Self::ModelSwitched(e) => overlay.tab_model_switched(e),
            Self::Selected(e) => overlay.tab_selected(e),
            Self::Moved(e) => overlay.tab_moved(e),
            Self::Closed(e) => overlay.tab_closed(e),
            Self::ClosureCancelled(e) => overlay.tab_closure_cancelled(e),
            Self::Created(e) => overlay.tab_created(e),
            Self::PageLoadStarted(e) => overlay.tab_page_load_started(e),
            Self::PageLoadFinished(e) => overlay.tab_page_load_finished(e),
            Self::LoadStarted(e) => overlay.tab_load_started(e),
            Self::LoadFinished(e) => overlay.tab_load_finished(e),
        }
    }
}
