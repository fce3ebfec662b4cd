//! Editor instances and the rendering sink they configure.

use crate::option::PreferenceSnapshot;
use std::fmt;

/// Opaque identity of an editor surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EditorId(u64);

impl EditorId {
    /// Create an id from a host-assigned number.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the underlying numeric id.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EditorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Whether an editor is the primary surface of a document or nested inside one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditorRole {
    /// The editor bound to a whole document.
    Full,
    /// An editor rendered in-place inside `host`.
    Inline {
        /// The full editor that owns this inline editor.
        host: EditorId,
    },
}

impl EditorRole {
    /// The host back-reference, for inline editors.
    pub fn host(self) -> Option<EditorId> {
        match self {
            EditorRole::Full => None,
            EditorRole::Inline { host } => Some(host),
        }
    }

    /// Returns `true` for [`EditorRole::Full`].
    pub fn is_full(self) -> bool {
        matches!(self, EditorRole::Full)
    }
}

/// Configuration surface of a rendering engine.
///
/// Each setter must be idempotent: calling it twice with the same value leaves the surface as
/// calling it once would.
pub trait RenderSink {
    /// Enable or disable soft line wrapping.
    fn set_wrap(&mut self, enabled: bool);

    /// Enable or disable the active-line marker. Disabling removes any marker already placed.
    fn set_active_line_highlight(&mut self, enabled: bool);

    /// Show or hide the line-number gutter.
    fn set_gutter_visible(&mut self, visible: bool);
}

impl<S: RenderSink + ?Sized> RenderSink for Box<S> {
    fn set_wrap(&mut self, enabled: bool) {
        (**self).set_wrap(enabled);
    }

    fn set_active_line_highlight(&mut self, enabled: bool) {
        (**self).set_active_line_highlight(enabled);
    }

    fn set_gutter_visible(&mut self, visible: bool) {
        (**self).set_gutter_visible(visible);
    }
}

/// Lifecycle of an [`EditorInstance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// Registered and receiving option updates.
    Live,
    /// Removed from the registry; further applies are ignored.
    Disposed,
}

/// A handle to one rendering surface.
#[derive(Debug)]
pub struct EditorInstance<S> {
    id: EditorId,
    role: EditorRole,
    sink: S,
    lifecycle: Lifecycle,
    inline_children: Vec<EditorId>,
    applied: Option<PreferenceSnapshot>,
}

impl<S> EditorInstance<S> {
    /// Create a live, not yet configured instance.
    pub fn new(id: EditorId, role: EditorRole, sink: S) -> Self {
        Self {
            id,
            role,
            sink,
            lifecycle: Lifecycle::Live,
            inline_children: Vec::new(),
            applied: None,
        }
    }

    /// A full editor.
    pub fn full(id: EditorId, sink: S) -> Self {
        Self::new(id, EditorRole::Full, sink)
    }

    /// An inline editor nested in `host`.
    pub fn inline(id: EditorId, host: EditorId, sink: S) -> Self {
        Self::new(id, EditorRole::Inline { host }, sink)
    }

    /// Identity.
    pub fn id(&self) -> EditorId {
        self.id
    }

    /// Role tag.
    pub fn role(&self) -> EditorRole {
        self.role
    }

    /// Host back-reference (inline editors only).
    pub fn host(&self) -> Option<EditorId> {
        self.role.host()
    }

    /// Lifecycle state.
    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// Returns `true` once the instance left the registry.
    pub fn is_disposed(&self) -> bool {
        self.lifecycle == Lifecycle::Disposed
    }

    /// Inline editors owned by this (full) editor, in creation order.
    pub fn inline_children(&self) -> &[EditorId] {
        &self.inline_children
    }

    /// The last snapshot pushed into the sink, if any.
    pub fn applied(&self) -> Option<PreferenceSnapshot> {
        self.applied
    }

    /// The rendering sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Mutable access to the rendering sink (caret moves, scrolling, ...).
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Consume the instance and return its sink.
    pub fn into_sink(self) -> S {
        self.sink
    }

    pub(crate) fn record_applied(&mut self, snapshot: PreferenceSnapshot) {
        self.applied = Some(snapshot);
    }

    pub(crate) fn mark_disposed(&mut self) {
        self.lifecycle = Lifecycle::Disposed;
    }

    pub(crate) fn attach_child(&mut self, child: EditorId) {
        if !self.inline_children.contains(&child) {
            self.inline_children.push(child);
        }
    }

    pub(crate) fn detach_child(&mut self, child: EditorId) {
        self.inline_children.retain(|id| *id != child);
    }

    pub(crate) fn take_children(&mut self) -> Vec<EditorId> {
        std::mem::take(&mut self.inline_children)
    }
}
