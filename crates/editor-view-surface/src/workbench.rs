//! Documents, full editors and inline editors.
//!
//! The [`Workbench`] is the document/view layer around an [`OptionSynchronizer`]: it keeps an
//! in-memory project, opens documents into full editors, expands inline editors over a line range
//! of another document, and closes documents. Every editor it creates goes through the
//! synchronizer, so it is configured with the current view options before it is returned.
//!
//! Opening is two-phase ([`begin_open`](Workbench::begin_open) then
//! [`finish_open`](Workbench::finish_open)) so hosts can load the document in between;
//! [`open_document`](Workbench::open_document) does both.

use crate::surface::{Surface, SurfaceConfig};
use editor_view_options::{
    CommandDispatcher, CommandError, CommandResult, EditorId, EditorRole, OptionSynchronizer,
    PendingEditor, PreferenceSnapshot, SyncError, ToggleCommandBinding, ViewOptionsConfig,
};
use std::collections::BTreeMap;
use std::ops::Range;
use thiserror::Error;
use tracing::debug;

/// Workbench-level errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkbenchError {
    /// The project has no document at this path.
    #[error("document not found: {0}")]
    DocumentNotFound(String),
    /// The document is not open in a full editor.
    #[error("document is not open: {0}")]
    DocumentNotOpen(String),
    /// The document is already open (or being opened).
    #[error("document is already open: {0}")]
    AlreadyOpen(String),
    /// The editor is not an inline editor.
    #[error("editor {0} is not an inline editor")]
    NotInline(EditorId),
    /// An inline range does not fit in its source document.
    #[error("lines {start}..{end} out of range for {path} ({line_count} lines)")]
    InvalidRange {
        /// Source document.
        path: String,
        /// Requested first line.
        start: usize,
        /// Requested end line (exclusive).
        end: usize,
        /// Lines in the document.
        line_count: usize,
    },
    /// The synchronizer rejected the operation.
    #[error(transparent)]
    Sync(#[from] SyncError),
}

/// A document open that has started but not finished loading.
#[derive(Debug)]
#[must_use = "a pending open must be finished or cancelled"]
pub struct PendingOpen {
    path: String,
    editor: PendingEditor,
}

impl PendingOpen {
    /// Path being opened.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Identity reserved for the full editor.
    pub fn editor_id(&self) -> EditorId {
        self.editor.id()
    }
}

/// Where an inline editor's text came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineSource {
    /// Source document path.
    pub path: String,
    /// Line range shown (exclusive end).
    pub lines: Range<usize>,
}

/// Open documents and their editors.
pub struct Workbench {
    sync: OptionSynchronizer<Surface>,
    surface_config: SurfaceConfig,
    project: BTreeMap<String, String>,
    open: BTreeMap<String, EditorId>,
    opening: BTreeMap<String, EditorId>,
    inline_sources: BTreeMap<EditorId, InlineSource>,
    next_editor_id: u64,
}

impl std::fmt::Debug for Workbench {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Workbench")
            .field("sync", &self.sync)
            .field("document_count", &self.project.len())
            .field("open", &self.open)
            .field("opening", &self.opening)
            .finish()
    }
}

impl Default for Workbench {
    fn default() -> Self {
        Self::new(ViewOptionsConfig::default(), SurfaceConfig::default())
    }
}

impl Workbench {
    /// Create an empty workbench.
    pub fn new(options: ViewOptionsConfig, surface_config: SurfaceConfig) -> Self {
        Self {
            sync: OptionSynchronizer::from_config(options),
            surface_config,
            project: BTreeMap::new(),
            open: BTreeMap::new(),
            opening: BTreeMap::new(),
            inline_sources: BTreeMap::new(),
            next_editor_id: 0,
        }
    }

    /// Add documents to the project.
    pub fn with_documents<I, P, T>(mut self, documents: I) -> Self
    where
        I: IntoIterator<Item = (P, T)>,
        P: Into<String>,
        T: Into<String>,
    {
        for (path, text) in documents {
            self.add_document(path, text);
        }
        self
    }

    /// Add (or replace) a document in the project.
    pub fn add_document(&mut self, path: impl Into<String>, text: impl Into<String>) {
        self.project.insert(path.into(), text.into());
    }

    /// The synchronizer owning all editors.
    pub fn synchronizer(&self) -> &OptionSynchronizer<Surface> {
        &self.sync
    }

    /// Current view options.
    pub fn snapshot(&self) -> PreferenceSnapshot {
        self.sync.snapshot()
    }

    fn allocate_id(&mut self) -> EditorId {
        let id = EditorId::new(self.next_editor_id);
        self.next_editor_id = self.next_editor_id.saturating_add(1);
        id
    }

    /// Start opening `path` into a new full editor.
    ///
    /// `path` stays reserved until the returned [`PendingOpen`] is finished or cancelled. If it
    /// was dropped instead, [`release_open`](Self::release_open) frees the path.
    pub fn begin_open(&mut self, path: &str) -> Result<PendingOpen, WorkbenchError> {
        if !self.project.contains_key(path) {
            return Err(WorkbenchError::DocumentNotFound(path.to_string()));
        }
        if self.open.contains_key(path) || self.opening.contains_key(path) {
            return Err(WorkbenchError::AlreadyOpen(path.to_string()));
        }

        let id = self.allocate_id();
        let editor = self.sync.begin_create(id, EditorRole::Full)?;
        self.opening.insert(path.to_string(), id);
        Ok(PendingOpen {
            path: path.to_string(),
            editor,
        })
    }

    /// Finish opening: build the surface from the document as it is now and register it. The new
    /// editor becomes the current full editor.
    pub fn finish_open(&mut self, pending: PendingOpen) -> Result<EditorId, WorkbenchError> {
        let PendingOpen { path, editor } = pending;
        self.opening.remove(&path);

        let Some(text) = self.project.get(&path) else {
            self.sync.cancel_create(editor)?;
            return Err(WorkbenchError::DocumentNotFound(path));
        };
        let surface = Surface::new(text, self.surface_config);
        let id = self.sync.complete_create(editor, surface)?;
        self.open.insert(path.clone(), id);
        debug!(editor = %id, path = %path, "document opened");
        Ok(id)
    }

    /// Abandon a pending open. No editor is registered.
    pub fn cancel_open(&mut self, pending: PendingOpen) -> Result<(), WorkbenchError> {
        let PendingOpen { path, editor } = pending;
        self.opening.remove(&path);
        self.sync.cancel_create(editor)?;
        debug!(path = %path, "document open cancelled");
        Ok(())
    }

    /// Free `path` after its [`PendingOpen`] was dropped. Returns whether an open was pending.
    pub fn release_open(&mut self, path: &str) -> bool {
        let Some(id) = self.opening.remove(path) else {
            return false;
        };
        self.sync.release_pending(id);
        debug!(editor = %id, path = %path, "pending open released");
        true
    }

    /// Open `path` and bring it to the front. An already open document is only re-focused.
    pub fn open_document(&mut self, path: &str) -> Result<EditorId, WorkbenchError> {
        if let Some(&id) = self.open.get(path) {
            self.sync.set_active_full_editor(id)?;
            return Ok(id);
        }
        let pending = self.begin_open(path)?;
        self.finish_open(pending)
    }

    /// Close the full editor of `path` together with its inline editors.
    pub fn close_document(&mut self, path: &str) -> Result<(), WorkbenchError> {
        let Some(id) = self.open.remove(path) else {
            return Err(WorkbenchError::DocumentNotOpen(path.to_string()));
        };
        for removed in self.sync.on_dispose(id)? {
            self.inline_sources.remove(&removed.id());
        }
        debug!(editor = %id, path = %path, "document closed");
        Ok(())
    }

    /// Expand an inline editor inside `host` showing `lines` of `source_path`.
    pub fn open_inline_editor(
        &mut self,
        host: EditorId,
        source_path: &str,
        lines: Range<usize>,
    ) -> Result<EditorId, WorkbenchError> {
        let Some(text) = self.project.get(source_path) else {
            return Err(WorkbenchError::DocumentNotFound(source_path.to_string()));
        };
        let source = Surface::new(text, self.surface_config);
        let line_count = source.line_count();
        if lines.start >= lines.end || lines.end > line_count {
            return Err(WorkbenchError::InvalidRange {
                path: source_path.to_string(),
                start: lines.start,
                end: lines.end,
                line_count,
            });
        }
        let excerpt: Vec<String> = lines
            .clone()
            .filter_map(|line| source.line_text(line))
            .collect();
        let surface = Surface::new(&excerpt.join("\n"), self.surface_config)
            .with_first_line_number(lines.start + 1);

        let id = self.allocate_id();
        let pending = self.sync.begin_create(id, EditorRole::Inline { host })?;
        let id = self.sync.complete_create(pending, surface)?;
        self.inline_sources.insert(
            id,
            InlineSource {
                path: source_path.to_string(),
                lines,
            },
        );
        debug!(editor = %id, host = %host, source = source_path, "inline editor opened");
        Ok(id)
    }

    /// Collapse a single inline editor.
    pub fn close_inline_editor(&mut self, id: EditorId) -> Result<(), WorkbenchError> {
        if let Some(editor) = self.sync.editor(id) {
            if editor.role().is_full() {
                return Err(WorkbenchError::NotInline(id));
            }
        }
        self.sync.on_dispose(id)?;
        self.inline_sources.remove(&id);
        Ok(())
    }

    /// The full editor of the front-most document.
    pub fn current_full_editor(&self) -> Option<EditorId> {
        self.sync.active_full_editor()
    }

    /// Full editor of an open document.
    pub fn editor_for_path(&self, path: &str) -> Option<EditorId> {
        self.open.get(path).copied()
    }

    /// Inline editors of `host`, in creation order.
    pub fn inline_editors(&self, host: EditorId) -> Vec<EditorId> {
        self.sync.registry().inline_children(host).to_vec()
    }

    /// Source of an inline editor.
    pub fn inline_source(&self, id: EditorId) -> Option<&InlineSource> {
        self.inline_sources.get(&id)
    }

    /// Surface of a live editor.
    pub fn surface(&self, id: EditorId) -> Option<&Surface> {
        self.sync.editor(id).map(|editor| editor.sink())
    }

    /// Mutable surface of a live editor.
    pub fn surface_mut(&mut self, id: EditorId) -> Option<&mut Surface> {
        self.sync.sink_mut(id)
    }
}

impl CommandDispatcher for Workbench {
    fn execute(&mut self, command_id: &str) -> Result<CommandResult, CommandError> {
        ToggleCommandBinding::dispatch(&mut self.sync, command_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn workbench() -> Workbench {
        Workbench::default().with_documents([
            ("a.txt", "alpha\nbeta\ngamma"),
            ("b.txt", "one\ntwo"),
        ])
    }

    #[test]
    fn test_open_unknown_document() {
        let mut wb = workbench();
        assert_eq!(
            wb.open_document("missing.txt"),
            Err(WorkbenchError::DocumentNotFound("missing.txt".to_string()))
        );
    }

    #[test]
    fn test_reopen_refocuses_existing_editor() {
        let mut wb = workbench();
        let a = wb.open_document("a.txt").unwrap();
        let b = wb.open_document("b.txt").unwrap();
        assert_eq!(wb.current_full_editor(), Some(b));

        assert_eq!(wb.open_document("a.txt").unwrap(), a);
        assert_eq!(wb.current_full_editor(), Some(a));
        assert_eq!(wb.synchronizer().registry().len(), 2);
    }

    #[test]
    fn test_begin_open_twice_is_rejected() {
        let mut wb = workbench();
        let pending = wb.begin_open("a.txt").unwrap();
        assert_eq!(
            wb.begin_open("a.txt").unwrap_err(),
            WorkbenchError::AlreadyOpen("a.txt".to_string())
        );
        wb.cancel_open(pending).unwrap();
        assert!(wb.open_document("a.txt").is_ok());
    }

    #[test]
    fn test_inline_range_is_validated() {
        let mut wb = workbench();
        let host = wb.open_document("a.txt").unwrap();
        assert_eq!(
            wb.open_inline_editor(host, "b.txt", 1..5),
            Err(WorkbenchError::InvalidRange {
                path: "b.txt".to_string(),
                start: 1,
                end: 5,
                line_count: 2,
            })
        );

        let inline = wb.open_inline_editor(host, "a.txt", 1..3).unwrap();
        assert_eq!(wb.surface(inline).unwrap().text(), "beta\ngamma");
        assert_eq!(
            wb.inline_source(inline),
            Some(&InlineSource {
                path: "a.txt".to_string(),
                lines: 1..3,
            })
        );
    }

    #[test]
    fn test_inline_editor_needs_full_host() {
        let mut wb = workbench();
        let host = wb.open_document("a.txt").unwrap();
        let inline = wb.open_inline_editor(host, "b.txt", 0..1).unwrap();
        assert!(matches!(
            wb.open_inline_editor(inline, "b.txt", 0..1),
            Err(WorkbenchError::Sync(_))
        ));
    }

    #[test]
    fn test_close_inline_editor_keeps_host() {
        let mut wb = workbench();
        let host = wb.open_document("a.txt").unwrap();
        let inline = wb.open_inline_editor(host, "b.txt", 0..2).unwrap();

        wb.close_inline_editor(inline).unwrap();
        assert!(wb.inline_editors(host).is_empty());
        assert!(wb.surface(host).is_some());
        assert!(wb.inline_source(inline).is_none());
    }

    #[test]
    fn test_close_inline_editor_rejects_full_editor() {
        let mut wb = workbench();
        let host = wb.open_document("a.txt").unwrap();
        let inline = wb.open_inline_editor(host, "b.txt", 0..2).unwrap();

        assert_eq!(
            wb.close_inline_editor(host),
            Err(WorkbenchError::NotInline(host))
        );
        assert!(wb.surface(host).is_some());
        assert_eq!(wb.inline_editors(host), vec![inline]);
        assert!(wb.inline_source(inline).is_some());
        assert_eq!(wb.editor_for_path("a.txt"), Some(host));
        assert_eq!(wb.open_document("a.txt"), Ok(host));
    }

    #[test]
    fn test_release_open_after_dropped_pending_open() {
        let mut wb = workbench();
        drop(wb.begin_open("a.txt").unwrap());
        assert_eq!(
            wb.open_document("a.txt"),
            Err(WorkbenchError::AlreadyOpen("a.txt".to_string()))
        );

        assert!(wb.release_open("a.txt"));
        assert!(!wb.release_open("a.txt"));
        assert_eq!(wb.synchronizer().pending_count(), 0);

        let id = wb.open_document("a.txt").unwrap();
        assert_eq!(wb.editor_for_path("a.txt"), Some(id));
    }
}
