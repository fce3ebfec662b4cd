#![warn(missing_docs)]
//! Editor View Options - global display preferences kept in sync across every editor surface
//!
//! # Overview
//!
//! `editor-view-options` keeps three global view options (word wrap, active-line highlight,
//! line-number gutter) applied to every live editor: the full editor of each open document and the
//! inline editors nested inside them. It does not render anything; each editor exposes a
//! [`RenderSink`] that receives three boolean configuration calls.
//!
//! # Guarantees
//!
//! - A new editor is configured with the current snapshot before its host shows it.
//! - A toggle reaches every registered editor, full and inline, before it completes.
//! - Preferences are global: switching or closing documents never resets them.
//! - Closing a full editor also disposes its inline editors.
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  ToggleCommandBinding / CommandDispatcher   │  ← Command ids
//! ├─────────────────────────────────────────────┤
//! │  OptionSynchronizer                         │  ← Sole writer
//! ├──────────────────────┬──────────────────────┤
//! │  PreferenceStore     │  EditorInstance-     │
//! │                      │  Registry            │
//! ├──────────────────────┴──────────────────────┤
//! │  OptionApplier → RenderSink                 │  ← Per-editor configuration
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use editor_view_options::{
//!     CommandDispatcher, EditorId, EditorInstance, OptionSynchronizer, RenderSink,
//!     TOGGLE_LINE_NUMBERS,
//! };
//!
//! #[derive(Default)]
//! struct Gutter(bool);
//!
//! impl RenderSink for Gutter {
//!     fn set_wrap(&mut self, _enabled: bool) {}
//!     fn set_active_line_highlight(&mut self, _enabled: bool) {}
//!     fn set_gutter_visible(&mut self, visible: bool) { self.0 = visible; }
//! }
//!
//! let mut sync = OptionSynchronizer::new();
//! let full = EditorId::new(1);
//! sync.on_create(EditorInstance::full(full, Gutter::default())).unwrap();
//! sync.on_create(EditorInstance::inline(EditorId::new(2), full, Gutter::default())).unwrap();
//! assert!(sync.registry().all().all(|e| e.sink().0));
//!
//! sync.execute(TOGGLE_LINE_NUMBERS).unwrap();
//! assert!(sync.registry().all().all(|e| !e.sink().0));
//! ```
//!
//! # Module Description
//!
//! - [`option`] - view options, snapshots and the preference store
//! - [`instance`] - editor identities, roles and the rendering sink trait
//! - [`registry`] - live editor registry with cascading disposal
//! - [`applier`] - snapshot to sink translation
//! - [`sync`] - the synchronizer
//! - [`commands`] - toggle command ids and dispatch
//! - [`config`] - startup configuration

pub mod applier;
pub mod commands;
pub mod config;
pub mod error;
pub mod instance;
pub mod option;
pub mod registry;
pub mod sync;

pub use applier::OptionApplier;
pub use commands::{
    CommandDispatcher, CommandResult, CommandState, TOGGLE_ACTIVE_LINE, TOGGLE_LINE_NUMBERS,
    TOGGLE_WORD_WRAP, ToggleCommandBinding,
};
pub use config::ViewOptionsConfig;
pub use error::{CommandError, ConfigError, OptionError, RegistryError, SyncError};
pub use instance::{EditorId, EditorInstance, EditorRole, Lifecycle, RenderSink};
pub use option::{PreferenceSnapshot, PreferenceStore, ViewOption};
pub use registry::EditorInstanceRegistry;
pub use sync::{OptionSynchronizer, PendingEditor, PreferenceChange, PreferenceChangeCallback};
