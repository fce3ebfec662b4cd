#![warn(missing_docs)]
//! Editor View Surface - headless editor surfaces driven by `editor-view-options`
//!
//! # Overview
//!
//! This crate provides the two collaborators the option synchronizer talks to:
//!
//! - [`Surface`]: a headless rendering surface (soft wrap layout, active-line marker, line-number
//!   gutter, caret geometry) implementing [`RenderSink`](editor_view_options::RenderSink).
//! - [`Workbench`]: a document/view layer that opens documents into full editors, expands inline
//!   editors over a range of another document and closes documents, creating and disposing every
//!   editor through the synchronizer.
//!
//! # Quick Start
//!
//! ```rust
//! use editor_view_options::{CommandDispatcher, TOGGLE_LINE_NUMBERS};
//! use editor_view_surface::Workbench;
//!
//! let mut workbench = Workbench::default()
//!     .with_documents([("main.rs", "fn main() {}\n"), ("lib.rs", "pub mod a;\n")]);
//!
//! let main = workbench.open_document("main.rs").unwrap();
//! workbench.execute(TOGGLE_LINE_NUMBERS).unwrap();
//! assert_eq!(workbench.surface(main).unwrap().gutter().display, "none");
//!
//! // The preference is global: the next document opens with the gutter hidden too.
//! let lib = workbench.open_document("lib.rs").unwrap();
//! assert_eq!(workbench.surface(lib).unwrap().gutter().display, "none");
//! ```

pub mod layout;
pub mod surface;
pub mod workbench;

pub use layout::LineLayout;
pub use surface::{
    ACTIVE_LINE_CLASS, CaretCoords, GutterInfo, LineInfo, Position, Surface, SurfaceConfig,
};
pub use workbench::{InlineSource, PendingOpen, Workbench, WorkbenchError};
