//! Headless editor surface.
//!
//! A [`Surface`] holds text, a caret and the three view flags, and answers the geometry queries a
//! renderer would: caret coordinates, per-line wrap class and gutter state. It implements
//! [`RenderSink`] so [`OptionSynchronizer`](editor_view_options::OptionSynchronizer) can configure
//! it.
//!
//! # Example
//!
//! ```rust
//! use editor_view_options::RenderSink;
//! use editor_view_surface::{Surface, SurfaceConfig, ACTIVE_LINE_CLASS};
//!
//! let config = SurfaceConfig { viewport_width: 10, ..SurfaceConfig::default() };
//! let mut surface = Surface::new("short\na line that wraps twice\n", config);
//! surface.set_wrap(true);
//! surface.set_active_line_highlight(true);
//!
//! surface.set_caret(1, 0);
//! let first = surface.caret_coords().bottom;
//! surface.set_caret(1, 20);
//! assert!(first < surface.caret_coords().bottom);
//! assert_eq!(surface.line_info(1).unwrap().wrap_class, Some(ACTIVE_LINE_CLASS));
//! ```

use crate::layout::{LineLayout, x_between};
use editor_view_options::RenderSink;
use ropey::Rope;
use serde::{Deserialize, Serialize};

/// Wrap class placed on the line that holds the caret while the highlight is on.
pub const ACTIVE_LINE_CLASS: &str = "active-line";

/// Geometry settings of a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SurfaceConfig {
    /// Text area width in cells (gutter excluded).
    pub viewport_width: usize,
    /// Height of one visual row, in local units.
    pub line_height: usize,
    /// Tab stop distance in cells.
    pub tab_width: usize,
    /// Cells added around line numbers when the gutter is visible.
    pub gutter_padding: usize,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            viewport_width: 80,
            line_height: 16,
            tab_width: 4,
            gutter_padding: 1,
        }
    }
}

impl SurfaceConfig {
    /// Parse a config from JSON; missing keys keep their defaults.
    pub fn from_json_str(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

/// Logical caret position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    /// Zero-based line.
    pub line: usize,
    /// Zero-based column, in chars.
    pub column: usize,
}

impl Position {
    /// Create a new position.
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Caret rectangle in local coordinates (relative to the top-left of the text area).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaretCoords {
    /// Top edge.
    pub top: usize,
    /// Bottom edge.
    pub bottom: usize,
    /// Cell offset within the visual row.
    pub left: usize,
}

/// Per-line rendering information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineInfo {
    /// Zero-based line.
    pub line: usize,
    /// Line text without the line break.
    pub text: String,
    /// Style class applied to the whole line, if any.
    pub wrap_class: Option<&'static str>,
}

/// Line-number gutter state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GutterInfo {
    /// Whether the gutter is shown.
    pub visible: bool,
    /// Width in cells (0 when hidden).
    pub width: usize,
    /// Display style: `""` when shown, `"none"` when hidden.
    pub display: &'static str,
}

/// A headless rendering surface.
#[derive(Debug, Clone)]
pub struct Surface {
    text: Rope,
    config: SurfaceConfig,
    first_line_number: usize,
    caret: Position,
    wrap: bool,
    active_line_highlight: bool,
    gutter_visible: bool,
    active_line_marker: Option<usize>,
    layouts: Vec<LineLayout>,
}

impl Surface {
    /// Create a surface over `text`. All view flags start off until configured.
    pub fn new(text: &str, config: SurfaceConfig) -> Self {
        let mut surface = Self {
            text: Rope::from_str(text),
            config,
            first_line_number: 1,
            caret: Position::default(),
            wrap: false,
            active_line_highlight: false,
            gutter_visible: false,
            active_line_marker: None,
            layouts: Vec::new(),
        };
        surface.relayout();
        surface
    }

    /// Number shown in the gutter for line 0 (inline editors show their source line numbers).
    pub fn with_first_line_number(mut self, number: usize) -> Self {
        self.first_line_number = number;
        self
    }

    /// Geometry settings.
    pub fn config(&self) -> &SurfaceConfig {
        &self.config
    }

    /// Full text.
    pub fn text(&self) -> String {
        self.text.to_string()
    }

    /// Number of logical lines.
    pub fn line_count(&self) -> usize {
        self.text.len_lines()
    }

    /// Text of `line` without its line break.
    pub fn line_text(&self, line: usize) -> Option<String> {
        if line >= self.line_count() {
            return None;
        }
        let mut text = self.text.line(line).to_string();
        while text.ends_with('\n') || text.ends_with('\r') {
            text.pop();
        }
        Some(text)
    }

    fn line_char_len(&self, line: usize) -> usize {
        self.line_text(line)
            .map(|text| text.chars().count())
            .unwrap_or(0)
    }

    /// Change the text area width.
    pub fn set_viewport_width(&mut self, width: usize) {
        if self.config.viewport_width != width {
            self.config.viewport_width = width;
            self.relayout();
        }
    }

    fn relayout(&mut self) {
        let width = self.config.viewport_width;
        let tab_width = self.config.tab_width;
        let wrap = self.wrap;
        self.layouts = (0..self.line_count())
            .map(|line| {
                let text = self.line_text(line).unwrap_or_default();
                LineLayout::compute(&text, width, tab_width, wrap)
            })
            .collect();
    }

    /// Caret position.
    pub fn caret(&self) -> Position {
        self.caret
    }

    /// Move the caret, clamping into the document. The active-line marker follows it.
    pub fn set_caret(&mut self, line: usize, column: usize) {
        let line = line.min(self.line_count().saturating_sub(1));
        let column = column.min(self.line_char_len(line));
        self.caret = Position::new(line, column);
        if self.active_line_highlight {
            self.active_line_marker = Some(line);
        }
    }

    /// Total visual rows under the current layout.
    pub fn visual_line_count(&self) -> usize {
        self.layouts.iter().map(LineLayout::row_count).sum()
    }

    /// Caret rectangle in local coordinates.
    pub fn caret_coords(&self) -> CaretCoords {
        let Position { line, column } = self.caret;
        let rows_before: usize = self
            .layouts
            .iter()
            .take(line)
            .map(LineLayout::row_count)
            .sum();
        let (row_in_line, row_start) = self
            .layouts
            .get(line)
            .map(|layout| layout.row_of_column(column))
            .unwrap_or((0, 0));
        let left = self
            .line_text(line)
            .map(|text| x_between(&text, row_start, column, self.config.tab_width))
            .unwrap_or(0);

        let row = rows_before + row_in_line;
        CaretCoords {
            top: row * self.config.line_height,
            bottom: (row + 1) * self.config.line_height,
            left,
        }
    }

    /// Rendering information for `line`.
    pub fn line_info(&self, line: usize) -> Option<LineInfo> {
        let text = self.line_text(line)?;
        let wrap_class = (self.active_line_marker == Some(line)).then_some(ACTIVE_LINE_CLASS);
        Some(LineInfo {
            line,
            text,
            wrap_class,
        })
    }

    /// Line carrying the active-line marker.
    pub fn active_line_marker(&self) -> Option<usize> {
        self.active_line_marker
    }

    /// Gutter state.
    pub fn gutter(&self) -> GutterInfo {
        if !self.gutter_visible {
            return GutterInfo {
                visible: false,
                width: 0,
                display: "none",
            };
        }
        let last_number = self.first_line_number + self.line_count().saturating_sub(1);
        let digits = last_number.max(1).to_string().len();
        GutterInfo {
            visible: true,
            width: digits + self.config.gutter_padding,
            display: "",
        }
    }

    /// Whether soft wrapping is on.
    pub fn is_wrapping(&self) -> bool {
        self.wrap
    }

    /// Whether the active-line highlight is on.
    pub fn is_active_line_highlighted(&self) -> bool {
        self.active_line_highlight
    }

    /// Whether the gutter is shown.
    pub fn is_gutter_visible(&self) -> bool {
        self.gutter_visible
    }
}

impl RenderSink for Surface {
    fn set_wrap(&mut self, enabled: bool) {
        if self.wrap != enabled {
            self.wrap = enabled;
            self.relayout();
        }
    }

    fn set_active_line_highlight(&mut self, enabled: bool) {
        self.active_line_highlight = enabled;
        self.active_line_marker = enabled.then_some(self.caret.line);
    }

    fn set_gutter_visible(&mut self, visible: bool) {
        self.gutter_visible = visible;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn narrow() -> SurfaceConfig {
        SurfaceConfig {
            viewport_width: 10,
            ..SurfaceConfig::default()
        }
    }

    #[test]
    fn test_wrap_toggle_changes_caret_rows() {
        let mut surface = Surface::new("0123456789abcdefghij\nnext", narrow());
        surface.set_caret(0, 15);
        assert_eq!(surface.caret_coords().top, 0);

        surface.set_wrap(true);
        assert_eq!(surface.caret_coords().top, 16);
        assert_eq!(surface.caret_coords().left, 5);
        assert_eq!(surface.visual_line_count(), 3);

        surface.set_wrap(false);
        assert_eq!(surface.caret_coords().bottom, 16);
        assert_eq!(surface.visual_line_count(), 2);
    }

    #[test]
    fn test_active_line_marker_follows_caret_and_clears() {
        let mut surface = Surface::new("a\nb\nc", narrow());
        surface.set_active_line_highlight(true);
        assert_eq!(surface.active_line_marker(), Some(0));

        surface.set_caret(2, 0);
        assert_eq!(surface.line_info(2).unwrap().wrap_class, Some(ACTIVE_LINE_CLASS));
        assert_eq!(surface.line_info(0).unwrap().wrap_class, None);

        surface.set_active_line_highlight(false);
        assert_eq!(surface.line_info(2).unwrap().wrap_class, None);

        surface.set_caret(1, 0);
        assert_eq!(surface.active_line_marker(), None);
    }

    #[test]
    fn test_gutter_hidden_has_no_width_and_keeps_layout() {
        let text = "x".repeat(25);
        let mut surface = Surface::new(&text, narrow());
        surface.set_wrap(true);
        surface.set_gutter_visible(true);
        let rows_with_gutter = surface.visual_line_count();
        assert_eq!(
            surface.gutter(),
            GutterInfo {
                visible: true,
                width: 2,
                display: "",
            }
        );

        surface.set_gutter_visible(false);
        assert_eq!(surface.gutter().display, "none");
        assert_eq!(surface.gutter().width, 0);
        assert_eq!(surface.visual_line_count(), rows_with_gutter);
    }

    #[test]
    fn test_gutter_width_uses_first_line_number() {
        let mut surface = Surface::new("a\nb", narrow()).with_first_line_number(99);
        surface.set_gutter_visible(true);
        // Lines are numbered 99 and 100.
        assert_eq!(surface.gutter().width, 4);
    }

    #[test]
    fn test_caret_is_clamped() {
        let mut surface = Surface::new("abc\nde", narrow());
        surface.set_caret(10, 10);
        assert_eq!(surface.caret(), Position::new(1, 2));
    }

    #[test]
    fn test_config_json_defaults() {
        let config = SurfaceConfig::from_json_str(r#"{"viewportWidth": 40}"#).unwrap();
        assert_eq!(config.viewport_width, 40);
        assert_eq!(config.line_height, 16);
        assert_eq!(config.tab_width, 4);
    }
}
