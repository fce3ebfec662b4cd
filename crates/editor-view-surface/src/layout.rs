//! Soft wrap layout.
//!
//! Cell widths follow UAX #11; a tab advances to the next tab stop. Wrapping prefers the position
//! after the last whitespace in the row and falls back to a character boundary when a row has no
//! whitespace. Double-width characters are never split across rows.

use unicode_width::UnicodeWidthChar;

/// Width in cells of `ch` outside of tab handling.
pub fn char_width(ch: char) -> usize {
    UnicodeWidthChar::width(ch).unwrap_or(1)
}

/// Width in cells of `ch` when it starts at cell `x` of its line.
pub fn cell_width_at(ch: char, x: usize, tab_width: usize) -> usize {
    if ch == '\t' {
        let tab_width = tab_width.max(1);
        tab_width - x % tab_width
    } else {
        char_width(ch)
    }
}

/// Layout of one logical line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LineLayout {
    /// Char index at which each continuation row starts (the first row always starts at 0 and is
    /// not listed).
    pub breaks: Vec<usize>,
}

impl LineLayout {
    /// Lay out `text` into rows of at most `width` cells. `width == 0` or `wrap == false` yields
    /// a single row.
    pub fn compute(text: &str, width: usize, tab_width: usize, wrap: bool) -> Self {
        if !wrap || width == 0 {
            return Self::default();
        }
        Self {
            breaks: wrap_breaks(text, width, tab_width),
        }
    }

    /// Number of visual rows.
    pub fn row_count(&self) -> usize {
        self.breaks.len() + 1
    }

    /// Row containing char `column` and the char index that row starts at.
    pub fn row_of_column(&self, column: usize) -> (usize, usize) {
        let row = self.breaks.partition_point(|start| *start <= column);
        let start = if row == 0 { 0 } else { self.breaks[row - 1] };
        (row, start)
    }
}

fn wrap_breaks(text: &str, width: usize, tab_width: usize) -> Vec<usize> {
    let mut breaks = Vec::new();
    let mut row_start_x = 0usize;
    let mut row_start = 0usize;
    // (char index after the whitespace, line x at that point)
    let mut last_space: Option<(usize, usize)> = None;
    let mut x = 0usize;

    for (index, ch) in text.chars().enumerate() {
        let w = cell_width_at(ch, x, tab_width);

        while x - row_start_x + w > width {
            match last_space {
                Some((at, at_x)) if at > row_start => {
                    breaks.push(at);
                    row_start = at;
                    row_start_x = at_x;
                    last_space = None;
                }
                _ => {
                    if index == row_start {
                        // A single character wider than the row: keep it on its own row.
                        break;
                    }
                    breaks.push(index);
                    row_start = index;
                    row_start_x = x;
                    last_space = None;
                    break;
                }
            }
        }

        x += w;
        if ch.is_whitespace() {
            last_space = Some((index + 1, x));
        }
    }

    breaks
}

/// Cell offset of char `column` from the start of the char range beginning at `from`.
pub fn x_between(text: &str, from: usize, column: usize, tab_width: usize) -> usize {
    let mut x = 0usize;
    let mut x_from = 0usize;
    for (index, ch) in text.chars().enumerate().take(column) {
        if index == from {
            x_from = x;
        }
        x += cell_width_at(ch, x, tab_width);
    }
    if from >= column { 0 } else { x - x_from }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_wrap_is_single_row() {
        let layout = LineLayout::compute(&"x".repeat(500), 80, 4, false);
        assert_eq!(layout.row_count(), 1);
        assert_eq!(layout.row_of_column(400), (0, 0));
    }

    #[test]
    fn test_char_fallback_without_whitespace() {
        let layout = LineLayout::compute("abcdefgh", 3, 4, true);
        assert_eq!(layout.breaks, vec![3, 6]);
        assert_eq!(layout.row_of_column(0), (0, 0));
        assert_eq!(layout.row_of_column(3), (1, 3));
        assert_eq!(layout.row_of_column(7), (2, 6));
    }

    #[test]
    fn test_prefers_word_boundary() {
        let layout = LineLayout::compute("hello world again", 8, 4, true);
        assert_eq!(layout.breaks, vec![6, 12]);
    }

    #[test]
    fn test_exact_fit_does_not_wrap() {
        let layout = LineLayout::compute("abcd", 4, 4, true);
        assert_eq!(layout.row_count(), 1);
    }

    #[test]
    fn test_wide_chars_are_not_split() {
        // Each CJK char is 2 cells: "你好" fills a 4-cell row.
        let layout = LineLayout::compute("你好世界", 5, 4, true);
        assert_eq!(layout.breaks, vec![2]);
    }

    #[test]
    fn test_tab_expands_to_tab_stop() {
        assert_eq!(cell_width_at('\t', 0, 4), 4);
        assert_eq!(cell_width_at('\t', 3, 4), 1);
        assert_eq!(x_between("\tab", 0, 3, 4), 6);
        assert_eq!(x_between("\tab", 1, 3, 4), 2);
    }
}
