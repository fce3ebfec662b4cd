//! View options and the process-wide preference store.
//!
//! The option set is closed: [`ViewOption`] has exactly three variants and every
//! [`PreferenceSnapshot`] carries a value for each of them. Adding an option is a code change.

use crate::error::OptionError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A boolean display preference applied uniformly to every editor surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ViewOption {
    /// Soft line wrapping.
    #[serde(rename = "wordWrap")]
    WordWrap,
    /// Highlight of the line containing the caret.
    #[serde(rename = "styleActiveLine")]
    ActiveLineHighlight,
    /// Line-number gutter visibility.
    #[serde(rename = "showLineNumbers")]
    LineNumberGutter,
}

impl ViewOption {
    /// All options, in a fixed order.
    pub const ALL: [ViewOption; 3] = [
        ViewOption::WordWrap,
        ViewOption::ActiveLineHighlight,
        ViewOption::LineNumberGutter,
    ];

    /// Stable preference key, also used as the JSON field name.
    pub fn preference_key(self) -> &'static str {
        match self {
            ViewOption::WordWrap => "wordWrap",
            ViewOption::ActiveLineHighlight => "styleActiveLine",
            ViewOption::LineNumberGutter => "showLineNumbers",
        }
    }

    /// Id of the command that toggles this option.
    pub fn command_id(self) -> &'static str {
        match self {
            ViewOption::WordWrap => crate::commands::TOGGLE_WORD_WRAP,
            ViewOption::ActiveLineHighlight => crate::commands::TOGGLE_ACTIVE_LINE,
            ViewOption::LineNumberGutter => crate::commands::TOGGLE_LINE_NUMBERS,
        }
    }

    /// Menu label.
    pub fn label(self) -> &'static str {
        match self {
            ViewOption::WordWrap => "Word Wrap",
            ViewOption::ActiveLineHighlight => "Highlight Active Line",
            ViewOption::LineNumberGutter => "Line Numbers",
        }
    }

    /// Built-in default value.
    pub fn default_value(self) -> bool {
        true
    }
}

impl fmt::Display for ViewOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.preference_key())
    }
}

impl FromStr for ViewOption {
    type Err = OptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ViewOption::ALL
            .into_iter()
            .find(|option| option.preference_key() == s)
            .ok_or_else(|| OptionError::UnknownOption(s.to_string()))
    }
}

/// The complete set of view option values at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct PreferenceSnapshot {
    /// Soft line wrapping.
    #[serde(rename = "wordWrap")]
    pub word_wrap: bool,
    /// Active line highlight.
    #[serde(rename = "styleActiveLine")]
    pub active_line_highlight: bool,
    /// Line-number gutter.
    #[serde(rename = "showLineNumbers")]
    pub line_number_gutter: bool,
}

impl PreferenceSnapshot {
    /// Value of `option` in this snapshot.
    pub fn get(&self, option: ViewOption) -> bool {
        match option {
            ViewOption::WordWrap => self.word_wrap,
            ViewOption::ActiveLineHighlight => self.active_line_highlight,
            ViewOption::LineNumberGutter => self.line_number_gutter,
        }
    }

    /// A copy of this snapshot with exactly `option` replaced.
    pub fn with(mut self, option: ViewOption, value: bool) -> Self {
        match option {
            ViewOption::WordWrap => self.word_wrap = value,
            ViewOption::ActiveLineHighlight => self.active_line_highlight = value,
            ViewOption::LineNumberGutter => self.line_number_gutter = value,
        }
        self
    }

    /// Iterate `(option, value)` pairs in [`ViewOption::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (ViewOption, bool)> + '_ {
        ViewOption::ALL
            .into_iter()
            .map(move |option| (option, self.get(option)))
    }
}

impl Default for PreferenceSnapshot {
    fn default() -> Self {
        Self {
            word_wrap: ViewOption::WordWrap.default_value(),
            active_line_highlight: ViewOption::ActiveLineHighlight.default_value(),
            line_number_gutter: ViewOption::LineNumberGutter.default_value(),
        }
    }
}

impl std::ops::Index<ViewOption> for PreferenceSnapshot {
    type Output = bool;

    fn index(&self, option: ViewOption) -> &bool {
        match option {
            ViewOption::WordWrap => &self.word_wrap,
            ViewOption::ActiveLineHighlight => &self.active_line_highlight,
            ViewOption::LineNumberGutter => &self.line_number_gutter,
        }
    }
}

/// Holds the authoritative snapshot and the defaults it started from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreferenceStore {
    current: PreferenceSnapshot,
    defaults: PreferenceSnapshot,
}

impl PreferenceStore {
    /// Create a store populated with `defaults`.
    pub fn new(defaults: PreferenceSnapshot) -> Self {
        Self {
            current: defaults,
            defaults,
        }
    }

    /// The current snapshot.
    pub fn get(&self) -> PreferenceSnapshot {
        self.current
    }

    /// Set one option and return the resulting snapshot.
    pub fn set(&mut self, option: ViewOption, value: bool) -> PreferenceSnapshot {
        self.current = self.current.with(option, value);
        self.current
    }

    /// The snapshot the store was created with.
    pub fn defaults(&self) -> PreferenceSnapshot {
        self.defaults
    }

    /// Whether `option` currently holds its default value.
    pub fn is_default(&self, option: ViewOption) -> bool {
        self.current.get(option) == self.defaults.get(option)
    }
}

impl Default for PreferenceStore {
    fn default() -> Self {
        Self::new(PreferenceSnapshot::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_all_on() {
        let store = PreferenceStore::default();
        for (option, value) in store.get().iter() {
            assert!(value, "{option} should default to on");
            assert!(store.is_default(option));
        }
    }

    #[test]
    fn test_set_touches_only_named_option() {
        let mut store = PreferenceStore::default();
        let snapshot = store.set(ViewOption::ActiveLineHighlight, false);

        assert!(snapshot.word_wrap);
        assert!(!snapshot.active_line_highlight);
        assert!(snapshot.line_number_gutter);
        assert_eq!(store.get(), snapshot);
        assert!(!store.is_default(ViewOption::ActiveLineHighlight));
        assert_eq!(store.defaults(), PreferenceSnapshot::default());
    }

    #[test]
    fn test_index_matches_get() {
        let snapshot = PreferenceSnapshot::default().with(ViewOption::LineNumberGutter, false);
        for option in ViewOption::ALL {
            assert_eq!(snapshot[option], snapshot.get(option));
        }
    }

    #[test]
    fn test_parse_preference_keys() {
        assert_eq!(
            "styleActiveLine".parse::<ViewOption>(),
            Ok(ViewOption::ActiveLineHighlight)
        );
        assert_eq!(
            "closeBrackets".parse::<ViewOption>(),
            Err(OptionError::UnknownOption("closeBrackets".to_string()))
        );
    }

    #[test]
    fn test_snapshot_json_uses_preference_keys() {
        let snapshot = PreferenceSnapshot::default().with(ViewOption::WordWrap, false);
        let json = serde_json::to_value(snapshot).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "wordWrap": false,
                "styleActiveLine": true,
                "showLineNumbers": true,
            })
        );
    }
}
