//! Toggle commands.
//!
//! Three fixed command ids are bound to [`OptionSynchronizer::toggle`]. Executing one through
//! [`CommandDispatcher::execute`] returns only after the new value reached every registered
//! editor; the `Ok` value is the completion signal.
//!
//! # Example
//!
//! ```rust
//! use editor_view_options::{
//!     CommandDispatcher, CommandResult, OptionSynchronizer, RenderSink, TOGGLE_WORD_WRAP,
//! };
//!
//! struct NullSink;
//!
//! impl RenderSink for NullSink {
//!     fn set_wrap(&mut self, _enabled: bool) {}
//!     fn set_active_line_highlight(&mut self, _enabled: bool) {}
//!     fn set_gutter_visible(&mut self, _visible: bool) {}
//! }
//!
//! let mut sync: OptionSynchronizer<NullSink> = OptionSynchronizer::new();
//! let result = sync.execute(TOGGLE_WORD_WRAP).unwrap();
//! assert!(matches!(result, CommandResult::Toggled { enabled: false, .. }));
//! ```

use crate::error::CommandError;
use crate::instance::RenderSink;
use crate::option::{PreferenceSnapshot, ViewOption};
use crate::sync::OptionSynchronizer;
use tracing::warn;

/// Toggles soft line wrapping.
pub const TOGGLE_WORD_WRAP: &str = "view.toggleWordWrap";
/// Toggles the active-line highlight.
pub const TOGGLE_ACTIVE_LINE: &str = "view.toggleActiveLine";
/// Toggles the line-number gutter.
pub const TOGGLE_LINE_NUMBERS: &str = "view.toggleLineNumbers";

/// Successful completion of a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandResult {
    /// A view option was toggled and applied to every editor.
    Toggled {
        /// The toggled option.
        option: ViewOption,
        /// Its new value.
        enabled: bool,
        /// Snapshot after the toggle.
        snapshot: PreferenceSnapshot,
    },
}

/// Menu state of a toggle command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandState {
    /// Command id.
    pub id: &'static str,
    /// Menu label.
    pub label: &'static str,
    /// Whether the menu item is checked.
    pub checked: bool,
}

/// Routes command ids to commands and reports completion.
pub trait CommandDispatcher {
    /// Execute `command_id`. Returns once the command fully completed.
    fn execute(&mut self, command_id: &str) -> Result<CommandResult, CommandError>;
}

/// Maps toggle command ids to view options.
#[derive(Debug, Clone, Copy, Default)]
pub struct ToggleCommandBinding;

impl ToggleCommandBinding {
    /// The option toggled by `command_id`, if it is one of the toggle commands.
    pub fn option_for(command_id: &str) -> Option<ViewOption> {
        ViewOption::ALL
            .into_iter()
            .find(|option| option.command_id() == command_id)
    }

    /// All bound command ids.
    pub fn command_ids() -> [&'static str; 3] {
        ViewOption::ALL.map(ViewOption::command_id)
    }

    /// Checked state of every toggle command for `snapshot`.
    pub fn command_states(snapshot: &PreferenceSnapshot) -> Vec<CommandState> {
        snapshot
            .iter()
            .map(|(option, checked)| CommandState {
                id: option.command_id(),
                label: option.label(),
                checked,
            })
            .collect()
    }

    /// Run the toggle bound to `command_id` on `sync`.
    pub fn dispatch<S: RenderSink>(
        sync: &mut OptionSynchronizer<S>,
        command_id: &str,
    ) -> Result<CommandResult, CommandError> {
        let Some(option) = Self::option_for(command_id) else {
            warn!(command = command_id, "no handler bound to command");
            return Err(CommandError::UnknownCommand(command_id.to_string()));
        };

        let snapshot = sync.toggle(option);
        Ok(CommandResult::Toggled {
            option,
            enabled: snapshot.get(option),
            snapshot,
        })
    }
}

impl<S: RenderSink> CommandDispatcher for OptionSynchronizer<S> {
    fn execute(&mut self, command_id: &str) -> Result<CommandResult, CommandError> {
        ToggleCommandBinding::dispatch(self, command_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_command_ids_map_to_options() {
        assert_eq!(
            ToggleCommandBinding::option_for(TOGGLE_WORD_WRAP),
            Some(ViewOption::WordWrap)
        );
        assert_eq!(
            ToggleCommandBinding::option_for(TOGGLE_ACTIVE_LINE),
            Some(ViewOption::ActiveLineHighlight)
        );
        assert_eq!(
            ToggleCommandBinding::option_for(TOGGLE_LINE_NUMBERS),
            Some(ViewOption::LineNumberGutter)
        );
        assert_eq!(ToggleCommandBinding::option_for("file.save"), None);
        assert_eq!(
            ToggleCommandBinding::command_ids(),
            [TOGGLE_WORD_WRAP, TOGGLE_ACTIVE_LINE, TOGGLE_LINE_NUMBERS]
        );
    }

    #[test]
    fn test_command_states_reflect_snapshot() {
        let snapshot =
            PreferenceSnapshot::default().with(ViewOption::ActiveLineHighlight, false);
        let states = ToggleCommandBinding::command_states(&snapshot);
        assert_eq!(
            states,
            vec![
                CommandState {
                    id: TOGGLE_WORD_WRAP,
                    label: "Word Wrap",
                    checked: true,
                },
                CommandState {
                    id: TOGGLE_ACTIVE_LINE,
                    label: "Highlight Active Line",
                    checked: false,
                },
                CommandState {
                    id: TOGGLE_LINE_NUMBERS,
                    label: "Line Numbers",
                    checked: true,
                },
            ]
        );
    }
}
