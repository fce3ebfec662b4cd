//! Error types for preference handling, editor registration and command dispatch.

use crate::instance::EditorId;
use thiserror::Error;

/// Errors raised while resolving a view option identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionError {
    /// The identifier does not name one of the known view options.
    #[error("unknown view option '{0}'")]
    UnknownOption(String),
}

/// Errors raised by [`EditorInstanceRegistry`](crate::EditorInstanceRegistry).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The same editor identity was registered twice.
    #[error("editor {0} is already registered")]
    DuplicateRegistration(EditorId),
    /// An inline editor referenced a host that is not registered.
    #[error("host editor {host} for inline editor {inline} is not registered")]
    HostNotFound {
        /// The inline editor being registered.
        inline: EditorId,
        /// The missing host.
        host: EditorId,
    },
    /// An inline editor referenced a host that is itself an inline editor.
    #[error("host editor {host} for inline editor {inline} is not a full editor")]
    HostNotFull {
        /// The inline editor being registered.
        inline: EditorId,
        /// The offending host.
        host: EditorId,
    },
    /// The editor is not registered.
    #[error("editor {0} is not registered")]
    NotRegistered(EditorId),
    /// A full editor was required.
    #[error("editor {0} is not a full editor")]
    NotFull(EditorId),
}

/// Errors raised by [`OptionSynchronizer`](crate::OptionSynchronizer).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncError {
    /// Registry bookkeeping failed.
    #[error(transparent)]
    Registry(#[from] RegistryError),
    /// A pending creation was completed or cancelled twice.
    #[error("no pending creation for editor {0}")]
    PendingNotFound(EditorId),
}

/// Errors returned from [`CommandDispatcher::execute`](crate::CommandDispatcher::execute).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// No handler is bound to this command id.
    #[error("unknown command '{0}'")]
    UnknownCommand(String),
}

/// Errors raised while loading [`ViewOptionsConfig`](crate::ViewOptionsConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration text is not valid JSON for this schema.
    #[error("invalid view options config: {0}")]
    Parse(#[from] serde_json::Error),
    /// The configuration file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
