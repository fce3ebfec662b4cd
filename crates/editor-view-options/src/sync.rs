//! Option synchronization across every live editor.
//!
//! [`OptionSynchronizer`] is the single owner and writer of the [`PreferenceStore`] and the
//! [`EditorInstanceRegistry`]. It keeps one invariant: every registered editor carries the current
//! snapshot.
//!
//! - A preference change updates the store, then applies the new snapshot to every registered
//!   editor before returning.
//! - A new editor is configured with the current snapshot as part of its registration, before the
//!   host shows it.
//!
//! # Creation while a document loads
//!
//! Hosts that need to wait (document load, layout) before an editor exists use the two-phase form:
//! [`begin_create`](OptionSynchronizer::begin_create) reserves the identity and returns a
//! [`PendingEditor`], and [`complete_create`](OptionSynchronizer::complete_create) registers and
//! configures it once the sink is ready. A `PendingEditor` carries no snapshot: the store is read
//! when the creation completes, so a toggle that lands in between is honored.
//!
//! ```rust
//! use editor_view_options::{EditorId, EditorRole, OptionSynchronizer, RenderSink, ViewOption};
//!
//! #[derive(Default)]
//! struct Wrap(bool);
//!
//! impl RenderSink for Wrap {
//!     fn set_wrap(&mut self, enabled: bool) { self.0 = enabled; }
//!     fn set_active_line_highlight(&mut self, _enabled: bool) {}
//!     fn set_gutter_visible(&mut self, _visible: bool) {}
//! }
//!
//! let mut sync = OptionSynchronizer::new();
//! let pending = sync.begin_create(EditorId::new(1), EditorRole::Full).unwrap();
//!
//! // The document is still loading when the user turns word wrap off.
//! sync.toggle(ViewOption::WordWrap);
//!
//! let id = sync.complete_create(pending, Wrap::default()).unwrap();
//! assert!(!sync.editor(id).unwrap().sink().0);
//! ```

use crate::applier::OptionApplier;
use crate::config::ViewOptionsConfig;
use crate::error::{RegistryError, SyncError};
use crate::instance::{EditorId, EditorInstance, EditorRole, RenderSink};
use crate::option::{PreferenceSnapshot, PreferenceStore, ViewOption};
use crate::registry::EditorInstanceRegistry;
use std::collections::BTreeSet;
use tracing::debug;

/// Notification emitted after a preference change reached every editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreferenceChange {
    /// The option that changed.
    pub option: ViewOption,
    /// Its new value.
    pub value: bool,
    /// The full snapshot after the change.
    pub snapshot: PreferenceSnapshot,
    /// Preference version after the change.
    pub version: u64,
}

/// Preference change callback.
pub type PreferenceChangeCallback = Box<dyn FnMut(&PreferenceChange) + Send>;

/// An editor creation that has started but not finished.
///
/// Obtained from [`OptionSynchronizer::begin_create`]; must be handed back to either
/// [`complete_create`](OptionSynchronizer::complete_create) or
/// [`cancel_create`](OptionSynchronizer::cancel_create).
#[derive(Debug, PartialEq, Eq)]
#[must_use = "a pending editor must be completed or cancelled"]
pub struct PendingEditor {
    id: EditorId,
    role: EditorRole,
}

impl PendingEditor {
    /// Identity reserved for the editor.
    pub fn id(&self) -> EditorId {
        self.id
    }

    /// Role the editor will be registered with.
    pub fn role(&self) -> EditorRole {
        self.role
    }
}

/// Owns the preference store and the editor registry, and keeps them in sync.
pub struct OptionSynchronizer<S> {
    store: PreferenceStore,
    registry: EditorInstanceRegistry<S>,
    applier: OptionApplier,
    pending: BTreeSet<EditorId>,
    version: u64,
    callbacks: Vec<PreferenceChangeCallback>,
}

impl<S> std::fmt::Debug for OptionSynchronizer<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OptionSynchronizer")
            .field("snapshot", &self.store.get())
            .field("editor_count", &self.registry.len())
            .field("pending", &self.pending)
            .field("version", &self.version)
            .field("callback_count", &self.callbacks.len())
            .finish()
    }
}

impl<S: RenderSink> Default for OptionSynchronizer<S> {
    fn default() -> Self {
        Self::with_store(PreferenceStore::default())
    }
}

impl<S: RenderSink> OptionSynchronizer<S> {
    /// Create a synchronizer with built-in defaults and no editors.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a synchronizer around an existing store.
    pub fn with_store(store: PreferenceStore) -> Self {
        Self {
            store,
            registry: EditorInstanceRegistry::new(),
            applier: OptionApplier,
            pending: BTreeSet::new(),
            version: 0,
            callbacks: Vec::new(),
        }
    }

    /// Create a synchronizer seeded from a config.
    pub fn from_config(config: ViewOptionsConfig) -> Self {
        Self::with_store(config.into_store())
    }

    /// The current snapshot.
    pub fn snapshot(&self) -> PreferenceSnapshot {
        self.store.get()
    }

    /// Read-only view of the preference store.
    pub fn store(&self) -> &PreferenceStore {
        &self.store
    }

    /// Read-only view of the registry.
    pub fn registry(&self) -> &EditorInstanceRegistry<S> {
        &self.registry
    }

    /// Preference version; bumped on every effective change.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Number of creations begun but not yet completed or cancelled.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// A registered editor.
    pub fn editor(&self, id: EditorId) -> Option<&EditorInstance<S>> {
        self.registry.get(id)
    }

    /// Mutable access to a registered editor's sink.
    pub fn sink_mut(&mut self, id: EditorId) -> Option<&mut S> {
        self.registry.get_mut(id).map(EditorInstance::sink_mut)
    }

    /// The front-most full editor.
    pub fn active_full_editor(&self) -> Option<EditorId> {
        self.registry.active_full()
    }

    /// Bring a full editor to the front.
    pub fn set_active_full_editor(&mut self, id: EditorId) -> Result<(), SyncError> {
        Ok(self.registry.set_active_full(id)?)
    }

    /// Returns `true` if every registered editor carries the current snapshot.
    pub fn all_current(&self) -> bool {
        let snapshot = self.store.get();
        self.registry
            .all()
            .all(|instance| instance.applied() == Some(snapshot))
    }

    /// Subscribe to preference changes.
    pub fn subscribe<F>(&mut self, callback: F)
    where
        F: FnMut(&PreferenceChange) + Send + 'static,
    {
        self.callbacks.push(Box::new(callback));
    }

    /// Flip `option` and apply the result to every registered editor.
    ///
    /// Returns once all editors are configured.
    pub fn toggle(&mut self, option: ViewOption) -> PreferenceSnapshot {
        let value = !self.store.get().get(option);
        self.change(option, value)
    }

    /// Set `option` to `value`, broadcasting only if the value changed.
    pub fn set(&mut self, option: ViewOption, value: bool) -> PreferenceSnapshot {
        if self.store.get().get(option) == value {
            return self.store.get();
        }
        self.change(option, value)
    }

    fn change(&mut self, option: ViewOption, value: bool) -> PreferenceSnapshot {
        let snapshot = self.store.set(option, value);
        self.version = self.version.saturating_add(1);
        debug!(%option, value, version = self.version, "view option changed");

        self.broadcast(&snapshot);

        let change = PreferenceChange {
            option,
            value,
            snapshot,
            version: self.version,
        };
        for callback in &mut self.callbacks {
            callback(&change);
        }

        snapshot
    }

    fn broadcast(&mut self, snapshot: &PreferenceSnapshot) {
        let applier = self.applier;
        let mut count = 0usize;
        for instance in self.registry.all_mut() {
            applier.apply(instance, snapshot);
            count += 1;
        }
        debug!(editors = count, "view options broadcast");
    }

    /// Register a new editor and configure it with the current snapshot.
    ///
    /// For an inline editor the host must be a registered full editor
    /// ([`RegistryError::HostNotFound`] / [`RegistryError::HostNotFull`] otherwise); if the host
    /// does not carry the current snapshot it is configured before the inline editor.
    pub fn on_create(&mut self, instance: EditorInstance<S>) -> Result<EditorId, SyncError> {
        let id = instance.id();
        if self.pending.contains(&id) {
            return Err(RegistryError::DuplicateRegistration(id).into());
        }

        let host = instance.host();
        self.registry.register(instance)?;
        if let Some(host) = host {
            self.refresh_host(host);
        }

        let snapshot = self.store.get();
        let applier = self.applier;
        if let Some(instance) = self.registry.get_mut(id) {
            applier.apply(instance, &snapshot);
        }

        Ok(id)
    }

    fn refresh_host(&mut self, host: EditorId) {
        let snapshot = self.store.get();
        let applier = self.applier;
        if let Some(host_instance) = self.registry.get_mut(host) {
            if host_instance.applied() != Some(snapshot) {
                applier.apply(host_instance, &snapshot);
            }
        }
    }

    /// Reserve `id` for an editor whose sink is not ready yet.
    ///
    /// The reservation lasts until the returned ticket is completed or cancelled. Dropping the
    /// ticket keeps `id` reserved; [`release_pending`](Self::release_pending) frees it.
    pub fn begin_create(
        &mut self,
        id: EditorId,
        role: EditorRole,
    ) -> Result<PendingEditor, SyncError> {
        if self.registry.contains(id) || self.pending.contains(&id) {
            return Err(RegistryError::DuplicateRegistration(id).into());
        }
        self.pending.insert(id);
        debug!(editor = %id, ?role, "editor creation started");
        Ok(PendingEditor { id, role })
    }

    /// Finish a pending creation: register the editor and configure it with the snapshot that is
    /// current now.
    pub fn complete_create(
        &mut self,
        pending: PendingEditor,
        sink: S,
    ) -> Result<EditorId, SyncError> {
        if !self.pending.remove(&pending.id) {
            return Err(SyncError::PendingNotFound(pending.id));
        }
        self.on_create(EditorInstance::new(pending.id, pending.role, sink))
    }

    /// Abandon a pending creation. Nothing is registered or configured.
    pub fn cancel_create(&mut self, pending: PendingEditor) -> Result<(), SyncError> {
        if !self.pending.remove(&pending.id) {
            return Err(SyncError::PendingNotFound(pending.id));
        }
        debug!(editor = %pending.id, "editor creation cancelled");
        Ok(())
    }

    /// Drop the reservation of `id` when its ticket was lost. Returns whether `id` was pending.
    ///
    /// A ticket for `id` that is still held afterwards fails with [`SyncError::PendingNotFound`].
    pub fn release_pending(&mut self, id: EditorId) -> bool {
        let released = self.pending.remove(&id);
        if released {
            debug!(editor = %id, "pending creation released");
        }
        released
    }

    /// Unregister an editor (and, for a full editor, all of its inline editors).
    ///
    /// Returns the removed instances, children before their host.
    pub fn on_dispose(&mut self, id: EditorId) -> Result<Vec<EditorInstance<S>>, SyncError> {
        Ok(self.registry.unregister(id)?)
    }
}
