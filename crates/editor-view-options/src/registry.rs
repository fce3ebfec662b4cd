//! Registry of live editor surfaces.
//!
//! The registry owns every registered [`EditorInstance`]. Full editors own their inline children
//! through [`EditorInstance::inline_children`]; inline editors point back to their host through
//! their [`EditorRole`]. Unregistering a full editor cascades to all of its inline children.
//!
//! Iteration is ordered by [`EditorId`], so broadcasts visit editors in a stable order.

use crate::error::RegistryError;
use crate::instance::{EditorId, EditorInstance, EditorRole};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// The set of live editor instances.
#[derive(Debug)]
pub struct EditorInstanceRegistry<S> {
    instances: BTreeMap<EditorId, EditorInstance<S>>,
    // Full editors in registration order; the last one is front-most.
    full_order: Vec<EditorId>,
}

impl<S> Default for EditorInstanceRegistry<S> {
    fn default() -> Self {
        Self {
            instances: BTreeMap::new(),
            full_order: Vec::new(),
        }
    }
}

impl<S> EditorInstanceRegistry<S> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered instances.
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Returns `true` if `id` is registered.
    pub fn contains(&self, id: EditorId) -> bool {
        self.instances.contains_key(&id)
    }

    /// Look up a registered instance.
    pub fn get(&self, id: EditorId) -> Option<&EditorInstance<S>> {
        self.instances.get(&id)
    }

    /// Look up a registered instance mutably.
    pub fn get_mut(&mut self, id: EditorId) -> Option<&mut EditorInstance<S>> {
        self.instances.get_mut(&id)
    }

    /// Registered ids in iteration order.
    pub fn ids(&self) -> Vec<EditorId> {
        self.instances.keys().copied().collect()
    }

    /// Enumerate registered instances. The iterator is finite and can be restarted by calling
    /// `all()` again.
    pub fn all(&self) -> impl Iterator<Item = &EditorInstance<S>> + '_ {
        self.instances.values()
    }

    /// Enumerate registered instances mutably.
    pub fn all_mut(&mut self) -> impl Iterator<Item = &mut EditorInstance<S>> + '_ {
        self.instances.values_mut()
    }

    /// Inline editors owned by `host` (empty if `host` is unknown or inline).
    pub fn inline_children(&self, host: EditorId) -> &[EditorId] {
        self.instances
            .get(&host)
            .map(|instance| instance.inline_children())
            .unwrap_or(&[])
    }

    /// The front-most full editor.
    pub fn active_full(&self) -> Option<EditorId> {
        self.full_order.last().copied()
    }

    /// Bring a registered full editor to the front.
    pub fn set_active_full(&mut self, id: EditorId) -> Result<(), RegistryError> {
        match self.instances.get(&id) {
            Some(instance) if instance.role().is_full() => {
                self.full_order.retain(|full| *full != id);
                self.full_order.push(id);
                Ok(())
            }
            Some(_) => Err(RegistryError::NotFull(id)),
            None => Err(RegistryError::NotRegistered(id)),
        }
    }

    /// Add an instance.
    ///
    /// A full editor becomes the active one. An inline editor is attached to its host, which must
    /// be a registered full editor.
    pub fn register(&mut self, instance: EditorInstance<S>) -> Result<(), RegistryError> {
        let id = instance.id();
        if self.instances.contains_key(&id) {
            warn!(editor = %id, "duplicate editor registration");
            return Err(RegistryError::DuplicateRegistration(id));
        }

        match instance.role() {
            EditorRole::Full => {
                self.full_order.push(id);
            }
            EditorRole::Inline { host } => {
                let Some(host_instance) = self.instances.get_mut(&host) else {
                    return Err(RegistryError::HostNotFound { inline: id, host });
                };
                if !host_instance.role().is_full() {
                    return Err(RegistryError::HostNotFull { inline: id, host });
                }
                host_instance.attach_child(id);
            }
        }

        debug!(editor = %id, role = ?instance.role(), "editor registered");
        self.instances.insert(id, instance);
        Ok(())
    }

    /// Remove an instance, cascading to its inline children first.
    ///
    /// Returns every removed instance, children before their host, each marked disposed.
    pub fn unregister(&mut self, id: EditorId) -> Result<Vec<EditorInstance<S>>, RegistryError> {
        if !self.instances.contains_key(&id) {
            return Err(RegistryError::NotRegistered(id));
        }

        let mut removed = Vec::new();
        self.unregister_recursive(id, &mut removed);
        debug!(editor = %id, removed = removed.len(), "editor unregistered");
        Ok(removed)
    }

    fn unregister_recursive(&mut self, id: EditorId, removed: &mut Vec<EditorInstance<S>>) {
        let children = match self.instances.get_mut(&id) {
            Some(instance) => instance.take_children(),
            None => return,
        };
        for child in children {
            self.unregister_recursive(child, removed);
        }

        let Some(mut instance) = self.instances.remove(&id) else {
            return;
        };
        match instance.role() {
            EditorRole::Full => self.full_order.retain(|full| *full != id),
            EditorRole::Inline { host } => {
                if let Some(host_instance) = self.instances.get_mut(&host) {
                    host_instance.detach_child(id);
                }
            }
        }
        instance.mark_disposed();
        removed.push(instance);
    }
}
