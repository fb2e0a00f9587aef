//! Registry mapping entity types to their single-item query factories.
//!
//! Narrowing a collection to one element by key needs to construct the
//! single-item query node for the collection's entity type. The registry is
//! consulted at that moment; an unregistered type is an internal
//! configuration error rather than a caller mistake.
//!
//! Registration is explicit and happens once, before a registry is handed to
//! a [`DependencyResolver`](crate::odata::DependencyResolver). Afterwards the
//! registry is read-only.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;

use crate::odata::entity::{EntityQuery, ODataEntity};
use crate::odata::errors::ODataError;
use crate::odata::path::PathNode;

/// Constructs the single-item query node for `T` as a child of `parent`.
pub type EntityQueryFactory<T> = fn(Box<dyn PathNode>) -> EntityQuery<T>;

struct Registration {
    entity: &'static str,
    // Always an `EntityQueryFactory<T>` for the `TypeId` it is stored under.
    factory: Box<dyn Any + Send + Sync>,
}

/// Maps entity types to the factory of their single-item query node.
///
/// # Example
///
/// ```rust
/// use odata_client::mail::{Folder, Message};
/// use odata_client::odata::EntityRegistry;
///
/// let registry = EntityRegistry::new().with::<Message>();
///
/// assert!(registry.is_registered::<Message>());
/// assert!(registry.resolve::<Folder>().is_err());
/// ```
#[derive(Default)]
pub struct EntityRegistry {
    entries: HashMap<TypeId, Registration>,
}

impl EntityRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the default single-item query for `T`.
    ///
    /// Registering the same type twice replaces the earlier entry.
    pub fn register<T: ODataEntity>(&mut self) -> &mut Self {
        self.register_with::<T>(EntityQuery::from_parent)
    }

    /// Registers a custom factory for `T`.
    pub fn register_with<T: ODataEntity>(&mut self, factory: EntityQueryFactory<T>) -> &mut Self {
        self.entries.insert(
            TypeId::of::<T>(),
            Registration {
                entity: T::NAME,
                factory: Box::new(factory),
            },
        );
        self
    }

    /// Builder-style variant of [`register`](Self::register).
    #[must_use]
    pub fn with<T: ODataEntity>(mut self) -> Self {
        self.register::<T>();
        self
    }

    /// Looks up the single-item query factory for `T`.
    ///
    /// # Errors
    ///
    /// Returns [`ODataError::MissingRegistration`] if `T` was never registered.
    pub fn resolve<T: ODataEntity>(&self) -> Result<EntityQueryFactory<T>, ODataError> {
        let factory = self
            .entries
            .get(&TypeId::of::<T>())
            .and_then(|entry| entry.factory.downcast_ref::<EntityQueryFactory<T>>())
            .copied();

        factory.ok_or_else(|| {
            tracing::error!(
                "No single-item query registered for entity type {}",
                T::NAME
            );
            ODataError::MissingRegistration { entity: T::NAME }
        })
    }

    /// Returns `true` if `T` has a registered factory.
    #[must_use]
    pub fn is_registered<T: ODataEntity>(&self) -> bool {
        self.entries.contains_key(&TypeId::of::<T>())
    }

    /// Fails unless `T` is registered.
    ///
    /// # Errors
    ///
    /// Returns [`ODataError::MissingRegistration`] if `T` was never registered.
    pub fn ensure_registered<T: ODataEntity>(&self) -> Result<(), ODataError> {
        if self.is_registered::<T>() {
            Ok(())
        } else {
            Err(ODataError::MissingRegistration { entity: T::NAME })
        }
    }

    /// Returns the number of registered entity types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the names of all registered entity types, sorted.
    #[must_use]
    pub fn entity_names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> =
            self.entries.values().map(|entry| entry.entity).collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for EntityRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityRegistry")
            .field("entities", &self.entity_names())
            .finish()
    }
}

// Verify EntityRegistry is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<EntityRegistry>();
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::odata::testing::{resolver_with, Note, RecordingTransport, Tag};
    use std::sync::Arc;

    #[test]
    fn test_resolve_registered_type() {
        let registry = EntityRegistry::new().with::<Note>();
        assert!(registry.resolve::<Note>().is_ok());
        assert!(registry.is_registered::<Note>());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_resolve_unregistered_type_is_configuration_error() {
        let registry = EntityRegistry::new().with::<Note>();

        match registry.resolve::<Tag>() {
            Err(ODataError::MissingRegistration { entity }) => assert_eq!(entity, "Tag"),
            Err(other) => panic!("Expected MissingRegistration, got: {other:?}"),
            Ok(_) => panic!("Expected MissingRegistration, got a factory"),
        }
        assert!(registry.ensure_registered::<Tag>().is_err());
    }

    #[test]
    fn test_custom_factory_is_used() {
        fn drafts(parent: Box<dyn PathNode>) -> EntityQuery<Note> {
            EntityQuery::new("Draft", parent)
        }

        let mut registry = EntityRegistry::new();
        registry.register_with::<Note>(drafts);

        let resolver = resolver_with(Arc::new(RecordingTransport::new()), EntityRegistry::new());
        let root = crate::odata::EntryPoint::new(resolver);
        let factory = registry.resolve::<Note>().unwrap();
        let query = factory(Box::new(root));

        assert_eq!(query.request_path(), "Draft");
    }

    #[test]
    fn test_entity_names_are_sorted() {
        let registry = EntityRegistry::new().with::<Tag>().with::<Note>();
        assert_eq!(registry.entity_names(), vec!["Note", "Tag"]);
        assert!(!registry.is_empty());
        assert!(EntityRegistry::new().is_empty());
    }
}
