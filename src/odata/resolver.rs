//! Shared collaborators of a query tree.

use std::fmt;
use std::sync::Arc;

use crate::odata::codec::Codec;
use crate::odata::registry::EntityRegistry;
use crate::odata::transport::Transport;

/// Bundles the transport, codec and entity registry used by every node of a
/// query tree.
///
/// Cloning is cheap; all collaborators are reference counted and shared
/// read-only by concurrent requests.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use odata_client::ODataConfig;
/// use odata_client::clients::HttpClient;
/// use odata_client::config::ServiceRoot;
/// use odata_client::odata::{DependencyResolver, EntityRegistry, JsonCodec};
///
/// let config = ODataConfig::builder()
///     .service_root(ServiceRoot::new("https://outlook.office365.com/api/v1.0").unwrap())
///     .build()
///     .unwrap();
///
/// let resolver = DependencyResolver::new(
///     Arc::new(HttpClient::new(&config)),
///     Arc::new(JsonCodec),
///     EntityRegistry::standard(),
/// );
/// assert_eq!(resolver.registry().len(), 4);
/// ```
#[derive(Clone)]
pub struct DependencyResolver {
    transport: Arc<dyn Transport>,
    codec: Arc<dyn Codec>,
    registry: Arc<EntityRegistry>,
}

// Verify DependencyResolver is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<DependencyResolver>();
};

impl DependencyResolver {
    /// Creates a resolver from its three collaborators.
    #[must_use]
    pub fn new(
        transport: Arc<dyn Transport>,
        codec: Arc<dyn Codec>,
        registry: EntityRegistry,
    ) -> Self {
        Self {
            transport,
            codec,
            registry: Arc::new(registry),
        }
    }

    /// Returns the transport that executes composed requests.
    #[must_use]
    pub fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }

    /// Returns the payload codec.
    #[must_use]
    pub fn codec(&self) -> &dyn Codec {
        self.codec.as_ref()
    }

    /// Returns the entity registry.
    #[must_use]
    pub fn registry(&self) -> &EntityRegistry {
        &self.registry
    }
}

impl fmt::Debug for DependencyResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependencyResolver")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}
