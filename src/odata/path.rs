//! Path composition along a chain of query nodes.
//!
//! Every node of a query tree contributes one segment. Executing an
//! operation on a leaf composes the full request path by walking towards the
//! root, each node prepending its own segment, and the root finally hands the
//! composed request to the [`Transport`](crate::odata::Transport).
//!
//! Children own their parent (`Box<dyn PathNode>`), so a node is built by
//! consuming the node it navigates from, and the chain is acyclic by
//! construction.
//!
//! # Example
//!
//! ```rust,ignore
//! // Composes "Me/Folders('Inbox')/Messages?&$top=10"
//! let messages = EntryPoint::new(resolver)
//!     .me()
//!     .folders()
//!     .get_by_key("Inbox")?
//!     .messages()
//!     .top(10);
//! ```

use crate::clients::HttpMethod;
use crate::odata::collection::ODataCollection;
use crate::odata::entity::{EntityQuery, ODataEntity};
use crate::odata::errors::ODataError;
use crate::odata::resolver::DependencyResolver;
use crate::odata::transport::BoxFuture;

/// A node in a query tree.
///
/// Implementors provide their own segment and a link to their parent; path
/// composition and execution are supplied by the default methods.
pub trait PathNode: Send + Sync {
    /// Prepends this node's segment to `remaining`, the path already composed
    /// by descendants.
    fn append_segment(&self, remaining: String) -> String;

    /// Returns the parent node, or `None` for the root.
    fn parent(&self) -> Option<&dyn PathNode>;

    /// Returns the collaborators shared by the whole tree.
    fn resolver(&self) -> &DependencyResolver;

    /// Composes the full request path for `remaining` without executing it.
    fn compose_path(&self, remaining: String) -> String {
        let path = self.append_segment(remaining);
        match self.parent() {
            Some(parent) => parent.compose_path(path),
            None => path,
        }
    }

    /// Prepends this node's segment and forwards the request towards the
    /// root, which executes it via the transport.
    ///
    /// Nothing is sent until the returned future is polled. A 404 from the
    /// transport becomes [`ODataError::NotFound`]; any other transport
    /// failure is passed through as [`ODataError::Transport`].
    fn append_and_execute(
        &self,
        remaining: String,
        body: Option<Vec<u8>>,
        method: HttpMethod,
    ) -> BoxFuture<'_, Result<Vec<u8>, ODataError>> {
        let path = self.append_segment(remaining);
        match self.parent() {
            Some(parent) => parent.append_and_execute(path, body, method),
            None => dispatch(self.resolver(), path, body, method),
        }
    }
}

fn dispatch(
    resolver: &DependencyResolver,
    path: String,
    body: Option<Vec<u8>>,
    method: HttpMethod,
) -> BoxFuture<'_, Result<Vec<u8>, ODataError>> {
    let transport = resolver.transport();
    Box::pin(async move {
        tracing::debug!("Executing {} {}", method, path);
        transport
            .execute(path.clone(), body, method)
            .await
            .map_err(|error| ODataError::from_transport(error, path))
    })
}

/// Joins a node segment with the path composed by its descendants.
///
/// Empty parts are skipped, so no leading, trailing or doubled `/` is
/// produced.
pub(crate) fn join_segments(segment: &str, remaining: &str) -> String {
    match (segment.is_empty(), remaining.is_empty()) {
        (true, _) => remaining.to_string(),
        (false, true) => segment.to_string(),
        (false, false) => format!("{segment}/{remaining}"),
    }
}

/// The root of every query tree.
///
/// The entry point owns the [`DependencyResolver`], contributes no path
/// segment, and executes composed requests through the resolver's transport.
/// Entity sets and singletons are reached from it by navigation, either
/// generically via [`collection`](Self::collection) and
/// [`entity`](Self::entity) or through domain helpers such as
/// `EntryPoint::me`.
#[derive(Clone, Debug)]
pub struct EntryPoint {
    resolver: DependencyResolver,
}

impl EntryPoint {
    /// Creates a root node over the given collaborators.
    #[must_use]
    pub const fn new(resolver: DependencyResolver) -> Self {
        Self { resolver }
    }

    /// Navigates to the entity set named `segment`.
    #[must_use]
    pub fn collection<T: ODataEntity>(self, segment: impl Into<String>) -> ODataCollection<T> {
        ODataCollection::new(segment, Box::new(self))
    }

    /// Navigates to the single entity addressed by `segment`.
    #[must_use]
    pub fn entity<T: ODataEntity>(self, segment: impl Into<String>) -> EntityQuery<T> {
        EntityQuery::new(segment, Box::new(self))
    }
}

impl PathNode for EntryPoint {
    fn append_segment(&self, remaining: String) -> String {
        remaining
    }

    fn parent(&self) -> Option<&dyn PathNode> {
        None
    }

    fn resolver(&self) -> &DependencyResolver {
        &self.resolver
    }
}
