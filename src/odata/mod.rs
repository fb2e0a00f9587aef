//! OData query construction and execution.
//!
//! Requests are described by a chain of query nodes rooted at an
//! [`EntryPoint`]. Each node contributes one path segment; a collection node
//! also accumulates query modifiers. Executing an operation on a leaf
//! composes the request path towards the root, which hands the request to
//! the [`Transport`] and decodes the response with the [`Codec`].
//!
//! # Overview
//!
//! - [`EntryPoint`]: The root node, owning the [`DependencyResolver`]
//! - [`ODataCollection`]: A collection node with `top`/`skip`/`select`/
//!   `expand`/`filter` modifiers, `execute`, `add` and `get_by_key`
//! - [`EntityQuery`]: A single-item node with `get`, `update`, `delete` and
//!   bound actions
//! - [`EntityRegistry`]: Maps entity types to their single-item query
//! - [`Transport`] / [`Codec`]: The network and payload seams
//! - [`ODataError`]: Unified error type
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use odata_client::clients::{HttpError, HttpMethod};
//! use odata_client::odata::{
//!     BoxFuture, DependencyResolver, EntityRegistry, EntryPoint, JsonCodec, ODataEntity,
//!     Transport,
//! };
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! #[serde(rename_all = "PascalCase")]
//! struct Product {
//!     id: Option<String>,
//! }
//!
//! impl ODataEntity for Product {
//!     const NAME: &'static str = "Product";
//! }
//!
//! struct Offline;
//!
//! impl Transport for Offline {
//!     fn execute(
//!         &self,
//!         _path: String,
//!         _body: Option<Vec<u8>>,
//!         _method: HttpMethod,
//!     ) -> BoxFuture<'_, Result<Vec<u8>, HttpError>> {
//!         Box::pin(async { Ok(b"[]".to_vec()) })
//!     }
//! }
//!
//! let resolver = DependencyResolver::new(
//!     Arc::new(Offline),
//!     Arc::new(JsonCodec),
//!     EntityRegistry::new().with::<Product>(),
//! );
//!
//! let query = EntryPoint::new(resolver)
//!     .collection::<Product>("Products")
//!     .top(5)
//!     .filter("Price gt 10");
//!
//! assert_eq!(query.request_path(), "Products?&$top=5&filter=Price gt 10");
//! ```

mod codec;
mod collection;
mod entity;
mod errors;
mod path;
mod query;
mod registry;
mod resolver;
mod transport;

pub use codec::{Codec, CodecError, JsonCodec};
pub use collection::ODataCollection;
pub use entity::{EntityQuery, ODataEntity};
pub use errors::ODataError;
pub(crate) use errors::require_non_empty;
pub use path::{EntryPoint, PathNode};
pub use query::QueryOptions;
pub use registry::{EntityQueryFactory, EntityRegistry};
pub use resolver::DependencyResolver;
pub use transport::{BoxFuture, Transport};
