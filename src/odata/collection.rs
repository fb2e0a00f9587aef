//! The collection query node.
//!
//! An [`ODataCollection`] addresses an entity set or a collection-valued
//! navigation property. It accumulates query modifiers through consuming
//! builder methods, lists or creates entities, and can be narrowed to a
//! single element by key.
//!
//! # Example
//!
//! ```rust,ignore
//! use odata_client::mail::Message;
//!
//! // GET Me/Messages?&$top=10&$skip=5&$select=Id,Subject
//! let messages: Vec<Message> = entry_point
//!     .me()
//!     .messages()
//!     .top(10)
//!     .skip(5)
//!     .select("Id,Subject")
//!     .execute()
//!     .await?;
//! ```

use std::fmt;
use std::marker::PhantomData;

use crate::clients::HttpMethod;
use crate::odata::entity::{EntityQuery, ODataEntity};
use crate::odata::errors::{require_non_empty, ODataError};
use crate::odata::path::{join_segments, PathNode};
use crate::odata::query::{non_empty, QueryOptions};
use crate::odata::resolver::DependencyResolver;

/// A query node addressing a collection of `T`.
pub struct ODataCollection<T> {
    segment: String,
    parent: Box<dyn PathNode>,
    options: QueryOptions,
    _entity: PhantomData<fn() -> T>,
}

impl<T: ODataEntity> ODataCollection<T> {
    /// Creates a collection node named `segment` under `parent`.
    #[must_use]
    pub fn new(segment: impl Into<String>, parent: Box<dyn PathNode>) -> Self {
        Self {
            segment: segment.into(),
            parent,
            options: QueryOptions::default(),
            _entity: PhantomData,
        }
    }

    /// Limits the number of results (`$top`).
    #[must_use]
    pub fn top(mut self, top: u32) -> Self {
        self.options.top = Some(top);
        self
    }

    /// Skips the first `skip` results (`$skip`).
    #[must_use]
    pub fn skip(mut self, skip: u32) -> Self {
        self.options.skip = Some(skip);
        self
    }

    /// Restricts the returned properties (`$select`).
    ///
    /// An empty value clears the projection.
    #[must_use]
    pub fn select(mut self, fields: impl Into<String>) -> Self {
        self.options.select = non_empty(fields.into());
        self
    }

    /// Inlines related entities (`expand`).
    ///
    /// An empty value clears the expansion.
    #[must_use]
    pub fn expand(mut self, relations: impl Into<String>) -> Self {
        self.options.expand = non_empty(relations.into());
        self
    }

    /// Filters the results (`filter`).
    ///
    /// An empty value clears the filter.
    #[must_use]
    pub fn filter(mut self, expression: impl Into<String>) -> Self {
        self.options.filter = non_empty(expression.into());
        self
    }

    /// Returns the accumulated query options.
    #[must_use]
    pub const fn options(&self) -> &QueryOptions {
        &self.options
    }

    /// Narrows this collection to the element with `key` and returns the
    /// single-item query registered for `T`.
    ///
    /// Accumulated modifiers are kept but no longer rendered.
    ///
    /// The key is escaped here: single quotes are doubled and the result is
    /// percent-encoded, so `"ann@contoso.com"` renders as
    /// `Users('ann%40contoso.com')`. Pass raw ids; an id that is already
    /// percent-encoded will be encoded twice.
    ///
    /// # Errors
    ///
    /// Returns, synchronously and without issuing any request:
    /// - [`ODataError::InvalidArgument`] if `key` is empty
    /// - [`ODataError::MissingRegistration`] if `T` has no registered
    ///   single-item query
    pub fn get_by_key(mut self, key: impl Into<String>) -> Result<EntityQuery<T>, ODataError> {
        let key = key.into();
        require_non_empty("key", &key)?;
        let factory = self.resolver().registry().resolve::<T>()?;

        self.options.selected_key = Some(key);
        Ok(factory(Box::new(self)))
    }

    /// Returns the path this node addresses, relative to the service root,
    /// including the rendered query string.
    #[must_use]
    pub fn request_path(&self) -> String {
        self.compose_path(String::new())
    }

    /// Lists the collection (GET) and decodes each element in order.
    ///
    /// # Errors
    ///
    /// Returns [`ODataError`] if the request fails or the payload is not a
    /// collection of `T`.
    pub async fn execute(&self) -> Result<Vec<T>, ODataError> {
        let bytes = self
            .append_and_execute(String::new(), None, HttpMethod::Get)
            .await?;
        tracing::debug!("Decoding {} list from {} bytes", T::NAME, bytes.len());
        self.resolver()
            .codec()
            .decode_list(&bytes)
            .map_err(|source| ODataError::Decode {
                entity: T::NAME,
                source,
            })
    }

    /// Creates `entity` in the collection (POST) and returns the service's
    /// copy.
    ///
    /// # Errors
    ///
    /// Returns [`ODataError`] if encoding, the request, or decoding fails.
    pub async fn add(&self, entity: &T) -> Result<T, ODataError> {
        let codec = self.resolver().codec();
        let body = codec.encode(entity).map_err(|source| ODataError::Encode {
            entity: T::NAME,
            source,
        })?;
        let bytes = self
            .append_and_execute(String::new(), Some(body), HttpMethod::Post)
            .await?;
        tracing::debug!("Decoding created {} from {} bytes", T::NAME, bytes.len());
        codec.decode(&bytes).map_err(|source| ODataError::Decode {
            entity: T::NAME,
            source,
        })
    }
}

impl<T: ODataEntity> PathNode for ODataCollection<T> {
    fn append_segment(&self, remaining: String) -> String {
        match self.options.key_selector() {
            Some(selector) => join_segments(&format!("{}{selector}", self.segment), &remaining),
            None => format!(
                "{}{}",
                join_segments(&self.segment, &remaining),
                self.options.to_query_string()
            ),
        }
    }

    fn parent(&self) -> Option<&dyn PathNode> {
        Some(self.parent.as_ref())
    }

    fn resolver(&self) -> &DependencyResolver {
        self.parent.resolver()
    }
}

impl<T: ODataEntity> fmt::Debug for ODataCollection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ODataCollection")
            .field("entity", &T::NAME)
            .field("segment", &self.segment)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

// Verify query nodes are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ODataCollection<()>>();
    assert_send_sync::<EntityQuery<()>>();
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::{HttpError, HttpResponseError};
    use crate::odata::testing::{entry_point, resolver_with, Note, RecordingTransport, Tag};
    use crate::odata::{CodecError, EntityRegistry, EntryPoint};
    use serde_json::json;
    use std::sync::Arc;

    fn notes(transport: &Arc<RecordingTransport>) -> ODataCollection<Note> {
        entry_point(transport)
            .entity::<Note>("Me")
            .collection::<Note>("Messages")
    }

    #[test]
    fn test_bare_collection_renders_name_only() {
        let transport = Arc::new(RecordingTransport::new());
        assert_eq!(notes(&transport).request_path(), "Me/Messages");
    }

    #[tokio::test]
    async fn test_execute_with_modifiers() {
        let transport = Arc::new(RecordingTransport::new());
        transport.respond_with(br#"[{"Id":"1","Subject":"Hi"}]"#.to_vec());

        let items = notes(&transport)
            .top(10)
            .skip(5)
            .select("Id,Subject")
            .execute()
            .await
            .unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id.as_deref(), Some("1"));
        assert_eq!(items[0].subject.as_deref(), Some("Hi"));

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(
            requests[0].path,
            "Me/Messages?&$top=10&$skip=5&$select=Id,Subject"
        );
        assert_eq!(requests[0].method, HttpMethod::Get);
    }

    #[test]
    fn test_builder_order_does_not_affect_rendering() {
        let transport = Arc::new(RecordingTransport::new());
        let path = notes(&transport)
            .filter("IsRead eq false")
            .expand("Attachments")
            .select("Id")
            .skip(1)
            .top(2)
            .request_path();

        assert_eq!(
            path,
            "Me/Messages?&$top=2&$skip=1&$select=Id&expand=Attachments&filter=IsRead eq false"
        );
    }

    #[test]
    fn test_empty_modifier_values_are_ignored() {
        let transport = Arc::new(RecordingTransport::new());
        let collection = notes(&transport).select("").filter("  ");

        assert!(!collection.options().has_modifiers());
        assert_eq!(collection.request_path(), "Me/Messages");
    }

    #[test]
    fn test_get_by_key_renders_keyed_path_and_drops_modifiers() {
        let transport = Arc::new(RecordingTransport::new());
        let query = notes(&transport).top(3).get_by_key("k").unwrap();

        assert_eq!(query.request_path(), "Me/Messages('k')");
    }

    #[test]
    fn test_keyed_collection_extends_to_children() {
        let transport = Arc::new(RecordingTransport::new());
        let path = entry_point(&transport)
            .collection::<Note>("Folders")
            .get_by_key("Inbox")
            .unwrap()
            .collection::<Note>("Messages")
            .top(1)
            .request_path();

        assert_eq!(path, "Folders('Inbox')/Messages?&$top=1");
    }

    #[test]
    fn test_get_by_key_rejects_empty_key_synchronously() {
        let transport = Arc::new(RecordingTransport::new());

        let result = notes(&transport).get_by_key("");

        assert!(matches!(
            result,
            Err(ODataError::InvalidArgument { argument: "key", .. })
        ));
        assert!(transport.requests().is_empty());
    }

    #[test]
    fn test_get_by_key_without_registration_is_configuration_error() {
        let transport = Arc::new(RecordingTransport::new());
        let root = EntryPoint::new(resolver_with(
            Arc::clone(&transport),
            EntityRegistry::new().with::<Note>(),
        ));

        let result = root.collection::<Tag>("Tags").get_by_key("t1");

        assert!(matches!(
            result,
            Err(ODataError::MissingRegistration { entity: "Tag" })
        ));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_add_posts_serialized_entity() {
        let transport = Arc::new(RecordingTransport::new());
        transport.respond_with(br#"{"Id":"new","Subject":"Draft"}"#.to_vec());

        let draft = Note {
            id: None,
            subject: Some("Draft".to_string()),
        };
        let created = notes(&transport).add(&draft).await.unwrap();

        assert_eq!(created.id.as_deref(), Some("new"));
        let requests = transport.requests();
        assert_eq!(requests[0].path, "Me/Messages");
        assert_eq!(requests[0].method, HttpMethod::Post);
        assert_eq!(requests[0].body_json(), Some(json!({"Subject": "Draft"})));
    }

    #[tokio::test]
    async fn test_execute_passes_transport_failure_through() {
        let transport = Arc::new(RecordingTransport::new());
        transport.fail_with(HttpError::Response(HttpResponseError {
            code: 503,
            message: "Service Unavailable".to_string(),
            error_reference: None,
        }));

        let result = notes(&transport).execute().await;

        assert!(matches!(
            result,
            Err(ODataError::Transport(HttpError::Response(HttpResponseError {
                code: 503,
                ..
            })))
        ));
    }

    #[tokio::test]
    async fn test_execute_rejects_non_collection_payload() {
        let transport = Arc::new(RecordingTransport::new());
        transport.respond_with(br#"{"Id":"n1","Subject":"single"}"#.to_vec());

        let result = notes(&transport).execute().await;

        assert!(matches!(
            result,
            Err(ODataError::Decode {
                entity: "Note",
                source: CodecError::UnexpectedShape { .. },
            })
        ));
    }

    #[tokio::test]
    async fn test_add_passes_transport_failure_through() {
        let transport = Arc::new(RecordingTransport::new());
        transport.fail_with(HttpError::Response(HttpResponseError {
            code: 500,
            message: "Internal Server Error".to_string(),
            error_reference: None,
        }));

        let draft = Note {
            id: None,
            subject: Some("Draft".to_string()),
        };
        let result = notes(&transport).add(&draft).await;

        assert!(matches!(
            result,
            Err(ODataError::Transport(HttpError::Response(HttpResponseError {
                code: 500,
                ..
            })))
        ));
        assert_eq!(transport.requests()[0].method, HttpMethod::Post);
    }

    #[tokio::test]
    async fn test_add_rejects_malformed_response() {
        let transport = Arc::new(RecordingTransport::new());
        transport.respond_with(b"<html>created</html>".to_vec());

        let draft = Note {
            id: None,
            subject: Some("Draft".to_string()),
        };
        let result = notes(&transport).add(&draft).await;

        assert!(matches!(
            result,
            Err(ODataError::Decode { entity: "Note", .. })
        ));
    }

    #[tokio::test]
    async fn test_concurrent_requests_share_collaborators() {
        let transport = Arc::new(RecordingTransport::new());
        transport.respond_with(b"[]".to_vec());
        transport.respond_with(b"[]".to_vec());

        let first = notes(&transport).top(1);
        let second = notes(&transport).top(2);
        let (a, b) = tokio::join!(first.execute(), second.execute());

        assert!(a.unwrap().is_empty());
        assert!(b.unwrap().is_empty());
        let mut paths: Vec<String> = transport.requests().into_iter().map(|r| r.path).collect();
        paths.sort();
        assert_eq!(paths, ["Me/Messages?&$top=1", "Me/Messages?&$top=2"]);
    }
}
