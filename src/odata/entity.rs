//! Entity types and the single-item query node.
//!
//! An [`EntityQuery`] addresses exactly one entity, either because a
//! collection was narrowed by key (`Messages('AAMk=')`) or because the
//! service exposes a single-valued navigation property (`Me`,
//! `RootFolder`). It supports read, partial update, delete and bound
//! actions, and is the parent for further navigation.
//!
//! Entity-specific navigation and actions are added as inherent impls on
//! `EntityQuery<T>` for the concrete entity type.

use std::fmt;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::clients::HttpMethod;
use crate::odata::collection::ODataCollection;
use crate::odata::errors::{require_non_empty, ODataError};
use crate::odata::path::{join_segments, PathNode};
use crate::odata::resolver::DependencyResolver;

/// A remote entity type.
///
/// # Example
///
/// ```rust
/// use odata_client::odata::ODataEntity;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// #[serde(rename_all = "PascalCase")]
/// struct Contact {
///     id: Option<String>,
///     display_name: Option<String>,
/// }
///
/// impl ODataEntity for Contact {
///     const NAME: &'static str = "Contact";
/// }
/// ```
pub trait ODataEntity: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// The entity type name used in logs and errors.
    const NAME: &'static str;
}

/// A query node addressing a single entity of type `T`.
pub struct EntityQuery<T> {
    segment: String,
    parent: Box<dyn PathNode>,
    // fn() -> T keeps the node Send + Sync regardless of T
    _entity: PhantomData<fn() -> T>,
}

impl<T: ODataEntity> EntityQuery<T> {
    /// Creates a node with its own path segment under `parent`.
    #[must_use]
    pub fn new(segment: impl Into<String>, parent: Box<dyn PathNode>) -> Self {
        Self {
            segment: segment.into(),
            parent,
            _entity: PhantomData,
        }
    }

    /// Creates a node that adds no segment of its own.
    ///
    /// This is the default registry factory: the keyed collection already
    /// renders `Name('key')`, so the single-item node just extends it.
    #[must_use]
    pub fn from_parent(parent: Box<dyn PathNode>) -> Self {
        Self::new(String::new(), parent)
    }

    /// Navigates to a collection-valued property of this entity.
    #[must_use]
    pub fn collection<U: ODataEntity>(self, segment: impl Into<String>) -> ODataCollection<U> {
        ODataCollection::new(segment, Box::new(self))
    }

    /// Navigates to a single-valued property of this entity.
    #[must_use]
    pub fn entity<U: ODataEntity>(self, segment: impl Into<String>) -> EntityQuery<U> {
        EntityQuery::new(segment, Box::new(self))
    }

    /// Returns the path this node addresses, relative to the service root.
    #[must_use]
    pub fn request_path(&self) -> String {
        self.compose_path(String::new())
    }

    /// Reads the entity (GET).
    ///
    /// # Errors
    ///
    /// Returns [`ODataError`] if the request fails or the response cannot be
    /// decoded.
    pub async fn get(&self) -> Result<T, ODataError> {
        let bytes = self
            .append_and_execute(String::new(), None, HttpMethod::Get)
            .await?;
        self.decode(&bytes)
    }

    /// Partially updates the entity (PATCH) and returns the service's copy.
    ///
    /// # Errors
    ///
    /// Returns [`ODataError`] if encoding, the request, or decoding fails.
    pub async fn update(&self, entity: &T) -> Result<T, ODataError> {
        let body = self.encode(entity)?;
        let bytes = self
            .append_and_execute(String::new(), Some(body), HttpMethod::Patch)
            .await?;
        self.decode(&bytes)
    }

    /// Deletes the entity (DELETE).
    ///
    /// # Errors
    ///
    /// Returns [`ODataError`] if the request fails.
    pub async fn delete(&self) -> Result<(), ODataError> {
        self.append_and_execute(String::new(), None, HttpMethod::Delete)
            .await?;
        Ok(())
    }

    /// Invokes a bound action (POST `<path>/<action>`) and returns the raw
    /// response body.
    ///
    /// # Errors
    ///
    /// Returns [`ODataError::InvalidArgument`] for an empty action name, or
    /// [`ODataError`] if encoding or the request fails.
    pub async fn invoke_action(
        &self,
        action: &str,
        parameters: Option<&Value>,
    ) -> Result<Vec<u8>, ODataError> {
        require_non_empty("action", action)?;
        let body = match parameters {
            Some(parameters) => Some(self.encode(parameters)?),
            None => None,
        };
        self.append_and_execute(action.to_string(), body, HttpMethod::Post)
            .await
    }

    /// Invokes a bound action that returns an entity of this node's type,
    /// such as `Move` or `CreateReply`.
    ///
    /// # Errors
    ///
    /// Returns [`ODataError`] if the request fails or the response cannot be
    /// decoded.
    pub async fn invoke_action_for_entity(
        &self,
        action: &str,
        parameters: Option<&Value>,
    ) -> Result<T, ODataError> {
        let bytes = self.invoke_action(action, parameters).await?;
        self.decode(&bytes)
    }

    fn encode<B: Serialize + ?Sized>(&self, body: &B) -> Result<Vec<u8>, ODataError> {
        self.resolver()
            .codec()
            .encode(body)
            .map_err(|source| ODataError::Encode {
                entity: T::NAME,
                source,
            })
    }

    fn decode(&self, bytes: &[u8]) -> Result<T, ODataError> {
        tracing::debug!("Decoding {} from {} bytes", T::NAME, bytes.len());
        self.resolver()
            .codec()
            .decode(bytes)
            .map_err(|source| ODataError::Decode {
                entity: T::NAME,
                source,
            })
    }
}

impl<T: ODataEntity> PathNode for EntityQuery<T> {
    fn append_segment(&self, remaining: String) -> String {
        join_segments(&self.segment, &remaining)
    }

    fn parent(&self) -> Option<&dyn PathNode> {
        Some(self.parent.as_ref())
    }

    fn resolver(&self) -> &DependencyResolver {
        self.parent.resolver()
    }
}

impl<T: ODataEntity> fmt::Debug for EntityQuery<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityQuery")
            .field("entity", &T::NAME)
            .field("path", &self.request_path())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::{HttpError, HttpResponseError};
    use crate::odata::testing::{entry_point, Note, RecordingTransport};
    use serde_json::json;
    use std::sync::Arc;

    fn note_query(transport: &Arc<RecordingTransport>) -> EntityQuery<Note> {
        entry_point(transport)
            .collection::<Note>("Notes")
            .get_by_key("n1")
            .unwrap()
    }

    #[tokio::test]
    async fn test_get_decodes_single_entity() {
        let transport = Arc::new(RecordingTransport::new());
        transport.respond_with(br#"{"Id":"n1","Subject":"Hello"}"#.to_vec());

        let note = note_query(&transport).get().await.unwrap();

        assert_eq!(note.id.as_deref(), Some("n1"));
        assert_eq!(note.subject.as_deref(), Some("Hello"));
        let requests = transport.requests();
        assert_eq!(requests[0].path, "Notes('n1')");
        assert_eq!(requests[0].method, HttpMethod::Get);
        assert!(requests[0].body.is_none());
    }

    #[tokio::test]
    async fn test_update_sends_patch_with_body() {
        let transport = Arc::new(RecordingTransport::new());
        transport.respond_with(br#"{"Id":"n1","Subject":"Edited"}"#.to_vec());

        let patch = Note {
            id: None,
            subject: Some("Edited".to_string()),
        };
        let note = note_query(&transport).update(&patch).await.unwrap();

        assert_eq!(note.subject.as_deref(), Some("Edited"));
        let requests = transport.requests();
        assert_eq!(requests[0].method, HttpMethod::Patch);
        assert_eq!(
            requests[0].body_json(),
            Some(json!({"Subject": "Edited"}))
        );
    }

    #[tokio::test]
    async fn test_delete_ignores_empty_response() {
        let transport = Arc::new(RecordingTransport::new());
        transport.respond_with(Vec::new());

        note_query(&transport).delete().await.unwrap();

        let requests = transport.requests();
        assert_eq!(requests[0].method, HttpMethod::Delete);
        assert_eq!(requests[0].path, "Notes('n1')");
    }

    #[tokio::test]
    async fn test_invoke_action_appends_action_segment() {
        let transport = Arc::new(RecordingTransport::new());
        transport.respond_with(br#"{"Id":"n2"}"#.to_vec());

        let moved = note_query(&transport)
            .invoke_action_for_entity("Move", Some(&json!({"DestinationId": "Archive"})))
            .await
            .unwrap();

        assert_eq!(moved.id.as_deref(), Some("n2"));
        let requests = transport.requests();
        assert_eq!(requests[0].path, "Notes('n1')/Move");
        assert_eq!(requests[0].method, HttpMethod::Post);
        assert_eq!(
            requests[0].body_json(),
            Some(json!({"DestinationId": "Archive"}))
        );
    }

    #[tokio::test]
    async fn test_invoke_action_rejects_empty_name_without_request() {
        let transport = Arc::new(RecordingTransport::new());

        let result = note_query(&transport).invoke_action("", None).await;

        assert!(matches!(
            result,
            Err(ODataError::InvalidArgument {
                argument: "action",
                ..
            })
        ));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_not_found_carries_composed_path() {
        let transport = Arc::new(RecordingTransport::new());
        transport.fail_with(HttpError::Response(HttpResponseError {
            code: 404,
            message: "missing".to_string(),
            error_reference: None,
        }));

        let result = note_query(&transport).get().await;

        match result {
            Err(ODataError::NotFound { path, .. }) => assert_eq!(path, "Notes('n1')"),
            other => panic!("Expected NotFound, got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_decode_failure_names_entity() {
        let transport = Arc::new(RecordingTransport::new());
        transport.respond_with(b"not json".to_vec());

        let result = note_query(&transport).get().await;

        assert!(matches!(
            result,
            Err(ODataError::Decode { entity: "Note", .. })
        ));
    }

    #[test]
    fn test_navigation_nodes_extend_path() {
        let transport = Arc::new(RecordingTransport::new());
        let query = entry_point(&transport)
            .entity::<Note>("Me")
            .entity::<Note>("Pinned");

        assert_eq!(query.request_path(), "Me/Pinned");
    }
}
