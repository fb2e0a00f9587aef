//! High-level mail operations.
//!
//! [`MailClient`] wraps the query tree with the common mailbox tasks:
//! reading, sending and replying to messages, attachments, and folder
//! management. Every operation builds a fresh tree from the client's
//! [`DependencyResolver`], so a client can be cloned and used from many
//! tasks at once.

use std::sync::Arc;

use crate::clients::HttpClient;
use crate::config::ODataConfig;
use crate::mail::models::{Attachment, Folder, Message, User};
use crate::mail::queries::{FolderQuery, MessageCollection, MessageQuery};
use crate::odata::{
    require_non_empty, DependencyResolver, EntityRegistry, EntryPoint, JsonCodec, ODataError,
};

/// Options for [`MailClient::get_messages`].
///
/// # Example
///
/// ```rust
/// use odata_client::mail::MessageQueryOptions;
///
/// let options = MessageQueryOptions::new()
///     .select("Id,Subject,From")
///     .skip(20)
///     .top(10);
///
/// assert_eq!(options.skip, 20);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MessageQueryOptions {
    /// Properties to return.
    pub select: Option<String>,
    /// Related entities to inline.
    pub expand: Option<String>,
    /// Filter expression.
    pub filter: Option<String>,
    /// Number of messages to skip; only sent when greater than zero.
    pub skip: u32,
    /// Page size; the client's default page size when `None` or zero.
    pub top: Option<u32>,
}

impl MessageQueryOptions {
    /// Creates empty options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the projection.
    #[must_use]
    pub fn select(mut self, fields: impl Into<String>) -> Self {
        self.select = Some(fields.into());
        self
    }

    /// Sets the expansion.
    #[must_use]
    pub fn expand(mut self, relations: impl Into<String>) -> Self {
        self.expand = Some(relations.into());
        self
    }

    /// Sets the filter expression.
    #[must_use]
    pub fn filter(mut self, expression: impl Into<String>) -> Self {
        self.filter = Some(expression.into());
        self
    }

    /// Sets the number of messages to skip.
    #[must_use]
    pub const fn skip(mut self, skip: u32) -> Self {
        self.skip = skip;
        self
    }

    /// Sets the page size.
    #[must_use]
    pub const fn top(mut self, top: u32) -> Self {
        self.top = Some(top);
        self
    }

    fn apply(&self, mut messages: MessageCollection, default_page_size: u32) -> MessageCollection {
        if let Some(select) = &self.select {
            messages = messages.select(select.as_str());
        }
        if let Some(expand) = &self.expand {
            messages = messages.expand(expand.as_str());
        }
        if let Some(filter) = &self.filter {
            messages = messages.filter(filter.as_str());
        }
        if self.skip > 0 {
            messages = messages.skip(self.skip);
        }
        let top = self.top.filter(|top| *top > 0).unwrap_or(default_page_size);
        messages.top(top)
    }
}

/// Client for the signed-in user's mailbox.
///
/// # Example
///
/// ```rust,ignore
/// use odata_client::{AccessToken, ODataConfig, ServiceRoot};
/// use odata_client::mail::{MailClient, MessageQueryOptions};
///
/// let config = ODataConfig::builder()
///     .service_root(ServiceRoot::new("https://outlook.office365.com/api/v1.0")?)
///     .access_token(AccessToken::new(token)?)
///     .build()?;
///
/// let client = MailClient::new(&config);
/// let inbox = client
///     .get_messages("Inbox", &MessageQueryOptions::new().select("Id,Subject"))
///     .await?;
/// for message in &inbox {
///     client.reply(message.id.as_deref().unwrap_or_default(), "Received").await?;
/// }
/// ```
#[derive(Clone, Debug)]
pub struct MailClient {
    resolver: DependencyResolver,
    default_page_size: u32,
}

// Verify MailClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<MailClient>();
};

impl MailClient {
    /// Creates a client using the HTTP transport, the JSON codec and the
    /// standard mail entity registry.
    ///
    /// # Panics
    ///
    /// Panics if the underlying HTTP client cannot be created (see
    /// [`HttpClient::new`]).
    #[must_use]
    pub fn new(config: &ODataConfig) -> Self {
        let resolver = DependencyResolver::new(
            Arc::new(HttpClient::new(config)),
            Arc::new(JsonCodec),
            EntityRegistry::standard(),
        );
        Self {
            resolver,
            default_page_size: config.default_page_size(),
        }
    }

    /// Creates a client over caller-supplied collaborators.
    ///
    /// # Errors
    ///
    /// Returns [`ODataError::MissingRegistration`] if the resolver's registry
    /// lacks any mail entity type, or [`ODataError::InvalidArgument`] if
    /// `default_page_size` is zero.
    pub fn with_resolver(
        resolver: DependencyResolver,
        default_page_size: u32,
    ) -> Result<Self, ODataError> {
        if default_page_size == 0 {
            return Err(ODataError::invalid_argument(
                "default_page_size",
                "must be greater than zero",
            ));
        }

        let registry = resolver.registry();
        registry.ensure_registered::<User>()?;
        registry.ensure_registered::<Folder>()?;
        registry.ensure_registered::<Message>()?;
        registry.ensure_registered::<Attachment>()?;

        Ok(Self {
            resolver,
            default_page_size,
        })
    }

    /// Returns a new root node for building custom queries.
    #[must_use]
    pub fn entry_point(&self) -> EntryPoint {
        EntryPoint::new(self.resolver.clone())
    }

    /// Returns the page size used when a listing does not specify `top`.
    #[must_use]
    pub const fn default_page_size(&self) -> u32 {
        self.default_page_size
    }

    fn message(&self, message_id: &str) -> Result<MessageQuery, ODataError> {
        require_non_empty("message_id", message_id)?;
        self.entry_point().me().messages().get_by_key(message_id)
    }

    fn folder(&self, folder_id: &str) -> Result<FolderQuery, ODataError> {
        require_non_empty("folder_id", folder_id)?;
        self.entry_point().me().folders().get_by_key(folder_id)
    }

    /// Reads the signed-in user.
    ///
    /// # Errors
    ///
    /// Returns [`ODataError`] if the request fails.
    pub async fn get_me(&self) -> Result<User, ODataError> {
        self.entry_point().me().get().await
    }

    /// Reads one message from a folder.
    ///
    /// # Errors
    ///
    /// Returns [`ODataError::InvalidArgument`] for an empty id, or
    /// [`ODataError`] if the request fails.
    pub async fn get_message(
        &self,
        folder_id: &str,
        message_id: &str,
    ) -> Result<Message, ODataError> {
        require_non_empty("message_id", message_id)?;
        let message = self.folder(folder_id)?.messages().get_by_key(message_id)?;
        message.get().await
    }

    /// Saves `message` as a draft in the Drafts folder.
    ///
    /// # Errors
    ///
    /// Returns [`ODataError`] if the request fails.
    pub async fn create_draft(&self, message: &Message) -> Result<Message, ODataError> {
        self.entry_point().me().messages().add(message).await
    }

    /// Sends a saved draft.
    ///
    /// # Errors
    ///
    /// Returns [`ODataError::InvalidArgument`] for an empty id, or
    /// [`ODataError`] if the request fails.
    pub async fn send_message(&self, message_id: &str) -> Result<(), ODataError> {
        self.message(message_id)?.send().await
    }

    /// Creates a reply draft for a message.
    ///
    /// # Errors
    ///
    /// Returns [`ODataError::InvalidArgument`] for an empty id, or
    /// [`ODataError`] if the request fails.
    pub async fn create_reply(&self, message_id: &str) -> Result<Message, ODataError> {
        self.message(message_id)?.create_reply().await
    }

    /// Creates a reply-all draft for a message.
    ///
    /// # Errors
    ///
    /// Returns [`ODataError::InvalidArgument`] for an empty id, or
    /// [`ODataError`] if the request fails.
    pub async fn create_reply_all(&self, message_id: &str) -> Result<Message, ODataError> {
        self.message(message_id)?.create_reply_all().await
    }

    /// Replies to the sender of a message.
    ///
    /// # Errors
    ///
    /// Returns [`ODataError::InvalidArgument`] for an empty id, or
    /// [`ODataError`] if the request fails.
    pub async fn reply(&self, message_id: &str, comment: &str) -> Result<(), ODataError> {
        self.message(message_id)?.reply(comment).await
    }

    /// Replies to every recipient of a message.
    ///
    /// # Errors
    ///
    /// Returns [`ODataError::InvalidArgument`] for an empty id, or
    /// [`ODataError`] if the request fails.
    pub async fn reply_all(&self, message_id: &str, comment: &str) -> Result<(), ODataError> {
        self.message(message_id)?.reply_all(comment).await
    }

    /// Attaches a file to a message and returns the created attachment.
    ///
    /// # Errors
    ///
    /// Returns [`ODataError::InvalidArgument`] for an empty id or name, or
    /// [`ODataError`] if the request fails.
    pub async fn add_attachment(
        &self,
        message_id: &str,
        name: &str,
        content: Vec<u8>,
    ) -> Result<Attachment, ODataError> {
        require_non_empty("name", name)?;
        let attachments = self.message(message_id)?.attachments();
        attachments.add(&Attachment::file(name, content)).await
    }

    /// Attaches a copy of `item` to a message and returns the created
    /// attachment.
    ///
    /// # Errors
    ///
    /// Returns [`ODataError::InvalidArgument`] for an empty id or name, or
    /// [`ODataError`] if the request fails.
    pub async fn add_item_attachment(
        &self,
        message_id: &str,
        name: &str,
        item: &Message,
    ) -> Result<Attachment, ODataError> {
        require_non_empty("name", name)?;
        let attachments = self.message(message_id)?.attachments();
        attachments.add(&Attachment::item(name, item.clone())).await
    }

    /// Moves a message to another folder.
    ///
    /// # Errors
    ///
    /// Returns [`ODataError::InvalidArgument`] for an empty id, or
    /// [`ODataError`] if the request fails.
    pub async fn move_message(
        &self,
        message_id: &str,
        destination_folder_id: &str,
    ) -> Result<Message, ODataError> {
        self.message(message_id)?.move_to(destination_folder_id).await
    }

    /// Copies a message to another folder.
    ///
    /// # Errors
    ///
    /// Returns [`ODataError::InvalidArgument`] for an empty id, or
    /// [`ODataError`] if the request fails.
    pub async fn copy_message(
        &self,
        message_id: &str,
        destination_folder_id: &str,
    ) -> Result<Message, ODataError> {
        self.message(message_id)?.copy_to(destination_folder_id).await
    }

    /// Deletes a message.
    ///
    /// # Errors
    ///
    /// Returns [`ODataError::InvalidArgument`] for an empty id, or
    /// [`ODataError`] if the request fails.
    pub async fn delete_message(&self, message_id: &str) -> Result<(), ODataError> {
        self.message(message_id)?.delete().await
    }

    /// Creates a folder named `name` under `parent_folder_id`.
    ///
    /// # Errors
    ///
    /// Returns [`ODataError::InvalidArgument`] for an empty id or name, or
    /// [`ODataError`] if the request fails.
    pub async fn create_folder(
        &self,
        parent_folder_id: &str,
        name: &str,
    ) -> Result<Folder, ODataError> {
        require_non_empty("name", name)?;
        let children = self.folder(parent_folder_id)?.child_folders();
        children.add(&Folder::named(name)).await
    }

    /// Moves a folder under a new parent.
    ///
    /// # Errors
    ///
    /// Returns [`ODataError::InvalidArgument`] for an empty id, or
    /// [`ODataError`] if the request fails.
    pub async fn move_folder(
        &self,
        folder_id: &str,
        parent_folder_id: &str,
    ) -> Result<Folder, ODataError> {
        self.folder(folder_id)?.move_to(parent_folder_id).await
    }

    /// Deletes a folder.
    ///
    /// # Errors
    ///
    /// Returns [`ODataError::InvalidArgument`] for an empty id, or
    /// [`ODataError`] if the request fails.
    pub async fn delete_folder(&self, folder_id: &str) -> Result<(), ODataError> {
        self.folder(folder_id)?.delete().await
    }

    /// Lists the messages of a folder, one page at a time.
    ///
    /// # Errors
    ///
    /// Returns [`ODataError::InvalidArgument`] for an empty id, or
    /// [`ODataError`] if the request fails.
    pub async fn get_messages(
        &self,
        folder_id: &str,
        options: &MessageQueryOptions,
    ) -> Result<Vec<Message>, ODataError> {
        let messages = options.apply(self.folder(folder_id)?.messages(), self.default_page_size);
        tracing::debug!("Listing messages of folder {}", folder_id);
        messages.execute().await
    }

    /// Lists the top-level folders of the mailbox.
    ///
    /// # Errors
    ///
    /// Returns [`ODataError`] if the request fails.
    pub async fn get_child_folders(&self) -> Result<Vec<Folder>, ODataError> {
        self.entry_point()
            .me()
            .root_folder()
            .child_folders()
            .execute()
            .await
    }
}
