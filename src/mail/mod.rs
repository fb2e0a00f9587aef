//! Mail domain built on the OData core.
//!
//! # Overview
//!
//! - [`models`]: `User`, `Folder`, `Message`, `Attachment` and their complex types
//! - [`queries`]: mail navigation (`me`, `folders`, `messages`, ...) and bound
//!   actions (`send`, `reply`, `move_to`, ...) on the generic query nodes
//! - [`MailClient`]: one-call operations for common mailbox tasks
//!
//! # Example
//!
//! ```rust,ignore
//! use odata_client::mail::{MailClient, Message, Recipient};
//!
//! let client = MailClient::new(&config);
//!
//! let draft = client
//!     .create_draft(&Message {
//!         subject: Some("Lunch?".to_string()),
//!         to_recipients: vec![Recipient::address("bob@contoso.com")],
//!         ..Message::default()
//!     })
//!     .await?;
//! client.send_message(draft.id.as_deref().unwrap_or_default()).await?;
//! ```

mod client;
pub mod models;
pub mod queries;

pub use client::{MailClient, MessageQueryOptions};
pub use models::{
    Attachment, BodyType, EmailAddress, Folder, Importance, ItemBody, Message, Recipient, User,
};
pub use queries::{
    AttachmentCollection, AttachmentQuery, FolderCollection, FolderQuery, MessageCollection,
    MessageQuery, UserCollection, UserQuery,
};

use crate::odata::EntityRegistry;

impl EntityRegistry {
    /// Creates a registry with every built-in mail entity type registered.
    #[must_use]
    pub fn standard() -> Self {
        Self::new()
            .with::<User>()
            .with::<Folder>()
            .with::<Message>()
            .with::<Attachment>()
    }
}
