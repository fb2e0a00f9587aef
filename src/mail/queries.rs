//! Navigation and bound actions for the mail entity types.
//!
//! These inherent impls give the generic query nodes their mail vocabulary:
//!
//! ```text
//! Me                                   EntryPoint::me
//! ├── Folders('id')                    .folders().get_by_key(id)
//! │   ├── Messages / ChildFolders      .messages() / .child_folders()
//! │   └── Move / Copy                  .move_to(dest) / .copy_to(dest)
//! ├── Messages('id')                   .messages().get_by_key(id)
//! │   ├── Attachments                  .attachments()
//! │   └── Send / Reply / ReplyAll / CreateReply / CreateReplyAll / Move / Copy
//! └── RootFolder                       .root_folder()
//! ```

use serde::Serialize;
use serde_json::Value;

use crate::mail::models::{Attachment, Folder, Message, User};
use crate::odata::{require_non_empty, EntityQuery, EntryPoint, ODataCollection, ODataError};

/// A collection of users.
pub type UserCollection = ODataCollection<User>;
/// A collection of folders.
pub type FolderCollection = ODataCollection<Folder>;
/// A collection of messages.
pub type MessageCollection = ODataCollection<Message>;
/// A collection of attachments.
pub type AttachmentCollection = ODataCollection<Attachment>;

/// A single user.
pub type UserQuery = EntityQuery<User>;
/// A single folder.
pub type FolderQuery = EntityQuery<Folder>;
/// A single message.
pub type MessageQuery = EntityQuery<Message>;
/// A single attachment.
pub type AttachmentQuery = EntityQuery<Attachment>;

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct DestinationParameters<'a> {
    destination_id: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct CommentParameters<'a> {
    comment: &'a str,
}

fn destination_parameters(destination_id: &str) -> Result<Value, ODataError> {
    require_non_empty("destination_id", destination_id)?;
    to_parameters(&DestinationParameters { destination_id })
}

fn comment_parameters(comment: &str) -> Result<Value, ODataError> {
    to_parameters(&CommentParameters { comment })
}

fn to_parameters<P: Serialize>(parameters: &P) -> Result<Value, ODataError> {
    serde_json::to_value(parameters).map_err(|error| ODataError::Encode {
        entity: "action parameters",
        source: error.into(),
    })
}

impl EntryPoint {
    /// Navigates to the signed-in user (`Me`).
    #[must_use]
    pub fn me(self) -> UserQuery {
        self.entity("Me")
    }

    /// Navigates to the users entity set (`Users`).
    #[must_use]
    pub fn users(self) -> UserCollection {
        self.collection("Users")
    }
}

impl EntityQuery<User> {
    /// The user's mail folders.
    #[must_use]
    pub fn folders(self) -> FolderCollection {
        self.collection("Folders")
    }

    /// All of the user's messages, across folders.
    #[must_use]
    pub fn messages(self) -> MessageCollection {
        self.collection("Messages")
    }

    /// The root of the user's folder hierarchy.
    #[must_use]
    pub fn root_folder(self) -> FolderQuery {
        self.entity("RootFolder")
    }
}

impl EntityQuery<Folder> {
    /// The messages in this folder.
    #[must_use]
    pub fn messages(self) -> MessageCollection {
        self.collection("Messages")
    }

    /// The direct child folders.
    #[must_use]
    pub fn child_folders(self) -> FolderCollection {
        self.collection("ChildFolders")
    }

    /// Moves this folder under `destination_id` and returns the moved folder.
    ///
    /// # Errors
    ///
    /// Returns [`ODataError::InvalidArgument`] for an empty destination, or
    /// [`ODataError`] if the request fails.
    pub async fn move_to(&self, destination_id: &str) -> Result<Folder, ODataError> {
        let parameters = destination_parameters(destination_id)?;
        self.invoke_action_for_entity("Move", Some(&parameters))
            .await
    }

    /// Copies this folder under `destination_id` and returns the copy.
    ///
    /// # Errors
    ///
    /// Returns [`ODataError::InvalidArgument`] for an empty destination, or
    /// [`ODataError`] if the request fails.
    pub async fn copy_to(&self, destination_id: &str) -> Result<Folder, ODataError> {
        let parameters = destination_parameters(destination_id)?;
        self.invoke_action_for_entity("Copy", Some(&parameters))
            .await
    }
}

impl EntityQuery<Message> {
    /// The message's attachments.
    #[must_use]
    pub fn attachments(self) -> AttachmentCollection {
        self.collection("Attachments")
    }

    /// Sends this draft.
    ///
    /// # Errors
    ///
    /// Returns [`ODataError`] if the request fails.
    pub async fn send(&self) -> Result<(), ODataError> {
        self.invoke_action("Send", None).await?;
        Ok(())
    }

    /// Replies to the sender with `comment`.
    ///
    /// # Errors
    ///
    /// Returns [`ODataError`] if the request fails.
    pub async fn reply(&self, comment: &str) -> Result<(), ODataError> {
        let parameters = comment_parameters(comment)?;
        self.invoke_action("Reply", Some(&parameters)).await?;
        Ok(())
    }

    /// Replies to all recipients with `comment`.
    ///
    /// # Errors
    ///
    /// Returns [`ODataError`] if the request fails.
    pub async fn reply_all(&self, comment: &str) -> Result<(), ODataError> {
        let parameters = comment_parameters(comment)?;
        self.invoke_action("ReplyAll", Some(&parameters)).await?;
        Ok(())
    }

    /// Creates a reply draft addressed to the sender.
    ///
    /// # Errors
    ///
    /// Returns [`ODataError`] if the request fails or the draft cannot be
    /// decoded.
    pub async fn create_reply(&self) -> Result<Message, ODataError> {
        self.invoke_action_for_entity("CreateReply", None).await
    }

    /// Creates a reply draft addressed to all recipients.
    ///
    /// # Errors
    ///
    /// Returns [`ODataError`] if the request fails or the draft cannot be
    /// decoded.
    pub async fn create_reply_all(&self) -> Result<Message, ODataError> {
        self.invoke_action_for_entity("CreateReplyAll", None).await
    }

    /// Moves this message to `destination_id` and returns the moved message.
    ///
    /// # Errors
    ///
    /// Returns [`ODataError::InvalidArgument`] for an empty destination, or
    /// [`ODataError`] if the request fails.
    pub async fn move_to(&self, destination_id: &str) -> Result<Message, ODataError> {
        let parameters = destination_parameters(destination_id)?;
        self.invoke_action_for_entity("Move", Some(&parameters))
            .await
    }

    /// Copies this message to `destination_id` and returns the copy.
    ///
    /// # Errors
    ///
    /// Returns [`ODataError::InvalidArgument`] for an empty destination, or
    /// [`ODataError`] if the request fails.
    pub async fn copy_to(&self, destination_id: &str) -> Result<Message, ODataError> {
        let parameters = destination_parameters(destination_id)?;
        self.invoke_action_for_entity("Copy", Some(&parameters))
            .await
    }
}
