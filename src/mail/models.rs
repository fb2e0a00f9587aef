//! Mail entity and complex types.
//!
//! Field names follow the service's PascalCase JSON. Every property is
//! optional on the wire, so optional fields are skipped when unset; this
//! makes a partially populated value a valid PATCH body.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::odata::ODataEntity;

/// The `@odata.type` of a file attachment.
pub const FILE_ATTACHMENT_TYPE: &str = "#Microsoft.OutlookServices.FileAttachment";

/// The `@odata.type` of an item attachment.
pub const ITEM_ATTACHMENT_TYPE: &str = "#Microsoft.OutlookServices.ItemAttachment";

/// A mailbox user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct User {
    /// The unique identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// The display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// The mail alias.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    /// The mailbox GUID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mailbox_guid: Option<String>,
}

/// A mail folder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Folder {
    /// The unique identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// The folder name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// The identifier of the parent folder.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_folder_id: Option<String>,
    /// The number of direct child folders.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub child_folder_count: Option<i32>,
}

impl Folder {
    /// Creates a folder value carrying only a display name, as used when
    /// creating a folder.
    #[must_use]
    pub fn named(display_name: impl Into<String>) -> Self {
        Self {
            display_name: Some(display_name.into()),
            ..Self::default()
        }
    }
}

/// An email address with an optional display name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EmailAddress {
    /// The display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// The SMTP address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// A message recipient.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Recipient {
    /// The recipient's address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_address: Option<EmailAddress>,
}

impl Recipient {
    /// Creates a recipient from an SMTP address.
    #[must_use]
    pub fn address(address: impl Into<String>) -> Self {
        Self {
            email_address: Some(EmailAddress {
                name: None,
                address: Some(address.into()),
            }),
        }
    }
}

/// The content type of an [`ItemBody`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyType {
    /// Plain text.
    #[default]
    Text,
    /// HTML markup.
    #[serde(rename = "HTML")]
    Html,
}

/// A message body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ItemBody {
    /// The body's content type.
    pub content_type: BodyType,
    /// The body content.
    pub content: String,
}

/// The importance of a message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Importance {
    /// Low importance.
    Low,
    /// Normal importance.
    #[default]
    Normal,
    /// High importance.
    High,
}

/// An email message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Message {
    /// The unique identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// The subject line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    /// The message body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<ItemBody>,
    /// The first characters of the body, as plain text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_preview: Option<String>,
    /// The mailbox owner the message was sent from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<Recipient>,
    /// The account that actually sent the message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender: Option<Recipient>,
    /// The primary recipients.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub to_recipients: Vec<Recipient>,
    /// The carbon-copy recipients.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cc_recipients: Vec<Recipient>,
    /// The blind carbon-copy recipients.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bcc_recipients: Vec<Recipient>,
    /// The message importance.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub importance: Option<Importance>,
    /// Whether the message has attachments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_attachments: Option<bool>,
    /// Whether the message has been read.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_read: Option<bool>,
    /// Whether the message is an unsent draft.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_draft: Option<bool>,
    /// The identifier of the containing folder.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_folder_id: Option<String>,
    /// When the message was sent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_time_sent: Option<DateTime<Utc>>,
    /// When the message was received.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_time_received: Option<DateTime<Utc>>,
    /// When the message was last changed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified_time: Option<DateTime<Utc>>,
}

/// A file or mailbox item attached to a message.
///
/// `ContentBytes` travels base64-encoded and is exposed here as raw bytes.
/// Item attachments carry the embedded message in `Item` instead.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Attachment {
    /// The attachment's OData type annotation.
    #[serde(rename = "@odata.type", skip_serializing_if = "Option::is_none")]
    pub odata_type: Option<String>,
    /// The unique identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// The file name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// The MIME type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    /// The size in bytes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<i64>,
    /// Whether the attachment is shown inline in the body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_inline: Option<bool>,
    /// The file content.
    #[serde(
        default,
        with = "content_bytes",
        skip_serializing_if = "Option::is_none"
    )]
    pub content_bytes: Option<Vec<u8>>,
    /// The attached message, for item attachments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<Box<Message>>,
}

impl Attachment {
    /// Creates a file attachment with the given name and content.
    #[must_use]
    pub fn file(name: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            odata_type: Some(FILE_ATTACHMENT_TYPE.to_string()),
            name: Some(name.into()),
            content_bytes: Some(content),
            ..Self::default()
        }
    }

    /// Creates an item attachment embedding `item`.
    #[must_use]
    pub fn item(name: impl Into<String>, item: Message) -> Self {
        Self {
            odata_type: Some(ITEM_ATTACHMENT_TYPE.to_string()),
            name: Some(name.into()),
            item: Some(Box::new(item)),
            ..Self::default()
        }
    }
}

mod content_bytes {
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        bytes: &Option<Vec<u8>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match bytes {
            Some(bytes) => serializer.serialize_some(&STANDARD.encode(bytes)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Vec<u8>>, D::Error> {
        Option::<String>::deserialize(deserializer)?
            .map(|encoded| STANDARD.decode(encoded).map_err(de::Error::custom))
            .transpose()
    }
}

impl ODataEntity for User {
    const NAME: &'static str = "User";
}

impl ODataEntity for Folder {
    const NAME: &'static str = "Folder";
}

impl ODataEntity for Message {
    const NAME: &'static str = "Message";
}

impl ODataEntity for Attachment {
    const NAME: &'static str = "Attachment";
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_message_deserializes_service_payload() {
        let payload = json!({
            "@odata.id": "https://outlook.office365.com/api/v1.0/Users('a')/Messages('1')",
            "Id": "1",
            "Subject": "Status",
            "Body": {"ContentType": "HTML", "Content": "<p>Hi</p>"},
            "From": {"EmailAddress": {"Name": "Ann", "Address": "ann@contoso.com"}},
            "ToRecipients": [{"EmailAddress": {"Address": "bob@contoso.com"}}],
            "Importance": "High",
            "IsRead": false,
            "DateTimeSent": "2014-10-20T08:30:00Z"
        });

        let message: Message = serde_json::from_value(payload).unwrap();

        assert_eq!(message.id.as_deref(), Some("1"));
        assert_eq!(message.body.as_ref().unwrap().content_type, BodyType::Html);
        assert_eq!(
            message.from.unwrap().email_address.unwrap().address.as_deref(),
            Some("ann@contoso.com")
        );
        assert_eq!(message.to_recipients.len(), 1);
        assert!(message.cc_recipients.is_empty());
        assert_eq!(message.importance, Some(Importance::High));
        assert_eq!(message.is_read, Some(false));
        assert_eq!(
            message.date_time_sent,
            Some(Utc.with_ymd_and_hms(2014, 10, 20, 8, 30, 0).unwrap())
        );
    }

    #[test]
    fn test_partial_message_serializes_only_set_fields() {
        let message = Message {
            subject: Some("Lunch?".to_string()),
            to_recipients: vec![Recipient::address("bob@contoso.com")],
            ..Message::default()
        };

        assert_eq!(
            serde_json::to_value(&message).unwrap(),
            json!({
                "Subject": "Lunch?",
                "ToRecipients": [{"EmailAddress": {"Address": "bob@contoso.com"}}]
            })
        );
    }

    #[test]
    fn test_file_attachment_encodes_content_as_base64() {
        let attachment = Attachment::file("notes.txt", b"hello".to_vec());

        assert_eq!(
            serde_json::to_value(&attachment).unwrap(),
            json!({
                "@odata.type": "#Microsoft.OutlookServices.FileAttachment",
                "Name": "notes.txt",
                "ContentBytes": "aGVsbG8="
            })
        );
    }

    #[test]
    fn test_item_attachment_embeds_message() {
        let forwarded = Message {
            subject: Some("Itinerary".to_string()),
            ..Message::default()
        };
        let attachment = Attachment::item("Itinerary", forwarded);

        assert_eq!(
            serde_json::to_value(&attachment).unwrap(),
            json!({
                "@odata.type": "#Microsoft.OutlookServices.ItemAttachment",
                "Name": "Itinerary",
                "Item": {"Subject": "Itinerary"}
            })
        );
    }

    #[test]
    fn test_attachment_decodes_base64_content() {
        let attachment: Attachment =
            serde_json::from_value(json!({"Id": "att1", "ContentBytes": "aGVsbG8="})).unwrap();
        assert_eq!(attachment.content_bytes.as_deref(), Some(&b"hello"[..]));

        let attachment: Attachment = serde_json::from_value(json!({"Id": "att2"})).unwrap();
        assert!(attachment.content_bytes.is_none());

        let result: Result<Attachment, _> =
            serde_json::from_value(json!({"ContentBytes": "not base64!"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_named_folder() {
        assert_eq!(
            serde_json::to_value(Folder::named("Receipts")).unwrap(),
            json!({"DisplayName": "Receipts"})
        );
    }
}
