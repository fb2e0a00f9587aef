//! # OData Client for Rust
//!
//! A Rust library for building and executing OData queries against a remote
//! service, with a ready-made mail client on top.
//!
//! ## Overview
//!
//! This library provides:
//! - Type-safe configuration via [`ODataConfig`] and [`ODataConfigBuilder`]
//! - Validated newtypes for the service root and bearer token
//! - A query tree ([`odata`]) that composes resource paths and query
//!   options (`$top`, `$skip`, `$select`, `expand`, `filter`) node by node
//! - Async execution through a pluggable [`Transport`] and [`Codec`]
//! - An async reqwest-backed HTTP transport with retry on throttling
//! - Mail entities, navigation and actions plus a [`MailClient`]
//!
//! ## Quick Start
//!
//! ```rust
//! use odata_client::{AccessToken, ODataConfig, ServiceRoot};
//!
//! let config = ODataConfig::builder()
//!     .service_root(ServiceRoot::new("https://outlook.office365.com/api/v1.0").unwrap())
//!     .access_token(AccessToken::new("your-access-token").unwrap())
//!     .max_tries(3)
//!     .build()
//!     .unwrap();
//! ```
//!
//! ## Building Queries
//!
//! Every request starts at an [`EntryPoint`] and navigates towards the
//! resource. Nothing is sent until the operation's future is awaited.
//!
//! ```rust,ignore
//! use odata_client::MailClient;
//!
//! let client = MailClient::new(&config);
//!
//! // GET Me/Folders('Inbox')/Messages?&$top=10&$skip=5&$select=Id,Subject
//! let messages = client
//!     .entry_point()
//!     .me()
//!     .folders()
//!     .get_by_key("Inbox")?
//!     .messages()
//!     .top(10)
//!     .skip(5)
//!     .select("Id,Subject")
//!     .execute()
//!     .await?;
//!
//! // POST Me/Messages('AAMk...')/Reply
//! client.reply(&messages[0].id.clone().unwrap_or_default(), "Thanks!").await?;
//! ```
//!
//! ## Error Handling
//!
//! Invalid caller input (for example an empty key) is reported as
//! [`ODataError::InvalidArgument`] before any request is built. Transport
//! failures surface when the future is awaited, with HTTP 404 mapped to
//! [`ODataError::NotFound`] and everything else passed through as
//! [`ODataError::Transport`].
//!
//! ## Design Principles
//!
//! - **No global state**: Collaborators are bundled in a
//!   [`DependencyResolver`] and passed explicitly
//! - **Fail-fast validation**: All newtypes validate on construction
//! - **Thread-safe**: All types are `Send + Sync`
//! - **Async-first**: Designed for use with Tokio async runtime
//! - **Single owner**: Query nodes are consumed as they are extended

pub mod clients;
pub mod config;
pub mod error;
pub mod mail;
pub mod odata;

// Re-export public types at crate root for convenience
pub use config::{AccessToken, ODataConfig, ODataConfigBuilder, ServiceRoot, DEFAULT_PAGE_SIZE};
pub use error::ConfigError;

// Re-export HTTP client types
pub use clients::{
    DataType, HttpClient, HttpError, HttpMethod, HttpRequest, HttpRequestBuilder,
    HttpResponseError, InvalidHttpRequestError, MaxHttpRetriesExceededError,
};

// Re-export query core types
pub use odata::{
    Codec, CodecError, DependencyResolver, EntityQuery, EntityRegistry, EntryPoint, JsonCodec,
    ODataCollection, ODataEntity, ODataError, QueryOptions, Transport,
};

// Re-export the mail client
pub use mail::{MailClient, MessageQueryOptions};
