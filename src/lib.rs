//! This crate wraps the official [`mongodb`] driver behind a flat, string-keyed set of connection
//! properties, choosing how clients authenticate from that configuration.
//!
//! # Example Usage
//!
//! ## Resolving credentials
//! ```
//! use mongo_client_wrapper::{build_credentials, CredentialMechanism, MongoProp, MongoProperties};
//!
//! let props = MongoProperties::builder()
//!     .set(MongoProp::Username, "alice")
//!     .set(MongoProp::Password, "secret")
//!     .set(MongoProp::DbName, "sales")
//!     .set(MongoProp::AuthMecha, "SCRAM-SHA-1")
//!     .build();
//!
//! let credentials = build_credentials(&props);
//! assert_eq!(credentials.len(), 1);
//! assert_eq!(credentials[0].mechanism, CredentialMechanism::ScramSha1);
//! // With no AUTH_DATABASE, credentials are verified against DBNAME.
//! assert_eq!(credentials[0].auth_database.as_deref(), Some("sales"));
//! ```
//!
//! ## Creating a client
//! ```no_run
//! # async fn foo() -> mongo_client_wrapper::error::Result<()> {
//! use mongo_client_wrapper::{MongoClientWrapper, MongoProp, MongoProperties};
//!
//! let props = MongoProperties::builder()
//!     .set(MongoProp::Host, "db1.example.com:27017,db2.example.com:27017")
//!     .set(MongoProp::DbName, "sales")
//!     .set(MongoProp::Username, "alice")
//!     .set(MongoProp::Password, "secret")
//!     .set(MongoProp::AuthDatabase, "admin")
//!     .set(MongoProp::ReadPreference, "secondaryPreferred")
//!     .build();
//!
//! let wrapper = MongoClientWrapper::from_properties(props)?;
//! for name in wrapper.database_names().await? {
//!     println!("{}", name);
//! }
//! wrapper.dispose().await;
//! # Ok(()) }
//! ```
//!
//! # Authentication strategies
//!
//! A non-empty `USERNAME` property selects [`AuthStrategy::UsernamePassword`]; otherwise clients
//! connect with [`AuthStrategy::NoAuth`]. Username/password credentials request SCRAM-SHA-1 when
//! `AUTH_MECHA` is exactly `SCRAM-SHA-1` and otherwise leave the mechanism to the driver's
//! negotiation with the server.
//!
//! # Logging
//!
//! Events are emitted through [`tracing`] under the `mongo_client_wrapper::credential` and
//! `mongo_client_wrapper::connection` targets. Passwords are never included.

#![warn(missing_docs)]

pub mod auth;
pub mod error;
pub mod options;
pub mod props;
mod trace;
mod wrapper;

pub use ::mongodb;

pub use crate::{
    auth::{build_credentials, AuthStrategy, CredentialDescriptor, CredentialMechanism},
    props::{MongoProp, MongoProperties, MongoPropertiesBuilder},
    wrapper::MongoClientWrapper,
};
