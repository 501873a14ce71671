//! Contains the types needed to turn connection properties into the credentials handed to the
//! driver.

#[cfg(test)]
mod test;

use std::fmt;

use mongodb::options::{AuthMechanism, Credential};
use typed_builder::TypedBuilder;

use crate::{
    props::{MongoProp, MongoProperties},
    trace::{TracingRepresentation, CREDENTIAL_TRACING_EVENT_TARGET, REDACTED},
};

const SCRAM_SHA_1_STR: &str = "SCRAM-SHA-1";
const NEGOTIATED_STR: &str = "negotiated";

/// The credential mechanisms a [`CredentialDescriptor`] can request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CredentialMechanism {
    /// Let the driver negotiate its default mechanism with the server.
    #[default]
    Default,

    /// The SCRAM-SHA-1 mechanism as defined in [RFC 5802](http://tools.ietf.org/html/rfc5802).
    ScramSha1,
}

impl CredentialMechanism {
    /// Selects a mechanism from the `AUTH_MECHA` property value.
    ///
    /// Only the exact string `SCRAM-SHA-1` selects [`CredentialMechanism::ScramSha1`]; every
    /// other value, including differently-cased spellings and names of other mechanisms, falls
    /// back to [`CredentialMechanism::Default`].
    pub fn from_property(value: &str) -> Self {
        match value {
            SCRAM_SHA_1_STR => CredentialMechanism::ScramSha1,
            _ => CredentialMechanism::Default,
        }
    }

    /// A display name for log output. `SCRAM-SHA-1` matches its `AUTH_MECHA` spelling; the
    /// default mechanism renders as `negotiated`.
    pub fn as_str(&self) -> &'static str {
        match self {
            CredentialMechanism::Default => NEGOTIATED_STR,
            CredentialMechanism::ScramSha1 => SCRAM_SHA_1_STR,
        }
    }

    /// The mechanism the driver is told to use. `None` leaves the choice to server negotiation.
    pub fn to_auth_mechanism(&self) -> Option<AuthMechanism> {
        match self {
            CredentialMechanism::Default => None,
            CredentialMechanism::ScramSha1 => Some(AuthMechanism::ScramSha1),
        }
    }
}

impl fmt::Display for CredentialMechanism {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully resolved set of credentials for a single database session.
///
/// Missing usernames and passwords are carried as `None` rather than rejected here; the driver
/// refuses them when it authenticates a connection.
#[derive(Clone, Default, PartialEq, Eq, TypedBuilder)]
#[builder(field_defaults(default, setter(into)))]
pub struct CredentialDescriptor {
    /// Which mechanism to request from the driver.
    pub mechanism: CredentialMechanism,

    /// The username to authenticate with.
    pub username: Option<String>,

    /// The password to authenticate with. Never rendered by `Debug` or in tracing events.
    pub password: Option<String>,

    /// The database the username and password are verified against.
    pub auth_database: Option<String>,
}

impl fmt::Debug for CredentialDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialDescriptor")
            .field("mechanism", &self.mechanism)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| REDACTED))
            .field("auth_database", &self.auth_database)
            .finish()
    }
}

impl From<CredentialDescriptor> for Credential {
    fn from(descriptor: CredentialDescriptor) -> Self {
        Credential::builder()
            .mechanism(descriptor.mechanism.to_auth_mechanism())
            .username(descriptor.username)
            .password(descriptor.password)
            .source(descriptor.auth_database)
            .build()
    }
}

/// Resolves the authentication database: `AUTH_DATABASE` unless it is missing or empty, in which
/// case `DBNAME` is used. Never returns an empty name; `None` leaves the choice to the driver.
pub fn resolve_auth_database(props: &MongoProperties) -> Option<String> {
    props
        .get_non_empty(MongoProp::AuthDatabase)
        .or_else(|| props.get_non_empty(MongoProp::DbName))
        .map(str::to_string)
}

/// Builds the username/password credentials described by `props`.
///
/// The returned list always holds exactly one descriptor.
pub fn build_credentials(props: &MongoProperties) -> Vec<CredentialDescriptor> {
    let auth_mecha = props.get(MongoProp::AuthMecha).unwrap_or("");

    let descriptor = CredentialDescriptor {
        mechanism: CredentialMechanism::from_property(auth_mecha),
        username: props.get(MongoProp::Username).map(str::to_string),
        password: props.get(MongoProp::Password).map(str::to_string),
        auth_database: resolve_auth_database(props),
    };

    tracing::debug!(
        target: CREDENTIAL_TRACING_EVENT_TARGET,
        credential = descriptor.tracing_representation(),
        "resolved credential"
    );

    vec![descriptor]
}

/// How a client authenticates with the server.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AuthStrategy {
    /// Connections are not authenticated.
    NoAuth,

    /// Connections authenticate with a username and password.
    UsernamePassword,
}

impl AuthStrategy {
    /// Selects a strategy from configuration: a non-empty `USERNAME` requests username/password
    /// authentication.
    pub fn from_properties(props: &MongoProperties) -> Self {
        Self::for_user(props.get(MongoProp::Username))
    }

    pub(crate) fn for_user(user: Option<&str>) -> Self {
        match user {
            Some(user) if !user.is_empty() => AuthStrategy::UsernamePassword,
            _ => AuthStrategy::NoAuth,
        }
    }

    /// The credentials this strategy attaches to new connections.
    pub fn credentials(&self, props: &MongoProperties) -> Vec<CredentialDescriptor> {
        match self {
            AuthStrategy::NoAuth => Vec::new(),
            AuthStrategy::UsernamePassword => build_credentials(props),
        }
    }

    /// A short name for this strategy, used in log output.
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthStrategy::NoAuth => "NoAuth",
            AuthStrategy::UsernamePassword => "UsernamePassword",
        }
    }
}

impl fmt::Display for AuthStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
