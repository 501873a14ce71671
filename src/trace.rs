use crate::{
    auth::{AuthStrategy, CredentialDescriptor},
    props::MongoProperties,
};

pub(crate) const CREDENTIAL_TRACING_EVENT_TARGET: &str = "mongo_client_wrapper::credential";
pub(crate) const CONNECTION_TRACING_EVENT_TARGET: &str = "mongo_client_wrapper::connection";

pub(crate) const REDACTED: &str = "REDACTED";

/// Renders a value for use as a tracing field. Implementations must never include a password.
pub(crate) trait TracingRepresentation {
    type Representation;

    fn tracing_representation(&self) -> Self::Representation;
}

impl TracingRepresentation for MongoProperties {
    type Representation = String;

    fn tracing_representation(&self) -> String {
        format!("{:?}", self)
    }
}

impl TracingRepresentation for CredentialDescriptor {
    type Representation = String;

    fn tracing_representation(&self) -> String {
        format!(
            "{{ mechanism: {}, username: {}, source: {} }}",
            self.mechanism,
            self.username.as_deref().unwrap_or("<none>"),
            self.auth_database.as_deref().unwrap_or("<none>"),
        )
    }
}

impl TracingRepresentation for AuthStrategy {
    type Representation = &'static str;

    fn tracing_representation(&self) -> &'static str {
        self.as_str()
    }
}

impl TracingRepresentation for crate::error::Error {
    type Representation = String;

    fn tracing_representation(&self) -> String {
        self.to_string()
    }
}
