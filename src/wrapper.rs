//! Contains [`MongoClientWrapper`], which owns a driver [`Client`] together with the
//! authentication strategy it was built with.


use mongodb::{options::Credential, Client, Database};

use crate::{
    auth::{AuthStrategy, CredentialDescriptor},
    error::Result,
    options::client_options,
    props::{MongoProp, MongoProperties},
    trace::{TracingRepresentation, CONNECTION_TRACING_EVENT_TARGET},
};

/// A driver client plus the configuration and credentials it was created from.
///
/// Construct one with [`MongoClientWrapper::from_properties`], or wrap an existing client with
/// [`MongoClientWrapper::from_client`].
#[derive(Clone, Debug)]
pub struct MongoClientWrapper {
    client: Client,
    props: Option<MongoProperties>,
    strategy: AuthStrategy,
    user: Option<String>,
}

impl MongoClientWrapper {
    /// Creates a client configured by `props`.
    ///
    /// The authentication strategy is chosen from the properties (see
    /// [`AuthStrategy::from_properties`]). No connection is opened here: the driver connects and
    /// authenticates lazily, so missing or wrong credentials surface on first use. Must be
    /// called from within a tokio runtime.
    pub fn from_properties(props: MongoProperties) -> Result<Self> {
        let strategy = AuthStrategy::from_properties(&props);
        let credential = strategy
            .credentials(&props)
            .into_iter()
            .next()
            .map(Credential::from);

        let client = client_options(&props, credential)
            .and_then(|options| Ok(Client::with_options(options)?))
            .inspect_err(|err| {
                tracing::debug!(
                    target: CONNECTION_TRACING_EVENT_TARGET,
                    strategy = strategy.tracing_representation(),
                    properties = props.tracing_representation(),
                    error = err.tracing_representation(),
                    "failed to create client"
                );
            })?;

        tracing::debug!(
            target: CONNECTION_TRACING_EVENT_TARGET,
            strategy = strategy.tracing_representation(),
            properties = props.tracing_representation(),
            "created client"
        );

        let user = props.get(MongoProp::Username).map(str::to_string);

        Ok(Self {
            client,
            props: Some(props),
            strategy,
            user,
        })
    }

    /// Wraps a client that was created elsewhere.
    ///
    /// No properties are retained, so [`credential_list`](Self::credential_list) is empty for
    /// wrappers built this way.
    pub fn from_client(client: Client, user: impl Into<Option<String>>) -> Self {
        let user = user.into();
        let strategy = AuthStrategy::for_user(user.as_deref());

        tracing::debug!(
            target: CONNECTION_TRACING_EVENT_TARGET,
            strategy = strategy.tracing_representation(),
            user = user.as_deref(),
            "wrapped existing client"
        );

        Self {
            client,
            props: None,
            strategy,
            user,
        }
    }

    /// The user this wrapper authenticates as, if any.
    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    /// The wrapped driver client.
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// How this wrapper's client authenticates.
    pub fn strategy(&self) -> AuthStrategy {
        self.strategy
    }

    /// The properties this wrapper was created from. `None` for wrappers built with
    /// [`from_client`](Self::from_client).
    pub fn properties(&self) -> Option<&MongoProperties> {
        self.props.as_ref()
    }

    /// Rebuilds the credentials described by this wrapper's properties.
    pub fn credential_list(&self) -> Vec<CredentialDescriptor> {
        match &self.props {
            Some(props) => self.strategy.credentials(props),
            None => Vec::new(),
        }
    }

    /// Gets a handle to the database named `name`.
    pub fn database(&self, name: &str) -> Database {
        self.client.database(name)
    }

    /// Lists the names of the databases visible to this client.
    pub async fn database_names(&self) -> Result<Vec<String>> {
        Ok(self.client.list_database_names().await?)
    }

    /// Lists the names of the collections in database `db`.
    pub async fn collection_names(&self, db: &str) -> Result<Vec<String>> {
        Ok(self.client.database(db).list_collection_names().await?)
    }

    /// Shuts the underlying client down, waiting for outstanding operations to finish.
    pub async fn dispose(self) {
        tracing::debug!(
            target: CONNECTION_TRACING_EVENT_TARGET,
            strategy = self.strategy.tracing_representation(),
            "disposing client"
        );
        self.client.shutdown().await;
    }
}
