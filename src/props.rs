//! Contains the property bag that configures a [`MongoClientWrapper`](crate::MongoClientWrapper).


use std::{collections::HashMap, fmt, str::FromStr};

use serde::{de::Error as _, Deserialize, Deserializer};

use crate::{
    error::{Error, Result},
    trace::REDACTED,
};

macro_rules! mongo_props {
    ($($(#[$meta:meta])* $variant:ident => $name:literal,)+) => {
        /// The keys understood by [`MongoProperties`].
        ///
        /// Each key has a canonical string name, which is what [`FromStr`], [`Display`](fmt::Display)
        /// and deserialization use.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[non_exhaustive]
        pub enum MongoProp {
            $($(#[$meta])* $variant,)+
        }

        impl MongoProp {
            /// Every known key, in declaration order.
            pub const ALL: &'static [MongoProp] = &[$(MongoProp::$variant,)+];

            /// The canonical name of this key.
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(MongoProp::$variant => $name,)+
                }
            }
        }

        impl FromStr for MongoProp {
            type Err = Error;

            fn from_str(str: &str) -> Result<Self> {
                match str {
                    $($name => Ok(MongoProp::$variant),)+
                    _ => Err(Error::invalid_argument(format!(
                        "unknown connection property: {}",
                        str
                    ))),
                }
            }
        }
    };
}

mongo_props! {
    /// Comma-separated list of `host[:port]` seeds.
    Host => "HOST",
    /// Port used for seeds that do not name one explicitly.
    Port => "PORT",
    /// The database that will be queried. Also the fallback authentication database.
    DbName => "DBNAME",
    /// Maximum number of pooled connections per server.
    ConnectionsPerHost => "connectionsPerHost",
    /// Connect timeout in milliseconds.
    ConnectTimeout => "connectTimeout",
    /// Server selection timeout in milliseconds.
    MaxWaitTime => "maxWaitTime",
    /// Socket timeout in milliseconds.
    SocketTimeout => "socketTimeout",
    /// Read preference mode name.
    ReadPreference => "readPreference",
    /// Write concern: `majority`, a node count, or a custom tag set name.
    WriteConcern => "writeConcern",
    /// Write concern timeout in milliseconds.
    WTimeout => "wTimeout",
    /// Whether writes must be journaled.
    Journaled => "JOURNALED",
    /// Whether to discover and use every member of a replica set.
    UseAllReplicaSetMembers => "USE_ALL_REPLICA_SET_MEMBERS",
    /// Whether to connect over TLS.
    UseSsl => "useSSL",
    /// Application name sent in the connection handshake.
    AppName => "appName",
    /// The user to authenticate as. A non-empty value enables username/password auth.
    Username => "USERNAME",
    /// The password for `USERNAME`. Never rendered by `Debug`.
    Password => "PASSWORD",
    /// The database the credentials are verified against.
    AuthDatabase => "AUTH_DATABASE",
    /// Authentication mechanism name, e.g. `SCRAM-SHA-1`.
    AuthMecha => "AUTH_MECHA",
}

impl fmt::Display for MongoProp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for MongoProp {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        MongoProp::from_str(&s).map_err(D::Error::custom)
    }
}

/// A read-only bag of connection properties keyed by [`MongoProp`].
///
/// ```
/// use mongo_client_wrapper::{MongoProp, MongoProperties};
///
/// let props = MongoProperties::builder()
///     .set(MongoProp::Host, "db.example.com")
///     .set(MongoProp::DbName, "sales")
///     .build();
/// assert_eq!(props.get(MongoProp::DbName), Some("sales"));
/// assert_eq!(props.get(MongoProp::Username), None);
/// ```
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct MongoProperties {
    props: HashMap<MongoProp, String>,
}

impl MongoProperties {
    /// Creates an empty property bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts building a property bag.
    pub fn builder() -> MongoPropertiesBuilder {
        MongoPropertiesBuilder::default()
    }

    /// Builds a property bag from string key/value pairs, rejecting unknown keys.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        pairs
            .into_iter()
            .map(|(k, v)| -> Result<(MongoProp, String)> {
                Ok((k.as_ref().parse()?, v.into()))
            })
            .collect()
    }

    /// Returns the value stored for `prop`, if any.
    pub fn get(&self, prop: MongoProp) -> Option<&str> {
        self.props.get(&prop).map(String::as_str)
    }

    /// Returns the value stored for `prop` unless it is missing or the empty string.
    pub fn get_non_empty(&self, prop: MongoProp) -> Option<&str> {
        self.get(prop).filter(|v| !v.is_empty())
    }

    /// Stores `value` under `prop`, returning the previous value.
    pub fn set(&mut self, prop: MongoProp, value: impl Into<String>) -> Option<String> {
        self.props.insert(prop, value.into())
    }

    /// Removes the value stored under `prop`.
    pub fn remove(&mut self, prop: MongoProp) -> Option<String> {
        self.props.remove(&prop)
    }

    /// Whether a value, possibly empty, is stored under `prop`.
    pub fn contains(&self, prop: MongoProp) -> bool {
        self.props.contains_key(&prop)
    }

    /// The number of stored properties.
    pub fn len(&self) -> usize {
        self.props.len()
    }

    /// Whether no properties are stored.
    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
    }

    /// Iterates over the stored properties in key order.
    pub fn iter(&self) -> impl Iterator<Item = (MongoProp, &str)> {
        let mut entries: Vec<_> = self.props.iter().map(|(k, v)| (*k, v.as_str())).collect();
        entries.sort_by_key(|(k, _)| *k);
        entries.into_iter()
    }
}

impl fmt::Debug for MongoProperties {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (prop, value) in self.iter() {
            match prop {
                MongoProp::Password => map.entry(&prop.as_str(), &REDACTED),
                _ => map.entry(&prop.as_str(), &value),
            };
        }
        map.finish()
    }
}

impl<V: Into<String>> FromIterator<(MongoProp, V)> for MongoProperties {
    fn from_iter<T: IntoIterator<Item = (MongoProp, V)>>(iter: T) -> Self {
        Self {
            props: iter.into_iter().map(|(k, v)| (k, v.into())).collect(),
        }
    }
}

/// Builder for [`MongoProperties`].
#[derive(Debug, Default)]
pub struct MongoPropertiesBuilder {
    props: MongoProperties,
}

impl MongoPropertiesBuilder {
    /// Sets `prop` to `value`, replacing any earlier value.
    pub fn set(mut self, prop: MongoProp, value: impl Into<String>) -> Self {
        self.props.set(prop, value);
        self
    }

    /// Sets `prop` to `value` if `value` is `Some`.
    pub fn set_opt(self, prop: MongoProp, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(value) => self.set(prop, value),
            None => self,
        }
    }

    /// Finishes building.
    pub fn build(self) -> MongoProperties {
        self.props
    }
}
