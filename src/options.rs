//! Translates [`MongoProperties`] into the driver's [`ClientOptions`].


use std::time::Duration;

use mongodb::options::{
    Acknowledgment,
    ClientOptions,
    Credential,
    ReadPreference,
    SelectionCriteria,
    ServerAddress,
    Tls,
    TlsOptions,
    WriteConcern,
};

use crate::{
    error::{Error, Result},
    props::{MongoProp, MongoProperties},
    trace::CONNECTION_TRACING_EVENT_TARGET,
};

/// The port used for seeds that name none, when `PORT` is not set either.
pub const DEFAULT_PORT: u16 = 27017;

const DEFAULT_HOST: &str = "localhost";

/// Builds the options for a new driver client from `props`, attaching `credential` if given.
///
/// Empty property values are treated as if they were not set.
pub fn client_options(
    props: &MongoProperties,
    credential: Option<Credential>,
) -> Result<ClientOptions> {
    let mut options = ClientOptions::default();

    options.hosts = parse_hosts(props)?;
    options.credential = credential;
    options.app_name = props.get_non_empty(MongoProp::AppName).map(str::to_string);
    options.connect_timeout = get_duration(props, MongoProp::ConnectTimeout)?;
    options.server_selection_timeout = get_duration(props, MongoProp::MaxWaitTime)?;
    options.max_pool_size = get_u32(props, MongoProp::ConnectionsPerHost)?;
    options.selection_criteria = parse_read_preference(props)?.map(SelectionCriteria::from);
    options.write_concern = parse_write_concern(props)?;

    if let Some(socket_timeout) = get_duration(props, MongoProp::SocketTimeout)? {
        tracing::debug!(
            target: CONNECTION_TRACING_EVENT_TARGET,
            socketTimeoutMS = u64::try_from(socket_timeout.as_millis()).unwrap_or(u64::MAX),
            "socket timeout is not supported by the driver and will be ignored"
        );
    }

    if get_bool(props, MongoProp::UseSsl)? == Some(true) {
        options.tls = Some(Tls::Enabled(TlsOptions::default()));
    }

    if get_bool(props, MongoProp::UseAllReplicaSetMembers)? == Some(false)
        && options.hosts.len() == 1
    {
        options.direct_connection = Some(true);
    }

    Ok(options)
}

/// Parses the `HOST` list, applying `PORT` to every seed that does not name its own port.
pub fn parse_hosts(props: &MongoProperties) -> Result<Vec<ServerAddress>> {
    let default_port = match props.get_non_empty(MongoProp::Port) {
        Some(port) => parse_port(port)?,
        None => DEFAULT_PORT,
    };
    let hosts = props.get_non_empty(MongoProp::Host).unwrap_or(DEFAULT_HOST);

    hosts
        .split(',')
        .map(str::trim)
        .filter(|seed| !seed.is_empty())
        .map(|seed| {
            let address = ServerAddress::parse(seed).map_err(|err| {
                Error::invalid_argument(format!(
                    "`{}` entry `{}` is not a valid server address: {}",
                    MongoProp::Host,
                    seed,
                    err
                ))
            })?;
            match address {
                ServerAddress::Tcp { host, port } => {
                    if host.is_empty() || port == Some(0) {
                        return Err(Error::invalid_argument(format!(
                            "`{}` entry `{}` must name a host and a port between 1 and 65535",
                            MongoProp::Host,
                            seed
                        )));
                    }
                    Ok(ServerAddress::Tcp {
                        host,
                        port: Some(port.unwrap_or(default_port)),
                    })
                }
                other => Ok(other),
            }
        })
        .collect::<Result<Vec<_>>>()
        .and_then(|hosts| {
            if hosts.is_empty() {
                Err(Error::invalid_argument(format!(
                    "`{}` must name at least one server",
                    MongoProp::Host
                )))
            } else {
                Ok(hosts)
            }
        })
}

fn parse_port(value: &str) -> Result<u16> {
    match value.trim().parse::<u16>() {
        Ok(port) if port != 0 => Ok(port),
        _ => Err(Error::invalid_argument(format!(
            "`{}` `{}` must be an integer between 1 and 65535",
            MongoProp::Port,
            value
        ))),
    }
}

/// Parses the `readPreference` mode name, ignoring case.
pub fn parse_read_preference(props: &MongoProperties) -> Result<Option<ReadPreference>> {
    let Some(mode) = props.get_non_empty(MongoProp::ReadPreference) else {
        return Ok(None);
    };

    let read_preference = match mode.to_ascii_lowercase().as_str() {
        "primary" => ReadPreference::Primary,
        "primarypreferred" => ReadPreference::PrimaryPreferred { options: None },
        "secondary" => ReadPreference::Secondary { options: None },
        "secondarypreferred" => ReadPreference::SecondaryPreferred { options: None },
        "nearest" => ReadPreference::Nearest { options: None },
        _ => {
            return Err(Error::invalid_argument(format!(
                "`{}` must be one of primary, primaryPreferred, secondary, secondaryPreferred or \
                 nearest, got `{}`",
                MongoProp::ReadPreference,
                mode
            )))
        }
    };

    Ok(Some(read_preference))
}

/// Combines `writeConcern`, `wTimeout` and `JOURNALED` into a write concern. Returns `None` when
/// none of them are set.
pub fn parse_write_concern(props: &MongoProperties) -> Result<Option<WriteConcern>> {
    let w = props
        .get_non_empty(MongoProp::WriteConcern)
        .map(|w| match w.parse::<u32>() {
            Ok(nodes) => Acknowledgment::Nodes(nodes),
            Err(_) if w.eq_ignore_ascii_case("majority") => Acknowledgment::Majority,
            Err(_) => Acknowledgment::Custom(w.to_string()),
        });
    let w_timeout = get_duration(props, MongoProp::WTimeout)?;
    let journal = get_bool(props, MongoProp::Journaled)?;

    if w.is_none() && w_timeout.is_none() && journal.is_none() {
        return Ok(None);
    }

    Ok(Some(
        WriteConcern::builder()
            .w(w)
            .w_timeout(w_timeout)
            .journal(journal)
            .build(),
    ))
}

fn get_duration(props: &MongoProperties, prop: MongoProp) -> Result<Option<Duration>> {
    props
        .get_non_empty(prop)
        .map(|value| match value.trim().parse::<u64>() {
            Ok(ms) => Ok(Duration::from_millis(ms)),
            Err(_) => Err(Error::invalid_argument(format!(
                "`{}` must be a non-negative integer number of milliseconds, got `{}`",
                prop, value
            ))),
        })
        .transpose()
}

fn get_u32(props: &MongoProperties, prop: MongoProp) -> Result<Option<u32>> {
    props
        .get_non_empty(prop)
        .map(|value| match value.trim().parse::<u32>() {
            Ok(n) if n > 0 => Ok(n),
            _ => Err(Error::invalid_argument(format!(
                "`{}` must be a positive integer, got `{}`",
                prop, value
            ))),
        })
        .transpose()
}

fn get_bool(props: &MongoProperties, prop: MongoProp) -> Result<Option<bool>> {
    props
        .get_non_empty(prop)
        .map(|value| match value.trim().to_ascii_lowercase().as_str() {
            "true" | "y" => Ok(true),
            "false" | "n" => Ok(false),
            _ => Err(Error::invalid_argument(format!(
                "`{}` must be a boolean, got `{}`",
                prop, value
            ))),
        })
        .transpose()
}
