use mongodb::options::{AuthMechanism, Credential};
use pretty_assertions::assert_eq;

use crate::{
    auth::{build_credentials, AuthStrategy, CredentialDescriptor, CredentialMechanism},
    props::{MongoProp, MongoProperties},
};

fn props(pairs: &[(MongoProp, &str)]) -> MongoProperties {
    pairs.iter().map(|(k, v)| (*k, *v)).collect()
}

#[test]
fn scram_sha1_with_empty_auth_database_uses_dbname() {
    let props = props(&[
        (MongoProp::Username, "alice"),
        (MongoProp::Password, "p"),
        (MongoProp::AuthDatabase, ""),
        (MongoProp::DbName, "sales"),
        (MongoProp::AuthMecha, "SCRAM-SHA-1"),
    ]);

    assert_eq!(
        build_credentials(&props),
        vec![CredentialDescriptor {
            mechanism: CredentialMechanism::ScramSha1,
            username: Some("alice".to_string()),
            password: Some("p".to_string()),
            auth_database: Some("sales".to_string()),
        }]
    );
}

#[test]
fn missing_mechanism_with_explicit_auth_database() {
    let props = props(&[
        (MongoProp::Username, "bob"),
        (MongoProp::Password, "q"),
        (MongoProp::AuthDatabase, "admin"),
        (MongoProp::DbName, "sales"),
    ]);

    assert_eq!(
        build_credentials(&props),
        vec![CredentialDescriptor {
            mechanism: CredentialMechanism::Default,
            username: Some("bob".to_string()),
            password: Some("q".to_string()),
            auth_database: Some("admin".to_string()),
        }]
    );
}

#[test]
fn missing_auth_database_uses_dbname() {
    let props = props(&[
        (MongoProp::Username, "bob"),
        (MongoProp::Password, "q"),
        (MongoProp::DbName, "sales"),
    ]);

    let creds = build_credentials(&props);
    assert_eq!(creds.len(), 1);
    assert_eq!(creds[0].auth_database.as_deref(), Some("sales"));
}

#[test]
fn empty_or_missing_dbname_resolves_to_no_auth_database() {
    let cases = [
        props(&[(MongoProp::Username, "u"), (MongoProp::Password, "p")]),
        props(&[
            (MongoProp::Username, "u"),
            (MongoProp::Password, "p"),
            (MongoProp::DbName, ""),
        ]),
        props(&[
            (MongoProp::Username, "u"),
            (MongoProp::Password, "p"),
            (MongoProp::AuthDatabase, ""),
            (MongoProp::DbName, ""),
        ]),
    ];

    for props in cases {
        let creds = build_credentials(&props);
        assert_eq!(creds.len(), 1);
        assert_eq!(creds[0].auth_database, None, "{:?}", props);
        assert_eq!(Credential::from(creds[0].clone()).source, None);
    }
}

#[test]
fn mechanism_display_names() {
    assert_eq!(CredentialMechanism::ScramSha1.to_string(), "SCRAM-SHA-1");
    assert_eq!(CredentialMechanism::Default.to_string(), "negotiated");
    assert_eq!(
        CredentialMechanism::from_property(CredentialMechanism::Default.as_str()),
        CredentialMechanism::Default
    );
}

#[test]
fn mechanism_match_is_exact() {
    for mecha in [
        "",
        "scram-sha-1",
        " SCRAM-SHA-1",
        "SCRAM-SHA-1 ",
        "SCRAM-SHA-256",
        "MONGODB-CR",
        "PLAIN",
    ] {
        let props = props(&[
            (MongoProp::Username, "u"),
            (MongoProp::Password, "p"),
            (MongoProp::AuthMecha, mecha),
        ]);
        assert_eq!(
            build_credentials(&props)[0].mechanism,
            CredentialMechanism::Default,
            "AUTH_MECHA {:?} should fall back to the default mechanism",
            mecha
        );
    }
}

#[test]
fn missing_username_and_password_pass_through() {
    let props = props(&[(MongoProp::DbName, "sales")]);

    assert_eq!(
        build_credentials(&props),
        vec![CredentialDescriptor::builder()
            .auth_database("sales".to_string())
            .build()]
    );
}

#[test]
fn descriptor_debug_redacts_password() {
    let descriptor = CredentialDescriptor::builder()
        .mechanism(CredentialMechanism::ScramSha1)
        .username("alice".to_string())
        .password("hunter2".to_string())
        .auth_database("admin".to_string())
        .build();

    let rendered = format!("{:?}", descriptor);
    assert!(rendered.contains("alice"));
    assert!(rendered.contains("REDACTED"));
    assert!(!rendered.contains("hunter2"));
}

#[test]
fn scram_descriptor_into_driver_credential() {
    let credential: Credential = CredentialDescriptor::builder()
        .mechanism(CredentialMechanism::ScramSha1)
        .username("alice".to_string())
        .password("p".to_string())
        .auth_database("sales".to_string())
        .build()
        .into();

    assert_eq!(credential.mechanism, Some(AuthMechanism::ScramSha1));
    assert_eq!(credential.username.as_deref(), Some("alice"));
    assert_eq!(credential.password.as_deref(), Some("p"));
    assert_eq!(credential.source.as_deref(), Some("sales"));
}

#[test]
fn default_descriptor_leaves_mechanism_to_negotiation() {
    let credential: Credential = CredentialDescriptor::builder()
        .username("bob".to_string())
        .password("q".to_string())
        .auth_database("admin".to_string())
        .build()
        .into();

    assert_eq!(credential.mechanism, None);
    assert_eq!(credential.source.as_deref(), Some("admin"));
}

#[test]
fn strategy_selection() {
    assert_eq!(
        AuthStrategy::from_properties(&props(&[(MongoProp::Username, "alice")])),
        AuthStrategy::UsernamePassword
    );
    assert_eq!(
        AuthStrategy::from_properties(&props(&[(MongoProp::Username, "")])),
        AuthStrategy::NoAuth
    );
    assert_eq!(
        AuthStrategy::from_properties(&MongoProperties::new()),
        AuthStrategy::NoAuth
    );
}

#[test]
fn strategy_credentials() {
    let props = props(&[
        (MongoProp::Username, "alice"),
        (MongoProp::Password, "p"),
        (MongoProp::DbName, "sales"),
    ]);

    assert!(AuthStrategy::NoAuth.credentials(&props).is_empty());
    assert_eq!(
        AuthStrategy::UsernamePassword.credentials(&props),
        build_credentials(&props)
    );
}
