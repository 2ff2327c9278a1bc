use esmap_core::connection::ConnectionSettings;
use esmap_core::error::Error;

#[test]
fn endpoint_is_plain_http() {
    let settings = ConnectionSettings::new(" localhost ", 9200, "places");
    assert_eq!(settings.endpoint().as_deref(), Some("http://localhost:9200"));
    assert!(settings.validate().is_ok());
}

#[test]
fn endpoint_needs_host_and_port() {
    let mut settings = ConnectionSettings::default();
    assert_eq!(settings.endpoint(), None);
    settings.host = "localhost".to_string();
    assert_eq!(settings.endpoint(), None);
    settings.port = Some(9201);
    assert_eq!(settings.endpoint().as_deref(), Some("http://localhost:9201"));
}

#[test]
fn validate_lists_missing_fields() {
    let settings = ConnectionSettings { host: "localhost".to_string(), ..ConnectionSettings::default() };
    let err = settings.validate().unwrap_err();
    assert!(matches!(err, Error::MissingConnectionFields(ref missing) if missing == &["port", "index"]));
    assert_eq!(err.to_string(), "All fields are required. Missing: port, index");
}

#[test]
fn basic_auth_requires_both_credentials() {
    let anonymous = ConnectionSettings::new("localhost", 9200, "places");
    assert_eq!(anonymous.basic_auth(), None);

    let half = ConnectionSettings { username: Some("elastic".to_string()), ..anonymous.clone() };
    assert_eq!(half.basic_auth(), None);

    let blank = anonymous.clone().with_credentials("elastic", "");
    assert_eq!(blank.basic_auth(), None);

    let full = anonymous.with_credentials("elastic", "secret");
    assert_eq!(full.basic_auth(), Some(("elastic", "secret")));
}

#[test]
fn debug_output_hides_password() {
    let settings = ConnectionSettings::new("localhost", 9200, "places").with_credentials("elastic", "secret");
    let debug = format!("{settings:?}");
    assert!(!debug.contains("secret"), "{debug}");
    assert!(debug.contains("***"));
}
