//! Tests for the store module

use super::*;
use crate::error::Error;
use test_case::test_case;

const CONN: &str = "Endpoint=https://store.example.io;Id=cred-1;Secret=c2VjcmV0";

// ============================================================================
// ConfigStore Tests
// ============================================================================

#[test]
fn test_store_without_label() {
    let store = ConfigStore::new("primary", CONN);
    assert_eq!(store.name(), "primary");
    assert!(store.labels().is_empty());
    assert_eq!(store.label_filter(), None);
}

#[test]
fn test_store_labels_keep_order() {
    let store = ConfigStore::new("primary", CONN).with_label("prod,dev,default");
    assert_eq!(store.labels(), vec!["prod", "dev", "default"]);
    assert_eq!(store.label_filter(), Some("prod,dev,default".to_string()));
}

#[test]
fn test_store_labels_trim_blank_and_repeated() {
    let store = ConfigStore::new("primary", CONN).with_label(" prod , ,dev,prod,");
    assert_eq!(store.labels(), vec!["prod", "dev"]);
    assert_eq!(store.label_filter(), Some("prod,dev".to_string()));
}

#[test]
fn test_store_blank_label_is_no_filter() {
    let store = ConfigStore::new("primary", CONN).with_label(" , ");
    assert_eq!(store.label_filter(), None);
}

// ============================================================================
// ConnectionString Tests
// ============================================================================

#[test]
fn test_parse_connection_string() {
    let conn = ConnectionString::parse(CONN).unwrap();
    assert_eq!(conn.endpoint().as_str(), "https://store.example.io/");
    assert_eq!(conn.id(), "cred-1");
    assert_eq!(conn.secret(), "c2VjcmV0");
    assert_eq!(conn.secret_bytes().unwrap(), b"secret");
}

#[test]
fn test_parse_secret_with_padding() {
    let conn: ConnectionString = "endpoint=http://localhost:8080;id=x;secret=YWJjZA=="
        .parse()
        .unwrap();
    assert_eq!(conn.secret(), "YWJjZA==");
    assert_eq!(conn.secret_bytes().unwrap(), b"abcd");
}

#[test_case("Id=x;Secret=c2VjcmV0" ; "missing endpoint")]
#[test_case("Endpoint=https://a.io;Secret=c2VjcmV0" ; "missing id")]
#[test_case("Endpoint=https://a.io;Id=x" ; "missing secret")]
#[test_case("Endpoint=https://a.io;Id=;Secret=c2VjcmV0" ; "empty id")]
#[test_case("Endpoint=not a url;Id=x;Secret=c2VjcmV0" ; "bad endpoint")]
#[test_case("Endpoint=ftp://a.io;Id=x;Secret=c2VjcmV0" ; "bad scheme")]
#[test_case("Endpoint=https://a.io;Id=x;Secret=%%%" ; "bad secret")]
#[test_case("Endpoint=https://a.io;Id=x;Secret=c2VjcmV0;Region" ; "segment without value")]
#[test_case("Endpoint=https://a.io;Id=x;Secret=c2VjcmV0;Region=eu" ; "unknown segment")]
fn test_parse_invalid_connection_string(raw: &str) {
    let err = ConnectionString::parse(raw).unwrap_err();
    assert!(matches!(err, Error::InvalidConnectionString { .. }), "{err}");
    assert!(err.is_config());
}

#[test]
fn test_connection_string_redacts_secret() {
    let conn = ConnectionString::parse(CONN).unwrap();
    let debug = format!("{conn:?}");
    let display = conn.to_string();

    assert!(!debug.contains("c2VjcmV0"));
    assert!(!display.contains("c2VjcmV0"));
    assert_eq!(display, "Endpoint=https://store.example.io;Id=cred-1;Secret=***");
}

// ============================================================================
// Pool Tests
// ============================================================================

#[test]
fn test_pool_lookup() {
    let mut pool = ConnectionStringPool::new();
    assert!(pool.is_empty());

    pool.insert("primary", ConnectionString::parse(CONN).unwrap());
    assert_eq!(pool.len(), 1);
    assert!(pool.contains("primary"));
    assert_eq!(pool.get("primary").unwrap().id(), "cred-1");
    assert!(pool.get("missing").is_none());
}

#[test]
fn test_pool_require_unknown_store() {
    let pool = ConnectionStringPool::new();
    let err = pool.require("missing").unwrap_err();
    assert!(matches!(err, Error::UnknownStore { ref store } if store == "missing"));
}

#[test]
fn test_pool_from_iter_sorted_names() {
    let conn = ConnectionString::parse(CONN).unwrap();
    let pool: ConnectionStringPool = [
        ("zeta".to_string(), conn.clone()),
        ("alpha".to_string(), conn),
    ]
    .into_iter()
    .collect();

    assert_eq!(pool.names(), vec!["alpha", "zeta"]);
}
