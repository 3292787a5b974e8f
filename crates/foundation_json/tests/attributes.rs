//! Derive attributes and generic containers.

use foundation_json::{from_str, to_string};
use serde::{Deserialize, Serialize};

fn default_level() -> u8 {
    3
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
#[serde(crate = "serde")]
struct PeerConfig {
    #[serde(rename = "max-peers")]
    max_peers: u16,
    #[serde(default)]
    verbose: bool,
    #[serde(default = "default_level")]
    level: u8,
    r#type: String,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
#[serde(crate = "serde")]
struct Wrapper<T> {
    inner: T,
    tags: Vec<String>,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
#[serde(crate = "serde")]
struct Empty {}

#[test]
fn rename_changes_the_wire_name() {
    let config = PeerConfig {
        max_peers: 8,
        verbose: true,
        level: 1,
        r#type: "relay".to_owned(),
    };
    let encoded = to_string(&config).unwrap();
    assert_eq!(
        encoded,
        r#"{"max-peers":8,"verbose":true,"level":1,"type":"relay"}"#
    );
    assert_eq!(from_str::<PeerConfig>(&encoded).unwrap(), config);

    let err = from_str::<PeerConfig>(r#"{"max_peers":8,"type":"relay"}"#).unwrap_err();
    assert_eq!(
        err.to_string(),
        "unknown field `max_peers`, expected one of: max-peers, verbose, level, type"
    );
}

#[test]
fn defaults_fill_absent_fields() {
    let parsed = from_str::<PeerConfig>(r#"{"type":"full","max-peers":50}"#).unwrap();
    assert_eq!(
        parsed,
        PeerConfig {
            max_peers: 50,
            verbose: false,
            level: 3,
            r#type: "full".to_owned(),
        }
    );

    let err = from_str::<PeerConfig>(r#"{"verbose":true,"type":"full"}"#).unwrap_err();
    assert_eq!(err.to_string(), "missing field `max-peers`");
}

#[test]
fn generic_containers() {
    let wrapped = Wrapper {
        inner: Some(7u32),
        tags: vec!["a".to_owned(), "b".to_owned()],
    };
    let encoded = to_string(&wrapped).unwrap();
    assert_eq!(encoded, r#"{"inner":7,"tags":["a","b"]}"#);
    assert_eq!(from_str::<Wrapper<Option<u32>>>(&encoded).unwrap(), wrapped);

    let nested: Wrapper<Wrapper<bool>> =
        from_str(r#"{"inner":{"inner":true,"tags":[]},"tags":["x"]}"#).unwrap();
    assert!(nested.inner.inner);
    assert_eq!(nested.tags, ["x"]);
}

#[test]
fn empty_struct() {
    assert_eq!(to_string(&Empty {}).unwrap(), "{}");
    assert_eq!(from_str::<Empty>("{}").unwrap(), Empty {});
    let err = from_str::<Empty>(r#"{"a":1}"#).unwrap_err();
    assert_eq!(err.to_string(), "unknown field `a`, there are no fields");
}
