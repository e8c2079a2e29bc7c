/*
 * template_expansion.rs
 * Copyright (C) 2026 Chris Burdess
 *
 * End-to-end expansion through the public API: the RFC 6570 level 4 examples,
 * parameter consumption, base URL resolution, and property tests.
 *
 * Run with:
 *   cargo test -p segnaposto_core --test template_expansion
 */

use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use proptest::prelude::*;
use serde::Serialize;
use serde_json::json;

use segnaposto_core::escape::decode;
use segnaposto_core::{expand, expand_relative, ExpandOptions, ParamMap, TemplateError, UriTemplate};

const RESERVED_CHARS: &str = "!*'();:@&=+$,/?#[]";

fn colours() -> serde_json::Value {
    json!({
        "var": "value",
        "list": ["red", "green", "blue"],
        "keys": {"comma": ",", "dot": ".", "semi": ";"},
    })
}

#[test]
fn rfc_examples() {
    let params = colours();
    let cases = [
        ("{var}", "value"),
        ("{list}", "red,green,blue"),
        ("{list*}", "red,green,blue"),
        ("{/list*}", "/red/green/blue"),
        // serde_json objects iterate in key order
        ("{/keys*}", "/comma=%2C/dot=./semi=%3B"),
        ("{?var,list}", "?var=value&list=red,green,blue"),
        ("{#keys}", "#comma,,,dot,.,semi,;"),
        ("{;keys*}", ";comma=%2C;dot=.;semi=%3B"),
        ("{missing}", ""),
    ];
    for (template, expected) in cases {
        assert_eq!(expand(template, &params, false).unwrap(), expected, "{}", template);
    }
}

#[test]
fn unused_parameters_become_query() {
    assert_eq!(expand("noop", &json!({"a": "1"}), true).unwrap(), "noop?a=1");
    assert_eq!(expand("noop", &json!({"a": "1"}), false).unwrap(), "noop");
    assert_eq!(
        expand("/search?q={q}", &json!({"q": "x y", "page": 2}), true).unwrap(),
        "/search?q=x%20y&page=2"
    );
    assert_eq!(
        expand("/r", &json!({"tail": "abc!1234?"}), true).unwrap(),
        "/r?tail=abc%211234%3F"
    );
}

#[test]
fn typed_parameters() {
    #[derive(Serialize)]
    enum Order {
        #[serde(rename = "newest")]
        Newest,
    }

    #[derive(Serialize)]
    struct Search {
        project: &'static str,
        order: Order,
        tags: Vec<&'static str>,
        limit: Option<u32>,
        filter: BTreeMap<&'static str, &'static str>,
    }

    let search = Search {
        project: "alpha beta",
        order: Order::Newest,
        tags: vec!["a", "b"],
        limit: None,
        filter: BTreeMap::from([("author", "me"), ("state", "open")]),
    };
    assert_eq!(
        expand("/projects/{project}/issues{?order,limit}{&filter*}", &search, true).unwrap(),
        "/projects/alpha%20beta/issues?order=newest&author=me&state=open&tags=a&tags=b"
    );
}

#[test]
fn date_time_parameters() {
    #[derive(Serialize)]
    struct Range {
        #[serde(serialize_with = "segnaposto_core::data::rfc3339::serialize")]
        when: DateTime<Utc>,
        #[serde(serialize_with = "segnaposto_core::data::rfc3339::serialize")]
        off: DateTime<FixedOffset>,
        #[serde(serialize_with = "segnaposto_core::data::rfc3339::option::serialize")]
        until: Option<DateTime<Utc>>,
    }

    let range = Range {
        when: Utc.with_ymd_and_hms(2011, 3, 14, 18, 30, 0).unwrap(),
        off: FixedOffset::west_opt(7 * 3600)
            .unwrap()
            .with_ymd_and_hms(2011, 3, 14, 18, 30, 0)
            .unwrap(),
        until: None,
    };
    assert_eq!(
        expand("{when}/{+off}", &range, false).unwrap(),
        "2011-03-14T18%3A30%3A00.000Z/2011-03-14T18:30:00.000-07:00"
    );
    assert_eq!(
        expand("{+when}/{off}", &range, true).unwrap(),
        "2011-03-14T18:30:00.000Z/2011-03-14T18%3A30%3A00.000-07%3A00"
    );
}

#[test]
fn unused_nested_struct_appended_as_json() {
    #[derive(Serialize)]
    struct Inner {
        a: u32,
    }

    #[derive(Serialize)]
    struct Lookup {
        id: u32,
        inner: Inner,
    }

    let lookup = Lookup {
        id: 1,
        inner: Inner { a: 2 },
    };
    assert_eq!(
        expand("/x/{id}", &lookup, true).unwrap(),
        "/x/1?inner=%7B%22a%22%3A2%7D"
    );
    assert_eq!(expand("/x/{id}", &lookup, false).unwrap(), "/x/1");
}

#[test]
fn caller_map_is_not_consumed() {
    let mut params = ParamMap::new();
    params.insert("id", "42");
    params.insert("extra", "x");
    let template = UriTemplate::parse("/items/{id}").unwrap();
    assert_eq!(template.expand(&params, true).unwrap(), "/items/42?extra=x");
    assert_eq!(template.expand(&params, true).unwrap(), "/items/42?extra=x");
    assert_eq!(params.len(), 2);
}

#[test]
fn relative_to_base_url() {
    let params = json!({"abc": "xyz", "def": "123"});
    let base = "https://test/base/path/";
    assert_eq!(
        expand_relative(base, "{abc}/{def}/bar/", &params, false).unwrap(),
        "https://test/base/path/xyz/123/bar/"
    );
    assert_eq!(
        expand_relative(base, "/{abc}/{def}/bar/", &params, false).unwrap(),
        "https://test/xyz/123/bar/"
    );
    assert_eq!(
        expand_relative(base, "https://test2/{abc}/{def}/bar/", &params, false).unwrap(),
        "https://test2/xyz/123/bar/"
    );
}

#[test]
fn reserved_characters() {
    let params = json!({ "v": RESERVED_CHARS });
    assert_eq!(expand("{+v}", &params, false).unwrap(), RESERVED_CHARS);
    assert_eq!(expand("{#v}", &params, false).unwrap(), format!("#{}", RESERVED_CHARS));
    for (template, prefix) in [
        ("{v}", ""),
        ("{.v}", "."),
        ("{/v}", "/"),
        ("{;v}", ";v="),
        ("{?v}", "?v="),
        ("{&v}", "&v="),
    ] {
        let out = expand(template, &params, false).unwrap();
        let encoded = out.strip_prefix(prefix).unwrap();
        assert!(encoded.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'%'), "{}", out);
        assert_eq!(decode(encoded), RESERVED_CHARS);
    }
}

#[test]
fn errors_are_reported() {
    assert!(matches!(
        expand("/a/{b", &json!({}), false),
        Err(TemplateError::Unterminated { position: 3 })
    ));
    let err = expand("{x}", &json!(["not", "keyed"]), false).unwrap_err();
    assert!(matches!(err, TemplateError::Data(_)));
    assert_eq!(err.to_string(), "cannot project a list value into key/value pairs");
}

#[test]
fn options_from_json() {
    let options = ExpandOptions::from_json(r#"{"append_unused_as_query": true}"#).unwrap();
    let template: UriTemplate = "/v/{a}".parse().unwrap();
    assert_eq!(
        template.expand_with(&json!({"a": 1, "b": true}), &options).unwrap(),
        "/v/1?b=true"
    );
}

proptest! {
    #[test]
    fn literal_templates_unchanged(
        template in "[^{]*",
        params in prop::collection::btree_map("[a-z]{1,4}", "[ -~]{0,8}", 0..4),
    ) {
        prop_assert_eq!(expand(&template, &params, false).unwrap(), template);
    }

    #[test]
    fn consumed_names_never_in_tail(
        params in prop::collection::btree_map("[a-z]{1,5}", "[a-z0-9]{1,5}", 1..8),
        take in prop::collection::vec(any::<bool>(), 8),
    ) {
        let names: Vec<&String> = params.keys().collect();
        let used: Vec<&String> = names
            .iter()
            .zip(&take)
            .filter(|(_, t)| **t)
            .map(|(n, _)| *n)
            .collect();
        let template: String = used.iter().map(|n| format!("/{{{}}}", n)).collect();
        let out = expand(&template, &params, true).unwrap();
        let tail: Vec<&str> = match out.split_once('?') {
            Some((_, query)) => query.split('&').map(|p| p.split('=').next().unwrap_or("")).collect(),
            None => Vec::new(),
        };
        for name in &names {
            let in_tail = tail.contains(&name.as_str());
            prop_assert_eq!(in_tail, !used.contains(name));
        }
    }
}
