//! Classification Parity Tests
//!
//! The `is_*` predicates must agree with what `parse_value` actually builds,
//! for valid messages and for every flavour of malformed input.

use serde_json::{Value, json};
use turul_json_rpc_message::prelude::*;

fn corpus() -> Vec<Value> {
    vec![
        // valid
        json!({"jsonrpc": "2.0", "method": "m", "id": 1}),
        json!({"jsonrpc": "2.0", "method": "m", "params": {"a": 1}, "id": "x"}),
        json!({"jsonrpc": "2.0", "method": "m", "id": null}),
        json!({"jsonrpc": "2.0", "method": "m"}),
        json!({"jsonrpc": "2.0", "method": "m", "params": [1]}),
        json!({"jsonrpc": "2.0", "method": "", "id": 3}),
        json!({"jsonrpc": "2.0", "result": 1, "id": 1}),
        json!({"jsonrpc": "2.0", "error": {"code": 1, "message": "x"}, "id": null}),
        json!([{"jsonrpc": "2.0", "method": "m"}]),
        json!([1, 2, 3]),
        // invalid
        json!({"jsonrpc": "2.0", "id": 1}),
        json!({"jsonrpc": "2.0", "method": 7, "id": 1}),
        json!({"jsonrpc": "2.0", "method": "m", "id": 1.5}),
        json!({"jsonrpc": "2.0", "method": "m", "id": [1]}),
        json!({"jsonrpc": "2.0", "method": "m", "params": "x"}),
        json!({"jsonrpc": "1.0", "method": "m", "id": 1}),
        json!({"method": "m"}),
        json!({"jsonrpc": "2.0", "result": 1}),
        json!({"jsonrpc": "2.0", "result": 1, "error": {"code": 1, "message": "x"}, "id": 1}),
        json!({"jsonrpc": "2.0", "error": {"code": "1", "message": "x"}, "id": 1}),
        json!({"jsonrpc": "2.0", "error": {"code": 1}, "id": 1}),
        json!({"jsonrpc": "2.0", "result": 1, "id": true}),
        json!({"foo": "bar"}),
        json!([]),
        json!("request"),
        json!(42),
        json!(null),
    ]
}

#[test]
fn test_predicates_match_parse_outcome() {
    for raw in corpus() {
        let parsed = parse_value(&raw);
        let kind = parsed.as_ref().ok().map(|message| message.kind());

        assert_eq!(is_request(&raw), kind == Some(EntityKind::Request), "request: {raw}");
        assert_eq!(
            is_notification(&raw),
            kind == Some(EntityKind::Notification),
            "notification: {raw}"
        );
        assert_eq!(is_response(&raw), kind == Some(EntityKind::Response), "response: {raw}");
        assert_eq!(is_batch(&raw), kind == Some(EntityKind::Batch), "batch: {raw}");
    }
}

#[test]
fn test_parity_holds_under_strict_config() {
    let parser = Parser::with_config(ParserConfig::strict().require_version(false));

    for raw in corpus() {
        let kind = parser.parse_value(&raw).ok().map(|message| message.kind());
        assert_eq!(parser.classify(&raw), kind, "{raw}");
    }
}

#[test]
fn test_at_most_one_predicate_holds() {
    for raw in corpus() {
        let hits = [
            is_request(&raw),
            is_notification(&raw),
            is_response(&raw),
            is_batch(&raw),
        ]
        .into_iter()
        .filter(|hit| *hit)
        .count();
        assert!(hits <= 1, "{raw} matched {hits} kinds");
    }
}
