//! Batch Processing Tests
//!
//! A batch is parsed member by member: bad members are recorded in place and
//! never abort the batch, and the reply can be assembled in input order.

use serde_json::{Value, json};
use turul_json_rpc_message::prelude::*;

#[test]
fn test_batch_does_not_abort_on_bad_member() {
    let _ = tracing_subscriber::fmt::try_init();

    let message = parse_value(&json!([
        {"jsonrpc": "2.0", "method": "sum", "params": [1, 2, 4], "id": "1"},
        {"foo": "bar"}
    ]))
    .unwrap();

    let batch = message.as_batch().unwrap();
    assert_eq!(batch.len(), 2);

    let request = batch.entities[0].as_request().unwrap();
    assert_eq!(request.method, "sum");
    assert_eq!(request.id, Id::String("1".to_string()));

    assert!(batch.entities[1].is_exception());
    let failure = batch.entities[1].as_failure().unwrap();
    assert_eq!(failure.code(), INVALID_REQUEST);
    assert!(failure.id().is_null());
}

#[test]
fn test_empty_batch_is_invalid_request() {
    let err = parse("[]").unwrap_err();
    assert!(!err.is_parse_error());
    assert_eq!(err.code(), INVALID_REQUEST);
    assert!(err.id().is_null());
}

#[test]
fn test_protocol_batch_example() {
    let message = parse(
        r#"[
            {"jsonrpc": "2.0", "method": "sum", "params": [1,2,4], "id": "1"},
            {"jsonrpc": "2.0", "method": "notify_hello", "params": [7]},
            {"jsonrpc": "2.0", "method": "subtract", "params": [42,23], "id": "2"},
            {"foo": "boo"},
            {"jsonrpc": "2.0", "method": "foo.get", "params": {"name": "myself"}, "id": "5"},
            {"jsonrpc": "2.0", "method": "get_data", "id": "9"}
        ]"#,
    )
    .unwrap();

    let batch = message.as_batch().unwrap();
    let kinds: Vec<EntityKind> = batch.iter().map(|entity| entity.kind()).collect();
    assert_eq!(
        kinds,
        vec![
            EntityKind::Request,
            EntityKind::Notification,
            EntityKind::Request,
            EntityKind::Exception,
            EntityKind::Request,
            EntityKind::Request,
        ]
    );
    assert_eq!(batch.failures().count(), 1);
}

#[test]
fn test_reply_assembled_in_input_order() {
    let message = parse(
        r#"[
            {"jsonrpc": "2.0", "method": "sum", "params": [1,2,4], "id": "1"},
            {"jsonrpc": "2.0", "method": "notify_hello", "params": [7]},
            {"jsonrpc": "2.0", "method": "missing", "id": "2"},
            1
        ]"#,
    )
    .unwrap();

    let mut reply = Batch::new();
    for entity in message.as_batch().unwrap() {
        match entity {
            Message::Request(request) if request.method == "sum" => {
                let total: i64 = (0..request.params.len())
                    .filter_map(|i| request.params.get_index_as::<i64>(i).ok())
                    .sum();
                reply.add(Response::success(request, json!(total)));
            }
            Message::Request(request) => {
                reply.add(Response::from(RequestError::method_not_found(request)));
            }
            Message::Notification(_) => {}
            failure => reply.add(failure.clone()),
        }
    }

    assert_eq!(
        reply.to_json(),
        json!([
            {"jsonrpc": "2.0", "result": 7, "id": "1"},
            {"jsonrpc": "2.0", "error": {"code": -32601, "message": "Method not found"}, "id": "2"},
            {
                "jsonrpc": "2.0",
                "error": {
                    "code": -32600,
                    "message": "Invalid request",
                    "data": "message must be an object or an array"
                },
                "id": null
            }
        ])
    );
}

#[test]
fn test_error_responses_keep_recovered_ids() {
    let message = parse_value(&json!([
        {"jsonrpc": "2.0", "id": 11},
        {"jsonrpc": "1.0", "method": "m", "id": 12},
        {"jsonrpc": "2.0", "method": "ok", "id": 13}
    ]))
    .unwrap();

    let ids: Vec<Value> = message
        .as_batch()
        .unwrap()
        .error_responses()
        .into_iter()
        .map(|response| response["id"].clone())
        .collect();
    assert_eq!(ids, vec![json!(11), json!(12)]);
}

#[test]
fn test_batch_predicates() {
    assert!(is_batch(&json!([{"foo": "bar"}])));
    assert!(!is_batch(&json!([])));
    assert!(!is_batch(&json!({"jsonrpc": "2.0", "method": "m"})));
}
