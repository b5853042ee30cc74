//! Calculator Batch Example
//!
//! Parses a JSON-RPC batch, answers the calculator requests it contains and
//! prints the combined reply. Malformed members come back as error responses
//! in their original position; notifications produce no reply.

use serde_json::{Value, json};
use turul_json_rpc_message::prelude::*;

fn calculate(request: &Request) -> Response {
    let operands = request
        .params
        .get_as::<f64>("a")
        .and_then(|a| request.params.get_as::<f64>("b").map(|b| (a, b)));

    let (a, b) = match operands {
        Ok(operands) => operands,
        Err(err) => return err.into_request_error(request).into(),
    };

    match request.method.as_str() {
        "add" => Response::success(request, json!(a + b)),
        "subtract" => Response::success(request, json!(a - b)),
        _ => RequestError::method_not_found(request)
            .with_data(format!("unknown method: {}", request.method))
            .into(),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "turul_json_rpc_message=debug".into()),
        )
        .init();

    let input = r#"[
        {"jsonrpc": "2.0", "method": "add", "params": {"a": 5, "b": 3}, "id": 1},
        {"jsonrpc": "2.0", "method": "subtract", "params": {"a": 10, "b": 4}, "id": 2},
        {"jsonrpc": "2.0", "method": "multiply", "params": {"a": 2, "b": 3}, "id": 3},
        {"jsonrpc": "2.0", "method": "add", "params": {"a": "invalid", "b": 5}, "id": 4},
        {"jsonrpc": "2.0", "method": "log", "params": ["calculated"]},
        {"foo": "bar"}
    ]"#;

    let message = match parse(input) {
        Ok(message) => message,
        Err(err) => {
            println!("{}", err.to_json());
            return;
        }
    };

    let replies: Vec<Value> = match message {
        Message::Batch(batch) => batch
            .into_iter()
            .filter_map(|entity| match entity {
                Message::Request(request) => Some(calculate(&request).to_json()),
                Message::Notification(_) => None,
                other => other.is_exception().then(|| other.to_json()),
            })
            .collect(),
        Message::Request(request) => vec![calculate(&request).to_json()],
        other => vec![other.to_json()],
    };

    match serde_json::to_string_pretty(&replies) {
        Ok(text) => println!("{text}"),
        Err(err) => println!("failed to render reply: {err}"),
    }
}
