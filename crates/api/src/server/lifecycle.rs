#![forbid(unsafe_code)]

use crate::ApiServer;
use serde_json::{Value, json};

impl ApiServer {
    pub(crate) fn new(store: cl_storage::SqliteStore) -> Self {
        Self {
            initialized: false,
            store,
        }
    }

    pub(crate) fn handle(&mut self, request: crate::JsonRpcRequest) -> Option<Value> {
        let method = request.method.as_str();
        let expects_response = !matches!(request.id.as_ref(), None | Some(Value::Null));

        if method == "initialize" {
            // Echo the client's declared protocol version when present.
            let protocol_version = request
                .params
                .as_ref()
                .and_then(|v| v.get("protocolVersion"))
                .and_then(|v| v.as_str())
                .unwrap_or(crate::PROTOCOL_VERSION);

            return Some(crate::json_rpc_response(
                request.id,
                json!({
                    "protocolVersion": protocol_version,
                    "serverInfo": {
                        "name": crate::SERVER_NAME,
                        "version": crate::SERVER_VERSION
                    },
                    "capabilities": { "tools": {} }
                }),
            ));
        }

        if method == "notifications/initialized" || method == "initialized" {
            self.initialized = true;
            return None;
        }

        if !self.initialized {
            // Tolerate clients that skip the initialized notification.
            if matches!(method, "tools/call" | "tools/list" | "ping") {
                self.initialized = true;
            } else if expects_response {
                return Some(crate::json_rpc_error(
                    request.id,
                    -32002,
                    "Server not initialized",
                ));
            } else {
                return None;
            }
        }

        if method == "ping" {
            return Some(crate::json_rpc_response(request.id, json!({})));
        }

        if method == "tools/list" {
            let tools = crate::server::tool_definitions();
            return Some(crate::json_rpc_response(
                request.id,
                json!({ "tools": tools }),
            ));
        }

        if method == "tools/call" {
            let Some(params_obj) = request.params.as_ref().and_then(|v| v.as_object()) else {
                return Some(crate::json_rpc_error(
                    request.id,
                    -32602,
                    "params must be an object",
                ));
            };

            let tool_name = params_obj
                .get("name")
                .and_then(|v| v.as_str())
                .unwrap_or("");
            // Missing/null arguments mean an empty-args call; anything else
            // non-object falls through to the per-tool validator.
            let args = match params_obj.get("arguments") {
                None | Some(Value::Null) => json!({}),
                Some(v) => v.clone(),
            };
            let response_body = self.call_tool(tool_name, args);

            return Some(crate::json_rpc_response(
                request.id,
                json!({
                    "content": [crate::tool_text_content(&response_body)],
                    "isError": !response_body.get("success").and_then(|v| v.as_bool()).unwrap_or(false)
                }),
            ));
        }

        // Notifications must not receive a response, even unknown ones.
        if !expects_response {
            return None;
        }

        Some(crate::json_rpc_error(
            request.id,
            -32601,
            &format!("Method not found: {method}"),
        ))
    }

    pub(crate) fn call_tool(&mut self, name: &str, args: Value) -> Value {
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            crate::handlers::dispatch_tool(self, name, args).unwrap_or_else(|| {
                crate::op_error("UNKNOWN_TOOL", &format!("Unknown tool: {name}"))
            })
        }));

        match result {
            Ok(resp) => resp,
            Err(_) => crate::op_error(
                "STORE_ERROR",
                &format!("Internal panic while handling {name}"),
            ),
        }
    }
}
