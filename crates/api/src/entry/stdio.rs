#![forbid(unsafe_code)]

use crate::{ApiServer, JsonRpcRequest, json_rpc_error};
use serde_json::Value;
use std::io::{BufRead, BufReader, Write};

fn write_newline_json(
    stdout: &mut std::io::StdoutLock<'_>,
    resp: &Value,
) -> Result<(), Box<dyn std::error::Error>> {
    writeln!(stdout, "{}", serde_json::to_string(resp)?)?;
    stdout.flush()?;
    Ok(())
}

/// Newline-delimited JSON-RPC over stdio. One request per line, one response
/// per line; notifications (no id) get no response at all.
pub(crate) fn run_stdio(server: &mut ApiServer) -> Result<(), Box<dyn std::error::Error>> {
    let stdin = std::io::stdin();
    let mut reader = BufReader::new(stdin.lock());
    let mut stdout = std::io::stdout().lock();

    loop {
        let mut line = String::new();
        let read = reader.read_line(&mut line)?;
        if read == 0 {
            break;
        }
        let raw = line.trim();
        if raw.is_empty() {
            continue;
        }
        handle_request_line(server, &mut stdout, raw)?;
    }

    Ok(())
}

fn handle_request_line(
    server: &mut ApiServer,
    stdout: &mut std::io::StdoutLock<'_>,
    raw: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let parsed: Result<Value, _> = serde_json::from_str(raw);
    let data = match parsed {
        Ok(v) => v,
        Err(e) => {
            let resp = json_rpc_error(None, -32700, &format!("Parse error: {e}"));
            write_newline_json(stdout, &resp)?;
            return Ok(());
        }
    };

    let (id, has_method) = match data.as_object() {
        Some(obj) => (obj.get("id").cloned(), obj.contains_key("method")),
        None => {
            let resp = json_rpc_error(None, -32600, "Invalid Request");
            write_newline_json(stdout, &resp)?;
            return Ok(());
        }
    };
    if !has_method {
        let resp = json_rpc_error(id, -32600, "Invalid Request");
        write_newline_json(stdout, &resp)?;
        return Ok(());
    }

    let request: JsonRpcRequest = match serde_json::from_value(data) {
        Ok(v) => v,
        Err(e) => {
            let resp = json_rpc_error(id, -32600, &format!("Invalid Request: {e}"));
            write_newline_json(stdout, &resp)?;
            return Ok(());
        }
    };

    if let Some(resp) = server.handle(request) {
        write_newline_json(stdout, &resp)?;
    }

    Ok(())
}
