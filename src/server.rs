//! MCP Server — stdio transport, JSON-RPC 2.0, newline-delimited.
//!
//! The boundary layer in front of the comparison engine. Reads JSON-RPC
//! requests from stdin (one per line), dispatches `analyze` / `info` tool
//! calls to the tool router, and writes responses to stdout.
//!
//! Protocol flow:
//! 1. Client sends `initialize` → server responds with capabilities
//! 2. Client sends `notifications/initialized`
//! 3. Client sends `tools/list` → server returns tool definitions
//! 4. Client sends `tools/call` → server runs the comparison and returns the report
//! 5. Client closes stdin → server exits

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::compare::{Comparator, CompareConfig};
use crate::tools::ToolRouter;

/// Maximum size of a single JSON-RPC line (10 MiB).
const MAX_LINE_BYTES: usize = 10 * 1024 * 1024;

/// MCP protocol revision advertised in `initialize`.
const PROTOCOL_VERSION: &str = "2025-06-18";

// JSON-RPC 2.0 error codes.
const PARSE_ERROR: i64 = -32700;
const INVALID_REQUEST: i64 = -32600;
const METHOD_NOT_FOUND: i64 = -32601;
const INVALID_PARAMS: i64 = -32602;
const INTERNAL_ERROR: i64 = -32603;

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// JSON-RPC 2.0 request. A missing `id` marks a notification.
#[derive(Debug, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    pub id: Option<serde_json::Value>,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

/// JSON-RPC 2.0 response. Exactly one of `result` / `error` is set.
#[derive(Debug, Serialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

#[derive(Debug, Serialize)]
pub struct JsonRpcError {
    pub code: i64,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl JsonRpcResponse {
    fn success(id: Option<serde_json::Value>, result: &impl Serialize) -> Self {
        match serde_json::to_value(result) {
            Ok(value) => Self {
                jsonrpc: "2.0".to_owned(),
                id,
                result: Some(value),
                error: None,
            },
            Err(e) => {
                error!(error = %e, "failed to encode result");
                Self::failure(id, INTERNAL_ERROR, format!("internal error: {e}"))
            }
        }
    }

    fn failure(id: Option<serde_json::Value>, code: i64, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0".to_owned(),
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
                data: None,
            }),
        }
    }
}

/// Tool advertised by `tools/list`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub input_schema: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct ToolCallParams {
    name: String,
    #[serde(default)]
    arguments: serde_json::Value,
}

/// One content block of a tool result.
#[derive(Debug, Serialize)]
pub struct ContentItem {
    #[serde(rename = "type")]
    pub content_type: String,
    pub text: String,
}

/// Result of `tools/call`. Tool failures travel here with `is_error` set,
/// not as JSON-RPC errors.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolCallResult {
    pub content: Vec<ContentItem>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_error: bool,
}

impl ToolCallResult {
    /// A successful result carrying one text item.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ContentItem {
                content_type: "text".to_owned(),
                text: text.into(),
            }],
            is_error: false,
        }
    }

    /// A failed result carrying one text item.
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            is_error: true,
            ..Self::text(text)
        }
    }
}

/// Configuration for the MCP server.
#[derive(Debug, Clone, Copy, Default)]
pub struct McpServerConfig {
    /// Window and fragment settings for every comparison.
    pub compare: CompareConfig,
}

// ---------------------------------------------------------------------------
// Server loop
// ---------------------------------------------------------------------------

/// Run the MCP server on stdin/stdout until stdin is closed.
///
/// # Errors
///
/// Returns an error if the comparison settings are invalid or stdin/stdout
/// I/O fails fatally.
pub fn run_mcp_server(config: McpServerConfig) -> Result<()> {
    info!(
        max_window_len = config.compare.max_window_len,
        min_fragment_len = config.compare.min_fragment_len,
        "shield-text MCP server starting"
    );

    let comparator = Comparator::new(config.compare).context("invalid comparison settings")?;
    let router = ToolRouter::new(comparator);
    let stdin = std::io::stdin();
    serve(&router, std::io::BufReader::new(stdin.lock()), std::io::stdout().lock())?;

    info!("shield-text MCP server stopped");
    Ok(())
}

/// Serve JSON-RPC requests from `reader` until EOF, writing one response
/// line per answered request to `out`.
///
/// # Errors
///
/// Returns an error if reading or writing fails fatally. Malformed requests
/// are answered, not returned.
pub fn serve(router: &ToolRouter, mut reader: impl BufRead, mut out: impl Write) -> Result<()> {
    let mut line = String::new();

    loop {
        line.clear();
        match read_line_limited(&mut reader, &mut line, MAX_LINE_BYTES)
            .context("failed to read request line")?
        {
            LineRead::Line => {}
            LineRead::Eof => {
                info!("input closed, shutting down");
                return Ok(());
            }
            LineRead::Rejected(reason) => {
                warn!(reason = %reason, "rejected request line");
                let resp = JsonRpcResponse::failure(None, INVALID_REQUEST, format!("invalid request: {reason}"));
                write_response(&mut out, &resp)?;
                continue;
            }
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        debug!(raw = trimmed, "received request");

        if let Some(resp) = handle_line(router, trimmed) {
            write_response(&mut out, &resp)?;
        }
    }
}

/// Decode and answer one request line. `None` means no reply is owed.
fn handle_line(router: &ToolRouter, line: &str) -> Option<JsonRpcResponse> {
    let request: JsonRpcRequest = match serde_json::from_str(line) {
        Ok(r) => r,
        Err(e) => {
            warn!(error = %e, "invalid JSON-RPC request");
            return Some(JsonRpcResponse::failure(None, PARSE_ERROR, format!("parse error: {e}")));
        }
    };

    if request.jsonrpc != "2.0" {
        warn!(version = request.jsonrpc, "unsupported JSON-RPC version");
        return Some(JsonRpcResponse::failure(
            request.id,
            INVALID_REQUEST,
            format!("invalid request: jsonrpc version must be \"2.0\", got \"{}\"", request.jsonrpc),
        ));
    }

    let response = dispatch(router, &request);
    if request.id.is_none() {
        // Notifications never receive a response.
        debug!(method = request.method, "notification handled");
        return None;
    }
    response
}

fn dispatch(router: &ToolRouter, req: &JsonRpcRequest) -> Option<JsonRpcResponse> {
    let id = req.id.clone();
    match req.method.as_str() {
        "initialize" => Some(JsonRpcResponse::success(
            id,
            &serde_json::json!({
                "protocolVersion": PROTOCOL_VERSION,
                "capabilities": { "tools": { "listChanged": false } },
                "serverInfo": {
                    "name": "shield-text",
                    "version": env!("CARGO_PKG_VERSION"),
                },
            }),
        )),
        "notifications/initialized" => {
            info!("client initialized");
            None
        }
        "ping" => Some(JsonRpcResponse::success(id, &serde_json::json!({}))),
        "tools/list" => Some(JsonRpcResponse::success(
            id,
            &serde_json::json!({ "tools": router.list_tools() }),
        )),
        "tools/call" => Some(call_tool(router, id, &req.params)),
        method => {
            warn!(method, "unknown method");
            Some(JsonRpcResponse::failure(id, METHOD_NOT_FOUND, format!("method not found: {method}")))
        }
    }
}

fn call_tool(router: &ToolRouter, id: Option<serde_json::Value>, params: &serde_json::Value) -> JsonRpcResponse {
    let params: ToolCallParams = match serde_json::from_value(params.clone()) {
        Ok(p) => p,
        Err(e) => {
            return JsonRpcResponse::failure(id, INVALID_PARAMS, format!("invalid tools/call params: {e}"));
        }
    };

    let result = router.call_tool(&params.name, params.arguments).unwrap_or_else(|e| {
        error!(tool = params.name, error = %e, "tool call failed");
        ToolCallResult::error(format!("Error: {e:#}"))
    });
    JsonRpcResponse::success(id, &result)
}

/// Write a JSON-RPC response as a single line.
fn write_response(out: &mut impl Write, resp: &JsonRpcResponse) -> Result<()> {
    let json = serde_json::to_string(resp).context("failed to serialize response")?;
    debug!(response = json, "sending response");
    out.write_all(json.as_bytes()).context("failed to write response")?;
    out.write_all(b"\n").context("failed to write response newline")?;
    out.flush().context("failed to flush response")?;
    Ok(())
}

/// Outcome of reading one request line.
#[derive(Debug, PartialEq, Eq)]
enum LineRead {
    /// A complete line was appended to the buffer.
    Line,
    /// The reader is exhausted.
    Eof,
    /// The line was consumed but is unusable (too long or not UTF-8).
    Rejected(String),
}

/// Read a line from `reader` into `buf`, stopping at newline or `max_bytes`.
///
/// An oversized or non-UTF-8 line is consumed up to its newline and reported
/// as [`LineRead::Rejected`] so the caller can answer it and carry on. Only
/// I/O failures are returned as errors.
fn read_line_limited(reader: &mut impl BufRead, buf: &mut String, max_bytes: usize) -> Result<LineRead> {
    let mut raw = Vec::new();
    loop {
        let available = reader.fill_buf()?;
        if available.is_empty() {
            break; // EOF
        }
        let (consumed, found_newline) = match available.iter().position(|&b| b == b'\n') {
            Some(pos) => (pos + 1, true),
            None => (available.len(), false),
        };
        if raw.len() + consumed > max_bytes {
            reader.consume(consumed);
            if !found_newline {
                discard_rest_of_line(reader)?;
            }
            return Ok(LineRead::Rejected(format!(
                "line exceeds maximum size ({max_bytes} bytes)"
            )));
        }
        raw.extend_from_slice(&available[..consumed]);
        reader.consume(consumed);
        if found_newline {
            break;
        }
    }

    if raw.is_empty() {
        return Ok(LineRead::Eof);
    }
    match String::from_utf8(raw) {
        Ok(line) => {
            buf.push_str(&line);
            Ok(LineRead::Line)
        }
        Err(e) => Ok(LineRead::Rejected(format!("non-UTF-8 request data: {e}"))),
    }
}

/// Consume input up to and including the next newline (or EOF).
fn discard_rest_of_line(reader: &mut impl BufRead) -> Result<()> {
    loop {
        let rest = reader.fill_buf()?;
        if rest.is_empty() {
            return Ok(());
        }
        if let Some(pos) = rest.iter().position(|&b| b == b'\n') {
            reader.consume(pos + 1);
            return Ok(());
        }
        let eat = rest.len();
        reader.consume(eat);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_line_limited_splits_lines() {
        let mut reader = std::io::Cursor::new(b"first\nsecond".to_vec());
        let mut buf = String::new();
        assert_eq!(read_line_limited(&mut reader, &mut buf, 64).expect("read"), LineRead::Line);
        assert_eq!(buf, "first\n");
        buf.clear();
        assert_eq!(read_line_limited(&mut reader, &mut buf, 64).expect("read"), LineRead::Line);
        assert_eq!(buf, "second");
        buf.clear();
        assert_eq!(read_line_limited(&mut reader, &mut buf, 64).expect("read"), LineRead::Eof);
    }

    #[test]
    fn test_read_line_limited_rejects_oversized_line() {
        let mut reader = std::io::Cursor::new(b"0123456789\nok\n".to_vec());
        let mut buf = String::new();
        let outcome = read_line_limited(&mut reader, &mut buf, 4).expect("read");
        assert!(matches!(outcome, LineRead::Rejected(_)));
        assert_eq!(read_line_limited(&mut reader, &mut buf, 4).expect("read"), LineRead::Line);
        assert_eq!(buf, "ok\n");
    }

    #[test]
    fn test_read_line_limited_rejects_invalid_utf8() {
        let mut reader = std::io::Cursor::new(vec![0xff, 0xfe, b'\n', b'x']);
        let mut buf = String::new();
        let outcome = read_line_limited(&mut reader, &mut buf, 64).expect("read");
        assert!(matches!(outcome, LineRead::Rejected(_)));
        assert!(buf.is_empty());
    }
}
