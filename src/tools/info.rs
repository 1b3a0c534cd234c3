//! Info tool — static description of the analysis service.

use anyhow::{Context, Result};
use serde::Serialize;

use crate::compare::{Algorithm, Comparator};
use crate::server::{ToolCallResult, ToolDefinition};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ServiceInfo {
    name: &'static str,
    version: &'static str,
    algorithms: [&'static str; 3],
    max_window_len: usize,
    min_fragment_len: usize,
}

pub fn tool_definition() -> ToolDefinition {
    ToolDefinition {
        name: "info".to_owned(),
        description: "Describe this service: name, version and supported algorithm tags.".to_owned(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {}
        }),
    }
}

pub fn execute(comparator: &Comparator) -> Result<ToolCallResult> {
    let config = comparator.config();
    let info = ServiceInfo {
        name: "shield-text",
        version: env!("CARGO_PKG_VERSION"),
        algorithms: Algorithm::ALL.map(Algorithm::as_str),
        max_window_len: config.max_window_len,
        min_fragment_len: config.min_fragment_len,
    };
    let json = serde_json::to_string(&info).context("failed to encode service info")?;
    Ok(ToolCallResult::text(json))
}
