//! Analyze tool — similarity score plus shared fragments for two texts.

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{info, warn};

use crate::compare::{Algorithm, Comparator};
use crate::server::{ToolCallResult, ToolDefinition};

/// Longest text, in chars, the tool will compare. Levenshtein fills an
/// `n * m` table, so a single oversized request would stall the server.
pub const MAX_TEXT_CHARS: usize = 20_000;

/// Parameters for the analyze tool. All three fields are required.
#[derive(Debug, Deserialize)]
pub struct AnalyzeParams {
    pub text1: String,
    pub text2: String,
    /// Algorithm tag: `levenshtein`, `rabin-karp` or `kmp`.
    pub algorithm: String,
}

pub fn tool_definition() -> ToolDefinition {
    ToolDefinition {
        name: "analyze".to_owned(),
        description: "Compare two texts. Returns a similarity percentage (0-100) under the chosen \
            algorithm and the shared fragments of at least four characters, each with its \
            positions in the longer text."
            .to_owned(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "text1": {
                    "type": "string",
                    "description": "First text sample"
                },
                "text2": {
                    "type": "string",
                    "description": "Second text sample"
                },
                "algorithm": {
                    "type": "string",
                    "enum": Algorithm::ALL.map(Algorithm::as_str),
                    "description": "Similarity algorithm"
                }
            },
            "required": ["text1", "text2", "algorithm"]
        }),
    }
}

/// Execute the analyze tool.
pub fn execute(comparator: &Comparator, arguments: serde_json::Value) -> Result<ToolCallResult> {
    let params: AnalyzeParams =
        serde_json::from_value(arguments).context("invalid analyze parameters")?;

    for (field, text) in [("text1", &params.text1), ("text2", &params.text2)] {
        let len = text.chars().count();
        if len > MAX_TEXT_CHARS {
            warn!(field, len, "analyze input too long");
            return Ok(ToolCallResult::error(format!(
                "Error: {field} is too long ({len} chars, limit {MAX_TEXT_CHARS})"
            )));
        }
    }

    let algorithm: Algorithm = match params.algorithm.parse() {
        Ok(a) => a,
        Err(e) => return Ok(ToolCallResult::error(format!("Error: {e}"))),
    };

    let report = comparator.analyze(&params.text1, &params.text2, algorithm);
    info!(
        algorithm = %algorithm,
        similarity = report.similarity,
        fragments = report.matched_patterns.len(),
        "analysis complete"
    );

    let json = report.to_json().context("failed to encode analysis report")?;
    Ok(ToolCallResult::text(json))
}
