//! `shield-text` — text overlap analysis for cheating detection.
//!
//! Scores how similar two text samples are and extracts the substrings they
//! share so a reviewer can highlight them. The engine is a set of pure
//! functions; a stdio MCP server (JSON-RPC 2.0, newline-delimited) puts it
//! behind `analyze` and `info` tools.
//!
//! # Algorithms
//!
//! - `levenshtein` — normalised edit distance
//! - `rabin-karp` — windowed sampling over a rolling-hash substring search
//! - `kmp` — windowed sampling over a prefix-function substring search
//!
//! # Architecture
//!
//! ```text
//! stdin (JSON-RPC) → McpServer → ToolRouter → Comparator
//!                                                 ├── levenshtein
//!                                                 ├── window (rabin_karp | kmp)
//!                                                 └── fragments (kmp)
//! stdout (JSON-RPC) ←─────────────────────────────┘
//! ```

pub mod compare;
pub mod error;
pub mod server;
pub mod tools;

pub use compare::{
    Algorithm, AnalysisReport, Comparator, CompareConfig, MatchedFragment, compute_similarity,
    extract_matched_patterns,
};
pub use error::{CompareError, CompareResult};
pub use server::run_mcp_server;
