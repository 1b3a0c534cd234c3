//! shield-text -- standalone MCP text analysis server.
//!
//! Usage: shield-text [--window <n>] [--min-fragment <n>]

use anyhow::{Context, bail};
use shield_text::compare::CompareConfig;

/// Parse `flag <n>` from `args`, falling back to `default` when the flag is
/// absent. A flag with no value after it is an error.
fn parse_flag(args: &[String], flag: &str, default: usize) -> anyhow::Result<usize> {
    let Some(pos) = args.iter().position(|a| a == flag) else {
        return Ok(default);
    };
    let Some(value) = args.get(pos + 1) else {
        bail!("{flag} is missing its value");
    };
    value
        .parse()
        .with_context(|| format!("{flag} expects a positive integer, got {value:?}"))
}

fn parse_config(args: &[String]) -> anyhow::Result<CompareConfig> {
    let defaults = CompareConfig::default();
    Ok(CompareConfig {
        max_window_len: parse_flag(args, "--window", defaults.max_window_len)?,
        min_fragment_len: parse_flag(args, "--min-fragment", defaults.min_fragment_len)?,
    })
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing to stderr so it does not interfere with MCP stdio.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = shield_text::server::McpServerConfig {
        compare: parse_config(&args)?,
    };

    shield_text::run_mcp_server(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_owned()).collect()
    }

    #[test]
    fn test_defaults_without_flags() {
        let config = parse_config(&args(&[])).expect("defaults");
        assert_eq!(config, CompareConfig::default());
    }

    #[test]
    fn test_flags_override_defaults() {
        let config = parse_config(&args(&["--min-fragment", "6", "--window", "8"])).expect("parse");
        assert_eq!(config.max_window_len, 8);
        assert_eq!(config.min_fragment_len, 6);
    }

    #[test]
    fn test_trailing_flag_without_value() {
        let err = parse_config(&args(&["--window"])).expect_err("missing value");
        assert!(err.to_string().contains("--window is missing its value"));
    }

    #[test]
    fn test_non_numeric_value() {
        let err = parse_config(&args(&["--window", "wide"])).expect_err("bad value");
        assert!(err.to_string().contains("positive integer"));
    }
}
