//! Config command for showing the resolved tracker configuration.

use std::io::Write;

use anyhow::Result;
use itr_core::TrackerConfig;

/// Writes `config` as pretty-printed JSON.
pub fn run<W: Write>(writer: &mut W, config: &TrackerConfig) -> Result<()> {
    let json = serde_json::to_string_pretty(config)?;
    writeln!(writer, "{json}")?;
    Ok(())
}
