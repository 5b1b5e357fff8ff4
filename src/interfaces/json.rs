//! JSON framing for requests and results.

use crate::domain::scenario::{ScenarioRequest, ScenarioResult};
use crate::error::{Result, ScenarioError};
use std::io::{Read, Write};

/// Parses one `{"scenario_type": ..., "params": {...}}` request.
/// Anything but an I/O failure is reported as a validation error.
pub fn read_request<R: Read>(source: R) -> Result<ScenarioRequest> {
    serde_json::from_reader(source).map_err(|e| match e.classify() {
        serde_json::error::Category::Io => ScenarioError::Json(e),
        _ => ScenarioError::Validation(format!("invalid scenario request: {e}")),
    })
}

pub fn write_result<W: Write>(mut sink: W, result: &ScenarioResult, pretty: bool) -> Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut sink, result)?;
    } else {
        serde_json::to_writer(&mut sink, result)?;
    }
    writeln!(sink)?;
    Ok(())
}
