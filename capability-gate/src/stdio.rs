//! One-shot mode: read a hook payload from a reader, write the result to a writer.
//!
//! Lets host plugins that can only shell out use the gate without the server.

use std::io::{Read, Write};

use gate_common::{Decision, HookInput, HookOutput};

use crate::error::{Error, Result};
use crate::gate::CapabilityGate;

/// Apply the gate to a single JSON `HookInput` document.
pub fn apply_stream<R: Read, W: Write>(
    gate: &CapabilityGate,
    mut reader: R,
    mut writer: W,
) -> Result<Decision> {
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf)?;
    let input: HookInput =
        serde_json::from_slice(&buf).map_err(|e| Error::InvalidRequest(e.to_string()))?;

    let (options, decision) = gate.apply_traced(&input.model, input.options, None);

    serde_json::to_writer(&mut writer, &HookOutput { options, decision })
        .map_err(|e| Error::Io(e.into()))?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(decision)
}
