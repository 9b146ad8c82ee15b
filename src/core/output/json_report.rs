//! JSON summary report.

use std::io::Write;

use crate::core::summary::Summary;
use crate::error::Result;

/// Serializes the summary as pretty-printed JSON.
///
/// Tallies become arrays of `[key, count]` pairs in first-seen order.
pub fn to_json(summary: &Summary) -> Result<String> {
    Ok(serde_json::to_string_pretty(summary)?)
}

/// Writes the summary as pretty-printed JSON followed by a newline.
pub fn write_json<W: Write>(summary: &Summary, out: &mut W) -> Result<()> {
    let json = to_json(summary)?;
    out.write_all(json.as_bytes())?;
    out.write_all(b"\n")?;
    Ok(())
}
