//! `params.js` export for the browser-side renderer.
//!
//! The renderer loads a script of the form
//!
//! ```text
//! window.DAMP_PARAMS = {"m": 1.0, "c": 0.4, "k": 4.0, ...};
//! ```
//!
//! Keys appear in a fixed order and JSON separators carry a trailing
//! space, so the file matches what the renderer's fixtures expect.

use std::io;
use std::path::Path;

use serde::Serialize;
use serde_json::ser::Formatter;

use crate::error::{DampError, Result};

use super::ensure_parent_dir;

/// Global object the parameters are attached to by default.
pub const DEFAULT_GLOBAL: &str = "window";

/// Property name assigned on the global object.
pub const PARAMS_PROPERTY: &str = "DAMP_PARAMS";

/// Flat record consumed by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ExportRecord {
    pub m: f64,
    pub c: f64,
    pub k: f64,
    pub y0: f64,
    pub v0: f64,
    pub dt: f64,
    /// Render scale, passed through untouched
    pub scale: f64,
    /// Decay duration computed by the integrator (s)
    pub duration: f64,
}

/// Compact JSON with `", "` and `": "` separators.
struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }
}

/// Encode the record as JSON.
pub fn to_json(record: &ExportRecord) -> Result<String> {
    let mut buf = Vec::with_capacity(160);
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, SpacedFormatter);
    record.serialize(&mut ser)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Render `<global>.DAMP_PARAMS = <json>;`.
pub fn render_script(record: &ExportRecord, global: &str) -> Result<String> {
    if global.is_empty() {
        return Err(DampError::invalid_argument("global", "must not be empty"));
    }
    Ok(format!("{global}.{PARAMS_PROPERTY} = {};", to_json(record)?))
}

/// Write the params script to `path` as UTF-8.
pub fn write_params_js(record: &ExportRecord, global: &str, path: &Path) -> Result<()> {
    let script = render_script(record, global)?;
    ensure_parent_dir(path)?;
    std::fs::write(path, script).map_err(|e| DampError::file_write(path, e))?;
    log::info!("wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> ExportRecord {
        ExportRecord {
            m: 1.0,
            c: 0.4,
            k: 4.0,
            y0: 1.0,
            v0: 0.0,
            dt: 0.01,
            scale: 100.0,
            duration: 23.5,
        }
    }

    #[test]
    fn test_script_shape() {
        let script = render_script(&record(), DEFAULT_GLOBAL).unwrap();
        assert_eq!(
            script,
            "window.DAMP_PARAMS = {\"m\": 1.0, \"c\": 0.4, \"k\": 4.0, \"y0\": 1.0, \
             \"v0\": 0.0, \"dt\": 0.01, \"scale\": 100.0, \"duration\": 23.5};"
        );
    }

    #[test]
    fn test_custom_global() {
        let script = render_script(&record(), "globalThis").unwrap();
        assert!(script.starts_with("globalThis.DAMP_PARAMS = {"));
        assert!(script.ends_with("};"));
    }

    #[test]
    fn test_empty_global_rejected() {
        assert!(matches!(
            render_script(&record(), ""),
            Err(DampError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_json_parses_back() {
        let json = to_json(&record()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["duration"], 23.5);
        assert_eq!(value["scale"], 100.0);
    }
}
