//! Output artifacts for external consumers.
//!
//! - [`params_js`] - `params.js` script for the browser-side renderer
//! - [`plot`] - displacement/velocity chart (CLI only)

pub mod params_js;

#[cfg(feature = "cli")]
pub mod plot;

pub use params_js::{render_script, write_params_js, ExportRecord, DEFAULT_GLOBAL};

#[cfg(feature = "cli")]
pub use plot::render_plot;

use std::path::Path;

use crate::error::{DampError, Result};

/// Create the parent directory of `path` if it does not exist yet.
pub(crate) fn ensure_parent_dir(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() && !parent.exists() => {
            log::debug!("creating output directory {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| DampError::file_write(parent, e))
        }
        _ => Ok(()),
    }
}
