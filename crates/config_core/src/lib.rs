//! config_core: TOML configuration under `data/config/` with defaults,
//! clamping, and environment overrides.

pub mod configs;

use std::path::PathBuf;

/// Resolve the workspace `data/` root. Prefers the top-level directory so
/// tests and tools can run from any crate.
pub(crate) fn data_root() -> PathBuf {
    let here = std::path::Path::new(env!("CARGO_MANIFEST_DIR"));
    let ws = here.join("../../data");
    if ws.is_dir() {
        ws
    } else {
        here.join("data")
    }
}
