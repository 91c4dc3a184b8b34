//! Spatial grid tuning loaded from data/config/collision.toml with sensible
//! defaults and clamping.

use anyhow::{Context, Result};

#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
pub struct CollisionCfg {
    /// Side length of one grid cell, world units.
    pub cell_m: f32,
    /// Pad applied to entity bounds before cell-key derivation, so shapes
    /// straddling a cell boundary register in the adjacent cells too.
    pub margin_m: f32,
    /// Trace queries whose bounds span more cells than this on either axis
    /// fall back to a linear scan over all entities.
    pub brute_force_span_cells: u32,
}

impl Default for CollisionCfg {
    fn default() -> Self {
        Self {
            cell_m: 4.0,
            margin_m: 0.25,
            brute_force_span_cells: 8,
        }
    }
}

fn clamp(mut cfg: CollisionCfg) -> CollisionCfg {
    if cfg.cell_m < 0.25 {
        cfg.cell_m = 0.25;
    }
    if cfg.margin_m < 0.0 {
        cfg.margin_m = 0.0;
    }
    if cfg.brute_force_span_cells < 1 {
        cfg.brute_force_span_cells = 1;
    }
    cfg
}

/// Load the collision config from the default location, falling back to
/// defaults when the file is missing.
pub fn load_default() -> Result<CollisionCfg> {
    let path = crate::data_root().join("config/collision.toml");
    if !path.is_file() {
        return Ok(CollisionCfg::default());
    }
    let txt = std::fs::read_to_string(&path)
        .with_context(|| format!("read {}", path.display()))?;
    let parsed: CollisionCfg = toml::from_str(&txt).context("parse collision TOML")?;
    Ok(clamp(parsed))
}
