use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// `~/.cardstmt`, or `None` when `HOME` is unset. Never touches the filesystem.
pub fn cardstmt_home() -> Option<PathBuf> {
    std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".cardstmt"))
}

pub fn ensure_cardstmt_home() -> Result<PathBuf> {
    let dir = cardstmt_home().context("HOME is not set")?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}
