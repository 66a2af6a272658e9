use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

// ── Badge config ──────────────────────────────────────────────────────────────

/// Presentation options. Every key is optional; unknown keys are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadgeConfig {
    /// Draw the rounded border around each badge
    #[serde(default = "default_border")]
    pub border: bool,
    /// Use ASCII spinner/done glyphs for terminals without braille fonts
    #[serde(default)]
    pub ascii: bool,
    /// Spinner frame interval in the preview, in milliseconds
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
}

fn default_border() -> bool {
    true
}

fn default_tick_ms() -> u64 {
    120
}

impl Default for BadgeConfig {
    fn default() -> Self {
        Self {
            border: default_border(),
            ascii: false,
            tick_ms: default_tick_ms(),
        }
    }
}

impl BadgeConfig {
    /// Load from disk, or return defaults if the file doesn't exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file at {}", path.display()))?;
        toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config file at {}", path.display()))
    }

    /// Write the starter config (only if nothing is there yet).
    pub fn write_default_if_missing(path: &Path) -> Result<PathBuf> {
        if path.exists() {
            return Ok(path.to_path_buf());
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(path, DEFAULT_CONFIG_TOML)
            .with_context(|| format!("Failed to write config file at {}", path.display()))?;
        Ok(path.to_path_buf())
    }

    /// Spinner interval, never below 16ms so the preview can't spin hot.
    pub fn tick_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.tick_ms.max(16))
    }
}

// ── Paths ─────────────────────────────────────────────────────────────────────

pub fn config_path() -> PathBuf {
    dirs_config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tool-badge")
        .join("config.toml")
}

fn dirs_config_dir() -> Option<PathBuf> {
    // XDG_CONFIG_HOME or ~/.config on Linux/macOS
    std::env::var("XDG_CONFIG_HOME")
        .ok()
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| {
            std::env::var("HOME")
                .ok()
                .map(|h| PathBuf::from(h).join(".config"))
        })
}

const DEFAULT_CONFIG_TOML: &str = r#"# tool-badge configuration
# Run `tool-badge --init` to regenerate this file.

# Rounded border around each badge
border = true

# ASCII glyphs (| / - \ and *) instead of braille spinner and dot
ascii = false

# Spinner frame interval for the preview, in milliseconds
tick_ms = 120
"#;
