//! `tracing` setup for the binary.
//!
//! The preview owns the terminal, so it logs to a file or not at all. Plain
//! mode logs to stderr.
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result, anyhow};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
    Off,
}

impl LogTarget {
    /// A log file always wins; otherwise stderr unless the terminal is taken.
    pub fn choose(log_file: Option<&Path>, owns_terminal: bool) -> Self {
        match log_file {
            Some(p) => LogTarget::File(p.to_path_buf()),
            None if owns_terminal => LogTarget::Off,
            None => LogTarget::Stderr,
        }
    }
}

fn filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose { "tool_badge=debug" } else { "tool_badge=warn" })
    })
}

pub fn init(verbose: bool, target: LogTarget) -> Result<()> {
    let builder = tracing_subscriber::fmt().with_env_filter(filter(verbose)).with_target(false);
    match target {
        LogTarget::Off => Ok(()),
        LogTarget::Stderr => builder
            .with_writer(std::io::stderr)
            .try_init()
            .map_err(|e| anyhow!(e)),
        LogTarget::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
                .map_err(|e| anyhow!(e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_choose_target() {
        let p = Path::new("/tmp/badge.log");
        assert_eq!(LogTarget::choose(Some(p), true), LogTarget::File(p.to_path_buf()));
        assert_eq!(LogTarget::choose(Some(p), false), LogTarget::File(p.to_path_buf()));
        assert_eq!(LogTarget::choose(None, true), LogTarget::Off);
        assert_eq!(LogTarget::choose(None, false), LogTarget::Stderr);
    }

    #[test]
    fn test_off_installs_nothing() {
        init(false, LogTarget::Off).unwrap();
    }
}
