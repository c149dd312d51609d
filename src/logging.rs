//! Diagnostic logging setup.
//!
//! Everything in the crate logs through `tracing`; this module installs the
//! subscriber. The interactive chat owns the terminal, so it logs to a file:
//! the `--debug-log` path, or `khet-chat.log` in the user's cache directory.
//! One-shot commands log to stderr.

use std::error::Error;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use directories::ProjectDirs;
use tracing_subscriber::EnvFilter;

use crate::core::constants::LOG_FILTER_ENV;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
    Disabled,
}

/// Filter directive for the given verbosity, unless overridden by
/// `KHET_LOG` or `RUST_LOG`.
pub fn filter_directive(verbose: u8, env_override: Option<String>) -> String {
    if let Some(directive) = env_override.filter(|d| !d.trim().is_empty()) {
        return directive;
    }
    match verbose {
        0 => "warn".to_string(),
        1 => "warn,khet_chat=debug".to_string(),
        _ => "warn,khet_chat=trace".to_string(),
    }
}

fn env_override() -> Option<String> {
    std::env::var(LOG_FILTER_ENV)
        .ok()
        .or_else(|| std::env::var("RUST_LOG").ok())
}

/// Log file used by the interactive chat when no `--debug-log` is given.
pub fn default_log_path() -> Option<PathBuf> {
    ProjectDirs::from("ai", "khet", "khet-chat").map(|dirs| dirs.cache_dir().join("khet-chat.log"))
}

pub fn init_logging(target: LogTarget, verbose: u8) -> Result<(), Box<dyn Error>> {
    let filter = EnvFilter::try_new(filter_directive(verbose, env_override()))?;

    match target {
        LogTarget::Disabled => Ok(()),
        LogTarget::Stderr => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .try_init()
                .map_err(|err| err as Box<dyn Error>)?;
            Ok(())
        }
        LogTarget::File(path) => {
            if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
                std::fs::create_dir_all(dir)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(&path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
                .map_err(|err| err as Box<dyn Error>)?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_maps_to_directives() {
        assert_eq!(filter_directive(0, None), "warn");
        assert_eq!(filter_directive(1, None), "warn,khet_chat=debug");
        assert_eq!(filter_directive(2, None), "warn,khet_chat=trace");
        assert_eq!(filter_directive(5, None), "warn,khet_chat=trace");
    }

    #[test]
    fn verbosity_never_raises_dependencies() {
        for verbose in 0..4 {
            let directive = filter_directive(verbose, None);
            assert!(directive.starts_with("warn"), "{verbose}: {directive}");
        }
    }

    #[test]
    fn default_log_lives_in_cache_dir() {
        if let Some(path) = default_log_path() {
            assert_eq!(path.file_name().and_then(|n| n.to_str()), Some("khet-chat.log"));
        }
    }

    #[test]
    fn environment_override_wins() {
        assert_eq!(
            filter_directive(0, Some("khet_chat::core=trace".to_string())),
            "khet_chat::core=trace"
        );
        assert_eq!(filter_directive(0, Some("  ".to_string())), "warn");
    }

    #[test]
    fn disabled_target_installs_nothing() {
        init_logging(LogTarget::Disabled, 0).expect("disabled logging never fails");
    }
}
