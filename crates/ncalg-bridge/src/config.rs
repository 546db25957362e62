//! Solver configuration.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Environment variable naming the solver executable.
pub const SOLVER_ENV: &str = "NCALG_SOLVER";

/// Environment variable holding the solver time limit in seconds.
pub const TIMEOUT_ENV: &str = "NCALG_SOLVER_TIMEOUT_SECS";

/// How to run the external solver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Solver executable, looked up on `PATH` when not absolute.
    pub executable: PathBuf,
    /// Arguments passed before the script path.
    pub args: Vec<String>,
    /// Kill the solver after this long (None = wait indefinitely).
    pub timeout: Option<Duration>,
    /// Keep scripts, outputs and transcripts after each call.
    pub keep_files: bool,
    /// Directory for per-call temporary directories (None = system default).
    pub temp_root: Option<PathBuf>,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            executable: PathBuf::from("bergman"),
            args: Vec::new(),
            timeout: None,
            keep_files: false,
            temp_root: None,
        }
    }
}

impl BridgeConfig {
    /// Create a config for the given executable
    #[must_use]
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
            ..Default::default()
        }
    }

    /// Default config overridden by `NCALG_SOLVER` and
    /// `NCALG_SOLVER_TIMEOUT_SECS`.
    ///
    /// An unparsable timeout is ignored with a warning.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(exe) = env::var_os(SOLVER_ENV).filter(|v| !v.is_empty()) {
            config.executable = PathBuf::from(exe);
        }
        if let Ok(secs) = env::var(TIMEOUT_ENV) {
            match secs.trim().parse::<u64>() {
                Ok(0) => config.timeout = None,
                Ok(n) => config.timeout = Some(Duration::from_secs(n)),
                Err(e) => warn!("ignoring {}={:?}: {}", TIMEOUT_ENV, secs, e),
            }
        }
        config
    }

    /// Set the arguments passed before the script path
    #[must_use]
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Set the time limit
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set whether temporary files are kept
    #[must_use]
    pub fn with_keep_files(mut self, keep: bool) -> Self {
        self.keep_files = keep;
        self
    }

    /// Set the directory temporary files are created in
    #[must_use]
    pub fn with_temp_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.temp_root = Some(root.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builders() {
        let config = BridgeConfig::new("/opt/solver/bin/bergman")
            .with_args(["-q"])
            .with_timeout(Duration::from_secs(30))
            .with_keep_files(true);
        assert_eq!(config.executable, PathBuf::from("/opt/solver/bin/bergman"));
        assert_eq!(config.args, vec!["-q".to_string()]);
        assert_eq!(config.timeout, Some(Duration::from_secs(30)));
        assert!(config.keep_files);
        assert!(config.temp_root.is_none());
    }

    #[test]
    fn test_serde_round_trip() {
        let config = BridgeConfig::default().with_timeout(Duration::from_millis(1500));
        let json = serde_json::to_string(&config).unwrap();
        let back: BridgeConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
