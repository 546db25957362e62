//! Running the solver as a blocking subprocess.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use tempfile::TempDir;
use tracing::{debug, info, warn};

use crate::config::BridgeConfig;
use crate::error::BridgeError;

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Per-call directory holding the script, output and transcript.
///
/// Removed when finished unless the config asks to keep files; removal
/// failures are logged and otherwise ignored.
#[derive(Debug)]
pub struct Workspace {
    dir: TempDir,
    keep: bool,
}

impl Workspace {
    /// Creates a fresh, uniquely named directory.
    ///
    /// # Errors
    ///
    /// Returns the I/O error from creating the directory.
    pub fn new(config: &BridgeConfig) -> Result<Self, BridgeError> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("ncalg-solver-");
        let dir = match &config.temp_root {
            Some(root) => builder.tempdir_in(root)?,
            None => builder.tempdir()?,
        };
        Ok(Self {
            dir,
            keep: config.keep_files,
        })
    }

    /// The directory path.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Path of the session script.
    #[must_use]
    pub fn script_path(&self) -> PathBuf {
        self.path().join("session.txt")
    }

    /// Path the solver writes results to.
    #[must_use]
    pub fn output_path(&self) -> PathBuf {
        self.path().join("output.txt")
    }

    /// Path of the captured stdout and stderr.
    #[must_use]
    pub fn transcript_path(&self) -> PathBuf {
        self.path().join("transcript.txt")
    }

    /// Removes the directory, or keeps it and logs where it is.
    pub fn finish(self) {
        if self.keep {
            let path = self.dir.keep();
            info!("kept solver files in {}", path.display());
            return;
        }
        let path = self.dir.path().to_path_buf();
        if let Err(e) = self.dir.close() {
            warn!("could not remove {}: {}", path.display(), e);
        }
    }
}

/// Runs `<executable> [args..] <script>` and waits for it.
///
/// Stdout and stderr go to `transcript`.
///
/// # Errors
///
/// - [`BridgeError::SolverUnavailable`] when the process cannot be spawned
/// - [`BridgeError::Timeout`] when the configured time limit passes
/// - [`BridgeError::SolverFailed`] on a nonzero exit status
pub fn run_solver(
    config: &BridgeConfig,
    script: &Path,
    transcript: &Path,
) -> Result<(), BridgeError> {
    let log = File::create(transcript)?;
    let mut command = Command::new(&config.executable);
    command
        .args(&config.args)
        .arg(script)
        .stdin(Stdio::null())
        .stdout(Stdio::from(log.try_clone()?))
        .stderr(Stdio::from(log));

    info!("running {} on {}", config.executable.display(), script.display());
    let start = Instant::now();
    let mut child = command.spawn().map_err(|source| BridgeError::SolverUnavailable {
        path: config.executable.clone(),
        source,
    })?;

    let status: ExitStatus = match config.timeout {
        None => child.wait()?,
        Some(limit) => {
            let deadline = start + limit;
            loop {
                if let Some(status) = child.try_wait()? {
                    break status;
                }
                if Instant::now() >= deadline {
                    warn!("solver exceeded {:?}, killing it", limit);
                    stop(&mut child)?;
                    return Err(BridgeError::Timeout(limit));
                }
                thread::sleep(POLL_INTERVAL);
            }
        }
    };
    debug!("solver finished in {:?} with {}", start.elapsed(), status);

    if status.success() {
        Ok(())
    } else {
        let transcript = fs::read_to_string(transcript).unwrap_or_default();
        Err(BridgeError::SolverFailed {
            code: status.code(),
            transcript,
        })
    }
}

/// Kills `child` and reaps it.
///
/// A failed kill is an error unless the child already exited; a failed
/// reap is only logged, since the process is gone either way.
fn stop(child: &mut Child) -> io::Result<()> {
    if let Err(e) = child.kill() {
        // already exited between the two checks
        if e.kind() != io::ErrorKind::InvalidInput {
            return Err(e);
        }
    }
    match child.wait() {
        Ok(status) => debug!("killed solver exited with {}", status),
        Err(e) => warn!("could not reap solver process {}: {}", child.id(), e),
    }
    Ok(())
}
