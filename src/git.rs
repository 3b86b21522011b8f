//! Read-only git queries via the `git` CLI.
//!
//! Everything here degrades instead of failing: the status line renders on
//! every shell prompt, so a missing `git`, a directory outside any
//! repository, or a transiently failing query must all produce a usable
//! (if emptier) result rather than an error.

use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

pub mod status;

pub use status::{CheckOutcome, Divergence, GitStatus, SpecialState};

/// Outcome of a single git query.
///
/// Several probe checks read the exit status as the answer itself (a failing
/// diff means "dirty"), so a non-zero exit comes back as data. `Failed` is
/// reserved for the process not running at all.
#[derive(Debug)]
pub(crate) enum QueryOutcome {
    /// The process ran to completion.
    Completed { success: bool, stdout: String },
    /// The process could not be spawned (git missing, I/O error).
    Failed,
}

impl QueryOutcome {
    /// Trimmed stdout when the query exited zero.
    pub(crate) fn stdout_if_success(&self) -> Option<&str> {
        match self {
            Self::Completed {
                success: true,
                stdout,
            } => Some(stdout.trim()),
            _ => None,
        }
    }
}

/// Handle for git queries against one working directory.
///
/// Clones share the invocation counter, so a probe's total query count can
/// be read back from any handle.
#[derive(Debug, Clone)]
pub struct Repository {
    path: PathBuf,
    queries: Arc<AtomicUsize>,
}

impl Repository {
    /// Repository handle at the given path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            queries: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Repository handle for the current directory.
    pub fn current() -> Self {
        Self::at(".")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of git invocations issued through this handle so far.
    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::Relaxed)
    }

    /// Run one git query synchronously with stdio captured.
    ///
    /// Queries are read-only and idempotent, so there are no retries: a
    /// failure means "not applicable", not a transient condition worth
    /// waiting out.
    pub(crate) fn run_git(&self, args: &[&str]) -> QueryOutcome {
        self.queries.fetch_add(1, Ordering::Relaxed);
        log::debug!("$ git {}", args.join(" "));

        match Command::new("git")
            .args(args)
            .current_dir(&self.path)
            .output()
        {
            Ok(output) => QueryOutcome::Completed {
                success: output.status.success(),
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            },
            Err(err) => {
                log::debug!("git {}: {err}", args.first().unwrap_or(&""));
                QueryOutcome::Failed
            }
        }
    }

    /// Current branch name, or `None` when detached or not in a repository.
    ///
    /// This doubles as repository detection: callers skip every other query
    /// when no branch resolves.
    pub fn current_branch(&self) -> Option<String> {
        self.run_git(&["branch", "--show-current"])
            .stdout_if_success()
            .filter(|branch| !branch.is_empty())
            .map(str::to_string)
    }

    /// The repository metadata directory, resolved against the probe path.
    ///
    /// Git reports the path relative to the working directory (typically
    /// just `.git`), so a relative result is joined back onto ours.
    pub(crate) fn git_dir(&self) -> Option<PathBuf> {
        let dir = PathBuf::from(self.run_git(&["rev-parse", "--git-dir"]).stdout_if_success()?);
        if dir.is_absolute() {
            Some(dir)
        } else {
            Some(self.path.join(dir))
        }
    }

    /// Full working-tree status snapshot. Infallible; see [`status::probe`].
    pub fn status(&self) -> GitStatus {
        status::probe(self)
    }
}
