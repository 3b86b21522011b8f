use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

/// Temporary git repository for probe tests.
///
/// Setup commands run with an isolated git configuration so a developer's
/// global settings cannot leak into fixtures.
pub struct TestRepo {
    _temp: TempDir,
    root: PathBuf,
}

impl TestRepo {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("create temp directory");
        let root = temp.path().join("repo");
        std::fs::create_dir(&root).expect("create repo directory");
        // Resolve symlinks so paths compare equal to what git reports.
        let root = root.canonicalize().expect("canonicalize repo path");

        let repo = Self { _temp: temp, root };
        repo.git(&["init", "-b", "main"]);
        repo.git(&["config", "user.name", "Test User"]);
        repo.git(&["config", "user.email", "test@example.com"]);
        repo.git(&["config", "commit.gpgsign", "false"]);
        repo
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn git_dir(&self) -> PathBuf {
        self.root.join(".git")
    }

    /// Run a git command in the repository, panicking on failure.
    pub fn git(&self, args: &[&str]) {
        let output = self.git_command(args).output().expect("run git");
        assert!(
            output.status.success(),
            "git {args:?} failed:\n{}",
            String::from_utf8_lossy(&output.stderr)
        );
    }

    /// Git command builder for invocations that are allowed to fail
    /// (e.g. a merge that is supposed to conflict).
    pub fn git_command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new("git");
        cmd.args(args)
            .current_dir(&self.root)
            .env("GIT_CONFIG_GLOBAL", "/dev/null")
            .env("GIT_CONFIG_SYSTEM", "/dev/null")
            .env("GIT_AUTHOR_DATE", "2025-01-01T00:00:00Z")
            .env("GIT_COMMITTER_DATE", "2025-01-01T00:00:00Z");
        cmd
    }

    pub fn write_file(&self, name: &str, contents: &str) {
        std::fs::write(self.root.join(name), contents).expect("write file");
    }

    /// Write `file.txt` and commit everything.
    pub fn commit(&self, message: &str) {
        self.write_file("file.txt", message);
        self.git(&["add", "."]);
        self.git(&["commit", "-m", message]);
    }
}
