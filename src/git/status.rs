//! Working-tree, upstream, and in-progress-operation probes.
//!
//! Every check is a separate `git` invocation against a live repository, so
//! the combined snapshot is best-effort: the tree can change between any two
//! queries and no lock is taken. Checks run sequentially and fail
//! independently; a check that cannot run leaves its field at the default
//! instead of aborting the probe.

use std::path::Path;

use serde::Serialize;

use super::{QueryOutcome, Repository};

/// Result of one probe check.
///
/// The underlying queries encode their answer in the exit status, and each
/// check has its own polarity. `Indeterminate` keeps "the query could not
/// run" distinct from a definite no; it collapses to `false` in
/// [`GitStatus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    Detected,
    NotDetected,
    Indeterminate,
}

impl CheckOutcome {
    /// Collapse to the snapshot boolean. `Indeterminate` reads as absent.
    pub fn detected(self) -> bool {
        matches!(self, Self::Detected)
    }
}

/// Relationship to the upstream tracking branch.
///
/// `None` covers both "no upstream configured" and "upstream unresolvable";
/// the two are indistinguishable to consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Divergence {
    #[default]
    None,
    /// Even with the upstream: nothing to push or pull.
    InSync,
    /// Has commits the upstream doesn't have.
    Ahead,
    /// Missing commits from the upstream.
    Behind,
    /// Both ahead and behind.
    Diverged,
}

impl Divergence {
    /// Classify ahead/behind counts when an upstream exists.
    pub fn from_counts(ahead: u32, behind: u32) -> Self {
        match (ahead, behind) {
            (0, 0) => Self::InSync,
            (_, 0) => Self::Ahead,
            (0, _) => Self::Behind,
            _ => Self::Diverged,
        }
    }

    /// Prompt glyph: `=`, `>`, `<`, or `<>`.
    pub fn glyph(self) -> &'static str {
        match self {
            Self::None => "",
            Self::InSync => "=",
            Self::Ahead => ">",
            Self::Behind => "<",
            Self::Diverged => "<>",
        }
    }
}

/// Multi-step git operation recorded in the metadata directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, strum::IntoStaticStr)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "SCREAMING-KEBAB-CASE")]
pub enum SpecialState {
    #[default]
    #[strum(serialize = "")]
    None,
    Merging,
    CherryPicking,
    Reverting,
    Bisecting,
    Rebasing,
}

impl SpecialState {
    /// Prompt tag, e.g. `MERGING`; empty when no operation is in progress.
    pub fn label(self) -> &'static str {
        self.into()
    }
}

#[derive(Debug, Clone, Copy)]
enum Marker {
    File,
    Dir,
}

/// Operation markers in priority order; the first present marker wins even
/// when several coexist (an interrupted rebase can leave its directory
/// behind while a merge is underway).
const OPERATION_MARKERS: &[(&str, Marker, SpecialState)] = &[
    ("MERGE_HEAD", Marker::File, SpecialState::Merging),
    ("CHERRY_PICK_HEAD", Marker::File, SpecialState::CherryPicking),
    ("REVERT_HEAD", Marker::File, SpecialState::Reverting),
    ("BISECT_LOG", Marker::File, SpecialState::Bisecting),
    ("rebase-merge", Marker::Dir, SpecialState::Rebasing),
    ("rebase-apply", Marker::Dir, SpecialState::Rebasing),
];

/// Classify the in-progress operation from a repository metadata directory.
pub fn special_state_in(git_dir: &Path) -> SpecialState {
    for (name, marker, state) in OPERATION_MARKERS {
        let path = git_dir.join(name);
        let present = match marker {
            Marker::File => path.is_file(),
            Marker::Dir => path.is_dir(),
        };
        if present {
            return *state;
        }
    }
    SpecialState::None
}

/// Snapshot of the working tree and repository state.
///
/// Fully populated on every probe: a check that cannot run leaves its field
/// at the default rather than leaving a hole. A fresh probe is required to
/// observe change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct GitStatus {
    /// Working tree has modifications not staged.
    pub has_unstaged: bool,
    /// Index has changes not yet committed.
    pub has_staged: bool,
    /// At least one file is untracked and not excluded.
    pub has_untracked: bool,
    /// A stash entry exists.
    pub has_stashed: bool,
    pub upstream: Divergence,
    pub special_state: SpecialState,
}

impl GitStatus {
    /// Uncommitted-changes summary kept for boolean-only consumers.
    pub fn is_dirty(&self) -> bool {
        self.has_unstaged || self.has_staged || self.has_untracked
    }
}

/// Unstaged modifications; a non-zero diff exit is the positive signal.
fn unstaged_check(repo: &Repository) -> CheckOutcome {
    match repo.run_git(&["diff", "--no-ext-diff", "--quiet", "--exit-code"]) {
        QueryOutcome::Completed { success: true, .. } => CheckOutcome::NotDetected,
        QueryOutcome::Completed { success: false, .. } => CheckOutcome::Detected,
        QueryOutcome::Failed => CheckOutcome::Indeterminate,
    }
}

/// Staged-but-uncommitted changes; same exit-code polarity as the unstaged
/// check.
fn staged_check(repo: &Repository) -> CheckOutcome {
    match repo.run_git(&["diff-index", "--cached", "--quiet", "HEAD", "--"]) {
        QueryOutcome::Completed { success: true, .. } => CheckOutcome::NotDetected,
        QueryOutcome::Completed { success: false, .. } => CheckOutcome::Detected,
        QueryOutcome::Failed => CheckOutcome::Indeterminate,
    }
}

/// Untracked, non-excluded files. Unlike the diff checks this is a
/// positive-output signal: the listing succeeds either way and presence is
/// read from stdout.
fn untracked_check(repo: &Repository) -> CheckOutcome {
    match repo.run_git(&["ls-files", "--others", "--exclude-standard"]) {
        QueryOutcome::Completed {
            success: true,
            stdout,
        } => {
            if stdout.trim().is_empty() {
                CheckOutcome::NotDetected
            } else {
                CheckOutcome::Detected
            }
        }
        _ => CheckOutcome::Indeterminate,
    }
}

/// Stash presence. Polarity is inverted relative to the diff checks: a
/// failed ref lookup means "no stash", not "unknown".
fn stashed_check(repo: &Repository) -> CheckOutcome {
    match repo.run_git(&["rev-parse", "--verify", "--quiet", "refs/stash"]) {
        QueryOutcome::Completed { success: true, .. } => CheckOutcome::Detected,
        QueryOutcome::Completed { success: false, .. } => CheckOutcome::NotDetected,
        QueryOutcome::Failed => CheckOutcome::Indeterminate,
    }
}

/// Divergence from the upstream tracking branch.
///
/// Resolving the tracking ref gates the count query; any failure along the
/// way reads as "no upstream".
fn upstream_divergence(repo: &Repository) -> Divergence {
    let upstream = match repo
        .run_git(&["rev-parse", "--abbrev-ref", "@{upstream}"])
        .stdout_if_success()
    {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => return Divergence::None,
    };

    let range = format!("HEAD...{upstream}");
    match repo
        .run_git(&["rev-list", "--left-right", "--count", &range])
        .stdout_if_success()
    {
        Some(counts) => {
            let (ahead, behind) = parse_ahead_behind(counts);
            Divergence::from_counts(ahead, behind)
        }
        None => Divergence::None,
    }
}

/// Parse `rev-list --left-right --count` output: ahead then behind,
/// whitespace-separated. Missing or malformed counts read as 0.
fn parse_ahead_behind(output: &str) -> (u32, u32) {
    let mut fields = output.split_whitespace();
    let ahead = fields.next().and_then(|v| v.parse().ok()).unwrap_or(0);
    let behind = fields.next().and_then(|v| v.parse().ok()).unwrap_or(0);
    (ahead, behind)
}

/// Run every check against the repository and assemble the snapshot.
///
/// Checks execute in a fixed order (working-tree flags, upstream, operation
/// markers) but each stands alone: one check's failure cannot stop the
/// others, and the worst case is a snapshot of all defaults.
pub(crate) fn probe(repo: &Repository) -> GitStatus {
    GitStatus {
        has_unstaged: unstaged_check(repo).detected(),
        has_staged: staged_check(repo).detected(),
        has_untracked: untracked_check(repo).detected(),
        has_stashed: stashed_check(repo).detected(),
        upstream: upstream_divergence(repo),
        special_state: repo
            .git_dir()
            .map(|dir| special_state_in(&dir))
            .unwrap_or_default(),
    }
}
