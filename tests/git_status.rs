//! Probe tests against real repositories.
//!
//! Each test builds a throwaway repository, arranges exactly one condition,
//! and checks that only the corresponding field flips.

mod common;

use common::TestRepo;
use limitline::environment::{snapshot_at, snapshot_for};
use limitline::git::{Divergence, GitStatus, Repository, SpecialState};

fn probe(repo: &TestRepo) -> GitStatus {
    Repository::at(repo.root()).status()
}

#[test]
fn clean_tree_has_no_flags() {
    let repo = TestRepo::new();
    repo.commit("init");

    let status = probe(&repo);
    assert_eq!(status, GitStatus::default());
}

#[test]
fn unstaged_modification_flips_only_unstaged() {
    let repo = TestRepo::new();
    repo.commit("init");
    repo.write_file("file.txt", "modified");

    let status = probe(&repo);
    assert!(status.has_unstaged);
    assert!(!status.has_staged);
    assert!(!status.has_untracked);
    assert!(!status.has_stashed);
}

#[test]
fn staged_addition_flips_only_staged() {
    let repo = TestRepo::new();
    repo.commit("init");
    repo.write_file("staged.txt", "new");
    repo.git(&["add", "staged.txt"]);

    let status = probe(&repo);
    assert!(!status.has_unstaged);
    assert!(status.has_staged);
    assert!(!status.has_untracked);
    assert!(!status.has_stashed);
}

#[test]
fn untracked_file_flips_only_untracked() {
    let repo = TestRepo::new();
    repo.commit("init");
    repo.write_file("untracked.txt", "new");

    let status = probe(&repo);
    assert!(!status.has_unstaged);
    assert!(!status.has_staged);
    assert!(status.has_untracked);
    assert!(!status.has_stashed);
}

#[test]
fn ignored_files_do_not_count_as_untracked() {
    let repo = TestRepo::new();
    repo.write_file(".gitignore", "*.log\n");
    repo.commit("init");
    repo.write_file("noise.log", "ignored");

    let status = probe(&repo);
    assert!(!status.has_untracked);
}

#[test]
fn stash_entry_flips_only_stashed() {
    let repo = TestRepo::new();
    repo.commit("init");
    repo.write_file("file.txt", "stash me");
    repo.git(&["stash", "push"]);

    let status = probe(&repo);
    assert!(status.has_stashed);
    // The stash restored a clean working tree.
    assert!(!status.has_unstaged);
    assert!(!status.has_staged);
    assert!(!status.has_untracked);
}

// --- Upstream divergence ---

/// Repository on a `feature` branch tracking local `main`.
fn repo_with_upstream() -> TestRepo {
    let repo = TestRepo::new();
    repo.commit("init");
    repo.git(&["checkout", "-b", "feature"]);
    repo.git(&["branch", "--set-upstream-to=main"]);
    repo
}

#[test]
fn upstream_in_sync() {
    let repo = repo_with_upstream();
    assert_eq!(probe(&repo).upstream, Divergence::InSync);
}

#[test]
fn upstream_ahead() {
    let repo = repo_with_upstream();
    repo.commit("feature work 1");
    repo.commit("feature work 2");
    repo.commit("feature work 3");
    assert_eq!(probe(&repo).upstream, Divergence::Ahead);
}

#[test]
fn upstream_behind() {
    let repo = repo_with_upstream();
    repo.git(&["checkout", "main"]);
    repo.commit("main work 1");
    repo.commit("main work 2");
    repo.git(&["checkout", "feature"]);
    assert_eq!(probe(&repo).upstream, Divergence::Behind);
}

#[test]
fn upstream_diverged() {
    let repo = repo_with_upstream();
    repo.commit("feature work");
    repo.git(&["checkout", "main"]);
    repo.commit("main work");
    repo.git(&["checkout", "feature"]);
    assert_eq!(probe(&repo).upstream, Divergence::Diverged);
}

#[test]
fn no_upstream_configured_is_none() {
    let repo = TestRepo::new();
    repo.commit("init");
    assert_eq!(probe(&repo).upstream, Divergence::None);
}

// --- Special operations ---

#[test]
fn conflicted_merge_reports_merging() {
    let repo = TestRepo::new();
    repo.commit("init");
    repo.git(&["checkout", "-b", "feature"]);
    repo.commit("feature change");
    repo.git(&["checkout", "main"]);
    repo.commit("main change");

    let merge = repo.git_command(&["merge", "feature"]).output().unwrap();
    assert!(!merge.status.success(), "merge should conflict");

    assert_eq!(probe(&repo).special_state, SpecialState::Merging);
}

#[test]
fn merge_outranks_coexisting_rebase_marker() {
    let repo = TestRepo::new();
    repo.commit("init");
    repo.git(&["checkout", "-b", "feature"]);
    repo.commit("feature change");
    repo.git(&["checkout", "main"]);
    repo.commit("main change");
    let merge = repo.git_command(&["merge", "feature"]).output().unwrap();
    assert!(!merge.status.success());

    // A leftover rebase directory must not shadow the active merge.
    std::fs::create_dir(repo.git_dir().join("rebase-merge")).unwrap();

    assert_eq!(probe(&repo).special_state, SpecialState::Merging);
}

#[test]
fn rebase_directory_reports_rebasing() {
    let repo = TestRepo::new();
    repo.commit("init");
    std::fs::create_dir(repo.git_dir().join("rebase-apply")).unwrap();

    assert_eq!(probe(&repo).special_state, SpecialState::Rebasing);
}

// --- Aggregation and gating ---

#[test]
fn probe_is_idempotent_on_unchanged_repo() {
    let repo = repo_with_upstream();
    repo.write_file("untracked.txt", "x");
    repo.commit("tracked change");
    repo.write_file("file.txt", "dirty again");

    let handle = Repository::at(repo.root());
    assert_eq!(handle.status(), handle.status());
}

#[test]
fn non_repository_short_circuits_probe() {
    let dir = tempfile::tempdir().unwrap();
    let repo = Repository::at(dir.path());

    let snapshot = snapshot_for(&repo, None);
    assert_eq!(snapshot.branch, None);
    assert!(snapshot.status.is_none());
    assert!(!snapshot.git_dirty);
    // Branch resolution is the only query ever issued.
    assert_eq!(repo.query_count(), 1);
}

#[test]
fn detached_head_short_circuits_probe() {
    let repo = TestRepo::new();
    repo.commit("init");
    repo.git(&["checkout", "--detach"]);

    let handle = Repository::at(repo.root());
    let snapshot = snapshot_for(&handle, None);
    assert_eq!(snapshot.branch, None);
    assert!(snapshot.status.is_none());
    assert_eq!(handle.query_count(), 1);
}

#[test]
fn snapshot_populates_directory_branch_and_dirty() {
    let repo = TestRepo::new();
    repo.commit("init");

    let snapshot = snapshot_at(repo.root(), None);
    assert_eq!(snapshot.directory.as_deref(), Some("repo"));
    assert_eq!(snapshot.branch.as_deref(), Some("main"));
    assert!(snapshot.status.is_some());
    assert!(!snapshot.git_dirty);

    repo.write_file("untracked.txt", "x");
    let snapshot = snapshot_at(repo.root(), None);
    assert!(snapshot.git_dirty);
    assert!(snapshot.status.unwrap().has_untracked);
}

#[test]
fn corrupted_head_closes_the_branch_gate() {
    let repo = TestRepo::new();
    repo.commit("init");
    std::fs::write(repo.git_dir().join("HEAD"), "garbage\n").unwrap();

    let handle = Repository::at(repo.root());
    assert_eq!(handle.current_branch(), None);

    let snapshot = snapshot_for(&handle, None);
    assert!(snapshot.status.is_none());
    assert!(!snapshot.git_dirty);
}
