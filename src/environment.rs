//! Environment snapshot assembly: directory, git state, model, context.
//!
//! The snapshot is the one structure the renderer consumes. It is captured
//! fresh on every prompt render, never cached, and always fully populated:
//! data that cannot be obtained is `None` or zero, never an error.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::git::{GitStatus, Repository};
use crate::hook::{self, HookData};

/// Model identity environment fallbacks, highest precedence first.
pub const MODEL_ENV_VARS: &[&str] = &["CLAUDE_MODEL", "CLAUDE_CODE_MODEL", "ANTHROPIC_MODEL"];

/// Everything the renderer needs about the current session.
#[derive(Debug, Clone, Default, Serialize)]
pub struct EnvironmentSnapshot {
    /// Base name of the working directory.
    pub directory: Option<String>,
    pub branch: Option<String>,
    /// Uncommitted-changes summary kept for boolean-only consumers.
    pub git_dirty: bool,
    /// `None` when the working directory is not a usable repository.
    pub status: Option<GitStatus>,
    pub model: Option<String>,
    /// Consumed/window token ratio, rounded. Not clamped: values over 100
    /// are possible and display clamping is the renderer's concern.
    pub context_percent: u32,
}

/// Capture a snapshot for the directory implied by the hook data, falling
/// back to the process working directory.
pub fn environment_snapshot(hook: Option<&HookData>) -> EnvironmentSnapshot {
    let dir = working_dir(hook);
    snapshot_at(dir.as_deref().unwrap_or(Path::new(".")), hook)
}

/// Capture a snapshot for an explicit directory.
pub fn snapshot_at(path: &Path, hook: Option<&HookData>) -> EnvironmentSnapshot {
    snapshot_for(&Repository::at(path), hook)
}

/// Capture a snapshot against an existing repository handle.
///
/// Branch resolution doubles as repository detection: when no branch
/// resolves, no further git queries are issued at all.
pub fn snapshot_for(repo: &Repository, hook: Option<&HookData>) -> EnvironmentSnapshot {
    let branch = repo.current_branch();
    let status = branch.as_ref().map(|_| repo.status());

    EnvironmentSnapshot {
        directory: directory_name(repo.path()),
        branch,
        git_dirty: status.as_ref().is_some_and(GitStatus::is_dirty),
        status,
        model: resolve_model(hook, |name| std::env::var(name).ok()),
        context_percent: context_percent(hook),
    }
}

/// Working directory sources in precedence order: hook project dir, hook
/// current dir, hook cwd, process cwd.
fn working_dir(hook: Option<&HookData>) -> Option<PathBuf> {
    let from_hook = hook.and_then(|h| {
        let workspace = h.workspace.as_ref();
        workspace
            .and_then(|w| w.project_dir.clone())
            .or_else(|| workspace.and_then(|w| w.current_dir.clone()))
            .or_else(|| h.cwd.clone())
    });

    from_hook
        .map(PathBuf::from)
        .or_else(|| std::env::current_dir().ok())
}

/// Base name of the directory, resolving `.` through the process cwd.
fn directory_name(path: &Path) -> Option<String> {
    let resolved;
    let path = if path == Path::new(".") {
        resolved = std::env::current_dir().ok()?;
        resolved.as_path()
    } else {
        path
    };
    path.file_name().map(|name| name.to_string_lossy().into_owned())
}

/// Resolve the model display name: hook identity first, then the
/// [`MODEL_ENV_VARS`] chain. The environment lookup is injected so the
/// precedence order is testable without touching process state.
pub(crate) fn resolve_model(
    hook: Option<&HookData>,
    env: impl Fn(&str) -> Option<String>,
) -> Option<String> {
    if let Some(model) = hook.and_then(|h| h.model.as_ref()) {
        if let Some(id) = model.id.as_deref() {
            return Some(hook::format_model_name(id, model.display_name.as_deref()));
        }
        if let Some(name) = model.display_name.as_deref()
            && !name.is_empty()
        {
            return Some(name.to_string());
        }
    }

    MODEL_ENV_VARS
        .iter()
        .find_map(|name| env(name).filter(|value| !value.is_empty()))
        .map(|id| hook::format_model_name(&id, None))
}

/// Context-window consumption as a rounded percentage.
///
/// Returns 0 when the usage or window size is missing rather than failing.
pub fn context_percent(hook: Option<&HookData>) -> u32 {
    let Some(window) = hook.and_then(|h| h.context_window.as_ref()) else {
        return 0;
    };
    let Some(usage) = window.current_usage.as_ref() else {
        return 0;
    };
    let Some(size) = window.context_window_size.filter(|size| *size > 0) else {
        return 0;
    };

    ((usage.total_tokens() as f64 / size as f64) * 100.0).round() as u32
}
