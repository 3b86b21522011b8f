//! Claude Code status-hook ingestion.
//!
//! Claude Code pipes a JSON payload to the status-line process on every
//! prompt render. Every field is optional: the same binary also runs from a
//! plain shell prompt with no stdin at all, and newer hook versions add
//! fields we don't know about yet.

use std::io::{self, Read};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use serde::Deserialize;

/// Parsed hook payload. Unknown fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HookData {
    pub workspace: Option<Workspace>,
    pub model: Option<ModelInfo>,
    pub cwd: Option<String>,
    pub context_window: Option<ContextWindow>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Workspace {
    pub project_dir: Option<String>,
    pub current_dir: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModelInfo {
    pub id: Option<String>,
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContextWindow {
    pub current_usage: Option<ContextUsage>,
    pub context_window_size: Option<u64>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct ContextUsage {
    pub input_tokens: u64,
    pub cache_creation_input_tokens: u64,
    pub cache_read_input_tokens: u64,
}

impl ContextUsage {
    /// Total consumed tokens: fresh input plus cache writes and reads.
    pub fn total_tokens(&self) -> u64 {
        self.input_tokens + self.cache_creation_input_tokens + self.cache_read_input_tokens
    }
}

impl HookData {
    /// Read and parse hook JSON from stdin.
    ///
    /// The read happens on a helper thread with a short deadline so that a
    /// terminal stdin that never closes cannot stall the prompt. Timing out
    /// or failing to parse is the same as receiving nothing.
    pub fn from_stdin() -> Option<Self> {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let mut input = String::new();
            let _ = io::stdin().read_to_string(&mut input);
            let _ = tx.send(input);
        });

        let input = rx.recv_timeout(Duration::from_millis(100)).ok()?;
        Self::parse(&input)
    }

    /// Parse a hook payload. Empty or malformed input yields `None`.
    pub fn parse(input: &str) -> Option<Self> {
        if input.trim().is_empty() {
            return None;
        }
        match serde_json::from_str(input) {
            Ok(data) => Some(data),
            Err(err) => {
                log::debug!("unparseable hook payload: {err}");
                None
            }
        }
    }
}

/// Short display name for a model.
///
/// Prefers the display name supplied by the hook; otherwise derives the
/// family name from the model id (`claude-opus-4-1` becomes `Opus`); falls
/// back to the id verbatim.
pub fn format_model_name(id: &str, display_name: Option<&str>) -> String {
    if let Some(name) = display_name
        && !name.is_empty()
    {
        return name.to_string();
    }

    let lower = id.to_ascii_lowercase();
    for (family, name) in [("opus", "Opus"), ("sonnet", "Sonnet"), ("haiku", "Haiku")] {
        if lower.contains(family) {
            return name.to_string();
        }
    }
    id.to_string()
}
