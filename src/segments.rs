//! Segment construction and width-aware compaction.
//!
//! Segments carry plain text plus a color role and a drop priority; styling
//! is applied at render time so width math stays simple.

use chrono::{DateTime, Local};
use unicode_width::UnicodeWidthStr;

use crate::config::{DisplayStyle, LimitlineConfig, SegmentName};
use crate::environment::EnvironmentSnapshot;
use crate::git::{GitStatus, SpecialState};
use crate::theme::{ColorTheme, SegmentColor};

/// A built segment awaiting rendering.
///
/// Lower priority numbers survive compaction longer.
#[derive(Debug, Clone)]
pub struct Segment {
    pub text: String,
    pub color: SegmentColor,
    pub priority: u8,
}

impl Segment {
    pub fn width(&self) -> usize {
        self.text.width()
    }
}

/// Build the enabled segments in configured order.
///
/// A segment with nothing to show (no git branch, no model) is omitted
/// rather than rendered empty.
pub fn build(
    snapshot: &EnvironmentSnapshot,
    config: &LimitlineConfig,
    theme: &ColorTheme,
    now: &DateTime<Local>,
) -> Vec<Segment> {
    config
        .segment_order
        .iter()
        .filter_map(|name| segment(*name, snapshot, config, theme, now))
        .collect()
}

fn segment(
    name: SegmentName,
    snapshot: &EnvironmentSnapshot,
    config: &LimitlineConfig,
    theme: &ColorTheme,
    now: &DateTime<Local>,
) -> Option<Segment> {
    let toggles = &config.segments;
    match name {
        SegmentName::Time => toggles.time.then(|| Segment {
            text: now.format("%H:%M").to_string(),
            color: theme.time,
            priority: 4,
        }),
        SegmentName::Directory => {
            if !toggles.directory {
                return None;
            }
            let directory = snapshot.directory.as_ref()?;
            Some(Segment {
                text: directory.clone(),
                color: theme.directory,
                priority: 0,
            })
        }
        SegmentName::Git => {
            if !toggles.git {
                return None;
            }
            let branch = snapshot.branch.as_ref()?;
            Some(Segment {
                text: git_text(branch, snapshot.status.as_ref()),
                color: theme.git,
                priority: 1,
            })
        }
        SegmentName::Model => {
            if !toggles.model {
                return None;
            }
            let model = snapshot.model.as_ref()?;
            Some(Segment {
                text: model.clone(),
                color: theme.model,
                priority: 2,
            })
        }
        SegmentName::Context => toggles.context.then(|| Segment {
            // Clamp for display only; the snapshot keeps the raw ratio.
            text: format!("{}%", snapshot.context_percent.min(100)),
            color: context_color(theme, snapshot.context_percent),
            priority: 3,
        }),
    }
}

/// Branch name plus state glyphs: `*` unstaged, `+` staged, `%` untracked,
/// `$` stashed, an upstream marker, and an operation tag like `|MERGING`.
fn git_text(branch: &str, status: Option<&GitStatus>) -> String {
    let Some(status) = status else {
        return branch.to_string();
    };

    let mut text = String::from(branch);

    let mut glyphs = String::new();
    if status.has_unstaged {
        glyphs.push('*');
    }
    if status.has_staged {
        glyphs.push('+');
    }
    if status.has_untracked {
        glyphs.push('%');
    }
    if status.has_stashed {
        glyphs.push('$');
    }
    glyphs.push_str(status.upstream.glyph());
    if !glyphs.is_empty() {
        text.push(' ');
        text.push_str(&glyphs);
    }

    if status.special_state != SpecialState::None {
        text.push('|');
        text.push_str(status.special_state.label());
    }

    text
}

/// Context color tier for the given (unclamped) percentage.
fn context_color(theme: &ColorTheme, percent: u32) -> SegmentColor {
    match percent {
        0..50 => theme.context_low,
        50..70 => theme.context_medium,
        70..90 => theme.context_high,
        90..100 => theme.warning,
        _ => theme.critical,
    }
}

/// Visible width of the full line for a display style.
///
/// Powerline pads each segment with a space either side and places a
/// one-column separator after it; minimal joins with two spaces.
pub fn total_width(segments: &[Segment], style: DisplayStyle) -> usize {
    if segments.is_empty() {
        return 0;
    }
    match style {
        DisplayStyle::Powerline => segments.iter().map(|s| s.width() + 3).sum(),
        DisplayStyle::Minimal => {
            let content: usize = segments.iter().map(Segment::width).sum();
            content + (segments.len() - 1) * 2
        }
    }
}

/// Drop lowest-priority segments until the line fits `max_width`.
///
/// Ties drop the later segment first, and at least one segment always
/// survives even if it alone overflows the budget.
pub fn fit_to_width(segments: Vec<Segment>, style: DisplayStyle, max_width: usize) -> Vec<Segment> {
    if segments.is_empty() || total_width(&segments, style) <= max_width {
        return segments;
    }

    // Track original indices so the survivors keep their order.
    let mut indexed: Vec<(usize, Segment)> = segments.into_iter().enumerate().collect();

    while indexed.len() > 1 {
        let remaining: Vec<&Segment> = indexed.iter().map(|(_, seg)| seg).collect();
        let width: usize = match style {
            DisplayStyle::Powerline => remaining.iter().map(|s| s.width() + 3).sum(),
            DisplayStyle::Minimal => {
                remaining.iter().map(|s| s.width()).sum::<usize>() + (remaining.len() - 1) * 2
            }
        };
        if width <= max_width {
            break;
        }

        let drop_idx = indexed
            .iter()
            .enumerate()
            .max_by(|(i, (_, a)), (j, (_, b))| a.priority.cmp(&b.priority).then_with(|| i.cmp(j)))
            .map(|(i, _)| i)
            .expect("non-empty segment list");
        indexed.remove(drop_idx);
    }

    indexed.sort_by_key(|(idx, _)| *idx);
    indexed.into_iter().map(|(_, seg)| seg).collect()
}
