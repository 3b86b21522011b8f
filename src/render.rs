//! Final line assembly.
//!
//! Two styles: powerline (background-colored capsules joined by triangle
//! separators) and minimal (space-joined text with foreground colors only).
//! With color off both reduce to plain text, which is also what the tests
//! assert against.

use std::fmt::Write as _;

use anstyle::{Color, Reset, Style};

use crate::config::DisplayStyle;
use crate::segments::Segment;
use crate::theme;

/// Powerline separator glyph (U+E0B0).
const SEPARATOR: char = '\u{e0b0}';

/// Render segments into one line.
pub fn line(segments: &[Segment], style: DisplayStyle, color: bool) -> String {
    match style {
        DisplayStyle::Powerline => powerline(segments, color),
        DisplayStyle::Minimal => minimal(segments, color),
    }
}

fn powerline(segments: &[Segment], color: bool) -> String {
    let mut out = String::new();

    for (i, segment) in segments.iter().enumerate() {
        let style = theme::style(segment.color);
        if color {
            let _ = write!(out, "{}", style.render());
        }
        let _ = write!(out, " {} ", segment.text);
        if color {
            let _ = write!(out, "{}", Reset.render());
        }

        let has_next = i + 1 < segments.len();
        match theme::resolve(segment.color.bg) {
            Some(bg) if color => {
                // Separator: this background as foreground, flowing into the
                // next background (or the terminal default after the last).
                let mut sep = Style::new().fg_color(Some(Color::Ansi256(bg)));
                let next_bg = segments
                    .get(i + 1)
                    .and_then(|next| theme::resolve(next.color.bg));
                if let Some(next_bg) = next_bg {
                    sep = sep.bg_color(Some(Color::Ansi256(next_bg)));
                }
                let _ = write!(out, "{}{SEPARATOR}{}", sep.render(), Reset.render());
            }
            Some(_) => {
                if has_next {
                    out.push(SEPARATOR);
                }
            }
            // Transparent background: no capsule edge to draw.
            None => {
                if has_next {
                    out.push(' ');
                }
            }
        }
    }

    out
}

fn minimal(segments: &[Segment], color: bool) -> String {
    let rendered: Vec<String> = segments
        .iter()
        .map(|segment| {
            if color {
                let style = theme::fg_style(segment.color);
                format!("{}{}{}", style.render(), segment.text, style.render_reset())
            } else {
                segment.text.clone()
            }
        })
        .collect();
    rendered.join("  ")
}
