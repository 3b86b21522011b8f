//! Color themes for the status line.
//!
//! A color slot is written either as a raw ANSI-256 index (`"210"`), a hex
//! triplet (`"#ebdbb2"`), or `"transparent"` to leave the slot unstyled.
//! Hex values are mapped onto the 256-color palette: pure grays land on the
//! 24-step grayscale ramp, everything else on the nearest cell of the 6x6x6
//! color cube.

use anstyle::{Ansi256Color, Color, Style};

/// A color slot as written in a theme table.
pub type ColorSpec = &'static str;

/// One segment's color pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentColor {
    pub bg: ColorSpec,
    pub fg: ColorSpec,
}

/// Full theme: a color pair per segment role. Context colors are tiered by
/// consumption so the segment heats up as the window fills.
#[derive(Debug, Clone, Copy)]
pub struct ColorTheme {
    pub time: SegmentColor,
    pub directory: SegmentColor,
    pub git: SegmentColor,
    pub model: SegmentColor,
    pub context_low: SegmentColor,
    pub context_medium: SegmentColor,
    pub context_high: SegmentColor,
    pub warning: SegmentColor,
    pub critical: SegmentColor,
}

/// Resolve a color spec to an ANSI-256 color; `None` for transparent or
/// malformed values.
pub fn resolve(spec: &str) -> Option<Ansi256Color> {
    if spec.is_empty() || spec == "transparent" {
        return None;
    }
    if let Ok(index) = spec.parse::<u8>() {
        return Some(Ansi256Color(index));
    }
    hex_to_ansi256(spec).map(Ansi256Color)
}

/// Style carrying both halves of a color pair.
pub fn style(color: SegmentColor) -> Style {
    let mut style = Style::new();
    if let Some(fg) = resolve(color.fg) {
        style = style.fg_color(Some(Color::Ansi256(fg)));
    }
    if let Some(bg) = resolve(color.bg) {
        style = style.bg_color(Some(Color::Ansi256(bg)));
    }
    style
}

/// Foreground-only style, for the minimal display style.
pub fn fg_style(color: SegmentColor) -> Style {
    let mut style = Style::new();
    if let Some(fg) = resolve(color.fg) {
        style = style.fg_color(Some(Color::Ansi256(fg)));
    }
    style
}

/// Map a `#rrggbb` hex color onto the ANSI-256 palette.
fn hex_to_ansi256(hex: &str) -> Option<u8> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

    if r == g && g == b {
        if r < 8 {
            return Some(16);
        }
        if r > 248 {
            return Some(231);
        }
        return Some(((f64::from(r) - 8.0) / 247.0 * 24.0).round() as u8 + 232);
    }

    let ri = (f64::from(r) / 255.0 * 5.0).round() as u8;
    let gi = (f64::from(g) / 255.0 * 5.0).round() as u8;
    let bi = (f64::from(b) / 255.0 * 5.0).round() as u8;
    Some(16 + 36 * ri + 6 * gi + bi)
}

pub const DARK: ColorTheme = ColorTheme {
    time: SegmentColor { bg: "transparent", fg: "210" },
    directory: SegmentColor { bg: "transparent", fg: "226" },
    git: SegmentColor { bg: "transparent", fg: "50" },
    model: SegmentColor { bg: "transparent", fg: "#ffffff" },
    context_low: SegmentColor { bg: "transparent", fg: "117" },
    context_medium: SegmentColor { bg: "transparent", fg: "150" },
    context_high: SegmentColor { bg: "transparent", fg: "221" },
    warning: SegmentColor { bg: "transparent", fg: "221" },
    critical: SegmentColor { bg: "transparent", fg: "167" },
};

pub const LIGHT: ColorTheme = ColorTheme {
    time: SegmentColor { bg: "#ffd1dc", fg: "#000000" },
    directory: SegmentColor { bg: "#ff6b47", fg: "#ffffff" },
    git: SegmentColor { bg: "#4fb3d9", fg: "#ffffff" },
    model: SegmentColor { bg: "#87ceeb", fg: "#000000" },
    context_low: SegmentColor { bg: "#e0f2fe", fg: "#0369a1" },
    context_medium: SegmentColor { bg: "#d1fae5", fg: "#065f46" },
    context_high: SegmentColor { bg: "#fef3c7", fg: "#92400e" },
    warning: SegmentColor { bg: "#f59e0b", fg: "#000000" },
    critical: SegmentColor { bg: "#ef4444", fg: "#ffffff" },
};

pub const NORD: ColorTheme = ColorTheme {
    time: SegmentColor { bg: "#3b4252", fg: "#d8dee9" },
    directory: SegmentColor { bg: "#434c5e", fg: "#d8dee9" },
    git: SegmentColor { bg: "#3b4252", fg: "#a3be8c" },
    model: SegmentColor { bg: "#4c566a", fg: "#81a1c1" },
    context_low: SegmentColor { bg: "#3b4252", fg: "#81a1c1" },
    context_medium: SegmentColor { bg: "#3b4252", fg: "#a3be8c" },
    context_high: SegmentColor { bg: "#3b4252", fg: "#ebcb8b" },
    warning: SegmentColor { bg: "#d08770", fg: "#2e3440" },
    critical: SegmentColor { bg: "#bf616a", fg: "#eceff4" },
};

pub const GRUVBOX: ColorTheme = ColorTheme {
    time: SegmentColor { bg: "#3c3836", fg: "#fe8019" },
    directory: SegmentColor { bg: "#504945", fg: "#ebdbb2" },
    git: SegmentColor { bg: "#3c3836", fg: "#b8bb26" },
    model: SegmentColor { bg: "#665c54", fg: "#83a598" },
    context_low: SegmentColor { bg: "#3c3836", fg: "#83a598" },
    context_medium: SegmentColor { bg: "#3c3836", fg: "#b8bb26" },
    context_high: SegmentColor { bg: "#3c3836", fg: "#fabd2f" },
    warning: SegmentColor { bg: "#d79921", fg: "#282828" },
    critical: SegmentColor { bg: "#cc241d", fg: "#ebdbb2" },
};

pub const TOKYO_NIGHT: ColorTheme = ColorTheme {
    time: SegmentColor { bg: "#2d3748", fg: "#ff9e64" },
    directory: SegmentColor { bg: "#2f334d", fg: "#82aaff" },
    git: SegmentColor { bg: "#1e2030", fg: "#c3e88d" },
    model: SegmentColor { bg: "#191b29", fg: "#fca7ea" },
    context_low: SegmentColor { bg: "#2d3748", fg: "#7aa2f7" },
    context_medium: SegmentColor { bg: "#2d3748", fg: "#9ece6a" },
    context_high: SegmentColor { bg: "#2d3748", fg: "#e0af68" },
    warning: SegmentColor { bg: "#e0af68", fg: "#1a1b26" },
    critical: SegmentColor { bg: "#f7768e", fg: "#1a1b26" },
};

pub const ROSE_PINE: ColorTheme = ColorTheme {
    time: SegmentColor { bg: "#2a273f", fg: "#ebbcba" },
    directory: SegmentColor { bg: "#26233a", fg: "#c4a7e7" },
    git: SegmentColor { bg: "#1f1d2e", fg: "#9ccfd8" },
    model: SegmentColor { bg: "#191724", fg: "#ebbcba" },
    context_low: SegmentColor { bg: "#2a273f", fg: "#31748f" },
    context_medium: SegmentColor { bg: "#2a273f", fg: "#9ccfd8" },
    context_high: SegmentColor { bg: "#2a273f", fg: "#f6c177" },
    warning: SegmentColor { bg: "#f6c177", fg: "#191724" },
    critical: SegmentColor { bg: "#eb6f92", fg: "#191724" },
};

/// Every built-in theme, keyed by config name.
pub const THEMES: &[(&str, ColorTheme)] = &[
    ("dark", DARK),
    ("light", LIGHT),
    ("nord", NORD),
    ("gruvbox", GRUVBOX),
    ("tokyo-night", TOKYO_NIGHT),
    ("rose-pine", ROSE_PINE),
];

/// Look up a theme by name; unknown names fall back to dark.
pub fn by_name(name: &str) -> ColorTheme {
    THEMES
        .iter()
        .find(|(known, _)| *known == name)
        .map(|(_, theme)| *theme)
        .unwrap_or(DARK)
}
