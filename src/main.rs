use std::path::PathBuf;

use anstyle::Reset;
use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};

use limitline::config::{CompactMode, DisplayStyle, LimitlineConfig};
use limitline::hook::HookData;
use limitline::{environment, render, segments, theme};

#[derive(Parser)]
#[command(
    name = "limitline",
    about = "Powerline-style status line for Claude Code sessions",
    version
)]
struct Cli {
    /// Read Claude Code hook JSON from stdin.
    #[arg(long)]
    claude_code: bool,

    /// Theme name (dark, light, nord, gruvbox, tokyo-night, rose-pine).
    #[arg(long)]
    theme: Option<String>,

    /// Display style override.
    #[arg(long, value_enum)]
    style: Option<DisplayStyle>,

    /// Config file path override.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Maximum line width (defaults to the terminal width in auto compact
    /// mode).
    #[arg(long)]
    width: Option<usize>,

    /// Disable colors.
    #[arg(long)]
    no_color: bool,

    /// Print the environment snapshot as JSON instead of rendering.
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Write a default config file to the user config directory.
    InitConfig,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if let Some(Command::InitConfig) = cli.command {
        return init_config();
    }

    let mut config = LimitlineConfig::load(cli.config.as_deref());
    if let Some(ref theme) = cli.theme {
        config.theme = theme.clone();
    }
    if let Some(style) = cli.style {
        config.display.style = style;
    }

    let hook = if cli.claude_code {
        HookData::from_stdin()
    } else {
        None
    };
    let snapshot = environment::environment_snapshot(hook.as_ref());

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    let theme = theme::by_name(&config.theme);
    let now = chrono::Local::now();
    let mut segments = segments::build(&snapshot, &config, &theme, &now);
    if let Some(max_width) = max_width(&cli, &config) {
        segments = segments::fit_to_width(segments, config.display.style, max_width);
    }

    let color = !cli.no_color && std::env::var_os("NO_COLOR").is_none();
    let line = render::line(&segments, config.display.style, color);
    if cli.claude_code && color {
        // Clear any formatting left over from the hook's own output.
        print!("{}{line}", Reset.render());
    } else {
        print!("{line}");
    }

    Ok(())
}

/// Width budget for compaction, if any.
fn max_width(cli: &Cli, config: &LimitlineConfig) -> Option<usize> {
    if let Some(width) = cli.width {
        return Some(width);
    }
    match config.display.compact_mode {
        CompactMode::Never => None,
        CompactMode::Always => Some(config.display.compact_width as usize),
        CompactMode::Auto => terminal_size::terminal_size()
            .map(|(width, _)| width.0 as usize)
            .filter(|width| *width < config.display.compact_width as usize),
    }
}

fn init_config() -> Result<()> {
    let path = LimitlineConfig::default_path()
        .context("could not determine the user config directory")?;
    if path.exists() {
        bail!("config already exists at {}", path.display());
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("could not create {}", parent.display()))?;
    }
    std::fs::write(&path, LimitlineConfig::default_toml())
        .with_context(|| format!("could not write {}", path.display()))?;
    println!("Wrote {}", path.display());
    Ok(())
}
