//! # Lunar Calendar Application Entry Point
//!
//! Renders the calendar page for the year given on the command line:
//!
//! ```text
//! lunar-calendar 2018
//! lunar-calendar 2018 --output moons.html --events-json moons.json
//! ```
//!
//! Settings come from lunar-calendar.toml (or `--config`), with command-line
//! flags taking precedence.

use anyhow::Context;
use clap::Parser;
use lunar_calendar_lib::config::{Config, CONFIG_FILE};
use lunar_calendar_lib::ephemeris::MeeusEphemeris;
use lunar_calendar_lib::page::CalendarPageBuilder;
use lunar_calendar_lib::renderer::MoonGlyphRenderer;
use lunar_calendar_lib::template::Template;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "lunar-calendar", about = "Render a moon-phase calendar for a year")]
struct Cli {
    /// Calendar year to render
    year: i32,

    /// Configuration file
    #[arg(long, default_value = CONFIG_FILE)]
    config: PathBuf,

    /// HTML template with <!-- KEY --> placeholders (builtin template by default)
    #[arg(long)]
    template: Option<PathBuf>,

    /// Output HTML file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also write the year's new and full moons as JSON
    #[arg(long)]
    events_json: Option<PathBuf>,
}

/// Main application entry point.
fn main() -> anyhow::Result<()> {
    // Missing or non-integer year: clap prints usage to stderr and exits non-zero
    let cli = Cli::parse();
    let config = Config::load_from_path(&cli.config);

    let template = match cli.template.as_ref().or(config.page.template.as_ref()) {
        Some(path) => Template::load(path)
            .with_context(|| format!("reading template {}", path.display()))?,
        None => Template::builtin(),
    };
    let output = cli.output.unwrap_or(config.page.output);

    let ephemeris = MeeusEphemeris::new();
    let renderer = MoonGlyphRenderer::from_config(&config.glyph);
    let page = CalendarPageBuilder::new(&ephemeris, renderer)
        .build(&template, cli.year)
        .with_context(|| format!("rendering calendar for {}", cli.year))?;

    page.save(&output)
        .with_context(|| format!("writing {}", output.display()))?;

    if let Some(path) = cli.events_json {
        page.events
            .save(&path)
            .with_context(|| format!("writing {}", path.display()))?;
        eprintln!("Info: Wrote moon events to {}", path.display());
    }

    println!(
        "Lunar calendar for {} written to {}",
        cli.year,
        output.display()
    );
    Ok(())
}
