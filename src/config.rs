//! # Configuration Management
//!
//! This module handles loading and parsing configuration from the
//! lunar-calendar.toml file. It controls glyph size and colours and where the
//! template and output page live. Command-line flags override these values.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default configuration file name, looked up in the working directory
pub const CONFIG_FILE: &str = "lunar-calendar.toml";

/// Application configuration loaded from lunar-calendar.toml
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Moon glyph appearance
    pub glyph: GlyphConfig,
    /// Template and output locations
    pub page: PageConfig,
}

/// Moon glyph appearance
#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct GlyphConfig {
    /// Width and height of each day's SVG in pixels
    pub diameter: f64,
    /// Fill colour of the illuminated part of the disc
    pub light_colour: String,
    /// Fill colour of the dark part of the disc
    pub shadow_colour: String,
}

/// Template and output locations
#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct PageConfig {
    /// HTML template with `<!-- KEY -->` placeholders; builtin template when unset
    pub template: Option<PathBuf>,
    /// Where the rendered calendar is written
    pub output: PathBuf,
}

impl Default for GlyphConfig {
    fn default() -> Self {
        GlyphConfig {
            diameter: 40.0,
            light_colour: "#f7f7c0".to_string(),
            shadow_colour: "#274982".to_string(),
        }
    }
}

impl Default for PageConfig {
    fn default() -> Self {
        PageConfig {
            template: None,
            output: PathBuf::from("lunar_calendar.html"),
        }
    }
}

impl Config {
    /// Load configuration from lunar-calendar.toml
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load() -> Self {
        Self::load_from_path(CONFIG_FILE)
    }

    /// Load configuration from specified path
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Self {
        match fs::read_to_string(&path) {
            Ok(contents) => match toml::from_str::<Config>(&contents) {
                Ok(config) => {
                    eprintln!("Info: Loaded configuration from {}", path.as_ref().display());
                    config
                }
                Err(e) => {
                    eprintln!("Warning: Invalid config file format: {}", e);
                    eprintln!("Using default configuration");
                    Self::default()
                }
            },
            Err(_) => {
                eprintln!("Info: No config file found, using default configuration");
                Self::default()
            }
        }
    }

    /// Save current configuration to `path`
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(&path, contents)?;
        eprintln!("Info: Configuration saved to {}", path.as_ref().display());
        Ok(())
    }
}
