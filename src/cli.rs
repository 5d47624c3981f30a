//! Command-line interface definitions and helpers.
//!
//! This module contains all CLI argument parsing, enums, and subcommand handlers.

use clap::{ArgGroup, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::ascii::{ColourMode, MirrorMode};
use crate::config::{default_path as get_config_path, Config, RenderConfig, DEFAULT_CONFIG_TOML};

// ==================== CLI Enums ====================

/// Mirror mode as accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Mirror {
    #[default]
    None,
    X,
    Y,
    Xy,
}

impl From<Mirror> for MirrorMode {
    fn from(m: Mirror) -> Self {
        match m {
            Mirror::None => MirrorMode::None,
            Mirror::X => MirrorMode::X,
            Mirror::Y => MirrorMode::Y,
            Mirror::Xy => MirrorMode::XY,
        }
    }
}

// ==================== CLI Arguments ====================

/// Types images into the terminal as coloured ASCII art
#[derive(Parser, Debug)]
#[command(name = "ascii-typewriter")]
#[command(version, about = "Converts PNG/JPEG images to coloured ASCII art using 8 characters", long_about = None)]
#[command(group(ArgGroup::new("colour").args(["monochrome", "posterized", "colourful", "random"])))]
#[command(after_help = "ASCII CHARACTERS USED: \" .:-=+*#\"")]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Image file to convert ("default" for the built-in test card)
    #[arg(short, long, default_value = "default", conflicts_with = "folder")]
    pub image: PathBuf,

    /// Print every PNG/JPEG image in this folder
    #[arg(short, long)]
    pub folder: Option<PathBuf>,

    /// Width of the output in characters [default: 80]
    #[arg(short, long)]
    pub width: Option<u32>,

    /// Printing speed in characters per second, 0 for instant [default: 1000]
    #[arg(short, long)]
    pub speed: Option<u32>,

    /// Print forever, pausing one second between frames
    #[arg(short, long = "loop")]
    pub loop_mode: bool,

    /// Mirror the image [default: none]
    #[arg(long, value_enum)]
    pub mirror: Option<Mirror>,

    /// Black and white ASCII art
    #[arg(short, long)]
    pub monochrome: bool,

    /// 8-colour posterized ASCII art (default)
    #[arg(short, long)]
    pub posterized: bool,

    /// Full-colour ASCII art
    #[arg(short, long)]
    pub colourful: bool,

    /// Random colour per character, rerolled each frame
    #[arg(short, long)]
    pub random: bool,

    /// Config file path
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Args {
    /// Colour mode chosen by flag, if any.
    pub fn colour_mode(&self) -> Option<ColourMode> {
        if self.monochrome {
            Some(ColourMode::Monochrome)
        } else if self.posterized {
            Some(ColourMode::Posterized)
        } else if self.colourful {
            Some(ColourMode::Colourful)
        } else if self.random {
            Some(ColourMode::Random)
        } else {
            None
        }
    }

    /// Merge flags over the settings from the config file.
    pub fn render_config(&self, file: &Config) -> RenderConfig {
        let base = file.render_config();
        RenderConfig::new(
            self.width.unwrap_or(base.width),
            self.colour_mode().unwrap_or(base.colour_mode),
            self.mirror.map(MirrorMode::from).unwrap_or(base.mirror_mode),
            self.speed.unwrap_or(base.print_speed),
            self.loop_mode || base.loop_mode,
        )
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Show current configuration
    Show,
    /// Create default config file
    Init,
}

// ==================== Subcommand Handlers ====================

/// Handle config subcommand actions.
pub fn handle_config_action(action: ConfigAction, args: &Args) {
    match action {
        ConfigAction::Show => {
            let config_path = args.config.clone().unwrap_or_else(get_config_path);
            let file = match Config::load(Some(&config_path)) {
                Ok(file) => file,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            };
            let render = args.render_config(&file);

            println!("Current configuration:");
            println!("  Width: {}", render.width);
            println!("  Speed: {} chars/s", render.print_speed);
            println!("  Colour: {}", render.colour_mode.name());
            println!("  Mirror: {}", render.mirror_mode.name());
            println!("  Loop: {}", if render.loop_mode { "yes" } else { "no" });
            println!();

            if config_path.exists() {
                println!("Config file: {} (exists)", config_path.display());
            } else {
                println!("Config file: {} (not found)", config_path.display());
            }
        }
        ConfigAction::Init => {
            let config_path = args.config.clone().unwrap_or_else(get_config_path);

            if config_path.exists() {
                eprintln!("Config file already exists: {}", config_path.display());
                eprintln!("Use 'ascii-typewriter config show' to view current settings.");
                std::process::exit(1);
            }

            // Create parent directories if needed
            if let Some(parent) = config_path.parent() {
                if let Err(e) = std::fs::create_dir_all(parent) {
                    eprintln!("Error creating config directory: {}", e);
                    std::process::exit(1);
                }
            }

            if let Err(e) = std::fs::write(&config_path, DEFAULT_CONFIG_TOML) {
                eprintln!("Error writing config file: {}", e);
                std::process::exit(1);
            }

            println!("Created config file: {}", config_path.display());
        }
    }
}
