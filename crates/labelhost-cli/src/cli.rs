//! CLI argument definitions using Clap v4
//!
//! Every host setting can also come from a `LABELHOST_*` environment
//! variable, so the host can be configured by whatever launches it.

use clap::{Args, Parser, Subcommand};
use labelhost_core::{
    config::{
        DEFAULT_ASSET_BASE_URL, DEFAULT_BOLD_FONT, DEFAULT_FONT_FAMILY, DEFAULT_PICKER_COMMAND,
        DEFAULT_REGULAR_FONT,
    },
    FontSources, HostConfig,
};
use std::path::PathBuf;

/// labelhost - Native capabilities for the label printing UI
#[derive(Parser, Debug)]
#[command(name = "labelhost")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Log at debug level (RUST_LOG still takes precedence per module)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Answer JSON messages on stdin, one per line, with JSON lines on stdout
    Serve(ServeArgs),

    /// Fit text into a box and print the result as JSON
    Measure(MeasureArgs),

    /// Rasterize an SVG file to PNG at the printer's resolution
    Rasterize(RasterizeArgs),
}

/// Where the label font comes from
#[derive(Args, Debug, Clone)]
pub struct FontArgs {
    /// Family name the faces are registered under
    #[arg(long, env = "LABELHOST_FONT_FAMILY", default_value = DEFAULT_FONT_FAMILY)]
    pub font_family: String,

    /// URL or path of the regular (400) face
    #[arg(long, env = "LABELHOST_REGULAR_FONT", default_value = DEFAULT_REGULAR_FONT)]
    pub regular_font: String,

    /// URL or path of the bold (700) face
    #[arg(long, env = "LABELHOST_BOLD_FONT", default_value = DEFAULT_BOLD_FONT)]
    pub bold_font: String,
}

impl FontArgs {
    pub fn sources(&self) -> FontSources {
        FontSources {
            family: self.font_family.clone(),
            regular: self.regular_font.clone(),
            bold: self.bold_font.clone(),
        }
    }
}

/// Arguments for the serve command
#[derive(Args, Debug)]
pub struct ServeArgs {
    #[command(flatten)]
    pub fonts: FontArgs,

    /// Base URL of the asset store uploads are PUT to
    #[arg(long, env = "LABELHOST_ASSET_BASE_URL", default_value = DEFAULT_ASSET_BASE_URL)]
    pub asset_base_url: String,

    /// File picker command; prints the chosen path on stdout
    #[arg(long, env = "LABELHOST_PICKER_COMMAND", default_value = DEFAULT_PICKER_COMMAND)]
    pub picker_command: String,

    /// Don't fetch fonts until a request needs them
    #[arg(long, env = "LABELHOST_NO_PRELOAD")]
    pub no_preload: bool,
}

impl ServeArgs {
    pub fn config(&self) -> HostConfig {
        HostConfig {
            fonts: self.fonts.sources(),
            asset_base_url: self.asset_base_url.clone(),
            picker_command: self.picker_command.clone(),
            preload_fonts: !self.no_preload,
        }
    }
}

/// Arguments for the measure command
#[derive(Args, Debug)]
pub struct MeasureArgs {
    /// Text to fit; `\n` separates paragraphs
    pub text: String,

    /// Largest font size to try, in pixels
    #[arg(long, default_value = "48")]
    pub max_font_size: u32,

    /// Smallest font size allowed, in pixels
    #[arg(long, default_value = "8")]
    pub min_font_size: u32,

    /// Width of the box, in pixels
    #[arg(long)]
    pub max_width: f32,

    /// Height of the box, in pixels (0 = no height limit)
    #[arg(long, default_value = "0")]
    pub max_height: f32,

    /// Font weight (400 regular, 700 bold)
    #[arg(long, default_value = "400")]
    pub font_weight: u16,

    /// Line height as a multiple of the font size
    #[arg(long, default_value = "1.2")]
    pub line_height: f32,

    /// Truncate text longer than this many characters
    #[arg(long)]
    pub max_chars: Option<usize>,

    /// Measure with approximate metrics instead of loading fonts
    #[arg(long)]
    pub approximate: bool,

    #[command(flatten)]
    pub fonts: FontArgs,
}

/// Arguments for the rasterize command
#[derive(Args, Debug)]
pub struct RasterizeArgs {
    /// SVG file to rasterize
    pub input: PathBuf,

    /// Output width in pixels
    #[arg(short = 'W', long)]
    pub width: u32,

    /// Output height in pixels
    #[arg(short = 'H', long)]
    pub height: u32,

    /// Draw landscape and turn the result a quarter clockwise
    #[arg(short, long)]
    pub rotate: bool,

    /// PNG file to write (prints a data URL when omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub fonts: FontArgs,
}
