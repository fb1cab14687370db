use std::path::PathBuf;

use clap::Parser;
use paracal::LayoutKind;

/// Printable monthly poster calendar generator.
#[derive(Parser)]
#[command(name = "paracal", version, about = "Render a monthly poster calendar as SVG")]
pub struct Cli {
    /// Path to style configuration (YAML, or JSON by extension).
    #[arg(short, long, default_value = "paracal.yaml")]
    pub style: PathBuf,

    /// Calendar layout.
    #[arg(short, long, value_parser = parse_layout)]
    pub layout: Option<LayoutKind>,

    /// Background image path or background color in #hex format.
    #[arg(short, long)]
    pub back: Option<String>,

    /// Year; 0 for the current year, two digits mean 20xx.
    #[arg(short, long, default_value_t = 0)]
    pub year: i32,

    /// Month [1-12]; 0 for the current month.
    #[arg(short, long, default_value_t = 0, value_parser = clap::value_parser!(u32).range(0..=12))]
    pub month: u32,

    /// Square anchor X, mm.
    #[arg(long, default_value_t = 0)]
    pub posx: i32,

    /// Square anchor Y, mm.
    #[arg(long, default_value_t = 0)]
    pub posy: i32,

    /// Output SVG file.
    #[arg(short, long)]
    pub output: PathBuf,

    /// Also write a PNG preview to this path.
    #[arg(long)]
    pub png: Option<PathBuf>,

    /// Resolution of the PNG preview.
    #[arg(long, default_value_t = 150.0)]
    pub dpi: f32,

    /// Embed the background image in the SVG instead of linking it.
    #[arg(long)]
    pub embed: bool,

    /// Dump the applied style.
    #[arg(long)]
    pub debug: bool,

    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

fn parse_layout(value: &str) -> Result<LayoutKind, String> {
    value.parse().map_err(|e: paracal::CalendarError| e.to_string())
}

/// Expand a short or zero year: 0 is `current`, `< 100` is `2000 + year`
pub fn expand_year(year: i32, current: i32) -> i32 {
    match year {
        0 => current,
        y if y < 100 => 2000 + y,
        y => y,
    }
}
