mod cli;
mod logging;

use std::fs;
use std::process;

use chrono::{Datelike, Local};
use clap::Parser;
use tracing::info;

use paracal::{load_style, raster, render, CalendarResult, Pos, StyleOverrides, SvgWriter};

use crate::cli::{expand_year, Cli};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> CalendarResult<()> {
    let today = Local::now().date_naive();
    let year = expand_year(cli.year, today.year());
    let month = if cli.month == 0 { today.month() } else { cli.month };

    let mut style = load_style(&cli.style)?;
    StyleOverrides {
        layout: cli.layout,
        background: cli.back.unwrap_or_default(),
        pos: Pos::new(cli.posx, cli.posy),
    }
    .apply(&mut style);

    if cli.debug {
        println!("{}", style.to_yaml()?);
    }

    let mut writer = SvgWriter::create(&cli.output)?.with_embedded_images(cli.embed);
    render(&mut writer, year, month, &style)?;
    info!("SVG written to {}", cli.output.display());

    if let Some(png) = &cli.png {
        let svg_content = fs::read_to_string(&cli.output)?;
        raster::save_png(&svg_content, cli.dpi, png)?;
        info!("PNG preview written to {}", png.display());
    }
    Ok(())
}
