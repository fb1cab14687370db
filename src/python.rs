//! Python bindings

use std::path::PathBuf;

use pyo3::prelude::*;

use crate::error::CalendarResult;
use crate::layout::LayoutKind;
use crate::loader::{load_style, StyleOverrides};
use crate::renderer::render;
use crate::style::Style;
use crate::svg_writer::SvgWriter;
use crate::types::Pos;

fn prepare_style(
    style_path: Option<PathBuf>,
    layout: Option<&str>,
    background: Option<String>,
    pos: (i32, i32),
) -> CalendarResult<Style> {
    let mut style = match style_path {
        Some(path) => load_style(path)?,
        None => Style::builtin(),
    };
    let overrides = StyleOverrides {
        layout: layout.map(str::parse::<LayoutKind>).transpose()?,
        background: background.unwrap_or_default(),
        pos: Pos::new(pos.0, pos.1),
    };
    overrides.apply(&mut style);
    Ok(style)
}

/// Render one month into an SVG file
#[pyfunction]
#[pyo3(signature = (output, year, month, style_path=None, layout=None, background=None, posx=0, posy=0, embed=false))]
#[allow(clippy::too_many_arguments)]
fn render_calendar(
    output: PathBuf,
    year: i32,
    month: u32,
    style_path: Option<PathBuf>,
    layout: Option<&str>,
    background: Option<String>,
    posx: i32,
    posy: i32,
    embed: bool,
) -> PyResult<()> {
    let style = prepare_style(style_path, layout, background, (posx, posy))?;
    let mut writer = SvgWriter::create(output)?.with_embedded_images(embed);
    render(&mut writer, year, month, &style)?;
    Ok(())
}

/// Render one month and return the SVG markup
#[pyfunction]
#[pyo3(signature = (year, month, style_path=None, layout=None, background=None))]
fn render_calendar_svg(
    year: i32,
    month: u32,
    style_path: Option<PathBuf>,
    layout: Option<&str>,
    background: Option<String>,
) -> PyResult<String> {
    let style = prepare_style(style_path, layout, background, (0, 0))?;
    let mut writer = SvgWriter::new(Vec::new());
    render(&mut writer, year, month, &style)?;
    String::from_utf8(writer.into_inner())
        .map_err(|e| PyErr::new::<pyo3::exceptions::PyValueError, _>(e.to_string()))
}

/// Python module for calendar rendering
#[pymodule]
fn paracal(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(render_calendar, m)?)?;
    m.add_function(wrap_pyfunction!(render_calendar_svg, m)?)?;
    Ok(())
}
