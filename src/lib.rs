//! Paracal: printable monthly calendars as SVG
//!
//! A month is laid out on a page according to a poster layout (spiral-bound
//! left/right/top/bottom bands, or a square block) and drawn through a
//! [`DrawingSurface`]. Day colours come from a [`Style`] document: weekends,
//! holidays, short days and the dimmed days of adjacent months.
//!
//! Python bindings are available with the `python` feature.

pub mod calendar;
pub mod canvas;
pub mod day_set;
pub mod error;
pub mod layout;
pub mod loader;
pub mod raster;
pub mod renderer;
pub mod style;
pub mod surface;
pub mod svg_writer;
pub mod types;

#[cfg(feature = "python")]
mod python;

pub use canvas::Canvas;
pub use day_set::DaySet;
pub use error::{CalendarError, CalendarResult};
pub use layout::{Layout, LayoutKind};
pub use loader::{load_style, StyleFormat, StyleOverrides};
pub use renderer::{plan, render, MonthPage};
pub use style::{DayCategory, DayClass, Style, SvgStyle};
pub use surface::{DrawingSurface, ImageFit};
pub use svg_writer::SvgWriter;
pub use types::{Pos, Rect, Size, Transform};
