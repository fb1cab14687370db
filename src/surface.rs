//! Drawing surface contract used by the renderer

use crate::error::CalendarResult;
use crate::types::{Pos, Rect, Size, Transform};

/// How an image is fitted into its box
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ImageFit {
    /// Stretch to the box, ignoring the aspect ratio
    #[default]
    Stretch,
}

impl ImageFit {
    /// Value of the SVG `preserveAspectRatio` attribute
    pub fn preserve_aspect_ratio(&self) -> &'static str {
        match self {
            ImageFit::Stretch => "none",
        }
    }
}

/// Sink for calendar drawing calls.
///
/// Coordinates are in scaled page units; only [`DrawingSurface::start`]
/// knows about physical units. Styles are CSS declaration strings.
pub trait DrawingSurface {
    /// Open the document: `page` measured in `unit`, drawn into `view_box`
    fn start(&mut self, page: Size, unit: &str, view_box: Rect) -> CalendarResult<()>;

    /// Close the document and flush it
    fn end(&mut self) -> CalendarResult<()>;

    fn rect(&mut self, pos: Pos, size: Size, style: &str) -> CalendarResult<()>;

    fn image(&mut self, pos: Pos, size: Size, href: &str, fit: ImageFit) -> CalendarResult<()>;

    /// Open a group; every call until the matching `group_end` is nested in it
    fn group_start(&mut self, style: &str, transform: Transform) -> CalendarResult<()>;

    fn group_end(&mut self) -> CalendarResult<()>;

    fn text(&mut self, x: i32, y: i32, text: &str, style: &str) -> CalendarResult<()>;
}
