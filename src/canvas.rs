//! Page canvas: physical size, extension margin and grid cell
//!
//! The canvas works in scaled units: every millimetre of the page is
//! [`UNIT_SCALE`] units wide so that all layout arithmetic stays integral.

use log::debug;

use crate::error::{CalendarError, CalendarResult};
use crate::layout::LayoutKind;
use crate::types::{Pos, Rect, Size};

/// Scaled units per millimetre
pub const UNIT_SCALE: i32 = 10;
/// Long side of an A4 sheet, mm
pub const A4_LONG: i32 = 297;
/// Short side of an A4 sheet, mm
pub const A4_SHORT: i32 = 210;
/// Room left for the spiral binding along the bound edge
pub const SPIRAL: i32 = 12 * UNIT_SCALE;
/// Font size difference between weekday and number labels
pub const LABEL_OFFSET: i32 = 10;
/// Largest page side, extension or position accepted, mm
pub const MAX_EXTENT: i32 = 100_000;

/// Default grid division `{columns, rows}` per layout variant and orientation
pub fn grid_division(kind: LayoutKind, album: bool) -> Pos {
    match (kind, album) {
        (LayoutKind::Left | LayoutKind::Right, true) => Pos::new(20, 15),
        (LayoutKind::Left | LayoutKind::Right, false) => Pos::new(15, 22),
        (LayoutKind::Top | LayoutKind::Bottom, true) => Pos::new(21, 18),
        (LayoutKind::Top | LayoutKind::Bottom, false) => Pos::new(14, 18),
        (LayoutKind::SquareVertical, true) => Pos::new(18, 18),
        (LayoutKind::SquareVertical, false) => Pos::new(9, 20),
        (LayoutKind::Square, true) => Pos::new(18, 18),
        (LayoutKind::Square, false) => Pos::new(10, 18),
    }
}

/// Fill zero components of a user division from the variant default
pub fn resolve_division(requested: Pos, kind: LayoutKind, album: bool) -> Pos {
    let fallback = grid_division(kind, album);
    Pos::new(
        if requested.x > 0 { requested.x } else { fallback.x },
        if requested.y > 0 { requested.y } else { fallback.y },
    )
}

/// Convert a position in millimetres to scaled units
pub fn to_units(pos: Pos) -> CalendarResult<Pos> {
    let range = -MAX_EXTENT..=MAX_EXTENT;
    if !range.contains(&pos.x) || !range.contains(&pos.y) {
        return Err(CalendarError::InvalidGeometry(format!(
            "position {},{} mm is outside +/-{} mm",
            pos.x, pos.y, MAX_EXTENT
        )));
    }
    pos.checked_scaled(UNIT_SCALE).ok_or_else(|| {
        CalendarError::InvalidGeometry(format!("position {},{} mm overflows", pos.x, pos.y))
    })
}

/// Drawing area derived from the page size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Canvas {
    /// Document size in millimetres, extension included
    pub page: Size,
    /// Scaled drawing rectangle, origin at 0,0
    pub rect: Rect,
    /// Size of one grid cell
    pub grid: Pos,
    /// Scaled extension margin (split evenly between opposite edges)
    pub extend: i32,
}

impl Canvas {
    /// Build a canvas for `size` mm divided into `division` cells.
    ///
    /// `extend` mm are added to the page after the grid is computed, so the
    /// grid keeps partitioning the printable area only.
    pub fn new(size: Size, division: Pos, extend: i32) -> CalendarResult<Self> {
        if division.x <= 0 || division.y <= 0 {
            return Err(CalendarError::InvalidGeometry(format!(
                "grid division must be positive, got {}x{}",
                division.x, division.y
            )));
        }
        if size.width <= 0 || size.height <= 0 {
            return Err(CalendarError::InvalidGeometry(format!(
                "page size must be positive, got {}x{}",
                size.width, size.height
            )));
        }

        if size.width > MAX_EXTENT
            || size.height > MAX_EXTENT
            || !(0..=MAX_EXTENT).contains(&extend)
        {
            return Err(CalendarError::InvalidGeometry(format!(
                "page {}x{} mm with extension {} mm is out of range (0..={} mm)",
                size.width, size.height, extend, MAX_EXTENT
            )));
        }

        let overflow = || {
            CalendarError::InvalidGeometry(format!(
                "page {}x{} mm with extension {} mm overflows",
                size.width, size.height, extend
            ))
        };
        let page = Size::new(
            size.width.checked_add(extend).ok_or_else(overflow)?,
            size.height.checked_add(extend).ok_or_else(overflow)?,
        );
        let scaled_page = Pos::new(page.width, page.height)
            .checked_scaled(UNIT_SCALE)
            .ok_or_else(overflow)?;
        let printable = Pos::new(size.width, size.height)
            .checked_scaled(UNIT_SCALE)
            .ok_or_else(overflow)?;
        let canvas = Self {
            page,
            rect: Rect::new(0, 0, scaled_page.x, scaled_page.y),
            grid: Pos::new(printable.x / division.x, printable.y / division.y),
            extend: extend.checked_mul(UNIT_SCALE).ok_or_else(overflow)?,
        };
        debug!(
            "Canvas {}x{} mm, grid cell {}x{}, extend {}",
            page.width, page.height, canvas.grid.x, canvas.grid.y, canvas.extend
        );
        Ok(canvas)
    }

    pub fn width(&self) -> i32 {
        self.rect.size.width
    }

    pub fn height(&self) -> i32 {
        self.rect.size.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_partitions_printable_area() {
        let canvas = Canvas::new(Size::new(A4_LONG, A4_SHORT), Pos::new(20, 15), 5).unwrap();
        assert_eq!(canvas.grid, Pos::new(2970 / 20, 2100 / 15));
        assert_eq!(canvas.rect, Rect::new(0, 0, 3020, 2150));
        assert_eq!(canvas.page, Size::new(302, 215));
        assert_eq!(canvas.extend, 50);
    }

    #[test]
    fn test_zero_division_is_rejected() {
        let err = Canvas::new(Size::new(A4_LONG, A4_SHORT), Pos::new(0, 15), 0).unwrap_err();
        assert!(matches!(err, CalendarError::InvalidGeometry(_)));
    }

    #[test]
    fn test_oversized_page_is_rejected() {
        for (size, extend) in [
            (Size::new(i32::MAX, A4_SHORT), 0),
            (Size::new(A4_LONG, A4_SHORT), i32::MAX),
            (Size::new(A4_LONG, A4_SHORT), -5),
            (Size::new(MAX_EXTENT + 1, A4_SHORT), 0),
        ] {
            let err = Canvas::new(size, Pos::new(20, 15), extend).unwrap_err();
            assert!(matches!(err, CalendarError::InvalidGeometry(_)), "{size:?} {extend}");
        }
        let largest =
            Canvas::new(Size::new(MAX_EXTENT, MAX_EXTENT), Pos::new(1, 1), MAX_EXTENT).unwrap();
        assert_eq!(largest.width(), 2 * MAX_EXTENT * UNIT_SCALE);
    }

    #[test]
    fn test_positions_convert_to_units() {
        assert_eq!(to_units(Pos::new(20, -3)).unwrap(), Pos::new(200, -30));
        assert!(matches!(
            to_units(Pos::new(300_000_000, 0)),
            Err(CalendarError::InvalidGeometry(_))
        ));
        assert!(to_units(Pos::new(0, i32::MIN)).is_err());
    }

    #[test]
    fn test_division_defaults_per_component() {
        assert_eq!(
            resolve_division(Pos::new(0, 0), LayoutKind::Top, true),
            Pos::new(21, 18)
        );
        assert_eq!(
            resolve_division(Pos::new(30, 0), LayoutKind::Square, false),
            Pos::new(30, 18)
        );
    }

    #[test]
    fn test_every_variant_has_nonzero_division() {
        for kind in LayoutKind::ALL {
            for album in [true, false] {
                let div = grid_division(kind, album);
                assert!(div.x > 0 && div.y > 0, "{kind:?} album={album}");
            }
        }
    }
}
