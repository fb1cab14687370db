//! Day grid: which dates land in which cell, and how many weeks are shown

use chrono::{Datelike, Duration, NaiveDate};
use log::debug;

use crate::error::{CalendarError, CalendarResult};
use crate::layout::{Layout, LayoutKind};
use crate::style::{DayClass, Style, SvgStyle};

/// Cells in a full six-week grid
pub const GRID_CELLS: usize = 42;
/// Cells in a five-week grid
pub const SHORT_GRID_CELLS: usize = 35;

/// First day of `month` in `year`
pub fn first_of_month(year: i32, month: u32) -> CalendarResult<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| CalendarError::InvalidDate(format!("{}-{:02}", year, month)))
}

/// Monday on or before `date`
pub fn back_monday(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// Grid `(column, row)` of the `index`-th cell.
///
/// Bands run across the page for vertical layouts and down the page
/// otherwise.
pub fn cell_position(index: usize, layout: &Layout) -> (i32, i32) {
    let per_band = layout.cells_per_band() as usize;
    let band = (index / per_band) as i32;
    let cell = (index % per_band) as i32;
    if layout.vertical {
        (band, cell)
    } else {
        (cell, band)
    }
}

/// Number of cells to draw for `month`.
///
/// Spiral layouts always show six weeks. Square layouts drop the last week
/// when a band would start in the following month.
pub fn visible_cells(
    year: i32,
    month: u32,
    kind: LayoutKind,
    layout: &Layout,
) -> CalendarResult<usize> {
    if !kind.is_square() {
        return Ok(GRID_CELLS);
    }

    let target = year * 100 + month as i32;
    let start = back_monday(first_of_month(year, month)?);
    for (index, date) in start.iter_days().take(GRID_CELLS).enumerate() {
        let (column, row) = cell_position(index, layout);
        let band_start = match kind {
            LayoutKind::Square => column == 0,
            LayoutKind::SquareVertical => row == 0,
            _ => false,
        };
        if band_start && target < date.year() * 100 + date.month() as i32 {
            debug!("{}-{:02}: band at cell {} is in the next month", year, month, index);
            return Ok(SHORT_GRID_CELLS);
        }
    }
    Ok(GRID_CELLS)
}

/// Shrink a square panel to the weeks actually drawn.
///
/// The square spans seven cells along the week axis: one for the weekday
/// header and six for weeks.
pub fn fit_shadow_to_weeks(layout: &mut Layout, kind: LayoutKind, cells: usize) {
    if !kind.is_square() {
        return;
    }
    let span = (cells / 7) as i32 + 1;
    if layout.vertical {
        layout.shadow.size.width = layout.shadow.size.width * span / 7;
    } else {
        layout.shadow.size.height = layout.shadow.size.height * span / 7;
    }
}

/// One drawn day of the grid
#[derive(Debug, Clone, PartialEq)]
pub struct DayCell {
    pub date: NaiveDate,
    pub column: i32,
    pub row: i32,
    pub class: DayClass,
    /// Day of month, unpadded
    pub label: String,
    pub style: SvgStyle,
}

/// Build the first `cells` day cells for `month`, starting on the Monday on
/// or before the 1st.
pub fn day_cells(
    year: i32,
    month: u32,
    layout: &Layout,
    cells: usize,
    style: &Style,
) -> CalendarResult<Vec<DayCell>> {
    let start = back_monday(first_of_month(year, month)?);
    Ok(start
        .iter_days()
        .take(cells)
        .enumerate()
        .map(|(index, date)| {
            let (column, row) = cell_position(index, layout);
            let (label, day_style) = style.day(date, month);
            DayCell {
                date,
                column,
                row,
                class: style.classify(date, month),
                label,
                style: day_style,
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{resolve_division, Canvas, A4_LONG, A4_SHORT};
    use crate::types::{Pos, Size};
    use chrono::Weekday;

    fn square_layout(kind: LayoutKind) -> Layout {
        let canvas = Canvas::new(
            Size::new(A4_LONG, A4_SHORT),
            resolve_division(Pos::default(), kind, true),
            0,
        )
        .unwrap();
        canvas.layout(kind, true, Pos::default())
    }

    #[test]
    fn test_back_monday() {
        let sunday = NaiveDate::from_ymd_opt(2023, 10, 1).unwrap();
        assert_eq!(back_monday(sunday), NaiveDate::from_ymd_opt(2023, 9, 25).unwrap());
        let monday = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(back_monday(monday), monday);
        assert_eq!(back_monday(monday).weekday(), Weekday::Mon);
    }

    #[test]
    fn test_invalid_month() {
        assert!(matches!(first_of_month(2024, 13), Err(CalendarError::InvalidDate(_))));
    }

    #[test]
    fn test_short_month_drops_last_week() {
        // April 2024 starts on Monday: 30 days fill four weeks and two days.
        for kind in [LayoutKind::Square, LayoutKind::SquareVertical] {
            let layout = square_layout(kind);
            assert_eq!(visible_cells(2024, 4, kind, &layout).unwrap(), SHORT_GRID_CELLS);
        }
    }

    #[test]
    fn test_long_month_keeps_six_weeks() {
        // October 2023 starts on Sunday and has 31 days.
        for kind in [LayoutKind::Square, LayoutKind::SquareVertical] {
            let layout = square_layout(kind);
            assert_eq!(visible_cells(2023, 10, kind, &layout).unwrap(), GRID_CELLS);
        }
    }

    #[test]
    fn test_spiral_layouts_always_six_weeks() {
        let canvas =
            Canvas::new(Size::new(A4_LONG, A4_SHORT), Pos::new(20, 15), 0).unwrap();
        let layout = canvas.layout(LayoutKind::Left, true, Pos::default());
        assert_eq!(visible_cells(2024, 4, LayoutKind::Left, &layout).unwrap(), GRID_CELLS);
    }

    #[test]
    fn test_cell_positions_follow_orientation() {
        let horizontal = square_layout(LayoutKind::Square);
        assert_eq!(cell_position(0, &horizontal), (0, 0));
        assert_eq!(cell_position(6, &horizontal), (6, 0));
        assert_eq!(cell_position(8, &horizontal), (1, 1));

        let vertical = square_layout(LayoutKind::SquareVertical);
        assert_eq!(cell_position(6, &vertical), (0, 6));
        assert_eq!(cell_position(8, &vertical), (1, 1));
        assert_eq!(cell_position(41, &vertical), (5, 6));
    }

    #[test]
    fn test_shadow_follows_visible_weeks() {
        let mut layout = square_layout(LayoutKind::Square);
        let full = layout.shadow.size;
        fit_shadow_to_weeks(&mut layout, LayoutKind::Square, GRID_CELLS);
        assert_eq!(layout.shadow.size, full);
        fit_shadow_to_weeks(&mut layout, LayoutKind::Square, SHORT_GRID_CELLS);
        assert_eq!(layout.shadow.size.height, full.height * 6 / 7);
        assert_eq!(layout.shadow.size.width, full.width);

        let mut vertical = square_layout(LayoutKind::SquareVertical);
        let full = vertical.shadow.size;
        fit_shadow_to_weeks(&mut vertical, LayoutKind::SquareVertical, SHORT_GRID_CELLS);
        assert_eq!(vertical.shadow.size.width, full.width * 6 / 7);
        assert_eq!(vertical.shadow.size.height, full.height);
    }

    #[test]
    fn test_day_cells_labels_and_ghosts() {
        let layout = square_layout(LayoutKind::Square);
        let cells = day_cells(2023, 10, &layout, GRID_CELLS, &Style::builtin()).unwrap();
        assert_eq!(cells.len(), GRID_CELLS);
        assert_eq!(cells[0].date, NaiveDate::from_ymd_opt(2023, 9, 25).unwrap());
        assert_eq!(cells[0].label, "25");
        assert!(cells[0].class.ghost);
        assert_eq!(cells[6].label, "1");
        assert!(!cells[6].class.ghost);
        assert_eq!((cells[6].column, cells[6].row), (6, 0));
        assert_eq!(cells[41].label, "5");
        assert!(cells[41].class.ghost);
    }
}
