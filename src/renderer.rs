//! Month renderer: turns a resolved style into drawing calls
//!
//! Elements are emitted in a fixed order so later layers sit on top:
//! background, shadow panel, weekday header, day numbers, month caption and
//! finally the free-form text overlays.

use log::{debug, info};

use crate::calendar::{day_cells, fit_shadow_to_weeks, visible_cells, DayCell};
use crate::canvas::{resolve_division, to_units, Canvas};
use crate::error::CalendarResult;
use crate::layout::{Layout, LayoutKind};
use crate::style::Style;
use crate::surface::{DrawingSurface, ImageFit};
use crate::types::Pos;

/// Unit of the document viewport
pub const PAGE_UNIT: &str = "mm";

/// Geometry and day cells of one month, ready to draw
#[derive(Debug, Clone)]
pub struct MonthPage {
    pub year: i32,
    pub month: u32,
    pub kind: LayoutKind,
    pub canvas: Canvas,
    pub layout: Layout,
    pub cells: Vec<DayCell>,
}

/// Compute canvas, layout and visible cells for `month` of `year`
pub fn plan(year: i32, month: u32, style: &Style) -> CalendarResult<MonthPage> {
    let kind = style.layout_for(month);
    let album = style.size.is_album();
    let division = resolve_division(style.grid, kind, album);
    let canvas = Canvas::new(style.size, division, style.extend)?;

    let mut layout = canvas.layout(kind, album, to_units(style.pos)?);
    layout.month_name = layout
        .month_name
        .override_with(to_units(style.month_pos_for(month))?);

    let count = visible_cells(year, month, kind, &layout)?;
    fit_shadow_to_weeks(&mut layout, kind, count);
    let cells = day_cells(year, month, &layout, count, style)?;
    debug!(
        "{}-{:02}: layout {}, {} cells, month caption at {:?}",
        year, month, kind, count, layout.month_name
    );

    Ok(MonthPage {
        year,
        month,
        kind,
        canvas,
        layout,
        cells,
    })
}

/// Draw `month` of `year` onto `surface` and close the document
pub fn render<S>(surface: &mut S, year: i32, month: u32, style: &Style) -> CalendarResult<()>
where
    S: DrawingSurface + ?Sized,
{
    let page = plan(year, month, style)?;
    draw(surface, &page, style)?;
    info!(
        "Rendered {} {} ({} layout, {} days)",
        style.month_name(month),
        year,
        page.kind,
        page.cells.len()
    );
    Ok(())
}

/// Emit a planned page
pub fn draw<S>(surface: &mut S, page: &MonthPage, style: &Style) -> CalendarResult<()>
where
    S: DrawingSurface + ?Sized,
{
    let canvas = &page.canvas;
    let layout = &page.layout;
    let colors = &style.color_style;

    surface.start(canvas.page, PAGE_UNIT, canvas.rect)?;

    if style.background.starts_with('#') {
        surface.rect(canvas.rect.pos, canvas.rect.size, &format!("fill:{}", style.background))?;
    } else if !style.background.is_empty() {
        surface.image(canvas.rect.pos, canvas.rect.size, &style.background, ImageFit::Stretch)?;
    }

    surface.rect(layout.shadow.pos, layout.shadow.size, &colors.shadow.to_string())?;

    // Header labels step along the week axis of a band
    let step = if layout.vertical {
        Pos::new(0, canvas.grid.y)
    } else {
        Pos::new(canvas.grid.x, 0)
    };
    let weekend = colors.weekend.to_string();
    surface.group_start(&colors.weekday.to_string(), layout.weekday.transform())?;
    for i in 0..layout.cells_per_band() {
        let label_style = if i % 7 > 4 { weekend.as_str() } else { "" };
        surface.text(
            step.x * i,
            step.y * i,
            style.weekday_name(i as usize),
            label_style,
        )?;
    }
    surface.group_end()?;

    surface.group_start(&colors.number.to_string(), layout.number.transform())?;
    for cell in &page.cells {
        surface.text(
            canvas.grid.x * cell.column,
            canvas.grid.y * cell.row,
            &cell.label,
            &cell.style.to_string(),
        )?;
    }
    surface.group_end()?;

    surface.text(
        layout.month_name.x,
        layout.month_name.y,
        style.month_name(page.month),
        &colors.month.to_string(),
    )?;

    for overlay in &style.text {
        let at = to_units(overlay.pos)?;
        surface.text(at.x, at.y, &overlay.title, &overlay.style.to_string())?;
    }

    surface.end()
}
