//! Layout engine: anchors and background panel for each poster variant
//!
//! Spiral-bound variants pack two or three weeks into one band along the
//! bound edge; square variants draw a single 7x7 block of grid cells.

use std::fmt;
use std::str::FromStr;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::calendar::GRID_CELLS;
use crate::canvas::{Canvas, LABEL_OFFSET, SPIRAL};
use crate::error::CalendarError;
use crate::types::{Pos, Rect, Size};

/// Poster layout variant
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LayoutKind {
    #[serde(rename = "left")]
    Left,
    #[serde(rename = "right")]
    Right,
    #[serde(rename = "top")]
    Top,
    #[serde(rename = "bottom")]
    Bottom,
    #[default]
    #[serde(rename = "square")]
    Square,
    #[serde(rename = "square_v")]
    SquareVertical,
}

impl LayoutKind {
    pub const ALL: [LayoutKind; 6] = [
        LayoutKind::Left,
        LayoutKind::Right,
        LayoutKind::Top,
        LayoutKind::Bottom,
        LayoutKind::Square,
        LayoutKind::SquareVertical,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutKind::Left => "left",
            LayoutKind::Right => "right",
            LayoutKind::Top => "top",
            LayoutKind::Bottom => "bottom",
            LayoutKind::Square => "square",
            LayoutKind::SquareVertical => "square_v",
        }
    }

    pub fn is_square(&self) -> bool {
        matches!(self, LayoutKind::Square | LayoutKind::SquareVertical)
    }
}

impl fmt::Display for LayoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LayoutKind {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LayoutKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| {
                CalendarError::InvalidLayout(format!(
                    "'{}' (expected one of left, right, top, bottom, square, square_v)",
                    s
                ))
            })
    }
}

/// Positions of every calendar element on the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// Anchor of the first weekday label
    pub weekday: Pos,
    /// Anchor of the first day number
    pub number: Pos,
    /// Anchor of the month caption
    pub month_name: Pos,
    /// Background panel behind the labels
    pub shadow: Rect,
    /// Weeks packed side by side in one band
    pub week_group: i32,
    /// Spiral on the side: weekdays run down, bands run across
    pub vertical: bool,
}

impl Layout {
    pub fn cells_per_band(&self) -> i32 {
        self.week_group * 7
    }

    /// Number of bands needed for the full 42-cell grid
    pub fn band_count(&self) -> i32 {
        GRID_CELLS as i32 / self.cells_per_band()
    }
}

impl Canvas {
    /// Compute the layout for `kind`.
    ///
    /// `anchor` is only used by the square variants; components `<= 0` mean
    /// "center on that axis". It must already be in scaled units.
    pub fn layout(&self, kind: LayoutKind, album: bool, anchor: Pos) -> Layout {
        let layout = match kind {
            LayoutKind::Left if album => self.layout_left_album(),
            LayoutKind::Left => self.layout_left_portrait(),
            LayoutKind::Right if album => self.layout_right_album(),
            LayoutKind::Right => self.layout_right_portrait(),
            LayoutKind::Bottom if album => self.layout_bottom_album(),
            LayoutKind::Bottom => self.layout_bottom_portrait(),
            LayoutKind::Top if album => self.layout_top_album(),
            LayoutKind::Top => self.layout_top_portrait(),
            LayoutKind::SquareVertical => self.layout_square(anchor, true),
            LayoutKind::Square => self.layout_square(anchor, false),
        };
        debug!(
            "Layout {} (album={}): weekday={:?} number={:?} shadow={:?} week_group={}",
            kind, album, layout.weekday, layout.number, layout.shadow, layout.week_group
        );
        layout
    }

    /// Shared placement for a band occupying `rect`
    fn band_layout(&self, rect: Rect, shift: Pos, week_group: i32, vertical: bool) -> Layout {
        let mut weekday = Pos::new(
            rect.pos.x + self.grid.x / 2 + shift.x,
            rect.pos.y + self.grid.y / 2 + shift.y,
        );
        let mut number = Pos::new(weekday.x, weekday.y + self.grid.y);

        if vertical {
            weekday.y += self.grid.y / 8;
            number = Pos::new(weekday.x + self.grid.x, weekday.y + LABEL_OFFSET);
        }

        Layout {
            weekday,
            number,
            month_name: Pos::new(self.width() / 2, self.height() / 7),
            shadow: rect,
            week_group,
            vertical,
        }
    }

    fn side_band(&self, width: i32, week_group: i32) -> Layout {
        let ex = self.extend;
        let mut layout = self.band_layout(
            Rect::new(
                self.rect.left() + ex / 2,
                self.rect.top() + ex / 2,
                width,
                self.height() - ex,
            ),
            Pos::new(0, SPIRAL),
            week_group,
            true,
        );
        layout.shadow.pos = self.rect.pos;
        layout.shadow.size.width += ex / 2;
        layout.shadow.size.height += ex;
        layout
    }

    fn layout_left_album(&self) -> Layout {
        self.side_band(self.grid.x * 4 + self.grid.x / 8, 2)
    }

    fn layout_left_portrait(&self) -> Layout {
        self.side_band(self.grid.x * 3 + self.grid.x / 8, 3)
    }

    /// Move a left band to the right edge.
    ///
    /// The weekday column ends up after the number columns, so the header
    /// skips one column per band while the numbers lose the column the
    /// header used to take.
    fn mirror_to_right(&self, mut layout: Layout) -> Layout {
        let ex = self.extend;
        layout.shadow.pos.x = self.width() - layout.shadow.size.width;
        layout.weekday.x += layout.shadow.pos.x + self.grid.x * layout.band_count() - ex / 2;
        layout.number.x += layout.shadow.pos.x - self.grid.x - ex / 2;
        layout
    }

    fn layout_right_album(&self) -> Layout {
        self.mirror_to_right(self.layout_left_album())
    }

    fn layout_right_portrait(&self) -> Layout {
        self.mirror_to_right(self.layout_left_portrait())
    }

    fn layout_bottom_album(&self) -> Layout {
        let ex = self.extend;
        let height = self.grid.y * 3 + LABEL_OFFSET;
        let mut layout = self.band_layout(
            Rect::new(
                self.rect.left() + ex / 2,
                self.rect.top() + self.height() - ex / 2 - height,
                self.width() - ex,
                height,
            ),
            Pos::new(LABEL_OFFSET, LABEL_OFFSET * 2),
            3,
            false,
        );
        layout.shadow.pos.x = self.rect.left();
        layout.shadow.size.width += ex;
        layout.shadow.size.height += ex / 2;
        layout
    }

    fn layout_bottom_portrait(&self) -> Layout {
        let ex = self.extend;
        let height = self.grid.y * 3 + self.grid.y / 8;
        let mut layout = self.band_layout(
            Rect::new(
                self.rect.left() + ex / 2,
                self.rect.top() + self.height() - ex / 2 - height,
                self.width() - ex,
                height,
            ),
            Pos::default(),
            2,
            false,
        );
        layout.shadow.pos.x = self.rect.left();
        layout.shadow.size.width += ex;
        layout.shadow.size.height += ex / 2;
        layout
    }

    fn layout_top_album(&self) -> Layout {
        let ex = self.extend;
        let height = self.grid.y * 3;
        let mut layout = self.band_layout(
            Rect::new(
                self.rect.left() + ex / 2,
                self.rect.top() + ex / 2,
                self.width() - ex,
                height + SPIRAL,
            ),
            Pos::new(LABEL_OFFSET, SPIRAL),
            3,
            false,
        );
        layout.month_name.y = self.height() - self.grid.y;
        layout.shadow.pos = self.rect.pos;
        layout.shadow.size.width += ex;
        layout.shadow.size.height += ex / 2;
        layout
    }

    fn layout_top_portrait(&self) -> Layout {
        let ex = self.extend;
        let mut layout = self.band_layout(
            Rect::new(
                self.rect.left() + ex / 2,
                self.rect.top() + ex / 2,
                self.width() - ex,
                self.grid.y * 3 + SPIRAL,
            ),
            Pos::new(0, SPIRAL),
            2,
            false,
        );
        layout.month_name.y = self.height() - self.grid.y;
        layout.shadow.pos = self.rect.pos;
        layout.shadow.size.width += ex;
        layout.shadow.size.height += SPIRAL + ex / 2;
        layout
    }

    fn layout_square(&self, anchor: Pos, vertical: bool) -> Layout {
        let size = Size::new(self.grid.x * 7, self.grid.y * 7);
        let pos = Pos::new(
            if anchor.x <= 0 {
                self.width() / 2 - size.width / 2
            } else {
                anchor.x
            },
            if anchor.y <= 0 {
                self.height() / 2 - size.height / 2
            } else {
                anchor.y
            },
        );
        self.band_layout(Rect { pos, size }, Pos::default(), 1, vertical)
    }
}
