use paracal::calendar::{GRID_CELLS, SHORT_GRID_CELLS};
use paracal::style::TextOverlay;
use paracal::{
    render, CalendarResult, DrawingSurface, ImageFit, LayoutKind, Pos, Rect, Size, Style,
    SvgStyle, SvgWriter, Transform,
};

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Start(Size, String, Rect),
    End,
    Rect(Pos, Size, String),
    Image(Pos, Size, String, ImageFit),
    GroupStart(String, Transform),
    GroupEnd,
    Text(i32, i32, String, String),
}

#[derive(Default)]
struct Recorder {
    calls: Vec<Call>,
}

impl DrawingSurface for Recorder {
    fn start(&mut self, page: Size, unit: &str, view_box: Rect) -> CalendarResult<()> {
        self.calls.push(Call::Start(page, unit.to_string(), view_box));
        Ok(())
    }

    fn end(&mut self) -> CalendarResult<()> {
        self.calls.push(Call::End);
        Ok(())
    }

    fn rect(&mut self, pos: Pos, size: Size, style: &str) -> CalendarResult<()> {
        self.calls.push(Call::Rect(pos, size, style.to_string()));
        Ok(())
    }

    fn image(&mut self, pos: Pos, size: Size, href: &str, fit: ImageFit) -> CalendarResult<()> {
        self.calls.push(Call::Image(pos, size, href.to_string(), fit));
        Ok(())
    }

    fn group_start(&mut self, style: &str, transform: Transform) -> CalendarResult<()> {
        self.calls.push(Call::GroupStart(style.to_string(), transform));
        Ok(())
    }

    fn group_end(&mut self) -> CalendarResult<()> {
        self.calls.push(Call::GroupEnd);
        Ok(())
    }

    fn text(&mut self, x: i32, y: i32, text: &str, style: &str) -> CalendarResult<()> {
        self.calls.push(Call::Text(x, y, text.to_string(), style.to_string()));
        Ok(())
    }
}

fn record(year: i32, month: u32, style: &Style) -> Vec<Call> {
    let mut recorder = Recorder::default();
    render(&mut recorder, year, month, style).unwrap();
    recorder.calls
}

/// Text calls inside the `n`-th group
fn group_texts(calls: &[Call], n: usize) -> Vec<&Call> {
    let start = calls
        .iter()
        .enumerate()
        .filter(|(_, c)| matches!(c, Call::GroupStart(..)))
        .nth(n)
        .map(|(i, _)| i)
        .unwrap();
    calls[start + 1..]
        .iter()
        .take_while(|c| !matches!(c, Call::GroupEnd))
        .collect()
}

#[test]
fn draw_order_is_fixed() {
    let mut style = Style::builtin();
    style.background = "#102030".to_string();
    style.text = vec![TextOverlay {
        pos: Pos::new(20, 30),
        title: "Family".to_string(),
        style: SvgStyle::default().with_font_size("60"),
    }];
    let calls = record(2023, 10, &style);

    assert!(matches!(&calls[0], Call::Start(page, unit, view_box)
        if *page == Size::new(297, 210) && unit == "mm" && *view_box == Rect::new(0, 0, 2970, 2100)));
    assert_eq!(
        calls[1],
        Call::Rect(Pos::new(0, 0), Size::new(2970, 2100), "fill:#102030".to_string())
    );
    assert!(matches!(&calls[2], Call::Rect(_, _, s) if s.contains("opacity:0.3")));
    assert!(matches!(&calls[3], Call::GroupStart(s, _) if s.contains("font-size:30")));

    let n = calls.len();
    assert_eq!(calls[n - 1], Call::End);
    assert_eq!(
        calls[n - 2],
        Call::Text(200, 300, "Family".to_string(), "font-size:60;".to_string())
    );
    assert!(matches!(&calls[n - 3], Call::Text(_, _, name, _) if name == "October"));
    assert_eq!(calls.iter().filter(|c| **c == Call::GroupEnd).count(), 2);
}

#[test]
fn image_background_is_stretched() {
    let mut style = Style::builtin();
    style.background = "winter.jpg".to_string();
    let calls = record(2024, 1, &style);
    assert_eq!(
        calls[1],
        Call::Image(
            Pos::new(0, 0),
            Size::new(2970, 2100),
            "winter.jpg".to_string(),
            ImageFit::Stretch
        )
    );
}

#[test]
fn no_background_draws_shadow_first() {
    let calls = record(2024, 1, &Style::builtin());
    assert!(matches!(&calls[1], Call::Rect(_, _, s) if s.contains("fill:#ffffff")));
    assert!(matches!(&calls[2], Call::GroupStart(..)));
}

#[test]
fn square_month_ending_on_band_boundary_draws_five_weeks() {
    let calls = record(2024, 4, &Style::builtin());
    assert_eq!(group_texts(&calls, 1).len(), SHORT_GRID_CELLS);

    let calls = record(2023, 10, &Style::builtin());
    assert_eq!(group_texts(&calls, 1).len(), GRID_CELLS);
}

#[test]
fn weekday_header_marks_weekend_columns() {
    let calls = record(2024, 4, &Style::builtin());
    let header = group_texts(&calls, 0);
    assert_eq!(header.len(), 7);
    let grid_x = 2970 / 18;
    for (i, call) in header.iter().enumerate() {
        let Call::Text(x, y, label, style) = call else {
            panic!("{call:?}")
        };
        assert_eq!((*x, *y), (grid_x * i as i32, 0));
        assert_eq!(label, ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"][i]);
        assert_eq!(style.contains("#b03333"), i > 4, "{label}");
    }
}

#[test]
fn spiral_layout_packs_weeks_into_bands() {
    let mut style = Style::builtin();
    style.layout = Some(LayoutKind::Left);
    let calls = record(2024, 4, &style);

    // Album left: two weeks per band, header runs down the page.
    let header = group_texts(&calls, 0);
    assert_eq!(header.len(), 14);
    let grid_y = 2100 / 15;
    assert_eq!(header[13], &Call::Text(0, grid_y * 13, "Su".to_string(), "fill:#b03333;".to_string()));

    let numbers = group_texts(&calls, 1);
    assert_eq!(numbers.len(), GRID_CELLS);
    let grid_x = 2970 / 20;
    // Cell 15 is in the second band, second row.
    assert!(matches!(numbers[15], Call::Text(x, y, _, _) if *x == grid_x && *y == grid_y));
}

#[test]
fn ghost_days_are_dimmed() {
    let calls = record(2023, 10, &Style::builtin());
    let numbers = group_texts(&calls, 1);
    // 2023-09-25 (Monday) leads the grid.
    assert!(matches!(numbers[0], Call::Text(_, _, label, s) if label == "25" && s.contains("opacity:0.3")));
    // 2023-10-01 is a Sunday: weekend fill, no dimming.
    assert!(matches!(numbers[6], Call::Text(_, _, label, s)
        if label == "1" && s.contains("#b03333") && !s.contains("opacity")));
    // 2023-11-05 is a Sunday of the next month: both.
    assert!(matches!(numbers[41], Call::Text(_, _, label, s)
        if label == "5" && s.contains("#b03333") && s.contains("opacity:0.3")));
}

#[test]
fn svg_document_end_to_end() {
    let mut style = Style::builtin();
    style.extend = 5;
    style.background = "#eeeeee".to_string();
    let mut writer = SvgWriter::new(Vec::new());
    render(&mut writer, 2024, 2, &style).unwrap();
    let svg = String::from_utf8(writer.into_inner()).unwrap();

    assert!(svg.contains(r#"width="302mm""#), "{svg}");
    assert!(svg.contains(r#"height="215mm""#), "{svg}");
    assert!(svg.contains(r#"viewBox="0 0 3020 2150""#), "{svg}");
    assert!(svg.contains("February"));
    // Seven weekday labels, five weeks of days and the caption.
    assert_eq!(svg.matches("<text").count(), 7 + SHORT_GRID_CELLS + 1);
    assert_eq!(svg.matches("<g").count(), 2);
}
