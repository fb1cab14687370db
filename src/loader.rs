//! Style document loading
//!
//! Documents are YAML by default; a `.json` extension selects JSON. Unknown
//! keys are rejected, and the parsed document is merged over the built-in
//! defaults before it is returned.

use std::fs;
use std::path::Path;

use log::{debug, info};

use crate::error::{CalendarError, CalendarResult};
use crate::layout::LayoutKind;
use crate::style::Style;
use crate::types::Pos;

/// Serialization of a style document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleFormat {
    Yaml,
    Json,
}

impl StyleFormat {
    /// Pick the format from the file extension, YAML unless it is `.json`
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        match path.as_ref().extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => StyleFormat::Json,
            _ => StyleFormat::Yaml,
        }
    }
}

impl Style {
    /// Parse a user document without applying defaults
    pub fn parse(text: &str, format: StyleFormat) -> CalendarResult<Style> {
        if text.trim().is_empty() {
            return Ok(Style::default());
        }
        let style = match format {
            StyleFormat::Yaml => serde_yaml::from_str(text)?,
            StyleFormat::Json => serde_json::from_str(text)?,
        };
        Ok(style)
    }

    pub fn from_yaml_str(text: &str) -> CalendarResult<Style> {
        Style::parse(text, StyleFormat::Yaml)
    }

    pub fn from_json_str(text: &str) -> CalendarResult<Style> {
        Style::parse(text, StyleFormat::Json)
    }

    /// YAML dump of the style, as shown by `--debug`
    pub fn to_yaml(&self) -> CalendarResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

/// Read the style at `path` and merge it over the defaults
pub fn load_style<P: AsRef<Path>>(path: P) -> CalendarResult<Style> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let format = StyleFormat::from_path(path);
    debug!("Parsing style {} as {:?}", path.display(), format);

    let user = Style::parse(&text, format).map_err(|e| match e {
        CalendarError::Yaml(_) | CalendarError::Json(_) => {
            CalendarError::StyleParse(format!("{}: {}", path.display(), e))
        }
        other => other,
    })?;
    let style = Style::resolve(&user);
    info!("Loaded style from {}", path.display());
    Ok(style)
}

/// Command-line style overrides, applied after defaults are merged
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleOverrides {
    pub layout: Option<LayoutKind>,
    /// `#rrggbb` or image path; empty keeps the style value
    pub background: String,
    /// Square anchor in millimetres; components `<= 0` keep the style value
    pub pos: Pos,
}

impl StyleOverrides {
    pub fn apply(&self, style: &mut Style) {
        if let Some(layout) = self.layout {
            debug!("Layout overridden to {}", layout);
            style.layout = Some(layout);
        }
        if !self.background.is_empty() {
            style.background = self.background.clone();
        }
        style.pos = style.pos.override_with(self.pos);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Size;
    use chrono::NaiveDate;

    const SAMPLE: &str = r##"
size:
  width: 210
  height: 297
extend: 5
layout: left
background: "#ddeeff"
holidays: [1, 7]
notweekend:
  2024:
    11: [2]
colorstyle:
  holiday:
    fill: "#ff0000"
  number:
    font-size: 44
weekdaynames: [Пн, Вт, Ср, Чт, Пт, Сб, Вс]
month_style:
  12:
    layout: square_v
    monthpos: {x: 100}
text:
  - pos: {x: 20, y: 30}
    title: "2024"
    style:
      font-size: 60
"##;

    #[test]
    fn test_yaml_document_merges_over_defaults() {
        let style = Style::resolve(&Style::from_yaml_str(SAMPLE).unwrap());
        assert_eq!(style.size, Size::new(210, 297));
        assert_eq!(style.extend, 5);
        assert_eq!(style.layout, Some(LayoutKind::Left));
        assert_eq!(style.layout_for(12), LayoutKind::SquareVertical);
        assert_eq!(style.month_pos_for(12), Pos::new(100, 0));
        assert_eq!(style.color_style.holiday.fill.as_deref(), Some("#ff0000"));
        assert_eq!(style.color_style.number.font_size.as_deref(), Some("44"));
        assert_eq!(style.color_style.number.fill.as_deref(), Some("#333333"));
        assert_eq!(style.weekday_name(6), "Вс");
        assert_eq!(style.month_name(1), "January");
        assert_eq!(style.text[0].style.font_size.as_deref(), Some("60"));

        let working_saturday = NaiveDate::from_ymd_opt(2024, 11, 2).unwrap();
        assert!(!style.is_weekend(working_saturday));
        assert!(style.is_holiday(NaiveDate::from_ymd_opt(2030, 3, 7).unwrap()));
    }

    #[test]
    fn test_lowercase_keys_from_older_documents() {
        let doc = r##"
layout: top
months: [Январь, Февраль, Март, Апрель, Май, Июнь, Июль, Август, Сентябрь, Октябрь, Ноябрь, Декабрь]
monthpos: {y: 40}
monthstyle:
  4:
    layout: left
    monthpos: {x: 100}
shortdays: [8]
"##;
        let style = Style::resolve(&Style::from_yaml_str(doc).unwrap());
        assert_eq!(style.month_name(4), "Апрель");
        assert_eq!(style.layout_for(4), LayoutKind::Left);
        assert_eq!(style.layout_for(5), LayoutKind::Top);
        assert_eq!(style.month_pos_for(4), Pos::new(100, 40));
        assert!(style.is_short_day(NaiveDate::from_ymd_opt(2024, 3, 8).unwrap()));
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let err = Style::from_yaml_str("colour: red\n").unwrap_err();
        assert!(matches!(err, CalendarError::Yaml(_)));
        assert!(Style::from_json_str(r#"{"layout": "diagonal"}"#).is_err());
    }

    #[test]
    fn test_json_document() {
        let user = Style::from_json_str(
            r#"{"layout": "bottom", "short_days": {"2024": {"12": [31]}}, "grid": {"x": 12}}"#,
        )
        .unwrap();
        assert_eq!(user.layout, Some(LayoutKind::Bottom));
        assert_eq!(user.grid, Pos::new(12, 0));
        assert!(user.is_short_day(NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()));
    }

    #[test]
    fn test_empty_document_is_default() {
        assert_eq!(Style::from_yaml_str("  \n").unwrap(), Style::default());
    }

    #[test]
    fn test_yaml_dump_reloads() {
        let style = Style::resolve(&Style::from_yaml_str(SAMPLE).unwrap());
        let dump = style.to_yaml().unwrap();
        let reloaded = Style::from_yaml_str(&dump).unwrap();
        assert_eq!(reloaded, style);
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(StyleFormat::from_path("paracal.yaml"), StyleFormat::Yaml);
        assert_eq!(StyleFormat::from_path("style.JSON"), StyleFormat::Json);
        assert_eq!(StyleFormat::from_path("noext"), StyleFormat::Yaml);
    }

    #[test]
    fn test_overrides_replace_only_what_is_set() {
        let mut style = Style::resolve(&Style::from_yaml_str(SAMPLE).unwrap());
        StyleOverrides::default().apply(&mut style);
        assert_eq!(style.layout, Some(LayoutKind::Left));
        assert_eq!(style.background, "#ddeeff");

        let overrides = StyleOverrides {
            layout: Some(LayoutKind::Top),
            background: "back.jpg".to_string(),
            pos: Pos::new(0, 40),
        };
        overrides.apply(&mut style);
        assert_eq!(style.layout, Some(LayoutKind::Top));
        assert_eq!(style.background, "back.jpg");
        assert_eq!(style.pos, Pos::new(0, 40));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_style("/nonexistent/paracal.yaml").unwrap_err();
        assert!(matches!(err, CalendarError::Io(_)));
    }
}
