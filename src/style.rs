//! Calendar style: page setup, colours and day classification
//!
//! A [`Style`] deserialized from a user document only carries what the user
//! wrote. [`Style::resolve`] merges it over [`Style::builtin`] field by field:
//! a user value replaces the built-in one only when it is non-empty (or
//! positive, for numbers).

use std::collections::BTreeMap;
use std::fmt;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::canvas::{A4_LONG, A4_SHORT};
use crate::day_set::DaySet;
use crate::layout::LayoutKind;
use crate::types::{Pos, Size};

/// Presentation attributes of one SVG element or group
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", from = "scalar::SvgStyleRepr")]
pub struct SvgStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_anchor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<String>,
    /// Any other CSS property, passed through verbatim
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

impl SvgStyle {
    pub fn with_fill(mut self, fill: &str) -> Self {
        self.fill = Some(fill.to_string());
        self
    }

    pub fn with_opacity(mut self, opacity: &str) -> Self {
        self.opacity = Some(opacity.to_string());
        self
    }

    pub fn with_font_size(mut self, size: &str) -> Self {
        self.font_size = Some(size.to_string());
        self
    }

    pub fn with_text_anchor(mut self, anchor: &str) -> Self {
        self.text_anchor = Some(anchor.to_string());
        self
    }

    fn properties(&self) -> [(&'static str, &Option<String>); 9] {
        [
            ("fill", &self.fill),
            ("opacity", &self.opacity),
            ("font-family", &self.font_family),
            ("font-size", &self.font_size),
            ("font-weight", &self.font_weight),
            ("font-style", &self.font_style),
            ("text-anchor", &self.text_anchor),
            ("stroke", &self.stroke),
            ("stroke-width", &self.stroke_width),
        ]
    }

    /// Layer the ghost-day attributes on top without touching the fill
    pub fn with_ghost(&self, ghost: &SvgStyle) -> SvgStyle {
        let mut ghost = ghost.clone();
        if non_empty(&self.fill).is_some() {
            ghost.fill = None;
        }
        merge_defaults(self, &ghost)
    }
}

/// Inline CSS declaration list, e.g. `fill:#333333;font-size:30;`
impl fmt::Display for SvgStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, value) in self.properties() {
            if let Some(value) = non_empty(value) {
                write!(f, "{}:{};", name, value)?;
            }
        }
        for (name, value) in &self.extra {
            if !value.is_empty() {
                write!(f, "{}:{};", name, value)?;
            }
        }
        Ok(())
    }
}

fn non_empty(value: &Option<String>) -> Option<&String> {
    value.as_ref().filter(|v| !v.is_empty())
}

fn pick(base: &Option<String>, over: &Option<String>) -> Option<String> {
    non_empty(over).or(base.as_ref()).cloned()
}

/// Merge `over` onto `base`; every non-empty attribute of `over` wins.
pub fn merge_defaults(base: &SvgStyle, over: &SvgStyle) -> SvgStyle {
    let mut extra = base.extra.clone();
    for (name, value) in &over.extra {
        if !value.is_empty() {
            extra.insert(name.clone(), value.clone());
        }
    }
    SvgStyle {
        fill: pick(&base.fill, &over.fill),
        opacity: pick(&base.opacity, &over.opacity),
        font_family: pick(&base.font_family, &over.font_family),
        font_size: pick(&base.font_size, &over.font_size),
        font_weight: pick(&base.font_weight, &over.font_weight),
        font_style: pick(&base.font_style, &over.font_style),
        text_anchor: pick(&base.text_anchor, &over.text_anchor),
        stroke: pick(&base.stroke, &over.stroke),
        stroke_width: pick(&base.stroke_width, &over.stroke_width),
        extra,
    }
}

/// Styles of every visual category
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorStyle {
    /// Weekday header labels
    pub weekday: SvgStyle,
    /// Group style of all day numbers
    pub number: SvgStyle,
    pub weekend: SvgStyle,
    pub holiday: SvgStyle,
    pub shortday: SvgStyle,
    /// Days of the adjacent months
    pub ghost: SvgStyle,
    /// Panel behind the labels
    pub shadow: SvgStyle,
    /// Month caption
    pub month: SvgStyle,
}

impl ColorStyle {
    pub fn merged(&self, over: &ColorStyle) -> ColorStyle {
        ColorStyle {
            weekday: merge_defaults(&self.weekday, &over.weekday),
            number: merge_defaults(&self.number, &over.number),
            weekend: merge_defaults(&self.weekend, &over.weekend),
            holiday: merge_defaults(&self.holiday, &over.holiday),
            shortday: merge_defaults(&self.shortday, &over.shortday),
            ghost: merge_defaults(&self.ghost, &over.ghost),
            shadow: merge_defaults(&self.shadow, &over.shadow),
            month: merge_defaults(&self.month, &over.month),
        }
    }
}

/// Free-form caption drawn on top of the calendar
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TextOverlay {
    /// Position in millimetres
    pub pos: Pos,
    pub title: String,
    pub style: SvgStyle,
}

/// Settings that apply to a single month only
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MonthOverride {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<LayoutKind>,
    #[serde(alias = "monthpos")]
    pub month_pos: Pos,
}

/// Complete calendar style
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Style {
    /// Page size in millimetres
    pub size: Size,
    /// Millimetres added around the page after layout
    pub extend: i32,
    /// Grid division `{columns, rows}`; zero picks the layout default
    pub grid: Pos,
    /// Square anchor in millimetres; zero centers
    pub pos: Pos,
    pub layout: Option<LayoutKind>,
    pub holidays: DaySet,
    #[serde(alias = "notweekend")]
    pub not_weekend: DaySet,
    #[serde(alias = "shortdays")]
    pub short_days: DaySet,
    /// `#rrggbb` fill or path of an image
    pub background: String,
    #[serde(alias = "colorstyle")]
    pub color_style: ColorStyle,
    /// Monday first
    #[serde(alias = "weekdaynames")]
    pub weekday_names: Vec<String>,
    #[serde(alias = "monthnames", alias = "months")]
    pub month_names: Vec<String>,
    /// Month caption position in millimetres; zero keeps the layout default
    #[serde(alias = "monthpos")]
    pub month_pos: Pos,
    /// Settings for single months, keyed by month number
    #[serde(alias = "monthstyle")]
    pub month_style: BTreeMap<u32, MonthOverride>,
    pub text: Vec<TextOverlay>,
}

/// Visual category of a day, in precedence order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayCategory {
    Holiday,
    Weekend,
    ShortDay,
    Normal,
}

/// Category plus adjacent-month dimming
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayClass {
    pub category: DayCategory,
    pub ghost: bool,
}

const WEEKDAY_NAMES: [&str; 7] = ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"];
const MONTH_NAMES: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];

impl Style {
    /// Built-in defaults every user style is merged onto
    pub fn builtin() -> Self {
        let text = SvgStyle::default().with_fill("#333333").with_text_anchor("middle");
        Self {
            size: Size::new(A4_LONG, A4_SHORT),
            layout: Some(LayoutKind::default()),
            color_style: ColorStyle {
                weekday: text.clone().with_font_size("30"),
                number: text.clone().with_font_size("50"),
                weekend: SvgStyle::default().with_fill("#b03333"),
                holiday: SvgStyle::default().with_fill("#b03333"),
                shortday: SvgStyle::default().with_fill("#584848"),
                ghost: SvgStyle::default().with_opacity("0.3"),
                shadow: SvgStyle::default().with_fill("#ffffff").with_opacity("0.3"),
                month: text.with_font_size("80"),
            },
            weekday_names: WEEKDAY_NAMES.iter().map(|s| s.to_string()).collect(),
            month_names: MONTH_NAMES.iter().map(|s| s.to_string()).collect(),
            ..Self::default()
        }
    }

    /// Merge a user style over the built-in defaults
    pub fn resolve(user: &Style) -> Self {
        Self::builtin().merged(user)
    }

    /// Merge `over` onto `self`, keeping every field `over` leaves empty
    pub fn merged(&self, over: &Style) -> Style {
        let mut month_style = self.month_style.clone();
        month_style.extend(over.month_style.iter().map(|(k, v)| (*k, v.clone())));

        Style {
            size: Size::new(
                positive_or(over.size.width, self.size.width),
                positive_or(over.size.height, self.size.height),
            ),
            extend: positive_or(over.extend, self.extend),
            grid: self.grid.override_with(over.grid),
            pos: self.pos.override_with(over.pos),
            layout: over.layout.or(self.layout),
            holidays: set_or(&over.holidays, &self.holidays),
            not_weekend: set_or(&over.not_weekend, &self.not_weekend),
            short_days: set_or(&over.short_days, &self.short_days),
            background: if over.background.is_empty() {
                self.background.clone()
            } else {
                over.background.clone()
            },
            color_style: self.color_style.merged(&over.color_style),
            weekday_names: merge_names(&self.weekday_names, &over.weekday_names),
            month_names: merge_names(&self.month_names, &over.month_names),
            month_pos: self.month_pos.override_with(over.month_pos),
            month_style,
            text: if over.text.is_empty() {
                self.text.clone()
            } else {
                over.text.clone()
            },
        }
    }

    /// Layout for `month`, honouring per-month overrides
    pub fn layout_for(&self, month: u32) -> LayoutKind {
        self.month_style
            .get(&month)
            .and_then(|m| m.layout)
            .or(self.layout)
            .unwrap_or_default()
    }

    /// Caption position (mm) for `month`; components `<= 0` are unset
    pub fn month_pos_for(&self, month: u32) -> Pos {
        match self.month_style.get(&month) {
            Some(m) => self.month_pos.override_with(m.month_pos),
            None => self.month_pos,
        }
    }

    pub fn weekday_name(&self, index: usize) -> &str {
        self.weekday_names.get(index % 7).map_or("", String::as_str)
    }

    pub fn month_name(&self, month: u32) -> &str {
        let index = (month as usize).wrapping_sub(1);
        self.month_names.get(index).map_or("", String::as_str)
    }

    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.holidays.contains(date)
    }

    /// Saturday or Sunday, unless listed as a working day
    pub fn is_weekend(&self, date: NaiveDate) -> bool {
        matches!(date.weekday(), Weekday::Sat | Weekday::Sun) && !self.not_weekend.contains(date)
    }

    pub fn is_short_day(&self, date: NaiveDate) -> bool {
        self.short_days.contains(date)
    }

    /// Classify `date` on the calendar of `month`
    pub fn classify(&self, date: NaiveDate, month: u32) -> DayClass {
        let category = if self.is_holiday(date) {
            DayCategory::Holiday
        } else if self.is_weekend(date) {
            DayCategory::Weekend
        } else if self.is_short_day(date) {
            DayCategory::ShortDay
        } else {
            DayCategory::Normal
        };
        DayClass {
            category,
            ghost: date.month() != month,
        }
    }

    pub fn category_style(&self, category: DayCategory) -> SvgStyle {
        match category {
            DayCategory::Holiday => self.color_style.holiday.clone(),
            DayCategory::Weekend => self.color_style.weekend.clone(),
            DayCategory::ShortDay => self.color_style.shortday.clone(),
            DayCategory::Normal => SvgStyle::default(),
        }
    }

    /// Label and style of `date` on the calendar of `month`
    pub fn day(&self, date: NaiveDate, month: u32) -> (String, SvgStyle) {
        let class = self.classify(date, month);
        let mut style = self.category_style(class.category);
        if class.ghost {
            style = style.with_ghost(&self.color_style.ghost);
        }
        (date.day().to_string(), style)
    }
}

fn positive_or(value: i32, fallback: i32) -> i32 {
    if value > 0 {
        value
    } else {
        fallback
    }
}

fn set_or(over: &DaySet, base: &DaySet) -> DaySet {
    if over.is_empty() {
        base.clone()
    } else {
        over.clone()
    }
}

fn merge_names(base: &[String], over: &[String]) -> Vec<String> {
    let len = base.len().max(over.len());
    (0..len)
        .map(|i| match over.get(i) {
            Some(name) if !name.is_empty() => name.clone(),
            _ => base.get(i).cloned().unwrap_or_default(),
        })
        .collect()
}

/// Attribute values may be written as YAML numbers or booleans
mod scalar {
    use super::*;

    #[derive(Deserialize)]
    #[serde(untagged)]
    pub(super) enum Scalar {
        Text(String),
        Int(i64),
        Float(f64),
        Bool(bool),
    }

    impl From<Scalar> for String {
        fn from(value: Scalar) -> Self {
            match value {
                Scalar::Text(s) => s,
                Scalar::Int(i) => i.to_string(),
                Scalar::Float(f) => f.to_string(),
                Scalar::Bool(b) => b.to_string(),
            }
        }
    }

    #[derive(Default, Deserialize)]
    #[serde(default, rename_all = "kebab-case")]
    pub(super) struct SvgStyleRepr {
        fill: Option<Scalar>,
        opacity: Option<Scalar>,
        font_family: Option<Scalar>,
        font_size: Option<Scalar>,
        font_weight: Option<Scalar>,
        font_style: Option<Scalar>,
        text_anchor: Option<Scalar>,
        stroke: Option<Scalar>,
        stroke_width: Option<Scalar>,
        #[serde(flatten)]
        extra: BTreeMap<String, Scalar>,
    }

    impl From<SvgStyleRepr> for SvgStyle {
        fn from(repr: SvgStyleRepr) -> Self {
            SvgStyle {
                fill: repr.fill.map(String::from),
                opacity: repr.opacity.map(String::from),
                font_family: repr.font_family.map(String::from),
                font_size: repr.font_size.map(String::from),
                font_weight: repr.font_weight.map(String::from),
                font_style: repr.font_style.map(String::from),
                text_anchor: repr.text_anchor.map(String::from),
                stroke: repr.stroke.map(String::from),
                stroke_width: repr.stroke_width.map(String::from),
                extra: repr
                    .extra
                    .into_iter()
                    .map(|(k, v)| (k, String::from(v)))
                    .collect(),
            }
        }
    }
}
