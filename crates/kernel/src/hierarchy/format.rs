//! Display formatting of raw content items.
//!
//! Each section renders its table columns from different raw fields. The
//! formatted item keeps every raw field (edit forms need them) and adds or
//! overwrites the display fields.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use serde_json::{Map, Value};

use crate::models::ContentSection;
use crate::models::reference::record_id;

/// Placeholder for missing scalar values.
pub const DASH: &str = "-";

/// Placeholder for missing list values on course rows.
pub const NOT_AVAILABLE: &str = "N/A";

/// Turns a raw item record into its display record.
pub trait ItemFormatter {
    fn format(&self, record: &Map<String, Value>) -> Map<String, Value>;
}

impl<F> ItemFormatter for F
where
    F: Fn(&Map<String, Value>) -> Map<String, Value>,
{
    fn format(&self, record: &Map<String, Value>) -> Map<String, Value> {
        self(record)
    }
}

/// Leaves records untouched apart from the resolved `id`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Passthrough;

impl ItemFormatter for Passthrough {
    fn format(&self, record: &Map<String, Value>) -> Map<String, Value> {
        base(record)
    }
}

impl ItemFormatter for ContentSection {
    fn format(&self, record: &Map<String, Value>) -> Map<String, Value> {
        match self {
            Self::OnlineCourse => format_course(record),
            Self::DailyQuiz => format_quiz(record),
            Self::CurrentAffairs => format_current_affair(record),
            Self::EBook => format_ebook(record),
            Self::Publication => format_publication(record),
            Self::PreviousPaper => format_paper(record),
        }
    }
}

/// Locale used when rendering dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateStyle {
    /// `M/D/YYYY`
    Us,
    /// `DD/MM/YYYY`
    Gb,
}

fn base(record: &Map<String, Value>) -> Map<String, Value> {
    let mut out = Map::with_capacity(record.len() + 4);
    if let Some(id) = record_id(record) {
        out.insert("id".to_string(), Value::String(id));
    }
    for (key, value) in record {
        if key != "id" {
            out.insert(key.clone(), value.clone());
        }
    }
    out
}

fn set(out: &mut Map<String, Value>, key: &str, value: String) {
    out.insert(key.to_string(), Value::String(value));
}

fn format_course(record: &Map<String, Value>) -> Map<String, Value> {
    let mut out = base(record);
    let languages = join_member(record.get("languages"), "name")
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());
    let validity = join_member(record.get("validities"), "label")
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());
    let price = truthy_scalar(record.get("originalPrice")).unwrap_or_else(|| "0".to_string());

    set(&mut out, "languages", languages);
    set(&mut out, "validity", validity);
    set(&mut out, "price", format!("₹{price}"));
    out
}

fn format_quiz(record: &Map<String, Value>) -> Map<String, Value> {
    let mut out = base(record);
    let questions: usize = record
        .get("sections")
        .and_then(Value::as_array)
        .map(|sections| {
            sections
                .iter()
                .filter_map(|s| s.get("questions").and_then(Value::as_array))
                .map(Vec::len)
                .sum()
        })
        .unwrap_or(0);

    out.insert("questions".to_string(), Value::from(questions));
    set(&mut out, "language", language_names(record));
    set(&mut out, "date", format_date(record.get("examDate"), DateStyle::Us));
    out
}

fn format_current_affair(record: &Map<String, Value>) -> Map<String, Value> {
    let mut out = base(record);
    let kind = record.get("type").and_then(Value::as_str);

    let title = if kind == Some("SPORTS") {
        let sport = non_empty_str(record.get("sport")).unwrap_or("Sports");
        let event = non_empty_str(record.get("event")).unwrap_or(DASH);
        format!("{sport} – {event}")
    } else {
        non_empty_str(record.get("heading"))
            .or_else(|| non_empty_str(record.get("name")))
            .unwrap_or(DASH)
            .to_string()
    };

    set(&mut out, "title", title);
    match kind {
        Some(kind) => set(&mut out, "categoryType", kind.to_string()),
        None => {
            out.insert("categoryType".to_string(), Value::Null);
        }
    }
    set(&mut out, "date", format_date(record.get("date"), DateStyle::Gb));
    set(&mut out, "language", language_names(record));
    out
}

fn format_ebook(record: &Map<String, Value>) -> Map<String, Value> {
    let mut out = base(record);
    let title = non_empty_str(record.get("name")).or_else(|| non_empty_str(record.get("title")));
    match title {
        Some(title) => set(&mut out, "title", title.to_string()),
        None => {
            out.insert("title".to_string(), Value::Null);
        }
    }
    set(&mut out, "price", price_or_free(record));
    set(&mut out, "language", language_names(record));
    set(&mut out, "date", format_date(record.get("createdAt"), DateStyle::Us));
    out
}

fn format_publication(record: &Map<String, Value>) -> Map<String, Value> {
    let mut out = base(record);
    let title = non_empty_str(record.get("name")).unwrap_or("Untitled");
    set(&mut out, "title", title.to_string());
    set(&mut out, "price", price_or_free(record));
    set(&mut out, "language", language_names(record));
    set(&mut out, "date", format_date(record.get("createdAt"), DateStyle::Us));
    out
}

fn format_paper(record: &Map<String, Value>) -> Map<String, Value> {
    let mut out = base(record);
    let exam = non_empty_str(record.get("exam"))
        .or_else(|| non_empty_str(record.get("name")))
        .unwrap_or(DASH);
    let year = truthy_scalar(record.get("year"))
        .or_else(|| parse_date(record.get("examDate")).map(|d| d.year().to_string()))
        .unwrap_or_else(|| DASH.to_string());

    set(&mut out, "exam", exam.to_string());
    set(&mut out, "year", year);
    set(&mut out, "language", language_names(record));
    out
}

/// Comma-joined `name`s of the `languages` list, or `-` when there are none.
fn language_names(record: &Map<String, Value>) -> String {
    join_member(record.get("languages"), "name")
        .filter(|joined| !joined.is_empty())
        .unwrap_or_else(|| DASH.to_string())
}

/// Join `member` of every element of a list with `", "`.
///
/// Returns `None` when the value is not a list. Elements without the member
/// contribute an empty string.
fn join_member(value: Option<&Value>, member: &str) -> Option<String> {
    let list = value?.as_array()?;
    let parts: Vec<&str> = list
        .iter()
        .map(|entry| entry.get(member).and_then(Value::as_str).unwrap_or_default())
        .collect();
    Some(parts.join(", "))
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|s| !s.is_empty())
}

/// Render a scalar the way it prints in a template; empty, zero, false and
/// null count as absent.
fn truthy_scalar(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}

fn price_or_free(record: &Map<String, Value>) -> String {
    truthy_scalar(record.get("originalPrice"))
        .map(|price| format!("₹{price}"))
        .unwrap_or_else(|| "Free".to_string())
}

/// Parse the date forms the API emits.
pub fn parse_date(value: Option<&Value>) -> Option<NaiveDate> {
    let raw = value?.as_str()?.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.date());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// Render a date in the given locale style, or `-`.
pub fn format_date(value: Option<&Value>, style: DateStyle) -> String {
    let Some(date) = parse_date(value) else {
        return DASH.to_string();
    };
    match style {
        DateStyle::Us => date.format("%-m/%-d/%Y").to_string(),
        DateStyle::Gb => date.format("%d/%m/%Y").to_string(),
    }
}
