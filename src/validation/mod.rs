//! Request validation helpers.
//!
//! Every helper records its violation in a shared [`ValidationErrors`] and
//! keeps going, so a single response lists every invalid field at once.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use uuid::Uuid;

pub const INVALID_ID: &str = "Id informado inválido";
pub const INVALID_DATE: &str = "Data não é valida";

/// Field path → messages, e.g. `hospitalization.entranceDate` or `ids[2]`.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// `Ok(())` when nothing was recorded
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let fields: Vec<&str> = self.fields().collect();
        write!(f, "invalid fields: {}", fields.join(", "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Accepted date shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFormat {
    /// RFC 3339, naive `YYYY-MM-DDTHH:MM:SS[.fff]` (read as UTC) or plain `YYYY-MM-DD`
    Lenient,
    /// Exactly `YYYY-MM-DDTHH:MM:SS` followed by `Z` or a `±HH:MM` offset
    Strict,
}

/// A present, non-empty string.
pub fn required<'a>(
    errors: &mut ValidationErrors,
    field: &str,
    value: Option<&'a str>,
    message: &str,
) -> Option<&'a str> {
    match value {
        Some(v) if !v.is_empty() => Some(v),
        _ => {
            errors.add(field, message);
            None
        }
    }
}

/// A required UUID. Missing values report `required_message`, malformed ones [`INVALID_ID`].
pub fn uuid(
    errors: &mut ValidationErrors,
    field: &str,
    value: Option<&str>,
    required_message: &str,
) -> Option<Uuid> {
    let raw = required(errors, field, value, required_message)?;
    match Uuid::parse_str(raw) {
        Ok(id) => Some(id),
        Err(_) => {
            errors.add(field, INVALID_ID);
            None
        }
    }
}

/// An optional list of UUIDs; each bad entry is reported as `field[index]`.
pub fn uuid_list(errors: &mut ValidationErrors, field: &str, values: Option<&[String]>) -> Vec<Uuid> {
    let Some(values) = values else {
        return Vec::new();
    };
    values
        .iter()
        .enumerate()
        .filter_map(|(index, value)| match Uuid::parse_str(value) {
            Ok(id) => Some(id),
            Err(_) => {
                errors.add(format!("{field}[{index}]"), INVALID_ID);
                None
            }
        })
        .collect()
}

/// A required date, normalized to UTC.
pub fn date(
    errors: &mut ValidationErrors,
    field: &str,
    value: Option<&str>,
    format: DateFormat,
    required_message: &str,
) -> Option<DateTime<Utc>> {
    let raw = required(errors, field, value, required_message)?;
    match parse_date(raw, format) {
        Some(parsed) => Some(parsed),
        None => {
            errors.add(field, INVALID_DATE);
            None
        }
    }
}

/// A nullable date: `None`/empty is accepted, anything else must parse.
/// The outer `Option` is `None` when the value was present but invalid.
pub fn optional_date(
    errors: &mut ValidationErrors,
    field: &str,
    value: Option<&str>,
    format: DateFormat,
) -> Option<Option<DateTime<Utc>>> {
    match value {
        None | Some("") => Some(None),
        Some(raw) => match parse_date(raw, format) {
            Some(parsed) => Some(Some(parsed)),
            None => {
                errors.add(field, INVALID_DATE);
                None
            }
        },
    }
}

pub fn parse_date(value: &str, format: DateFormat) -> Option<DateTime<Utc>> {
    match format {
        DateFormat::Lenient => parse_lenient(value),
        DateFormat::Strict => parse_strict(value),
    }
}

fn parse_lenient(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }
    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, pattern) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

fn parse_strict(value: &str) -> Option<DateTime<Utc>> {
    if let Some(local) = value.strip_suffix('Z') {
        return NaiveDateTime::parse_from_str(local, "%Y-%m-%dT%H:%M:%S")
            .ok()
            .map(|naive| Utc.from_utc_datetime(&naive));
    }
    DateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%:z")
        .ok()
        .map(|parsed| parsed.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_every_violation() {
        let mut errors = ValidationErrors::new();
        assert!(required(&mut errors, "name", None, "Informe um nome").is_none());
        assert!(uuid(&mut errors, "userId", Some("not-a-uuid"), "Informe o id").is_none());
        assert!(required(&mut errors, "location", Some(""), "Informe o local").is_none());

        assert_eq!(errors.len(), 3);
        assert_eq!(errors.get("userId"), Some(&[INVALID_ID.to_string()][..]));
        assert_eq!(errors.get("name"), Some(&["Informe um nome".to_string()][..]));
    }

    #[test]
    fn uuid_distinguishes_missing_from_malformed() {
        let mut errors = ValidationErrors::new();
        uuid(&mut errors, "a", None, "Informe o id");
        uuid(&mut errors, "b", Some("1234"), "Informe o id");
        let ok = uuid(&mut errors, "c", Some("0b7f1f7e-7a1e-4c43-9d5e-3c9e6f0c2a11"), "Informe o id");

        assert_eq!(errors.get("a").unwrap()[0], "Informe o id");
        assert_eq!(errors.get("b").unwrap()[0], INVALID_ID);
        assert!(errors.get("c").is_none());
        assert!(ok.is_some());
    }

    #[test]
    fn uuid_list_reports_indexes() {
        let mut errors = ValidationErrors::new();
        let values = vec![
            "0b7f1f7e-7a1e-4c43-9d5e-3c9e6f0c2a11".to_string(),
            "bad".to_string(),
        ];
        let ids = uuid_list(&mut errors, "diseases", Some(&values));
        assert_eq!(ids.len(), 1);
        assert!(errors.get("diseases[1]").is_some());
    }

    #[test]
    fn lenient_dates_accept_common_shapes() {
        let expected = Utc.with_ymd_and_hms(2021, 5, 7, 0, 0, 0).unwrap();
        assert_eq!(parse_date("2021-05-07", DateFormat::Lenient), Some(expected));
        assert_eq!(parse_date("2021-05-07T00:00:00", DateFormat::Lenient), Some(expected));
        assert_eq!(parse_date("2021-05-07T03:00:00+03:00", DateFormat::Lenient), Some(expected));
        assert_eq!(parse_date("2021-05-07T00:00:00.000Z", DateFormat::Lenient), Some(expected));
        assert_eq!(parse_date("07/05/2021", DateFormat::Lenient), None);
        assert_eq!(parse_date("2021-13-40", DateFormat::Lenient), None);
    }

    #[test]
    fn strict_dates_require_offset_and_no_fraction() {
        let expected = Utc.with_ymd_and_hms(2021, 5, 7, 12, 30, 0).unwrap();
        assert_eq!(parse_date("2021-05-07T12:30:00Z", DateFormat::Strict), Some(expected));
        assert_eq!(parse_date("2021-05-07T09:30:00-03:00", DateFormat::Strict), Some(expected));
        assert_eq!(parse_date("2021-05-07", DateFormat::Strict), None);
        assert_eq!(parse_date("2021-05-07T12:30:00", DateFormat::Strict), None);
        assert_eq!(parse_date("2021-05-07T12:30:00.000Z", DateFormat::Strict), None);
    }

    #[test]
    fn optional_date_accepts_null_and_rejects_garbage() {
        let mut errors = ValidationErrors::new();
        assert_eq!(optional_date(&mut errors, "exitDate", None, DateFormat::Strict), Some(None));
        assert_eq!(optional_date(&mut errors, "exitDate", Some(""), DateFormat::Strict), Some(None));
        assert!(errors.is_empty());

        assert_eq!(optional_date(&mut errors, "exitDate", Some("ontem"), DateFormat::Lenient), None);
        assert_eq!(errors.get("exitDate").unwrap()[0], INVALID_DATE);
    }
}
