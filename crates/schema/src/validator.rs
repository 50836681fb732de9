//! Movie schema validation.
//!
//! Candidates are raw `serde_json::Value`s. Every bad field is reported,
//! not just the first one.
//!
//! ## Field rules
//! - `title`, `director`: non-empty strings
//! - `year`: integer in `min_year..=max_year`
//! - `duration`: positive integer (minutes)
//! - `poster`: absolute URL
//! - `genre`: non-empty array of known genre tags (exact case)
//! - `rate`: number in `0..=10`, defaults to 5 on create
//!
//! Keys outside this list are ignored, including `id`.

use chrono::Datelike;
use serde_json::{Map, Value};
use url::Url;

use data_loader::{Genre, MovieInput, MoviePatch};

use crate::error::{FieldIssue, IssueKind, ValidationError};

/// Earliest accepted release year
pub const MIN_YEAR: u16 = 1900;

/// Rate assigned when a create request leaves it out
pub const DEFAULT_RATE: f64 = 5.0;

const MAX_RATE: f64 = 10.0;

type Check<T> = Result<T, Vec<FieldIssue>>;

/// Validation rules for movie payloads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovieSchema {
    pub min_year: u16,
    pub max_year: u16,
}

impl MovieSchema {
    /// Schema accepting years up to `max_year`
    pub fn new(max_year: u16) -> Self {
        Self {
            min_year: MIN_YEAR,
            max_year,
        }
    }

    /// Full validation for create: every required field must be present
    pub fn validate_movie(&self, candidate: &Value) -> Result<MovieInput, ValidationError> {
        let patch = self.collect(candidate, Presence::Required)?;

        let MoviePatch {
            title: Some(title),
            year: Some(year),
            director: Some(director),
            duration: Some(duration),
            poster: Some(poster),
            genre: Some(genre),
            rate,
        } = patch
        else {
            // collect() already reports absent required fields
            return Err(ValidationError::root(
                IssueKind::Missing,
                "Movie is incomplete",
            ));
        };

        Ok(MovieInput {
            title,
            year,
            director,
            duration,
            poster,
            genre,
            rate: rate.unwrap_or(DEFAULT_RATE),
        })
    }

    /// Partial validation for update: only the fields present are checked
    pub fn validate_partial_movie(&self, candidate: &Value) -> Result<MoviePatch, ValidationError> {
        self.collect(candidate, Presence::Optional)
    }

    fn collect(&self, candidate: &Value, presence: Presence) -> Result<MoviePatch, ValidationError> {
        let Some(fields) = candidate.as_object() else {
            return Err(ValidationError::root(
                IssueKind::WrongType,
                format!("Expected object, received {}", type_name(candidate)),
            ));
        };

        let mut checker = Checker {
            fields,
            presence,
            issues: Vec::new(),
        };

        let patch = MoviePatch {
            title: checker.field("title", true, |v| non_empty_string("title", v)),
            year: checker.field("year", true, |v| self.year(v)),
            director: checker.field("director", true, |v| non_empty_string("director", v)),
            duration: checker.field("duration", true, duration),
            poster: checker.field("poster", true, poster),
            genre: checker.field("genre", true, genre),
            rate: checker.field("rate", false, rate),
        };

        if checker.issues.is_empty() {
            Ok(patch)
        } else {
            Err(ValidationError::new(checker.issues))
        }
    }

    fn year(&self, value: &Value) -> Check<u16> {
        let year = integer("year", value)?;
        if year < i64::from(self.min_year) || year > i64::from(self.max_year) {
            return Err(vec![FieldIssue::new(
                "year",
                IssueKind::OutOfRange,
                format!(
                    "year must be between {} and {}",
                    self.min_year, self.max_year
                ),
            )]);
        }
        Ok(year as u16)
    }
}

impl Default for MovieSchema {
    /// Upper year bound is next calendar year, read from the system clock
    fn default() -> Self {
        let next_year = chrono::Utc::now().year() + 1;
        Self::new(u16::try_from(next_year).unwrap_or(u16::MAX))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Presence {
    Required,
    Optional,
}

struct Checker<'a> {
    fields: &'a Map<String, Value>,
    presence: Presence,
    issues: Vec<FieldIssue>,
}

impl Checker<'_> {
    fn field<T>(
        &mut self,
        name: &str,
        required: bool,
        check: impl FnOnce(&Value) -> Check<T>,
    ) -> Option<T> {
        let Some(value) = self.fields.get(name) else {
            if required && self.presence == Presence::Required {
                self.issues.push(FieldIssue::missing(name));
            }
            return None;
        };

        match check(value) {
            Ok(parsed) => Some(parsed),
            Err(issues) => {
                self.issues.extend(issues);
                None
            }
        }
    }
}

fn wrong_type(field: &str, expected: &str, value: &Value) -> FieldIssue {
    FieldIssue::new(
        field,
        IssueKind::WrongType,
        format!("Expected {expected}, received {}", type_name(value)),
    )
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn string<'v>(field: &str, value: &'v Value) -> Check<&'v str> {
    value
        .as_str()
        .ok_or_else(|| vec![wrong_type(field, "string", value)])
}

fn non_empty_string(field: &str, value: &Value) -> Check<String> {
    let s = string(field, value)?;
    if s.is_empty() {
        return Err(vec![FieldIssue::new(
            field,
            IssueKind::OutOfRange,
            format!("{field} must not be empty"),
        )]);
    }
    Ok(s.to_string())
}

/// Integers may arrive as `2020` or `2020.0`; both are fine.
/// Integral values beyond `i64` are out of range, not the wrong type.
fn integer(field: &str, value: &Value) -> Check<i64> {
    if let Some(n) = value.as_i64() {
        return Ok(n);
    }
    match value.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => Ok(f as i64),
        Some(f) if f.fract() == 0.0 => Err(vec![FieldIssue::new(
            field,
            IssueKind::OutOfRange,
            format!("{field} is out of range"),
        )]),
        _ => Err(vec![wrong_type(field, "integer", value)]),
    }
}

fn duration(value: &Value) -> Check<u32> {
    let minutes = integer("duration", value)?;
    u32::try_from(minutes)
        .ok()
        .filter(|&m| m > 0)
        .ok_or_else(|| {
            vec![FieldIssue::new(
                "duration",
                IssueKind::OutOfRange,
                "duration must be a positive number of minutes",
            )]
        })
}

fn poster(value: &Value) -> Check<String> {
    let raw = string("poster", value)?;
    Url::parse(raw).map_err(|e| {
        vec![FieldIssue::new(
            "poster",
            IssueKind::InvalidFormat,
            format!("poster must be a valid URL: {e}"),
        )]
    })?;
    Ok(raw.to_string())
}

fn genre(value: &Value) -> Check<Vec<Genre>> {
    let Some(items) = value.as_array() else {
        return Err(vec![wrong_type("genre", "array", value)]);
    };
    if items.is_empty() {
        return Err(vec![FieldIssue::new(
            "genre",
            IssueKind::OutOfRange,
            "genre must list at least one genre",
        )]);
    }

    let mut genres = Vec::with_capacity(items.len());
    let mut issues = Vec::new();
    for (index, item) in items.iter().enumerate() {
        let Some(tag) = item.as_str() else {
            issues.push(wrong_type("genre", "string", item).at(index));
            continue;
        };
        match Genre::from_tag(tag) {
            // A genre list is a set; repeats collapse
            Some(g) if !genres.contains(&g) => genres.push(g),
            Some(_) => {}
            None => issues.push(
                FieldIssue::new(
                    "genre",
                    IssueKind::UnknownValue,
                    format!("Unknown genre '{tag}', expected one of: {}", vocabulary()),
                )
                .at(index),
            ),
        }
    }

    if issues.is_empty() { Ok(genres) } else { Err(issues) }
}

fn vocabulary() -> String {
    Genre::ALL
        .iter()
        .map(Genre::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

fn rate(value: &Value) -> Check<f64> {
    let Some(rate) = value.as_f64() else {
        return Err(vec![wrong_type("rate", "number", value)]);
    };
    if !(0.0..=MAX_RATE).contains(&rate) {
        return Err(vec![FieldIssue::new(
            "rate",
            IssueKind::OutOfRange,
            format!("rate must be between 0 and {MAX_RATE}"),
        )]);
    }
    Ok(rate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn schema() -> MovieSchema {
        MovieSchema::new(2026)
    }

    fn valid() -> Value {
        json!({
            "title": "X",
            "year": 2020,
            "director": "Y",
            "duration": 100,
            "poster": "http://example.com/x.jpg",
            "genre": ["Drama"],
            "rate": 8
        })
    }

    fn kinds(err: &ValidationError, field: &str) -> Vec<IssueKind> {
        err.for_field(field).map(|issue| issue.kind).collect()
    }

    #[test]
    fn test_valid_movie() {
        let movie = schema().validate_movie(&valid()).unwrap();
        assert_eq!(movie.title, "X");
        assert_eq!(movie.year, 2020);
        assert_eq!(movie.duration, 100);
        assert_eq!(movie.genre, vec![Genre::Drama]);
        assert_eq!(movie.rate, 8.0);
    }

    #[test]
    fn test_rate_defaults_on_create() {
        let mut body = valid();
        body.as_object_mut().unwrap().remove("rate");
        let movie = schema().validate_movie(&body).unwrap();
        assert_eq!(movie.rate, DEFAULT_RATE);
    }

    #[test]
    fn test_missing_fields_all_reported() {
        let err = schema().validate_movie(&json!({ "title": "X" })).unwrap_err();
        let missing: Vec<&str> = err
            .issues()
            .iter()
            .filter(|issue| issue.kind == IssueKind::Missing)
            .map(|issue| issue.field.as_str())
            .collect();
        assert_eq!(
            missing,
            vec!["year", "director", "duration", "poster", "genre"]
        );
    }

    #[test]
    fn test_wrong_types() {
        let body = json!({
            "title": 42,
            "year": "2020",
            "director": null,
            "duration": 99.5,
            "poster": ["http://example.com"],
            "genre": "Drama",
            "rate": "high"
        });
        let err = schema().validate_movie(&body).unwrap_err();
        for field in ["title", "year", "director", "duration", "poster", "genre", "rate"] {
            assert_eq!(kinds(&err, field), vec![IssueKind::WrongType], "{field}");
        }
    }

    #[test]
    fn test_ranges() {
        let body = json!({
            "title": "",
            "year": 1899,
            "director": "Y",
            "duration": 0,
            "poster": "http://example.com/x.jpg",
            "genre": [],
            "rate": 10.5
        });
        let err = schema().validate_movie(&body).unwrap_err();
        for field in ["title", "year", "duration", "genre", "rate"] {
            assert_eq!(kinds(&err, field), vec![IssueKind::OutOfRange], "{field}");
        }
        assert!(kinds(&err, "director").is_empty());
    }

    #[test]
    fn test_year_upper_bound() {
        let mut body = valid();
        body["year"] = json!(2026);
        assert!(schema().validate_movie(&body).is_ok());
        body["year"] = json!(2027);
        assert!(schema().validate_movie(&body).is_err());
    }

    #[test]
    fn test_integral_float_accepted() {
        let mut body = valid();
        body["year"] = json!(2020.0);
        assert_eq!(schema().validate_movie(&body).unwrap().year, 2020);
    }

    #[test]
    fn test_huge_integers_are_out_of_range() {
        let err = schema()
            .validate_partial_movie(&json!({
                "year": 1e30,
                "duration": 18446744073709551615u64
            }))
            .unwrap_err();
        assert_eq!(kinds(&err, "year"), vec![IssueKind::OutOfRange]);
        assert_eq!(kinds(&err, "duration"), vec![IssueKind::OutOfRange]);

        let err = schema()
            .validate_partial_movie(&json!({ "year": -1e30, "duration": 1e30 }))
            .unwrap_err();
        assert_eq!(kinds(&err, "year"), vec![IssueKind::OutOfRange]);
        assert_eq!(kinds(&err, "duration"), vec![IssueKind::OutOfRange]);
    }

    #[test]
    fn test_poster_must_be_url() {
        let mut body = valid();
        body["poster"] = json!("not a url");
        let err = schema().validate_movie(&body).unwrap_err();
        assert_eq!(kinds(&err, "poster"), vec![IssueKind::InvalidFormat]);
    }

    #[test]
    fn test_genre_tags_are_case_sensitive() {
        let mut body = valid();
        body["genre"] = json!(["Drama", "drama", 7]);
        let err = schema().validate_movie(&body).unwrap_err();
        let issues: Vec<(Option<usize>, IssueKind)> =
            err.for_field("genre").map(|i| (i.index, i.kind)).collect();
        assert_eq!(
            issues,
            vec![
                (Some(1), IssueKind::UnknownValue),
                (Some(2), IssueKind::WrongType)
            ]
        );
    }

    #[test]
    fn test_duplicate_genres_collapse() {
        let mut body = valid();
        body["genre"] = json!(["Drama", "Sci-Fi", "Drama"]);
        let movie = schema().validate_movie(&body).unwrap();
        assert_eq!(movie.genre, vec![Genre::Drama, Genre::SciFi]);
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let mut body = valid();
        body["id"] = json!("client-chosen");
        body["extra"] = json!(true);
        assert!(schema().validate_movie(&body).is_ok());
    }

    #[test]
    fn test_non_object_rejected_at_root() {
        let err = schema().validate_movie(&json!([1, 2])).unwrap_err();
        assert_eq!(err.issues().len(), 1);
        assert_eq!(err.issues()[0].field, "");
        assert_eq!(err.issues()[0].kind, IssueKind::WrongType);
    }

    #[test]
    fn test_partial_empty_object() {
        let patch = schema().validate_partial_movie(&json!({})).unwrap();
        assert!(patch.is_empty());
    }

    #[test]
    fn test_partial_does_not_default_rate() {
        let patch = schema()
            .validate_partial_movie(&json!({ "year": 1999 }))
            .unwrap();
        assert_eq!(patch.year, Some(1999));
        assert_eq!(patch.rate, None);
    }

    #[test]
    fn test_partial_checks_present_fields() {
        let err = schema()
            .validate_partial_movie(&json!({ "rate": -1, "title": "ok" }))
            .unwrap_err();
        assert_eq!(err.issues().len(), 1);
        assert_eq!(kinds(&err, "rate"), vec![IssueKind::OutOfRange]);
    }

    #[test]
    fn test_default_schema_accepts_next_year() {
        let schema = MovieSchema::default();
        assert_eq!(schema.min_year, MIN_YEAR);
        assert!(schema.max_year > 2024);
    }
}
