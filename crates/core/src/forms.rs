//! Submission forms and their field-by-field validation.
//!
//! Every form is a plain struct deserialized from the request body plus a
//! `clean` method that runs an explicit list of per-field clean functions.
//! All field errors are collected before returning, so a client sees every
//! problem with a submission at once. Cleaned text values are trimmed.
//!
//! No markup or script filtering happens here; escaping is the job of
//! whatever renders the data.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::incident::{Category, Choice, Severity, Status, MAX_TITLE_LENGTH};

/// Minimum title length, in characters, after trimming.
pub const MIN_TITLE_LENGTH: usize = 5;

/// Minimum description length, in characters, after trimming.
pub const MIN_DESCRIPTION_LENGTH: usize = 20;

/// Minimum comment body length, in characters, after trimming.
pub const MIN_COMMENT_LENGTH: usize = 5;

/// Key under which errors not tied to a single field are reported.
pub const NON_FIELD_ERRORS: &str = "__all__";

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Field name -> error messages for a rejected submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormErrors(BTreeMap<&'static str, Vec<String>>);

impl FormErrors {
    /// Record an error message against a field.
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Messages recorded against `field`, if any.
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// Names of the fields that have errors, sorted.
    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.keys().copied()
    }

    /// Keep the value of a clean function, recording its error under `field`.
    fn collect<T>(&mut self, field: &'static str, result: Result<T, String>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(message) => {
                self.add(field, message);
                None
            }
        }
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{field}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}

impl std::error::Error for FormErrors {}

// ---------------------------------------------------------------------------
// Field clean functions
// ---------------------------------------------------------------------------

/// Message for text containing U+0000, which PostgreSQL `TEXT` cannot store.
pub const NULL_CHARACTERS_MESSAGE: &str = "Null characters are not allowed.";

fn char_len(value: &str) -> usize {
    value.chars().count()
}

/// Reject NUL characters, then trim.
fn trimmed_text(raw: &str) -> Result<&str, String> {
    if raw.contains('\0') {
        return Err(NULL_CHARACTERS_MESSAGE.to_string());
    }
    Ok(raw.trim())
}

/// Trim a title and enforce its length bounds.
pub fn clean_title(raw: &str) -> Result<String, String> {
    let title = trimmed_text(raw)?;
    let len = char_len(title);
    if len > MAX_TITLE_LENGTH {
        return Err(format!(
            "Ensure this value has at most {MAX_TITLE_LENGTH} characters (it has {len})."
        ));
    }
    if len < MIN_TITLE_LENGTH {
        return Err(format!(
            "Title must be at least {MIN_TITLE_LENGTH} characters long."
        ));
    }
    Ok(title.to_string())
}

/// Trim a description and enforce its minimum length.
pub fn clean_description(raw: &str) -> Result<String, String> {
    let description = trimmed_text(raw)?;
    if char_len(description) < MIN_DESCRIPTION_LENGTH {
        return Err(format!(
            "Description must be at least {MIN_DESCRIPTION_LENGTH} characters long."
        ));
    }
    Ok(description.to_string())
}

/// Trim a comment body and enforce its minimum length.
pub fn clean_body(raw: &str) -> Result<String, String> {
    let body = trimmed_text(raw)?;
    if char_len(body) < MIN_COMMENT_LENGTH {
        return Err(format!(
            "Comment must be at least {MIN_COMMENT_LENGTH} characters."
        ));
    }
    Ok(body.to_string())
}

/// Parse an optional choice code. Absent or blank input yields `None`.
fn clean_optional_choice<T>(raw: Option<&str>) -> Result<Option<T>, String>
where
    T: std::str::FromStr,
{
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(code) => code.parse::<T>().map(Some).map_err(|_| {
            format!("Select a valid choice. {code} is not one of the available choices.")
        }),
    }
}

/// Parse a category code, falling back to the default when absent.
pub fn clean_category(raw: Option<&str>) -> Result<Category, String> {
    clean_optional_choice(raw).map(Option::unwrap_or_default)
}

/// Parse a severity code, falling back to the default when absent.
pub fn clean_severity(raw: Option<&str>) -> Result<Severity, String> {
    clean_optional_choice(raw).map(Option::unwrap_or_default)
}

// ---------------------------------------------------------------------------
// Incident form
// ---------------------------------------------------------------------------

/// Raw incident submission.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct IncidentForm {
    pub title: String,
    pub description: String,
    pub category: Option<String>,
    pub severity: Option<String>,
    pub is_anonymous: bool,
}

/// A validated incident submission, ready to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanedIncident {
    pub title: String,
    pub description: String,
    pub category: Category,
    pub severity: Severity,
    pub is_anonymous: bool,
}

impl IncidentForm {
    pub fn clean(self) -> Result<CleanedIncident, FormErrors> {
        let mut errors = FormErrors::default();

        let title = errors.collect("title", clean_title(&self.title));
        let description = errors.collect("description", clean_description(&self.description));
        let category = errors.collect("category", clean_category(self.category.as_deref()));
        let severity = errors.collect("severity", clean_severity(self.severity.as_deref()));

        match (title, description, category, severity) {
            (Some(title), Some(description), Some(category), Some(severity)) => {
                Ok(CleanedIncident {
                    title,
                    description,
                    category,
                    severity,
                    is_anonymous: self.is_anonymous,
                })
            }
            _ => Err(errors),
        }
    }
}

// ---------------------------------------------------------------------------
// Comment form
// ---------------------------------------------------------------------------

/// Raw comment submission.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CommentForm {
    pub body: String,
    pub is_internal: bool,
}

/// A validated comment. `requested_internal` is what the author asked for;
/// the policy layer decides what is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanedComment {
    pub body: String,
    pub requested_internal: bool,
}

impl CommentForm {
    pub fn clean(self) -> Result<CleanedComment, FormErrors> {
        let mut errors = FormErrors::default();

        match errors.collect("body", clean_body(&self.body)) {
            Some(body) => Ok(CleanedComment {
                body,
                requested_internal: self.is_internal,
            }),
            None => Err(errors),
        }
    }
}

// ---------------------------------------------------------------------------
// Staff update form
// ---------------------------------------------------------------------------

/// Raw staff update of an incident's classification and status.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct IncidentUpdateForm {
    pub status: Option<String>,
    pub severity: Option<String>,
    pub category: Option<String>,
}

/// A validated staff update. `None` leaves the stored value unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanedIncidentUpdate {
    pub status: Option<Status>,
    pub severity: Option<Severity>,
    pub category: Option<Category>,
}

impl IncidentUpdateForm {
    pub fn clean(self) -> Result<CleanedIncidentUpdate, FormErrors> {
        let mut errors = FormErrors::default();

        let status = errors.collect("status", clean_optional_choice::<Status>(self.status.as_deref()));
        let severity =
            errors.collect("severity", clean_optional_choice::<Severity>(self.severity.as_deref()));
        let category =
            errors.collect("category", clean_optional_choice::<Category>(self.category.as_deref()));

        let (Some(status), Some(severity), Some(category)) = (status, severity, category) else {
            return Err(errors);
        };

        if status.is_none() && severity.is_none() && category.is_none() {
            errors.add(NON_FIELD_ERRORS, "Provide at least one of status, severity or category.");
            return Err(errors);
        }

        Ok(CleanedIncidentUpdate {
            status,
            severity,
            category,
        })
    }
}

// ---------------------------------------------------------------------------
// Form descriptions
// ---------------------------------------------------------------------------

/// Initial value of a described field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Initial {
    Text(&'static str),
    Flag(bool),
}

/// Client-facing description of one form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDescription {
    pub name: &'static str,
    pub widget: &'static str,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<Choice>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial: Option<Initial>,
}

impl FieldDescription {
    fn text(name: &'static str, widget: &'static str, min_length: usize) -> Self {
        Self {
            name,
            widget,
            required: true,
            min_length: Some(min_length),
            max_length: None,
            choices: None,
            initial: None,
        }
    }

    fn select(name: &'static str, choices: Vec<Choice>, initial: &'static str) -> Self {
        Self {
            name,
            widget: "select",
            required: false,
            min_length: None,
            max_length: None,
            choices: Some(choices),
            initial: Some(Initial::Text(initial)),
        }
    }

    fn checkbox(name: &'static str) -> Self {
        Self {
            name,
            widget: "checkbox",
            required: false,
            min_length: None,
            max_length: None,
            choices: None,
            initial: Some(Initial::Flag(false)),
        }
    }
}

/// Fields of the incident submission form.
pub fn incident_form_fields() -> Vec<FieldDescription> {
    let mut title = FieldDescription::text("title", "text", MIN_TITLE_LENGTH);
    title.max_length = Some(MAX_TITLE_LENGTH);

    vec![
        title,
        FieldDescription::text("description", "textarea", MIN_DESCRIPTION_LENGTH),
        FieldDescription::select(
            "category",
            Category::choices(),
            Category::default().as_str(),
        ),
        FieldDescription::select(
            "severity",
            Severity::choices(),
            Severity::default().as_str(),
        ),
        FieldDescription::checkbox("is_anonymous"),
    ]
}

/// Fields of the comment form. The internal checkbox is only offered to
/// actors allowed to use it.
pub fn comment_form_fields(can_mark_internal: bool) -> Vec<FieldDescription> {
    let mut fields = vec![FieldDescription::text("body", "textarea", MIN_COMMENT_LENGTH)];
    if can_mark_internal {
        fields.push(FieldDescription::checkbox("is_internal"));
    }
    fields
}
