use std::borrow::Cow;

use serde::Serialize;
use validator::{ValidationError, ValidationErrors, ValidationErrorsKind};

pub mod discounts;
pub mod products;

/// A single rejected field, addressed by its client-facing path
/// (for example `customizedOptions[0].label`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    pub field: String,
    pub message: String,
}

impl FieldIssue {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Flatten nested `validator` errors into field issues.
pub(crate) fn collect_issues(errors: &ValidationErrors) -> Vec<FieldIssue> {
    let mut issues = Vec::new();
    collect_into("", errors, &mut issues);
    issues
}

fn collect_into(prefix: &str, errors: &ValidationErrors, issues: &mut Vec<FieldIssue>) {
    for (field, kind) in errors.errors() {
        let name = camel_case(field);
        let path = if prefix.is_empty() {
            name
        } else {
            format!("{prefix}.{name}")
        };

        match kind {
            ValidationErrorsKind::Field(list) => {
                for error in list {
                    issues.push(FieldIssue::new(path.clone(), describe(&path, error)));
                }
            }
            ValidationErrorsKind::Struct(inner) => collect_into(&path, inner, issues),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect_into(&format!("{path}[{index}]"), inner, issues);
                }
            }
        }
    }
}

fn describe(path: &str, error: &ValidationError) -> String {
    match &error.message {
        Some(message) => message.to_string(),
        None => format!("{path} is invalid ({})", error.code),
    }
}

fn camel_case(field: &str) -> String {
    let mut result = String::with_capacity(field.len());
    let mut upper_next = false;
    for ch in field.chars() {
        if ch == '_' {
            upper_next = true;
        } else if upper_next {
            result.push(ch.to_ascii_uppercase());
            upper_next = false;
        } else {
            result.push(ch);
        }
    }
    result
}

/// Build a `ValidationError` carrying a human-readable message.
pub(crate) fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

/// Trim, collapse inner whitespace and drop control characters.
pub(crate) fn sanitize_inline_text(input: &str) -> String {
    let mut sanitized = String::with_capacity(input.len());
    let mut previous_whitespace = false;

    for ch in input.trim().chars() {
        if ch.is_whitespace() {
            if !previous_whitespace {
                sanitized.push(' ');
                previous_whitespace = true;
            }
        } else if ch.is_control() {
            continue;
        } else {
            sanitized.push(ch);
            previous_whitespace = false;
        }
    }

    sanitized
}

/// Sanitize each line and drop leading/trailing blank lines.
pub(crate) fn sanitize_multiline_text(input: &str) -> String {
    let lines: Vec<String> = input.lines().map(sanitize_inline_text).collect();

    let start = lines.iter().position(|line| !line.is_empty());
    let end = lines.iter().rposition(|line| !line.is_empty());

    match (start, end) {
        (Some(start), Some(end)) => lines[start..=end].join("\n"),
        _ => String::new(),
    }
}
