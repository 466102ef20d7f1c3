//! Diagnostics reported back to Terraform

use std::fmt;

use ibmcloud_common::SdkError;

use crate::value::AttributePath;

/// Whether a diagnostic stops the operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fails the operation.
    Error,
    /// Reported, but the operation continues.
    Warning,
}

/// A single problem report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Error or warning.
    pub severity: Severity,
    /// Short, one-line description.
    pub summary: String,
    /// Longer explanation; may be empty.
    pub detail: String,
    /// Attribute the diagnostic points at, when it concerns one.
    pub attribute: Option<AttributePath>,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let severity = match self.severity {
            Severity::Error => "Error",
            Severity::Warning => "Warning",
        };
        write!(f, "{severity}: {}", self.summary)?;
        if let Some(path) = &self.attribute {
            write!(f, " ({path})")?;
        }
        if !self.detail.is_empty() {
            write!(f, ": {}", self.detail)?;
        }
        Ok(())
    }
}

/// An ordered collection of diagnostics; empty means success.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics(Vec<Diagnostic>);

impl Diagnostics {
    /// An empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an error not tied to an attribute.
    pub fn add_error(&mut self, summary: impl Into<String>, detail: impl Into<String>) {
        self.push(Severity::Error, summary.into(), detail.into(), None);
    }

    /// Append a warning not tied to an attribute.
    pub fn add_warning(&mut self, summary: impl Into<String>, detail: impl Into<String>) {
        self.push(Severity::Warning, summary.into(), detail.into(), None);
    }

    /// Append an error pointing at `path`.
    pub fn add_attribute_error(
        &mut self,
        path: AttributePath,
        summary: impl Into<String>,
        detail: impl Into<String>,
    ) {
        self.push(Severity::Error, summary.into(), detail.into(), Some(path));
    }

    /// An error diagnostic for a failed SDK call. The detail carries the
    /// error code and, for HTTP failures, the status and operation.
    pub fn add_sdk_error(&mut self, summary: impl Into<String>, err: &SdkError) {
        let detail = match err.http_problem() {
            Some(problem) => format!(
                "{} (code: {}, status: {}, operation: {})",
                err.message(),
                err.code(),
                problem.status_code,
                problem.operation_id
            ),
            None => format!("{} (code: {})", err.message(), err.code()),
        };
        self.add_error(summary, detail);
    }

    /// Append every diagnostic of `other`.
    pub fn extend(&mut self, other: Diagnostics) {
        self.0.extend(other.0);
    }

    /// True when any diagnostic is an error.
    pub fn has_error(&self) -> bool {
        self.0.iter().any(|d| d.severity == Severity::Error)
    }

    /// True when nothing was reported.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of diagnostics.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Diagnostics in the order they were added.
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.0.iter()
    }

    /// Error diagnostics only.
    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.0.iter().filter(|d| d.severity == Severity::Error)
    }

    fn push(
        &mut self,
        severity: Severity,
        summary: String,
        detail: String,
        attribute: Option<AttributePath>,
    ) {
        self.0.push(Diagnostic { severity, summary, detail, attribute });
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use ibmcloud_common::{codes, ErrorKind};

    use super::*;

    #[test]
    fn warnings_alone_are_not_errors() {
        let mut diags = Diagnostics::new();
        diags.add_warning("skipped", "");
        assert!(!diags.has_error());

        diags.add_attribute_error(AttributePath::root("limit"), "invalid", "must be a number");
        assert!(diags.has_error());
        assert_eq!(diags.errors().count(), 1);
        assert_eq!(
            diags.errors().next().map(ToString::to_string).as_deref(),
            Some("Error: invalid (limit): must be a number")
        );
    }

    #[test]
    fn sdk_errors_keep_their_code() {
        let mut diags = Diagnostics::new();
        let err = SdkError::new(ErrorKind::Validation, codes::STRUCT_VALIDATION_ERROR, "bad");
        diags.add_sdk_error("read failed", &err);
        let diag = diags.iter().next().unwrap();
        assert!(diag.detail.contains("struct-validation-error"));
    }
}
