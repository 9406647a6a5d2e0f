//! Field Violations
//!
//! A single failed input rule, reported per field. Validation collects
//! every violation of a payload instead of stopping at the first one.

use std::borrow::Cow;

use serde::Serialize;

/// One violated input rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    /// Name of the offending field as it appears in the request body
    pub field: Cow<'static, str>,
    /// User-facing description of the rule
    pub message: Cow<'static, str>,
}

impl FieldViolation {
    pub fn new(field: impl Into<Cow<'static, str>>, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Accumulates violations while a payload is being checked
///
/// ## Examples
/// ```rust
/// use kernel::error::violation::Violations;
///
/// let mut v = Violations::default();
/// v.check(false, "title", "Title is required");
/// v.check(true, "content", "Content is required");
/// assert_eq!(v.into_vec().len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct Violations(Vec<FieldViolation>);

impl Violations {
    /// Record a violation unless `ok` holds
    pub fn check(
        &mut self,
        ok: bool,
        field: impl Into<Cow<'static, str>>,
        message: impl Into<Cow<'static, str>>,
    ) {
        if !ok {
            self.push(FieldViolation::new(field, message));
        }
    }

    pub fn push(&mut self, violation: FieldViolation) {
        self.0.push(violation);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `Ok(())` when nothing was recorded, otherwise every violation
    pub fn finish(self) -> Result<(), Vec<FieldViolation>> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(self.0)
        }
    }

    pub fn into_vec(self) -> Vec<FieldViolation> {
        self.0
    }
}
