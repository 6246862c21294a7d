use super::constraint::{Constraint, NotBlank};
use crate::value::FieldValue;

/// Constraint group for PATCH fields.
///
/// An undefined field is only validated when the group contains a
/// [`NotBlank`]; in that case `NotBlank` sees `null` in place of the sentinel
/// and every other constraint sees the sentinel itself. Defined values go
/// through every inner constraint unchanged.
///
/// ```rust
/// use usecase_http::validation::{Constraint, Length, NotBlank, PatchValidation};
/// use usecase_http::value::FieldValue;
///
/// let optional = PatchValidation::new().with(Length::min(3));
/// assert!(optional.validate(&FieldValue::Undefined).is_empty());
///
/// let required = PatchValidation::new().with(NotBlank::new());
/// assert_eq!(required.validate(&FieldValue::Undefined).len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct PatchValidation {
    constraints: Vec<Box<dyn Constraint>>,
}

impl PatchValidation {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, constraint: impl Constraint + 'static) -> Self {
        self.constraints.push(Box::new(constraint));
        self
    }

    #[must_use]
    pub fn constraints(&self) -> &[Box<dyn Constraint>] {
        &self.constraints
    }

    fn has_not_blank(&self) -> bool {
        self.constraints.iter().any(|c| c.name() == NotBlank::NAME)
    }
}

impl Constraint for PatchValidation {
    fn name(&self) -> &'static str {
        "PatchValidation"
    }

    fn validate(&self, value: &FieldValue) -> Vec<String> {
        let undefined = value.is_undefined();
        if undefined && !self.has_not_blank() {
            return Vec::new();
        }

        self.constraints
            .iter()
            .flat_map(|constraint| {
                if undefined && constraint.name() == NotBlank::NAME {
                    constraint.validate(&FieldValue::Null)
                } else {
                    constraint.validate(value)
                }
            })
            .collect()
    }
}
