use super::constraint::Constraint;
use super::violation::{Violation, ViolationList};
use crate::request::FieldSet;
use crate::value::FieldValue;
use indexmap::IndexMap;
use serde_json::Value;
use tracing::debug;

/// Constraints attached to the fields of a request type.
#[derive(Debug, Default)]
pub struct Rules {
    fields: IndexMap<String, Vec<Box<dyn Constraint>>>,
}

impl Rules {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach `constraint` to `field`. Constraints run in the order added.
    #[must_use]
    pub fn field(mut self, field: impl Into<String>, constraint: impl Constraint + 'static) -> Self {
        self.fields
            .entry(field.into())
            .or_default()
            .push(Box::new(constraint));
        self
    }

    /// Append every rule of `other`.
    #[must_use]
    pub fn merge(mut self, other: Rules) -> Self {
        for (field, constraints) in other.fields {
            self.fields.entry(field).or_default().extend(constraints);
        }
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Box<dyn Constraint>])> {
        self.fields
            .iter()
            .map(|(field, constraints)| (field.as_str(), constraints.as_slice()))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Validation engine consumed by request types. Only pass/fail and the
/// violation list matter to callers.
pub trait Validator: Send + Sync {
    fn validate(&self, fields: &FieldSet, rules: &Rules) -> ViolationList;
}

/// Runs each field's constraints against its current value.
///
/// A declared field that is not set is validated as `null`. Rules naming an
/// undeclared field are skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConstraintValidator;

impl Validator for ConstraintValidator {
    fn validate(&self, fields: &FieldSet, rules: &Rules) -> ViolationList {
        let mut violations = ViolationList::new();

        for (field, constraints) in rules.iter() {
            if !fields.contains(field) {
                debug!(field = %field, "Rule targets an undeclared field, skipping");
                continue;
            }
            let value = fields.get(field).unwrap_or(&FieldValue::Null);
            for constraint in constraints {
                for message in constraint.validate(value) {
                    violations.push(Violation::new(
                        field,
                        value.to_json().unwrap_or(Value::Null),
                        message,
                    ));
                }
            }
        }
        violations
    }
}
