use super::context::RequestStack;
use super::fields::FieldSet;
use crate::coerce::coerce_to_any;
use crate::config::RequestConfig;
use crate::security::Security;
use crate::validation::Validator;
use crate::value::FieldValue;
use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;
use tracing::warn;

/// Collaborators every validated request needs. Cheap to clone; share one
/// instance across handlers.
#[derive(Clone)]
pub struct RequestDependencies {
    pub validator: Arc<dyn Validator>,
    pub request_stack: RequestStack,
    pub security: Arc<dyn Security>,
    /// Required by [`PopulateStrategy::Serializer`](super::PopulateStrategy)
    pub denormalizer: Option<Arc<dyn Denormalizer>>,
    pub config: RequestConfig,
}

impl RequestDependencies {
    pub fn new(
        validator: Arc<dyn Validator>,
        request_stack: RequestStack,
        security: Arc<dyn Security>,
    ) -> Self {
        Self {
            validator,
            request_stack,
            security,
            denormalizer: None,
            config: RequestConfig::default(),
        }
    }

    #[must_use]
    pub fn with_denormalizer(mut self, denormalizer: Arc<dyn Denormalizer>) -> Self {
        self.denormalizer = Some(denormalizer);
        self
    }

    #[must_use]
    pub fn with_config(mut self, config: RequestConfig) -> Self {
        self.config = config;
        self
    }
}

impl fmt::Debug for RequestDependencies {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestDependencies")
            .field("request_stack", &self.request_stack)
            .field("has_denormalizer", &self.denormalizer.is_some())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Failure reported by a [`Denormalizer`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DenormalizeError {
    #[error("The type of the \"{field}\" attribute for class \"{target}\" must be one of \"{expected}\" (\"{actual}\" given)")]
    InvalidType {
        field: String,
        target: String,
        expected: String,
        actual: String,
    },
    #[error("{0}")]
    Custom(String),
}

/// Structured population collaborator used by the serializer strategy.
///
/// Receives the aggregated request data and fills the declared fields of the
/// instance being built.
pub trait Denormalizer: Send + Sync {
    fn denormalize(
        &self,
        data: &IndexMap<String, FieldValue>,
        target: &str,
        fields: &mut FieldSet,
    ) -> Result<(), DenormalizeError>;
}

/// Denormalizer driven by the declared field signatures.
///
/// Known keys are assigned after coercion to the field's declared types;
/// unknown keys are ignored. A value that fits none of the declared types, or
/// a `null` for a non-nullable field, is rejected.
#[derive(Debug, Clone, Copy, Default)]
pub struct SignatureDenormalizer;

impl Denormalizer for SignatureDenormalizer {
    fn denormalize(
        &self,
        data: &IndexMap<String, FieldValue>,
        target: &str,
        fields: &mut FieldSet,
    ) -> Result<(), DenormalizeError> {
        for (key, value) in data {
            let Some(spec) = fields.spec(key).copied() else {
                continue;
            };
            let signature = spec.signature;

            let accepted = match value {
                FieldValue::Undefined if signature.undefinable => Some(FieldValue::Undefined),
                FieldValue::Undefined => None,
                FieldValue::Null if signature.nullable => Some(FieldValue::Null),
                FieldValue::Null => None,
                concrete => {
                    let coerced = coerce_to_any(concrete.clone(), signature.types);
                    let fits = signature.types.is_empty()
                        || coerced
                            .value_type()
                            .is_some_and(|ty| signature.accepts(ty));
                    fits.then_some(coerced)
                }
            };

            match accepted {
                Some(value) => {
                    fields.set(key, value);
                }
                None => {
                    let actual = value
                        .value_type()
                        .map(|ty| ty.to_string())
                        .unwrap_or_else(|| (if value.is_null() { "null" } else { "undefined" }).to_string());
                    warn!(
                        field = %key,
                        request_type = %target,
                        expected = %signature,
                        actual = %actual,
                        "Denormalization rejected field value"
                    );
                    return Err(DenormalizeError::InvalidType {
                        field: key.clone(),
                        target: target.to_string(),
                        expected: signature.to_string(),
                        actual,
                    });
                }
            }
        }
        Ok(())
    }
}
