use super::context::HeaderBag;
use super::dependencies::RequestDependencies;
use super::error::{ConfigError, MalformedRequest, RequestError};
use super::fields::{FieldSet, FieldSpec};
use crate::coerce::coerce_to_any;
use crate::pagination::{Pagination, PaginationError, PaginationParams};
use crate::signature::{FieldType, TypeSignature};
use crate::validation::Rules;
use crate::value::FieldValue;
use serde_json::Value;
use tracing::{debug, info};

/// Per-request storage behind a validated request type: the declared fields,
/// the headers captured during population and the shared dependencies.
///
/// All field reads go through [`RequestState::get_value`] or its typed form
/// [`RequestState::get`], which enforce the null and undefined contracts of
/// both the field and the reader.
#[derive(Debug, Clone)]
pub struct RequestState {
    pub(super) fields: FieldSet,
    pub(super) headers: HeaderBag,
    pub(super) deps: RequestDependencies,
}

impl RequestState {
    /// Fresh state with `specs` declared and their initializers applied.
    pub fn new(specs: &[FieldSpec], deps: RequestDependencies) -> Self {
        Self {
            fields: FieldSet::new(specs),
            headers: HeaderBag::new(),
            deps,
        }
    }

    #[must_use]
    pub fn fields(&self) -> &FieldSet {
        &self.fields
    }

    #[must_use]
    pub fn deps(&self) -> &RequestDependencies {
        &self.deps
    }

    /// Guarded read of `name` on behalf of a reader declaring `caller`.
    ///
    /// In order:
    /// 1. the field must be declared ([`MalformedRequest::NotExist`]);
    /// 2. `null` is returned only if both the field and `caller` admit it
    ///    ([`MalformedRequest::Null`]);
    /// 3. the sentinel is returned only if both admit it
    ///    ([`MalformedRequest::Undefined`]);
    /// 4. the field must hold a value ([`MalformedRequest::NotSet`]);
    /// 5. the value is coerced to the first of `caller.types` it converts to,
    ///    unless its type is already listed. Failed coercion returns the
    ///    value unchanged.
    pub fn get_value(
        &self,
        name: &str,
        caller: &TypeSignature,
    ) -> Result<FieldValue, MalformedRequest> {
        let Some(spec) = self.fields.spec(name) else {
            debug!(field = %name, "Read of undeclared field");
            return Err(MalformedRequest::NotExist {
                field: name.to_string(),
            });
        };
        let declared = spec.signature;

        match self.fields.get(name) {
            Some(FieldValue::Null) => {
                if declared.nullable && caller.nullable {
                    Ok(FieldValue::Null)
                } else {
                    debug!(field = %name, declared = %declared, caller = %caller, "Null field rejected");
                    Err(MalformedRequest::Null {
                        field: name.to_string(),
                    })
                }
            }
            Some(FieldValue::Undefined) => {
                if declared.undefinable && caller.undefinable {
                    Ok(FieldValue::Undefined)
                } else {
                    debug!(field = %name, declared = %declared, caller = %caller, "Undefined field rejected");
                    Err(MalformedRequest::Undefined {
                        field: name.to_string(),
                    })
                }
            }
            None => {
                debug!(field = %name, "Read of unset field");
                Err(MalformedRequest::NotSet {
                    field: name.to_string(),
                })
            }
            Some(value) => Ok(coerce_to_any(value.clone(), caller.types)),
        }
    }

    /// Guarded read into the Rust type `T`; the reader's constraint is
    /// `T::SIGNATURE`.
    ///
    /// A value that survives the guarded read but still does not fit `T`
    /// (for example a non-numeric string read as `i64`) yields
    /// [`MalformedRequest::TypeMismatch`].
    pub fn get<T: FieldType>(&self, name: &str) -> Result<T, MalformedRequest> {
        let value = self.get_value(name, &T::SIGNATURE)?;
        T::from_field(value).map_err(|value| {
            debug!(
                field = %name,
                expected = %T::SIGNATURE,
                actual = ?value.value_type(),
                "Field value does not fit the requested type"
            );
            MalformedRequest::TypeMismatch {
                field: name.to_string(),
                expected: T::SIGNATURE.to_string(),
            }
        })
    }

    /// Raw field value without any checks; `None` when undeclared or unset.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Assign a declared field. Returns `false` for undeclared names.
    pub fn set(&mut self, name: &str, value: impl Into<FieldValue>) -> bool {
        self.fields.set(name, value)
    }

    #[must_use]
    pub fn headers(&self) -> &HeaderBag {
        &self.headers
    }

    /// Whether the header was sent with at least one value. Names are the
    /// lower-case stored form.
    #[must_use]
    pub fn has_header(&self, name: &str) -> bool {
        self.headers.get(name).is_some_and(|values| !values.is_empty())
    }

    /// First value of the header.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(name)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// First value of the `accept` header.
    #[must_use]
    pub fn mime_type(&self) -> Option<&str> {
        self.header("accept")
    }

    /// Value of the identity field (`null` while unset).
    pub fn user_id(&self) -> Result<FieldValue, ConfigError> {
        let identity = &self.deps.config.identity_field;
        if !self.fields.contains(identity) {
            return Err(ConfigError::MissingIdentityField(identity.clone()));
        }
        Ok(self.fields.get(identity).cloned().unwrap_or(FieldValue::Null))
    }

    #[must_use]
    pub fn is_granted(&self, attribute: &str, subject: Option<&Value>) -> bool {
        self.deps.security.is_granted(attribute, subject)
    }

    /// Run `rules` through the configured validator.
    pub fn validate(&self, rules: &Rules) -> Result<(), RequestError> {
        let violations = self.deps.validator.validate(&self.fields, rules);
        if violations.is_empty() {
            return Ok(());
        }
        info!(
            violation_count = violations.len(),
            "Request validation failed"
        );
        Err(RequestError::ValidationFailed(violations))
    }

    /// Window derived from the `page` and `perPage` fields.
    pub fn pagination(&self) -> Result<Pagination, PaginationError> {
        PaginationParams::from_fields(&self.fields)
            .pagination_with_default(self.deps.config.default_per_page)
    }
}
