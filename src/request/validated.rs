use super::dependencies::RequestDependencies;
use super::error::RequestError;
use super::fields::FieldSpec;
use super::populate::PopulateStrategy;
use super::state::RequestState;
use crate::validation::Rules;
use tracing::warn;

/// A request DTO that builds itself from the current HTTP request.
///
/// Implementors declare their fields, keep the [`RequestState`] they are
/// handed, and expose typed getters that read through the guarded path.
/// Building runs population, then [`security_check`](Self::security_check),
/// then validation, and stops at the first failure.
///
/// ```rust
/// use usecase_http::request::{FieldSpec, RequestState, ValidatedRequest, MalformedRequest};
/// use usecase_http::undefined::Patch;
/// use usecase_http::validation::{Email, NotBlank, PatchValidation, Rules};
///
/// struct UpdateProfile(RequestState);
///
/// impl ValidatedRequest for UpdateProfile {
///     const FIELDS: &'static [FieldSpec] = &[
///         FieldSpec::of::<Patch<String>>("email"),
///         FieldSpec::of::<Option<String>>("userId").default_null(),
///     ];
///
///     fn from_state(state: RequestState) -> Self {
///         Self(state)
///     }
///
///     fn state(&self) -> &RequestState {
///         &self.0
///     }
///
///     fn state_mut(&mut self) -> &mut RequestState {
///         &mut self.0
///     }
///
///     fn security_check(&self) -> bool {
///         self.0.is_granted("ROLE_USER", None)
///     }
///
///     fn rules() -> Rules {
///         Rules::new().field("email", PatchValidation::new().with(NotBlank::new()).with(Email))
///     }
/// }
///
/// impl UpdateProfile {
///     pub fn email(&self) -> Result<Patch<String>, MalformedRequest> {
///         self.0.get("email")
///     }
/// }
/// ```
pub trait ValidatedRequest: Sized {
    /// Declared public fields, in declaration order
    const FIELDS: &'static [FieldSpec];

    fn from_state(state: RequestState) -> Self;

    fn state(&self) -> &RequestState;

    fn state_mut(&mut self) -> &mut RequestState;

    fn populate_strategy() -> PopulateStrategy {
        PopulateStrategy::Property
    }

    /// Authorization predicate; `false` aborts the build with
    /// [`RequestError::AccessDenied`].
    fn security_check(&self) -> bool {
        true
    }

    /// Whether [`build`](Self::build) validates automatically.
    fn auto_validate(&self) -> bool {
        true
    }

    fn rules() -> Rules {
        Rules::new()
    }

    /// Populate, authorize and validate a new instance from the current
    /// request of `deps`.
    fn build(deps: &RequestDependencies) -> Result<Self, RequestError> {
        let target = std::any::type_name::<Self>();
        let mut state = RequestState::new(Self::FIELDS, deps.clone());
        state.populate(target, Self::populate_strategy())?;

        let request = Self::from_state(state);
        if !request.security_check() {
            warn!(request_type = %target, "Security check denied request");
            return Err(RequestError::AccessDenied);
        }
        if request.auto_validate() {
            request.validate()?;
        }
        Ok(request)
    }

    /// Validate the current field values against [`rules`](Self::rules).
    fn validate(&self) -> Result<(), RequestError> {
        self.state().validate(&Self::rules())
    }
}
