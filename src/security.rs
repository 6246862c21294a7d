//! # Security Module
//!
//! Request types never authenticate anyone themselves. They consume an
//! identity accessor through the [`Security`] trait: who the current principal
//! is, and whether that principal is granted an attribute.
//!
//! [`RoleSecurity`] is the stock implementation for applications that resolve
//! the principal before the request type is built (for example from a
//! validated bearer token) and grant purely by role membership.
//!
//! ```rust
//! use usecase_http::security::{Principal, RoleSecurity, Security};
//!
//! let security = RoleSecurity::new(
//!     Principal::new("ada@example.com").with_id(7).with_role("ROLE_ADMIN"),
//! );
//! assert!(security.is_granted("ROLE_ADMIN", None));
//! assert!(!security.is_granted("ROLE_SUPER", None));
//! ```

use crate::value::FieldValue;
use serde_json::Value;

/// The authenticated user as seen by request types.
#[derive(Debug, Clone, PartialEq)]
pub struct Principal {
    /// Login name, e-mail or any other unique handle
    pub identifier: String,
    /// Application identifier injected into the identity field; principals
    /// without one never trigger identity injection
    pub id: Option<FieldValue>,
    pub roles: Vec<String>,
}

impl Principal {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            id: None,
            roles: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<FieldValue>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.roles.push(role.into());
        self
    }

    #[inline]
    #[must_use]
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}

/// Identity accessor consumed by request types.
pub trait Security: Send + Sync {
    /// The authenticated principal, if any.
    fn user(&self) -> Option<Principal>;

    /// Whether the current principal is granted `attribute`, optionally on
    /// `subject`.
    ///
    /// One attribute per call. Callers needing several combine the answers
    /// themselves, e.g. `["ROLE_A", "ROLE_B"].iter().all(|a| s.is_granted(a, None))`.
    fn is_granted(&self, attribute: &str, subject: Option<&Value>) -> bool;
}

/// Grants an attribute when the principal carries a role of the same name.
#[derive(Debug, Clone, Default)]
pub struct RoleSecurity {
    principal: Option<Principal>,
}

impl RoleSecurity {
    #[must_use]
    pub fn new(principal: Principal) -> Self {
        Self {
            principal: Some(principal),
        }
    }

    /// No principal: nothing is granted and no identity is injected.
    #[must_use]
    pub fn anonymous() -> Self {
        Self { principal: None }
    }
}

impl Security for RoleSecurity {
    fn user(&self) -> Option<Principal> {
        self.principal.clone()
    }

    fn is_granted(&self, attribute: &str, _subject: Option<&Value>) -> bool {
        self.principal
            .as_ref()
            .is_some_and(|principal| principal.has_role(attribute))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anonymous_grants_nothing() {
        let security = RoleSecurity::anonymous();
        assert!(security.user().is_none());
        assert!(!security.is_granted("ROLE_USER", None));
    }

    #[test]
    fn test_one_attribute_per_call() {
        let security = RoleSecurity::new(
            Principal::new("ada").with_role("ROLE_A").with_role("ROLE_B"),
        );
        assert!(["ROLE_A", "ROLE_B"].iter().all(|a| security.is_granted(a, None)));
        assert!(!security.is_granted("ROLE_A,ROLE_B", None));
    }

    #[test]
    fn test_principal_id_is_optional() {
        let principal = Principal::new("svc-account");
        assert!(principal.id.is_none());
        let principal = principal.with_id("abc-123");
        assert_eq!(principal.id, Some(FieldValue::from("abc-123")));
    }
}
