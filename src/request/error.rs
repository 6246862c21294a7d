use crate::request::dependencies::DenormalizeError;
use crate::validation::ViolationList;
use http::StatusCode;

/// Programmer errors in how a request type or its dependencies are set up.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Unknown populate strategy \"{0}\"")]
    UnknownStrategy(String),
    #[error("A denormalizer is required for the serializer populate strategy")]
    MissingDenormalizer,
    #[error("No current request to populate from")]
    NoRequest,
    #[error("\"{0}\" field is required")]
    MissingIdentityField(String),
}

/// A field read that the request data cannot satisfy.
///
/// Every variant names the offending field and maps to `400 Bad Request`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MalformedRequest {
    #[error("Property \"{field}\" does not exist")]
    NotExist { field: String },
    #[error("Property \"{field}\" is null")]
    Null { field: String },
    #[error("Property \"{field}\" is undefined")]
    Undefined { field: String },
    #[error("Property \"{field}\" is not set")]
    NotSet { field: String },
    #[error("Property \"{field}\" cannot be read as {expected}")]
    TypeMismatch { field: String, expected: String },
}

impl MalformedRequest {
    #[must_use]
    pub fn field(&self) -> &str {
        match self {
            MalformedRequest::NotExist { field }
            | MalformedRequest::Null { field }
            | MalformedRequest::Undefined { field }
            | MalformedRequest::NotSet { field }
            | MalformedRequest::TypeMismatch { field, .. } => field,
        }
    }

    #[must_use]
    pub fn status(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }
}

/// Why building a validated request failed.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Security check returned `false`
    #[error("Access Denied.")]
    AccessDenied,
    #[error("Validation failed with {} violation(s)", .0.len())]
    ValidationFailed(ViolationList),
    #[error(transparent)]
    Malformed(#[from] MalformedRequest),
    #[error(transparent)]
    Denormalization(#[from] DenormalizeError),
}

impl RequestError {
    /// HTTP status the error translates to at the boundary.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            RequestError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            RequestError::AccessDenied => StatusCode::FORBIDDEN,
            RequestError::ValidationFailed(_) => StatusCode::UNPROCESSABLE_ENTITY,
            RequestError::Malformed(e) => e.status(),
            RequestError::Denormalization(_) => StatusCode::BAD_REQUEST,
        }
    }

    #[must_use]
    pub fn violations(&self) -> Option<&ViolationList> {
        match self {
            RequestError::ValidationFailed(v) => Some(v),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_field() {
        let e = MalformedRequest::NotExist {
            field: "invalidProp".to_string(),
        };
        assert_eq!(e.to_string(), "Property \"invalidProp\" does not exist");
        assert_eq!(e.field(), "invalidProp");
    }

    #[test]
    fn test_status_categories() {
        assert_eq!(RequestError::AccessDenied.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            RequestError::from(ConfigError::NoRequest).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            RequestError::from(MalformedRequest::Null {
                field: "x".to_string()
            })
            .status(),
            StatusCode::BAD_REQUEST
        );
    }
}
