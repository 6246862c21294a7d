use super::api::ApiResponse;
use super::render::ResultRestRenderer;
use crate::content_type::{is_json, HeadersAware};
use crate::request::RequestError;
use crate::validation::ViolationList;
use serde_json::{json, Map, Value};
use tracing::debug;

pub const VALIDATION_FAILED: &str = "validation_failed";

/// 422 envelope listing every violation as `{property, value, message}`.
#[must_use]
pub fn validation_failed(violations: &ViolationList) -> ApiResponse {
    let errors: Vec<Value> = violations
        .iter()
        .map(|v| {
            json!({
                "property": v.property_path,
                "value": v.invalid_value,
                "message": v.message,
            })
        })
        .collect();
    let mut extra = Map::new();
    extra.insert("errors".to_string(), Value::Array(errors));
    ApiResponse::json(
        422,
        ResultRestRenderer::render_mandatory(Some(VALIDATION_FAILED), 422, None, extra),
    )
}

#[must_use]
pub fn access_denied(message: &str) -> ApiResponse {
    ApiResponse::error(403, message)
}

/// Translate a request failure into its JSON response.
///
/// - validation failures always become 422
/// - access denial becomes 403, but only for requests whose body is declared
///   as `application/json`; other requests get `None` and fall through to
///   the host framework's own handling
/// - malformed input and denormalization failures become 400
/// - configuration errors are left to the caller (`None`)
#[must_use]
pub fn error_response(error: &RequestError, request: &impl HeadersAware) -> Option<ApiResponse> {
    let response = match error {
        RequestError::ValidationFailed(violations) => validation_failed(violations),
        RequestError::AccessDenied => {
            if !is_json(request) {
                debug!("Access denied on non-JSON request, not translating");
                return None;
            }
            access_denied(&error.to_string())
        }
        RequestError::Malformed(_) | RequestError::Denormalization(_) => {
            ApiResponse::error(error.status().as_u16(), &error.to_string())
        }
        RequestError::Config(_) => return None,
    };
    Some(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{ConfigError, MalformedRequest, RequestContext};
    use crate::validation::Violation;
    use http::Method;
    use pretty_assertions::assert_eq;

    fn json_request() -> RequestContext {
        RequestContext::new(Method::POST, "/").with_header("Content-Type", "application/json")
    }

    #[test]
    fn test_validation_failure_body() {
        let violations: ViolationList = vec![
            Violation::new("name", "", "Name is required"),
            Violation::new("user.address.street", "value", "Error"),
            Violation::new("age", -5, "Age must be positive"),
        ]
        .into();
        let response = validation_failed(&violations);
        assert_eq!(response.status, 422);
        assert_eq!(
            response.json_body(),
            Some(&json!({
                "errors": [
                    {"property": "name", "value": "", "message": "Name is required"},
                    {"property": "user.address.street", "value": "value", "message": "Error"},
                    {"property": "age", "value": -5, "message": "Age must be positive"},
                ],
                "message": "validation_failed",
                "code": 422,
                "errorCode": null,
            }))
        );
    }

    #[test]
    fn test_empty_violation_list() {
        let response = validation_failed(&ViolationList::new());
        assert_eq!(response.json_body().unwrap()["errors"], json!([]));
    }

    #[test]
    fn test_access_denied_only_for_json() {
        let response = error_response(&RequestError::AccessDenied, &json_request()).unwrap();
        assert_eq!(response.status, 403);
        assert_eq!(response.json_body().unwrap()["message"], "Access Denied.");
        assert_eq!(response.json_body().unwrap()["code"], 403);

        for content_type in ["text/html", "application/xml"] {
            let request = RequestContext::new(Method::GET, "/").with_header("Content-Type", content_type);
            assert!(error_response(&RequestError::AccessDenied, &request).is_none());
        }
    }

    #[test]
    fn test_malformed_is_bad_request() {
        let error = RequestError::from(MalformedRequest::NotSet {
            field: "title".to_string(),
        });
        let response = error_response(&error, &RequestContext::new(Method::GET, "/")).unwrap();
        assert_eq!(response.status, 400);
        assert_eq!(
            response.json_body().unwrap()["message"],
            "Property \"title\" is not set"
        );
    }

    #[test]
    fn test_config_errors_are_not_translated() {
        let error = RequestError::from(ConfigError::NoRequest);
        assert!(error_response(&error, &json_request()).is_none());
    }
}
