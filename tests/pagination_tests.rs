mod common;

use common::builders::deps;
use http::Method;
use serde_json::json;
use usecase_http::config::RequestConfig;
use usecase_http::pagination::{
    PaginatedCollection, Pagination, PaginationError, PaginationParams,
};
use usecase_http::request::{FieldSpec, RequestContext, RequestError, ValidatedRequest};
use usecase_http::response::{ResultRestRenderer, UseCaseResult};
use usecase_http::validation::Rules;

struct ListArticles(usecase_http::request::RequestState);

impl ValidatedRequest for ListArticles {
    const FIELDS: &'static [FieldSpec] = &[
        PaginationParams::PAGE,
        PaginationParams::PER_PAGE,
        FieldSpec::of::<Option<String>>("tag").default_null(),
    ];

    fn from_state(state: usecase_http::request::RequestState) -> Self {
        Self(state)
    }

    fn state(&self) -> &usecase_http::request::RequestState {
        &self.0
    }

    fn state_mut(&mut self) -> &mut usecase_http::request::RequestState {
        &mut self.0
    }

    fn rules() -> Rules {
        PaginationParams::rules()
    }
}

fn list(query: &str) -> RequestContext {
    RequestContext::new(Method::GET, "/articles").with_query_string(query)
}

#[test]
fn test_from_page() {
    assert_eq!(Pagination::from_page(1, 20), Ok(Pagination::new(0, Some(20))));
    assert_eq!(Pagination::from_page(3, 20), Ok(Pagination::new(40, Some(20))));
    assert_eq!(
        Pagination::from_page(0, 20),
        Err(PaginationError::InvalidPage(0))
    );
}

#[test]
fn test_absent_parameters_use_first_page_and_default_size() {
    let request = ListArticles::build(&deps(list(""))).unwrap();
    assert_eq!(request.state().pagination(), Ok(Pagination::new(0, Some(20))));
}

#[test]
fn test_query_parameters_drive_the_window() {
    let request = ListArticles::build(&deps(list("page=3&perPage=15"))).unwrap();
    assert_eq!(request.state().pagination(), Ok(Pagination::new(30, Some(15))));
}

#[test]
fn test_default_page_size_is_configurable() {
    let deps = deps(list("page=2")).with_config(RequestConfig {
        default_per_page: 50,
        ..RequestConfig::default()
    });
    let request = ListArticles::build(&deps).unwrap();
    assert_eq!(request.state().pagination(), Ok(Pagination::new(50, Some(50))));
}

#[test]
fn test_non_positive_page_fails_validation() {
    let err = ListArticles::build(&deps(list("page=0"))).err().unwrap();
    let RequestError::ValidationFailed(violations) = err else {
        panic!("expected validation failure");
    };
    assert!(violations.iter().any(|v| v.property_path == "page"));
}

#[test]
fn test_non_numeric_page_size_fails_validation() {
    let err = ListArticles::build(&deps(list("perPage=lots"))).err().unwrap();
    let violations = err.violations().unwrap();
    assert!(violations.iter().all(|v| v.property_path == "perPage"));
    assert!(!violations.is_empty());
}

#[test]
fn test_json_body_integers_are_accepted() {
    let ctx = RequestContext::new(Method::POST, "/articles/search")
        .with_json_body(json!({"page": 2, "perPage": 5}));
    let request = ListArticles::build(&deps(ctx)).unwrap();
    assert_eq!(request.state().pagination(), Ok(Pagination::new(5, Some(5))));
}

#[test]
fn test_collection_renders_with_count_and_limit() {
    let window = Pagination::from_page(2, 2).unwrap();
    let collection = PaginatedCollection::new(
        vec![json!({"id": 3}), json!({"id": 4})],
        11,
        Some(window),
    );
    let result = UseCaseResult::success().with_collection(&collection).unwrap();
    let body = ResultRestRenderer::render(&result);

    assert_eq!(body["collection"], json!([{"id": 3}, {"id": 4}]));
    assert_eq!(body["metadata"]["count"], 11);
    assert_eq!(body["metadata"]["limit"], 2);
}

#[test]
fn test_huge_page_is_an_overflow_not_a_panic() {
    let request = ListArticles::build(&deps(list("page=999999999999999999&perPage=100"))).unwrap();
    assert_eq!(request.state().pagination(), Err(PaginationError::Overflow));

    let request = ListArticles::build(&deps(list("page=1e300"))).unwrap();
    assert_eq!(request.state().pagination(), Err(PaginationError::Overflow));
}
