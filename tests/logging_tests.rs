#[macro_use]
mod common;

use common::builders::deps;
use http::Method;
use usecase_http::config::Config;
use usecase_http::logging::{self, LogFormat};
use usecase_http::request::{FieldSpec, RequestContext, ValidatedRequest};
use usecase_http::undefined::Patch;

plain_request!(Ping, [FieldSpec::of::<Patch<String>>("echo")]);

// Single test: the global subscriber can only be installed once per process.
#[test]
fn test_init_installs_subscriber_once() {
    let mut config = Config::from_yaml_str("logging:\n  level: debug\n  format: pretty\n")
        .unwrap()
        .logging;
    config.non_blocking = true;
    config.targets = Some("usecase_http::request=trace".to_string());
    assert_eq!(config.format, LogFormat::Pretty);

    let guard = logging::init(&config).unwrap();
    assert!(guard.is_some());

    // Population events now go through the installed subscriber.
    let ctx = RequestContext::new(Method::GET, "/ping").with_query_string("echo=hi");
    assert!(Ping::build(&deps(ctx)).is_ok());

    let err = logging::init(&config).unwrap_err();
    assert_eq!(err.to_string(), "Failed to initialize logging");
    drop(guard);
}
