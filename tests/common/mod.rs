#![allow(dead_code)]

pub mod fakes {
    use parking_lot::Mutex;
    use serde_json::Value;
    use usecase_http::request::FieldSet;
    use usecase_http::security::{Principal, Security};
    use usecase_http::validation::{Rules, Validator, Violation, ViolationList};

    /// Security double with a fixed principal and a fixed grant decision.
    /// Records every attribute it was asked about.
    pub struct FakeSecurity {
        pub principal: Option<Principal>,
        pub grant: bool,
        pub asked: Mutex<Vec<String>>,
    }

    impl FakeSecurity {
        pub fn granting(principal: Option<Principal>) -> Self {
            Self {
                principal,
                grant: true,
                asked: Mutex::new(Vec::new()),
            }
        }

        pub fn denying() -> Self {
            Self {
                principal: None,
                grant: false,
                asked: Mutex::new(Vec::new()),
            }
        }
    }

    impl Security for FakeSecurity {
        fn user(&self) -> Option<Principal> {
            self.principal.clone()
        }

        fn is_granted(&self, attribute: &str, _subject: Option<&Value>) -> bool {
            self.asked.lock().push(attribute.to_string());
            self.grant
        }
    }

    /// Validator double reporting one violation per listed field, regardless
    /// of the rules it is given.
    #[derive(Default)]
    pub struct FakeValidator {
        pub failing_fields: Vec<&'static str>,
    }

    impl FakeValidator {
        pub fn failing(fields: &[&'static str]) -> Self {
            Self {
                failing_fields: fields.to_vec(),
            }
        }
    }

    impl Validator for FakeValidator {
        fn validate(&self, fields: &FieldSet, _rules: &Rules) -> ViolationList {
            self.failing_fields
                .iter()
                .map(|name| {
                    let value = fields
                        .get(name)
                        .and_then(|v| v.to_json())
                        .unwrap_or(Value::Null);
                    Violation::new(*name, value, "This value is not valid.")
                })
                .collect()
        }
    }
}

pub mod builders {
    use super::fakes::{FakeSecurity, FakeValidator};
    use std::sync::Arc;
    use usecase_http::request::{RequestContext, RequestDependencies, RequestStack};
    use usecase_http::security::{Principal, Security};
    use usecase_http::validation::{ConstraintValidator, Validator};

    pub fn deps_with(
        ctx: RequestContext,
        validator: Arc<dyn Validator>,
        security: Arc<dyn Security>,
    ) -> RequestDependencies {
        RequestDependencies::new(validator, RequestStack::with_request(ctx), security)
    }

    /// Real constraint validator, anonymous principal, everything granted.
    pub fn deps(ctx: RequestContext) -> RequestDependencies {
        deps_with(
            ctx,
            Arc::new(ConstraintValidator),
            Arc::new(FakeSecurity::granting(None)),
        )
    }

    pub fn deps_as(ctx: RequestContext, principal: Principal) -> RequestDependencies {
        deps_with(
            ctx,
            Arc::new(ConstraintValidator),
            Arc::new(FakeSecurity::granting(Some(principal))),
        )
    }

    pub fn deps_failing_validation(ctx: RequestContext, fields: &[&'static str]) -> RequestDependencies {
        deps_with(
            ctx,
            Arc::new(FakeValidator::failing(fields)),
            Arc::new(FakeSecurity::granting(None)),
        )
    }
}

/// Declares a request type that only wraps its `RequestState`. Import with
/// `#[macro_use] mod common;`.
///
/// ```ignore
/// plain_request!(CreateNote, [FieldSpec::of::<String>("title")]);
/// ```
macro_rules! plain_request {
    ($name:ident, [$($spec:expr),* $(,)?]) => {
        pub struct $name(pub usecase_http::request::RequestState);

        impl usecase_http::request::ValidatedRequest for $name {
            const FIELDS: &'static [usecase_http::request::FieldSpec] = &[$($spec),*];

            fn from_state(state: usecase_http::request::RequestState) -> Self {
                Self(state)
            }

            fn state(&self) -> &usecase_http::request::RequestState {
                &self.0
            }

            fn state_mut(&mut self) -> &mut usecase_http::request::RequestState {
                &mut self.0
            }
        }
    };
}
