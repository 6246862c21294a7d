use super::error::{ConfigError, RequestError};
use super::state::RequestState;
use crate::signature::TypeSignature;
use crate::value::FieldValue;
use indexmap::IndexMap;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info};

/// How aggregated request data reaches the declared fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PopulateStrategy {
    /// Assign same-named declared fields verbatim
    #[default]
    Property,
    /// Hand the data to the configured [`Denormalizer`](super::Denormalizer)
    Serializer,
}

impl PopulateStrategy {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            PopulateStrategy::Property => "property",
            PopulateStrategy::Serializer => "serializer",
        }
    }
}

impl fmt::Display for PopulateStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PopulateStrategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "property" => Ok(PopulateStrategy::Property),
            "serializer" => Ok(PopulateStrategy::Serializer),
            other => Err(ConfigError::UnknownStrategy(other.to_string())),
        }
    }
}

impl RequestState {
    /// Fill the declared fields from the current request.
    ///
    /// 1. Every undefinable field is seeded with the undefined sentinel.
    /// 2. Route attributes, body and query are merged in that order, later
    ///    sources overwriting earlier keys; uploaded files of the configured
    ///    group are added last under the configured key.
    /// 3. The merged data is applied with `strategy`.
    /// 4. When the identity field is declared and the principal has an id,
    ///    the id overwrites whatever the client sent.
    ///
    /// `target` names the request type in logs and denormalizer errors.
    pub fn populate(&mut self, target: &str, strategy: PopulateStrategy) -> Result<(), RequestError> {
        let undefinable: Vec<&'static str> = self
            .fields
            .iter()
            .filter(|(spec, _)| spec.signature.undefinable && spec.signature != TypeSignature::MIXED)
            .map(|(spec, _)| spec.name)
            .collect();
        for name in &undefinable {
            self.fields.set(name, FieldValue::Undefined);
        }

        let ctx = self
            .deps
            .request_stack
            .current()
            .ok_or(ConfigError::NoRequest)?;
        self.headers = ctx.headers().clone();

        let mut data: IndexMap<String, FieldValue> = IndexMap::new();
        for source in [ctx.attributes(), ctx.body(), ctx.query()] {
            for (key, value) in source {
                data.insert(key.clone(), FieldValue::from_json(value.clone()));
            }
        }
        let files = ctx.files(&self.deps.config.files_group);
        if !files.is_empty() {
            data.insert(
                self.deps.config.files_key.clone(),
                FieldValue::Files(files.to_vec()),
            );
        }

        match strategy {
            PopulateStrategy::Property => {
                for (key, value) in data.iter() {
                    if self.fields.contains(key) {
                        self.fields.set(key, value.clone());
                    }
                }
            }
            PopulateStrategy::Serializer => {
                let denormalizer = self
                    .deps
                    .denormalizer
                    .as_ref()
                    .ok_or(ConfigError::MissingDenormalizer)?;
                denormalizer.denormalize(&data, target, &mut self.fields)?;
            }
        }

        let identity = self.deps.config.identity_field.as_str();
        if self.fields.contains(identity) {
            if let Some(id) = self.deps.security.user().and_then(|principal| principal.id) {
                debug!(request_type = %target, field = %identity, "Injecting principal id");
                self.fields.set(identity, id);
            }
        }

        info!(
            request_type = %target,
            strategy = %strategy,
            method = %ctx.method,
            path = %ctx.path,
            input_keys = data.len(),
            declared_fields = self.fields.len(),
            seeded_undefined = undefinable.len(),
            "Request populated"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_from_str() {
        assert_eq!("property".parse(), Ok(PopulateStrategy::Property));
        assert_eq!("serializer".parse(), Ok(PopulateStrategy::Serializer));
        assert_eq!(
            "magic".parse::<PopulateStrategy>(),
            Err(ConfigError::UnknownStrategy("magic".to_string()))
        );
    }
}
