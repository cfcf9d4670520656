//! Code validators, option resolution, and the validator registry.
//!
//! Validation is two-phase. Raw options are first resolved against the validator's
//! typed options struct (its `Default` holds the declared defaults), then the resolved
//! validator is applied to candidate codes as a pure predicate.

use std::collections::HashMap;
use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{GenerationError, GenerationResult};
use crate::service::rules::{CompositionValidator, DenylistValidator, RepetitionValidator};

/// Caller-supplied validator options, before resolution.
pub type RawOptions = Map<String, Value>;

/// Code validation strategy.
pub trait CodeValidator: Send + Sync + 'static {
    /// Typed options; `Default` provides the declared defaults.
    type Options: Serialize + DeserializeOwned + Default + Send + Sync + 'static;

    /// Check constraints the options type cannot express (ranges, combinations).
    ///
    /// # Errors
    ///
    /// Returns a message describing the violated constraint.
    fn check_options(&self, _options: &Self::Options) -> Result<(), String> {
        Ok(())
    }

    /// Accept or reject a code. Must be pure and deterministic.
    fn validate(&self, code: &str, options: &Self::Options) -> bool;
}

/// Merge raw options over the defaults of `O`.
///
/// Keys absent from `raw` keep their default; keys unknown to `O` and values of the
/// wrong shape are rejected.
///
/// # Errors
///
/// Returns a message naming the unknown key or the shape violation.
pub fn resolve_options<O>(raw: &RawOptions) -> Result<O, String>
where
    O: Serialize + DeserializeOwned + Default,
{
    let Value::Object(mut merged) =
        serde_json::to_value(O::default()).map_err(|e| e.to_string())?
    else {
        return Err("options must serialize to a map".to_string());
    };

    for (key, value) in raw {
        let Some(slot) = merged.get_mut(key) else {
            let mut known: Vec<&str> = merged.keys().map(String::as_str).collect();
            known.sort_unstable();
            return Err(format!(
                "unknown option `{key}` (expected one of: {})",
                known.join(", ")
            ));
        };
        slot.clone_from(value);
    }

    serde_json::from_value(Value::Object(merged)).map_err(|e| e.to_string())
}

/// A validator bound to its resolved options.
pub struct ResolvedValidator {
    alias: String,
    options: Value,
    check: Box<dyn Fn(&str) -> bool + Send + Sync>,
}

impl ResolvedValidator {
    /// Validator alias.
    #[must_use]
    pub fn alias(&self) -> &str {
        &self.alias
    }

    /// Resolved options, defaults included.
    #[must_use]
    pub const fn options(&self) -> &Value {
        &self.options
    }

    /// Apply the validator to a code.
    #[must_use]
    pub fn validate(&self, code: &str) -> bool {
        (self.check)(code)
    }
}

impl std::fmt::Debug for ResolvedValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedValidator")
            .field("alias", &self.alias)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// Object-safe view of a `CodeValidator`, as stored in the registry.
pub trait DynCodeValidator: Send + Sync {
    /// Declared default options.
    fn default_options(&self) -> Value;

    /// Resolve raw options and bind them to this validator.
    ///
    /// # Errors
    ///
    /// Returns `GenerationError::InvalidOptions` if resolution fails.
    fn resolve(
        self: Arc<Self>,
        alias: &str,
        raw: &RawOptions,
    ) -> GenerationResult<ResolvedValidator>;
}

impl<V: CodeValidator> DynCodeValidator for V {
    fn default_options(&self) -> Value {
        serde_json::to_value(V::Options::default()).unwrap_or(Value::Null)
    }

    fn resolve(
        self: Arc<Self>,
        alias: &str,
        raw: &RawOptions,
    ) -> GenerationResult<ResolvedValidator> {
        let invalid = |reason: String| GenerationError::InvalidOptions {
            alias: alias.to_string(),
            reason,
        };

        let options: V::Options = resolve_options(raw).map_err(invalid)?;
        self.check_options(&options).map_err(invalid)?;
        let resolved = serde_json::to_value(&options).map_err(|e| invalid(e.to_string()))?;

        Ok(ResolvedValidator {
            alias: alias.to_string(),
            options: resolved,
            check: Box::new(move |code: &str| self.validate(code, &options)),
        })
    }
}

/// Registry of validators by alias.
#[derive(Default)]
pub struct ValidatorRegistry {
    validators: RwLock<HashMap<String, Arc<dyn DynCodeValidator>>>,
}

impl ValidatorRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the `denylist`, `repetition`, and `composition`
    /// validators.
    #[must_use]
    pub fn with_defaults() -> Self {
        let registry = Self::new();
        registry.register("denylist", DenylistValidator);
        registry.register("repetition", RepetitionValidator);
        registry.register("composition", CompositionValidator);
        registry
    }

    /// Register a validator, replacing any validator under the same alias.
    pub fn register(&self, alias: impl Into<String>, validator: impl CodeValidator) {
        let alias = alias.into();
        debug!(%alias, "Registering code validator");
        self.validators.write().insert(alias, Arc::new(validator));
    }

    /// Look up a validator.
    #[must_use]
    pub fn get(&self, alias: &str) -> Option<Arc<dyn DynCodeValidator>> {
        self.validators.read().get(alias).cloned()
    }

    /// Registered aliases, sorted.
    #[must_use]
    pub fn aliases(&self) -> Vec<String> {
        let mut aliases: Vec<String> = self.validators.read().keys().cloned().collect();
        aliases.sort();
        aliases
    }

    /// Declared default options of a validator.
    #[must_use]
    pub fn default_options(&self, alias: &str) -> Option<Value> {
        self.get(alias).map(|validator| validator.default_options())
    }

    /// Resolve one validator's options.
    ///
    /// # Errors
    ///
    /// Returns `UnknownValidator` for an unregistered alias and `InvalidOptions` when
    /// resolution fails.
    pub fn resolve(&self, alias: &str, raw: &RawOptions) -> GenerationResult<ResolvedValidator> {
        self.get(alias)
            .ok_or_else(|| GenerationError::UnknownValidator(alias.to_string()))?
            .resolve(alias, raw)
    }

    /// Resolve every validator, keeping the caller's order.
    ///
    /// # Errors
    ///
    /// Fails on the first unknown alias or invalid options.
    pub fn resolve_all(
        &self,
        requested: &IndexMap<String, RawOptions>,
    ) -> GenerationResult<Vec<ResolvedValidator>> {
        requested
            .iter()
            .map(|(alias, raw)| self.resolve(alias, raw))
            .collect()
    }
}

impl std::fmt::Debug for ValidatorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidatorRegistry")
            .field("aliases", &self.aliases())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    use super::*;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct LengthOptions {
        min: usize,
        max: usize,
        label: String,
    }

    impl Default for LengthOptions {
        fn default() -> Self {
            Self {
                min: 1,
                max: 16,
                label: "length".to_string(),
            }
        }
    }

    struct LengthValidator;

    impl CodeValidator for LengthValidator {
        type Options = LengthOptions;

        fn check_options(&self, options: &LengthOptions) -> Result<(), String> {
            if options.min > options.max {
                return Err("min cannot be greater than max".to_string());
            }
            Ok(())
        }

        fn validate(&self, code: &str, options: &LengthOptions) -> bool {
            (options.min..=options.max).contains(&code.len())
        }
    }

    fn raw(value: Value) -> RawOptions {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    #[test]
    fn test_resolve_fills_defaults() {
        let options: LengthOptions = resolve_options(&raw(json!({"max": 4}))).unwrap();
        assert_eq!(
            options,
            LengthOptions {
                min: 1,
                max: 4,
                label: "length".to_string(),
            }
        );
    }

    #[test]
    fn test_resolve_rejects_unknown_key() {
        let err = resolve_options::<LengthOptions>(&raw(json!({"maximum": 4}))).unwrap_err();
        assert!(err.contains("maximum"));
        assert!(err.contains("label, max, min"));
    }

    #[test]
    fn test_resolve_rejects_bad_shape() {
        assert!(resolve_options::<LengthOptions>(&raw(json!({"max": "four"}))).is_err());
    }

    #[test]
    fn test_registry_resolution() {
        let registry = ValidatorRegistry::new();
        registry.register("length", LengthValidator);

        let resolved = registry.resolve("length", &raw(json!({"min": 3}))).unwrap();
        assert_eq!(resolved.alias(), "length");
        assert_eq!(
            resolved.options(),
            &json!({"min": 3, "max": 16, "label": "length"})
        );
        assert!(resolved.validate("ABC"));
        assert!(!resolved.validate("AB"));
    }

    #[test]
    fn test_registry_errors() {
        let registry = ValidatorRegistry::new();
        registry.register("length", LengthValidator);

        assert_eq!(
            registry.resolve("nope", &RawOptions::new()).unwrap_err(),
            GenerationError::UnknownValidator("nope".to_string())
        );
        assert!(matches!(
            registry.resolve("length", &raw(json!({"min": 9, "max": 2}))),
            Err(GenerationError::InvalidOptions { alias, .. }) if alias == "length"
        ));
    }

    #[test]
    fn test_resolve_all_keeps_order() {
        let registry = ValidatorRegistry::with_defaults();
        let mut requested = IndexMap::new();
        requested.insert("repetition".to_string(), RawOptions::new());
        requested.insert("denylist".to_string(), RawOptions::new());

        let resolved = registry.resolve_all(&requested).unwrap();
        let aliases: Vec<&str> = resolved.iter().map(ResolvedValidator::alias).collect();
        assert_eq!(aliases, vec!["repetition", "denylist"]);
    }

    #[test]
    fn test_default_validators_registered() {
        let registry = ValidatorRegistry::with_defaults();
        assert_eq!(
            registry.aliases(),
            vec!["composition", "denylist", "repetition"]
        );
        assert_eq!(
            registry.default_options("repetition"),
            Some(json!({"max_consecutive": 2}))
        );
    }
}
