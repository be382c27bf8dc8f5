//! Predicate registry and the predicate-source seam.
//!
//! This module provides the [`PredicateSource`] trait that chains and lazy
//! collectors evaluate predicates through, and [`PredicateRegistry`], the
//! default implementation: a name → predicate table.

use indexmap::IndexMap;
use parking_lot::RwLock;
use std::sync::{Arc, OnceLock};

use crate::call::Invocation;
use crate::code::Code;
use crate::error::{Error, UsageError};
use crate::predicates;

/// A predicate body.
pub type PredicateFn = Arc<dyn Fn(&Invocation<'_>) -> Result<(), Error> + Send + Sync>;

/// A registered predicate: its failure code and its body.
#[derive(Clone)]
pub struct PredicateDef {
    code: Code,
    check: PredicateFn,
}

impl PredicateDef {
    pub fn new<F>(code: Code, check: F) -> Self
    where
        F: Fn(&Invocation<'_>) -> Result<(), Error> + Send + Sync + 'static,
    {
        Self {
            code,
            check: Arc::new(check),
        }
    }

    /// The code this predicate reports on failure.
    pub fn code(&self) -> Code {
        self.code
    }

    pub fn call(&self, invocation: &Invocation<'_>) -> Result<(), Error> {
        (self.check)(invocation)
    }
}

impl std::fmt::Debug for PredicateDef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PredicateDef")
            .field("code", &self.code)
            .finish_non_exhaustive()
    }
}

/// Where chains and lazy collectors look predicates up.
///
/// The `Send + Sync` bounds let one source be shared through an `Arc` by
/// every chain built from an [`Assert`](crate::Assert).
///
/// Only base names are ever passed to [`evaluate`](Self::evaluate); the
/// `null_or_`/`all_` variants are derived by the dispatcher, so every source
/// gets them for free. A source wrapping [`PredicateRegistry`] can override
/// `evaluate` to instrument or rebrand calls.
pub trait PredicateSource: Send + Sync {
    /// Every predicate name this source can evaluate.
    fn names(&self) -> Vec<String>;

    /// Whether `name` is a predicate of this source.
    fn contains(&self, name: &str) -> bool;

    /// Evaluates the predicate named by `invocation.name`.
    fn evaluate(&self, invocation: &Invocation<'_>) -> Result<(), Error>;
}

/// A thread-safe name → predicate table.
///
/// # Example
///
/// ```rust
/// use tripwire::{Code, PredicateDef, PredicateRegistry, PredicateSource};
///
/// let registry = PredicateRegistry::with_defaults();
/// assert!(registry.contains("integer"));
///
/// registry
///     .register("even", PredicateDef::new(Code::Custom(1), |call| {
///         match call.value.as_i64() {
///             Some(n) if n % 2 == 0 => Ok(()),
///             _ => Err(call.fail(Code::Custom(1), "expected an even number", &[])),
///         }
///     }))
///     .unwrap();
///
/// // Duplicate registration fails
/// assert!(registry
///     .register("even", PredicateDef::new(Code::Custom(2), |_| Ok(())))
///     .is_err());
///
/// // So does reusing a code
/// assert!(registry
///     .register("whole", PredicateDef::new(Code::InvalidInteger, |_| Ok(())))
///     .is_err());
/// ```
pub struct PredicateRegistry {
    predicates: RwLock<IndexMap<String, PredicateDef>>,
}

impl PredicateRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            predicates: RwLock::new(IndexMap::new()),
        }
    }

    /// Creates a registry holding the built-in catalog.
    pub fn with_defaults() -> Self {
        let registry = Self::new();
        {
            let mut predicates = registry.predicates.write();
            for (name, code, check) in predicates::CATALOG {
                predicates.insert(name.to_string(), PredicateDef::new(*code, *check));
            }
        }
        registry
    }

    /// Registers a predicate under `name`.
    ///
    /// # Errors
    ///
    /// - `UsageError::DuplicatePredicate` if the name is taken
    /// - `UsageError::DuplicateCode` if another predicate reports the same
    ///   code; extensions should use [`Code::Custom`]
    pub fn register(&self, name: impl Into<String>, def: PredicateDef) -> Result<(), UsageError> {
        let name = name.into();
        let mut predicates = self.predicates.write();

        if predicates.contains_key(&name) {
            return Err(UsageError::DuplicatePredicate(name));
        }
        if let Some((existing, _)) = predicates.iter().find(|(_, d)| d.code() == def.code()) {
            return Err(UsageError::DuplicateCode {
                code: def.code(),
                existing: existing.clone(),
            });
        }

        predicates.insert(name, def);
        Ok(())
    }

    /// A clone of the predicate registered under `name`.
    pub fn get(&self, name: &str) -> Option<PredicateDef> {
        self.predicates.read().get(name).cloned()
    }

    /// Every registered name with the code it reports.
    pub fn codes(&self) -> Vec<(String, Code)> {
        self.predicates
            .read()
            .iter()
            .map(|(name, def)| (name.clone(), def.code()))
            .collect()
    }

    /// Number of registered predicates.
    pub fn len(&self) -> usize {
        self.predicates.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.read().is_empty()
    }
}

impl Default for PredicateRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl PredicateSource for PredicateRegistry {
    fn names(&self) -> Vec<String> {
        self.predicates.read().keys().cloned().collect()
    }

    fn contains(&self, name: &str) -> bool {
        self.predicates.read().contains_key(name)
    }

    fn evaluate(&self, invocation: &Invocation<'_>) -> Result<(), Error> {
        // Clone out so the lock is not held while user code runs.
        let def = self
            .get(invocation.name)
            .ok_or_else(|| UsageError::UnknownAssertion(invocation.name.to_string()))?;
        tracing::trace!(assertion = invocation.name, "evaluating predicate");
        def.call(invocation)
    }
}

/// The shared, read-only registry holding the built-in catalog.
pub fn default_registry() -> Arc<PredicateRegistry> {
    static DEFAULT: OnceLock<Arc<PredicateRegistry>> = OnceLock::new();
    Arc::clone(DEFAULT.get_or_init(|| Arc::new(PredicateRegistry::with_defaults())))
}

/// [`default_registry`] as a trait object.
pub fn default_source() -> Arc<dyn PredicateSource> {
    default_registry()
}

/// Checks that `source` can stand in for the default registry.
///
/// A compatible source exposes every built-in predicate name; it may add
/// more.
///
/// # Errors
///
/// Returns `UsageError::IncompatibleSource` listing the missing names.
pub fn ensure_compatible(source: &dyn PredicateSource) -> Result<(), UsageError> {
    let missing: Vec<String> = predicates::CATALOG
        .iter()
        .map(|(name, _, _)| *name)
        .filter(|name| !source.contains(name))
        .map(str::to_string)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(UsageError::IncompatibleSource { missing })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::call::CallOptions;
    use serde_json::json;

    #[test]
    fn test_defaults_are_registered() {
        let registry = PredicateRegistry::with_defaults();
        assert_eq!(registry.len(), predicates::CATALOG.len());
        assert!(registry.contains("integer"));
        assert!(registry.contains("between"));
        assert!(!registry.contains("all_integer"));
    }

    #[test]
    fn test_register_rejects_duplicates() {
        let registry = PredicateRegistry::new();
        registry
            .register("odd", PredicateDef::new(Code::Custom(1), |_| Ok(())))
            .unwrap();

        let err = registry
            .register("odd", PredicateDef::new(Code::Custom(2), |_| Ok(())))
            .unwrap_err();
        assert_eq!(err, UsageError::DuplicatePredicate("odd".into()));
    }

    #[test]
    fn test_register_rejects_colliding_codes() {
        let registry = PredicateRegistry::with_defaults();

        let err = registry
            .register("even", PredicateDef::new(Code::InvalidNumeric, |_| Ok(())))
            .unwrap_err();
        assert_eq!(
            err,
            UsageError::DuplicateCode {
                code: Code::InvalidNumeric,
                existing: "numeric".into(),
            }
        );
        assert!(!registry.contains("even"));

        registry
            .register("even", PredicateDef::new(Code::Custom(1), |_| Ok(())))
            .unwrap();
        let err = registry
            .register("odd", PredicateDef::new(Code::Custom(1), |_| Ok(())))
            .unwrap_err();
        assert!(matches!(err, UsageError::DuplicateCode { ref existing, .. } if existing == "even"));
    }

    #[test]
    fn test_evaluate_unknown_name_is_usage_error() {
        let registry = PredicateRegistry::new();
        let value = json!(1);
        let options = CallOptions::new();
        let err = registry
            .evaluate(&Invocation::new("nope", &value, &[], &options))
            .unwrap_err();
        assert!(err.is_usage());
    }

    #[test]
    fn test_default_registry_is_shared() {
        let a = default_registry();
        let b = default_registry();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_empty_registry_is_incompatible() {
        let err = ensure_compatible(&PredicateRegistry::new()).unwrap_err();
        match err {
            UsageError::IncompatibleSource { missing } => {
                assert_eq!(missing.len(), predicates::CATALOG.len())
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_extended_registry_is_compatible() {
        let registry = PredicateRegistry::with_defaults();
        registry
            .register("extra", PredicateDef::new(Code::Custom(1), |_| Ok(())))
            .unwrap();
        assert!(ensure_compatible(&registry).is_ok());
    }
}
