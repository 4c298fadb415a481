//! # Constrained Types
//!
//! A [`TypeDescriptor`] is the runtime stand-in for a generated type: it
//! holds the specification(s) it was built from and their compiled
//! matchers, and constructs [`ConstrainedValue`]s. Descriptors are built once
//! per declared type and shared read-only (they are `Send + Sync`).
//!
//! A [`ConstrainedValue`] moves through two states: constructed, then
//! validated on the first call to [`ConstrainedValue::is_valid`]. The verdict
//! is cached in a `OnceLock` and never changes afterwards.
//!
//! Invalid values are an ordinary outcome, not an error. A caller checking
//! many attributes collects every failure rather than stopping at the first.

use std::fmt;
use std::sync::{Arc, OnceLock};

use crate::error::{SpecificationError, ValidationFailure};
use crate::matcher::{CompiledMatcher, MatcherSet};
use crate::spec::TypeSpecification;

/// Name used for the unit type family in diagnostics.
pub const UNIT_TYPE_NAME: &str = "Unit";

/// A compiled constrained type.
#[derive(Debug, Clone)]
pub struct TypeDescriptor {
    specs: Vec<TypeSpecification>,
    matchers: MatcherSet,
}

/// Build a type from a specification string.
///
/// This is the type factory: parse, compile, and wrap.
///
/// # Errors
///
/// Returns a [`SpecificationError`] if the string is malformed or the
/// matcher cannot be compiled.
pub fn make_type(spec: &str) -> Result<TypeDescriptor, SpecificationError> {
    TypeDescriptor::from_specification(TypeSpecification::parse(spec)?)
}

impl TypeDescriptor {
    /// Build a type from an already-parsed specification.
    ///
    /// # Errors
    ///
    /// Returns [`SpecificationError::Compile`] if the matcher cannot be built.
    pub fn from_specification(spec: TypeSpecification) -> Result<Self, SpecificationError> {
        let matcher = CompiledMatcher::compile(&spec)?;
        Ok(Self {
            specs: vec![spec],
            matchers: MatcherSet::single(matcher),
        })
    }

    /// Compose with another type. The result accepts a value only if both
    /// operands accept it.
    pub fn and(&self, other: &TypeDescriptor) -> TypeDescriptor {
        let mut specs = self.specs.clone();
        specs.extend(other.specs.iter().cloned());
        TypeDescriptor {
            specs,
            matchers: self.matchers.and(&other.matchers),
        }
    }

    /// Wrap `value` without checking it.
    pub fn construct(self: &Arc<Self>, value: impl Into<String>) -> ConstrainedValue {
        ConstrainedValue {
            raw: value.into(),
            descriptor: Arc::clone(self),
            verdict: OnceLock::new(),
        }
    }

    /// Whether `value` satisfies every constraint, without wrapping it.
    pub fn accepts(&self, value: &str) -> bool {
        self.matchers.accepts(value)
    }

    /// The specifications this type was built from, in composition order.
    pub fn specifications(&self) -> &[TypeSpecification] {
        &self.specs
    }

    /// The compiled matchers.
    pub fn matchers(&self) -> &MatcherSet {
        &self.matchers
    }

    /// Diagnostic for `value`.
    ///
    /// `Invalid value: 10vh for type Unit, only accepts (px, em) units and 1 to 4 members`
    pub fn error_message(&self, value: &str) -> String {
        let clauses: Vec<String> = self
            .specs
            .iter()
            .map(|spec| {
                format!(
                    "({}) units and {} members",
                    spec.units().join(", "),
                    spec.multiplicity()
                )
            })
            .collect();
        format!(
            "Invalid value: {value} for type {UNIT_TYPE_NAME}, only accepts {}",
            clauses.join(" and ")
        )
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, spec) in self.specs.iter().enumerate() {
            if i > 0 {
                f.write_str(" & ")?;
            }
            write!(f, "{spec}")?;
        }
        Ok(())
    }
}

/// A candidate value bound to its type.
#[derive(Debug)]
pub struct ConstrainedValue {
    raw: String,
    descriptor: Arc<TypeDescriptor>,
    verdict: OnceLock<bool>,
}

impl ConstrainedValue {
    /// The raw value as supplied.
    pub fn value(&self) -> &str {
        &self.raw
    }

    /// The owning type.
    pub fn descriptor(&self) -> &Arc<TypeDescriptor> {
        &self.descriptor
    }

    /// Whether the value satisfies every matcher of its type.
    ///
    /// Computed on first call and cached.
    pub fn is_valid(&self) -> bool {
        *self.verdict.get_or_init(|| {
            let valid = self.descriptor.accepts(&self.raw);
            tracing::trace!(value = %self.raw, valid, "computed constrained value verdict");
            valid
        })
    }

    /// Whether a verdict has been computed yet.
    pub fn is_validated(&self) -> bool {
        self.verdict.get().is_some()
    }

    /// Diagnostic for this value.
    pub fn error_message(&self) -> String {
        self.descriptor.error_message(&self.raw)
    }

    /// The verdict as a `Result`.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationFailure`] carrying the value and diagnostic if
    /// the value is invalid.
    pub fn check(&self) -> Result<(), ValidationFailure> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(ValidationFailure {
                value: self.raw.clone(),
                message: self.error_message(),
            })
        }
    }
}

impl Clone for ConstrainedValue {
    fn clone(&self) -> Self {
        let verdict = OnceLock::new();
        if let Some(v) = self.verdict.get() {
            let _ = verdict.set(*v);
        }
        Self {
            raw: self.raw.clone(),
            descriptor: Arc::clone(&self.descriptor),
            verdict,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(spec: &str) -> Arc<TypeDescriptor> {
        Arc::new(make_type(spec).unwrap())
    }

    #[test]
    fn test_construct_never_rejects() {
        let ty = unit("unit(px)");
        let v = ty.construct("definitely not a length");
        assert_eq!(v.value(), "definitely not a length");
        assert!(!v.is_validated());
    }

    #[test]
    fn test_validated_state_reached_on_first_check() {
        let ty = unit("unit(px)");
        let v = ty.construct("10px");
        assert!(!v.is_validated());
        assert!(v.is_valid());
        assert!(v.is_validated());
    }

    #[test]
    fn test_is_valid_is_idempotent() {
        let ty = unit("unit(px,em){1,4}");
        for raw in ["10px 5px", "10vh"] {
            let v = ty.construct(raw);
            let first = v.is_valid();
            assert_eq!(v.is_valid(), first);
            assert_eq!(v.is_valid(), first);
        }
    }

    #[test]
    fn test_error_message_format() {
        let ty = unit("unit(px,em){1,4}");
        assert_eq!(
            ty.error_message("10vh"),
            "Invalid value: 10vh for type Unit, only accepts (px, em) units and 1 to 4 members"
        );
    }

    #[test]
    fn test_error_message_exact_count() {
        let ty = unit("unit(px)");
        assert_eq!(
            ty.construct("1em").error_message(),
            "Invalid value: 1em for type Unit, only accepts (px) units and 1 members"
        );
    }

    #[test]
    fn test_check_materialises_failure() {
        let ty = unit("unit(px)");
        assert!(ty.construct("3px").check().is_ok());
        let failure = ty.construct("3em").check().unwrap_err();
        assert_eq!(failure.value, "3em");
        assert!(failure.message.contains("(px)"));
        assert_eq!(failure.to_string(), failure.message);
    }

    #[test]
    fn test_composed_type_requires_all() {
        let wide = unit("unit(px,em){1,4}");
        let narrow = unit("unit(px){1,2}");
        let both = Arc::new(wide.and(&narrow));
        assert!(both.construct("1px 2px").is_valid());
        assert!(!both.construct("1em").is_valid());
        assert!(!both.construct("1px 2px 3px").is_valid());
        assert_eq!(both.specifications().len(), 2);
        let msg = both.error_message("1em");
        assert!(msg.contains("(px, em) units and 1 to 4 members"));
        assert!(msg.contains("(px) units and 1 to 2 members"));
    }

    #[test]
    fn test_clone_keeps_verdict() {
        let ty = unit("unit(px)");
        let v = ty.construct("1px");
        assert!(v.is_valid());
        let copy = v.clone();
        assert!(copy.is_validated());
        assert!(copy.is_valid());
    }

    #[test]
    fn test_display_lists_specifications() {
        let ty = unit("unit(px)").and(&unit("unit(px,em){1,2}"));
        assert_eq!(ty.to_string(), "unit(px){1,1} & unit(px,em){1,2}");
    }

    #[test]
    fn test_shared_across_threads() {
        let ty = unit("unit(px){1,4}");
        let value = Arc::new(ty.construct("1px 2px"));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let value = Arc::clone(&value);
                std::thread::spawn(move || value.is_valid())
            })
            .collect();
        for h in handles {
            assert!(h.join().unwrap());
        }
    }
}
