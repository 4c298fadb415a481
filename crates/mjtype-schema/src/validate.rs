//! # Attribute Validation
//!
//! Validates one component's attributes against an [`AttributeSchema`] in a
//! single pass. Every attribute is checked; the failure, if any, carries all
//! violations so an author sees every problem at once.

use std::collections::HashSet;
use std::fmt;

use thiserror::Error;

use crate::schema::AttributeSchema;

/// Error from validating a component's attributes.
#[derive(Error, Debug)]
pub enum AttributeValidationError {
    /// The component has no entry in the schema.
    #[error("unknown component '{0}'")]
    UnknownComponent(String),

    /// One or more attributes were rejected.
    #[error("validation failed for component '{component}':\n{violations}")]
    ValidationFailed {
        /// Component that was validated.
        component: String,
        /// Every rejected attribute.
        violations: ValidationViolations,
    },
}

/// Why an attribute was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationKind {
    /// The value does not satisfy the attribute's type.
    InvalidValue,
    /// The component does not declare the attribute.
    UnknownAttribute,
    /// The attribute was supplied more than once.
    DuplicateAttribute,
}

/// A single rejected attribute.
#[derive(Debug, Clone)]
pub struct Violation {
    /// Component carrying the attribute.
    pub component: String,
    /// Attribute name.
    pub attribute: String,
    /// Value as supplied.
    pub value: String,
    /// Why it was rejected.
    pub kind: ViolationKind,
    /// Human-readable description.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  {}.{}: {}", self.component, self.attribute, self.message)
    }
}

/// Collection of violations from one validation pass.
#[derive(Debug, Clone, Default)]
pub struct ValidationViolations {
    violations: Vec<Violation>,
}

impl ValidationViolations {
    /// Returns the number of violations.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Returns true if there are no violations.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Returns a slice of all violations.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Consumes self and returns the inner Vec.
    pub fn into_inner(self) -> Vec<Violation> {
        self.violations
    }
}

impl fmt::Display for ValidationViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

impl AttributeSchema {
    /// Validate `attributes` of `component`.
    ///
    /// Attributes are checked in iteration order; pass a `BTreeMap` for a
    /// deterministic violation order. Every occurrence of a repeated name
    /// after the first is reported as
    /// [`ViolationKind::DuplicateAttribute`] and not checked further.
    ///
    /// # Errors
    ///
    /// - [`AttributeValidationError::UnknownComponent`] if the schema does
    ///   not declare `component`.
    /// - [`AttributeValidationError::ValidationFailed`] with every violation
    ///   if any attribute is undeclared, repeated, or holds an invalid value.
    pub fn validate<I, K, V>(
        &self,
        component: &str,
        attributes: I,
    ) -> Result<(), AttributeValidationError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let declared = self
            .components
            .get(component)
            .ok_or_else(|| AttributeValidationError::UnknownComponent(component.to_string()))?;

        let mut seen = HashSet::new();
        let mut violations = Vec::new();
        for (name, value) in attributes {
            let (name, value) = (name.as_ref(), value.as_ref());
            let first = seen.insert(name.to_string());
            let violation = match declared.get(name) {
                _ if !first => Some((
                    ViolationKind::DuplicateAttribute,
                    format!("attribute '{name}' is given more than once"),
                )),
                None => Some((
                    ViolationKind::UnknownAttribute,
                    format!("attribute '{name}' is not declared for '{component}'"),
                )),
                Some(descriptor) => {
                    let constrained = descriptor.construct(value);
                    (!constrained.is_valid())
                        .then(|| (ViolationKind::InvalidValue, constrained.error_message()))
                }
            };

            if let Some((kind, message)) = violation {
                tracing::debug!(component, attribute = name, value, ?kind, "attribute rejected");
                violations.push(Violation {
                    component: component.to_string(),
                    attribute: name.to_string(),
                    value: value.to_string(),
                    kind,
                    message,
                });
            }
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(AttributeValidationError::ValidationFailed {
                component: component.to_string(),
                violations: ValidationViolations { violations },
            })
        }
    }
}
