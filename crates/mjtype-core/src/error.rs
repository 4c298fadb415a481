//! # Error Types — Configuration vs. Validation
//!
//! Defines the error types used by the type generator. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - A malformed specification string is a schema-authoring mistake. It
//!   aborts type construction through [`SpecificationError`].
//! - An invalid attribute value is not an error. It is reported through
//!   `ConstrainedValue::is_valid()`, and only becomes a
//!   [`ValidationFailure`] when the caller explicitly asks for one.

use thiserror::Error;

/// Top-level error type for the type generator.
#[derive(Error, Debug)]
pub enum MjtypeError {
    /// The specification string is malformed.
    #[error("malformed specification: {0}")]
    Specification(#[from] SpecificationError),

    /// No registered type family recognises the specification string.
    #[error("unknown type family for specification {0:?}")]
    UnknownTypeFamily(String),
}

/// A specification string that cannot produce a type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpecificationError {
    /// The `(...)` unit-list group is missing or empty.
    #[error("specification {spec:?} has no unit list; expected `unit(<token>[,<token>...])`")]
    MissingUnitList {
        /// The offending specification string.
        spec: String,
    },

    /// A unit token is empty after trimming (e.g. `unit(px,)`).
    #[error("specification {spec:?} contains an empty unit token")]
    EmptyUnitToken {
        /// The offending specification string.
        spec: String,
    },

    /// A unit token contains a grouping delimiter, which would make the
    /// canonical form ambiguous.
    #[error("specification {spec:?} has unit token {token:?} containing reserved character {character:?}")]
    ReservedCharacter {
        /// The offending specification string.
        spec: String,
        /// The trimmed token.
        token: String,
        /// The delimiter found in the token.
        character: char,
    },

    /// The `{...}` group is not one or two comma-separated integers.
    #[error("specification {spec:?} has an invalid multiplicity {{{raw}}}: {reason}")]
    InvalidMultiplicity {
        /// The offending specification string.
        spec: String,
        /// Raw contents of the brace group.
        raw: String,
        /// Why the group was rejected.
        reason: String,
    },

    /// The multiplicity lower bound is zero.
    #[error("specification {spec:?} allows zero members; the minimum must be at least 1")]
    ZeroMinimum {
        /// The offending specification string.
        spec: String,
    },

    /// The multiplicity lower bound exceeds the upper bound.
    #[error("specification {spec:?} has inverted bounds {min} > {max}")]
    InvertedBounds {
        /// The offending specification string.
        spec: String,
        /// Declared lower bound.
        min: u32,
        /// Declared upper bound.
        max: u32,
    },

    /// The pattern engine refused the generated pattern.
    #[error("specification {spec:?} could not be compiled: {reason}")]
    Compile {
        /// The offending specification string.
        spec: String,
        /// Engine diagnostic.
        reason: String,
    },
}

/// A value rejected by a constrained type, materialised on request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ValidationFailure {
    /// The rejected raw value.
    pub value: String,
    /// The formatted diagnostic.
    pub message: String,
}
