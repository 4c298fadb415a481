//! # mjtype-core — Constrained Unit-Value Types
//!
//! Generates runtime types from compact declarations such as
//! `unit(px,%){1,4}` and validates attribute values against them.
//!
//! ## Pipeline
//!
//! 1. [`spec`] parses the declaration into a [`TypeSpecification`]
//!    (accepted unit tokens plus a `[min,max]` value count).
//! 2. [`matcher`] compiles it into an anchored, ASCII case-insensitive
//!    [`CompiledMatcher`].
//! 3. [`constrained`] wraps the pair in a [`TypeDescriptor`], which
//!    constructs [`ConstrainedValue`]s that report validity and a
//!    diagnostic.
//!
//! [`TypeRegistry`] sits on top and shares one descriptor per distinct
//! declaration.
//!
//! ```
//! use std::sync::Arc;
//!
//! let padding = Arc::new(mjtype_core::make_type("unit(px,em){1,4}").unwrap());
//! assert!(padding.construct("10px 5px").is_valid());
//! assert!(!padding.construct("10vh").is_valid());
//! ```
//!
//! ## Crate Policy
//!
//! - No I/O. Everything here is a pure function of its inputs.
//! - Malformed declarations are errors; invalid values are not.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod constrained;
pub mod error;
pub mod matcher;
pub mod registry;
pub mod spec;

pub use constrained::{make_type, ConstrainedValue, TypeDescriptor, UNIT_TYPE_NAME};
pub use error::{MjtypeError, SpecificationError, ValidationFailure};
pub use matcher::{CompiledMatcher, MatcherSet};
pub use registry::TypeRegistry;
pub use spec::{is_unit_specification, Multiplicity, TypeSpecification, UNIT_TYPE_PREFIX};
