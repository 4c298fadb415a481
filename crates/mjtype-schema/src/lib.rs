//! # mjtype-schema — Attribute Schemas
//!
//! Binds markup components to the constrained types their attributes
//! accept, and validates author-supplied attributes against them.
//!
//! ## Loading (`schema`)
//!
//! [`AttributeSchema::load`] reads a YAML or JSON document mapping
//! `component → attribute → specification string`, compiling each
//! declaration once through a shared type registry.
//!
//! ## Validation (`validate`)
//!
//! [`AttributeSchema::validate`] checks every attribute of one component in
//! a single pass and returns all violations together.
//!
//! ## Crate Policy
//!
//! - Depends only on `mjtype-core` internally.
//! - A malformed declaration is a load error; an invalid value is a
//!   violation, never a panic.

pub mod schema;
pub mod validate;

pub use schema::{AttributeSchema, SchemaDocument, SchemaLoadError};
pub use validate::{AttributeValidationError, ValidationViolations, Violation, ViolationKind};
