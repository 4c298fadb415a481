//! # Type Registry
//!
//! Resolves a specification string to its compiled type. The registry
//! recognises the type family through [`is_unit_specification`] and caches
//! descriptors by specification string, so a schema that declares
//! `unit(px,%){1,4}` on twenty attributes compiles one matcher.

use std::collections::HashMap;
use std::sync::Arc;

use crate::constrained::{make_type, TypeDescriptor};
use crate::error::MjtypeError;
use crate::spec::is_unit_specification;

/// Cache of compiled types keyed by specification string.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    types: HashMap<String, Arc<TypeDescriptor>>,
}

impl TypeRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve `spec` to a shared descriptor, compiling it on first use.
    ///
    /// # Errors
    ///
    /// - [`MjtypeError::UnknownTypeFamily`] if no family recognises `spec`.
    /// - [`MjtypeError::Specification`] if `spec` is malformed.
    pub fn resolve(&mut self, spec: &str) -> Result<Arc<TypeDescriptor>, MjtypeError> {
        if let Some(descriptor) = self.types.get(spec) {
            tracing::debug!(spec, "type registry cache hit");
            return Ok(Arc::clone(descriptor));
        }

        if !is_unit_specification(spec) {
            return Err(MjtypeError::UnknownTypeFamily(spec.to_string()));
        }

        let descriptor = Arc::new(make_type(spec)?);
        self.types.insert(spec.to_string(), Arc::clone(&descriptor));
        Ok(descriptor)
    }

    /// Look up an already-compiled descriptor.
    pub fn get(&self, spec: &str) -> Option<&Arc<TypeDescriptor>> {
        self.types.get(spec)
    }

    /// Number of distinct compiled types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns true if nothing has been compiled yet.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
