//! # Attribute Schema Loading
//!
//! An attribute schema declares, per component, the constrained type each
//! attribute accepts:
//!
//! ```yaml
//! components:
//!   mj-section:
//!     padding: "unit(px,%){1,4}"
//!     border-radius: "unit(px,%)"
//! ```
//!
//! Every declaration is compiled once, at load time, through a shared
//! [`TypeRegistry`]; identical declarations on different attributes share a
//! descriptor. A malformed declaration aborts loading and names the
//! component and attribute that carried it.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use mjtype_core::{MjtypeError, TypeDescriptor, TypeRegistry};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error while loading an attribute schema.
#[derive(Error, Debug)]
pub enum SchemaLoadError {
    /// The schema file could not be read.
    #[error("cannot read schema '{path}': {source}")]
    Io {
        /// Path that failed to load.
        path: String,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },

    /// The schema document is not valid YAML/JSON of the expected shape.
    #[error("cannot parse schema '{origin}': {reason}")]
    Parse {
        /// File path, or `<inline>` for string input.
        origin: String,
        /// Parser diagnostic.
        reason: String,
    },

    /// An attribute declares a type that cannot be built.
    #[error("invalid type for {component}.{attribute}: {source}")]
    InvalidType {
        /// Component that declares the attribute.
        component: String,
        /// Attribute carrying the declaration.
        attribute: String,
        /// Why the declaration was rejected.
        #[source]
        source: MjtypeError,
    },
}

/// Serialized form of a schema document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaDocument {
    /// Component name → attribute name → specification string.
    #[serde(default)]
    pub components: BTreeMap<String, BTreeMap<String, String>>,
}

/// A compiled attribute schema.
#[derive(Debug, Default)]
pub struct AttributeSchema {
    pub(crate) components: BTreeMap<String, BTreeMap<String, Arc<TypeDescriptor>>>,
    registry: TypeRegistry,
}

impl AttributeSchema {
    /// Compile a parsed schema document.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaLoadError::InvalidType`] for the first attribute whose
    /// declaration cannot be built.
    pub fn from_document(document: SchemaDocument) -> Result<Self, SchemaLoadError> {
        let mut schema = Self::default();
        for (component, attributes) in document.components {
            for (attribute, spec) in attributes {
                schema.declare(&component, &attribute, &spec)?;
            }
        }
        tracing::info!(
            components = schema.components.len(),
            types = schema.registry.len(),
            "loaded attribute schema"
        );
        Ok(schema)
    }

    /// Parse and compile a YAML schema.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaLoadError::Parse`] for malformed YAML, or
    /// [`SchemaLoadError::InvalidType`] for a bad declaration.
    pub fn from_yaml_str(content: &str) -> Result<Self, SchemaLoadError> {
        let document: SchemaDocument =
            serde_yaml::from_str(content).map_err(|e| SchemaLoadError::Parse {
                origin: "<inline>".to_string(),
                reason: e.to_string(),
            })?;
        Self::from_document(document)
    }

    /// Parse and compile a JSON schema.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaLoadError::Parse`] for malformed JSON, or
    /// [`SchemaLoadError::InvalidType`] for a bad declaration.
    pub fn from_json_str(content: &str) -> Result<Self, SchemaLoadError> {
        let document: SchemaDocument =
            serde_json::from_str(content).map_err(|e| SchemaLoadError::Parse {
                origin: "<inline>".to_string(),
                reason: e.to_string(),
            })?;
        Self::from_document(document)
    }

    /// Load a schema file. `.yaml` and `.yml` files are read as YAML,
    /// anything else as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaLoadError::Io`] if the file cannot be read, otherwise
    /// the errors of [`from_yaml_str`](Self::from_yaml_str) /
    /// [`from_json_str`](Self::from_json_str) with the path as origin.
    pub fn load(path: &Path) -> Result<Self, SchemaLoadError> {
        let origin = path.display().to_string();
        let content = std::fs::read_to_string(path).map_err(|source| SchemaLoadError::Io {
            path: origin.clone(),
            source,
        })?;

        let is_yaml = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"));

        let result = if is_yaml {
            Self::from_yaml_str(&content)
        } else {
            Self::from_json_str(&content)
        };

        result.map_err(|e| match e {
            SchemaLoadError::Parse { reason, .. } => SchemaLoadError::Parse { origin, reason },
            other => other,
        })
    }

    /// Declare (or redeclare) the type of one attribute.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaLoadError::InvalidType`] if `spec` cannot be built.
    pub fn declare(
        &mut self,
        component: &str,
        attribute: &str,
        spec: &str,
    ) -> Result<(), SchemaLoadError> {
        let descriptor =
            self.registry
                .resolve(spec)
                .map_err(|source| SchemaLoadError::InvalidType {
                    component: component.to_string(),
                    attribute: attribute.to_string(),
                    source,
                })?;
        self.components
            .entry(component.to_string())
            .or_default()
            .insert(attribute.to_string(), descriptor);
        Ok(())
    }

    /// Names of all declared components, sorted.
    pub fn component_names(&self) -> Vec<&str> {
        self.components.keys().map(String::as_str).collect()
    }

    /// The type of `component.attribute`, if declared.
    pub fn attribute_type(&self, component: &str, attribute: &str) -> Option<&Arc<TypeDescriptor>> {
        self.components.get(component)?.get(attribute)
    }

    /// Number of distinct compiled types backing the schema.
    pub fn type_count(&self) -> usize {
        self.registry.len()
    }
}
