//! Integration test: load the bundled `schemas/attributes.yaml` and validate
//! representative component attributes against it.

use std::collections::BTreeMap;
use std::path::PathBuf;

use mjtype_schema::{AttributeSchema, AttributeValidationError, ViolationKind};

/// Find the repository root.
fn repo_root() -> PathBuf {
    let mut dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    dir.pop(); // crates/
    dir.pop(); // repo root
    dir
}

fn bundled_schema() -> AttributeSchema {
    AttributeSchema::load(&repo_root().join("schemas").join("attributes.yaml"))
        .expect("bundled schema should load")
}

#[test]
fn test_bundled_schema_loads() {
    let schema = bundled_schema();
    let components = schema.component_names();
    assert!(components.contains(&"mj-section"));
    assert!(components.contains(&"mj-spacer"));
    // Shared declarations compile once.
    assert!(schema.type_count() < 10, "found {} types", schema.type_count());
}

#[test]
fn test_section_shorthand_padding() {
    let schema = bundled_schema();
    for padding in ["0px", "10px 25px", "10px 5% 2px", "1px 2px 3px 4px"] {
        assert!(
            schema.validate("mj-section", [("padding", padding)]).is_ok(),
            "{padding} should be accepted"
        );
    }
}

#[test]
fn test_every_failure_reported_in_one_pass() {
    let schema = bundled_schema();
    let attrs = BTreeMap::from([
        ("font-size", "12pt"),
        ("letter-spacing", "2PX"),
        ("line-height", "1.5"),
        ("padding", "1px 2px 3px 4px 5px"),
        ("text-shadow", "none"),
    ]);

    let err = schema.validate("mj-text", attrs).unwrap_err();
    let AttributeValidationError::ValidationFailed { violations, .. } = err else {
        panic!("expected ValidationFailed");
    };

    let rejected: Vec<(&str, ViolationKind)> = violations
        .violations()
        .iter()
        .map(|v| (v.attribute.as_str(), v.kind))
        .collect();
    assert_eq!(
        rejected,
        [
            ("font-size", ViolationKind::InvalidValue),
            ("line-height", ViolationKind::InvalidValue),
            ("padding", ViolationKind::InvalidValue),
            ("text-shadow", ViolationKind::UnknownAttribute),
        ]
    );
}
