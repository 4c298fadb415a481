//! # Validate Subcommand
//!
//! Validates a component's attributes against an attribute schema file.
//!
//! ```bash
//! mjtype validate --schema schema.yaml --component mj-section \
//!     padding='10px 25px' border-radius=4px
//! ```

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use mjtype_schema::{AttributeSchema, AttributeValidationError};

/// Arguments for the validate subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Attribute schema file (`.yaml`, `.yml` or `.json`).
    #[arg(long, env = "MJTYPE_SCHEMA")]
    pub schema: PathBuf,

    /// Component whose attributes are being validated.
    #[arg(long)]
    pub component: String,

    /// Attributes as `name=value` pairs.
    #[arg(value_parser = parse_attribute)]
    pub attributes: Vec<(String, String)>,
}

/// Parse a `name=value` pair. The value may itself contain `=`.
pub fn parse_attribute(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected name=value, found {raw:?}"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("attribute name is empty in {raw:?}"));
    }
    Ok((name.to_string(), value.to_string()))
}

/// Execute the validate subcommand. Returns 0 if every attribute is valid,
/// 1 if any violation was found.
pub fn run_validate(args: &ValidateArgs, out: &mut impl Write) -> Result<u8> {
    let schema = AttributeSchema::load(&args.schema)
        .with_context(|| format!("cannot load schema {}", args.schema.display()))?;

    let attributes = args
        .attributes
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()));

    match schema.validate(&args.component, attributes) {
        Ok(()) => {
            writeln!(
                out,
                "{}: {} attribute(s) valid",
                args.component,
                args.attributes.len()
            )?;
            Ok(0)
        }
        Err(AttributeValidationError::ValidationFailed { violations, .. }) => {
            writeln!(
                out,
                "{}: {} violation(s)",
                args.component,
                violations.len()
            )?;
            writeln!(out, "{violations}")?;
            Ok(1)
        }
        Err(e @ AttributeValidationError::UnknownComponent(_)) => {
            let known = schema.component_names().join(", ");
            Err(anyhow::Error::new(e).context(format!("schema declares: {known}")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCHEMA: &str = r#"
components:
  mj-section:
    padding: "unit(px,%){1,4}"
    border-radius: "unit(px,%)"
"#;

    fn schema_file() -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schema.yaml");
        std::fs::write(&path, SCHEMA).unwrap();
        (dir, path)
    }

    fn args(schema: PathBuf, component: &str, attrs: &[&str]) -> ValidateArgs {
        ValidateArgs {
            schema,
            component: component.to_string(),
            attributes: attrs.iter().map(|a| parse_attribute(a).unwrap()).collect(),
        }
    }

    #[test]
    fn parse_attribute_splits_on_first_equals() {
        assert_eq!(
            parse_attribute("title=a=b").unwrap(),
            ("title".to_string(), "a=b".to_string())
        );
        assert!(parse_attribute("padding").is_err());
        assert!(parse_attribute("=10px").is_err());
    }

    #[test]
    fn valid_attributes_exit_zero() {
        let (_dir, path) = schema_file();
        let mut out = Vec::new();
        let code = run_validate(
            &args(path, "mj-section", &["padding=10px 25px", "border-radius=4px"]),
            &mut out,
        )
        .unwrap();
        assert_eq!(code, 0);
        assert!(String::from_utf8(out).unwrap().contains("2 attribute(s) valid"));
    }

    #[test]
    fn violations_reported_together() {
        let (_dir, path) = schema_file();
        let mut out = Vec::new();
        let code = run_validate(
            &args(path, "mj-section", &["padding=10vh", "color=red"]),
            &mut out,
        )
        .unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(code, 1);
        assert!(text.contains("2 violation(s)"));
        assert!(text.contains("mj-section.padding"));
        assert!(text.contains("mj-section.color"));
    }

    #[test]
    fn repeated_attribute_is_violation() {
        let (_dir, path) = schema_file();
        let mut out = Vec::new();
        let code = run_validate(
            &args(path, "mj-section", &["padding=10px", "padding=10vh"]),
            &mut out,
        )
        .unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(code, 1);
        assert!(text.contains("1 violation(s)"));
        assert!(text.contains("'padding' is given more than once"));
    }

    #[test]
    fn unknown_component_is_error() {
        let (_dir, path) = schema_file();
        let mut out = Vec::new();
        let err = run_validate(&args(path, "mj-hero", &[]), &mut out).unwrap_err();
        let text = format!("{err:#}");
        assert!(text.contains("mj-section"));
        assert!(text.contains("unknown component 'mj-hero'"));
    }
}
