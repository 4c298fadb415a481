//! # Explain Subcommand
//!
//! Shows how a specification string is understood: its canonical form,
//! the accepted units, the value-count bounds and the compiled pattern.

use std::io::Write;

use anyhow::{Context, Result};
use clap::Args;

use mjtype_core::{make_type, UNIT_TYPE_NAME};

/// Arguments for the explain subcommand.
#[derive(Args, Debug)]
pub struct ExplainArgs {
    /// Type specification, e.g. `unit(px,%){1,4}`.
    pub spec: String,
}

/// Execute the explain subcommand.
pub fn run_explain(args: &ExplainArgs, out: &mut impl Write) -> Result<u8> {
    let descriptor =
        make_type(&args.spec).with_context(|| format!("cannot build type '{}'", args.spec))?;

    for (spec, matcher) in descriptor
        .specifications()
        .iter()
        .zip(descriptor.matchers().iter())
    {
        let m = spec.multiplicity();
        writeln!(out, "type:     {UNIT_TYPE_NAME}")?;
        writeln!(out, "spec:     {spec}")?;
        writeln!(out, "units:    {}", spec.units().join(", "))?;
        writeln!(out, "members:  {} (min {}, max {})", m, m.min, m.max)?;
        writeln!(out, "pattern:  {} (ASCII case-insensitive)", matcher.pattern())?;
    }
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explain_prints_canonical_form_and_pattern() {
        let mut out = Vec::new();
        let code = run_explain(
            &ExplainArgs {
                spec: "unit( px , % ){2,3}".to_string(),
            },
            &mut out,
        )
        .unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(code, 0);
        assert!(text.contains("spec:     unit(px,%){2,3}"));
        assert!(text.contains("units:    px, %"));
        assert!(text.contains("2 to 3"));
        assert!(text.contains("^(?:[0-9]+(?:[pP][xX]|%) ?){2,3}$"));
    }

    #[test]
    fn explain_rejects_inverted_bounds() {
        let mut out = Vec::new();
        let result = run_explain(
            &ExplainArgs {
                spec: "unit(px){3,2}".to_string(),
            },
            &mut out,
        );
        assert!(result.is_err());
    }
}
