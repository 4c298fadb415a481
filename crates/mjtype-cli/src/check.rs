//! # Check Subcommand
//!
//! Builds one type from a specification string and judges each value
//! against it.
//!
//! ```bash
//! mjtype check 'unit(px,em){1,4}' '10px 5px' '10vh'
//! ```

use std::io::Write;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;

use mjtype_core::make_type;

/// Arguments for the check subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Type specification, e.g. `unit(px,%){1,4}`.
    pub spec: String,

    /// Values to validate.
    #[arg(required = true)]
    pub values: Vec<String>,

    /// Print only failing values.
    #[arg(long, short)]
    pub quiet: bool,
}

/// Execute the check subcommand. Returns 0 if every value is valid, 1
/// otherwise.
pub fn run_check(args: &CheckArgs, out: &mut impl Write) -> Result<u8> {
    let descriptor = Arc::new(
        make_type(&args.spec).with_context(|| format!("cannot build type '{}'", args.spec))?,
    );

    let mut failures = 0usize;
    for raw in &args.values {
        let value = descriptor.construct(raw.as_str());
        if value.is_valid() {
            if !args.quiet {
                writeln!(out, "ok      {raw:?}")?;
            }
        } else {
            failures += 1;
            writeln!(out, "invalid {raw:?}: {}", value.error_message())?;
        }
    }

    tracing::info!(
        spec = %args.spec,
        checked = args.values.len(),
        failures,
        "check complete"
    );
    Ok(u8::from(failures > 0))
}
