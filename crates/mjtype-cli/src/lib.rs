//! # mjtype-cli — Command-Line Front End for Attribute Types
//!
//! Provides the `mjtype` binary over `mjtype-core` and `mjtype-schema`.
//!
//! ## Subcommands
//!
//! - `mjtype check` — validate values against one specification string.
//! - `mjtype explain` — show how a specification is parsed and compiled.
//! - `mjtype validate` — validate a component's attributes against a schema file.
//!
//! ```bash
//! mjtype check 'unit(px,%){1,4}' '10px 5%' '3vh'
//! mjtype explain 'unit(px,em){1,4}'
//! mjtype validate --schema schema.yaml --component mj-section padding='10px 25px'
//! ```
//!
//! ## Exit Codes
//!
//! - `0` — everything validated.
//! - `1` — at least one value or attribute was rejected.
//! - `2` — the command itself failed (bad specification, unreadable schema).
//!
//! ## Crate Policy
//!
//! - Argument parsing lives here; validation logic lives in the library crates.
//! - Handlers write to a caller-supplied writer so they can be tested.

pub mod check;
pub mod explain;
pub mod validate;

/// Exit code for a command that could not run.
pub const EXIT_ERROR: u8 = 2;
