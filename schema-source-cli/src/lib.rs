//! Command-line front end for `schema-source`.
//!
//! Resolves one document (`--url`, `--file`, `--source`, or stdin), then
//! writes it to stdout or `--output`, optionally keeping a copy in
//! `--save-dir`.

pub mod cli;
pub mod logging;
pub mod reporter;
pub mod save;
