//! Terminal output helpers.
//!
//! stdout is reserved for the generated commit message (the hook captures
//! it), so everything except success confirmations goes to stderr.

pub mod colors;

pub use colors::*;
