//! # Snapshot Testing Support
//!
//! Utilities for testing the parser via snapshot assertions and invariant checks.
//!
//! ## Modules
//!
//! - **`normalize`**: Renders a token stream as an indented, stable text tree
//!   for `insta` snapshot testing
//! - **`invariants`**: Runtime checks for parser correctness (every open token
//!   is closed by a token of the same type, inline tokens carry children, no
//!   block tokens inside inline content)

pub mod invariants;
pub mod normalize;

pub use invariants::check as invariants;
pub use normalize::normalize;
