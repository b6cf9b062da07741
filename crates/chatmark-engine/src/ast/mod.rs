//! Render-agnostic document tree.
//!
//! [`transform`] turns a token stream into [`Node`]s whose JSON form is the
//! stable output contract of the crate.

pub mod mention;
pub mod node;
pub mod transform;

pub use mention::{MentionKind, MentionResolver, NoMentions};
pub use node::{Element, Node};
pub use transform::{transform, transform_with};
