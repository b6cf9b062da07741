//! Chat markup to a render-agnostic document tree.
//!
//! ```
//! let nodes = chatmark_engine::render("**hi** <@42>").unwrap();
//! let json = serde_json::to_value(&nodes).unwrap();
//! assert_eq!(json[0]["type"], "text");
//! assert_eq!(json[0]["content"][0]["type"], "bold");
//! ```

pub mod ast;
pub mod error;
pub mod parsing;
pub mod tree;

// Re-export key types for easier usage
pub use ast::{Element, MentionKind, MentionResolver, NoMentions, Node, transform, transform_with};
pub use error::{ParseError, TransformError, TreeError};
pub use parsing::{
    Parser, ParserOptions,
    token::{Nesting, Token, TokenMeta},
};
pub use tree::{TokenTreeEntry, serialize_tokens};

/// Parses `src` with the default rule set.
pub fn parse(src: &str) -> Vec<Token> {
    Parser::new().parse(src)
}

/// Parses and transforms `src` without mention enrichment.
pub fn render(src: &str) -> Result<Vec<Node>, TransformError> {
    transform(&parse(src))
}

/// Parses and transforms `src`, enriching mentions through `resolver`.
pub fn render_with<R>(src: &str, resolver: &R) -> Result<Vec<Node>, TransformError>
where
    R: MentionResolver + ?Sized,
{
    transform_with(&parse(src), resolver)
}
