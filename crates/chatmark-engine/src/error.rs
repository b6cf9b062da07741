use thiserror::Error;

use crate::ast::MentionKind;

/// Misuse of the rule registry when customizing a [`Parser`](crate::Parser).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("no rule named `{0}` is registered")]
    UnknownRule(String),
}

/// Structural defects found while nesting a flat token stream.
///
/// These indicate a bug upstream (an unbalanced delimiter rewrite), not bad
/// user input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TreeError {
    #[error("unexpected close token `{kind}` at index {index}")]
    UnmatchedClose { kind: String, index: usize },

    #[error("open token `{kind}` was never closed")]
    UnclosedOpen { kind: String },
}

#[derive(Debug, Error)]
pub enum TransformError {
    #[error(transparent)]
    Tree(#[from] TreeError),

    #[error("failed to resolve {kind} mention {id}")]
    Mention {
        kind: MentionKind,
        id: String,
        #[source]
        source: anyhow::Error,
    },
}
