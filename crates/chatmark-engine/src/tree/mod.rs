//! Nesting a flat token stream into a tree.
//!
//! Open tokens start a group, the matching close token ends it, leaves
//! attach to the innermost open group. Leaves with inline `children` are
//! nested recursively. The group entry keeps its opening token; the closing
//! token is dropped.

use crate::{
    error::TreeError,
    parsing::token::{Nesting, Token},
};

#[derive(Debug, Clone, PartialEq)]
pub struct TokenTreeEntry<'t> {
    pub token: &'t Token,
    pub children: Vec<TokenTreeEntry<'t>>,
}

impl<'t> TokenTreeEntry<'t> {
    fn new(token: &'t Token) -> Self {
        Self {
            token,
            children: Vec::new(),
        }
    }
}

/// Nests `tokens` by their [`Nesting`].
///
/// A close token with no open group, or a group still open at the end, is
/// an error: both mean an upstream rule produced an unbalanced stream.
pub fn serialize_tokens(tokens: &[Token]) -> Result<Vec<TokenTreeEntry<'_>>, TreeError> {
    let mut stack: Vec<TokenTreeEntry<'_>> = Vec::new();
    let mut root = Vec::new();

    for (index, token) in tokens.iter().enumerate() {
        match token.nesting {
            Nesting::Open => stack.push(TokenTreeEntry::new(token)),
            Nesting::Close => {
                let group = stack.pop().ok_or_else(|| TreeError::UnmatchedClose {
                    kind: token.kind.clone(),
                    index,
                })?;
                attach(&mut stack, &mut root, group);
            }
            Nesting::Leaf => {
                let children = match &token.children {
                    Some(children) => serialize_tokens(children)?,
                    None => Vec::new(),
                };
                let entry = TokenTreeEntry { token, children };
                attach(&mut stack, &mut root, entry);
            }
        }
    }

    if let Some(open) = stack.pop() {
        return Err(TreeError::UnclosedOpen {
            kind: open.token.kind.clone(),
        });
    }
    Ok(root)
}

fn attach<'t>(
    stack: &mut [TokenTreeEntry<'t>],
    root: &mut Vec<TokenTreeEntry<'t>>,
    entry: TokenTreeEntry<'t>,
) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(entry),
        None => root.push(entry),
    }
}
