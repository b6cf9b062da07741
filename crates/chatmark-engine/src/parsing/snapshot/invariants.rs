use crate::parsing::token::{Nesting, Token};

/// Block-level token kinds that must never appear inside inline content.
const BLOCK_ONLY: &[&str] = &["paragraph_open", "heading_open", "blockquote_open", "fence", "hr"];

/// Validates parser output invariants.
///
/// Asserts that:
/// - Every `*_open` token is closed by the matching `*_close` in the same list
/// - No close token appears without an open one
/// - `inline` tokens carry children, and the children hold no block tokens
///
/// # Panics
/// Panics with a descriptive message if any invariant is violated.
pub fn check(tokens: &[Token]) {
    check_list(tokens, false);
}

fn check_list(tokens: &[Token], inside_inline: bool) {
    let mut stack: Vec<&str> = Vec::new();

    for (index, token) in tokens.iter().enumerate() {
        if inside_inline {
            assert!(
                !BLOCK_ONLY.contains(&token.kind.as_str()),
                "block token `{}` inside inline content at index {index}",
                token.kind
            );
        }

        match token.nesting {
            Nesting::Open => {
                let base = token.kind.strip_suffix("_open").unwrap_or_else(|| {
                    panic!("open token `{}` at index {index} lacks `_open`", token.kind)
                });
                stack.push(base);
            }
            Nesting::Close => {
                let base = token.kind.strip_suffix("_close").unwrap_or_else(|| {
                    panic!("close token `{}` at index {index} lacks `_close`", token.kind)
                });
                let open = stack.pop();
                assert_eq!(
                    open,
                    Some(base),
                    "close token `{}` at index {index} does not match its opener",
                    token.kind
                );
            }
            Nesting::Leaf => {}
        }

        if token.kind == "inline" {
            let children = token
                .children
                .as_deref()
                .unwrap_or_else(|| panic!("inline token at index {index} has no children"));
            check_list(children, true);
        } else if let Some(children) = token.children.as_deref() {
            check_list(children, inside_inline);
        }
    }

    assert!(stack.is_empty(), "unclosed tokens at end of list: {stack:?}");
}
