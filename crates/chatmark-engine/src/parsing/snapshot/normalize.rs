use std::fmt::Write;

use crate::parsing::token::{Nesting, Token, TokenMeta};

/// Renders tokens as an indented tree, one token per line.
///
/// Groups indent their contents by two spaces and `inline` children are
/// listed under their parent. Only non-empty fields are shown, e.g.
///
/// ```text
/// paragraph_open
///   inline "*hi*"
///     em_open markup="*"
///       text "hi"
///     em_close markup="*"
/// paragraph_close
/// ```
pub fn normalize(tokens: &[Token]) -> String {
    let mut out = String::new();
    render(tokens, 0, &mut out);
    out
}

fn render(tokens: &[Token], base: usize, out: &mut String) {
    let mut depth = base;

    for token in tokens {
        if token.nesting == Nesting::Close {
            depth = depth.saturating_sub(1).max(base);
        }

        out.push_str(&"  ".repeat(depth));
        out.push_str(&token.kind);
        if !token.content.is_empty() {
            let _ = write!(out, " {:?}", token.content);
        }
        if !token.markup.is_empty() {
            let _ = write!(out, " markup={:?}", token.markup);
        }
        if !token.info.is_empty() {
            let _ = write!(out, " info={:?}", token.info);
        }
        for (name, value) in &token.attrs {
            let _ = write!(out, " {name}={value:?}");
        }
        match &token.meta {
            Some(TokenMeta::Mention { kind, id }) => {
                let _ = write!(out, " mention={kind}");
                if let Some(id) = id {
                    let _ = write!(out, " id={id}");
                }
            }
            Some(TokenMeta::Emoji { id, name, animated }) => {
                let _ = write!(out, " emoji={name} id={id} animated={animated}");
            }
            None => {}
        }
        out.push('\n');

        if let Some(children) = &token.children {
            render(children, depth + 1, out);
        }

        if token.nesting == Nesting::Open {
            depth += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::Parser;

    #[test]
    fn renders_nested_tree() {
        let tokens = Parser::new().parse("*hi*");
        insta::assert_snapshot!(normalize(&tokens), @r#"
        paragraph_open
          inline "*hi*"
            em_open markup="*"
              text "hi"
            em_close markup="*"
        paragraph_close
        "#);
    }

    #[test]
    fn renders_meta() {
        let tokens = Parser::new().parse("<@7> <a:w:9>");
        insta::assert_snapshot!(normalize(&tokens), @r#"
        paragraph_open
          inline "<@7> <a:w:9>"
            mention "<@7>" mention=user id=7
            text " "
            emoji "<a:w:9>" emoji=w id=9 animated=true
        paragraph_close
        "#);
    }
}
