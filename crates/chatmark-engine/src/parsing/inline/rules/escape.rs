use crate::parsing::{inline::InlineState, token::Nesting};

/// Backslash escapes.
///
/// `\` before ASCII punctuation yields the punctuation literally, `\` before
/// a newline is a hard break, anything else keeps the backslash.
pub fn tokenize(state: &mut InlineState<'_>, silent: bool) -> bool {
    if state.byte_at(state.pos) != Some(b'\\') {
        return false;
    }
    state.pos += 1;

    match state.byte_at(state.pos) {
        Some(b'\n') => {
            if !silent {
                state.push("hardbreak", "br", Nesting::Leaf);
            }
            state.pos += 1;
            while state.byte_at(state.pos) == Some(b' ') {
                state.pos += 1;
            }
        }
        Some(b) if b.is_ascii_punctuation() => {
            if !silent {
                state.pending.push(b as char);
            }
            state.pos += 1;
        }
        _ => {
            if !silent {
                state.pending.push('\\');
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use crate::parsing::{ParserOptions, inline::InlineParser, token::Token};
    use pretty_assertions::assert_eq;

    fn parse(src: &str) -> Vec<Token> {
        InlineParser::new().parse(src, &ParserOptions::default())
    }

    #[test]
    fn escaped_marker_is_literal() {
        assert_eq!(parse(r"\*not em\*"), vec![Token::text("*not em*")]);
    }

    #[test]
    fn backslash_before_letter_is_kept() {
        assert_eq!(parse(r"a\b"), vec![Token::text(r"a\b")]);
    }

    #[test]
    fn backslash_newline_is_hard_break() {
        let tokens = parse("a\\\nb");
        assert_eq!(tokens[1].kind, "hardbreak");
        assert_eq!(tokens[2].content, "b");
    }
}
