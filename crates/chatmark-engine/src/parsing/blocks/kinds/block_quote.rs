use crate::parsing::{blocks::BlockState, token::Nesting};

/// Blockquote block type with owned delimiter constant.
///
/// Each `>` level is one container; deeper levels are found when the
/// stripped content is tokenized again.
pub struct BlockQuote;

impl BlockQuote {
    /// The blockquote prefix character.
    pub const PREFIX: char = '>';

    /// Strips one blockquote prefix, returning the content after it.
    ///
    /// Allows up to three spaces before `>` and eats one optional space
    /// after it: `> text`, `>text`, `   > text`.
    pub fn strip_prefix(s: &str) -> Option<&str> {
        let b = s.as_bytes();
        let mut i = 0usize;
        while i < b.len() && i < 3 && b[i] == b' ' {
            i += 1;
        }
        if b.get(i) != Some(&(Self::PREFIX as u8)) {
            return None;
        }
        i += 1;
        if b.get(i) == Some(&b' ') {
            i += 1;
        }
        Some(&s[i..])
    }
}

/// Collects consecutive quoted lines (plus lazy paragraph continuations)
/// and tokenizes their content as a nested block run.
pub fn rule(state: &mut BlockState<'_>, start: usize, end: usize, silent: bool) -> bool {
    if !state.can_nest() || !state.lines[start].can_open_block() {
        return false;
    }
    let Some(first) = BlockQuote::strip_prefix(state.lines[start].text) else {
        return false;
    };
    if silent {
        return true;
    }

    let mut body = vec![first];
    let mut line = start + 1;
    while line < end {
        let current = state.lines[line];
        if current.is_blank {
            break;
        }
        if let Some(content) = BlockQuote::strip_prefix(current.text) {
            body.push(content);
        } else {
            let previous_blank = body.last().is_none_or(|l| l.trim().is_empty());
            if previous_blank || state.interrupted_by("blockquote", line, end) {
                break;
            }
            body.push(current.text);
        }
        line += 1;
    }

    state.push("blockquote_open", "blockquote", Nesting::Open).markup = ">".into();
    state.nest(&body.join("\n"));
    state.push("blockquote_close", "blockquote", Nesting::Close).markup = ">".into();

    state.line = line;
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::Parser;
    use pretty_assertions::assert_eq;

    #[test]
    fn strip_no_quote() {
        assert_eq!(BlockQuote::strip_prefix("hello"), None);
    }

    #[test]
    fn strip_single_quote() {
        assert_eq!(BlockQuote::strip_prefix("> hello"), Some("hello"));
        assert_eq!(BlockQuote::strip_prefix(">hello"), Some("hello"));
    }

    #[test]
    fn strip_one_level_of_nested_quote() {
        assert_eq!(BlockQuote::strip_prefix("> > hello"), Some("> hello"));
        assert_eq!(BlockQuote::strip_prefix(">> hello"), Some("> hello"));
    }

    #[test]
    fn four_spaces_is_not_a_quote() {
        assert_eq!(BlockQuote::strip_prefix("    > hello"), None);
    }

    fn kinds(src: &str) -> Vec<String> {
        Parser::new().parse(src).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn nested_quotes_recurse() {
        assert_eq!(
            kinds("> a\n>> b"),
            vec![
                "blockquote_open",
                "paragraph_open",
                "inline",
                "paragraph_close",
                "blockquote_open",
                "paragraph_open",
                "inline",
                "paragraph_close",
                "blockquote_close",
                "blockquote_close",
            ]
        );
    }

    #[test]
    fn lazy_continuation_joins_paragraph() {
        let tokens = Parser::new().parse("> a\nb");
        assert_eq!(tokens.len(), 5);
        assert_eq!(tokens[2].content, "a\nb");
    }

    #[test]
    fn blank_line_ends_quote() {
        let kinds = kinds("> a\n\nb");
        assert_eq!(kinds.last().map(String::as_str), Some("paragraph_close"));
        assert_eq!(kinds.iter().filter(|k| *k == "blockquote_close").count(), 1);
        assert_eq!(kinds.len(), 8);
    }
}
