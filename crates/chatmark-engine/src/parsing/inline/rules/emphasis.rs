//! Chat emphasis: `*italic*`, `**bold**`, `_underline_`, `||spoiler||`.
//!
//! Tokenizing only records one placeholder per marker character. Once
//! [`balance_pairs`](crate::parsing::inline::delimiters::balance_pairs) has
//! matched openers with closers, [`post_process`] chooses the tag for every
//! pair and merges two nested pairs of the same marker into one double-marker
//! group.

use crate::parsing::{
    inline::{Delimiter, InlineState},
    token::{Nesting, Token},
};

/// Emphasis delimiter kinds with owned marker constants.
pub struct Emphasis;

impl Emphasis {
    pub const STAR: char = '*';
    pub const UNDERSCORE: char = '_';
    pub const PIPE: char = '|';

    /// Spoilers only exist as `||`, a lone `|` is always literal.
    pub const SPOILER_RUN: usize = 2;

    pub fn is_marker(c: char) -> bool {
        matches!(c, Self::STAR | Self::UNDERSCORE | Self::PIPE)
    }

    /// `*` and `|` may open or close inside a word, `_` may not.
    pub fn can_split_word(marker: char) -> bool {
        marker != Self::UNDERSCORE
    }

    /// Tag for a resolved pair. `merged` is true when two adjacent pairs of
    /// the same marker were folded into one group.
    pub fn tag(marker: char, merged: bool) -> &'static str {
        match marker {
            Self::UNDERSCORE => "underline",
            Self::PIPE => "spoiler",
            _ if merged => "strong",
            _ => "em",
        }
    }
}

pub fn tokenize(state: &mut InlineState<'_>, silent: bool) -> bool {
    if silent {
        return false;
    }

    let Some(marker) = state.byte_at(state.pos).map(char::from) else {
        return false;
    };
    if !Emphasis::is_marker(marker) {
        return false;
    }

    let scanned = state.scan_delims(state.pos, Emphasis::can_split_word(marker));
    // A pipe run of any other length is literal as a whole.
    if marker == Emphasis::PIPE && scanned.length != Emphasis::SPOILER_RUN {
        let end = state.pos + scanned.length;
        state.pending.push_str(&state.src[state.pos..end]);
        state.pos = end;
        return true;
    }

    for _ in 0..scanned.length {
        state.push("text", "", Nesting::Leaf).content = marker.to_string();
        let token = state.tokens.len() - 1;
        state.delimiters.push(Delimiter {
            marker,
            length: scanned.length,
            token,
            end: None,
            open: scanned.can_open,
            close: scanned.can_close,
        });
    }

    state.pos += scanned.length;
    true
}

fn process(delimiters: &[Delimiter], tokens: &mut [Token]) {
    let mut i = delimiters.len();

    while i > 0 {
        i -= 1;
        let start = delimiters[i];
        if !Emphasis::is_marker(start.marker) {
            continue;
        }
        let Some(end_idx) = start.end else {
            continue;
        };
        let end = delimiters[end_idx];

        let merged = i > 0
            && delimiters[i - 1].end == Some(end_idx + 1)
            && delimiters[i - 1].marker == start.marker
            && delimiters[i - 1].token + 1 == start.token
            && delimiters[end_idx + 1].token == end.token + 1;

        let tag = Emphasis::tag(start.marker, merged);
        let markup = if merged {
            start.marker.to_string().repeat(2)
        } else {
            start.marker.to_string()
        };

        tokens[start.token].rewrite(tag, Nesting::Open, markup.clone());
        tokens[end.token].rewrite(tag, Nesting::Close, markup);

        if merged {
            tokens[delimiters[i - 1].token].content.clear();
            tokens[delimiters[end_idx + 1].token].content.clear();
            i -= 1;
        }
    }
}

pub fn post_process(state: &mut InlineState<'_>) {
    process(&state.delimiters, &mut state.tokens);
    for scope in &state.nested_scopes {
        process(scope, &mut state.tokens);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::{ParserOptions, inline::InlineParser};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn shape(src: &str) -> Vec<String> {
        InlineParser::new()
            .parse(src, &ParserOptions::default())
            .into_iter()
            .map(|t| match t.nesting {
                Nesting::Leaf => format!("{:?}", t.content),
                _ => t.kind,
            })
            .collect()
    }

    #[rstest]
    #[case('_', false, "underline")]
    #[case('_', true, "underline")]
    #[case('*', false, "em")]
    #[case('*', true, "strong")]
    #[case('|', true, "spoiler")]
    fn tag_selection(#[case] marker: char, #[case] merged: bool, #[case] tag: &str) {
        assert_eq!(Emphasis::tag(marker, merged), tag);
    }

    #[rstest]
    #[case("*x*", &["em_open", "\"x\"", "em_close"])]
    #[case("_x_", &["underline_open", "\"x\"", "underline_close"])]
    #[case("**x**", &["\"\"", "strong_open", "\"x\"", "strong_close", "\"\""])]
    #[case("__x__", &["\"\"", "underline_open", "\"x\"", "underline_close", "\"\""])]
    #[case("||x||", &["\"\"", "spoiler_open", "\"x\"", "spoiler_close", "\"\""])]
    #[case("|x|", &["\"|x|\""])]
    #[case("|||x|||", &["\"|||x|||\""])]
    #[case("a ||| b", &["\"a ||| b\""])]
    #[case("*a**b*", &["em_open", "\"a**b\"", "em_close"])]
    #[case("*_x_*", &["em_open", "underline_open", "\"x\"", "underline_close", "em_close"])]
    #[case("snake_case_name", &["\"snake_case_name\""])]
    #[case("*open", &["\"*open\""])]
    fn resolves_groups(#[case] src: &str, #[case] expected: &[&str]) {
        assert_eq!(shape(src), expected);
    }

    #[test]
    fn bold_wraps_italic() {
        assert_eq!(
            shape("***x***"),
            vec![
                "em_open",
                "\"\"",
                "strong_open",
                "\"x\"",
                "strong_close",
                "\"\"",
                "em_close",
            ]
        );
    }

    #[test]
    fn spoiler_inside_bold() {
        assert_eq!(
            shape("**a ||b||**"),
            vec![
                "\"\"",
                "strong_open",
                "\"a \"",
                "spoiler_open",
                "\"b\"",
                "spoiler_close",
                "\"\"",
                "strong_close",
                "\"\"",
            ]
        );
    }

    fn star(token: usize, end: Option<usize>) -> Delimiter {
        Delimiter {
            marker: Emphasis::STAR,
            length: 2,
            token,
            end,
            open: end.is_some(),
            close: end.is_none(),
        }
    }

    fn kinds_after_process(contents: &[&str], delimiters: &[Delimiter]) -> Vec<String> {
        let mut tokens: Vec<Token> = contents.iter().map(|c| Token::text(*c)).collect();
        process(delimiters, &mut tokens);
        tokens.into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn separated_openers_do_not_merge() {
        let delimiters = [star(0, Some(3)), star(2, Some(2)), star(4, None), star(5, None)];
        assert_eq!(
            kinds_after_process(&["*", "a", "*", "x", "*", "*"], &delimiters),
            vec!["em_open", "text", "em_open", "text", "em_close", "em_close"]
        );
    }

    #[test]
    fn separated_closers_do_not_merge() {
        let delimiters = [star(0, Some(3)), star(1, Some(2)), star(3, None), star(5, None)];
        assert_eq!(
            kinds_after_process(&["*", "*", "x", "*", "a", "*"], &delimiters),
            vec!["em_open", "em_open", "text", "em_close", "text", "em_close"]
        );
    }

    #[test]
    fn adjacent_pairs_merge_into_strong() {
        let delimiters = [star(0, Some(3)), star(1, Some(2)), star(3, None), star(4, None)];
        assert_eq!(
            kinds_after_process(&["*", "*", "x", "*", "*"], &delimiters),
            vec!["text", "strong_open", "text", "strong_close", "text"]
        );
    }

    #[test]
    fn silent_mode_never_matches() {
        let parser = InlineParser::new();
        let options = ParserOptions::default();
        let mut state = InlineState::new("**x**", &parser, &options);
        assert!(!tokenize(&mut state, true));
        assert_eq!(state.pos, 0);
    }
}
