//! Inline links: `[label](destination "title")`.
//!
//! The label is tokenized as a nested inline scope, so emphasis inside a
//! label pairs on its own and never with markers outside the brackets.
//! Reference-style links are not supported.

use crate::parsing::{inline::InlineState, token::Nesting};

/// Link syntax with owned delimiter constants.
pub struct Link;

impl Link {
    pub const LABEL_OPEN: u8 = b'[';
    pub const LABEL_CLOSE: u8 = b']';
    pub const DEST_OPEN: u8 = b'(';
    pub const DEST_CLOSE: u8 = b')';

    /// Schemes that are never rendered as a navigable destination.
    pub const BLOCKED_SCHEMES: &'static [&'static str] =
        &["javascript:", "vbscript:", "file:", "data:"];

    /// Maximum parenthesis depth inside a bare destination.
    const MAX_PAREN_DEPTH: usize = 32;

    /// Returns `href` unless it uses a blocked scheme, in which case the
    /// destination is replaced with an empty string.
    pub fn sanitize(href: &str) -> String {
        let lower = href.trim_start().to_ascii_lowercase();
        if Self::BLOCKED_SCHEMES
            .iter()
            .any(|scheme| lower.starts_with(scheme))
        {
            String::new()
        } else {
            href.to_string()
        }
    }
}

/// Finds the `]` closing the label whose `[` is at `start`.
///
/// Walks the label with [`skip_token`](crate::parsing::inline::InlineParser::skip_token)
/// so that code spans and other constructs containing `]` are stepped over
/// whole. Returns `None` for a nested link when `disable_nested` is set or
/// when no closing bracket exists. The cursor is restored either way.
pub fn parse_link_label(
    state: &mut InlineState<'_>,
    start: usize,
    disable_nested: bool,
) -> Option<usize> {
    let old_pos = state.pos;
    let max = state.pos_max;
    let mut level = 1usize;
    let mut found = false;

    state.pos = start + 1;
    while state.pos < max {
        let marker = state.src.as_bytes()[state.pos];
        if marker == Link::LABEL_CLOSE {
            level -= 1;
            if level == 0 {
                found = true;
                break;
            }
        }

        let prev = state.pos;
        let parser = state.parser;
        parser.skip_token(state);

        if marker == Link::LABEL_OPEN {
            if prev + 1 == state.pos {
                level += 1;
            } else if disable_nested {
                state.pos = old_pos;
                return None;
            }
        }
    }

    let end = found.then_some(state.pos);
    state.pos = old_pos;
    end
}

fn skip_whitespace(bytes: &[u8], mut pos: usize, max: usize) -> usize {
    while pos < max && matches!(bytes[pos], b' ' | b'\n' | b'\t') {
        pos += 1;
    }
    pos
}

/// Unescapes backslash-escaped ASCII punctuation.
fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\'
            && let Some(&next) = chars.peek()
            && next.is_ascii_punctuation()
        {
            out.push(next);
            chars.next();
        } else {
            out.push(c);
        }
    }
    out
}

/// Parses a destination starting at `pos`; returns `(destination, end)`.
fn parse_destination(src: &str, pos: usize, max: usize) -> Option<(String, usize)> {
    let bytes = src.as_bytes();
    let start = pos;
    let mut pos = pos;

    if bytes.get(pos) == Some(&b'<') {
        pos += 1;
        while pos < max {
            match bytes[pos] {
                b'\n' | b'<' => return None,
                b'>' => return Some((unescape(&src[start + 1..pos]), pos + 1)),
                b'\\' if pos + 1 < max => pos += 2,
                _ => pos += 1,
            }
        }
        return None;
    }

    let mut depth = 0usize;
    while pos < max {
        let b = bytes[pos];
        if b == b' ' || b.is_ascii_control() {
            break;
        }
        match b {
            b'\\' if pos + 1 < max => {
                pos += 2;
                continue;
            }
            Link::DEST_OPEN => {
                depth += 1;
                if depth > Link::MAX_PAREN_DEPTH {
                    return None;
                }
            }
            Link::DEST_CLOSE => {
                if depth == 0 {
                    break;
                }
                depth -= 1;
            }
            _ => {}
        }
        pos += 1;
    }

    if depth != 0 {
        return None;
    }
    Some((unescape(&src[start..pos]), pos))
}

/// Parses a quoted or parenthesized title at `pos`; returns `(title, end)`.
fn parse_title(src: &str, pos: usize, max: usize) -> Option<(String, usize)> {
    let bytes = src.as_bytes();
    let close = match bytes.get(pos)? {
        b'"' => b'"',
        b'\'' => b'\'',
        b'(' => b')',
        _ => return None,
    };

    let mut end = pos + 1;
    while end < max {
        match bytes[end] {
            b if b == close => return Some((unescape(&src[pos + 1..end]), end + 1)),
            b'(' if close == b')' => return None,
            b'\\' if end + 1 < max => end += 2,
            _ => end += 1,
        }
    }
    None
}

pub fn tokenize(state: &mut InlineState<'_>, silent: bool) -> bool {
    if state.byte_at(state.pos) != Some(Link::LABEL_OPEN) {
        return false;
    }

    let old_pos = state.pos;
    let max = state.pos_max;
    let label_start = state.pos + 1;
    let Some(label_end) = parse_link_label(state, state.pos, true) else {
        return false;
    };

    let src = state.src;
    let bytes = src.as_bytes();
    let mut pos = label_end + 1;
    if pos >= max || bytes[pos] != Link::DEST_OPEN {
        return false;
    }

    pos = skip_whitespace(bytes, pos + 1, max);
    if pos >= max {
        return false;
    }

    let mut href = String::new();
    if let Some((dest, end)) = parse_destination(src, pos, max) {
        href = Link::sanitize(&dest);
        pos = end;
    }

    let after_dest = pos;
    pos = skip_whitespace(bytes, pos, max);

    let mut title = None;
    if pos > after_dest
        && let Some((parsed, end)) = parse_title(src, pos, max)
    {
        title = Some(parsed);
        pos = skip_whitespace(bytes, end, max);
    }

    if pos >= max || bytes[pos] != Link::DEST_CLOSE {
        state.pos = old_pos;
        return false;
    }
    pos += 1;

    if !silent {
        state.pos = label_start;
        state.pos_max = label_end;

        let token = state.push("link_open", "a", Nesting::Open);
        token.set_attr("href", href);
        if let Some(title) = title {
            token.set_attr("title", title);
        }

        state.link_level += 1;
        let parser = state.parser;
        parser.tokenize(state);
        state.link_level -= 1;

        state.push("link_close", "a", Nesting::Close);
    }

    state.pos = pos;
    state.pos_max = max;
    true
}

#[cfg(test)]
mod tests {
    use crate::parsing::{ParserOptions, inline::InlineParser, token::Token};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn parse(src: &str) -> Vec<Token> {
        InlineParser::new().parse(src, &ParserOptions::default())
    }

    #[test]
    fn inline_link_with_title() {
        let tokens = parse(r#"[site](https://example.com "Example")"#);
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0].kind, "link_open");
        assert_eq!(tokens[0].attr("href"), Some("https://example.com"));
        assert_eq!(tokens[0].attr("title"), Some("Example"));
        assert_eq!(tokens[1], Token::text("site"));
        assert_eq!(tokens[2].kind, "link_close");
    }

    #[test]
    fn label_is_its_own_emphasis_scope() {
        let kinds: Vec<_> = parse("*a [b*](u)").into_iter().map(|t| t.kind).collect();
        assert_eq!(kinds, vec!["text", "link_open", "text", "link_close"]);
    }

    #[test]
    fn emphasis_inside_label() {
        let kinds: Vec<_> = parse("[**b**](u)").into_iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                "link_open",
                "text",
                "strong_open",
                "text",
                "strong_close",
                "text",
                "link_close",
            ]
        );
    }

    #[rstest]
    #[case("javascript:alert(1)")]
    #[case("JavaScript:alert(1)")]
    #[case("vbscript:msgbox")]
    #[case("file:///etc/passwd")]
    #[case("data:text/html,hi")]
    fn blocked_schemes_lose_their_href(#[case] dest: &str) {
        let tokens = parse(&format!("[x]({dest})"));
        assert_eq!(tokens[0].kind, "link_open");
        assert_eq!(tokens[0].attr("href"), Some(""));
    }

    #[test]
    fn angle_destination_allows_spaces() {
        let tokens = parse("[x](<a b>)");
        assert_eq!(tokens[0].attr("href"), Some("a b"));
    }

    #[rstest]
    #[case("[x]")]
    #[case("[x](")]
    #[case("[x](a b c)")]
    #[case("[x (y)")]
    fn not_a_link(#[case] src: &str) {
        assert!(parse(src).iter().all(|t| t.kind == "text"));
    }

    #[test]
    fn nested_links_are_rejected() {
        let tokens = parse("[a [b](c)](d)");
        let opens = tokens.iter().filter(|t| t.kind == "link_open").count();
        assert_eq!(opens, 1);
        let href = tokens
            .iter()
            .find(|t| t.kind == "link_open")
            .and_then(|t| t.attr("href"));
        assert_eq!(href, Some("c"));
    }
}
