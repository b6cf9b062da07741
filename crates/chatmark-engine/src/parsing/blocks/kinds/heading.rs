use crate::parsing::{blocks::BlockState, token::Nesting};

/// ATX heading: `#` to `######` followed by a space or the end of line.
pub struct Heading;

impl Heading {
    pub const MARKER: u8 = b'#';
    pub const MAX_LEVEL: usize = 6;

    /// Splits a heading line into its level and trimmed text. An optional
    /// closing `#` run is dropped when it is separated by whitespace.
    pub fn parse(rest: &str) -> Option<(usize, &str)> {
        let level = rest.bytes().take_while(|&b| b == Self::MARKER).count();
        if level == 0 || level > Self::MAX_LEVEL {
            return None;
        }

        let after = &rest[level..];
        if !(after.is_empty() || after.starts_with([' ', '\t'])) {
            return None;
        }

        let text = after.trim();
        let without_closing = text.trim_end_matches(Self::MARKER as char);
        let text = if without_closing.is_empty() {
            ""
        } else if without_closing.ends_with([' ', '\t']) {
            without_closing.trim_end()
        } else {
            text
        };
        Some((level, text))
    }
}

pub fn rule(state: &mut BlockState<'_>, start: usize, _end: usize, silent: bool) -> bool {
    let line = state.lines[start];
    if !line.can_open_block() {
        return false;
    }
    let Some((level, text)) = Heading::parse(line.rest()) else {
        return false;
    };
    if silent {
        return true;
    }

    let tag = format!("h{level}");
    let markup = "#".repeat(level);
    state.push("heading_open", &tag, Nesting::Open).markup = markup.clone();
    state.push_inline(text);
    state.push("heading_close", &tag, Nesting::Close).markup = markup;

    state.line = start + 1;
    true
}
