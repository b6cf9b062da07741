use std::sync::OnceLock;

use regex::Regex;

use crate::parsing::{inline::InlineState, token::Nesting};

/// Bare `http(s)://` URLs in running text.
pub struct Linkify;

impl Linkify {
    pub const SCHEMES: &'static [&'static str] = &["https", "http"];

    /// Characters dropped from the end of a match; they usually belong to the
    /// surrounding sentence.
    pub const TRAILING_PUNCTUATION: &'static [char] =
        &['.', ',', ':', ';', '!', '?', ')', ']', '}', '*', '_', '~', '|'];

    fn url_regex() -> &'static Regex {
        static URL_REGEX: OnceLock<Regex> = OnceLock::new();
        URL_REGEX
            .get_or_init(|| Regex::new(r"(?i)^https?://[^\s<>\[\]]+").expect("Invalid URL regex"))
    }

    /// The scheme at the end of `pending`, when it starts a word.
    fn trailing_scheme(pending: &str) -> Option<&'static str> {
        Self::SCHEMES.iter().copied().find(|scheme| {
            let Some(head) = pending.len().checked_sub(scheme.len()) else {
                return false;
            };
            pending.is_char_boundary(head)
                && pending[head..].eq_ignore_ascii_case(scheme)
                && !pending[..head]
                    .chars()
                    .next_back()
                    .is_some_and(|c| c.is_alphanumeric() || matches!(c, '.' | '+' | '-'))
        })
    }
}

/// Triggers on the `:` after a scheme the text rule already moved into
/// `pending`, then takes the scheme back out of the buffer.
pub fn tokenize(state: &mut InlineState<'_>, silent: bool) -> bool {
    if !state.options.linkify || state.link_level > 0 {
        return false;
    }
    if state.byte_at(state.pos) != Some(b':') || !state.rest().starts_with("://") {
        return false;
    }

    let Some(scheme) = Linkify::trailing_scheme(&state.pending) else {
        return false;
    };
    let Some(start) = state.pos.checked_sub(scheme.len()) else {
        return false;
    };
    if !state.src.is_char_boundary(start)
        || !state.src[start..state.pos].eq_ignore_ascii_case(scheme)
    {
        return false;
    }
    let Some(found) = Linkify::url_regex().find(&state.src[start..state.pos_max]) else {
        return false;
    };

    let url = found.as_str().trim_end_matches(Linkify::TRAILING_PUNCTUATION);
    if url.len() <= scheme.len() + 3 {
        return false;
    }

    if !silent {
        let keep = state.pending.len() - scheme.len();
        state.pending.truncate(keep);

        let open = state.push("link_open", "a", Nesting::Open);
        open.set_attr("href", url);
        open.markup = "linkify".into();
        open.info = "auto".into();

        state.push("text", "", Nesting::Leaf).content = url.to_string();

        let close = state.push("link_close", "a", Nesting::Close);
        close.markup = "linkify".into();
        close.info = "auto".into();
    }

    state.pos = start + url.len();
    true
}
