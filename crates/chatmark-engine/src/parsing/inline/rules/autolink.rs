use std::sync::OnceLock;

use regex::Regex;

use crate::parsing::{inline::InlineState, token::Nesting};

use super::link::Link;

/// `<scheme:rest>` and `<user@host>` autolinks.
pub struct Autolink;

impl Autolink {
    fn url_regex() -> &'static Regex {
        static URL: OnceLock<Regex> = OnceLock::new();
        URL.get_or_init(|| {
            Regex::new(r"^<([a-zA-Z][a-zA-Z0-9+.\-]{1,31}:[^<>\x00-\x20]*)>")
                .expect("Invalid autolink regex")
        })
    }

    fn email_regex() -> &'static Regex {
        static EMAIL: OnceLock<Regex> = OnceLock::new();
        EMAIL.get_or_init(|| {
            Regex::new(
                r"^<([a-zA-Z0-9.!#$%&'*+/=?^_`{|}~\-]+@[a-zA-Z0-9](?:[a-zA-Z0-9\-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9\-]{0,61}[a-zA-Z0-9])?)*)>",
            )
            .expect("Invalid email autolink regex")
        })
    }
}

pub fn tokenize(state: &mut InlineState<'_>, silent: bool) -> bool {
    if state.byte_at(state.pos) != Some(b'<') {
        return false;
    }

    let rest = state.rest();
    let (matched_len, label, href) = if let Some(caps) = Autolink::url_regex().captures(rest) {
        let url = &caps[1];
        (caps[0].len(), url.to_string(), Link::sanitize(url))
    } else if let Some(caps) = Autolink::email_regex().captures(rest) {
        let email = &caps[1];
        (caps[0].len(), email.to_string(), format!("mailto:{email}"))
    } else {
        return false;
    };

    if !silent {
        let open = state.push("link_open", "a", Nesting::Open);
        open.set_attr("href", href);
        open.markup = "autolink".into();
        open.info = "auto".into();

        state.push("text", "", Nesting::Leaf).content = label;

        let close = state.push("link_close", "a", Nesting::Close);
        close.markup = "autolink".into();
        close.info = "auto".into();
    }

    state.pos += matched_len;
    true
}
