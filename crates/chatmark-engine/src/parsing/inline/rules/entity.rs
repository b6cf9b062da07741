use std::sync::OnceLock;

use regex::Regex;

use crate::parsing::inline::InlineState;

/// HTML character references: `&amp;`, `&#35;`, `&#x1F600;`.
pub struct Entity;

impl Entity {
    fn regex() -> &'static Regex {
        static ENTITY: OnceLock<Regex> = OnceLock::new();
        ENTITY.get_or_init(|| {
            Regex::new(r"^&(?:#[xX][0-9a-fA-F]{1,6}|#[0-9]{1,7}|[a-zA-Z][a-zA-Z0-9]{1,31});")
                .expect("Invalid entity regex")
        })
    }
}

/// Decodes a known reference into `pending`. Unknown names stay literal.
pub fn tokenize(state: &mut InlineState<'_>, silent: bool) -> bool {
    if state.byte_at(state.pos) != Some(b'&') {
        return false;
    }

    let Some(found) = Entity::regex().find(state.rest()) else {
        return false;
    };
    let raw = found.as_str();
    let decoded = html_escape::decode_html_entities(raw);
    if decoded == raw {
        return false;
    }

    if !silent {
        state.pending.push_str(&decoded);
    }
    state.pos += raw.len();
    true
}
