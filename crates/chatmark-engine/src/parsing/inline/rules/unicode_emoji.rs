use crate::parsing::{inline::InlineState, token::Nesting};

/// Keycap emoji: an ASCII digit, VS16, then the combining enclosing keycap.
pub struct UnicodeEmoji;

impl UnicodeEmoji {
    pub const VARIATION_SELECTOR: char = '\u{FE0F}';
    pub const KEYCAP: char = '\u{20E3}';

    /// Byte length of a keycap sequence.
    pub const LEN: usize = 1 + 3 + 3;

    /// Whether a keycap sequence starts at byte `pos` of `src`.
    pub fn is_keycap_at(src: &str, pos: usize) -> bool {
        let Some(rest) = src.get(pos..) else {
            return false;
        };
        let mut chars = rest.chars();
        matches!(
            (chars.next(), chars.next(), chars.next()),
            (Some(d), Some(Self::VARIATION_SELECTOR), Some(Self::KEYCAP)) if d.is_ascii_digit()
        )
    }
}

pub fn tokenize(state: &mut InlineState<'_>, silent: bool) -> bool {
    let end = &state.src[..state.pos_max];
    if !UnicodeEmoji::is_keycap_at(end, state.pos) {
        return false;
    }

    let start = state.pos;
    if !silent {
        let content = state.src[start..start + UnicodeEmoji::LEN].to_string();
        state.push("unicode_emoji", "unicode_emoji", Nesting::Leaf).content = content;
    }
    state.pos += UnicodeEmoji::LEN;
    true
}
