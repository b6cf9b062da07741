use crate::parsing::inline::InlineState;

use super::unicode_emoji::UnicodeEmoji;

/// Plain-text scanner with owned terminator set.
///
/// Every character that can start another inline construct terminates a
/// text run, including `|` (spoilers) and `@`/`<` (mentions).
pub struct Text;

impl Text {
    pub const TERMINATORS: &'static [u8] = b"\n!#$%&*+-:<=>@[\\]^_`{|}~";

    pub fn is_terminator(b: u8) -> bool {
        Self::TERMINATORS.contains(&b)
    }
}

/// Appends the maximal run of non-terminator characters to `pending`.
///
/// Claims nothing when the cursor already sits on a terminator. The run
/// also stops in front of a keycap sequence so that its digit is left for
/// the emoji rule.
pub fn tokenize(state: &mut InlineState<'_>, silent: bool) -> bool {
    let bytes = state.src.as_bytes();
    let start = state.pos;
    let mut pos = start;

    while pos < state.pos_max
        && !Text::is_terminator(bytes[pos])
        && !UnicodeEmoji::is_keycap_at(&state.src[..state.pos_max], pos)
    {
        pos += 1;
    }

    if pos == start {
        return false;
    }

    if !silent {
        state.pending.push_str(&state.src[start..pos]);
    }
    state.pos = pos;
    true
}
