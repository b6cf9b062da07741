use crate::parsing::{inline::InlineState, token::Nesting};

/// Code span with owned delimiter constant.
///
/// Code spans are raw zones: nothing else is parsed inside them.
pub struct CodeSpan;

impl CodeSpan {
    pub const TICK: u8 = b'`';
}

fn tick_run(bytes: &[u8], mut pos: usize, max: usize) -> usize {
    let start = pos;
    while pos < max && bytes[pos] == CodeSpan::TICK {
        pos += 1;
    }
    pos - start
}

/// Matches an opening backtick run with the next run of the same length.
///
/// Newlines inside the span become spaces and a single surrounding space is
/// stripped when both ends have one. An unmatched run is literal text.
pub fn tokenize(state: &mut InlineState<'_>, silent: bool) -> bool {
    let bytes = state.src.as_bytes();
    let max = state.pos_max;
    let start = state.pos;

    if state.byte_at(start) != Some(CodeSpan::TICK) {
        return false;
    }

    let opener = tick_run(bytes, start, max);
    let content_start = start + opener;
    let mut search = content_start;

    while let Some(offset) = bytes[search..max].iter().position(|&b| b == CodeSpan::TICK) {
        let closer_start = search + offset;
        let closer = tick_run(bytes, closer_start, max);

        if closer == opener {
            if !silent {
                let mut content = state.src[content_start..closer_start].replace('\n', " ");
                if content.len() > 2
                    && content.starts_with(' ')
                    && content.ends_with(' ')
                    && content.bytes().any(|b| b != b' ')
                {
                    content = content[1..content.len() - 1].to_string();
                }
                let markup = state.src[start..content_start].to_string();
                let token = state.push("code_inline", "code", Nesting::Leaf);
                token.content = content;
                token.markup = markup;
            }
            state.pos = closer_start + closer;
            return true;
        }

        search = closer_start + closer;
    }

    if !silent {
        state.pending.push_str(&state.src[start..content_start]);
    }
    state.pos = content_start;
    true
}
