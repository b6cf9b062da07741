use crate::parsing::{blocks::BlockState, token::Nesting};

/// Thematic break: three or more `*`, `-` or `_`, optionally spaced.
pub struct ThematicBreak;

impl ThematicBreak {
    pub const MARKERS: &'static [u8] = b"*-_";
    pub const MIN_MARKERS: usize = 3;

    /// Returns the marker run when `rest` is a thematic break.
    pub fn markup(rest: &str) -> Option<String> {
        let marker = *rest.as_bytes().first()?;
        if !Self::MARKERS.contains(&marker) {
            return None;
        }

        let mut count = 0usize;
        for b in rest.bytes() {
            match b {
                b if b == marker => count += 1,
                b' ' | b'\t' => {}
                _ => return None,
            }
        }

        (count >= Self::MIN_MARKERS).then(|| (marker as char).to_string().repeat(count))
    }
}

pub fn rule(state: &mut BlockState<'_>, start: usize, _end: usize, silent: bool) -> bool {
    let line = state.lines[start];
    if !line.can_open_block() {
        return false;
    }
    let Some(markup) = ThematicBreak::markup(line.rest()) else {
        return false;
    };
    if silent {
        return true;
    }

    state.push("hr", "hr", Nesting::Leaf).markup = markup;
    state.line = start + 1;
    true
}
