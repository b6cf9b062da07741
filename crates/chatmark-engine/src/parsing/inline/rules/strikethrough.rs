use crate::parsing::{
    inline::{Delimiter, InlineState},
    token::{Nesting, Token},
};

/// `~~strikethrough~~` with owned marker constant.
pub struct Strikethrough;

impl Strikethrough {
    pub const MARKER: char = '~';
    pub const MARKUP: &'static str = "~~";
    pub const TAG: &'static str = "s";
}

/// Records one `~~` placeholder and descriptor per marker pair.
///
/// An odd run leaves its first `~` as literal text.
pub fn tokenize(state: &mut InlineState<'_>, silent: bool) -> bool {
    if silent || state.byte_at(state.pos) != Some(Strikethrough::MARKER as u8) {
        return false;
    }

    let scanned = state.scan_delims(state.pos, true);
    let mut len = scanned.length;
    if len < 2 {
        return false;
    }

    if len % 2 == 1 {
        state.push("text", "", Nesting::Leaf).content = Strikethrough::MARKER.to_string();
        len -= 1;
    }

    for _ in (0..len).step_by(2) {
        state.push("text", "", Nesting::Leaf).content = Strikethrough::MARKUP.to_string();

        if !scanned.can_open && !scanned.can_close {
            continue;
        }

        let token = state.tokens.len() - 1;
        state.delimiters.push(Delimiter {
            marker: Strikethrough::MARKER,
            length: 0,
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
    let mut lone_markers = Vec::new();

    for start in delimiters {
        if start.marker != Strikethrough::MARKER {
            continue;
        }
        let Some(end) = start.end else {
            continue;
        };
        let end = delimiters[end];

        let markup = Strikethrough::MARKUP.to_string();
        tokens[start.token].rewrite(Strikethrough::TAG, Nesting::Open, markup.clone());
        tokens[end.token].rewrite(Strikethrough::TAG, Nesting::Close, markup);

        let before = &tokens[end.token - 1];
        if before.kind == "text" && before.content == Strikethrough::MARKER.to_string() {
            lone_markers.push(end.token - 1);
        }
    }

    // A lone `~` right before a closer belongs after it: `~~~a~~~` must
    // render as `<s>~a</s>~`, not `<s>~a~</s>`.
    while let Some(i) = lone_markers.pop() {
        let mut j = i + 1;
        while j < tokens.len() && tokens[j].kind == "s_close" {
            j += 1;
        }
        j -= 1;
        if i != j {
            tokens.swap(i, j);
        }
    }
}

pub fn post_process(state: &mut InlineState<'_>) {
    process(&state.delimiters, &mut state.tokens);
    for scope in &state.nested_scopes {
        process(scope, &mut state.tokens);
    }
}
