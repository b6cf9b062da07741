use crate::parsing::{blocks::BlockState, token::Nesting};

/// Chat subtext: a single small-print line introduced by `-# `.
pub struct Subtext;

impl Subtext {
    pub const PREFIX: &'static str = "-# ";
    pub const MARKUP: &'static str = "-#";
    pub const TAG: &'static str = "subtext";
}

/// Consumes exactly one `-# ` line. In silent mode only reports the match.
pub fn rule(state: &mut BlockState<'_>, start: usize, _end: usize, silent: bool) -> bool {
    let line = state.lines[start];
    if !line.can_open_block() {
        return false;
    }
    let Some(body) = line.rest().strip_prefix(Subtext::PREFIX) else {
        return false;
    };
    if silent {
        return true;
    }

    state.push("subtext_open", Subtext::TAG, Nesting::Open).markup = Subtext::MARKUP.into();
    state.push_inline(body.trim());
    state.push("subtext_close", Subtext::TAG, Nesting::Close).markup = Subtext::MARKUP.into();

    state.line = start + 1;
    true
}
