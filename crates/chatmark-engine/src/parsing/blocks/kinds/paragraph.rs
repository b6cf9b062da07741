use crate::parsing::{blocks::BlockState, token::Nesting};

/// Paragraph block type (marker struct).
///
/// Paragraphs have no delimiters: they are the default leaf block when no
/// other block opener matches. Inline parsing is applied to their content.
pub struct Paragraph;

impl Paragraph {
    /// Alt chain of the rules allowed to end a paragraph early.
    pub const TERMINATORS: &'static str = "paragraph";
}

/// Consumes lines until a blank line or a line that starts another block.
pub fn rule(state: &mut BlockState<'_>, start: usize, end: usize, _silent: bool) -> bool {
    let mut line = start + 1;
    while line < end && !state.is_blank(line) {
        if state.interrupted_by(Paragraph::TERMINATORS, line, end) {
            break;
        }
        line += 1;
    }

    let content = state.lines[start..line]
        .iter()
        .map(|l| l.rest())
        .collect::<Vec<_>>()
        .join("\n");

    state.push("paragraph_open", "p", Nesting::Open);
    state.push_inline(content.trim());
    state.push("paragraph_close", "p", Nesting::Close);

    state.line = line;
    true
}
