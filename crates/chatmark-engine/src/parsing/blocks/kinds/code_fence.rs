use crate::parsing::{blocks::BlockState, token::Nesting};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FenceKind {
    Backticks,
    Tildes,
}

impl FenceKind {
    pub fn marker(self) -> u8 {
        match self {
            FenceKind::Backticks => b'`',
            FenceKind::Tildes => b'~',
        }
    }
}

/// A fence line: its kind and the length of its marker run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FenceSig {
    pub kind: FenceKind,
    pub len: usize,
}

/// Fenced code block. A raw zone: no block or inline parsing inside.
pub struct CodeFence;

impl CodeFence {
    pub const BACKTICKS: &'static str = "```";
    pub const TILDES: &'static str = "~~~";

    /// Detects a fence marker run at the start of `remainder`.
    pub fn sig(remainder: &str) -> Option<FenceSig> {
        let kind = if remainder.starts_with(Self::BACKTICKS) {
            FenceKind::Backticks
        } else if remainder.starts_with(Self::TILDES) {
            FenceKind::Tildes
        } else {
            return None;
        };
        let len = remainder
            .bytes()
            .take_while(|&b| b == kind.marker())
            .count();
        Some(FenceSig { kind, len })
    }

    /// Whether `remainder` closes a fence opened with `open`: same marker,
    /// at least as long, nothing but whitespace after it.
    pub fn closes(open: FenceSig, remainder: &str) -> bool {
        match Self::sig(remainder) {
            Some(sig) => {
                sig.kind == open.kind
                    && sig.len >= open.len
                    && remainder[sig.len..].trim().is_empty()
            }
            None => false,
        }
    }
}

pub fn rule(state: &mut BlockState<'_>, start: usize, end: usize, silent: bool) -> bool {
    let first = state.lines[start];
    if !first.can_open_block() {
        return false;
    }
    let Some(open) = CodeFence::sig(first.rest()) else {
        return false;
    };

    let info = first.rest()[open.len..].trim();
    if open.kind == FenceKind::Backticks && info.contains('`') {
        return false;
    }
    if silent {
        return true;
    }

    let mut close = None;
    for line in start + 1..end {
        let candidate = state.lines[line];
        if candidate.can_open_block() && CodeFence::closes(open, candidate.rest()) {
            close = Some(line);
            break;
        }
    }

    let body_end = close.unwrap_or(end);
    let mut content = String::new();
    for line in &state.lines[start + 1..body_end] {
        content.push_str(line.strip_columns(first.indent));
        content.push('\n');
    }

    let markup = first.rest()[..open.len].to_string();
    let info = info.to_string();
    let token = state.push("fence", "code", Nesting::Leaf);
    token.content = content;
    token.markup = markup;
    token.info = info;

    state.line = close.map_or(end, |line| line + 1);
    true
}
