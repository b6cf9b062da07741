use crate::parsing::{
    blocks::{BlockState, state::Line},
    token::Nesting,
};

/// The marker family of a list. Items of one list share a family; a marker
/// of another family ends the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListMarker {
    /// `-`, `*` or `+`.
    Bullet(u8),
    /// Digits followed by `.` or `)`.
    Ordered(u8),
}

/// The opening line of a list item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemStart<'a> {
    pub marker: ListMarker,
    pub number: Option<u64>,
    pub markup: String,
    /// Column where the item's content begins; continuation lines must be
    /// indented at least this far.
    pub content_col: usize,
    /// Content on the marker line.
    pub body: &'a str,
}

impl ItemStart<'_> {
    pub fn is_empty(&self) -> bool {
        self.body.trim().is_empty()
    }
}

/// Bullet and ordered lists with owned marker constants.
pub struct List;

impl List {
    pub const BULLETS: &'static [u8] = b"-*+";
    pub const ORDERED_DELIMITERS: &'static [u8] = b".)";
    pub const MAX_DIGITS: usize = 9;

    /// More spaces than this after the marker are content, not padding.
    const MAX_PADDING: usize = 4;

    pub fn item_start<'a>(line: &Line<'a>) -> Option<ItemStart<'a>> {
        if !line.can_open_block() {
            return None;
        }
        let rest = line.rest();
        let bytes = rest.as_bytes();
        let first = *bytes.first()?;

        let (marker, number, marker_len) = if Self::BULLETS.contains(&first) {
            (ListMarker::Bullet(first), None, 1)
        } else {
            let digits = bytes.iter().take_while(|b| b.is_ascii_digit()).count();
            if digits == 0 || digits > Self::MAX_DIGITS {
                return None;
            }
            let delimiter = *bytes.get(digits)?;
            if !Self::ORDERED_DELIMITERS.contains(&delimiter) {
                return None;
            }
            let number = rest[..digits].parse().ok()?;
            (ListMarker::Ordered(delimiter), Some(number), digits + 1)
        };

        let after = &rest[marker_len..];
        if !(after.is_empty() || after.starts_with([' ', '\t'])) {
            return None;
        }

        let padding = after.bytes().take_while(|&b| b == b' ' || b == b'\t').count();
        let marker_col = line.indent + marker_len;
        let (content_col, body) = if after.trim().is_empty() {
            (marker_col + 1, "")
        } else if padding > Self::MAX_PADDING {
            (marker_col + 1, &after[1..])
        } else {
            (marker_col + padding, &after[padding..])
        };

        Some(ItemStart {
            marker,
            number,
            markup: rest[..marker_len].to_string(),
            content_col,
            body,
        })
    }
}

/// Collects the lines of one item, starting at the marker line `start`.
///
/// Returns the item body and the index of its last non-blank line.
fn collect_item<'a>(
    state: &mut BlockState<'a>,
    item: &ItemStart<'a>,
    start: usize,
    end: usize,
) -> (Vec<&'a str>, usize) {
    let mut body = vec![item.body];
    let mut last = start;
    let mut line = start + 1;

    while line < end {
        let current = state.lines[line];
        if current.is_blank {
            body.push("");
        } else if current.indent >= item.content_col {
            body.push(current.strip_columns(item.content_col));
            last = line;
        } else if state.is_blank(line - 1)
            || List::item_start(&current).is_some()
            || state.interrupted_by("paragraph", line, end)
        {
            break;
        } else {
            body.push(current.rest());
            last = line;
        }
        line += 1;
    }

    body.truncate(last - start + 1);
    (body, last)
}

pub fn rule(state: &mut BlockState<'_>, start: usize, end: usize, silent: bool) -> bool {
    if !state.can_nest() {
        return false;
    }
    let Some(first) = List::item_start(&state.lines[start]) else {
        return false;
    };

    // Only a non-empty bullet or an ordered list starting at 1 may cut a
    // paragraph short.
    if silent {
        return !first.is_empty() && first.number.is_none_or(|n| n == 1);
    }

    let family = first.marker;
    let (kind, tag) = match family {
        ListMarker::Bullet(_) => ("bullet_list", "ul"),
        ListMarker::Ordered(_) => ("ordered_list", "ol"),
    };

    let open = state.push(&format!("{kind}_open"), tag, Nesting::Open);
    open.markup = first.markup.clone();
    if let Some(number) = first.number.filter(|&n| n != 1) {
        open.set_attr("start", number.to_string());
    }

    let mut item = first;
    let mut line = start;
    loop {
        let (body, last) = collect_item(state, &item, line, end);

        state.push("list_item_open", "li", Nesting::Open).markup = item.markup.clone();
        state.nest(&body.join("\n"));
        state.push("list_item_close", "li", Nesting::Close).markup = item.markup.clone();

        state.line = last + 1;

        let mut next = last + 1;
        while next < end && state.is_blank(next) {
            next += 1;
        }
        match (next < end)
            .then(|| List::item_start(&state.lines[next]))
            .flatten()
        {
            Some(next_item) if next_item.marker == family => {
                item = next_item;
                line = next;
            }
            _ => break,
        }
    }

    state.push(&format!("{kind}_close"), tag, Nesting::Close).markup = item.markup;
    true
}
