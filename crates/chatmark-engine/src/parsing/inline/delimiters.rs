//! Delimiter runs: flanking classification and open/close pairing.
//!
//! Emphasis-like rules (`*`, `_`, `|`, `~`) do not decide nesting while
//! scanning. They record a [`Delimiter`] per placeholder token and leave the
//! pairing to [`balance_pairs`], which runs once per inline scope after
//! tokenizing finishes. Tag selection then happens in each rule's own
//! post-processing pass.

use std::collections::HashMap;

use super::InlineState;

/// One delimiter descriptor, pointing at its placeholder token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delimiter {
    /// Marker character of the run.
    pub marker: char,
    /// Total length of the run this delimiter belongs to.
    pub length: usize,
    /// Index of the placeholder token in the inline token list.
    pub token: usize,
    /// Index (into the same delimiter list) of the matched closer.
    pub end: Option<usize>,
    pub open: bool,
    pub close: bool,
}

/// Result of scanning a run of identical markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelimRun {
    pub length: usize,
    pub can_open: bool,
    pub can_close: bool,
}

/// Classifies the marker run starting at `start` of `src[..max]`.
///
/// `can_split_word` relaxes intraword matching the way `*` does; `_`
/// passes false so `snake_case_words` stay literal.
pub fn scan_delims(src: &str, start: usize, max: usize, can_split_word: bool) -> DelimRun {
    let bytes = src.as_bytes();
    let Some(&marker) = bytes.get(start) else {
        return DelimRun {
            length: 0,
            can_open: false,
            can_close: false,
        };
    };

    let last_char = src[..start].chars().next_back().unwrap_or(' ');

    let mut pos = start;
    while pos < max && bytes[pos] == marker {
        pos += 1;
    }
    let length = pos - start;

    let next_char = if pos < max {
        src[pos..].chars().next().unwrap_or(' ')
    } else {
        ' '
    };

    let last_punct = is_punct(last_char);
    let next_punct = is_punct(next_char);
    let last_space = last_char.is_whitespace();
    let next_space = next_char.is_whitespace();

    let left_flanking = !next_space && (!next_punct || last_space || last_punct);
    let right_flanking = !last_space && (!last_punct || next_space || next_punct);

    DelimRun {
        length,
        can_open: left_flanking && (can_split_word || !right_flanking || last_punct),
        can_close: right_flanking && (can_split_word || !left_flanking || next_punct),
    }
}

/// ASCII punctuation plus the common Unicode punctuation blocks.
pub fn is_punct(c: char) -> bool {
    c.is_ascii_punctuation()
        || matches!(
            c,
            '\u{00A1}'
                | '\u{00A7}'
                | '\u{00AB}'
                | '\u{00B6}'
                | '\u{00B7}'
                | '\u{00BB}'
                | '\u{00BF}'
                | '\u{2010}'..='\u{2027}'
                | '\u{2030}'..='\u{205E}'
                | '\u{3001}'..='\u{3003}'
                | '\u{3008}'..='\u{3011}'
                | '\u{3014}'..='\u{301F}'
                | '\u{FF01}'..='\u{FF0F}'
                | '\u{FF1A}'..='\u{FF20}'
        )
}

/// Pairs openers with closers inside one delimiter list.
///
/// A closer looks back for the nearest open, unmatched opener with the same
/// marker, skipping the run it belongs to and any span already matched
/// (tracked with a jump table). Runs that can both open and close obey the
/// rule of three. On success the opener's `end` is set and both sides lose
/// the ability to match again.
pub fn link_pairs(delimiters: &mut [Delimiter]) {
    if delimiters.is_empty() {
        return;
    }

    let mut openers_bottom: HashMap<char, [isize; 6]> = HashMap::new();
    let mut jumps: Vec<usize> = Vec::with_capacity(delimiters.len());
    let mut header = 0usize;
    let mut last_token: isize = -2;

    for closer_idx in 0..delimiters.len() {
        jumps.push(0);
        let closer = delimiters[closer_idx];

        // Delimiters of the closer's own run never match each other.
        if delimiters[header].marker != closer.marker || last_token != closer.token as isize - 1 {
            header = closer_idx;
        }
        last_token = closer.token as isize;

        if !closer.close {
            continue;
        }

        let class = (if closer.open { 3 } else { 0 }) + closer.length % 3;
        let bottoms = openers_bottom.entry(closer.marker).or_insert([-1; 6]);
        let min_opener = bottoms[class];

        let mut opener_idx = header as isize - jumps[header] as isize - 1;
        let mut new_min = opener_idx;

        while opener_idx > min_opener {
            let oi = opener_idx as usize;
            let opener = delimiters[oi];

            if opener.marker == closer.marker && opener.open && opener.end.is_none() {
                let odd_match = (opener.close || closer.open)
                    && (opener.length + closer.length) % 3 == 0
                    && (opener.length % 3 != 0 || closer.length % 3 != 0);

                if !odd_match {
                    let last_jump = if oi > 0 && !delimiters[oi - 1].open {
                        jumps[oi - 1] + 1
                    } else {
                        0
                    };

                    jumps[closer_idx] = closer_idx - oi + last_jump;
                    jumps[oi] = last_jump;

                    delimiters[closer_idx].open = false;
                    delimiters[oi].end = Some(closer_idx);
                    delimiters[oi].close = false;
                    new_min = -1;
                    last_token = -2;
                    break;
                }
            }

            opener_idx -= jumps[oi] as isize + 1;
        }

        if new_min != -1 {
            bottoms[class] = new_min;
        }
    }
}

/// Post-processing pass: pairs delimiters in every inline scope.
pub fn balance_pairs(state: &mut InlineState<'_>) {
    link_pairs(&mut state.delimiters);
    for scope in &mut state.nested_scopes {
        link_pairs(scope);
    }
}
