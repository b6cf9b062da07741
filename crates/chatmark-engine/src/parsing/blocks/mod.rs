//! # Block Parsing
//!
//! Line-oriented block tokenizing.
//!
//! ## Parsing Phases
//!
//! 1. **Line Classification** (`state`): each line is classified once into a
//!    [`Line`] holding local facts (indentation, first content byte, blank status)
//!
//! 2. **Block Construction**: the [`BlockParser`] walks the lines; at every
//!    block start it tries the rule chain in order and the first rule that
//!    accepts consumes its lines and emits tokens
//!
//! ## Modules
//!
//! - **`state`**: `BlockState` and `Line`
//! - **`kinds`**: one module per block type with its owned delimiters and rule
//!
//! ## Key Invariants
//!
//! - Containers (blockquotes, list items) re-tokenize their stripped content
//!   as a nested run; past `max_nesting` the content degrades to paragraphs
//! - Fenced code blocks are raw zones: no block or inline parsing inside
//! - Leaf blocks with inline content emit an `inline` token for the inline pass

pub mod kinds;
pub mod state;

pub use state::{BlockState, Line};

use crate::parsing::ruler::Ruler;

/// A block rule: `(state, start_line, end_line, silent)`. In silent mode a
/// rule only reports whether a block would start at `start_line`.
pub type BlockRule = fn(&mut BlockState<'_>, usize, usize, bool) -> bool;

pub struct BlockParser {
    pub ruler: Ruler<BlockRule>,
}

impl BlockParser {
    pub fn new() -> Self {
        let mut ruler: Ruler<BlockRule> = Ruler::new();
        ruler.push_with_alt(
            "fence",
            kinds::code_fence::rule,
            &["paragraph", "blockquote", "list"],
        );
        ruler.push_with_alt("subtext", kinds::subtext::rule, &["paragraph", "blockquote"]);
        ruler.push_with_alt(
            "blockquote",
            kinds::block_quote::rule,
            &["paragraph", "blockquote", "list"],
        );
        ruler.push_with_alt(
            "hr",
            kinds::thematic_break::rule,
            &["paragraph", "blockquote", "list"],
        );
        ruler.push_with_alt("list", kinds::list::rule, &["paragraph", "blockquote"]);
        ruler.push_with_alt("heading", kinds::heading::rule, &["paragraph", "blockquote"]);
        ruler.push("paragraph", kinds::paragraph::rule);

        Self { ruler }
    }

    /// Tokenizes lines `start..end` of `state`.
    pub fn tokenize(&self, state: &mut BlockState<'_>, start: usize, end: usize) {
        state.line = start;

        while state.line < end {
            while state.line < end && state.is_blank(state.line) {
                state.line += 1;
            }
            if state.line >= end {
                break;
            }

            let line = state.line;
            let matched = self.ruler.rules().any(|rule| rule(state, line, end, false));

            if !matched || state.line <= line {
                log::trace!("no block rule consumed line {line}");
                state.line = line + 1;
            }
        }
    }
}

impl Default for BlockParser {
    fn default() -> Self {
        Self::new()
    }
}
