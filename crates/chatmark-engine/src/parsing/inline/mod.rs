//! # Inline Parsing
//!
//! Rule-driven inline tokenizing for the content of `inline` block tokens.
//!
//! ## Architecture
//!
//! The [`InlineParser`] walks the content with an [`InlineState`]. At every
//! position it tries the rule chain in order; the first rule that accepts
//! advances the cursor. When no rule accepts, the character goes into the
//! pending literal buffer. After tokenizing, the post-processing chain
//! resolves delimiter runs into emphasis boundaries and joins text.
//!
//! ## Modules
//!
//! - **`state`**: `InlineState` (cursor, pending text, tokens, delimiter scopes)
//! - **`delimiters`**: flanking classification and open/close pairing
//! - **`rules`**: one module per rule, each owning its syntax constants
//!
//! ## Rule Order
//!
//! `text`, `linkify`, `newline`, `escape`, `backticks`, `strikethrough`,
//! `emphasis`, `link`, `autolink`, `entity`, `mention`, `unicode_emoji`.
//! Post-processing: `balance_pairs`, `strikethrough`, `emphasis`,
//! `fragments_join`.

pub mod delimiters;
pub mod rules;
pub mod state;

pub use delimiters::Delimiter;
pub use state::InlineState;

use crate::parsing::{ParserOptions, ruler::Ruler, token::Token};

/// A tokenizing rule. `silent` asks "would you match here?" without
/// emitting tokens; the cursor still advances on success.
pub type InlineRule = fn(&mut InlineState<'_>, bool) -> bool;

/// A pass over the finished token list of one inline run.
pub type PostRule = fn(&mut InlineState<'_>);

pub struct InlineParser {
    pub ruler: Ruler<InlineRule>,
    pub post: Ruler<PostRule>,
}

impl InlineParser {
    pub fn new() -> Self {
        let mut ruler: Ruler<InlineRule> = Ruler::new();
        ruler.push("text", rules::text::tokenize);
        ruler.push("linkify", rules::linkify::tokenize);
        ruler.push("newline", rules::newline::tokenize);
        ruler.push("escape", rules::escape::tokenize);
        ruler.push("backticks", rules::backticks::tokenize);
        ruler.push("strikethrough", rules::strikethrough::tokenize);
        ruler.push("emphasis", rules::emphasis::tokenize);
        ruler.push("link", rules::link::tokenize);
        ruler.push("autolink", rules::autolink::tokenize);
        ruler.push("entity", rules::entity::tokenize);
        ruler.push("mention", rules::mention::tokenize);
        ruler.push("unicode_emoji", rules::unicode_emoji::tokenize);

        let mut post: Ruler<PostRule> = Ruler::new();
        post.push("balance_pairs", delimiters::balance_pairs);
        post.push("strikethrough", rules::strikethrough::post_process);
        post.push("emphasis", rules::emphasis::post_process);
        post.push("fragments_join", rules::fragments::join);

        Self { ruler, post }
    }

    /// Tokenizes `src` and runs the post-processing chain.
    pub fn parse(&self, src: &str, options: &ParserOptions) -> Vec<Token> {
        let mut state = InlineState::new(src, self, options);
        self.tokenize(&mut state);
        for rule in self.post.rules() {
            rule(&mut state);
        }
        state.tokens
    }

    /// Tokenizes `state.src[state.pos..state.pos_max]`.
    ///
    /// Re-entered by rules that own a nested inline scope (link labels).
    pub fn tokenize(&self, state: &mut InlineState<'_>) {
        let end = state.pos_max;

        while state.pos < end {
            let prev = state.pos;
            let mut ok = false;

            if state.level < state.options.max_nesting {
                for rule in self.ruler.rules() {
                    if rule(state, false) {
                        debug_assert!(state.pos > prev, "inline rule did not advance");
                        ok = state.pos > prev;
                        break;
                    }
                }
            }

            if ok {
                if state.pos >= end {
                    break;
                }
                continue;
            }

            state.consume_char();
        }

        if !state.pending.is_empty() {
            state.push_pending();
        }
    }

    /// Advances past whatever construct starts at `state.pos` without
    /// emitting tokens. Results are cached per start position.
    pub fn skip_token(&self, state: &mut InlineState<'_>) {
        let start = state.pos;
        if let Some(&end) = state.cache.get(&start) {
            state.pos = end;
            return;
        }

        let mut ok = false;
        if state.level < state.options.max_nesting {
            for rule in self.ruler.rules() {
                state.level += 1;
                ok = rule(state, true);
                state.level -= 1;
                if ok {
                    break;
                }
            }
        } else {
            state.pos = state.pos_max;
        }

        if !ok {
            state.pos += state.src[state.pos..]
                .chars()
                .next()
                .map_or(1, char::len_utf8);
        }
        state.cache.insert(start, state.pos);
    }
}

impl Default for InlineParser {
    fn default() -> Self {
        Self::new()
    }
}
