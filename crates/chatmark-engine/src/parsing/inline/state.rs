use std::collections::HashMap;

use crate::parsing::{
    ParserOptions,
    token::{Nesting, Token},
};

use super::{
    InlineParser,
    delimiters::{DelimRun, Delimiter, scan_delims},
};

/// Mutable state of one inline tokenizing run.
///
/// Rules advance `pos`, accumulate literal characters in `pending` and push
/// tokens. Opening a group (e.g. a link) starts a fresh delimiter scope; the
/// scope is stashed in `nested_scopes` when the group closes, so emphasis
/// never pairs across the group boundary.
pub struct InlineState<'a> {
    pub src: &'a str,
    pub pos: usize,
    pub pos_max: usize,
    pub level: usize,
    pub pending: String,
    pub tokens: Vec<Token>,
    /// Delimiters of the scope currently being tokenized.
    pub delimiters: Vec<Delimiter>,
    /// Delimiter lists of closed nested scopes.
    pub nested_scopes: Vec<Vec<Delimiter>>,
    pub link_level: usize,
    pub options: &'a ParserOptions,
    pub(crate) parser: &'a InlineParser,
    outer_scopes: Vec<Vec<Delimiter>>,
    /// `skip_token` results keyed by start position.
    pub(crate) cache: HashMap<usize, usize>,
}

impl<'a> InlineState<'a> {
    pub fn new(src: &'a str, parser: &'a InlineParser, options: &'a ParserOptions) -> Self {
        Self {
            src,
            pos: 0,
            pos_max: src.len(),
            level: 0,
            pending: String::new(),
            tokens: Vec::new(),
            delimiters: Vec::new(),
            nested_scopes: Vec::new(),
            link_level: 0,
            options,
            parser,
            outer_scopes: Vec::new(),
            cache: HashMap::new(),
        }
    }

    /// Byte at `pos`, if inside the current bounds.
    pub fn byte_at(&self, pos: usize) -> Option<u8> {
        if pos < self.pos_max {
            self.src.as_bytes().get(pos).copied()
        } else {
            None
        }
    }

    /// The unconsumed part of the current bounds.
    pub fn rest(&self) -> &'a str {
        &self.src[self.pos..self.pos_max]
    }

    /// Flushes `pending` into a `text` token.
    pub fn push_pending(&mut self) {
        let content = std::mem::take(&mut self.pending);
        self.tokens.push(Token::text(content));
    }

    /// Pushes a new token, flushing pending text first.
    pub fn push(&mut self, kind: &str, tag: &str, nesting: Nesting) -> &mut Token {
        if !self.pending.is_empty() {
            self.push_pending();
        }

        match nesting {
            Nesting::Open => {
                self.level += 1;
                self.outer_scopes.push(std::mem::take(&mut self.delimiters));
            }
            Nesting::Close => {
                self.level = self.level.saturating_sub(1);
                if let Some(outer) = self.outer_scopes.pop() {
                    let inner = std::mem::replace(&mut self.delimiters, outer);
                    self.nested_scopes.push(inner);
                }
            }
            Nesting::Leaf => {}
        }

        self.tokens.push(Token::new(kind, tag, nesting));
        let last = self.tokens.len() - 1;
        &mut self.tokens[last]
    }

    /// Moves the character at `pos` into `pending`.
    pub fn consume_char(&mut self) {
        if let Some(ch) = self.src[self.pos..].chars().next() {
            self.pending.push(ch);
            self.pos += ch.len_utf8();
        } else {
            self.pos += 1;
        }
    }

    pub fn scan_delims(&self, start: usize, can_split_word: bool) -> DelimRun {
        scan_delims(self.src, start, self.pos_max, can_split_word)
    }
}
