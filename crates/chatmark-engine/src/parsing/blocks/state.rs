use crate::parsing::{
    ParserOptions,
    token::{Nesting, Token},
};

use super::BlockParser;

/// Local facts about one source line.
///
/// Lines are classified once, up front, so rules can test indentation and
/// blankness without rescanning.
#[derive(Debug, Clone, Copy)]
pub struct Line<'a> {
    pub text: &'a str,
    /// Columns of leading whitespace, with tabs expanded to multiples of 4.
    pub indent: usize,
    /// Byte offset of the first non-whitespace character.
    pub first_nonspace: usize,
    pub is_blank: bool,
}

impl<'a> Line<'a> {
    pub fn classify(text: &'a str) -> Self {
        let mut indent = 0usize;
        let mut first_nonspace = text.len();
        for (i, b) in text.bytes().enumerate() {
            match b {
                b' ' => indent += 1,
                b'\t' => indent += 4 - indent % 4,
                _ => {
                    first_nonspace = i;
                    break;
                }
            }
        }

        Self {
            text,
            indent,
            first_nonspace,
            is_blank: first_nonspace == text.len(),
        }
    }

    /// Text after leading whitespace.
    pub fn rest(&self) -> &'a str {
        &self.text[self.first_nonspace..]
    }

    /// Whether the line may start a block construct other than a paragraph.
    pub fn can_open_block(&self) -> bool {
        self.indent < BlockState::CODE_INDENT
    }

    /// Removes up to `columns` columns of leading whitespace.
    pub fn strip_columns(&self, columns: usize) -> &'a str {
        let mut col = 0usize;
        for (i, b) in self.text.bytes().enumerate() {
            if col >= columns {
                return &self.text[i..];
            }
            match b {
                b' ' => col += 1,
                b'\t' => col += 4 - col % 4,
                _ => return &self.text[i..],
            }
        }
        ""
    }
}

/// Mutable state of one block tokenizing run over a container's content.
pub struct BlockState<'a> {
    pub lines: Vec<Line<'a>>,
    /// Next line to tokenize; rules set it past the lines they consume.
    pub line: usize,
    pub tokens: Vec<Token>,
    /// Container nesting depth of this run.
    pub depth: usize,
    pub options: &'a ParserOptions,
    pub(crate) parser: &'a BlockParser,
}

impl<'a> BlockState<'a> {
    /// Indentation at which a line can no longer start a block construct.
    pub const CODE_INDENT: usize = 4;

    pub fn new(src: &'a str, parser: &'a BlockParser, options: &'a ParserOptions) -> Self {
        let mut lines: Vec<Line<'a>> = src.split('\n').map(Line::classify).collect();
        while lines.last().is_some_and(|line| line.is_blank) {
            lines.pop();
        }

        Self {
            lines,
            line: 0,
            tokens: Vec::new(),
            depth: 0,
            options,
            parser,
        }
    }

    pub fn push(&mut self, kind: &str, tag: &str, nesting: Nesting) -> &mut Token {
        self.tokens.push(Token::new(kind, tag, nesting));
        let last = self.tokens.len() - 1;
        &mut self.tokens[last]
    }

    /// Pushes an `inline` token holding `content` for the inline pass.
    pub fn push_inline(&mut self, content: impl Into<String>) {
        let token = self.push("inline", "", Nesting::Leaf);
        token.content = content.into();
        token.children = Some(Vec::new());
    }

    pub fn is_blank(&self, line: usize) -> bool {
        self.lines.get(line).is_none_or(|l| l.is_blank)
    }

    /// Whether another container level is allowed below this run.
    pub fn can_nest(&self) -> bool {
        self.depth + 1 < self.options.max_nesting
    }

    /// Whether any rule of the `chain` alt chain would start a block at `line`.
    pub fn interrupted_by(&mut self, chain: &str, line: usize, end: usize) -> bool {
        let parser = self.parser;
        let saved = self.line;
        let hit = parser
            .ruler
            .rules_for(chain)
            .any(|rule| rule(self, line, end, true));
        self.line = saved;
        hit
    }

    /// Tokenizes `src` as the content of a container and appends the tokens.
    pub fn nest(&mut self, src: &str) {
        let parser = self.parser;
        let mut inner = BlockState::new(src, parser, self.options);
        inner.depth = self.depth + 1;
        let end = inner.lines.len();
        parser.tokenize(&mut inner, 0, end);
        self.tokens.append(&mut inner.tokens);
    }
}
