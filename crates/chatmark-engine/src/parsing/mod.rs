pub mod blocks;
pub mod inline;
pub mod ruler;
pub mod snapshot;
pub mod token;

use blocks::{BlockParser, BlockState};
use inline::InlineParser;
use token::Token;

/// Limits and switches shared by the block and inline passes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserOptions {
    /// Deepest container / inline group nesting before content degrades to
    /// plain paragraphs and text.
    pub max_nesting: usize,
    /// Turn bare `http(s)://` URLs into links.
    pub linkify: bool,
}

impl ParserOptions {
    pub const DEFAULT_MAX_NESTING: usize = 20;
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            max_nesting: Self::DEFAULT_MAX_NESTING,
            linkify: true,
        }
    }
}

/// Chat markup parser: a block rule chain followed by an inline rule chain.
///
/// Both chains are public [`Ruler`](ruler::Ruler)s, so rules can be disabled
/// or new ones inserted before an existing anchor.
pub struct Parser {
    pub options: ParserOptions,
    pub block: BlockParser,
    pub inline: InlineParser,
}

impl Parser {
    pub fn new() -> Self {
        Self::with_options(ParserOptions::default())
    }

    pub fn with_options(options: ParserOptions) -> Self {
        Self {
            options,
            block: BlockParser::new(),
            inline: InlineParser::new(),
        }
    }

    /// Parses `src` into a flat token stream. `inline` tokens carry their
    /// tokenized content in `children`.
    pub fn parse(&self, src: &str) -> Vec<Token> {
        let src = normalize(src);

        let mut state = BlockState::new(&src, &self.block, &self.options);
        let end = state.lines.len();
        self.block.tokenize(&mut state, 0, end);
        let mut tokens = state.tokens;

        let mut inline_count = 0usize;
        for token in tokens.iter_mut().filter(|t| t.kind == "inline") {
            token.children = Some(self.inline.parse(&token.content, &self.options));
            inline_count += 1;
        }

        log::debug!(
            "parsed {} bytes into {} block tokens ({} inline runs)",
            src.len(),
            tokens.len(),
            inline_count
        );
        tokens
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

/// Unifies line endings to `\n` and replaces NUL with U+FFFD.
fn normalize(src: &str) -> String {
    src.replace("\r\n", "\n")
        .replace('\r', "\n")
        .replace('\0', "\u{FFFD}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn normalizes_line_endings_and_nul() {
        assert_eq!(normalize("a\r\nb\rc\0"), "a\nb\nc\u{FFFD}");
    }

    #[test]
    fn empty_input_has_no_tokens() {
        assert!(Parser::new().parse("").is_empty());
        assert!(Parser::new().parse("\n\n  \n").is_empty());
    }

    #[test]
    fn inline_tokens_receive_children() {
        let tokens = Parser::new().parse("# *hi*");
        assert_eq!(tokens[1].kind, "inline");
        let children: Vec<_> = tokens[1]
            .children
            .iter()
            .flatten()
            .map(|t| t.kind.as_str())
            .collect();
        assert_eq!(children, vec!["em_open", "text", "em_close"]);
    }

    #[test]
    fn crlf_input_parses_like_lf() {
        let parser = Parser::new();
        assert_eq!(parser.parse("a\r\nb"), parser.parse("a\nb"));
    }

    #[test]
    fn disabled_rule_leaves_syntax_literal() {
        let mut parser = Parser::new();
        parser.inline.ruler.disable("mention").unwrap();
        let tokens = parser.parse("<@1>");
        let children = tokens[1].children.as_deref().unwrap_or_default();
        assert_eq!(children, &[Token::text("<@1>")]);
    }

    #[test]
    fn nesting_limit_degrades_quotes_to_paragraphs() {
        let parser = Parser::with_options(ParserOptions {
            max_nesting: 2,
            ..ParserOptions::default()
        });
        let tokens = parser.parse("> > > deep");
        let quotes = tokens.iter().filter(|t| t.kind == "blockquote_open").count();
        assert_eq!(quotes, 1);
        assert_eq!(tokens[2].content, "> > deep");
    }
}
