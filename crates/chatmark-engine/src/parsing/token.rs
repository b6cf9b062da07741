use serde::Serialize;

use crate::ast::MentionKind;

/// Whether a token opens a group, closes one, or stands alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Nesting {
    Open,
    Close,
    Leaf,
}

/// Structured payload carried by extractor tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TokenMeta {
    Mention {
        kind: MentionKind,
        id: Option<String>,
    },
    Emoji {
        id: String,
        name: String,
        animated: bool,
    },
}

/// A unit of the flat token stream produced by [`Parser::parse`].
///
/// Group boundaries are expressed with `*_open` / `*_close` kinds and the
/// matching [`Nesting`]. Tokens of kind `inline` carry the tokenized inline
/// content of their block in `children`.
///
/// [`Parser::parse`]: crate::parsing::Parser::parse
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    /// Type string, e.g. `text`, `em_open`, `mention`, `fence`.
    pub kind: String,
    /// Semantic tag, e.g. `em`, `h2`, `code`.
    pub tag: String,
    pub nesting: Nesting,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub content: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub markup: String,
    /// Fence info string.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub info: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attrs: Vec<(String, String)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<TokenMeta>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Token>>,
}

impl Token {
    pub fn new(kind: impl Into<String>, tag: impl Into<String>, nesting: Nesting) -> Self {
        Self {
            kind: kind.into(),
            tag: tag.into(),
            nesting,
            content: String::new(),
            markup: String::new(),
            info: String::new(),
            attrs: Vec::new(),
            meta: None,
            children: None,
        }
    }

    /// Shorthand for a literal `text` leaf.
    pub fn text(content: impl Into<String>) -> Self {
        let mut token = Self::new("text", "", Nesting::Leaf);
        token.content = content.into();
        token
    }

    /// Looks up an attribute value by name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn set_attr(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.attrs.iter_mut().find(|(key, _)| key == name) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((name.to_string(), value)),
        }
    }

    /// Turns this token into a group boundary in place.
    ///
    /// Used by the delimiter passes, which rewrite placeholder tokens
    /// without moving them.
    pub(crate) fn rewrite(&mut self, tag: &str, nesting: Nesting, markup: String) {
        self.kind = match nesting {
            Nesting::Open => format!("{tag}_open"),
            Nesting::Close => format!("{tag}_close"),
            Nesting::Leaf => tag.to_string(),
        };
        self.tag = tag.to_string();
        self.nesting = nesting;
        self.markup = markup;
        self.content.clear();
    }
}
