use serde::Serialize;
use serde_json::Value;

use super::MentionKind;

/// One node of the output tree: a plain string or a typed element.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Node {
    Text(String),
    Element(Element),
}

impl Node {
    pub fn text(content: impl Into<String>) -> Self {
        Node::Text(content.into())
    }

    /// Empty strings are dropped from child arrays.
    pub fn is_empty_text(&self) -> bool {
        matches!(self, Node::Text(text) if text.is_empty())
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

/// Typed output elements, serialized as `{"type": "<snake_case name>", ...}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Element {
    Italic {
        content: Vec<Node>,
    },
    Bold {
        content: Vec<Node>,
    },
    Underline {
        content: Vec<Node>,
    },
    Spoiler {
        content: Vec<Node>,
    },
    Strikethrough {
        content: Vec<Node>,
    },
    /// Level 1 heading.
    Title {
        content: Vec<Node>,
    },
    /// Level 2 to 6 heading.
    Subtitle {
        content: Vec<Node>,
    },
    Subtext {
        content: Vec<Node>,
    },
    #[serde(rename = "text")]
    Paragraph {
        content: Vec<Node>,
    },
    Blockquote {
        content: Vec<Node>,
    },
    Link {
        content: Vec<Node>,
        url: String,
    },
    Emoji {
        id: String,
        name: String,
        animated: bool,
        url: String,
    },
    UnicodeEmoji {
        content: String,
    },
    CodeInline {
        content: String,
    },
    Mention {
        #[serde(rename = "subType")]
        sub_type: MentionKind,
        id: Option<String>,
        extra: Option<Value>,
    },
    List {
        items: Vec<Vec<Node>>,
    },
    CodeBlock {
        lang: String,
        content: String,
    },
    UnsupportedToken,
}

impl Element {
    pub const EMOJI_CDN: &'static str = "https://cdn.discordapp.com/emojis";

    /// Custom emoji with its CDN image URL; animated emoji are GIFs.
    pub fn emoji(id: impl Into<String>, name: impl Into<String>, animated: bool) -> Self {
        let id = id.into();
        let extension = if animated { "gif" } else { "png" };
        let url = format!("{}/{id}.{extension}", Self::EMOJI_CDN);
        Element::Emoji {
            id,
            name: name.into(),
            animated,
            url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn text_serializes_as_plain_string() {
        assert_eq!(serde_json::to_value(Node::text("hi")).unwrap(), json!("hi"));
    }

    #[test]
    fn paragraph_is_tagged_text() {
        let node = Node::from(Element::Paragraph {
            content: vec![Node::text("a")],
        });
        assert_eq!(
            serde_json::to_value(node).unwrap(),
            json!({ "type": "text", "content": ["a"] })
        );
    }

    #[test]
    fn mention_uses_camel_case_subtype_and_nulls() {
        let node = Node::from(Element::Mention {
            sub_type: MentionKind::Here,
            id: None,
            extra: None,
        });
        assert_eq!(
            serde_json::to_value(node).unwrap(),
            json!({ "type": "mention", "subType": "here", "id": null, "extra": null })
        );
    }

    #[test]
    fn emoji_url_depends_on_animation() {
        assert_eq!(
            serde_json::to_value(Element::emoji("555", "wave", true)).unwrap(),
            json!({
                "type": "emoji",
                "id": "555",
                "name": "wave",
                "animated": true,
                "url": "https://cdn.discordapp.com/emojis/555.gif",
            })
        );
        let Element::Emoji { url, .. } = Element::emoji("555", "wave", false) else {
            panic!("not an emoji");
        };
        assert_eq!(url, "https://cdn.discordapp.com/emojis/555.png");
    }

    #[test]
    fn unsupported_token_has_only_a_type() {
        assert_eq!(
            serde_json::to_value(Element::UnsupportedToken).unwrap(),
            json!({ "type": "unsupported_token" })
        );
    }

    #[test]
    fn list_items_are_nested_arrays() {
        let list = Element::List {
            items: vec![vec![Node::text("a")], vec![]],
        };
        assert_eq!(
            serde_json::to_value(list).unwrap(),
            json!({ "type": "list", "items": [["a"], []] })
        );
    }
}
