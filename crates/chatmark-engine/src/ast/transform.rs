use crate::{
    error::TransformError,
    parsing::token::{Token, TokenMeta},
    tree::{TokenTreeEntry, serialize_tokens},
};

use super::{Element, MentionResolver, Node, NoMentions};

/// Transforms a token stream into output nodes without mention enrichment.
pub fn transform(tokens: &[Token]) -> Result<Vec<Node>, TransformError> {
    transform_with(tokens, &NoMentions)
}

/// Transforms a token stream, asking `resolver` for the `extra` payload of
/// every mention that carries an id.
///
/// Root-level empty strings (thematic breaks) are kept; empty strings inside
/// `content` and `items` arrays are dropped.
pub fn transform_with<R>(tokens: &[Token], resolver: &R) -> Result<Vec<Node>, TransformError>
where
    R: MentionResolver + ?Sized,
{
    let tree = serialize_tokens(tokens)?;

    let mut nodes = Vec::with_capacity(tree.len());
    for entry in &tree {
        nodes.extend(render(entry, resolver)?);
    }

    log::debug!("transformed {} tokens into {} root nodes", tokens.len(), nodes.len());
    Ok(nodes)
}

fn render_children<R>(
    children: &[TokenTreeEntry<'_>],
    resolver: &R,
) -> Result<Vec<Node>, TransformError>
where
    R: MentionResolver + ?Sized,
{
    let mut nodes = Vec::with_capacity(children.len());
    for child in children {
        nodes.extend(render(child, resolver)?.into_iter().filter(|n| !n.is_empty_text()));
    }
    Ok(nodes)
}

/// Renders one entry. Most entries produce one node; `inline` entries
/// splice their children into the parent.
fn render<R>(entry: &TokenTreeEntry<'_>, resolver: &R) -> Result<Vec<Node>, TransformError>
where
    R: MentionResolver + ?Sized,
{
    let token = entry.token;
    let content = || render_children(&entry.children, resolver);

    let element = match token.kind.as_str() {
        "text" => return Ok(vec![Node::text(token.content.as_str())]),
        "softbreak" | "hardbreak" => return Ok(vec![Node::text("\n")]),
        "hr" => return Ok(vec![Node::text("")]),
        "inline" => return content(),

        "em_open" => Element::Italic { content: content()? },
        "strong_open" => Element::Bold { content: content()? },
        "underline_open" => Element::Underline { content: content()? },
        "spoiler_open" => Element::Spoiler { content: content()? },
        "s_open" => Element::Strikethrough { content: content()? },
        "link_open" => Element::Link {
            content: content()?,
            url: token.attr("href").unwrap_or_default().to_string(),
        },
        "heading_open" if token.tag == "h1" => Element::Title { content: content()? },
        "heading_open" => Element::Subtitle { content: content()? },
        "subtext_open" => Element::Subtext { content: content()? },
        "paragraph_open" => Element::Paragraph { content: content()? },
        "blockquote_open" => Element::Blockquote { content: content()? },
        "bullet_list_open" | "ordered_list_open" => {
            let items = entry
                .children
                .iter()
                .map(|item| render_children(&item.children, resolver))
                .collect::<Result<_, _>>()?;
            Element::List { items }
        }
        "fence" => Element::CodeBlock {
            lang: token.info.clone(),
            content: token.content.clone(),
        },
        "code_inline" => Element::CodeInline {
            content: token.content.clone(),
        },
        "unicode_emoji" => Element::UnicodeEmoji {
            content: token.content.clone(),
        },
        "emoji" => match &token.meta {
            Some(TokenMeta::Emoji { id, name, animated }) => {
                Element::emoji(id.as_str(), name.as_str(), *animated)
            }
            _ => unsupported(token),
        },
        "mention" => match &token.meta {
            Some(TokenMeta::Mention { kind, id }) => {
                let extra = match id {
                    Some(id) => resolver.resolve(*kind, id).map_err(|source| {
                        TransformError::Mention {
                            kind: *kind,
                            id: id.clone(),
                            source,
                        }
                    })?,
                    None => None,
                };
                Element::Mention {
                    sub_type: *kind,
                    id: id.clone(),
                    extra,
                }
            }
            _ => unsupported(token),
        },
        _ => unsupported(token),
    };

    Ok(vec![element.into()])
}

fn unsupported(token: &Token) -> Element {
    log::warn!("unsupported token `{}` (tag `{}`)", token.kind, token.tag);
    Element::UnsupportedToken
}
