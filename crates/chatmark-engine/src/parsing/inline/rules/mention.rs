//! Chat mentions and custom emoji.
//!
//! - `@everyone` / `@here`, standing alone between whitespace
//! - `<@ID>` user, `<@&ID>` role, `<#ID>` channel
//! - `<:NAME:ID>` and animated `<a:NAME:ID>` custom emoji

use std::sync::OnceLock;

use regex::Regex;

use crate::{
    ast::MentionKind,
    parsing::{
        inline::InlineState,
        token::{Nesting, TokenMeta},
    },
};

pub struct Mention;

impl Mention {
    fn broadcast_regex() -> &'static Regex {
        static BROADCAST: OnceLock<Regex> = OnceLock::new();
        BROADCAST.get_or_init(|| {
            Regex::new(r"^@(everyone|here)(?:$|\s)").expect("Invalid broadcast mention regex")
        })
    }

    fn entity_regex() -> &'static Regex {
        static ENTITY: OnceLock<Regex> = OnceLock::new();
        ENTITY.get_or_init(|| Regex::new(r"^<(@&|@|#)([0-9]+)>").expect("Invalid mention regex"))
    }

    fn emoji_regex() -> &'static Regex {
        static EMOJI: OnceLock<Regex> = OnceLock::new();
        EMOJI.get_or_init(|| Regex::new(r"^<(a?):([^:>]+):([0-9]+)>").expect("Invalid emoji regex"))
    }

    fn kind_for_sigil(sigil: &str) -> MentionKind {
        match sigil {
            "@&" => MentionKind::Role,
            "#" => MentionKind::Channel,
            _ => MentionKind::User,
        }
    }
}

enum Extracted {
    Mention { kind: MentionKind, id: Option<String> },
    Emoji { id: String, name: String, animated: bool },
}

fn extract(state: &InlineState<'_>) -> Option<(Extracted, usize)> {
    let rest = state.rest();

    if rest.starts_with('@') {
        let starts_word = state.src[..state.pos]
            .chars()
            .next_back()
            .is_none_or(char::is_whitespace);
        if !starts_word {
            return None;
        }
        let caps = Mention::broadcast_regex().captures(rest)?;
        let kind = if &caps[1] == "everyone" {
            MentionKind::Everyone
        } else {
            MentionKind::Here
        };
        return Some((Extracted::Mention { kind, id: None }, 1 + caps[1].len()));
    }

    if let Some(caps) = Mention::entity_regex().captures(rest) {
        let kind = Mention::kind_for_sigil(&caps[1]);
        let id = caps[2].to_string();
        return Some((
            Extracted::Mention {
                kind,
                id: Some(id),
            },
            caps[0].len(),
        ));
    }

    let caps = Mention::emoji_regex().captures(rest)?;
    Some((
        Extracted::Emoji {
            id: caps[3].to_string(),
            name: caps[2].to_string(),
            animated: &caps[1] == "a",
        },
        caps[0].len(),
    ))
}

pub fn tokenize(state: &mut InlineState<'_>, silent: bool) -> bool {
    if !matches!(state.byte_at(state.pos), Some(b'@' | b'<')) {
        return false;
    }

    let Some((extracted, len)) = extract(state) else {
        return false;
    };

    if !silent {
        let start = state.pos;
        let content = state.src[start..start + len].to_string();
        let token = match extracted {
            Extracted::Mention { kind, id } => {
                log::trace!("mention {kind} {id:?} at {start}");
                let token = state.push("mention", "mention", Nesting::Leaf);
                token.meta = Some(TokenMeta::Mention { kind, id });
                token
            }
            Extracted::Emoji { id, name, animated } => {
                log::trace!("emoji {name}:{id} at {start}");
                let token = state.push("emoji", "emoji", Nesting::Leaf);
                token.meta = Some(TokenMeta::Emoji { id, name, animated });
                token
            }
        };
        token.content = content;
    }

    state.pos += len;
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::{ParserOptions, inline::InlineParser, token::Token};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn parse(src: &str) -> Vec<Token> {
        InlineParser::new().parse(src, &ParserOptions::default())
    }

    fn metas(src: &str) -> Vec<TokenMeta> {
        parse(src).into_iter().filter_map(|t| t.meta).collect()
    }

    #[rstest]
    #[case("<@123>", MentionKind::User, "123")]
    #[case("<@&42>", MentionKind::Role, "42")]
    #[case("<#9>", MentionKind::Channel, "9")]
    fn entity_mentions(#[case] src: &str, #[case] kind: MentionKind, #[case] id: &str) {
        assert_eq!(
            metas(src),
            vec![TokenMeta::Mention {
                kind,
                id: Some(id.to_string()),
            }]
        );
    }

    #[rstest]
    #[case("@everyone", MentionKind::Everyone)]
    #[case("hello @here now", MentionKind::Here)]
    #[case("hi\n@everyone", MentionKind::Everyone)]
    fn broadcast_mentions(#[case] src: &str, #[case] kind: MentionKind) {
        assert_eq!(metas(src), vec![TokenMeta::Mention { kind, id: None }]);
    }

    #[rstest]
    #[case("hello@everyone")]
    #[case("@everyones")]
    #[case("@everyone!")]
    #[case("<@abc>")]
    #[case("<@>")]
    fn not_mentions(#[case] src: &str) {
        assert!(metas(src).is_empty());
    }

    #[test]
    fn broadcast_keeps_following_whitespace() {
        let tokens = parse("@here now");
        assert_eq!(tokens[0].content, "@here");
        assert_eq!(tokens[1], Token::text(" now"));
    }

    #[rstest]
    #[case("<:wave:555>", "wave", false)]
    #[case("<a:party_blob:555>", "party_blob", true)]
    fn custom_emoji(#[case] src: &str, #[case] name: &str, #[case] animated: bool) {
        assert_eq!(
            metas(src),
            vec![TokenMeta::Emoji {
                id: "555".into(),
                name: name.into(),
                animated,
            }]
        );
    }

    #[test]
    fn silent_mode_advances_without_tokens() {
        let parser = InlineParser::new();
        let options = ParserOptions::default();
        let mut state = InlineState::new("<@1> x", &parser, &options);
        assert!(tokenize(&mut state, true));
        assert_eq!(state.pos, 4);
        assert!(state.tokens.is_empty());
    }
}
