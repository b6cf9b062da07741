//! End-to-end rendering of chat messages into the JSON document tree.

use chatmark_engine::{
    MentionKind, Nesting, Token, parse, render, render_with, serialize_tokens,
    parsing::snapshot::invariants, transform,
};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{Value, json};

fn render_json(src: &str) -> Value {
    serde_json::to_value(render(src).unwrap()).unwrap()
}

fn paragraph(content: Value) -> Value {
    json!([{ "type": "text", "content": content }])
}

#[rstest]
#[case("_x_", "underline")]
#[case("__x__", "underline")]
#[case("*x*", "italic")]
#[case("**x**", "bold")]
#[case("||x||", "spoiler")]
#[case("~~x~~", "strikethrough")]
fn markers_wrap_one_node(#[case] src: &str, #[case] kind: &str) {
    assert_eq!(render_json(src), paragraph(json!([{ "type": kind, "content": ["x"] }])));
}

#[rstest]
#[case("|x|")]
#[case("|||x|||")]
#[case("a ||| b ||||")]
fn pipe_runs_other_than_two_are_literal(#[case] src: &str) {
    assert_eq!(render_json(src), paragraph(json!([src])));
}

#[test]
fn bold_italic_nests_italic_outside_bold() {
    assert_eq!(
        render_json("***x***"),
        paragraph(json!([{
            "type": "italic",
            "content": [{ "type": "bold", "content": ["x"] }],
        }]))
    );
}

#[test]
fn underscores_inside_words_stay_literal() {
    assert_eq!(render_json("snake_case_name"), paragraph(json!(["snake_case_name"])));
}

#[test]
fn user_mention_without_resolver_has_null_extra() {
    assert_eq!(
        render_json("<@123>"),
        paragraph(json!([{ "type": "mention", "subType": "user", "id": "123", "extra": null }]))
    );
}

#[test]
fn user_mention_with_resolver() {
    let resolver = |kind: MentionKind, id: &str| -> anyhow::Result<Option<Value>> {
        Ok((kind == MentionKind::User && id == "123").then(|| json!({ "name": "Ann" })))
    };
    let nodes = render_with("<@123>", &resolver).unwrap();
    assert_eq!(
        serde_json::to_value(nodes).unwrap(),
        paragraph(json!([{
            "type": "mention",
            "subType": "user",
            "id": "123",
            "extra": { "name": "Ann" },
        }]))
    );
}

#[rstest]
#[case("<@&9>", "role", "9")]
#[case("<#77>", "channel", "77")]
fn other_id_mentions(#[case] src: &str, #[case] kind: &str, #[case] id: &str) {
    assert_eq!(
        render_json(src),
        paragraph(json!([{ "type": "mention", "subType": kind, "id": id, "extra": null }]))
    );
}

#[rstest]
#[case("<a:wave:555>", true, "https://cdn.discordapp.com/emojis/555.gif")]
#[case("<:wave:555>", false, "https://cdn.discordapp.com/emojis/555.png")]
fn custom_emoji_urls(#[case] src: &str, #[case] animated: bool, #[case] url: &str) {
    assert_eq!(
        render_json(src),
        paragraph(json!([{
            "type": "emoji",
            "id": "555",
            "name": "wave",
            "animated": animated,
            "url": url,
        }]))
    );
}

#[test]
fn keycap_emoji() {
    assert_eq!(
        render_json("1\u{fe0f}\u{20e3} left"),
        paragraph(json!([
            { "type": "unicode_emoji", "content": "1\u{fe0f}\u{20e3}" },
            " left",
        ]))
    );
}

#[test]
fn subtext_line() {
    assert_eq!(
        render_json("-# small text"),
        json!([{ "type": "subtext", "content": ["small text"] }])
    );
}

#[test]
fn subtext_cuts_a_paragraph_short() {
    assert_eq!(
        render_json("hello\n-# small text"),
        json!([
            { "type": "text", "content": ["hello"] },
            { "type": "subtext", "content": ["small text"] },
        ])
    );
}

#[test]
fn broadcast_mention_between_words() {
    assert_eq!(
        render_json("hello @everyone now"),
        paragraph(json!([
            "hello ",
            { "type": "mention", "subType": "everyone", "id": null, "extra": null },
            " now",
        ]))
    );
}

#[rstest]
#[case("hello@everyone")]
#[case("hello @everyonenow")]
fn broadcast_mention_inside_a_word_is_text(#[case] src: &str) {
    assert_eq!(render_json(src), paragraph(json!([src])));
}

#[test]
fn unknown_token_keeps_its_siblings() {
    let mut tokens = parse("a\n\nb");
    tokens.insert(3, Token::new("table", "table", Nesting::Leaf));
    assert_eq!(
        serde_json::to_value(transform(&tokens).unwrap()).unwrap(),
        json!([
            { "type": "text", "content": ["a"] },
            { "type": "unsupported_token" },
            { "type": "text", "content": ["b"] },
        ])
    );
}

#[test]
fn links_and_code() {
    assert_eq!(
        render_json("see [docs](https://example.com) or `cargo doc`"),
        paragraph(json!([
            "see ",
            { "type": "link", "content": ["docs"], "url": "https://example.com" },
            " or ",
            { "type": "code_inline", "content": "cargo doc" },
        ]))
    );
}

#[test]
fn quoted_list() {
    assert_eq!(
        render_json("> - one\n> - two"),
        json!([{
            "type": "blockquote",
            "content": [{
                "type": "list",
                "items": [
                    [{ "type": "text", "content": ["one"] }],
                    [{ "type": "text", "content": ["two"] }],
                ],
            }],
        }])
    );
}

const CORPUS: &[&str] = &[
    "",
    "plain",
    "*",
    "**",
    "***",
    "||",
    "|||",
    "__init__",
    "*a **b* c**",
    "_a *b_ c*",
    "||a **b|| c**",
    "~~a ~~b~~ c~~",
    "[a *b](c) d*",
    "[**a](b)**",
    "`*a*` *b*",
    "<@1><@&2><#3>",
    "<a:x:1><:y:2>",
    "@here @everyone",
    "1\u{fe0f}\u{20e3} keycap",
    "> a\n>> b\n> c",
    "- a\n  - b\n    - c\n- d",
    "1. a\n2. b\n\n3) c",
    "```\nunclosed",
    "# *a\n## b*",
    "-# *a\n*b",
    "a  \nb\\\nc",
    "&amp; &bogus; &#35;",
    "https://example.com/x_(y)?q=*z* done",
    "<https://example.com> <me@example.com>",
    "\\*not em\\*",
];

#[test]
fn token_stream_is_balanced_for_every_input() {
    for src in CORPUS {
        let tokens = parse(src);
        invariants(&tokens);
        assert!(serialize_tokens(&tokens).is_ok(), "unbalanced stream for {src:?}");
        assert!(render(src).is_ok(), "transform failed for {src:?}");
    }
}

#[test]
fn deep_nesting_never_unbalances() {
    let quotes = format!("{} deep", ">".repeat(64));
    let stars = format!("{}x{}", "*".repeat(64), "*".repeat(64));
    let items = (0..40)
        .map(|depth| format!("{}- {depth}", "  ".repeat(depth)))
        .collect::<Vec<_>>()
        .join("\n");

    for src in [quotes, stars, items] {
        invariants(&parse(&src));
        assert!(render(&src).is_ok());
    }
}
