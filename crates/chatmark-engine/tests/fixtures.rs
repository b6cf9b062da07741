//! Fixture-based snapshot tests.
//!
//! Each `fixtures/<name>.md` message is parsed, checked against the token
//! invariants, and rendered as an indented token tree compared with
//! `fixtures/<name>.snap`.

use chatmark_engine::{
    Parser,
    parsing::snapshot::{invariants, normalize},
};

#[test]
fn fixture_chat_message() {
    assert_fixture("chat_message");
}

#[test]
fn fixture_quote_and_list() {
    assert_fixture("quote_and_list");
}

#[test]
fn fixture_code_and_headings() {
    assert_fixture("code_and_headings");
}

fn assert_fixture(name: &str) {
    let fixtures_dir = format!("{}/tests/fixtures", env!("CARGO_MANIFEST_DIR"));
    let md = std::fs::read_to_string(format!("{fixtures_dir}/{name}.md")).unwrap();

    let tokens = Parser::new().parse(&md);
    invariants(&tokens);

    let snap = normalize(&tokens);
    insta::with_settings!({
        snapshot_path => fixtures_dir.as_str(),
        prepend_module_to_snapshot => false,
    }, {
        insta::assert_snapshot!(name, snap);
    });
}
