use crate::parsing::{inline::InlineState, token::Token};

/// Merges runs of adjacent `text` tokens into one.
///
/// Unmatched delimiter placeholders are left behind as single-character text
/// tokens; this pass folds them back into their neighbours.
pub fn join(state: &mut InlineState<'_>) {
    let tokens = std::mem::take(&mut state.tokens);
    let mut joined: Vec<Token> = Vec::with_capacity(tokens.len());

    for token in tokens {
        match joined.last_mut() {
            Some(last) if is_text(last) && token.kind == "text" => {
                last.content.push_str(&token.content);
            }
            _ => joined.push(token),
        }
    }

    state.tokens = joined;
}

fn is_text(token: &Token) -> bool {
    token.kind == "text"
}
