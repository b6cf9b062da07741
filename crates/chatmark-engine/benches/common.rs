// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
#[allow(dead_code)]
pub fn generate_chat_log(messages: usize) -> String {
    let base = "**Heads up** <@123456789> the ||deploy|| is _done_ :tada: <:party:555>\n\
                -# sent from mobile\n\n\
                > quoting @everyone\n> with a https://example.com/link\n\n\
                - first ~~item~~\n- second `code`\n\n\
                ```rust\nfn main() {}\n```\n\n";
    base.repeat(messages)
}

#[allow(dead_code)]
pub fn generate_nested_emphasis(depth: usize) -> String {
    let mut content = String::from("x");
    for level in 0..depth {
        content = match level % 4 {
            0 => format!("*{content}*"),
            1 => format!("__{content}__"),
            2 => format!("||{content}||"),
            _ => format!("~~{content}~~"),
        };
    }
    content
}
