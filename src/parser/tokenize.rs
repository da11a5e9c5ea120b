//! Quote-aware splitting of directive lines.
//!
//! Both functions are pure. Double quotes group: a comma or a space inside a
//! quoted run is never a split point, and a quoted run keeps its quotes so
//! the argument coercer can tell strings from bare words.

/// Split a directive line into comma-separated sub-directives.
///
/// Sub-directives are trimmed; empty ones caused by consecutive commas are
/// dropped (a known permissive edge of the grammar, not a strict rule).
pub fn split_directives(line: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for c in line.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                current.push(c);
            }
            ',' if !in_quotes => {
                let part = current.trim();
                if !part.is_empty() {
                    parts.push(part.to_string());
                }
                current.clear();
            }
            _ => current.push(c),
        }
    }
    let part = current.trim();
    if !part.is_empty() {
        parts.push(part.to_string());
    }
    parts
}

/// Split a sub-directive into whitespace-separated argument tokens.
pub fn split_args(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for c in text.chars() {
        if c == '"' {
            in_quotes = !in_quotes;
            current.push(c);
        } else if c.is_whitespace() && !in_quotes {
            if !current.is_empty() {
                tokens.push(std::mem::take(&mut current));
            }
        } else {
            current.push(c);
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}
