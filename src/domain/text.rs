//! Shared formatting helpers used by the venue aggregator, social composer,
//! and collage renderer.

/// Escape the characters with meaning in HTML text and attribute positions.
pub fn html_escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Pluralize a chain or group name by appending `s`, unless the name
/// already ends in `s` ("Empire" -> "Empires", "Picturehouses" stays).
pub fn pluralize(name: &str) -> String {
    if name.ends_with('s') || name.ends_with('S') {
        name.to_string()
    } else {
        format!("{}s", name)
    }
}

/// Join a list of rendered names into a natural-language phrase:
/// `""`, `"A"`, `"A & B"`, `"A, B, & C"`.
pub fn join_phrase(items: &[String]) -> String {
    match items {
        [] => String::new(),
        [only] => only.clone(),
        [first, second] => format!("{} & {}", first, second),
        [init @ .., last] => format!("{}, & {}", init.join(", "), last),
    }
}
