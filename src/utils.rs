

#[inline]
pub fn safe_truncate(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}


#[inline]
pub fn safe_truncate_ellipsis(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        format!("{}...", s.chars().take(max_chars).collect::<String>())
    } else {
        s.to_string()
    }
}


/// Renders a list as `['a', 'b']` in lower case.
///
/// Disease fields are matched against this flattened text, so a keyword may
/// match across item boundaries just as it would against the raw catalog.
pub fn list_text(items: &[String]) -> String {
    let quoted: Vec<String> = items.iter().map(|item| quote_item(item)).collect();
    format!("[{}]", quoted.join(", ")).to_lowercase()
}


/// Single quotes unless the item holds an apostrophe and no double quote.
fn quote_item(item: &str) -> String {
    let quote = if item.contains('\'') && !item.contains('"') { '"' } else { '\'' };

    let mut out = String::with_capacity(item.len() + 2);
    out.push(quote);
    for c in item.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}


#[inline]
pub fn word_count(s: &str) -> usize {
    s.split_whitespace().count()
}
