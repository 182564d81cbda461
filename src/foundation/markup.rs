/// Escape markup-significant characters so `text` displays literally inside HTML.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Make a script body safe to embed between `<script>` tags.
///
/// Only the `</` sequence can close the element early; `<\/` is equivalent inside
/// script source.
pub fn escape_script_body(source: &str) -> String {
    source.replace("</", "<\\/")
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/markup.rs"]
mod tests;
