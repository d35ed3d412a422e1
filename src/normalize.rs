// Whitespace normalization: collapse every line break to a single space

/// Characters that end a line. `\r\n` is handled as one boundary in [`lines`].
const LINE_BREAKS: &[char] = &[
    '\n', '\r', '\x0b', '\x0c', '\x1c', '\x1d', '\x1e', '\u{85}', '\u{2028}', '\u{2029}',
];

pub fn is_line_break(ch: char) -> bool {
    LINE_BREAKS.contains(&ch)
}

/// Split `text` into lines. A trailing break does not yield a trailing empty
/// line, but empty lines between breaks are kept.
pub fn lines(text: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, ch)) = chars.next() {
        if !is_line_break(ch) {
            continue;
        }
        out.push(&text[start..idx]);
        let mut end = idx + ch.len_utf8();
        if ch == '\r' {
            if let Some(&(next_idx, '\n')) = chars.peek() {
                chars.next();
                end = next_idx + 1;
            }
        }
        start = end;
    }

    if start < text.len() {
        out.push(&text[start..]);
    }
    out
}

/// Flatten extracted text onto one line.
pub fn flatten(text: &str) -> String {
    lines(text).join(" ")
}

/// Concatenate page texts, terminating each page with `\n`.
pub fn join_pages<I, S>(pages: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut text = String::new();
    for page in pages {
        text.push_str(page.as_ref());
        text.push('\n');
    }
    text
}
