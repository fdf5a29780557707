use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Greedy word wrap to `max_width` display columns.
///
/// Runs of whitespace (newlines included) collapse to one space. Words wider
/// than the budget are broken across lines. Empty input yields no lines.
pub fn wrap(text: &str, max_width: usize) -> Vec<String> {
    let max_width = max_width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let wlen = word.width();

        if current.is_empty() && wlen <= max_width {
            current.push_str(word);
            current_len = wlen;
            continue;
        }
        if !current.is_empty() && current_len + 1 + wlen <= max_width {
            current.push(' ');
            current.push_str(word);
            current_len += 1 + wlen;
            continue;
        }

        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }

        if wlen <= max_width {
            current.push_str(word);
            current_len = wlen;
            continue;
        }

        // hard break; the tail stays open for the following words
        for ch in word.chars() {
            let cw = ch.width().unwrap_or(0);
            if current_len + cw > max_width && !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            current.push(ch);
            current_len += cw;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
