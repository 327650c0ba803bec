/// Greedy word wrap measured in characters.
///
/// Words are appended to the current line while `line + ' ' + word` stays
/// within `max_chars_per_line`; otherwise the line is flushed and the word
/// starts a new one. A word longer than the limit sits alone on its line and
/// is never truncated. A limit of zero or less puts every word on its own line.
pub fn wrap_text(text: &str, max_chars_per_line: i64) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut line_chars = 0usize;

    for word in text.split_whitespace() {
        let word_chars = word.chars().count();

        if line.is_empty() {
            line.push_str(word);
            line_chars = word_chars;
            continue;
        }

        let candidate = (line_chars + 1 + word_chars) as i64;
        if candidate <= max_chars_per_line {
            line.push(' ');
            line.push_str(word);
            line_chars += 1 + word_chars;
        } else {
            lines.push(std::mem::take(&mut line));
            line.push_str(word);
            line_chars = word_chars;
        }
    }

    if !line.is_empty() {
        lines.push(line);
    }

    lines
}
