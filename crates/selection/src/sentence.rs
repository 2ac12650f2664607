//! Sentence-boundary extraction for the `context` field.

const TERMINATORS: [char; 6] = ['.', '?', '!', '。', '？', '！'];

fn ends_sentence(text: &str, idx: usize, c: char) -> bool {
    if !TERMINATORS.contains(&c) {
        return false;
    }
    if c == '.' {
        // Dots inside "3.14" or "example.com" stay in the sentence; a dot
        // followed by a space, another dot, or nothing closes it.
        match text[idx + c.len_utf8()..].chars().next() {
            Some(next) => next == ' ' || next == '.',
            None => true,
        }
    } else {
        true
    }
}

/// The full sentence of `text` containing the byte range `start..end`.
///
/// Walks outward from the range to the nearest sentence terminators; the
/// trailing terminator is kept, the leading one is not. Line breaks always
/// bound a sentence. Invalid offsets yield an empty string.
pub fn sentence_around(text: &str, start: usize, end: usize) -> String {
    if start > end
        || end > text.len()
        || !text.is_char_boundary(start)
        || !text.is_char_boundary(end)
    {
        return String::new();
    }

    let mut head = start;
    for (i, c) in text[..start].char_indices().rev() {
        if c == '\n' || c == '\r' || ends_sentence(text, i, c) {
            break;
        }
        head = i;
    }

    let mut tail = end;
    for (i, c) in text[end..].char_indices() {
        if c == '\n' || c == '\r' {
            break;
        }
        let abs = end + i;
        tail = abs + c.len_utf8();
        if ends_sentence(text, abs, c) {
            break;
        }
    }

    text[head..tail].trim().to_string()
}
