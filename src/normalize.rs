// WHY: standalone normalization shared by the classifier and by callers that
// want the reflowed form of a paragraph body without classifying it

/// Reflow text: a single line break is a soft wrap and becomes a space, a run
/// of two or more breaks is a hard break and becomes one `\n`
///
/// `\r\n` counts as one break. Tabs and other whitespace collapse into a
/// single space, spaces next to a hard break are dropped and the result is
/// trimmed at both ends.
pub fn normalize(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    normalize_into(text, &mut result);
    result
}

/// Normalize into supplied buffer to avoid allocation
pub fn normalize_into(text: &str, buffer: &mut String) {
    buffer.clear();
    buffer.reserve(text.len());

    // Number of line breaks seen in the whitespace run preceding the next
    // visible character; `None` while no whitespace is pending.
    let mut pending_breaks: Option<usize> = None;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '\r' => {
                // \r\n is one break, not two
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                *pending_breaks.get_or_insert(0) += 1;
            }
            '\n' => {
                *pending_breaks.get_or_insert(0) += 1;
            }
            _ if ch.is_whitespace() => {
                pending_breaks.get_or_insert(0);
            }
            _ => {
                if let Some(breaks) = pending_breaks.take() {
                    // leading whitespace never reaches the buffer
                    if !buffer.is_empty() {
                        buffer.push(if breaks >= 2 { '\n' } else { ' ' });
                    }
                }
                buffer.push(ch);
            }
        }
    }
    // trailing whitespace is still pending here and is simply dropped
}

/// True when normalized text is one token with no interior whitespace
pub fn is_single_token(normalized: &str) -> bool {
    !normalized.is_empty() && !normalized.contains(char::is_whitespace)
}
