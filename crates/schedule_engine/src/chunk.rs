/// Telegram's per-message limit.
pub const MAX_MESSAGE_CHARS: usize = 4096;

/// Split `text` into chunks of at most `max_chars` characters.
///
/// Chunks break after a `\n` whenever possible. A single line longer than the
/// limit is cut at the last position outside of any tag, entity or open
/// element, and only hard-cut when no such position exists. Concatenating the
/// chunks yields `text` again.
pub fn split_message(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for line in text.split_inclusive('\n') {
        let line_len = line.chars().count();
        if current_len + line_len > max_chars && !current.is_empty() {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }

        if line_len > max_chars {
            let mut pieces = split_long_line(line, max_chars);
            let last = pieces.pop().unwrap_or_default();
            chunks.extend(pieces.into_iter().map(str::to_string));
            current_len = last.chars().count();
            current.push_str(last);
        } else {
            current.push_str(line);
            current_len += line_len;
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

fn split_long_line(line: &str, max_chars: usize) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut start = 0;
    let mut count = 0;
    // Byte offset of the last safe cut and the characters before it.
    let mut safe: Option<(usize, usize)> = None;
    let mut markup = MarkupState::default();

    for (idx, ch) in line.char_indices() {
        if markup.is_outside() && idx > start {
            safe = Some((idx, count));
        }
        if count == max_chars {
            let (cut, used) = match safe {
                Some(point) => point,
                None => (idx, count),
            };
            pieces.push(&line[start..cut]);
            start = cut;
            count -= used;
            safe = None;
        }
        markup.advance(ch);
        count += 1;
    }

    pieces.push(&line[start..]);
    pieces
}

/// Tracks whether a position in Telegram HTML sits inside a tag, an entity
/// or an unclosed element.
#[derive(Debug, Default)]
struct MarkupState {
    in_tag: bool,
    tag_opened: bool,
    closing_tag: bool,
    in_entity: bool,
    depth: usize,
}

impl MarkupState {
    fn is_outside(&self) -> bool {
        !self.in_tag && !self.in_entity && self.depth == 0
    }

    fn advance(&mut self, ch: char) {
        if self.tag_opened {
            self.closing_tag = ch == '/';
            self.tag_opened = false;
        }
        match ch {
            '<' if !self.in_tag => {
                self.in_tag = true;
                self.tag_opened = true;
            }
            '>' if self.in_tag => {
                self.in_tag = false;
                if self.closing_tag {
                    self.depth = self.depth.saturating_sub(1);
                } else {
                    self.depth += 1;
                }
            }
            '&' if !self.in_tag => self.in_entity = true,
            ';' if self.in_entity => self.in_entity = false,
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::split_long_line;

    #[test]
    fn long_line_is_cut_outside_elements() {
        let line = "aaaa<b>bb</b>cc";
        let pieces = split_long_line(line, 9);
        assert_eq!(pieces, vec!["aaaa", "<b>bb</b>", "cc"]);
    }

    #[test]
    fn entities_are_never_split() {
        let line = "ab&amp;cd";
        let pieces = split_long_line(line, 5);
        assert_eq!(pieces, vec!["ab", "&amp;", "cd"]);
    }

    #[test]
    fn markup_longer_than_the_limit_is_hard_cut() {
        let line = "<b>abcdef</b>";
        let pieces = split_long_line(line, 5);
        assert_eq!(pieces.concat(), line);
        assert!(pieces.iter().all(|p| p.chars().count() <= 5));
    }
}
