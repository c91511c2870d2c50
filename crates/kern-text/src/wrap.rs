//! Greedy word wrap with recorded paragraph breaks.

use raster_core::TextProvider;

/// Result of wrapping a text block to a maximum line width.
#[derive(Clone, Debug, Default)]
pub struct WrappedText {
    /// Visual lines in paint order.
    pub lines: Vec<String>,
    /// Character offsets of the explicit newline characters in the source,
    /// used to place the caret across paragraph breaks.
    pub break_offsets: Vec<usize>,
}

/// Wrap `text` so that no line measures wider than `max_width` at `size` px.
///
/// Paragraphs (split on `'\n'`) wrap independently and blank paragraphs are
/// preserved as empty lines. A single word wider than `max_width` is broken
/// at character level; within multi-word paragraphs an overlong word stays
/// whole on its own line.
pub fn wrap_text(
    provider: &dyn TextProvider,
    text: &str,
    size: f32,
    max_width: f32,
) -> WrappedText {
    let mut wrapped = WrappedText::default();
    let mut char_pos = 0usize;

    for (i, paragraph) in text.split('\n').enumerate() {
        if i > 0 {
            wrapped.break_offsets.push(char_pos);
            char_pos += 1;
        }
        wrap_paragraph(provider, paragraph, size, max_width, &mut wrapped.lines);
        char_pos += paragraph.chars().count();
    }

    wrapped
}

fn wrap_paragraph(
    provider: &dyn TextProvider,
    paragraph: &str,
    size: f32,
    max_width: f32,
    lines: &mut Vec<String>,
) {
    if paragraph.is_empty() {
        lines.push(String::new());
        return;
    }

    let words: Vec<&str> = paragraph.split(' ').collect();

    if words.len() == 1 {
        let word = words[0];
        if provider.measure(word, size) <= max_width {
            lines.push(word.to_string());
        } else {
            break_word(provider, word, size, max_width, lines);
        }
        return;
    }

    let mut current = words[0].to_string();
    for word in &words[1..] {
        let mut candidate = current.clone();
        candidate.push(' ');
        candidate.push_str(word);
        if provider.measure(&candidate, size) <= max_width {
            current = candidate;
        } else {
            lines.push(std::mem::replace(&mut current, (*word).to_string()));
        }
    }
    lines.push(current);
}

/// Character-level hard break for a single unbreakable word. Each character
/// makes progress, so even zero-width glyphs terminate in at most one pass
/// over the input.
fn break_word(
    provider: &dyn TextProvider,
    word: &str,
    size: f32,
    max_width: f32,
    lines: &mut Vec<String>,
) {
    let mut current = String::new();
    for ch in word.chars() {
        let mut candidate = current.clone();
        candidate.push(ch);
        if !current.is_empty() && provider.measure(&candidate, size) > max_width {
            lines.push(std::mem::replace(&mut current, ch.to_string()));
        } else {
            current = candidate;
        }
    }
    lines.push(current);
}

#[cfg(test)]
mod tests {
    use super::*;
    use raster_core::BoxProvider;

    // BoxProvider advances 5 px per char at size 10.
    const SIZE: f32 = 10.0;

    fn wrap(text: &str, max_width: f32) -> WrappedText {
        wrap_text(&BoxProvider::default(), text, SIZE, max_width)
    }

    #[test]
    fn single_short_paragraph_stays_on_one_line() {
        let w = wrap("hi there", 100.0);
        assert_eq!(w.lines, vec!["hi there"]);
        assert!(w.break_offsets.is_empty());
    }

    #[test]
    fn greedy_fill_reconstructs_the_paragraph() {
        let text = "the quick brown fox jumps over the lazy dog";
        let w = wrap(text, 50.0); // 10 chars per line
        assert!(w.lines.len() > 1);
        assert_eq!(w.lines.join(" "), text);
    }

    #[test]
    fn no_line_measures_wider_than_max_width() {
        let provider = BoxProvider::default();
        let w = wrap("a handful of reasonably sized words to wrap", 60.0);
        for line in &w.lines {
            assert!(provider.measure(line, SIZE) <= 60.0, "line too wide: {line:?}");
        }
    }

    #[test]
    fn blank_paragraphs_are_preserved() {
        let w = wrap("a\n\nb", 100.0);
        assert_eq!(w.lines, vec!["a", "", "b"]);
        assert_eq!(w.break_offsets, vec![1, 2]);
    }

    #[test]
    fn long_word_breaks_at_character_level() {
        let word = "abcdefghijklmnop";
        let w = wrap(word, 25.0); // 5 chars per line
        assert!(w.lines.iter().all(|l| l.chars().count() <= 5));
        assert_eq!(w.lines.concat(), word);
    }

    #[test]
    fn long_word_inside_a_sentence_stays_whole() {
        let w = wrap("x incomprehensibilities x", 50.0);
        assert!(w.lines.contains(&"incomprehensibilities".to_string()));
        assert_eq!(w.lines.join(" "), "x incomprehensibilities x");
    }

    #[test]
    fn consecutive_spaces_survive_the_round_trip() {
        let text = "one  two";
        let w = wrap(text, 100.0);
        assert_eq!(w.lines.join(" "), text);
    }

    #[test]
    fn empty_input_yields_one_empty_line() {
        let w = wrap("", 100.0);
        assert_eq!(w.lines, vec![""]);
    }
}
