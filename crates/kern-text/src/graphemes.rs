//! Grapheme-cluster helpers for caret-safe editing.

use unicode_segmentation::UnicodeSegmentation;

/// Remove the final extended grapheme cluster from `text`.
///
/// Returns `true` when something was removed. Deleting whole clusters keeps
/// Backspace from splitting combining sequences or emoji.
pub fn pop_last_grapheme(text: &mut String) -> bool {
    match text.grapheme_indices(true).last() {
        Some((start, _)) => {
            text.truncate(start);
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_pops_one_char() {
        let mut s = String::from("abc");
        assert!(pop_last_grapheme(&mut s));
        assert_eq!(s, "ab");
    }

    #[test]
    fn combining_mark_goes_with_its_base() {
        let mut s = String::from("ae\u{0301}"); // a + e-acute
        assert!(pop_last_grapheme(&mut s));
        assert_eq!(s, "a");
    }

    #[test]
    fn zwj_emoji_sequence_is_one_unit() {
        let mut s = String::from("hi\u{1F469}\u{200D}\u{1F4BB}"); // woman technologist
        assert!(pop_last_grapheme(&mut s));
        assert_eq!(s, "hi");
    }

    #[test]
    fn empty_string_reports_nothing_removed() {
        let mut s = String::new();
        assert!(!pop_last_grapheme(&mut s));
    }
}
