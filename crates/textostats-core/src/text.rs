//! Sentence segmentation and word tokenization.
//!
//! Both are single left-to-right scans over the input's characters. Word
//! characters are classified with the standard library's Unicode tables, so
//! accented and non-Latin letters form words the same way ASCII letters do.
//!
//! Known limitation: abbreviations such as "Mr." or "i.e." end a sentence
//! like any other period followed by whitespace.

use crate::frequency::FrequencyMap;

/// Discard up to `count` leading newline-terminated lines.
///
/// Stops early when the text runs out of newlines; a short text simply loses
/// less of its header.
pub fn skip_lines(text: &str, count: usize) -> &str {
    let mut rest = text;
    for _ in 0..count {
        match rest.find('\n') {
            Some(offset) => rest = &rest[offset + 1..],
            None => break,
        }
    }
    rest
}

/// Split text into sentences after skipping `skip_first` header lines.
///
/// A sentence is a run of characters other than `.`, `!` and `?` that ends
/// in one of those terminators, an optional closing `"`, and then whitespace
/// or the end of the text. The terminator sequence is not part of the
/// returned slice. A trailing run with no terminator still counts.
///
/// A terminator that is not followed by a boundary (the period in `3.14`)
/// does not end a sentence, and the characters scanned up to it are dropped;
/// scanning resumes right after that terminator. Whitespace-only runs are
/// never returned.
#[tracing::instrument(skip(text), fields(text_len = text.len()))]
pub fn segment(text: &str, skip_first: usize) -> Vec<&str> {
    let text = skip_lines(text, skip_first);
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let byte_at = |idx: usize| chars.get(idx).map_or(text.len(), |&(b, _)| b);

    let mut sentences = Vec::new();
    let mut pos = 0;

    while pos < chars.len() {
        if is_terminator(chars[pos].1) {
            pos += 1;
            continue;
        }

        let mut end = pos;
        while end < chars.len() && !is_terminator(chars[end].1) {
            end += 1;
        }

        let next = if end == chars.len() {
            Some(end)
        } else {
            boundary_end(&chars, end)
        };

        match next {
            Some(next) => {
                push_sentence(&mut sentences, &text[byte_at(pos)..byte_at(end)]);
                pos = next;
            }
            None => pos = end + 1,
        }
    }

    tracing::debug!(sentences = sentences.len(), "segmented text");
    sentences
}

fn push_sentence<'a>(sentences: &mut Vec<&'a str>, candidate: &'a str) {
    if !candidate.trim().is_empty() {
        sentences.push(candidate);
    }
}

const fn is_terminator(ch: char) -> bool {
    matches!(ch, '.' | '!' | '?')
}

/// Index just past the terminator sequence starting at `terminator`, or
/// `None` when the terminator is not a sentence boundary.
fn boundary_end(chars: &[(usize, char)], terminator: usize) -> Option<usize> {
    let mut idx = terminator + 1;
    if chars.get(idx).is_some_and(|&(_, c)| c == '"') {
        idx += 1;
    }

    match chars.get(idx) {
        None => Some(idx),
        Some(&(_, c)) if c.is_whitespace() => {
            while chars.get(idx).is_some_and(|&(_, c)| c.is_whitespace()) {
                idx += 1;
            }
            Some(idx)
        }
        Some(_) => None,
    }
}

/// Whether `ch` can appear inside a word.
pub fn is_word_char(ch: char) -> bool {
    ch.is_alphabetic() || ch.is_ascii_digit() || ch == '_'
}

/// Characters that join two word runs into one token (`well-known`, `don't`).
const fn is_joiner(ch: char) -> bool {
    matches!(ch, '-' | '\'' | '\u{2019}')
}

/// Iterator over the raw word spans of a text, in order.
///
/// Spans keep their original case; see [`tokenize`] for the case-folded
/// form.
#[derive(Debug, Clone)]
pub struct Words<'a> {
    text: &'a str,
    pos: usize,
}

/// Iterate over the words of `text` without allocating.
pub const fn words(text: &str) -> Words<'_> {
    Words { text, pos: 0 }
}

impl<'a> Iterator for Words<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = &self.text[self.pos..];
        let (offset, _) = rest.char_indices().find(|&(_, c)| is_word_char(c))?;
        let start = self.pos + offset;

        let mut end = start;
        let mut iter = self.text[start..].chars().peekable();
        while let Some(c) = iter.next() {
            if is_word_char(c) {
                end += c.len_utf8();
            } else if is_joiner(c) && iter.peek().copied().is_some_and(is_word_char) {
                end += c.len_utf8();
            } else {
                break;
            }
        }

        self.pos = end;
        Some(&self.text[start..end])
    }
}

/// Extract the lowercase words of one sentence.
///
/// When `frequencies` is given, every word also bumps its count there. The
/// same map is meant to be threaded through every sentence of a text so it
/// ends up holding whole-text counts.
pub fn tokenize(sentence: &str, mut frequencies: Option<&mut FrequencyMap>) -> Vec<String> {
    words(sentence)
        .map(str::to_lowercase)
        .inspect(|word| {
            if let Some(map) = frequencies.as_deref_mut() {
                map.record(word);
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_sentences() {
        let sentences = segment("Cats run. Dogs run fast!", 0);
        assert_eq!(sentences, vec!["Cats run", "Dogs run fast"]);
    }

    #[test]
    fn question_and_exclamation() {
        let sentences = segment("Are you serious? I can't believe it! This is amazing.", 0);
        assert_eq!(sentences.len(), 3);
        assert_eq!(sentences[1], "I can't believe it");
    }

    #[test]
    fn trailing_clause_without_punctuation_counts() {
        let sentences = segment("First one. Then a fragment", 0);
        assert_eq!(sentences, vec!["First one", "Then a fragment"]);
    }

    #[test]
    fn closing_quote_is_part_of_terminator() {
        let sentences = segment("He said \"stop.\" Then he left.", 0);
        assert_eq!(sentences, vec!["He said \"stop", "Then he left"]);
    }

    #[test]
    fn terminator_without_whitespace_drops_leading_run() {
        let sentences = segment("The price is 3.14 dollars. Cheap.", 0);
        assert_eq!(sentences, vec!["14 dollars", "Cheap"]);
    }

    #[test]
    fn abbreviations_split_sentences() {
        let sentences = segment("Mr. Smith left.", 0);
        assert_eq!(sentences, vec!["Mr", "Smith left"]);
    }

    #[test]
    fn newlines_count_as_boundary_whitespace() {
        let sentences = segment("One.\r\n\r\nTwo!\nThree?", 0);
        assert_eq!(sentences, vec!["One", "Two", "Three"]);
    }

    #[test]
    fn empty_and_blank_input() {
        assert!(segment("", 0).is_empty());
        assert!(segment("   \n\t ", 0).is_empty());
        assert!(segment("...!?", 0).is_empty());
    }

    #[test]
    fn header_lines_are_skipped() {
        let text = "Title Line\nAuthor Line\nThe cat sat.\n";
        assert_eq!(segment(text, 2), vec!["The cat sat"]);
        assert_eq!(segment(text, 0).len(), 1);
    }

    #[test]
    fn skipping_more_lines_than_exist_keeps_the_tail() {
        assert_eq!(skip_lines("a\nb", 5), "b");
        assert_eq!(skip_lines("no newline", 3), "no newline");
        assert_eq!(skip_lines("a\nb\n", 2), "");
    }

    #[test]
    fn words_joined_by_hyphen_and_apostrophes() {
        let found: Vec<_> = words("A well-known fact: don't, can\u{2019}t, rock-'n'-roll.").collect();
        assert_eq!(
            found,
            vec!["A", "well-known", "fact", "don't", "can\u{2019}t", "rock", "n", "roll"]
        );
    }

    #[test]
    fn dangling_joiners_are_not_part_of_words() {
        let found: Vec<_> = words("end- 'quoted' --x").collect();
        assert_eq!(found, vec!["end", "quoted", "x"]);
    }

    #[test]
    fn unicode_letters_form_words() {
        let found = tokenize("El chigüire y la CAFÉ-noir", None);
        assert_eq!(found, vec!["el", "chigüire", "y", "la", "café-noir"]);
    }

    #[test]
    fn digits_and_underscores_are_word_characters() {
        let found: Vec<_> = words("Chigüire 53 snake_case ©2016").collect();
        assert_eq!(found, vec!["Chigüire", "53", "snake_case", "2016"]);
    }

    #[test]
    fn tokenize_accumulates_across_calls() {
        let mut freq = FrequencyMap::new();
        let first = tokenize("The dog and the cat", Some(&mut freq));
        let second = tokenize("THE END", Some(&mut freq));

        assert_eq!(first, vec!["the", "dog", "and", "the", "cat"]);
        assert_eq!(second, vec!["the", "end"]);
        assert_eq!(freq.get("the"), Some(3));
        assert_eq!(freq.get("end"), Some(1));
        assert_eq!(freq.len(), 5);
    }

    #[test]
    fn tokenize_without_map_only_returns_words() {
        assert_eq!(tokenize("Hello, world!", None), vec!["hello", "world"]);
        assert!(tokenize("--- ... !!!", None).is_empty());
    }
}
