use itertools::Itertools;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Runs of anything other than ASCII letters and digits.
    static ref NON_ALPHANUMERIC: Regex = Regex::new("[^A-Za-z0-9]+").unwrap();
}

/// Clean raw text for mention detection: punctuation becomes spaces, `OR` and
/// `AND` between two words are dropped, whitespace is collapsed and the result
/// lower-cased.
///
/// Connectors are only removed in upper case, so "salt and pepper" keeps its
/// "and".
pub fn normalize(text: &str) -> String {
    let spaced = NON_ALPHANUMERIC.replace_all(text, " ");
    let spaced = spaced.replace(" OR ", " ").replace(" AND ", " ");
    spaced.split_whitespace().join(" ").to_lowercase()
}

/// Every contiguous run of words in `text`, shortest first and left to right
/// within each length. `n` words yield `n * (n + 1) / 2` n-grams.
pub fn extract_ngrams(text: &str) -> Vec<String> {
    extract_ngrams_up_to(text, None)
}

/// As `extract_ngrams`, skipping n-grams longer than `max_len` words.
pub fn extract_ngrams_up_to(text: &str, max_len: Option<usize>) -> Vec<String> {
    let words = text.split_whitespace().collect::<Vec<_>>();
    let longest = max_len.map_or(words.len(), |max| max.min(words.len()));
    let mut ngrams = Vec::with_capacity(words.len() * (words.len() + 1) / 2);
    for len in 1..=longest {
        for start in 0..=(words.len() - len) {
            ngrams.push(words[start..start + len].join(" "));
        }
    }
    ngrams
}

/// An input document or snippet, with its text already normalised.
#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    pub id: String,
    text: String,
}

impl Document {
    pub fn new(id: &str, raw_text: &str) -> Self {
        Document {
            id: id.to_owned(),
            text: normalize(raw_text),
        }
    }

    /// Normalised text.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }

    pub fn ngrams(&self, max_len: Option<usize>) -> Vec<String> {
        extract_ngrams_up_to(&self.text, max_len)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_normalize_strips_punctuation_and_case() {
        assert_eq!(normalize("  Paris, France!! "), "paris france");
        assert_eq!(normalize("AT&T's   new\tphone"), "at t s new phone");
        assert_eq!(normalize("Zürich"), "z rich");
        assert_eq!(normalize("?!"), "");
    }

    #[test]
    fn test_normalize_drops_boolean_connectors() {
        assert_eq!(normalize("cats OR dogs"), "cats dogs");
        assert_eq!(normalize("Tom AND Jerry"), "tom jerry");
        assert_eq!(normalize("salt and pepper"), "salt and pepper");
        assert_eq!(normalize("ORACLE ANDROID"), "oracle android");
        assert_eq!(normalize("OR gate"), "or gate");
    }

    #[test]
    fn test_ngram_order() {
        assert_eq!(
            extract_ngrams("new york city"),
            vec![
                "new",
                "york",
                "city",
                "new york",
                "york city",
                "new york city"
            ]
        );
    }

    #[test]
    fn test_ngram_count_is_triangular() {
        for words in 0..8usize {
            let text = (0..words).map(|i| format!("w{}", i)).join(" ");
            let ngrams = extract_ngrams(&text);
            assert_eq!(ngrams.len(), words * (words + 1) / 2);
            if words > 0 {
                assert_eq!(ngrams.iter().filter(|n| **n == text).count(), 1);
            }
        }
    }

    #[test]
    fn test_ngrams_up_to_limit() {
        let ngrams = extract_ngrams_up_to("a b c d", Some(2));
        assert_eq!(ngrams, vec!["a", "b", "c", "d", "a b", "b c", "c d"]);
        assert_eq!(extract_ngrams_up_to("a b", Some(5)).len(), 3);
    }

    #[test]
    fn test_document_normalises_on_creation() {
        let doc = Document::new("7", "The Louvre, Paris");
        assert_eq!(doc.text(), "the louvre paris");
        assert_eq!(doc.word_count(), 3);
        assert_eq!(doc.ngrams(None).len(), 6);
    }
}
