//! Reading of the `id<TAB>text` snippet files annotated in batch.
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::Error;

/// A document to annotate.
#[derive(Clone, Debug, PartialEq)]
pub struct Snippet {
    pub id: String,
    pub text: String,
}

/// Numeric ids sort by value and come first, anything else follows in
/// lexical order.
#[derive(Debug, Eq, Ord, PartialEq, PartialOrd)]
enum SnippetKey {
    Numeric(u64, String),
    Text(String),
}

impl SnippetKey {
    fn new(id: &str) -> Self {
        match id.parse::<u64>() {
            Ok(n) => SnippetKey::Numeric(n, id.to_owned()),
            Err(_) => SnippetKey::Text(id.to_owned()),
        }
    }
}

/// Parse snippets from a reader. Later lines replace earlier ones sharing
/// the same id.
pub fn read_snippets<R: BufRead>(reader: R, source_name: &str) -> Result<Vec<Snippet>, Error> {
    let mut snippets = BTreeMap::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| Error::Read {
            path: source_name.into(),
            source,
        })?;
        if line.trim().is_empty() {
            continue;
        }
        let mut cols = line.splitn(2, '\t');
        let id = cols.next().unwrap_or_default().trim();
        let text = match cols.next() {
            Some(text) => text.trim(),
            None => {
                return Err(Error::Snippet {
                    source_name: source_name.to_owned(),
                    line: idx + 1,
                    reason: "expected `id<TAB>text`".to_owned(),
                })
            }
        };
        snippets.insert(
            SnippetKey::new(id),
            Snippet {
                id: id.to_owned(),
                text: text.to_owned(),
            },
        );
    }
    Ok(snippets.into_iter().map(|(_, snippet)| snippet).collect())
}

pub fn load_snippets<P: AsRef<Path>>(path: P) -> Result<Vec<Snippet>, Error> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| Error::Read {
        path: path.to_owned(),
        source,
    })?;
    read_snippets(BufReader::new(file), &path.to_string_lossy())
}

#[cfg(test)]
mod test {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn ids(snippets: &[Snippet]) -> Vec<&str> {
        snippets.iter().map(|s| s.id.as_str()).collect()
    }

    #[test]
    fn test_numeric_order() {
        let data = "10\tten\n2\ttwo\nabc\tletters\n1\tone\n";
        let snippets = read_snippets(data.as_bytes(), "test").unwrap();
        assert_eq!(ids(&snippets), vec!["1", "2", "10", "abc"]);
        assert_eq!(snippets[0].text, "one");
    }

    #[test]
    fn test_trim_and_skip_blank() {
        let data = " 1 \t  Paris Hilton  \n\n2\tLouvre\n";
        let snippets = read_snippets(data.as_bytes(), "test").unwrap();
        assert_eq!(
            snippets[0],
            Snippet {
                id: "1".to_owned(),
                text: "Paris Hilton".to_owned()
            }
        );
        assert_eq!(snippets.len(), 2);
    }

    #[test]
    fn test_duplicate_id_replaced() {
        let data = "1\tfirst\n1\tsecond\n";
        let snippets = read_snippets(data.as_bytes(), "test").unwrap();
        assert_eq!(snippets.len(), 1);
        assert_eq!(snippets[0].text, "second");
    }

    #[test]
    fn test_missing_text_column() {
        let data = "1\tfine\n2\n";
        match read_snippets(data.as_bytes(), "test") {
            Err(Error::Snippet { line, .. }) => assert_eq!(line, 2),
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_load_from_file() {
        let tmp_dir = TempDir::new().unwrap();
        let path = tmp_dir.path().join("snippets.txt");
        fs::write(&path, "1\tthe seine\n").unwrap();
        let snippets = load_snippets(&path).unwrap();
        assert_eq!(ids(&snippets), vec!["1"]);
        assert!(load_snippets(tmp_dir.path().join("missing.txt")).is_err());
    }
}
