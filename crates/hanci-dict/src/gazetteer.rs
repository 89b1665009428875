//! Tab-separated dictionary file loader.
//!
//! One entry per line: `headword<TAB>pronunciation<TAB>gloss/gloss/...`.
//! Blank lines and lines starting with `#` are skipped; malformed lines
//! are skipped with a warning. Loading also builds two character indexes
//! over the two-character headwords, answering "which words start with
//! this character" and "which words end with it" in file order.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use thiserror::Error;

use hanci_core::dict::{DictHit, DictLookup};

/// Errors that can occur while loading a dictionary file.
#[derive(Debug, Error)]
pub enum GazetteerError {
    #[error("failed to read dictionary {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone)]
struct Entry {
    pronunciation: String,
    glosses: Vec<String>,
}

/// An immutable in-memory dictionary with per-character indexes.
///
/// Duplicate headwords keep the last occurrence, matching the word
/// store's policy.
#[derive(Debug, Default)]
pub struct Gazetteer {
    entries: HashMap<String, Entry>,
    initials: HashMap<char, Vec<String>>,
    finals: HashMap<char, Vec<String>>,
}

impl Gazetteer {
    /// Load a dictionary file from disk.
    pub fn load(path: &Path) -> Result<Self, GazetteerError> {
        let content = std::fs::read_to_string(path).map_err(|source| GazetteerError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::parse(&content))
    }

    /// Parse dictionary text, skipping whatever does not fit the format.
    pub fn parse(content: &str) -> Self {
        let mut gazetteer = Gazetteer::default();
        for (idx, raw) in content.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut fields = line.split('\t');
            let (Some(headword), Some(pronunciation), Some(glosses)) =
                (fields.next(), fields.next(), fields.next())
            else {
                tracing::warn!(
                    "dictionary line {}: expected three tab-separated fields, skipped",
                    idx + 1
                );
                continue;
            };
            let headword = headword.trim();
            if headword.is_empty() {
                tracing::warn!("dictionary line {}: empty headword, skipped", idx + 1);
                continue;
            }
            gazetteer.insert(
                headword,
                Entry {
                    pronunciation: pronunciation.trim().to_string(),
                    glosses: glosses
                        .split('/')
                        .map(str::trim)
                        .filter(|g| !g.is_empty())
                        .map(str::to_string)
                        .collect(),
                },
            );
        }
        gazetteer
    }

    fn insert(&mut self, headword: &str, entry: Entry) {
        let replaced = self.entries.insert(headword.to_string(), entry).is_some();
        if replaced {
            // Already indexed by the earlier occurrence.
            return;
        }
        let chars: Vec<char> = headword.chars().collect();
        if let [first, last] = chars[..] {
            self.initials.entry(first).or_default().push(headword.to_string());
            self.finals.entry(last).or_default().push(headword.to_string());
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl DictLookup for Gazetteer {
    fn contains(&self, headword: &str) -> bool {
        self.entries.contains_key(headword)
    }

    fn lookup(&self, headword: &str) -> Option<DictHit> {
        self.entries.get(headword).map(|entry| DictHit {
            pronunciation: entry.pronunciation.clone(),
            glosses: entry.glosses.clone(),
        })
    }

    fn by_initial(&self, ch: char) -> Vec<String> {
        self.initials.get(&ch).cloned().unwrap_or_default()
    }

    fn by_final(&self, ch: char) -> Vec<String> {
        self.finals.get(&ch).cloned().unwrap_or_default()
    }
}
