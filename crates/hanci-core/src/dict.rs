//! Read-only dictionary lookup seam.
//!
//! The session engine consumes a dictionary purely as a gazetteer: given
//! a headword it wants pronunciation and glosses, and given a single
//! character it wants related two-character words. Implementations live
//! outside this crate; absence of a dictionary degrades lookups to
//! no-ops rather than failing.

/// A dictionary entry for one headword.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictHit {
    pub pronunciation: String,
    /// Glosses in dictionary order.
    pub glosses: Vec<String>,
}

/// Read-only lookup operations the session engine consumes.
pub trait DictLookup {
    /// Whether the dictionary has an entry for `headword`.
    fn contains(&self, headword: &str) -> bool {
        self.lookup(headword).is_some()
    }

    /// The entry for `headword`, if any.
    fn lookup(&self, headword: &str) -> Option<DictHit>;

    /// Two-character headwords starting with `ch`.
    fn by_initial(&self, ch: char) -> Vec<String>;

    /// Two-character headwords ending with `ch`.
    fn by_final(&self, ch: char) -> Vec<String>;
}

/// Related-word indexes for one character of a headword.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedWords {
    pub character: char,
    pub starting: Vec<String>,
    pub ending: Vec<String>,
}

/// Everything the session shows for one dictionary-lookup command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictNotes {
    pub headword: String,
    pub entry: Option<DictHit>,
    pub related: Vec<RelatedWords>,
}

/// Assemble the notes for `headword`: its own entry plus, per character,
/// the related words that start or end with that character. The headword
/// itself is filtered out of the related lists.
pub fn compile_notes(dict: &dyn DictLookup, headword: &str) -> DictNotes {
    let entry = dict.lookup(headword);
    let related = headword
        .chars()
        .map(|character| {
            let keep = |words: Vec<String>| {
                words.into_iter().filter(|w| w != headword).collect::<Vec<_>>()
            };
            RelatedWords {
                character,
                starting: keep(dict.by_initial(character)),
                ending: keep(dict.by_final(character)),
            }
        })
        .collect();
    DictNotes {
        headword: headword.to_string(),
        entry,
        related,
    }
}
