//! Core data model types for hanci.
//!
//! These are the fundamental types the entire system uses to represent
//! vocabulary entries, their senses, and review scheduling state.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use uuid::Uuid;

/// A single vocabulary entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Word {
    /// The Chinese text; non-empty, unique within a store.
    pub hanzi: String,
    /// Romanized pronunciation; may be empty.
    pub pinyin: String,
    /// Ordered senses. Order is meaningful: the persisted example block
    /// references meanings by 1-based position.
    pub meanings: Vec<Meaning>,
    /// Epoch seconds after which this word is eligible for active recall.
    /// `0.0` means never scheduled, which always qualifies.
    pub active_due: f64,
    /// Epoch seconds after which this word is eligible for passive
    /// recognition. Same `0.0` semantics.
    pub passive_due: f64,
}

impl Word {
    /// Create a word with no meanings and both due fields unset.
    pub fn new(hanzi: impl Into<String>, pinyin: impl Into<String>) -> Self {
        Self {
            hanzi: hanzi.into(),
            pinyin: pinyin.into(),
            meanings: Vec::new(),
            active_due: 0.0,
            passive_due: 0.0,
        }
    }

    /// The due timestamp consulted for `mode`.
    pub fn due(&self, mode: ReviewMode) -> f64 {
        match mode {
            ReviewMode::Active => self.active_due,
            ReviewMode::Passive => self.passive_due,
        }
    }

    /// Mutable access to the due timestamp for `mode`. A grading action
    /// touches exactly this field and never the other mode's.
    pub fn due_mut(&mut self, mode: ReviewMode) -> &mut f64 {
        match mode {
            ReviewMode::Active => &mut self.active_due,
            ReviewMode::Passive => &mut self.passive_due,
        }
    }
}

/// One sense of a word.
#[derive(Debug, Clone, Serialize)]
pub struct Meaning {
    /// Synthetic stable key assigned at load time. Not persisted; the
    /// on-disk format links examples to meanings purely by position.
    #[serde(skip)]
    pub id: Uuid,
    /// Gloss/definition text.
    pub text: String,
    /// Part-of-speech or grammatical tag; may be empty.
    pub tag: String,
    /// Ordered example sentence pairs.
    pub examples: Vec<Example>,
}

impl Meaning {
    pub fn new(text: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            tag: tag.into(),
            examples: Vec::new(),
        }
    }
}

/// Equality ignores the synthetic id: two meanings loaded from the same
/// file content compare equal even though their keys differ.
impl PartialEq for Meaning {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text && self.tag == other.tag && self.examples == other.examples
    }
}

impl Eq for Meaning {}

/// An example sentence attached to a meaning. Either side may be empty,
/// but the pair always exists once added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Example {
    pub chinese: String,
    pub english: String,
}

/// Which face of the card the session prompts with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewMode {
    /// Show the hanzi; the user recalls the meaning.
    Passive,
    /// Show the meanings; the user produces the hanzi.
    Active,
}

impl fmt::Display for ReviewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReviewMode::Passive => write!(f, "passive"),
            ReviewMode::Active => write!(f, "active"),
        }
    }
}

impl FromStr for ReviewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "p" | "passive" => Ok(ReviewMode::Passive),
            "a" | "active" => Ok(ReviewMode::Active),
            other => Err(format!("unknown review mode: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_display_and_parse() {
        assert_eq!(ReviewMode::Passive.to_string(), "passive");
        assert_eq!(ReviewMode::Active.to_string(), "active");
        assert_eq!("a".parse::<ReviewMode>().unwrap(), ReviewMode::Active);
        assert_eq!("Active".parse::<ReviewMode>().unwrap(), ReviewMode::Active);
        assert_eq!("p".parse::<ReviewMode>().unwrap(), ReviewMode::Passive);
        assert!("x".parse::<ReviewMode>().is_err());
    }

    #[test]
    fn due_accessors_select_mode_field() {
        let mut word = Word::new("你好", "nǐhǎo");
        *word.due_mut(ReviewMode::Active) = 100.0;
        *word.due_mut(ReviewMode::Passive) = 200.0;

        assert_eq!(word.due(ReviewMode::Active), 100.0);
        assert_eq!(word.due(ReviewMode::Passive), 200.0);
        assert_eq!(word.active_due, 100.0);
        assert_eq!(word.passive_due, 200.0);
    }

    #[test]
    fn meanings_get_distinct_synthetic_keys() {
        let a = Meaning::new("hello", "int");
        let b = Meaning::new("hello", "int");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn meaning_id_is_not_serialized() {
        let meaning = Meaning::new("hello", "int");
        let json = serde_json::to_string(&meaning).unwrap();
        assert!(!json.contains("id"));
        assert!(json.contains("hello"));
    }
}
