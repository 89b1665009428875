//! Word database parser and serializer.
//!
//! The on-disk format is line-oriented UTF-8 (the export format the
//! original word lists came in):
//!
//! ```text
//! <Word>你好
//! <Pron>nǐhǎo
//! <meaning>
//! <1>[int] hello
//! <2>hi
//! <example>
//! <1>
//!             你好世界 : hello world
//! <2>
//! <activedue>0
//! <passivedue>1300913551.06
//! ```
//!
//! Parsing is a single forward pass holding an explicit [`Section`] state
//! and a current-meaning cursor as locals, so the parser is reentrant and
//! testable line-by-line. Marker lines match by literal prefix. Content
//! lines are handled leniently: anything unusable is dropped with a
//! [`ParseDiagnostic`] and the load continues. The one fatal content error
//! is a due timestamp that does not parse — coercing it would silently
//! corrupt scheduling state.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::StoreError;
use crate::model::{Example, Meaning, Word};

/// Which block of a word entry the parser is currently inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    None,
    Meanings,
    Examples,
}

/// A recoverable problem found while parsing. Reported on the diagnostic
/// side-channel, never fatal.
#[derive(Debug, Clone)]
pub struct ParseDiagnostic {
    /// 1-based line number in the source text.
    pub line: usize,
    /// What was wrong and what the parser did about it.
    pub message: String,
}

/// Result of parsing a word database from text.
#[derive(Debug)]
pub struct ParseOutcome {
    pub words: Vec<Word>,
    pub diagnostics: Vec<ParseDiagnostic>,
}

/// Accumulates one word entry until the next `<Word>` marker flushes it.
#[derive(Debug)]
struct WordBuilder {
    hanzi: String,
    pinyin: String,
    meanings: Vec<Meaning>,
    active_due: f64,
    passive_due: f64,
}

impl WordBuilder {
    fn new(hanzi: &str) -> Self {
        Self {
            hanzi: hanzi.trim().to_string(),
            pinyin: String::new(),
            meanings: Vec::new(),
            active_due: 0.0,
            passive_due: 0.0,
        }
    }

    fn into_word(self) -> Word {
        Word {
            hanzi: self.hanzi,
            pinyin: self.pinyin,
            meanings: self.meanings,
            active_due: self.active_due,
            passive_due: self.passive_due,
        }
    }
}

/// Parse a word database from text.
///
/// Returns the words in file order together with any recoverable
/// diagnostics. Duplicate hanzi collapse to the last occurrence, which
/// keeps the position of the first.
pub fn parse_words(content: &str) -> Result<ParseOutcome, StoreError> {
    let mut words: Vec<Word> = Vec::new();
    let mut index_by_hanzi: HashMap<String, usize> = HashMap::new();
    let mut diagnostics = Vec::new();

    let mut current: Option<WordBuilder> = None;
    let mut section = Section::None;
    let mut cursor = 0usize;

    for (idx, raw) in content.lines().enumerate() {
        let lineno = idx + 1;
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(rest) = line.strip_prefix("<Word>") {
            flush(current.take(), &mut words, &mut index_by_hanzi, &mut diagnostics, lineno);
            current = Some(WordBuilder::new(rest));
            section = Section::None;
            cursor = 0;
        } else if let Some(rest) = line.strip_prefix("<Pron>") {
            match current.as_mut() {
                Some(builder) => builder.pinyin = rest.trim().to_string(),
                None => diagnostics.push(ParseDiagnostic {
                    line: lineno,
                    message: "pronunciation before any <Word>, dropped".into(),
                }),
            }
        } else if line.starts_with("<meaning>") {
            section = Section::Meanings;
        } else if line.starts_with("<example>") {
            section = Section::Examples;
            cursor = 0;
        } else if let Some(rest) = line.strip_prefix("<passivedue>") {
            let due = parse_due(rest, lineno)?;
            match current.as_mut() {
                Some(builder) => builder.passive_due = due,
                None => diagnostics.push(ParseDiagnostic {
                    line: lineno,
                    message: "due timestamp before any <Word>, dropped".into(),
                }),
            }
        } else if let Some(rest) = line.strip_prefix("<activedue>") {
            let due = parse_due(rest, lineno)?;
            match current.as_mut() {
                Some(builder) => builder.active_due = due,
                None => diagnostics.push(ParseDiagnostic {
                    line: lineno,
                    message: "due timestamp before any <Word>, dropped".into(),
                }),
            }
        } else if line.starts_with("<StudyInfo>") {
            // Metadata marker in exported files; nothing worth keeping.
        } else {
            match (section, current.as_mut()) {
                (Section::Meanings, Some(builder)) => push_meaning(builder, line),
                (Section::Examples, Some(builder)) => {
                    push_example(builder, &mut cursor, line, lineno, &mut diagnostics)
                }
                _ => diagnostics.push(ParseDiagnostic {
                    line: lineno,
                    message: format!("content outside any word section, dropped: '{line}'"),
                }),
            }
        }
    }

    let final_line = content.lines().count();
    flush(current.take(), &mut words, &mut index_by_hanzi, &mut diagnostics, final_line);

    Ok(ParseOutcome { words, diagnostics })
}

/// Serialize words back into the on-disk format.
///
/// Deterministic: the same words always produce the same bytes, and
/// `parse_words(serialize_words(w))` is field-equal to `w`. Every meaning
/// gets its `<N>` marker in the example block even when it has no examples.
pub fn serialize_words(words: &[Word]) -> String {
    let mut out = String::new();
    for word in words {
        out.push_str("<Word>");
        out.push_str(&word.hanzi);
        out.push('\n');
        out.push_str("<Pron>");
        out.push_str(&word.pinyin);
        out.push('\n');
        out.push_str("<meaning>\n");
        for (i, meaning) in word.meanings.iter().enumerate() {
            if meaning.tag.is_empty() {
                out.push_str(&format!("<{}>{}\n", i + 1, meaning.text));
            } else {
                out.push_str(&format!("<{}>[{}] {}\n", i + 1, meaning.tag, meaning.text));
            }
        }
        out.push_str("<example>\n");
        for (i, meaning) in word.meanings.iter().enumerate() {
            out.push_str(&format!("<{}>\n", i + 1));
            for example in &meaning.examples {
                out.push_str(&format!("\t\t\t{} : {}\n", example.chinese, example.english));
            }
        }
        out.push_str(&format!("<activedue>{}\n", word.active_due));
        out.push_str(&format!("<passivedue>{}\n", word.passive_due));
    }
    out
}

fn parse_due(raw: &str, line: usize) -> Result<f64, StoreError> {
    let value = raw.trim();
    match value.parse::<f64>() {
        // NaN/inf would poison every due comparison downstream.
        Ok(due) if due.is_finite() => Ok(due),
        _ => Err(StoreError::InvalidDueTimestamp {
            line,
            value: value.to_string(),
        }),
    }
}

fn flush(
    builder: Option<WordBuilder>,
    words: &mut Vec<Word>,
    index_by_hanzi: &mut HashMap<String, usize>,
    diagnostics: &mut Vec<ParseDiagnostic>,
    lineno: usize,
) {
    let Some(builder) = builder else {
        return;
    };
    if builder.hanzi.is_empty() {
        diagnostics.push(ParseDiagnostic {
            line: lineno,
            message: "word with empty hanzi, dropped".into(),
        });
        return;
    }
    let word = builder.into_word();
    match index_by_hanzi.entry(word.hanzi.clone()) {
        Entry::Occupied(slot) => {
            diagnostics.push(ParseDiagnostic {
                line: lineno,
                message: format!("duplicate entry for '{}', later occurrence wins", word.hanzi),
            });
            words[*slot.get()] = word;
        }
        Entry::Vacant(slot) => {
            slot.insert(words.len());
            words.push(word);
        }
    }
}

/// A meaning-mode content line: `<N>[tag] text`, `<N>text`, or bare text.
/// The on-disk index number is ignored; meanings attach in encounter order.
fn push_meaning(builder: &mut WordBuilder, line: &str) {
    let mut rest = line;
    if rest.starts_with('<') {
        if let Some(gt) = rest.find('>') {
            rest = &rest[gt + 1..];
        }
    }
    if let Some(bracketed) = rest.trim_start().strip_prefix('[') {
        if let Some(close) = bracketed.find(']') {
            let tag = bracketed[..close].trim();
            let text = bracketed[close + 1..].trim();
            builder.meanings.push(Meaning::new(text, tag));
            return;
        }
    }
    builder.meanings.push(Meaning::new(rest.trim(), ""));
}

/// An example-mode content line: either a `<N>` cursor marker or a
/// `chinese : english` pair attached to the meaning the cursor points at.
fn push_example(
    builder: &mut WordBuilder,
    cursor: &mut usize,
    line: &str,
    lineno: usize,
    diagnostics: &mut Vec<ParseDiagnostic>,
) {
    if line.len() >= 2 && line.starts_with('<') && line.ends_with('>') {
        match line[1..line.len() - 1].parse::<usize>() {
            Ok(n) if n >= 1 => *cursor = n - 1,
            _ => diagnostics.push(ParseDiagnostic {
                line: lineno,
                message: format!("unusable example marker '{line}', dropped"),
            }),
        }
        return;
    }

    let (chinese, english) = match line.split_once(':') {
        Some((chinese, english)) => (chinese.trim(), english.trim()),
        None => (line, ""),
    };
    match builder.meanings.get_mut(*cursor) {
        Some(meaning) => meaning.examples.push(Example {
            chinese: chinese.to_string(),
            english: english.to_string(),
        }),
        None => diagnostics.push(ParseDiagnostic {
            line: lineno,
            message: format!(
                "example references meaning {} but '{}' has {}, dropped",
                *cursor + 1,
                builder.hanzi,
                builder.meanings.len()
            ),
        }),
    }
}

/// An in-memory word database bound to its backing file.
///
/// Constructed once by a full parse, mutated in place during a session
/// (due-field updates only), and persisted exactly once on quit or
/// end-of-session.
#[derive(Debug)]
pub struct WordStore {
    path: PathBuf,
    pub words: Vec<Word>,
}

impl WordStore {
    /// Load a word database, forwarding recoverable diagnostics to the
    /// log. Fails only on unreadable files and malformed due timestamps.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;
        let outcome = parse_words(&content)?;
        for diag in &outcome.diagnostics {
            tracing::warn!("{}: line {}: {}", path.display(), diag.line, diag.message);
        }
        Ok(Self {
            path,
            words: outcome.words,
        })
    }

    /// Write the current words back to the backing file.
    pub fn save(&self) -> Result<(), StoreError> {
        std::fs::write(&self.path, serialize_words(&self.words)).map_err(|source| {
            StoreError::Io {
                path: self.path.clone(),
                source,
            }
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
