//! Review session state machine.
//!
//! One session walks a shuffled due-pool in a single mode. Per card the
//! user flips between faces, optionally types a free-text answer or peeks
//! at examples and dictionary notes, and finally either grades the card
//! onto a ladder rung or skips it. Grading mutates exactly one due field
//! on exactly one word; everything else is read-only. The engine never
//! touches the terminal: it consumes input strings and returns a
//! [`StepOutcome`] for the caller to render.

use std::fmt;

use crate::dict::{compile_notes, DictLookup, DictNotes};
use crate::model::{ReviewMode, Word};
use crate::scheduler::{self, Rung};

/// Which face of the current card is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Face {
    /// The hanzi side.
    Front,
    /// The meanings side.
    Back,
}

/// How a free-text answer compared against the card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Correct,
    /// Active mode only: no exact match, but the answer shares at least
    /// one character with the hanzi.
    Partial,
    Incorrect,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Correct => write!(f, "Correct"),
            Verdict::Partial => write!(f, "partial match"),
            Verdict::Incorrect => write!(f, "Incorrect"),
        }
    }
}

/// What one processed input did, for the caller to render.
#[derive(Debug)]
pub enum StepOutcome {
    /// The card flipped; carries the now-visible face.
    Flipped(Face),
    /// A ladder rung was chosen and the word rescheduled.
    Graded { rung: usize, label: String, due: f64 },
    /// Advanced to the next card without rescheduling.
    Skipped,
    Answered(Verdict),
    /// Render the current word's example sentences.
    Examples,
    PinyinToggled(bool),
    /// Dictionary notes for the current word; `None` when no dictionary
    /// is loaded.
    Dictionary(Option<DictNotes>),
    /// Render the whole store, not just the pool.
    Listing,
    Help,
    /// Save and end the session.
    Quit,
    /// Unrecognized command; no state changed.
    Invalid(String),
}

/// A single review pass over a due-pool.
///
/// `pool` holds indices into the store's word vector in presentation
/// order. The words themselves are borrowed per call so the store stays
/// exclusively owned by the caller between steps.
pub struct ReviewSession<'d> {
    mode: ReviewMode,
    pool: Vec<usize>,
    cursor: usize,
    face: Face,
    show_pinyin: bool,
    dict: Option<&'d dyn DictLookup>,
}

impl<'d> ReviewSession<'d> {
    pub fn new(mode: ReviewMode, pool: Vec<usize>, dict: Option<&'d dyn DictLookup>) -> Self {
        Self {
            mode,
            pool,
            cursor: 0,
            face: initial_face(mode),
            show_pinyin: false,
            dict,
        }
    }

    pub fn mode(&self) -> ReviewMode {
        self.mode
    }

    pub fn face(&self) -> Face {
        self.face
    }

    pub fn show_pinyin(&self) -> bool {
        self.show_pinyin
    }

    pub fn is_finished(&self) -> bool {
        self.cursor >= self.pool.len()
    }

    /// 1-based position of the current card and the pool size.
    pub fn position(&self) -> (usize, usize) {
        (self.cursor + 1, self.pool.len())
    }

    /// Store index of the current card, if the session is not finished.
    pub fn current_index(&self) -> Option<usize> {
        self.pool.get(self.cursor).copied()
    }

    /// Process one line of user input against the current card.
    ///
    /// Input grammar: an empty line flips the card; `1..=N` grades onto
    /// that ladder rung; the single letters `n x p l d h q` are commands;
    /// any other lone ASCII letter or digit is rejected as a mistyped
    /// command; everything else is evaluated as a free-text answer.
    pub fn handle_input(
        &mut self,
        words: &mut [Word],
        ladder: &[Rung],
        input: &str,
        now: f64,
    ) -> StepOutcome {
        let Some(&word_index) = self.pool.get(self.cursor) else {
            return StepOutcome::Quit;
        };

        let input = input.trim();
        if input.is_empty() {
            self.face = match self.face {
                Face::Front => Face::Back,
                Face::Back => Face::Front,
            };
            return StepOutcome::Flipped(self.face);
        }

        match input {
            "n" => {
                self.advance();
                StepOutcome::Skipped
            }
            "x" => StepOutcome::Examples,
            "p" => {
                self.show_pinyin = !self.show_pinyin;
                StepOutcome::PinyinToggled(self.show_pinyin)
            }
            "l" => StepOutcome::Listing,
            "d" => StepOutcome::Dictionary(
                self.dict
                    .map(|dict| compile_notes(dict, &words[word_index].hanzi)),
            ),
            "h" => StepOutcome::Help,
            "q" => StepOutcome::Quit,
            _ => self.handle_free_input(words, ladder, word_index, input, now),
        }
    }

    fn handle_free_input(
        &mut self,
        words: &mut [Word],
        ladder: &[Rung],
        word_index: usize,
        input: &str,
        now: f64,
    ) -> StepOutcome {
        if input.chars().all(|c| c.is_ascii_digit()) {
            return match input.parse::<usize>() {
                Ok(n) if (1..=ladder.len()).contains(&n) => {
                    let rung = &ladder[n - 1];
                    scheduler::reschedule(&mut words[word_index], self.mode, rung, now);
                    let due = words[word_index].due(self.mode);
                    self.advance();
                    StepOutcome::Graded {
                        rung: n,
                        label: rung.label.clone(),
                        due,
                    }
                }
                _ => StepOutcome::Invalid(input.to_string()),
            };
        }

        // A lone ASCII letter is a mistyped command, not an answer.
        let mut chars = input.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            if c.is_ascii_alphanumeric() {
                return StepOutcome::Invalid(input.to_string());
            }
        }

        StepOutcome::Answered(evaluate_answer(&words[word_index], self.mode, input))
    }

    fn advance(&mut self) {
        self.cursor += 1;
        self.face = initial_face(self.mode);
    }
}

fn initial_face(mode: ReviewMode) -> Face {
    match mode {
        // Active recall prompts with the meanings and asks for the hanzi.
        ReviewMode::Active => Face::Back,
        ReviewMode::Passive => Face::Front,
    }
}

/// Compare a free-text answer against the card.
///
/// Active mode matches the hanzi exactly, falling back to a partial
/// verdict when any character overlaps. Passive mode matches any meaning
/// text case-insensitively. Evaluation never grades or advances.
pub fn evaluate_answer(word: &Word, mode: ReviewMode, answer: &str) -> Verdict {
    match mode {
        ReviewMode::Active => {
            if answer == word.hanzi {
                Verdict::Correct
            } else if answer.chars().any(|c| word.hanzi.contains(c)) {
                Verdict::Partial
            } else {
                Verdict::Incorrect
            }
        }
        ReviewMode::Passive => {
            let wanted = answer.to_lowercase();
            if word
                .meanings
                .iter()
                .any(|meaning| meaning.text.to_lowercase() == wanted)
            {
                Verdict::Correct
            } else {
                Verdict::Incorrect
            }
        }
    }
}
