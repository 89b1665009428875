//! Interval scheduling for review sessions.
//!
//! Scheduling is deliberately simple: each word carries one raw epoch
//! timestamp per review mode, and grading a card replaces that timestamp
//! with `now + interval` for the interval the user picked off the ladder.
//! There is no ease factor and no review history. A word is eligible when
//! its timestamp is in the past, and `0.0` (never scheduled) is always
//! eligible.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::model::{ReviewMode, Word};

/// One rung of the interval ladder the user grades against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rung {
    /// Human label shown in the grading prompt, e.g. "seven days".
    pub label: String,
    /// Seconds added to the current time when this rung is picked.
    pub seconds: u64,
}

impl Rung {
    pub fn new(label: impl Into<String>, seconds: u64) -> Self {
        Self {
            label: label.into(),
            seconds,
        }
    }
}

/// The built-in ladder: six rungs from five minutes to a year.
pub fn default_ladder() -> Vec<Rung> {
    vec![
        Rung::new("5 minutes", 5 * 60),
        Rung::new("one hour", 3600),
        Rung::new("one day", 24 * 3600),
        Rung::new("seven days", 7 * 24 * 3600),
        Rung::new("one month", 31 * 24 * 3600),
        Rung::new("one year", 365 * 24 * 3600),
    ]
}

/// The words picked for one session, as indices into the store's word
/// vector, already shuffled into presentation order.
#[derive(Debug)]
pub struct DuePool {
    pub indices: Vec<usize>,
    /// How many words were skipped because their due time is still ahead.
    pub deferred: usize,
}

/// Select every word due for review in `mode` at time `now` and shuffle
/// the result.
///
/// Eligibility is `due <= now`, so a word scheduled for exactly `now` is
/// reviewable and a fresh word (`0.0`) always is. The caller owns the rng
/// so sessions can be made deterministic.
pub fn select_due<R: Rng + ?Sized>(
    words: &[Word],
    mode: ReviewMode,
    now: f64,
    rng: &mut R,
) -> DuePool {
    let mut indices: Vec<usize> = words
        .iter()
        .enumerate()
        .filter(|(_, word)| word.due(mode) <= now)
        .map(|(i, _)| i)
        .collect();
    let deferred = words.len() - indices.len();
    indices.shuffle(rng);
    DuePool { indices, deferred }
}

/// Push `word` out by the picked rung, touching only the timestamp for
/// `mode`.
pub fn reschedule(word: &mut Word, mode: ReviewMode, rung: &Rung, now: f64) {
    *word.due_mut(mode) = now + rung.seconds as f64;
}

/// Current wall-clock time as fractional epoch seconds, the unit every
/// due timestamp is stored in.
pub fn now_epoch() -> f64 {
    chrono::Utc::now().timestamp_millis() as f64 / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn word_with_dues(hanzi: &str, active: f64, passive: f64) -> Word {
        let mut word = Word::new(hanzi, "");
        word.active_due = active;
        word.passive_due = passive;
        word
    }

    #[test]
    fn default_ladder_is_ascending() {
        let ladder = default_ladder();
        assert_eq!(ladder.len(), 6);
        assert_eq!(ladder[0].seconds, 300);
        assert_eq!(ladder[5].seconds, 365 * 24 * 3600);
        assert!(ladder.windows(2).all(|pair| pair[0].seconds < pair[1].seconds));
    }

    #[test]
    fn selection_filters_by_mode_field() {
        let words = vec![
            word_with_dues("你好", 50.0, 500.0),
            word_with_dues("再见", 500.0, 50.0),
        ];
        let mut rng = StdRng::seed_from_u64(1);

        let active = select_due(&words, ReviewMode::Active, 100.0, &mut rng);
        assert_eq!(active.indices, vec![0]);
        assert_eq!(active.deferred, 1);

        let passive = select_due(&words, ReviewMode::Passive, 100.0, &mut rng);
        assert_eq!(passive.indices, vec![1]);
        assert_eq!(passive.deferred, 1);
    }

    #[test]
    fn due_exactly_now_is_eligible() {
        let words = vec![word_with_dues("你好", 100.0, 0.0)];
        let mut rng = StdRng::seed_from_u64(1);
        let pool = select_due(&words, ReviewMode::Active, 100.0, &mut rng);
        assert_eq!(pool.indices, vec![0]);
    }

    #[test]
    fn never_scheduled_is_always_eligible() {
        let words = vec![word_with_dues("你好", 0.0, 0.0)];
        let mut rng = StdRng::seed_from_u64(1);
        let pool = select_due(&words, ReviewMode::Passive, 0.0, &mut rng);
        assert_eq!(pool.indices, vec![0]);
        assert_eq!(pool.deferred, 0);
    }

    #[test]
    fn selection_order_is_deterministic_per_seed() {
        let words: Vec<Word> = (0..20)
            .map(|i| word_with_dues(&format!("词{i}"), 0.0, 0.0))
            .collect();

        let mut a = StdRng::seed_from_u64(7);
        let mut b = StdRng::seed_from_u64(7);
        let first = select_due(&words, ReviewMode::Active, 1.0, &mut a);
        let second = select_due(&words, ReviewMode::Active, 1.0, &mut b);
        assert_eq!(first.indices, second.indices);

        let mut sorted = first.indices.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..20).collect::<Vec<_>>());
    }

    #[test]
    fn reschedule_touches_only_the_graded_mode() {
        let mut word = word_with_dues("你好", 11.0, 22.0);
        let rung = Rung::new("one hour", 3600);

        reschedule(&mut word, ReviewMode::Active, &rung, 1000.0);
        assert_eq!(word.active_due, 4600.0);
        assert_eq!(word.passive_due, 22.0);

        reschedule(&mut word, ReviewMode::Passive, &rung, 2000.0);
        assert_eq!(word.passive_due, 5600.0);
        assert_eq!(word.active_due, 4600.0);
    }
}
