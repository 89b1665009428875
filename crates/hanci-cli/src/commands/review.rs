//! The `hanci review` command.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;

use hanci_core::config::load_config_from;
use hanci_core::dict::{DictLookup, DictNotes};
use hanci_core::model::{ReviewMode, Word};
use hanci_core::scheduler::{now_epoch, select_due, Rung};
use hanci_core::session::{Face, ReviewSession, StepOutcome};
use hanci_core::store::WordStore;
use hanci_dict::Gazetteer;

pub fn execute(
    file: PathBuf,
    mode: String,
    config_path: Option<PathBuf>,
    dictionary: Option<PathBuf>,
    seed: Option<u64>,
) -> Result<()> {
    let mode: ReviewMode = mode.parse().map_err(|e: String| anyhow::anyhow!("{}", e))?;
    let config = load_config_from(config_path.as_deref())?;

    // Load the word database
    let mut store = WordStore::load(&file)
        .with_context(|| format!("failed to load word database {}", file.display()))?;
    tracing::info!("loaded {} words from {}", store.words.len(), file.display());

    // Load the dictionary, if there is one
    let gazetteer = load_dictionary(dictionary.or_else(|| config.dictionary.clone()));

    // Build the due-pool
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    };
    let pool = select_due(&store.words, mode, now_epoch(), &mut rng);
    println!(
        "{} of {} words due in {} mode.",
        pool.indices.len(),
        store.words.len(),
        mode
    );
    if pool.indices.is_empty() {
        println!("Nothing to review.");
        return Ok(());
    }

    let dict_ref = gazetteer.as_ref().map(|g| g as &dyn DictLookup);
    let mut session = ReviewSession::new(mode, pool.indices, dict_ref);

    let stdin = io::stdin();
    let mut input = stdin.lock().lines();
    let mut grades_since_save = 0usize;

    render_card(&session, &store.words);
    while !session.is_finished() {
        print_choices(&config.intervals);
        print!(">>> ");
        io::stdout().flush()?;

        let Some(line) = input.next() else {
            // Input closed mid-session; save what was graded so far.
            break;
        };
        let line = line.context("failed to read input")?;

        match session.handle_input(&mut store.words, &config.intervals, &line, now_epoch()) {
            StepOutcome::Flipped(_) => {
                if let Some(index) = session.current_index() {
                    render_face(&store.words[index], session.face(), session.show_pinyin());
                }
            }
            StepOutcome::Graded { label, .. } => {
                println!("Moving to next stack ({label}).");
                grades_since_save += 1;
                if config.autosave_every > 0 && grades_since_save >= config.autosave_every {
                    save(&store)?;
                    grades_since_save = 0;
                    tracing::debug!("autosaved {}", store.path().display());
                }
                if !session.is_finished() {
                    render_card(&session, &store.words);
                }
            }
            StepOutcome::Skipped => {
                if !session.is_finished() {
                    render_card(&session, &store.words);
                }
            }
            StepOutcome::Answered(verdict) => println!("{verdict}"),
            StepOutcome::Examples => {
                if let Some(index) = session.current_index() {
                    render_examples(&store.words[index]);
                }
            }
            StepOutcome::PinyinToggled(on) => {
                println!("{}", if on { "Showing pinyin" } else { "Hiding pinyin" });
                if let Some(index) = session.current_index() {
                    render_face(&store.words[index], session.face(), session.show_pinyin());
                }
            }
            StepOutcome::Dictionary(Some(notes)) => render_notes(&notes),
            StepOutcome::Dictionary(None) => {
                tracing::debug!("dictionary lookup requested but none is loaded");
            }
            StepOutcome::Listing => {
                let table = super::list::word_table(&store.words, mode);
                println!("{table}");
            }
            StepOutcome::Help => print_help(),
            StepOutcome::Quit => {
                save(&store)?;
                println!("Saved {}.", store.path().display());
                return Ok(());
            }
            StepOutcome::Invalid(raw) => {
                eprintln!("Invalid command '{raw}' (type 'h' for help)");
            }
        }
    }

    save(&store)?;
    if session.is_finished() {
        println!("All done!");
    }
    Ok(())
}

fn load_dictionary(path: Option<PathBuf>) -> Option<Gazetteer> {
    let path = path?;
    match Gazetteer::load(&path) {
        Ok(dict) => {
            tracing::info!(
                "loaded {} dictionary entries from {}",
                dict.len(),
                path.display()
            );
            Some(dict)
        }
        Err(e) => {
            tracing::warn!("{e}, continuing without dictionary");
            None
        }
    }
}

fn save(store: &WordStore) -> Result<()> {
    store
        .save()
        .with_context(|| format!("failed to save {}", store.path().display()))
}

fn render_card(session: &ReviewSession, words: &[Word]) {
    let (position, total) = session.position();
    let Some(index) = session.current_index() else {
        return;
    };
    println!("====================================================");
    println!("Word {position} of {total}:");
    render_face(&words[index], session.face(), session.show_pinyin());
}

fn render_face(word: &Word, face: Face, show_pinyin: bool) {
    match face {
        Face::Front => render_front(word, show_pinyin),
        Face::Back => render_back(word),
    }
}

fn render_front(word: &Word, show_pinyin: bool) {
    println!("----------------------------------------------------");
    if show_pinyin && !word.pinyin.is_empty() {
        println!("{}\t\t\t{}", word.hanzi, word.pinyin);
    } else {
        println!("{}", word.hanzi);
    }
    println!("----------------------------------------------------");
}

fn render_back(word: &Word) {
    println!("----------------------------------------------------");
    for (i, meaning) in word.meanings.iter().enumerate() {
        if meaning.tag.is_empty() {
            println!("\t{}) {}", i + 1, meaning.text);
        } else {
            println!("\t{}) {}\t\t\t[{}]", i + 1, meaning.text, meaning.tag);
        }
    }
    println!("----------------------------------------------------");
}

fn render_examples(word: &Word) {
    println!("----------------------------------------------------");
    for (i, meaning) in word.meanings.iter().enumerate() {
        if meaning.examples.is_empty() {
            continue;
        }
        println!("\t{})", i + 1);
        for example in &meaning.examples {
            println!("\t\t{}", example.chinese);
            println!("\t\t{}", example.english);
            println!();
        }
    }
    println!("----------------------------------------------------");
}

fn render_notes(notes: &DictNotes) {
    match &notes.entry {
        Some(hit) => {
            println!("{}  [{}]", notes.headword, hit.pronunciation);
            for gloss in &hit.glosses {
                println!("\t{gloss}");
            }
        }
        None => println!("{}: no dictionary entry", notes.headword),
    }
    for related in &notes.related {
        if !related.starting.is_empty() {
            println!(
                "\twords starting with {}: {}",
                related.character,
                related.starting.join(", ")
            );
        }
        if !related.ending.is_empty() {
            println!(
                "\twords ending with {}: {}",
                related.character,
                related.ending.join(", ")
            );
        }
    }
}

fn print_choices(ladder: &[Rung]) {
    let line = ladder
        .iter()
        .enumerate()
        .map(|(i, rung)| format!("{}) {}", i + 1, rung.label))
        .collect::<Vec<_>>()
        .join("  ");
    println!("{line}");
}

fn print_help() {
    println!("ENTER - Flip card");
    println!("1-N   - Grade recall and schedule the next review");
    println!("p     - Show/hide pinyin");
    println!("n     - Next word (no rescheduling)");
    println!("x     - Show examples");
    println!("d     - Dictionary notes for this word");
    println!("l     - List all words");
    println!("q     - Save and quit");
    println!("Anything else is checked as an answer.");
}
