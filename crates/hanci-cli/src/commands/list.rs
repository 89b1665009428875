//! The `hanci list` command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::TimeZone;

use hanci_core::model::{ReviewMode, Word};
use hanci_core::scheduler::now_epoch;
use hanci_core::store::WordStore;

pub fn execute(file: PathBuf, mode: String, format: String) -> Result<()> {
    let mode: ReviewMode = mode.parse().map_err(|e: String| anyhow::anyhow!("{}", e))?;
    let store = WordStore::load(&file)
        .with_context(|| format!("failed to load word database {}", file.display()))?;

    match format.as_str() {
        "table" => {
            if store.words.is_empty() {
                println!("No words in {}.", file.display());
                return Ok(());
            }
            let table = word_table(&store.words, mode);
            println!("{table}");
            println!("{} words.", store.words.len());
        }
        "json" => {
            println!("{}", serde_json::to_string_pretty(&store.words)?);
        }
        other => anyhow::bail!("unknown format: {other} (expected table or json)"),
    }
    Ok(())
}

pub(crate) fn word_table(words: &[Word], mode: ReviewMode) -> comfy_table::Table {
    use comfy_table::{Cell, Table};

    let now = now_epoch();
    let mut table = Table::new();
    table.set_header(vec!["Hanzi", "Pinyin", "Meanings", "Due"]);

    for word in words {
        let meanings = word
            .meanings
            .iter()
            .map(|meaning| {
                if meaning.tag.is_empty() {
                    meaning.text.clone()
                } else {
                    format!("[{}] {}", meaning.tag, meaning.text)
                }
            })
            .collect::<Vec<_>>()
            .join("; ");
        table.add_row(vec![
            Cell::new(&word.hanzi),
            Cell::new(&word.pinyin),
            Cell::new(meanings),
            Cell::new(format_due(word.due(mode), now)),
        ]);
    }

    table
}

fn format_due(due: f64, now: f64) -> String {
    if due == 0.0 {
        "new".to_string()
    } else if due <= now {
        "due".to_string()
    } else {
        match chrono::Local.timestamp_opt(due as i64, 0).single() {
            Some(ts) => ts.format("%Y-%m-%d %H:%M").to_string(),
            None => format!("{due}"),
        }
    }
}
