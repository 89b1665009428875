//! End-to-end review session tests driving the binary over piped stdin.

use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const TWO_WORDS: &str = "<Word>你好
<Pron>nǐhǎo
<meaning>
<1>[int] hello
<2>hi
<example>
<1>
\t\t\t你好世界 : hello world
<2>
<activedue>0
<passivedue>0
<Word>再见
<Pron>zàijiàn
<meaning>
<1>goodbye
<example>
<1>
<activedue>0
<passivedue>0
";

const ONE_WORD: &str = "<Word>你好
<Pron>nǐhǎo
<meaning>
<1>[int] hello
<example>
<1>
\t\t\t你好世界 : hello world
<activedue>0
<passivedue>0
";

fn hanci(dir: &TempDir) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("hanci").unwrap();
    cmd.env("HOME", dir.path()).env_remove("HANCI_DICTIONARY");
    cmd
}

fn write_db(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("words.txt");
    std::fs::write(&path, content).unwrap();
    path
}

fn passive_dues(path: &PathBuf) -> Vec<f64> {
    let content = std::fs::read_to_string(path).unwrap();
    content
        .lines()
        .filter_map(|line| line.strip_prefix("<passivedue>"))
        .map(|v| v.parse().unwrap())
        .collect()
}

#[test]
fn grading_every_word_reschedules_and_saves() {
    let dir = TempDir::new().unwrap();
    let db = write_db(&dir, TWO_WORDS);

    hanci(&dir)
        .arg("review")
        .arg(&db)
        .arg("--seed")
        .arg("7")
        .write_stdin("1\n1\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("2 of 2 words due"))
        .stdout(predicate::str::contains("Moving to next stack (5 minutes)."))
        .stdout(predicate::str::contains("All done!"));

    let dues = passive_dues(&db);
    assert_eq!(dues.len(), 2);
    assert!(dues.iter().all(|&due| due > 0.0), "{dues:?}");
}

#[test]
fn quit_saves_graded_words_and_skips_the_rest() {
    let dir = TempDir::new().unwrap();
    let db = write_db(&dir, TWO_WORDS);

    hanci(&dir)
        .arg("review")
        .arg(&db)
        .arg("--seed")
        .arg("7")
        .write_stdin("2\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Moving to next stack (one hour)."))
        .stdout(predicate::str::contains("Saved"));

    let dues = passive_dues(&db);
    let graded = dues.iter().filter(|&&due| due > 0.0).count();
    assert_eq!(graded, 1, "{dues:?}");
}

#[test]
fn input_eof_saves_what_was_graded() {
    let dir = TempDir::new().unwrap();
    let db = write_db(&dir, TWO_WORDS);

    hanci(&dir)
        .arg("review")
        .arg(&db)
        .write_stdin("3\n")
        .assert()
        .success();

    let dues = passive_dues(&db);
    let graded = dues.iter().filter(|&&due| due > 0.0).count();
    assert_eq!(graded, 1, "{dues:?}");
}

#[test]
fn skipping_leaves_dues_untouched() {
    let dir = TempDir::new().unwrap();
    let db = write_db(&dir, TWO_WORDS);

    hanci(&dir)
        .arg("review")
        .arg(&db)
        .write_stdin("n\nn\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("All done!"));

    assert_eq!(passive_dues(&db), vec![0.0, 0.0]);
}

#[test]
fn active_mode_touches_only_active_dues() {
    let dir = TempDir::new().unwrap();
    let db = write_db(&dir, ONE_WORD);

    hanci(&dir)
        .arg("review")
        .arg(&db)
        .arg("--mode")
        .arg("a")
        .write_stdin("4\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Moving to next stack (seven days)."));

    let content = std::fs::read_to_string(&db).unwrap();
    let active: f64 = content
        .lines()
        .find_map(|line| line.strip_prefix("<activedue>"))
        .unwrap()
        .parse()
        .unwrap();
    assert!(active > 0.0);
    assert_eq!(passive_dues(&db), vec![0.0]);
}

#[test]
fn flip_reveals_the_meanings() {
    let dir = TempDir::new().unwrap();
    let db = write_db(&dir, ONE_WORD);

    hanci(&dir)
        .arg("review")
        .arg(&db)
        .write_stdin("\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("1) hello"));
}

#[test]
fn pinyin_toggle_rerenders_the_card() {
    let dir = TempDir::new().unwrap();
    let db = write_db(&dir, ONE_WORD);

    hanci(&dir)
        .arg("review")
        .arg(&db)
        .write_stdin("p\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Showing pinyin"))
        .stdout(predicate::str::contains("nǐhǎo"));
}

#[test]
fn examples_are_shown_on_request() {
    let dir = TempDir::new().unwrap();
    let db = write_db(&dir, ONE_WORD);

    hanci(&dir)
        .arg("review")
        .arg(&db)
        .write_stdin("x\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("你好世界"))
        .stdout(predicate::str::contains("hello world"));
}

#[test]
fn passive_answers_are_checked_case_insensitively() {
    let dir = TempDir::new().unwrap();
    let db = write_db(&dir, ONE_WORD);

    hanci(&dir)
        .arg("review")
        .arg(&db)
        .write_stdin("HELLO\nfarewell\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Correct"))
        .stdout(predicate::str::contains("Incorrect"));
}

#[test]
fn active_answers_grade_exact_partial_incorrect() {
    let dir = TempDir::new().unwrap();
    let db = write_db(&dir, ONE_WORD);

    hanci(&dir)
        .arg("review")
        .arg(&db)
        .arg("--mode")
        .arg("active")
        .write_stdin("再见\n好\n你好\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Incorrect"))
        .stdout(predicate::str::contains("partial match"))
        .stdout(predicate::str::contains("Correct"));
}

#[test]
fn unknown_command_is_reported_without_advancing() {
    let dir = TempDir::new().unwrap();
    let db = write_db(&dir, ONE_WORD);

    hanci(&dir)
        .arg("review")
        .arg(&db)
        .write_stdin("z\n9\nq\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("Invalid command 'z'"))
        .stderr(predicate::str::contains("Invalid command '9'"));

    assert_eq!(passive_dues(&db), vec![0.0]);
}

#[test]
fn dictionary_notes_appear_when_configured() {
    let dir = TempDir::new().unwrap();
    let db = write_db(&dir, ONE_WORD);
    let dict = dir.path().join("cedict.txt");
    std::fs::write(&dict, "你好\tnǐ hǎo\thello/hi\n你们\tnǐ men\tyou (plural)\n").unwrap();

    hanci(&dir)
        .arg("review")
        .arg(&db)
        .arg("--dictionary")
        .arg(&dict)
        .write_stdin("d\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("nǐ hǎo"))
        .stdout(predicate::str::contains("你们"));
}

#[test]
fn missing_dictionary_degrades_to_no_lookups() {
    let dir = TempDir::new().unwrap();
    let db = write_db(&dir, ONE_WORD);

    hanci(&dir)
        .arg("review")
        .arg(&db)
        .arg("--dictionary")
        .arg(dir.path().join("absent.txt"))
        .write_stdin("d\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved"));
}

#[test]
fn future_words_are_deferred() {
    let dir = TempDir::new().unwrap();
    let future = "<Word>你好\n<meaning>\n<1>hello\n<example>\n<1>\n<activedue>0\n<passivedue>99999999999\n\
<Word>再见\n<meaning>\n<1>goodbye\n<example>\n<1>\n<activedue>0\n<passivedue>0\n";
    let db = write_db(&dir, future);

    hanci(&dir)
        .arg("review")
        .arg(&db)
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("1 of 2 words due"));
}

#[test]
fn graded_word_is_excluded_from_the_next_session() {
    let dir = TempDir::new().unwrap();
    let due_and_future = "<Word>你好\n<meaning>\n<1>hello\n<example>\n<1>\n<activedue>0\n<passivedue>0\n\
<Word>再见\n<meaning>\n<1>goodbye\n<example>\n<1>\n<activedue>0\n<passivedue>99999999999\n";
    let db = write_db(&dir, due_and_future);

    hanci(&dir)
        .arg("review")
        .arg(&db)
        .write_stdin("3\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("1 of 2 words due"))
        .stdout(predicate::str::contains("Moving to next stack (one day)."));

    // The word just pushed out a day is no longer due.
    hanci(&dir)
        .arg("review")
        .arg(&db)
        .assert()
        .success()
        .stdout(predicate::str::contains("0 of 2 words due"))
        .stdout(predicate::str::contains("Nothing to review."));
}

#[test]
fn nothing_due_exits_without_rewriting_the_file() {
    let dir = TempDir::new().unwrap();
    let future = "<Word>你好\n<meaning>\n<1>hello\n<example>\n<1>\n<activedue>0\n<passivedue>99999999999\n";
    let db = write_db(&dir, future);

    hanci(&dir)
        .arg("review")
        .arg(&db)
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to review."));

    assert_eq!(std::fs::read_to_string(&db).unwrap(), future);
}

#[test]
fn configured_ladder_drives_the_grading_labels() {
    let dir = TempDir::new().unwrap();
    let db = write_db(&dir, ONE_WORD);
    let config = dir.path().join("custom.toml");
    std::fs::write(
        &config,
        "[[intervals]]\nlabel = \"right away\"\nseconds = 60\n",
    )
    .unwrap();

    hanci(&dir)
        .arg("review")
        .arg(&db)
        .arg("--config")
        .arg(&config)
        .write_stdin("1\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("1) right away"))
        .stdout(predicate::str::contains("Moving to next stack (right away)."));

    // A one-rung ladder makes "2" an invalid grade.
    let db2 = dir.path().join("words2.txt");
    std::fs::write(&db2, ONE_WORD).unwrap();
    hanci(&dir)
        .arg("review")
        .arg(&db2)
        .arg("--config")
        .arg(&config)
        .write_stdin("2\nq\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("Invalid command '2'"));
}
