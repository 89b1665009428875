//! The `hanci init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create hanci.toml
    if std::path::Path::new("hanci.toml").exists() {
        println!("hanci.toml already exists, skipping.");
    } else {
        std::fs::write("hanci.toml", SAMPLE_CONFIG)?;
        println!("Created hanci.toml");
    }

    // Create a starter word list
    std::fs::create_dir_all("wordlists")?;
    let example_path = std::path::Path::new("wordlists/example.txt");
    if example_path.exists() {
        println!("wordlists/example.txt already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_WORDLIST)?;
        println!("Created wordlists/example.txt");
    }

    println!("\nNext steps:");
    println!("  1. Run: hanci review wordlists/example.txt");
    println!("  2. Grade each word 1-6 to schedule its next review");
    println!("  3. Add your own words to the file as you study");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# hanci configuration

# Save after every N grading actions (0 = only on quit).
autosave_every = 0

# Uncomment to enable in-session dictionary lookups.
# dictionary = "cedict.txt"

# Grading ladder, shortest to longest.
[[intervals]]
label = "5 minutes"
seconds = 300

[[intervals]]
label = "one hour"
seconds = 3600

[[intervals]]
label = "one day"
seconds = 86400

[[intervals]]
label = "seven days"
seconds = 604800

[[intervals]]
label = "one month"
seconds = 2678400

[[intervals]]
label = "one year"
seconds = 31536000
"#;

const EXAMPLE_WORDLIST: &str = "<Word>你好
<Pron>nǐhǎo
<meaning>
<1>[int] hello
<2>hi
<example>
<1>
\t\t\t你好，认识你很高兴 : hello, nice to meet you
<2>
<activedue>0
<passivedue>0
<Word>谢谢
<Pron>xièxie
<meaning>
<1>thank you
<example>
<1>
\t\t\t谢谢你的帮助 : thank you for your help
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
<Word>学习
<Pron>xuéxí
<meaning>
<1>[v] to study
<2>[n] learning
<example>
<1>
\t\t\t我在学习中文 : I am studying Chinese
<2>
<activedue>0
<passivedue>0
<Word>朋友
<Pron>péngyou
<meaning>
<1>friend
<example>
<1>
\t\t\t他是我的好朋友 : he is my good friend
<activedue>0
<passivedue>0
";
