use bpydictapp::alphabet::PartitionKey;
use bpydictapp::api::{AlphabetCount, EntryPage, StatsReport};
use bpydictapp::commands::{CmdMessage, MessageLevel};
use bpydictapp::model::{Entry, KeyedEntry};
use colored::Colorize;
use serde::Serialize;
use unicode_width::UnicodeWidthStr;

const WORD_WIDTH: usize = 24;

pub(super) fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
        }
    }
}

/// One line per word: letter, Bishnupriya, Bengali, English, id.
pub(super) fn print_keyed_entries(entries: &[KeyedEntry]) {
    if entries.is_empty() {
        println!("No words found.");
        return;
    }
    for keyed in entries {
        print_line(Some(&keyed.key), &keyed.entry);
    }
}

pub(super) fn print_entries(entries: &[Entry]) {
    if entries.is_empty() {
        println!("No words found.");
        return;
    }
    for entry in entries {
        print_line(None, entry);
    }
}

fn print_line(key: Option<&PartitionKey>, entry: &Entry) {
    let letter = key.map(|k| format!("{} ", k.as_str().yellow())).unwrap_or_default();
    let padding = WORD_WIDTH.saturating_sub(entry.bpy.width());
    let translations = [entry.bn.as_str(), entry.en.as_str()]
        .into_iter()
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" · ");
    println!(
        "{}{}{} {}  {}",
        letter,
        entry.bpy.bold(),
        " ".repeat(padding),
        translations,
        entry.id.dimmed()
    );
}

/// Every field of one word, enrichment included.
pub(super) fn print_entry_detail(keyed: &KeyedEntry) -> anyhow::Result<()> {
    let entry = &keyed.entry;
    println!("{} {}", keyed.key.as_str().yellow(), entry.bpy.bold());
    println!("--------------------------------");
    println!("{:>8}  {}", "bn".dimmed(), entry.bn);
    println!("{:>8}  {}", "en".dimmed(), entry.en);
    println!("{:>8}  {}", "id".dimmed(), entry.id);
    for (field, value) in &entry.extra {
        let rendered = match value {
            serde_json::Value::String(s) => s.clone(),
            other => serde_json::to_string(other)?,
        };
        println!("{:>8}  {}", field.dimmed(), rendered);
    }
    Ok(())
}

pub(super) fn print_alphabets(keys: &[PartitionKey]) {
    let letters: Vec<&str> = keys.iter().map(|k| k.as_str()).collect();
    println!("{}", letters.join(" "));
}

pub(super) fn print_alphabet_counts(counts: &[AlphabetCount]) {
    for count in counts {
        let line = format!("{:>4}  {}", count.count, count.letter);
        if count.count == 0 {
            println!("{}", line.dimmed());
        } else {
            println!("{}", line);
        }
    }
}

pub(super) fn print_stats(stats: &StatsReport) {
    println!("{:>16}  {}", "Words", stats.total_words.to_string().bold());
    println!("{:>16}  {}", "Pending review", stats.pending_words);
    println!("{:>16}  {}", "Letters", stats.total_alphabets);
    if !stats.categories.is_empty() {
        println!();
        println!("{}", "Top categories".bold());
        for category in &stats.categories {
            println!("{:>6}  {}", category.count, category.name);
        }
    }
}

pub(super) fn print_page(page: &EntryPage) {
    print_keyed_entries(&page.words);
    println!(
        "{}",
        format!(
            "Page {} of {} ({} words)",
            page.page,
            page.total_pages.max(1),
            page.total
        )
        .dimmed()
    );
}
